//! Configuration types for HyperColl rendering.
//!
//! All types implement [`serde::Deserialize`] with defaults for every field, so
//! a configuration file only needs to name what it changes.
//!
//! # Overview
//!
//! - [`RenderOptions`] - Radius, patch shape, palette and decorations of a render call.
//! - [`SectorSpec`] - One ring of property sectors around the diagram.
//! - [`BoundaryStroke`] - The rules drawn between neighbouring sectors.
//!
//! # Example
//!
//! ```
//! # use hypercoll::config::RenderOptions;
//! let options = RenderOptions::default().with_radius(200.0).with_curvature(0.7);
//! assert_eq!(options.palette().len(), 15);
//! assert!(options.show_labels());
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use hypercoll_core::{color::Color, draw::FontSpec};

use crate::style::Style;

/// The dark blue used behind the diagram by default.
fn navy() -> Color {
    Color::from_rgb(0.039_215_7, 0.101_961, 0.274_51)
}

fn white() -> Color {
    Color::from_rgb(1.0, 1.0, 1.0)
}

/// The default patch palette, fifteen colors that read well on a dark
/// background.
pub fn default_palette() -> Vec<Color> {
    [
        [0.368_417, 0.506_779, 0.709_798],
        [0.880_722, 0.611_041, 0.142_051],
        [0.560_181, 0.691_569, 0.194_885],
        [0.922_526, 0.385_626, 0.209_179],
        [0.528_488, 0.470_624, 0.701_351],
        [0.772_079, 0.431_554, 0.102_387],
        [0.363_898, 0.618_501, 0.782_349],
        [1.0, 0.75, 0.0],
        [0.647_624, 0.378_16, 0.614_037],
        [0.571_589, 0.586_483, 0.0],
        [0.915, 0.3325, 0.2125],
        [0.400_822, 0.522_007, 0.85],
        [0.972_829, 0.621_644, 0.073_362],
        [0.736_783, 0.358, 0.503_027],
        [0.280_264, 0.715, 0.429_209],
    ]
    .into_iter()
    .map(|[r, g, b]| Color::from_rgb(r, g, b))
    .collect()
}

/// Options for [`HyperColl::render`](crate::HyperColl::render).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Radius of the diagram including the rim labels, in points.
    radius: f64,
    /// Pin width as a fraction of the slot spacing, `0..=1`.
    span: f64,
    /// Connector curvature, `0..=1`; `0.5` is approximately circular.
    curvature: f64,
    /// Patch colors, used cyclically.
    palette: Vec<Color>,
    fill: bool,
    fill_opacity: f32,
    edge_opacity: f32,
    edge_width: f64,
    show_labels: bool,
    /// Gap between the labels and both the rim and the patches.
    label_spacing: f64,
    label_font: FontSpec,
    label_color: Color,
    background_disk: bool,
    background_color: Color,
    background_circle: bool,
    background_circle_color: Color,
    background_circle_width: f64,
    /// Order in which patch edges are stroked, as collection indices.
    edge_order: Option<Vec<usize>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            radius: 250.0,
            span: 0.1,
            curvature: 0.6,
            palette: default_palette(),
            fill: true,
            fill_opacity: 0.3,
            edge_opacity: 1.0,
            edge_width: 1.0,
            show_labels: true,
            label_spacing: 5.0,
            label_font: FontSpec::default(),
            label_color: white(),
            background_disk: true,
            background_color: navy(),
            background_circle: true,
            background_circle_color: navy(),
            background_circle_width: 1.0,
            edge_order: None,
        }
    }
}

impl RenderOptions {
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_span(mut self, span: f64) -> Self {
        self.span = span;
        self
    }

    pub fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = curvature;
        self
    }

    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    /// Enables or disables the fill pass.
    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_opacity(mut self, fill_opacity: f32, edge_opacity: f32) -> Self {
        self.fill_opacity = fill_opacity;
        self.edge_opacity = edge_opacity;
        self
    }

    pub fn with_edge_width(mut self, edge_width: f64) -> Self {
        self.edge_width = edge_width;
        self
    }

    /// Shows or hides the rim labels. Hidden labels still define the slots.
    pub fn with_labels(mut self, show_labels: bool) -> Self {
        self.show_labels = show_labels;
        self
    }

    pub fn with_label_spacing(mut self, label_spacing: f64) -> Self {
        self.label_spacing = label_spacing;
        self
    }

    pub fn with_label_font(mut self, label_font: FontSpec) -> Self {
        self.label_font = label_font;
        self
    }

    pub fn with_label_color(mut self, label_color: Color) -> Self {
        self.label_color = label_color;
        self
    }

    /// Sets the background disk color, or disables the disk with `None`.
    pub fn with_background_disk(mut self, color: Option<Color>) -> Self {
        self.background_disk = color.is_some();
        if let Some(color) = color {
            self.background_color = color;
        }
        self
    }

    /// Sets the background circle color and width, or disables it with `None`.
    pub fn with_background_circle(mut self, circle: Option<(Color, f64)>) -> Self {
        self.background_circle = circle.is_some();
        if let Some((color, width)) = circle {
            self.background_circle_color = color;
            self.background_circle_width = width;
        }
        self
    }

    pub fn with_edge_order(mut self, edge_order: Option<Vec<usize>>) -> Self {
        self.edge_order = edge_order;
        self
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn span(&self) -> f64 {
        self.span
    }

    pub fn curvature(&self) -> f64 {
        self.curvature
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn fill(&self) -> bool {
        self.fill
    }

    pub fn fill_opacity(&self) -> f32 {
        self.fill_opacity
    }

    pub fn edge_opacity(&self) -> f32 {
        self.edge_opacity
    }

    pub fn edge_width(&self) -> f64 {
        self.edge_width
    }

    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    pub fn label_spacing(&self) -> f64 {
        self.label_spacing
    }

    pub fn label_font(&self) -> &FontSpec {
        &self.label_font
    }

    pub fn label_color(&self) -> Color {
        self.label_color
    }

    /// Returns the background disk color, or `None` when the disk is disabled.
    pub fn background_disk(&self) -> Option<Color> {
        self.background_disk.then_some(self.background_color)
    }

    /// Returns the background circle color and width, or `None` when disabled.
    pub fn background_circle(&self) -> Option<(Color, f64)> {
        self.background_circle
            .then_some((self.background_circle_color, self.background_circle_width))
    }

    pub fn edge_order(&self) -> Option<&[usize]> {
        self.edge_order.as_deref()
    }
}

/// The stroke of the radial rules between sectors.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundaryStroke {
    pub color: Color,
    /// Rule width in points; `0` or less disables the rules.
    pub width: f64,
}

impl Default for BoundaryStroke {
    fn default() -> Self {
        Self {
            color: white(),
            width: 1.0,
        }
    }
}

/// One ring of sectors between `inner_radius` and `outer_radius`.
///
/// Every label of the diagram is assigned a property; runs of neighbouring
/// labels with the same property form a sector. Sectors are labeled with the
/// text from `labels`, falling back to the property itself.
///
/// # Examples
///
/// ```
/// # use hypercoll::{Style, config::SectorSpec};
/// # use hypercoll_core::color::Color;
/// # use indexmap::IndexMap;
/// let properties = IndexMap::from([
///     ("Norway".to_string(), "EFTA".to_string()),
///     ("Poland".to_string(), "EU".to_string()),
/// ]);
/// let spec = SectorSpec::new(251.0, 260.0, properties)
///     .without_labels()
///     .with_background(Some(Style::Constant(Color::new("#003399").unwrap())));
/// assert!(!spec.show_labels());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectorSpec {
    inner_radius: f64,
    outer_radius: f64,
    /// Property of every label.
    properties: IndexMap<String, String>,
    /// Display text per property.
    #[serde(default)]
    labels: IndexMap<String, String>,
    #[serde(default = "default_true")]
    show_labels: bool,
    #[serde(default = "default_sector_font")]
    font: Style<FontSpec>,
    #[serde(default = "default_foreground")]
    foreground: Style<Color>,
    #[serde(default = "default_background")]
    background: Option<Style<Color>>,
    /// Whether the wedges are filled at all.
    #[serde(default = "default_true")]
    show_background: bool,
    #[serde(default = "default_boundary")]
    boundary: Option<BoundaryStroke>,
}

fn default_true() -> bool {
    true
}

fn default_sector_font() -> Style<FontSpec> {
    Style::Constant(FontSpec::default().with_size(18.0))
}

fn default_foreground() -> Style<Color> {
    Style::Constant(white())
}

fn default_background() -> Option<Style<Color>> {
    Some(Style::Constant(navy()))
}

fn default_boundary() -> Option<BoundaryStroke> {
    Some(BoundaryStroke::default())
}

impl SectorSpec {
    /// Creates a ring with default styles.
    pub fn new(
        inner_radius: f64,
        outer_radius: f64,
        properties: IndexMap<String, String>,
    ) -> Self {
        Self {
            inner_radius,
            outer_radius,
            properties,
            labels: IndexMap::new(),
            show_labels: true,
            font: default_sector_font(),
            foreground: default_foreground(),
            background: default_background(),
            show_background: true,
            boundary: default_boundary(),
        }
    }

    /// Sets the display text per property.
    pub fn with_labels(mut self, labels: IndexMap<String, String>) -> Self {
        self.labels = labels;
        self.show_labels = true;
        self
    }

    /// Disables the sector labels.
    pub fn without_labels(mut self) -> Self {
        self.show_labels = false;
        self
    }

    pub fn with_font(mut self, font: impl Into<Style<FontSpec>>) -> Self {
        self.font = font.into();
        self
    }

    /// Sets the label color; its alpha is the label opacity.
    pub fn with_foreground(mut self, foreground: impl Into<Style<Color>>) -> Self {
        self.foreground = foreground.into();
        self
    }

    /// Sets the wedge fill, or disables the wedges with `None`.
    pub fn with_background(mut self, background: Option<Style<Color>>) -> Self {
        self.show_background = background.is_some();
        self.background = background;
        self
    }

    /// Sets the boundary rules, or disables them with `None`.
    pub fn with_boundary(mut self, boundary: Option<BoundaryStroke>) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn properties(&self) -> &IndexMap<String, String> {
        &self.properties
    }

    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    /// Returns the display text for `property`, if labels are shown.
    pub fn label_text<'a>(&'a self, property: &'a str) -> Option<&'a str> {
        self.show_labels
            .then(|| self.labels.get(property).map_or(property, String::as_str))
    }

    pub fn font(&self) -> &Style<FontSpec> {
        &self.font
    }

    pub fn foreground(&self) -> &Style<Color> {
        &self.foreground
    }

    /// Returns the wedge fill, or `None` when the wedges are disabled.
    pub fn background(&self) -> Option<&Style<Color>> {
        self.background.as_ref().filter(|_| self.show_background)
    }

    /// Returns the boundary stroke, or `None` when it is disabled or has no width.
    pub fn boundary(&self) -> Option<&BoundaryStroke> {
        self.boundary.as_ref().filter(|stroke| stroke.width > 0.0)
    }
}
