//! Text measurement and glyph outlines.
//!
//! Rim labels need text metrics to size the label ring, and sector labels need
//! the glyph outlines themselves so they can be bent onto an arc. Both needs are
//! served by the [`TextEngine`] trait.
//!
//! # Overview
//!
//! - [`FontSpec`] - Font family, slant, weight and size
//! - [`TextExtents`] - Ink and advance metrics of a single line of text
//! - [`TextEngine`] - Measurement and outline capability
//! - [`CosmicTextEngine`] - Engine backed by cosmic-text shaping and swash outlines
//! - [`HeuristicTextEngine`] - Font-independent engine with fixed-width boxes
//!
//! # Coordinates
//!
//! Extents and outlines use the user-space convention of the drawing surface:
//! the text origin sits on the baseline, x grows along the text and y grows
//! downward, so glyph ink above the baseline has negative y.

use cosmic_text::{
    Attrs, Buffer, CacheKey, Family, FontSystem, Metrics, Shaping, Style, SwashCache, Weight,
};
use kurbo::{BezPath, Point, Rect, Shape};
use log::{info, trace};
use serde::Deserialize;
use swash::zeno::Command;

use crate::error::TextError;

/// Line height as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Font slant.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontSlant {
    /// Returns the SVG `font-style` value.
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Oblique => "oblique",
        }
    }
}

/// Font weight.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    #[default]
    Bold,
}

impl FontWeight {
    /// Returns the SVG `font-weight` value.
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

/// Font selection used for measuring and rendering text.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Family | `"sans-serif"` |
/// | Slant | [`FontSlant::Normal`] |
/// | Weight | [`FontWeight::Bold`] |
/// | Size | `8.0` |
///
/// # Examples
///
/// ```
/// # use hypercoll_core::draw::{FontSpec, FontWeight};
/// let font = FontSpec::new("Open Sans", 9.0).with_weight(FontWeight::Normal);
/// assert_eq!(font.family(), "Open Sans");
/// assert_eq!(font.size(), 9.0);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontSpec {
    family: String,
    slant: FontSlant,
    weight: FontWeight,
    size: f64,
}

impl FontSpec {
    /// Creates a font with the given family and size and default slant and weight.
    pub fn new(family: &str, size: f64) -> Self {
        Self {
            family: family.to_string(),
            size,
            ..Self::default()
        }
    }

    /// Returns a copy with the given slant.
    pub fn with_slant(mut self, slant: FontSlant) -> Self {
        self.slant = slant;
        self
    }

    /// Returns a copy with the given weight.
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Returns a copy with the given size.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn slant(&self) -> FontSlant {
        self.slant
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    fn to_cosmic_family(&self) -> Family<'_> {
        match self.family.as_str() {
            "sans-serif" | "sans" | "Sans" => Family::SansSerif,
            "serif" | "Serif" => Family::Serif,
            "monospace" | "Monospace" => Family::Monospace,
            name => Family::Name(name),
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: String::from("sans-serif"),
            slant: FontSlant::Normal,
            weight: FontWeight::Bold,
            size: 8.0,
        }
    }
}

/// Metrics of a single line of text, relative to its baseline origin.
///
/// `x_bearing`/`y_bearing` locate the top-left corner of the ink box,
/// `width`/`height` give its size, and the advances give where the next
/// text would start.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TextExtents {
    pub x_bearing: f64,
    pub y_bearing: f64,
    pub width: f64,
    pub height: f64,
    pub x_advance: f64,
    pub y_advance: f64,
}

impl TextExtents {
    fn from_ink(ink: Rect, x_advance: f64) -> Self {
        Self {
            x_bearing: ink.x0,
            y_bearing: ink.y0,
            width: ink.width(),
            height: ink.height(),
            x_advance,
            y_advance: 0.0,
        }
    }
}

/// Text measurement and outline capability.
pub trait TextEngine {
    /// Measures a single line of text.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Unmeasurable`] when the engine cannot produce metrics
    /// for non-empty text.
    fn extents(&mut self, text: &str, font: &FontSpec) -> Result<TextExtents, TextError>;

    /// Returns the glyph outlines of a single line of text with the baseline
    /// origin at `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Unmeasurable`] when no glyphs are available.
    fn outline(&mut self, text: &str, font: &FontSpec) -> Result<BezPath, TextError>;
}

/// A font-independent engine suitable for tests and headless environments.
///
/// Every character occupies a `0.6em` cell; visible characters are drawn as a
/// box `0.5em` wide and `0.7em` tall sitting on the baseline.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicTextEngine;

impl HeuristicTextEngine {
    const ADVANCE: f64 = 0.6;
    const CAP_HEIGHT: f64 = 0.7;
    const INSET: f64 = 0.05;
}

impl TextEngine for HeuristicTextEngine {
    fn extents(&mut self, text: &str, font: &FontSpec) -> Result<TextExtents, TextError> {
        let size = font.size();
        let advance = Self::ADVANCE * size * text.chars().count() as f64;
        if text.is_empty() {
            return Ok(TextExtents::default());
        }
        let ink = Rect::new(0.0, -Self::CAP_HEIGHT * size, advance, 0.0);
        Ok(TextExtents::from_ink(ink, advance))
    }

    fn outline(&mut self, text: &str, font: &FontSpec) -> Result<BezPath, TextError> {
        let size = font.size();
        let mut path = BezPath::new();
        for (idx, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let left = Self::ADVANCE * size * idx as f64;
            let cell = Rect::new(
                left + Self::INSET * size,
                -Self::CAP_HEIGHT * size,
                left + (Self::ADVANCE - Self::INSET) * size,
                0.0,
            );
            path.move_to((cell.x0, cell.y0));
            path.line_to((cell.x1, cell.y0));
            path.line_to((cell.x1, cell.y1));
            path.line_to((cell.x0, cell.y1));
            path.close_path();
        }
        Ok(path)
    }
}

/// Text engine backed by cosmic-text shaping and swash glyph outlines.
///
/// It owns a [`FontSystem`] loaded with the system fonts, so creating one is
/// expensive; reuse an instance for a whole diagram.
pub struct CosmicTextEngine {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl std::fmt::Debug for CosmicTextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmicTextEngine").finish_non_exhaustive()
    }
}

impl Default for CosmicTextEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// A shaped glyph positioned relative to the first baseline.
struct PlacedGlyph {
    cache_key: CacheKey,
    x: f64,
    y: f64,
}

impl CosmicTextEngine {
    /// Create a new engine with a default FontSystem
    pub fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        }
    }

    /// Shapes `text` and returns its glyphs and total advance width.
    fn shape(&mut self, text: &str, font: &FontSpec) -> (Vec<PlacedGlyph>, f64) {
        let font_size = font.size() as f32;
        let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT_FACTOR);

        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut self.font_system);

        let weight = match font.weight() {
            FontWeight::Normal => Weight::NORMAL,
            FontWeight::Bold => Weight::BOLD,
        };
        let style = match font.slant() {
            FontSlant::Normal => Style::Normal,
            FontSlant::Italic => Style::Italic,
            FontSlant::Oblique => Style::Oblique,
        };
        let attrs = Attrs::new()
            .family(font.to_cosmic_family())
            .weight(weight)
            .style(style);

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut glyphs = Vec::new();
        let mut advance: f32 = 0.0;
        let mut first_baseline = None;
        for run in buffer.layout_runs() {
            let baseline = *first_baseline.get_or_insert(run.line_y);
            advance = advance.max(run.line_w);
            for glyph in run.glyphs.iter() {
                let physical = glyph.physical((0.0, 0.0), 1.0);
                glyphs.push(PlacedGlyph {
                    cache_key: physical.cache_key,
                    x: physical.x as f64,
                    y: physical.y as f64 + (run.line_y - baseline) as f64,
                });
            }
        }

        (glyphs, advance as f64)
    }

    /// Builds the outline of `text` and returns it together with the advance width.
    fn outline_with_advance(
        &mut self,
        text: &str,
        font: &FontSpec,
    ) -> Result<(BezPath, f64), TextError> {
        let mut path = BezPath::new();
        if text.is_empty() {
            return Ok((path, 0.0));
        }

        let (glyphs, advance) = self.shape(text, font);
        if glyphs.is_empty() {
            return Err(TextError::Unmeasurable {
                text: text.to_string(),
                family: font.family().to_string(),
            });
        }

        for glyph in &glyphs {
            let Some(commands) = self
                .swash_cache
                .get_outline_commands(&mut self.font_system, glyph.cache_key)
            else {
                continue;
            };
            // Font outlines are y-up; the surface is y-down.
            let place = |x: f32, y: f32| Point::new(glyph.x + x as f64, glyph.y - y as f64);
            for command in commands.iter() {
                match command {
                    Command::MoveTo(p) => path.move_to(place(p.x, p.y)),
                    Command::LineTo(p) => path.line_to(place(p.x, p.y)),
                    Command::QuadTo(c, p) => path.quad_to(place(c.x, c.y), place(p.x, p.y)),
                    Command::CurveTo(c1, c2, p) => path.curve_to(
                        place(c1.x, c1.y),
                        place(c2.x, c2.y),
                        place(p.x, p.y),
                    ),
                    Command::Close => path.close_path(),
                }
            }
        }

        trace!(text, glyphs = glyphs.len(), advance; "Built glyph outline");
        Ok((path, advance))
    }
}

impl TextEngine for CosmicTextEngine {
    fn extents(&mut self, text: &str, font: &FontSpec) -> Result<TextExtents, TextError> {
        let (path, advance) = self.outline_with_advance(text, font)?;
        if path.elements().is_empty() {
            // Whitespace only: no ink, but the advance is still meaningful
            return Ok(TextExtents {
                x_advance: advance,
                ..TextExtents::default()
            });
        }
        Ok(TextExtents::from_ink(path.bounding_box(), advance))
    }

    fn outline(&mut self, text: &str, font: &FontSpec) -> Result<BezPath, TextError> {
        self.outline_with_advance(text, font).map(|(path, _)| path)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_font_spec_defaults() {
        let font = FontSpec::default();
        assert_eq!(font.family(), "sans-serif");
        assert_eq!(font.slant(), FontSlant::Normal);
        assert_eq!(font.weight(), FontWeight::Bold);
        assert_approx_eq!(f64, font.size(), 8.0);
    }

    #[test]
    fn test_font_spec_builders() {
        let font = FontSpec::new("Open Sans", 18.0)
            .with_slant(FontSlant::Italic)
            .with_weight(FontWeight::Normal)
            .with_size(12.0);
        assert_eq!(font.family(), "Open Sans");
        assert_eq!(font.slant().to_svg_value(), "italic");
        assert_eq!(font.weight().to_svg_value(), "normal");
        assert_approx_eq!(f64, font.size(), 12.0);
    }

    #[test]
    fn test_heuristic_extents_scale_with_length() {
        let mut engine = HeuristicTextEngine;
        let font = FontSpec::new("sans-serif", 10.0);
        let short = engine.extents("UK", &font).unwrap();
        let long = engine.extents("Switzerland", &font).unwrap();
        assert_approx_eq!(f64, short.width, 12.0, epsilon = 1e-9);
        assert_approx_eq!(f64, long.width, 66.0, epsilon = 1e-9);
        assert_approx_eq!(f64, short.height, 7.0, epsilon = 1e-9);
        assert_approx_eq!(f64, short.y_bearing, -7.0, epsilon = 1e-9);
        assert_approx_eq!(f64, short.x_advance, short.width);
    }

    #[test]
    fn test_heuristic_extents_empty() {
        let mut engine = HeuristicTextEngine;
        let extents = engine.extents("", &FontSpec::default()).unwrap();
        assert_eq!(extents, TextExtents::default());
    }

    #[test]
    fn test_heuristic_outline_skips_whitespace() {
        let mut engine = HeuristicTextEngine;
        let path = engine.outline("E U", &FontSpec::new("serif", 10.0)).unwrap();
        // Two boxes of five elements each: move, three lines, close
        assert_eq!(path.elements().len(), 10);
        let bounds = path.bounding_box();
        assert_approx_eq!(f64, bounds.y0, -7.0, epsilon = 1e-9);
        assert_approx_eq!(f64, bounds.y1, 0.0, epsilon = 1e-9);
        assert_approx_eq!(f64, bounds.x0, 0.5, epsilon = 1e-9);
        assert_approx_eq!(f64, bounds.x1, 17.5, epsilon = 1e-9);
    }
}
