//! HyperColl - Hypergraph collage diagrams.
//!
//! A hypergraph collage places a set of labels around a circle and draws every
//! group of labels (a *collection*) as one closed, curved patch connecting its
//! members. Groups of any size are drawn as a single shape, so many-to-many
//! collaborations read at a glance where a chord diagram would need a bundle
//! of pairwise edges.
//!
//! # Example
//!
//! ```
//! use hypercoll::{HyperColl, config::RenderOptions};
//! use hypercoll_core::draw::{Canvas, HeuristicTextEngine};
//!
//! let labels = ["Austria", "Belgium", "Croatia", "Denmark"];
//! let canvas = Canvas::new(595.0, 595.0, HeuristicTextEngine);
//! let mut diagram = HyperColl::new(labels, canvas, 595.0, 595.0).expect("labels are unique");
//!
//! let projects = [vec!["Austria", "Croatia"], vec!["Belgium", "Croatia", "Denmark"]];
//! let radius = diagram
//!     .render(&projects, &RenderOptions::default())
//!     .expect("collections refer to known labels");
//! assert!(radius < 250.0);
//!
//! let canvas = diagram.finish().expect("canvas finishes once");
//! assert!(!canvas.ops().is_empty());
//! ```

pub mod config;
pub mod labels;
pub mod patch;
pub mod sectors;
pub mod warp;

mod error;
mod label_set;
mod style;

pub use hypercoll_core::{color, draw, geometry};

pub use error::HyperCollError;
pub use label_set::LabelSet;
pub use sectors::Sector;
pub use style::Style;

use std::{f64::consts::TAU, path::Path};

use kurbo::Point;
use log::{debug, info};

use hypercoll_core::{
    color::Color,
    draw::{Canvas, CosmicTextEngine, Surface, TransformGuard},
};

use config::{RenderOptions, SectorSpec};

/// A hypergraph collage drawn onto one surface.
///
/// The surface origin is moved to the page center at construction and stays
/// there; every drawing call restores any temporary transform it makes.
#[derive(Debug)]
pub struct HyperColl<S: Surface> {
    labels: LabelSet,
    surface: S,
    width: f64,
    height: f64,
}

impl HyperColl<Canvas<CosmicTextEngine>> {
    /// Creates a diagram on an SVG canvas of `width` × `height` points that is
    /// written to `path` by [`HyperColl::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error when the labels are empty or not unique.
    pub fn create<I, L>(
        labels: I,
        path: impl AsRef<Path>,
        width: f64,
        height: f64,
    ) -> Result<Self, HyperCollError>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let canvas =
            Canvas::new(width, height, CosmicTextEngine::new()).with_output(path.as_ref());
        Self::new(labels, canvas, width, height)
    }
}

impl<S: Surface> HyperColl<S> {
    /// Creates a diagram over `surface`, a page of `width` × `height` points.
    ///
    /// The first label is placed at angle 0, on the right hand side.
    ///
    /// # Errors
    ///
    /// Returns [`HyperCollError::EmptyLabelSet`] or
    /// [`HyperCollError::DuplicateLabel`] for invalid labels.
    pub fn new<I, L>(
        labels: I,
        mut surface: S,
        width: f64,
        height: f64,
    ) -> Result<Self, HyperCollError>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let labels = LabelSet::new(labels)?;
        surface.translate(width / 2.0, height / 2.0);
        info!(labels = labels.len(), width, height; "Diagram created");

        Ok(Self {
            labels,
            surface,
            width,
            height,
        })
    }

    /// Returns the labels in slot order.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Returns the slot of `label`.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.index_of(label)
    }

    /// Returns the page size.
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Returns the underlying surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Draws the collections and returns the radius the patches were drawn at.
    ///
    /// The drawing order is: background disk, background circle, rim labels,
    /// every patch fill in input order, then every patch edge in
    /// [`RenderOptions::edge_order`]. Collection `i` is painted with palette
    /// color `i mod palette.len()`. When labels are shown the returned radius
    /// is the inner radius left inside them.
    ///
    /// # Errors
    ///
    /// Collections and options are validated before anything is drawn:
    /// unknown or repeated members, empty collections, an empty palette and an
    /// out-of-range edge order are reported as [`HyperCollError`]s. Surface
    /// failures while drawing labels are wrapped in [`HyperCollError::Draw`].
    pub fn render<C, M>(
        &mut self,
        collections: &[C],
        options: &RenderOptions,
    ) -> Result<f64, HyperCollError>
    where
        C: AsRef<[M]>,
        M: AsRef<str>,
    {
        let palette = options.palette();
        if palette.is_empty() {
            return Err(HyperCollError::EmptyPalette);
        }

        let slots = collections
            .iter()
            .enumerate()
            .map(|(index, members)| {
                let slots = self.labels.slots(members.as_ref())?;
                if slots.is_empty() {
                    return Err(HyperCollError::EmptyCollection(index));
                }
                Ok(slots)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let edge_order: Vec<usize> = match options.edge_order() {
            Some(order) => {
                if let Some(&index) = order.iter().find(|&&index| index >= slots.len()) {
                    return Err(HyperCollError::InvalidEdgeOrder {
                        index,
                        count: slots.len(),
                    });
                }
                order.to_vec()
            }
            None => (0..slots.len()).collect(),
        };

        info!(
            collections = slots.len(),
            radius = options.radius(),
            span = options.span(),
            curvature = options.curvature();
            "Rendering collections"
        );

        let mut radius = options.radius();
        if let Some(color) = options.background_disk() {
            self.disk(radius, color);
        }
        if let Some((color, width)) = options.background_circle() {
            self.circle(radius, color, width);
        }
        if options.show_labels() {
            radius = labels::draw_rim_labels(
                &mut self.surface,
                &self.labels,
                radius,
                options.label_spacing(),
                options.label_font(),
                options.label_color(),
            )?;
        }

        let count = self.labels.len();
        if options.fill() {
            for (index, members) in slots.iter().enumerate() {
                let color = palette[index % palette.len()].with_alpha(options.fill_opacity());
                self.surface.set_source(color);
                patch::trace_slot_patch(
                    &mut self.surface,
                    members,
                    count,
                    radius,
                    options.span(),
                    options.curvature(),
                );
                self.surface.fill();
                debug!(index, members = members.len(); "Patch filled");
            }
        }

        self.surface.set_line_width(options.edge_width());
        for index in edge_order {
            let color = palette[index % palette.len()].with_alpha(options.edge_opacity());
            self.surface.set_source(color);
            patch::trace_slot_patch(
                &mut self.surface,
                &slots[index],
                count,
                radius,
                options.span(),
                options.curvature(),
            );
            self.surface.stroke();
            debug!(index; "Patch stroked");
        }

        Ok(radius)
    }

    /// Draws one ring of property sectors; see [`sectors::draw_sectors`].
    ///
    /// # Errors
    ///
    /// Returns an error when a label has no property, a style lacks a
    /// property, or a sector label cannot be drawn.
    pub fn sectors(&mut self, spec: &SectorSpec) -> Result<Vec<Sector>, HyperCollError> {
        sectors::draw_sectors(&mut self.surface, &self.labels, spec)
    }

    /// Fills a disk of `radius` around the center.
    pub fn disk(&mut self, radius: f64, color: Color) {
        let mut surface = TransformGuard::new(&mut self.surface);
        surface.set_source(color);
        surface.new_path();
        surface.arc(Point::ZERO, radius, 0.0, TAU);
        surface.fill();
    }

    /// Strokes a circle of `radius` around the center.
    pub fn circle(&mut self, radius: f64, color: Color, width: f64) {
        let mut surface = TransformGuard::new(&mut self.surface);
        surface.set_source(color);
        surface.set_line_width(width);
        surface.new_path();
        surface.arc(Point::ZERO, radius, 0.0, TAU);
        surface.stroke();
    }

    /// Flushes the surface and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error when the surface cannot be written.
    pub fn finish(mut self) -> Result<S, HyperCollError> {
        self.surface.finish()?;
        info!("Diagram finished");
        Ok(self.surface)
    }
}
