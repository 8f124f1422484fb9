//! The drawing surface capability.
//!
//! HyperColl computes geometry and issues immediate-mode path construction
//! calls against a [`Surface`]. The surface owns the current path, a
//! transform stack and the paint state, in the style of classic 2-D vector
//! APIs:
//!
//! - path construction happens in *user space*, mapped through the current
//!   transform at the moment each call is made;
//! - [`Surface::fill`] and [`Surface::stroke`] consume the current path;
//! - [`Surface::save`]/[`Surface::restore`] push and pop the transform, source
//!   color and line width (but not the path).
//!
//! Temporary transforms should be taken through [`TransformGuard`], which
//! restores the saved state when it goes out of scope on every exit path.
//!
//! # Example
//!
//! ```
//! # use hypercoll_core::draw::{Canvas, HeuristicTextEngine, Surface, TransformGuard};
//! # use kurbo::{Affine, Point};
//! let mut canvas = Canvas::new(100.0, 100.0, HeuristicTextEngine);
//! canvas.translate(50.0, 50.0);
//! {
//!     let mut flipped = TransformGuard::new(&mut canvas);
//!     flipped.scale(1.0, -1.0);
//!     flipped.move_to(Point::new(0.0, 10.0));
//! }
//! assert_eq!(canvas.transform(), Affine::translate((50.0, 50.0)));
//! ```

use std::ops::{Deref, DerefMut};

use kurbo::{Affine, BezPath, Point};

use crate::{
    color::Color,
    draw::text::{FontSpec, TextExtents},
    error::DrawError,
};

/// Immediate-mode 2-D drawing capability.
///
/// Angles are in radians and follow the user-space axes: angle `θ` addresses
/// the point `center + radius·(cos θ, sin θ)`.
pub trait Surface {
    /// Pushes the transform, source color and line width.
    fn save(&mut self);

    /// Pops the state pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    /// Returns the current user-to-device transform.
    fn transform(&self) -> Affine;

    /// Replaces the current user-to-device transform.
    fn set_transform(&mut self, transform: Affine);

    /// Moves the user-space origin by `(dx, dy)`.
    fn translate(&mut self, dx: f64, dy: f64) {
        let transform = self.transform() * Affine::translate((dx, dy));
        self.set_transform(transform);
    }

    /// Rotates the user-space axes by `angle` radians.
    fn rotate(&mut self, angle: f64) {
        let transform = self.transform() * Affine::rotate(angle);
        self.set_transform(transform);
    }

    /// Scales the user-space axes.
    fn scale(&mut self, sx: f64, sy: f64) {
        let transform = self.transform() * Affine::scale_non_uniform(sx, sy);
        self.set_transform(transform);
    }

    /// Discards the current path and current point.
    fn new_path(&mut self);

    /// Starts a new sub-path at `point`.
    fn move_to(&mut self, point: Point);

    /// Adds a line from the current point to `point`.
    fn line_to(&mut self, point: Point);

    /// Adds a cubic Bézier segment from the current point.
    fn curve_to(&mut self, control1: Point, control2: Point, point: Point);

    /// Adds a circular arc in the direction of increasing angle.
    ///
    /// While `end < start`, `end` is increased by `2π`. When a current point
    /// exists, a line joins it to the arc start.
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64);

    /// Adds a circular arc in the direction of decreasing angle.
    ///
    /// While `end > start`, `end` is decreased by `2π`. When a current point
    /// exists, a line joins it to the arc start.
    fn arc_negative(&mut self, center: Point, radius: f64, start: f64, end: f64);

    /// Closes the current sub-path.
    fn close_path(&mut self);

    /// Sets the paint used by subsequent fills, strokes and text.
    fn set_source(&mut self, color: Color);

    /// Sets the stroke width in user-space units.
    fn set_line_width(&mut self, width: f64);

    /// Fills the current path and clears it.
    fn fill(&mut self);

    /// Strokes the current path and clears it.
    fn stroke(&mut self);

    /// Measures `text` in user-space units.
    ///
    /// # Errors
    ///
    /// Returns an error when the text cannot be measured with `font`.
    fn text_extents(&mut self, text: &str, font: &FontSpec) -> Result<TextExtents, DrawError>;

    /// Draws `text` with its baseline origin at the current point (or the
    /// user-space origin when there is none). Clears the current point.
    ///
    /// # Errors
    ///
    /// Returns an error when the text cannot be shaped with `font`.
    fn show_text(&mut self, text: &str, font: &FontSpec) -> Result<(), DrawError>;

    /// Returns the glyph outline of `text` in user space, with the baseline
    /// origin at the user-space origin. The current path is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error when no glyph outlines are available for `text`.
    fn text_outline(&mut self, text: &str, font: &FontSpec) -> Result<BezPath, DrawError>;

    /// Flushes the surface to its output.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::AlreadyFinished`] on a second call, or an I/O
    /// error when the output cannot be written.
    fn finish(&mut self) -> Result<(), DrawError>;
}

/// Scoped save/restore of a [`Surface`] state.
///
/// Creating the guard calls [`Surface::save`]; dropping it calls
/// [`Surface::restore`]. The guard dereferences to the surface, so drawing
/// calls go through it while the temporary transform is active.
pub struct TransformGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> TransformGuard<'a, S> {
    /// Saves the state of `surface` until the guard is dropped.
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for TransformGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for TransformGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for TransformGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

impl<S: Surface + ?Sized> std::fmt::Debug for TransformGuard<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformGuard")
            .field("transform", &self.surface.transform())
            .finish()
    }
}
