//! A recording [`Surface`] implementation.
//!
//! [`Canvas`] keeps the current path in device space and records every fill,
//! stroke and text call as a [`DrawOp`], in issue order. The recorded
//! operations can be inspected directly (tests do this) or exported as SVG
//! with [`Canvas::to_svg_document`]. When the canvas is created with an output
//! path, [`Surface::finish`] writes the SVG document there.

use std::{f64::consts::TAU, path::PathBuf};

use kurbo::{Affine, Arc, BezPath, PathEl, Point, Vec2};
use log::{debug, trace};

use crate::{
    color::Color,
    draw::{
        export,
        surface::Surface,
        text::{FontSpec, TextEngine, TextExtents},
    },
    error::DrawError,
};

/// Flattening tolerance used when converting arcs to cubic segments.
const ARC_TOLERANCE: f64 = 0.01;

/// A recorded drawing operation, with geometry in device space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A filled path.
    Fill { path: BezPath, color: Color },
    /// A stroked path. `width` is already scaled into device units.
    Stroke {
        path: BezPath,
        color: Color,
        width: f64,
    },
    /// A line of text. `transform` maps text-local coordinates (baseline
    /// origin, y down) to device space.
    Text {
        text: String,
        font: FontSpec,
        color: Color,
        transform: Affine,
    },
}

impl DrawOp {
    /// Returns the path of a fill or stroke operation.
    pub fn path(&self) -> Option<&BezPath> {
        match self {
            Self::Fill { path, .. } | Self::Stroke { path, .. } => Some(path),
            Self::Text { .. } => None,
        }
    }

    /// Returns the paint of the operation.
    pub fn color(&self) -> Color {
        match self {
            Self::Fill { color, .. } | Self::Stroke { color, .. } | Self::Text { color, .. } => {
                *color
            }
        }
    }
}

/// The state pushed by [`Surface::save`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct GraphicsState {
    transform: Affine,
    source: Color,
    line_width: f64,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            source: Color::default(),
            line_width: 1.0,
        }
    }
}

/// A recording drawing surface of a fixed page size.
///
/// # Examples
///
/// ```
/// # use hypercoll_core::draw::{Canvas, DrawOp, HeuristicTextEngine, Surface};
/// # use kurbo::Point;
/// let mut canvas = Canvas::new(200.0, 200.0, HeuristicTextEngine);
/// canvas.arc(Point::new(100.0, 100.0), 50.0, 0.0, std::f64::consts::TAU);
/// canvas.fill();
/// assert!(matches!(canvas.ops()[0], DrawOp::Fill { .. }));
/// ```
#[derive(Debug)]
pub struct Canvas<T: TextEngine> {
    width: f64,
    height: f64,
    text: T,
    state: GraphicsState,
    stack: Vec<GraphicsState>,
    path: BezPath,
    current: Option<Point>,
    subpath_start: Option<Point>,
    ops: Vec<DrawOp>,
    output: Option<PathBuf>,
    finished: bool,
}

impl<T: TextEngine> Canvas<T> {
    /// Creates an in-memory canvas of `width` × `height` points.
    pub fn new(width: f64, height: f64, text: T) -> Self {
        Self {
            width,
            height,
            text,
            state: GraphicsState::default(),
            stack: Vec::new(),
            path: BezPath::new(),
            current: None,
            subpath_start: None,
            ops: Vec::new(),
            output: None,
            finished: false,
        }
    }

    /// Sets the SVG file written by [`Surface::finish`].
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the recorded operations in issue order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Returns the path under construction, in device space.
    pub fn current_path(&self) -> &BezPath {
        &self.path
    }

    /// Returns the number of unmatched [`Surface::save`] calls.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` once [`Surface::finish`] has succeeded.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Renders the recorded operations to an SVG document.
    pub fn to_svg_document(&self) -> svg::Document {
        export::render_document(self.width, self.height, &self.ops)
    }

    fn to_device(&self, point: Point) -> Point {
        self.state.transform * point
    }

    fn push_device(&mut self, el: PathEl) {
        self.path.push(el);
    }

    /// Appends an arc with a signed sweep, joining it to the current point.
    fn append_arc(&mut self, center: Point, radius: f64, start: f64, sweep: f64) {
        let start_point = center + Vec2::from_angle(start) * radius;
        if self.current.is_some() {
            self.line_to(start_point);
        } else {
            self.move_to(start_point);
        }

        let arc = Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle: start,
            sweep_angle: sweep,
            x_rotation: 0.0,
        };
        let transform = self.state.transform;
        for el in arc.append_iter(ARC_TOLERANCE) {
            self.push_device(transform * el);
        }

        let end_point = center + Vec2::from_angle(start + sweep) * radius;
        self.current = Some(self.to_device(end_point));
    }

    fn take_path(&mut self) -> Option<BezPath> {
        self.current = None;
        self.subpath_start = None;
        let path = std::mem::take(&mut self.path);
        (!path.elements().is_empty()).then_some(path)
    }

    /// Device-space scale factor of the current transform.
    fn device_scale(&self) -> f64 {
        self.state.transform.determinant().abs().sqrt()
    }
}

impl<T: TextEngine> Surface for Canvas<T> {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => debug!("Restore without matching save ignored"),
        }
    }

    fn transform(&self) -> Affine {
        self.state.transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.state.transform = transform;
    }

    fn new_path(&mut self) {
        self.take_path();
    }

    fn move_to(&mut self, point: Point) {
        let device = self.to_device(point);
        self.push_device(PathEl::MoveTo(device));
        self.current = Some(device);
        self.subpath_start = Some(device);
    }

    fn line_to(&mut self, point: Point) {
        if self.current.is_none() {
            self.move_to(point);
            return;
        }
        let device = self.to_device(point);
        self.push_device(PathEl::LineTo(device));
        self.current = Some(device);
    }

    fn curve_to(&mut self, control1: Point, control2: Point, point: Point) {
        if self.current.is_none() {
            self.move_to(control1);
        }
        let device = self.to_device(point);
        self.push_device(PathEl::CurveTo(
            self.to_device(control1),
            self.to_device(control2),
            device,
        ));
        self.current = Some(device);
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        let mut end = end;
        if end < start {
            end += TAU * ((start - end) / TAU).ceil();
        }
        self.append_arc(center, radius, start, end - start);
    }

    fn arc_negative(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        let mut end = end;
        if end > start {
            end -= TAU * ((end - start) / TAU).ceil();
        }
        self.append_arc(center, radius, start, end - start);
    }

    fn close_path(&mut self) {
        if self.current.is_some() {
            self.push_device(PathEl::ClosePath);
            self.current = self.subpath_start;
        }
    }

    fn set_source(&mut self, color: Color) {
        self.state.source = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn fill(&mut self) {
        if let Some(path) = self.take_path() {
            trace!(elements = path.elements().len(); "Fill");
            self.ops.push(DrawOp::Fill {
                path,
                color: self.state.source,
            });
        }
    }

    fn stroke(&mut self) {
        let width = self.state.line_width * self.device_scale();
        if let Some(path) = self.take_path() {
            trace!(elements = path.elements().len(), width; "Stroke");
            self.ops.push(DrawOp::Stroke {
                path,
                color: self.state.source,
                width,
            });
        }
    }

    fn text_extents(&mut self, text: &str, font: &FontSpec) -> Result<TextExtents, DrawError> {
        Ok(self.text.extents(text, font)?)
    }

    fn show_text(&mut self, text: &str, font: &FontSpec) -> Result<(), DrawError> {
        let origin = self
            .current
            .unwrap_or_else(|| self.to_device(Point::ZERO));
        let [a, b, c, d, _, _] = self.state.transform.as_coeffs();
        let transform = Affine::new([a, b, c, d, origin.x, origin.y]);

        self.current = None;
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            font: font.clone(),
            color: self.state.source,
            transform,
        });
        Ok(())
    }

    fn text_outline(&mut self, text: &str, font: &FontSpec) -> Result<BezPath, DrawError> {
        Ok(self.text.outline(text, font)?)
    }

    fn finish(&mut self) -> Result<(), DrawError> {
        if self.finished {
            return Err(DrawError::AlreadyFinished);
        }
        if let Some(output) = &self.output {
            export::write_document(output, &self.to_svg_document())?;
        }
        self.finished = true;
        debug!(ops = self.ops.len(); "Canvas finished");
        Ok(())
    }
}
