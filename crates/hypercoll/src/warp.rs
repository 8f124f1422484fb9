//! Bending sector labels along the ring.
//!
//! A sector label is laid out as a straight line of glyph outlines and then
//! re-projected point by point onto the arc through the middle of its sector
//! ring. Labels on the lower half of the ring are flipped so they read from
//! the outside.

use std::f64::consts::PI;

use kurbo::{BezPath, PathEl, Point, QuadBez};

use hypercoll_core::{
    DrawError,
    draw::{FontSpec, Surface},
    geometry::normalize_angle,
};

/// Maps text-local coordinates onto a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorWarp {
    /// Radius of the arc the text is centered on.
    pub radius: f64,
    /// Angle of the sector center in radians.
    pub phi: f64,
    /// Whether the text is turned to read from outside the ring.
    pub flip: bool,
    /// Width of the unwarped text.
    pub width: f64,
    /// Height of the unwarped text.
    pub height: f64,
}

impl SectorWarp {
    /// Creates the warp for the sector spanning slots `start..=end` of `count`.
    ///
    /// `end` may be smaller than `start` for a sector that wraps past slot 0.
    pub fn new(
        radius: f64,
        start: usize,
        end: usize,
        count: usize,
        width: f64,
        height: f64,
    ) -> Self {
        let mut phi = PI / count as f64 * (start + end) as f64;
        if start > end {
            phi -= PI;
        }
        let flip = normalize_angle(phi) >= PI;
        Self {
            radius,
            phi,
            flip,
            width,
            height,
        }
    }

    /// Maps one text-local point (baseline at `y = 0`, y down) to the ring.
    pub fn apply(&self, point: Point) -> Point {
        let r = self.radius;
        let along = (point.x - 0.5 * self.width) / r;
        if self.flip {
            let rho = r + point.y + 0.5 * self.height;
            Point::new(rho * (along + self.phi).cos(), rho * (-along - self.phi).sin())
        } else {
            let rho = r - point.y - 0.5 * self.height;
            Point::new(rho * (along - self.phi).cos(), rho * (along - self.phi).sin())
        }
    }

    /// Warps every point of `path`, preserving command order. Quadratic
    /// segments are raised to cubics first.
    pub fn warp_path(&self, path: &BezPath) -> BezPath {
        raise_quads(path)
            .into_iter()
            .map(|el| match el {
                PathEl::MoveTo(p) => PathEl::MoveTo(self.apply(p)),
                PathEl::LineTo(p) => PathEl::LineTo(self.apply(p)),
                PathEl::QuadTo(c, p) => PathEl::QuadTo(self.apply(c), self.apply(p)),
                PathEl::CurveTo(c1, c2, p) => {
                    PathEl::CurveTo(self.apply(c1), self.apply(c2), self.apply(p))
                }
                PathEl::ClosePath => PathEl::ClosePath,
            })
            .collect()
    }
}

/// Replaces every quadratic segment by the equivalent cubic.
fn raise_quads(path: &BezPath) -> Vec<PathEl> {
    let mut last = Point::ZERO;
    let mut subpath_start = Point::ZERO;
    path.elements()
        .iter()
        .map(|&el| match el {
            PathEl::MoveTo(p) => {
                subpath_start = p;
                last = p;
                el
            }
            PathEl::LineTo(p) | PathEl::CurveTo(_, _, p) => {
                last = p;
                el
            }
            PathEl::QuadTo(c, p) => {
                let cubic = QuadBez::new(last, c, p).raise();
                last = p;
                PathEl::CurveTo(cubic.p1, cubic.p2, cubic.p3)
            }
            PathEl::ClosePath => {
                last = subpath_start;
                el
            }
        })
        .collect()
}

/// Draws `text` bent along the arc of radius `radius` through the middle of
/// the sector `start..=end`, filled with the current source color.
///
/// Empty text draws nothing.
///
/// # Errors
///
/// Returns an error when the text cannot be measured or outlined.
pub fn draw_sector_label<S: Surface + ?Sized>(
    surface: &mut S,
    radius: f64,
    start: usize,
    end: usize,
    count: usize,
    text: &str,
    font: &FontSpec,
) -> Result<(), DrawError> {
    if text.is_empty() {
        return Ok(());
    }

    let extents = surface.text_extents(text, font)?;
    let warp = SectorWarp::new(radius, start, end, count, extents.width, extents.height);
    let outline = surface.text_outline(text, font)?;

    surface.new_path();
    for el in warp.warp_path(&outline).elements() {
        match *el {
            PathEl::MoveTo(p) => surface.move_to(p),
            PathEl::LineTo(p) => surface.line_to(p),
            PathEl::CurveTo(c1, c2, p) => surface.curve_to(c1, c2, p),
            // Raised by `warp_path`
            PathEl::QuadTo(_, p) => surface.line_to(p),
            PathEl::ClosePath => surface.close_path(),
        }
    }
    surface.fill();
    Ok(())
}
