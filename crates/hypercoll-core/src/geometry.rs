//! Geometric primitives for circular diagram layout.
//!
//! HyperColl lays everything out in polar coordinates around the page center.
//! This module provides the slot/angle conventions shared by every component and
//! the two primitives that shape a patch connector:
//!
//! - [`adjust_curvature`] - Radially remaps a bulge offset according to a curvature knob
//! - [`arc_control_points`] - Cubic Bézier control points approximating a circular arc
//!
//! # Angle Convention
//!
//! ```text
//!              π/2
//!               ▲
//!               │
//!     π ◄───────┼───────► 0   (slot 0)
//!               │
//!               ▼
//!             3π/2
//! ```
//!
//! Slot `k` of `n` sits at angle `k · 2π/n`, counter-clockwise from angle 0.
//! Points and vectors are [`kurbo`] types in `f64`.

use std::f64::consts::TAU;

use kurbo::{Point, Vec2};

/// Chord lengths below this value are treated as a degenerate arc.
pub const CHORD_EPSILON: f64 = 1e-10;

/// Radial fractions below this value skip the curvature rescale.
const RADIAL_EPSILON: f64 = 1e-12;

/// Returns the angular distance between two neighbouring slots, `2π/count`.
pub fn slot_spacing(count: usize) -> f64 {
    debug_assert!(count > 0, "slot spacing requires at least one slot");
    TAU / count as f64
}

/// Returns the angle of `slot` when `count` slots are spread evenly around the circle.
///
/// # Examples
///
/// ```
/// # use hypercoll_core::geometry::slot_angle;
/// assert_eq!(slot_angle(0, 7), 0.0);
/// assert!((slot_angle(1, 4) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn slot_angle(slot: usize, count: usize) -> f64 {
    slot as f64 * slot_spacing(count)
}

/// Returns the point at `radius` and `angle` around the origin.
pub fn polar(radius: f64, angle: f64) -> Point {
    Point::new(radius * angle.cos(), radius * angle.sin())
}

/// Wraps an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Rescales a bulge offset radially according to `curvature`.
///
/// The radial fraction `q = |offset| / outer_radius` is remapped piecewise-linearly
/// around the pivot `c = clamp(2·curvature − 1, −1, 0.9999)`:
///
/// - `c > 0`: `k = max(0, (q − c)/(1 − c))`, pulling the point toward the center
/// - `c ≤ 0`: `k = −c + (1 + c)·q`, pushing the point toward the rim
///
/// The result keeps the direction of `offset` and has length `k · outer_radius`.
/// At `curvature = 0.5` the mapping is the identity. An offset at the origin has
/// no direction and is returned unchanged.
///
/// # Examples
///
/// ```
/// # use hypercoll_core::geometry::adjust_curvature;
/// # use kurbo::Vec2;
/// let offset = Vec2::new(30.0, 40.0);
/// let same = adjust_curvature(100.0, offset, 0.5);
/// assert!((same - offset).hypot() < 1e-9);
///
/// let flat = adjust_curvature(100.0, offset, 0.0);
/// assert!((flat.hypot() - 100.0).abs() < 1e-9);
/// ```
pub fn adjust_curvature(outer_radius: f64, offset: Vec2, curvature: f64) -> Vec2 {
    let length = offset.hypot();
    let q = length / outer_radius;
    if !q.is_finite() || q < RADIAL_EPSILON {
        return offset;
    }

    let c = (curvature * 2.0 - 1.0).clamp(-1.0, 0.9999);
    let k = if c > 0.0 {
        ((q - c) / (1.0 - c)).max(0.0)
    } else {
        -c + (1.0 + c) * q
    };

    offset * (k * outer_radius / length)
}

/// Computes cubic Bézier control points for the circular arc from `a` to `b`
/// centered at `center`, then bends them with [`adjust_curvature`].
///
/// `a` and `b` must be equidistant from `center`. `radius` is the diagram radius
/// that [`adjust_curvature`] normalizes against, not the radius of this arc.
///
/// Degenerate inputs return `(a, b)` unchanged: a chord vector `a + b − 2·center`
/// shorter than [`CHORD_EPSILON`], or coincident endpoints.
///
/// # Examples
///
/// ```
/// # use hypercoll_core::geometry::arc_control_points;
/// # use kurbo::Point;
/// // Quarter circle of radius 1: the classic 0.5523 handle length.
/// let (c1, c2) = arc_control_points(
///     1.0,
///     Point::new(1.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::ZERO,
///     0.5,
/// );
/// assert!((c1.y - 0.5523).abs() < 1e-4);
/// assert!((c2.x - 0.5523).abs() < 1e-4);
/// ```
pub fn arc_control_points(
    radius: f64,
    a: Point,
    b: Point,
    center: Point,
    curvature: f64,
) -> (Point, Point) {
    let to_a = a - center;
    let to_b = b - center;
    let chord = b - a;
    let sum = a.to_vec2() + b.to_vec2() - center.to_vec2() * 2.0;

    let d = sum.hypot();
    if d < CHORD_EPSILON || chord.hypot() < CHORD_EPSILON {
        return (a, b);
    }

    let arc_radius = to_a.hypot();
    let slope = if chord.x.abs() > chord.y.abs() {
        -sum.y / chord.x
    } else {
        sum.x / chord.y
    };
    let t = 8.0 / 3.0 * (arc_radius / d - 0.5) * slope;

    let first = Vec2::new(a.x - t * to_a.y, a.y + t * to_a.x);
    let second = Vec2::new(b.x + t * to_b.y, b.y - t * to_b.x);

    (
        adjust_curvature(radius, first, curvature).to_point(),
        adjust_curvature(radius, second, curvature).to_point(),
    )
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_slot_angle_starts_at_zero() {
        assert_approx_eq!(f64, slot_angle(0, 1), 0.0);
        assert_approx_eq!(f64, slot_angle(0, 12), 0.0);
        assert_approx_eq!(f64, slot_angle(2, 4), PI, epsilon = 1e-12);
        assert_approx_eq!(f64, slot_angle(3, 4), 3.0 * FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_polar() {
        let p = polar(2.0, FRAC_PI_2);
        assert_approx_eq!(f64, p.x, 0.0, epsilon = 1e-12);
        assert_approx_eq!(f64, p.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_angle() {
        assert_approx_eq!(f64, normalize_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2, epsilon = 1e-12);
        assert_approx_eq!(f64, normalize_angle(TAU + 1.0), 1.0, epsilon = 1e-12);
        assert_approx_eq!(f64, normalize_angle(0.0), 0.0);
    }

    #[test]
    fn test_adjust_curvature_half_is_identity() {
        let v = Vec2::new(-12.0, 7.5);
        let adjusted = adjust_curvature(50.0, v, 0.5);
        assert_approx_eq!(f64, adjusted.x, v.x, epsilon = 1e-9);
        assert_approx_eq!(f64, adjusted.y, v.y, epsilon = 1e-9);
    }

    #[test]
    fn test_adjust_curvature_zero_snaps_to_rim() {
        let v = Vec2::new(3.0, 4.0);
        let adjusted = adjust_curvature(100.0, v, 0.0);
        assert_approx_eq!(f64, adjusted.hypot(), 100.0, epsilon = 1e-9);
        // Direction is preserved
        assert_approx_eq!(f64, adjusted.x / adjusted.y, 0.75, epsilon = 1e-9);
    }

    #[test]
    fn test_adjust_curvature_high_collapses_inner_points() {
        // q = 0.5 is below the pivot c = 0.6, so k clamps to zero
        let v = Vec2::new(50.0, 0.0);
        let adjusted = adjust_curvature(100.0, v, 0.8);
        assert_approx_eq!(f64, adjusted.hypot(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_adjust_curvature_positive_branch() {
        // c = 0.2, q = 0.6 -> k = 0.4 / 0.8 = 0.5
        let v = Vec2::new(0.0, 60.0);
        let adjusted = adjust_curvature(100.0, v, 0.6);
        assert_approx_eq!(f64, adjusted.y, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_adjust_curvature_zero_offset_is_unchanged() {
        let adjusted = adjust_curvature(100.0, Vec2::ZERO, 0.9);
        assert_eq!(adjusted, Vec2::ZERO);
    }

    #[test]
    fn test_arc_control_points_degenerate_chord() {
        // a + b - 2c vanishes for diametrically opposite endpoints
        let a = Point::new(1.0, 0.0);
        let b = Point::new(-1.0, 0.0);
        let (c1, c2) = arc_control_points(10.0, a, b, Point::ZERO, 0.7);
        assert_eq!(c1, a);
        assert_eq!(c2, b);
    }

    #[test]
    fn test_arc_control_points_coincident_endpoints() {
        let a = Point::new(0.0, 5.0);
        let (c1, c2) = arc_control_points(10.0, a, a, Point::new(0.0, 20.0), 0.5);
        assert_eq!(c1, a);
        assert_eq!(c2, a);
    }

    #[test]
    fn test_arc_control_points_high_curvature_pulls_inward() {
        let radius = 200.0;
        let a = polar(radius, 0.3);
        let b = polar(radius, 2.5);
        let mid = 0.5 * (0.3 + 2.5);
        let half: f64 = 0.5 * (2.5 - 0.3);
        let center = polar(radius / half.cos(), mid);

        let (c1, c2) = arc_control_points(radius, a, b, center, 0.99);
        assert!(c1.to_vec2().hypot() < radius);
        assert!(c2.to_vec2().hypot() < radius);
    }

    #[test]
    fn test_arc_control_points_zero_curvature_lies_on_rim() {
        let radius = 200.0;
        let a = polar(radius, 0.3);
        let b = polar(radius, 2.5);
        let mid = 0.5 * (0.3 + 2.5);
        let half: f64 = 0.5 * (2.5 - 0.3);
        let center = polar(radius / half.cos(), mid);

        let (c1, c2) = arc_control_points(radius, a, b, center, 0.0);
        assert_approx_eq!(f64, c1.to_vec2().hypot(), radius, epsilon = 1e-9);
        assert_approx_eq!(f64, c2.to_vec2().hypot(), radius, epsilon = 1e-9);
    }
}
