//! Closed patch paths connecting the members of a collection.
//!
//! A patch alternates short rim arcs, one per member [`Pin`], with curved
//! connectors bridging the gap to the next member. Connectors are cubic Bézier
//! approximations of an auxiliary circle orthogonal to the rim, bent by the
//! curvature knob through [`arc_control_points`].
//!
//! ```text
//!        pin k                    pin k+1
//!    start ─── end  ⟍        ⟋  start ─── end
//!                    ⟍______⟋
//!                   (connector)
//! ```

use std::f64::consts::{PI, TAU};

use kurbo::Point;
use log::trace;

use hypercoll_core::{
    draw::{Surface, TransformGuard},
    geometry::{arc_control_points, polar, slot_spacing},
};

/// Connectors whose auxiliary circle would be at least this far from the
/// center are drawn as straight lines.
const STRAIGHT_CONNECTOR_RADIUS: f64 = 10_000.0;

/// The angular interval reserved on the rim around one collection member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pin {
    /// Start angle in radians.
    pub start: f64,
    /// End angle in radians, not smaller than `start`.
    pub end: f64,
}

impl Pin {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Builds one pin per slot. `span` is the pin width as a fraction of the slot
/// spacing, centered on the slot angle.
///
/// # Examples
///
/// ```
/// # use hypercoll::patch::pins_for_slots;
/// let pins = pins_for_slots(&[0, 2], 4, 0.2);
/// assert!((pins[1].start - 0.95 * std::f64::consts::PI).abs() < 1e-12);
/// assert!((pins[1].end - 1.05 * std::f64::consts::PI).abs() < 1e-12);
/// ```
pub fn pins_for_slots(slots: &[usize], count: usize, span: f64) -> Vec<Pin> {
    let spacing = slot_spacing(count);
    slots
        .iter()
        .map(|&slot| {
            let slot = slot as f64;
            Pin::new(spacing * (slot - span / 2.0), spacing * (slot + span / 2.0))
        })
        .collect()
}

/// Traces the closed patch through `pins` onto the current path of `surface`.
///
/// Pins must be ordered by angle. The path is built in a vertically flipped
/// frame so that angles grow counter-clockwise on the page; the surface
/// transform is restored before returning. An empty pin list adds nothing.
pub fn trace_patch<S: Surface + ?Sized>(
    surface: &mut S,
    pins: &[Pin],
    radius: f64,
    curvature: f64,
) {
    let Some(first) = pins.first() else {
        return;
    };

    let mut surface = TransformGuard::new(surface);
    surface.scale(1.0, -1.0);
    surface.move_to(polar(radius, first.start));

    for (k, pin) in pins.iter().enumerate() {
        let next = pins[(k + 1) % pins.len()];
        let from = pin.end;
        let to = if next.start > from {
            next.start
        } else {
            next.start + TAU
        };

        surface.arc(Point::ZERO, radius, pin.start, pin.end);

        let gap = to - from;
        let mut mid = 0.5 * (from + to);
        if gap > PI {
            mid += PI;
        }
        let t = (0.5 * gap).sin().abs();
        let control_radius = radius / (1.0 - t * t).sqrt();
        trace!(slot_gap = gap, control_radius; "Connector");

        let end = polar(radius, to);
        if control_radius < STRAIGHT_CONNECTOR_RADIUS {
            let (c1, c2) = arc_control_points(
                radius,
                polar(radius, from),
                end,
                polar(control_radius, mid),
                curvature,
            );
            surface.curve_to(c1, c2, end);
        } else {
            surface.line_to(end);
        }
    }

    surface.close_path();
}

/// Traces the patch for sorted slot indices; see [`pins_for_slots`] and
/// [`trace_patch`].
pub fn trace_slot_patch<S: Surface + ?Sized>(
    surface: &mut S,
    slots: &[usize],
    count: usize,
    radius: f64,
    span: f64,
    curvature: f64,
) {
    let pins = pins_for_slots(slots, count, span);
    trace_patch(surface, &pins, radius, curvature);
}
