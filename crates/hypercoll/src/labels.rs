//! Radial labels around the rim of the diagram.
//!
//! Every label is measured first; the longest one fixes a common inner radius
//! so that all labels end at the same distance from the outer rim. Each label
//! is then drawn along the radius through its slot, reading outward on the
//! right half of the diagram and mirrored on the left half so it never
//! appears upside down.

use std::f64::consts::FRAC_PI_2;

use kurbo::{Point, Vec2};
use log::debug;

use hypercoll_core::{
    DrawError,
    color::Color,
    draw::{FontSpec, Surface, TextExtents, TransformGuard},
    geometry::slot_angle,
};

use crate::label_set::LabelSet;

/// Where and how one rim label is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    /// Slot angle in radians.
    pub angle: f64,
    /// Baseline origin in the frame rotated by `-angle`.
    pub anchor: Vec2,
    /// Whether the text frame is turned half a revolution to stay upright.
    pub mirrored: bool,
    /// Measured extents of the label text.
    pub extents: TextExtents,
}

/// Placements for a whole label set.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    /// Radius left for the diagram inside the labels.
    pub inner_radius: f64,
    /// One placement per label, in slot order.
    pub placements: Vec<LabelPlacement>,
}

/// Measures every label and computes its placement without drawing.
///
/// The inner radius is `outer_radius − max_width − 2·spacing`.
///
/// # Errors
///
/// Returns an error when a label cannot be measured.
pub fn label_placements<S: Surface + ?Sized>(
    surface: &mut S,
    labels: &LabelSet,
    outer_radius: f64,
    spacing: f64,
    font: &FontSpec,
) -> Result<LabelLayout, DrawError> {
    let extents = labels
        .iter()
        .map(|label| surface.text_extents(label, font))
        .collect::<Result<Vec<_>, _>>()?;

    let max_width = extents.iter().map(|e| e.width).fold(0.0, f64::max);
    let inner_radius = outer_radius - max_width - 2.0 * spacing;

    let count = labels.len();
    let placements = extents
        .into_iter()
        .enumerate()
        .map(|(slot, extents)| {
            let angle = slot_angle(slot, count);
            let mirrored = angle > FRAC_PI_2 && angle < 3.0 * FRAC_PI_2;
            let anchor = if mirrored {
                Vec2::new(
                    inner_radius + extents.width + spacing,
                    -0.5 * extents.height,
                )
            } else {
                Vec2::new(
                    inner_radius - extents.x_bearing + spacing,
                    0.5 * extents.height,
                )
            };
            LabelPlacement {
                angle,
                anchor,
                mirrored,
                extents,
            }
        })
        .collect();

    Ok(LabelLayout {
        inner_radius,
        placements,
    })
}

/// Draws every label of `labels` around the rim and returns the inner radius.
///
/// # Errors
///
/// Returns an error when a label cannot be measured or drawn.
pub fn draw_rim_labels<S: Surface + ?Sized>(
    surface: &mut S,
    labels: &LabelSet,
    outer_radius: f64,
    spacing: f64,
    font: &FontSpec,
    color: Color,
) -> Result<f64, DrawError> {
    let layout = label_placements(surface, labels, outer_radius, spacing, font)?;

    let mut surface = TransformGuard::new(surface);
    surface.set_source(color);
    for (label, placement) in labels.iter().zip(&layout.placements) {
        let mut frame = TransformGuard::new(&mut *surface);
        frame.rotate(-placement.angle);
        frame.translate(placement.anchor.x, placement.anchor.y);
        if placement.mirrored {
            frame.scale(-1.0, -1.0);
        }
        frame.move_to(Point::ZERO);
        frame.show_text(label, font)?;
    }

    debug!(
        labels = labels.len(),
        inner_radius = layout.inner_radius;
        "Rim labels drawn"
    );
    Ok(layout.inner_radius)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use hypercoll_core::draw::{Canvas, DrawOp, HeuristicTextEngine};

    use super::*;

    fn font() -> FontSpec {
        FontSpec::new("sans-serif", 10.0)
    }

    #[test]
    fn test_inner_radius_uses_longest_label() {
        let labels = LabelSet::new(["UK", "Switzerland", "Malta"]).unwrap();
        let mut canvas = Canvas::new(100.0, 100.0, HeuristicTextEngine);
        let layout = label_placements(&mut canvas, &labels, 200.0, 5.0, &font()).unwrap();
        // "Switzerland" is 11 cells of 6 units
        assert_approx_eq!(f64, layout.inner_radius, 124.0, epsilon = 1e-9);
        assert_eq!(layout.placements.len(), 3);
    }

    #[test]
    fn test_left_half_labels_are_mirrored() {
        let labels = LabelSet::new(["A", "B", "C", "D"]).unwrap();
        let mut canvas = Canvas::new(100.0, 100.0, HeuristicTextEngine);
        let layout = label_placements(&mut canvas, &labels, 100.0, 5.0, &font()).unwrap();
        let mirrored: Vec<bool> = layout.placements.iter().map(|p| p.mirrored).collect();
        // π/2 and 3π/2 are boundaries and stay unmirrored
        assert_eq!(mirrored, [false, false, true, false]);
    }

    #[test]
    fn test_draw_rim_labels_positions() {
        let labels = LabelSet::new(["AA", "BB", "CC", "DD"]).unwrap();
        let mut canvas = Canvas::new(100.0, 100.0, HeuristicTextEngine);
        let white = Color::new("white").unwrap();
        let inner = draw_rim_labels(&mut canvas, &labels, 100.0, 5.0, &font(), white).unwrap();
        assert_approx_eq!(f64, inner, 78.0, epsilon = 1e-9);

        let texts: Vec<_> = canvas
            .ops()
            .iter()
            .map(|op| match op {
                DrawOp::Text {
                    text,
                    transform,
                    color,
                    ..
                } => (text.clone(), *transform, *color),
                other => panic!("unexpected op {other:?}"),
            })
            .collect();
        assert_eq!(texts.len(), 4);
        assert!(texts.iter().all(|(_, _, color)| *color == white));

        // Slot 0 reads outward from just outside the inner radius
        let origin = texts[0].1 * Point::ZERO;
        assert_approx_eq!(f64, origin.x, 83.0, epsilon = 1e-9);
        assert_approx_eq!(f64, origin.y, 3.5, epsilon = 1e-9);

        // Slot 2 is mirrored: it starts at the outer end and reads toward the center
        let (text, transform, _) = &texts[2];
        assert_eq!(text, "CC");
        let origin = *transform * Point::ZERO;
        assert_approx_eq!(f64, origin.x, -95.0, epsilon = 1e-9);
        assert_approx_eq!(f64, origin.y, 3.5, epsilon = 1e-9);
        let advance = *transform * Point::new(1.0, 0.0) - origin;
        assert_approx_eq!(f64, advance.x, 1.0, epsilon = 1e-9);

        assert_eq!(canvas.transform(), kurbo::Affine::IDENTITY);
        assert_eq!(canvas.save_depth(), 0);
    }
}
