//! Rings of property sectors around the diagram.
//!
//! Each label carries a property (for example the trade bloc of a country).
//! Neighbouring labels with the same property are grouped into a [`Sector`],
//! drawn as an annular wedge with an optional curved label, and separated from
//! the next sector by a radial rule.

use kurbo::Point;
use log::{debug, info};

use hypercoll_core::{
    color::Color,
    draw::{FontSpec, Surface, TransformGuard},
    geometry::slot_spacing,
};

use crate::{config::SectorSpec, error::HyperCollError, label_set::LabelSet, warp};

/// A maximal run of neighbouring slots sharing one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sector {
    /// First slot of the run.
    pub start: usize,
    /// Last slot of the run, inclusive. Smaller than `start` when the run
    /// wraps past slot 0.
    pub end: usize,
    pub property: String,
}

/// Returns every slot whose property differs from its cyclic predecessor.
///
/// A constant sequence has no boundaries.
///
/// # Examples
///
/// ```
/// # use hypercoll::sectors::sector_boundaries;
/// assert_eq!(sector_boundaries(&["X", "X", "Y"]), vec![0, 2]);
/// assert!(sector_boundaries(&["X", "X"]).is_empty());
/// ```
pub fn sector_boundaries<P: PartialEq>(properties: &[P]) -> Vec<usize> {
    let count = properties.len();
    (0..count)
        .filter(|&k| properties[(k + count - 1) % count] != properties[k])
        .collect()
}

/// Pairs each boundary with the slot before the next boundary.
pub fn sectors_from_boundaries<P: AsRef<str>>(
    boundaries: &[usize],
    properties: &[P],
) -> Vec<Sector> {
    let count = properties.len();
    boundaries
        .iter()
        .enumerate()
        .map(|(k, &start)| {
            let next = boundaries[(k + 1) % boundaries.len()];
            Sector {
                start,
                end: (next + count - 1) % count,
                property: properties[start].as_ref().to_string(),
            }
        })
        .collect()
}

/// The resolved paint of one sector.
struct SectorPaint {
    sector: Sector,
    background: Option<Color>,
    label: Option<(String, FontSpec, Color)>,
}

/// Draws one ring of sectors and returns the sectors drawn.
///
/// Wedges and labels are drawn sector by sector; the boundary rules are drawn
/// once all wedges are in place. A mapping with a single property yields no
/// sectors and draws nothing.
///
/// # Errors
///
/// Returns [`HyperCollError::MissingProperty`] when a label has no property and
/// [`HyperCollError::MissingStyle`] when a per-property style lacks a sector's
/// property. Both are detected before anything is drawn.
pub fn draw_sectors<S: Surface + ?Sized>(
    surface: &mut S,
    labels: &LabelSet,
    spec: &SectorSpec,
) -> Result<Vec<Sector>, HyperCollError> {
    let properties = labels
        .iter()
        .map(|label| {
            spec.properties()
                .get(label)
                .map(String::as_str)
                .ok_or_else(|| HyperCollError::MissingProperty(label.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let boundaries = sector_boundaries(&properties);
    let sectors = sectors_from_boundaries(&boundaries, &properties);
    info!(
        sectors = sectors.len(),
        inner_radius = spec.inner_radius(),
        outer_radius = spec.outer_radius();
        "Drawing sector ring"
    );

    let paints = sectors
        .iter()
        .map(|sector| resolve_paint(spec, sector))
        .collect::<Result<Vec<_>, _>>()?;

    let count = labels.len();
    let spacing = slot_spacing(count);
    let (r1, r2) = (spec.inner_radius(), spec.outer_radius());
    let label_radius = 0.5 * (r1 + r2);

    let mut surface = TransformGuard::new(surface);
    for paint in &paints {
        let (a, b) = (paint.sector.start as f64, paint.sector.end as f64);
        if let Some(color) = paint.background {
            surface.set_source(color);
            surface.arc_negative(
                Point::ZERO,
                r2,
                -(a - 0.5) * spacing,
                -(b + 0.5) * spacing,
            );
            surface.arc(Point::ZERO, r1, -(b + 0.5) * spacing, -(a - 0.5) * spacing);
            surface.fill();
        }

        if let Some((text, font, color)) = &paint.label {
            surface.set_source(*color);
            warp::draw_sector_label(
                &mut *surface,
                label_radius,
                paint.sector.start,
                paint.sector.end,
                count,
                text,
                font,
            )?;
        }
        debug!(
            start = paint.sector.start,
            end = paint.sector.end,
            property = paint.sector.property.as_str();
            "Sector drawn"
        );
    }

    if let Some(stroke) = spec.boundary() {
        surface.set_line_width(stroke.width);
        surface.set_source(stroke.color);
        for &boundary in &boundaries {
            let phi = spacing * (boundary as f64 - 0.5);
            surface.move_to(Point::new(r1 * phi.cos(), -r1 * phi.sin()));
            surface.line_to(Point::new(r2 * phi.cos(), -r2 * phi.sin()));
            surface.stroke();
        }
    }

    Ok(sectors)
}

fn resolve_paint(spec: &SectorSpec, sector: &Sector) -> Result<SectorPaint, HyperCollError> {
    let property = sector.property.as_str();
    let background = spec
        .background()
        .map(|style| style.resolve(property).copied())
        .transpose()?;
    let label = match spec.label_text(property) {
        Some(text) => Some((
            text.to_string(),
            spec.font().resolve(property)?.clone(),
            *spec.foreground().resolve(property)?,
        )),
        None => None,
    };

    Ok(SectorPaint {
        sector: sector.clone(),
        background,
        label,
    })
}
