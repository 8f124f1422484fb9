//! Integration tests for the HyperColl rendering API.

use float_cmp::assert_approx_eq;
use hypercoll::{
    HyperColl, HyperCollError,
    color::Color,
    config::{RenderOptions, SectorSpec},
    draw::{Canvas, DrawOp, HeuristicTextEngine, Surface},
};
use indexmap::IndexMap;
use kurbo::{Affine, PathEl, Point, Shape};

const PAGE: f64 = 400.0;

fn diagram(labels: &[&str]) -> HyperColl<Canvas<HeuristicTextEngine>> {
    let canvas = Canvas::new(PAGE, PAGE, HeuristicTextEngine);
    HyperColl::new(labels.iter().copied(), canvas, PAGE, PAGE).expect("valid labels")
}

/// Options that draw patches only.
fn bare_options() -> RenderOptions {
    RenderOptions::default()
        .with_radius(200.0)
        .with_span(0.2)
        .with_curvature(0.6)
        .with_labels(false)
        .with_background_disk(None)
        .with_background_circle(None)
}

fn kinds(ops: &[DrawOp]) -> Vec<&'static str> {
    ops.iter()
        .map(|op| match op {
            DrawOp::Fill { .. } => "fill",
            DrawOp::Stroke { .. } => "stroke",
            DrawOp::Text { .. } => "text",
        })
        .collect()
}

#[test]
fn test_two_member_patch_is_mirror_symmetric() {
    let mut diagram = diagram(&["A", "B", "C", "D"]);
    let radius = diagram.render(&[["A", "C"]], &bare_options()).unwrap();
    assert_approx_eq!(f64, radius, 200.0);

    let ops = diagram.surface().ops();
    assert_eq!(kinds(ops), ["fill", "stroke"]);
    let path = ops[0].path().unwrap();

    // Rim arcs around slot 0 (right) and slot 2 (left)
    let bounds = path.bounding_box();
    assert_approx_eq!(f64, bounds.x1, PAGE, epsilon = 1e-3);
    assert_approx_eq!(f64, bounds.x0, 0.0, epsilon = 1e-3);
    assert_approx_eq!(f64, bounds.y0 - 200.0, -(bounds.y1 - 200.0), epsilon = 1e-6);

    let center = Point::new(200.0, 200.0);
    let connectors: Vec<(Point, Point, Point)> = path
        .elements()
        .iter()
        .filter_map(|el| match *el {
            PathEl::CurveTo(c1, c2, end)
                if (c1 - center).hypot() < 199.0 && (c2 - center).hypot() < 199.0 =>
            {
                Some((c1, c2, end))
            }
            _ => None,
        })
        .collect();
    assert_eq!(connectors.len(), 2, "one connector per gap");

    // The upper connector mirrors the lower one about the horizontal axis
    let (upper, lower) = (connectors[0], connectors[1]);
    let mirror = |p: Point| Point::new(p.x, PAGE - p.y);
    assert!((mirror(upper.0) - lower.1).hypot() < 1e-6);
    assert!((mirror(upper.1) - lower.0).hypot() < 1e-6);
    assert!(upper.0.y < 200.0 && lower.0.y > 200.0);
}

#[test]
fn test_member_order_does_not_matter() {
    let labels = ["A", "B", "C", "D", "E"];
    let mut forward = diagram(&labels);
    let mut backward = diagram(&labels);
    forward.render(&[["A", "B", "C"]], &bare_options()).unwrap();
    backward.render(&[["C", "B", "A"]], &bare_options()).unwrap();
    assert_eq!(forward.surface().ops(), backward.surface().ops());
}

#[test]
fn test_two_member_patch_has_area() {
    let mut diagram = diagram(&["A", "B", "C", "D", "E", "F"]);
    diagram.render(&[["B", "E"]], &bare_options()).unwrap();
    let path = diagram.surface().ops()[0].path().unwrap();
    assert!(path.area().abs() > 100.0);
}

#[test]
fn test_fills_precede_strokes_and_palette_cycles() {
    let red = Color::new("red").unwrap();
    let blue = Color::new("blue").unwrap();
    let options = bare_options()
        .with_palette(vec![red, blue])
        .with_opacity(0.25, 0.75);

    let mut diagram = diagram(&["A", "B", "C", "D"]);
    let collections = [vec!["A", "B"], vec!["B", "C"], vec!["C", "D", "A"]];
    diagram.render(&collections, &options).unwrap();

    let ops = diagram.surface().ops();
    assert_eq!(kinds(ops), ["fill", "fill", "fill", "stroke", "stroke", "stroke"]);
    let paints: Vec<(String, f32)> = ops
        .iter()
        .map(|op| (op.color().to_hex(), op.color().alpha()))
        .collect();
    let (red, blue) = (red.to_hex(), blue.to_hex());
    assert_eq!(paints[0], (red.clone(), 0.25));
    assert_eq!(paints[1], (blue, 0.25));
    assert_eq!(paints[2], (red.clone(), 0.25));
    assert_eq!(paints[3], (red.clone(), 0.75));
    assert_eq!(paints[5], (red, 0.75));
}

#[test]
fn test_edge_order_controls_stroke_order() {
    let red = Color::new("red").unwrap();
    let blue = Color::new("blue").unwrap();
    let options = bare_options()
        .with_palette(vec![red, blue])
        .with_fill(false)
        .with_edge_order(Some(vec![1, 0]));

    let mut diagram = diagram(&["A", "B", "C", "D"]);
    diagram.render(&[["A", "B"], ["C", "D"]], &options).unwrap();

    let ops = diagram.surface().ops();
    assert_eq!(kinds(ops), ["stroke", "stroke"]);
    assert_eq!(ops[0].color().to_hex(), blue.to_hex());
    assert_eq!(ops[1].color().to_hex(), red.to_hex());
}

#[test]
fn test_invalid_input_draws_nothing() {
    let mut diagram = diagram(&["A", "B", "C"]);

    let result = diagram.render(&[["A", "Z"]], &RenderOptions::default());
    assert!(matches!(result, Err(HyperCollError::UnknownLabel(label)) if label == "Z"));

    let result = diagram.render(&[vec!["A"], vec![]], &RenderOptions::default());
    assert!(matches!(result, Err(HyperCollError::EmptyCollection(1))));

    let result = diagram.render(&[["A", "B", "A"]], &RenderOptions::default());
    assert!(matches!(result, Err(HyperCollError::DuplicateMember(_))));

    let options = RenderOptions::default().with_edge_order(Some(vec![0, 3]));
    let result = diagram.render(&[["A", "B"]], &options);
    assert!(matches!(
        result,
        Err(HyperCollError::InvalidEdgeOrder { index: 3, count: 1 })
    ));

    let options = RenderOptions::default().with_palette(Vec::new());
    let result = diagram.render(&[["A", "B"]], &options);
    assert!(matches!(result, Err(HyperCollError::EmptyPalette)));

    assert!(diagram.surface().ops().is_empty());
}

#[test]
fn test_full_render_restores_transform() {
    let mut diagram = diagram(&["Austria", "Belgium", "Croatia", "Denmark", "Estonia"]);
    let collections = [
        vec!["Austria", "Croatia"],
        vec!["Belgium", "Denmark", "Estonia"],
    ];
    let radius = diagram
        .render(&collections, &RenderOptions::default().with_radius(180.0))
        .unwrap();

    // 8pt heuristic labels: "Austria" is 7 cells of 4.8pt
    assert_approx_eq!(f64, radius, 180.0 - 7.0 * 4.8 - 10.0, epsilon = 1e-9);

    let ops = diagram.surface().ops();
    assert_eq!(
        &kinds(ops)[..7],
        ["fill", "stroke", "text", "text", "text", "text", "text"]
    );
    assert_eq!(ops.len(), 2 + 5 + 2 + 2);
    assert_eq!(
        diagram.surface().transform(),
        Affine::translate((PAGE / 2.0, PAGE / 2.0))
    );
    assert_eq!(diagram.surface().save_depth(), 0);
}

#[test]
fn test_sector_boundaries_from_properties() {
    let mut diagram = diagram(&["A", "B", "C"]);
    let properties = IndexMap::from([
        ("A".to_string(), "X".to_string()),
        ("B".to_string(), "X".to_string()),
        ("C".to_string(), "Y".to_string()),
    ]);
    let spec = SectorSpec::new(100.0, 120.0, properties).without_labels();
    let sectors = diagram.sectors(&spec).unwrap();

    let starts: Vec<usize> = sectors.iter().map(|s| s.start).collect();
    assert_eq!(starts, [0, 2]);
    assert_eq!(sectors[0].end, 1);
    assert_eq!(sectors[1].end, 2);
    assert_eq!(kinds(diagram.surface().ops()), ["fill", "fill", "stroke", "stroke"]);
    assert_eq!(
        diagram.surface().transform(),
        Affine::translate((PAGE / 2.0, PAGE / 2.0))
    );
}

#[test]
fn test_disk_circle_and_lookup() {
    let mut diagram = diagram(&["A", "B"]);
    assert_eq!(diagram.index_of("B"), Some(1));
    assert_eq!(diagram.index_of("Z"), None);
    assert_eq!(diagram.labels().len(), 2);

    diagram.disk(50.0, Color::new("navy").unwrap());
    diagram.circle(60.0, Color::new("white").unwrap(), 2.0);
    let ops = diagram.surface().ops();
    assert_eq!(kinds(ops), ["fill", "stroke"]);
    let DrawOp::Stroke { width, .. } = ops[1] else {
        panic!("expected stroke");
    };
    assert_approx_eq!(f64, width, 2.0);
    let area = ops[0].path().unwrap().area().abs();
    // Arcs are flattened to within 0.01pt, so allow perimeter times that
    let epsilon = std::f64::consts::TAU * 50.0 * 0.01;
    assert_approx_eq!(f64, area, std::f64::consts::PI * 2500.0, epsilon = epsilon);
}

#[test]
fn test_finish_writes_svg() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let output = dir.path().join("collage.svg");

    let canvas = Canvas::new(PAGE, PAGE, HeuristicTextEngine).with_output(&output);
    let mut diagram = HyperColl::new(["A", "B", "C"], canvas, PAGE, PAGE).unwrap();
    diagram
        .render(&[["A", "B", "C"]], &RenderOptions::default())
        .unwrap();
    let canvas = diagram.finish().unwrap();
    assert!(canvas.is_finished());

    let svg = std::fs::read_to_string(&output).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    assert!(svg.contains("<text"));
}

#[test]
fn test_invalid_labels() {
    let canvas = Canvas::new(PAGE, PAGE, HeuristicTextEngine);
    let result = HyperColl::new(["A", "A"], canvas, PAGE, PAGE);
    assert!(matches!(result, Err(HyperCollError::DuplicateLabel(_))));
}
