//! SVG serialization of recorded drawing operations.

use std::{fs::File, io::Write, path::Path};

use kurbo::Affine;
use log::{error, info};
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use crate::{draw::canvas::DrawOp, error::DrawError};

/// Builds an SVG document of `width` × `height` user units from `ops`.
pub(super) fn render_document(width: f64, height: f64, ops: &[DrawOp]) -> Document {
    let mut doc = Document::new()
        .set("viewBox", format!("0 0 {width} {height}"))
        .set("width", width)
        .set("height", height);

    for op in ops {
        doc = match op {
            DrawOp::Fill { path, color } => doc.add(
                svg_element::Path::new()
                    .set("d", path.to_svg())
                    .set("fill", color)
                    .set("fill-opacity", color.alpha())
                    .set("stroke", "none"),
            ),
            DrawOp::Stroke { path, color, width } => doc.add(
                svg_element::Path::new()
                    .set("d", path.to_svg())
                    .set("fill", "none")
                    .set("stroke", color)
                    .set("stroke-opacity", color.alpha())
                    .set("stroke-width", *width),
            ),
            DrawOp::Text {
                text,
                font,
                color,
                transform,
            } => doc.add(
                svg_element::Text::new("")
                    .set("transform", matrix(*transform))
                    .set("font-family", font.family())
                    .set("font-size", font.size())
                    .set("font-style", font.slant().to_svg_value())
                    .set("font-weight", font.weight().to_svg_value())
                    .set("fill", color)
                    .set("fill-opacity", color.alpha())
                    .add(SvgText::new(text.as_str())),
            ),
        };
    }

    doc
}

/// Writes `doc` to `path`, replacing any existing file.
pub(super) fn write_document(path: &Path, doc: &Document) -> Result<(), DrawError> {
    let file_name = path.display();
    info!(file_name:%; "Creating SVG file");

    let f = match File::create(path) {
        Ok(file) => file,
        Err(err) => {
            error!(file_name:%, err:err; "Failed to create SVG file");
            return Err(DrawError::Io(err));
        }
    };

    if let Err(err) = write!(&f, "{doc}") {
        error!(file_name:%, err:err; "Failed to write SVG content");
        return Err(DrawError::Io(err));
    }

    Ok(())
}

fn matrix(transform: Affine) -> String {
    let [a, b, c, d, e, f] = transform.as_coeffs();
    format!("matrix({a} {b} {c} {d} {e} {f})")
}

#[cfg(test)]
mod tests {
    use kurbo::{BezPath, Point};

    use super::*;
    use crate::{color::Color, draw::FontSpec};

    fn square() -> BezPath {
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(10.0, 0.0));
        path.line_to(Point::new(10.0, 10.0));
        path.close_path();
        path
    }

    #[test]
    fn test_document_size() {
        let svg = render_document(640.0, 480.0, &[]).to_string();
        assert!(svg.contains(r#"viewBox="0 0 640 480""#));
        assert!(svg.contains(r#"width="640""#));
    }

    #[test]
    fn test_fill_and_stroke_attributes() {
        let color = Color::new("#336699").unwrap().with_alpha(0.5);
        let ops = [
            DrawOp::Fill {
                path: square(),
                color,
            },
            DrawOp::Stroke {
                path: square(),
                color: Color::default(),
                width: 2.5,
            },
        ];
        let svg = render_document(100.0, 100.0, &ops).to_string();
        assert!(svg.contains(r##"fill="#336699""##));
        assert!(svg.contains(r#"fill-opacity="0.5""#));
        assert!(svg.contains(r#"stroke-width="2.5""#));
        assert!(svg.contains(r#"d="M0"#));

        // Fills come first in the document, matching issue order
        let fill_at = svg.find("fill-opacity").unwrap();
        let stroke_at = svg.find("stroke-width").unwrap();
        assert!(fill_at < stroke_at);
    }

    #[test]
    fn test_text_transform_matrix() {
        let ops = [DrawOp::Text {
            text: "Poland".to_string(),
            font: FontSpec::default(),
            color: Color::default(),
            transform: Affine::translate((3.0, 4.0)),
        }];
        let svg = render_document(100.0, 100.0, &ops).to_string();
        assert!(svg.contains(r#"transform="matrix(1 0 0 1 3 4)""#));
        assert!(svg.contains("Poland"));
        assert!(svg.contains(r#"font-weight="bold""#));
    }

    #[test]
    fn test_write_document_to_missing_directory_fails() {
        let doc = render_document(10.0, 10.0, &[]);
        let result = write_document(Path::new("/nonexistent-dir/out.svg"), &doc);
        assert!(matches!(result, Err(DrawError::Io(_))));
    }
}
