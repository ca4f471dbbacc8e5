use std::fmt::Write as _;

use egui::{Color32, Pos2, Vec2};
use kurbo::{BezPath, PathEl};
use roxmltree::{Document, Node};

use crate::color::{parse_hex, to_hex};
use crate::drawing::{Drawing, StrokeGroup};
use crate::stroke::Stroke;

use super::{ImportError, ImportResult};

const DEFAULT_STROKE_COLOR: Color32 = Color32::BLACK;
const DEFAULT_STROKE_WIDTH: f32 = 1.0;
/// Largest distance, in SVG units, between a curve and its flattened polyline.
const FLATTEN_TOLERANCE: f64 = 0.25;

/// Render the drawing as an SVG document of the given size.
///
/// The view box is centered on the local origin, so stroke points are
/// written unchanged.
pub fn export_svg(drawing: &Drawing, background: Color32, size: Vec2) -> String {
    let (width, height) = (size.x.max(1.0), size.y.max(1.0));
    let (min_x, min_y) = (-width / 2.0, -height / 2.0);

    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="{x} {y} {w} {h}">"#,
        w = num(width),
        h = num(height),
        x = num(min_x),
        y = num(min_y),
    );
    let _ = writeln!(
        out,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        num(min_x),
        num(min_y),
        num(width),
        num(height),
        to_hex(background),
    );

    for group in drawing.groups() {
        let _ = writeln!(out, r#"  <g id="group-{}">"#, group.id());
        for stroke in group.strokes().iter().filter(|s| !s.is_empty()) {
            let points = stroke
                .points()
                .iter()
                .map(|p| format!("{},{}", num(p.x), num(p.y)))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(
                out,
                r#"    <polyline points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
                points,
                to_hex(stroke.color()),
                num(stroke.width()),
            );
        }
        out.push_str("  </g>\n");
    }

    out.push_str("</svg>\n");
    out
}

fn num(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid "-0"
    if rounded == 0.0 {
        "0".to_owned()
    } else {
        rounded.to_string()
    }
}

/// A drawing read back from an SVG file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSvg {
    pub drawing: Drawing,
    /// Fill of a `<rect>` preceding all strokes, if there was one.
    pub background: Option<Color32>,
}

/// Read an SVG written by [`export_svg`] or a similar tool.
///
/// Each top-level `<g>` becomes one group, and each `<polyline>`, `<line>`
/// or `<path>` subpath inside it a stroke. Curves are flattened. Stroke
/// color and width may come from an enclosing `<g>`. Strokes outside any
/// group become groups of their own. Anything else is skipped.
pub fn import_svg(text: &str) -> ImportResult<ImportedSvg> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(ImportError::NotSvg(root.tag_name().name().to_owned()));
    }

    let offset = view_box_offset(&root);
    let mut drawing = Drawing::new();
    let mut background = None;

    for node in root.children().filter(Node::is_element) {
        match node.tag_name().name() {
            "rect" if background.is_none() && drawing.is_empty() => {
                background = node.attribute("fill").and_then(parse_hex);
            }
            "g" => {
                let strokes: Vec<Stroke> = node
                    .descendants()
                    .flat_map(|child| parse_strokes(&child, offset))
                    .collect();
                if strokes.is_empty() {
                    log::debug!("Skipping SVG group without strokes");
                } else {
                    drawing.push(StrokeGroup::new(strokes));
                }
            }
            _ => {
                let strokes = parse_strokes(&node, offset);
                if !strokes.is_empty() {
                    drawing.push(StrokeGroup::new(strokes));
                }
            }
        }
    }

    log::info!("Imported SVG with {} groups", drawing.len());
    Ok(ImportedSvg { drawing, background })
}

/// Translation that moves the view box center onto the local origin.
fn view_box_offset(root: &Node<'_, '_>) -> Vec2 {
    let values: Vec<f32> = root
        .attribute("viewBox")
        .map(parse_numbers)
        .unwrap_or_default();
    match values.as_slice() {
        [x, y, w, h] => -Vec2::new(x + w / 2.0, y + h / 2.0),
        _ => {
            // No view box: assume user units from the top-left corner
            let width = root.attribute("width").and_then(parse_length);
            let height = root.attribute("height").and_then(parse_length);
            match (width, height) {
                (Some(w), Some(h)) => -Vec2::new(w / 2.0, h / 2.0),
                _ => Vec2::ZERO,
            }
        }
    }
}

fn parse_length(text: &str) -> Option<f32> {
    text.trim().trim_end_matches("px").parse().ok()
}

/// The strokes drawn by one element. A path yields one stroke per subpath.
fn parse_strokes(node: &Node<'_, '_>, offset: Vec2) -> Vec<Stroke> {
    let lines = match node.tag_name().name() {
        "polyline" => node.attribute("points").map(parse_points).into_iter().collect(),
        "line" => {
            let coord = |name: &str| node.attribute(name).and_then(|v| v.trim().parse::<f32>().ok());
            match (coord("x1"), coord("y1"), coord("x2"), coord("y2")) {
                (Some(x1), Some(y1), Some(x2), Some(y2)) => vec![vec![Pos2::new(x1, y1), Pos2::new(x2, y2)]],
                _ => Vec::new(),
            }
        }
        "path" => node.attribute("d").map(parse_path).unwrap_or_default(),
        _ => Vec::new(),
    };

    let color = inherited_attribute(node, "stroke")
        .and_then(parse_hex)
        .unwrap_or(DEFAULT_STROKE_COLOR);
    let width = inherited_attribute(node, "stroke-width")
        .and_then(parse_length)
        .filter(|w| w.is_finite() && *w > 0.0)
        .unwrap_or(DEFAULT_STROKE_WIDTH);

    lines
        .into_iter()
        .filter(|points| points.len() >= 2)
        .map(|points| Stroke::with_points(color, width, points.into_iter().map(|p| p + offset).collect()))
        .collect()
}

/// An attribute on the element or, failing that, on the nearest ancestor
/// that sets it.
fn inherited_attribute<'a>(node: &Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.ancestors()
        .filter(Node::is_element)
        .find_map(|n| n.attribute(name))
}

/// Numbers separated by whitespace, commas or sign changes.
fn parse_numbers(text: &str) -> Vec<f32> {
    number_tokens(text).filter_map(|t| t.parse().ok()).collect()
}

fn parse_points(text: &str) -> Vec<Pos2> {
    parse_numbers(text)
        .chunks_exact(2)
        .map(|pair| Pos2::new(pair[0], pair[1]))
        .collect()
}

fn number_tokens(text: &str) -> impl Iterator<Item = &str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut prev = ' ';
    for (i, c) in text.char_indices() {
        let is_num = c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E';
        let is_sign = (c == '-' || c == '+') && prev != 'e' && prev != 'E';
        if is_sign {
            if let Some(s) = start.take() {
                tokens.push(&text[s..i]);
            }
            start = Some(i);
        } else if is_num || c == '-' || c == '+' {
            start.get_or_insert(i);
        } else if let Some(s) = start.take() {
            tokens.push(&text[s..i]);
        }
        prev = c;
    }
    if let Some(s) = start {
        tokens.push(&text[s..]);
    }
    tokens.into_iter()
}

/// Subpaths of path data as polylines. Curves are flattened and a closed
/// subpath ends back at its start.
fn parse_path(d: &str) -> Vec<Vec<Pos2>> {
    let path = match BezPath::from_svg(d) {
        Ok(path) => path,
        Err(err) => {
            log::debug!("Skipping SVG path data {:?}: {}", d, err);
            return Vec::new();
        }
    };

    let mut subpaths: Vec<Vec<Pos2>> = Vec::new();
    kurbo::flatten(path.iter(), FLATTEN_TOLERANCE, |el| {
        let point = |p: kurbo::Point| Pos2::new(p.x as f32, p.y as f32);
        match el {
            PathEl::MoveTo(p) => subpaths.push(vec![point(p)]),
            PathEl::LineTo(p) => match subpaths.last_mut() {
                Some(current) => current.push(point(p)),
                None => subpaths.push(vec![point(p)]),
            },
            PathEl::ClosePath => {
                if let Some(current) = subpaths.last_mut() {
                    let start = current[0];
                    if current.last() != Some(&start) {
                        current.push(start);
                    }
                }
            }
            // Flattening only yields straight segments
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        }
    });
    subpaths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_centers_the_view_box() {
        let svg = export_svg(&Drawing::new(), Color32::WHITE, Vec2::new(400.0, 300.0));
        assert!(svg.contains(r#"viewBox="-200 -150 400 300""#));
        assert!(svg.contains(r##"fill="#FFFFFF""##));
    }

    #[test]
    fn groups_are_written_with_their_ids() {
        let mut drawing = Drawing::new();
        let group = StrokeGroup::new(vec![Stroke::with_points(
            Color32::RED,
            2.0,
            vec![Pos2::new(0.0, 0.0), Pos2::new(5.0, 5.0)],
        )]);
        let id = group.id();
        drawing.push(group);

        let svg = export_svg(&drawing, Color32::WHITE, Vec2::new(100.0, 100.0));
        assert!(svg.contains(&format!(r#"<g id="group-{id}">"#)));
        assert_eq!(import_svg(&svg).unwrap().drawing.len(), 1);
    }

    #[test]
    fn tokens_split_on_signs() {
        assert_eq!(parse_numbers("10-20,3.5 -1e2"), vec![10.0, -20.0, 3.5, -100.0]);
        assert_eq!(parse_numbers(" 1 , 2 "), vec![1.0, 2.0]);
    }

    #[test]
    fn path_with_lines() {
        let points = parse_path("M0 0 L10 0 l0 10 H0");
        assert_eq!(
            points,
            vec![vec![
                Pos2::new(0.0, 0.0),
                Pos2::new(10.0, 0.0),
                Pos2::new(10.0, 10.0),
                Pos2::new(0.0, 10.0),
            ]]
        );
    }

    #[test]
    fn closed_path_returns_to_its_start() {
        let points = parse_path("M0 0 L10 0 L10 10 Z");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].first(), Some(&Pos2::new(0.0, 0.0)));
        assert_eq!(points[0].last(), Some(&Pos2::new(0.0, 0.0)));
        assert_eq!(points[0].len(), 4);
    }

    #[test]
    fn curve_is_flattened_through_its_end_point() {
        let points = parse_path("M110,100c10,0 20,5 30,20");
        assert_eq!(points.len(), 1);
        let line = &points[0];
        assert!(line.len() > 2);
        assert_eq!(line[0], Pos2::new(110.0, 100.0));
        let end = *line.last().unwrap();
        assert!((end.x - 140.0).abs() < 1e-3 && (end.y - 120.0).abs() < 1e-3);
    }

    #[test]
    fn each_subpath_is_its_own_line() {
        assert_eq!(parse_path("M0 0 L5 5 M10 10 L20 20").len(), 2);
        assert!(parse_path("not a path").is_empty());
    }

    #[test]
    fn group_attributes_are_inherited() {
        let text = r##"<svg xmlns="http://www.w3.org/2000/svg">
            <g stroke="#ff0000" stroke-width="6" fill="none">
                <path d="M110,100c10,0 20,5 30,20"/>
                <path d="M0 0 L10 0 L10 10 Z" stroke-width="2"/>
            </g>
        </svg>"##;
        let imported = import_svg(text).unwrap();
        assert_eq!(imported.drawing.len(), 1);
        let strokes = imported.drawing.groups()[0].strokes();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].color(), Color32::from_rgb(255, 0, 0));
        assert_eq!(strokes[0].width(), 6.0);
        assert_eq!(strokes[1].color(), Color32::from_rgb(255, 0, 0));
        assert_eq!(strokes[1].width(), 2.0);
    }

    #[test]
    fn view_box_origin_is_moved_to_center() {
        let text = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
            <polyline points="50,50 60,50" stroke="#00FF00" stroke-width="3"/>
        </svg>"##;
        let imported = import_svg(text).unwrap();
        let stroke = &imported.drawing.groups()[0].strokes()[0];
        assert_eq!(stroke.points(), &[Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0)]);
        assert_eq!(stroke.color(), Color32::from_rgb(0, 255, 0));
        assert_eq!(stroke.width(), 3.0);
        assert_eq!(imported.background, None);
    }

    #[test]
    fn non_svg_root_is_an_error() {
        assert!(matches!(import_svg("<html></html>"), Err(ImportError::NotSvg(_))));
        assert!(matches!(import_svg("<svg"), Err(ImportError::Xml(_))));
    }
}
