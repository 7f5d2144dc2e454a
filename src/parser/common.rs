//! Shared sub-element readers used by the per-element parsers.

use crate::parser::pcb_schema::{Point, Stroke};
use crate::parser::sexp::{child_f64, find_child, Value};

/// `(tag x y)` → Point. First matching child wins.
pub(crate) fn parse_point(items: &[Value], tag: &str) -> Option<Point> {
    let child = find_child(items, tag)?.as_list()?;
    let x = child.get(1)?.as_f64()?;
    let y = child.get(2)?.as_f64()?;
    Some(Point::new(x, y))
}

/// `(tag x y [rotation])` → Point plus the optional rotation argument.
pub(crate) fn parse_point_rotated(items: &[Value], tag: &str) -> Option<(Point, Option<f64>)> {
    let child = find_child(items, tag)?.as_list()?;
    let x = child.get(1)?.as_f64()?;
    let y = child.get(2)?.as_f64()?;
    let rotation = child.get(3).and_then(|v| v.as_f64());
    Some((Point::new(x, y), rotation))
}

/// `(size w h)` → pair.
pub(crate) fn parse_size_pair(items: &[Value], tag: &str) -> Option<(f64, f64)> {
    let child = find_child(items, tag)?.as_list()?;
    let w = child.get(1)?.as_f64()?;
    let h = child.get(2)?.as_f64()?;
    Some((w, h))
}

/// `(stroke (width w) (type t))`.
pub(crate) fn parse_stroke(items: &[Value]) -> Option<Stroke> {
    let stroke = find_child(items, "stroke")?.as_list()?;
    Some(Stroke {
        width: child_f64(stroke, "width").unwrap_or(0.0),
        kind: crate::parser::sexp::child_text(stroke, "type").unwrap_or_else(|| "solid".to_string()),
    })
}

/// `(uuid "…")`. Absent UUIDs stay absent so the source round-trips.
pub(crate) fn parse_uuid(items: &[Value]) -> Option<String> {
    crate::parser::sexp::child_text(items, "uuid")
}

/// Font metadata out of `(effects (font (size w h) (thickness t)) (justify …))`.
pub(crate) fn parse_font(
    items: &[Value],
) -> (Option<(f64, f64)>, Option<f64>, Vec<String>) {
    let Some(effects) = find_child(items, "effects").and_then(|e| e.as_list()) else {
        return (None, None, Vec::new());
    };
    let (size, thickness) = match find_child(effects, "font").and_then(|f| f.as_list()) {
        Some(font) => (
            parse_size_pair(font, "size"),
            child_f64(font, "thickness"),
        ),
        None => (None, None),
    };
    let justify = match find_child(effects, "justify").and_then(|j| j.as_list()) {
        Some(justify) => justify[1..]
            .iter()
            .filter_map(|v| v.as_text())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };
    (size, thickness, justify)
}

/// Every `(xy x y)` under `(pts …)`.
pub(crate) fn parse_pts(pts: &[Value]) -> Vec<Point> {
    let mut points = Vec::new();
    for item in &pts[1..] {
        let Some(xy) = item.as_list() else { continue };
        if xy.first().and_then(|v| v.as_sym()) != Some("xy") {
            continue;
        }
        let (Some(x), Some(y)) = (
            xy.get(1).and_then(|v| v.as_f64()),
            xy.get(2).and_then(|v| v.as_f64()),
        ) else {
            continue;
        };
        points.push(Point::new(x, y));
    }
    points
}
