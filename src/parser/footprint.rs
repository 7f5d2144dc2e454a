//! Footprint element parser.
//!
//! Reference and value are not dedicated fields in the raw grammar; they are
//! recovered from the `property` sub-elements named "Reference" and "Value".
//! Sub-elements with no typed representation land in the footprint's
//! `extras` bucket so they survive a round-trip.

use crate::parser::common::{
    parse_font, parse_point, parse_point_rotated, parse_size_pair, parse_stroke, parse_uuid,
};
use crate::parser::pcb_schema::{
    Arc, Footprint, Line, Pad, PadDrill, Point, Property, Rectangle, Text,
};
use crate::parser::registry::{ElementParser, ParsedElement};
use crate::parser::sexp::{child_text, find_child, Value};

/// Footprint children that `parse_element` lifts into typed fields; anything
/// else goes to `extras`.
const KNOWN_CHILDREN: &[&str] = &[
    "layer",
    "uuid",
    "at",
    "descr",
    "tags",
    "property",
    "path",
    "sheetname",
    "sheetfile",
    "attr",
    "fp_line",
    "fp_arc",
    "fp_rect",
    "fp_text",
    "pad",
    "model",
    "embedded_fonts",
];

pub struct FootprintParser;

impl ElementParser for FootprintParser {
    fn element_type(&self) -> &'static str {
        "footprint"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        // Library id is the only positional argument: "Lib:Name" or "Name".
        let lib_id = items.get(1)?.as_text()?;
        let (library, name) = match lib_id.split_once(':') {
            Some((lib, name)) => (lib.to_string(), name.to_string()),
            None => (String::new(), lib_id.to_string()),
        };

        let (position, rotation) = parse_point_rotated(items, "at")?;

        let mut footprint = Footprint {
            library,
            name,
            reference: String::new(),
            value: String::new(),
            position,
            rotation: rotation.unwrap_or(0.0),
            layer: child_text(items, "layer").unwrap_or_else(|| "F.Cu".to_string()),
            uuid: parse_uuid(items),
            descr: child_text(items, "descr"),
            tags: child_text(items, "tags"),
            path: child_text(items, "path"),
            sheetname: child_text(items, "sheetname"),
            sheetfile: child_text(items, "sheetfile"),
            attr: None,
            properties: Vec::new(),
            lines: Vec::new(),
            arcs: Vec::new(),
            rectangles: Vec::new(),
            texts: Vec::new(),
            pads: Vec::new(),
            model: None,
            embedded_fonts: child_text(items, "embedded_fonts").map(|v| v == "yes"),
            extras: Vec::new(),
        };

        if let Some(attr) = find_child(items, "attr").and_then(|a| a.as_list()) {
            let tokens: Vec<&str> = attr[1..].iter().filter_map(|v| v.as_text()).collect();
            footprint.attr = Some(tokens.join(" "));
        }

        if let Some(model) = child_text(items, "model") {
            footprint.model = Some(model);
        }

        for item in &items[2..] {
            let Some(child) = item.as_list() else { continue };
            let Some(tag) = child.first().and_then(|v| v.as_text()) else {
                continue;
            };
            match tag {
                "property" => {
                    if let Some(property) = parse_property(child) {
                        if property.name == "Reference" && footprint.reference.is_empty() {
                            footprint.reference = property.value.clone();
                        } else if property.name == "Value" && footprint.value.is_empty() {
                            footprint.value = property.value.clone();
                        }
                        footprint.properties.push(property);
                    }
                }
                "fp_line" => footprint.lines.extend(parse_line(child)),
                "fp_arc" => footprint.arcs.extend(parse_arc(child)),
                "fp_rect" => footprint.rectangles.extend(parse_rectangle(child)),
                "fp_text" => {
                    if let Some(text) = parse_text(child) {
                        // Older files carry reference/value as fp_text
                        if text.kind == "reference" && footprint.reference.is_empty() {
                            footprint.reference = text.text.clone();
                        } else if text.kind == "value" && footprint.value.is_empty() {
                            footprint.value = text.text.clone();
                        }
                        footprint.texts.push(text);
                    }
                }
                "pad" => footprint.pads.extend(parse_pad(child)),
                _ => {
                    if !KNOWN_CHILDREN.contains(&tag) {
                        footprint.extras.push(item.clone());
                    }
                }
            }
        }

        Some(ParsedElement::Footprint(footprint))
    }
}

fn parse_property(items: &[Value]) -> Option<Property> {
    if items.len() < 3 {
        return None;
    }
    let name = items[1].as_text()?.to_string();
    let value = items[2].as_text()?.to_string();
    let (position, rotation) =
        parse_point_rotated(items, "at").unwrap_or((Point::default(), None));
    let (size, thickness, _) = parse_font(items);
    Some(Property {
        name,
        value,
        position,
        rotation: rotation.unwrap_or(0.0),
        layer: child_text(items, "layer").unwrap_or_else(|| "F.SilkS".to_string()),
        uuid: parse_uuid(items),
        size,
        thickness,
    })
}

pub(crate) fn parse_pad(items: &[Value]) -> Option<Pad> {
    if items.len() < 4 {
        return None;
    }
    let number = items[1].as_text()?.to_string();
    let pad_type = items[2].as_text()?.to_string();
    let shape = items[3].as_text()?.to_string();

    let (position, rotation) =
        parse_point_rotated(items, "at").unwrap_or((Point::default(), None));
    let size = parse_size_pair(items, "size").unwrap_or((1.0, 1.0));

    let layers = match find_child(items, "layers").and_then(|l| l.as_list()) {
        Some(layers) => layers[1..]
            .iter()
            .filter_map(|v| v.as_text())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };

    let drill = find_child(items, "drill")
        .and_then(|d| d.as_list())
        .and_then(parse_drill);

    let (net, net_name) = match find_child(items, "net").and_then(|n| n.as_list()) {
        Some(net) => (
            net.get(1).and_then(|v| v.as_i64()).map(|n| n as i32),
            net.get(2).and_then(|v| v.as_text()).map(str::to_string),
        ),
        None => (None, None),
    };

    Some(Pad {
        number,
        pad_type,
        shape,
        position,
        rotation,
        size,
        drill,
        layers,
        roundrect_rratio: crate::parser::sexp::child_f64(items, "roundrect_rratio"),
        net,
        net_name,
        uuid: parse_uuid(items),
    })
}

/// `(drill 1.0)` is circular; `(drill oval W H)` is oval; an SMD pad has no
/// drill at all.
fn parse_drill(drill: &[Value]) -> Option<PadDrill> {
    if drill.len() >= 4 && drill[1].as_sym() == Some("oval") {
        return Some(PadDrill::Oval {
            width: drill[2].as_f64()?,
            height: drill[3].as_f64()?,
        });
    }
    Some(PadDrill::Circular(drill.get(1)?.as_f64()?))
}

pub(crate) fn parse_line(items: &[Value]) -> Option<Line> {
    Some(Line {
        start: parse_point(items, "start")?,
        end: parse_point(items, "end")?,
        stroke: parse_stroke(items),
        layer: child_text(items, "layer").unwrap_or_else(|| "F.SilkS".to_string()),
        uuid: parse_uuid(items),
    })
}

pub(crate) fn parse_arc(items: &[Value]) -> Option<Arc> {
    Some(Arc {
        start: parse_point(items, "start")?,
        mid: parse_point(items, "mid")?,
        end: parse_point(items, "end")?,
        stroke: parse_stroke(items),
        layer: child_text(items, "layer").unwrap_or_else(|| "F.SilkS".to_string()),
        uuid: parse_uuid(items),
    })
}

pub(crate) fn parse_rectangle(items: &[Value]) -> Option<Rectangle> {
    let fill = find_child(items, "fill")
        .and_then(|f| f.as_list())
        .and_then(|f| f.get(1))
        .and_then(|v| v.as_text())
        .map(str::to_string);
    Some(Rectangle {
        start: parse_point(items, "start")?,
        end: parse_point(items, "end")?,
        stroke: parse_stroke(items),
        fill,
        layer: child_text(items, "layer").unwrap_or_else(|| "F.SilkS".to_string()),
        uuid: parse_uuid(items),
    })
}

/// Shared by `fp_text` (kind argument present) and `gr_text` (no kind).
pub(crate) fn parse_text(items: &[Value]) -> Option<Text> {
    if items.len() < 3 {
        return None;
    }
    // fp_text: (fp_text user "T" …); gr_text: (gr_text "T" …)
    let (kind, text) = match (&items[1], &items[2]) {
        (Value::Sym(kind), value) => (kind.clone(), value.as_text()?.to_string()),
        (value, _) => ("user".to_string(), value.as_text()?.to_string()),
    };
    let (position, rotation) =
        parse_point_rotated(items, "at").unwrap_or((Point::default(), None));
    let (size, thickness, justify) = parse_font(items);
    Some(Text {
        text,
        kind,
        position,
        rotation,
        layer: child_text(items, "layer").unwrap_or_else(|| "F.SilkS".to_string()),
        size,
        thickness,
        justify,
        uuid: parse_uuid(items),
    })
}
