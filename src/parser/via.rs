//! Via element parser.

use crate::parser::common::{parse_point, parse_uuid};
use crate::parser::pcb_schema::Via;
use crate::parser::registry::{ElementParser, ParsedElement};
use crate::parser::sexp::{child_f64, child_i64, find_child, Value};

pub struct ViaParser;

impl ElementParser for ViaParser {
    fn element_type(&self) -> &'static str {
        "via"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        let position = parse_point(items, "at")?;

        let layers = match find_child(items, "layers").and_then(|l| l.as_list()) {
            Some(layers) => layers[1..]
                .iter()
                .filter_map(|v| v.as_text())
                .map(str::to_string)
                .collect(),
            None => vec!["F.Cu".to_string(), "B.Cu".to_string()],
        };

        Some(ParsedElement::Via(Via {
            position,
            size: child_f64(items, "size").unwrap_or(0.8),
            drill: child_f64(items, "drill").unwrap_or(0.4),
            layers,
            net: child_i64(items, "net").unwrap_or(0) as i32,
            net_name: None,
            uuid: parse_uuid(items),
        }))
    }
}
