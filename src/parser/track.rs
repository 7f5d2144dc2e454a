//! Track (`segment`) element parser.

use crate::parser::common::{parse_point, parse_uuid};
use crate::parser::pcb_schema::Track;
use crate::parser::registry::{ElementParser, ParsedElement};
use crate::parser::sexp::{child_f64, child_i64, child_text, Value};

pub struct TrackParser;

impl ElementParser for TrackParser {
    fn element_type(&self) -> &'static str {
        "segment"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        let start = parse_point(items, "start")?;
        let end = parse_point(items, "end")?;

        Some(ParsedElement::Track(Track {
            start,
            end,
            width: child_f64(items, "width").unwrap_or(0.25),
            layer: child_text(items, "layer").unwrap_or_else(|| "F.Cu".to_string()),
            net: child_i64(items, "net").unwrap_or(0) as i32,
            net_name: None,
            uuid: parse_uuid(items),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::pcb_schema::Point;
    use crate::parser::sexp::SExpParser;

    fn items(input: &str) -> Vec<Value> {
        match SExpParser::new(input).parse().unwrap() {
            Value::List(items) => items,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_parse_segment() {
        let parsed = TrackParser.parse_element(&items(
            "(segment (start 10 20) (end 30 40) (width 0.25) (layer \"F.Cu\") (net 1) \
             (uuid \"track-uuid\"))",
        ));
        let Some(ParsedElement::Track(track)) = parsed else {
            panic!("expected track");
        };
        assert_eq!(track.start, Point::new(10.0, 20.0));
        assert_eq!(track.end, Point::new(30.0, 40.0));
        assert_eq!(track.width, 0.25);
        assert_eq!(track.layer, "F.Cu");
        assert_eq!(track.net, 1);
        assert_eq!(track.uuid.as_deref(), Some("track-uuid"));
    }

    #[test]
    fn test_segment_requires_endpoints() {
        assert!(TrackParser
            .parse_element(&items("(segment (start 10 20) (width 0.25))"))
            .is_none());
    }
}
