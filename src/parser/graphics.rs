//! Board-level graphics parsers: `gr_line`, `gr_arc`, `gr_rect`, `gr_text`.
//!
//! Other graphic forms (`gr_circle`, `gr_poly`, …) have no typed parser and
//! are preserved opaquely by the document assembler.

use crate::parser::footprint::{parse_arc, parse_line, parse_rectangle, parse_text};
use crate::parser::pcb_schema::Graphic;
use crate::parser::registry::{ElementParser, ParsedElement};
use crate::parser::sexp::Value;

pub struct GraphicsLineParser;

impl ElementParser for GraphicsLineParser {
    fn element_type(&self) -> &'static str {
        "gr_line"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        parse_line(items).map(|line| ParsedElement::Graphic(Graphic::Line(line)))
    }
}

pub struct GraphicsArcParser;

impl ElementParser for GraphicsArcParser {
    fn element_type(&self) -> &'static str {
        "gr_arc"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        parse_arc(items).map(|arc| ParsedElement::Graphic(Graphic::Arc(arc)))
    }
}

pub struct GraphicsRectParser;

impl ElementParser for GraphicsRectParser {
    fn element_type(&self) -> &'static str {
        "gr_rect"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        parse_rectangle(items).map(|rect| ParsedElement::Graphic(Graphic::Rectangle(rect)))
    }
}

pub struct GraphicsTextParser;

impl ElementParser for GraphicsTextParser {
    fn element_type(&self) -> &'static str {
        "gr_text"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        parse_text(items).map(|text| ParsedElement::Graphic(Graphic::Text(text)))
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
    fn test_parse_edge_cuts_line() {
        let parsed = GraphicsLineParser.parse_element(&items(
            "(gr_line (start 0 0) (end 100 0) (stroke (width 0.15) (type solid)) \
             (layer \"Edge.Cuts\") (uuid \"line-uuid\"))",
        ));
        let Some(ParsedElement::Graphic(Graphic::Line(line))) = parsed else {
            panic!("expected line");
        };
        assert_eq!(line.start, Point::new(0.0, 0.0));
        assert_eq!(line.end, Point::new(100.0, 0.0));
        assert_eq!(line.stroke.as_ref().unwrap().width, 0.15);
        assert_eq!(line.layer, "Edge.Cuts");
    }

    #[test]
    fn test_parse_unfilled_rect() {
        let parsed = GraphicsRectParser.parse_element(&items(
            "(gr_rect (start 10 10) (end 90 50) (stroke (width 0.1) (type default)) \
             (fill no) (layer \"Dwgs.User\") (uuid \"rect-uuid\"))",
        ));
        let Some(ParsedElement::Graphic(Graphic::Rectangle(rect))) = parsed else {
            panic!("expected rectangle");
        };
        assert_eq!(rect.start, Point::new(10.0, 10.0));
        assert_eq!(rect.end, Point::new(90.0, 50.0));
        assert!(!rect.is_filled());
        assert_eq!(rect.fill.as_deref(), Some("no"));
    }

    #[test]
    fn test_parse_silkscreen_text() {
        let parsed = GraphicsTextParser.parse_element(&items(
            "(gr_text \"MARKING\" (at 100 100 0) (layer \"F.SilkS\") (uuid \"text-uuid\") \
             (effects (font (size 2 2) (thickness 0.3)) (justify left bottom)))",
        ));
        let Some(ParsedElement::Graphic(Graphic::Text(text))) = parsed else {
            panic!("expected text");
        };
        assert_eq!(text.text, "MARKING");
        assert_eq!(text.rotation, Some(0.0));
        assert_eq!(text.size, Some((2.0, 2.0)));
        assert_eq!(text.thickness, Some(0.3));
        assert_eq!(text.justify, vec!["left", "bottom"]);
    }

    #[test]
    fn test_parse_arc_needs_midpoint() {
        assert!(GraphicsArcParser
            .parse_element(&items("(gr_arc (start 0 0) (end 10 10))"))
            .is_none());
    }
}
