//! Element parser registry.
//!
//! Maps a list's leading symbol (`footprint`, `via`, …) to the parser that
//! turns it into a typed value. Dispatch is a plain string map resolved once
//! when the registry is built; there is no reflection. Unknown tags fall
//! through to the optional fallback parser, and past that the caller keeps
//! the raw value as an opaque, order-preserving placeholder.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::parser::pcb_schema::{Footprint, General, Graphic, Layer, Net, Track, Via, Zone};
use crate::parser::sexp::Value;

/// A typed value produced by one registered parser.
#[derive(Debug, Clone)]
pub enum ParsedElement {
    Version(i64),
    Generator {
        name: String,
        version: Option<String>,
    },
    GeneratorVersion(String),
    General(General),
    Paper(String),
    Layers(Vec<Layer>),
    /// Setup is preserved raw for exact output.
    Setup(Value),
    Net(Net),
    Footprint(Footprint),
    Track(Track),
    Via(Via),
    Zone(Zone),
    Graphic(Graphic),
    EmbeddedFonts(bool),
}

/// Parser for one element type.
///
/// `parse_element` receives the full list (tag included) and returns `None`
/// when the element is malformed; the registry logs and drops it.
pub trait ElementParser {
    fn element_type(&self) -> &'static str;

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement>;
}

/// How the registry handled one top-level element.
#[derive(Debug)]
pub enum ParseOutcome {
    /// A registered parser produced a typed value.
    Parsed(ParsedElement),
    /// A registered parser rejected the element; it is dropped from the
    /// typed collections. One corrupt element does not abort the document.
    Failed,
    /// No parser is registered for this tag; the caller preserves the raw
    /// value verbatim.
    Unrecognized,
}

/// Central registry for all element parsers.
pub struct ParserRegistry {
    parsers: HashMap<&'static str, Box<dyn ElementParser>>,
    fallback: Option<Box<dyn ElementParser>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
            fallback: None,
        }
    }

    /// Registry with every built-in element parser installed.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for parser in crate::parser::default_parsers() {
            registry.register(parser);
        }
        registry
    }

    pub fn register(&mut self, parser: Box<dyn ElementParser>) {
        let element_type = parser.element_type();
        if self.parsers.insert(element_type, parser).is_some() {
            warn!("overriding existing parser for element type: {element_type}");
        } else {
            debug!("registered parser for element type: {element_type}");
        }
    }

    pub fn unregister(&mut self, element_type: &str) -> bool {
        self.parsers.remove(element_type).is_some()
    }

    pub fn set_fallback(&mut self, parser: Box<dyn ElementParser>) {
        self.fallback = Some(parser);
    }

    pub fn has_parser(&self, element_type: &str) -> bool {
        self.parsers.contains_key(element_type)
    }

    pub fn registered_types(&self) -> Vec<&'static str> {
        self.parsers.keys().copied().collect()
    }

    /// Dispatch one element to its parser.
    pub fn parse_element(&self, element: &Value) -> ParseOutcome {
        let Some(items) = element.as_list() else {
            debug!("top-level element is not a list, preserving raw");
            return ParseOutcome::Unrecognized;
        };
        let Some(tag) = items.first().and_then(|v| v.as_text()) else {
            debug!("element has no leading tag, preserving raw");
            return ParseOutcome::Unrecognized;
        };

        if let Some(parser) = self.parsers.get(tag) {
            return match parser.parse_element(items) {
                Some(parsed) => ParseOutcome::Parsed(parsed),
                None => {
                    warn!("failed to parse {tag} element, dropping: {element}");
                    ParseOutcome::Failed
                }
            };
        }

        if let Some(fallback) = &self.fallback {
            debug!("using fallback parser for unknown element type: {tag}");
            if let Some(parsed) = fallback.parse_element(items) {
                return ParseOutcome::Parsed(parsed);
            }
        }

        debug!("no parser registered for element type: {tag}");
        ParseOutcome::Unrecognized
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
