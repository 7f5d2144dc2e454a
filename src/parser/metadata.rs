//! Parsers for header and metadata elements: version, generator, paper,
//! general, layers, setup, nets, and embedded fonts.

use crate::parser::pcb_schema::{General, Layer, Net};
use crate::parser::registry::{ElementParser, ParsedElement};
use crate::parser::sexp::{child_f64, child_text, Value};

/// `(version 20241229)`
pub struct VersionParser;

impl ElementParser for VersionParser {
    fn element_type(&self) -> &'static str {
        "version"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        let version = items.get(1)?.as_i64()?;
        Some(ParsedElement::Version(version))
    }
}

/// `(generator "pcbnew")`, with an optional trailing version in older files.
pub struct GeneratorParser;

impl ElementParser for GeneratorParser {
    fn element_type(&self) -> &'static str {
        "generator"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        let name = items.get(1)?.as_text()?.to_string();
        let version = items.get(2).and_then(|v| v.as_text()).map(str::to_string);
        Some(ParsedElement::Generator { name, version })
    }
}

/// `(generator_version "9.0")`
pub struct GeneratorVersionParser;

impl ElementParser for GeneratorVersionParser {
    fn element_type(&self) -> &'static str {
        "generator_version"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        let version = items.get(1)?.as_text()?.to_string();
        Some(ParsedElement::GeneratorVersion(version))
    }
}

/// `(paper "A4")`
pub struct PaperParser;

impl ElementParser for PaperParser {
    fn element_type(&self) -> &'static str {
        "paper"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        let size = items.get(1)?.as_text()?.to_string();
        Some(ParsedElement::Paper(size))
    }
}

/// `(general (thickness 1.6) (legacy_teardrops no))`
pub struct GeneralParser;

impl ElementParser for GeneralParser {
    fn element_type(&self) -> &'static str {
        "general"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        let thickness = child_f64(items, "thickness").unwrap_or(1.6);
        let legacy_teardrops =
            child_text(items, "legacy_teardrops").map(|v| v == "yes");
        Some(ParsedElement::General(General {
            thickness,
            legacy_teardrops,
        }))
    }
}

/// The `(layers …)` section: one `(ordinal "Name" type ["Alias"])` per layer.
pub struct LayersParser;

impl ElementParser for LayersParser {
    fn element_type(&self) -> &'static str {
        "layers"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        let mut layers = Vec::new();
        for item in &items[1..] {
            let Some(def) = item.as_list() else { continue };
            if def.len() < 3 {
                continue;
            }
            let Some(number) = def[0].as_i64() else { continue };
            let Some(canonical_name) = def[1].as_text() else { continue };
            let Some(kind) = def[2].as_text() else { continue };
            let (number, canonical_name, kind) =
                (number as i32, canonical_name.to_string(), kind.to_string());
            let user_name = def.get(3).and_then(|v| v.as_text()).map(str::to_string);
            layers.push(Layer {
                number,
                canonical_name,
                kind,
                user_name,
            });
        }
        Some(ParsedElement::Layers(layers))
    }
}

/// `(setup …)` carries tool configuration this crate does not interpret; the
/// whole subtree is kept raw so output is exact.
pub struct SetupParser;

impl ElementParser for SetupParser {
    fn element_type(&self) -> &'static str {
        "setup"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        Some(ParsedElement::Setup(Value::List(items.to_vec())))
    }
}

/// `(net 0 "")`
pub struct NetParser;

impl ElementParser for NetParser {
    fn element_type(&self) -> &'static str {
        "net"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        if items.len() < 3 {
            return None;
        }
        let number = items[1].as_i64()? as i32;
        let name = items[2].as_text()?.to_string();
        let net = Net::new(number, name).ok()?;
        Some(ParsedElement::Net(net))
    }
}

/// `(embedded_fonts no)`
pub struct EmbeddedFontsParser;

impl ElementParser for EmbeddedFontsParser {
    fn element_type(&self) -> &'static str {
        "embedded_fonts"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        let token = items.get(1)?.as_text()?.to_ascii_lowercase();
        let enabled = matches!(token.as_str(), "yes" | "true" | "1");
        Some(ParsedElement::EmbeddedFonts(enabled))
    }
}
