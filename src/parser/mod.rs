pub mod common;
pub mod footprint;
pub mod graphics;
pub mod metadata;
pub mod pcb;
pub mod pcb_schema;
pub mod registry;
pub mod sexp;
pub mod track;
pub mod via;
pub mod zone;

// Re-export for convenience
pub use pcb::{PcbParser, PcbParseError};
pub use pcb_schema::*;
pub use registry::{ElementParser, ParsedElement, ParseOutcome, ParserRegistry};
pub use sexp::{find_child, find_children, Number, ParseError, SExpParser, Value};

/// Every built-in element parser, in registration order.
pub(crate) fn default_parsers() -> Vec<Box<dyn ElementParser>> {
    vec![
        Box::new(metadata::VersionParser),
        Box::new(metadata::GeneratorParser),
        Box::new(metadata::GeneratorVersionParser),
        Box::new(metadata::GeneralParser),
        Box::new(metadata::PaperParser),
        Box::new(metadata::LayersParser),
        Box::new(metadata::SetupParser),
        Box::new(metadata::NetParser),
        Box::new(metadata::EmbeddedFontsParser),
        Box::new(footprint::FootprintParser),
        Box::new(track::TrackParser),
        Box::new(via::ViaParser),
        Box::new(zone::ZoneParser),
        Box::new(graphics::GraphicsLineParser),
        Box::new(graphics::GraphicsArcParser),
        Box::new(graphics::GraphicsRectParser),
        Box::new(graphics::GraphicsTextParser),
    ]
}
