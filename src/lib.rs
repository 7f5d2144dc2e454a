//! kicad-pcb - KiCad PCB file manipulation with exact format preservation
//!
//! This library reads `.kicad_pcb` files into a typed in-memory model, lets
//! tooling mutate that model, and writes it back out so untouched parts stay
//! byte-for-byte identical and touched parts follow the native editor's
//! formatting conventions.
//!
//! # Quick Start
//!
//! ```no_run
//! use kicad_pcb::{load_pcb, PcbParser};
//!
//! let mut board = load_pcb("board.kicad_pcb").unwrap();
//!
//! for footprint in board.footprints() {
//!     println!("{} = {}", footprint.reference, footprint.value);
//! }
//!
//! for track in board.tracks_mut() {
//!     track.width = 0.3;
//! }
//!
//! PcbParser::new().write_file(&board, "board.kicad_pcb").unwrap();
//! ```
//!
//! # Design
//!
//! - **Generic value layer**: bare symbols, quoted strings, and numbers are
//!   distinct atom kinds, and numbers keep their source lexeme, because both
//!   distinctions decide how a token renders on output.
//! - **Typed layer**: footprints, pads, tracks, vias, zones, nets, layers and
//!   graphics, assembled through a per-tag parser registry. Elements with no
//!   registered parser are preserved opaquely in document order, which keeps
//!   files from newer KiCad versions loadable and re-savable.
//! - **Fault isolation**: a malformed element is dropped with a warning; only
//!   a malformed *document* fails the parse.

pub mod board;
pub mod formatter;
pub mod parser;

// Re-export main types
pub use board::{BoardItem, PcbBoard};
pub use formatter::{is_bare_keyword, is_inline_tag, FormatError, PcbFormatter};
pub use parser::pcb::{PcbParseError, PcbParser};
pub use parser::pcb_schema::{
    Arc, ConnectPads, Footprint, General, Graphic, Hatch, Keepout, Layer, Line, Net, Pad,
    PadDrill, Point, Property, Rectangle, ReservedNetError, Stroke, Text, Track, Via, Zone,
    ZoneFill,
};
pub use parser::registry::{ElementParser, ParseOutcome, ParsedElement, ParserRegistry};
pub use parser::sexp::{Number, ParseError, SExpParser, Value};

/// Load a PCB from a file (convenience wrapper).
pub fn load_pcb(path: impl AsRef<std::path::Path>) -> Result<PcbBoard, PcbParseError> {
    PcbParser::new().parse_file(path)
}

/// Create a new empty PCB document.
pub fn create_pcb() -> PcbBoard {
    PcbBoard::new()
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        create_pcb, load_pcb, BoardItem, Footprint, Net, Pad, PcbBoard, PcbParseError, PcbParser,
        Point, Track, Via, Zone,
    };
}
