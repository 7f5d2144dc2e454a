//! KiCad PCB codec surface.
//!
//! `PcbParser` drives the S-expression reader's output through the element
//! parser registry to assemble a [`PcbBoard`], and renders a board back to
//! text through the exact-format formatter. A malformed document aborts the
//! parse; a malformed *element* inside a well-formed document is dropped with
//! a warning so one corrupt element cannot take the whole board down.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::board::{BoardItem, PcbBoard};
use crate::formatter::{FormatError, PcbFormatter};
use crate::parser::registry::{ParseOutcome, ParsedElement, ParserRegistry};
use crate::parser::sexp::{ParseError, SExpParser};

#[derive(Debug, Error)]
pub enum PcbParseError {
    #[error("S-expression parse error: {0}")]
    SExp(#[from] ParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("Invalid PCB format: {0}")]
    InvalidFormat(String),
    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

/// Parser/serializer for `.kicad_pcb` documents.
///
/// The registry is resolved once at construction; `parse_string` and `dumps`
/// are pure functions over in-memory text. File access goes through
/// `parse_file`/`write_file`, which keep "file is missing" distinct from
/// "file is not a PCB document".
pub struct PcbParser {
    registry: ParserRegistry,
    formatter: PcbFormatter,
}

impl PcbParser {
    pub fn new() -> Self {
        Self {
            registry: ParserRegistry::with_defaults(),
            formatter: PcbFormatter::new(),
        }
    }

    /// A custom registry, e.g. with extra element parsers installed.
    pub fn with_registry(registry: ParserRegistry) -> Self {
        Self {
            registry,
            formatter: PcbFormatter::new(),
        }
    }

    pub fn parse_string(&self, content: &str) -> Result<PcbBoard, PcbParseError> {
        let root = SExpParser::new(content).parse()?;

        let items = root
            .as_list()
            .filter(|items| !items.is_empty())
            .ok_or_else(|| PcbParseError::InvalidFormat("empty document".to_string()))?;

        let root_tag = items[0].as_sym().ok_or_else(|| {
            PcbParseError::InvalidFormat("Expected kicad_pcb root".to_string())
        })?;
        if root_tag != "kicad_pcb" {
            return Err(PcbParseError::InvalidFormat(format!(
                "Expected kicad_pcb, found {}",
                root_tag
            )));
        }

        let mut board = PcbBoard {
            version: 20241229,
            generator: "pcbnew".to_string(),
            generator_version: None,
            general: Default::default(),
            paper: "A4".to_string(),
            layers: Vec::new(),
            setup: None,
            nets: Vec::new(),
            body: Vec::new(),
            embedded_fonts: None,
        };

        for item in &items[1..] {
            match self.registry.parse_element(item) {
                ParseOutcome::Parsed(element) => Self::install(&mut board, element),
                // logged by the registry; fault isolation per element
                ParseOutcome::Failed => {}
                ParseOutcome::Unrecognized => {
                    board.body.push(BoardItem::Opaque(item.clone()));
                }
            }
        }

        board.ensure_unconnected_net();
        board.resolve_net_names();
        Ok(board)
    }

    fn install(board: &mut PcbBoard, element: ParsedElement) {
        match element {
            ParsedElement::Version(version) => board.version = version,
            ParsedElement::Generator { name, version } => {
                board.generator = name;
                if board.generator_version.is_none() {
                    board.generator_version = version;
                }
            }
            ParsedElement::GeneratorVersion(version) => {
                board.generator_version = Some(version);
            }
            ParsedElement::General(general) => board.general = general,
            ParsedElement::Paper(size) => board.paper = size,
            ParsedElement::Layers(layers) => board.layers = layers,
            ParsedElement::Setup(setup) => board.setup = Some(setup),
            ParsedElement::Net(net) => board.nets.push(net),
            ParsedElement::Footprint(fp) => board.body.push(BoardItem::Footprint(fp)),
            ParsedElement::Track(track) => board.body.push(BoardItem::Track(track)),
            ParsedElement::Via(via) => board.body.push(BoardItem::Via(via)),
            ParsedElement::Zone(zone) => board.body.push(BoardItem::Zone(zone)),
            ParsedElement::Graphic(graphic) => board.body.push(BoardItem::Graphic(graphic)),
            ParsedElement::EmbeddedFonts(enabled) => {
                board.embedded_fonts = Some(enabled);
            }
        }
    }

    /// Parse from a caller-supplied byte buffer. The format is UTF-8 text.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<PcbBoard, PcbParseError> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| PcbParseError::InvalidFormat(format!("invalid UTF-8: {e}")))?;
        self.parse_string(content)
    }

    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<PcbBoard, PcbParseError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PcbParseError::NotFound(path.to_path_buf())
            } else {
                PcbParseError::Io(e)
            }
        })?;
        self.parse_string(&content)
    }

    /// Render a board to its canonical text, trailing newline included.
    pub fn dumps(&self, board: &PcbBoard) -> Result<String, FormatError> {
        let mut out = self.formatter.format_pcb(&board.to_sexp())?;
        out.push('\n');
        Ok(out)
    }

    pub fn write_file(
        &self,
        board: &PcbBoard,
        path: impl AsRef<Path>,
    ) -> Result<(), PcbParseError> {
        let content = self.dumps(board)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for PcbParser {
    fn default() -> Self {
        Self::new()
    }
}
