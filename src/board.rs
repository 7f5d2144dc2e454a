//! The in-memory PCB document.
//!
//! A [`PcbBoard`] is built once by loading a file (or fresh via [`PcbBoard::new`]),
//! mutated in place through its accessors, and re-rendered in full on save.
//! Top-level sections the parser does not understand ride along as
//! [`BoardItem::Opaque`] values, interleaved with the typed elements in
//! original document order so nothing is lost or reordered.

use serde::{Deserialize, Serialize};

use crate::parser::pcb_schema::{
    Footprint, General, Graphic, Layer, Net, Track, Via, Zone,
};
use crate::parser::sexp::Value;

/// One top-level board element. Typed where a parser exists, raw otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoardItem {
    Footprint(Footprint),
    Track(Track),
    Via(Via),
    Zone(Zone),
    Graphic(Graphic),
    /// An element with no registered parser, preserved verbatim.
    Opaque(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcbBoard {
    pub version: i64,
    pub generator: String,
    pub generator_version: Option<String>,
    pub general: General,
    pub paper: String,
    pub layers: Vec<Layer>,
    /// The `(setup …)` section, kept raw for exact output.
    pub setup: Option<Value>,
    pub nets: Vec<Net>,
    /// Footprints, tracks, vias, zones, graphics, and opaque sections in
    /// original document order.
    pub body: Vec<BoardItem>,
    pub embedded_fonts: Option<bool>,
}

impl PcbBoard {
    /// Fresh, empty two-layer board with KiCad 9 header defaults.
    pub fn new() -> Self {
        Self {
            version: 20241229,
            generator: "pcbnew".to_string(),
            generator_version: Some("9.0".to_string()),
            general: General::default(),
            paper: "A4".to_string(),
            layers: vec![
                Layer {
                    number: 0,
                    canonical_name: "F.Cu".to_string(),
                    kind: "signal".to_string(),
                    user_name: None,
                },
                Layer {
                    number: 31,
                    canonical_name: "B.Cu".to_string(),
                    kind: "signal".to_string(),
                    user_name: None,
                },
            ],
            setup: None,
            nets: vec![Net::unconnected()],
            body: Vec::new(),
            embedded_fonts: Some(false),
        }
    }

    pub fn footprints(&self) -> impl Iterator<Item = &Footprint> {
        self.body.iter().filter_map(|item| match item {
            BoardItem::Footprint(fp) => Some(fp),
            _ => None,
        })
    }

    pub fn footprints_mut(&mut self) -> impl Iterator<Item = &mut Footprint> {
        self.body.iter_mut().filter_map(|item| match item {
            BoardItem::Footprint(fp) => Some(fp),
            _ => None,
        })
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.body.iter().filter_map(|item| match item {
            BoardItem::Track(track) => Some(track),
            _ => None,
        })
    }

    pub fn tracks_mut(&mut self) -> impl Iterator<Item = &mut Track> {
        self.body.iter_mut().filter_map(|item| match item {
            BoardItem::Track(track) => Some(track),
            _ => None,
        })
    }

    pub fn vias(&self) -> impl Iterator<Item = &Via> {
        self.body.iter().filter_map(|item| match item {
            BoardItem::Via(via) => Some(via),
            _ => None,
        })
    }

    pub fn vias_mut(&mut self) -> impl Iterator<Item = &mut Via> {
        self.body.iter_mut().filter_map(|item| match item {
            BoardItem::Via(via) => Some(via),
            _ => None,
        })
    }

    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.body.iter().filter_map(|item| match item {
            BoardItem::Zone(zone) => Some(zone),
            _ => None,
        })
    }

    pub fn zones_mut(&mut self) -> impl Iterator<Item = &mut Zone> {
        self.body.iter_mut().filter_map(|item| match item {
            BoardItem::Zone(zone) => Some(zone),
            _ => None,
        })
    }

    pub fn graphics(&self) -> impl Iterator<Item = &Graphic> {
        self.body.iter().filter_map(|item| match item {
            BoardItem::Graphic(graphic) => Some(graphic),
            _ => None,
        })
    }

    /// Top-level sections that were preserved opaquely. A non-empty result is
    /// a normal state, not an error: it means the file came from a newer tool
    /// than this crate knows about.
    pub fn raw_sections(&self) -> impl Iterator<Item = &Value> {
        self.body.iter().filter_map(|item| match item {
            BoardItem::Opaque(value) => Some(value),
            _ => None,
        })
    }

    pub fn find_footprint(&self, reference: &str) -> Option<&Footprint> {
        self.footprints().find(|fp| fp.reference == reference)
    }

    pub fn net_name(&self, number: i32) -> Option<&str> {
        self.nets
            .iter()
            .find(|n| n.number == number)
            .map(|n| n.name.as_str())
    }

    pub fn add_net(&mut self, net: Net) {
        self.nets.push(net);
    }

    pub fn add_footprint(&mut self, footprint: Footprint) {
        self.body.push(BoardItem::Footprint(footprint));
    }

    pub fn add_track(&mut self, mut track: Track) {
        track.net_name = self.net_name(track.net).map(str::to_string);
        self.body.push(BoardItem::Track(track));
    }

    pub fn add_via(&mut self, mut via: Via) {
        via.net_name = self.net_name(via.net).map(str::to_string);
        self.body.push(BoardItem::Via(via));
    }

    pub fn add_zone(&mut self, zone: Zone) {
        self.body.push(BoardItem::Zone(zone));
    }

    pub fn add_graphic(&mut self, graphic: Graphic) {
        self.body.push(BoardItem::Graphic(graphic));
    }

    /// The reserved unconnected net always exists.
    pub(crate) fn ensure_unconnected_net(&mut self) {
        if !self.nets.iter().any(|n| n.number == 0) {
            self.nets.insert(0, Net::unconnected());
        }
    }

    /// Tracks and vias carry only a net number in the grammar; their
    /// `net_name` is resolved from the net table.
    pub(crate) fn resolve_net_names(&mut self) {
        let names: Vec<(i32, String)> = self
            .nets
            .iter()
            .map(|n| (n.number, n.name.clone()))
            .collect();
        let lookup = |net: i32| {
            names
                .iter()
                .find(|(number, _)| *number == net)
                .map(|(_, name)| name.clone())
        };
        for item in &mut self.body {
            match item {
                BoardItem::Track(track) => track.net_name = lookup(track.net),
                BoardItem::Via(via) => via.net_name = lookup(via.net),
                _ => {}
            }
        }
    }

    /// Lower the whole document to a generic value tree in the canonical
    /// section order: version, generator, generator_version, general, paper,
    /// layers, setup, nets, body, embedded_fonts. Reordering sections breaks
    /// byte-exact round-trips even when semantically harmless.
    pub fn to_sexp(&self) -> Value {
        let mut items = vec![
            Value::sym("kicad_pcb"),
            Value::list(vec![Value::sym("version"), Value::int(self.version)]),
            Value::list(vec![
                Value::sym("generator"),
                Value::string(self.generator.clone()),
            ]),
        ];
        if let Some(version) = &self.generator_version {
            items.push(Value::list(vec![
                Value::sym("generator_version"),
                Value::string(version.clone()),
            ]));
        }
        items.push(self.general.to_sexp());
        items.push(Value::list(vec![
            Value::sym("paper"),
            Value::string(self.paper.clone()),
        ]));
        if !self.layers.is_empty() {
            let mut layers = vec![Value::sym("layers")];
            layers.extend(self.layers.iter().map(Layer::to_sexp));
            items.push(Value::list(layers));
        }
        if let Some(setup) = &self.setup {
            items.push(setup.clone());
        }
        items.extend(self.nets.iter().map(Net::to_sexp));
        for item in &self.body {
            items.push(match item {
                BoardItem::Footprint(fp) => fp.to_sexp(),
                BoardItem::Track(track) => track.to_sexp(),
                BoardItem::Via(via) => via.to_sexp(),
                BoardItem::Zone(zone) => zone.to_sexp(),
                BoardItem::Graphic(graphic) => graphic.to_sexp(),
                BoardItem::Opaque(value) => value.clone(),
            });
        }
        if let Some(fonts) = self.embedded_fonts {
            items.push(Value::list(vec![
                Value::sym("embedded_fonts"),
                Value::Bool(fonts),
            ]));
        }
        Value::List(items)
    }
}

impl Default for PcbBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::pcb_schema::Point;

    #[test]
    fn test_new_board_has_unconnected_net() {
        let board = PcbBoard::new();
        assert_eq!(board.nets.len(), 1);
        assert_eq!(board.nets[0].number, 0);
        assert_eq!(board.nets[0].name, "");
        assert_eq!(board.layers.len(), 2);
    }

    #[test]
    fn test_added_track_resolves_net_name() {
        let mut board = PcbBoard::new();
        board.add_net(Net::new(1, "GND").unwrap());
        board.add_track(Track::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            0.25,
            "F.Cu",
            1,
        ));
        let track = board.tracks().next().unwrap();
        assert_eq!(track.net_name.as_deref(), Some("GND"));
    }

    #[test]
    fn test_body_preserves_interleaved_order() {
        let mut board = PcbBoard::new();
        board.add_net(Net::new(1, "SIG").unwrap());
        board.add_track(Track::new(
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            0.25,
            "F.Cu",
            1,
        ));
        board.add_via(Via::new(Point::new(5.0, 0.0), 0.8, 0.4, 1));
        board.add_track(Track::new(
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
            0.25,
            "B.Cu",
            1,
        ));
        let kinds: Vec<&str> = board
            .body
            .iter()
            .map(|item| match item {
                BoardItem::Track(_) => "track",
                BoardItem::Via(_) => "via",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["track", "via", "track"]);
        assert_eq!(board.tracks().count(), 2);
        assert_eq!(board.vias().count(), 1);
    }

    #[test]
    fn test_to_sexp_section_order() {
        let board = PcbBoard::new();
        let root = board.to_sexp();
        let tags: Vec<String> = root.as_list().unwrap()[1..]
            .iter()
            .map(|item| item.tag().unwrap_or("?").to_string())
            .collect();
        assert_eq!(
            tags,
            vec![
                "version",
                "generator",
                "generator_version",
                "general",
                "paper",
                "layers",
                "net",
                "embedded_fonts"
            ]
        );
    }
}
