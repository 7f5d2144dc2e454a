//! PCB domain model.
//!
//! Typed records for every board concept in a `.kicad_pcb` file, based on the
//! KiCad 9 S-expression format. All coordinates are millimeters. Each type
//! lowers back to a generic [`Value`] tree (`to_sexp`) in the child order the
//! native editor writes, so a parsed and unmodified element reproduces its
//! source text when rendered.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parser::sexp::Value;

/// Net 0 is the reserved "unconnected" net and always carries an empty name.
#[derive(Debug, Error)]
#[error("net 0 is the reserved unconnected net and must have an empty name")]
pub struct ReservedNetError;

/// 2D coordinate in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `(tag x y)` — used for `at`, `start`, `end`, `mid`, `xy`.
    pub(crate) fn to_sexp(self, tag: &str) -> Value {
        Value::list(vec![Value::sym(tag), Value::num(self.x), Value::num(self.y)])
    }

    fn to_sexp_rotated(self, tag: &str, rotation: Option<f64>) -> Value {
        let mut items = vec![Value::sym(tag), Value::num(self.x), Value::num(self.y)];
        if let Some(r) = rotation {
            items.push(Value::num(r));
        }
        Value::list(items)
    }
}

/// Named electrical connection group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Net {
    pub number: i32,
    pub name: String,
}

impl Net {
    pub fn new(number: i32, name: impl Into<String>) -> Result<Self, ReservedNetError> {
        let name = name.into();
        if number == 0 && !name.is_empty() {
            return Err(ReservedNetError);
        }
        Ok(Self { number, name })
    }

    /// The reserved unconnected net.
    pub fn unconnected() -> Self {
        Self {
            number: 0,
            name: String::new(),
        }
    }

    pub(crate) fn to_sexp(&self) -> Value {
        Value::list(vec![
            Value::sym("net"),
            Value::int(self.number as i64),
            Value::string(self.name.clone()),
        ])
    }
}

/// Board layer: ordinal, canonical name, type token, optional user alias.
///
/// The type is kept as the source token (`signal`, `user`, `power`, …) so
/// tokens this crate does not know about survive a round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub number: i32,
    pub canonical_name: String,
    pub kind: String,
    pub user_name: Option<String>,
}

impl Layer {
    pub(crate) fn to_sexp(&self) -> Value {
        let mut items = vec![
            Value::int(self.number as i64),
            Value::string(self.canonical_name.clone()),
            Value::sym(self.kind.clone()),
        ];
        if let Some(user) = &self.user_name {
            items.push(Value::string(user.clone()));
        }
        Value::list(items)
    }
}

/// The `(general …)` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct General {
    pub thickness: f64,
    pub legacy_teardrops: Option<bool>,
}

impl Default for General {
    fn default() -> Self {
        Self {
            thickness: 1.6,
            legacy_teardrops: None,
        }
    }
}

impl General {
    pub(crate) fn to_sexp(&self) -> Value {
        let mut items = vec![
            Value::sym("general"),
            Value::list(vec![Value::sym("thickness"), Value::num(self.thickness)]),
        ];
        if let Some(legacy) = self.legacy_teardrops {
            items.push(Value::list(vec![
                Value::sym("legacy_teardrops"),
                Value::Bool(legacy),
            ]));
        }
        Value::list(items)
    }
}

/// A footprint `property` sub-element. Reference and Value live here in the
/// raw grammar; the footprint mirrors them into dedicated fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
    pub position: Point,
    pub rotation: f64,
    pub layer: String,
    pub uuid: Option<String>,
    pub size: Option<(f64, f64)>,
    pub thickness: Option<f64>,
}

impl Property {
    pub(crate) fn to_sexp(&self) -> Value {
        let mut items = vec![
            Value::sym("property"),
            Value::string(self.name.clone()),
            Value::string(self.value.clone()),
            // property positions always carry the rotation argument
            self.position.to_sexp_rotated("at", Some(self.rotation)),
            Value::list(vec![Value::sym("layer"), Value::string(self.layer.clone())]),
        ];
        if let Some(uuid) = &self.uuid {
            items.push(Value::list(vec![
                Value::sym("uuid"),
                Value::string(uuid.clone()),
            ]));
        }
        if let Some(effects) = font_effects(self.size, self.thickness, &[]) {
            items.push(effects);
        }
        Value::list(items)
    }
}

/// `(effects (font (size w h) (thickness t)) (justify …))`, omitted entirely
/// when no font metadata is present.
fn font_effects(size: Option<(f64, f64)>, thickness: Option<f64>, justify: &[String]) -> Option<Value> {
    if size.is_none() && thickness.is_none() && justify.is_empty() {
        return None;
    }
    let mut font = vec![Value::sym("font")];
    if let Some((w, h)) = size {
        font.push(Value::list(vec![
            Value::sym("size"),
            Value::num(w),
            Value::num(h),
        ]));
    }
    if let Some(t) = thickness {
        font.push(Value::list(vec![Value::sym("thickness"), Value::num(t)]));
    }
    let mut effects = vec![Value::sym("effects"), Value::list(font)];
    if !justify.is_empty() {
        let mut j = vec![Value::sym("justify")];
        j.extend(justify.iter().map(|t| Value::sym(t.clone())));
        effects.push(Value::list(j));
    }
    Some(Value::list(effects))
}

fn uuid_child(uuid: &Option<String>) -> Option<Value> {
    uuid.as_ref()
        .map(|u| Value::list(vec![Value::sym("uuid"), Value::string(u.clone())]))
}

fn new_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Pad drill: `(drill 1.0)` or `(drill oval W H)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PadDrill {
    Circular(f64),
    Oval { width: f64, height: f64 },
}

impl PadDrill {
    pub(crate) fn to_sexp(&self) -> Value {
        match self {
            PadDrill::Circular(d) => Value::list(vec![Value::sym("drill"), Value::num(*d)]),
            PadDrill::Oval { width, height } => Value::list(vec![
                Value::sym("drill"),
                Value::sym("oval"),
                Value::num(*width),
                Value::num(*height),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub number: String,
    /// `smd`, `thru_hole`, `np_thru_hole`, `connect`.
    pub pad_type: String,
    /// `rect`, `circle`, `oval`, `roundrect`, `trapezoid`, `custom`.
    pub shape: String,
    pub position: Point,
    pub rotation: Option<f64>,
    pub size: (f64, f64),
    /// Absent for SMD pads.
    pub drill: Option<PadDrill>,
    pub layers: Vec<String>,
    pub roundrect_rratio: Option<f64>,
    pub net: Option<i32>,
    pub net_name: Option<String>,
    pub uuid: Option<String>,
}

impl Pad {
    pub fn new(
        number: impl Into<String>,
        pad_type: impl Into<String>,
        shape: impl Into<String>,
        position: Point,
        size: (f64, f64),
    ) -> Self {
        Self {
            number: number.into(),
            pad_type: pad_type.into(),
            shape: shape.into(),
            position,
            rotation: None,
            size,
            drill: None,
            layers: Vec::new(),
            roundrect_rratio: None,
            net: None,
            net_name: None,
            uuid: Some(new_uuid()),
        }
    }

    pub(crate) fn to_sexp(&self) -> Value {
        let mut items = vec![
            Value::sym("pad"),
            Value::string(self.number.clone()),
            Value::sym(self.pad_type.clone()),
            Value::sym(self.shape.clone()),
            self.position.to_sexp_rotated("at", self.rotation),
            Value::list(vec![
                Value::sym("size"),
                Value::num(self.size.0),
                Value::num(self.size.1),
            ]),
        ];
        if let Some(drill) = &self.drill {
            items.push(drill.to_sexp());
        }
        if !self.layers.is_empty() {
            let mut layers = vec![Value::sym("layers")];
            layers.extend(self.layers.iter().map(|l| Value::string(l.clone())));
            items.push(Value::list(layers));
        }
        if let Some(ratio) = self.roundrect_rratio {
            items.push(Value::list(vec![
                Value::sym("roundrect_rratio"),
                Value::num(ratio),
            ]));
        }
        if let Some(net) = self.net {
            let mut n = vec![Value::sym("net"), Value::int(net as i64)];
            if let Some(name) = &self.net_name {
                n.push(Value::string(name.clone()));
            }
            items.push(Value::list(n));
        }
        items.extend(uuid_child(&self.uuid));
        Value::list(items)
    }
}

/// Stroke metadata shared by the graphic primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f64,
    /// `solid`, `dashed`, `dotted`, `default`, …
    pub kind: String,
}

impl Stroke {
    pub fn solid(width: f64) -> Self {
        Self {
            width,
            kind: "solid".to_string(),
        }
    }

    pub(crate) fn to_sexp(&self) -> Value {
        Value::list(vec![
            Value::sym("stroke"),
            Value::list(vec![Value::sym("width"), Value::num(self.width)]),
            Value::list(vec![Value::sym("type"), Value::sym(self.kind.clone())]),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub stroke: Option<Stroke>,
    pub layer: String,
    pub uuid: Option<String>,
}

impl Line {
    pub(crate) fn to_sexp(&self, tag: &str) -> Value {
        let mut items = vec![
            Value::sym(tag),
            self.start.to_sexp("start"),
            self.end.to_sexp("end"),
        ];
        if let Some(stroke) = &self.stroke {
            items.push(stroke.to_sexp());
        }
        items.push(Value::list(vec![
            Value::sym("layer"),
            Value::string(self.layer.clone()),
        ]));
        items.extend(uuid_child(&self.uuid));
        Value::list(items)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub start: Point,
    pub mid: Point,
    pub end: Point,
    pub stroke: Option<Stroke>,
    pub layer: String,
    pub uuid: Option<String>,
}

impl Arc {
    pub(crate) fn to_sexp(&self, tag: &str) -> Value {
        let mut items = vec![
            Value::sym(tag),
            self.start.to_sexp("start"),
            self.mid.to_sexp("mid"),
            self.end.to_sexp("end"),
        ];
        if let Some(stroke) = &self.stroke {
            items.push(stroke.to_sexp());
        }
        items.push(Value::list(vec![
            Value::sym("layer"),
            Value::string(self.layer.clone()),
        ]));
        items.extend(uuid_child(&self.uuid));
        Value::list(items)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub start: Point,
    pub end: Point,
    pub stroke: Option<Stroke>,
    /// Fill token as written in the source: `none`, `no`, `yes`, `solid`.
    /// Both `no` and `none` occur in native output, so the token is kept
    /// rather than collapsed to a bool.
    pub fill: Option<String>,
    pub layer: String,
    pub uuid: Option<String>,
}

impl Rectangle {
    pub fn is_filled(&self) -> bool {
        match self.fill.as_deref() {
            Some("no") | Some("none") | None => false,
            Some(_) => true,
        }
    }

    pub(crate) fn to_sexp(&self, tag: &str) -> Value {
        let mut items = vec![
            Value::sym(tag),
            self.start.to_sexp("start"),
            self.end.to_sexp("end"),
        ];
        if let Some(stroke) = &self.stroke {
            items.push(stroke.to_sexp());
        }
        if let Some(fill) = &self.fill {
            items.push(Value::list(vec![
                Value::sym("fill"),
                Value::sym(fill.clone()),
            ]));
        }
        items.push(Value::list(vec![
            Value::sym("layer"),
            Value::string(self.layer.clone()),
        ]));
        items.extend(uuid_child(&self.uuid));
        Value::list(items)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    /// `reference`, `value`, or `user` — only meaningful inside a footprint.
    pub kind: String,
    pub position: Point,
    pub rotation: Option<f64>,
    pub layer: String,
    pub size: Option<(f64, f64)>,
    pub thickness: Option<f64>,
    pub justify: Vec<String>,
    pub uuid: Option<String>,
}

impl Text {
    /// `gr_text` lowering: the kind argument is a footprint-only concept.
    pub(crate) fn to_sexp_board(&self) -> Value {
        let mut items = vec![Value::sym("gr_text"), Value::string(self.text.clone())];
        self.push_common(&mut items);
        Value::list(items)
    }

    pub(crate) fn to_sexp_footprint(&self) -> Value {
        let mut items = vec![
            Value::sym("fp_text"),
            Value::sym(self.kind.clone()),
            Value::string(self.text.clone()),
        ];
        self.push_common(&mut items);
        Value::list(items)
    }

    fn push_common(&self, items: &mut Vec<Value>) {
        items.push(self.position.to_sexp_rotated("at", self.rotation));
        items.push(Value::list(vec![
            Value::sym("layer"),
            Value::string(self.layer.clone()),
        ]));
        items.extend(uuid_child(&self.uuid));
        if let Some(effects) = font_effects(self.size, self.thickness, &self.justify) {
            items.push(effects);
        }
    }
}

/// A placed component with pads, reference, value, and graphics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub library: String,
    pub name: String,
    pub reference: String,
    pub value: String,
    pub position: Point,
    pub rotation: f64,
    pub layer: String,
    pub uuid: Option<String>,
    pub descr: Option<String>,
    pub tags: Option<String>,
    pub path: Option<String>,
    pub sheetname: Option<String>,
    pub sheetfile: Option<String>,
    pub attr: Option<String>,
    pub properties: Vec<Property>,
    pub lines: Vec<Line>,
    pub arcs: Vec<Arc>,
    pub rectangles: Vec<Rectangle>,
    pub texts: Vec<Text>,
    pub pads: Vec<Pad>,
    pub model: Option<String>,
    pub embedded_fonts: Option<bool>,
    /// Sub-elements with no typed representation, preserved for round-trip.
    pub extras: Vec<Value>,
}

impl Footprint {
    pub fn new(lib_id: &str, position: Point) -> Self {
        let (library, name) = match lib_id.split_once(':') {
            Some((lib, name)) => (lib.to_string(), name.to_string()),
            None => (String::new(), lib_id.to_string()),
        };
        Self {
            library,
            name,
            reference: String::new(),
            value: String::new(),
            position,
            rotation: 0.0,
            layer: "F.Cu".to_string(),
            uuid: Some(new_uuid()),
            descr: None,
            tags: None,
            path: None,
            sheetname: None,
            sheetfile: None,
            attr: None,
            properties: Vec::new(),
            lines: Vec::new(),
            arcs: Vec::new(),
            rectangles: Vec::new(),
            texts: Vec::new(),
            pads: Vec::new(),
            model: None,
            embedded_fonts: None,
            extras: Vec::new(),
        }
    }

    /// `"Library:Name"`, or just the name for footprints without a library.
    pub fn lib_id(&self) -> String {
        if self.library.is_empty() {
            self.name.clone()
        } else {
            format!("{}:{}", self.library, self.name)
        }
    }

    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub(crate) fn to_sexp(&self) -> Value {
        let mut items = vec![
            Value::sym("footprint"),
            Value::string(self.lib_id()),
            Value::list(vec![Value::sym("layer"), Value::string(self.layer.clone())]),
        ];
        items.extend(uuid_child(&self.uuid));
        let rotation = (self.rotation != 0.0).then_some(self.rotation);
        items.push(self.position.to_sexp_rotated("at", rotation));
        for (tag, value) in [("descr", &self.descr), ("tags", &self.tags)] {
            if let Some(v) = value {
                items.push(Value::list(vec![Value::sym(tag), Value::string(v.clone())]));
            }
        }
        items.extend(self.properties.iter().map(Property::to_sexp));
        for (tag, value) in [
            ("path", &self.path),
            ("sheetname", &self.sheetname),
            ("sheetfile", &self.sheetfile),
        ] {
            if let Some(v) = value {
                items.push(Value::list(vec![Value::sym(tag), Value::string(v.clone())]));
            }
        }
        if let Some(attr) = &self.attr {
            let mut a = vec![Value::sym("attr")];
            a.extend(attr.split_whitespace().map(Value::sym));
            items.push(Value::list(a));
        }
        items.extend(self.lines.iter().map(|l| l.to_sexp("fp_line")));
        items.extend(self.arcs.iter().map(|a| a.to_sexp("fp_arc")));
        items.extend(self.rectangles.iter().map(|r| r.to_sexp("fp_rect")));
        items.extend(self.texts.iter().map(Text::to_sexp_footprint));
        items.extend(self.pads.iter().map(Pad::to_sexp));
        if let Some(model) = &self.model {
            items.push(Value::list(vec![
                Value::sym("model"),
                Value::string(model.clone()),
            ]));
        }
        items.extend(self.extras.iter().cloned());
        if let Some(fonts) = self.embedded_fonts {
            items.push(Value::list(vec![
                Value::sym("embedded_fonts"),
                Value::Bool(fonts),
            ]));
        }
        Value::list(items)
    }
}

/// A straight copper segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub start: Point,
    pub end: Point,
    pub width: f64,
    pub layer: String,
    pub net: i32,
    /// Resolved from the document's net table; never serialized.
    pub net_name: Option<String>,
    pub uuid: Option<String>,
}

impl Track {
    pub fn new(start: Point, end: Point, width: f64, layer: impl Into<String>, net: i32) -> Self {
        Self {
            start,
            end,
            width,
            layer: layer.into(),
            net,
            net_name: None,
            uuid: Some(new_uuid()),
        }
    }

    pub fn length(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub(crate) fn to_sexp(&self) -> Value {
        let mut items = vec![
            Value::sym("segment"),
            self.start.to_sexp("start"),
            self.end.to_sexp("end"),
            Value::list(vec![Value::sym("width"), Value::num(self.width)]),
            Value::list(vec![Value::sym("layer"), Value::string(self.layer.clone())]),
            Value::list(vec![Value::sym("net"), Value::int(self.net as i64)]),
        ];
        items.extend(uuid_child(&self.uuid));
        Value::list(items)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Via {
    pub position: Point,
    pub size: f64,
    pub drill: f64,
    /// Connected copper layers, ordered; at least two for a valid via.
    pub layers: Vec<String>,
    pub net: i32,
    /// Resolved from the document's net table; never serialized.
    pub net_name: Option<String>,
    pub uuid: Option<String>,
}

impl Via {
    pub fn new(position: Point, size: f64, drill: f64, net: i32) -> Self {
        Self {
            position,
            size,
            drill,
            layers: vec!["F.Cu".to_string(), "B.Cu".to_string()],
            net,
            net_name: None,
            uuid: Some(new_uuid()),
        }
    }

    pub(crate) fn to_sexp(&self) -> Value {
        let mut layers = vec![Value::sym("layers")];
        layers.extend(self.layers.iter().map(|l| Value::string(l.clone())));
        let mut items = vec![
            Value::sym("via"),
            self.position.to_sexp("at"),
            Value::list(vec![Value::sym("size"), Value::num(self.size)]),
            Value::list(vec![Value::sym("drill"), Value::num(self.drill)]),
            Value::list(layers),
            Value::list(vec![Value::sym("net"), Value::int(self.net as i64)]),
        ];
        items.extend(uuid_child(&self.uuid));
        Value::list(items)
    }
}

/// Zone hatch display: `(hatch edge 0.5)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hatch {
    pub style: String,
    pub pitch: f64,
}

/// `(connect_pads [mode] (clearance c))`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConnectPads {
    pub mode: Option<String>,
    pub clearance: Option<f64>,
}

/// Keepout rules; `true` means the item is allowed inside the zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keepout {
    pub tracks: bool,
    pub vias: bool,
    pub pads: bool,
    pub copperpour: bool,
    pub footprints: bool,
}

/// The `(fill …)` block with its thermal-relief parameters, which sit one
/// level deeper than the zone's direct children.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneFill {
    pub filled: bool,
    pub thermal_gap: Option<f64>,
    pub thermal_bridge_width: Option<f64>,
}

/// A filled copper region defined by a polygon boundary and net assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub net: i32,
    pub net_name: String,
    /// Layer spec; multiple layers are space-joined and re-emitted as a
    /// `(layers …)` list.
    pub layer: String,
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub hatch: Option<Hatch>,
    pub priority: Option<i32>,
    pub connect_pads: Option<ConnectPads>,
    pub min_thickness: Option<f64>,
    pub filled_areas_thickness: Option<bool>,
    pub keepout: Option<Keepout>,
    pub fill: Option<ZoneFill>,
    /// Outline points; three or more for a valid zone.
    pub polygon: Vec<Point>,
}

impl Zone {
    pub fn new(net: i32, net_name: impl Into<String>, layer: impl Into<String>) -> Self {
        Self {
            net,
            net_name: net_name.into(),
            layer: layer.into(),
            uuid: Some(new_uuid()),
            name: None,
            hatch: None,
            priority: None,
            connect_pads: None,
            min_thickness: None,
            filled_areas_thickness: None,
            keepout: None,
            fill: None,
            polygon: Vec::new(),
        }
    }

    /// Thermal relief gap: the fill block's value, else the connect_pads
    /// clearance.
    pub fn thermal_relief_gap(&self) -> Option<f64> {
        self.fill
            .as_ref()
            .and_then(|f| f.thermal_gap)
            .or_else(|| self.connect_pads.as_ref().and_then(|c| c.clearance))
    }

    pub fn thermal_relief_bridge(&self) -> Option<f64> {
        self.fill.as_ref().and_then(|f| f.thermal_bridge_width)
    }

    pub fn is_filled(&self) -> bool {
        self.filled_areas_thickness.unwrap_or(false)
    }

    pub(crate) fn to_sexp(&self) -> Value {
        let mut items = vec![
            Value::sym("zone"),
            Value::list(vec![Value::sym("net"), Value::int(self.net as i64)]),
            Value::list(vec![
                Value::sym("net_name"),
                Value::string(self.net_name.clone()),
            ]),
        ];
        if self.layer.contains(' ') {
            let mut layers = vec![Value::sym("layers")];
            layers.extend(self.layer.split(' ').map(Value::string));
            items.push(Value::list(layers));
        } else {
            items.push(Value::list(vec![
                Value::sym("layer"),
                Value::string(self.layer.clone()),
            ]));
        }
        items.extend(uuid_child(&self.uuid));
        if let Some(name) = &self.name {
            items.push(Value::list(vec![
                Value::sym("name"),
                Value::string(name.clone()),
            ]));
        }
        if let Some(hatch) = &self.hatch {
            items.push(Value::list(vec![
                Value::sym("hatch"),
                Value::sym(hatch.style.clone()),
                Value::num(hatch.pitch),
            ]));
        }
        if let Some(priority) = self.priority {
            items.push(Value::list(vec![
                Value::sym("priority"),
                Value::int(priority as i64),
            ]));
        }
        if let Some(cp) = &self.connect_pads {
            let mut c = vec![Value::sym("connect_pads")];
            if let Some(mode) = &cp.mode {
                c.push(Value::sym(mode.clone()));
            }
            if let Some(clearance) = cp.clearance {
                c.push(Value::list(vec![
                    Value::sym("clearance"),
                    Value::num(clearance),
                ]));
            }
            items.push(Value::list(c));
        }
        if let Some(min) = self.min_thickness {
            items.push(Value::list(vec![
                Value::sym("min_thickness"),
                Value::num(min),
            ]));
        }
        if let Some(filled) = self.filled_areas_thickness {
            items.push(Value::list(vec![
                Value::sym("filled_areas_thickness"),
                Value::Bool(filled),
            ]));
        }
        if let Some(keepout) = &self.keepout {
            let rule = |allowed: bool| {
                Value::sym(if allowed { "allowed" } else { "not_allowed" })
            };
            items.push(Value::list(vec![
                Value::sym("keepout"),
                Value::list(vec![Value::sym("tracks"), rule(keepout.tracks)]),
                Value::list(vec![Value::sym("vias"), rule(keepout.vias)]),
                Value::list(vec![Value::sym("pads"), rule(keepout.pads)]),
                Value::list(vec![Value::sym("copperpour"), rule(keepout.copperpour)]),
                Value::list(vec![Value::sym("footprints"), rule(keepout.footprints)]),
            ]));
        }
        if let Some(fill) = &self.fill {
            let mut f = vec![Value::sym("fill")];
            if fill.filled {
                f.push(Value::sym("yes"));
            }
            if let Some(gap) = fill.thermal_gap {
                f.push(Value::list(vec![Value::sym("thermal_gap"), Value::num(gap)]));
            }
            if let Some(bridge) = fill.thermal_bridge_width {
                f.push(Value::list(vec![
                    Value::sym("thermal_bridge_width"),
                    Value::num(bridge),
                ]));
            }
            items.push(Value::list(f));
        }
        if !self.polygon.is_empty() {
            let mut pts = vec![Value::sym("pts")];
            pts.extend(self.polygon.iter().map(|p| p.to_sexp("xy")));
            items.push(Value::list(vec![
                Value::sym("polygon"),
                Value::list(pts),
            ]));
        }
        Value::list(items)
    }
}

/// Board-level graphic primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Graphic {
    Line(Line),
    Arc(Arc),
    Rectangle(Rectangle),
    Text(Text),
}

impl Graphic {
    pub fn layer(&self) -> &str {
        match self {
            Graphic::Line(l) => &l.layer,
            Graphic::Arc(a) => &a.layer,
            Graphic::Rectangle(r) => &r.layer,
            Graphic::Text(t) => &t.layer,
        }
    }

    pub(crate) fn to_sexp(&self) -> Value {
        match self {
            Graphic::Line(l) => l.to_sexp("gr_line"),
            Graphic::Arc(a) => a.to_sexp("gr_arc"),
            Graphic::Rectangle(r) => r.to_sexp("gr_rect"),
            Graphic::Text(t) => t.to_sexp_board(),
        }
    }
}
