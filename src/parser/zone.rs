//! Zone (copper pour / keepout) element parser.
//!
//! Thermal-relief parameters live one level deeper than the zone's direct
//! children, inside the `connect_pads` and `fill` sub-blocks.

use crate::parser::common::{parse_pts, parse_uuid};
use crate::parser::pcb_schema::{ConnectPads, Hatch, Keepout, Zone, ZoneFill};
use crate::parser::registry::{ElementParser, ParsedElement};
use crate::parser::sexp::{child_f64, child_text, find_child, Value};

pub struct ZoneParser;

impl ElementParser for ZoneParser {
    fn element_type(&self) -> &'static str {
        "zone"
    }

    fn parse_element(&self, items: &[Value]) -> Option<ParsedElement> {
        let mut zone = Zone {
            net: 0,
            net_name: String::new(),
            layer: "F.Cu".to_string(),
            uuid: parse_uuid(items),
            name: child_text(items, "name"),
            hatch: None,
            priority: None,
            connect_pads: None,
            min_thickness: child_f64(items, "min_thickness"),
            filled_areas_thickness: child_text(items, "filled_areas_thickness")
                .map(|v| v != "no"),
            keepout: None,
            fill: None,
            polygon: Vec::new(),
        };

        for item in &items[1..] {
            let Some(child) = item.as_list() else { continue };
            let Some(tag) = child.first().and_then(|v| v.as_sym()) else {
                continue;
            };
            match tag {
                "net" => {
                    if let Some(net) = child.get(1).and_then(|v| v.as_i64()) {
                        zone.net = net as i32;
                    }
                    if let Some(name) = child.get(2).and_then(|v| v.as_text()) {
                        zone.net_name = name.to_string();
                    }
                }
                "net_name" => {
                    if let Some(name) = child.get(1).and_then(|v| v.as_text()) {
                        zone.net_name = name.to_string();
                    }
                }
                "layer" => {
                    if let Some(layer) = child.get(1).and_then(|v| v.as_text()) {
                        zone.layer = layer.to_string();
                    }
                }
                "layers" => {
                    let layers: Vec<&str> =
                        child[1..].iter().filter_map(|v| v.as_text()).collect();
                    zone.layer = layers.join(" ");
                }
                "hatch" => {
                    if let (Some(style), Some(pitch)) = (
                        child.get(1).and_then(|v| v.as_text()),
                        child.get(2).and_then(|v| v.as_f64()),
                    ) {
                        zone.hatch = Some(Hatch {
                            style: style.to_string(),
                            pitch,
                        });
                    }
                }
                "priority" => {
                    zone.priority = child.get(1).and_then(|v| v.as_i64()).map(|p| p as i32);
                }
                "connect_pads" => {
                    zone.connect_pads = Some(ConnectPads {
                        mode: child.get(1).and_then(|v| v.as_sym()).map(str::to_string),
                        clearance: child_f64(child, "clearance"),
                    });
                }
                "keepout" => {
                    let allowed = |rule: &str| {
                        child_text(child, rule).as_deref() != Some("not_allowed")
                    };
                    zone.keepout = Some(Keepout {
                        tracks: allowed("tracks"),
                        vias: allowed("vias"),
                        pads: allowed("pads"),
                        copperpour: allowed("copperpour"),
                        footprints: allowed("footprints"),
                    });
                }
                "fill" => {
                    zone.fill = Some(ZoneFill {
                        filled: child.get(1).and_then(|v| v.as_sym()) == Some("yes"),
                        thermal_gap: child_f64(child, "thermal_gap"),
                        thermal_bridge_width: child_f64(child, "thermal_bridge_width"),
                    });
                }
                "polygon" => {
                    if let Some(pts) = find_child(child, "pts").and_then(|p| p.as_list()) {
                        zone.polygon = parse_pts(pts);
                    }
                }
                _ => {}
            }
        }

        Some(ParsedElement::Zone(zone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::pcb_schema::Point;
    use crate::parser::sexp::SExpParser;

    fn parse(input: &str) -> Zone {
        let value = SExpParser::new(input).parse().unwrap();
        let items = value.as_list().unwrap();
        match ZoneParser.parse_element(items) {
            Some(ParsedElement::Zone(zone)) => zone,
            other => panic!("expected zone, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_copper_pour() {
        let zone = parse(
            "(zone (net 1) (net_name \"GND\") (layer \"F.Cu\") (uuid \"zone-uuid\") \
             (hatch edge 0.5) (connect_pads (clearance 0.5)) (min_thickness 0.25) \
             (filled_areas_thickness yes) \
             (fill (thermal_gap 0.5) (thermal_bridge_width 0.5)) \
             (polygon (pts (xy 10 10) (xy 90 10) (xy 90 50) (xy 10 50))))",
        );
        assert_eq!(zone.net, 1);
        assert_eq!(zone.net_name, "GND");
        assert_eq!(zone.layer, "F.Cu");
        assert_eq!(zone.thermal_relief_gap(), Some(0.5));
        assert_eq!(zone.thermal_relief_bridge(), Some(0.5));
        assert_eq!(zone.min_thickness, Some(0.25));
        assert!(zone.is_filled());
        assert_eq!(zone.polygon.len(), 4);
        assert_eq!(zone.polygon[2], Point::new(90.0, 50.0));
    }

    #[test]
    fn test_parse_keepout_zone() {
        let zone = parse(
            "(zone (net 0) (net_name \"\") (layer \"F.Cu\") (name \"Keepout1\") \
             (hatch edge 0.5) \
             (keepout (tracks allowed) (vias not_allowed) (pads allowed) \
              (copperpour not_allowed) (footprints allowed)) \
             (polygon (pts (xy 80 80) (xy 120 80) (xy 120 120) (xy 80 120))))",
        );
        assert_eq!(zone.name.as_deref(), Some("Keepout1"));
        let keepout = zone.keepout.unwrap();
        assert!(keepout.tracks);
        assert!(!keepout.vias);
        assert!(!keepout.copperpour);
        assert!(keepout.footprints);
    }

    #[test]
    fn test_multi_layer_zone() {
        let zone = parse(
            "(zone (net 1) (net_name \"GND\") (layers \"F.Cu\" \"B.Cu\") \
             (polygon (pts (xy 0 0) (xy 1 0) (xy 1 1))))",
        );
        assert_eq!(zone.layer, "F.Cu B.Cu");
    }
}
