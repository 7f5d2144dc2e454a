//! Document lifecycle tests: fresh boards, mutation, save/load.

use kicad_pcb::prelude::*;
use kicad_pcb::Graphic;
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_fresh_board_dumps_reference_text() {
    let board = create_pcb();
    let generated = PcbParser::new().dumps(&board).unwrap();
    let expected = fs::read_to_string(fixture_path("minimal.kicad_pcb")).unwrap();
    assert_eq!(generated, expected);
}

#[test]
fn test_write_and_reload() {
    let parser = PcbParser::new();
    let mut board = create_pcb();
    board.add_net(Net::new(1, "GND").unwrap());
    board.add_track(Track::new(
        Point::new(10.0, 10.0),
        Point::new(20.0, 10.0),
        0.25,
        "F.Cu",
        1,
    ));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.kicad_pcb");

    parser.write_file(&board, &path).unwrap();
    assert!(path.exists());

    let reloaded = parser.parse_file(&path).unwrap();
    assert_eq!(reloaded.version, 20241229);
    assert_eq!(reloaded.nets.len(), 2);
    assert_eq!(reloaded.tracks().count(), 1);
    let track = reloaded.tracks().next().unwrap();
    assert_eq!(track.net_name.as_deref(), Some("GND"));

    // a save of the reload matches the first save
    let first = parser.dumps(&board).unwrap();
    let second = parser.dumps(&reloaded).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_programmatic_footprint_construction() {
    let mut board = create_pcb();
    board.add_net(Net::new(1, "VCC").unwrap());

    let mut footprint = Footprint::new("Capacitor_SMD:C_0603_1608Metric", Point::new(50.0, 50.0));
    footprint.reference = "C1".to_string();
    footprint.value = "100nF".to_string();
    let mut pad = Pad::new("1", "smd", "rect", Point::new(-0.775, 0.0), (0.9, 0.95));
    pad.layers = vec!["F.Cu".to_string(), "F.Paste".to_string(), "F.Mask".to_string()];
    pad.net = Some(1);
    pad.net_name = Some("VCC".to_string());
    footprint.pads.push(pad);
    board.add_footprint(footprint);

    let fetched = board.find_footprint("C1").unwrap();
    assert_eq!(fetched.lib_id(), "Capacitor_SMD:C_0603_1608Metric");
    // programmatically built elements get generated identifiers
    assert!(fetched.uuid.is_some());
    assert!(fetched.pads[0].uuid.is_some());

    // and the board still renders and reparses
    let parser = PcbParser::new();
    let text = parser.dumps(&board).unwrap();
    let reloaded = parser.parse_string(&text).unwrap();
    assert_eq!(reloaded.find_footprint("C1").unwrap().pads.len(), 1);
}

#[test]
fn test_in_place_mutation_through_accessors() {
    let parser = PcbParser::new();
    let mut board = parser.parse_file(fixture_path("full_board.kicad_pcb")).unwrap();

    for footprint in board.footprints_mut() {
        footprint.value = "22k".to_string();
        if let Some(value) = footprint
            .properties
            .iter_mut()
            .find(|p| p.name == "Value")
        {
            value.value = "22k".to_string();
        }
    }

    let text = parser.dumps(&board).unwrap();
    let reloaded = parser.parse_string(&text).unwrap();
    assert_eq!(reloaded.find_footprint("R1").unwrap().value, "22k");
}

#[test]
fn test_graphics_accessor_skips_opaque_items() {
    let board = PcbParser::new()
        .parse_file(fixture_path("full_board.kicad_pcb"))
        .unwrap();
    // gr_rect + gr_text are typed; gr_circle stays opaque
    assert_eq!(board.graphics().count(), 2);
    assert!(board
        .graphics()
        .any(|g| matches!(g, Graphic::Text(t) if t.text == "KICAD PCB")));
    assert!(board
        .raw_sections()
        .any(|raw| raw.tag() == Some("gr_circle")));
}

#[test]
fn test_board_serializes_to_json() {
    let board = PcbParser::new()
        .parse_file(fixture_path("full_board.kicad_pcb"))
        .unwrap();
    let json = serde_json::to_string(&board).unwrap();
    let back: PcbBoard = serde_json::from_str(&json).unwrap();
    assert_eq!(back.nets, board.nets);
    assert_eq!(back.footprints().count(), 1);
}

#[test]
fn test_net_zero_cannot_carry_a_name() {
    assert!(Net::new(0, "GND").is_err());
    let board = create_pcb();
    assert_eq!(board.nets[0], Net::unconnected());
}
