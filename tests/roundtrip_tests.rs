//! Exact format preservation tests.
//!
//! These verify that load→save reproduces the reference boards byte for
//! byte, that repeated round-trips are stable, and that sections without a
//! typed parser survive untouched.

use kicad_pcb::{PcbParser, SExpParser, Value};
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).unwrap()
}

fn roundtrip(content: &str) -> String {
    let parser = PcbParser::new();
    let board = parser.parse_string(content).unwrap();
    parser.dumps(&board).unwrap()
}

#[test]
fn test_minimal_board_roundtrips_byte_identical() {
    let original = fixture("minimal.kicad_pcb");
    assert_eq!(roundtrip(&original), original);
}

#[test]
fn test_full_board_roundtrips_byte_identical() {
    let original = fixture("full_board.kicad_pcb");
    let generated = roundtrip(&original);
    if generated != original {
        for (i, (a, b)) in original.lines().zip(generated.lines()).enumerate() {
            assert_eq!(a, b, "first divergence at line {}", i + 1);
        }
        assert_eq!(generated, original);
    }
}

#[test]
fn test_repeated_roundtrips_are_stable() {
    let original = fixture("full_board.kicad_pcb");
    let first = roundtrip(&original);
    let second = roundtrip(&first);
    let third = roundtrip(&second);
    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn test_unknown_sections_roundtrip_byte_identical() {
    let content = r#"(kicad_pcb (version 20241229) (generator "pcbnew") (generator_version "9.0")
  (general
    (thickness 1.6)
  )
  (paper "A4")
  (layers
    (0 "F.Cu" signal)
  )
  (net 0 "")
  (mystery_section "payload"
    (nested
      (deeply 1 2 3)
    )
  )
  (embedded_fonts no)
)
"#;
    assert_eq!(roundtrip(content), content);
}

#[test]
fn test_pad_line_reproduced_exactly() {
    let pad_line = "    (pad \"1\" smd rect (at -0.875 0) (size 1.05 0.95) \
                    (layers \"F.Cu\" \"F.Paste\" \"F.Mask\") (net 1 \"GND\"))";
    let content = format!(
        "(kicad_pcb (version 20241229) (generator \"pcbnew\") (generator_version \"9.0\")\n\
         \x20 (general\n\
         \x20   (thickness 1.6)\n\
         \x20 )\n\
         \x20 (paper \"A4\")\n\
         \x20 (layers\n\
         \x20   (0 \"F.Cu\" signal)\n\
         \x20 )\n\
         \x20 (net 0 \"\")\n\
         \x20 (net 1 \"GND\")\n\
         \x20 (footprint \"Resistor_SMD:R_0603_1608Metric\"\n\
         \x20   (layer \"F.Cu\")\n\
         \x20   (at 100 50)\n\
         {pad_line}\n\
         \x20 )\n\
         \x20 (embedded_fonts no)\n\
         )\n"
    );

    let parser = PcbParser::new();
    let board = parser.parse_string(&content).unwrap();

    // the pad parsed fully typed...
    let pad = &board.footprints().next().unwrap().pads[0];
    assert_eq!(pad.number, "1");
    assert_eq!(pad.pad_type, "smd");
    assert_eq!(pad.shape, "rect");
    assert_eq!(pad.net, Some(1));
    assert_eq!(pad.net_name.as_deref(), Some("GND"));
    assert!(pad.uuid.is_none());

    // ...and re-renders as the exact original line
    let generated = parser.dumps(&board).unwrap();
    assert!(
        generated.lines().any(|line| line == pad_line),
        "pad line not reproduced:\n{generated}"
    );
    assert_eq!(generated, content);
}

#[test]
fn test_number_lexemes_survive_roundtrip() {
    // 0.50 must not normalize to 0.5 on the way out
    let content = r#"(kicad_pcb (version 20241229) (generator "pcbnew") (generator_version "9.0")
  (general
    (thickness 1.6)
  )
  (paper "A4")
  (layers
    (0 "F.Cu" signal)
  )
  (net 0 "")
  (tuning_pattern
    (spacing 0.50)
    (corner_radius 00.25)
  )
  (embedded_fonts no)
)
"#;
    assert_eq!(roundtrip(content), content);
}

#[test]
fn test_mutation_changes_only_the_touched_element() {
    let parser = PcbParser::new();
    let original = fixture("full_board.kicad_pcb");
    let mut board = parser.parse_string(&original).unwrap();

    for track in board.tracks_mut() {
        track.width = 0.5;
    }

    let generated = parser.dumps(&board).unwrap();
    assert_ne!(generated, original);

    let diff: Vec<(&str, &str)> = original
        .lines()
        .zip(generated.lines())
        .filter(|(a, b)| a != b)
        .collect();
    assert_eq!(diff, vec![("    (width 0.25)", "    (width 0.5)")]);
}

#[test]
fn test_value_tree_reproduces_source_tokens() {
    // reader output re-rendered through the formatter reproduces the source
    // token for token, including the Sym/Str distinction
    let source = "(stroke (width 0.15) (type solid))";
    let value = SExpParser::new(source).parse().unwrap();
    let formatter = kicad_pcb::PcbFormatter::new();
    assert_eq!(formatter.format(&value).unwrap(), source);

    let quoted = SExpParser::new("(layer \"F.Cu\")").parse().unwrap();
    assert_eq!(formatter.format(&quoted).unwrap(), "(layer \"F.Cu\")");
    match &quoted {
        Value::List(items) => assert!(matches!(items[1], Value::Str(_))),
        _ => unreachable!(),
    }
}
