use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kicad_pcb::PcbParser;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

fn bench_parse_board(c: &mut Criterion) {
    let content = fixture("full_board.kicad_pcb");
    let parser = PcbParser::new();

    c.bench_function("parse_board", |b| {
        b.iter(|| parser.parse_string(black_box(&content)));
    });
}

fn bench_dumps_board(c: &mut Criterion) {
    let content = fixture("full_board.kicad_pcb");
    let parser = PcbParser::new();
    let board = parser.parse_string(&content).unwrap();

    c.bench_function("dumps_board", |b| {
        b.iter(|| parser.dumps(black_box(&board)));
    });
}

criterion_group!(benches, bench_parse_board, bench_dumps_board);
criterion_main!(benches);
