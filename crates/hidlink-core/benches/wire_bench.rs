//! Criterion benchmarks for the wire codec hot paths.
//!
//! Run with:
//!
//! ```text
//! cargo bench --package hidlink-core --bench wire_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hidlink_core::{
    chords_for_string, encode_line, parse_line, HidCommand, Key, Modifier, MouseButton, SpecialKey,
};

fn make_key_type() -> HidCommand {
    HidCommand::KeyType("The quick brown fox jumps over the lazy dog".to_string())
}

fn make_key_combo() -> HidCommand {
    HidCommand::KeyCombo {
        modifiers: vec![Modifier::Ctrl, Modifier::Shift],
        key: Key::Char('S'),
    }
}

fn make_mouse_move() -> HidCommand {
    HidCommand::MouseMove { dx: 200, dy: -300 }
}

fn make_key_press() -> HidCommand {
    HidCommand::KeyPress(Key::Special(SpecialKey::Enter))
}

fn bench_encode_line(c: &mut Criterion) {
    let cases: &[(&str, HidCommand)] = &[
        ("ping", HidCommand::Ping),
        ("key_type", make_key_type()),
        ("key_press", make_key_press()),
        ("key_combo", make_key_combo()),
        ("mouse_move", make_mouse_move()),
        ("mouse_click", HidCommand::MouseClick(MouseButton::Left)),
    ];

    let mut group = c.benchmark_group("encode_line");
    for (name, command) in cases {
        group.bench_with_input(BenchmarkId::new("command", name), command, |b, command| {
            b.iter(|| encode_line(black_box(command)));
        });
    }
    group.finish();
}

fn bench_parse_line(c: &mut Criterion) {
    let cases: &[(&str, String)] = &[
        ("ping", encode_line(&HidCommand::Ping)),
        ("key_type", encode_line(&make_key_type())),
        ("key_press", encode_line(&make_key_press())),
        ("key_combo", encode_line(&make_key_combo())),
        ("mouse_move", encode_line(&make_mouse_move())),
    ];

    let mut group = c.benchmark_group("parse_line");
    for (name, line) in cases {
        group.bench_with_input(BenchmarkId::new("line", name), line, |b, line| {
            b.iter(|| parse_line(black_box(line)));
        });
    }
    group.finish();
}

fn bench_roundtrip_hot_path(c: &mut Criterion) {
    // Pointer motion dominates interactive traffic, so the move command is
    // the case worth watching end to end.
    let command = make_mouse_move();

    c.bench_function("roundtrip/mouse_move", |b| {
        b.iter(|| {
            let line = encode_line(black_box(&command));
            parse_line(black_box(&line))
        });
    });
}

fn bench_chord_compiler(c: &mut Criterion) {
    let cases: &[(&str, &str)] = &[
        ("short", "ls\n"),
        ("sentence", "The quick brown fox jumps over the lazy dog"),
        ("mixed_case", "Hello, World! 123"),
    ];

    let mut group = c.benchmark_group("chords_for_string");
    for (name, text) in cases {
        group.bench_with_input(BenchmarkId::new("text", name), text, |b, text| {
            b.iter(|| chords_for_string(black_box(text)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_encode_line,
    bench_parse_line,
    bench_roundtrip_hot_path,
    bench_chord_compiler
);
criterion_main!(benches);
