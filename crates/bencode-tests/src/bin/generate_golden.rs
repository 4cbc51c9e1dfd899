//! Golden fixture generator for the conformance test suite.
//!
//! Writes every fixture under `tests/golden/`. Run it after a deliberate
//! change to the encoder's output and commit the regenerated files; the
//! inline snapshots in `tests/conformance.rs` are then updated via
//! `cargo insta review`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p bencode-tests
//! ```
//!
//! # Generated fixtures
//!
//! | File                     | Contents                                       |
//! |--------------------------|------------------------------------------------|
//! | person.bencode           | Two-entry map: integer and string values       |
//! | torrent.bencode          | Torrent-style metainfo with a nested info map  |
//! | nested_lists.bencode     | Lists and maps interleaved at several depths   |
//! | binary_payloads.bencode  | Strings whose bytes equal `d`, `l`, `i`, `e`   |
//! | extremes.bencode         | i64::MIN, i64::MAX, zero, -1, empty string     |

#![allow(clippy::pedantic)]

use std::path::Path;

use bencode_encoder::{Value, encode_value};

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");

    write_fixture(&golden_dir, "person", &person());
    write_fixture(&golden_dir, "torrent", &torrent());
    write_fixture(&golden_dir, "nested_lists", &nested_lists());
    write_fixture(&golden_dir, "binary_payloads", &binary_payloads());
    write_fixture(&golden_dir, "extremes", &extremes());

    println!("All golden fixtures written to {}", golden_dir.display());
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_fixture(dir: &Path, name: &str, value: &Value) {
    let bytes = encode_value(value).expect("encode fixture");
    std::fs::create_dir_all(dir).expect("create_dir_all");
    let path = dir.join(format!("{name}.bencode"));
    std::fs::write(&path, &bytes).expect("write fixture");
    println!("  wrote {} ({} bytes)", path.display(), bytes.len());
}

fn dict(entries: Vec<(&str, Value)>) -> Value {
    Value::Dict(
        entries
            .into_iter()
            .map(|(k, v)| (k.as_bytes().to_vec(), v))
            .collect(),
    )
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

fn person() -> Value {
    dict(vec![("age", Value::Integer(80)), ("type", Value::from("human"))])
}

fn torrent() -> Value {
    // Deterministic stand-in for two SHA-1 piece hashes.
    let pieces: Vec<u8> = (0..40u32).map(|i| ((i * 37 + 11) % 256) as u8).collect();

    dict(vec![
        (
            "announce",
            Value::from("http://tracker.example.com:6969/announce"),
        ),
        ("created by", Value::from("bencode-tests")),
        ("creation date", Value::Integer(1_700_000_000)),
        (
            "info",
            dict(vec![
                ("length", Value::Integer(1_048_576)),
                ("name", Value::from("sample.iso")),
                ("piece length", Value::Integer(262_144)),
                ("pieces", Value::Bytes(pieces)),
            ]),
        ),
    ])
}

fn nested_lists() -> Value {
    Value::List(vec![
        Value::List(vec![Value::Integer(1), Value::Integer(2)]),
        dict(vec![("a", Value::List(vec![]))]),
        Value::from(""),
        Value::List(vec![Value::List(vec![Value::List(vec![])])]),
        dict(vec![("k", dict(vec![("k", Value::Integer(-1))]))]),
    ])
}

fn binary_payloads() -> Value {
    Value::List(vec![
        Value::from("dlie"),
        Value::Bytes(vec![0x00, 0xff, b'e']),
        Value::from("e:"),
        Value::from("i1e"),
        dict(vec![("x", Value::from("le"))]),
    ])
}

fn extremes() -> Value {
    Value::List(vec![
        Value::Integer(i64::MIN),
        Value::Integer(i64::MAX),
        Value::Integer(0),
        Value::Integer(-1),
        Value::from(""),
    ])
}
