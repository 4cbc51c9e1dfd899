//! Conformance tests: golden fixture files decoded and rendered to insta snapshots.
//!
//! Each test reads a committed `.bencode` fixture from `tests/golden/`,
//! decodes it token by token, and renders the stream as indented text. The
//! text is compared against an inline snapshot, so a diff points straight at
//! the token whose classification or payload changed.
//!
//! Fixtures are written by `src/bin/generate_golden.rs`. A deliberate change
//! to the token model is accepted via `cargo insta review`.

use std::path::Path;

use bencode_decoder::{Decoder, Token, decode_value};
use insta::assert_snapshot;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn golden(name: &str) -> Vec<u8> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let path = manifest_dir
        .join("tests/golden")
        .join(format!("{name}.bencode"));
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", path.display()))
}

/// Printable ASCII is shown quoted; anything else as hex.
fn render_bytes(bytes: &[u8]) -> String {
    if bytes.iter().all(|b| (0x20..=0x7e).contains(b)) {
        format!("\"{}\"", bytes.escape_ascii())
    } else {
        format!("hex:{}", hex::encode(bytes))
    }
}

/// One token per line, indented two spaces per open container.
fn render(bytes: &[u8]) -> String {
    let mut lines = Vec::new();
    let mut depth = 0usize;
    for token in Decoder::from_slice(bytes) {
        let token = token.unwrap_or_else(|e| panic!("decode failed: {e}"));
        if matches!(token, Token::MapEnd | Token::ListEnd) {
            depth -= 1;
        }
        let text = match &token {
            Token::FieldName(name) => format!("FieldName({})", render_bytes(name)),
            Token::StringValue(bytes) => format!("StringValue({})", render_bytes(bytes)),
            other => other.to_string(),
        };
        lines.push(format!("{}{text}", "  ".repeat(depth)));
        if matches!(token, Token::MapStart | Token::ListStart) {
            depth += 1;
        }
    }
    lines.join("\n")
}

// ── Fixtures ──────────────────────────────────────────────────────────────────

#[test]
fn person() {
    assert_snapshot!(render(&golden("person")), @r#"
    MapStart
      FieldName("age")
      IntegerValue(80)
      FieldName("type")
      StringValue("human")
    MapEnd
    "#);
}

#[test]
fn torrent() {
    assert_snapshot!(render(&golden("torrent")), @r#"
    MapStart
      FieldName("announce")
      StringValue("http://tracker.example.com:6969/announce")
      FieldName("created by")
      StringValue("bencode-tests")
      FieldName("creation date")
      IntegerValue(1700000000)
      FieldName("info")
      MapStart
        FieldName("length")
        IntegerValue(1048576)
        FieldName("name")
        StringValue("sample.iso")
        FieldName("piece length")
        IntegerValue(262144)
        FieldName("pieces")
        StringValue(hex:0b30557a9fc4e90e33587da2c7ec11365b80a5caef14395e83a8cdf2173c6186abd0f51a3f6489ae)
      MapEnd
    MapEnd
    "#);
}

#[test]
fn nested_lists() {
    assert_snapshot!(render(&golden("nested_lists")), @r#"
    ListStart
      ListStart
        IntegerValue(1)
        IntegerValue(2)
      ListEnd
      MapStart
        FieldName("a")
        ListStart
        ListEnd
      MapEnd
      StringValue("")
      ListStart
        ListStart
          ListStart
          ListEnd
        ListEnd
      ListEnd
      MapStart
        FieldName("k")
        MapStart
          FieldName("k")
          IntegerValue(-1)
        MapEnd
      MapEnd
    ListEnd
    "#);
}

#[test]
fn binary_payloads() {
    assert_snapshot!(render(&golden("binary_payloads")), @r#"
    ListStart
      StringValue("dlie")
      StringValue(hex:00ff65)
      StringValue("e:")
      StringValue("i1e")
      MapStart
        FieldName("x")
        StringValue("le")
      MapEnd
    ListEnd
    "#);
}

#[test]
fn extremes() {
    assert_snapshot!(render(&golden("extremes")), @r#"
    ListStart
      IntegerValue(-9223372036854775808)
      IntegerValue(9223372036854775807)
      IntegerValue(0)
      IntegerValue(-1)
      StringValue("")
    ListEnd
    "#);
}

// ── Value view of a fixture ───────────────────────────────────────────────────

#[test]
fn torrent_value_accessors() {
    let torrent = decode_value(&golden("torrent")).unwrap();
    let info = torrent.get(b"info").expect("info map");

    assert_eq!(info.get(b"name").and_then(|v| v.as_str()), Some("sample.iso"));
    assert_eq!(
        info.get(b"piece length").and_then(|v| v.as_integer()),
        Some(262_144)
    );
    assert_eq!(info.get(b"pieces").and_then(|v| v.as_bytes()).map(<[u8]>::len), Some(40));
    assert_eq!(info.get(b"pieces").and_then(|v| v.as_str()), None);
    assert_eq!(
        torrent
            .get(b"announce")
            .and_then(|v| v.to_text_lossy())
            .as_deref(),
        Some("http://tracker.example.com:6969/announce")
    );
}
