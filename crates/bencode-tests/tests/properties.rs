//! Behavioural properties of the decoder.
//!
//! Covers integer range and policy, binary-safe strings, key/value
//! alternation, skip placement, truncation and unbalanced closes.

use bencode_decoder::{
    DecodeError, Decoder, DecoderConfig, IntegerPolicy, Token, decode_tokens,
};
use bencode_wire::IntegerReason;
use quickcheck_macros::quickcheck;

fn field(name: &str) -> Token {
    Token::FieldName(name.as_bytes().to_vec())
}

fn string(text: &str) -> Token {
    Token::StringValue(text.as_bytes().to_vec())
}

fn decode_with(policy: IntegerPolicy, doc: &[u8]) -> Result<Vec<Token>, DecodeError> {
    let config = DecoderConfig {
        integer_policy: policy,
        ..DecoderConfig::default()
    };
    Decoder::with_config(doc, config).collect()
}

// ── Integers ──────────────────────────────────────────────────────────────────

#[quickcheck]
fn every_i64_decodes_to_itself(n: i64) -> bool {
    let doc = format!("i{n}e");
    decode_tokens(doc.as_bytes()).is_ok_and(|tokens| tokens == vec![Token::IntegerValue(n)])
}

#[test]
fn i64_bounds_decode() {
    for n in [i64::MIN, i64::MIN + 1, -1, 0, 1, i64::MAX - 1, i64::MAX] {
        let doc = format!("i{n}e");
        assert_eq!(
            decode_tokens(doc.as_bytes()).unwrap(),
            vec![Token::IntegerValue(n)],
            "{doc}"
        );
    }
}

#[test]
fn one_past_i64_max_overflows() {
    assert!(matches!(
        decode_tokens(b"i9223372036854775808e"),
        Err(DecodeError::IntegerOverflow { offset: 1 })
    ));
}

#[test]
fn one_past_i64_min_overflows() {
    assert!(matches!(
        decode_tokens(b"i-9223372036854775809e"),
        Err(DecodeError::IntegerOverflow { .. })
    ));
}

#[test]
fn twenty_digit_runs_overflow() {
    assert!(matches!(
        decode_tokens(b"i99999999999999999999e"),
        Err(DecodeError::IntegerOverflow { .. })
    ));
    assert!(matches!(
        decode_tokens(b"99999999999999999999:x"),
        Err(DecodeError::IntegerOverflow { .. })
    ));
}

#[test]
fn malformed_integer_shapes() {
    let cases: &[(&[u8], IntegerReason)] = &[
        (b"ie", IntegerReason::NoDigits),
        (b"i-e", IntegerReason::NoDigits),
        (b"i1-2e", IntegerReason::MisplacedSign),
        (b"i--1e", IntegerReason::MisplacedSign),
        (b"i1.5e", IntegerReason::UnexpectedByte(b'.')),
        (b"i 1e", IntegerReason::UnexpectedByte(b' ')),
        (b"l1x:ae", IntegerReason::UnexpectedByte(b'x')),
    ];
    for (doc, expected) in cases {
        match decode_tokens(doc) {
            Err(DecodeError::MalformedInteger { reason, .. }) => {
                assert_eq!(reason, *expected, "{}", doc.escape_ascii());
            }
            other => panic!("{}: expected MalformedInteger, got {other:?}", doc.escape_ascii()),
        }
    }
}

// ── Integer policy ────────────────────────────────────────────────────────────

#[test]
fn strict_policy_is_the_default() {
    assert_eq!(DecoderConfig::default().integer_policy, IntegerPolicy::Strict);
}

#[test]
fn strict_policy_rejects_leading_zero() {
    assert!(matches!(
        decode_with(IntegerPolicy::Strict, b"i03e"),
        Err(DecodeError::MalformedInteger {
            reason: IntegerReason::LeadingZero,
            ..
        })
    ));
    assert!(matches!(
        decode_with(IntegerPolicy::Strict, b"03:abc"),
        Err(DecodeError::MalformedInteger {
            reason: IntegerReason::LeadingZero,
            ..
        })
    ));
}

#[test]
fn strict_policy_rejects_negative_zero() {
    assert!(matches!(
        decode_with(IntegerPolicy::Strict, b"i-0e"),
        Err(DecodeError::MalformedInteger {
            reason: IntegerReason::NegativeZero,
            ..
        })
    ));
}

#[test]
fn lenient_policy_accepts_non_canonical_forms() {
    assert_eq!(
        decode_with(IntegerPolicy::Lenient, b"i03e").unwrap(),
        vec![Token::IntegerValue(3)]
    );
    assert_eq!(
        decode_with(IntegerPolicy::Lenient, b"i-0e").unwrap(),
        vec![Token::IntegerValue(0)]
    );
    assert_eq!(
        decode_with(IntegerPolicy::Lenient, b"03:abc").unwrap(),
        vec![string("abc")]
    );
}

#[test]
fn plain_zero_is_canonical_under_both_policies() {
    for policy in [IntegerPolicy::Strict, IntegerPolicy::Lenient] {
        assert_eq!(
            decode_with(policy, b"li0e0:e").unwrap(),
            vec![Token::ListStart, Token::IntegerValue(0), string(""), Token::ListEnd]
        );
    }
}

#[test]
fn string_length_is_never_negative() {
    assert!(matches!(
        decode_tokens(b"l-1:ae"),
        Err(DecodeError::MalformedToken { byte: b'-', offset: 1 })
    ));
}

// ── Binary-safe strings ───────────────────────────────────────────────────────

#[quickcheck]
fn any_byte_string_decodes_exactly(bytes: Vec<u8>) -> bool {
    let mut doc = format!("{}:", bytes.len()).into_bytes();
    doc.extend_from_slice(&bytes);
    decode_tokens(&doc).is_ok_and(|tokens| tokens == vec![Token::StringValue(bytes.clone())])
}

#[test]
fn payloads_made_of_sentinels_decode_exactly() {
    let payloads: [&[u8]; 8] = [b"d", b"l", b"i", b"e", b"dlie", b"eeee", b"i1e", b"1:x"];
    for payload in payloads {
        let mut doc = format!("{}:", payload.len()).into_bytes();
        doc.extend_from_slice(payload);
        assert_eq!(
            decode_tokens(&doc).unwrap(),
            vec![Token::StringValue(payload.to_vec())]
        );
    }
}

// ── Key/value alternation ─────────────────────────────────────────────────────

#[test]
fn map_alternation_does_not_leak_across_entries() {
    assert_eq!(
        decode_tokens(b"d3:fooi1e3:barl1:xee").unwrap(),
        vec![
            Token::MapStart,
            field("foo"),
            Token::IntegerValue(1),
            field("bar"),
            Token::ListStart,
            string("x"),
            Token::ListEnd,
            Token::MapEnd,
        ]
    );
}

#[test]
fn list_of_mixed_siblings_keeps_strings_as_values() {
    assert_eq!(
        decode_tokens(b"l1:ali1ee1:bd1:k1:ve1:ce").unwrap(),
        vec![
            Token::ListStart,
            string("a"),
            Token::ListStart,
            Token::IntegerValue(1),
            Token::ListEnd,
            string("b"),
            Token::MapStart,
            field("k"),
            string("v"),
            Token::MapEnd,
            string("c"),
            Token::ListEnd,
        ]
    );
}

// ── Skip ──────────────────────────────────────────────────────────────────────

#[test]
fn skipping_values_lands_exactly_on_map_end() {
    let doc = b"d3:agei80e4:type5:humane";
    let mut decoder = Decoder::from_slice(doc);

    assert_eq!(decoder.next_token().unwrap(), Some(Token::MapStart));
    assert_eq!(decoder.next_token().unwrap(), Some(field("age")));
    assert!(decoder.skip_value().unwrap());
    assert_eq!(decoder.next_token().unwrap(), Some(field("type")));
    assert!(decoder.skip_value().unwrap());
    assert_eq!(decoder.next_token().unwrap(), Some(Token::MapEnd));

    assert_eq!(decoder.position(), doc.len() as u64);
    assert_eq!(decoder.next_token().unwrap(), None);
    assert!(decoder.into_inner().is_empty());
}

#[test]
fn skip_children_of_nested_subtree() {
    let doc = b"d5:skipsd1:al4:dlie2:ee1:ie1:ai3ee4:keepi7ee";
    let mut decoder = Decoder::from_slice(doc);
    decoder.next_token().unwrap();
    assert_eq!(decoder.next_token().unwrap(), Some(field("skips")));
    assert_eq!(decoder.next_token().unwrap(), Some(Token::MapStart));
    decoder.skip_children().unwrap();
    assert_eq!(decoder.next_token().unwrap(), Some(field("keep")));
    assert_eq!(decoder.next_token().unwrap(), Some(Token::IntegerValue(7)));
    assert_eq!(decoder.next_token().unwrap(), Some(Token::MapEnd));
    assert_eq!(decoder.next_token().unwrap(), None);
}

// ── Truncation ────────────────────────────────────────────────────────────────

#[test]
fn unclosed_map_and_list_are_truncation() {
    let err = decode_tokens(b"d3:agei80e4:type5:human5:foodsl3:egg5:apple").unwrap_err();
    assert!(matches!(err, DecodeError::UnexpectedEndOfInput { .. }));
    assert!(err.is_truncation());
}

#[test]
fn closing_only_the_list_is_still_truncation() {
    assert!(matches!(
        decode_tokens(b"d3:agei80e4:type5:human5:foodsl3:egg5:applee"),
        Err(DecodeError::UnexpectedEndOfInput { .. })
    ));
}

#[test]
fn closing_everything_succeeds() {
    let tokens = decode_tokens(b"d3:agei80e4:type5:human5:foodsl3:egg5:appleee").unwrap();
    assert_eq!(tokens.len(), 11);
    assert_eq!(tokens.last(), Some(&Token::MapEnd));
}

// ── Unbalanced close ──────────────────────────────────────────────────────────

#[test]
fn lone_close_is_unbalanced() {
    assert!(matches!(
        decode_tokens(b"e"),
        Err(DecodeError::UnbalancedClose { offset: 0 })
    ));
}
