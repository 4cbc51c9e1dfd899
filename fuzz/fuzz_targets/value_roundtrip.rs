#![no_main]

use arbitrary::Arbitrary;
use bencode_decoder::{decode_tokens, decode_value};
use bencode_encoder::encode_value;
use bencode_types::Value;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Integer(i64),
    Bytes(Vec<u8>),
    List(Vec<FuzzValue>),
    Dict(Vec<(Vec<u8>, FuzzValue)>),
}

/// Stays well inside the decoder's default depth limit.
const MAX_DEPTH: usize = 64;

fn to_value(fuzz: FuzzValue, depth: usize) -> Value {
    match fuzz {
        FuzzValue::Integer(n) => Value::Integer(n),
        FuzzValue::Bytes(b) => Value::Bytes(b),
        FuzzValue::List(_) | FuzzValue::Dict(_) if depth >= MAX_DEPTH => Value::Integer(0),
        FuzzValue::List(items) => {
            Value::List(items.into_iter().map(|v| to_value(v, depth + 1)).collect())
        }
        FuzzValue::Dict(entries) => Value::Dict(
            entries
                .into_iter()
                .map(|(k, v)| (k, to_value(v, depth + 1)))
                .collect(),
        ),
    }
}

// Fuzz target: Value → encode → decode roundtrip.
//
// Any value tree must encode, decode back to an equal tree, and flatten to
// the same token stream the decoder produces.
fuzz_target!(|input: FuzzValue| {
    let value = to_value(input, 0);
    let bytes = encode_value(&value).expect("value trees always encode");

    let decoded = decode_value(&bytes).expect("encoded value must decode");
    assert_eq!(decoded, value);

    let tokens = decode_tokens(&bytes).expect("encoded value must tokenize");
    assert_eq!(tokens, value.tokens());
});
