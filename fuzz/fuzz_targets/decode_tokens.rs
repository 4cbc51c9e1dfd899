#![no_main]

use bencode_decoder::{decode_tokens, DecoderConfig, Decoder};
use bencode_encoder::encode_tokens;
use libfuzzer_sys::fuzz_target;

// Fuzz target: token decoder on arbitrary bytes.
//
// Must never panic, under either integer policy. Whenever the strict
// decoder accepts an input, re-encoding its tokens must reproduce the input
// exactly: strict acceptance implies canonical form.
fuzz_target!(|data: &[u8]| {
    if let Ok(tokens) = decode_tokens(data) {
        let encoded = encode_tokens(&tokens).expect("decoded tokens must re-encode");
        assert_eq!(encoded, data);
    }

    let lenient = Decoder::with_config(data, DecoderConfig::lenient());
    for token in lenient {
        if token.is_err() {
            break;
        }
    }
});
