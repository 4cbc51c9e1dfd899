#![no_main]

use bencode_decoder::{Decoder, Token, TokenKind};
use libfuzzer_sys::fuzz_target;

// Fuzz target: skip engine against the plain token stream.
//
// Decodes the input twice. The first pass collects every token. The second
// pass skips the children of every container it meets at depth one. Both
// passes must agree on success, and on success the second pass must see
// exactly the first pass's depth-zero and depth-one tokens and end at the
// same byte position.
fuzz_target!(|data: &[u8]| {
    let full: Result<Vec<Token>, _> = Decoder::from_slice(data).collect();

    let mut skipping = Decoder::from_slice(data);
    let mut shallow = Vec::new();
    let skipped = loop {
        match skipping.next_token() {
            Ok(Some(token)) => {
                let opens = matches!(token, Token::MapStart | Token::ListStart);
                shallow.push(token);
                if opens && skipping.depth() == 2 {
                    if let Err(e) = skipping.skip_children() {
                        break Err(e);
                    }
                    shallow.push(match skipping.current_kind() {
                        Some(TokenKind::MapEnd) => Token::MapEnd,
                        _ => Token::ListEnd,
                    });
                }
            }
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        }
    };

    match (full, skipped) {
        (Ok(tokens), Ok(())) => {
            let mut depth = 0usize;
            let expected: Vec<Token> = tokens
                .into_iter()
                .filter(|token| match token {
                    Token::MapStart | Token::ListStart => {
                        depth += 1;
                        depth <= 2
                    }
                    Token::MapEnd | Token::ListEnd => {
                        depth -= 1;
                        depth < 2
                    }
                    _ => depth <= 1,
                })
                .collect();
            assert_eq!(shallow, expected);
            assert_eq!(skipping.position(), data.len() as u64);
        }
        (Err(_), Err(_)) => {}
        (full, skipped) => panic!(
            "full decode and skipping decode disagree: {:?} vs {:?}",
            full.map(|t| t.len()),
            skipped
        ),
    }
});
