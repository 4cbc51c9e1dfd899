#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod skip;
pub mod source;
pub mod value;

pub use bencode_types::{Token, TokenKind, Value};
pub use bencode_wire::IntegerPolicy;
pub use config::DecoderConfig;
pub use decoder::Decoder;
pub use error::DecodeError;
pub use value::{decode_tokens, decode_value};
