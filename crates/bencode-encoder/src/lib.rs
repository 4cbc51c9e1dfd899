#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;

pub use bencode_types::{Token, Value};
pub use encoder::{Encoder, encode_tokens, encode_value};
pub use error::EncodeError;
