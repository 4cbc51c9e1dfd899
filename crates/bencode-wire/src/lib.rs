#![warn(clippy::pedantic)]

pub mod error;
pub mod integer;
pub mod sentinel;
pub mod source;
pub mod string;

pub use error::{IntegerReason, WireError};
pub use integer::IntegerPolicy;
pub use source::PeekReader;
