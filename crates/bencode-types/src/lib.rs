#![warn(clippy::pedantic)]

pub mod context;
pub mod token;
pub mod value;

pub use context::{ContainerKind, ContextStack, Frame, Slot};
pub use token::{Token, TokenKind};
pub use value::Value;
