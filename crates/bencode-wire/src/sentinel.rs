//! Single-byte sentinels of the wire format.
//!
//! ```text
//! ┌────────┬──────────────────────────────────────────┐
//! │ Byte   │ Meaning                                  │
//! ├────────┼──────────────────────────────────────────┤
//! │ d      │ map open:     d <key value>* e           │
//! │ l      │ list open:    l <value>* e               │
//! │ i      │ integer open: i -?<digits> e             │
//! │ e      │ close (map, list or integer)             │
//! │ 0-9    │ string:       <len> : <len raw bytes>    │
//! └────────┴──────────────────────────────────────────┘
//! ```
//!
//! Every token is identified by its first byte, so one byte of lookahead
//! is all the decoder ever needs.

pub const MAP_START: u8 = b'd';
pub const LIST_START: u8 = b'l';
pub const INTEGER_START: u8 = b'i';
pub const END: u8 = b'e';
pub const LENGTH_SEPARATOR: u8 = b':';
pub const MINUS: u8 = b'-';

/// What a leading byte opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lead {
    MapStart,
    ListStart,
    Integer,
    End,
    /// An ASCII digit: the first byte of a string's length prefix.
    String,
}

/// Classify the first byte of a token. `None` means no token starts
/// with this byte.
#[must_use]
pub fn classify(byte: u8) -> Option<Lead> {
    match byte {
        MAP_START => Some(Lead::MapStart),
        LIST_START => Some(Lead::ListStart),
        INTEGER_START => Some(Lead::Integer),
        END => Some(Lead::End),
        b'0'..=b'9' => Some(Lead::String),
        _ => None,
    }
}
