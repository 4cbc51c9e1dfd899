use bencode_types::TokenKind;
use bencode_wire::{IntegerReason, WireError};

/// Errors that can occur while decoding a document.
///
/// Every error is terminal: the format has no resynchronisation points,
/// so once an error is returned the decoder is closed and further calls
/// to [`Decoder::next_token`](crate::Decoder::next_token) yield `Ok(None)`.
///
/// ```text
///   DecodeError
///   ├── MalformedToken        ← byte that starts no token
///   ├── MalformedInteger      ← no digits, misplaced sign, policy violation
///   ├── IntegerOverflow       ← outside the i64 range
///   ├── UnexpectedEndOfInput  ← source ran dry inside a scalar or container
///   ├── UnbalancedClose       ← `e` with nothing open
///   ├── UnsupportedSource     ← input that is not a byte stream
///   ├── EmptyDocument         ← no bytes at all
///   ├── NonStringKey          ← map key position holds a non-string
///   ├── MissingValue          ← map closed right after a key
///   ├── DepthLimitExceeded    ← nesting deeper than the configured limit
///   ├── StringTooLong         ← length prefix above the configured limit
///   ├── TrailingData          ← bytes after a complete document
///   ├── UnexpectedToken       ← read_value / read_entry used out of place
///   └── Io(std::io::Error)    ← from the underlying reader
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed token: byte '{}' at offset {offset} starts no token", .byte.escape_ascii())]
    MalformedToken { byte: u8, offset: u64 },

    #[error("malformed integer at offset {offset}: {reason}")]
    MalformedInteger { offset: u64, reason: IntegerReason },

    #[error("integer at offset {offset} does not fit in a 64-bit signed value")]
    IntegerOverflow { offset: u64 },

    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEndOfInput { offset: u64 },

    #[error("close sentinel at offset {offset} has no matching open")]
    UnbalancedClose { offset: u64 },

    /// The input cannot be decoded as a byte stream, e.g. text containing
    /// characters outside ISO-8859-1.
    #[error("unsupported source: {reason}")]
    UnsupportedSource { reason: String },

    #[error("empty document")]
    EmptyDocument,

    /// Map keys must be length-prefixed strings.
    #[error("map key at offset {offset} is not a string")]
    NonStringKey { offset: u64 },

    /// A map was closed while its last key still waited for a value.
    #[error("map closed at offset {offset} before the value of its last key")]
    MissingValue { offset: u64 },

    #[error("nesting depth {depth} exceeds limit {limit}")]
    DepthLimitExceeded { depth: usize, limit: usize },

    #[error("string length {len} exceeds limit {limit}")]
    StringTooLong { len: u64, limit: u64 },

    /// Bytes follow a complete top-level value and the configuration does
    /// not allow them.
    #[error("unexpected data after the document at offset {offset}")]
    TrailingData { offset: u64 },

    /// The caller asked for a value where the stream holds something else,
    /// e.g. [`Decoder::read_value`](crate::Decoder::read_value) at a map
    /// key position.
    #[error("expected {expected} but found {found} at offset {offset}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
        offset: u64,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// `true` for failures caused by input that stopped too early, as
    /// opposed to input that is wrong.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::UnexpectedEndOfInput { .. } | Self::EmptyDocument)
    }
}

impl From<WireError> for DecodeError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::UnexpectedEof { offset } => Self::UnexpectedEndOfInput { offset },
            WireError::MalformedInteger { offset, reason } => {
                Self::MalformedInteger { offset, reason }
            }
            WireError::IntegerOverflow { offset } => Self::IntegerOverflow { offset },
            WireError::StringTooLong { len, limit } => Self::StringTooLong { len, limit },
            WireError::Io(e) => Self::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_errors_map_onto_flat_kinds() {
        let err: DecodeError = WireError::UnexpectedEof { offset: 9 }.into();
        assert!(matches!(err, DecodeError::UnexpectedEndOfInput { offset: 9 }));
        assert!(err.is_truncation());

        let err: DecodeError = WireError::IntegerOverflow { offset: 1 }.into();
        assert!(matches!(err, DecodeError::IntegerOverflow { offset: 1 }));
        assert!(!err.is_truncation());
    }

    #[test]
    fn malformed_token_display_escapes_byte() {
        let err = DecodeError::MalformedToken {
            byte: b'\n',
            offset: 0,
        };
        assert_eq!(
            err.to_string(),
            "malformed token: byte '\\n' at offset 0 starts no token"
        );
    }
}
