use std::fmt;

/// Errors raised by the byte-level primitives: the lookahead source,
/// the integer lexer and the length-prefixed string reader.
///
/// Offsets are absolute byte positions from the start of the source,
/// as reported by [`PeekReader::position`](crate::PeekReader::position).
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The source ran dry before a scalar was complete.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: u64 },

    /// A decimal run was not a valid integer literal.
    #[error("malformed integer at offset {offset}: {reason}")]
    MalformedInteger { offset: u64, reason: IntegerReason },

    /// The literal is well-formed but outside `i64::MIN..=i64::MAX`.
    ///
    /// `offset` points at the first byte of the literal.
    #[error("integer at offset {offset} does not fit in a 64-bit signed value")]
    IntegerOverflow { offset: u64 },

    /// A string length prefix exceeded the caller's limit.
    ///
    /// Checked before any payload byte is read, so an absurd prefix never
    /// turns into an absurd allocation.
    #[error("string length {len} exceeds limit {limit}")]
    StringTooLong { len: u64, limit: u64 },

    /// I/O error from the underlying reader or writer.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why an integer literal was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntegerReason {
    /// The terminator arrived before any digit.
    NoDigits,
    /// A `-` somewhere other than the first position.
    MisplacedSign,
    /// A `-` in front of a string length.
    NegativeLength,
    /// `i03e` or `03:` under the strict policy.
    LeadingZero,
    /// `i-0e` under the strict policy.
    NegativeZero,
    /// A byte that is neither a digit nor the expected terminator.
    UnexpectedByte(u8),
}

impl fmt::Display for IntegerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDigits => f.write_str("no digits"),
            Self::MisplacedSign => f.write_str("sign is only allowed in first position"),
            Self::NegativeLength => f.write_str("string length cannot be negative"),
            Self::LeadingZero => f.write_str("leading zero"),
            Self::NegativeZero => f.write_str("negative zero"),
            Self::UnexpectedByte(byte) => {
                write!(f, "unexpected byte '{}'", byte.escape_ascii())
            }
        }
    }
}
