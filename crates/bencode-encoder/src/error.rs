use bencode_types::{ContainerKind, Slot, TokenKind};

/// Errors that can occur while encoding a token sequence.
///
/// The encoder refuses exactly the sequences a decoder would refuse to
/// produce, so every successful encoding decodes back to the same tokens.
///
/// ```text
///   EncodeError
///   ├── UnexpectedToken      ← token not legal at the current slot
///   ├── MismatchedClose      ← MapEnd for a list or ListEnd for a map
///   ├── UnbalancedClose      ← close with nothing open
///   ├── MissingValue         ← map closed right after a key
///   ├── DocumentComplete     ← token after the top-level value
///   ├── Unfinished           ← finish() with containers still open
///   ├── EmptyDocument        ← finish() before any token
///   └── Io(std::io::Error)   ← from the underlying writer
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("{token} is not allowed at {context}")]
    UnexpectedToken { token: TokenKind, context: Slot },

    #[error("close of a {found:?} while the innermost open container is a {expected:?}")]
    MismatchedClose {
        expected: ContainerKind,
        found: ContainerKind,
    },

    #[error("close with no open container")]
    UnbalancedClose,

    #[error("map closed before the value of its last key")]
    MissingValue,

    #[error("the top-level value is already complete")]
    DocumentComplete,

    #[error("{open} container(s) still open")]
    Unfinished { open: usize },

    #[error("no value was written")]
    EmptyDocument,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
