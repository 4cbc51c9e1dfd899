use std::fmt;

use crate::context::ContainerKind;

/// One unit of the decoder's output stream.
///
/// Decoders produce tokens lazily, one per advance; encoders accept the
/// same sequence and write it back byte for byte.
///
/// ```text
///   d3:fooi1e3:barl1:xee
///
///   MapStart
///     FieldName("foo")
///     IntegerValue(1)
///     FieldName("bar")
///     ListStart
///       StringValue("x")
///     ListEnd
///   MapEnd
/// ```
///
/// Byte strings are carried as raw bytes. Whether they are text is the
/// consumer's call.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    MapStart,
    MapEnd,
    ListStart,
    ListEnd,
    /// A length-prefixed string in key position of a map.
    FieldName(Vec<u8>),
    IntegerValue(i64),
    /// A length-prefixed string anywhere but key position.
    StringValue(Vec<u8>),
}

/// Payload-free discriminant of a [`Token`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    MapStart,
    MapEnd,
    ListStart,
    ListEnd,
    FieldName,
    IntegerValue,
    StringValue,
}

impl Token {
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::MapStart => TokenKind::MapStart,
            Self::MapEnd => TokenKind::MapEnd,
            Self::ListStart => TokenKind::ListStart,
            Self::ListEnd => TokenKind::ListEnd,
            Self::FieldName(_) => TokenKind::FieldName,
            Self::IntegerValue(_) => TokenKind::IntegerValue,
            Self::StringValue(_) => TokenKind::StringValue,
        }
    }
}

impl TokenKind {
    /// The container this token opens, if any.
    #[must_use]
    pub fn opens(self) -> Option<ContainerKind> {
        match self {
            Self::MapStart => Some(ContainerKind::Map),
            Self::ListStart => Some(ContainerKind::List),
            _ => None,
        }
    }

    /// The container this token closes, if any.
    #[must_use]
    pub fn closes(self) -> Option<ContainerKind> {
        match self {
            Self::MapEnd => Some(ContainerKind::Map),
            Self::ListEnd => Some(ContainerKind::List),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MapStart => f.write_str("MapStart"),
            Self::MapEnd => f.write_str("MapEnd"),
            Self::ListStart => f.write_str("ListStart"),
            Self::ListEnd => f.write_str("ListEnd"),
            Self::FieldName(bytes) => write!(f, "FieldName(\"{}\")", bytes.escape_ascii()),
            Self::IntegerValue(value) => write!(f, "IntegerValue({value})"),
            Self::StringValue(bytes) => write!(f, "StringValue(\"{}\")", bytes.escape_ascii()),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
