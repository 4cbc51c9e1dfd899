use std::borrow::Cow;

use crate::token::Token;

/// An in-memory document tree.
///
/// `Dict` is a list of entries rather than a map: entries keep exactly the
/// order they had on the wire (duplicates included), which is what makes
/// `encode(decode(bytes)) == bytes` hold for every well-formed input.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Integer(i64),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Dict(Vec<(Vec<u8>, Value)>),
}

impl Value {
    /// First value stored under `key` in a `Dict`.
    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        match self {
            Self::Dict(entries) => entries
                .iter()
                .find(|(k, _)| k.as_slice() == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    /// UTF-8 view of a byte string. `None` for other variants or invalid
    /// UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Display text of a byte string, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn to_text_lossy(&self) -> Option<Cow<'_, str>> {
        self.as_bytes().map(String::from_utf8_lossy)
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dict(&self) -> Option<&[(Vec<u8>, Value)]> {
        match self {
            Self::Dict(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    /// Flatten into the token sequence a decoder would produce for this
    /// value.
    #[must_use]
    pub fn tokens(&self) -> Vec<Token> {
        let mut out = Vec::new();
        self.push_tokens(&mut out);
        out
    }

    fn push_tokens(&self, out: &mut Vec<Token>) {
        match self {
            Self::Integer(value) => out.push(Token::IntegerValue(*value)),
            Self::Bytes(bytes) => out.push(Token::StringValue(bytes.clone())),
            Self::List(items) => {
                out.push(Token::ListStart);
                for item in items {
                    item.push_tokens(out);
                }
                out.push(Token::ListEnd);
            }
            Self::Dict(entries) => {
                out.push(Token::MapStart);
                for (key, value) in entries {
                    out.push(Token::FieldName(key.clone()));
                    value.push_tokens(out);
                }
                out.push(Token::MapEnd);
            }
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Bytes(text.as_bytes().to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}
