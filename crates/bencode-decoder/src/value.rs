use std::io::Read;

use bencode_types::{Token, TokenKind, Value};

use crate::decoder::Decoder;
use crate::error::DecodeError;

impl<R: Read> Decoder<R> {
    /// Read the next complete value into a [`Value`] tree.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the enclosing container closes instead (its close is
    /// consumed) or the document is exhausted.
    ///
    /// # Errors
    ///
    /// Any decode error, or [`DecodeError::UnexpectedToken`] when the
    /// decoder sits at a map key position. Use
    /// [`read_entry`](Self::read_entry) there.
    pub fn read_value(&mut self) -> Result<Option<Value>, DecodeError> {
        match self.next_token()? {
            None => Ok(None),
            Some(token) => self.value_from(token),
        }
    }

    /// Read one `key, value` pair of the innermost map.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the map closes.
    ///
    /// # Errors
    ///
    /// Any decode error, or [`DecodeError::UnexpectedToken`] when the
    /// decoder is not at a map key position.
    pub fn read_entry(&mut self) -> Result<Option<(Vec<u8>, Value)>, DecodeError> {
        match self.next_token()? {
            None | Some(Token::MapEnd) => Ok(None),
            Some(Token::FieldName(key)) => match self.read_value()? {
                Some(value) => Ok(Some((key, value))),
                // A key is always followed by a value or a MissingValue error.
                None => Err(self.misuse("a value", TokenKind::MapEnd)),
            },
            Some(other) => Err(self.misuse("a field name", other.kind())),
        }
    }

    fn value_from(&mut self, token: Token) -> Result<Option<Value>, DecodeError> {
        let value = match token {
            Token::IntegerValue(n) => Value::Integer(n),
            Token::StringValue(bytes) => Value::Bytes(bytes),
            Token::ListStart => {
                let mut items = Vec::new();
                while let Some(item) = self.read_value()? {
                    items.push(item);
                }
                Value::List(items)
            }
            Token::MapStart => {
                let mut entries = Vec::new();
                while let Some(entry) = self.read_entry()? {
                    entries.push(entry);
                }
                Value::Dict(entries)
            }
            Token::MapEnd | Token::ListEnd => return Ok(None),
            Token::FieldName(_) => return Err(self.misuse("a value", TokenKind::FieldName)),
        };
        Ok(Some(value))
    }

    fn misuse(&mut self, expected: &'static str, found: TokenKind) -> DecodeError {
        let offset = Decoder::position(self);
        self.fail(DecodeError::UnexpectedToken {
            expected,
            found,
            offset,
        })
    }
}

/// Decode a whole in-memory document into its token sequence.
///
/// # Errors
///
/// The first [`DecodeError`] encountered, including
/// [`DecodeError::TrailingData`] for bytes after the document.
pub fn decode_tokens(bytes: &[u8]) -> Result<Vec<Token>, DecodeError> {
    Decoder::from_slice(bytes).collect()
}

/// Decode a whole in-memory document into a [`Value`] tree.
///
/// # Errors
///
/// As [`decode_tokens`].
pub fn decode_value(bytes: &[u8]) -> Result<Value, DecodeError> {
    let mut decoder = Decoder::from_slice(bytes);
    let value = decoder.read_value()?.ok_or(DecodeError::EmptyDocument)?;
    // Runs the trailing-data check.
    decoder.next_token()?;
    Ok(value)
}
