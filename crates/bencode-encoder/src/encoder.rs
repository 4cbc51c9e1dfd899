use std::io::Write;

use bencode_types::{ContainerKind, ContextStack, Slot, Token, TokenKind, Value};
use bencode_wire::sentinel::{END, LIST_START, MAP_START};
use bencode_wire::{integer, string};
use tracing::{debug, trace};

use crate::error::EncodeError;

/// Streaming encoder for the token model.
///
/// Accepts the same [`Token`]s a decoder produces and writes their
/// canonical wire form straight to `W`. Nesting is tracked with the same
/// [`ContextStack`] the decoder uses, so the slot rules match exactly:
///
/// ```text
/// ┌─────────────┬────────────────────────────────────────────┐
/// │ Slot        │ Accepted tokens                            │
/// ├─────────────┼────────────────────────────────────────────┤
/// │ TopLevel    │ MapStart, ListStart, IntegerValue, String  │
/// │ Key         │ FieldName, MapEnd                          │
/// │ MapValue    │ MapStart, ListStart, IntegerValue, String  │
/// │ ListElement │ MapStart, ListStart, IntegerValue, String, │
/// │             │ ListEnd                                    │
/// └─────────────┴────────────────────────────────────────────┘
/// ```
///
/// Output is canonical: integers carry no leading zeros and no `-0`, so
/// decoding a document and re-encoding its tokens reproduces the input
/// byte for byte.
///
/// # Usage
///
/// ```rust
/// use bencode_encoder::Encoder;
///
/// let mut enc = Encoder::new(Vec::new());
/// enc.begin_map()?
///     .field(b"age")?
///     .integer(80)?
///     .field(b"type")?
///     .bytes(b"human")?
///     .end()?;
/// assert_eq!(enc.finish()?, b"d3:agei80e4:type5:humane");
/// # Ok::<(), bencode_encoder::EncodeError>(())
/// ```
pub struct Encoder<W> {
    out: W,
    stack: ContextStack,
    started: bool,
    complete: bool,
    written: u64,
}

impl<W: Write> Encoder<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            stack: ContextStack::new(),
            started: false,
            complete: false,
            written: 0,
        }
    }

    /// Write one token.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::UnexpectedToken`] if the token is illegal at the
    ///   current slot.
    /// - [`EncodeError::MismatchedClose`], [`EncodeError::UnbalancedClose`]
    ///   or [`EncodeError::MissingValue`] for a bad close.
    /// - [`EncodeError::DocumentComplete`] after the top-level value.
    /// - [`EncodeError::Io`] from the writer.
    pub fn write_token(&mut self, token: &Token) -> Result<&mut Self, EncodeError> {
        match token {
            Token::MapStart => self.open(ContainerKind::Map),
            Token::ListStart => self.open(ContainerKind::List),
            Token::MapEnd => self.close(Some(ContainerKind::Map)),
            Token::ListEnd => self.close(Some(ContainerKind::List)),
            Token::FieldName(name) => self.field(name),
            Token::IntegerValue(value) => self.integer(*value),
            Token::StringValue(bytes) => self.bytes(bytes),
        }
    }

    /// # Errors
    ///
    /// As [`write_token`](Self::write_token).
    pub fn begin_map(&mut self) -> Result<&mut Self, EncodeError> {
        self.open(ContainerKind::Map)
    }

    /// # Errors
    ///
    /// As [`write_token`](Self::write_token).
    pub fn begin_list(&mut self) -> Result<&mut Self, EncodeError> {
        self.open(ContainerKind::List)
    }

    /// Close the innermost container, whichever kind it is.
    ///
    /// # Errors
    ///
    /// As [`write_token`](Self::write_token).
    pub fn end(&mut self) -> Result<&mut Self, EncodeError> {
        self.close(None)
    }

    /// Write a map key.
    ///
    /// # Errors
    ///
    /// As [`write_token`](Self::write_token).
    pub fn field(&mut self, name: &[u8]) -> Result<&mut Self, EncodeError> {
        let slot = self.admit()?;
        if slot != Slot::Key {
            return Err(EncodeError::UnexpectedToken {
                token: TokenKind::FieldName,
                context: slot,
            });
        }
        self.written += string::write_bytes(&mut self.out, name)? as u64;
        self.stack.toggle_expectation();
        self.produced(TokenKind::FieldName);
        Ok(self)
    }

    /// # Errors
    ///
    /// As [`write_token`](Self::write_token).
    pub fn integer(&mut self, value: i64) -> Result<&mut Self, EncodeError> {
        let slot = self.admit_value(TokenKind::IntegerValue)?;
        self.written += integer::write_integer(&mut self.out, value)? as u64;
        self.after_value(slot, TokenKind::IntegerValue);
        Ok(self)
    }

    /// Write a byte string value.
    ///
    /// # Errors
    ///
    /// As [`write_token`](Self::write_token).
    pub fn bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, EncodeError> {
        let slot = self.admit_value(TokenKind::StringValue)?;
        self.written += string::write_bytes(&mut self.out, bytes)? as u64;
        self.after_value(slot, TokenKind::StringValue);
        Ok(self)
    }

    /// Write a whole [`Value`] tree.
    ///
    /// # Errors
    ///
    /// As [`write_token`](Self::write_token).
    pub fn write_value(&mut self, value: &Value) -> Result<&mut Self, EncodeError> {
        match value {
            Value::Integer(n) => {
                self.integer(*n)?;
            }
            Value::Bytes(bytes) => {
                self.bytes(bytes)?;
            }
            Value::List(items) => {
                self.begin_list()?;
                for item in items {
                    self.write_value(item)?;
                }
                self.end()?;
            }
            Value::Dict(entries) => {
                self.begin_map()?;
                for (key, item) in entries {
                    self.field(key)?;
                    self.write_value(item)?;
                }
                self.end()?;
            }
        }
        Ok(self)
    }

    /// Number of containers currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Flush and hand back the writer.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::EmptyDocument`] if nothing was written.
    /// - [`EncodeError::Unfinished`] if containers are still open.
    /// - [`EncodeError::Io`] if flushing fails.
    pub fn finish(mut self) -> Result<W, EncodeError> {
        if !self.started {
            return Err(EncodeError::EmptyDocument);
        }
        if !self.stack.is_empty() {
            return Err(EncodeError::Unfinished {
                open: self.stack.depth(),
            });
        }
        self.out.flush()?;
        debug!(bytes = self.written, "encoder finished");
        Ok(self.out)
    }

    fn open(&mut self, kind: ContainerKind) -> Result<&mut Self, EncodeError> {
        let token = match kind {
            ContainerKind::Map => TokenKind::MapStart,
            ContainerKind::List => TokenKind::ListStart,
        };
        self.admit_value(token)?;
        let sentinel = match kind {
            ContainerKind::Map => MAP_START,
            ContainerKind::List => LIST_START,
        };
        self.out.write_all(&[sentinel])?;
        self.written += 1;
        // The parent's value slot is filled when this container closes.
        self.stack.push(kind);
        self.produced(token);
        Ok(self)
    }

    fn close(&mut self, wanted: Option<ContainerKind>) -> Result<&mut Self, EncodeError> {
        if self.complete {
            return Err(EncodeError::DocumentComplete);
        }
        if self.stack.slot() == Slot::MapValue {
            return Err(EncodeError::MissingValue);
        }
        let open = self
            .stack
            .current_kind()
            .ok_or(EncodeError::UnbalancedClose)?;
        if let Some(found) = wanted.filter(|kind| *kind != open) {
            return Err(EncodeError::MismatchedClose {
                expected: open,
                found,
            });
        }

        self.out.write_all(&[END])?;
        self.written += 1;
        self.stack.pop();
        if self.stack.is_expecting_value() {
            self.stack.toggle_expectation();
        }
        self.produced(match open {
            ContainerKind::Map => TokenKind::MapEnd,
            ContainerKind::List => TokenKind::ListEnd,
        });
        Ok(self)
    }

    /// Check that the document accepts another token and return the slot
    /// it will fill.
    fn admit(&self) -> Result<Slot, EncodeError> {
        if self.complete {
            return Err(EncodeError::DocumentComplete);
        }
        Ok(self.stack.slot())
    }

    /// As [`admit`](Self::admit), additionally refusing key positions.
    fn admit_value(&self, token: TokenKind) -> Result<Slot, EncodeError> {
        let slot = self.admit()?;
        if slot.is_key() {
            return Err(EncodeError::UnexpectedToken {
                token,
                context: slot,
            });
        }
        Ok(slot)
    }

    fn after_value(&mut self, slot: Slot, token: TokenKind) {
        if slot == Slot::MapValue {
            self.stack.toggle_expectation();
        }
        self.produced(token);
    }

    fn produced(&mut self, token: TokenKind) {
        self.started = true;
        if self.stack.is_empty() {
            self.complete = true;
        }
        trace!(?token, depth = self.stack.depth(), "encoded token");
    }
}

/// Encode a token sequence into a fresh buffer.
///
/// # Errors
///
/// Any [`EncodeError`], including [`EncodeError::Unfinished`] if the
/// sequence leaves containers open.
pub fn encode_tokens<'a, I>(tokens: I) -> Result<Vec<u8>, EncodeError>
where
    I: IntoIterator<Item = &'a Token>,
{
    let mut enc = Encoder::new(Vec::new());
    for token in tokens {
        enc.write_token(token)?;
    }
    enc.finish()
}

/// Encode a [`Value`] tree into a fresh buffer.
///
/// # Errors
///
/// Only [`EncodeError::Io`], which a `Vec` never raises in practice.
pub fn encode_value(value: &Value) -> Result<Vec<u8>, EncodeError> {
    let mut enc = Encoder::new(Vec::new());
    enc.write_value(value)?;
    enc.finish()
}
