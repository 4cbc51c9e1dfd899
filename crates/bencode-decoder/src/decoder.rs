use std::io::Read;
use std::mem;

use bencode_types::{ContainerKind, ContextStack, Slot, Token, TokenKind};
use bencode_wire::sentinel::{self, Lead};
use bencode_wire::{PeekReader, integer, string};
use tracing::{debug, trace};

use crate::config::DecoderConfig;
use crate::error::DecodeError;

/// Pull-based token decoder.
///
/// The decoder owns one byte source for its whole life and turns it into
/// a stream of [`Token`]s, one per call to [`next_token`](Self::next_token).
/// It never reads more than one byte past the end of the current token,
/// and never backtracks beyond that single byte.
///
/// ```text
///   PeekReader ──► Decoder::step ──► Token ──► consumer
///                     │                          │
///                     ├─ integer::read_integer   └─ skip_children()
///                     ├─ string::read_string          │
///                     └─ ContextStack ◄───────────────┘
/// ```
///
/// Whether a length-prefixed string is a `FieldName` or a `StringValue` is
/// decided by the innermost open container alone (see [`Slot`]).
///
/// # Lifecycle
///
/// ```text
///   Start ──token──► Active ──last close──► Complete ──next──► Done
///     │                 │                      │
///     └──────error──────┴────────error─────────┴──────────► Failed
/// ```
///
/// `Done` and `Failed` both answer `Ok(None)`. The byte source is released
/// exactly once, when the decoder is dropped, closed or unwrapped with
/// [`into_inner`](Self::into_inner).
///
/// # Example
///
/// ```rust
/// use bencode_decoder::{Decoder, Token};
///
/// let mut decoder = Decoder::from_slice(b"d3:fooi1ee");
/// assert_eq!(decoder.next_token().unwrap(), Some(Token::MapStart));
/// assert_eq!(decoder.next_token().unwrap(), Some(Token::FieldName(b"foo".to_vec())));
/// assert_eq!(decoder.next_token().unwrap(), Some(Token::IntegerValue(1)));
/// assert_eq!(decoder.next_token().unwrap(), Some(Token::MapEnd));
/// assert_eq!(decoder.next_token().unwrap(), None);
/// ```
pub struct Decoder<R> {
    src: PeekReader<R>,
    stack: ContextStack,
    config: DecoderConfig,
    state: State,
    /// Kind of the most recently produced token.
    last: Option<TokenKind>,
    /// Payload of the last string token, until it is materialized.
    scratch: Vec<u8>,
    /// Value of the last integer token.
    integer: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// No token produced yet.
    Start,
    /// Inside the top-level value.
    Active,
    /// The top-level value is complete; the next call checks what follows.
    Complete,
    Done,
    Failed,
}

impl<R: Read> Decoder<R> {
    /// Create a decoder with the default configuration.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, DecoderConfig::default())
    }

    #[must_use]
    pub fn with_config(reader: R, config: DecoderConfig) -> Self {
        Self {
            src: PeekReader::new(reader),
            stack: ContextStack::new(),
            config,
            state: State::Start,
            last: None,
            scratch: Vec::new(),
            integer: 0,
        }
    }

    /// Produce the next token.
    ///
    /// Returns `Ok(None)` once the top-level value has been fully read
    /// (and, unless trailing data is allowed, the source is confirmed to be
    /// exhausted), or after a previous error.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`]. All errors are terminal.
    pub fn next_token(&mut self) -> Result<Option<Token>, DecodeError> {
        let Some(kind) = self.step()? else {
            return Ok(None);
        };
        Ok(Some(self.materialize(kind)))
    }

    /// Kind of the most recently produced token.
    #[must_use]
    pub fn current_kind(&self) -> Option<TokenKind> {
        self.last
    }

    /// Number of containers currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Bytes consumed from the source so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.src.position()
    }

    /// `true` once the decoder will produce no more tokens.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Done | State::Failed)
    }

    /// Release the byte source.
    pub fn close(self) {
        debug!(
            position = self.src.position(),
            finished = self.is_finished(),
            "decoder closed"
        );
    }

    /// Release the decoder and hand back the byte source.
    ///
    /// With `allow_trailing_data` set, the reader is positioned right after
    /// the last byte of the document.
    pub fn into_inner(self) -> R {
        self.src.into_inner()
    }

    /// Advance by one token, leaving any payload in `self.scratch` /
    /// `self.integer`.
    ///
    /// Shared by [`next_token`](Self::next_token), which materializes the
    /// payload, and the skip engine, which drops it. Either way the bytes
    /// are read exactly once.
    pub(crate) fn step(&mut self) -> Result<Option<TokenKind>, DecodeError> {
        match self.state {
            State::Done | State::Failed => return Ok(None),
            State::Complete => {
                return match self.finish_document() {
                    Ok(()) => Ok(None),
                    Err(err) => Err(self.fail(err)),
                };
            }
            State::Start | State::Active => {}
        }

        match self.advance() {
            Ok(kind) => {
                self.last = Some(kind);
                self.state = if self.stack.is_empty() {
                    State::Complete
                } else {
                    State::Active
                };
                trace!(
                    ?kind,
                    depth = self.stack.depth(),
                    offset = self.src.position(),
                    "token"
                );
                Ok(Some(kind))
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn advance(&mut self) -> Result<TokenKind, DecodeError> {
        let offset = self.src.position();
        let Some(byte) = self.src.peek_byte()? else {
            return Err(if self.state == State::Start {
                DecodeError::EmptyDocument
            } else {
                DecodeError::UnexpectedEndOfInput { offset }
            });
        };

        let slot = self.stack.slot();
        let Some(lead) = sentinel::classify(byte) else {
            return Err(DecodeError::MalformedToken { byte, offset });
        };

        if slot.is_key() && !matches!(lead, Lead::String | Lead::End) {
            return Err(DecodeError::NonStringKey { offset });
        }

        match lead {
            Lead::MapStart => self.open_container(ContainerKind::Map),
            Lead::ListStart => self.open_container(ContainerKind::List),
            Lead::Integer => {
                self.src.consume();
                let (value, _) = integer::read_integer(&mut self.src, self.config.integer_policy)?;
                self.integer = value;
                if slot == Slot::MapValue {
                    self.stack.toggle_expectation();
                }
                Ok(TokenKind::IntegerValue)
            }
            Lead::End => {
                self.src.consume();
                self.close_container(slot, offset)
            }
            Lead::String => {
                self.scratch.clear();
                string::read_string(
                    &mut self.src,
                    self.config.integer_policy,
                    self.config.max_string_len,
                    &mut self.scratch,
                )?;
                Ok(match slot {
                    Slot::Key => {
                        self.stack.toggle_expectation();
                        TokenKind::FieldName
                    }
                    Slot::MapValue => {
                        self.stack.toggle_expectation();
                        TokenKind::StringValue
                    }
                    Slot::ListElement | Slot::TopLevel => TokenKind::StringValue,
                })
            }
        }
    }

    fn open_container(&mut self, kind: ContainerKind) -> Result<TokenKind, DecodeError> {
        let depth = self.stack.depth() + 1;
        if depth > self.config.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                depth,
                limit: self.config.max_depth,
            });
        }
        self.src.consume();
        self.stack.push(kind);
        Ok(match kind {
            ContainerKind::Map => TokenKind::MapStart,
            ContainerKind::List => TokenKind::ListStart,
        })
    }

    fn close_container(&mut self, slot: Slot, offset: u64) -> Result<TokenKind, DecodeError> {
        if slot == Slot::MapValue {
            return Err(DecodeError::MissingValue { offset });
        }
        let kind = self
            .stack
            .pop()
            .ok_or(DecodeError::UnbalancedClose { offset })?;

        // The closed container was the value of the parent's pending key.
        if self.stack.is_expecting_value() {
            self.stack.toggle_expectation();
        }

        Ok(match kind {
            ContainerKind::Map => TokenKind::MapEnd,
            ContainerKind::List => TokenKind::ListEnd,
        })
    }

    /// Called on the first advance after the top-level value closed.
    fn finish_document(&mut self) -> Result<(), DecodeError> {
        if !self.config.allow_trailing_data {
            let offset = self.src.position();
            if self.src.peek_byte()?.is_some() {
                return Err(DecodeError::TrailingData { offset });
            }
        }
        self.state = State::Done;
        Ok(())
    }

    pub(crate) fn fail(&mut self, err: DecodeError) -> DecodeError {
        debug!(
            error = %err,
            depth = self.stack.depth(),
            offset = self.src.position(),
            "decode failed"
        );
        self.state = State::Failed;
        err
    }

    fn materialize(&mut self, kind: TokenKind) -> Token {
        match kind {
            TokenKind::MapStart => Token::MapStart,
            TokenKind::MapEnd => Token::MapEnd,
            TokenKind::ListStart => Token::ListStart,
            TokenKind::ListEnd => Token::ListEnd,
            TokenKind::IntegerValue => Token::IntegerValue(self.integer),
            TokenKind::FieldName => Token::FieldName(mem::take(&mut self.scratch)),
            TokenKind::StringValue => Token::StringValue(mem::take(&mut self.scratch)),
        }
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<Token, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
