//! Skipping values without materializing them.
//!
//! A string payload may legally contain `d`, `l`, `i` and `e`, so a skip
//! that scans raw bytes for sentinels miscounts depth. Everything here
//! advances through [`Decoder::step`], the same tokenizer that produces
//! ordinary tokens; string payloads land in the decoder's reused scratch
//! buffer and are dropped there.

use std::io::Read;

use tracing::debug;

use crate::decoder::Decoder;
use crate::error::DecodeError;

impl<R: Read> Decoder<R> {
    /// Skip everything inside the container opened by the most recent
    /// token, leaving its matching close as the current token.
    ///
    /// A no-op when the most recent token is a scalar, a field name or a
    /// close: their bytes were consumed when they were produced. Also a
    /// no-op once the decoder is finished.
    ///
    /// # Errors
    ///
    /// Any error the skipped tokens would have raised, e.g.
    /// [`DecodeError::UnexpectedEndOfInput`] if the container never closes.
    pub fn skip_children(&mut self) -> Result<(), DecodeError> {
        if self.is_finished()
            || !self
                .current_kind()
                .is_some_and(|kind| kind.opens().is_some())
        {
            return Ok(());
        }

        let start = Decoder::position(self);
        let mut depth = 1usize;
        let mut skipped = 0usize;
        while depth > 0 {
            let Some(kind) = self.step()? else {
                // `step` only reports exhaustion once the stack is empty,
                // which cannot happen while `depth` containers are open.
                return Err(DecodeError::UnexpectedEndOfInput {
                    offset: Decoder::position(self),
                });
            };
            skipped += 1;
            if kind.opens().is_some() {
                depth += 1;
            } else if kind.closes().is_some() {
                depth -= 1;
            }
        }

        debug!(
            tokens = skipped,
            bytes = Decoder::position(self) - start,
            "skipped subtree"
        );
        Ok(())
    }

    /// Advance past one whole value: a scalar, or a container and its
    /// subtree.
    ///
    /// Meant for dropping the value of an uninteresting field right after
    /// its [`Token::FieldName`](crate::Token::FieldName).
    ///
    /// # Returns
    ///
    /// `true` if a value was skipped, `false` if the enclosing container
    /// closed instead (its close is then the current token) or the document
    /// is exhausted.
    ///
    /// # Errors
    ///
    /// As [`skip_children`](Self::skip_children).
    pub fn skip_value(&mut self) -> Result<bool, DecodeError> {
        match self.step()? {
            None => Ok(false),
            Some(kind) if kind.closes().is_some() => Ok(false),
            Some(_) => {
                self.skip_children()?;
                Ok(true)
            }
        }
    }
}
