//! Entry points that bind a [`Decoder`] to a concrete input.
//!
//! ```text
//! ┌──────────────────────────┬───────────────────────┬──────────────────┐
//! │ Constructor              │ Reader type           │ Fails with       │
//! ├──────────────────────────┼───────────────────────┼──────────────────┤
//! │ Decoder::new(r)          │ any R: Read           │ (never)          │
//! │ Decoder::from_slice(b)   │ &[u8]                 │ (never)          │
//! │ Decoder::open(path)      │ BufReader<File>       │ Io               │
//! │ Decoder::from_latin1(s)  │ Cursor<Vec<u8>>       │ UnsupportedSource│
//! └──────────────────────────┴───────────────────────┴──────────────────┘
//! ```
//!
//! The format is byte-oriented. Text input is only accepted when it maps
//! one-to-one onto bytes, i.e. every char is in ISO-8859-1. There is no
//! constructor taking a character stream.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use crate::config::DecoderConfig;
use crate::decoder::Decoder;
use crate::error::DecodeError;

impl<'a> Decoder<&'a [u8]> {
    /// Decode from an in-memory buffer.
    #[must_use]
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl Decoder<BufReader<File>> {
    /// Decode a file through a buffered reader.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Io`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DecodeError> {
        Self::open_with_config(path, DecoderConfig::default())
    }

    /// # Errors
    ///
    /// [`DecodeError::Io`] if the file cannot be opened.
    pub fn open_with_config(
        path: impl AsRef<Path>,
        config: DecoderConfig,
    ) -> Result<Self, DecodeError> {
        let file = File::open(path)?;
        Ok(Self::with_config(BufReader::new(file), config))
    }
}

impl Decoder<Cursor<Vec<u8>>> {
    /// Decode text whose chars each stand for one byte (ISO-8859-1).
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnsupportedSource`] if any char is above U+00FF and
    /// so has no single-byte form.
    pub fn from_latin1(text: &str) -> Result<Self, DecodeError> {
        Ok(Self::new(Cursor::new(latin1_bytes(text)?)))
    }
}

fn latin1_bytes(text: &str) -> Result<Vec<u8>, DecodeError> {
    text.chars()
        .enumerate()
        .map(|(index, ch)| {
            u8::try_from(ch).map_err(|_| DecodeError::UnsupportedSource {
                reason: format!(
                    "char {ch:?} (U+{:04X}) at index {index} is outside ISO-8859-1",
                    u32::from(ch)
                ),
            })
        })
        .collect()
}
