use std::io::{self, Read};

use crate::error::WireError;

/// Byte source with exactly one byte of lookahead.
///
/// `PeekReader` wraps any [`Read`] and lets the caller look at the next
/// byte before deciding what it means:
///
/// ```text
///   peek_byte()  ──►  Some(b)      byte is held, nothing committed
///       │
///       ├── consume()              commit: position += 1
///       └── (do nothing)           push back: next peek returns b again
/// ```
///
/// No buffering policy is imposed beyond the single held byte. Wrap slow
/// readers (files, sockets) in a [`std::io::BufReader`] first.
pub struct PeekReader<R> {
    inner: R,
    peeked: Option<u8>,
    position: u64,
}

impl<R: Read> PeekReader<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            peeked: None,
            position: 0,
        }
    }

    /// Look at the next byte without committing to it.
    ///
    /// Repeated calls return the same byte until [`consume`](Self::consume)
    /// is called. `Ok(None)` means the source is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates read errors from the inner reader, except
    /// [`io::ErrorKind::Interrupted`] which is retried.
    pub fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        if self.peeked.is_none() {
            self.peeked = self.fill_one()?;
        }
        Ok(self.peeked)
    }

    /// Commit the byte returned by the last [`peek_byte`](Self::peek_byte).
    ///
    /// A no-op when nothing is held.
    pub fn consume(&mut self) {
        if self.peeked.take().is_some() {
            self.position += 1;
        }
    }

    /// Peek and commit in one step.
    ///
    /// # Errors
    ///
    /// Same as [`peek_byte`](Self::peek_byte).
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek_byte()?;
        self.consume();
        Ok(byte)
    }

    /// Append exactly `len` bytes from the source to `out`.
    ///
    /// Short reads from the inner reader are looped until `len` bytes have
    /// arrived or the source is exhausted. `out` grows as data arrives; it
    /// is not resized to `len` up front.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] if the source ends first. The bytes
    ///   that did arrive are left in `out`.
    /// - [`WireError::Io`] on read failure.
    pub fn read_exact_vec(&mut self, len: usize, out: &mut Vec<u8>) -> Result<(), WireError> {
        let mut wanted = len;
        if wanted > 0 {
            if let Some(byte) = self.peeked.take() {
                out.push(byte);
                self.position += 1;
                wanted -= 1;
            }
        }

        let got = (&mut self.inner).take(wanted as u64).read_to_end(out)?;
        self.position += got as u64;

        if got < wanted {
            return Err(WireError::UnexpectedEof {
                offset: self.position,
            });
        }
        Ok(())
    }

    /// Number of bytes committed so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Return the inner reader. A byte held by an uncommitted peek is lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill_one(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out at most `chunk` bytes per `read` call.
    struct Trickle<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.chunk.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    /// Fails every other read with `Interrupted`.
    struct Flaky<'a> {
        data: &'a [u8],
        interrupt: bool,
    }

    impl Read for Flaky<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::ErrorKind::Interrupted.into());
            }
            self.data.read(buf)
        }
    }

    #[test]
    fn peek_is_idempotent_until_consumed() {
        let mut src = PeekReader::new(&b"de"[..]);
        assert_eq!(src.peek_byte().unwrap(), Some(b'd'));
        assert_eq!(src.peek_byte().unwrap(), Some(b'd'));
        assert_eq!(src.position(), 0);

        src.consume();
        assert_eq!(src.position(), 1);
        assert_eq!(src.peek_byte().unwrap(), Some(b'e'));
    }

    #[test]
    fn consume_without_peek_is_noop() {
        let mut src = PeekReader::new(&b"x"[..]);
        src.consume();
        assert_eq!(src.position(), 0);
        assert_eq!(src.next_byte().unwrap(), Some(b'x'));
        assert_eq!(src.next_byte().unwrap(), None);
        assert_eq!(src.position(), 1);
    }

    #[test]
    fn read_exact_vec_includes_peeked_byte() {
        let mut src = PeekReader::new(&b"abcd"[..]);
        assert_eq!(src.peek_byte().unwrap(), Some(b'a'));

        let mut out = Vec::new();
        src.read_exact_vec(3, &mut out).unwrap();
        assert_eq!(out, b"abc");
        assert_eq!(src.position(), 3);
        assert_eq!(src.next_byte().unwrap(), Some(b'd'));
    }

    #[test]
    fn read_exact_vec_loops_short_reads() {
        let data = b"0123456789abcdefghij";
        let mut src = PeekReader::new(Trickle {
            data,
            chunk: 3,
        });

        let mut out = Vec::new();
        src.read_exact_vec(data.len(), &mut out).unwrap();
        assert_eq!(out, data);
        assert_eq!(src.next_byte().unwrap(), None);
    }

    #[test]
    fn read_exact_vec_reports_truncation_offset() {
        let mut src = PeekReader::new(&b"abc"[..]);
        let mut out = Vec::new();
        let err = src.read_exact_vec(5, &mut out).unwrap_err();
        assert!(matches!(err, WireError::UnexpectedEof { offset: 3 }));
        assert_eq!(out, b"abc");
    }

    #[test]
    fn zero_length_read_leaves_peek_alone() {
        let mut src = PeekReader::new(&b"e"[..]);
        src.peek_byte().unwrap();
        let mut out = Vec::new();
        src.read_exact_vec(0, &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(src.next_byte().unwrap(), Some(b'e'));
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let mut src = PeekReader::new(Flaky {
            data: b"li1ee",
            interrupt: false,
        });
        let mut seen = Vec::new();
        while let Some(byte) = src.next_byte().unwrap() {
            seen.push(byte);
        }
        assert_eq!(seen, b"li1ee");
    }
}
