use std::io::{self, Read, Write};

use crate::error::WireError;
use crate::integer::{self, IntegerPolicy};
use crate::source::PeekReader;

/// Read a complete length-prefixed string: `<len>:<len raw bytes>`.
///
/// The payload is appended to `out` verbatim. No encoding is assumed, so
/// payload bytes equal to `d`, `l`, `i`, `e` or `:` are just data.
///
/// # Returns
///
/// Total bytes consumed (prefix, separator and payload).
///
/// # Errors
///
/// - [`WireError::MalformedInteger`] / [`WireError::IntegerOverflow`] from
///   the length prefix.
/// - [`WireError::StringTooLong`] if the prefix exceeds `max_len`.
/// - [`WireError::UnexpectedEof`] if the source ends inside the prefix or
///   the payload.
pub fn read_string<R: Read>(
    src: &mut PeekReader<R>,
    policy: IntegerPolicy,
    max_len: usize,
    out: &mut Vec<u8>,
) -> Result<usize, WireError> {
    let (len, prefix) = integer::read_length(src, policy)?;

    let limit = max_len as u64;
    let len = match usize::try_from(len) {
        Ok(n) if len <= limit => n,
        _ => return Err(WireError::StringTooLong { len, limit }),
    };

    read_payload(src, len, out)?;
    Ok(prefix + len)
}

/// Read exactly `len` raw bytes into `out`.
///
/// The prefix and separator must already be consumed.
///
/// # Errors
///
/// [`WireError::UnexpectedEof`] if fewer than `len` bytes remain.
pub fn read_payload<R: Read>(
    src: &mut PeekReader<R>,
    len: usize,
    out: &mut Vec<u8>,
) -> Result<(), WireError> {
    src.read_exact_vec(len, out)
}

/// Write `bytes` as `<len>:<bytes>`.
///
/// # Returns
///
/// The number of bytes written.
///
/// # Errors
///
/// Propagates errors from `out`.
pub fn write_bytes<W: Write>(out: &mut W, bytes: &[u8]) -> io::Result<usize> {
    let prefix = integer::write_length(out, bytes.len())?;
    out.write_all(bytes)?;
    Ok(prefix + bytes.len())
}
