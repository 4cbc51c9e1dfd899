use std::io::{self, Read, Write};

use crate::error::{IntegerReason, WireError};
use crate::sentinel::{END, INTEGER_START, LENGTH_SEPARATOR, MINUS};
use crate::source::PeekReader;

/// How tolerant the lexer is of non-canonical digit runs.
///
/// ```text
/// ┌──────────┬─────────┬─────────┬─────────┐
/// │ Policy   │ i03e    │ i-0e    │ 03:abc  │
/// ├──────────┼─────────┼─────────┼─────────┤
/// │ Strict   │ error   │ error   │ error   │
/// │ Lenient  │ 3       │ 0       │ "abc"   │
/// └──────────┴─────────┴─────────┴─────────┘
/// ```
///
/// The encoder always writes the canonical form, so documents produced by
/// it decode identically under both policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegerPolicy {
    /// Reject leading zeros and negative zero.
    #[default]
    Strict,
    /// Accept leading zeros and negative zero.
    Lenient,
}

/// Which literal is being lexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// `i<digits>e`, optionally signed.
    Value,
    /// `<digits>:`, never signed.
    Length,
}

impl Mode {
    fn terminator(self) -> u8 {
        match self {
            Self::Value => END,
            Self::Length => LENGTH_SEPARATOR,
        }
    }
}

/// Lex the body of an `i…e` integer.
///
/// The caller has already consumed the leading `i`. Reads an optional `-`,
/// then digits, then the terminating `e`.
///
/// # Returns
///
/// `(value, bytes_consumed)`, where `bytes_consumed` counts the sign, the
/// digits and the terminator.
///
/// # Errors
///
/// - [`WireError::MalformedInteger`] for no digits, a misplaced sign, a
///   stray byte, or (strict policy) a leading zero or negative zero.
/// - [`WireError::IntegerOverflow`] if the value leaves the `i64` range.
/// - [`WireError::UnexpectedEof`] if the source ends before `e`.
pub fn read_integer<R: Read>(
    src: &mut PeekReader<R>,
    policy: IntegerPolicy,
) -> Result<(i64, usize), WireError> {
    lex(src, policy, Mode::Value)
}

/// Lex a string length prefix up to and including the `:` separator.
///
/// Unlike [`read_integer`], nothing has been consumed yet: the first digit
/// may still be held by a peek.
///
/// # Returns
///
/// `(length, bytes_consumed)`, where `bytes_consumed` includes the `:`.
///
/// # Errors
///
/// As [`read_integer`], plus [`IntegerReason::NegativeLength`] for a `-`
/// in first position.
pub fn read_length<R: Read>(
    src: &mut PeekReader<R>,
    policy: IntegerPolicy,
) -> Result<(u64, usize), WireError> {
    let start = src.position();
    let (value, consumed) = lex(src, policy, Mode::Length)?;
    let len = u64::try_from(value).map_err(|_| WireError::IntegerOverflow { offset: start })?;
    Ok((len, consumed))
}

fn lex<R: Read>(
    src: &mut PeekReader<R>,
    policy: IntegerPolicy,
    mode: Mode,
) -> Result<(i64, usize), WireError> {
    let start = src.position();
    let terminator = mode.terminator();

    let mut consumed = 0usize;
    let mut digits = 0usize;
    let mut negative = false;
    let mut zero_first = false;
    // Accumulated as a negative number: i64::MIN has no positive twin.
    let mut acc: i64 = 0;

    loop {
        let offset = src.position();
        let byte = src
            .next_byte()?
            .ok_or(WireError::UnexpectedEof { offset })?;
        consumed += 1;

        match byte {
            b'0'..=b'9' => {
                if zero_first && policy == IntegerPolicy::Strict {
                    return Err(WireError::MalformedInteger {
                        offset,
                        reason: IntegerReason::LeadingZero,
                    });
                }
                if digits == 0 && byte == b'0' {
                    zero_first = true;
                }
                digits += 1;
                acc = acc
                    .checked_mul(10)
                    .and_then(|v| v.checked_sub(i64::from(byte - b'0')))
                    .ok_or(WireError::IntegerOverflow { offset: start })?;
            }
            MINUS if consumed == 1 && mode == Mode::Value => negative = true,
            MINUS => {
                let reason = if consumed == 1 {
                    IntegerReason::NegativeLength
                } else {
                    IntegerReason::MisplacedSign
                };
                return Err(WireError::MalformedInteger { offset, reason });
            }
            b if b == terminator => break,
            other => {
                return Err(WireError::MalformedInteger {
                    offset,
                    reason: IntegerReason::UnexpectedByte(other),
                });
            }
        }
    }

    if digits == 0 {
        return Err(WireError::MalformedInteger {
            offset: start,
            reason: IntegerReason::NoDigits,
        });
    }

    if negative {
        if acc == 0 && policy == IntegerPolicy::Strict {
            return Err(WireError::MalformedInteger {
                offset: start,
                reason: IntegerReason::NegativeZero,
            });
        }
        return Ok((acc, consumed));
    }

    let value = acc
        .checked_neg()
        .ok_or(WireError::IntegerOverflow { offset: start })?;
    Ok((value, consumed))
}

/// Write `value` as a canonical `i<n>e` literal.
///
/// # Returns
///
/// The number of bytes written.
///
/// # Errors
///
/// Propagates errors from `out`.
pub fn write_integer<W: Write>(out: &mut W, value: i64) -> io::Result<usize> {
    let digits = value.to_string();
    out.write_all(&[INTEGER_START])?;
    out.write_all(digits.as_bytes())?;
    out.write_all(&[END])?;
    Ok(digits.len() + 2)
}

/// Write `len` as a canonical `<n>:` string prefix.
///
/// # Errors
///
/// Propagates errors from `out`.
pub fn write_length<W: Write>(out: &mut W, len: usize) -> io::Result<usize> {
    let digits = len.to_string();
    out.write_all(digits.as_bytes())?;
    out.write_all(&[LENGTH_SEPARATOR])?;
    Ok(digits.len() + 1)
}
