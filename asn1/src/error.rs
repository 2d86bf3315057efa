//! Error types for the GTV writer, reader and value codec.

use std::str::Utf8Error;

use gtv_der::Choice;
use thiserror::Error;

/// Errors that can occur while encoding or decoding GTV values.
///
/// Structural errors come from unbalanced use of the writer and indicate a
/// bug in the caller. Every other variant describes malformed or out of
/// range input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // Structural errors
    #[error("pop_sequence called without an open sequence")]
    PopWithoutOpenSequence,
    #[error("encode called with {open} open sequence(s)")]
    UnbalancedSequences { open: usize },
    #[error("{0} is not a sequence choice")]
    NotASequence(Choice),

    // Malformed input
    #[error("unexpected tag: expected 0x{expected:02x}, got 0x{actual:02x}")]
    UnexpectedTag { expected: u8, actual: u8 },
    #[error("{remaining} trailing byte(s) after value")]
    TrailingData { remaining: usize },
    #[error("NULL: unexpected content of {0} byte(s)")]
    NullWithContent(usize),
    #[error("UTF8String: invalid UTF-8: {0}")]
    InvalidUtf8(#[source] Utf8Error),
    #[error("unknown CHOICE tag 0x{0:02x}")]
    UnknownChoice(u8),
    #[error("nesting exceeds {0} levels")]
    MaxDepthExceeded(usize),

    // Range errors
    #[error("INTEGER: value out of range for i64")]
    IntegerOutOfRangeI64,

    #[error("invalid DER encoding: {0}")]
    Der(#[from] gtv_der::error::Error),
}
