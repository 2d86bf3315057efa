use nom::error::{ErrorKind, ParseError};
use thiserror::Error;

/// Errors raised while applying the DER rules shared by the writer and the reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("truncated input: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },
    #[error("indefinite length is not allowed in DER")]
    IndefiniteLength,
    #[error("reserved length octet 0xff")]
    ReservedLength,
    #[error("length is not minimally encoded")]
    NonCanonicalLength,
    #[error("length does not fit in usize")]
    LengthOverflow,

    #[error("INTEGER: no data")]
    EmptyInteger,
    #[error("INTEGER: not minimally encoded")]
    NonMinimalInteger,

    #[error("high tag number form is not supported: 0x{0:02x}")]
    HighTagNumber(u8),
    #[error("invalid CHOICE tag number {0} (must be 0-6)")]
    InvalidChoiceNumber(u8),

    #[error("parser error {0:?}")]
    Parser(ErrorKind),
}

impl ParseError<&[u8]> for Error {
    fn from_error_kind(input: &[u8], kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Eof => Error::Truncated {
                needed: input.len() + 1,
                available: input.len(),
            },
            kind => Error::Parser(kind),
        }
    }

    fn append(_input: &[u8], _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl From<nom::Err<Error>> for Error {
    fn from(err: nom::Err<Error>) -> Self {
        match err {
            nom::Err::Incomplete(nom::Needed::Size(n)) => Error::Truncated {
                needed: n.get(),
                available: 0,
            },
            nom::Err::Incomplete(nom::Needed::Unknown) => Error::Truncated {
                needed: 1,
                available: 0,
            },
            nom::Err::Error(e) | nom::Err::Failure(e) => e,
        }
    }
}
