use hex::FromHexError;
use thiserror::Error;

/// Errors that can occur when converting text into a [`crate::Buffer`].
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// The input is not an even-length string of hex digits
    #[error("hex decode: {0}")]
    HexDecode(FromHexError),
}
