//! Owned byte container with hex-string interop.
//!
//! Encoded GTV payloads travel as raw bytes, but most tooling around them
//! (node APIs, test vectors, logs) exchanges them as hex text.

pub mod error;

use std::{
    fmt::{Display, Formatter},
    ops::Deref,
    str::FromStr,
};

use error::Error;
use gtv::decoder::{DecodableFrom, Decoder};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Buffer {
    inner: Vec<u8>,
}

impl Buffer {
    pub fn new() -> Self {
        Buffer { inner: Vec::new() }
    }

    /// Parses a hex string. Upper and lower case digits are both accepted.
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let inner = hex::decode(s.trim()).map_err(Error::HexDecode)?;
        Ok(Buffer { inner })
    }

    /// Lowercase hex representation.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.inner)
    }

    pub fn to_hex_upper(&self) -> String {
        hex::encode_upper(&self.inner)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Display for Buffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Buffer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Buffer::from_hex(s)
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(inner: Vec<u8>) -> Self {
        Buffer { inner }
    }
}

impl From<&[u8]> for Buffer {
    fn from(value: &[u8]) -> Self {
        Buffer {
            inner: value.to_vec(),
        }
    }
}

impl From<Buffer> for Vec<u8> {
    fn from(value: Buffer) -> Self {
        value.inner
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DecodableFrom<String> for Buffer {}

impl Decoder<String, Buffer> for String {
    type Error = Error;

    fn decode(&self) -> Result<Buffer, Self::Error> {
        Buffer::from_hex(self)
    }
}

impl DecodableFrom<&str> for Buffer {}

impl Decoder<&str, Buffer> for &str {
    type Error = Error;

    fn decode(&self) -> Result<Buffer, Self::Error> {
        Buffer::from_hex(self)
    }
}
