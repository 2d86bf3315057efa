//! INTEGER content octets: minimal big-endian two's complement.
//!
//! A leading `0x00` is only allowed when the next octet has its high bit
//! set, and a leading `0xFF` only when the next octet has it clear.
//! Zero is the single octet `0x00`.

use num_bigint::BigInt;

use crate::error::Error;

fn is_redundant(first: u8, second: u8) -> bool {
    (first == 0x00 && second & 0x80 == 0) || (first == 0xff && second & 0x80 != 0)
}

/// Drops leading sign-extension octets that do not change the value.
fn minimal(bytes: &[u8]) -> &[u8] {
    let mut start = 0;
    while start + 1 < bytes.len() && is_redundant(bytes[start], bytes[start + 1]) {
        start += 1;
    }
    &bytes[start..]
}

pub fn encode_i64(value: i64) -> Vec<u8> {
    minimal(&value.to_be_bytes()).to_vec()
}

pub fn encode_big_integer(value: &BigInt) -> Vec<u8> {
    // Already minimal, and a single 0x00 for zero.
    value.to_signed_bytes_be()
}

/// Checks the DER constraints on INTEGER content octets.
pub fn validate(content: &[u8]) -> Result<(), Error> {
    match content {
        [] => Err(Error::EmptyInteger),
        [first, second, ..] if is_redundant(*first, *second) => Err(Error::NonMinimalInteger),
        _ => Ok(()),
    }
}

pub fn decode_big_integer(content: &[u8]) -> Result<BigInt, Error> {
    validate(content)?;
    Ok(BigInt::from_signed_bytes_be(content))
}
