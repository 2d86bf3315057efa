//! DER building blocks shared by the GTV writer and reader.
//!
//! Only the subset of DER needed by the CHOICE grammar is covered: single
//! octet identifiers, definite lengths and INTEGER content rules.

use nom::{IResult, Parser};
use nom::number::complete::be_u8;

pub mod error;
pub mod integer;
pub mod length;
pub mod tag;

use error::Error;
pub use length::{encode_length, length_size, parse_length, write_length};
pub use tag::{Choice, TAG_CONSTRUCTED, UniversalTag};

/// A borrowed tag-length-value triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tlv<'a> {
    tag: u8,
    value: &'a [u8],
    raw: &'a [u8],
}

impl<'a> Tlv<'a> {
    /// Parses one TLV from the front of `input`.
    pub fn parse(input: &'a [u8]) -> IResult<&'a [u8], Tlv<'a>, Error> {
        let start = input;
        let (input, tag) = parse_tag(input)?;
        let (input, length) = parse_length(input)?;
        let (input, value) = take_bytes(input, length)?;
        let raw = &start[..start.len() - input.len()];
        Ok((input, Tlv { tag, value, raw }))
    }

    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Content octets.
    pub fn value(&self) -> &'a [u8] {
        self.value
    }

    /// The whole encoding: identifier, length and content octets.
    pub fn raw(&self) -> &'a [u8] {
        self.raw
    }
}

/// Reads a single identifier octet. High tag numbers are not part of the grammar.
pub fn parse_tag(input: &[u8]) -> IResult<&[u8], u8, Error> {
    let (input, n) = be_u8::<_, Error>(input)?;
    if n & tag::TAG_NUMBER_MASK == tag::TAG_NUMBER_MASK {
        return Err(nom::Err::Error(Error::HighTagNumber(n)));
    }
    Ok((input, n))
}

pub(crate) fn take_bytes(input: &[u8], count: usize) -> IResult<&[u8], &[u8], Error> {
    if input.len() < count {
        return Err(nom::Err::Error(Error::Truncated {
            needed: count,
            available: input.len(),
        }));
    }
    nom::bytes::complete::take::<_, _, Error>(count).parse(input)
}

/// Appends a complete TLV to `buf`.
pub fn write_tlv(buf: &mut Vec<u8>, tag: u8, value: &[u8]) {
    buf.push(tag);
    write_length(buf, value.len());
    buf.extend_from_slice(value);
}

/// Encoded size of a TLV whose content is `content_len` octets long.
pub fn tlv_size(content_len: usize) -> usize {
    1 + length_size(content_len) + content_len
}
