//! DER length octets.
//!
//! Short form holds lengths below 128 in a single octet. Long form starts
//! with `0x80 | k` followed by `k` big-endian octets, `k` being minimal.

use nom::IResult;
use nom::number::complete::be_u8;

use crate::error::Error;
use crate::take_bytes;

const LONG_FORM: u8 = 0x80;
const SHORT_FORM_MAX: usize = 0x7f;

/// Appends the DER length octets for `length` to `buf`.
pub fn write_length(buf: &mut Vec<u8>, length: usize) {
    if length <= SHORT_FORM_MAX {
        buf.push(length as u8);
        return;
    }
    let bytes = length.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    let significant = &bytes[skip..];
    buf.push(LONG_FORM | significant.len() as u8);
    buf.extend_from_slice(significant);
}

pub fn encode_length(length: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(length_size(length));
    write_length(&mut buf, length);
    buf
}

/// Number of octets `write_length` produces for `length`.
pub fn length_size(length: usize) -> usize {
    if length <= SHORT_FORM_MAX {
        1
    } else {
        1 + (usize::BITS - length.leading_zeros()).div_ceil(8) as usize
    }
}

/// Parses DER length octets, rejecting every non-canonical form.
pub fn parse_length(input: &[u8]) -> IResult<&[u8], usize, Error> {
    let (input, n) = be_u8::<_, Error>(input)?;
    if n & LONG_FORM == 0 {
        // short form: 0-127
        return Ok((input, usize::from(n)));
    }

    // long form
    // First bit is a marker for long form.
    // Other bits represent bytes length of the length field.
    let count = usize::from(n & !LONG_FORM);
    match count {
        0 => return Err(nom::Err::Error(Error::IndefiniteLength)),
        0x7f => return Err(nom::Err::Error(Error::ReservedLength)),
        c if c > size_of::<usize>() => return Err(nom::Err::Error(Error::LengthOverflow)),
        _ => {}
    }

    let (input, bs) = take_bytes(input, count)?;
    if bs.first() == Some(&0) {
        return Err(nom::Err::Error(Error::NonCanonicalLength));
    }
    let length = bs.iter().fold(0usize, |n, &b| (n << 8) | usize::from(b));
    if length <= SHORT_FORM_MAX {
        return Err(nom::Err::Error(Error::NonCanonicalLength));
    }
    Ok((input, length))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{encode_length, length_size, parse_length};
    use crate::error::Error;

    #[rstest(length, expected,
        case(0, vec![0x00]),
        case(1, vec![0x01]),
        case(127, vec![0x7f]),
        case(128, vec![0x81, 0x80]),
        case(255, vec![0x81, 0xff]),
        case(256, vec![0x82, 0x01, 0x00]),
        case(1000, vec![0x82, 0x03, 0xe8]),
        case(65535, vec![0x82, 0xff, 0xff]),
        case(65536, vec![0x83, 0x01, 0x00, 0x00]),
    )]
    fn test_encode_length(length: usize, expected: Vec<u8>) {
        let actual = encode_length(length);
        assert_eq!(expected, actual);
        assert_eq!(expected.len(), length_size(length));
    }

    #[rstest(input, expected,
        case(vec![0x02], 0x02),
        case(vec![0x7f, 0x01], 0x7f),
        case(vec![0x81, 0x80], 0x80),
        case(vec![0x82, 0x02, 0x10], 256 * 0x02 + 0x10),
        case(vec![0x83, 0x01, 0x00, 0x00], 256 * 256),
        case(vec![0x82, 0xff, 0xff], 256 * 0xff + 0xff),
    )]
    fn test_parse_length(input: Vec<u8>, expected: usize) {
        let actual = parse_length(&input).unwrap();

        assert_eq!(expected, actual.1);
    }

    #[test]
    fn test_parse_length_leaves_rest() {
        let input = [0x81, 0x80, 0xaa, 0xbb];
        let (rest, length) = parse_length(&input).unwrap();
        assert_eq!(128, length);
        assert_eq!(&[0xaa, 0xbb], rest);
    }

    #[rstest(input, expected,
        case(vec![], Error::Truncated { needed: 1, available: 0 }),
        case(vec![0x80], Error::IndefiniteLength),
        case(vec![0xff], Error::ReservedLength),
        // long form for a length that fits the short form
        case(vec![0x81, 0x7f], Error::NonCanonicalLength),
        // leading zero octet
        case(vec![0x82, 0x00, 0x80], Error::NonCanonicalLength),
        case(vec![0x82, 0x01], Error::Truncated { needed: 2, available: 1 }),
        case(vec![0x89, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], Error::LengthOverflow),
    )]
    fn test_parse_length_rejects(input: Vec<u8>, expected: Error) {
        let err = parse_length(&input).unwrap_err();
        assert_eq!(expected, Error::from(err));
    }
}
