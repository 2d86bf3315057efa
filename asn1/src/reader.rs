//! CHOICE-tagged DER reader.
//!
//! `AsnReader` is a cursor over a borrowed byte slice. Typed reads expect the
//! matching CHOICE wrapper, validate the inner DER encoding and require that
//! nothing is left inside the wrapper. A failed read leaves the cursor where
//! it was.
//!
//! [`AsnReader::read_sequence`] hands back a reader limited to the content of
//! that sequence, so nested reads can never run into sibling data.

use gtv_der::integer::decode_big_integer;
use gtv_der::{Choice, Tlv, UniversalTag};
use log::trace;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsnReader<'a> {
    input: &'a [u8],
}

impl<'a> AsnReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        AsnReader { input }
    }

    /// Whether unread bytes remain in this scope.
    pub fn has_data(&self) -> bool {
        !self.input.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.input.len()
    }

    /// Returns the next identifier octet without consuming it.
    pub fn peek_tag(&self) -> Result<u8, Error> {
        self.input.first().copied().ok_or(Error::Der(
            gtv_der::error::Error::Truncated {
                needed: 1,
                available: 0,
            },
        ))
    }

    /// Returns the kind of the next value without consuming it, or `None`
    /// if the next tag is not one of the CHOICE tags.
    pub fn peek_choice(&self) -> Result<Option<Choice>, Error> {
        Ok(Choice::from_tag_byte(self.peek_tag()?))
    }

    /// Consumes one TLV with the `expected` tag and returns its content.
    fn read_tlv(&mut self, expected: u8) -> Result<&'a [u8], Error> {
        let actual = self.peek_tag()?;
        if actual != expected {
            return Err(Error::UnexpectedTag { expected, actual });
        }
        let (rest, tlv) = Tlv::parse(self.input).map_err(gtv_der::error::Error::from)?;
        self.input = rest;
        Ok(tlv.value())
    }

    /// Unwraps the `choice` wrapper, reads its content with `read` and
    /// checks the wrapper is exhausted. The cursor only moves on success.
    fn read_choice<T>(
        &mut self,
        choice: Choice,
        read: impl FnOnce(&mut AsnReader<'a>) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mut cursor = *self;
        let mut outer = AsnReader::new(cursor.read_tlv(choice.tag_byte())?);
        let value = read(&mut outer)?;
        outer.finish()?;
        *self = cursor;
        Ok(value)
    }

    fn read_bare_utf8_string(&mut self) -> Result<String, Error> {
        let mut cursor = *self;
        let content = cursor.read_tlv(UniversalTag::UTF8String.into())?;
        let s = std::str::from_utf8(content).map_err(Error::InvalidUtf8)?;
        *self = cursor;
        Ok(s.to_owned())
    }

    fn read_bare_integer(&mut self) -> Result<BigInt, Error> {
        let content = self.read_tlv(UniversalTag::Integer.into())?;
        Ok(decode_big_integer(content)?)
    }

    fn read_bare_sequence(&mut self) -> Result<AsnReader<'a>, Error> {
        let content = self.read_tlv(UniversalTag::Sequence.into())?;
        trace!("entering sequence with {} content bytes", content.len());
        Ok(AsnReader::new(content))
    }

    pub fn read_null(&mut self) -> Result<(), Error> {
        self.read_choice(Choice::Null, |outer| {
            let content = outer.read_tlv(UniversalTag::Null.into())?;
            if !content.is_empty() {
                return Err(Error::NullWithContent(content.len()));
            }
            Ok(())
        })
    }

    pub fn read_octet_string(&mut self) -> Result<Vec<u8>, Error> {
        self.read_choice(Choice::ByteArray, |outer| {
            Ok(outer.read_tlv(UniversalTag::OctetString.into())?.to_vec())
        })
    }

    pub fn read_utf8_string(&mut self) -> Result<String, Error> {
        self.read_choice(Choice::String, |outer| outer.read_bare_utf8_string())
    }

    /// Reads a dictionary key, a UTF8String without CHOICE wrapper.
    pub fn read_dict_key(&mut self) -> Result<String, Error> {
        self.read_bare_utf8_string()
    }

    /// Reads an `Integer` value. Fails with `IntegerOutOfRangeI64` when the
    /// encoded value needs more than 64 bits.
    pub fn read_integer(&mut self) -> Result<i64, Error> {
        self.read_choice(Choice::Integer, |outer| {
            outer
                .read_bare_integer()?
                .to_i64()
                .ok_or(Error::IntegerOutOfRangeI64)
        })
    }

    pub fn read_big_integer(&mut self) -> Result<BigInt, Error> {
        self.read_choice(Choice::BigInteger, |outer| outer.read_bare_integer())
    }

    /// Reads a SEQUENCE and returns a reader over its content.
    ///
    /// With `Some(choice)` the `Array` or `Dict` wrapper is unwrapped first;
    /// with `None` a bare SEQUENCE is expected, as used for dictionary entries.
    pub fn read_sequence(&mut self, choice: Option<Choice>) -> Result<AsnReader<'a>, Error> {
        match choice {
            Some(choice) if !choice.is_sequence() => Err(Error::NotASequence(choice)),
            Some(choice) => self.read_choice(choice, |outer| outer.read_bare_sequence()),
            None => self.read_bare_sequence(),
        }
    }

    /// Returns the raw bytes of the next complete TLV, whatever its tag.
    pub fn read_encoded_value(&mut self) -> Result<&'a [u8], Error> {
        let (rest, tlv) = Tlv::parse(self.input).map_err(gtv_der::error::Error::from)?;
        self.input = rest;
        Ok(tlv.raw())
    }

    /// Consumes the reader, failing if any bytes were left unread.
    pub fn finish(self) -> Result<(), Error> {
        if self.has_data() {
            return Err(Error::TrailingData {
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}
