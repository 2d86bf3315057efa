//! CHOICE-tagged DER writer.
//!
//! Scalars are appended to the innermost open scope as a complete
//! `outer CHOICE tag | length | inner TLV`. Composite values are built with
//! matched [`AsnWriter::push_sequence`] / [`AsnWriter::pop_sequence`] calls.
//! Each open scope owns its buffer, so lengths never need to be known in
//! advance: popping a scope measures its content, wraps it and appends the
//! result to the parent scope.
//!
//! ```
//! use gtv_asn1::{AsnWriter, Choice};
//!
//! let mut writer = AsnWriter::new();
//! writer.push_sequence(Some(Choice::Array)).unwrap();
//! writer.write_integer(1);
//! writer.pop_sequence().unwrap();
//! assert_eq!(writer.encode().unwrap().to_hex(), "a5073005a303020101");
//! ```

use gtv_buffer::Buffer;
use gtv_der::integer::{encode_big_integer, encode_i64};
use gtv_der::{Choice, UniversalTag, tlv_size, write_length, write_tlv};
use log::trace;
use num_bigint::BigInt;

use crate::error::Error;

#[derive(Debug)]
struct Frame {
    // `None` for the bare SEQUENCE grouping a dictionary entry.
    choice: Option<Choice>,
    buffer: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct AsnWriter {
    buffer: Vec<u8>,
    frames: Vec<Frame>,
}

impl AsnWriter {
    pub fn new() -> Self {
        AsnWriter::default()
    }

    fn current(&mut self) -> &mut Vec<u8> {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.buffer,
            None => &mut self.buffer,
        }
    }

    fn write_choice(&mut self, choice: Choice, value: &[u8]) {
        let inner_tag = u8::from(choice.inner_tag());
        let buf = self.current();
        buf.push(choice.tag_byte());
        write_length(buf, tlv_size(value.len()));
        write_tlv(buf, inner_tag, value);
    }

    pub fn write_null(&mut self) {
        self.write_choice(Choice::Null, &[]);
    }

    pub fn write_octet_string(&mut self, value: &[u8]) {
        self.write_choice(Choice::ByteArray, value);
    }

    pub fn write_utf8_string(&mut self, value: &str) {
        self.write_choice(Choice::String, value.as_bytes());
    }

    /// Writes a dictionary key as a bare UTF8String.
    ///
    /// Keys deliberately skip the `String` CHOICE wrapper that values carry;
    /// a key is always the first element of its entry so the wrapper would
    /// carry no information. Decoders must mirror this with
    /// [`crate::AsnReader::read_dict_key`].
    pub fn write_dict_key(&mut self, key: &str) {
        write_tlv(self.current(), UniversalTag::UTF8String.into(), key.as_bytes());
    }

    pub fn write_integer(&mut self, value: i64) {
        self.write_choice(Choice::Integer, &encode_i64(value));
    }

    pub fn write_big_integer(&mut self, value: &BigInt) {
        self.write_choice(Choice::BigInteger, &encode_big_integer(value));
    }

    /// Appends already encoded bytes to the current scope verbatim.
    pub fn write_encoded_value(&mut self, encoded: &[u8]) {
        self.current().extend_from_slice(encoded);
    }

    /// Opens a new scope. `choice` is `Array`, `Dict`, or `None` for the
    /// untagged SEQUENCE holding one dictionary entry.
    pub fn push_sequence(&mut self, choice: Option<Choice>) -> Result<(), Error> {
        if let Some(choice) = choice {
            if !choice.is_sequence() {
                return Err(Error::NotASequence(choice));
            }
        }
        self.frames.push(Frame {
            choice,
            buffer: Vec::new(),
        });
        Ok(())
    }

    /// Closes the innermost scope and appends it, wrapped, to its parent.
    pub fn pop_sequence(&mut self) -> Result<(), Error> {
        let frame = self.frames.pop().ok_or(Error::PopWithoutOpenSequence)?;
        let depth = self.frames.len();
        trace!(
            "closing sequence {:?} at depth {} with {} content bytes",
            frame.choice,
            depth,
            frame.buffer.len()
        );

        let parent = self.current();
        if let Some(choice) = frame.choice {
            parent.push(choice.tag_byte());
            write_length(parent, tlv_size(frame.buffer.len()));
        }
        write_tlv(parent, UniversalTag::Sequence.into(), &frame.buffer);
        Ok(())
    }

    /// Number of scopes currently open.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Bytes accumulated so far in the current scope.
    pub fn encoded_len(&self) -> usize {
        match self.frames.last() {
            Some(frame) => frame.buffer.len(),
            None => self.buffer.len(),
        }
    }

    /// Returns the encoded bytes. Every pushed scope must have been popped.
    pub fn encode(&self) -> Result<Buffer, Error> {
        if !self.frames.is_empty() {
            return Err(Error::UnbalancedSequences {
                open: self.frames.len(),
            });
        }
        Ok(Buffer::from(self.buffer.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use num_bigint::BigInt;
    use rstest::rstest;

    use super::AsnWriter;
    use crate::error::Error;
    use gtv_der::Choice;

    fn encoded(writer: &AsnWriter) -> String {
        writer.encode().unwrap().to_hex_upper()
    }

    #[test]
    fn test_write_null() {
        let mut writer = AsnWriter::new();
        writer.write_null();
        assert_eq!("A0020500", encoded(&writer));
    }

    #[rstest(input, expected,
        case("", "A1020400"),
        case("AFFE", "A1040402AFFE"),
        case("E2BE5C617CE50AFD0882A753C6FDA9C4D925EEDAC50DB97E33F457826A856DE0", "A1220420E2BE5C617CE50AFD0882A753C6FDA9C4D925EEDAC50DB97E33F457826A856DE0"),
        case("FF", "A1030401FF"),
        case("00", "A103040100"),
        case("0123456789ABCDEF", "A10A04080123456789ABCDEF"),
        case("00000000", "A106040400000000"),
        case("80", "A103040180"),
        case("0080", "A10404020080"),
    )]
    fn test_write_octet_string(input: &str, expected: &str) {
        let bytes = gtv_buffer::Buffer::from_hex(input).unwrap();
        let mut writer = AsnWriter::new();
        writer.write_octet_string(&bytes);
        assert_eq!(expected, encoded(&writer));
    }

    #[rstest(input, expected,
        case("", "A2020C00"),
        case("a", "A2030C0161"),
        case("Hello World!", "A20E0C0C48656C6C6F20576F726C6421"),
        case("Swedish: Åå Ää Öö", "A2190C17537765646973683A20C385C3A520C384C3A420C396C3B6"),
        case("Tab\tand\nNewline", "A2110C0F54616209616E640A4E65776C696E65"),
    )]
    fn test_write_utf8_string(input: &str, expected: &str) {
        let mut writer = AsnWriter::new();
        writer.write_utf8_string(input);
        assert_eq!(expected, encoded(&writer));
    }

    #[rstest(input, expected,
        case(0, "A303020100"),
        case(-1, "A3030201FF"),
        case(1, "A303020101"),
        case(127, "A30302017F"),
        case(128, "A30402020080"),
        case(256, "A30402020100"),
        case(-128, "A303020180"),
        case(-129, "A3040202FF7F"),
        case(42424242, "A3060204028757B2"),
        case(i64::MIN, "A30A02088000000000000000"),
        case(i64::MAX, "A30A02087FFFFFFFFFFFFFFF"),
    )]
    fn test_write_integer(input: i64, expected: &str) {
        let mut writer = AsnWriter::new();
        writer.write_integer(input);
        assert_eq!(expected, encoded(&writer));
    }

    #[rstest(input, expected,
        case("0", "A603020100"),
        case("42", "A60302012A"),
        case("-42", "A6030201D6"),
        case("9223372036854775808", "A60B0209008000000000000000"),
        case("-9223372036854775809", "A60B0209FF7FFFFFFFFFFFFFFF"),
        case("4294967296", "A60702050100000000"),
        case("123456789012345678901234567890", "A60F020D018EE90FF6C373E0EE4E3F0AD2"),
    )]
    fn test_write_big_integer(input: &str, expected: &str) {
        let mut writer = AsnWriter::new();
        writer.write_big_integer(&BigInt::from_str(input).unwrap());
        assert_eq!(expected, encoded(&writer));
    }

    #[test]
    fn test_empty_sequence() {
        let mut writer = AsnWriter::new();
        writer.push_sequence(Some(Choice::Array)).unwrap();
        writer.pop_sequence().unwrap();
        assert_eq!("A5023000", encoded(&writer));
    }

    #[test]
    fn test_nested_sequences() {
        let mut writer = AsnWriter::new();
        writer.push_sequence(Some(Choice::Array)).unwrap();
        writer.push_sequence(Some(Choice::Array)).unwrap();
        writer.push_sequence(Some(Choice::Array)).unwrap();
        writer.write_integer(1);
        writer.pop_sequence().unwrap();
        writer.pop_sequence().unwrap();
        writer.pop_sequence().unwrap();
        assert_eq!("A50F300DA50B3009A5073005A303020101", encoded(&writer));
    }

    #[test]
    fn test_sequence_of_operations() {
        let mut writer = AsnWriter::new();
        writer.push_sequence(Some(Choice::Array)).unwrap();

        writer.push_sequence(Some(Choice::Array)).unwrap();
        let hash = gtv_buffer::Buffer::from_hex(
            "E2BE5C617CE50AFD0882A753C6FDA9C4D925EEDAC50DB97E33F457826A856DE0",
        )
        .unwrap();
        writer.write_octet_string(&hash);
        writer.pop_sequence().unwrap();

        writer.push_sequence(Some(Choice::Array)).unwrap();
        writer.push_sequence(Some(Choice::Array)).unwrap();
        writer.write_utf8_string("test_op1");
        writer.write_utf8_string("arg1");
        writer.write_integer(42);
        writer.pop_sequence().unwrap();
        writer.push_sequence(Some(Choice::Array)).unwrap();
        writer.write_utf8_string("test_op2");
        writer.pop_sequence().unwrap();
        writer.pop_sequence().unwrap();

        writer.pop_sequence().unwrap();
        assert_eq!(
            "A55B3059A5263024A1220420E2BE5C617CE50AFD0882A753C6FDA9C4D925EEDAC50DB97E33F457826A856DE0A52F302DA51B3019A20A0C08746573745F6F7031A2060C0461726731A30302012AA50E300CA20A0C08746573745F6F7032",
            encoded(&writer)
        );
    }

    #[rstest(key, expected,
        case("", "A410300E300C0C00A2080C0676616C756531"),
        case("k", "A411300F300D0C016BA2080C0676616C756531"),
        case("key", "A4133011300F0C036B6579A2080C0676616C756531"),
        case("very_long_dictionary_key_name", "A42D302B30290C1D766572795F6C6F6E675F64696374696F6E6172795F6B65795F6E616D65A2080C0676616C756531"),
        case("key.with.dots", "A41D301B30190C0D6B65792E776974682E646F7473A2080C0676616C756531"),
    )]
    fn test_dict_key(key: &str, expected: &str) {
        let mut writer = AsnWriter::new();
        writer.push_sequence(Some(Choice::Dict)).unwrap();
        writer.push_sequence(None).unwrap();
        writer.write_dict_key(key);
        writer.write_utf8_string("value1");
        writer.pop_sequence().unwrap();
        writer.pop_sequence().unwrap();
        assert_eq!(expected, encoded(&writer));
    }

    #[test]
    fn test_mixed_types_sequence() {
        let mut writer = AsnWriter::new();
        writer.push_sequence(Some(Choice::Array)).unwrap();
        writer.write_null();
        writer.write_integer(42);
        writer.write_utf8_string("test");
        writer.write_octet_string(&[0xab, 0xcd]);
        writer.write_big_integer(&BigInt::from(123456789));
        writer.pop_sequence().unwrap();
        assert_eq!(
            "A521301FA0020500A30302012AA2060C0474657374A1040402ABCDA6060204075BCD15",
            encoded(&writer)
        );
    }

    #[test]
    fn test_write_encoded_value() {
        let mut inner = AsnWriter::new();
        inner.write_integer(1);
        let inner = inner.encode().unwrap();

        let mut writer = AsnWriter::new();
        writer.push_sequence(Some(Choice::Array)).unwrap();
        writer.write_encoded_value(&inner);
        assert_eq!(5, writer.encoded_len());
        writer.pop_sequence().unwrap();
        assert_eq!("A5073005A303020101", encoded(&writer));
    }

    #[test]
    fn test_encode_with_open_sequence() {
        let mut writer = AsnWriter::new();
        writer.push_sequence(Some(Choice::Array)).unwrap();
        writer.push_sequence(None).unwrap();
        writer.pop_sequence().unwrap();
        assert_eq!(1, writer.depth());
        assert_eq!(
            Err(Error::UnbalancedSequences { open: 1 }),
            writer.encode()
        );
        writer.pop_sequence().unwrap();
        assert!(writer.encode().is_ok());
    }

    #[test]
    fn test_pop_without_push() {
        let mut writer = AsnWriter::new();
        assert_eq!(Err(Error::PopWithoutOpenSequence), writer.pop_sequence());
    }

    #[rstest(choice,
        case(Choice::Null),
        case(Choice::ByteArray),
        case(Choice::String),
        case(Choice::Integer),
        case(Choice::BigInteger),
    )]
    fn test_push_scalar_choice(choice: Choice) {
        let mut writer = AsnWriter::new();
        assert_eq!(Err(Error::NotASequence(choice)), writer.push_sequence(Some(choice)));
        assert_eq!(0, writer.depth());
    }

    #[rstest(length, header,
        // 127 content bytes: inner TLV is 129 bytes long
        case(127, "A281810C7F"),
        case(128, "A281830C8180"),
    )]
    fn test_long_form_boundary(length: usize, header: &str) {
        let mut writer = AsnWriter::new();
        writer.write_utf8_string(&"A".repeat(length));
        assert!(encoded(&writer).starts_with(header));
    }
}
