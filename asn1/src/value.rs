use std::fmt::Display;

use gtv::decoder::{DecodableFrom, Decoder};
use gtv::encoder::{EncodableTo, Encoder};
use gtv_buffer::Buffer;
use gtv_der::Choice;
use log::debug;
use num_bigint::BigInt;

use crate::error::Error;
use crate::options::DecodeOptions;
use crate::reader::AsnReader;
use crate::writer::AsnWriter;

/// A GTV value.
///
/// `Dict` keeps its entries in insertion order and does not deduplicate
/// keys. On the wire each entry is an untagged SEQUENCE of a bare
/// UTF8String key followed by the CHOICE-tagged value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gtv {
    Null,
    ByteArray(Vec<u8>),
    String(String),
    Integer(i64),
    BigInteger(BigInt),
    Array(Vec<Gtv>),
    Dict(Vec<(String, Gtv)>),
}

impl Gtv {
    pub fn choice(&self) -> Choice {
        match self {
            Gtv::Null => Choice::Null,
            Gtv::ByteArray(_) => Choice::ByteArray,
            Gtv::String(_) => Choice::String,
            Gtv::Integer(_) => Choice::Integer,
            Gtv::BigInteger(_) => Choice::BigInteger,
            Gtv::Array(_) => Choice::Array,
            Gtv::Dict(_) => Choice::Dict,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Gtv::Null)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Gtv::ByteArray(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Gtv::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Gtv::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_big_integer(&self) -> Option<&BigInt> {
        match self {
            Gtv::BigInteger(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Gtv]> {
        match self {
            Gtv::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&[(String, Gtv)]> {
        match self {
            Gtv::Dict(entries) => Some(entries),
            _ => None,
        }
    }

    /// First value stored under `key`, if this is a `Dict`.
    pub fn get(&self, key: &str) -> Option<&Gtv> {
        self.as_dict()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Writes this value, depth first, into `writer`.
    pub fn write_to(&self, writer: &mut AsnWriter) -> Result<(), Error> {
        match self {
            Gtv::Null => writer.write_null(),
            Gtv::ByteArray(bytes) => writer.write_octet_string(bytes),
            Gtv::String(s) => writer.write_utf8_string(s),
            Gtv::Integer(n) => writer.write_integer(*n),
            Gtv::BigInteger(n) => writer.write_big_integer(n),
            Gtv::Array(items) => {
                writer.push_sequence(Some(Choice::Array))?;
                for item in items {
                    item.write_to(writer)?;
                }
                writer.pop_sequence()?;
            }
            Gtv::Dict(entries) => {
                writer.push_sequence(Some(Choice::Dict))?;
                for (key, value) in entries {
                    writer.push_sequence(None)?;
                    writer.write_dict_key(key);
                    value.write_to(writer)?;
                    writer.pop_sequence()?;
                }
                writer.pop_sequence()?;
            }
        }
        Ok(())
    }

    /// Reads the next value from `reader`, dispatching on its CHOICE tag.
    pub fn read_from(reader: &mut AsnReader<'_>, options: &DecodeOptions) -> Result<Gtv, Error> {
        read_value(reader, options, 0)
    }

    /// Decodes a buffer that must hold exactly one value.
    pub fn decode_with(input: &[u8], options: &DecodeOptions) -> Result<Gtv, Error> {
        let mut reader = AsnReader::new(input);
        let value = Gtv::read_from(&mut reader, options)?;
        reader.finish()?;
        Ok(value)
    }
}

fn enter<'a>(
    reader: &mut AsnReader<'a>,
    choice: Choice,
    options: &DecodeOptions,
    depth: usize,
) -> Result<AsnReader<'a>, Error> {
    if depth >= options.max_depth() {
        debug!("rejecting {} nested deeper than {}", choice, options.max_depth());
        return Err(Error::MaxDepthExceeded(options.max_depth()));
    }
    reader.read_sequence(Some(choice))
}

fn read_value(
    reader: &mut AsnReader<'_>,
    options: &DecodeOptions,
    depth: usize,
) -> Result<Gtv, Error> {
    let Some(choice) = reader.peek_choice()? else {
        let tag = reader.peek_tag()?;
        debug!("unknown CHOICE tag 0x{:02x} at depth {}", tag, depth);
        return Err(Error::UnknownChoice(tag));
    };

    match choice {
        Choice::Null => reader.read_null().map(|_| Gtv::Null),
        Choice::ByteArray => reader.read_octet_string().map(Gtv::ByteArray),
        Choice::String => reader.read_utf8_string().map(Gtv::String),
        Choice::Integer => reader.read_integer().map(Gtv::Integer),
        Choice::BigInteger => reader.read_big_integer().map(Gtv::BigInteger),
        Choice::Array => {
            let mut seq = enter(reader, choice, options, depth)?;
            let mut items = Vec::new();
            while seq.has_data() {
                items.push(read_value(&mut seq, options, depth + 1)?);
            }
            Ok(Gtv::Array(items))
        }
        Choice::Dict => {
            let mut seq = enter(reader, choice, options, depth)?;
            let mut entries = Vec::new();
            while seq.has_data() {
                let mut pair = seq.read_sequence(None)?;
                let key = pair.read_dict_key()?;
                let value = read_value(&mut pair, options, depth + 1)?;
                pair.finish()?;
                entries.push((key, value));
            }
            Ok(Gtv::Dict(entries))
        }
    }
}

impl Display for Gtv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gtv::Null => write!(f, "null"),
            Gtv::ByteArray(bytes) => {
                write!(f, "x\"")?;
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                write!(f, "\"")
            }
            Gtv::String(s) => write!(f, "{:?}", s),
            Gtv::Integer(n) => write!(f, "{}", n),
            Gtv::BigInteger(n) => write!(f, "{}L", n),
            Gtv::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Gtv::Dict(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<i64> for Gtv {
    fn from(value: i64) -> Self {
        Gtv::Integer(value)
    }
}

impl From<&str> for Gtv {
    fn from(value: &str) -> Self {
        Gtv::String(value.to_string())
    }
}

impl From<String> for Gtv {
    fn from(value: String) -> Self {
        Gtv::String(value)
    }
}

impl From<Vec<u8>> for Gtv {
    fn from(value: Vec<u8>) -> Self {
        Gtv::ByteArray(value)
    }
}

impl From<BigInt> for Gtv {
    fn from(value: BigInt) -> Self {
        Gtv::BigInteger(value)
    }
}

impl From<Vec<Gtv>> for Gtv {
    fn from(value: Vec<Gtv>) -> Self {
        Gtv::Array(value)
    }
}

impl From<Vec<(String, Gtv)>> for Gtv {
    fn from(value: Vec<(String, Gtv)>) -> Self {
        Gtv::Dict(value)
    }
}

impl EncodableTo<Gtv> for Buffer {}

impl Encoder<Gtv, Buffer> for Gtv {
    type Error = Error;

    fn encode(&self) -> Result<Buffer, Self::Error> {
        let mut writer = AsnWriter::new();
        self.write_to(&mut writer)?;
        writer.encode()
    }
}

impl DecodableFrom<Buffer> for Gtv {}

impl Decoder<Buffer, Gtv> for Buffer {
    type Error = Error;

    fn decode(&self) -> Result<Gtv, Self::Error> {
        Gtv::decode_with(self.as_bytes(), &DecodeOptions::default())
    }
}

impl DecodableFrom<&[u8]> for Gtv {}

impl Decoder<&[u8], Gtv> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Gtv, Self::Error> {
        Gtv::decode_with(self, &DecodeOptions::default())
    }
}
