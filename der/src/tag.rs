//! Tag registry.
//!
//! Two layers of tags appear on the wire. Every value is wrapped in an
//! explicit context-specific, constructed CHOICE tag (`0xA0 + n`) that names
//! its kind, and the wrapper holds exactly one universal TLV carrying the
//! payload.
//!
//! | Choice     | Outer | Inner               |
//! |------------|-------|---------------------|
//! | Null       | 0xA0  | NULL (0x05)         |
//! | ByteArray  | 0xA1  | OCTET STRING (0x04) |
//! | String     | 0xA2  | UTF8String (0x0C)   |
//! | Integer    | 0xA3  | INTEGER (0x02)      |
//! | Dict       | 0xA4  | SEQUENCE (0x30)     |
//! | Array      | 0xA5  | SEQUENCE (0x30)     |
//! | BigInteger | 0xA6  | INTEGER (0x02)      |
//!
//! New kinds must take new tag numbers; existing numbers are never reused.

use std::fmt::Display;

use crate::error::Error;

pub const TAG_CONSTRUCTED: u8 = 0x20;
pub const TAG_CLASS_MASK: u8 = 0xc0;
pub const TAG_CLASS_CONTEXT_SPECIFIC: u8 = 0x80;
pub const TAG_NUMBER_MASK: u8 = 0x1f;

/// The DER universal tags wrapped by the CHOICE tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum UniversalTag {
    Integer = 0x02,
    OctetString = 0x04,
    Null = 0x05,
    UTF8String = 0x0c,
    // SEQUENCE always carries the constructed bit.
    Sequence = 0x30,
}

impl From<UniversalTag> for u8 {
    fn from(tag: UniversalTag) -> Self {
        tag as u8
    }
}

impl TryFrom<u8> for UniversalTag {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x02 => Ok(Self::Integer),
            0x04 => Ok(Self::OctetString),
            0x05 => Ok(Self::Null),
            0x0c => Ok(Self::UTF8String),
            0x30 => Ok(Self::Sequence),
            other => Err(other),
        }
    }
}

impl Display for UniversalTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniversalTag::Integer => write!(f, "INTEGER"),
            UniversalTag::OctetString => write!(f, "OCTET STRING"),
            UniversalTag::Null => write!(f, "NULL"),
            UniversalTag::UTF8String => write!(f, "UTF8String"),
            UniversalTag::Sequence => write!(f, "SEQUENCE"),
        }
    }
}

/// Explicit context-specific tag selecting the kind of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Choice {
    Null,
    ByteArray,
    String,
    Integer,
    Dict,
    Array,
    BigInteger,
}

impl Choice {
    pub const ALL: [Choice; 7] = [
        Choice::Null,
        Choice::ByteArray,
        Choice::String,
        Choice::Integer,
        Choice::Dict,
        Choice::Array,
        Choice::BigInteger,
    ];

    /// Context-specific tag number, 0 through 6.
    pub fn number(self) -> u8 {
        match self {
            Choice::Null => 0,
            Choice::ByteArray => 1,
            Choice::String => 2,
            Choice::Integer => 3,
            Choice::Dict => 4,
            Choice::Array => 5,
            Choice::BigInteger => 6,
        }
    }

    pub fn from_number(n: u8) -> Result<Self, Error> {
        Self::ALL
            .get(usize::from(n))
            .copied()
            .ok_or(Error::InvalidChoiceNumber(n))
    }

    /// The identifier octet of the outer wrapper.
    pub fn tag_byte(self) -> u8 {
        TAG_CLASS_CONTEXT_SPECIFIC | TAG_CONSTRUCTED | self.number()
    }

    /// Maps an identifier octet back to a choice. Anything that is not a
    /// context-specific constructed tag numbered 0 to 6 yields `None`.
    pub fn from_tag_byte(byte: u8) -> Option<Self> {
        if byte & TAG_CLASS_MASK != TAG_CLASS_CONTEXT_SPECIFIC || byte & TAG_CONSTRUCTED == 0 {
            return None;
        }
        Self::from_number(byte & TAG_NUMBER_MASK).ok()
    }

    /// The universal tag found inside the wrapper.
    pub fn inner_tag(self) -> UniversalTag {
        match self {
            Choice::Null => UniversalTag::Null,
            Choice::ByteArray => UniversalTag::OctetString,
            Choice::String => UniversalTag::UTF8String,
            Choice::Integer | Choice::BigInteger => UniversalTag::Integer,
            Choice::Dict | Choice::Array => UniversalTag::Sequence,
        }
    }

    pub fn is_sequence(self) -> bool {
        self.inner_tag() == UniversalTag::Sequence
    }
}

impl Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Choice::Null => write!(f, "Null"),
            Choice::ByteArray => write!(f, "ByteArray"),
            Choice::String => write!(f, "String"),
            Choice::Integer => write!(f, "Integer"),
            Choice::Dict => write!(f, "Dict"),
            Choice::Array => write!(f, "Array"),
            Choice::BigInteger => write!(f, "BigInteger"),
        }
    }
}
