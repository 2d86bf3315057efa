//! # gtv-asn1
//!
//! Encoder and decoder for GTV values on top of a DER subset.
//!
//! Every value is an explicit context-specific CHOICE tag (`0xA0 + n`)
//! wrapping a single DER universal TLV; see [`gtv_der::tag`] for the table.
//!
//! Two levels of API are provided:
//!
//! - [`AsnWriter`] / [`AsnReader`]: a scoped builder and a cursor that follow
//!   the wire grammar call by call.
//! - [`Gtv`]: the value tree, encoded and decoded through the conversion
//!   traits of the `gtv` crate.
//!
//! ```
//! use gtv::decoder::Decoder;
//! use gtv::encoder::Encoder;
//! use gtv_asn1::Gtv;
//! use gtv_buffer::Buffer;
//!
//! let value = Gtv::Dict(vec![("key1".into(), "value1".into())]);
//! let encoded: Buffer = value.encode().unwrap();
//! assert_eq!(encoded.to_hex(), "a414301230100c046b657931a2080c0676616c756531");
//!
//! let decoded: Gtv = encoded.decode().unwrap();
//! assert_eq!(decoded, value);
//! ```

#![forbid(unsafe_code)]

pub mod error;
mod options;
pub mod reader;
pub mod value;
pub mod writer;

pub use gtv_der::Choice;
pub use options::DecodeOptions;
pub use reader::AsnReader;
pub use value::Gtv;
pub use writer::AsnWriter;
