//! # gtv
//!
//! Core traits for encoding and decoding GTV values.
//!
//! This crate defines the `Decoder` and `Encoder` traits that establish the
//! type-safe conversion pattern used by the other crates of the workspace.
//!
//! ## Overview
//!
//! The conversion pattern flows like this:
//! ```text
//! hex string → Buffer → Gtv
//! ```
//!
//! Each step uses the `Decoder` trait to convert from one type to the next,
//! and the `Encoder` trait to convert in the reverse direction.
//!
//! ## Type Safety
//!
//! The traits use marker traits (`DecodableFrom` and `EncodableTo`) so that
//! only conversions that have been explicitly declared can be called.
//!
//! ## Example
//!
//! The implementations live in the `gtv-buffer` and `gtv-asn1` crates:
//!
//! ```ignore
//! use gtv::decoder::Decoder;
//! use gtv::encoder::Encoder;
//! use gtv_asn1::Gtv;
//! use gtv_buffer::Buffer;
//!
//! // Decode a hex string into bytes, then into a value
//! let buffer: Buffer = "a303020101".decode().unwrap();
//! let value: Gtv = buffer.decode().unwrap();
//! assert_eq!(value, Gtv::Integer(1));
//!
//! // And back again
//! let encoded: Buffer = value.encode().unwrap();
//! assert_eq!(encoded.to_hex(), "a303020101");
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
