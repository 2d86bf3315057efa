//! Decoder trait for type-safe conversions.
//!
//! The `Decoder` trait converts a source type `T` into a destination type
//! `D`. It is used to go from textual or raw representations towards the
//! structured value model.
//!
//! # Design Pattern
//!
//! 1. `Decoder<T, D>` - Performs the actual conversion
//! 2. `DecodableFrom<T>` - Marker trait constraining valid conversions
//!
//! # Implementation Guide
//!
//! ```no_run
//! use gtv::decoder::{Decoder, DecodableFrom};
//!
//! struct Hex(String);
//! struct Bytes(Vec<u8>);
//!
//! #[derive(Debug)]
//! struct MyError;
//!
//! impl DecodableFrom<Hex> for Bytes {}
//!
//! impl Decoder<Hex, Bytes> for Hex {
//!     type Error = MyError;
//!
//!     fn decode(&self) -> Result<Bytes, Self::Error> {
//!         Ok(Bytes(self.0.as_bytes().to_vec()))
//!     }
//! }
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// This trait is implemented by the source type `T`. The destination type
/// must implement `DecodableFrom<T>`.
///
/// ```ignore
/// use gtv::decoder::Decoder;
/// use gtv_asn1::Gtv;
/// use gtv_buffer::Buffer;
///
/// let buffer = Buffer::from(vec![0xa0, 0x02, 0x05, 0x00]);
/// let value: Gtv = buffer.decode().unwrap();
/// ```
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed for the destination type.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
///
/// It has no methods; it only gates which `Decoder` implementations exist.
pub trait DecodableFrom<T> {}
