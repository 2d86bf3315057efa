//! Encoder trait, the reverse direction of [`crate::decoder::Decoder`].

/// Encoder trait for converting from type `T` into type `E`.
///
/// ```ignore
/// use gtv::encoder::Encoder;
/// use gtv_asn1::Gtv;
/// use gtv_buffer::Buffer;
///
/// let bytes: Buffer = Gtv::Null.encode().unwrap();
/// assert_eq!(bytes.as_bytes(), &[0xa0, 0x02, 0x05, 0x00]);
/// ```
pub trait Encoder<T, E: EncodableTo<T>> {
    /// The error type returned when encoding fails.
    type Error;

    /// Encodes `self` into type `E`.
    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker trait indicating that type `E` can be produced by encoding `T`.
pub trait EncodableTo<T> {}
