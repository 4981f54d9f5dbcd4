use ark_bn254::Fr;
use ark_ec::{
    short_weierstrass::{Affine, SWCurveConfig},
    AffineRepr,
};
use ark_ff::{BigInteger, Field, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::consts::BYTES_PER_FIELD_ELEMENT;

// We define our own error instead of using io::ErrorKind::InvalidData
// because we want this to compile in no-std environments.
#[derive(Debug, thiserror::Error)]
pub enum PointReadError {
    #[error("Invalid point data: {0}")]
    InvalidData(String),

    #[error("Deserialization failed")]
    DeserializationError,
}

pub type Result<T> = core::result::Result<T, PointReadError>;

/// Group elements are stored in the arkworks compressed encoding. Decoding
/// checks that the point is on the curve and in the prime-order subgroup.
pub trait ReadPointFromBytes: AffineRepr {
    /// Length of the compressed encoding: 32 bytes for G1, 64 for G2.
    fn compressed_point_size() -> usize {
        Self::zero().compressed_size()
    }

    fn read_point_from_bytes_compressed(bytes: &[u8]) -> Result<Self> {
        let expected = Self::compressed_point_size();
        if bytes.len() != expected {
            return Err(PointReadError::InvalidData(alloc::format!(
                "expected {} bytes for a point, got {}",
                expected,
                bytes.len()
            )));
        }
        Self::deserialize_compressed(bytes).map_err(|_| PointReadError::DeserializationError)
    }
}

impl<P: SWCurveConfig> ReadPointFromBytes for Affine<P> {}

/// Counterpart of [ReadPointFromBytes]. Serializing a valid affine point into
/// a `Vec` cannot fail, so the encoding is returned directly.
pub trait WritePointToBytes: CanonicalSerialize {
    fn write_point_to_bytes_compressed(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.compressed_size());
        // Writing into a Vec<u8> is infallible.
        let _ = self.serialize_compressed(&mut bytes);
        bytes
    }
}

impl<P: SWCurveConfig> WritePointToBytes for Affine<P> {}

// A new trait for Fr for reading from bytes in big endian format
pub trait ReadFrFromBytes: Field {
    fn deserialize_from_bytes_be(bytes: &[u8]) -> Result<Self>;
    fn to_bytes_be(&self) -> [u8; BYTES_PER_FIELD_ELEMENT];
}

// Implement ReadFrFromBytes trait for Fr
impl ReadFrFromBytes for Fr {
    /// Rejects encodings that are not exactly 32 bytes or that are not
    /// canonical, i.e. not strictly smaller than the field modulus.
    fn deserialize_from_bytes_be(bytes: &[u8]) -> Result<Fr> {
        if bytes.len() != BYTES_PER_FIELD_ELEMENT {
            return Err(PointReadError::InvalidData(alloc::format!(
                "expected {} bytes for a field element, got {}",
                BYTES_PER_FIELD_ELEMENT,
                bytes.len()
            )));
        }
        let mut bytes_le = [0u8; BYTES_PER_FIELD_ELEMENT];
        bytes_le.copy_from_slice(bytes);
        bytes_le.reverse();
        Fr::deserialize_uncompressed(&bytes_le[..])
            .map_err(|_| PointReadError::DeserializationError)
    }

    fn to_bytes_be(&self) -> [u8; BYTES_PER_FIELD_ELEMENT] {
        let mut out = [0u8; BYTES_PER_FIELD_ELEMENT];
        out.copy_from_slice(&self.into_bigint().to_bytes_be());
        out
    }
}
