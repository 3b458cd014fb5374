//! Packed numeric arrays.
//!
//! Curve blobs are flat runs of 4-byte little-endian values, either IEEE-754
//! single precision floats or two's complement integers.

use thiserror::Error;

/// Byte width of every packed element.
pub const ELEMENT_WIDTH: usize = 4;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("length {len} is not a multiple of 4")]
pub struct BlobLengthError {
    pub len: usize,
}

/// A fixed-width value that can be read from and written to a blob.
pub trait PackedValue: Copy {
    fn from_le(bytes: [u8; ELEMENT_WIDTH]) -> Self;
    fn to_le(self) -> [u8; ELEMENT_WIDTH];
}

impl PackedValue for f32 {
    fn from_le(bytes: [u8; ELEMENT_WIDTH]) -> Self {
        f32::from_le_bytes(bytes)
    }

    fn to_le(self) -> [u8; ELEMENT_WIDTH] {
        self.to_le_bytes()
    }
}

impl PackedValue for i32 {
    fn from_le(bytes: [u8; ELEMENT_WIDTH]) -> Self {
        i32::from_le_bytes(bytes)
    }

    fn to_le(self) -> [u8; ELEMENT_WIDTH] {
        self.to_le_bytes()
    }
}

/// Reinterprets `blob` as a sequence of `T`.
pub fn decode<T: PackedValue>(blob: &[u8]) -> Result<Vec<T>, BlobLengthError> {
    if blob.len() % ELEMENT_WIDTH != 0 {
        return Err(BlobLengthError { len: blob.len() });
    }
    Ok(blob
        .chunks_exact(ELEMENT_WIDTH)
        .map(|c| T::from_le([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Packs `values` into a blob; the inverse of [`decode`].
pub fn encode<T: PackedValue>(values: &[T]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le()).collect()
}
