//! Error types for curve extraction.

use crate::blob::BlobLengthError;
use crate::scanner::CurveKey;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Document does not match the note schema: {0}")]
    SchemaMismatch(String),

    #[error("No '{0}' data found in the note")]
    MissingGeometry(CurveKey),

    #[error("Blob '{key}' cannot be decoded: {source}")]
    InvalidBlobLength {
        key: CurveKey,
        #[source]
        source: BlobLengthError,
    },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Stroke {stroke} needs points {start}..{end} but only {available} were decoded")]
    GeometryOverrun {
        stroke: usize,
        start: usize,
        end: usize,
        available: usize,
    },

    #[error("Stroke {stroke} has no width ({available} widths decoded)")]
    WidthIndexOutOfRange { stroke: usize, available: usize },
}
