//! # noteink-core
//!
//! Turns a decoded session property list into stroke geometry:
//! - **scanner**: finds the curve blobs among the archived objects
//! - **blob**: reinterprets a blob as packed little-endian numbers
//! - **strokes**: pairs coordinates into points and cuts them into strokes
//! - **error**: error types for the above
//!
//! ## Design Principle
//!
//! This crate does no I/O. It borrows from the value graph produced by
//! `noteink-plist` and hands back an owned [`Drawing`].

pub use noteink_plist as plist;
pub use noteink_types as types;

pub mod blob;
pub mod error;
pub mod scanner;
pub mod strokes;

pub use error::GeometryError;
pub use scanner::{CurveKey, NamedBlobs, scan_objects};
pub use strokes::{CurveArrays, assemble, pair_points};
pub use types::{Canvas, Drawing, Point, Stroke, StrokeSpan};

use plist::DocumentValue;

/// Runs the scanner, decoder and assembler over a session document.
pub fn extract_drawing(root: &DocumentValue) -> Result<Drawing, GeometryError> {
    let blobs = scan_objects(root)?;
    let arrays = CurveArrays::decode(&blobs)?;
    let points = pair_points(&arrays.points)?;
    let drawing = assemble(points, &arrays.num_points, arrays.width.as_deref())?;
    log::info!(
        "Assembled {} strokes from {} points",
        drawing.stroke_count(),
        drawing.points().len()
    );
    Ok(drawing)
}
