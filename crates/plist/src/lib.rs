//! Binary property list (`bplist00`) support.
//!
//! Decoding produces a [`DocumentValue`], a closed tagged union over the
//! value kinds a property list can hold. Encoding goes the other way and is
//! mostly useful for building fixtures.
//!
//! ## Example
//!
//! ```ignore
//! use noteink_plist::{from_bytes, to_bytes, DocumentValue};
//!
//! let bytes = to_bytes(&DocumentValue::from(vec![DocumentValue::from("hello")]));
//! let value = from_bytes(&bytes)?;
//! assert_eq!(value.as_array().map(|a| a.len()), Some(1));
//! ```

mod error;
mod reader;
mod value;
mod writer;

pub use error::PlistError;
pub use reader::from_bytes;
pub use value::{Dictionary, DocumentValue};
pub use writer::to_bytes;

/// Leading magic shared by every binary property list, followed by a
/// two-character format version.
pub(crate) const MAGIC: &[u8; 6] = b"bplist";
pub(crate) const VERSION: &[u8; 2] = b"00";
pub(crate) const HEADER_LEN: usize = 8;
pub(crate) const TRAILER_LEN: usize = 32;
