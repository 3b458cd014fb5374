use thiserror::Error;

/// Failures while decoding a binary property list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlistError {
    #[error("Not a binary property list (missing 'bplist' magic)")]
    InvalidMagic,

    #[error("Unsupported binary property list version '{0}'")]
    UnsupportedVersion(String),

    #[error("Unexpected end of data: needed {needed} bytes at offset {offset}, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Invalid trailer: {0}")]
    InvalidTrailer(String),

    #[error("Object {object} has offset {offset} outside the object area")]
    OffsetOutOfRange { object: usize, offset: usize },

    #[error("Object reference {0} is out of range")]
    ObjectRefOutOfRange(usize),

    #[error("Unknown object marker 0x{marker:02x} at offset {offset}")]
    UnknownMarker { marker: u8, offset: usize },

    #[error("Invalid length encoding at offset {0}")]
    InvalidLength(usize),

    #[error("Integer at offset {0} does not fit in 64 bits")]
    IntegerOverflow(usize),

    #[error("Invalid string data at offset {offset}: {message}")]
    InvalidString { offset: usize, message: String },

    #[error("Dictionary key at object {0} is not a string")]
    NonStringKey(usize),

    #[error("Object {0} references itself")]
    Cycle(usize),

    #[error("Nesting deeper than {0} levels")]
    DepthExceeded(usize),

    #[error("Decoded document exceeds its expansion budget of {0} units")]
    ExpansionLimit(usize),
}
