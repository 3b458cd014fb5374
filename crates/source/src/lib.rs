//! Entry sources for the pipeline.
//!
//! A note is a zip container; the pipeline only needs the bytes of one entry
//! out of it. The `EntrySource` trait hides where the container lives so the
//! same pipeline can read from disk or from memory.
//!
//! ## Example
//!
//! ```ignore
//! use noteink_source::{read_entry, EntrySource, ZipEntrySource};
//!
//! // Opens the archive, extracts the first matching entry and closes it again.
//! let entry = read_entry("lecture.note", "Session.plist")?;
//! println!("{} is {} bytes", entry.name, entry.bytes.len());
//! ```

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

/// Upper bound on the buffer reserved from an entry's declared size.
const MAX_PREALLOCATION: u64 = 1 << 26;

/// Error type for archive access.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Unable to open archive: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    #[error("Unable to find an entry matching '{pattern}' in {archive}")]
    EntryNotFound { pattern: String, archive: String },
}

impl From<ZipError> for SourceError {
    fn from(err: ZipError) -> Self {
        match err {
            ZipError::Io(e) => SourceError::Io(e),
            other => SourceError::CorruptArchive(other.to_string()),
        }
    }
}

/// One fully materialized archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A container the pipeline can pull named entries from.
pub trait EntrySource {
    /// Names of all entries, in archive order.
    fn entry_names(&mut self) -> Result<Vec<String>, SourceError>;

    /// Reads the first entry whose name contains `pattern`.
    fn read_matching(&mut self, pattern: &str) -> Result<RawEntry, SourceError>;

    /// Human-readable label used in error messages.
    fn label(&self) -> &str;
}

/// A zip container over any seekable reader.
pub struct ZipEntrySource<R: Read + Seek> {
    archive: ZipArchive<R>,
    label: String,
}

impl ZipEntrySource<File> {
    /// Opens a zip file on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::new(file, path.display().to_string())
    }
}

impl ZipEntrySource<Cursor<Vec<u8>>> {
    /// Wraps an in-memory zip image.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, SourceError> {
        Self::new(Cursor::new(bytes), "<memory>".to_string())
    }
}

impl<R: Read + Seek> ZipEntrySource<R> {
    pub fn new(reader: R, label: String) -> Result<Self, SourceError> {
        let archive = ZipArchive::new(reader)?;
        log::debug!("Opened archive {} with {} entries", label, archive.len());
        Ok(Self { archive, label })
    }

    /// Number of entries in the container.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }
}

impl<R: Read + Seek> EntrySource for ZipEntrySource<R> {
    fn entry_names(&mut self) -> Result<Vec<String>, SourceError> {
        (0..self.archive.len())
            .map(|index| Ok(self.archive.by_index(index)?.name().to_string()))
            .collect()
    }

    fn read_matching(&mut self, pattern: &str) -> Result<RawEntry, SourceError> {
        for index in 0..self.archive.len() {
            let mut entry = self.archive.by_index(index)?;
            if !entry.name().contains(pattern) {
                continue;
            }
            let name = entry.name().to_string();
            let mut bytes = Vec::with_capacity(capacity_hint(entry.size()));
            entry.read_to_end(&mut bytes)?;
            log::info!("Found entry '{}' ({} bytes) in {}", name, bytes.len(), self.label);
            return Ok(RawEntry { name, bytes });
        }
        Err(SourceError::EntryNotFound {
            pattern: pattern.to_string(),
            archive: self.label.clone(),
        })
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Opens the archive at `path`, extracts the first entry matching `pattern`
/// and releases the file before returning.
pub fn read_entry<P: AsRef<Path>>(path: P, pattern: &str) -> Result<RawEntry, SourceError> {
    let mut source = ZipEntrySource::open(path)?;
    source.read_matching(pattern)
}

/// The declared size comes from the archive header and may be corrupt.
fn capacity_hint(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_PREALLOCATION)).unwrap_or(0)
}
