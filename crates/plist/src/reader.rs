//! Decoder for the `bplist00` layout:
//!
//! ```text
//! "bplist00" | objects ... | offset table | trailer (32 bytes)
//! ```
//!
//! The trailer records the width of offset-table entries and object
//! references, the object count, the root object and where the offset table
//! starts. Every object begins with a marker byte whose high nibble is the
//! type and whose low nibble is a size or length hint.

use crate::error::PlistError;
use crate::value::{Dictionary, DocumentValue};
use crate::{HEADER_LEN, MAGIC, TRAILER_LEN, VERSION};

const MAX_DEPTH: usize = 512;

/// Shared objects are decoded once per reference, so the decoded tree can
/// outgrow the file. Each object costs one unit plus its payload bytes.
const EXPANSION_FACTOR: usize = 32;
const MIN_EXPANSION_BUDGET: usize = 1 << 16;

/// Decodes a binary property list into its root value.
pub fn from_bytes(bytes: &[u8]) -> Result<DocumentValue, PlistError> {
    let mut reader = BinaryReader::new(bytes)?;
    let root = reader.trailer.root;
    reader.read_object(root, 0)
}

#[derive(Debug, Clone, Copy)]
struct Trailer {
    offset_size: usize,
    ref_size: usize,
    object_count: usize,
    root: usize,
    offset_table: usize,
}

struct BinaryReader<'a> {
    bytes: &'a [u8],
    trailer: Trailer,
    offsets: Vec<usize>,
    /// Objects currently being decoded further up the stack.
    open: Vec<bool>,
    spent: usize,
    budget: usize,
}

impl<'a> BinaryReader<'a> {
    fn new(bytes: &'a [u8]) -> Result<Self, PlistError> {
        if bytes.len() < HEADER_LEN || &bytes[..MAGIC.len()] != MAGIC {
            return Err(PlistError::InvalidMagic);
        }
        let version = &bytes[MAGIC.len()..HEADER_LEN];
        if version != VERSION {
            return Err(PlistError::UnsupportedVersion(
                String::from_utf8_lossy(version).into_owned(),
            ));
        }
        if bytes.len() < HEADER_LEN + TRAILER_LEN {
            return Err(PlistError::InvalidTrailer(format!(
                "file is only {} bytes long",
                bytes.len()
            )));
        }

        let trailer = parse_trailer(&bytes[bytes.len() - TRAILER_LEN..], bytes.len())?;
        log::debug!(
            "bplist trailer: {} objects, root {}, offset size {}, ref size {}",
            trailer.object_count,
            trailer.root,
            trailer.offset_size,
            trailer.ref_size
        );

        let mut reader = Self {
            bytes,
            trailer,
            offsets: Vec::with_capacity(trailer.object_count),
            open: vec![false; trailer.object_count],
            spent: 0,
            budget: bytes
                .len()
                .saturating_mul(EXPANSION_FACTOR)
                .max(MIN_EXPANSION_BUDGET),
        };
        reader.read_offset_table()?;
        Ok(reader)
    }

    fn read_offset_table(&mut self) -> Result<(), PlistError> {
        let object_area_end = self.trailer.offset_table;
        for object in 0..self.trailer.object_count {
            let at = self.trailer.offset_table + object * self.trailer.offset_size;
            let offset = self.read_uint(at, self.trailer.offset_size)?;
            let offset = usize::try_from(offset)
                .map_err(|_| PlistError::OffsetOutOfRange { object, offset: usize::MAX })?;
            if offset < HEADER_LEN || offset >= object_area_end {
                return Err(PlistError::OffsetOutOfRange { object, offset });
            }
            self.offsets.push(offset);
        }
        Ok(())
    }

    fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], PlistError> {
        offset
            .checked_add(len)
            .and_then(|end| self.bytes.get(offset..end))
            .ok_or(PlistError::Truncated {
                offset,
                needed: len,
                available: self.bytes.len().saturating_sub(offset),
            })
    }

    fn charge(&mut self, cost: usize) -> Result<(), PlistError> {
        self.spent = self.spent.saturating_add(cost);
        if self.spent > self.budget {
            return Err(PlistError::ExpansionLimit(self.budget));
        }
        Ok(())
    }

    fn read_uint(&self, offset: usize, size: usize) -> Result<u64, PlistError> {
        Ok(be_uint(self.slice(offset, size)?))
    }

    fn read_object(&mut self, object: usize, depth: usize) -> Result<DocumentValue, PlistError> {
        if depth > MAX_DEPTH {
            return Err(PlistError::DepthExceeded(MAX_DEPTH));
        }
        let offset = *self
            .offsets
            .get(object)
            .ok_or(PlistError::ObjectRefOutOfRange(object))?;
        if self.open[object] {
            return Err(PlistError::Cycle(object));
        }
        self.charge(1)?;

        let marker = self.slice(offset, 1)?[0];
        let info = marker & 0x0F;
        let value = match marker >> 4 {
            0x0 => match marker {
                0x00 | 0x0F => DocumentValue::Null,
                0x08 => DocumentValue::Boolean(false),
                0x09 => DocumentValue::Boolean(true),
                _ => return Err(PlistError::UnknownMarker { marker, offset }),
            },
            0x1 => DocumentValue::Integer(self.read_integer(offset + 1, info)?),
            0x2 => DocumentValue::Real(self.read_real(offset + 1, info, marker)?),
            0x3 if marker == 0x33 => DocumentValue::Real(self.read_real(offset + 1, 3, marker)?),
            0x4 => {
                let (len, start) = self.read_length(offset, info)?;
                self.charge(len)?;
                DocumentValue::Data(self.slice(start, len)?.to_vec())
            }
            0x5 => {
                let (len, start) = self.read_length(offset, info)?;
                self.charge(len)?;
                let raw = self.slice(start, len)?;
                let s = std::str::from_utf8(raw).map_err(|e| PlistError::InvalidString {
                    offset,
                    message: e.to_string(),
                })?;
                DocumentValue::String(s.to_string())
            }
            0x6 => {
                let (units, start) = self.read_length(offset, info)?;
                let byte_len = units.checked_mul(2).ok_or(PlistError::InvalidLength(offset))?;
                self.charge(byte_len)?;
                let raw = self.slice(start, byte_len)?;
                let utf16: Vec<u16> = raw
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                let s = String::from_utf16(&utf16).map_err(|e| PlistError::InvalidString {
                    offset,
                    message: e.to_string(),
                })?;
                DocumentValue::String(s)
            }
            0x8 => {
                let uid = self.read_uint(offset + 1, usize::from(info) + 1)?;
                DocumentValue::Integer(
                    i64::try_from(uid).map_err(|_| PlistError::IntegerOverflow(offset))?,
                )
            }
            0xA | 0xC => {
                let (len, start) = self.read_length(offset, info)?;
                let refs = self.read_refs(start, len)?;
                self.open[object] = true;
                let items = refs
                    .into_iter()
                    .map(|r| self.read_object(r, depth + 1))
                    .collect::<Result<Vec<_>, _>>();
                self.open[object] = false;
                DocumentValue::Array(items?)
            }
            0xD => {
                let (len, start) = self.read_length(offset, info)?;
                let refs = self.read_refs(start, len.checked_mul(2).ok_or(PlistError::InvalidLength(offset))?)?;
                self.open[object] = true;
                let map = self.read_dictionary(&refs, len, depth);
                self.open[object] = false;
                DocumentValue::Dictionary(map?)
            }
            _ => return Err(PlistError::UnknownMarker { marker, offset }),
        };
        Ok(value)
    }

    fn read_dictionary(
        &mut self,
        refs: &[usize],
        len: usize,
        depth: usize,
    ) -> Result<Dictionary, PlistError> {
        let (keys, values) = refs.split_at(len);
        let mut map = Dictionary::new();
        for (&key_ref, &value_ref) in keys.iter().zip(values) {
            let key = match self.read_object(key_ref, depth + 1)? {
                DocumentValue::String(s) => s,
                _ => return Err(PlistError::NonStringKey(key_ref)),
            };
            let value = self.read_object(value_ref, depth + 1)?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Integers are big-endian; widths below eight bytes are unsigned.
    fn read_integer(&self, offset: usize, info: u8) -> Result<i64, PlistError> {
        match info {
            0..=2 => Ok(self.read_uint(offset, 1 << info)? as i64),
            3 => Ok(self.read_uint(offset, 8)? as i64),
            4 => {
                let raw = self.slice(offset, 16)?;
                let mut buf = [0u8; 16];
                buf.copy_from_slice(raw);
                i64::try_from(i128::from_be_bytes(buf))
                    .map_err(|_| PlistError::IntegerOverflow(offset))
            }
            _ => Err(PlistError::UnknownMarker { marker: 0x10 | info, offset: offset - 1 }),
        }
    }

    fn read_real(&self, offset: usize, info: u8, marker: u8) -> Result<f64, PlistError> {
        match info {
            2 => {
                let raw = self.slice(offset, 4)?;
                Ok(f64::from(f32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]])))
            }
            3 => Ok(f64::from_bits(self.read_uint(offset, 8)?)),
            _ => Err(PlistError::UnknownMarker { marker, offset: offset - 1 }),
        }
    }

    /// Returns the element count and where the payload starts. A low nibble
    /// of 0xF means the count follows as an integer object.
    fn read_length(&self, offset: usize, info: u8) -> Result<(usize, usize), PlistError> {
        if info != 0x0F {
            return Ok((usize::from(info), offset + 1));
        }
        let int_marker = self.slice(offset + 1, 1)?[0];
        if int_marker >> 4 != 0x1 || int_marker & 0x0F > 3 {
            return Err(PlistError::InvalidLength(offset));
        }
        let size = 1usize << (int_marker & 0x0F);
        let len = self.read_uint(offset + 2, size)?;
        let len = usize::try_from(len).map_err(|_| PlistError::InvalidLength(offset))?;
        Ok((len, offset + 2 + size))
    }

    fn read_refs(&self, start: usize, count: usize) -> Result<Vec<usize>, PlistError> {
        let ref_size = self.trailer.ref_size;
        let byte_len = count
            .checked_mul(ref_size)
            .ok_or(PlistError::InvalidLength(start))?;
        let raw = self.slice(start, byte_len)?;
        raw.chunks_exact(ref_size)
            .map(|chunk| {
                let r = be_uint(chunk);
                usize::try_from(r)
                    .ok()
                    .filter(|&r| r < self.trailer.object_count)
                    .ok_or_else(|| {
                        PlistError::ObjectRefOutOfRange(usize::try_from(r).unwrap_or(usize::MAX))
                    })
            })
            .collect()
    }
}

fn parse_trailer(raw: &[u8], file_len: usize) -> Result<Trailer, PlistError> {
    let offset_size = usize::from(raw[6]);
    let ref_size = usize::from(raw[7]);
    let object_count = be_uint(&raw[8..16]);
    let root = be_uint(&raw[16..24]);
    let offset_table = be_uint(&raw[24..32]);

    if !(1..=8).contains(&offset_size) || !(1..=8).contains(&ref_size) {
        return Err(PlistError::InvalidTrailer(format!(
            "unsupported integer widths (offset {offset_size}, ref {ref_size})"
        )));
    }
    let object_count = usize::try_from(object_count)
        .map_err(|_| PlistError::InvalidTrailer("object count too large".to_string()))?;
    let offset_table = usize::try_from(offset_table)
        .map_err(|_| PlistError::InvalidTrailer("offset table position too large".to_string()))?;
    let root = usize::try_from(root)
        .ok()
        .filter(|&r| r < object_count)
        .ok_or_else(|| PlistError::InvalidTrailer(format!("root object {root} out of range")))?;

    let table_end = object_count
        .checked_mul(offset_size)
        .and_then(|len| len.checked_add(offset_table));
    match table_end {
        Some(end) if offset_table >= HEADER_LEN && end <= file_len - TRAILER_LEN => {}
        _ => {
            return Err(PlistError::InvalidTrailer(
                "offset table lies outside the file".to_string(),
            ));
        }
    }

    Ok(Trailer {
        offset_size,
        ref_size,
        object_count,
        root,
        offset_table,
    })
}

fn be_uint(raw: &[u8]) -> u64 {
    raw.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}
