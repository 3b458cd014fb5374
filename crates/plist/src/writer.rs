use crate::value::DocumentValue;
use crate::{MAGIC, VERSION};

/// A value flattened into the object table, children replaced by indices.
enum Flat<'a> {
    Scalar(&'a DocumentValue),
    Key(&'a str),
    Array(Vec<usize>),
    Dictionary { keys: Vec<usize>, values: Vec<usize> },
}

/// Encodes `value` as a `bplist00` document.
///
/// Objects are written without deduplication, root first.
pub fn to_bytes(value: &DocumentValue) -> Vec<u8> {
    let mut objects = Vec::new();
    flatten(value, &mut objects);
    let ref_size = width_for(objects.len() as u64);

    let mut out = Vec::new();
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(VERSION);

    let mut offsets = Vec::with_capacity(objects.len());
    for object in &objects {
        offsets.push(out.len() as u64);
        write_object(object, ref_size, &mut out);
    }

    let offset_table = out.len() as u64;
    let offset_size = width_for(offset_table);
    for offset in &offsets {
        write_sized(*offset, offset_size, &mut out);
    }

    out.extend_from_slice(&[0u8; 6]);
    out.push(offset_size as u8);
    out.push(ref_size as u8);
    out.extend_from_slice(&(objects.len() as u64).to_be_bytes());
    out.extend_from_slice(&0u64.to_be_bytes());
    out.extend_from_slice(&offset_table.to_be_bytes());
    out
}

fn flatten<'a>(value: &'a DocumentValue, objects: &mut Vec<Flat<'a>>) -> usize {
    let index = objects.len();
    match value {
        DocumentValue::Array(items) => {
            objects.push(Flat::Array(Vec::new()));
            let refs = items.iter().map(|item| flatten(item, objects)).collect();
            objects[index] = Flat::Array(refs);
        }
        DocumentValue::Dictionary(map) => {
            objects.push(Flat::Dictionary { keys: Vec::new(), values: Vec::new() });
            let mut keys = Vec::with_capacity(map.len());
            let mut values = Vec::with_capacity(map.len());
            for (key, item) in map {
                keys.push(objects.len());
                objects.push(Flat::Key(key));
                values.push(flatten(item, objects));
            }
            objects[index] = Flat::Dictionary { keys, values };
        }
        scalar => objects.push(Flat::Scalar(scalar)),
    }
    index
}

fn write_object(object: &Flat<'_>, ref_size: usize, out: &mut Vec<u8>) {
    match object {
        Flat::Key(key) => write_string(key, out),
        Flat::Array(refs) => {
            write_header(0xA, refs.len(), out);
            for r in refs {
                write_sized(*r as u64, ref_size, out);
            }
        }
        Flat::Dictionary { keys, values } => {
            write_header(0xD, keys.len(), out);
            for r in keys.iter().chain(values) {
                write_sized(*r as u64, ref_size, out);
            }
        }
        Flat::Scalar(value) => match value {
            DocumentValue::Null => out.push(0x00),
            DocumentValue::Boolean(false) => out.push(0x08),
            DocumentValue::Boolean(true) => out.push(0x09),
            DocumentValue::Integer(i) => write_integer(*i, out),
            DocumentValue::Real(r) => {
                out.push(0x23);
                out.extend_from_slice(&r.to_bits().to_be_bytes());
            }
            DocumentValue::String(s) => write_string(s, out),
            DocumentValue::Data(bytes) => {
                write_header(0x4, bytes.len(), out);
                out.extend_from_slice(bytes);
            }
            // Containers are flattened before they get here.
            DocumentValue::Array(_) | DocumentValue::Dictionary(_) => {}
        },
    }
}

fn write_string(s: &str, out: &mut Vec<u8>) {
    if s.is_ascii() {
        write_header(0x5, s.len(), out);
        out.extend_from_slice(s.as_bytes());
    } else {
        let units: Vec<u16> = s.encode_utf16().collect();
        write_header(0x6, units.len(), out);
        for unit in units {
            out.extend_from_slice(&unit.to_be_bytes());
        }
    }
}

/// Negative values need the signed eight-byte form.
fn write_integer(i: i64, out: &mut Vec<u8>) {
    if i < 0 {
        out.push(0x13);
        out.extend_from_slice(&i.to_be_bytes());
    } else {
        write_unsigned(i as u64, out);
    }
}

fn write_unsigned(v: u64, out: &mut Vec<u8>) {
    let (nibble, size) = match v {
        0..=0xFF => (0, 1),
        0x100..=0xFFFF => (1, 2),
        0x1_0000..=0xFFFF_FFFF => (2, 4),
        _ => (3, 8),
    };
    out.push(0x10 | nibble);
    write_sized(v, size, out);
}

fn write_header(kind: u8, len: usize, out: &mut Vec<u8>) {
    if len < 0x0F {
        out.push((kind << 4) | len as u8);
    } else {
        out.push((kind << 4) | 0x0F);
        write_unsigned(len as u64, out);
    }
}

fn write_sized(v: u64, size: usize, out: &mut Vec<u8>) {
    out.extend_from_slice(&v.to_be_bytes()[8 - size..]);
}

fn width_for(max: u64) -> usize {
    match max {
        0..=0xFF => 1,
        0x100..=0xFFFF => 2,
        0x1_0000..=0xFFFF_FFFF => 4,
        _ => 8,
    }
}
