use noteink::core::blob::encode;
use noteink::plist::{Dictionary, DocumentValue, to_bytes};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::FileOptions;

/// Entry path used by the note application
pub const SESSION_ENTRY: &str = "Lecture/Session.plist";

/// A dictionary holding the three curve blobs the renderer needs
pub fn curve_dict(points: &[f32], num_points: &[i32], widths: &[f32]) -> DocumentValue {
    dict(vec![
        ("curvespoints", DocumentValue::Data(encode(points))),
        ("curvesnumpoints", DocumentValue::Data(encode(num_points))),
        ("curveswidth", DocumentValue::Data(encode(widths))),
        (
            "curvesfractionalwidths",
            DocumentValue::Data(encode::<f32>(&vec![1.0; points.len() / 2])),
        ),
    ])
}

/// Build a dictionary from key/value pairs
pub fn dict(entries: Vec<(&str, DocumentValue)>) -> DocumentValue {
    let map: Dictionary = entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    DocumentValue::Dictionary(map)
}

/// A keyed-archive root wrapping `objects`
pub fn session(objects: Vec<DocumentValue>) -> DocumentValue {
    let mut all = vec![DocumentValue::from("$null")];
    all.extend(objects);
    dict(vec![
        ("$archiver", DocumentValue::from("NSKeyedArchiver")),
        ("$version", DocumentValue::Integer(100000)),
        ("$top", dict(vec![("root", DocumentValue::Integer(1))])),
        ("$objects", DocumentValue::Array(all)),
    ])
}

/// Zip the given entries into an archive image
pub fn archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in entries {
        writer
            .start_file(*name, FileOptions::default())
            .expect("start zip entry");
        writer.write_all(bytes).expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// A note archive whose session holds `objects`
pub fn note_with_objects(objects: Vec<DocumentValue>) -> Vec<u8> {
    let plist = to_bytes(&session(objects));
    archive(&[
        ("Lecture/metadata.plist", &b"not the session"[..]),
        (SESSION_ENTRY, plist.as_slice()),
    ])
}

/// A note archive with a single curve dictionary
pub fn note_with_curves(points: &[f32], num_points: &[i32], widths: &[f32]) -> Vec<u8> {
    note_with_objects(vec![curve_dict(points, num_points, widths)])
}
