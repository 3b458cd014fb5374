//! Locates the curve blobs inside a keyed-archive session document.
//!
//! The archive keeps every object in a flat `$objects` array. Curve data sits
//! in dictionaries among them, each key stored as a raw data blob. The first
//! dictionary that defines a key supplies it; later ones never overwrite it.

use crate::error::GeometryError;
use noteink_plist::{Dictionary, DocumentValue};
use std::fmt;
use std::ops::ControlFlow;

/// Top-level key holding the archived object table.
pub const OBJECTS_KEY: &str = "$objects";

/// The four curve blobs a note stores per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKey {
    /// Interleaved x, y coordinates (f32).
    Points,
    /// Point count of each stroke (i32).
    NumPoints,
    /// Width of each stroke (f32).
    Width,
    /// Per-point width factors (f32), decoded but not rendered.
    FractionalWidths,
}

impl CurveKey {
    pub const ALL: [CurveKey; 4] = [
        CurveKey::Points,
        CurveKey::NumPoints,
        CurveKey::Width,
        CurveKey::FractionalWidths,
    ];

    /// Dictionary key as written by the note application.
    pub fn as_str(self) -> &'static str {
        match self {
            CurveKey::Points => "curvespoints",
            CurveKey::NumPoints => "curvesnumpoints",
            CurveKey::Width => "curveswidth",
            CurveKey::FractionalWidths => "curvesfractionalwidths",
        }
    }
}

impl fmt::Display for CurveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blobs found so far, one optional slot per [`CurveKey`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NamedBlobs<'a> {
    pub points: Option<&'a [u8]>,
    pub num_points: Option<&'a [u8]>,
    pub width: Option<&'a [u8]>,
    pub fractional_widths: Option<&'a [u8]>,
}

impl<'a> NamedBlobs<'a> {
    pub fn get(&self, key: CurveKey) -> Option<&'a [u8]> {
        match key {
            CurveKey::Points => self.points,
            CurveKey::NumPoints => self.num_points,
            CurveKey::Width => self.width,
            CurveKey::FractionalWidths => self.fractional_widths,
        }
    }

    fn slot(&mut self, key: CurveKey) -> &mut Option<&'a [u8]> {
        match key {
            CurveKey::Points => &mut self.points,
            CurveKey::NumPoints => &mut self.num_points,
            CurveKey::Width => &mut self.width,
            CurveKey::FractionalWidths => &mut self.fractional_widths,
        }
    }

    pub fn is_complete(&self) -> bool {
        CurveKey::ALL.iter().all(|&key| self.get(key).is_some())
    }

    /// Fills empty slots from `dict`. Breaks once every slot is filled.
    fn absorb(&mut self, index: usize, dict: &'a Dictionary) -> ControlFlow<()> {
        for key in CurveKey::ALL {
            if self.get(key).is_some() {
                continue;
            }
            let Some(value) = dict.get(key.as_str()) else {
                continue;
            };
            match value.as_data() {
                Some(bytes) => {
                    log::debug!("Object {} supplies '{}' ({} bytes)", index, key, bytes.len());
                    *self.slot(key) = Some(bytes);
                }
                None => log::warn!(
                    "Object {} has '{}' as {} instead of data, skipping",
                    index,
                    key,
                    value.type_name()
                ),
            }
        }
        if self.is_complete() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Collects the curve blobs from the `$objects` array of `root`.
///
/// Non-dictionary objects are skipped. Slots stay empty when no dictionary
/// defines the key; deciding whether that is fatal is left to the caller.
pub fn scan_objects(root: &DocumentValue) -> Result<NamedBlobs<'_>, GeometryError> {
    let objects = root
        .get(OBJECTS_KEY)
        .ok_or_else(|| {
            GeometryError::SchemaMismatch(format!(
                "root {} has no '{}' entry",
                root.type_name(),
                OBJECTS_KEY
            ))
        })?;
    let objects = objects.as_array().ok_or_else(|| {
        GeometryError::SchemaMismatch(format!(
            "'{}' is {}, expected an array",
            OBJECTS_KEY,
            objects.type_name()
        ))
    })?;

    let mut found = NamedBlobs::default();
    let outcome = objects
        .iter()
        .enumerate()
        .filter_map(|(index, object)| object.as_dictionary().map(|dict| (index, dict)))
        .try_for_each(|(index, dict)| found.absorb(index, dict));
    if outcome.is_continue() {
        let missing: Vec<_> = CurveKey::ALL
            .iter()
            .filter(|&&key| found.get(key).is_none())
            .map(|key| key.as_str())
            .collect();
        log::debug!(
            "Scanned {} objects, not found: {}",
            objects.len(),
            missing.join(", ")
        );
    }
    Ok(found)
}
