//! Stroke assembly.
//!
//! Coordinates come interleaved (`x0 y0 x1 y1 ...`). Stroke `i` owns the next
//! `num_points[i]` points after stroke `i - 1` and is drawn `width[i]` wide.

use crate::blob::{self, PackedValue};
use crate::error::GeometryError;
use crate::scanner::{CurveKey, NamedBlobs};
use itertools::Itertools;
use noteink_types::{Drawing, Point, StrokeSpan};

/// The decoded curve arrays of one note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveArrays {
    pub points: Vec<f32>,
    pub num_points: Vec<i32>,
    pub width: Option<Vec<f32>>,
    pub fractional_widths: Option<Vec<f32>>,
}

impl CurveArrays {
    /// Decodes every blob that was found. Points and point counts are required.
    pub fn decode(blobs: &NamedBlobs<'_>) -> Result<Self, GeometryError> {
        let points = decode_required::<f32>(blobs, CurveKey::Points)?;
        let num_points = decode_required::<i32>(blobs, CurveKey::NumPoints)?;
        let width = decode_optional::<f32>(blobs, CurveKey::Width)?;
        let fractional_widths = decode_optional::<f32>(blobs, CurveKey::FractionalWidths)?;

        log::debug!(
            "Decoded {} coordinates, {} stroke counts, {} widths, {} fractional widths",
            points.len(),
            num_points.len(),
            width.as_ref().map_or(0, Vec::len),
            fractional_widths.as_ref().map_or(0, Vec::len)
        );
        Ok(Self {
            points,
            num_points,
            width,
            fractional_widths,
        })
    }
}

fn decode_optional<T: PackedValue>(
    blobs: &NamedBlobs<'_>,
    key: CurveKey,
) -> Result<Option<Vec<T>>, GeometryError> {
    blobs
        .get(key)
        .map(|bytes| {
            blob::decode::<T>(bytes)
                .map_err(|source| GeometryError::InvalidBlobLength { key, source })
        })
        .transpose()
}

fn decode_required<T: PackedValue>(
    blobs: &NamedBlobs<'_>,
    key: CurveKey,
) -> Result<Vec<T>, GeometryError> {
    decode_optional(blobs, key)?.ok_or(GeometryError::MissingGeometry(key))
}

/// Pairs interleaved coordinates into points. An odd count is rejected.
pub fn pair_points(coords: &[f32]) -> Result<Vec<Point>, GeometryError> {
    if coords.len() % 2 != 0 {
        return Err(GeometryError::InvalidGeometry(format!(
            "{} coordinates cannot be paired into points",
            coords.len()
        )));
    }
    Ok(coords
        .iter()
        .tuples()
        .map(|(&x, &y)| Point::new(x, y))
        .collect())
}

/// Cuts `points` into strokes using the per-stroke counts and widths.
///
/// Widths are only required when there is at least one stroke.
pub fn assemble(
    points: Vec<Point>,
    num_points: &[i32],
    widths: Option<&[f32]>,
) -> Result<Drawing, GeometryError> {
    let available = points.len();
    let mut spans = Vec::with_capacity(num_points.len());
    let mut offset = 0usize;

    for (stroke, &count) in num_points.iter().enumerate() {
        let len = usize::try_from(count).map_err(|_| {
            GeometryError::InvalidGeometry(format!(
                "stroke {stroke} has a negative point count ({count})"
            ))
        })?;
        let end = offset.saturating_add(len);
        if end > available {
            return Err(GeometryError::GeometryOverrun {
                stroke,
                start: offset,
                end,
                available,
            });
        }

        let widths = widths.ok_or(GeometryError::MissingGeometry(CurveKey::Width))?;
        let width = *widths
            .get(stroke)
            .ok_or(GeometryError::WidthIndexOutOfRange {
                stroke,
                available: widths.len(),
            })?;

        spans.push(StrokeSpan::new(offset, len, width));
        offset = end;
    }

    if offset < available {
        log::warn!(
            "{} points follow the last stroke and belong to no stroke",
            available - offset
        );
    }

    Drawing::new(points, spans).ok_or_else(|| {
        GeometryError::InvalidGeometry("stroke spans exceed the point sequence".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::encode;

    fn pts(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f32, i as f32 * 2.0)).collect()
    }

    #[test]
    fn test_pair_points() {
        let points = pair_points(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        assert!(pair_points(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_pair_points_rejects_odd_length() {
        assert!(matches!(
            pair_points(&[1.0, 2.0, 3.0]),
            Err(GeometryError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_assemble_cumulative_offsets() {
        let points = pts(3);
        let drawing = assemble(points.clone(), &[2, 1], Some(&[5.0, 3.0][..])).unwrap();

        let strokes: Vec<_> = drawing.strokes().collect();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].points, &points[0..2]);
        assert_eq!(strokes[0].width, 5.0);
        assert_eq!(strokes[1].points, &points[2..3]);
        assert_eq!(strokes[1].width, 3.0);
    }

    #[test]
    fn test_assemble_zero_length_stroke() {
        let drawing = assemble(pts(2), &[0, 2], Some(&[1.0, 2.0][..])).unwrap();
        let strokes: Vec<_> = drawing.strokes().collect();
        assert!(strokes[0].points.is_empty());
        assert_eq!(strokes[1].points.len(), 2);
    }

    #[test]
    fn test_assemble_overrun() {
        let err = assemble(pts(3), &[2, 2], Some(&[1.0, 1.0][..])).unwrap_err();
        assert_eq!(
            err,
            GeometryError::GeometryOverrun {
                stroke: 1,
                start: 2,
                end: 4,
                available: 3
            }
        );
    }

    #[test]
    fn test_assemble_negative_count() {
        let err = assemble(pts(3), &[-1], Some(&[1.0][..])).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidGeometry(_)));
    }

    #[test]
    fn test_assemble_too_few_widths() {
        let err = assemble(pts(3), &[1, 1], Some(&[1.0][..])).unwrap_err();
        assert_eq!(
            err,
            GeometryError::WidthIndexOutOfRange {
                stroke: 1,
                available: 1
            }
        );
    }

    #[test]
    fn test_missing_widths_only_matter_with_strokes() {
        let drawing = assemble(pts(2), &[], None).unwrap();
        assert_eq!(drawing.stroke_count(), 0);
        assert_eq!(drawing.points().len(), 2);

        let err = assemble(pts(2), &[2], None).unwrap_err();
        assert_eq!(err, GeometryError::MissingGeometry(CurveKey::Width));
    }

    #[test]
    fn test_unclaimed_points_are_kept() {
        let drawing = assemble(pts(4), &[1], Some(&[1.0][..])).unwrap();
        assert_eq!(drawing.points().len(), 4);
        assert_eq!(drawing.unclaimed_points(), 3);
    }

    #[test]
    fn test_curve_arrays_decode() {
        let points = encode(&[0.0f32, 0.0, 10.0, 10.0]);
        let counts = encode(&[2i32]);
        let widths = encode(&[2.0f32]);
        let blobs = NamedBlobs {
            points: Some(&points[..]),
            num_points: Some(&counts[..]),
            width: Some(&widths[..]),
            fractional_widths: None,
        };
        let arrays = CurveArrays::decode(&blobs).unwrap();
        assert_eq!(arrays.points, vec![0.0, 0.0, 10.0, 10.0]);
        assert_eq!(arrays.num_points, vec![2]);
        assert_eq!(arrays.width, Some(vec![2.0]));
        assert_eq!(arrays.fractional_widths, None);
    }

    #[test]
    fn test_curve_arrays_require_points_and_counts() {
        let counts = encode(&[2i32]);
        let blobs = NamedBlobs {
            num_points: Some(&counts[..]),
            ..Default::default()
        };
        assert_eq!(
            CurveArrays::decode(&blobs),
            Err(GeometryError::MissingGeometry(CurveKey::Points))
        );

        let points = encode(&[1.0f32, 1.0]);
        let blobs = NamedBlobs {
            points: Some(&points[..]),
            ..Default::default()
        };
        assert_eq!(
            CurveArrays::decode(&blobs),
            Err(GeometryError::MissingGeometry(CurveKey::NumPoints))
        );
    }

    #[test]
    fn test_curve_arrays_reports_bad_length_with_key() {
        let points = vec![0u8; 6];
        let counts = encode(&[1i32]);
        let blobs = NamedBlobs {
            points: Some(&points[..]),
            num_points: Some(&counts[..]),
            ..Default::default()
        };
        let err = CurveArrays::decode(&blobs).unwrap_err();
        assert!(matches!(
            err,
            GeometryError::InvalidBlobLength { key: CurveKey::Points, source } if source.len == 6
        ));
    }
}
