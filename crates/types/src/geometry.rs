use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A single pen sample in note coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The drawing surface, in whole units, anchored at the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Bounds covering every point: the ceiling of the largest x and y.
    ///
    /// An empty sequence yields a zero-sized canvas, and maxima below zero
    /// clamp to zero. NaN coordinates are ignored.
    pub fn from_points(points: &[Point]) -> Self {
        let (max_x, max_y) = points.iter().fold((0.0f32, 0.0f32), |(mx, my), p| {
            (mx.max(p.x), my.max(p.y))
        });
        Self {
            width: extent(max_x),
            height: extent(max_y),
        }
    }
}

fn extent(max: f32) -> u32 {
    let ceiled = max.ceil();
    if ceiled >= u32::MAX as f32 {
        u32::MAX
    } else {
        // Non-negative and finite here, so the cast is exact.
        ceiled as u32
    }
}

/// Where a stroke lives in the shared point sequence, plus its width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeSpan {
    pub start: usize,
    pub len: usize,
    pub width: f32,
}

impl StrokeSpan {
    pub fn new(start: usize, len: usize, width: f32) -> Self {
        Self { start, len, width }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// A borrowed view of one stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    pub points: &'a [Point],
    pub width: f32,
}

/// Every decoded point of a note together with the strokes cut from it.
///
/// Points that no stroke claims are kept so the canvas still covers them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Drawing {
    points: Vec<Point>,
    spans: Vec<StrokeSpan>,
}

impl Drawing {
    /// Returns `None` if any span reaches past the end of `points`.
    pub fn new(points: Vec<Point>, spans: Vec<StrokeSpan>) -> Option<Self> {
        let fits = spans
            .iter()
            .all(|span| span.start.checked_add(span.len).is_some_and(|end| end <= points.len()));
        fits.then_some(Self { points, spans })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn spans(&self) -> &[StrokeSpan] {
        &self.spans
    }

    pub fn stroke_count(&self) -> usize {
        self.spans.len()
    }

    /// Strokes in their recorded order.
    pub fn strokes(&self) -> impl ExactSizeIterator<Item = Stroke<'_>> + '_ {
        self.spans.iter().map(|span| Stroke {
            points: &self.points[span.range()],
            width: span.width,
        })
    }

    /// Points after the end of the last stroke.
    pub fn unclaimed_points(&self) -> usize {
        let claimed = self.spans.iter().map(StrokeSpan::end).max().unwrap_or(0);
        self.points.len().saturating_sub(claimed)
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::from_points(&self.points)
    }
}
