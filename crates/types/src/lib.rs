pub mod color;
pub mod geometry;

pub use color::Color;
pub use geometry::{Canvas, Drawing, Point, Stroke, StrokeSpan};
