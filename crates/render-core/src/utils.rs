use noteink_types::Point;
use std::fmt::Write;

/// Formats a coordinate or width the way the markup expects: shortest
/// round-trip form, always with a fractional part for whole numbers.
pub fn format_number(value: f32) -> String {
    format!("{:?}", value)
}

/// Path data joining each point to its predecessor with a straight segment.
///
/// Every segment is a separate `M x y L x y` pair, so a stroke with fewer
/// than two points produces an empty string.
pub fn segment_path(points: &[Point]) -> String {
    let mut d = String::new();
    for pair in points.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        if !d.is_empty() {
            d.push(' ');
        }
        // Writing to a String cannot fail.
        let _ = write!(
            d,
            "M {} {} L {} {}",
            format_number(cur.x),
            format_number(cur.y),
            format_number(prev.x),
            format_number(prev.y)
        );
    }
    d
}
