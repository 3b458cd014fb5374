use std::fmt;

/// An sRGB stroke color with optional alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 1.0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 1.0 };

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Formats the color as an SVG paint value.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a < 1.0 {
            return write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a);
        }
        match (self.r, self.g, self.b) {
            (0, 0, 0) => f.write_str("black"),
            (255, 255, 255) => f.write_str("white"),
            (r, g, b) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}
