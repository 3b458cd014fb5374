//! Markup backend: writes a drawing as SVG paths, either as a standalone SVG
//! file or wrapped in a minimal HTML page.

mod renderer;

pub use renderer::{OutputFormat, SvgOptions, SvgRenderer};
