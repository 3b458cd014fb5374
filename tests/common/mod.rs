pub mod fixtures;

use noteink::{NotePipeline, PipelineBuilder, PipelineError};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around generated markup with helper methods
pub struct GeneratedDocument {
    pub markup: String,
}

impl GeneratedDocument {
    /// Value of the `width` and `height` attributes on the `<svg>` element
    pub fn canvas(&self) -> (u32, u32) {
        let svg = self
            .markup
            .split("<svg")
            .nth(1)
            .expect("document has no <svg> element");
        (attribute(svg, "width"), attribute(svg, "height"))
    }

    /// All `<path .../>` elements, in document order
    pub fn paths(&self) -> Vec<&str> {
        self.markup
            .lines()
            .filter(|line| line.starts_with("<path"))
            .collect()
    }

    /// The `d` attribute of each path
    pub fn path_data(&self) -> Vec<&str> {
        self.paths()
            .into_iter()
            .map(|p| attribute_str(p, "d"))
            .collect()
    }

    /// The `stroke-width` attribute of each path
    pub fn stroke_widths(&self) -> Vec<&str> {
        self.paths()
            .into_iter()
            .map(|p| attribute_str(p, "stroke-width"))
            .collect()
    }
}

fn attribute_str<'a>(element: &'a str, name: &str) -> &'a str {
    let marker = format!(" {}=\"", name);
    let start = element
        .find(&marker)
        .unwrap_or_else(|| panic!("attribute {} missing in {}", name, element))
        + marker.len();
    let end = element[start..].find('"').expect("unterminated attribute") + start;
    &element[start..end]
}

fn attribute(element: &str, name: &str) -> u32 {
    attribute_str(element, name)
        .parse()
        .unwrap_or_else(|e| panic!("attribute {} is not an integer: {}", name, e))
}

/// A pipeline with default settings
pub fn default_pipeline() -> NotePipeline {
    PipelineBuilder::new().build().expect("default pipeline builds")
}

/// Convert an in-memory note archive with default settings
pub fn convert(note: Vec<u8>) -> Result<GeneratedDocument, PipelineError> {
    let markup = default_pipeline().convert_bytes(note)?;
    Ok(GeneratedDocument { markup })
}
