use noteink_types::Color;

pub use noteink_render_svg::OutputFormat;

/// Substring identifying the session document inside a note archive.
pub const DEFAULT_ENTRY_NAME: &str = "Session.plist";

/// Settings shared by every stage of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Archive entries are matched by substring against this name.
    pub entry_name: String,
    pub stroke_color: Color,
    pub output_format: OutputFormat,
    /// Dumps the assembled geometry as JSON at debug level.
    pub debug: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            entry_name: DEFAULT_ENTRY_NAME.to_string(),
            stroke_color: Color::BLACK,
            output_format: OutputFormat::default(),
            debug: false,
        }
    }
}
