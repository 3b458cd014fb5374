// src/pipeline/builder.rs
use super::config::{OutputFormat, PipelineConfig};
use super::orchestrator::NotePipeline;
use crate::error::PipelineError;
use noteink_types::Color;

/// A builder for creating a `NotePipeline`.
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Creates a new `PipelineBuilder` with default settings.
    pub fn new() -> Self { Default::default() }

    /// Starts from an existing configuration.
    pub fn from_config(config: PipelineConfig) -> Self { Self { config } }

    /// Sets the substring used to find the session entry in the archive.
    pub fn with_entry_name(mut self, name: impl Into<String>) -> Self { self.config.entry_name = name.into(); self }

    /// Sets the color every stroke is drawn with.
    pub fn with_stroke_color(mut self, color: Color) -> Self { self.config.stroke_color = color; self }

    /// Selects between an HTML page and a standalone SVG file.
    pub fn with_output_format(mut self, format: OutputFormat) -> Self { self.config.output_format = format; self }

    /// Enables debug features, such as dumping the assembled stroke geometry.
    pub fn with_debug(mut self, debug: bool) -> Self { self.config.debug = debug; self }

    /// Consumes the builder and creates the `NotePipeline`.
    pub fn build(self) -> Result<NotePipeline, PipelineError> {
        if self.config.entry_name.is_empty() {
            return Err(PipelineError::Config(
                "Entry name must not be empty; every archive entry would match.".to_string(),
            ));
        }
        Ok(NotePipeline::new(self.config))
    }
}
