// src/pipeline/orchestrator.rs
use super::config::PipelineConfig;
use crate::error::PipelineError;
use noteink_core::extract_drawing;
use noteink_render_core::{DocumentRenderer, RenderError, render_drawing};
use noteink_render_svg::{SvgOptions, SvgRenderer};
use noteink_source::{EntrySource, RawEntry, ZipEntrySource};
use noteink_types::Drawing;
use std::fs;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

/// Runs a note through every stage and produces the finished markup.
///
/// Nothing is written until the whole document has rendered, so a failed
/// conversion never leaves a partial output file behind.
#[derive(Debug, Clone)]
pub struct NotePipeline {
    config: PipelineConfig,
}

impl NotePipeline {
    pub(super) fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Converts the note archive at `path`.
    pub fn convert_path<P: AsRef<Path>>(&self, path: P) -> Result<String, PipelineError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }
        // The archive is closed again as soon as the entry is in memory.
        let entry = {
            let mut source = ZipEntrySource::open(path)?;
            source.read_matching(&self.config.entry_name)?
        };
        self.convert_entry(&entry)
    }

    /// Converts a note archive read from any seekable reader.
    pub fn convert_reader<R: Read + Seek>(&self, reader: R) -> Result<String, PipelineError> {
        let mut source = ZipEntrySource::new(reader, "<reader>".to_string())?;
        self.convert_source(&mut source)
    }

    /// Converts an in-memory note archive.
    pub fn convert_bytes(&self, bytes: Vec<u8>) -> Result<String, PipelineError> {
        let mut source = ZipEntrySource::from_bytes(bytes)?;
        self.convert_source(&mut source)
    }

    pub fn convert_source(&self, source: &mut dyn EntrySource) -> Result<String, PipelineError> {
        let entry = source.read_matching(&self.config.entry_name)?;
        self.convert_entry(&entry)
    }

    /// Decodes a session entry and renders its strokes.
    pub fn convert_entry(&self, entry: &RawEntry) -> Result<String, PipelineError> {
        let root = noteink_plist::from_bytes(&entry.bytes)?;
        let drawing = extract_drawing(&root)?;
        if self.config.debug {
            self.dump_geometry(&drawing);
        }
        self.render(&drawing)
    }

    /// Serializes a drawing in the configured output format.
    pub fn render(&self, drawing: &Drawing) -> Result<String, PipelineError> {
        let options = SvgOptions {
            format: self.config.output_format,
            stroke_color: self.config.stroke_color,
        };
        let renderer: Box<dyn DocumentRenderer<Vec<u8>>> = Box::new(SvgRenderer::new(options));
        let bytes = render_drawing(renderer, drawing, Vec::new())?;
        String::from_utf8(bytes)
            .map_err(|e| PipelineError::Render(RenderError::Other(e.to_string())))
    }

    /// The input path with its extension replaced by the output format's.
    pub fn output_path_for<P: AsRef<Path>>(&self, input: P) -> PathBuf {
        input
            .as_ref()
            .with_extension(self.config.output_format.extension())
    }

    /// Converts the note at `input` and writes the result next to it.
    /// Returns the path written.
    pub fn generate_to_file<P: AsRef<Path>>(&self, input: P) -> Result<PathBuf, PipelineError> {
        let input = input.as_ref();
        let markup = self.convert_path(input)?;
        let output = self.output_path_for(input);
        fs::write(&output, markup.as_bytes()).map_err(|e| {
            PipelineError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write '{}': {}", output.display(), e),
            ))
        })?;
        log::info!("Wrote {} ({} bytes)", output.display(), markup.len());
        Ok(output)
    }

    fn dump_geometry(&self, drawing: &Drawing) {
        match serde_json::to_string_pretty(drawing) {
            Ok(json) => log::debug!("Assembled geometry:\n{}", json),
            Err(e) => log::warn!("Could not serialize geometry for debugging: {}", e),
        }
    }
}
