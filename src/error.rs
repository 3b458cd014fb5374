// src/error.rs
use noteink_core::GeometryError;
use noteink_plist::PlistError;
use noteink_render_core::RenderError;
use noteink_source::SourceError;
use std::path::PathBuf;
use thiserror::Error;

/// A comprehensive error type for the entire conversion pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Unexpected number of arguments.\nUsage: {0}")]
    Usage(String),

    #[error("Unable to find {}.", .0.display())]
    FileNotFound(PathBuf),

    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("Malformed session document: {0}")]
    Document(#[from] PlistError),

    #[error("{0}")]
    Geometry(#[from] GeometryError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
