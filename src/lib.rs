//! # noteink
//!
//! Converts a handwritten-note archive into a vector drawing.
//!
//! The pipeline runs in stages, each handing its output to the next:
//! archive entry (`noteink-source`) → property list (`noteink-plist`) →
//! curve blobs, packed arrays and strokes (`noteink-core`) → markup
//! (`noteink-render-svg`).
//!
//! ## Example
//!
//! ```ignore
//! use noteink::{OutputFormat, PipelineBuilder};
//!
//! let pipeline = PipelineBuilder::new()
//!     .with_output_format(OutputFormat::Html)
//!     .build()?;
//! let written = pipeline.generate_to_file("lecture.note")?;
//! println!("wrote {}", written.display());
//! ```

pub use noteink_core as core;
pub use noteink_plist as plist;
pub use noteink_render_core as render;
pub use noteink_source as source;
pub use noteink_types as types;

pub mod error;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{
    DEFAULT_ENTRY_NAME, NotePipeline, OutputFormat, PipelineBuilder, PipelineConfig,
};
pub use types::{Canvas, Color, Drawing, Point, Stroke};
