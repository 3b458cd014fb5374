//! Note conversion pipeline orchestration.
//!
//! - [`PipelineBuilder`]: fluent builder for constructing a pipeline
//! - [`PipelineConfig`]: the named settings a pipeline runs with
//! - [`NotePipeline`]: runs the stages and writes the result
//!
//! # Example
//!
//! ```ignore
//! use noteink::{Color, PipelineBuilder};
//!
//! let pipeline = PipelineBuilder::new()
//!     .with_stroke_color(Color::rgb(0x20, 0x20, 0x80))
//!     .build()?;
//!
//! let markup = pipeline.convert_path("lecture.note")?;
//! ```

mod builder;
pub mod config;
mod orchestrator;

pub use builder::PipelineBuilder;
pub use config::{DEFAULT_ENTRY_NAME, OutputFormat, PipelineConfig};
pub use orchestrator::NotePipeline;
