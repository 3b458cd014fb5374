//! Core rendering abstractions for stroke documents.
//!
//! This crate provides the fundamental traits and types used by output backends:
//! - `DocumentRenderer` trait for abstracting document writing operations
//! - Error types for rendering operations
//! - Shared utility functions for number formatting and path commands

mod error;
mod traits;
pub mod utils;

pub use error::RenderError;
pub use noteink_types::{Canvas, Color, Drawing, Point, Stroke};
pub use traits::{DocumentRenderer, render_drawing};
