use crate::error::RenderError;
use noteink_types::{Canvas, Drawing, Stroke};
use std::io::Write;

/// A trait for document renderers, abstracting the markup-writing primitives.
///
/// Calls arrive in order: `begin_document` once, strokes in drawing order,
/// then `finish`.
pub trait DocumentRenderer<W: Write> {
    fn begin_document(&mut self, writer: W, canvas: Canvas) -> Result<(), RenderError>;

    fn render_stroke(&mut self, stroke: Stroke<'_>) -> Result<(), RenderError>;

    /// Renders a batch of strokes. Backends may override this to prepare
    /// strokes concurrently, as long as output order is preserved.
    fn render_strokes(&mut self, strokes: &[Stroke<'_>]) -> Result<(), RenderError> {
        for stroke in strokes {
            self.render_stroke(*stroke)?;
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<W, RenderError>;
}

/// Drives `renderer` over a whole drawing, sizing the document from every
/// decoded point.
pub fn render_drawing<W: Write>(
    mut renderer: Box<dyn DocumentRenderer<W>>,
    drawing: &Drawing,
    writer: W,
) -> Result<W, RenderError> {
    let canvas = drawing.canvas();
    log::debug!("Canvas is {}x{}", canvas.width, canvas.height);

    renderer.begin_document(writer, canvas)?;
    let strokes: Vec<Stroke<'_>> = drawing.strokes().collect();
    renderer.render_strokes(&strokes)?;
    renderer.finish()
}
