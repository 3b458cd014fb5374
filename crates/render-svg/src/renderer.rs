use noteink_render_core::utils::{format_number, segment_path};
use noteink_render_core::{DocumentRenderer, RenderError};
use noteink_types::{Canvas, Color, Stroke};
use std::io::Write;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

fn path_element(stroke: &Stroke<'_>, color: Color) -> String {
    format!(
        "<path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
        segment_path(stroke.points),
        color,
        format_number(stroke.width)
    )
}

/// Which document wraps the SVG element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// A bare HTML page with the SVG centered in the body.
    #[default]
    Html,
    /// A standalone SVG file.
    Svg,
}

impl OutputFormat {
    /// File extension for documents in this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Svg => "svg",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SvgOptions {
    pub format: OutputFormat,
    pub stroke_color: Color,
}

/// A streaming markup renderer; each stroke is written as soon as it arrives.
pub struct SvgRenderer<W: Write> {
    writer: Option<W>,
    options: SvgOptions,
    strokes_written: usize,
}

impl<W: Write> SvgRenderer<W> {
    pub fn new(options: SvgOptions) -> Self {
        Self {
            writer: None,
            options,
            strokes_written: 0,
        }
    }

    fn writer_mut(&mut self) -> Result<&mut W, RenderError> {
        self.writer.as_mut().ok_or(RenderError::NotStarted)
    }

    fn write_element(&mut self, element: &str) -> Result<(), RenderError> {
        self.writer_mut()?.write_all(element.as_bytes())?;
        self.strokes_written += 1;
        Ok(())
    }
}

impl<W: Write> DocumentRenderer<W> for SvgRenderer<W> {
    fn begin_document(&mut self, mut writer: W, canvas: Canvas) -> Result<(), RenderError> {
        if self.writer.is_some() {
            return Err(RenderError::AlreadyStarted);
        }
        match self.options.format {
            OutputFormat::Html => writeln!(
                writer,
                "<html><body><svg style=\"margin: auto; display: block\" width=\"{}\" height=\"{}\" xmlns=\"{}\">",
                canvas.width, canvas.height, SVG_NS
            )?,
            OutputFormat::Svg => {
                writeln!(writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
                writeln!(
                    writer,
                    "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"{ns}\">",
                    w = canvas.width,
                    h = canvas.height,
                    ns = SVG_NS
                )?;
            }
        }
        self.writer = Some(writer);
        Ok(())
    }

    fn render_stroke(&mut self, stroke: Stroke<'_>) -> Result<(), RenderError> {
        log::trace!("Stroke {} with {} points", self.strokes_written, stroke.points.len());
        let element = path_element(&stroke, self.options.stroke_color);
        self.write_element(&element)
    }

    #[cfg(feature = "parallel-render")]
    fn render_strokes(&mut self, strokes: &[Stroke<'_>]) -> Result<(), RenderError> {
        use rayon::prelude::*;

        let color = self.options.stroke_color;
        let elements: Vec<String> = strokes
            .par_iter()
            .map(|stroke| path_element(stroke, color))
            .collect();
        for element in &elements {
            self.write_element(element)?;
        }
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<W, RenderError> {
        let footer = match self.options.format {
            OutputFormat::Html => "</svg></body></html>\n",
            OutputFormat::Svg => "</svg>\n",
        };
        let mut writer = self.writer.take().ok_or(RenderError::NotStarted)?;
        writer.write_all(footer.as_bytes())?;
        writer.flush()?;
        log::debug!("Wrote {} path elements", self.strokes_written);
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noteink_render_core::render_drawing;
    use noteink_types::{Drawing, Point, StrokeSpan};

    fn render(drawing: &Drawing, options: SvgOptions) -> String {
        let renderer: Box<dyn DocumentRenderer<Vec<u8>>> = Box::new(SvgRenderer::new(options));
        let bytes = render_drawing(renderer, drawing, Vec::new()).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    fn single_segment() -> Drawing {
        Drawing::new(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
            vec![StrokeSpan::new(0, 2, 2.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_html_document() {
        let html = render(&single_segment(), SvgOptions::default());
        assert_eq!(
            html,
            "<html><body><svg style=\"margin: auto; display: block\" width=\"10\" height=\"10\" xmlns=\"http://www.w3.org/2000/svg\">\n\
             <path d=\"M 10.0 10.0 L 0.0 0.0\" stroke=\"black\" stroke-width=\"2.0\"/>\n\
             </svg></body></html>\n"
        );
    }

    #[test]
    fn test_standalone_svg_document() {
        let options = SvgOptions {
            format: OutputFormat::Svg,
            stroke_color: Color::rgb(0x11, 0x22, 0x33),
        };
        let svg = render(&single_segment(), options);
        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg width=\"10\" height=\"10\" viewBox=\"0 0 10 10\""));
        assert!(svg.contains("stroke=\"#112233\""));
        assert!(svg.ends_with("</svg>\n"));
        assert!(!svg.contains("<html>"));
    }

    #[test]
    fn test_single_point_stroke_has_empty_path() {
        let drawing = Drawing::new(
            vec![Point::new(3.0, 4.0)],
            vec![StrokeSpan::new(0, 1, 1.5)],
        )
        .unwrap();
        let html = render(&drawing, SvgOptions::default());
        assert!(html.contains("<path d=\"\" stroke=\"black\" stroke-width=\"1.5\"/>"));
        assert!(html.contains("width=\"3\" height=\"4\""));
    }

    #[test]
    fn test_strokes_written_in_order() {
        let points = (0..5).map(|i| Point::new(i as f32, 1.0)).collect();
        let drawing = Drawing::new(
            points,
            vec![
                StrokeSpan::new(0, 2, 1.0),
                StrokeSpan::new(2, 2, 2.0),
                StrokeSpan::new(4, 1, 3.0),
            ],
        )
        .unwrap();
        let html = render(&drawing, SvgOptions::default());
        let widths: Vec<&str> = html
            .lines()
            .filter(|line| line.starts_with("<path"))
            .filter_map(|line| line.split("stroke-width=\"").nth(1))
            .collect();
        assert_eq!(widths, vec!["1.0\"/>", "2.0\"/>", "3.0\"/>"]);
    }

    #[test]
    fn test_canvas_covers_unclaimed_points() {
        let drawing = Drawing::new(
            vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(40.2, 7.5)],
            vec![StrokeSpan::new(0, 2, 1.0)],
        )
        .unwrap();
        let html = render(&drawing, SvgOptions::default());
        assert!(html.contains("width=\"41\" height=\"8\""));
    }

    #[test]
    fn test_stroke_before_begin_fails() {
        let mut renderer: SvgRenderer<Vec<u8>> = SvgRenderer::new(SvgOptions::default());
        let points = [Point::new(0.0, 0.0)];
        let stroke = Stroke { points: &points, width: 1.0 };
        assert!(matches!(renderer.render_stroke(stroke), Err(RenderError::NotStarted)));
        assert!(matches!(
            Box::new(renderer).finish(),
            Err(RenderError::NotStarted)
        ));
    }

    #[test]
    fn test_begin_twice_fails() {
        let mut renderer: SvgRenderer<Vec<u8>> = SvgRenderer::new(SvgOptions::default());
        renderer.begin_document(Vec::new(), Canvas::new(1, 1)).unwrap();
        assert!(matches!(
            renderer.begin_document(Vec::new(), Canvas::new(1, 1)),
            Err(RenderError::AlreadyStarted)
        ));
    }
}
