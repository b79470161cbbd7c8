use std::fmt::Write;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign, TextOrientation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub rects_drawn: usize,
    pub polygons_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

/// Renders frames into a standalone SVG document.
///
/// The last document is kept until the next `render` call replaces it.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    font_family: Option<String>,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    fn write_document(&self, frame: &RenderFrame) -> Result<(String, SvgRenderStats), std::fmt::Error> {
        let mut out = String::new();
        let mut stats = SvgRenderStats::default();
        let width = frame.viewport.width;
        let height = frame.viewport.height;
        let font_family = self.font_family.as_deref().unwrap_or("sans-serif");

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="{}">"#,
            escape_text(font_family)
        )?;

        for rect in &frame.rects {
            writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"{}/>"#,
                coord(rect.x),
                coord(rect.y),
                coord(rect.width),
                coord(rect.height),
                rect.fill_color.to_hex(),
                opacity_attr("fill-opacity", rect.fill_color)
            )?;
            stats.rects_drawn += 1;
        }

        for polygon in &frame.polygons {
            let mut points = String::new();
            for (index, (x, y)) in polygon.points.iter().enumerate() {
                if index > 0 {
                    points.push(' ');
                }
                write!(points, "{},{}", coord(*x), coord(*y))?;
            }
            writeln!(
                out,
                r#"  <polygon points="{points}" fill="{}"{}/>"#,
                polygon.fill_color.to_hex(),
                opacity_attr("fill-opacity", polygon.fill_color)
            )?;
            stats.polygons_drawn += 1;
        }

        for line in &frame.lines {
            writeln!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"{}/>"#,
                coord(line.x1),
                coord(line.y1),
                coord(line.x2),
                coord(line.y2),
                line.color.to_hex(),
                coord(line.stroke_width),
                opacity_attr("stroke-opacity", line.color)
            )?;
            stats.lines_drawn += 1;
        }

        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            let transform = match text.orientation {
                TextOrientation::Horizontal => String::new(),
                TextOrientation::VerticalUp => format!(
                    r#" transform="rotate(-90 {} {})""#,
                    coord(text.x),
                    coord(text.y)
                ),
            };
            writeln!(
                out,
                r#"  <text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{anchor}" dominant-baseline="hanging"{}{transform}>{}</text>"#,
                coord(text.x),
                coord(text.y),
                coord(text.font_size_px),
                text.color.to_hex(),
                opacity_attr("fill-opacity", text.color),
                escape_text(&text.text)
            )?;
            stats.texts_drawn += 1;
        }

        out.push_str("</svg>\n");
        Ok((out, stats))
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let (document, stats) = self
            .write_document(frame)
            .map_err(|err| ChartError::InvalidData(format!("failed to write svg: {err}")))?;
        self.document = document;
        self.last_stats = stats;
        Ok(())
    }
}

fn coord(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_owned()
    } else {
        text.to_owned()
    }
}

fn opacity_attr(name: &str, color: Color) -> String {
    if color.alpha >= 1.0 {
        String::new()
    } else {
        format!(r#" {name}="{}""#, coord(color.alpha))
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{coord, escape_text};

    #[test]
    fn coordinates_drop_trailing_zeros() {
        assert_eq!(coord(600.0), "600");
        assert_eq!(coord(12.5), "12.5");
        assert_eq!(coord(1.0 / 3.0), "0.33");
        assert_eq!(coord(-0.001), "0");
    }

    #[test]
    fn text_is_xml_escaped() {
        assert_eq!(escape_text("CPU <%> & \"kr\""), "CPU &lt;%&gt; &amp; &quot;kr&quot;");
    }
}
