use std::fmt::Write as _;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, PathFill, PathPrimitive, PathStroke, RenderFrame, Renderer};

/// Serializes frames into standalone SVG documents.
///
/// The document uses the frame viewport as its `viewBox`, so hosts can
/// stretch it with `preserveAspectRatio="none"` and feed pointer offsets back
/// through `ChartCanvas::client_to_logical_x`.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last rendered document; empty before the first render.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    fn write_frame(frame: &RenderFrame) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        let (width, height) = (frame.viewport.width, frame.viewport.height);
        write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" preserveAspectRatio="none">"#
        )?;

        let gradients: Vec<(usize, Color, Color)> = frame
            .paths
            .iter()
            .enumerate()
            .filter_map(|(index, path)| match path.fill {
                Some(PathFill::VerticalGradient { top, bottom }) => Some((index, top, bottom)),
                _ => None,
            })
            .collect();
        if !gradients.is_empty() {
            out.push_str("<defs>");
            for (index, top, bottom) in &gradients {
                write!(
                    out,
                    r#"<linearGradient id="fill-{index}" x1="0" y1="0" x2="0" y2="1"><stop offset="0%" stop-color="{}" stop-opacity="{}"/><stop offset="100%" stop-color="{}" stop-opacity="{}"/></linearGradient>"#,
                    top.to_hex(),
                    fmt_num(top.alpha),
                    bottom.to_hex(),
                    fmt_num(bottom.alpha),
                )?;
            }
            out.push_str("</defs>");
        }

        for (index, path) in frame.paths.iter().enumerate() {
            write_path(&mut out, index, path)?;
        }

        for line in &frame.lines {
            write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}"#,
                fmt_num(line.x1),
                fmt_num(line.y1),
                fmt_num(line.x2),
                fmt_num(line.y2),
                stroke_attrs(PathStroke {
                    width: line.stroke_width,
                    color: line.color,
                }),
            )?;
            if let Some((dash, gap)) = line.dash {
                write!(
                    out,
                    r#" stroke-dasharray="{},{}""#,
                    fmt_num(dash),
                    fmt_num(gap)
                )?;
            }
            out.push_str("/>");
        }

        for circle in &frame.circles {
            write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" {}"#,
                fmt_num(circle.cx),
                fmt_num(circle.cy),
                fmt_num(circle.radius),
                fill_attrs(circle.fill),
            )?;
            if let Some(outline) = circle.outline {
                write!(out, " {}", stroke_attrs(outline))?;
            }
            out.push_str("/>");
        }

        out.push_str("</svg>");
        Ok(out)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.document = Self::write_frame(frame)
            .map_err(|_| ChartError::InvalidData("failed to serialize svg frame".to_owned()))?;
        Ok(())
    }
}

fn write_path(out: &mut String, index: usize, path: &PathPrimitive) -> std::fmt::Result {
    out.push_str(r#"<path d=""#);
    for (position, vertex) in path.vertices.iter().enumerate() {
        let command = if position == 0 { 'M' } else { 'L' };
        if position > 0 {
            out.push(' ');
        }
        write!(out, "{command}{},{}", fmt_num(vertex.x), fmt_num(vertex.y))?;
    }
    if path.closed {
        out.push_str(" Z");
    }
    out.push('"');

    match path.fill {
        Some(PathFill::Solid(color)) => write!(out, " {}", fill_attrs(color))?,
        Some(PathFill::VerticalGradient { .. }) => write!(out, r#" fill="url(#fill-{index})""#)?,
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = path.stroke {
        write!(
            out,
            r#" {} stroke-linejoin="round" stroke-linecap="round""#,
            stroke_attrs(stroke)
        )?;
    }
    out.push_str("/>");
    Ok(())
}

fn fill_attrs(color: Color) -> String {
    format!(
        r#"fill="{}" fill-opacity="{}""#,
        color.to_hex(),
        fmt_num(color.alpha)
    )
}

fn stroke_attrs(stroke: PathStroke) -> String {
    format!(
        r#"stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
        stroke.color.to_hex(),
        fmt_num(stroke.color.alpha),
        fmt_num(stroke.width)
    )
}

/// Fixed three-decimal rendering with trailing zeros trimmed.
fn fmt_num(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_owned()
    } else {
        text.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::fmt_num;

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(4.0), "4");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(12.3456), "12.346");
    }
}
