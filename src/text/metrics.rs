use std::fmt;

use crate::{foundation::error::SlideResult, model::element::Align};

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Font selection used for both measurement and drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// Requested family name.
    pub family: String,
    /// Size in pixels of the target surface.
    pub size_px: f64,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
}

impl fmt::Display for FontSpec {
    /// CSS shorthand, e.g. `italic bold 24px Arial`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.italic {
            f.write_str("italic ")?;
        }
        if self.bold {
            f.write_str("bold ")?;
        }
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

/// Font metrics collaborator: measures the advance width of one line of text.
pub trait FontMetrics {
    /// Rendered width in pixels of `line` (no newlines) using `font`.
    fn line_width(&mut self, font: &FontSpec, line: &str) -> SlideResult<f64>;
}

/// Measured geometry of a (possibly multi-line) text block.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlockMetrics {
    /// Lines in order; empty text yields one empty line.
    pub lines: Vec<String>,
    /// Width of each line, same order as `lines`.
    pub line_widths: Vec<f64>,
    /// Widest line.
    pub max_width: f64,
    /// Distance between consecutive line tops.
    pub line_height: f64,
    /// `lines.len() * line_height`.
    pub block_height: f64,
}

/// Split `text` on `\n` and measure every line.
pub fn measure_block(
    metrics: &mut dyn FontMetrics,
    font: &FontSpec,
    text: &str,
) -> SlideResult<TextBlockMetrics> {
    let lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
    let mut line_widths = Vec::with_capacity(lines.len());
    for line in &lines {
        let w = if line.is_empty() {
            0.0
        } else {
            metrics.line_width(font, line)?
        };
        line_widths.push(w);
    }

    let max_width = line_widths.iter().copied().fold(0.0, f64::max);
    let line_height = font.size_px * LINE_HEIGHT_FACTOR;
    let block_height = lines.len() as f64 * line_height;

    Ok(TextBlockMetrics {
        lines,
        line_widths,
        max_width,
        line_height,
        block_height,
    })
}

/// Leftward shift applied to the anchor for block-max-width alignment.
pub fn align_offset(align: Align, max_width: f64) -> f64 {
    match align {
        Align::Left => 0.0,
        Align::Center => max_width / 2.0,
        Align::Right => max_width,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/metrics.rs"]
mod tests;
