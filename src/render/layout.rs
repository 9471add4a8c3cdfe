use crate::{
    foundation::{
        color::{Rgba8, parse_color},
        error::SlideResult,
    },
    model::slide::Slide,
    text::metrics::{FontMetrics, FontSpec, TextBlockMetrics, align_offset, measure_block},
};

/// How authored font sizes map onto the target surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontScale {
    /// Use the authored size unchanged.
    Authored,
    /// Scale sizes authored against a display of `display_width` pixels up to a surface
    /// `native_width` pixels wide. Results are rounded to whole pixels, minimum 1.
    DisplayRelative {
        /// Width of the surface being rendered.
        native_width: u32,
        /// Width at which the slide was displayed while editing.
        display_width: u32,
    },
}

impl FontScale {
    /// Font size on the target surface for an authored `size`.
    pub fn apply(self, size: f64) -> f64 {
        match self {
            Self::Authored => size,
            Self::DisplayRelative {
                native_width,
                display_width,
            } => {
                let display = if display_width == 0 {
                    native_width
                } else {
                    display_width
                };
                if display == 0 {
                    return size;
                }
                let factor = f64::from(native_width) / f64::from(display);
                (size * factor).round().max(1.0)
            }
        }
    }
}

/// One line of text positioned on the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct LinePlacement {
    /// Line content.
    pub text: String,
    /// Left edge of the line.
    pub x: f64,
    /// Top of the line box.
    pub y: f64,
    /// Measured advance width.
    pub width: f64,
}

/// A text element resolved to surface pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementLayout {
    /// Source element id.
    pub element_id: String,
    /// Font at surface scale.
    pub font: FontSpec,
    /// Resolved fill color.
    pub color: Rgba8,
    /// Anchor x in surface pixels.
    pub anchor_x: f64,
    /// Anchor y (top of first line) in surface pixels.
    pub anchor_y: f64,
    /// Measured block.
    pub block: TextBlockMetrics,
    /// Lines in top-to-bottom order.
    pub lines: Vec<LinePlacement>,
}

/// Draw list for one slide; elements are in paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct SlideLayout {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Elements sorted by ascending z-index, ties in insertion order.
    pub elements: Vec<ElementLayout>,
}

/// Place every text element of `slide` on a `width` x `height` surface.
pub fn layout_slide(
    slide: &Slide,
    width: u32,
    height: u32,
    font_scale: FontScale,
    metrics: &mut dyn FontMetrics,
) -> SlideResult<SlideLayout> {
    let mut ordered: Vec<_> = slide.text_elements.iter().collect();
    ordered.sort_by_key(|el| el.z_index);

    let (w, h) = (f64::from(width), f64::from(height));
    let mut elements = Vec::with_capacity(ordered.len());
    for el in ordered {
        let font = FontSpec {
            family: el.font_family.clone(),
            size_px: font_scale.apply(el.font_size),
            bold: el.bold,
            italic: el.italic,
        };
        let color = parse_color(&el.color).unwrap_or_else(|err| {
            tracing::warn!(element = %el.id, color = %el.color, %err, "painting text black");
            Rgba8::BLACK
        });

        let anchor_x = el.x / 100.0 * w;
        let anchor_y = el.y / 100.0 * h;
        let block = measure_block(metrics, &font, &el.text)?;
        let x = anchor_x - align_offset(el.align, block.max_width);

        let lines = block
            .lines
            .iter()
            .zip(&block.line_widths)
            .enumerate()
            .map(|(i, (text, &width))| LinePlacement {
                text: text.clone(),
                x,
                y: anchor_y + i as f64 * block.line_height,
                width,
            })
            .collect();

        tracing::debug!(element = %el.id, font = %font, x, y = anchor_y, "laid out text element");
        elements.push(ElementLayout {
            element_id: el.id.clone(),
            font,
            color,
            anchor_x,
            anchor_y,
            block,
            lines,
        });
    }

    Ok(SlideLayout {
        width,
        height,
        elements,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
