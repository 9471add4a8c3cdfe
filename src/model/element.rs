use crate::foundation::error::{SlideError, SlideResult};

/// Padding (in percent) used by [`TextElement::place_at_corner`].
pub const CORNER_PADDING_PCT: f64 = 2.0;

/// Distance (in percent) from an edge within which a drag snaps onto that edge.
pub const SNAP_THRESHOLD_PCT: f64 = 5.0;

/// Horizontal alignment of a text block relative to its anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Anchor is the left edge of the block.
    #[default]
    Left,
    /// Anchor is the horizontal center of the block.
    Center,
    /// Anchor is the right edge of the block.
    Right,
}

/// Slide corner targeted by [`TextElement::place_at_corner`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    /// Top left.
    TopLeft,
    /// Top right.
    TopRight,
    /// Bottom left.
    BottomLeft,
    /// Bottom right.
    BottomRight,
}

/// One styled text box on a slide.
///
/// Positions are percentages of the rendered slide size; `font_size` is expressed in the slide's
/// display pixel space.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    /// Identifier, unique within the owning slide. Empty until the slide assigns one.
    #[serde(default)]
    pub id: String,
    /// Text content; `\n` separates explicit lines.
    pub text: String,
    /// Horizontal anchor in percent of the slide width.
    pub x: f64,
    /// Top of the first line in percent of the slide height.
    pub y: f64,
    /// Font size in display pixels.
    pub font_size: f64,
    /// Font family name.
    pub font_family: String,
    /// Color string, e.g. `#000000`.
    pub color: String,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
    /// Paint order; higher paints later.
    pub z_index: i32,
    /// Entry animation tag. Not used by rendering.
    #[serde(default = "default_animation")]
    pub start_animation: String,
    /// Exit animation tag. Not used by rendering.
    #[serde(default = "default_animation")]
    pub end_animation: String,
    /// Block alignment relative to `x`.
    #[serde(default)]
    pub align: Align,
}

fn default_animation() -> String {
    "none".to_string()
}

impl Default for TextElement {
    fn default() -> Self {
        Self::new("New Text", 50.0, 50.0)
    }
}

impl TextElement {
    /// Build an element without an id, using editor defaults for styling.
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: String::new(),
            text: text.into(),
            x: clamp_pct(x),
            y: clamp_pct(y),
            font_size: 24.0,
            font_family: "Arial".to_string(),
            color: "#000000".to_string(),
            bold: false,
            italic: false,
            z_index: 1,
            start_animation: default_animation(),
            end_animation: default_animation(),
            align: Align::Left,
        }
    }

    /// Re-apply the clamping invariants (used after loading persisted data).
    pub fn normalize(&mut self) {
        self.x = clamp_pct(self.x);
        self.y = clamp_pct(self.y);
        self.z_index = self.z_index.max(1);
    }

    /// Reject records that cannot be rendered.
    pub fn validate(&self) -> SlideResult<()> {
        if !font_size_ok(self.font_size) {
            return Err(SlideError::validation(format!(
                "text element '{}' has font size {}; must be finite and > 0",
                self.id, self.font_size
            )));
        }
        Ok(())
    }

    /// Move the anchor, clamping both axes to `[0, 100]`.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = clamp_pct(x);
        self.y = clamp_pct(y);
    }

    /// Shift the anchor by a percentage delta, clamping to `[0, 100]`.
    pub fn nudge(&mut self, dx: f64, dy: f64) {
        self.set_position(self.x + dx, self.y + dy);
    }

    /// Place the element near a slide corner.
    pub fn place_at_corner(&mut self, corner: Corner) {
        let near = CORNER_PADDING_PCT;
        let far = 100.0 - CORNER_PADDING_PCT;
        let (x, y) = match corner {
            Corner::TopLeft => (near, near),
            Corner::TopRight => (far, near),
            Corner::BottomLeft => (near, far),
            Corner::BottomRight => (far, far),
        };
        self.set_position(x, y);
    }

    /// Position the element at `start + delta` (percent), clamped and snapped to edges.
    pub fn drag_to(&mut self, start: (f64, f64), delta: (f64, f64)) {
        self.x = snap_to_edge(clamp_pct(start.0 + delta.0));
        self.y = snap_to_edge(clamp_pct(start.1 + delta.1));
    }

    /// Raise (`direction > 0`) or lower (`direction < 0`) the paint order; never below 1.
    pub fn adjust_z_order(&mut self, direction: i32) {
        self.z_index = self.z_index.saturating_add(direction).max(1);
    }

    /// Flip the bold flag.
    pub fn toggle_bold(&mut self) {
        self.bold = !self.bold;
    }

    /// Flip the italic flag.
    pub fn toggle_italic(&mut self) {
        self.italic = !self.italic;
    }

    /// Apply a typed field update.
    pub fn apply(&mut self, update: TextUpdate) -> SlideResult<()> {
        match update {
            TextUpdate::Text(text) => self.text = text,
            TextUpdate::FontFamily(family) => {
                if family.trim().is_empty() {
                    return Err(SlideError::validation("font family must be non-empty"));
                }
                self.font_family = family;
            }
            TextUpdate::FontSize(size) => {
                if !font_size_ok(size) {
                    return Err(SlideError::validation(
                        "font size must be finite and > 0",
                    ));
                }
                self.font_size = size;
            }
            TextUpdate::Color(color) => self.color = color,
            TextUpdate::Align(align) => self.align = align,
            TextUpdate::StartAnimation(tag) => self.start_animation = tag,
            TextUpdate::EndAnimation(tag) => self.end_animation = tag,
        }
        Ok(())
    }

    /// Lines of the text block, split on explicit newlines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// Closed set of field updates accepted by [`TextElement::apply`].
#[derive(Clone, Debug, PartialEq)]
pub enum TextUpdate {
    /// Replace the text content.
    Text(String),
    /// Replace the font family.
    FontFamily(String),
    /// Replace the display font size.
    FontSize(f64),
    /// Replace the color string.
    Color(String),
    /// Replace the alignment.
    Align(Align),
    /// Replace the entry animation tag.
    StartAnimation(String),
    /// Replace the exit animation tag.
    EndAnimation(String),
}

fn font_size_ok(size: f64) -> bool {
    size.is_finite() && size > 0.0
}

fn clamp_pct(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0) }
}

fn snap_to_edge(v: f64) -> f64 {
    if v < SNAP_THRESHOLD_PCT {
        0.0
    } else if v > 100.0 - SNAP_THRESHOLD_PCT {
        100.0
    } else {
        v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/element.rs"]
mod tests;
