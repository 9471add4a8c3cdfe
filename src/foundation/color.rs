use crate::foundation::error::{SlideError, SlideResult};

/// Straight-alpha RGBA8 color resolved from a text element's color string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black, used when a color string cannot be parsed.
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    /// Build an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Parse a CSS-like color string.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` (case-insensitive) and a handful of
/// named colors.
pub fn parse_color(s: &str) -> SlideResult<Rgba8> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    named_color(&s.to_ascii_lowercase())
        .ok_or_else(|| SlideError::validation(format!("unsupported color \"{s}\"")))
}

fn parse_hex(s: &str) -> SlideResult<Rgba8> {
    fn hex_byte(pair: &str) -> SlideResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| SlideError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    fn hex_nibble(c: &str) -> SlideResult<u8> {
        let v = hex_byte(c)?;
        Ok(v * 16 + v)
    }

    if !s.is_ascii() {
        return Err(SlideError::validation("hex color must be ascii"));
    }

    match s.len() {
        3 | 4 => {
            let r = hex_nibble(&s[0..1])?;
            let g = hex_nibble(&s[1..2])?;
            let b = hex_nibble(&s[2..3])?;
            let a = if s.len() == 4 {
                hex_nibble(&s[3..4])?
            } else {
                255
            };
            Ok(Rgba8 { r, g, b, a })
        }
        6 | 8 => {
            let r = hex_byte(&s[0..2])?;
            let g = hex_byte(&s[2..4])?;
            let b = hex_byte(&s[4..6])?;
            let a = if s.len() == 8 { hex_byte(&s[6..8])? } else { 255 };
            Ok(Rgba8 { r, g, b, a })
        }
        _ => Err(SlideError::validation(
            "hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA",
        )),
    }
}

fn named_color(name: &str) -> Option<Rgba8> {
    let c = match name {
        "black" => Rgba8::opaque(0, 0, 0),
        "white" => Rgba8::opaque(255, 255, 255),
        "red" => Rgba8::opaque(255, 0, 0),
        "green" => Rgba8::opaque(0, 128, 0),
        "lime" => Rgba8::opaque(0, 255, 0),
        "blue" => Rgba8::opaque(0, 0, 255),
        "yellow" => Rgba8::opaque(255, 255, 0),
        "orange" => Rgba8::opaque(255, 165, 0),
        "gray" | "grey" => Rgba8::opaque(128, 128, 128),
        "transparent" => Rgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        },
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
