use std::io::Cursor;

use anyhow::Context;

use crate::{
    foundation::error::{SlideError, SlideResult},
    render::FrameRGBA,
};

/// Encode a frame as a straight-alpha RGBA PNG.
pub fn encode_png(frame: &FrameRGBA) -> SlideResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba8())
        .ok_or_else(|| SlideError::validation("frame byte length does not match its size"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
