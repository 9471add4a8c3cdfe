use anyhow::Context;

use crate::{
    foundation::error::{SlideError, SlideResult},
    render::FrameRGBA,
};

/// Default JPEG quality for PDF pages.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Encode a frame as baseline JPEG. Transparent pixels flatten to black.
pub fn encode_jpeg(frame: &FrameRGBA, quality: u8) -> SlideResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(SlideError::validation(format!(
            "jpeg quality must be in 1..=100, got {quality}"
        )));
    }
    let rgb = frame.flatten_to_rgb8([0, 0, 0]);
    let rgb = image::RgbImage::from_raw(frame.width, frame.height, rgb)
        .ok_or_else(|| SlideError::validation("frame byte length does not match its size"))?;

    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(&rgb)
        .context("encode jpeg")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jpeg.rs"]
mod tests;
