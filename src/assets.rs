//! Background image loading and decoding.

use std::sync::Arc;

pub mod decode;
pub mod source;

/// Decoded background image ready for rasterization.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}
