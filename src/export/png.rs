use std::path::{Path, PathBuf};

use crate::{
    encode::png::encode_png,
    export::write_bytes,
    foundation::error::{SlideError, SlideResult},
    model::editor::EditorState,
    session::{RenderSession, TextSizing},
};

/// An encoded PNG of one slide.
#[derive(Clone, Debug)]
pub struct PngExport {
    /// Suggested file name, `slide-<n>.png` with a 1-based slide number.
    pub file_name: String,
    /// Encoded PNG.
    pub bytes: Vec<u8>,
    /// Pixel width (the background's native width).
    pub width: u32,
    /// Pixel height.
    pub height: u32,
}

impl PngExport {
    /// Write into `dir` under [`PngExport::file_name`] and return the full path.
    pub fn write_to_dir(&self, dir: &Path) -> SlideResult<PathBuf> {
        let path = dir.join(&self.file_name);
        write_bytes(&path, &self.bytes)?;
        Ok(path)
    }
}

/// File name for the slide at 0-based `index`.
pub fn png_file_name(index: usize) -> String {
    format!("slide-{}.png", index + 1)
}

/// Export the displayed slide.
///
/// The slide is rendered at its background's native resolution; font sizes authored against a
/// `display_width`-pixel wide view are scaled up (or down) to match. `None` renders sizes as if
/// the slide had been displayed at native width.
pub fn export_png(
    session: &mut RenderSession,
    editor: &EditorState,
    display_width: Option<u32>,
) -> SlideResult<PngExport> {
    export_slide_png(session, editor, editor.current_slide_index, display_width)
}

/// Export the slide at 0-based `index`.
#[tracing::instrument(level = "info", skip(session, editor))]
pub fn export_slide_png(
    session: &mut RenderSession,
    editor: &EditorState,
    index: usize,
    display_width: Option<u32>,
) -> SlideResult<PngExport> {
    let slide = editor.slides.get(index).ok_or_else(|| {
        SlideError::validation(format!(
            "slide index {index} out of range ({} slides)",
            editor.slides.len()
        ))
    })?;

    let frame = session.render_slide(slide, TextSizing::Display(display_width.unwrap_or(0)))?;
    let bytes = encode_png(&frame)?;
    let file_name = png_file_name(index);
    tracing::info!(
        file = %file_name,
        width = frame.width,
        height = frame.height,
        bytes = bytes.len(),
        "exported slide png"
    );

    Ok(PngExport {
        file_name,
        bytes,
        width: frame.width,
        height: frame.height,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
