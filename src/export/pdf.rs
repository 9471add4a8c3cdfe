use std::path::Path;

use crate::{
    encode::{
        jpeg::encode_jpeg,
        pdf::{PdfDocumentBuilder, Placement},
    },
    export::write_bytes,
    foundation::error::{SlideError, SlideResult},
    model::editor::EditorState,
    session::{RenderSession, TextSizing},
};

/// File name used when the caller does not choose one.
pub const DEFAULT_PDF_FILE_NAME: &str = "slides.pdf";

/// An encoded multi-page PDF.
#[derive(Clone, Debug)]
pub struct PdfExport {
    /// Target file name, [`DEFAULT_PDF_FILE_NAME`] unless the caller chose one.
    pub file_name: String,
    /// Encoded document.
    pub bytes: Vec<u8>,
    /// One page per slide.
    pub pages: usize,
    /// Where each slide image sits on its page (top-left origin, points).
    pub placements: Vec<Placement>,
}

impl PdfExport {
    /// Write the document to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path) -> SlideResult<()> {
        write_bytes(path, &self.bytes)
    }
}

/// Export every slide, in order, one fitted page each.
///
/// Slides render at native resolution with authored font sizes and are embedded as JPEG. The
/// first slide that fails to load aborts the whole export.
#[tracing::instrument(level = "info", skip(session, editor), fields(slides = editor.slides.len()))]
pub fn export_pdf(
    session: &mut RenderSession,
    editor: &EditorState,
    file_name: Option<&str>,
) -> SlideResult<PdfExport> {
    if editor.slides.is_empty() {
        return Err(SlideError::precondition("nothing to export: no slides"));
    }

    let quality = session.opts().jpeg_quality;
    let mut doc = PdfDocumentBuilder::new(session.opts().page);
    for (index, slide) in editor.slides.iter().enumerate() {
        let frame = session.render_slide(slide, TextSizing::Authored)?;
        let jpeg = encode_jpeg(&frame, quality)?;
        let place = doc.add_jpeg_page(&jpeg, frame.width, frame.height)?;
        tracing::debug!(
            index,
            slide = slide.id,
            x = place.x,
            y = place.y,
            w = place.width,
            h = place.height,
            "added pdf page"
        );
    }

    let pages = doc.page_count();
    let placements = doc.placements().to_vec();
    let bytes = doc.finish()?;
    let file_name = file_name.unwrap_or(DEFAULT_PDF_FILE_NAME).to_string();
    tracing::info!(file = %file_name, pages, bytes = bytes.len(), "exported pdf");

    Ok(PdfExport {
        file_name,
        bytes,
        pages,
        placements,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/pdf.rs"]
mod tests;
