use std::io::Cursor;

use super::*;
use crate::{
    assets::source::MemoryImageSource,
    encode::pdf::PageFormat,
    session::ExportOpts,
    text::{
        engine::{GlyphShaper, ShapedLine},
        metrics::{FontMetrics, FontSpec},
    },
};

struct NoGlyphs;

impl FontMetrics for NoGlyphs {
    fn line_width(&mut self, _font: &FontSpec, line: &str) -> SlideResult<f64> {
        Ok(line.len() as f64)
    }
}

impl GlyphShaper for NoGlyphs {
    fn shape_line(&mut self, _font: &FontSpec, _line: &str) -> SlideResult<ShapedLine> {
        Ok(ShapedLine::default())
    }
}

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn session(opts: ExportOpts) -> RenderSession {
    let images = MemoryImageSource::new()
        .with("wide", png(128, 72))
        .with("tall", png(80, 120));
    RenderSession::with_collaborators(Box::new(images), Box::new(NoGlyphs), opts)
}

#[test]
fn one_page_per_slide_fitted_and_centered() {
    let editor = EditorState::with_images(["wide", "tall"]);
    let out = export_pdf(&mut session(ExportOpts::default()), &editor, None).unwrap();

    assert_eq!(out.file_name, DEFAULT_PDF_FILE_NAME);
    assert_eq!(out.pages, 2);
    assert!(out.bytes.starts_with(b"%PDF-"));

    let (pw, ph) = PageFormat::A4.size_pt();
    let wide = out.placements[0];
    assert!((wide.width - pw).abs() < 1e-6);
    assert_eq!(wide.y, ((ph - wide.height) / 2.0).round());
    let tall = out.placements[1];
    assert!((tall.height - ph).abs() < 1e-6);
    assert_eq!(tall.x, ((pw - tall.width) / 2.0).round());
}

#[test]
fn custom_name_and_letter_pages() {
    let editor = EditorState::with_images(["wide"]);
    let opts = ExportOpts {
        page: PageFormat::Letter,
        ..ExportOpts::default()
    };
    let out = export_pdf(&mut session(opts), &editor, Some("deck.pdf")).unwrap();
    assert_eq!(out.file_name, "deck.pdf");
    assert!((out.placements[0].width - 612.0).abs() < 1e-6);
}

#[test]
fn one_broken_slide_aborts_the_export() {
    let editor = EditorState::with_images(["wide", "missing", "tall"]);
    let err = export_pdf(&mut session(ExportOpts::default()), &editor, None).unwrap_err();
    assert!(err.is_resource_unavailable());
}

#[test]
fn write_to_persists_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let editor = EditorState::with_images(["wide"]);
    let out = export_pdf(&mut session(ExportOpts::default()), &editor, None).unwrap();
    let path = dir.path().join("nested/slides.pdf");
    out.write_to(&path).unwrap();
    assert_eq!(std::fs::read(path).unwrap(), out.bytes);
}
