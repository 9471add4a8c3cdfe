use std::{fmt, str::FromStr};

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, TextStr};

use crate::foundation::error::{SlideError, SlideResult};

const IMAGE_NAME: &[u8] = b"Im1";

/// Page size of exported PDFs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    /// ISO A4 portrait.
    #[default]
    A4,
    /// US Letter portrait.
    Letter,
}

impl PageFormat {
    /// `(width, height)` in PDF points.
    pub fn size_pt(self) -> (f64, f64) {
        match self {
            Self::A4 => (595.28, 841.89),
            Self::Letter => (612.0, 792.0),
        }
    }
}

impl fmt::Display for PageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::A4 => "a4",
            Self::Letter => "letter",
        })
    }
}

impl FromStr for PageFormat {
    type Err = SlideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "letter" => Ok(Self::Letter),
            other => Err(SlideError::validation(format!(
                "unknown page format '{other}' (expected a4 or letter)"
            ))),
        }
    }
}

/// Where an image lands on a page, top-left origin, in page units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Left offset.
    pub x: f64,
    /// Top offset.
    pub y: f64,
    /// Drawn width.
    pub width: f64,
    /// Drawn height.
    pub height: f64,
}

/// Scale an image to the page width, or to the page height when that would overflow, and
/// center it. Offsets are rounded to whole page units.
pub fn fit_to_page(img_w: u32, img_h: u32, page_w: f64, page_h: f64) -> Placement {
    if img_w == 0 || img_h == 0 {
        return Placement {
            x: 0.0,
            y: 0.0,
            width: page_w,
            height: page_h,
        };
    }

    let ratio = f64::from(img_w) / f64::from(img_h);
    let (mut width, mut height) = (page_w, page_w / ratio);
    if height > page_h {
        height = page_h;
        width = page_h * ratio;
    }

    Placement {
        x: ((page_w - width) / 2.0).round(),
        y: ((page_h - height) / 2.0).round(),
        width,
        height,
    }
}

/// Incremental writer for a PDF with one full-page JPEG per page.
pub struct PdfDocumentBuilder {
    pdf: Pdf,
    next_ref: i32,
    catalog_id: Ref,
    pages_id: Ref,
    info_id: Ref,
    page_ids: Vec<Ref>,
    page_size: (f64, f64),
    placements: Vec<Placement>,
}

impl PdfDocumentBuilder {
    /// Empty document whose pages all use `format`.
    pub fn new(format: PageFormat) -> Self {
        Self {
            pdf: Pdf::new(),
            next_ref: 4,
            catalog_id: Ref::new(1),
            pages_id: Ref::new(2),
            info_id: Ref::new(3),
            page_ids: Vec::new(),
            page_size: format.size_pt(),
            placements: Vec::new(),
        }
    }

    fn alloc(&mut self) -> Ref {
        let r = Ref::new(self.next_ref);
        self.next_ref += 1;
        r
    }

    /// Number of pages written so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Placements of every page image, in page order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Append a page showing `jpeg` (a `width` x `height` baseline JPEG) fitted to the page.
    pub fn add_jpeg_page(
        &mut self,
        jpeg: &[u8],
        width: u32,
        height: u32,
    ) -> SlideResult<Placement> {
        let w: i32 = width
            .try_into()
            .map_err(|_| SlideError::validation("page image width out of range"))?;
        let h: i32 = height
            .try_into()
            .map_err(|_| SlideError::validation("page image height out of range"))?;

        let image_id = self.alloc();
        let content_id = self.alloc();
        let page_id = self.alloc();

        {
            let mut image = self.pdf.image_xobject(image_id, jpeg);
            image.filter(Filter::DctDecode);
            image.width(w);
            image.height(h);
            image.color_space().device_rgb();
            image.bits_per_component(8);
        }

        let (page_w, page_h) = self.page_size;
        let place = fit_to_page(width, height, page_w, page_h);

        // PDF user space has its origin at the bottom-left.
        let mut content = Content::new();
        content.save_state();
        content.transform([
            place.width as f32,
            0.0,
            0.0,
            place.height as f32,
            place.x as f32,
            (page_h - place.y - place.height) as f32,
        ]);
        content.x_object(Name(IMAGE_NAME));
        content.restore_state();
        let raw = content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        self.pdf
            .stream(content_id, &compressed)
            .filter(Filter::FlateDecode);

        {
            let mut page = self.pdf.page(page_id);
            page.media_box(Rect::new(0.0, 0.0, page_w as f32, page_h as f32))
                .parent(self.pages_id)
                .contents(content_id);
            page.resources().x_objects().pair(Name(IMAGE_NAME), image_id);
        }

        self.page_ids.push(page_id);
        self.placements.push(place);
        Ok(place)
    }

    /// Write the page tree and return the document bytes.
    pub fn finish(mut self) -> SlideResult<Vec<u8>> {
        if self.page_ids.is_empty() {
            return Err(SlideError::precondition("pdf has no pages"));
        }

        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .kids(self.page_ids.iter().copied())
            .count(self.page_ids.len() as i32);
        self.pdf
            .document_info(self.info_id)
            .producer(TextStr(concat!("slidepress ", env!("CARGO_PKG_VERSION"))));
        Ok(self.pdf.finish())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/pdf.rs"]
mod tests;
