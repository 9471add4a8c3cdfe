//! Slidepress renders slide decks (background images with styled text overlays) to PNG and PDF.
//!
//! The pipeline is one-way:
//!
//! - An [`EditorState`] holds the ordered [`Slide`]s and their [`TextElement`]s, positioned in
//!   percent of the slide so layout is independent of resolution.
//! - A [`RenderSession`] loads each background, lays text out at the image's native resolution
//!   and rasterizes it on the CPU.
//! - [`export_png`] encodes the displayed slide; [`export_pdf`] encodes every slide as a fitted
//!   JPEG page.
#![forbid(unsafe_code)]

pub mod assets;
pub mod encode;
pub mod export;
pub mod foundation;
pub mod model;
pub mod render;
pub mod session;
pub mod text;

pub use crate::foundation::color::{Rgba8, parse_color};
pub use crate::foundation::error::{SlideError, SlideResult};

pub use crate::assets::source::{FsImageSource, ImageSource, MemoryImageSource};
pub use crate::encode::pdf::{PageFormat, Placement, fit_to_page};
pub use crate::export::pdf::{DEFAULT_PDF_FILE_NAME, PdfExport, export_pdf};
pub use crate::export::png::{PngExport, export_png, export_slide_png};
pub use crate::model::editor::EditorState;
pub use crate::model::element::{Align, Corner, TextElement, TextUpdate};
pub use crate::model::slide::Slide;
pub use crate::render::{FontScale, FrameRGBA};
pub use crate::session::{ExportOpts, RenderSession, TextSizing};
pub use crate::text::engine::{GlyphShaper, TextEngine, TextEngineOpts};
pub use crate::text::metrics::{FontMetrics, FontSpec};
