use std::path::PathBuf;

use crate::{
    assets::source::{FsImageSource, ImageSource, load_image},
    encode::{jpeg::DEFAULT_JPEG_QUALITY, pdf::PageFormat},
    foundation::error::{SlideError, SlideResult},
    model::slide::Slide,
    render::{CpuRasterizer, FontScale, FrameRGBA, layout_slide},
    text::engine::{GlyphShaper, TextEngine, TextEngineOpts},
};

/// Export configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportOpts {
    /// JPEG quality used for PDF pages (1..=100).
    pub jpeg_quality: u8,
    /// PDF page format.
    pub page: PageFormat,
    /// Extra font directories.
    pub font_dirs: Vec<PathBuf>,
    /// Load fonts installed on the host.
    pub load_system_fonts: bool,
    /// Straight-alpha color painted under backgrounds; `None` keeps the surface transparent.
    pub clear_rgba: Option<[u8; 4]>,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            page: PageFormat::A4,
            font_dirs: Vec::new(),
            load_system_fonts: true,
            clear_rgba: None,
        }
    }
}

impl ExportOpts {
    /// Defaults overlaid with `SLIDEPRESS_*` environment variables.
    pub fn from_env() -> SlideResult<Self> {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Overlay settings read through `lookup`.
    ///
    /// Recognized keys: `SLIDEPRESS_JPEG_QUALITY`, `SLIDEPRESS_PAGE`, `SLIDEPRESS_FONT_DIR`
    /// (a platform path list) and `SLIDEPRESS_NO_SYSTEM_FONTS` (`1`/`true`).
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> SlideResult<Self> {
        if let Some(q) = lookup("SLIDEPRESS_JPEG_QUALITY") {
            self.jpeg_quality = q.trim().parse::<u8>().map_err(|_| {
                SlideError::validation(format!(
                    "SLIDEPRESS_JPEG_QUALITY must be 1..=100, got '{q}'"
                ))
            })?;
        }
        if let Some(page) = lookup("SLIDEPRESS_PAGE") {
            self.page = page.parse()?;
        }
        if let Some(dirs) = lookup("SLIDEPRESS_FONT_DIR") {
            self.font_dirs
                .extend(std::env::split_paths(&dirs).filter(|p| !p.as_os_str().is_empty()));
        }
        if let Some(v) = lookup("SLIDEPRESS_NO_SYSTEM_FONTS") {
            let v = v.trim().to_ascii_lowercase();
            self.load_system_fonts = !matches!(v.as_str(), "1" | "true" | "yes");
        }
        self.validate()?;
        Ok(self)
    }

    /// Check ranges.
    pub fn validate(&self) -> SlideResult<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(SlideError::validation(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    /// Font database options derived from these settings.
    pub fn text_engine_opts(&self) -> TextEngineOpts {
        TextEngineOpts {
            load_system_fonts: self.load_system_fonts,
            font_dirs: self.font_dirs.clone(),
        }
    }
}

/// How authored font sizes are mapped when rendering a slide at native resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSizing {
    /// Draw sizes as authored.
    Authored,
    /// Sizes were authored against a display this many pixels wide; `0` means native width.
    Display(u32),
}

/// Owns the collaborators needed to render slides: image loading, fonts and the rasterizer.
///
/// Every render borrows the session mutably, so one session never draws two slides at once.
pub struct RenderSession {
    images: Box<dyn ImageSource>,
    shaper: Box<dyn GlyphShaper>,
    raster: CpuRasterizer,
    opts: ExportOpts,
}

impl RenderSession {
    /// Session reading images relative to `assets_root` and fonts from the configured database.
    pub fn new(assets_root: impl Into<PathBuf>, opts: ExportOpts) -> SlideResult<Self> {
        opts.validate()?;
        let engine = TextEngine::new(&opts.text_engine_opts());
        if engine.face_count() == 0 {
            tracing::warn!("no fonts found; slides with text will fail to render");
        }
        Ok(Self::with_collaborators(
            Box::new(FsImageSource::new(assets_root)),
            Box::new(engine),
            opts,
        ))
    }

    /// Session over caller-supplied collaborators.
    pub fn with_collaborators(
        images: Box<dyn ImageSource>,
        shaper: Box<dyn GlyphShaper>,
        opts: ExportOpts,
    ) -> Self {
        let raster = CpuRasterizer::new(opts.clear_rgba);
        Self {
            images,
            shaper,
            raster,
            opts,
        }
    }

    /// Active configuration.
    pub fn opts(&self) -> &ExportOpts {
        &self.opts
    }

    /// Decode the slide background and rasterize the slide at the image's native size.
    #[tracing::instrument(level = "debug", skip(self, slide), fields(slide = slide.id))]
    pub fn render_slide(&mut self, slide: &Slide, sizing: TextSizing) -> SlideResult<FrameRGBA> {
        let background = load_image(self.images.as_ref(), &slide.image_src)?;
        let font_scale = match sizing {
            TextSizing::Authored => FontScale::Authored,
            TextSizing::Display(display_width) => FontScale::DisplayRelative {
                native_width: background.width,
                display_width,
            },
        };

        let layout = layout_slide(
            slide,
            background.width,
            background.height,
            font_scale,
            self.shaper.as_mut(),
        )?;
        self.raster
            .rasterize(&background, &layout, self.shaper.as_mut())
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
