use std::{
    borrow::Cow,
    collections::HashMap,
    path::{Path, PathBuf},
};

use usvg::fontdb;

use crate::{
    foundation::error::{SlideError, SlideResult},
    text::metrics::{FontMetrics, FontSpec},
};

/// Glyph positioned relative to the top-left corner of its line box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedGlyph {
    /// Glyph id within the run's font.
    pub id: u32,
    /// Horizontal pen position.
    pub x: f32,
    /// Baseline position measured down from the line top.
    pub y: f32,
}

/// Glyphs sharing one font face and size.
#[derive(Clone, Debug)]
pub struct ShapedRun {
    /// Face used to draw the glyphs.
    pub font: vello_cpu::peniko::FontData,
    /// Font size in pixels.
    pub font_size: f32,
    /// Positioned glyphs.
    pub glyphs: Vec<PositionedGlyph>,
}

/// One shaped line of text.
#[derive(Clone, Debug, Default)]
pub struct ShapedLine {
    /// Advance width of the line.
    pub width: f64,
    /// Glyph runs in visual order.
    pub runs: Vec<ShapedRun>,
}

/// Font collaborator used by the rasterizer: measurement plus glyph output.
pub trait GlyphShaper: FontMetrics {
    /// Shape a single line (no newlines) so it can be painted with its box top at `y = 0`.
    fn shape_line(&mut self, font: &FontSpec, line: &str) -> SlideResult<ShapedLine>;
}

/// Options used to build a [`TextEngine`] font database.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TextEngineOpts {
    /// Load fonts installed on the host.
    pub load_system_fonts: bool,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` files.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for TextEngineOpts {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

/// A face resolved from the database, with a Parley context that holds only its font file.
///
/// `weight` and `style` are the attributes Parley reports for the resolved face, so a layout
/// pushing them selects that face even when the file is a collection.
struct ResolvedFace {
    font_ctx: parley::FontContext,
    family: String,
    weight: parley::style::FontWeight,
    style: parley::style::FontStyle,
}

/// Font resolution, measurement and shaping backed by `fontdb` and Parley.
///
/// Families resolve the way a browser canvas would for a single named family: exact family, then
/// the generic sans-serif family, then whatever face the database has first.
pub struct TextEngine {
    db: fontdb::Database,
    layout_ctx: parley::LayoutContext<()>,
    faces: HashMap<fontdb::ID, ResolvedFace>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new(&TextEngineOpts::default())
    }
}

impl TextEngine {
    /// Build an engine from system fonts and/or font directories.
    pub fn new(opts: &TextEngineOpts) -> Self {
        let mut db = fontdb::Database::new();
        if opts.load_system_fonts {
            db.load_system_fonts();
        }
        for dir in &opts.font_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "font database ready");
        Self::from_database(db)
    }

    /// Build an engine from in-memory font files only.
    pub fn from_font_data(fonts: impl IntoIterator<Item = Vec<u8>>) -> Self {
        let mut db = fontdb::Database::new();
        for bytes in fonts {
            db.load_font_data(bytes);
        }
        Self::from_database(db)
    }

    fn from_database(db: fontdb::Database) -> Self {
        Self {
            db,
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    /// Number of faces available for resolution.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    fn resolve(&mut self, font: &FontSpec) -> SlideResult<fontdb::ID> {
        let families = [family_for(&font.family), fontdb::Family::SansSerif];
        let query = fontdb::Query {
            families: &families,
            weight: if font.bold {
                fontdb::Weight::BOLD
            } else {
                fontdb::Weight::NORMAL
            },
            stretch: fontdb::Stretch::Normal,
            style: if font.italic {
                fontdb::Style::Italic
            } else {
                fontdb::Style::Normal
            },
        };

        let id = match self.db.query(&query) {
            Some(id) => id,
            None => {
                let id = self.db.faces().next().map(|f| f.id).ok_or_else(|| {
                    SlideError::precondition(format!("no fonts available to render '{font}'"))
                })?;
                tracing::warn!(font = %font, "font family not found, using first available face");
                id
            }
        };

        if !self.faces.contains_key(&id) {
            let face = self.load_face(id)?;
            self.faces.insert(id, face);
        }
        Ok(id)
    }

    fn load_face(&self, id: fontdb::ID) -> SlideResult<ResolvedFace> {
        let (bytes, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| SlideError::precondition("font face data is unavailable"))?;

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes), None);
        let (family_id, info) = families
            .iter()
            .find_map(|(family, fonts)| {
                fonts
                    .iter()
                    .find(|info| info.index() == index)
                    .map(|info| (*family, info))
            })
            .ok_or_else(|| SlideError::precondition("resolved face was not registered"))?;
        let (weight, style) = (info.weight(), info.style());
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SlideError::precondition("registered font family has no name"))?
            .to_string();

        tracing::debug!(family = %family, index, weight = weight.value(), "loaded font face");
        Ok(ResolvedFace {
            font_ctx,
            family,
            weight,
            style,
        })
    }

    fn layout_line(&mut self, font: &FontSpec, line: &str) -> SlideResult<parley::Layout<()>> {
        if !font.size_px.is_finite() || font.size_px <= 0.0 {
            return Err(SlideError::validation(
                "font size must be finite and > 0",
            ));
        }
        let id = self.resolve(font)?;
        let face = self
            .faces
            .get_mut(&id)
            .ok_or_else(|| SlideError::precondition("resolved font face missing from cache"))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut face.font_ctx, line, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(face.weight));
        builder.push_default(parley::style::StyleProperty::FontStyle(face.style));
        builder.push_default(parley::style::StyleProperty::FontSize(
            font.size_px as f32,
        ));

        let mut layout: parley::Layout<()> = builder.build(line);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl FontMetrics for TextEngine {
    fn line_width(&mut self, font: &FontSpec, line: &str) -> SlideResult<f64> {
        if line.is_empty() {
            return Ok(0.0);
        }
        let layout = self.layout_line(font, line)?;
        Ok(f64::from(layout.full_width()))
    }
}

impl GlyphShaper for TextEngine {
    fn shape_line(&mut self, font: &FontSpec, line: &str) -> SlideResult<ShapedLine> {
        if line.is_empty() {
            return Ok(ShapedLine::default());
        }
        let layout = self.layout_line(font, line)?;

        let mut runs = Vec::new();
        for layout_line in layout.lines() {
            for item in layout_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run
                    .positioned_glyphs()
                    .map(|g| PositionedGlyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect();
                // Paint with the face Parley shaped this run with.
                runs.push(ShapedRun {
                    font: run.run().font().clone(),
                    font_size: run.run().font_size(),
                    glyphs,
                });
            }
        }

        Ok(ShapedLine {
            width: f64::from(layout.full_width()),
            runs,
        })
    }
}

fn family_for(name: &str) -> fontdb::Family<'_> {
    match name.trim().to_ascii_lowercase().as_str() {
        "serif" => fontdb::Family::Serif,
        "sans-serif" => fontdb::Family::SansSerif,
        "monospace" => fontdb::Family::Monospace,
        "cursive" => fontdb::Family::Cursive,
        "fantasy" => fontdb::Family::Fantasy,
        _ => fontdb::Family::Name(name.trim()),
    }
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(err) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), %err, "skipping unreadable font file");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
