use std::sync::Arc;

use vello_cpu::kurbo::{Affine, Rect};

use crate::{
    assets::PreparedImage,
    foundation::error::{SlideError, SlideResult},
    render::{
        backend::FrameRGBA,
        layout::{ElementLayout, SlideLayout},
    },
    text::engine::GlyphShaper,
};

/// CPU rasterizer built on `vello_cpu`.
///
/// Holds one reusable render context; every [`CpuRasterizer::rasterize`] call resets it, draws
/// and reads back before returning, so no state leaks between slides.
pub struct CpuRasterizer {
    ctx: Option<vello_cpu::RenderContext>,
    clear_rgba: Option<[u8; 4]>,
}

impl Default for CpuRasterizer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl CpuRasterizer {
    /// `clear_rgba` (straight alpha) is painted under the background; `None` leaves the surface
    /// transparent.
    pub fn new(clear_rgba: Option<[u8; 4]>) -> Self {
        Self {
            ctx: None,
            clear_rgba,
        }
    }

    /// Paint `background` stretched to the layout surface, then every laid out line in order.
    pub fn rasterize(
        &mut self,
        background: &PreparedImage,
        layout: &SlideLayout,
        shaper: &mut dyn GlyphShaper,
    ) -> SlideResult<FrameRGBA> {
        let (width, height) = surface_size(layout.width, layout.height)?;
        let bg_paint = image_paint(background)?;
        let clear = self.clear_rgba;

        self.with_ctx_mut(width, height, |ctx| {
            let surface = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
            if let Some([r, g, b, a]) = clear {
                ctx.set_transform(Affine::IDENTITY);
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
                ctx.fill_rect(&surface);
            }

            let (iw, ih) = (f64::from(background.width), f64::from(background.height));
            ctx.set_transform(Affine::scale_non_uniform(
                surface.width() / iw,
                surface.height() / ih,
            ));
            ctx.set_paint(bg_paint);
            ctx.fill_rect(&Rect::new(0.0, 0.0, iw, ih));

            for el in &layout.elements {
                paint_element(ctx, el, shaper)?;
            }

            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(FrameRGBA {
                width: u32::from(width),
                height: u32::from(height),
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            })
        })
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> SlideResult<R>,
    ) -> SlideResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }
}

fn paint_element(
    ctx: &mut vello_cpu::RenderContext,
    el: &ElementLayout,
    shaper: &mut dyn GlyphShaper,
) -> SlideResult<()> {
    let c = el.color;
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));

    for line in &el.lines {
        if line.text.is_empty() {
            continue;
        }
        let shaped = shaper.shape_line(&el.font, &line.text)?;
        ctx.set_transform(Affine::translate((line.x, line.y)));
        for run in &shaped.runs {
            let glyphs = run.glyphs.iter().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&run.font)
                .font_size(run.font_size)
                .fill_glyphs(glyphs);
        }
    }
    Ok(())
}

fn surface_size(width: u32, height: u32) -> SlideResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SlideError::precondition("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SlideError::precondition("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(SlideError::precondition("surface must be non-empty"));
    }
    Ok((w, h))
}

fn image_paint(img: &PreparedImage) -> SlideResult<vello_cpu::Image> {
    let pixmap = premul_bytes_to_pixmap(img.rgba8_premul.as_slice(), img.width, img.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> SlideResult<vello_cpu::Pixmap> {
    let (w, h) = surface_size(width, height)
        .map_err(|e| SlideError::precondition(format!("background image: {e}")))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(SlideError::validation(
            "prepared image byte length mismatch",
        ));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
