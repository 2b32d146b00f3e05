use crate::assets::color::ColorDef;
use crate::foundation::error::ScanResult;
use crate::render::composite::{clear_rect_in_place, over, over_in_place};
use crate::render::frame::FrameRGBA;
use crate::render::surface::Surface;

/// Options for [`CpuSurface`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuSurfaceOpts {
    pub(crate) background: Option<[u8; 4]>,
}

impl CpuSurfaceOpts {
    /// Straight RGBA8 color placed under the surface content when exporting a frame.
    pub fn with_background(mut self, background: Option<[u8; 4]>) -> Self {
        self.background = background;
        self
    }
}

/// Raster [`Surface`] backed by `vello_cpu`.
///
/// Behaves like a 2D canvas context: resizing drops pixels and resets the fill color to black
/// and the global alpha to 1, unparseable colors and out-of-range alphas are ignored. Fills are
/// batched in a `vello_cpu` context and composited onto the pixel buffer whenever a clear or an
/// export needs the buffer to be current.
pub struct CpuSurface {
    opts: CpuSurfaceOpts,
    width: u16,
    height: u16,
    data: Vec<u8>,
    ctx: Option<vello_cpu::RenderContext>,
    pending_fills: usize,
    fill: ColorDef,
    global_alpha: f32,
}

impl CpuSurface {
    pub fn new(opts: CpuSurfaceOpts) -> Self {
        Self {
            opts,
            width: 0,
            height: 0,
            data: Vec::new(),
            ctx: None,
            pending_fills: 0,
            fill: ColorDef::black(),
            global_alpha: 1.0,
        }
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Snapshot the surface as a premultiplied frame, composited over the configured background.
    pub fn to_frame(&mut self) -> ScanResult<FrameRGBA> {
        self.flush();

        let data = match self.opts.background {
            Some([r, g, b, a]) => {
                let bg = ColorDef::rgba(
                    f64::from(r) / 255.0,
                    f64::from(g) / 255.0,
                    f64::from(b) / 255.0,
                    f64::from(a) / 255.0,
                )
                .to_rgba8_premul()
                .to_array();
                let mut out = bg.repeat(self.data.len() / 4);
                over_in_place(&mut out, &self.data, 1.0)?;
                out
            }
            None => self.data.clone(),
        };

        Ok(FrameRGBA {
            width: self.width(),
            height: self.height(),
            data,
            premultiplied: true,
        })
    }

    fn has_pixels(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    fn ctx_mut(&mut self) -> &mut vello_cpu::RenderContext {
        let (width, height) = (self.width, self.height);
        let ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        self.ctx.insert(ctx)
    }

    /// Composite batched fills onto the pixel buffer.
    fn flush(&mut self) {
        if self.pending_fills == 0 {
            return;
        }
        let (width, height) = (self.width, self.height);
        let mut scratch = vello_cpu::Pixmap::new(width, height);
        {
            let ctx = self.ctx_mut();
            ctx.flush();
            ctx.render_to_pixmap(&mut scratch);
            ctx.reset();
        }
        for (d, s) in self
            .data
            .chunks_exact_mut(4)
            .zip(scratch.data_as_u8_slice().chunks_exact(4))
        {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], 1.0);
            d.copy_from_slice(&out);
        }
        tracing::trace!(fills = self.pending_fills, "flushed batched fills");
        self.pending_fills = 0;
    }
}

impl Default for CpuSurface {
    fn default() -> Self {
        Self::new(CpuSurfaceOpts::default())
    }
}

/// Largest pixel area a surface will allocate (16384 x 16384).
pub const MAX_SURFACE_AREA: u64 = 268_435_456;

/// Canvas dimensions are whole pixels; anything unrepresentable collapses to 0 or clamps.
fn surface_dim(v: f64, axis: &str) -> u16 {
    if !(v.is_finite() && v > 0.0) {
        return 0;
    }
    let floored = v.floor();
    if floored > f64::from(u16::MAX) {
        tracing::warn!(axis, requested = v, "surface dimension clamped to u16::MAX");
        return u16::MAX;
    }
    floored as u16
}

impl Surface for CpuSurface {
    fn set_size(&mut self, width: f64, height: f64) {
        let (w, h) = (surface_dim(width, "width"), surface_dim(height, "height"));
        if u64::from(w) * u64::from(h) > MAX_SURFACE_AREA {
            tracing::warn!(
                width = w,
                height = h,
                max_area = MAX_SURFACE_AREA,
                "surface area exceeds limit, collapsing to 0x0"
            );
            (self.width, self.height) = (0, 0);
        } else {
            (self.width, self.height) = (w, h);
        }
        self.data = vec![0u8; usize::from(self.width) * usize::from(self.height) * 4];
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.reset();
        }
        self.pending_fills = 0;
        self.fill = ColorDef::black();
        self.global_alpha = 1.0;
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if !self.has_pixels() {
            return;
        }
        self.flush();
        let (width, height) = (self.width(), self.height());
        if let Err(e) = clear_rect_in_place(&mut self.data, width, height, x, y, w, h) {
            tracing::warn!(error = %e, "clear_rect skipped");
        }
    }

    fn set_fill_color(&mut self, color: &str) {
        match ColorDef::parse(color) {
            Ok(c) => self.fill = c,
            Err(e) => tracing::warn!(color, error = %e, "ignoring unparseable fill color"),
        }
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
            self.global_alpha = alpha as f32;
        } else {
            tracing::debug!(alpha, "ignoring out-of-range global alpha");
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if !self.has_pixels() || self.global_alpha <= 0.0 {
            return;
        }
        if ![x, y, w, h].iter().all(|v| v.is_finite()) || w == 0.0 || h == 0.0 {
            return;
        }

        let [r, g, b, a] = self.fill.to_rgba8_straight();
        let opacity = self.global_alpha;
        let ctx = self.ctx_mut();
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x, y, x + w, y + h));
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        self.pending_fills += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
