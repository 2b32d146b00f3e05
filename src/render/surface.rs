/// Drawing target driven by the grid renderer.
///
/// Mirrors the subset of a 2D canvas context the renderer needs. Implementations must preserve
/// call order: later fills paint over earlier ones at the same location.
pub trait Surface {
    /// Resize the surface. Resizing discards previous content.
    fn set_size(&mut self, width: f64, height: f64);

    /// Reset the pixels under `(x, y, w, h)` to fully transparent.
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    /// Set the color used by subsequent fills.
    fn set_fill_color(&mut self, color: &str);

    /// Set the opacity multiplier applied to subsequent fills.
    fn set_global_alpha(&mut self, alpha: f64);

    /// Fill `(x, y, w, h)` with the current color and global alpha.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn set_size(&mut self, width: f64, height: f64) {
        (**self).set_size(width, height);
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        (**self).clear_rect(x, y, w, h);
    }

    fn set_fill_color(&mut self, color: &str) {
        (**self).set_fill_color(color);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        (**self).set_global_alpha(alpha);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        (**self).fill_rect(x, y, w, h);
    }
}

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceOp {
    SetSize { width: f64, height: f64 },
    ClearRect { x: f64, y: f64, w: f64, h: f64 },
    SetFillColor { color: String },
    SetGlobalAlpha { alpha: f64 },
    FillRect { x: f64, y: f64, w: f64, h: f64 },
}

/// A filled cell as seen by a [`RecordingSurface`]: the rect plus the alpha in effect.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedFill {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub alpha: f64,
    pub color: Option<String>,
}

/// Surface that records every call instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far, in issue order.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Drain the recorded calls.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    /// Replay the recording and return each fill with the color and alpha active at that point.
    ///
    /// Alpha starts at `1.0` and the color is unset, matching a fresh canvas context.
    pub fn fills(&self) -> Vec<RecordedFill> {
        let mut alpha = 1.0;
        let mut color: Option<String> = None;
        let mut out = Vec::new();
        for op in &self.ops {
            match op {
                SurfaceOp::SetGlobalAlpha { alpha: a } => alpha = *a,
                SurfaceOp::SetFillColor { color: c } => color = Some(c.clone()),
                SurfaceOp::FillRect { x, y, w, h } => out.push(RecordedFill {
                    x: *x,
                    y: *y,
                    w: *w,
                    h: *h,
                    alpha,
                    color: color.clone(),
                }),
                SurfaceOp::SetSize { .. } | SurfaceOp::ClearRect { .. } => {}
            }
        }
        out
    }

    /// Replay the calls onto another surface.
    pub fn replay(&self, target: &mut dyn Surface) {
        for op in &self.ops {
            match op {
                SurfaceOp::SetSize { width, height } => target.set_size(*width, *height),
                SurfaceOp::ClearRect { x, y, w, h } => target.clear_rect(*x, *y, *w, *h),
                SurfaceOp::SetFillColor { color } => target.set_fill_color(color),
                SurfaceOp::SetGlobalAlpha { alpha } => target.set_global_alpha(*alpha),
                SurfaceOp::FillRect { x, y, w, h } => target.fill_rect(*x, *y, *w, *h),
            }
        }
    }
}

impl Surface for RecordingSurface {
    fn set_size(&mut self, width: f64, height: f64) {
        self.ops.push(SurfaceOp::SetSize { width, height });
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(SurfaceOp::ClearRect { x, y, w, h });
    }

    fn set_fill_color(&mut self, color: &str) {
        self.ops.push(SurfaceOp::SetFillColor {
            color: color.to_owned(),
        });
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ops.push(SurfaceOp::SetGlobalAlpha { alpha });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(SurfaceOp::FillRect { x, y, w, h });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
