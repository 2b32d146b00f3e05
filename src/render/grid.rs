use crate::foundation::core::{Geometry, Grid, Point};
use crate::foundation::math::{coerce_intensity, max_intensity, normalized_alpha};
use crate::render::surface::Surface;

/// Borrowed inputs for one render call.
#[derive(Clone, Copy, Debug)]
pub struct GridParams<'a> {
    pub geometry: Geometry,
    /// Passed verbatim to [`Surface::set_fill_color`].
    pub base_color: &'a str,
    /// Row-major intensities. Entries past the grid's cell count are ignored.
    pub intensities: &'a [f64],
}

/// Owned counterpart of [`GridParams`], produced by the attribute adapter.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GridInput {
    pub geometry: Geometry,
    pub base_color: String,
    pub intensities: Vec<f64>,
}

impl GridInput {
    pub fn as_params(&self) -> GridParams<'_> {
        GridParams {
            geometry: self.geometry,
            base_color: &self.base_color,
            intensities: &self.intensities,
        }
    }
}

/// One cell that will be painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellDraw {
    /// Row-major index into the intensity sequence.
    pub index: usize,
    /// Top-left corner in surface units.
    pub origin: Point,
    /// Opacity in `(0, 1]`.
    pub alpha: f64,
}

/// Normalized view of the intensity window that fits the grid.
#[derive(Clone, Copy, Debug)]
pub struct CellPlan<'a> {
    grid: Grid,
    cell_size: f64,
    window: &'a [f64],
    max: f64,
}

impl<'a> CellPlan<'a> {
    /// Only the first `min(len, cell_count)` intensities are consumed, and the maximum is taken
    /// over that window alone.
    pub fn new(geometry: Geometry, intensities: &'a [f64]) -> Self {
        let grid = geometry.grid();
        let len = intensities.len().min(grid.cell_count());
        let window = &intensities[..len];
        Self {
            grid,
            cell_size: geometry.cell_size,
            window,
            max: max_intensity(window),
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Maximum coerced intensity of the consumed window.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Number of consumed intensity entries.
    pub fn consumed(&self) -> usize {
        self.window.len()
    }

    /// Cells with a strictly positive opacity, in index order.
    pub fn cells(&self) -> impl Iterator<Item = CellDraw> + '_ {
        self.window.iter().enumerate().filter_map(|(index, &raw)| {
            let v = coerce_intensity(raw);
            if v <= 0.0 {
                return None;
            }
            let alpha = normalized_alpha(v, self.max);
            if alpha <= 0.0 {
                return None;
            }
            let pos = self.grid.cell_pos(index)?;
            Some(CellDraw {
                index,
                origin: pos.origin(self.cell_size),
                alpha,
            })
        })
    }
}

/// Draw `params` onto `surface` as a grid of alpha-scaled cells.
///
/// Never fails. Degenerate geometry collapses the surface to 0x0 and returns without clearing;
/// an empty grid or an all-zero window leaves the surface sized and cleared.
#[tracing::instrument(
    level = "debug",
    skip(surface, params),
    fields(
        width = params.geometry.width,
        height = params.geometry.height,
        cell_size = params.geometry.cell_size,
        values = params.intensities.len(),
    )
)]
pub fn render_grid<S: Surface + ?Sized>(surface: &mut S, params: &GridParams<'_>) {
    let geometry = params.geometry;
    if geometry.is_degenerate() {
        tracing::debug!("degenerate geometry, collapsing surface");
        surface.set_size(0.0, 0.0);
        return;
    }

    surface.set_size(geometry.width, geometry.height);

    let plan = CellPlan::new(geometry, params.intensities);
    let grid = plan.grid();
    surface.clear_rect(0.0, 0.0, geometry.width, geometry.height);

    if grid.is_empty() {
        tracing::debug!(cols = grid.cols, rows = grid.rows, "grid has no cells");
        return;
    }
    if plan.max() <= 0.0 {
        tracing::debug!(consumed = plan.consumed(), "no positive intensities");
        return;
    }

    surface.set_fill_color(params.base_color);

    let mut drawn = 0usize;
    for cell in plan.cells() {
        surface.set_global_alpha(cell.alpha);
        surface.fill_rect(
            cell.origin.x,
            cell.origin.y,
            geometry.cell_size,
            geometry.cell_size,
        );
        drawn += 1;
    }
    surface.set_global_alpha(1.0);

    tracing::debug!(
        cols = grid.cols,
        rows = grid.rows,
        max = plan.max(),
        drawn,
        "grid rendered"
    );
}

#[cfg(test)]
#[path = "../../tests/unit/render/grid.rs"]
mod tests;
