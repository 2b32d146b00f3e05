pub use kurbo::Point;

/// Drawing-surface extents plus the side length of one square cell, in surface units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Geometry {
    /// Surface width.
    pub width: f64,
    /// Surface height.
    pub height: f64,
    /// Side length of a cell.
    pub cell_size: f64,
}

impl Geometry {
    /// Build a geometry without validation; degenerate values are handled at render time.
    pub fn new(width: f64, height: f64, cell_size: f64) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Return `true` when nothing can be drawn and the surface collapses to 0x0.
    ///
    /// Any non-positive or non-finite extent or cell size is degenerate.
    pub fn is_degenerate(self) -> bool {
        !is_positive(self.width) || !is_positive(self.height) || !is_positive(self.cell_size)
    }

    /// Derive the cell grid that fits inside the surface.
    pub fn grid(self) -> Grid {
        Grid::from_geometry(self)
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Whole cells along each axis. Partial cells at the right/bottom edges are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Grid {
    /// Number of columns.
    pub cols: usize,
    /// Number of rows.
    pub rows: usize,
}

impl Grid {
    /// `cols = floor(width / cell_size)`, `rows = floor(height / cell_size)`.
    ///
    /// Degenerate geometry yields the empty grid.
    pub fn from_geometry(g: Geometry) -> Self {
        if g.is_degenerate() {
            return Self::default();
        }
        // `as` saturates for out-of-range floats.
        Self {
            cols: (g.width / g.cell_size).floor() as usize,
            rows: (g.height / g.cell_size).floor() as usize,
        }
    }

    /// Total number of addressable cells.
    pub fn cell_count(self) -> usize {
        self.cols.saturating_mul(self.rows)
    }

    /// Return `true` when the grid has no cells.
    pub fn is_empty(self) -> bool {
        self.cell_count() == 0
    }

    /// Map a row-major index to its cell, or `None` when it falls outside the grid.
    pub fn cell_pos(self, index: usize) -> Option<CellPos> {
        if index >= self.cell_count() {
            return None;
        }
        Some(CellPos {
            col: index % self.cols,
            row: index / self.cols,
        })
    }
}

/// Column/row address of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CellPos {
    /// 0-based column.
    pub col: usize,
    /// 0-based row.
    pub row: usize,
}

impl CellPos {
    /// Top-left corner of the cell in surface units.
    pub fn origin(self, cell_size: f64) -> Point {
        Point::new(self.col as f64 * cell_size, self.row as f64 * cell_size)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Undo premultiplication. Fully transparent pixels map to transparent black.
    pub fn to_straight_rgba(self) -> [u8; 4] {
        if self.a == 0 {
            return [0, 0, 0, 0];
        }
        let a = u16::from(self.a);
        let unpremul = |c: u8| -> u8 { ((u16::from(c) * 255 + a / 2) / a).min(255) as u8 };
        [unpremul(self.r), unpremul(self.g), unpremul(self.b), self.a]
    }

    /// Byte order used by frame buffers.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
