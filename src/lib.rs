//! scan-canvas renders a flat sequence of intensities as a grid of alpha-scaled cells.
//!
//! - Describe the grid with [`GridParams`] (or build it from raw attributes with
//!   [`ScanAttributes`])
//! - Call [`render_grid`] against any [`Surface`]
//! - Use [`CpuSurface`] to rasterize, or [`RecordingSurface`] to inspect the issued calls
#![forbid(unsafe_code)]

mod assets;
mod foundation;

/// JSON scan documents.
pub mod document;
/// Element-style attribute adapter and facade.
pub mod element;
/// Surfaces and the grid renderer.
pub mod render;

pub use crate::assets::color::ColorDef;
pub use crate::foundation::core::{CellPos, Geometry, Grid, Point, Rgba8Premul};
pub use crate::foundation::error::{ScanError, ScanResult};
pub use crate::foundation::math::{coerce_intensity, max_intensity, normalized_alpha};

pub use crate::document::ScanDocument;
pub use crate::element::attrs::{
    DEFAULT_BASE_COLOR, DEFAULT_CELL_SIZE, OBSERVED_ATTRIBUTES, ScanAttributes, js_number,
    parse_pixels,
};
pub use crate::element::canvas::ScanCanvas;
pub use crate::render::cpu::{CpuSurface, CpuSurfaceOpts};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::grid::{CellDraw, CellPlan, GridInput, GridParams, render_grid};
pub use crate::render::surface::{RecordedFill, RecordingSurface, Surface, SurfaceOp};
