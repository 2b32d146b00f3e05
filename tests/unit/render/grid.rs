use super::*;
use crate::render::surface::{RecordingSurface, SurfaceOp};

fn render(width: f64, height: f64, cell: f64, values: &[f64]) -> RecordingSurface {
    let mut s = RecordingSurface::new();
    render_grid(
        &mut s,
        &GridParams {
            geometry: Geometry::new(width, height, cell),
            base_color: "#00ff88",
            intensities: values,
        },
    );
    s
}

#[test]
fn plan_window_is_truncated_to_cell_count() {
    let plan = CellPlan::new(Geometry::new(16.0, 8.0, 8.0), &[1.0, 2.0, 99.0]);
    assert_eq!(plan.grid(), Grid { cols: 2, rows: 1 });
    assert_eq!(plan.consumed(), 2);
    assert_eq!(plan.max(), 2.0);
}

#[test]
fn plan_skips_zero_and_negative_cells() {
    let plan = CellPlan::new(Geometry::new(16.0, 16.0, 8.0), &[10.0, 5.0, 0.0, 2.0]);
    let cells: Vec<_> = plan.cells().collect();
    assert_eq!(cells.len(), 3);
    assert_eq!(cells[0].index, 0);
    assert_eq!(cells[0].alpha, 1.0);
    assert_eq!(cells[1].origin, Point::new(8.0, 0.0));
    assert_eq!(cells[1].alpha, 0.5);
    assert_eq!(cells[2].index, 3);
    assert_eq!(cells[2].origin, Point::new(8.0, 8.0));
    assert!((cells[2].alpha - 0.2).abs() < 1e-12);
}

#[test]
fn degenerate_geometry_only_collapses_surface() {
    for (w, h, c) in [(0.0, 16.0, 8.0), (16.0, 0.0, 8.0), (16.0, 16.0, 0.0), (-1.0, 4.0, 1.0)] {
        let s = render(w, h, c, &[1.0, 2.0]);
        assert_eq!(
            s.ops(),
            &[SurfaceOp::SetSize {
                width: 0.0,
                height: 0.0
            }]
        );
    }
}

#[test]
fn empty_grid_is_sized_and_cleared() {
    let s = render(7.0, 20.0, 8.0, &[5.0]);
    assert_eq!(
        s.ops(),
        &[
            SurfaceOp::SetSize {
                width: 7.0,
                height: 20.0
            },
            SurfaceOp::ClearRect {
                x: 0.0,
                y: 0.0,
                w: 7.0,
                h: 20.0
            },
        ]
    );
}

#[test]
fn all_zero_window_draws_nothing() {
    let s = render(16.0, 16.0, 8.0, &[0.0, -3.0, f64::NAN, 0.0]);
    assert_eq!(s.ops().len(), 2);
    assert!(s.fills().is_empty());

    let s = render(16.0, 16.0, 8.0, &[]);
    assert_eq!(s.ops().len(), 2);
}

#[test]
fn alpha_is_reset_after_draw_pass() {
    let s = render(8.0, 8.0, 8.0, &[3.0]);
    assert_eq!(
        s.ops().last(),
        Some(&SurfaceOp::SetGlobalAlpha { alpha: 1.0 })
    );
}

#[test]
fn fill_color_is_set_once() {
    let s = render(32.0, 32.0, 8.0, &[1.0; 16]);
    let colors = s
        .ops()
        .iter()
        .filter(|op| matches!(op, SurfaceOp::SetFillColor { .. }))
        .count();
    assert_eq!(colors, 1);
    assert_eq!(s.fills().len(), 16);
}
