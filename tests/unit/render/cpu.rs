use super::*;

fn near(a: u8, b: u8, tol: u8) -> bool {
    a.abs_diff(b) <= tol
}

#[test]
fn set_size_allocates_transparent_buffer() {
    let mut s = CpuSurface::default();
    s.set_size(10.7, 4.0);
    let f = s.to_frame().unwrap();
    assert_eq!((f.width, f.height), (10, 4));
    assert_eq!(f.data.len(), 10 * 4 * 4);
    assert!(f.data.iter().all(|&b| b == 0));
    assert!(f.premultiplied);
}

#[test]
fn degenerate_size_collapses_to_empty() {
    let mut s = CpuSurface::default();
    s.set_size(f64::NAN, -3.0);
    s.fill_rect(0.0, 0.0, 4.0, 4.0);
    let f = s.to_frame().unwrap();
    assert!(f.is_empty());
    assert!(f.data.is_empty());
}

#[test]
fn opaque_fill_covers_pixel_aligned_rect() {
    let mut s = CpuSurface::default();
    s.set_size(8.0, 8.0);
    s.set_fill_color("#00ff88");
    s.fill_rect(4.0, 0.0, 4.0, 4.0);
    let f = s.to_frame().unwrap();

    assert_eq!(f.pixel(5, 1), Some([0, 255, 136, 255]));
    assert_eq!(f.pixel(1, 1), Some([0, 0, 0, 0]));
    assert_eq!(f.pixel(5, 5), Some([0, 0, 0, 0]));
}

#[test]
fn global_alpha_scales_coverage() {
    let mut s = CpuSurface::default();
    s.set_size(4.0, 4.0);
    s.set_fill_color("white");
    s.set_global_alpha(0.5);
    s.fill_rect(0.0, 0.0, 4.0, 4.0);
    let px = s.to_frame().unwrap().pixel(2, 2).unwrap();
    assert!(near(px[3], 128, 2), "alpha {}", px[3]);
    assert!(near(px[0], 128, 2));
}

#[test]
fn invalid_inputs_keep_previous_state() {
    let mut s = CpuSurface::default();
    s.set_size(2.0, 2.0);
    s.set_fill_color("not a color");
    s.set_global_alpha(3.0);
    s.set_global_alpha(f64::NAN);
    s.fill_rect(0.0, 0.0, 2.0, 2.0);
    // Canvas defaults: black at full opacity.
    assert_eq!(s.to_frame().unwrap().pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn zero_alpha_fill_is_skipped() {
    let mut s = CpuSurface::default();
    s.set_size(2.0, 2.0);
    s.set_fill_color("red");
    s.set_global_alpha(0.0);
    s.fill_rect(0.0, 0.0, 2.0, 2.0);
    assert!(s.to_frame().unwrap().data.iter().all(|&b| b == 0));
}

#[test]
fn clear_rect_erases_batched_fills() {
    let mut s = CpuSurface::default();
    s.set_size(4.0, 4.0);
    s.set_fill_color("red");
    s.fill_rect(0.0, 0.0, 4.0, 4.0);
    s.clear_rect(0.0, 0.0, 2.0, 4.0);
    s.fill_rect(0.0, 0.0, 1.0, 1.0);
    let f = s.to_frame().unwrap();

    assert_eq!(f.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(1, 2), Some([0, 0, 0, 0]));
    assert_eq!(f.pixel(3, 3), Some([255, 0, 0, 255]));
}

#[test]
fn resize_resets_pixels_and_state() {
    let mut s = CpuSurface::default();
    s.set_size(2.0, 2.0);
    s.set_fill_color("red");
    s.set_global_alpha(0.5);
    s.fill_rect(0.0, 0.0, 2.0, 2.0);
    s.set_size(2.0, 2.0);
    s.fill_rect(0.0, 0.0, 1.0, 1.0);
    let f = s.to_frame().unwrap();
    assert_eq!(f.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(f.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn background_is_composited_under_content() {
    let opts = CpuSurfaceOpts::default().with_background(Some([0, 0, 255, 255]));
    let mut s = CpuSurface::new(opts);
    s.set_size(2.0, 1.0);
    s.set_fill_color("#ff0000");
    s.fill_rect(0.0, 0.0, 1.0, 1.0);
    let f = s.to_frame().unwrap();
    assert_eq!(f.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(1, 0), Some([0, 0, 255, 255]));
}

#[test]
fn oversized_area_collapses_to_empty() {
    let mut s = CpuSurface::default();
    s.set_size(100_000.0, 100_000.0);
    assert_eq!((s.width(), s.height()), (0, 0));
    s.set_fill_color("red");
    s.fill_rect(0.0, 0.0, 8.0, 8.0);
    assert!(s.to_frame().unwrap().is_empty());

    s.set_size(20_000.0, 2.0);
    assert_eq!((s.width(), s.height()), (20_000, 2));
}
