use super::*;

#[test]
fn over_opaque_src_replaces_dst() {
    assert_eq!(over([10, 20, 30, 255], [0, 255, 136, 255], 1.0), [0, 255, 136, 255]);
}

#[test]
fn over_transparent_src_is_identity() {
    let dst = [1, 2, 3, 4];
    assert_eq!(over(dst, [200, 200, 200, 0], 1.0), dst);
    assert_eq!(over(dst, [200, 200, 200, 255], 0.0), dst);
}

#[test]
fn over_half_alpha_on_transparent() {
    assert_eq!(over([0, 0, 0, 0], [128, 0, 0, 128], 1.0), [128, 0, 0, 128]);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
    assert!(over_in_place(&mut dst, &[255u8; 8], 1.0).is_ok());
    assert_eq!(dst, vec![255u8; 8]);
}

#[test]
fn clear_rect_zeroes_only_covered_pixels() {
    let (w, h) = (4u32, 3u32);
    let mut buf = vec![9u8; (w * h * 4) as usize];
    clear_rect_in_place(&mut buf, w, h, 1.0, 1.0, 2.0, 5.0).unwrap();

    for y in 0..h {
        for x in 0..w {
            let i = ((y * w + x) * 4) as usize;
            let cleared = (1..3).contains(&x) && y >= 1;
            assert_eq!(buf[i + 3] == 0, cleared, "pixel ({x},{y})");
        }
    }
}

#[test]
fn clear_rect_outside_buffer_is_noop() {
    let mut buf = vec![7u8; 16];
    clear_rect_in_place(&mut buf, 2, 2, 5.0, 5.0, 3.0, 3.0).unwrap();
    clear_rect_in_place(&mut buf, 2, 2, f64::NAN, 0.0, 3.0, 3.0).unwrap();
    assert!(buf.iter().all(|&b| b == 7));
    assert!(clear_rect_in_place(&mut buf, 3, 3, 0.0, 0.0, 1.0, 1.0).is_err());
}
