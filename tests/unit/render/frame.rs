use super::*;

fn frame_2x1() -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![0, 128, 68, 128, 0, 0, 0, 0],
        premultiplied: true,
    }
}

#[test]
fn pixel_lookup_is_bounds_checked() {
    let f = frame_2x1();
    assert_eq!(f.pixel(0, 0), Some([0, 128, 68, 128]));
    assert_eq!(f.pixel(1, 0), Some([0, 0, 0, 0]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn straight_conversion_unpremultiplies() {
    let out = frame_2x1().to_straight_rgba8();
    assert_eq!(&out[4..], &[0, 0, 0, 0]);
    assert_eq!(out[1], 255);
    assert_eq!(out[3], 128);
}

#[test]
fn empty_frame_refuses_png() {
    let f = FrameRGBA {
        width: 0,
        height: 0,
        data: Vec::new(),
        premultiplied: true,
    };
    assert!(f.is_empty());
    let err = f.save_png(Path::new("target/never.png")).unwrap_err();
    assert!(err.to_string().contains("render error:"));
}
