use super::*;

#[test]
fn records_calls_in_order() {
    let mut s = RecordingSurface::new();
    s.set_size(4.0, 4.0);
    s.clear_rect(0.0, 0.0, 4.0, 4.0);
    s.set_fill_color("red");
    s.fill_rect(0.0, 0.0, 2.0, 2.0);

    assert_eq!(
        s.ops(),
        &[
            SurfaceOp::SetSize {
                width: 4.0,
                height: 4.0
            },
            SurfaceOp::ClearRect {
                x: 0.0,
                y: 0.0,
                w: 4.0,
                h: 4.0
            },
            SurfaceOp::SetFillColor {
                color: "red".to_owned()
            },
            SurfaceOp::FillRect {
                x: 0.0,
                y: 0.0,
                w: 2.0,
                h: 2.0
            },
        ]
    );
}

#[test]
fn fills_track_alpha_and_color() {
    let mut s = RecordingSurface::new();
    s.fill_rect(0.0, 0.0, 1.0, 1.0);
    s.set_fill_color("blue");
    s.set_global_alpha(0.25);
    s.fill_rect(1.0, 0.0, 1.0, 1.0);

    let fills = s.fills();
    assert_eq!(fills.len(), 2);
    assert_eq!(fills[0].alpha, 1.0);
    assert_eq!(fills[0].color, None);
    assert_eq!(fills[1].alpha, 0.25);
    assert_eq!(fills[1].color.as_deref(), Some("blue"));
}

#[test]
fn replay_reproduces_recording() {
    let mut a = RecordingSurface::new();
    a.set_size(8.0, 8.0);
    a.set_global_alpha(0.5);
    a.fill_rect(0.0, 0.0, 8.0, 8.0);

    let mut b = RecordingSurface::new();
    a.replay(&mut b);
    assert_eq!(a.ops(), b.ops());

    let taken = b.take_ops();
    assert_eq!(taken.len(), 3);
    assert!(b.ops().is_empty());
}

#[test]
fn ops_serialize_with_tag() {
    let op = SurfaceOp::SetGlobalAlpha { alpha: 0.5 };
    let v = serde_json::to_value(&op).unwrap();
    assert_eq!(v, serde_json::json!({"op": "set_global_alpha", "alpha": 0.5}));
}
