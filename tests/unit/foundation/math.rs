use super::*;

#[test]
fn coerce_drops_invalid_values() {
    assert_eq!(coerce_intensity(3.5), 3.5);
    assert_eq!(coerce_intensity(0.0), 0.0);
    assert_eq!(coerce_intensity(-4.0), 0.0);
    assert_eq!(coerce_intensity(f64::NAN), 0.0);
    assert_eq!(coerce_intensity(f64::INFINITY), 0.0);
    assert_eq!(coerce_intensity(f64::NEG_INFINITY), 0.0);
}

#[test]
fn max_ignores_negatives_and_nan() {
    assert_eq!(max_intensity(&[]), 0.0);
    assert_eq!(max_intensity(&[-3.0, f64::NAN, 0.0]), 0.0);
    assert_eq!(max_intensity(&[1.0, f64::INFINITY, 7.0, -9.0]), 7.0);
}

#[test]
fn alpha_is_linear_and_bounded() {
    assert_eq!(normalized_alpha(5.0, 10.0), 0.5);
    assert_eq!(normalized_alpha(10.0, 10.0), 1.0);
    assert_eq!(normalized_alpha(20.0, 10.0), 1.0);
    assert_eq!(normalized_alpha(-1.0, 10.0), 0.0);
    assert_eq!(normalized_alpha(1.0, 0.0), 0.0);
    assert_eq!(normalized_alpha(1.0, f64::NAN), 0.0);
}

#[test]
fn alpha_is_strictly_monotonic_below_max() {
    let max = 17.0;
    let mut prev = 0.0;
    for i in 1..=17 {
        let a = normalized_alpha(f64::from(i), max);
        assert!(a > prev);
        assert!((0.0..=1.0).contains(&a));
        prev = a;
    }
}

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u16(100, 128), 50);
}
