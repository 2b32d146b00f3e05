/// Coerce a raw intensity into a drawable magnitude.
///
/// NaN, infinities and non-positive values all collapse to `0.0`.
pub fn coerce_intensity(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// Largest coerced intensity in `values`, or `0.0` for an empty or all-zero window.
pub fn max_intensity(values: &[f64]) -> f64 {
    values
        .iter()
        .map(|&v| coerce_intensity(v))
        .fold(0.0, f64::max)
}

/// Linear opacity of `v` relative to `max`, clamped into `[0, 1]`.
pub fn normalized_alpha(v: f64, max: f64) -> f64 {
    if !(max.is_finite() && max > 0.0) {
        return 0.0;
    }
    (coerce_intensity(v) / max).clamp(0.0, 1.0)
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
