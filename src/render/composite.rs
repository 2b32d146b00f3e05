use crate::foundation::error::{ScanError, ScanResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over with an extra opacity multiplier on `src`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> ScanResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ScanError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Zero the pixels of a `width x height` buffer covered by `(x, y, w, h)`.
///
/// Edges snap to the nearest pixel boundary; the rect is clipped to the buffer.
pub fn clear_rect_in_place(
    buf: &mut [u8],
    width: u32,
    height: u32,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
) -> ScanResult<()> {
    let expected = (width as usize) * (height as usize) * 4;
    if buf.len() != expected {
        return Err(ScanError::render("clear_rect buffer size mismatch"));
    }
    let Some((x0, x1)) = snap_span(x, w, width) else {
        return Ok(());
    };
    let Some((y0, y1)) = snap_span(y, h, height) else {
        return Ok(());
    };
    let stride = (width as usize) * 4;
    for row in y0..y1 {
        let start = row * stride + x0 * 4;
        let end = row * stride + x1 * 4;
        buf[start..end].fill(0);
    }
    Ok(())
}

fn snap_span(origin: f64, extent: f64, limit: u32) -> Option<(usize, usize)> {
    if !(origin.is_finite() && extent.is_finite()) {
        return None;
    }
    // Negative extents describe the same span mirrored around `origin`.
    let (lo, hi) = if extent < 0.0 {
        (origin + extent, origin)
    } else {
        (origin, origin + extent)
    };
    let lo = lo.round().clamp(0.0, f64::from(limit)) as usize;
    let hi = hi.round().clamp(0.0, f64::from(limit)) as usize;
    (lo < hi).then_some((lo, hi))
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
