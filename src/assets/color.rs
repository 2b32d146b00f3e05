use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{ScanError, ScanResult};
use std::str::FromStr;

/// Straight-alpha color with channels normalized to `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ColorDef {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl ColorDef {
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Canvas default fill style.
    pub fn black() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 1.0)
    }

    /// Parse a CSS color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()`,
    /// `hsl()`/`hsla()` or a named color.
    pub fn parse(s: &str) -> ScanResult<Self> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();

        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(body) = functional_body(&lower, &["rgba", "rgb"]) {
            return parse_rgb_fn(body);
        }
        if let Some(body) = functional_body(&lower, &["hsla", "hsl"]) {
            return parse_hsl_fn(body);
        }
        named(&lower).ok_or_else(|| ScanError::parse(format!("unrecognized color \"{s}\"")))
    }

    pub fn to_rgba8_straight(self) -> [u8; 4] {
        [
            to_u8(self.r),
            to_u8(self.g),
            to_u8(self.b),
            to_u8(self.a),
        ]
    }

    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        let a = self.a.clamp(0.0, 1.0);
        let r = (self.r.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);
        let g = (self.g.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);
        let b = (self.b.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);

        Rgba8Premul {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
            a: to_u8(a),
        }
    }
}

impl FromStr for ColorDef {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn functional_body<'a>(s: &'a str, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| {
        s.strip_prefix(*name)?
            .trim_start()
            .strip_prefix('(')?
            .strip_suffix(')')
    })
}

fn parse_hex(s: &str) -> ScanResult<ColorDef> {
    fn nibble(c: u8) -> ScanResult<u8> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| ScanError::parse(format!("invalid hex digit '{}'", c as char)))
    }

    let bytes = s.as_bytes();
    let digits = bytes
        .iter()
        .map(|&c| nibble(c))
        .collect::<ScanResult<Vec<u8>>>()?;

    let (r, g, b, a) = match digits.len() {
        3 | 4 => {
            let expand = |d: u8| d * 17;
            let a = digits.get(3).copied().map(expand).unwrap_or(255);
            (expand(digits[0]), expand(digits[1]), expand(digits[2]), a)
        }
        6 | 8 => {
            let byte = |i: usize| digits[i] * 16 + digits[i + 1];
            let a = if digits.len() == 8 { byte(6) } else { 255 };
            (byte(0), byte(2), byte(4), a)
        }
        _ => {
            return Err(ScanError::parse(
                "hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA",
            ));
        }
    };

    Ok(ColorDef::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

/// Split `a, b, c / d` or `a b c / d` style argument lists.
fn fn_args(body: &str) -> Vec<&str> {
    body.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect()
}

fn parse_number(tok: &str) -> ScanResult<f64> {
    tok.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScanError::parse(format!("invalid color component \"{tok}\"")))
}

/// Channel in `0..=255` or a percentage, normalized to `0..=1`.
fn parse_channel(tok: &str) -> ScanResult<f64> {
    match tok.strip_suffix('%') {
        Some(p) => Ok((parse_number(p)? / 100.0).clamp(0.0, 1.0)),
        None => Ok((parse_number(tok)? / 255.0).clamp(0.0, 1.0)),
    }
}

/// Alpha in `0..=1` or a percentage.
fn parse_alpha(tok: Option<&&str>) -> ScanResult<f64> {
    let Some(tok) = tok else {
        return Ok(1.0);
    };
    match tok.strip_suffix('%') {
        Some(p) => Ok((parse_number(p)? / 100.0).clamp(0.0, 1.0)),
        None => Ok(parse_number(tok)?.clamp(0.0, 1.0)),
    }
}

fn parse_rgb_fn(body: &str) -> ScanResult<ColorDef> {
    let args = fn_args(body);
    if !(3..=4).contains(&args.len()) {
        return Err(ScanError::parse("rgb() expects 3 or 4 components"));
    }
    Ok(ColorDef::rgba(
        parse_channel(args[0])?,
        parse_channel(args[1])?,
        parse_channel(args[2])?,
        parse_alpha(args.get(3))?,
    ))
}

fn parse_hsl_fn(body: &str) -> ScanResult<ColorDef> {
    let args = fn_args(body);
    if !(3..=4).contains(&args.len()) {
        return Err(ScanError::parse("hsl() expects 3 or 4 components"));
    }
    let h = parse_number(args[0].trim_end_matches("deg"))?;
    let pct = |tok: &str| -> ScanResult<f64> {
        let v = parse_number(tok.trim_end_matches('%'))?;
        Ok((v / 100.0).clamp(0.0, 1.0))
    };
    let (s, l) = (pct(args[1])?, pct(args[2])?);
    Ok(hsla_to_rgba(h, s, l, parse_alpha(args.get(3))?))
}

fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> ColorDef {
    // Standard HSL -> RGB conversion (sRGB space, normalized 0..1 inputs).
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;

    if s == 0.0 {
        return ColorDef::rgba(l, l, l, a);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);
    ColorDef::rgba(r, g, b, a)
}

fn named(name: &str) -> Option<ColorDef> {
    let rgb = match name {
        "transparent" => return Some(ColorDef::rgba(0.0, 0.0, 0.0, 0.0)),
        "black" => [0, 0, 0],
        "white" => [255, 255, 255],
        "red" => [255, 0, 0],
        "lime" => [0, 255, 0],
        "green" => [0, 128, 0],
        "blue" => [0, 0, 255],
        "yellow" => [255, 255, 0],
        "cyan" | "aqua" => [0, 255, 255],
        "magenta" | "fuchsia" => [255, 0, 255],
        "orange" => [255, 165, 0],
        "purple" => [128, 0, 128],
        "gray" | "grey" => [128, 128, 128],
        "silver" => [192, 192, 192],
        "maroon" => [128, 0, 0],
        "navy" => [0, 0, 128],
        "teal" => [0, 128, 128],
        "olive" => [128, 128, 0],
        _ => return None,
    };
    Some(ColorDef::rgba(
        f64::from(rgb[0]) / 255.0,
        f64::from(rgb[1]) / 255.0,
        f64::from(rgb[2]) / 255.0,
        1.0,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
