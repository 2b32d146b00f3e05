use crate::foundation::core::Geometry;
use crate::render::grid::GridInput;
use serde_json::Value;
use std::collections::BTreeMap;

pub const ATTR_WIDTH: &str = "width";
pub const ATTR_HEIGHT: &str = "height";
pub const ATTR_PIXEL_SIZE: &str = "pixel-size";
pub const ATTR_BASE_COLOR: &str = "base-color";
pub const ATTR_PIXELS: &str = "pixels";

/// Cell size used when `pixel-size` is absent, unparseable or zero.
pub const DEFAULT_CELL_SIZE: f64 = 8.0;

/// Fill color used when `base-color` is absent.
pub const DEFAULT_BASE_COLOR: &str = "#00ff88";

/// Attributes whose changes trigger a re-render.
pub const OBSERVED_ATTRIBUTES: [&str; 5] = [
    ATTR_WIDTH,
    ATTR_HEIGHT,
    ATTR_PIXEL_SIZE,
    ATTR_BASE_COLOR,
    ATTR_PIXELS,
];

pub fn is_observed(name: &str) -> bool {
    OBSERVED_ATTRIBUTES.contains(&name)
}

/// Raw string attributes, normalized into renderer input on demand.
///
/// Parsing never fails: every malformed value falls back to a default.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ScanAttributes {
    values: BTreeMap<String, String>,
}

impl ScanAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay `other` on top of `self`; `other` wins on conflicts.
    pub fn merge(&mut self, other: &ScanAttributes) {
        for (k, v) in other.iter() {
            self.set(k, v);
        }
    }

    pub fn width_px(&self) -> f64 {
        num_attr(self.get(ATTR_WIDTH), 0.0)
    }

    pub fn height_px(&self) -> f64 {
        num_attr(self.get(ATTR_HEIGHT), 0.0)
    }

    /// Parsed `pixel-size`. May be zero or negative; see [`Self::to_grid_input`].
    pub fn pixel_size(&self) -> f64 {
        num_attr(self.get(ATTR_PIXEL_SIZE), DEFAULT_CELL_SIZE)
    }

    pub fn base_color(&self) -> &str {
        self.get(ATTR_BASE_COLOR).unwrap_or(DEFAULT_BASE_COLOR)
    }

    pub fn pixels(&self) -> Vec<f64> {
        parse_pixels(self.get(ATTR_PIXELS))
    }

    /// Renderer input for the current attributes.
    ///
    /// A zero cell size falls back to the default; negative sizes are passed through and
    /// collapse the surface at render time.
    pub fn to_grid_input(&self) -> GridInput {
        let pixel_size = self.pixel_size();
        let cell_size = if pixel_size == 0.0 {
            DEFAULT_CELL_SIZE
        } else {
            pixel_size
        };
        GridInput {
            geometry: Geometry::new(self.width_px(), self.height_px(), cell_size),
            base_color: self.base_color().to_owned(),
            intensities: self.pixels(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ScanAttributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attrs = Self::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

/// Numeric attribute: absent or non-finite values yield `fallback`.
pub fn num_attr(raw: Option<&str>, fallback: f64) -> f64 {
    let n = raw.map_or(f64::NAN, js_number);
    if n.is_finite() { n } else { fallback }
}

/// Number coercion for strings, following ECMAScript `Number(string)`.
///
/// Surrounding whitespace (including U+FEFF) is ignored, the empty string is `0`, `0x`/`0o`/`0b` prefixes select a
/// radix, `Infinity` is accepted with an optional sign. Anything else that is not a decimal
/// literal is NaN.
pub fn js_number(raw: &str) -> f64 {
    let s = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    if s.is_empty() {
        return 0.0;
    }

    let (sign, unsigned) = match s.as_bytes()[0] {
        b'-' => (-1.0, &s[1..]),
        b'+' => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }

    if unsigned.len() == s.len()
        && let Some(radix) = radix_prefix(s)
    {
        return parse_radix(&s[2..], radix);
    }

    let is_decimal_literal = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !is_decimal_literal || !unsigned.bytes().any(|b| b.is_ascii_digit()) {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_prefix(s: &str) -> Option<u32> {
    let prefix = s.get(..2)?;
    match prefix {
        "0x" | "0X" => Some(16),
        "0o" | "0O" => Some(8),
        "0b" | "0B" => Some(2),
        _ => None,
    }
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

/// Parse the `pixels` attribute.
///
/// Valid JSON must be an array (anything else yields an empty list) whose elements are coerced
/// to numbers. Numbers beyond the `f64` range read as infinities. Invalid JSON is read as a
/// comma/whitespace separated list. Unparseable entries become NaN and are treated as zero by
/// the renderer.
pub fn parse_pixels(raw: Option<&str>) -> Vec<f64> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Vec::new();
    };
    match parse_json_lenient(raw) {
        Ok(Value::Array(items)) => items.iter().map(json_number).collect(),
        Ok(other) => {
            tracing::debug!(kind = json_kind(&other), "pixels JSON is not an array");
            Vec::new()
        }
        Err(_) => raw
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(js_number)
            .collect(),
    }
}

/// Parse JSON, retrying once with out-of-range number literals rewritten to `"Infinity"` /
/// `"-Infinity"` strings, which [`json_number`] coerces back to infinities.
fn parse_json_lenient(raw: &str) -> serde_json::Result<Value> {
    let err = match serde_json::from_str::<Value>(raw) {
        Ok(v) => return Ok(v),
        Err(e) => e,
    };
    match saturate_overflowing_numbers(raw) {
        Some(patched) => {
            tracing::debug!(error = %err, "pixels JSON has out-of-range numbers");
            serde_json::from_str(&patched)
        }
        None => Err(err),
    }
}

/// Rewrite number tokens outside of string literals that overflow `f64`.
///
/// Returns `None` when nothing needed rewriting.
fn saturate_overflowing_numbers(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut changed = false;
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = raw.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        if c == '"' {
            in_string = true;
            out.push(c);
            continue;
        }
        if !(c == '-' || c.is_ascii_digit()) {
            out.push(c);
            continue;
        }

        let mut end = start + c.len_utf8();
        while let Some(&(i, n)) = chars.peek() {
            if !(n.is_ascii_digit() || matches!(n, '.' | 'e' | 'E' | '+' | '-')) {
                break;
            }
            end = i + n.len_utf8();
            chars.next();
        }
        let token = &raw[start..end];
        match token.parse::<f64>() {
            Ok(v) if v.is_infinite() => {
                changed = true;
                out.push_str(if v > 0.0 { "\"Infinity\"" } else { "\"-Infinity\"" });
            }
            _ => out.push_str(token),
        }
    }

    changed.then_some(out)
}

/// ECMAScript `Number(value)` for JSON values.
fn json_number(v: &Value) -> f64 {
    match v {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => js_number(s),
        // Arrays stringify first: `[]` is "", `[x]` is String(x), longer arrays contain commas.
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [single] => match single {
                Value::Null => 0.0,
                Value::Bool(_) | Value::Object(_) => f64::NAN,
                other => json_number(other),
            },
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/attrs.rs"]
mod tests;
