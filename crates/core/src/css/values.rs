//! Value normalization: raw declaration strings into numbers, canonical hex
//! colors and translation offsets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Resolve a length-ish value to a number.
///
/// * `50%` → `reference * 0.5`, or `None` without a reference
/// * `12px` → `12`
/// * `320`, `-4.5` → the literal (HTML `width="320"` style)
///
/// Keywords such as `auto` and anything malformed yield `None`.
pub fn normalize_number(raw: &str, reference: Option<f64>) -> Option<f64> {
    let value = raw.trim();

    if let Some(percent) = value.strip_suffix('%') {
        let reference = reference?;
        let percent = percent.trim().parse::<f64>().ok()?;
        return finite(percent / 100.0 * reference);
    }

    if let Some(px) = value.strip_suffix("px") {
        return px.trim().parse::<f64>().ok().and_then(finite);
    }

    if is_numeric_literal(value) {
        return value.parse::<f64>().ok();
    }

    log::trace!("unresolvable number {:?}", raw);
    None
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// `-?\d+(\.\d+)?`
fn is_numeric_literal(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.map_or(true, all_digits)
}

/// Color normalizer bound to a named-color table.
#[derive(Debug, Clone)]
pub struct Normalizer {
    colors: BTreeMap<String, String>,
}

impl Normalizer {
    pub fn new(colors: BTreeMap<String, String>) -> Self {
        Self { colors }
    }

    /// Canonical `#rrggbb` (or `#rrggbbaa` for named transparency) form of
    /// `raw`, matched case- and whitespace-insensitively.
    ///
    /// Accepts table names, `rgb(…)`/`rgba(…)` (first three integers; alpha is
    /// ignored), `#rgb` and `#rrggbb`.
    pub fn normalize_color(&self, raw: &str) -> Option<String> {
        let v = raw.trim().to_ascii_lowercase();
        if v.is_empty() {
            return None;
        }

        if let Some(hex) = self.colors.get(&v) {
            return Some(hex.clone());
        }

        if v.starts_with("rgb") {
            return rgb_to_hex(&v);
        }

        if let Some(hex) = v.strip_prefix('#') {
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                log::trace!("malformed hex color {:?}", raw);
                return None;
            }
            match hex.len() {
                3 => {
                    let mut out = String::with_capacity(7);
                    out.push('#');
                    for c in hex.chars() {
                        out.push(c);
                        out.push(c);
                    }
                    return Some(out);
                }
                6 => return Some(v),
                _ => {}
            }
        }

        log::trace!("unresolvable color {:?}", raw);
        None
    }
}

/// Hex-encode the first three integer runs of an `rgb(…)` string.
fn rgb_to_hex(v: &str) -> Option<String> {
    let channels: Vec<u32> = v
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .take(3)
        .map(|run| run.parse::<u32>().unwrap_or(u32::MAX).min(255))
        .collect();

    if channels.len() < 3 {
        log::trace!("rgb color with fewer than three channels {:?}", v);
        return None;
    }

    Some(format!(
        "#{:02x}{:02x}{:02x}",
        channels[0], channels[1], channels[2]
    ))
}

/// A 2D translation, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Translate {
    pub x: f64,
    pub y: f64,
}

/// Pull `translateX(<n>px)` and `translateY(<n>px)` out of a transform
/// value. Each axis is found independently and defaults to 0.
pub fn extract_translate(transform: &str) -> Translate {
    Translate {
        x: find_translate(transform, "translateX(").unwrap_or(0.0),
        y: find_translate(transform, "translateY(").unwrap_or(0.0),
    }
}

/// First `<func><number>px)` occurrence, where number is `[-0-9.]+`.
fn find_translate(transform: &str, func: &str) -> Option<f64> {
    transform.match_indices(func).find_map(|(start, _)| {
        let rest = &transform[start + func.len()..];
        let len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '-' || c == '.'))
            .unwrap_or(rest.len());
        if len == 0 || !rest[len..].starts_with("px)") {
            return None;
        }
        rest[..len].parse::<f64>().ok()
    })
}
