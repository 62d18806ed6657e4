//! Hex color parsing and the shimmer jitter pass.
//!
//! Shimmer emulates kiln-fired tile variation: each eligible shape's fill
//! color is nudged in brightness and (half as strongly) in saturation before
//! being converted back to hex.

use crate::rng::Rng;

/// A color in hue/saturation/brightness space, all components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    pub h: f64,
    pub s: f64,
    pub b: f64,
}

/// Parse a `#rrggbb` string into its channels.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let rest = hex.strip_prefix('#')?;
    if rest.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&rest[0..2], 16).ok()?;
    let g = u8::from_str_radix(&rest[2..4], 16).ok()?;
    let b = u8::from_str_radix(&rest[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Format channels as a lowercase `#rrggbb` string.
pub fn to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Convert a hex color to HSB. Returns `None` for malformed input.
pub fn hex_to_hsb(hex: &str) -> Option<Hsb> {
    let (r, g, b) = parse_hex(hex)?;
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;

    let s = if max == 0.0 { 0.0 } else { d / max };
    let mut h = 0.0;
    if d != 0.0 {
        if max == r {
            h = ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0;
        } else if max == g {
            h = ((b - r) / d + 2.0) / 6.0;
        } else {
            h = ((r - g) / d + 4.0) / 6.0;
        }
    }

    Some(Hsb { h, s, b: max })
}

/// Convert HSB back to a hex string.
pub fn hsb_to_hex(hsb: Hsb) -> String {
    let h = hsb.h.rem_euclid(1.0);
    let s = hsb.s.clamp(0.0, 1.0);
    let b = hsb.b.clamp(0.0, 1.0);

    if s == 0.0 {
        let v = (b * 255.0).round() as u8;
        return to_hex(v, v, v);
    }

    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = b * (1.0 - s);
    let q = b * (1.0 - f * s);
    let t = b * (1.0 - (1.0 - f) * s);

    let (r, g, bb) = match (i as i64) % 6 {
        0 => (b, t, p),
        1 => (q, b, p),
        2 => (p, b, t),
        3 => (p, q, b),
        4 => (t, p, b),
        _ => (b, p, q),
    };

    to_hex(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (bb * 255.0).round() as u8,
    )
}

/// Apply shimmer jitter to a hex color.
///
/// Draws two values from the stream: a brightness delta in
/// `±(level * 0.15) / 2` and a saturation delta at half that range, both
/// clamped back into [0, 1]. Returns `None` for malformed input without
/// consuming any draws.
pub fn apply_shimmer(rng: &mut Rng, hex: &str, level: i32) -> Option<String> {
    let hsb = hex_to_hsb(hex)?;
    let intensity = level as f64 * 0.15;

    let variation = (rng.next_f64() - 0.5) * intensity;
    let b = (hsb.b + variation).clamp(0.0, 1.0);

    let sat_variation = (rng.next_f64() - 0.5) * (intensity * 0.5);
    let s = (hsb.s + sat_variation).clamp(0.0, 1.0);

    Some(hsb_to_hex(Hsb { h: hsb.h, s, b }))
}
