// SPDX-License-Identifier: MIT
//
// n-color color math — OKLCH in, sRGB / Display P3 / hex out.
//
// Single-character variable names (r, g, b, l, c, h, a, s, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Conversion pipeline:
//
//   OKLCH → Oklab → LMS → Linear sRGB ─┬─→ sRGB (gamma) → hex
//                                      └─→ Linear P3 → P3 (gamma) → hex
//
// Lightness is carried in percent (0–100) everywhere in this crate, the way
// palette stops are authored. Linear triples are never clamped here: gamut
// decisions are made on the raw values, and only `to_hex` quantizes.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

/// An RGB triple. Whether it is linear or gamma-encoded, sRGB or P3,
/// depends on the function that produced it.
pub type Rgb = (f64, f64, f64);

/// Tolerance on each side of [0, 1] for the gamut test.
pub const GAMUT_EPSILON: f64 = 0.0001;

// ─── Oklch ───────────────────────────────────────────────────────────────────

/// A color in OKLCH with lightness in percent.
///
/// - `l`: Lightness, 0.0 to 100.0
/// - `c`: Chroma, 0.0 to ~0.4
/// - `h`: Hue angle in degrees, 0.0 to 360.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Oklch {
    #[inline]
    #[must_use]
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// A pure gray at the given OKLCH lightness (percent).
    #[inline]
    #[must_use]
    pub const fn gray(l: f64) -> Self {
        Self::new(l, 0.0, 0.0)
    }

    /// Linear sRGB, unclamped.
    #[must_use]
    pub fn to_linear_srgb(self) -> Rgb {
        oklch_to_linear(self.l, self.c, self.h)
    }

    /// Linear Display P3, unclamped.
    #[must_use]
    pub fn to_linear_p3(self) -> Rgb {
        oklch_to_linear_p3(self.l, self.c, self.h)
    }

    /// Gamma-encoded sRGB, unclamped.
    #[must_use]
    pub fn to_srgb(self) -> Rgb {
        encode(self.to_linear_srgb())
    }

    /// Gamma-encoded Display P3, unclamped.
    #[must_use]
    pub fn to_p3(self) -> Rgb {
        encode(self.to_linear_p3())
    }

    /// Clamped sRGB hex (`#rrggbb`).
    #[must_use]
    pub fn to_hex(self) -> String {
        to_hex(self.to_srgb())
    }

    /// CSS `oklch()` notation, e.g. `oklch(55% 0.18 250)`.
    #[must_use]
    pub fn to_css(self) -> String {
        oklch_string(self.l, self.c, self.h)
    }
}

// ─── OKLCH → Linear RGB ──────────────────────────────────────────────────────
//
// These implement the Oklab color space math created by Björn Ottosson.
// Reference: https://bottosson.github.io/posts/oklab/
//
// The Oklab → Linear sRGB conversion goes through an intermediate LMS
// (Long, Medium, Short cone response) space.

/// Convert OKLCH (lightness in percent) to linear sRGB.
///
/// Total and deterministic. Out-of-gamut colors produce components below 0
/// or above 1; nothing is clamped.
#[must_use]
pub fn oklch_to_linear(l: f64, c: f64, h: f64) -> Rgb {
    let h_rad = h.to_radians();
    let a = c * h_rad.cos();
    let b = c * h_rad.sin();
    oklab_to_linear_srgb(l / 100.0, a, b)
}

/// Convert OKLCH (lightness in percent) to linear Display P3.
#[must_use]
pub fn oklch_to_linear_p3(l: f64, c: f64, h: f64) -> Rgb {
    linear_srgb_to_p3(oklch_to_linear(l, c, h))
}

/// Convert Oklab (L in 0–1, a, b) to linear sRGB.
#[inline]
fn oklab_to_linear_srgb(l_ok: f64, a: f64, b: f64) -> Rgb {
    // Oklab → LMS (cube roots)
    let l_ = 0.215_803_757_3f64.mul_add(b, 0.396_337_777_4f64.mul_add(a, l_ok));
    let m_ = 0.063_854_172_8f64.mul_add(-b, 0.105_561_345_8f64.mul_add(-a, l_ok));
    let s_ = 1.291_485_548_0f64.mul_add(-b, 0.089_484_177_5f64.mul_add(-a, l_ok));

    // Undo cube root
    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    // LMS → Linear sRGB
    let r = 0.230_969_929_2f64.mul_add(s, 4.076_741_662_1f64.mul_add(l, -(3.307_711_591_3 * m)));
    let g = 0.341_319_396_5f64.mul_add(-s, (-1.268_438_004_6f64).mul_add(l, 2.609_757_401_1 * m));
    let bl = 1.707_614_701_0f64.mul_add(s, (-0.004_196_086_3f64).mul_add(l, -(0.703_418_614_7 * m)));

    (r, g, bl)
}

/// Fixed linear-sRGB → linear-Display-P3 matrix (D65 both sides).
///
/// An approximation of a profile transform: no chromatic adaptation or
/// rendering intent is involved.
#[must_use]
pub fn linear_srgb_to_p3((r, g, b): Rgb) -> Rgb {
    (
        0.822_462_1f64.mul_add(r, 0.177_538_0 * g),
        0.033_194_1f64.mul_add(r, 0.966_805_8 * g),
        0.017_082_7f64.mul_add(r, 0.072_397_4f64.mul_add(g, 0.910_519_9 * b)),
    )
}

// ─── Linear ↔ Gamma ──────────────────────────────────────────────────────────
//
// sRGB and Display P3 share the same piecewise transfer function. The
// encoding is mirrored around zero so out-of-gamut negatives stay negative.

/// Apply the sRGB transfer function to one linear component.
#[inline]
#[must_use]
pub fn gamma_encode(c: f64) -> f64 {
    let abs = c.abs();
    let v = if abs <= 0.003_130_8 {
        abs * 12.92
    } else {
        1.055f64.mul_add(abs.powf(1.0 / 2.4), -0.055)
    };
    v.copysign(c)
}

/// Remove the sRGB transfer function from one encoded component.
#[inline]
#[must_use]
pub fn gamma_decode(c: f64) -> f64 {
    let abs = c.abs();
    let v = if abs <= 0.040_45 {
        abs / 12.92
    } else {
        ((abs + 0.055) / 1.055).powf(2.4)
    };
    v.copysign(c)
}

/// Gamma-encode a linear triple.
#[inline]
#[must_use]
pub fn encode((r, g, b): Rgb) -> Rgb {
    (gamma_encode(r), gamma_encode(g), gamma_encode(b))
}

/// Linearize an encoded triple.
#[inline]
#[must_use]
pub fn decode((r, g, b): Rgb) -> Rgb {
    (gamma_decode(r), gamma_decode(g), gamma_decode(b))
}

/// Whether a linear triple is displayable, within [`GAMUT_EPSILON`].
///
/// Must be given the unclamped triple; the hex of a clipped color always
/// looks in-gamut.
#[must_use]
pub fn is_in_gamut((r, g, b): Rgb) -> bool {
    let range = -GAMUT_EPSILON..=1.0 + GAMUT_EPSILON;
    range.contains(&r) && range.contains(&g) && range.contains(&b)
}

/// Clamp each component to [0, 1].
#[inline]
#[must_use]
pub const fn clamp_unit((r, g, b): Rgb) -> Rgb {
    (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
}

// ─── Hex ─────────────────────────────────────────────────────────────────────

/// Quantize an encoded triple to `#rrggbb`. Lossy: components are clamped.
#[must_use]
pub fn to_hex(rgb: Rgb) -> String {
    let (r, g, b) = clamp_unit(rgb);
    format!("#{:02x}{:02x}{:02x}", to_u8(r), to_u8(g), to_u8(b))
}

/// Decode `#rgb`, `#rrggbb` or `#rrggbbaa` (with or without `#`) to an
/// encoded triple in 0–1. Alpha is ignored.
#[must_use]
pub fn hex_to_rgb(s: &str) -> Option<Rgb> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    let (r, g, b) = match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            (r << 4 | r, g << 4 | g, b << 4 | b)
        }
        // #RRGGBB, #RRGGBBAA
        6 | 8 => {
            if bytes.len() == 8 {
                parse_hex_byte(&bytes[6..8])?;
            }
            (
                parse_hex_byte(&bytes[0..2])?,
                parse_hex_byte(&bytes[2..4])?,
                parse_hex_byte(&bytes[4..6])?,
            )
        }
        _ => return None,
    };

    Some((
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    ))
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── CSS Colors ──────────────────────────────────────────────────────────────

static OKLCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^oklch\(\s*([0-9]*\.?[0-9]+)\s*(%?)\s+([0-9]*\.?[0-9]+)\s+(-?[0-9]*\.?[0-9]+)(?:deg)?\s*(?:/\s*[0-9]*\.?[0-9]+%?\s*)?\)$",
    )
    .expect("OKLCH pattern is valid")
});

/// A parsed CSS color in one of the two notations the palette tool reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CssColor {
    /// `#rrggbb` and friends, stored gamma-encoded.
    Hex(Rgb),
    /// `oklch(L C H)` with L in percent.
    Oklch(Oklch),
}

impl CssColor {
    /// Gamma-encoded sRGB, unclamped for OKLCH input.
    #[must_use]
    pub fn to_srgb(self) -> Rgb {
        match self {
            Self::Hex(rgb) => rgb,
            Self::Oklch(color) => color.to_srgb(),
        }
    }

    /// Gamma-encoded Display P3.
    #[must_use]
    pub fn to_p3(self) -> Rgb {
        match self {
            Self::Hex(rgb) => encode(linear_srgb_to_p3(decode(rgb))),
            Self::Oklch(color) => color.to_p3(),
        }
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        to_hex(self.to_srgb())
    }
}

/// Parse hex or `oklch(L[%] C H)` notation.
///
/// A unitless lightness of 1 or less is read as a fraction and scaled to
/// percent, so `oklch(0.55 0.18 250)` and `oklch(55% 0.18 250)` agree.
#[must_use]
pub fn parse_css_color(s: &str) -> Option<CssColor> {
    let s = s.trim();
    if s.starts_with('#') {
        return hex_to_rgb(s).map(CssColor::Hex);
    }

    let caps = OKLCH_RE.captures(s)?;
    let mut l: f64 = caps[1].parse().ok()?;
    let c: f64 = caps[3].parse().ok()?;
    let h: f64 = caps[4].parse().ok()?;
    if caps[2].is_empty() && l <= 1.0 {
        l *= 100.0;
    }
    Some(CssColor::Oklch(Oklch::new(l, c, h)))
}

/// Convert a CSS color string to `#rrggbb`.
///
/// Anything that is neither hex nor `oklch()` becomes opaque black.
#[must_use]
pub fn css_color_to_hex(s: &str) -> String {
    parse_css_color(s).map_or_else(
        || {
            tracing::debug!(input = s, "unrecognized CSS color, using black");
            "#000000".to_owned()
        },
        CssColor::to_hex,
    )
}

/// Render `oklch(L% C H)` with trailing zeros trimmed.
#[must_use]
pub fn oklch_string(l: f64, c: f64, h: f64) -> String {
    let mut out = String::from("oklch(");
    let _ = write!(
        out,
        "{}% {} {})",
        format_number(l),
        format_number(c),
        format_number(h)
    );
    out
}

/// Format with at most four decimals, dropping trailing zeros.
#[must_use]
pub fn format_number(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
