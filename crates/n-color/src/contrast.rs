// SPDX-License-Identifier: MIT
//
// Contrast scoring — APCA (perceptual, polarity-aware) and WCAG 2.x
// (classical luminance ratio) over hex color pairs.
//
// The two algorithms deliberately use different luminance models:
//
//   APCA: simple 2.4 power curve, coefficients 0.2126729/0.7151522/0.0721750
//   WCAG: piecewise sRGB curve,   coefficients 0.2126/0.7152/0.0722
//
// Don't unify them. Scores computed by other tools depend on the exact
// rounding of each.

use crate::color::hex_to_rgb;

// ─── APCA ────────────────────────────────────────────────────────────────────

const MAIN_TRC: f64 = 2.4;
const S_R_CO: f64 = 0.212_672_9;
const S_G_CO: f64 = 0.715_152_2;
const S_B_CO: f64 = 0.072_175_0;

const NORM_BG: f64 = 0.56;
const NORM_TXT: f64 = 0.57;
const REV_TXT: f64 = 0.62;
const REV_BG: f64 = 0.65;

const BLK_THRS: f64 = 0.022;
const BLK_CLMP: f64 = 1.414;
const SCALE_BOW: f64 = 1.14;
const SCALE_WOB: f64 = 1.14;
const LO_BOW_OFFSET: f64 = 0.027;
const LO_WOB_OFFSET: f64 = 0.027;
const DELTA_Y_MIN: f64 = 0.0005;
const LO_CLIP: f64 = 0.1;

/// Screen luminance as APCA models it.
fn apca_luminance(hex: &str) -> Option<f64> {
    let (r, g, b) = hex_to_rgb(hex)?;
    Some(
        S_B_CO.mul_add(
            b.powf(MAIN_TRC),
            S_R_CO.mul_add(r.powf(MAIN_TRC), S_G_CO * g.powf(MAIN_TRC)),
        ),
    )
}

/// Soft clamp near black so very dark colors don't blow up the exponent.
fn soft_clamp(y: f64) -> f64 {
    if y > BLK_THRS {
        y
    } else {
        y + (BLK_THRS - y).powf(BLK_CLMP)
    }
}

/// APCA lightness contrast (Lc) of `text` drawn on `background`.
///
/// Roughly −108..106. Positive means dark text on a light background,
/// negative means light text on a dark background. Scores near zero snap
/// to exactly 0. Swapping the arguments does NOT simply negate the score:
/// the two polarities use different exponents.
///
/// Returns 0 when either color can't be decoded.
#[must_use]
pub fn apca_contrast(text: &str, background: &str) -> f64 {
    let (Some(txt_y), Some(bg_y)) = (apca_luminance(text), apca_luminance(background)) else {
        return 0.0;
    };

    let txt_y = soft_clamp(txt_y);
    let bg_y = soft_clamp(bg_y);

    if (bg_y - txt_y).abs() < DELTA_Y_MIN {
        return 0.0;
    }

    let output = if bg_y > txt_y {
        // Normal polarity: dark text on light background.
        let sapc = (bg_y.powf(NORM_BG) - txt_y.powf(NORM_TXT)) * SCALE_BOW;
        if sapc < LO_CLIP { 0.0 } else { sapc - LO_BOW_OFFSET }
    } else {
        // Reverse polarity: light text on dark background.
        let sapc = (bg_y.powf(REV_BG) - txt_y.powf(REV_TXT)) * SCALE_WOB;
        if sapc > -LO_CLIP { 0.0 } else { sapc + LO_WOB_OFFSET }
    };

    output * 100.0
}

// ─── WCAG ────────────────────────────────────────────────────────────────────

/// Relative luminance per WCAG 2.x, in [0.0, 1.0].
#[must_use]
pub fn relative_luminance(hex: &str) -> Option<f64> {
    let (r, g, b) = hex_to_rgb(hex)?;
    let r_lin = wcag_linearize(r);
    let g_lin = wcag_linearize(g);
    let b_lin = wcag_linearize(b);
    Some(0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin)))
}

fn wcag_linearize(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG contrast ratio between two colors, in [1.0, 21.0].
///
/// `(L_lighter + 0.05) / (L_darker + 0.05)`, so argument order never
/// matters. Returns 1 when either color can't be decoded.
#[must_use]
pub fn wcag_ratio(a: &str, b: &str) -> f64 {
    let (Some(la), Some(lb)) = (relative_luminance(a), relative_luminance(b)) else {
        return 1.0;
    };
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

/// Which contrast model to score with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContrastAlgorithm {
    #[default]
    Apca,
    Wcag,
}

/// Which role the first color plays in a perceptual comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContrastDirection {
    /// `color` is text drawn on `compare`.
    #[default]
    ColorAsText,
    /// `color` is the background under `compare`.
    ColorAsBackground,
}

/// Score `color` against `compare`.
///
/// For APCA the direction decides which one is the text. WCAG is
/// symmetric and ignores it.
#[must_use]
pub fn get_contrast(
    color: &str,
    compare: &str,
    algorithm: ContrastAlgorithm,
    direction: ContrastDirection,
) -> f64 {
    match (algorithm, direction) {
        (ContrastAlgorithm::Apca, ContrastDirection::ColorAsText) => apca_contrast(color, compare),
        (ContrastAlgorithm::Apca, ContrastDirection::ColorAsBackground) => {
            apca_contrast(compare, color)
        }
        (ContrastAlgorithm::Wcag, _) => wcag_ratio(color, compare),
    }
}

/// Human-readable score: APCA as an absolute integer, WCAG with one decimal.
#[must_use]
pub fn format_contrast(value: f64, algorithm: ContrastAlgorithm) -> String {
    match algorithm {
        ContrastAlgorithm::Apca => format!("{:.0}", value.abs().round()),
        ContrastAlgorithm::Wcag => format!("{value:.1}"),
    }
}

// ─── On-color selection ──────────────────────────────────────────────────────

/// Foreground picked to sit on a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnColor {
    Black,
    White,
}

impl OnColor {
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Black => "#000000",
            Self::White => "#ffffff",
        }
    }
}

/// Choose black or white text for `background`, whichever has the larger
/// APCA magnitude. Ties go to black.
#[must_use]
pub fn auto_on_color(background: &str) -> OnColor {
    let black = apca_contrast(OnColor::Black.hex(), background).abs();
    let white = apca_contrast(OnColor::White.hex(), background).abs();
    if white > black { OnColor::White } else { OnColor::Black }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
