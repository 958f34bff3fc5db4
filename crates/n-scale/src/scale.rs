// SPDX-License-Identifier: MIT

//! Palette grid generation — stops × hues to concrete colors.
//!
//! A [`Stop`] is a lightness/chroma rung shared by every hue; a [`Hue`] is an
//! angle on the OKLCH wheel. [`Palette::build`] crosses them into a grid of
//! [`ColorCell`]s carrying sRGB, Display P3 and OKLCH renderings plus
//! independent clip flags for each gamut.
//!
//! The grid is a pure function of its inputs and cheap enough to rebuild on
//! every edit, so cells are never stored on their own.

use n_color::color::{Oklch, Rgb, is_in_gamut, to_hex};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One named lightness/chroma rung.
///
/// Stop order matters: dark-mode shade reversal mirrors positions in the
/// sequence, not lightness values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub name: String,
    /// OKLCH lightness, 0–100.
    pub l: f64,
    /// OKLCH chroma, 0–0.4.
    pub c: f64,
}

impl Stop {
    #[must_use]
    pub fn new(name: impl Into<String>, l: f64, c: f64) -> Self {
        Self {
            name: name.into(),
            l,
            c,
        }
    }
}

/// One named hue angle. `full_gray` hues ignore stop chroma entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hue {
    pub name: String,
    /// Degrees, 0–360.
    pub h: f64,
    #[serde(default)]
    pub full_gray: bool,
}

impl Hue {
    #[must_use]
    pub fn new(name: impl Into<String>, h: f64) -> Self {
        Self {
            name: name.into(),
            h,
            full_gray: false,
        }
    }

    #[must_use]
    pub fn gray(name: impl Into<String>, h: f64) -> Self {
        Self {
            full_gray: true,
            ..Self::new(name, h)
        }
    }
}

// ---------------------------------------------------------------------------
// ColorCell
// ---------------------------------------------------------------------------

/// The derived color at one (hue, stop) coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorCell {
    pub stop_name: String,
    pub hue_angle: f64,
    pub l: f64,
    /// Effective chroma: 0 for full-gray hues.
    pub c: f64,
    /// Clamped sRGB hex.
    pub hex: String,
    /// Clamped Display P3 hex.
    pub hex_p3: String,
    /// CSS `oklch()` string of the effective color.
    pub oklch: String,
    /// Gamma-encoded sRGB, unclamped.
    pub srgb: Rgb,
    /// Gamma-encoded Display P3, unclamped.
    pub p3: Rgb,
    pub clipped_srgb: bool,
    pub clipped_p3: bool,
}

impl ColorCell {
    /// Compute the cell for one stop on one hue.
    #[must_use]
    pub fn compute(stop: &Stop, hue: &Hue) -> Self {
        let c = if hue.full_gray { 0.0 } else { stop.c };
        let color = Oklch::new(stop.l, c, hue.h);

        // Gamut flags come from the raw linear values, never from the hex.
        let linear_srgb = color.to_linear_srgb();
        let linear_p3 = color.to_linear_p3();
        let srgb = color.to_srgb();
        let p3 = color.to_p3();

        Self {
            stop_name: stop.name.clone(),
            hue_angle: hue.h,
            l: stop.l,
            c,
            hex: to_hex(srgb),
            hex_p3: to_hex(p3),
            oklch: color.to_css(),
            srgb,
            p3,
            clipped_srgb: !is_in_gamut(linear_srgb),
            clipped_p3: !is_in_gamut(linear_p3),
        }
    }

    #[must_use]
    pub const fn oklch_color(&self) -> Oklch {
        Oklch::new(self.l, self.c, self.hue_angle)
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// One hue and its cells, aligned index-for-index with the palette stops.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteRow {
    pub hue: Hue,
    pub cells: Vec<ColorCell>,
}

/// The full color grid: exactly one cell per (hue, stop) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub stops: Vec<Stop>,
    pub rows: Vec<PaletteRow>,
}

impl Palette {
    /// Cross every stop with every hue.
    #[must_use]
    pub fn build(stops: &[Stop], hues: &[Hue]) -> Self {
        let rows = hues
            .iter()
            .map(|hue| PaletteRow {
                hue: hue.clone(),
                cells: stops.iter().map(|stop| ColorCell::compute(stop, hue)).collect(),
            })
            .collect();

        Self {
            stops: stops.to_vec(),
            rows,
        }
    }

    #[must_use]
    pub fn row(&self, hue: &str) -> Option<&PaletteRow> {
        self.rows.iter().find(|row| row.hue.name == hue)
    }

    #[must_use]
    pub fn stop_index(&self, shade: &str) -> Option<usize> {
        self.stops.iter().position(|stop| stop.name == shade)
    }

    /// The cell at (hue, shade), by name.
    #[must_use]
    pub fn cell(&self, hue: &str, shade: &str) -> Option<&ColorCell> {
        let idx = self.stop_index(shade)?;
        self.row(hue)?.cells.get(idx)
    }

    /// The stop name at the mirrored position (`i → len - 1 - i`).
    #[must_use]
    pub fn mirror_shade(&self, shade: &str) -> Option<&str> {
        let idx = self.stop_index(shade)?;
        let mirrored = self.stops.len() - 1 - idx;
        Some(self.stops[mirrored].name.as_str())
    }

    /// Stop names in order.
    pub fn shade_names(&self) -> impl Iterator<Item = &str> {
        self.stops.iter().map(|stop| stop.name.as_str())
    }

    /// Hue names in order.
    pub fn hue_names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.hue.name.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
