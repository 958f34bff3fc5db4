// SPDX-License-Identifier: MIT

//! Token emission — palette and semantic documents from a color grid.
//!
//! ```text
//! Palette ──► palette::emit_palette  ──► flat primitives (--blue-500)
//!    │
//!    └──────► semantic::emit_semantic ──► grounds, stark, intents, hues
//!                 (per mode)               aliasing into the primitives
//! ```
//!
//! Both emitters rebuild every value from scratch. The only thing taken
//! from a prior document is the variable identifier.

pub mod palette;
pub mod semantic;

pub use palette::{emit_palette, primitive_key};
pub use semantic::emit_semantic;

use n_color::color::{CssColor, Oklch, Rgb, clamp_unit, to_hex};
use n_color::contrast::{OnColor, auto_on_color};
use n_scale::ColorCell;

use crate::document::{ColorSpace, ColorValue};

/// A concrete color in both output spaces, gamma-encoded and unclamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    pub srgb: Rgb,
    pub p3: Rgb,
}

impl Swatch {
    #[must_use]
    pub const fn from_cell(cell: &ColorCell) -> Self {
        Self {
            srgb: cell.srgb,
            p3: cell.p3,
        }
    }

    #[must_use]
    pub fn from_oklch(color: Oklch) -> Self {
        Self {
            srgb: color.to_srgb(),
            p3: color.to_p3(),
        }
    }

    #[must_use]
    pub fn from_css(color: CssColor) -> Self {
        Self {
            srgb: color.to_srgb(),
            p3: color.to_p3(),
        }
    }

    #[must_use]
    pub const fn from_on_color(on: OnColor) -> Self {
        let v = match on {
            OnColor::Black => 0.0,
            OnColor::White => 1.0,
        };
        Self {
            srgb: (v, v, v),
            p3: (v, v, v),
        }
    }

    /// Clamped sRGB hex.
    #[must_use]
    pub fn hex(&self) -> String {
        to_hex(self.srgb)
    }

    /// Black or white, whichever reads better on this color.
    #[must_use]
    pub fn on_color(&self) -> Self {
        Self::from_on_color(auto_on_color(&self.hex()))
    }

    /// Literal token value at `alpha` percent.
    #[must_use]
    pub fn value(&self, alpha: u8, space: ColorSpace) -> ColorValue {
        let (r, g, b) = clamp_unit(match space {
            ColorSpace::Srgb => self.srgb,
            ColorSpace::DisplayP3 => self.p3,
        });
        ColorValue {
            color_space: space,
            components: [r, g, b],
            alpha: f64::from(alpha) / 100.0,
            hex: self.hex(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn values_are_clamped_with_srgb_hex() {
        // Out of sRGB, inside P3.
        let swatch = Swatch::from_oklch(Oklch::new(70.0, 0.25, 145.0));
        let value = swatch.value(50, ColorSpace::DisplayP3);
        assert_eq!(value.color_space, ColorSpace::DisplayP3);
        assert!(value.components.iter().all(|c| (0.0..=1.0).contains(c)));
        assert!((value.alpha - 0.5).abs() < f64::EPSILON);
        assert_eq!(value.hex, to_hex(swatch.srgb));
    }

    #[test]
    fn on_colors() {
        let white = Swatch::from_on_color(OnColor::White);
        let black = Swatch::from_on_color(OnColor::Black);
        assert_eq!(white.on_color().hex(), "#000000");
        assert_eq!(black.on_color().hex(), "#ffffff");
    }
}
