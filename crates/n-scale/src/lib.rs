// SPDX-License-Identifier: MIT

//! # n-scale — Palette grid builder
//!
//! Turns a compact parametric description (lightness/chroma stops × hue
//! angles) into a perceptually uniform color grid.
//!
//! # Architecture
//!
//! ```text
//! Stops + Hues
//!     │
//!     ▼
//! scale.rs:  Palette::build → one ColorCell per (hue, stop)
//!     │         sRGB / P3 / OKLCH + per-gamut clip flags
//!     ▼
//! n-tokens:  design-token emission
//! ```
//!
//! `alpha.rs` holds the range-string alpha sets the emitter expands into
//! opacity variants.

pub mod alpha;
pub mod scale;

pub use alpha::{AlphaSet, AlphaSetError};
pub use scale::{ColorCell, Hue, Palette, PaletteRow, Stop};
