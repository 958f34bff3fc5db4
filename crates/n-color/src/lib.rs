// SPDX-License-Identifier: MIT
//
// n-color — color math for n-palette.
//
// Two layers, both pure functions over plain numbers and hex strings:
//
//   color.rs    → OKLCH to linear sRGB / Display P3, transfer curve, gamut
//                 test, hex encode/decode, CSS color parsing
//   contrast.rs → APCA and WCAG scoring, formatting, black/white on-color
//                 selection
//
// Nothing here allocates state or performs I/O. Every function is safe to
// call from any thread, in any order.

// Mathematical code uses small integer-to-float casts and similar names.
#![allow(clippy::similar_names)]

pub mod color;
pub mod contrast;

pub use color::{CssColor, Oklch, Rgb};
pub use contrast::{ContrastAlgorithm, ContrastDirection, OnColor};
