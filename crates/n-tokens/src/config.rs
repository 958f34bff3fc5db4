// SPDX-License-Identifier: MIT

//! Emitter configuration.
//!
//! One immutable [`EmitConfig`] value is threaded through every emitter
//! call. Every type here deserializes with defaults, so a project file only
//! spells out what it changes:
//!
//! ```toml
//! [emit]
//! default_shade = "500"
//! color_space = "display-p3"
//!
//! [emit.alphas]
//! intents = "0-30,50,100"
//!
//! [[emit.grounds]]
//! light = { ground = { kind = "theme", shade = "0" }, on_ground = { kind = "auto" } }
//! dark  = { ground = { kind = "custom", color = "oklch(18% 0.02 250)" }, on_ground = { kind = "white" } }
//! ```

use indexmap::IndexMap;
use n_scale::{AlphaSet, Palette};
use serde::{Deserialize, Serialize};

use crate::document::ColorSpace;
use crate::naming::NamingConfig;

/// Which semantic document is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    /// The opposite mode.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Display name written to the mode leaf and the document marker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }
}

// ---------------------------------------------------------------------------
// Alphas
// ---------------------------------------------------------------------------

fn full_only() -> AlphaSet {
    std::iter::once(100).collect()
}

/// Opacity variants per token family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaConfig {
    /// Palette primitives (`--blue-500/15`).
    pub palette: AlphaSet,
    pub grounds: AlphaSet,
    pub on_grounds: AlphaSet,
    /// Stark and on-stark root ramps.
    pub stark: AlphaSet,
    /// Black and white.
    pub utility: AlphaSet,
    /// Intent and hue root ramps (`primary/15`).
    pub intents: AlphaSet,
    pub on_intents: AlphaSet,
    /// Per-shade ramps (`primary/shade/500/15`).
    pub shades: AlphaSet,
    pub on_shades: AlphaSet,
}

impl Default for AlphaConfig {
    fn default() -> Self {
        Self {
            palette: AlphaSet::new(),
            grounds: full_only(),
            on_grounds: full_only(),
            stark: full_only(),
            utility: full_only(),
            intents: full_only(),
            on_intents: full_only(),
            shades: AlphaSet::new(),
            on_shades: AlphaSet::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Grounds
// ---------------------------------------------------------------------------

/// Where a ground's color comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GroundSource {
    /// Alias into the flat palette.
    Primitive { hue: String, shade: String },
    /// Alias into the theme collection's `neutral` ramp.
    Theme { shade: String },
    /// A literal CSS color. Never aliased.
    Custom { color: String },
}

/// Where an on-ground color comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OnGroundSource {
    Primitive { hue: String, shade: String },
    Black,
    White,
    Custom { color: String },
    /// Black or white, whichever contrasts more with the ground.
    #[default]
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundMode {
    pub ground: GroundSource,
    #[serde(default)]
    pub on_ground: OnGroundSource,
}

/// One elevation, authored separately for each mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundConfig {
    pub light: GroundMode,
    pub dark: GroundMode,
}

impl GroundConfig {
    /// Same theme shade in both modes; dark reversal does the flipping.
    #[must_use]
    pub fn theme(shade: &str) -> Self {
        let mode = GroundMode {
            ground: GroundSource::Theme {
                shade: shade.to_owned(),
            },
            on_ground: OnGroundSource::Auto,
        };
        Self {
            light: mode.clone(),
            dark: mode,
        }
    }

    #[must_use]
    pub const fn for_mode(&self, mode: Mode) -> &GroundMode {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }
}

// ---------------------------------------------------------------------------
// Stark
// ---------------------------------------------------------------------------

/// The per-mode grayscale ramp.
///
/// Each map overrides the lightness of individual shades. Shades left out
/// take the stop's own lightness in light mode and the mirrored stop's
/// lightness in dark mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarkConfig {
    /// Base of the root alpha ramp. Falls back to the emitter default shade.
    pub default_shade: Option<String>,
    pub light: IndexMap<String, f64>,
    pub dark: IndexMap<String, f64>,
}

impl StarkConfig {
    /// Lightness of `shade` in `mode`.
    #[must_use]
    pub fn lightness(&self, palette: &Palette, mode: Mode, shade: &str) -> Option<f64> {
        let overrides = match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        };
        if let Some(&l) = overrides.get(shade) {
            return Some(l);
        }
        let stop = match mode {
            Mode::Light => shade,
            Mode::Dark => palette.mirror_shade(shade)?,
        };
        palette.stops.get(palette.stop_index(stop)?).map(|s| s.l)
    }
}

// ---------------------------------------------------------------------------
// EmitConfig
// ---------------------------------------------------------------------------

fn default_intents() -> IndexMap<String, String> {
    [
        ("primary", "blue"),
        ("danger", "red"),
        ("warning", "orange"),
        ("success", "green"),
        ("neutral", "gray"),
    ]
    .into_iter()
    .map(|(intent, hue)| (intent.to_owned(), hue.to_owned()))
    .collect()
}

fn default_grounds() -> Vec<GroundConfig> {
    ["0", "50", "100"].into_iter().map(GroundConfig::theme).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    pub color_space: ColorSpace,
    pub naming: NamingConfig,
    pub alphas: AlphaConfig,
    pub default_shade: String,
    /// Mirror shade references in dark mode.
    pub reverse_dark: bool,
    /// Intent name → palette hue name, in emission order.
    pub intents: IndexMap<String, String>,
    /// One entry per elevation.
    pub grounds: Vec<GroundConfig>,
    pub stark: StarkConfig,
    /// Collection that theme grounds alias into.
    pub theme_collection: String,
    /// Collection that holds the flat palette.
    pub palette_collection: String,
    pub palette_mode_name: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            color_space: ColorSpace::Srgb,
            naming: NamingConfig::default(),
            alphas: AlphaConfig::default(),
            default_shade: "500".into(),
            reverse_dark: true,
            intents: default_intents(),
            grounds: default_grounds(),
            stark: StarkConfig::default(),
            theme_collection: "theme".into(),
            palette_collection: "palette".into(),
            palette_mode_name: "Value".into(),
        }
    }
}

impl EmitConfig {
    /// The stop a shade reference resolves to in `mode`.
    ///
    /// With reversal on, dark mode reads the mirrored stop. The key that
    /// names the shade never changes; only what it points at.
    #[must_use]
    pub fn reference_shade<'a>(&self, palette: &'a Palette, mode: Mode, shade: &'a str) -> &'a str {
        if self.reverse_dark && mode == Mode::Dark {
            palette.mirror_shade(shade).unwrap_or(shade)
        } else {
            shade
        }
    }

    /// The stark ramp's base shade.
    #[must_use]
    pub fn stark_default_shade(&self) -> &str {
        self.stark.default_shade.as_deref().unwrap_or(&self.default_shade)
    }

    /// Whether `name` is configured as an intent.
    #[must_use]
    pub fn is_intent(&self, name: &str) -> bool {
        self.intents.contains_key(name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
