// SPDX-License-Identifier: MIT

//! Naming conventions — how logical token coordinates become key paths.
//!
//! | Setting                  | Default     | Effect                                   |
//! |--------------------------|-------------|------------------------------------------|
//! | `elevation_template`     | `ground{n}` | `ground`, `ground1`, `ground2`, …        |
//! | `foreground`             | `prefix`    | `on-primary` (or `on/primary` if nested) |
//! | `foreground_segment`     | `on`        | key text of the foreground marker        |
//! | `foreground_code_prefix` | `on-`       | code-syntax replacement for the marker   |
//! | `shade_grouping`         | `nested`    | `primary/shade/500` (or `primary/500`)   |
//! | `shade_group`            | `shade`     | key text of the shade-group marker       |
//! | `mode_key`               | `mode`      | key of the mode-name leaf                |
//! | `exclusion_marker`       | `#`         | top-level keys the analyzer skips        |

use serde::{Deserialize, Serialize};

/// Shade-group key used by documents from older exports.
pub const LEGACY_STEP: &str = "step";

/// Where on-colors live relative to the color they sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForegroundStyle {
    /// One sibling key: `on-primary`.
    #[default]
    Prefix,
    /// A shared subtree: `on/primary`.
    Nested,
}

impl ForegroundStyle {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Prefix => Self::Nested,
            Self::Nested => Self::Prefix,
        }
    }
}

/// Whether shades sit under a group key or directly under their color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShadeGrouping {
    #[default]
    Nested,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub elevation_template: String,
    pub foreground: ForegroundStyle,
    pub foreground_segment: String,
    pub foreground_code_prefix: String,
    pub shade_grouping: ShadeGrouping,
    pub shade_group: String,
    pub mode_key: String,
    pub exclusion_marker: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            elevation_template: "ground{n}".into(),
            foreground: ForegroundStyle::Prefix,
            foreground_segment: "on".into(),
            foreground_code_prefix: "on-".into(),
            shade_grouping: ShadeGrouping::Nested,
            shade_group: "shade".into(),
            mode_key: "mode".into(),
            exclusion_marker: "#".into(),
        }
    }
}

impl NamingConfig {
    /// Name of elevation `index`; elevation 0 drops the number.
    #[must_use]
    pub fn elevation_name(&self, index: usize) -> String {
        let n = if index == 0 { String::new() } else { index.to_string() };
        self.elevation_template.replace("{n}", &n)
    }

    /// Key for the on-color of `name` in prefix style.
    #[must_use]
    pub fn prefixed_foreground(&self, name: &str) -> String {
        format!("{}-{name}", self.foreground_segment)
    }

    /// The shade-group key, or `None` when shades are flat.
    #[must_use]
    pub fn shade_group_key(&self) -> Option<&str> {
        match self.shade_grouping {
            ShadeGrouping::Nested => Some(&self.shade_group),
            ShadeGrouping::Flat => None,
        }
    }

    /// Whether `key` marks a shade subgroup, current or legacy.
    #[must_use]
    pub fn is_shade_marker(&self, key: &str) -> bool {
        key == self.shade_group || key == LEGACY_STEP
    }
}
