// SPDX-License-Identifier: MIT
//
// Project files — the TOML description of one palette.
//
//   name = "acme"
//
//   [[stops]]
//   name = "500"
//   l = 55
//   c = 0.18
//
//   [[hues]]
//   name = "blue"
//   h = 250
//
//   [emit]            → n_tokens::EmitConfig, every field optional
//   [migration]       → n_tokens::MigrationMap, optional; suggested when absent

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use n_scale::{Hue, Palette, Stop};
use n_tokens::{EmitConfig, MigrationMap};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub stops: Vec<Stop>,
    pub hues: Vec<Hue>,
    #[serde(default)]
    pub emit: EmitConfig,
    /// Explicit migration maps. When absent, export suggests them from the
    /// prior documents.
    #[serde(default)]
    pub migration: Option<MigrationMap>,
}

fn default_name() -> String {
    "palette".to_string()
}

impl ProjectConfig {
    /// Read and validate a project file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.stops.is_empty() {
            bail!("at least one stop is required");
        }

        let mut seen = HashSet::new();
        for stop in &self.stops {
            if !seen.insert(stop.name.as_str()) {
                bail!("duplicate stop name '{}'", stop.name);
            }
            if !(0.0..=100.0).contains(&stop.l) || !(0.0..=0.4).contains(&stop.c) {
                warn!(stop = %stop.name, l = stop.l, c = stop.c, "stop outside the usual OKLCH range");
            }
        }

        let mut seen = HashSet::new();
        for hue in &self.hues {
            if !seen.insert(hue.name.as_str()) {
                bail!("duplicate hue name '{}'", hue.name);
            }
        }

        Ok(())
    }

    pub fn palette(&self) -> Palette {
        Palette::build(&self.stops, &self.hues)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize project")
    }
}
