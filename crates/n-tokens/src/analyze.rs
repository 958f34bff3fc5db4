// SPDX-License-Identifier: MIT

//! Content analysis of previously exported documents.
//!
//! The analyzer never interprets values. It only classifies structure so
//! the migration layer knows which shade and hue names a prior export used:
//!
//! ```text
//! primary/
//!   shade/500      → shade "500" of intent "primary"
//!   shade/500/15   → alpha 15 of that shade
//!   15             → alpha 15 of the intent itself
//! --blue-500       → flat palette primitive (hue "blue", shade "500")
//! #notes           → excluded
//! ```
//!
//! Numbers are classified by position through [`classify_numeric`], never
//! by value.

use tracing::warn;

use crate::document::{DocumentError, TokenDocument, TokenNode};
use crate::naming::NamingConfig;
use crate::path::{NumericRef, classify_numeric};

/// Elevations recognised as grounds: `ground`, `ground1`, `ground2`.
pub const ELEVATIONS: usize = 3;

/// Top-level keys that are plain alpha ramps.
pub const DIRECT_RAMPS: [&str; 4] = ["stark", "black", "white", "neutral"];

/// Top-level keys routed to intents instead of hues.
pub const INTENT_NAMES: [&str; 5] = ["primary", "danger", "warning", "success", "neutral"];

/// A name with the alpha variants found under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlphaRamp {
    pub name: String,
    pub alphas: Vec<u8>,
}

/// An intent or hue group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedGroup {
    pub name: String,
    /// Shades under the shade-group marker, each with its own alphas.
    pub shades: Vec<AlphaRamp>,
    /// Direct numeric children of the group.
    pub alphas: Vec<u8>,
    /// Direct numeric children of the paired foreground group.
    pub on_alphas: Vec<u8>,
}

/// A flat palette leaf `--{hue}-{shade}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primitive {
    pub hue: String,
    pub shade: String,
    pub alphas: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentAnalysis {
    pub mode_name: Option<String>,
    pub excluded: Vec<String>,
    pub grounds: Vec<AlphaRamp>,
    pub ramps: Vec<AlphaRamp>,
    pub intents: Vec<ClassifiedGroup>,
    pub hues: Vec<ClassifiedGroup>,
    /// Foreground groups, classified like their backgrounds.
    pub foregrounds: Vec<ClassifiedGroup>,
    pub primitives: Vec<Primitive>,
}

impl ContentAnalysis {
    /// Every shade name seen, primitives first, without duplicates.
    #[must_use]
    pub fn shade_names(&self) -> Vec<String> {
        let from_groups = self
            .intents
            .iter()
            .chain(&self.hues)
            .flat_map(|g| g.shades.iter().map(|s| s.name.as_str()));
        dedup(self.primitives.iter().map(|p| p.shade.as_str()).chain(from_groups))
    }

    /// Every hue name seen (primitives and hue groups), without duplicates.
    #[must_use]
    pub fn hue_names(&self) -> Vec<String> {
        dedup(
            self.primitives
                .iter()
                .map(|p| p.hue.as_str())
                .chain(self.hues.iter().map(|g| g.name.as_str())),
        )
    }

    #[must_use]
    pub fn intent(&self, name: &str) -> Option<&ClassifiedGroup> {
        self.intents.iter().find(|g| g.name == name)
    }

    #[must_use]
    pub fn hue(&self, name: &str) -> Option<&ClassifiedGroup> {
        self.hues.iter().find(|g| g.name == name)
    }
}

fn dedup<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.iter().any(|n| n == name) {
            out.push(name.to_owned());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Analyze document text.
///
/// # Errors
///
/// Returns the parse error for malformed text. Callers treat that exactly
/// like having no prior document.
pub fn analyze(text: &str, naming: &NamingConfig) -> Result<ContentAnalysis, DocumentError> {
    let doc = TokenDocument::parse(text)?;
    Ok(analyze_document(&doc, naming))
}

/// Classify an already-parsed document.
#[must_use]
pub fn analyze_document(doc: &TokenDocument, naming: &NamingConfig) -> ContentAnalysis {
    let mut analysis = ContentAnalysis {
        mode_name: doc.mode_name().map(str::to_owned),
        ..ContentAnalysis::default()
    };
    let grounds: Vec<String> = (0..ELEVATIONS).map(|i| naming.elevation_name(i)).collect();
    let fg_prefix = naming.prefixed_foreground("");

    for (key, node) in &doc.root.children {
        if key.starts_with(naming.exclusion_marker.as_str()) {
            analysis.excluded.push(key.clone());
            continue;
        }

        if grounds.contains(key) {
            analysis.grounds.push(alpha_ramp(key, node));
            continue;
        }

        if key == &naming.foreground_segment {
            for (name, child) in &node.children {
                analysis.foregrounds.push(classify_group(name, child, naming));
            }
            continue;
        }

        if let Some(name) = key.strip_prefix(fg_prefix.as_str()).filter(|n| !n.is_empty()) {
            analysis.foregrounds.push(classify_group(name, node, naming));
            continue;
        }

        if let Some(primitive) = parse_primitive(key, node) {
            analysis.primitives.push(primitive);
            continue;
        }

        if DIRECT_RAMPS.contains(&key.as_str()) {
            analysis.ramps.push(alpha_ramp(key, node));
        }

        // A mode leaf or a stray string is not a color group.
        if node.is_leaf() {
            continue;
        }

        let group = classify_group(key, node, naming);
        if INTENT_NAMES.contains(&key.as_str()) {
            analysis.intents.push(group);
        } else if !DIRECT_RAMPS.contains(&key.as_str()) {
            analysis.hues.push(group);
        }
    }

    for fg in &analysis.foregrounds {
        let target = analysis
            .intents
            .iter_mut()
            .chain(analysis.hues.iter_mut())
            .find(|g| g.name == fg.name);
        if let Some(group) = target {
            group.on_alphas.clone_from(&fg.alphas);
        }
    }

    analysis
}

/// Direct alpha children of `node`.
fn alphas_of(node: &TokenNode) -> Vec<u8> {
    node.children
        .keys()
        .filter_map(|key| match classify_numeric(key, false) {
            Some(NumericRef::Alpha(a)) => Some(a),
            _ => None,
        })
        .collect()
}

fn alpha_ramp(name: &str, node: &TokenNode) -> AlphaRamp {
    AlphaRamp {
        name: name.to_owned(),
        alphas: alphas_of(node),
    }
}

fn classify_group(name: &str, node: &TokenNode, naming: &NamingConfig) -> ClassifiedGroup {
    let mut group = ClassifiedGroup {
        name: name.to_owned(),
        ..ClassifiedGroup::default()
    };

    for (key, child) in &node.children {
        if naming.is_shade_marker(key) {
            for (shade_key, shade) in &child.children {
                if let Some(NumericRef::Shade(s)) = classify_numeric(shade_key, true) {
                    group.shades.push(AlphaRamp {
                        name: s,
                        alphas: alphas_of(shade),
                    });
                }
            }
        } else if let Some(NumericRef::Alpha(a)) = classify_numeric(key, false) {
            group.alphas.push(a);
        }
    }

    group
}

/// `--blue-500` → (`blue`, `500`) with its nested alphas.
fn parse_primitive(key: &str, node: &TokenNode) -> Option<Primitive> {
    let rest = key.strip_prefix("--")?;
    let (hue, shade) = rest.rsplit_once('-')?;
    if hue.is_empty() || shade.is_empty() {
        return None;
    }
    Some(Primitive {
        hue: hue.to_owned(),
        shade: shade.to_owned(),
        alphas: alphas_of(node),
    })
}

// ---------------------------------------------------------------------------
// Prior
// ---------------------------------------------------------------------------

/// A previously exported document together with its classification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prior {
    pub document: TokenDocument,
    pub analysis: ContentAnalysis,
}

impl Prior {
    /// Parse and analyze prior text.
    ///
    /// Malformed text is logged and yields `None`, which every caller
    /// treats as "no prior document".
    #[must_use]
    pub fn load(text: &str, naming: &NamingConfig) -> Option<Self> {
        match TokenDocument::parse(text) {
            Ok(document) => {
                let analysis = analyze_document(&document, naming);
                Some(Self { document, analysis })
            }
            Err(err) => {
                warn!(%err, "ignoring malformed prior document");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
