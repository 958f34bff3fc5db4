// SPDX-License-Identifier: MIT

//! Migration — carrying variable identifiers forward across regenerations.
//!
//! A [`MigrationMap`] says, per target shade and hue, which name the prior
//! export used (or that the target is new). Identifier lookup then tries an
//! ordered list of candidate key paths against the prior document and takes
//! the first hit. A miss is never an error: the token is simply born without
//! an identifier.

use indexmap::IndexMap;
use n_scale::{Hue, Stop};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyze::ContentAnalysis;
use crate::document::TokenDocument;
use crate::naming::NamingConfig;
use crate::path::{LogicalPath, PathShape};

/// Where a target coordinate's identifier comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationSource {
    /// The prior document's name for this coordinate.
    From(String),
    /// Nothing to carry over.
    New,
}

/// Which half of a migration map an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapKind {
    Shade,
    Hue,
}

/// A source name claimed by more than one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSource {
    pub kind: MapKind,
    pub source: String,
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationMap {
    pub shades: IndexMap<String, MigrationSource>,
    pub hues: IndexMap<String, MigrationSource>,
}

impl MigrationMap {
    /// Source name for a target shade. Unmapped targets map to themselves.
    #[must_use]
    pub fn shade_source<'a>(&'a self, target: &'a str) -> Option<&'a str> {
        resolve(&self.shades, target)
    }

    /// Source name for a target hue. Unmapped targets map to themselves.
    #[must_use]
    pub fn hue_source<'a>(&'a self, target: &'a str) -> Option<&'a str> {
        resolve(&self.hues, target)
    }

    /// Sources claimed by more than one target. Both targets still emit,
    /// each carrying the same identifier; this is only reported.
    #[must_use]
    pub fn duplicate_sources(&self) -> Vec<DuplicateSource> {
        let mut out = duplicates(MapKind::Shade, &self.shades);
        out.extend(duplicates(MapKind::Hue, &self.hues));
        out
    }

    /// Propose a map from an analyzed prior document.
    ///
    /// Each target tries an exact match, then a case and punctuation
    /// insensitive match, then the gray/grey swap. Shades fall back to
    /// position when both sides have the same count.
    #[must_use]
    pub fn suggest(analysis: &ContentAnalysis, stops: &[Stop], hues: &[Hue]) -> Self {
        let source_shades = analysis.shade_names();
        let source_hues = analysis.hue_names();
        let positional = stops.len() == source_shades.len();

        let shades = stops
            .iter()
            .enumerate()
            .map(|(i, stop)| {
                let source = match_name(&stop.name, &source_shades)
                    .or_else(|| positional.then(|| source_shades[i].clone()))
                    .map_or(MigrationSource::New, MigrationSource::From);
                (stop.name.clone(), source)
            })
            .collect();

        let hues = hues
            .iter()
            .map(|hue| {
                let source = match_name(&hue.name, &source_hues)
                    .map_or(MigrationSource::New, MigrationSource::From);
                (hue.name.clone(), source)
            })
            .collect();

        Self { shades, hues }
    }
}

fn resolve<'a>(map: &'a IndexMap<String, MigrationSource>, target: &'a str) -> Option<&'a str> {
    match map.get(target) {
        Some(MigrationSource::From(source)) => Some(source.as_str()),
        Some(MigrationSource::New) => None,
        None => Some(target),
    }
}

fn duplicates(kind: MapKind, map: &IndexMap<String, MigrationSource>) -> Vec<DuplicateSource> {
    let mut claimed: IndexMap<&str, Vec<String>> = IndexMap::new();
    for (target, source) in map {
        if let MigrationSource::From(source) = source {
            claimed.entry(source.as_str()).or_default().push(target.clone());
        }
    }
    claimed
        .into_iter()
        .filter(|(_, targets)| targets.len() > 1)
        .map(|(source, targets)| DuplicateSource {
            kind,
            source: source.to_owned(),
            targets,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Name matching
// ---------------------------------------------------------------------------

/// The other spelling of gray/grey, if `name` contains either.
#[must_use]
pub fn swap_gray_spelling(name: &str) -> Option<String> {
    const PAIRS: [(&str, &str); 3] = [("gray", "grey"), ("Gray", "Grey"), ("GRAY", "GREY")];
    for (a, b) in PAIRS {
        if name.contains(a) {
            return Some(name.replace(a, b));
        }
        if name.contains(b) {
            return Some(name.replace(b, a));
        }
    }
    None
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn match_name(target: &str, sources: &[String]) -> Option<String> {
    if let Some(hit) = sources.iter().find(|s| *s == target) {
        return Some(hit.clone());
    }
    let norm = normalize(target);
    if let Some(hit) = sources.iter().find(|s| normalize(s) == norm) {
        return Some(hit.clone());
    }
    let swapped = normalize(&swap_gray_spelling(target)?);
    sources.iter().find(|s| normalize(s) == swapped).cloned()
}

// ---------------------------------------------------------------------------
// Identifier lookup
// ---------------------------------------------------------------------------

/// Try each candidate key path in order and return the first identifier.
#[must_use]
pub fn first_id<I, P>(prior: &TokenDocument, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = P>,
    P: AsRef<[String]>,
{
    candidates
        .into_iter()
        .find_map(|keys| prior.variable_id(keys.as_ref()).map(str::to_owned))
}

/// Key paths a prior palette document may use for a primitive:
/// nested legacy (`blue/500`), flat (`--blue-500`), then the same two with
/// gray/grey swapped.
#[must_use]
pub fn palette_candidates(hue: &str, shade: &str, alpha: Option<u8>) -> Vec<Vec<String>> {
    let mut spellings = vec![hue.to_owned()];
    spellings.extend(swap_gray_spelling(hue));

    let mut out = Vec::new();
    for hue in &spellings {
        let mut nested = vec![hue.clone(), shade.to_owned()];
        let mut flat = vec![format!("--{hue}-{shade}")];
        if let Some(a) = alpha {
            nested.push(a.to_string());
            flat.push(a.to_string());
            out.push(nested);
            out.push(flat);
            out.push(vec![format!("--{hue}-{shade}/{a}")]);
        } else {
            out.push(nested);
            out.push(flat);
        }
    }
    out
}

/// Key paths a prior semantic document may use for `path`: every
/// foreground style (configured first) × shade shape (group, legacy step,
/// flat) × spelling (as-is, gray/grey swapped).
#[must_use]
pub fn semantic_candidates(path: &LogicalPath, naming: &NamingConfig) -> Vec<Vec<String>> {
    let swapped = path.map_names(|n| swap_gray_spelling(n).unwrap_or_else(|| n.to_owned()));
    let spellings = if swapped == *path { vec![path.clone()] } else { vec![path.clone(), swapped] };

    let mut out: Vec<Vec<String>> = Vec::new();
    for shape in PathShape::candidates(naming) {
        for spelling in &spellings {
            let keys = spelling.keys_with(naming, shape);
            if !out.contains(&keys) {
                out.push(keys);
            }
        }
    }
    out
}

/// Identifier for a semantic token whose source coordinate is `source`.
#[must_use]
pub fn semantic_id(
    prior: Option<&TokenDocument>,
    naming: &NamingConfig,
    source: Option<&LogicalPath>,
) -> Option<String> {
    let (prior, source) = (prior?, source?);
    let id = first_id(prior, semantic_candidates(source, naming));
    if id.is_none() {
        debug!(path = %source.code_name(naming), "no prior identifier");
    }
    id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;
    use pretty_assertions::assert_eq;

    fn from(s: &str) -> MigrationSource {
        MigrationSource::From(s.into())
    }

    // ── Map resolution ──────────────────────────────────────────────

    #[test]
    fn unmapped_targets_are_identity() {
        let map = MigrationMap {
            shades: [("550".to_owned(), MigrationSource::New), ("600".to_owned(), from("500"))]
                .into_iter()
                .collect(),
            ..MigrationMap::default()
        };
        assert_eq!(map.shade_source("100"), Some("100"));
        assert_eq!(map.shade_source("550"), None);
        assert_eq!(map.shade_source("600"), Some("500"));
        assert_eq!(map.hue_source("blue"), Some("blue"));
    }

    #[test]
    fn duplicates_are_reported() {
        let map = MigrationMap {
            hues: [
                ("sky".to_owned(), from("blue")),
                ("azure".to_owned(), from("blue")),
                ("red".to_owned(), from("red")),
            ]
            .into_iter()
            .collect(),
            ..MigrationMap::default()
        };
        assert_eq!(
            map.duplicate_sources(),
            vec![DuplicateSource {
                kind: MapKind::Hue,
                source: "blue".into(),
                targets: vec!["sky".into(), "azure".into()],
            }]
        );
    }

    #[test]
    fn sources_deserialize_from_both_shapes() {
        let map: MigrationMap =
            serde_json::from_str(r#"{"shades":{"550":"new","600":{"from":"500"}}}"#).unwrap();
        assert_eq!(map.shades["550"], MigrationSource::New);
        assert_eq!(map.shades["600"], from("500"));
    }

    // ── Suggestion ──────────────────────────────────────────────────

    #[test]
    fn suggest_matches_by_name_then_position() {
        let analysis = analyze(
            r##"{
                "--Grey-100": { "$value": "#eeeeee" },
                "--Grey-900": { "$value": "#111111" },
                "--Sky_Blue-100": { "$value": "#eeeeff" }
            }"##,
            &NamingConfig::default(),
        )
        .unwrap();
        let stops = vec![Stop::new("50", 95.0, 0.0), Stop::new("900", 20.0, 0.0)];
        let hues = vec![Hue::new("gray", 0.0), Hue::new("sky-blue", 230.0), Hue::new("lime", 130.0)];

        let map = MigrationMap::suggest(&analysis, &stops, &hues);
        assert_eq!(map.shades["50"], from("100"));
        assert_eq!(map.shades["900"], from("900"));
        assert_eq!(map.hues["gray"], from("Grey"));
        assert_eq!(map.hues["sky-blue"], from("Sky_Blue"));
        assert_eq!(map.hues["lime"], MigrationSource::New);
    }

    #[test]
    fn suggest_without_positional_fallback() {
        let analysis = analyze(r##"{ "--blue-100": { "$value": "#eeeeff" } }"##, &NamingConfig::default()).unwrap();
        let stops = vec![Stop::new("50", 95.0, 0.0), Stop::new("100", 90.0, 0.0)];
        let map = MigrationMap::suggest(&analysis, &stops, &[]);
        assert_eq!(map.shades["50"], MigrationSource::New);
        assert_eq!(map.shades["100"], from("100"));
    }

    // ── Candidates ──────────────────────────────────────────────────

    #[test]
    fn gray_spelling_swaps_both_ways() {
        assert_eq!(swap_gray_spelling("cool-gray").as_deref(), Some("cool-grey"));
        assert_eq!(swap_gray_spelling("Grey").as_deref(), Some("Gray"));
        assert_eq!(swap_gray_spelling("blue"), None);
    }

    #[test]
    fn palette_candidate_order() {
        let c = palette_candidates("gray", "500", None);
        assert_eq!(
            c,
            vec![
                vec!["gray".to_owned(), "500".to_owned()],
                vec!["--gray-500".to_owned()],
                vec!["grey".to_owned(), "500".to_owned()],
                vec!["--grey-500".to_owned()],
            ]
        );
    }

    #[test]
    fn semantic_candidates_cover_all_shapes() {
        let naming = NamingConfig::default();
        let path = LogicalPath::foreground("gray").shade("500");
        let c = semantic_candidates(&path, &naming);
        assert_eq!(c[0], vec!["on-gray", "shade", "500"]);
        assert!(c.contains(&vec!["on".to_owned(), "grey".to_owned(), "step".to_owned(), "500".to_owned()]));
        assert!(c.contains(&vec!["on-gray".to_owned(), "500".to_owned()]));
        assert_eq!(c.len(), 12);
    }

    #[test]
    fn first_hit_wins_and_misses_are_none() {
        let prior = TokenDocument::parse(
            r#"{
                "primary": { "step": { "500": {
                    "$value": "{--blue-500}",
                    "$extensions": { "com.figma.variableId": "VariableID:9:9" }
                } } }
            }"#,
        )
        .unwrap();
        let naming = NamingConfig::default();
        let found = LogicalPath::name("primary").shade("500");
        let missing = LogicalPath::name("primary").shade("600");
        assert_eq!(semantic_id(Some(&prior), &naming, Some(&found)).as_deref(), Some("VariableID:9:9"));
        assert_eq!(semantic_id(Some(&prior), &naming, Some(&missing)), None);
        assert_eq!(semantic_id(None, &naming, Some(&found)), None);
        assert_eq!(semantic_id(Some(&prior), &naming, None), None);
    }
}
