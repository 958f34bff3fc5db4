// SPDX-License-Identifier: MIT

//! Palette flavor: one flat primitive per (hue, shade).
//!
//! Every primitive is a literal, hidden from the design tool's pickers
//! (empty scope list) and reachable only through aliases. Alpha variants
//! nest under their primitive, so `--blue-500` becomes a group with a
//! `$root` value when alphas are configured.

use n_scale::Palette;
use tracing::debug;

use super::Swatch;
use crate::analyze::Prior;
use crate::config::EmitConfig;
use crate::document::{Token, TokenDocument, TokenExtensions};
use crate::migrate::{MigrationMap, first_id, palette_candidates};
use crate::scope::VariableScopes;

/// Key of the flat primitive for (hue, shade).
#[must_use]
pub fn primitive_key(hue: &str, shade: &str) -> String {
    format!("--{hue}-{shade}")
}

/// Build the palette document.
///
/// `prior` supplies identifiers only. A malformed or missing prior
/// document behaves the same: every primitive is new.
#[must_use]
pub fn emit_palette(
    palette: &Palette,
    config: &EmitConfig,
    prior: Option<&Prior>,
    migration: &MigrationMap,
) -> TokenDocument {
    let mut doc = TokenDocument::new();

    for row in &palette.rows {
        let hue = row.hue.name.as_str();
        let source_hue = migration.hue_source(hue);

        for (stop, cell) in palette.stops.iter().zip(&row.cells) {
            let swatch = Swatch::from_cell(cell);
            let key = primitive_key(hue, &stop.name);
            let source = source_hue.zip(migration.shade_source(&stop.name));

            let id = lookup(prior, source, None);
            doc.insert(&[key.as_str()], primitive(&swatch, 100, config, id));

            for alpha in config.alphas.palette.iter() {
                let id = lookup(prior, source, Some(alpha));
                let alpha_key = alpha.to_string();
                doc.insert(&[key.as_str(), alpha_key.as_str()], primitive(&swatch, alpha, config, id));
            }
        }
    }

    doc.set_mode_name(&config.palette_mode_name);
    doc
}

fn primitive(swatch: &Swatch, alpha: u8, config: &EmitConfig, id: Option<String>) -> Token {
    let mut token = Token::color(swatch.value(alpha, config.color_space));
    token.extensions = TokenExtensions {
        variable_id: id,
        scopes: Some(VariableScopes::PRIMITIVE),
        ..TokenExtensions::default()
    };
    token
}

fn lookup(prior: Option<&Prior>, source: Option<(&str, &str)>, alpha: Option<u8>) -> Option<String> {
    let (prior, (hue, shade)) = (prior?, source?);
    let id = first_id(&prior.document, palette_candidates(hue, shade, alpha));
    if id.is_none() {
        debug!(hue, shade, ?alpha, "new primitive");
    }
    id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{TokenType, TokenValue};
    use crate::migrate::MigrationSource;
    use crate::naming::NamingConfig;
    use n_scale::{AlphaSet, Hue, Stop};
    use pretty_assertions::assert_eq;

    fn palette() -> Palette {
        let stops = vec![
            Stop::new("0", 100.0, 0.0),
            Stop::new("500", 55.0, 0.18),
            Stop::new("1000", 0.0, 0.0),
        ];
        let hues = vec![Hue::new("gray", 0.0), Hue::new("blue", 250.0)];
        Palette::build(&stops, &hues)
    }

    fn prior(text: &str) -> Prior {
        Prior::load(text, &NamingConfig::default()).unwrap()
    }

    fn hex(doc: &TokenDocument, path: &[&str]) -> String {
        match &doc.token(path).unwrap().value {
            TokenValue::Color(c) => c.hex.clone(),
            other => panic!("expected a literal, got {other:?}"),
        }
    }

    // ── Fresh export ────────────────────────────────────────────────

    #[test]
    fn fresh_export_is_six_literals_without_ids() {
        let doc = emit_palette(&palette(), &EmitConfig::default(), None, &MigrationMap::default());
        let tokens = doc.tokens();

        let keys: Vec<String> = tokens.iter().map(|(path, _)| path.join("/")).collect();
        assert_eq!(
            keys,
            vec!["--gray-0", "--gray-500", "--gray-1000", "--blue-0", "--blue-500", "--blue-1000"]
        );
        for (_, token) in &tokens {
            assert_eq!(token.kind, TokenType::Color);
            assert!(matches!(token.value, TokenValue::Color(_)));
            assert_eq!(token.variable_id(), None);
            assert_eq!(token.extensions.scopes, Some(VariableScopes::PRIMITIVE));
        }

        assert_eq!(hex(&doc, &["--gray-0"]), "#ffffff");
        assert_eq!(hex(&doc, &["--gray-1000"]), "#000000");
        assert_eq!(doc.mode_name(), Some("Value"));
    }

    #[test]
    fn alpha_variants_nest_under_primitive() {
        let config = EmitConfig {
            alphas: crate::config::AlphaConfig {
                palette: AlphaSet::parse("15,50").unwrap(),
                ..Default::default()
            },
            ..EmitConfig::default()
        };
        let doc = emit_palette(&palette(), &config, None, &MigrationMap::default());
        let value = doc.to_value();

        assert_eq!(value["--blue-500"]["$root"]["$value"]["alpha"], serde_json::json!(1.0));
        assert_eq!(value["--blue-500"]["15"]["$value"]["alpha"], serde_json::json!(0.15));
        assert_eq!(value["--blue-500"]["50"]["$value"]["hex"], value["--blue-500"]["$root"]["$value"]["hex"]);
        assert_eq!(doc.tokens().len(), 18);
    }

    // ── Migration ───────────────────────────────────────────────────

    #[test]
    fn ids_carry_over_from_every_prior_shape() {
        let prior = prior(
            r##"{
                "gray": { "0": { "$value": "#fff", "$extensions": { "com.figma.variableId": "legacy" } } },
                "--grey-500": { "$value": "#777", "$extensions": { "com.figma.variableId": "spelled" } },
                "--blue-1000": { "$value": "#000", "$extensions": { "com.figma.variableId": "flat" } }
            }"##,
        );
        let doc = emit_palette(&palette(), &EmitConfig::default(), Some(&prior), &MigrationMap::default());

        assert_eq!(doc.variable_id(&["--gray-0"]), Some("legacy"));
        assert_eq!(doc.variable_id(&["--gray-500"]), Some("spelled"));
        assert_eq!(doc.variable_id(&["--blue-1000"]), Some("flat"));
        assert_eq!(doc.variable_id(&["--blue-0"]), None);
    }

    #[test]
    fn renamed_and_new_coordinates() {
        let prior = prior(
            r##"{
                "--azure-600": { "$value": "#00f", "$extensions": { "com.figma.variableId": "renamed" } },
                "--gray-0": { "$value": "#fff", "$extensions": { "com.figma.variableId": "kept" } }
            }"##,
        );
        let migration = MigrationMap {
            shades: [
                ("500".to_owned(), MigrationSource::From("600".into())),
                ("0".to_owned(), MigrationSource::New),
            ]
            .into_iter()
            .collect(),
            hues: [("blue".to_owned(), MigrationSource::From("azure".into()))].into_iter().collect(),
        };
        let doc = emit_palette(&palette(), &EmitConfig::default(), Some(&prior), &migration);

        assert_eq!(doc.variable_id(&["--blue-500"]), Some("renamed"));
        // Mapped to "new": the old id is not reused.
        assert_eq!(doc.variable_id(&["--gray-0"]), None);
        // Source coordinate missing from the prior document.
        assert_eq!(doc.variable_id(&["--gray-500"]), None);
    }

    #[test]
    fn p3_components_keep_srgb_hex() {
        let config = EmitConfig {
            color_space: crate::document::ColorSpace::DisplayP3,
            ..EmitConfig::default()
        };
        let doc = emit_palette(&palette(), &config, None, &MigrationMap::default());
        assert_eq!(hex(&doc, &["--blue-500"]), "#0072d5");
        let value = doc.to_value();
        assert_eq!(value["--blue-500"]["$value"]["colorSpace"], serde_json::json!("display-p3"));
    }
}
