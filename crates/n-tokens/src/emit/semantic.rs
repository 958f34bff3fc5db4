// SPDX-License-Identifier: MIT

//! Semantic flavor: one document per mode.
//!
//! Built in a fixed order:
//!
//! 1. mode leaf
//! 2. grounds, one per elevation
//! 3. on-grounds
//! 4. stark and on-stark
//! 5. black and white
//! 6. intents, then every palette hue that isn't an intent
//!
//! Per-shade entries alias the flat palette so palette edits propagate
//! without a re-export. Everything with an alpha below 100 is a literal.
//!
//! In dark mode with reversal on, a shade *reference* resolves to the
//! mirrored stop: `primary/shade/100` keeps its key but aliases
//! `--blue-900`, derives its on-color from that cell, and looks up its
//! prior identifier at the mirrored coordinate.

use n_color::color::{Oklch, parse_css_color};
use n_scale::{AlphaSet, Palette};
use serde_json::Map;
use tracing::{debug, warn};

use super::Swatch;
use super::palette::primitive_key;
use crate::analyze::Prior;
use crate::config::{EmitConfig, GroundSource, Mode, OnGroundSource};
use crate::document::{AliasData, Token, TokenDocument, TokenExtensions, TokenType, TokenValue};
use crate::migrate::{MigrationMap, semantic_id};
use crate::naming::NamingConfig;
use crate::path::LogicalPath;
use crate::scope::VariableScopes;

/// Intent whose ramp theme grounds alias into.
pub const NEUTRAL: &str = "neutral";

const STARK: &str = "stark";
const BLACK: &str = "black";
const WHITE: &str = "white";

/// Build the semantic document for `mode`.
///
/// `prior` supplies identifiers only; `None` means every token is new.
#[must_use]
pub fn emit_semantic(
    palette: &Palette,
    mode: Mode,
    config: &EmitConfig,
    prior: Option<&Prior>,
    migration: &MigrationMap,
) -> TokenDocument {
    let mut emitter = Emitter {
        palette,
        mode,
        config,
        naming: &config.naming,
        prior: prior.map(|p| &p.document),
        migration,
        doc: TokenDocument::new(),
    };

    emitter.mode_leaf();
    emitter.grounds();
    emitter.stark();
    emitter.utility(BLACK, Swatch::from_oklch(Oklch::gray(0.0)));
    emitter.utility(WHITE, Swatch::from_oklch(Oklch::gray(100.0)));
    emitter.colors();

    emitter.doc.set_mode_name(mode.label());
    emitter.doc
}

// ---------------------------------------------------------------------------
// Fills
// ---------------------------------------------------------------------------

/// An alias target with its cross-collection data, if any.
#[derive(Debug, Clone)]
struct AliasTarget {
    keys: Vec<String>,
    data: Option<AliasData>,
}

impl AliasTarget {
    fn collection(collection: &str, keys: Vec<String>) -> Self {
        Self {
            data: Some(AliasData {
                target_variable_set_name: collection.to_owned(),
                target_variable_name: keys.join("/"),
            }),
            keys,
        }
    }

    fn local(keys: Vec<String>) -> Self {
        Self { keys, data: None }
    }

    fn value(&self) -> (TokenValue, Option<AliasData>) {
        (TokenValue::alias(&self.keys), self.data.clone())
    }
}

/// A color with an optional alias to use in place of the opaque literal.
#[derive(Debug, Clone)]
struct Fill {
    swatch: Swatch,
    alias: Option<AliasTarget>,
}

impl Fill {
    const fn literal(swatch: Swatch) -> Self {
        Self { swatch, alias: None }
    }

    /// The alias at full opacity when there is one, otherwise a literal.
    fn value(&self, alpha: u8, config: &EmitConfig) -> (TokenValue, Option<AliasData>) {
        match &self.alias {
            Some(target) if alpha == 100 => target.value(),
            _ => (TokenValue::Color(self.swatch.value(alpha, config.color_space)), None),
        }
    }
}

fn mid_gray() -> Swatch {
    Swatch::from_oklch(Oklch::gray(50.0))
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

struct Emitter<'a> {
    palette: &'a Palette,
    mode: Mode,
    config: &'a EmitConfig,
    naming: &'a NamingConfig,
    prior: Option<&'a TokenDocument>,
    migration: &'a MigrationMap,
    doc: TokenDocument,
}

impl<'a> Emitter<'a> {
    /// Insert one token at `path`, carrying the identifier found at
    /// `source` in the prior document.
    fn put(
        &mut self,
        path: &LogicalPath,
        (value, alias_data): (TokenValue, Option<AliasData>),
        scopes: VariableScopes,
        source: Option<&LogicalPath>,
    ) {
        let token = Token {
            kind: TokenType::Color,
            value,
            extensions: TokenExtensions {
                variable_id: semantic_id(self.prior, self.naming, source),
                scopes: Some(scopes),
                code_syntax: Some(path.web_code_syntax(self.naming)),
                alias_data,
                other: Map::new(),
            },
        };
        self.doc.insert(&path.keys(self.naming), token);
    }

    /// One entry per alpha under `base`.
    fn ramp(
        &mut self,
        base: &LogicalPath,
        source: Option<&LogicalPath>,
        fill: &Fill,
        alphas: &AlphaSet,
        scopes: VariableScopes,
    ) {
        for alpha in alphas.iter() {
            let path = base.clone().alpha(alpha);
            let source = source.map(|s| s.clone().alpha(alpha));
            self.put(&path, fill.value(alpha, self.config), scopes, source.as_ref());
        }
    }

    /// `$root` of a ramp: alias to its 100% entry when one exists.
    fn ramp_root(
        &mut self,
        base: &LogicalPath,
        source: Option<&LogicalPath>,
        fill: &Fill,
        alphas: &AlphaSet,
        scopes: VariableScopes,
    ) {
        let value = if alphas.contains(100) {
            AliasTarget::local(base.clone().alpha(100).alias_target(self.naming)).value()
        } else {
            fill.value(100, self.config)
        };
        let source = source.map(|s| s.clone().root());
        self.put(&base.clone().root(), value, scopes, source.as_ref());
    }

    /// `$root` aliasing `{<base>.<shadeGroup?>.<shade>}`.
    fn shade_root(&mut self, base: &LogicalPath, source: Option<&LogicalPath>, shade: &str, scopes: VariableScopes) {
        let target = AliasTarget::local(base.clone().shade(shade).alias_target(self.naming));
        let source = source.map(|s| s.clone().root());
        self.put(&base.clone().root(), target.value(), scopes, source.as_ref());
    }

    fn reference_shade(&self, shade: &'a str) -> &'a str {
        self.config.reference_shade(self.palette, self.mode, shade)
    }

    /// Prior coordinate for a shade reference: mirrored in dark mode, then
    /// mapped through the migration table.
    fn source_shade(&self, shade: &'a str) -> Option<&'a str> {
        self.migration.shade_source(self.reference_shade(shade))
    }

    /// Root alphas for `name`, minus those whose key a shade also claims.
    /// Only flat shade grouping puts shades and alphas side by side.
    fn root_alphas(&self, name: &str, alphas: &AlphaSet) -> AlphaSet {
        if self.naming.shade_group_key().is_some() {
            return alphas.clone();
        }
        alphas
            .iter()
            .filter(|alpha| {
                let collides = self.palette.stop_index(&alpha.to_string()).is_some();
                if collides {
                    warn!(name, alpha, "alpha key collides with a shade under flat grouping, skipping");
                }
                !collides
            })
            .collect()
    }

    fn palette_alias(&self, hue: &str, shade: &str) -> AliasTarget {
        AliasTarget::collection(&self.config.palette_collection, vec![primitive_key(hue, shade)])
    }

    // -- 1. Mode ------------------------------------------------------------

    fn mode_leaf(&mut self) {
        let key = self.naming.mode_key.as_str();
        let mut token = Token::text(self.mode.label());
        token.extensions.scopes = Some(VariableScopes::ALL_SCOPES);
        token.extensions.variable_id = self
            .prior
            .and_then(|prior| prior.variable_id(&[key]))
            .map(str::to_owned);
        self.doc.insert(&[key], token);
    }

    // -- 2, 3. Grounds ------------------------------------------------------

    fn grounds(&mut self) {
        let config = self.config;
        let alphas = &config.alphas;

        let mut fills = Vec::with_capacity(config.grounds.len());
        for (i, ground) in config.grounds.iter().enumerate() {
            let path = LogicalPath::name(self.naming.elevation_name(i));
            let fill = self.ground_fill(&ground.for_mode(self.mode).ground);
            self.ramp(&path, Some(&path), &fill, &alphas.grounds, VariableScopes::SURFACE);
            self.ramp_root(&path, Some(&path), &fill, &alphas.grounds, VariableScopes::SURFACE);
            fills.push(fill);
        }

        for (i, (ground, fill)) in config.grounds.iter().zip(&fills).enumerate() {
            let path = LogicalPath::foreground(self.naming.elevation_name(i));
            let on = self.on_ground_fill(&ground.for_mode(self.mode).on_ground, &fill.swatch);
            self.ramp(&path, Some(&path), &on, &alphas.on_grounds, VariableScopes::FOREGROUND);
            self.ramp_root(&path, Some(&path), &on, &alphas.on_grounds, VariableScopes::FOREGROUND);
        }
    }

    fn ground_fill(&self, source: &'a GroundSource) -> Fill {
        match source {
            GroundSource::Primitive { hue, shade } => {
                let resolved = self.reference_shade(shade);
                Fill {
                    swatch: self.palette.cell(hue, resolved).map_or_else(
                        || {
                            warn!(%hue, shade = resolved, "ground references a missing palette cell");
                            mid_gray()
                        },
                        Swatch::from_cell,
                    ),
                    alias: Some(self.palette_alias(hue, resolved)),
                }
            }
            GroundSource::Theme { shade } => {
                let resolved = self.reference_shade(shade);
                let cell = self
                    .config
                    .intents
                    .get(NEUTRAL)
                    .and_then(|hue| self.palette.cell(hue, resolved));
                let keys = LogicalPath::name(NEUTRAL).shade(shade.as_str()).alias_target(self.naming);
                Fill {
                    swatch: cell.map_or_else(
                        || {
                            warn!(%shade, "theme ground has no neutral cell");
                            mid_gray()
                        },
                        Swatch::from_cell,
                    ),
                    alias: Some(AliasTarget::collection(&self.config.theme_collection, keys)),
                }
            }
            GroundSource::Custom { color } => Fill::literal(parse_css_color(color).map_or_else(
                || {
                    debug!(%color, "unparseable custom ground, using mid gray");
                    mid_gray()
                },
                Swatch::from_css,
            )),
        }
    }

    fn on_ground_fill(&self, source: &'a OnGroundSource, ground: &Swatch) -> Fill {
        match source {
            OnGroundSource::Primitive { hue, shade } => {
                let resolved = self.reference_shade(shade);
                Fill {
                    swatch: self.palette.cell(hue, resolved).map_or_else(
                        || {
                            warn!(%hue, shade = resolved, "on-ground references a missing palette cell");
                            ground.on_color()
                        },
                        Swatch::from_cell,
                    ),
                    alias: Some(self.palette_alias(hue, resolved)),
                }
            }
            OnGroundSource::Black => Fill::literal(Swatch::from_oklch(Oklch::gray(0.0))),
            OnGroundSource::White => Fill::literal(Swatch::from_oklch(Oklch::gray(100.0))),
            OnGroundSource::Custom { color } => Fill::literal(parse_css_color(color).map_or_else(
                || {
                    debug!(%color, "unparseable custom on-ground, using black");
                    Swatch::from_oklch(Oklch::gray(0.0))
                },
                Swatch::from_css,
            )),
            OnGroundSource::Auto => Fill::literal(ground.on_color()),
        }
    }

    // -- 4. Stark -----------------------------------------------------------

    fn stark(&mut self) {
        self.stark_ramp(&LogicalPath::name(STARK), self.mode, VariableScopes::SURFACE);
        // On-stark is the other mode's stark.
        self.stark_ramp(&LogicalPath::foreground(STARK), self.mode.other(), VariableScopes::FOREGROUND);
    }

    fn stark_ramp(&mut self, base: &LogicalPath, mode: Mode, scopes: VariableScopes) {
        let config = self.config;
        let palette = self.palette;
        let swatch = |shade: &str| {
            config
                .stark
                .lightness(palette, mode, shade)
                .map(|l| Swatch::from_oklch(Oklch::gray(l)))
        };

        for stop in &palette.stops {
            let Some(color) = swatch(&stop.name) else { continue };
            let path = base.clone().shade(stop.name.as_str());
            let source = self
                .migration
                .shade_source(&stop.name)
                .map(|s| base.clone().shade(s));
            self.put(&path, Fill::literal(color).value(100, config), scopes, source.as_ref());
        }

        let default = config.stark_default_shade();
        let Some(color) = swatch(default) else {
            warn!(shade = default, "stark default shade is not a stop");
            return;
        };
        let fill = Fill::literal(color);
        let alphas = self.root_alphas(STARK, &config.alphas.stark);
        self.ramp(base, Some(base), &fill, &alphas, scopes);
        self.shade_root(base, Some(base), default, scopes);
    }

    // -- 5. Black and white -------------------------------------------------

    fn utility(&mut self, name: &str, swatch: Swatch) {
        let config = self.config;
        let path = LogicalPath::name(name);
        let fill = Fill::literal(swatch);
        self.ramp(&path, Some(&path), &fill, &config.alphas.utility, VariableScopes::SURFACE);
        let source = path.clone().root();
        self.put(&source, fill.value(100, config), VariableScopes::SURFACE, Some(&source));
    }

    // -- 6. Intents and hues ------------------------------------------------

    fn colors(&mut self) {
        let config = self.config;
        let palette = self.palette;

        for (intent, hue) in &config.intents {
            if palette.row(hue).is_none() {
                warn!(%intent, %hue, "intent hue is not in the palette");
                continue;
            }
            self.color_group(intent, hue, Some(intent.as_str()));
        }

        // A hue named like an intent was already emitted as the intent.
        for row in palette.rows.iter().filter(|row| !config.is_intent(&row.hue.name)) {
            let name = row.hue.name.as_str();
            self.color_group(name, name, self.migration.hue_source(name));
        }
    }

    /// Emit one intent or hue: root ramps, per-shade aliases and alphas,
    /// paired on-colors, then the `$root` entries.
    fn color_group(&mut self, name: &str, hue: &str, source_name: Option<&str>) {
        let config = self.config;
        let palette = self.palette;
        let alphas = &config.alphas;

        let default = config.default_shade.as_str();
        let resolved = self.reference_shade(default);
        let Some(cell) = palette.cell(hue, resolved) else {
            warn!(name, shade = default, "default shade is not a stop");
            return;
        };

        let path = LogicalPath::name(name);
        let source = source_name.map(LogicalPath::name);
        let on_path = LogicalPath::foreground(name);
        let on_source = source_name.map(LogicalPath::foreground);

        let base = Fill {
            swatch: Swatch::from_cell(cell),
            alias: Some(self.palette_alias(hue, resolved)),
        };
        let root_alphas = self.root_alphas(name, &alphas.intents);
        self.ramp(&path, source.as_ref(), &base, &root_alphas, VariableScopes::ACCENT);

        let on_base = Fill::literal(base.swatch.on_color());
        let on_root_alphas = self.root_alphas(name, &alphas.on_intents);
        self.ramp(&on_path, on_source.as_ref(), &on_base, &on_root_alphas, VariableScopes::FOREGROUND);

        for stop in &palette.stops {
            let shade = stop.name.as_str();
            let resolved = self.reference_shade(shade);
            let Some(cell) = palette.cell(hue, resolved) else { continue };
            let source_shade = self.source_shade(shade);

            let fill = Fill {
                swatch: Swatch::from_cell(cell),
                alias: Some(self.palette_alias(hue, resolved)),
            };
            let shade_path = path.clone().shade(shade);
            let shade_source = source.clone().zip(source_shade).map(|(s, sh)| s.shade(sh));
            self.put(&shade_path, fill.value(100, config), VariableScopes::ACCENT, shade_source.as_ref());
            self.ramp(&shade_path, shade_source.as_ref(), &fill, &alphas.shades, VariableScopes::ACCENT);

            let on = Fill::literal(fill.swatch.on_color());
            let on_shade_path = on_path.clone().shade(shade);
            let on_shade_source = on_source.clone().zip(source_shade).map(|(s, sh)| s.shade(sh));
            self.put(&on_shade_path, on.value(100, config), VariableScopes::FOREGROUND, on_shade_source.as_ref());
            self.ramp(&on_shade_path, on_shade_source.as_ref(), &on, &alphas.on_shades, VariableScopes::FOREGROUND);
        }

        self.shade_root(&path, source.as_ref(), default, VariableScopes::ACCENT);
        self.shade_root(&on_path, on_source.as_ref(), default, VariableScopes::FOREGROUND);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GroundConfig, GroundMode};
    use crate::migrate::MigrationSource;
    use n_scale::{Hue, Stop};
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

    fn config() -> EmitConfig {
        let mut config = EmitConfig::default();
        config.intents = [("primary", "blue"), ("neutral", "gray")]
            .into_iter()
            .map(|(a, b)| (a.to_owned(), b.to_owned()))
            .collect();
        config.grounds = vec![GroundConfig::theme("0")];
        config
    }

    fn emit(mode: Mode, config: &EmitConfig) -> TokenDocument {
        emit_semantic(&palette(), mode, config, None, &MigrationMap::default())
    }

    fn value<'d>(doc: &'d TokenDocument, path: &[&str]) -> &'d TokenValue {
        &doc.token(path).unwrap_or_else(|| panic!("missing {path:?}")).value
    }

    fn alias(target: &str) -> TokenValue {
        TokenValue::Alias(target.to_owned())
    }

    fn hex(doc: &TokenDocument, path: &[&str]) -> String {
        match value(doc, path) {
            TokenValue::Color(c) => c.hex.clone(),
            other => panic!("expected a literal at {path:?}, got {other:?}"),
        }
    }

    // ── Reversal ────────────────────────────────────────────────────

    #[test]
    fn dark_shades_alias_mirrored_cells() {
        let config = config();
        let light = emit(Mode::Light, &config);
        let dark = emit(Mode::Dark, &config);

        for (i, shade) in ["0", "500", "1000"].iter().enumerate() {
            let mirrored = ["1000", "500", "0"][i];
            assert_eq!(value(&light, &["primary", "shade", shade]), &alias(&format!("--blue-{shade}")));
            assert_eq!(value(&dark, &["primary", "shade", shade]), &alias(&format!("--blue-{mirrored}")));
        }
    }

    #[test]
    fn reversal_disabled_is_identity() {
        let config = EmitConfig {
            reverse_dark: false,
            ..config()
        };
        let dark = emit(Mode::Dark, &config);
        assert_eq!(value(&dark, &["primary", "shade", "0"]), &alias("--blue-0"));
        assert_eq!(value(&dark, &["blue", "shade", "1000"]), &alias("--blue-1000"));
    }

    #[test]
    fn per_shade_alias_carries_palette_collection() {
        let doc = emit(Mode::Light, &config());
        let ext = &doc.token(&["primary", "shade", "500"]).unwrap().extensions;
        assert_eq!(
            ext.alias_data,
            Some(AliasData {
                target_variable_set_name: "palette".into(),
                target_variable_name: "--blue-500".into(),
            })
        );
        assert_eq!(ext.scopes, Some(VariableScopes::ACCENT));
        assert_eq!(ext.code_syntax.as_deref(), Some("var(--primary-500)"));
    }

    // ── On-colors ───────────────────────────────────────────────────

    #[test]
    fn on_colors_follow_the_resolved_cell() {
        let config = config();
        let light = emit(Mode::Light, &config);
        let dark = emit(Mode::Dark, &config);

        assert_eq!(hex(&light, &["on-primary", "shade", "0"]), "#000000");
        assert_eq!(hex(&light, &["on-primary", "shade", "1000"]), "#ffffff");
        // Same key, mirrored cell.
        assert_eq!(hex(&dark, &["on-primary", "shade", "0"]), "#ffffff");
        assert_eq!(
            doc_scopes(&light, &["on-primary", "shade", "0"]),
            Some(VariableScopes::FOREGROUND)
        );
    }

    fn doc_scopes(doc: &TokenDocument, path: &[&str]) -> Option<VariableScopes> {
        doc.token(path).unwrap().extensions.scopes
    }

    // ── Roots and ramps ─────────────────────────────────────────────

    #[test]
    fn roots_alias_the_default_shade() {
        let doc = emit(Mode::Light, &config());
        assert_eq!(value(&doc, &["primary"]), &alias("primary.shade.500"));
        assert_eq!(value(&doc, &["on-primary"]), &alias("on-primary.shade.500"));
        assert_eq!(value(&doc, &["stark"]), &alias("stark.shade.500"));
        assert_eq!(
            doc.token(&["on-primary"]).unwrap().extensions.code_syntax.as_deref(),
            Some("var(--on-primary)")
        );
    }

    #[test]
    fn full_alpha_root_ramp_is_an_alias() {
        let mut config = config();
        config.alphas.intents = AlphaSet::parse("15,100").unwrap();
        let doc = emit(Mode::Dark, &config);
        assert_eq!(value(&doc, &["primary", "100"]), &alias("--blue-500"));
        assert!(matches!(value(&doc, &["primary", "15"]), TokenValue::Color(c) if (c.alpha - 0.15).abs() < 1e-12));
        assert_eq!(
            doc.token(&["primary", "15"]).unwrap().extensions.code_syntax.as_deref(),
            Some("var(--primary/15)")
        );
    }

    #[test]
    fn dark_root_ramp_uses_reversed_default_shade() {
        let config = EmitConfig {
            default_shade: "0".into(),
            ..config()
        };
        let dark = emit(Mode::Dark, &config);
        assert_eq!(value(&dark, &["primary", "100"]), &alias("--blue-1000"));
        assert_eq!(hex(&dark, &["on-primary", "100"]), "#ffffff");
        // The root still names the shade key, not the cell.
        assert_eq!(value(&dark, &["primary"]), &alias("primary.shade.0"));

        let light = emit(Mode::Light, &config);
        assert_eq!(value(&light, &["primary", "100"]), &alias("--blue-0"));
        assert_eq!(hex(&light, &["on-primary", "100"]), "#000000");
    }

    #[test]
    fn flat_grouping_keeps_shades_over_colliding_alphas() {
        let palette = Palette::build(
            &[
                Stop::new("100", 95.0, 0.02),
                Stop::new("500", 55.0, 0.18),
                Stop::new("900", 20.0, 0.05),
            ],
            &[Hue::new("gray", 0.0), Hue::new("blue", 250.0)],
        );
        let mut config = config();
        config.naming.shade_grouping = crate::naming::ShadeGrouping::Flat;
        config.grounds.clear();
        config.alphas.intents = AlphaSet::parse("15,100").unwrap();

        let doc = emit_semantic(&palette, Mode::Light, &config, None, &MigrationMap::default());
        let token = doc.token(&["primary", "100"]).unwrap();
        assert_eq!(token.value, alias("--blue-100"));
        assert_eq!(token.extensions.code_syntax.as_deref(), Some("var(--primary-100)"));
        // Non-colliding root alphas are still emitted.
        assert!(matches!(value(&doc, &["primary", "15"]), TokenValue::Color(_)));
        assert_eq!(value(&doc, &["primary"]), &alias("primary.500"));
    }

    #[test]
    fn grouped_shades_keep_every_root_alpha() {
        let palette = Palette::build(
            &[Stop::new("100", 95.0, 0.02), Stop::new("900", 20.0, 0.05)],
            &[Hue::new("blue", 250.0)],
        );
        let mut config = config();
        config.default_shade = "900".into();
        config.grounds.clear();
        let doc = emit_semantic(&palette, Mode::Light, &config, None, &MigrationMap::default());
        assert_eq!(value(&doc, &["primary", "100"]), &alias("--blue-900"));
        assert_eq!(value(&doc, &["primary", "shade", "100"]), &alias("--blue-100"));
    }

    #[test]
    fn nested_foreground_naming() {
        let mut config = config();
        config.naming.foreground = crate::naming::ForegroundStyle::Nested;
        let doc = emit(Mode::Light, &config);
        assert_eq!(hex(&doc, &["on", "primary", "shade", "0"]), "#000000");
        assert!(doc.token(&["on-primary"]).is_none());
    }

    // ── Grounds ─────────────────────────────────────────────────────

    #[test]
    fn theme_ground_aliases_neutral() {
        let config = config();
        let light = emit(Mode::Light, &config);
        let dark = emit(Mode::Dark, &config);

        assert_eq!(value(&light, &["ground", "100"]), &alias("neutral.shade.0"));
        assert_eq!(value(&light, &["ground"]), &alias("ground.100"));
        assert_eq!(
            light.token(&["ground", "100"]).unwrap().extensions.alias_data,
            Some(AliasData {
                target_variable_set_name: "theme".into(),
                target_variable_name: "neutral/shade/0".into(),
            })
        );
        // Auto on-ground reads the resolved neutral cell.
        assert_eq!(hex(&light, &["on-ground", "100"]), "#000000");
        assert_eq!(hex(&dark, &["on-ground", "100"]), "#ffffff");
    }

    #[test]
    fn custom_ground_is_never_aliased() {
        let mut config = config();
        config.grounds = vec![GroundConfig {
            light: GroundMode {
                ground: GroundSource::Custom { color: "#ffffff".into() },
                on_ground: OnGroundSource::Auto,
            },
            dark: GroundMode {
                ground: GroundSource::Custom { color: "not a color".into() },
                on_ground: OnGroundSource::White,
            },
        }];
        config.alphas.grounds = AlphaSet::parse("50,100").unwrap();

        let light = emit(Mode::Light, &config);
        assert_eq!(hex(&light, &["ground", "100"]), "#ffffff");
        assert_eq!(hex(&light, &["on-ground", "100"]), "#000000");
        assert_eq!(value(&light, &["ground"]), &alias("ground.100"));

        let dark = emit(Mode::Dark, &config);
        assert_eq!(hex(&dark, &["ground", "50"]), Swatch::from_oklch(Oklch::gray(50.0)).hex());
        assert_eq!(hex(&dark, &["on-ground", "100"]), "#ffffff");
    }

    #[test]
    fn primitive_grounds_follow_dark_reversal() {
        let mut config = config();
        let primitive = |shade: &str| GroundMode {
            ground: GroundSource::Primitive {
                hue: "gray".into(),
                shade: shade.into(),
            },
            on_ground: OnGroundSource::Auto,
        };
        config.grounds = vec![
            GroundConfig {
                light: primitive("0"),
                dark: primitive("0"),
            },
            GroundConfig {
                light: primitive("0"),
                dark: GroundMode {
                    on_ground: OnGroundSource::Primitive {
                        hue: "gray".into(),
                        shade: "1000".into(),
                    },
                    ..primitive("500")
                },
            },
        ];

        let light = emit(Mode::Light, &config);
        assert_eq!(value(&light, &["ground", "100"]), &alias("--gray-0"));
        assert_eq!(hex(&light, &["on-ground", "100"]), "#000000");

        let dark = emit(Mode::Dark, &config);
        assert_eq!(value(&dark, &["ground", "100"]), &alias("--gray-1000"));
        assert_eq!(hex(&dark, &["on-ground", "100"]), "#ffffff");
        assert_eq!(value(&dark, &["ground1", "100"]), &alias("--gray-500"));
        assert_eq!(value(&dark, &["on-ground1", "100"]), &alias("--gray-0"));

        let fixed = EmitConfig {
            reverse_dark: false,
            ..config
        };
        let dark = emit(Mode::Dark, &fixed);
        assert_eq!(value(&dark, &["ground", "100"]), &alias("--gray-0"));
    }

    #[test]
    fn elevations_are_named_from_the_template() {
        let mut config = config();
        config.grounds = vec![GroundConfig::theme("0"), GroundConfig::theme("500")];
        let doc = emit(Mode::Light, &config);
        assert_eq!(value(&doc, &["ground1", "100"]), &alias("neutral.shade.500"));
        assert!(doc.token(&["on-ground1", "100"]).is_some());
    }

    // ── Stark and utilities ─────────────────────────────────────────

    #[test]
    fn on_stark_is_the_other_modes_stark() {
        let config = config();
        let light = emit(Mode::Light, &config);
        let dark = emit(Mode::Dark, &config);

        assert_eq!(hex(&light, &["stark", "shade", "0"]), "#ffffff");
        assert_eq!(hex(&dark, &["stark", "shade", "0"]), "#000000");
        assert_eq!(hex(&light, &["on-stark", "shade", "0"]), hex(&dark, &["stark", "shade", "0"]));
    }

    #[test]
    fn black_and_white_roots_are_literals() {
        let doc = emit(Mode::Light, &config());
        assert_eq!(hex(&doc, &["black"]), "#000000");
        assert_eq!(hex(&doc, &["white", "100"]), "#ffffff");
        assert_eq!(doc_scopes(&doc, &["white"]), Some(VariableScopes::SURFACE));
    }

    // ── Document shape ──────────────────────────────────────────────

    #[test]
    fn mode_leaf_and_marker() {
        let doc = emit(Mode::Dark, &config());
        let token = doc.token(&["mode"]).unwrap();
        assert_eq!(token.kind, TokenType::String);
        assert_eq!(token.value, TokenValue::Text("Dark".into()));
        assert_eq!(token.extensions.scopes, Some(VariableScopes::ALL_SCOPES));
        assert_eq!(doc.mode_name(), Some("Dark"));

        let first = doc.root.children.keys().next().map(String::as_str);
        assert_eq!(first, Some("mode"));
    }

    #[test]
    fn hue_named_like_an_intent_is_emitted_once() {
        let palette = Palette::build(
            &palette().stops,
            &[Hue::new("blue", 250.0), Hue::new("primary", 20.0), Hue::new("gray", 0.0)],
        );
        let doc = emit_semantic(&palette, Mode::Light, &config(), None, &MigrationMap::default());
        assert_eq!(value(&doc, &["primary", "shade", "0"]), &alias("--blue-0"));
        assert_eq!(value(&doc, &["blue", "shade", "0"]), &alias("--blue-0"));
        assert_eq!(value(&doc, &["gray", "shade", "500"]), &alias("--gray-500"));
    }

    #[test]
    fn missing_intent_hue_is_skipped() {
        let mut config = config();
        config.intents.insert("danger".into(), "red".into());
        let doc = emit(Mode::Light, &config);
        assert!(doc.node(&["danger"]).is_none());
        assert!(doc.node(&["primary"]).is_some());
    }

    // ── Migration ───────────────────────────────────────────────────

    fn prior(text: &str) -> Prior {
        Prior::load(text, &NamingConfig::default()).unwrap()
    }

    fn with_id(id: &str) -> String {
        format!(r#"{{ "$value": "{{x}}", "$extensions": {{ "com.figma.variableId": "{id}" }} }}"#)
    }

    #[test]
    fn ids_carry_over_from_prior_shapes() {
        let text = format!(
            r#"{{
                "mode": {},
                "primary": {{ "$root": {}, "step": {{ "500": {} }} }},
                "on": {{ "primary": {{ "shade": {{ "0": {} }} }} }},
                "grey": {{ "shade": {{ "1000": {} }} }}
            }}"#,
            with_id("m"),
            with_id("root"),
            with_id("p500"),
            with_id("on0"),
            with_id("g1000"),
        );
        let prior = prior(&text);
        let doc = emit_semantic(&palette(), Mode::Light, &config(), Some(&prior), &MigrationMap::default());

        assert_eq!(doc.variable_id(&["mode"]), Some("m"));
        assert_eq!(doc.variable_id(&["primary"]), Some("root"));
        assert_eq!(doc.variable_id(&["primary", "shade", "500"]), Some("p500"));
        assert_eq!(doc.variable_id(&["on-primary", "shade", "0"]), Some("on0"));
        assert_eq!(doc.variable_id(&["gray", "shade", "1000"]), Some("g1000"));
        assert_eq!(doc.variable_id(&["primary", "shade", "0"]), None);
    }

    #[test]
    fn dark_lookup_uses_mirrored_coordinate() {
        let text = format!(r#"{{ "primary": {{ "shade": {{ "1000": {} }} }} }}"#, with_id("p1000"));
        let prior = prior(&text);
        let doc = emit_semantic(&palette(), Mode::Dark, &config(), Some(&prior), &MigrationMap::default());
        assert_eq!(doc.variable_id(&["primary", "shade", "0"]), Some("p1000"));
        assert_eq!(doc.variable_id(&["primary", "shade", "1000"]), None);
    }

    #[test]
    fn migration_map_renames_and_drops() {
        let text = format!(
            r#"{{ "azure": {{ "shade": {{ "0": {} }} }}, "primary": {{ "shade": {{ "500": {} }} }} }}"#,
            with_id("az0"),
            with_id("p500"),
        );
        let prior = prior(&text);
        let migration = MigrationMap {
            hues: [("blue".to_owned(), MigrationSource::From("azure".into()))].into_iter().collect(),
            shades: [("500".to_owned(), MigrationSource::New)].into_iter().collect(),
        };
        let doc = emit_semantic(&palette(), Mode::Light, &config(), Some(&prior), &migration);

        assert_eq!(doc.variable_id(&["blue", "shade", "0"]), Some("az0"));
        assert_eq!(doc.variable_id(&["primary", "shade", "500"]), None);
    }

    #[test]
    fn shared_migration_source_feeds_both_targets() {
        let text = format!(r#"{{ "azure": {{ "shade": {{ "0": {} }} }} }}"#, with_id("AZ"));
        let prior = prior(&text);
        let migration = MigrationMap {
            hues: [
                ("blue".to_owned(), MigrationSource::From("azure".into())),
                ("gray".to_owned(), MigrationSource::From("azure".into())),
            ]
            .into_iter()
            .collect(),
            ..MigrationMap::default()
        };
        assert_eq!(migration.duplicate_sources().len(), 1);

        let doc = emit_semantic(&palette(), Mode::Light, &config(), Some(&prior), &migration);
        assert_eq!(doc.variable_id(&["blue", "shade", "0"]), Some("AZ"));
        assert_eq!(doc.variable_id(&["gray", "shade", "0"]), Some("AZ"));
    }

    #[test]
    fn deterministic() {
        let config = config();
        assert_eq!(emit(Mode::Dark, &config), emit(Mode::Dark, &config));
    }
}
