// SPDX-License-Identifier: MIT
//
// n-palette — OKLCH palette generator with design-token export.
//
// This is the main binary that wires together all the crates:
//
//   n-color  → OKLCH conversion, gamut tests, APCA / WCAG contrast
//   n-scale  → stops × hues → palette grid, alpha range sets
//   n-tokens → token documents, prior analysis, migration, emission
//
// The libraries are pure. Everything that touches the filesystem or the
// terminal lives here. An export runs:
//
//   project.toml → ProjectConfig → Palette
//   prior *.json → Prior (analysis) → MigrationMap (given or suggested)
//   Palette + MigrationMap → palette / light / dark documents → *.tokens.json

mod config;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use n_color::color::css_color_to_hex;
use n_color::contrast::{ContrastAlgorithm, ContrastDirection, format_contrast, get_contrast};
use n_scale::{AlphaSet, Palette};
use n_tokens::analyze::{AlphaRamp, ClassifiedGroup};
use n_tokens::{ContentAnalysis, MigrationMap, Mode, NamingConfig, Prior, TokenDocument};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ProjectConfig;

// ─── Arguments ──────────────────────────────────────────────────────────────

/// OKLCH palette generator with design-token export and migration
#[derive(Parser, Debug)]
#[command(name = "n-palette")]
#[command(version)]
struct Cli {
    /// Log debug output (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the palette grid with gamut flags and contrast
    Grid {
        /// Project file
        project: PathBuf,
    },

    /// Write palette, light and dark token documents
    Export {
        /// Project file
        project: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Previously exported palette document
        #[arg(long)]
        prior_palette: Option<PathBuf>,

        /// Previously exported light document
        #[arg(long)]
        prior_light: Option<PathBuf>,

        /// Previously exported dark document
        #[arg(long)]
        prior_dark: Option<PathBuf>,
    },

    /// Classify a previously exported token document
    Analyze {
        /// Token document (JSON)
        document: PathBuf,
    },

    /// Score the contrast between two colors (hex or oklch())
    Contrast {
        color: String,
        compare: String,

        #[arg(long, value_enum, default_value_t = Algorithm::Apca)]
        algorithm: Algorithm,

        /// Role of the first color
        #[arg(long, value_enum, default_value_t = Direction::Text)]
        direction: Direction,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Perceptual, polarity aware (Lc)
    Apca,
    /// WCAG 2 luminance ratio
    Wcag,
}

impl From<Algorithm> for ContrastAlgorithm {
    fn from(a: Algorithm) -> Self {
        match a {
            Algorithm::Apca => Self::Apca,
            Algorithm::Wcag => Self::Wcag,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    /// The first color is text on the second
    Text,
    /// The first color is the background under the second
    Background,
}

impl From<Direction> for ContrastDirection {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Text => Self::ColorAsText,
            Direction::Background => Self::ColorAsBackground,
        }
    }
}

// ─── Logging ────────────────────────────────────────────────────────────────

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ─── Grid ───────────────────────────────────────────────────────────────────

fn grid(project: &Path) -> Result<()> {
    let project = ProjectConfig::load(project)?;
    print!("{}", render_grid(&project.palette()));
    Ok(())
}

/// One block per hue, one line per stop.
fn render_grid(palette: &Palette) -> String {
    let mut out = String::new();

    for row in &palette.rows {
        out.push_str(&format!("{} ({}°)\n", row.hue.name, row.hue.h));
        for cell in &row.cells {
            let on_white = get_contrast(&cell.hex, "#ffffff", ContrastAlgorithm::Apca, ContrastDirection::ColorAsText);
            let on_black = get_contrast(&cell.hex, "#000000", ContrastAlgorithm::Apca, ContrastDirection::ColorAsText);
            let clip = match (cell.clipped_srgb, cell.clipped_p3) {
                (false, _) => "",
                (true, false) => "srgb",
                (true, true) => "srgb+p3",
            };
            out.push_str(&format!(
                "  {:>6}  {}  {}  {:<26} {:<8} Lc {:>3} / {:>3}\n",
                cell.stop_name,
                cell.hex,
                cell.hex_p3,
                cell.oklch,
                clip,
                format_contrast(on_white, ContrastAlgorithm::Apca),
                format_contrast(on_black, ContrastAlgorithm::Apca),
            ));
        }
    }

    out
}

// ─── Export ─────────────────────────────────────────────────────────────────

struct Priors {
    palette: Option<Prior>,
    light: Option<Prior>,
    dark: Option<Prior>,
}

fn read_prior(path: Option<&Path>, naming: &NamingConfig) -> Result<Option<Prior>> {
    let Some(path) = path else { return Ok(None) };
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let prior = Prior::load(&text, naming);
    if prior.is_none() {
        warn!(path = %path.display(), "prior document is malformed, treating every token as new");
    }
    Ok(prior)
}

/// The project's migration map, or one suggested from the first prior.
fn migration_map(project: &ProjectConfig, priors: &Priors) -> MigrationMap {
    if let Some(map) = &project.migration {
        return map.clone();
    }
    let first = [&priors.palette, &priors.light, &priors.dark]
        .into_iter()
        .find_map(Option::as_ref);
    first.map_or_else(MigrationMap::default, |prior| {
        info!("suggesting migration map from prior document");
        MigrationMap::suggest(&prior.analysis, &project.stops, &project.hues)
    })
}

fn write_document(dir: &Path, name: &str, doc: &TokenDocument) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, format!("{doc}\n")).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), tokens = doc.tokens().len(), "wrote");
    Ok(())
}

fn export(
    project: &Path,
    output: &Path,
    prior_palette: Option<&Path>,
    prior_light: Option<&Path>,
    prior_dark: Option<&Path>,
) -> Result<()> {
    let project = ProjectConfig::load(project)?;
    let emit = &project.emit;
    let palette = project.palette();

    let priors = Priors {
        palette: read_prior(prior_palette, &emit.naming)?,
        light: read_prior(prior_light, &emit.naming)?,
        dark: read_prior(prior_dark, &emit.naming)?,
    };

    let migration = migration_map(&project, &priors);
    for dup in migration.duplicate_sources() {
        warn!(
            kind = ?dup.kind,
            source = %dup.source,
            targets = ?dup.targets,
            "migration source claimed by more than one target; each will carry the same id"
        );
    }

    fs::create_dir_all(output).with_context(|| format!("Failed to create {}", output.display()))?;

    let docs = [
        ("palette.tokens.json", n_tokens::emit_palette(&palette, emit, priors.palette.as_ref(), &migration)),
        (
            "light.tokens.json",
            n_tokens::emit_semantic(&palette, Mode::Light, emit, priors.light.as_ref(), &migration),
        ),
        (
            "dark.tokens.json",
            n_tokens::emit_semantic(&palette, Mode::Dark, emit, priors.dark.as_ref(), &migration),
        ),
    ];
    for (name, doc) in &docs {
        write_document(output, name, doc)?;
    }

    Ok(())
}

// ─── Analyze ────────────────────────────────────────────────────────────────

fn analyze(document: &Path) -> Result<()> {
    let text = fs::read_to_string(document).with_context(|| format!("Failed to read {}", document.display()))?;
    let analysis = n_tokens::analyze(&text, &NamingConfig::default())
        .with_context(|| format!("Failed to analyze {}", document.display()))?;
    print!("{}", render_analysis(&analysis));
    Ok(())
}

fn alphas(values: &[u8]) -> String {
    values.iter().copied().collect::<AlphaSet>().to_string()
}

fn render_ramps(out: &mut String, title: &str, ramps: &[AlphaRamp]) {
    if ramps.is_empty() {
        return;
    }
    out.push_str(&format!("{title}:\n"));
    for ramp in ramps {
        out.push_str(&format!("  {:<12} alphas [{}]\n", ramp.name, alphas(&ramp.alphas)));
    }
}

fn render_groups(out: &mut String, title: &str, groups: &[ClassifiedGroup]) {
    if groups.is_empty() {
        return;
    }
    out.push_str(&format!("{title}:\n"));
    for group in groups {
        let shades: Vec<&str> = group.shades.iter().map(|s| s.name.as_str()).collect();
        out.push_str(&format!(
            "  {:<12} shades [{}]  alphas [{}]  on [{}]\n",
            group.name,
            shades.join(","),
            alphas(&group.alphas),
            alphas(&group.on_alphas),
        ));
    }
}

fn render_analysis(analysis: &ContentAnalysis) -> String {
    let mut out = String::new();
    if let Some(mode) = &analysis.mode_name {
        out.push_str(&format!("mode: {mode}\n"));
    }
    if !analysis.excluded.is_empty() {
        out.push_str(&format!("excluded: {}\n", analysis.excluded.join(", ")));
    }
    render_ramps(&mut out, "grounds", &analysis.grounds);
    render_ramps(&mut out, "ramps", &analysis.ramps);
    render_groups(&mut out, "intents", &analysis.intents);
    render_groups(&mut out, "hues", &analysis.hues);
    if !analysis.primitives.is_empty() {
        out.push_str(&format!(
            "primitives: {} ({} hues × {} shades)\n",
            analysis.primitives.len(),
            analysis.hue_names().len(),
            analysis.shade_names().len(),
        ));
    }
    out
}

// ─── Contrast ───────────────────────────────────────────────────────────────

fn contrast(color: &str, compare: &str, algorithm: Algorithm, direction: Direction) -> String {
    let algorithm = ContrastAlgorithm::from(algorithm);
    let score = get_contrast(
        &css_color_to_hex(color),
        &css_color_to_hex(compare),
        algorithm,
        direction.into(),
    );
    match algorithm {
        ContrastAlgorithm::Apca => format!("Lc {} ({score:.1})", format_contrast(score, algorithm)),
        ContrastAlgorithm::Wcag => format!("{}:1", format_contrast(score, algorithm)),
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Grid { project } => grid(&project),
        Command::Export {
            project,
            output,
            prior_palette,
            prior_light,
            prior_dark,
        } => export(
            &project,
            &output,
            prior_palette.as_deref(),
            prior_light.as_deref(),
            prior_dark.as_deref(),
        ),
        Command::Analyze { document } => analyze(&document),
        Command::Contrast {
            color,
            compare,
            algorithm,
            direction,
        } => {
            println!("{}", contrast(&color, &compare, algorithm, direction));
            Ok(())
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
