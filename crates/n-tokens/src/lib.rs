// SPDX-License-Identifier: MIT

//! # n-tokens — Design-token documents
//!
//! Reads previously exported token documents, decides which identifiers
//! carry forward, and emits fresh palette and semantic documents.
//!
//! # Architecture
//!
//! ```text
//! prior text ──► analyze.rs  → ContentAnalysis (shade/hue names by position)
//!                    │
//!                    ▼
//!                migrate.rs  → MigrationMap, candidate-path id lookup
//!                    │
//! Palette ──────────►▼
//!                emit/       → palette.rs  (flat primitives)
//!                              semantic.rs (per-mode grounds, intents, hues)
//!                    │
//!                    ▼
//!                document.rs → TokenDocument (ordered tree, JSON)
//! ```
//!
//! `path.rs` holds the typed logical paths both emitters build with, and the
//! code-syntax rendering. `naming.rs` and `config.rs` are the configuration
//! threaded through every call; `scope.rs` the design tool's scope flags.
//!
//! Nothing here touches the filesystem. Malformed prior documents are
//! logged and treated as absent.

pub mod analyze;
pub mod config;
pub mod document;
pub mod emit;
pub mod migrate;
pub mod naming;
pub mod path;
pub mod scope;

pub use analyze::{ContentAnalysis, Prior, analyze};
pub use config::{
    AlphaConfig, EmitConfig, GroundConfig, GroundMode, GroundSource, Mode, OnGroundSource,
    StarkConfig,
};
pub use document::{ColorSpace, DocumentError, Token, TokenDocument, TokenValue};
pub use emit::{emit_palette, emit_semantic};
pub use migrate::{MigrationMap, MigrationSource};
pub use naming::NamingConfig;
pub use path::LogicalPath;
pub use scope::VariableScopes;
