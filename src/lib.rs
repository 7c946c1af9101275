//! **Recipe ranking and grocery suggestions for partial ingredient sets.**
//!
//! `recipe-intel` answers two questions about the ingredients a user already
//! has: which recipes from a catalog they can best make, and what to buy or
//! swap in to complete them. It powers both a command-line interface and a
//! Rust library for embedding in services.
//!
//! ## Key Features
//!
//! - **Deterministic Ranking**: recipes are scored on ingredient coverage,
//!   prep time, rating and simplicity with configurable weights.
//! - **Rule-Based Suggestions**: substitutes for missing ingredients and
//!   co-purchase extras from curated association tables.
//! - **Optional Learned Models**: a tabular ranker and a set-completion model
//!   are used when their artifacts are present, and skipped silently when not.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Recipe`], [`Catalog`] and the per-request [`ScoredRecipe`].
//! - **[`ranking`]**: the [`RankingEngine`] that filters, scores and sorts.
//! - **[`matching`]**: ingredient normalization and the rule tables.
//! - **[`suggest`]**: combines rules and the set-completion model.
//! - **[`service`]**: [`RecipeService`], the facade built once from an
//!   [`AppConfig`] and shared across requests.
//! - **[`reports`]**: JSON and terminal summary rendering.
//!
//! ## Getting Started
//!
//! ```
//! use recipe_intel::RecipeService;
//!
//! let service = RecipeService::builtin();
//! let top = service.rank(&["eggs", "butter", "salt"], 3);
//! assert_eq!(top[0].name, "Scrambled Eggs");
//!
//! let suggestions = service.suggest(&["salt"], &top[0].missing);
//! assert!(suggestions.extra_suggestions.contains(&"pepper".to_string()));
//! ```
//!
//! ## Feature Flags
//!
//! - `ml-models`: enables the embedding-based set-completion adapter backed
//!   by `candle-core`. Without it the adapter always reports unavailable.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Feature values are small counts and minutes; f32/f64 casts are bounded
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    // Variable names like `held`/`hits` are clear in context
    clippy::similar_names
)]

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod matching;
pub mod model;
pub mod pipeline;
pub mod ranking;
pub mod reports;
pub mod scoring;
pub mod service;
pub mod suggest;

// Re-export main types for convenience
pub use adapters::{LearnedRanker, ModelRegistry, NoOpRanker, NoOpSetCompletion, SetCompletion};
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset, OutputConfig};
pub use config::{ConfigError, Validatable};
pub use error::{ErrorContext, RecipeIntelError, Result};
pub use matching::{normalize, AssociationEngine, AssociationTable, SubstituteTable};
pub use model::{Catalog, Recipe, ScoreSource, ScoredRecipe};
pub use ranking::RankingEngine;
pub use reports::{ReportFormat, ReportGenerator};
pub use scoring::{HeuristicScorer, ScoreFeatures, ScoringWeights};
pub use service::{Recommendation, RecipeService};
pub use suggest::{SuggestionOrchestrator, Suggestions};
