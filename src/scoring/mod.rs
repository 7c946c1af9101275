//! Recipe scoring.
//!
//! [`HeuristicScorer`] computes the deterministic weighted score. A learned
//! ranker (see [`crate::adapters`]) consumes the same [`ScoreFeatures`] and,
//! when available, replaces the heuristic value.

mod config;
mod heuristic;

pub use config::ScoringWeights;
pub use heuristic::{simplicity, HeuristicScorer, ScoreFeatures};
