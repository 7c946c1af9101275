//! Recipe ranking.
//!
//! [`RankingEngine`] normalizes the user's ingredients, intersects them with
//! every catalog recipe, scores the survivors and returns the top K.

mod engine;

pub use engine::RankingEngine;
