//! Optional learned-model adapters.
//!
//! The ranker and the set-completion model are externally trained artifacts.
//! Their absence is a normal state: every adapter degrades to "not
//! available", and inference failures are handled by callers falling back to
//! the rule-based or heuristic path.
//!
//! # Example
//!
//! ```ignore
//! use recipe_intel::adapters::ModelRegistry;
//! use recipe_intel::config::ModelsConfig;
//!
//! let registry = ModelRegistry::load(&ModelsConfig::default());
//! if registry.ranker().is_available() {
//!     // learned scores replace heuristic scores
//! }
//! ```

mod ranker;
mod registry;
mod set_completion;
mod traits;
mod vocab;

pub use ranker::{RankerModel, RegressionTree, TabularRanker, TreeNode, RANKER_ARTIFACT};
pub use registry::{models_disabled_by_env, ModelRegistry, DISABLE_MODELS_ENV};
pub use set_completion::{EmbeddingSetCompletion, SET_COMPLETION_ARTIFACT, SET_COMPLETION_VOCAB};
pub use traits::{LearnedRanker, NoOpRanker, NoOpSetCompletion, SetCompletion};
pub use vocab::{hashed_token_id, Vocabulary, PADDING_TOKEN};

use crate::error::{ModelErrorKind, RecipeIntelError, Result};
use std::time::{Duration, Instant};

/// Run one inference, discarding its result if it overran `budget`.
///
/// Inference is synchronous and in-memory, so the call is not interrupted;
/// an overrun is reported as an error so the caller takes its fallback path.
pub fn run_with_budget<T>(budget: Option<Duration>, infer: impl FnOnce() -> Result<T>) -> Result<T> {
    let started = Instant::now();
    let result = infer()?;
    match budget {
        Some(budget) if started.elapsed() > budget => Err(RecipeIntelError::model(
            "inference",
            ModelErrorKind::BudgetExceeded {
                budget_ms: budget.as_millis() as u64,
                elapsed_ms: started.elapsed().as_millis() as u64,
            },
        )),
        _ => Ok(result),
    }
}
