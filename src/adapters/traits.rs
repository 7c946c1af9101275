//! Capability traits for optional learned models.
//!
//! Each adapter is either available (artifact loaded) or not. Callers check
//! [`LearnedRanker::is_available`] / [`SetCompletion::is_available`] instead
//! of relying on errors as control flow; inference can still fail, and such
//! failures are handled by the caller's fallback path.

use super::vocab::Vocabulary;
use crate::error::Result;
use crate::scoring::ScoreFeatures;

/// Externally trained tabular model over the four heuristic features.
///
/// # Example
///
/// ```ignore
/// let ranker: Box<dyn LearnedRanker> = match TabularRanker::load(&path) {
///     Ok(r) => Box::new(r),
///     Err(_) => Box::new(NoOpRanker),
/// };
/// if ranker.is_available() {
///     let score = ranker.predict(&features.to_array())?;
/// }
/// ```
pub trait LearnedRanker: Send + Sync {
    /// Score a feature vector in [`ScoreFeatures::to_array`] order.
    fn predict(&self, features: &[f64; ScoreFeatures::LEN]) -> Result<f64>;

    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Whether a model is loaded
    fn is_available(&self) -> bool;
}

/// Learned set-completion model over ingredient token ids.
pub trait SetCompletion: Send + Sync {
    /// Logits over the model vocabulary for a set of token ids.
    fn complete(&self, token_ids: &[u32]) -> Result<Vec<f32>>;

    /// Size of the output vocabulary
    fn vocab_size(&self) -> usize;

    /// Name ↔ id mapping shipped with the artifact, if any
    fn vocabulary(&self) -> Option<&Vocabulary>;

    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Whether a model is loaded
    fn is_available(&self) -> bool;
}

/// Stand-in ranker used when no artifact is loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpRanker;

impl LearnedRanker for NoOpRanker {
    fn predict(&self, _features: &[f64; ScoreFeatures::LEN]) -> Result<f64> {
        Err(crate::error::RecipeIntelError::inference("no ranker loaded"))
    }

    fn name(&self) -> &'static str {
        "NoOp"
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Stand-in set-completion model used when no artifact is loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSetCompletion;

impl SetCompletion for NoOpSetCompletion {
    fn complete(&self, _token_ids: &[u32]) -> Result<Vec<f32>> {
        Err(crate::error::RecipeIntelError::inference(
            "no set-completion model loaded",
        ))
    }

    fn vocab_size(&self) -> usize {
        0
    }

    fn vocabulary(&self) -> Option<&Vocabulary> {
        None
    }

    fn name(&self) -> &'static str {
        "NoOp"
    }

    fn is_available(&self) -> bool {
        false
    }
}
