//! Deterministic recipe-fit scoring.

use super::config::ScoringWeights;
use crate::model::{Recipe, MAX_RATING};
use serde::Serialize;

/// The four features shared by the heuristic and learned scorers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreFeatures {
    /// Matched / total normalized ingredients
    pub match_pct: f64,
    /// Raw prep time in minutes
    pub prep_time_mins: f64,
    /// Raw rating
    pub rating: f64,
    /// Raw simplicity measure
    pub simplicity: f64,
}

impl ScoreFeatures {
    /// Number of features fed to a learned ranker
    pub const LEN: usize = 4;

    /// Feature vector in ranker order: match, prep time, rating, simplicity.
    #[must_use]
    pub const fn to_array(&self) -> [f64; Self::LEN] {
        [
            self.match_pct,
            self.prep_time_mins,
            self.rating,
            self.simplicity,
        ]
    }
}

/// Simplicity measure: `1 / (1 + ln(1 + steps))`, or `default` without steps.
#[must_use]
pub fn simplicity(step_count: usize, default: f64) -> f64 {
    if step_count == 0 {
        return default;
    }
    1.0 / (1.0 + (step_count as f64).ln_1p())
}

/// Weighted linear scorer over [`ScoreFeatures`].
#[derive(Debug, Clone, Default)]
pub struct HeuristicScorer {
    weights: ScoringWeights,
}

impl HeuristicScorer {
    /// Create a scorer with the given weights
    #[must_use]
    pub const fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Current weights
    #[must_use]
    pub const fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Extract features for a recipe with `matched` of `total` ingredients held.
    #[must_use]
    pub fn features(&self, recipe: &Recipe, matched: usize, total: usize) -> ScoreFeatures {
        ScoreFeatures {
            match_pct: matched as f64 / total.max(1) as f64,
            prep_time_mins: f64::from(recipe.prep_time_mins),
            rating: recipe.rating,
            simplicity: simplicity(recipe.step_count(), self.weights.default_simplicity),
        }
    }

    /// Score features into `[0, 1]` (for normalized weights).
    #[must_use]
    pub fn score(&self, features: &ScoreFeatures) -> f64 {
        let w = &self.weights;
        let rating_norm = (features.rating / MAX_RATING).clamp(0.0, 1.0);
        let prep_norm = if w.prep_time_cap_mins > 0.0 {
            1.0 - (features.prep_time_mins / w.prep_time_cap_mins).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let simple_norm = features.simplicity.clamp(0.0, 1.0);

        w.match_ratio * features.match_pct
            + w.rating * rating_norm
            + w.prep_time * prep_norm
            + w.simplicity * simple_norm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrambled_eggs() -> Recipe {
        Recipe::new("Scrambled Eggs", ["eggs", "butter", "salt", "pepper"])
            .with_rating(4.4)
            .with_prep_time(8)
    }

    #[test]
    fn test_simplicity_default_without_steps() {
        assert_eq!(simplicity(0, 0.6), 0.6);
    }

    #[test]
    fn test_simplicity_decreases_with_steps() {
        let one = simplicity(1, 0.6);
        let five = simplicity(5, 0.6);
        assert!((one - 1.0 / (1.0 + 2f64.ln())).abs() < 1e-12);
        assert!(five < one);
        assert!(five > 0.0);
    }

    #[test]
    fn test_scrambled_eggs_score() {
        let scorer = HeuristicScorer::default();
        let recipe = scrambled_eggs();
        let features = scorer.features(&recipe, 2, 4);
        assert_eq!(features.match_pct, 0.5);

        let expected = 0.65 * 0.5 + 0.20 * 0.88 + 0.10 * (1.0 - 8.0 / 90.0) + 0.05 * 0.6;
        let score = scorer.score(&features);
        assert!((score - expected).abs() < 1e-9, "{score} != {expected}");
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn test_prep_time_capped() {
        let scorer = HeuristicScorer::default();
        let slow = Recipe::new("Stew", ["beef"]).with_prep_time(240);
        let slower = Recipe::new("Stew", ["beef"]).with_prep_time(90);
        let a = scorer.score(&scorer.features(&slow, 1, 1));
        let b = scorer.score(&scorer.features(&slower, 1, 1));
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_more_matches_never_lower_score() {
        let scorer = HeuristicScorer::default();
        let recipe = scrambled_eggs();
        let mut previous = f64::MIN;
        for matched in 0..=4 {
            let score = scorer.score(&scorer.features(&recipe, matched, 4));
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_feature_array_order() {
        let features = ScoreFeatures {
            match_pct: 0.5,
            prep_time_mins: 8.0,
            rating: 4.4,
            simplicity: 0.6,
        };
        assert_eq!(features.to_array(), [0.5, 8.0, 4.4, 0.6]);
    }
}
