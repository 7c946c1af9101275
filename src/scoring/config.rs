//! Heuristic scoring weights.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Weights and normalization constants for the heuristic recipe score.
///
/// The four weights should sum to 1.0 so that scores stay within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringWeights {
    /// Weight for the fraction of recipe ingredients the user holds
    pub match_ratio: f64,
    /// Weight for the normalized rating
    pub rating: f64,
    /// Weight for prep speed (faster is better)
    pub prep_time: f64,
    /// Weight for recipe simplicity
    pub simplicity: f64,
    /// Prep time at or beyond which the prep component is zero
    pub prep_time_cap_mins: f64,
    /// Simplicity assumed for recipes without a step list
    pub default_simplicity: f64,
}

impl ScoringWeights {
    /// Default weights: ingredient coverage dominates.
    #[must_use]
    pub const fn balanced() -> Self {
        Self {
            match_ratio: 0.65,
            rating: 0.20,
            prep_time: 0.10,
            simplicity: 0.05,
            prep_time_cap_mins: 90.0,
            default_simplicity: 0.6,
        }
    }

    /// Favour fast recipes.
    #[must_use]
    pub const fn quick_meals() -> Self {
        Self {
            match_ratio: 0.55,
            rating: 0.15,
            prep_time: 0.25,
            simplicity: 0.05,
            prep_time_cap_mins: 60.0,
            default_simplicity: 0.6,
        }
    }

    /// Favour highly rated recipes.
    #[must_use]
    pub const fn best_rated() -> Self {
        Self {
            match_ratio: 0.55,
            rating: 0.35,
            prep_time: 0.05,
            simplicity: 0.05,
            prep_time_cap_mins: 90.0,
            default_simplicity: 0.6,
        }
    }

    /// Look up a preset by name.
    ///
    /// Supported presets: "balanced", "quick-meals", "best-rated".
    #[must_use]
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "balanced" | "default" => Some(Self::balanced()),
            "quick-meals" | "quick_meals" | "quick" => Some(Self::quick_meals()),
            "best-rated" | "best_rated" | "rated" => Some(Self::best_rated()),
            _ => None,
        }
    }

    /// Sum of the four component weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.match_ratio + self.rating + self.prep_time + self.simplicity
    }

    /// Check if weights are properly normalized (sum to ~1.0).
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        (self.total() - 1.0).abs() < 0.001
    }

    /// Whether every weight is non-negative and finite.
    #[must_use]
    pub fn is_non_negative(&self) -> bool {
        [self.match_ratio, self.rating, self.prep_time, self.simplicity]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }

    /// Normalize weights to sum to 1.0.
    /// Note: normalization constants are not affected.
    pub fn normalize(&mut self) {
        let sum = self.total();
        if sum > 0.0 {
            self.match_ratio /= sum;
            self.rating /= sum;
            self.prep_time /= sum;
            self.simplicity /= sum;
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::balanced()
    }
}
