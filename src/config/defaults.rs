//! Default values and named presets.

use super::types::{AppConfig, RankingConfig};

/// Recipes returned when no `-k` is given
pub const DEFAULT_K: usize = 5;

/// Weights preset used when none is configured
pub const DEFAULT_WEIGHTS_PRESET: &str = "balanced";

/// Ingredients ranked by `recommend` when the caller sends none
pub const EMPTY_INPUT_SEED: [&str; 2] = ["milk", "eggs"];

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Balanced weights, five recipes
    Default,
    /// Favour fast recipes
    QuickMeals,
    /// Favour highly rated recipes
    BestRated,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::QuickMeals => "quick-meals",
            Self::BestRated => "best-rated",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "balanced" => Some(Self::Default),
            "quick-meals" | "quick_meals" | "quick" => Some(Self::QuickMeals),
            "best-rated" | "best_rated" | "rated" => Some(Self::BestRated),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Ingredient coverage first, then rating and prep time",
            Self::QuickMeals => "Shorter prep times weigh more; 60 minute cap",
            Self::BestRated => "Ratings weigh more; more recipes per query",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::QuickMeals, Self::BestRated]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::QuickMeals => Self {
                ranking: RankingConfig {
                    weights_preset: "quick-meals".to_string(),
                    ..RankingConfig::default()
                },
                ..Self::default()
            },
            ConfigPreset::BestRated => Self {
                ranking: RankingConfig {
                    default_k: 10,
                    weights_preset: "best-rated".to_string(),
                    weights: None,
                },
                ..Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Validatable;
    use crate::scoring::ScoringWeights;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
            assert!(!preset.description().is_empty());
        }
        assert_eq!(ConfigPreset::from_name("Balanced"), Some(ConfigPreset::Default));
        assert_eq!(ConfigPreset::from_name("fastest"), None);
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in ConfigPreset::all() {
            let config = AppConfig::from_preset(*preset);
            assert!(config.is_valid(), "{preset}: {:?}", config.validate());
        }
    }

    #[test]
    fn test_preset_weights() {
        let config = AppConfig::from_preset(ConfigPreset::QuickMeals);
        assert_eq!(config.ranking.scoring_weights(), ScoringWeights::quick_meals());
        let config = AppConfig::from_preset(ConfigPreset::BestRated);
        assert_eq!(config.ranking.scoring_weights(), ScoringWeights::best_rated());
        assert_eq!(config.ranking.default_k, 10);
    }
}
