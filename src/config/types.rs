//! Configuration types for recipe-intel.

use crate::matching::{DEFAULT_MAX_EXTRAS, DEFAULT_MIN_BEFORE_FALLBACK};
use crate::reports::ReportFormat;
use crate::scoring::ScoringWeights;
use crate::suggest::DEFAULT_MAX_MODEL_SUGGESTIONS;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::{DEFAULT_K, DEFAULT_WEIGHTS_PRESET, EMPTY_INPUT_SEED};

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loaded from a YAML file and/or CLI flags.
///
/// Every section has defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Recipe catalog source
    pub catalog: CatalogConfig,
    /// Optional learned models
    pub models: ModelsConfig,
    /// Recipe ranking
    pub ranking: RankingConfig,
    /// Grocery suggestions
    pub suggestions: SuggestionsConfig,
    /// Output format and destination
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create an `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the catalog file.
    pub fn catalog_path(mut self, path: Option<PathBuf>) -> Self {
        self.config.catalog.path = path;
        self
    }

    /// Set the models directory.
    pub fn models_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.config.models.dir = dir;
        self
    }

    /// Disable all optional models.
    pub const fn models_disabled(mut self, disabled: bool) -> Self {
        self.config.models.disabled = disabled;
        self
    }

    /// Set the per-inference time budget.
    pub const fn inference_budget_ms(mut self, budget: Option<u64>) -> Self {
        self.config.models.inference_budget_ms = budget;
        self
    }

    /// Set the number of recipes returned by default.
    pub const fn default_k(mut self, k: usize) -> Self {
        self.config.ranking.default_k = k;
        self
    }

    /// Select a named weights preset.
    pub fn weights_preset(mut self, preset: impl Into<String>) -> Self {
        self.config.ranking.weights_preset = preset.into();
        self
    }

    /// Use explicit scoring weights.
    pub const fn weights(mut self, weights: ScoringWeights) -> Self {
        self.config.ranking.weights = Some(weights);
        self
    }

    /// Set the association rules file.
    pub fn associations_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.suggestions.associations_file = file;
        self
    }

    /// Set the substitute rules file.
    pub fn substitutes_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.suggestions.substitutes_file = file;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// Recipe catalog source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON catalog file (built-in recipes when unset or unusable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Optional learned models
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ModelsConfig {
    /// Directory holding `ranker.json` and `set_completion.safetensors`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Ignore any artifacts present
    pub disabled: bool,
    /// Discard a single inference that runs longer than this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference_budget_ms: Option<u64>,
}

/// Recipe ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RankingConfig {
    /// Number of recipes returned when no `-k` is given
    pub default_k: usize,
    /// Weights preset: balanced, quick-meals, best-rated
    pub weights_preset: String,
    /// Explicit weights, overriding the preset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<ScoringWeights>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_k: DEFAULT_K,
            weights_preset: DEFAULT_WEIGHTS_PRESET.to_string(),
            weights: None,
        }
    }
}

impl RankingConfig {
    /// Resolve the weights to score with.
    ///
    /// Unknown preset names resolve to the balanced weights; validation
    /// reports them separately.
    #[must_use]
    pub fn scoring_weights(&self) -> ScoringWeights {
        self.weights
            .or_else(|| ScoringWeights::from_preset(&self.weights_preset))
            .unwrap_or_default()
    }
}

/// Grocery suggestions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SuggestionsConfig {
    /// Cap on `extra_suggestions`
    pub max_extras: usize,
    /// Rule hits below which popular items are appended
    pub min_before_fallback: usize,
    /// Cap on `model_suggestions`
    pub max_model_suggestions: usize,
    /// JSON rules file for co-purchase associations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associations_file: Option<PathBuf>,
    /// JSON rules file for substitutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitutes_file: Option<PathBuf>,
    /// Start from empty tables instead of the built-in rules
    pub replace_builtin_rules: bool,
    /// Ingredients ranked by `recommend` when the input is empty
    pub empty_input_seed: Vec<String>,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            max_extras: DEFAULT_MAX_EXTRAS,
            min_before_fallback: DEFAULT_MIN_BEFORE_FALLBACK,
            max_model_suggestions: DEFAULT_MAX_MODEL_SUGGESTIONS,
            associations_file: None,
            substitutes_file: None,
            replace_builtin_rules: false,
            empty_input_seed: EMPTY_INPUT_SEED.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.ranking.default_k, 5);
        assert_eq!(config.suggestions.max_extras, 10);
        assert_eq!(config.suggestions.min_before_fallback, 3);
        assert_eq!(config.suggestions.max_model_suggestions, 5);
        assert_eq!(config.suggestions.empty_input_seed, vec!["milk", "eggs"]);
        assert_eq!(config.output.format, ReportFormat::Auto);
        assert!(!config.models.disabled);
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .default_k(3)
            .weights_preset("quick-meals")
            .models_disabled(true)
            .output_format(ReportFormat::Json)
            .build();
        assert_eq!(config.ranking.default_k, 3);
        assert_eq!(config.ranking.scoring_weights(), ScoringWeights::quick_meals());
        assert!(config.models.disabled);
        assert_eq!(config.output.format, ReportFormat::Json);
    }

    #[test]
    fn test_explicit_weights_win() {
        let custom = ScoringWeights {
            match_ratio: 1.0,
            rating: 0.0,
            prep_time: 0.0,
            simplicity: 0.0,
            ..ScoringWeights::default()
        };
        let config = AppConfig::builder()
            .weights_preset("best-rated")
            .weights(custom)
            .build();
        assert_eq!(config.ranking.scoring_weights(), custom);
    }

    #[test]
    fn test_unknown_preset_resolves_to_balanced() {
        let config = AppConfig::builder().weights_preset("nope").build();
        assert_eq!(config.ranking.scoring_weights(), ScoringWeights::balanced());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("ranking:\n  default_k: 8\n").unwrap();
        assert_eq!(config.ranking.default_k, 8);
        assert_eq!(config.ranking.weights_preset, "balanced");
        assert_eq!(config.suggestions, SuggestionsConfig::default());
    }
}
