//! Configuration validation.

use super::types::{
    AppConfig, CatalogConfig, ModelsConfig, OutputConfig, RankingConfig, SuggestionsConfig,
};
use crate::matching::DEFAULT_MAX_EXTRAS;
use crate::scoring::ScoringWeights;
use std::path::Path;

// ============================================================================
// Configuration Error
// ============================================================================

/// A single invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.catalog.validate());
        errors.extend(self.models.validate());
        errors.extend(self.ranking.validate());
        errors.extend(self.suggestions.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for CatalogConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // An unusable catalog path falls back to the built-in recipes
        Vec::new()
    }
}

impl Validatable for ModelsConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.inference_budget_ms == Some(0) {
            errors.push(ConfigError::new(
                "models.inference_budget_ms",
                "Inference budget must be at least 1 ms",
            ));
        }
        if let Some(ref dir) = self.dir {
            if dir.exists() && !dir.is_dir() {
                errors.push(ConfigError::new(
                    "models.dir",
                    format!("Not a directory: {}", dir.display()),
                ));
            }
        }
        errors
    }
}

impl Validatable for RankingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.default_k == 0 {
            errors.push(ConfigError::new(
                "ranking.default_k",
                "Default result count must be at least 1",
            ));
        }

        if self.weights.is_none() && ScoringWeights::from_preset(&self.weights_preset).is_none() {
            errors.push(ConfigError::new(
                "ranking.weights_preset",
                format!(
                    "Invalid preset '{}'. Valid options: balanced, quick-meals, best-rated",
                    self.weights_preset
                ),
            ));
        }

        if let Some(ref weights) = self.weights {
            errors.extend(validate_weights(weights));
        }

        errors
    }
}

fn validate_weights(weights: &ScoringWeights) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    if !weights.is_non_negative() {
        errors.push(ConfigError::new(
            "ranking.weights",
            "Weights must be finite and non-negative",
        ));
    } else if !weights.is_normalized() {
        errors.push(ConfigError::new(
            "ranking.weights",
            format!("Weights must sum to 1.0, got {:.3}", weights.total()),
        ));
    }
    if !weights.prep_time_cap_mins.is_finite() || weights.prep_time_cap_mins <= 0.0 {
        errors.push(ConfigError::new(
            "ranking.weights.prep_time_cap_mins",
            format!(
                "Prep time cap must be positive, got {}",
                weights.prep_time_cap_mins
            ),
        ));
    }
    if !(0.0..=1.0).contains(&weights.default_simplicity) {
        errors.push(ConfigError::new(
            "ranking.weights.default_simplicity",
            format!(
                "Default simplicity must be between 0.0 and 1.0, got {}",
                weights.default_simplicity
            ),
        ));
    }
    errors
}

impl Validatable for SuggestionsConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.max_extras == 0 {
            errors.push(ConfigError::new(
                "suggestions.max_extras",
                "Extras cap must be at least 1",
            ));
        } else if self.max_extras > DEFAULT_MAX_EXTRAS {
            errors.push(ConfigError::new(
                "suggestions.max_extras",
                format!(
                    "Extras cap must be at most {DEFAULT_MAX_EXTRAS}, got {}",
                    self.max_extras
                ),
            ));
        }

        for (field, file) in [
            ("suggestions.associations_file", &self.associations_file),
            ("suggestions.substitutes_file", &self.substitutes_file),
        ] {
            if let Some(path) = file {
                errors.extend(require_file(field, path));
            }
        }

        if self
            .empty_input_seed
            .iter()
            .all(|s| crate::matching::normalize(s).is_empty())
        {
            errors.push(ConfigError::new(
                "suggestions.empty_input_seed",
                "Seed list must contain at least one ingredient",
            ));
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        // Validate output file path if specified
        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

fn require_file(field: &str, path: &Path) -> Option<ConfigError> {
    if path.is_file() {
        None
    } else {
        Some(ConfigError::new(
            field,
            format!("Rules file not found: {}", path.display()),
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_app_config_validation() {
        assert!(AppConfig::default().is_valid());

        let mut invalid = AppConfig::default();
        invalid.ranking.weights_preset = "fastest".to_string();
        let errors = invalid.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "ranking.weights_preset");
    }

    #[test]
    fn test_weights_validation() {
        let mut config = RankingConfig {
            weights: Some(ScoringWeights {
                match_ratio: 0.9,
                ..ScoringWeights::default()
            }),
            ..RankingConfig::default()
        };
        assert!(!config.is_valid());

        config.weights = Some(ScoringWeights {
            match_ratio: -0.1,
            rating: 1.1,
            ..ScoringWeights::default()
        });
        assert!(!config.is_valid());

        config.weights = Some(ScoringWeights {
            prep_time_cap_mins: 0.0,
            ..ScoringWeights::default()
        });
        assert!(!config.is_valid());

        config.weights = Some(ScoringWeights::quick_meals());
        assert!(config.is_valid());
    }

    #[test]
    fn test_custom_weights_skip_preset_check() {
        let config = RankingConfig {
            weights_preset: "unknown".to_string(),
            weights: Some(ScoringWeights::balanced()),
            ..RankingConfig::default()
        };
        assert!(config.is_valid());
    }

    #[test]
    fn test_suggestions_validation() {
        assert!(SuggestionsConfig::default().is_valid());

        let invalid = SuggestionsConfig {
            max_extras: 0,
            associations_file: Some(PathBuf::from("/nonexistent/rules.json")),
            empty_input_seed: vec!["  ".to_string()],
            ..SuggestionsConfig::default()
        };
        let fields: Vec<_> = invalid.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "suggestions.max_extras",
                "suggestions.associations_file",
                "suggestions.empty_input_seed"
            ]
        );
    }

    #[test]
    fn test_extras_cap_upper_bound() {
        let config = SuggestionsConfig {
            max_extras: 50,
            ..SuggestionsConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "suggestions.max_extras");

        let at_cap = SuggestionsConfig {
            max_extras: 10,
            ..SuggestionsConfig::default()
        };
        assert!(at_cap.is_valid());
    }

    #[test]
    fn test_rules_file_present() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = SuggestionsConfig {
            substitutes_file: Some(file.path().to_path_buf()),
            ..SuggestionsConfig::default()
        };
        assert!(config.is_valid());
    }

    #[test]
    fn test_models_validation() {
        let config = ModelsConfig {
            inference_budget_ms: Some(0),
            ..ModelsConfig::default()
        };
        assert!(!config.is_valid());

        let file = tempfile::NamedTempFile::new().unwrap();
        let config = ModelsConfig {
            dir: Some(file.path().to_path_buf()),
            ..ModelsConfig::default()
        };
        assert!(!config.is_valid());

        // a missing directory just means no models
        let config = ModelsConfig {
            dir: Some(PathBuf::from("/nonexistent/models")),
            ..ModelsConfig::default()
        };
        assert!(config.is_valid());
    }

    #[test]
    fn test_output_validation() {
        let config = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/out.json")),
            ..OutputConfig::default()
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::new("test_field", "test error message");
        assert_eq!(error.to_string(), "test_field: test error message");
    }
}
