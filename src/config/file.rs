//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".recipe-intel.yaml",
    ".recipe-intel.yml",
    "recipe-intel.yaml",
    "recipe-intel.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/recipe-intel/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("recipe-intel")) {
            return Some(path);
        }
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so layering CLI
    /// flags over a file keeps the file's settings for flags not given.
    pub fn merge(&mut self, other: &Self) {
        if other.catalog.path.is_some() {
            self.catalog.path.clone_from(&other.catalog.path);
        }

        if other.models.dir.is_some() {
            self.models.dir.clone_from(&other.models.dir);
        }
        if other.models.disabled {
            self.models.disabled = true;
        }
        if other.models.inference_budget_ms.is_some() {
            self.models.inference_budget_ms = other.models.inference_budget_ms;
        }

        let ranking_defaults = super::types::RankingConfig::default();
        if other.ranking.default_k != ranking_defaults.default_k {
            self.ranking.default_k = other.ranking.default_k;
        }
        if other.ranking.weights_preset != ranking_defaults.weights_preset {
            self.ranking
                .weights_preset
                .clone_from(&other.ranking.weights_preset);
        }
        if other.ranking.weights.is_some() {
            self.ranking.weights = other.ranking.weights;
        }

        if other.suggestions.associations_file.is_some() {
            self.suggestions
                .associations_file
                .clone_from(&other.suggestions.associations_file);
        }
        if other.suggestions.substitutes_file.is_some() {
            self.suggestions
                .substitutes_file
                .clone_from(&other.suggestions.substitutes_file);
        }

        if other.output.format != ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# recipe-intel configuration
# Place this file at .recipe-intel.yaml or ~/.config/recipe-intel/recipe-intel.yaml

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# recipe-intel configuration file
# ===============================
#
# Place it at:
#   - .recipe-intel.yaml in the working directory
#   - ~/.config/recipe-intel/recipe-intel.yaml for global config
#
# CLI arguments always override file settings.

# Recipe catalog: JSON list of {name, ingredients, rating?, prep_time_mins?, steps?}.
# Built-in recipes are used when unset, unreadable or empty.
# catalog:
#   path: ./recipes.json

# Optional learned models
models:
  # Directory containing ranker.json and set_completion.safetensors
  # dir: ./models
  disabled: false
  # Discard any single inference slower than this
  # inference_budget_ms: 50

# Recipe ranking
ranking:
  default_k: 5
  # Preset: balanced, quick-meals, best-rated
  weights_preset: balanced
  # Explicit weights override the preset
  # weights:
  #   match_ratio: 0.65
  #   rating: 0.20
  #   prep_time: 0.10
  #   simplicity: 0.05
  #   prep_time_cap_mins: 90.0
  #   default_simplicity: 0.6

# Grocery suggestions
suggestions:
  max_extras: 10
  min_before_fallback: 3
  max_model_suggestions: 5
  # JSON rules files: [{key: ..., items: [...]}]
  # associations_file: ./associations.json
  # substitutes_file: ./substitutes.json
  # Start from empty tables instead of extending the built-in ones
  replace_builtin_rules: false
  empty_input_seed:
    - milk
    - eggs

# Output
output:
  # Format: auto, json, summary
  format: auto
  # file: results.json
  no_color: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
