//! Configuration module for recipe-intel.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use recipe_intel::config::{AppConfig, ConfigPreset};
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::QuickMeals);
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .weights_preset("best-rated")
//!     .default_k(10)
//!     .build();
//!
//! // Load from file
//! use recipe_intel::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.recipe-intel.yaml` file in the working directory or
//! `~/.config/recipe-intel/`:
//!
//! ```yaml
//! catalog:
//!   path: ./recipes.json
//! ranking:
//!   weights_preset: quick-meals
//! models:
//!   dir: ./models
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_K, DEFAULT_WEIGHTS_PRESET, EMPTY_INPUT_SEED};
pub use types::{
    AppConfig, AppConfigBuilder, CatalogConfig, ModelsConfig, OutputConfig, RankingConfig,
    SuggestionsConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and autocomplete `.recipe-intel.yaml`.
pub fn generate_json_schema() -> crate::error::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
        .map_err(|e| crate::error::RecipeIntelError::config(e.to_string()))
}
