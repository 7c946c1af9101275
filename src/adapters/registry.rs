//! One-time construction of the optional model adapters.
//!
//! Both adapters are built eagerly when the registry is created and are
//! read-only afterwards, so a registry can be shared behind an `Arc`.

use super::ranker::{TabularRanker, RANKER_ARTIFACT};
use super::set_completion::{EmbeddingSetCompletion, SET_COMPLETION_ARTIFACT, SET_COMPLETION_VOCAB};
use super::traits::{LearnedRanker, NoOpRanker, NoOpSetCompletion, SetCompletion};
use crate::config::ModelsConfig;
use crate::error::RecipeIntelError;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Environment variable that disables every optional model
pub const DISABLE_MODELS_ENV: &str = "RECIPE_INTEL_DISABLE_MODELS";

/// Whether the disable-models environment variable is set to a truthy value.
#[must_use]
pub fn models_disabled_by_env() -> bool {
    std::env::var(DISABLE_MODELS_ENV)
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

/// Loaded adapters plus the inference budget applied to each call.
#[derive(Clone)]
pub struct ModelRegistry {
    ranker: Arc<dyn LearnedRanker>,
    set_completion: Arc<dyn SetCompletion>,
    inference_budget: Option<Duration>,
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("ranker", &self.ranker.name())
            .field("set_completion", &self.set_completion.name())
            .field("inference_budget", &self.inference_budget)
            .finish()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::disabled()
    }
}

impl ModelRegistry {
    /// A registry with no models.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            ranker: Arc::new(NoOpRanker),
            set_completion: Arc::new(NoOpSetCompletion),
            inference_budget: None,
        }
    }

    /// Build a registry from explicit adapters.
    #[must_use]
    pub fn new(ranker: Arc<dyn LearnedRanker>, set_completion: Arc<dyn SetCompletion>) -> Self {
        Self {
            ranker,
            set_completion,
            inference_budget: None,
        }
    }

    /// Set the per-inference wall-clock budget.
    #[must_use]
    pub const fn with_inference_budget(mut self, budget: Option<Duration>) -> Self {
        self.inference_budget = budget;
        self
    }

    /// Load whatever artifacts are present under the configured directory.
    ///
    /// Never fails: absent artifacts are expected, and any load failure is
    /// logged and leaves that adapter unavailable. Honors
    /// [`DISABLE_MODELS_ENV`].
    #[must_use]
    pub fn load(config: &ModelsConfig) -> Self {
        Self::load_with_env_switch(config, models_disabled_by_env())
    }

    /// [`ModelRegistry::load`] with the environment switch passed in.
    #[must_use]
    pub fn load_with_env_switch(config: &ModelsConfig, env_disabled: bool) -> Self {
        let budget = config.inference_budget_ms.map(Duration::from_millis);

        if config.disabled || env_disabled {
            tracing::info!("Optional models disabled");
            return Self::disabled().with_inference_budget(budget);
        }

        let Some(dir) = config.dir.as_deref() else {
            tracing::debug!("No models directory configured");
            return Self::disabled().with_inference_budget(budget);
        };

        let ranker = load_ranker(dir);
        let set_completion = load_set_completion(dir);
        tracing::info!(
            "Models: ranker={}, set_completion={}",
            ranker.name(),
            set_completion.name()
        );

        Self::new(ranker, set_completion).with_inference_budget(budget)
    }

    /// The learned ranker (possibly a no-op)
    #[must_use]
    pub fn ranker(&self) -> &dyn LearnedRanker {
        self.ranker.as_ref()
    }

    /// The set-completion model (possibly a no-op)
    #[must_use]
    pub fn set_completion(&self) -> &dyn SetCompletion {
        self.set_completion.as_ref()
    }

    /// Per-inference wall-clock budget
    #[must_use]
    pub const fn inference_budget(&self) -> Option<Duration> {
        self.inference_budget
    }
}

fn load_ranker(dir: &Path) -> Arc<dyn LearnedRanker> {
    let path = dir.join(RANKER_ARTIFACT);
    match TabularRanker::load(&path) {
        Ok(ranker) => {
            tracing::info!("Loaded {} ranker from {}", ranker.name(), path.display());
            Arc::new(ranker)
        }
        Err(e) => {
            log_load_failure("ranker", &e);
            Arc::new(NoOpRanker)
        }
    }
}

fn load_set_completion(dir: &Path) -> Arc<dyn SetCompletion> {
    let weights = dir.join(SET_COMPLETION_ARTIFACT);
    let vocab = dir.join(SET_COMPLETION_VOCAB);
    match EmbeddingSetCompletion::load(&weights, Some(&vocab)) {
        Ok(model) => {
            tracing::info!(
                "Loaded set-completion model from {} (vocabulary: {})",
                weights.display(),
                model.vocabulary().map_or(0, super::Vocabulary::len)
            );
            Arc::new(model)
        }
        Err(e) => {
            log_load_failure("set-completion model", &e);
            Arc::new(NoOpSetCompletion)
        }
    }
}

fn log_load_failure(what: &str, err: &RecipeIntelError) {
    if err.is_absent_artifact() {
        tracing::debug!("No {what} available: {err}");
    } else {
        tracing::warn!("Failed to load {what}, continuing without it: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_truthy_values() {
        for v in ["1", "true", "YES", " yes "] {
            assert!(is_truthy(v), "{v}");
        }
        for v in ["", "0", "no", "off"] {
            assert!(!is_truthy(v), "{v}");
        }
    }

    #[test]
    fn test_disabled_registry() {
        let registry = ModelRegistry::disabled();
        assert!(!registry.ranker().is_available());
        assert!(!registry.set_completion().is_available());
    }

    #[test]
    fn test_load_from_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ModelsConfig {
            dir: Some(dir.path().to_path_buf()),
            ..ModelsConfig::default()
        };
        let registry = ModelRegistry::load_with_env_switch(&config, false);
        assert!(!registry.ranker().is_available());
        assert!(!registry.set_completion().is_available());
    }

    #[test]
    fn test_load_ranker_artifact() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(RANKER_ARTIFACT),
            r#"{"kind": "linear", "weights": [1.0, 0.0, 0.0, 0.0]}"#,
        )
        .unwrap();
        let config = ModelsConfig {
            dir: Some(dir.path().to_path_buf()),
            inference_budget_ms: Some(250),
            ..ModelsConfig::default()
        };
        let registry = ModelRegistry::load_with_env_switch(&config, false);
        assert!(registry.ranker().is_available());
        assert_eq!(registry.inference_budget(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_corrupt_ranker_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(RANKER_ARTIFACT), "not json").unwrap();
        let config = ModelsConfig {
            dir: Some(dir.path().to_path_buf()),
            ..ModelsConfig::default()
        };
        assert!(!ModelRegistry::load_with_env_switch(&config, false).ranker().is_available());
    }

    #[test]
    fn test_config_disable_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(RANKER_ARTIFACT),
            r#"{"kind": "linear", "weights": [1.0, 0.0, 0.0, 0.0]}"#,
        )
        .unwrap();
        let config = ModelsConfig {
            dir: Some(PathBuf::from(dir.path())),
            disabled: true,
            ..ModelsConfig::default()
        };
        assert!(!ModelRegistry::load_with_env_switch(&config, false).ranker().is_available());
    }

    #[test]
    fn test_env_switch_disables_models() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(RANKER_ARTIFACT),
            r#"{"kind": "linear", "weights": [1.0, 0.0, 0.0, 0.0]}"#,
        )
        .unwrap();
        let config = ModelsConfig {
            dir: Some(dir.path().to_path_buf()),
            ..ModelsConfig::default()
        };
        assert!(!ModelRegistry::load_with_env_switch(&config, true)
            .ranker()
            .is_available());
        assert!(ModelRegistry::load_with_env_switch(&config, false)
            .ranker()
            .is_available());
    }
}
