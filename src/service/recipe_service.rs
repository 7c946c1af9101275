//! Engine facade built once at startup and shared across requests.

use crate::adapters::{models_disabled_by_env, ModelRegistry};
use crate::config::{AppConfig, SuggestionsConfig, Validatable};
use crate::error::{RecipeIntelError, Result};
use crate::matching::{normalize_list, AssociationEngine, AssociationTable, RuleTable, SubstituteTable};
use crate::model::{Catalog, ScoredRecipe};
use crate::ranking::RankingEngine;
use crate::suggest::{SuggestionOrchestrator, Suggestions};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Ranked recipes plus suggestions for the best one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendation {
    pub recommendations: Vec<ScoredRecipe>,
    pub smart_suggestions: Suggestions,
}

/// Ranking and suggestion over one catalog, rule set and model registry.
///
/// All state is read-only after construction; clone it or wrap it in an
/// `Arc` to serve concurrent callers.
#[derive(Debug, Clone)]
#[must_use]
pub struct RecipeService {
    ranking: RankingEngine,
    suggestions: SuggestionOrchestrator,
    default_k: usize,
    empty_input_seed: Vec<String>,
}

impl RecipeService {
    /// Build everything a configuration describes.
    ///
    /// Catalog and model problems degrade to the built-in recipes and the
    /// heuristic path. Invalid configuration values and unreadable rule files
    /// are returned as errors. Models are skipped when
    /// [`DISABLE_MODELS_ENV`](crate::adapters::DISABLE_MODELS_ENV) is set.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::from_config_with_env_switch(config, models_disabled_by_env())
    }

    /// [`RecipeService::from_config`] with the disable-models switch passed in
    /// instead of read from the environment.
    pub fn from_config_with_env_switch(
        config: &AppConfig,
        models_env_disabled: bool,
    ) -> Result<Self> {
        let errors = config.validate();
        if !errors.is_empty() {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(RecipeIntelError::validation(message));
        }

        let catalog = Arc::new(Catalog::load_or_builtin(config.catalog.path.as_deref()));
        let models =
            ModelRegistry::load_with_env_switch(&config.models, models_env_disabled);
        let engine = build_association_engine(&config.suggestions)?;

        let ranking = RankingEngine::with_config(
            catalog,
            config.ranking.scoring_weights(),
            models.clone(),
        );
        let suggestions = SuggestionOrchestrator::new(engine)
            .with_models(models)
            .with_max_model_suggestions(config.suggestions.max_model_suggestions);

        Ok(Self {
            ranking,
            suggestions,
            default_k: config.ranking.default_k,
            empty_input_seed: config.suggestions.empty_input_seed.clone(),
        })
    }

    /// Build from already constructed engines.
    pub fn from_parts(ranking: RankingEngine, suggestions: SuggestionOrchestrator) -> Self {
        let defaults = AppConfig::default();
        Self {
            ranking,
            suggestions,
            default_k: defaults.ranking.default_k,
            empty_input_seed: defaults.suggestions.empty_input_seed,
        }
    }

    /// Built-in catalog and rules, no models.
    pub fn builtin() -> Self {
        Self::from_parts(
            RankingEngine::new(Arc::new(Catalog::builtin())),
            SuggestionOrchestrator::default(),
        )
    }

    /// Number of recipes returned when the caller does not say
    #[must_use]
    pub const fn default_k(&self) -> usize {
        self.default_k
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        self.ranking.catalog()
    }

    #[must_use]
    pub const fn ranking(&self) -> &RankingEngine {
        &self.ranking
    }

    /// Top `k` recipes for the user's ingredients.
    #[must_use]
    pub fn rank<S: AsRef<str>>(&self, ingredients: &[S], k: usize) -> Vec<ScoredRecipe> {
        self.ranking.rank(ingredients, k)
    }

    /// Substitutes for `missing` and extras for `ingredients`.
    #[must_use]
    pub fn suggest<S, M>(&self, ingredients: &[S], missing: &[M]) -> Suggestions
    where
        S: AsRef<str>,
        M: AsRef<str>,
    {
        self.suggestions.suggest(ingredients, missing)
    }

    /// Rank recipes, then suggest for the top recipe's missing ingredients.
    ///
    /// Input that normalizes to nothing is ranked as the seed list instead.
    /// Suggestions always use the caller's own ingredients.
    #[must_use]
    pub fn recommend<S: AsRef<str>>(&self, ingredients: &[S], k: usize) -> Recommendation {
        let recommendations = if normalize_list(ingredients).is_empty() {
            tracing::debug!("Empty input, ranking seed ingredients {:?}", self.empty_input_seed);
            self.ranking.rank(&self.empty_input_seed, k)
        } else {
            self.ranking.rank(ingredients, k)
        };

        let smart_suggestions = recommendations
            .first()
            .map(|top| self.suggestions.suggest(ingredients, &top.missing))
            .unwrap_or_default();

        Recommendation {
            recommendations,
            smart_suggestions,
        }
    }
}

impl Default for RecipeService {
    fn default() -> Self {
        Self::builtin()
    }
}

fn build_association_engine(config: &SuggestionsConfig) -> Result<AssociationEngine> {
    let (mut associations, mut substitutes) = if config.replace_builtin_rules {
        (AssociationTable::new(), SubstituteTable::new())
    } else {
        (AssociationTable::with_builtins(), SubstituteTable::with_builtins())
    };

    if let Some(path) = &config.associations_file {
        load_rules(associations.rules_mut(), path, "association")?;
    }
    if let Some(path) = &config.substitutes_file {
        load_rules(substitutes.rules_mut(), path, "substitute")?;
    }

    Ok(AssociationEngine::new(associations, substitutes)
        .with_limits(config.max_extras, config.min_before_fallback))
}

fn load_rules(table: &mut RuleTable, path: &Path, kind: &str) -> Result<()> {
    let count = table.load_json_file(path)?;
    tracing::info!(
        "Loaded {count} {kind} rules from {} ({} total)",
        path.display(),
        table.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_with(f: impl FnOnce(&mut AppConfig)) -> AppConfig {
        let mut config = AppConfig::default();
        config.models.disabled = true;
        f(&mut config);
        config
    }

    #[test]
    fn test_recommend_uses_top_missing() {
        let service = RecipeService::builtin();
        let result = service.recommend(&["eggs", "butter"], 3);
        assert!(!result.recommendations.is_empty());
        let top = &result.recommendations[0];
        let expected = service.suggest(&["eggs", "butter"], &top.missing);
        assert_eq!(result.smart_suggestions, expected);
    }

    #[test]
    fn test_recommend_empty_input_uses_seed() {
        let service = RecipeService::builtin();
        let empty: [&str; 0] = [];
        let result = service.recommend(&empty, 5);
        assert_eq!(result.recommendations, service.rank(&["milk", "eggs"], 5));
        assert!(!result.recommendations.is_empty());
    }

    #[test]
    fn test_recommend_without_matches_has_empty_suggestions() {
        let result = RecipeService::builtin().recommend(&["saffron"], 5);
        assert!(result.recommendations.is_empty());
        assert!(result.smart_suggestions.is_empty());
    }

    #[test]
    fn test_from_config_defaults() {
        let service = RecipeService::from_config(&config_with(|_| {})).unwrap();
        assert_eq!(service.catalog().len(), 4);
        assert_eq!(service.default_k(), 5);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = config_with(|c| c.ranking.weights_preset = "nope".to_string());
        assert!(matches!(
            RecipeService::from_config(&config),
            Err(RecipeIntelError::Validation(_))
        ));
    }

    #[test]
    fn test_extras_cap_bounded() {
        let config = config_with(|c| c.suggestions.max_extras = 50);
        assert!(matches!(
            RecipeService::from_config(&config),
            Err(RecipeIntelError::Validation(_))
        ));

        let service = RecipeService::from_config(&config_with(|_| {})).unwrap();
        let held = ["pasta", "chicken breast", "bread", "flour", "lettuce", "salmon"];
        let extras = service.suggest(&held, &Vec::<String>::new()).extra_suggestions;
        assert_eq!(extras.len(), 10);
    }

    #[test]
    fn test_malformed_rules_file_fails_fast() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"{not json").unwrap();
        let config = config_with(|c| c.suggestions.associations_file = Some(file.path().into()));
        assert!(matches!(
            RecipeService::from_config(&config),
            Err(RecipeIntelError::Rules { .. })
        ));
    }

    #[test]
    fn test_rules_file_extends_builtins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"[{"key": "Tea", "items": ["lemon", "honey", "biscuits"]}]"#,
        )
        .unwrap();
        let config = config_with(|c| c.suggestions.associations_file = Some(file.path().into()));
        let service = RecipeService::from_config(&config).unwrap();

        let out = service.suggest(&["green tea"], &Vec::<String>::new());
        assert_eq!(out.extra_suggestions, vec!["lemon", "honey", "biscuits"]);
        let out = service.suggest(&["salt"], &Vec::<String>::new());
        assert!(out.extra_suggestions.contains(&"pepper".to_string()));
    }

    #[test]
    fn test_rules_file_replaces_builtins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"[{"key": "milk", "items": ["rice milk"]}]"#)
            .unwrap();
        let config = config_with(|c| {
            c.suggestions.substitutes_file = Some(file.path().into());
            c.suggestions.replace_builtin_rules = true;
        });
        let service = RecipeService::from_config(&config).unwrap();
        let out = service.suggest(&["salt"], &["milk", "butter"]);
        assert_eq!(out.substitutes.len(), 1);
        assert_eq!(out.substitutes["milk"], vec!["rice milk"]);
    }

    #[test]
    fn test_bad_catalog_falls_back() {
        let config = config_with(|c| {
            c.catalog.path = Some(PathBuf::from("/nonexistent/recipes.json"));
        });
        let service = RecipeService::from_config(&config).unwrap();
        assert_eq!(service.catalog().len(), 4);
    }

    #[test]
    fn test_service_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RecipeService>();
    }
}
