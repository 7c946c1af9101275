//! Combines rule lookups and the optional set-completion model.

use crate::adapters::{hashed_token_id, run_with_budget, ModelRegistry, SetCompletion, PADDING_TOKEN};
use crate::matching::{normalize_list, AssociationEngine, SubstituteMatches};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

/// Default cap on model-derived suggestions
pub const DEFAULT_MAX_MODEL_SUGGESTIONS: usize = 5;

/// "What else to buy" payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    /// Missing ingredient → substitutes, in lookup order
    pub substitutes: IndexMap<String, Vec<String>>,
    /// Co-occurrence items, then popular fallbacks
    pub extra_suggestions: Vec<String>,
    /// Missing ingredient → why substitutes were offered
    pub explanations: IndexMap<String, String>,
    /// Items predicted by the set-completion model, when it has a vocabulary
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub model_suggestions: Vec<String>,
}

impl Suggestions {
    /// Whether nothing at all was suggested
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.substitutes.is_empty()
            && self.extra_suggestions.is_empty()
            && self.model_suggestions.is_empty()
    }
}

/// Produces [`Suggestions`] from held and missing ingredients.
#[derive(Debug, Clone)]
#[must_use]
pub struct SuggestionOrchestrator {
    engine: AssociationEngine,
    models: ModelRegistry,
    max_model_suggestions: usize,
}

impl Default for SuggestionOrchestrator {
    fn default() -> Self {
        Self::new(AssociationEngine::default())
    }
}

impl SuggestionOrchestrator {
    /// Create an orchestrator without models.
    pub fn new(engine: AssociationEngine) -> Self {
        Self {
            engine,
            models: ModelRegistry::disabled(),
            max_model_suggestions: DEFAULT_MAX_MODEL_SUGGESTIONS,
        }
    }

    /// Attach optional models.
    pub fn with_models(mut self, models: ModelRegistry) -> Self {
        self.models = models;
        self
    }

    /// Cap model-derived suggestions.
    pub const fn with_max_model_suggestions(mut self, max: usize) -> Self {
        self.max_model_suggestions = max;
        self
    }

    #[must_use]
    pub const fn engine(&self) -> &AssociationEngine {
        &self.engine
    }

    /// Suggest substitutes for `missing` and extras for `ingredients`.
    ///
    /// Never fails. Empty input yields the popular fallback items.
    #[must_use]
    pub fn suggest<S, M>(&self, ingredients: &[S], missing: &[M]) -> Suggestions
    where
        S: AsRef<str>,
        M: AsRef<str>,
    {
        let held = normalize_list(ingredients);
        let SubstituteMatches {
            substitutes,
            explanations,
        } = self.engine.substitutes_for_missing(missing);
        let extra_suggestions = self.engine.co_occurring(&held);
        let model_suggestions = self.model_suggestions(&held, &extra_suggestions);

        Suggestions {
            substitutes,
            extra_suggestions,
            explanations,
            model_suggestions,
        }
    }

    fn model_suggestions(&self, held: &[String], extras: &[String]) -> Vec<String> {
        let model = self.models.set_completion();
        if !model.is_available() || held.is_empty() {
            return Vec::new();
        }

        let token_ids = token_ids(model, held);
        if token_ids.is_empty() {
            tracing::debug!("No held ingredient maps to a model token");
            return Vec::new();
        }

        let budget = self.models.inference_budget();
        let logits = match run_with_budget(budget, || model.complete(&token_ids)) {
            Ok(logits) => logits,
            Err(e) => {
                tracing::warn!("Set-completion inference failed, ignoring: {e}");
                return Vec::new();
            }
        };

        let Some(vocab) = model.vocabulary() else {
            tracing::debug!(
                "Set-completion model has no vocabulary; {} logits unused",
                logits.len()
            );
            return Vec::new();
        };

        let mut ranked: Vec<(u32, f32)> = logits
            .iter()
            .enumerate()
            .filter(|(_, logit)| logit.is_finite())
            .filter_map(|(id, logit)| u32::try_from(id).ok().map(|id| (id, *logit)))
            .filter(|(id, _)| *id != PADDING_TOKEN)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut excluded: HashSet<&str> = held.iter().chain(extras).map(String::as_str).collect();
        let mut suggestions = Vec::new();
        for (id, _) in ranked {
            if suggestions.len() >= self.max_model_suggestions {
                break;
            }
            if let Some(name) = vocab.name_of(id) {
                if excluded.insert(name) {
                    suggestions.push(name.to_string());
                }
            }
        }
        suggestions
    }
}

/// Vocabulary ids for `held`, or placeholder hashes without a vocabulary.
fn token_ids(model: &dyn SetCompletion, held: &[String]) -> Vec<u32> {
    let vocab_size = model.vocab_size();
    held.iter()
        .filter_map(|name| match model.vocabulary() {
            Some(vocab) => vocab.token_id(name),
            None => Some(hashed_token_id(name, vocab_size)),
        })
        .filter(|id| *id != PADDING_TOKEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{NoOpRanker, Vocabulary};
    use crate::error::{RecipeIntelError, Result};
    use crate::matching::POPULAR_FALLBACK;
    use std::sync::{Arc, Mutex};

    /// Scores each id by a fixed table and records the ids it was given.
    struct ScriptedModel {
        logits: Vec<f32>,
        vocabulary: Option<Vocabulary>,
        seen: Mutex<Vec<u32>>,
        fail: bool,
    }

    impl ScriptedModel {
        fn new(logits: Vec<f32>, vocabulary: Option<Vocabulary>) -> Self {
            Self {
                logits,
                vocabulary,
                seen: Mutex::new(Vec::new()),
                fail: false,
            }
        }
    }

    impl SetCompletion for ScriptedModel {
        fn complete(&self, token_ids: &[u32]) -> Result<Vec<f32>> {
            self.seen.lock().unwrap().extend_from_slice(token_ids);
            if self.fail {
                return Err(RecipeIntelError::inference("scripted failure"));
            }
            Ok(self.logits.clone())
        }
        fn vocab_size(&self) -> usize {
            self.logits.len()
        }
        fn vocabulary(&self) -> Option<&Vocabulary> {
            self.vocabulary.as_ref()
        }
        fn name(&self) -> &'static str {
            "scripted"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    fn vocab() -> Vocabulary {
        Vocabulary::from_pairs([
            ("milk", 1),
            ("eggs", 2),
            ("cinnamon", 3),
            ("vanilla", 4),
            ("nutmeg", 5),
        ])
    }

    fn with_model(model: Arc<ScriptedModel>) -> SuggestionOrchestrator {
        SuggestionOrchestrator::new(AssociationEngine::default())
            .with_models(ModelRegistry::new(Arc::new(NoOpRanker), model))
    }

    #[test]
    fn test_substitutes_and_extras() {
        let out = SuggestionOrchestrator::default().suggest(&["pasta"], &["cheese", "basil"]);
        assert_eq!(out.substitutes["cheese"], vec!["mozzarella", "cheddar"]);
        assert!(!out.substitutes.contains_key("basil"));
        assert_eq!(out.explanations.len(), 1);
        assert_eq!(out.extra_suggestions[0], "tomato sauce");
        assert!(out.model_suggestions.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        let out = SuggestionOrchestrator::default().suggest(&empty, &empty);
        assert!(out.substitutes.is_empty());
        assert_eq!(out.extra_suggestions, POPULAR_FALLBACK);
    }

    #[test]
    fn test_model_suggestions_skip_held_and_extras() {
        // logits favour eggs (extra), then nutmeg, vanilla, cinnamon
        let model = Arc::new(ScriptedModel::new(
            vec![9.0, 0.0, 8.0, 1.0, 2.0, 3.0],
            Some(vocab()),
        ));
        let out = with_model(model.clone())
            .with_max_model_suggestions(2)
            .suggest(&["Milk"], &Vec::<String>::new());
        assert!(out.extra_suggestions.contains(&"eggs".to_string()));
        assert_eq!(out.model_suggestions, vec!["nutmeg", "vanilla"]);
        assert_eq!(*model.seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_model_without_vocabulary_is_auxiliary() {
        let model = Arc::new(ScriptedModel::new(vec![0.5; 50], None));
        let plain = SuggestionOrchestrator::default().suggest(&["salt", "pasta"], &["milk"]);
        let out = with_model(model.clone()).suggest(&["salt", "pasta"], &["milk"]);
        assert_eq!(out, plain);
        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|id| (1..50).contains(id)));
    }

    #[test]
    fn test_model_failure_is_ignored() {
        let mut model = ScriptedModel::new(vec![1.0; 6], Some(vocab()));
        model.fail = true;
        let out = with_model(Arc::new(model)).suggest(&["milk"], &["butter"]);
        let plain = SuggestionOrchestrator::default().suggest(&["milk"], &["butter"]);
        assert_eq!(out, plain);
    }

    #[test]
    fn test_unknown_names_not_sent_to_model() {
        let model = Arc::new(ScriptedModel::new(vec![1.0; 6], Some(vocab())));
        let out = with_model(model.clone()).suggest(&["saffron"], &Vec::<String>::new());
        assert!(out.model_suggestions.is_empty());
        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_model_suggestions_omitted_from_json_when_empty() {
        let out = SuggestionOrchestrator::default().suggest(&["salt"], &Vec::<String>::new());
        let json = serde_json::to_value(&out).unwrap();
        assert!(json.get("model_suggestions").is_none());
        assert!(json["extra_suggestions"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v == "pepper"));
    }
}
