//! Top-K recipe ranking against a partial ingredient set.

use crate::adapters::{run_with_budget, ModelRegistry};
use crate::matching::normalize_set;
use crate::model::{Catalog, Recipe, ScoreSource, ScoredRecipe};
use crate::scoring::{HeuristicScorer, ScoreFeatures, ScoringWeights};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Recipe with its normalized ingredient set, computed once per catalog.
#[derive(Debug)]
struct PreparedRecipe {
    index: usize,
    ingredients: BTreeSet<String>,
}

/// Ranks catalog recipes for a user's ingredients.
///
/// Holds only immutable state, so one engine serves concurrent requests.
#[derive(Debug, Clone)]
#[must_use]
pub struct RankingEngine {
    catalog: Arc<Catalog>,
    prepared: Arc<Vec<PreparedRecipe>>,
    scorer: HeuristicScorer,
    models: ModelRegistry,
}

impl RankingEngine {
    /// Create an engine with default weights and no learned ranker.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_config(catalog, ScoringWeights::default(), ModelRegistry::disabled())
    }

    /// Create an engine with explicit weights and models.
    pub fn with_config(catalog: Arc<Catalog>, weights: ScoringWeights, models: ModelRegistry) -> Self {
        let prepared = catalog
            .iter()
            .enumerate()
            .filter_map(|(index, recipe)| {
                let ingredients = normalize_set(&recipe.ingredients);
                if ingredients.is_empty() {
                    tracing::debug!("Skipping '{}': no usable ingredients", recipe.name);
                    None
                } else {
                    Some(PreparedRecipe { index, ingredients })
                }
            })
            .collect();

        Self {
            catalog,
            prepared: Arc::new(prepared),
            scorer: HeuristicScorer::new(weights),
            models,
        }
    }

    /// The catalog being ranked
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The heuristic scorer
    #[must_use]
    pub const fn scorer(&self) -> &HeuristicScorer {
        &self.scorer
    }

    /// Whether final scores come from a learned ranker
    #[must_use]
    pub fn uses_learned_ranker(&self) -> bool {
        self.models.ranker().is_available()
    }

    /// Rank recipes for `user_ingredients`, returning at most `k`.
    ///
    /// Recipes sharing no ingredient with the user are never returned.
    /// Results are ordered by score, descending; equal scores keep catalog
    /// order.
    pub fn rank<S: AsRef<str>>(&self, user_ingredients: &[S], k: usize) -> Vec<ScoredRecipe> {
        if k == 0 {
            return Vec::new();
        }

        let user = normalize_set(user_ingredients);
        if user.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<ScoredRecipe> = self
            .prepared
            .par_iter()
            .filter_map(|prepared| self.score_candidate(prepared, &user))
            .collect();

        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(k);

        tracing::debug!(
            "Ranked {} candidates for {} ingredients",
            candidates.len(),
            user.len()
        );
        candidates
    }

    fn score_candidate(
        &self,
        prepared: &PreparedRecipe,
        user: &BTreeSet<String>,
    ) -> Option<ScoredRecipe> {
        let recipe = &self.catalog.recipes()[prepared.index];
        let matched: Vec<String> = prepared.ingredients.intersection(user).cloned().collect();
        if matched.is_empty() {
            return None;
        }
        let missing: Vec<String> = prepared.ingredients.difference(user).cloned().collect();
        let total = prepared.ingredients.len();

        let features = self.scorer.features(recipe, matched.len(), total);
        let (score, score_source) = match self.learned_score(recipe, &features) {
            Some(score) => (score, ScoreSource::Learned),
            None => (self.scorer.score(&features), ScoreSource::Heuristic),
        };

        Some(ScoredRecipe {
            name: recipe.name.clone(),
            matched,
            missing,
            total,
            score,
            rating: recipe.rating,
            prep_time_mins: recipe.prep_time_mins,
            score_source,
        })
    }

    fn learned_score(&self, recipe: &Recipe, features: &ScoreFeatures) -> Option<f64> {
        let ranker = self.models.ranker();
        if !ranker.is_available() {
            return None;
        }
        let input = features.to_array();
        match run_with_budget(self.models.inference_budget(), || ranker.predict(&input)) {
            Ok(score) => Some(score),
            Err(e) => {
                tracing::debug!(
                    "Ranker failed for '{}', using heuristic score: {e}",
                    recipe.name
                );
                None
            }
        }
    }
}
