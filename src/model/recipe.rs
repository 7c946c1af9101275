//! Recipe records and per-request scored results.

use serde::{Deserialize, Serialize};

/// Rating assumed when a source record omits one
pub const DEFAULT_RATING: f64 = 4.0;

/// Prep time assumed when a source record omits one
pub const DEFAULT_PREP_TIME_MINS: u32 = 20;

/// Highest rating a recipe can carry
pub const MAX_RATING: f64 = 5.0;

/// A catalog recipe. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Display name
    pub name: String,
    /// Ingredients in source order, original casing
    pub ingredients: Vec<String>,
    /// Rating in `[0, 5]`
    pub rating: f64,
    /// Preparation time in minutes
    pub prep_time_mins: u32,
    /// Optional ordered step list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
}

impl Recipe {
    /// Create a recipe with default rating and prep time and no steps.
    pub fn new<I, S>(name: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            rating: DEFAULT_RATING,
            prep_time_mins: DEFAULT_PREP_TIME_MINS,
            steps: None,
        }
    }

    /// Set the rating, clamped into `[0, 5]`.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating.clamp(0.0, MAX_RATING);
        self
    }

    /// Set the prep time.
    #[must_use]
    pub const fn with_prep_time(mut self, minutes: u32) -> Self {
        self.prep_time_mins = minutes;
        self
    }

    /// Set the step list.
    #[must_use]
    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = Some(steps.into_iter().map(Into::into).collect());
        self
    }

    /// Number of steps, zero when no step list is present.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.as_ref().map_or(0, Vec::len)
    }
}

/// Which scorer produced a [`ScoredRecipe`]'s final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// Weighted heuristic formula
    Heuristic,
    /// Externally trained ranker
    Learned,
}

/// A recipe scored against one request's ingredient set.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecipe {
    /// Recipe display name
    pub name: String,
    /// Normalized ingredients the user holds, sorted
    pub matched: Vec<String>,
    /// Normalized ingredients the user lacks, sorted
    pub missing: Vec<String>,
    /// Size of the recipe's normalized ingredient set
    pub total: usize,
    /// Final score
    pub score: f64,
    /// Catalog rating
    pub rating: f64,
    /// Catalog prep time
    pub prep_time_mins: u32,
    /// Scorer that produced `score`
    pub score_source: ScoreSource,
}

impl ScoredRecipe {
    /// Number of matched ingredients
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.matched.len()
    }

    /// `"matched/total"` label
    #[must_use]
    pub fn match_label(&self) -> String {
        format!("{}/{}", self.matched.len(), self.total)
    }
}

/// Wire shape: `{name, match, missing, score, rating, time}`.
#[derive(Serialize)]
struct ScoredRecipeWire<'a> {
    name: &'a str,
    #[serde(rename = "match")]
    match_label: String,
    missing: &'a [String],
    score: f64,
    rating: f64,
    time: u32,
}

impl Serialize for ScoredRecipe {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ScoredRecipeWire {
            name: &self.name,
            match_label: self.match_label(),
            missing: &self.missing,
            score: self.score,
            rating: self.rating,
            time: self.prep_time_mins,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored() -> ScoredRecipe {
        ScoredRecipe {
            name: "Scrambled Eggs".to_string(),
            matched: vec!["butter".into(), "eggs".into()],
            missing: vec!["pepper".into(), "salt".into()],
            total: 4,
            score: 0.62,
            rating: 4.4,
            prep_time_mins: 8,
            score_source: ScoreSource::Heuristic,
        }
    }

    #[test]
    fn test_builder_defaults() {
        let recipe = Recipe::new("Toast", ["bread"]);
        assert_eq!(recipe.rating, DEFAULT_RATING);
        assert_eq!(recipe.prep_time_mins, DEFAULT_PREP_TIME_MINS);
        assert_eq!(recipe.step_count(), 0);
    }

    #[test]
    fn test_rating_is_clamped() {
        assert_eq!(Recipe::new("x", ["a"]).with_rating(7.5).rating, 5.0);
        assert_eq!(Recipe::new("x", ["a"]).with_rating(-1.0).rating, 0.0);
    }

    #[test]
    fn test_match_label() {
        assert_eq!(scored().match_label(), "2/4");
        assert_eq!(scored().match_count(), 2);
    }

    #[test]
    fn test_wire_format() {
        let value = serde_json::to_value(scored()).unwrap();
        assert_eq!(value["name"], "Scrambled Eggs");
        assert_eq!(value["match"], "2/4");
        assert_eq!(value["missing"], serde_json::json!(["pepper", "salt"]));
        assert_eq!(value["time"], 8);
        assert!(value.get("matched").is_none());
    }
}
