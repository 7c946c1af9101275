//! Recipe catalog loading.
//!
//! The catalog is read once at startup. A missing or malformed source is
//! never fatal: the built-in recipe set is used instead.

use super::recipe::{Recipe, DEFAULT_PREP_TIME_MINS, DEFAULT_RATING, MAX_RATING};
use crate::error::{CatalogErrorKind, ErrorContext, RecipeIntelError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Where the catalog's recipes came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Compiled-in fallback set
    BuiltIn,
    /// Loaded from a JSON file
    File(PathBuf),
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BuiltIn => write!(f, "built-in"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Ordered, read-only collection of recipes.
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    source: CatalogSource,
}

impl Catalog {
    /// The compiled-in recipe set.
    #[must_use]
    pub fn builtin() -> Self {
        let recipes = vec![
            Recipe::new(
                "Classic Pancakes",
                ["milk", "eggs", "flour", "sugar", "butter"],
            )
            .with_rating(4.6)
            .with_prep_time(15),
            Recipe::new("Scrambled Eggs", ["eggs", "butter", "salt", "pepper"])
                .with_rating(4.4)
                .with_prep_time(8),
            Recipe::new(
                "Tomato Pasta",
                ["pasta", "tomato sauce", "garlic", "olive oil", "salt"],
            )
            .with_rating(4.5)
            .with_prep_time(25),
            Recipe::new(
                "Chicken Rice Bowl",
                ["chicken breast", "rice", "soy sauce", "garlic", "onions"],
            )
            .with_rating(4.3)
            .with_prep_time(30),
        ];
        Self {
            recipes,
            source: CatalogSource::BuiltIn,
        }
    }

    /// Build a catalog from already-constructed recipes.
    #[must_use]
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes,
            source: CatalogSource::BuiltIn,
        }
    }

    /// Parse a catalog from a JSON document.
    ///
    /// Records without a non-empty name or an ingredient list are skipped.
    /// A document that is not a list, has an unusable field value, or yields
    /// no recipes at all is an error.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(json)?;
        let Value::Array(records) = raw else {
            return Err(RecipeIntelError::catalog(
                "parsing catalog",
                CatalogErrorKind::NotAList,
            ));
        };

        let mut recipes = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if let Some(recipe) =
                parse_record(record).with_context(|| format!("record {idx}"))?
            {
                recipes.push(recipe);
            }
        }

        if recipes.is_empty() {
            return Err(RecipeIntelError::catalog(
                "parsing catalog",
                CatalogErrorKind::Empty,
            ));
        }

        Ok(Self::from_recipes(recipes))
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RecipeIntelError::io(path, e))?;
        let mut catalog = Self::from_json_str(&content)
            .with_context(|| format!("loading {}", path.display()))?;
        catalog.source = CatalogSource::File(path.to_path_buf());
        Ok(catalog)
    }

    /// Load from `path` if given, falling back to the built-in set.
    #[must_use]
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No catalog path configured, using built-in recipes");
            return Self::builtin();
        };

        if !path.exists() {
            tracing::warn!(
                "Catalog not found at {}, using built-in recipes",
                path.display()
            );
            return Self::builtin();
        }

        match Self::from_path(path) {
            Ok(catalog) => {
                tracing::info!(
                    "Loaded {} recipes from {}",
                    catalog.len(),
                    path.display()
                );
                catalog
            }
            Err(e) => {
                tracing::warn!("Failed to load catalog: {e}; using built-in recipes");
                Self::builtin()
            }
        }
    }

    /// Recipes in catalog order
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Iterate recipes in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    /// Number of recipes
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Where the recipes came from
    #[must_use]
    pub const fn source(&self) -> &CatalogSource {
        &self.source
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}

// ============================================================================
// Record parsing
// ============================================================================

/// `Ok(None)` means "skip this record"; `Err` means the source is malformed.
fn parse_record(record: &Value) -> Result<Option<Recipe>> {
    let Value::Object(fields) = record else {
        return Ok(None);
    };

    let name = fields
        .get("name")
        .and_then(value_to_text)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    if name.is_empty() {
        return Ok(None);
    }

    let Some(Value::Array(raw_ingredients)) = fields.get("ingredients") else {
        return Ok(None);
    };
    let ingredients: Vec<String> = raw_ingredients.iter().filter_map(value_to_text).collect();

    let rating = match fields.get("rating") {
        None => DEFAULT_RATING,
        Some(value) => parse_float(value, "rating")?,
    };

    let prep_time_mins = match fields.get("prep_time_mins") {
        None => DEFAULT_PREP_TIME_MINS,
        Some(value) => parse_minutes(value)?,
    };

    let steps = match fields.get("steps") {
        Some(Value::Array(raw_steps)) => Some(raw_steps.iter().filter_map(value_to_text).collect()),
        _ => None,
    };

    Ok(Some(Recipe {
        name,
        ingredients,
        rating: rating.clamp(0.0, MAX_RATING),
        prep_time_mins,
        steps,
    }))
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_float(value: &Value, field: &str) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).ok_or_else(|| {
        RecipeIntelError::catalog(
            format!("field '{field}'"),
            CatalogErrorKind::InvalidJson(format!("expected a number, got {value}")),
        )
    })
}

/// Whole minutes; fractional values truncate and negatives clamp to zero.
fn parse_minutes(value: &Value) -> Result<u32> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<i64>().ok().map(|v| v as f64),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v.trunc().clamp(0.0, f64::from(u32::MAX)) as u32),
        _ => Err(RecipeIntelError::catalog(
            "field 'prep_time_mins'",
            CatalogErrorKind::InvalidJson(format!("expected whole minutes, got {value}")),
        )),
    }
}
