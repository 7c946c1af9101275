//! Curated rule tables for co-purchase associations and substitutes.
//!
//! Tables are ordered: lookups that scan a table visit keys in declaration
//! order, which keeps suggestions deterministic.

use crate::error::{ErrorContext, RecipeIntelError, Result, RulesErrorKind};
use crate::matching::normalizer::normalize;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordered mapping from a normalized ingredient key to item names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    entries: IndexMap<String, Vec<String>>,
}

impl RuleTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the items for a key.
    ///
    /// Keys and items are normalized; empty items and duplicates are dropped.
    /// An empty key is ignored and reported as `false`.
    pub fn insert(&mut self, key: &str, items: &[&str]) -> bool {
        let key = normalize(key);
        if key.is_empty() {
            return false;
        }
        let mut normalized: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            let item = normalize(item);
            if !item.is_empty() && !normalized.contains(&item) {
                normalized.push(item);
            }
        }
        self.entries.insert(key, normalized);
        true
    }

    /// Exact lookup of an already-normalized key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Iterate entries in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge rules from JSON (`[{"key": ..., "items": [...]}]`).
    ///
    /// Existing keys are replaced, new keys are appended. Returns the number
    /// of entries read. Any malformed entry rejects the whole document.
    pub fn load_json(&mut self, json: &str) -> Result<usize> {
        let entries: Vec<RuleEntry> = serde_json::from_str(json).map_err(|e| {
            RecipeIntelError::rules("parsing rule JSON", RulesErrorKind::InvalidJson(e.to_string()))
        })?;

        if let Some(idx) = entries.iter().position(|e| normalize(&e.key).is_empty()) {
            return Err(RecipeIntelError::rules(
                "parsing rule JSON",
                RulesErrorKind::EmptyKey(idx),
            ));
        }

        let count = entries.len();
        for entry in entries {
            let items: Vec<&str> = entry.items.iter().map(String::as_str).collect();
            self.insert(&entry.key, &items);
        }
        Ok(count)
    }

    /// Merge rules from a JSON file
    pub fn load_json_file(&mut self, path: &Path) -> Result<usize> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RecipeIntelError::io(path, e))?;
        self.load_json(&content)
            .with_context(|| format!("loading rules from {}", path.display()))
    }

    /// Export rules to JSON in table order
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        let entries: Vec<RuleEntry> = self
            .entries
            .iter()
            .map(|(key, items)| RuleEntry {
                key: key.clone(),
                items: items.clone(),
            })
            .collect();
        serde_json::to_string_pretty(&entries)
    }
}

/// Entry in the rule table JSON format
#[derive(Debug, Serialize, Deserialize)]
struct RuleEntry {
    key: String,
    #[serde(default)]
    items: Vec<String>,
}

// ============================================================================
// Association table
// ============================================================================

/// Items frequently bought together with an ingredient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationTable {
    rules: RuleTable,
}

impl AssociationTable {
    /// Create an empty association table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an association table with the built-in rules
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut rules = RuleTable::new();
        rules.insert("milk", &["eggs", "bread", "butter", "cereal"]);
        rules.insert(
            "pasta",
            &["tomato sauce", "cheese", "garlic", "ground beef", "olive oil"],
        );
        rules.insert(
            "chicken breast",
            &["rice", "onions", "bell peppers", "broccoli", "soy sauce"],
        );
        rules.insert("salt", &["pepper", "olive oil", "garlic powder"]);
        rules.insert("bread", &["butter", "jam", "cheese", "ham", "avocado"]);
        rules.insert("avocado", &["lemon", "bread", "eggs", "tomatoes", "onions"]);
        rules.insert("coffee", &["milk", "sugar", "creamer", "biscuits"]);
        rules.insert(
            "flour",
            &["sugar", "eggs", "butter", "baking powder", "milk"],
        );
        rules.insert("potato", &["onions", "carrots", "cooking oil", "salt"]);
        rules.insert("yogurt", &["honey", "granola", "berries", "banana"]);
        rules.insert(
            "lettuce",
            &["tomatoes", "cucumber", "onions", "olive oil", "vinegar"],
        );
        rules.insert("salmon", &["lemon", "asparagus", "olive oil", "garlic"]);
        Self { rules }
    }

    /// Wrap an existing rule table
    #[must_use]
    pub const fn from_rules(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Mutable access for merging external rule files
    pub fn rules_mut(&mut self) -> &mut RuleTable {
        &mut self.rules
    }

    /// Underlying rules
    #[must_use]
    pub const fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Item lists whose key is a substring of `ingredient` or contains it.
    ///
    /// Partial matching lets "chicken breast fillet" hit the "chicken breast"
    /// rule. It also lets unrelated names that happen to contain a key match.
    pub fn related<'a>(&'a self, ingredient: &'a str) -> impl Iterator<Item = &'a [String]> + 'a {
        self.rules.iter().filter_map(move |(key, items)| {
            (ingredient.contains(key) || key.contains(ingredient)).then_some(items)
        })
    }
}

// ============================================================================
// Substitute table
// ============================================================================

/// Alternatives usable in place of an ingredient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstituteTable {
    rules: RuleTable,
}

impl SubstituteTable {
    /// Create an empty substitute table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a substitute table with the built-in rules
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut rules = RuleTable::new();
        rules.insert("milk", &["almond milk", "oat milk", "soy milk"]);
        rules.insert("butter", &["olive oil", "coconut oil"]);
        rules.insert("eggs", &["flax egg", "chia egg"]);
        rules.insert("flour", &["whole wheat flour", "gluten-free flour blend"]);
        rules.insert("sugar", &["honey", "maple syrup"]);
        rules.insert("tomato sauce", &["crushed tomatoes", "marinara sauce"]);
        rules.insert("cheese", &["mozzarella", "cheddar"]);
        rules.insert("bread", &["tortilla", "bagel"]);
        Self { rules }
    }

    /// Wrap an existing rule table
    #[must_use]
    pub const fn from_rules(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Mutable access for merging external rule files
    pub fn rules_mut(&mut self) -> &mut RuleTable {
        &mut self.rules
    }

    /// Underlying rules
    #[must_use]
    pub const fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Exact lookup of a normalized missing ingredient
    #[must_use]
    pub fn substitutes_for(&self, ingredient: &str) -> Option<&[String]> {
        self.rules.get(ingredient).filter(|subs| !subs.is_empty())
    }
}
