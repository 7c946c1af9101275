//! Rule-based grocery suggestions.

use super::normalizer::normalize_list;
use super::tables::{AssociationTable, SubstituteTable};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;

/// Items offered when the association rules produce too little.
pub const POPULAR_FALLBACK: [&str; 5] = ["milk", "eggs", "bread", "bananas", "apples"];

/// Explanation recorded for every substitute hit
pub const SUBSTITUTE_EXPLANATION: &str = "Common substitute suggestions";

/// Default cap on extra suggestions
pub const DEFAULT_MAX_EXTRAS: usize = 10;

/// Default minimum rule hits before the popular fallback is skipped
pub const DEFAULT_MIN_BEFORE_FALLBACK: usize = 3;

/// Substitutes found for missing ingredients, keyed in lookup order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstituteMatches {
    pub substitutes: IndexMap<String, Vec<String>>,
    pub explanations: IndexMap<String, String>,
}

/// Applies the co-purchase and substitute tables.
#[derive(Debug, Clone)]
#[must_use]
pub struct AssociationEngine {
    associations: AssociationTable,
    substitutes: SubstituteTable,
    fallback: Vec<String>,
    max_extras: usize,
    min_before_fallback: usize,
}

impl Default for AssociationEngine {
    fn default() -> Self {
        Self::new(AssociationTable::with_builtins(), SubstituteTable::with_builtins())
    }
}

impl AssociationEngine {
    /// Create an engine over the given tables with default limits.
    pub fn new(associations: AssociationTable, substitutes: SubstituteTable) -> Self {
        Self {
            associations,
            substitutes,
            fallback: POPULAR_FALLBACK.iter().map(ToString::to_string).collect(),
            max_extras: DEFAULT_MAX_EXTRAS,
            min_before_fallback: DEFAULT_MIN_BEFORE_FALLBACK,
        }
    }

    /// Override the extras cap and fallback threshold.
    ///
    /// The cap never exceeds [`DEFAULT_MAX_EXTRAS`].
    pub const fn with_limits(mut self, max_extras: usize, min_before_fallback: usize) -> Self {
        self.max_extras = if max_extras > DEFAULT_MAX_EXTRAS {
            DEFAULT_MAX_EXTRAS
        } else {
            max_extras
        };
        self.min_before_fallback = min_before_fallback;
        self
    }

    #[must_use]
    pub const fn associations(&self) -> &AssociationTable {
        &self.associations
    }

    #[must_use]
    pub const fn substitutes(&self) -> &SubstituteTable {
        &self.substitutes
    }

    #[must_use]
    pub const fn max_extras(&self) -> usize {
        self.max_extras
    }

    /// Look up substitutes for each missing ingredient.
    ///
    /// Keys are exact normalized names; partial names never match here.
    #[must_use]
    pub fn substitutes_for_missing<S: AsRef<str>>(&self, missing: &[S]) -> SubstituteMatches {
        let mut matches = SubstituteMatches::default();
        for name in normalize_list(missing) {
            if let Some(subs) = self.substitutes.substitutes_for(&name) {
                matches.substitutes.insert(name.clone(), subs.to_vec());
                matches
                    .explanations
                    .insert(name, SUBSTITUTE_EXPLANATION.to_string());
            }
        }
        matches
    }

    /// Items commonly bought with `held`, topped up from the popular list.
    ///
    /// Never returns a held item or a duplicate, and never more than the
    /// configured cap.
    #[must_use]
    pub fn co_occurring<S: AsRef<str>>(&self, held: &[S]) -> Vec<String> {
        let held = normalize_list(held);
        let held_set: HashSet<&str> = held.iter().map(String::as_str).collect();
        let mut collected: IndexSet<String> = IndexSet::new();

        for ingredient in &held {
            for items in self.associations.related(ingredient) {
                for item in items {
                    if !held_set.contains(item.as_str()) {
                        collected.insert(item.clone());
                    }
                }
            }
        }

        let rule_hits = collected.len();
        if rule_hits < self.min_before_fallback {
            for item in &self.fallback {
                if !held_set.contains(item.as_str()) {
                    collected.insert(item.clone());
                }
            }
            tracing::debug!(
                "{rule_hits} rule-based extras, topped up to {} from popular items",
                collected.len()
            );
        }

        collected.into_iter().take(self.max_extras).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::RuleTable;

    #[test]
    fn test_salt_suggests_pepper() {
        let extras = AssociationEngine::default().co_occurring(&["salt"]);
        assert_eq!(extras[..3], ["pepper", "olive oil", "garlic powder"]);
    }

    #[test]
    fn test_fallback_when_few_hits() {
        let extras = AssociationEngine::default().co_occurring(&["saffron"]);
        assert_eq!(extras, POPULAR_FALLBACK);
    }

    #[test]
    fn test_fallback_skips_held_and_collected() {
        // milk rules give 4 hits, so no fallback is used
        let extras = AssociationEngine::default().co_occurring(&["milk"]);
        assert_eq!(extras, vec!["eggs", "bread", "butter", "cereal"]);

        let engine = AssociationEngine::default().with_limits(10, 5);
        let extras = engine.co_occurring(&["milk"]);
        assert_eq!(
            extras,
            vec!["eggs", "bread", "butter", "cereal", "bananas", "apples"]
        );
    }

    #[test]
    fn test_extras_capped() {
        let extras =
            AssociationEngine::default().co_occurring(&["pasta", "chicken breast", "bread", "flour"]);
        assert_eq!(extras.len(), DEFAULT_MAX_EXTRAS);
    }

    #[test]
    fn test_extras_cap_clamped() {
        let engine = AssociationEngine::default().with_limits(50, 3);
        assert_eq!(engine.max_extras(), DEFAULT_MAX_EXTRAS);
        let extras = engine.co_occurring(&[
            "pasta",
            "chicken breast",
            "bread",
            "flour",
            "lettuce",
            "salmon",
        ]);
        assert_eq!(extras.len(), DEFAULT_MAX_EXTRAS);

        assert_eq!(AssociationEngine::default().with_limits(4, 3).max_extras(), 4);
    }

    #[test]
    fn test_held_items_excluded() {
        let extras = AssociationEngine::default().co_occurring(&["bread", "butter", "jam"]);
        assert!(!extras.iter().any(|e| e == "bread" || e == "butter" || e == "jam"));
        assert_eq!(extras[0], "cheese");
    }

    #[test]
    fn test_substring_matching_both_ways() {
        let engine = AssociationEngine::default();
        let extras = engine.co_occurring(&["Chicken Breast Fillet"]);
        assert_eq!(extras[0], "rice");
        // "past" is a substring of the "pasta" key
        let extras = engine.co_occurring(&["past"]);
        assert_eq!(extras[0], "tomato sauce");
    }

    #[test]
    fn test_empty_input_gives_fallback() {
        let empty: [&str; 0] = [];
        assert_eq!(AssociationEngine::default().co_occurring(&empty), POPULAR_FALLBACK);
        assert_eq!(
            AssociationEngine::default().co_occurring(&["", "  "]),
            POPULAR_FALLBACK
        );
    }

    #[test]
    fn test_substitutes_exact_only() {
        let engine = AssociationEngine::default();
        let matches = engine.substitutes_for_missing(&["Milk", "whole milk", "saffron", "eggs"]);
        let keys: Vec<_> = matches.substitutes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["milk", "eggs"]);
        assert_eq!(matches.substitutes["eggs"], vec!["flax egg", "chia egg"]);
        assert_eq!(matches.explanations["milk"], SUBSTITUTE_EXPLANATION);
    }

    #[test]
    fn test_custom_tables() {
        let mut rules = RuleTable::new();
        rules.insert("tea", &["lemon", "honey", "biscuits"]);
        let engine = AssociationEngine::new(AssociationTable::from_rules(rules), SubstituteTable::new());
        assert_eq!(engine.co_occurring(&["green tea"]), vec!["lemon", "honey", "biscuits"]);
        assert!(engine.substitutes_for_missing(&["milk"]).substitutes.is_empty());
    }
}
