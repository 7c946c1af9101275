//! Ingredient normalization and rule-based matching.
//!
//! Every comparison in the crate runs on normalized names: lowercased,
//! trimmed, and with internal whitespace collapsed. The rule tables
//! ([`AssociationTable`], [`SubstituteTable`]) keep their declaration order,
//! so lookups that scan them are deterministic.
//!
//! # Example
//!
//! ```ignore
//! use recipe_intel::matching::AssociationEngine;
//!
//! let engine = AssociationEngine::default();
//! let extras = engine.co_occurring(&["salt"]);
//! assert_eq!(extras[0], "pepper");
//! ```

mod association;
mod normalizer;
mod tables;

pub use association::{
    AssociationEngine, SubstituteMatches, DEFAULT_MAX_EXTRAS, DEFAULT_MIN_BEFORE_FALLBACK,
    POPULAR_FALLBACK, SUBSTITUTE_EXPLANATION,
};
pub use normalizer::{normalize, normalize_list, normalize_set};
pub use tables::{AssociationTable, RuleTable, SubstituteTable};
