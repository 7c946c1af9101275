//! Recipe data model.
//!
//! [`Catalog`] owns every [`Recipe`] for the lifetime of the process and is
//! shared read-only between requests. [`ScoredRecipe`] values are built fresh
//! for each ranking call.

mod catalog;
mod recipe;

pub use catalog::{Catalog, CatalogSource};
pub use recipe::{
    Recipe, ScoreSource, ScoredRecipe, DEFAULT_PREP_TIME_MINS, DEFAULT_RATING, MAX_RATING,
};
