//! Application-level entry points: `rank`, `suggest` and `recommend`.

mod recipe_service;

pub use recipe_service::{Recommendation, RecipeService};
