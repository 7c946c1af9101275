//! Grocery suggestions: substitutes, co-purchases and model completions.

mod orchestrator;

pub use orchestrator::{SuggestionOrchestrator, Suggestions, DEFAULT_MAX_MODEL_SUGGESTIONS};
