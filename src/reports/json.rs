//! JSON report generator.
//!
//! Emits the payloads as-is: a list of scored recipes for `rank`, the
//! suggestions object for `suggest`, and the combined object for `recommend`.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::model::ScoredRecipe;
use crate::service::Recommendation;
use crate::suggest::Suggestions;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_rank_report(&self, results: &[ScoredRecipe]) -> Result<String, ReportError> {
        self.to_json(results)
    }

    fn generate_suggest_report(&self, suggestions: &Suggestions) -> Result<String, ReportError> {
        self.to_json(suggestions)
    }

    fn generate_recommend_report(
        &self,
        recommendation: &Recommendation,
    ) -> Result<String, ReportError> {
        self.to_json(recommendation)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
