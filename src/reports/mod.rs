//! Report generation for ranking and suggestion results.
//!
//! Two output formats:
//! - JSON: the wire payloads, for scripts and services
//! - Summary: an aligned table for terminals

mod json;
mod summary;
mod types;

pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use types::ReportFormat;

use crate::model::ScoredRecipe;
use crate::service::Recommendation;
use crate::suggest::Suggestions;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render ranked recipes
    fn generate_rank_report(&self, results: &[ScoredRecipe]) -> Result<String, ReportError>;

    /// Render grocery suggestions
    fn generate_suggest_report(&self, suggestions: &Suggestions) -> Result<String, ReportError>;

    /// Render recipes plus suggestions for the top one
    fn generate_recommend_report(
        &self,
        recommendation: &Recommendation,
    ) -> Result<String, ReportError>;

    /// Write a rank report to a writer
    fn write_rank_report(
        &self,
        results: &[ScoredRecipe],
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate_rank_report(results)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
///
/// `Auto` should be resolved by the caller; it renders as JSON here.
#[must_use]
pub fn create_reporter_with_options(format: ReportFormat, colored: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            if colored {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Auto | ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
