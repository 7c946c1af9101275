//! Rank command handler.
//!
//! Implements the `rank` subcommand: top recipes for a set of ingredients.

use super::build_service;
use crate::config::AppConfig;
use crate::pipeline::{output_report, ReportPayload};
use anyhow::Result;

/// Run the rank command
///
/// `k` falls back to `ranking.default_k` from the configuration.
#[allow(clippy::needless_pass_by_value)]
pub fn run_rank(config: AppConfig, ingredients: Vec<String>, k: Option<usize>) -> Result<()> {
    let service = build_service(&config)?;
    let k = k.unwrap_or_else(|| service.default_k());

    let results = service.rank(&ingredients, k);
    tracing::info!(
        "{} of {} recipes matched",
        results.len(),
        service.catalog().len()
    );

    output_report(&config.output, ReportPayload::Rank(&results))
}
