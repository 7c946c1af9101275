//! Recommend command handler.
//!
//! Ranks recipes and attaches grocery suggestions for the best match.

use super::build_service;
use crate::config::AppConfig;
use crate::pipeline::{output_report, ReportPayload};
use anyhow::Result;

/// Run the recommend command
#[allow(clippy::needless_pass_by_value)]
pub fn run_recommend(config: AppConfig, ingredients: Vec<String>, k: Option<usize>) -> Result<()> {
    let service = build_service(&config)?;
    let k = k.unwrap_or_else(|| service.default_k());

    let recommendation = service.recommend(&ingredients, k);
    match recommendation.recommendations.first() {
        Some(top) => tracing::info!("Top recommendation: {} ({})", top.name, top.match_label()),
        None => tracing::info!("No recipe matched"),
    }

    output_report(&config.output, ReportPayload::Recommend(&recommendation))
}
