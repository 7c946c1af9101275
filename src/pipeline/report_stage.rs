//! Report output stage.

use crate::config::OutputConfig;
use crate::model::ScoredRecipe;
use crate::reports::{create_reporter_with_options, ReportFormat};
use crate::service::Recommendation;
use crate::suggest::Suggestions;
use anyhow::Result;

use super::{auto_detect_format, should_use_color, write_output, OutputTarget};

/// Result of one command, ready to render
#[derive(Debug, Clone, Copy)]
pub enum ReportPayload<'a> {
    Rank(&'a [ScoredRecipe]),
    Suggest(&'a Suggestions),
    Recommend(&'a Recommendation),
}

/// Render `payload` in the configured format and write it out.
pub fn output_report(config: &OutputConfig, payload: ReportPayload<'_>) -> Result<()> {
    let target = OutputTarget::from_option(config.file.clone());
    let report = render_report(config, payload, &target)?;
    write_output(&report, &target)
}

/// Render `payload` for `target` without writing it.
pub fn render_report(
    config: &OutputConfig,
    payload: ReportPayload<'_>,
    target: &OutputTarget,
) -> Result<String> {
    let format = auto_detect_format(config.format, target);
    // colors only make sense on a terminal
    let colored = format == ReportFormat::Summary
        && target.is_terminal()
        && should_use_color(config.no_color);
    let reporter = create_reporter_with_options(format, colored);

    let report = match payload {
        ReportPayload::Rank(results) => reporter.generate_rank_report(results)?,
        ReportPayload::Suggest(suggestions) => reporter.generate_suggest_report(suggestions)?,
        ReportPayload::Recommend(recommendation) => {
            reporter.generate_recommend_report(recommendation)?
        }
    };
    Ok(report)
}
