//! Suggest command handler.

use super::build_service;
use crate::config::AppConfig;
use crate::pipeline::{output_report, ReportPayload};
use anyhow::Result;

/// Run the suggest command
#[allow(clippy::needless_pass_by_value)]
pub fn run_suggest(config: AppConfig, ingredients: Vec<String>, missing: Vec<String>) -> Result<()> {
    let service = build_service(&config)?;
    let suggestions = service.suggest(&ingredients, &missing);
    tracing::debug!(
        "{} substitute groups, {} extras, {} model suggestions",
        suggestions.substitutes.len(),
        suggestions.extra_suggestions.len(),
        suggestions.model_suggestions.len()
    );

    output_report(&config.output, ReportPayload::Suggest(&suggestions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_suggest_writes_substitutes() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("suggest.json");
        let config = AppConfig::builder()
            .models_disabled(true)
            .output_file(Some(out.clone()))
            .build();

        run_suggest(config, vec!["salt".into()], vec!["butter".into()]).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert!(value["substitutes"]["butter"].is_array());
        assert!(value["extra_suggestions"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v == "pepper"));
    }
}
