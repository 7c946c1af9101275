//! Summary report generator for terminal output.

use super::{ReportError, ReportFormat, ReportGenerator};
use crate::model::{ScoreSource, ScoredRecipe};
use crate::service::Recommendation;
use crate::suggest::Suggestions;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 32;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Compact, aligned output for people reading a terminal
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn rank_lines(&self, results: &[ScoredRecipe]) -> Vec<String> {
        let mut lines = Vec::new();
        if results.is_empty() {
            lines.push(self.color("No recipe uses any of these ingredients.", "dim"));
            return lines;
        }

        lines.push(self.color(&format!("Top recipes ({})", results.len()), "bold"));
        lines.push(format!(
            "{:<3} {} {:<6} {:<6} {:<6} {}",
            "#",
            pad_to_width("RECIPE", NAME_WIDTH),
            "MATCH",
            "SCORE",
            "RATING",
            "TIME"
        ));
        lines.push("─".repeat(NAME_WIDTH + 34));

        for (i, recipe) in results.iter().enumerate() {
            let score = match recipe.score_source {
                ScoreSource::Heuristic => format!("{:.3}", recipe.score),
                ScoreSource::Learned => format!("{:.3}*", recipe.score),
            };
            lines.push(format!(
                "{:<3} {} {:<6} {:<6} {:<6.1} {}m",
                i + 1,
                pad_to_width(&truncate_str(&recipe.name, NAME_WIDTH), NAME_WIDTH),
                self.color(&format!("{:<6}", recipe.match_label()), "green"),
                score,
                recipe.rating,
                recipe.prep_time_mins
            ));
            if !recipe.missing.is_empty() {
                lines.push(format!(
                    "    {} {}",
                    self.color("missing:", "dim"),
                    recipe.missing.join(", ")
                ));
            }
        }

        if results.iter().any(|r| r.score_source == ScoreSource::Learned) {
            lines.push(self.color("* scored by the learned ranker", "dim"));
        }
        lines
    }

    fn suggest_lines(&self, suggestions: &Suggestions) -> Vec<String> {
        let mut lines = Vec::new();

        if !suggestions.substitutes.is_empty() {
            lines.push(self.color("Substitutes", "bold"));
            for (missing, subs) in &suggestions.substitutes {
                lines.push(format!(
                    "  {} → {}",
                    self.color(missing, "cyan"),
                    subs.join(", ")
                ));
            }
        }

        if !suggestions.extra_suggestions.is_empty() {
            lines.push(self.color("Also consider", "bold"));
            lines.push(format!("  {}", suggestions.extra_suggestions.join(", ")));
        }

        if !suggestions.model_suggestions.is_empty() {
            lines.push(self.color("Predicted by model", "bold"));
            lines.push(format!(
                "  {}",
                self.color(&suggestions.model_suggestions.join(", "), "yellow")
            ));
        }

        if lines.is_empty() {
            lines.push(self.color("No suggestions.", "dim"));
        }
        lines
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_rank_report(&self, results: &[ScoredRecipe]) -> Result<String, ReportError> {
        Ok(self.rank_lines(results).join("\n"))
    }

    fn generate_suggest_report(&self, suggestions: &Suggestions) -> Result<String, ReportError> {
        Ok(self.suggest_lines(suggestions).join("\n"))
    }

    fn generate_recommend_report(
        &self,
        recommendation: &Recommendation,
    ) -> Result<String, ReportError> {
        let mut lines = self.rank_lines(&recommendation.recommendations);
        if let Some(top) = recommendation.recommendations.first() {
            lines.push(String::new());
            lines.push(self.color(&format!("To cook {}:", top.name), "dim"));
            lines.extend(self.suggest_lines(&recommendation.smart_suggestions));
        }
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

/// Pad with spaces to a display width.
fn pad_to_width(s: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(s);
    if current >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - current))
    }
}

/// Truncate a string with ellipsis, using Unicode display width.
fn truncate_str(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut width = 0;
    let truncated: String = s
        .chars()
        .take_while(|ch| {
            let w = UnicodeWidthChar::width(*ch).unwrap_or(0);
            if width + w > budget {
                return false;
            }
            width += w;
            true
        })
        .collect();
    if max_width > 3 {
        format!("{truncated}...")
    } else {
        truncated
    }
}
