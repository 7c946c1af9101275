//! Config command handler.
//!
//! Prints an example configuration file, the JSON Schema, or the effective
//! configuration after file discovery and CLI overrides.

use crate::config::{generate_full_example_config, generate_json_schema, AppConfig};
use crate::pipeline::{write_output, OutputTarget};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// What the `config` subcommand prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Effective configuration as YAML
    Show,
    /// Commented example file
    Example,
    /// JSON Schema for the file format
    Schema,
}

/// Run the config command
#[allow(clippy::needless_pass_by_value)]
pub fn run_config(
    config: AppConfig,
    loaded_from: Option<PathBuf>,
    action: ConfigAction,
) -> Result<()> {
    let content = match action {
        ConfigAction::Show => {
            let yaml = serde_yaml::to_string(&config).context("Failed to serialize config")?;
            match loaded_from {
                Some(path) => format!("# loaded from {}\n{yaml}", path.display()),
                None => format!("# no config file found, showing defaults\n{yaml}"),
            }
        }
        ConfigAction::Example => generate_full_example_config(),
        ConfigAction::Schema => generate_json_schema()?,
    };

    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(content.trim_end(), &target)
}
