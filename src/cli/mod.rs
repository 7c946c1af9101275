//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod config;
mod rank;
mod recommend;
mod suggest;

pub use config::{run_config, ConfigAction};
pub use rank::run_rank;
pub use recommend::run_recommend;
pub use suggest::run_suggest;

// Re-export config types used by handlers
pub use crate::config::{AppConfig, OutputConfig};

use crate::service::RecipeService;
use anyhow::{Context, Result};

/// Build the service a handler runs against.
fn build_service(config: &AppConfig) -> Result<RecipeService> {
    let service =
        RecipeService::from_config(config).context("Failed to initialize recipe engine")?;
    tracing::debug!(
        "Loaded {} recipes from {}",
        service.catalog().len(),
        service.catalog().source()
    );
    Ok(service)
}
