//! recipe-intel: recipe ranking and grocery suggestion CLI
//!
//! Ranks a recipe catalog against the ingredients you have and suggests
//! substitutes and extras for what you are missing.

#![allow(clippy::needless_pass_by_value)]

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use recipe_intel::{
    cli::{self, ConfigAction},
    config::{AppConfig, ConfigPreset},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with feature info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nOutput Formats:",
        "\n  json, summary (auto picks summary on a terminal)",
        "\n\nWeight Presets:",
        "\n  balanced, quick-meals, best-rated",
        "\n\nOptional Models:",
        "\n  ranker.json (learned ranker), set_completion.* (needs the ml-models feature)"
    )
}

#[derive(Parser)]
#[command(name = "recipe-intel")]
#[command(version, long_version = build_long_version())]
#[command(about = "Rank recipes by the ingredients you have", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    3  Error occurred

EXAMPLES:
    # What can I make with these?
    recipe-intel rank eggs butter salt

    # Substitutes and extras for a shopping trip
    recipe-intel suggest eggs,butter --missing milk --missing flour

    # Top recipes plus suggestions for the best one, as JSON
    recipe-intel recommend pasta garlic -o json

    # Use your own catalog and models
    recipe-intel rank rice --catalog recipes.json --models-dir ./models")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "RECIPE_INTEL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Engine inputs shared by every engine-backed command
#[derive(Args)]
struct EngineArgs {
    /// Recipe catalog JSON file (built-in recipes if absent or invalid)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory holding optional model artifacts
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Skip all optional models and use heuristics only
    #[arg(long)]
    no_models: bool,

    /// Association rules JSON file
    #[arg(long)]
    associations: Option<PathBuf>,

    /// Substitute rules JSON file
    #[arg(long)]
    substitutes: Option<PathBuf>,
}

/// Output selection shared by every command that renders a report
#[derive(Args)]
struct OutputArgs {
    /// Output format (auto detects TTY: summary if interactive, json otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `rank` and `recommend` subcommands
#[derive(Args)]
struct RankArgs {
    /// Ingredients you have (space or comma separated)
    #[arg(required = true, value_delimiter = ',')]
    ingredients: Vec<String>,

    /// Number of recipes to return
    #[arg(short, long = "top")]
    k: Option<usize>,

    /// Weight preset (balanced, quick-meals, best-rated)
    #[arg(long)]
    preset: Option<String>,

    #[command(flatten)]
    engine: EngineArgs,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `suggest` subcommand
#[derive(Args)]
struct SuggestArgs {
    /// Ingredients you have (space or comma separated)
    #[arg(value_delimiter = ',')]
    ingredients: Vec<String>,

    /// Ingredient you are missing (repeatable)
    #[arg(short, long, value_delimiter = ',')]
    missing: Vec<String>,

    #[command(flatten)]
    engine: EngineArgs,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `config` subcommand
#[derive(Args)]
struct ConfigArgs {
    /// Print the JSON Schema for the config file
    #[arg(long, conflicts_with = "example")]
    schema: bool,

    /// Print a commented example config file
    #[arg(long)]
    example: bool,

    /// Start from a named preset (default, quick-meals, best-rated)
    #[arg(long, conflicts_with_all = ["schema", "example"])]
    preset: Option<String>,

    /// Write to a file instead of stdout
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank recipes by how well your ingredients cover them
    Rank(RankArgs),

    /// Suggest substitutes for missing items and extras to buy
    Suggest(SuggestArgs),

    /// Rank recipes and suggest groceries for the best match
    Recommend(RankArgs),

    /// Show the effective configuration, an example file, or its schema
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// CLI flags expressed as a config layer to merge over the file
fn engine_overrides(engine: &EngineArgs, output: &OutputArgs, no_color: bool) -> AppConfig {
    let mut config = AppConfig::builder()
        .catalog_path(engine.catalog.clone())
        .models_dir(engine.models_dir.clone())
        .models_disabled(engine.no_models)
        .associations_file(engine.associations.clone())
        .substitutes_file(engine.substitutes.clone())
        .output_format(output.output)
        .output_file(output.output_file.clone())
        .build();
    config.output.no_color = no_color;
    config
}

fn load_config(cli_config: Option<&Path>, overrides: &AppConfig) -> AppConfig {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(cli_config, overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    config
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Rank(args) => {
            let mut overrides = engine_overrides(&args.engine, &args.output, cli.no_color);
            if let Some(preset) = args.preset {
                overrides.ranking.weights_preset = preset;
            }
            let config = load_config(cli.config.as_deref(), &overrides);
            cli::run_rank(config, args.ingredients, args.k)
        }

        Commands::Suggest(args) => {
            let overrides = engine_overrides(&args.engine, &args.output, cli.no_color);
            let config = load_config(cli.config.as_deref(), &overrides);
            cli::run_suggest(config, args.ingredients, args.missing)
        }

        Commands::Recommend(args) => {
            let mut overrides = engine_overrides(&args.engine, &args.output, cli.no_color);
            if let Some(preset) = args.preset {
                overrides.ranking.weights_preset = preset;
            }
            let config = load_config(cli.config.as_deref(), &overrides);
            cli::run_recommend(config, args.ingredients, args.k)
        }

        Commands::Config(args) => {
            let action = if args.schema {
                ConfigAction::Schema
            } else if args.example {
                ConfigAction::Example
            } else {
                ConfigAction::Show
            };

            let mut overrides = match args.preset.as_deref() {
                Some(name) => {
                    let preset = ConfigPreset::from_name(name).ok_or_else(|| {
                        anyhow::anyhow!(
                            "Unknown preset: {name}. Valid options: default, quick-meals, best-rated"
                        )
                    })?;
                    AppConfig::from_preset(preset)
                }
                None => AppConfig::default(),
            };
            overrides.output.file = args.output_file;

            let (config, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            cli::run_config(config, loaded_from, action)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "recipe-intel", &mut io::stdout());
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays machine-readable
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_codes::ERROR);
    }
}
