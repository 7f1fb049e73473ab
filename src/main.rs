use anyhow::Result;
use clap::Parser;
use std::path::Path;

mod cli;
mod commands;

use cli::{Commands, ConfigCommands};
use ml_budget::config::{self, Config};
use ml_budget::{init_tracing, metrics, DeterministicCalculator};

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();
    let config_path = args.config.as_path();

    // Dispatch to appropriate command handler
    match args.command {
        Commands::Version => {
            println!("ml-budget v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigCommands::Show => commands::config::show(&setup(config_path)?),
            // Reports its own loading errors, so it runs before configuration is loaded
            ConfigCommands::Validate => commands::config::validate(config_path),
        },
        Commands::Calculate {
            input,
            overrides,
            format,
        } => {
            let calculator = DeterministicCalculator::new(setup(config_path)?.rates);
            commands::calculate::execute(&calculator, &input, &overrides, format)
        }
        Commands::Compare {
            baseline,
            candidate,
            format,
        } => {
            setup(config_path)?;
            commands::compare::execute(&baseline, &candidate, format)
        }
        Commands::WhatIf {
            input,
            overrides,
            format,
        } => {
            let calculator = DeterministicCalculator::new(setup(config_path)?.rates);
            commands::what_if::execute(&calculator, &input, &overrides, format)
        }
        Commands::Validate { input } => {
            setup(config_path)?;
            commands::validate::execute(&input)
        }
        Commands::Rates => commands::rates::execute(&setup(config_path)?.rates),
    }
}

/// Load configuration, then initialize logging and metrics from it
fn setup(config_path: &Path) -> Result<Config> {
    let cfg = config::load_config(config_path)?;
    init_tracing(&cfg.logging.level, &cfg.logging.format);
    metrics::init_metric_descriptions();
    Ok(cfg)
}
