use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ml_budget::budget::Override;
use ml_budget::config::DEFAULT_CONFIG_FILE;
use ml_budget::report::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "ml-budget", version, about = "Deterministic AI/ML project budget estimator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Calculate an itemized budget from project parameters
    Calculate {
        /// JSON file with project parameters ("-" reads stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Override a parameter before calculating (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<Override>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Compare two saved budget results by category
    Compare {
        /// Baseline result JSON
        #[arg(short, long)]
        baseline: PathBuf,

        /// Candidate result JSON (e.g. an AI-generated estimate)
        #[arg(short = 'n', long)]
        candidate: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Calculate a baseline and a modified scenario and show the difference
    WhatIf {
        /// JSON file with baseline project parameters ("-" reads stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Parameter change for the scenario (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
        overrides: Vec<Override>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Validate project parameters without calculating
    Validate {
        /// JSON file with project parameters ("-" reads stdin)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show the effective rate table
    Rates,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate configuration file
    Validate,
}
