use anyhow::Result;
use colored::Colorize;
use ml_budget::budget::validate;
use ml_budget::report::OutputFormat;
use serde_json::Value;
use std::path::Path;
use tracing::info;

use super::{read_json, report_validation_error};

/// Execute the validate command
///
/// Runs parameter validation only. Every violation is listed and the command
/// fails if there is at least one.
pub fn execute(input: &Path) -> Result<()> {
    println!("{}", "Validating project parameters...".yellow());

    let raw: Value = read_json(input)?;
    let params = validate(&raw).map_err(|err| report_validation_error(err, OutputFormat::Table))?;

    println!("{}", "✓ Project parameters are valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  {}: {}", "Project Type".cyan(), params.project_type());
    println!("  {}: {}", "Model Approach".cyan(), params.model_approach());
    println!("  {}: {}", "Roles".cyan(), params.team_size().len());
    println!("  {}: {}", "Dataset (GB)".cyan(), params.dataset_gb());
    println!("  {}: {}", "Labels".cyan(), params.label_count());
    println!("  {}: {}", "Monthly Tokens".cyan(), params.monthly_tokens());

    info!("Parameter validation successful for {}", input.display());
    Ok(())
}
