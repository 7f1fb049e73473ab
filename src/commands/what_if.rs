use anyhow::Result;
use colored::Colorize;
use ml_budget::budget::{apply_overrides, compare, DeterministicCalculator, Override};
use ml_budget::report::{self, OutputFormat};
use serde_json::{json, Value};
use std::path::Path;
use tracing::info;

use super::{print_json, read_json, report_validation_error};

/// Execute the what-if command
///
/// Calculates the baseline from `input`, then the same input with
/// `overrides` applied, and prints both plus the per-category difference.
pub fn execute(
    calculator: &DeterministicCalculator,
    input: &Path,
    overrides: &[Override],
    format: OutputFormat,
) -> Result<()> {
    let raw: Value = read_json(input)?;

    let baseline = calculator
        .calculate(&raw)
        .map_err(|err| report_validation_error(err, format))?;
    let scenario = calculator
        .calculate(&apply_overrides(&raw, overrides))
        .map_err(|err| report_validation_error(err, format))?;
    let comparison = compare(&baseline, &scenario);

    info!(
        overrides = overrides.len(),
        total_delta = comparison.total_delta,
        "What-if scenario calculated"
    );

    match format {
        OutputFormat::Json => print_json(&json!({
            "overrides": overrides.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "baseline": baseline,
            "scenario": scenario,
            "comparison": comparison,
        }))?,
        OutputFormat::Table => {
            let changes = overrides
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            println!("{} {}", "Scenario:".bold(), changes);
            println!();
            println!("{}", "Baseline".cyan().bold());
            println!("{}", report::render_result(&baseline));
            println!("{}", "Scenario".cyan().bold());
            println!("{}", report::render_result(&scenario));
            println!("{}", "Difference".cyan().bold());
            println!("{}", report::render_comparison(&comparison));
        }
    }

    Ok(())
}
