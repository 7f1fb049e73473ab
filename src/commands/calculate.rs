use anyhow::Result;
use ml_budget::budget::{apply_overrides, DeterministicCalculator, Override};
use ml_budget::report::{self, OutputFormat};
use serde_json::Value;
use std::path::Path;
use tracing::info;

use super::{print_json, read_json, report_validation_error};

/// Execute the calculate command
///
/// # Arguments
/// * `calculator` - Calculator built from the effective rate table
/// * `input` - Parameter file ("-" for stdin)
/// * `overrides` - `--set` changes applied before validation
/// * `format` - Table or JSON output
pub fn execute(
    calculator: &DeterministicCalculator,
    input: &Path,
    overrides: &[Override],
    format: OutputFormat,
) -> Result<()> {
    let raw: Value = read_json(input)?;
    let raw = apply_overrides(&raw, overrides);

    let result = calculator
        .calculate(&raw)
        .map_err(|err| report_validation_error(err, format))?;

    info!(
        line_items = result.line_items.len(),
        total_cost = result.total_cost,
        "Budget calculated from {}",
        input.display()
    );

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => println!("{}", report::render_result(&result)),
    }

    Ok(())
}
