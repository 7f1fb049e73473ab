use anyhow::Result;
use colored::Colorize;
use ml_budget::budget::{compare, DeterministicResult};
use ml_budget::report::{self, OutputFormat};
use std::path::Path;
use tracing::info;

use super::{print_json, read_json};

/// Execute the compare command
///
/// Both files hold a serialized `DeterministicResult`; the candidate may come
/// from any estimator that emits the same shape.
pub fn execute(baseline: &Path, candidate: &Path, format: OutputFormat) -> Result<()> {
    let baseline_result: DeterministicResult = read_json(baseline)?;
    let candidate_result: DeterministicResult = read_json(candidate)?;

    let comparison = compare(&baseline_result, &candidate_result);
    info!(
        categories = comparison.categories.len(),
        total_delta = comparison.total_delta,
        "Compared {} with {}",
        baseline.display(),
        candidate.display()
    );

    match format {
        OutputFormat::Json => print_json(&comparison)?,
        OutputFormat::Table => {
            println!("{}", report::render_comparison(&comparison));
            if let Some(ratio) = comparison.total_change_ratio() {
                println!(
                    "{} {:+.1}%",
                    "Total change:".bold(),
                    ratio * 100.0
                );
            }
        }
    }

    Ok(())
}
