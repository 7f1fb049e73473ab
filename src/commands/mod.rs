//! Command implementations for the CLI
//!
//! - calculate: Calculate an itemized budget
//! - compare: Compare two saved results
//! - what_if: Baseline vs. modified scenario
//! - validate: Validate parameters only
//! - rates: Show the effective rate table
//! - config: Configuration display and validation

pub mod calculate;
pub mod compare;
pub mod config;
pub mod rates;
pub mod validate;
pub mod what_if;

use colored::Colorize;
use ml_budget::budget::ValidationError;
use ml_budget::error::AppError;
use ml_budget::report::{self, OutputFormat};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Read and parse a JSON file, or stdin when the path is "-"
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| AppError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?
    };

    serde_json::from_str(&content).map_err(|source| AppError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Report every violation in the requested format, then hand the error back
/// so the process exits non-zero.
pub fn report_validation_error(err: ValidationError, format: OutputFormat) -> anyhow::Error {
    match format {
        OutputFormat::Json => println!("{}", AppError::from(err.clone()).to_json()),
        OutputFormat::Table => {
            eprintln!("{}", "✗ Invalid project parameters:".red().bold());
            for line in report::render_violations(&err) {
                eprintln!("  - {}", line);
            }
        }
    }
    AppError::from(err).into()
}
