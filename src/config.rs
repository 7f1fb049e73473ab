use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::budget::RateTable;
use crate::error::AppError;

pub const DEFAULT_CONFIG_FILE: &str = "ml-budget.toml";
pub const ENV_PREFIX: &str = "ML_BUDGET";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub rates: RateTable,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Load configuration: built-in defaults, then the optional TOML file at
/// `path`, then `ML_BUDGET__*` environment overrides.
pub fn load_config(path: &Path) -> Result<Config, AppError> {
    if !path.exists() {
        tracing::debug!("Config file {} not found, using defaults", path.display());
    }

    let settings = config::Config::builder()
        .add_source(config::Config::try_from(&Config::default())?)
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let cfg: Config = settings.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

/// Parse configuration from a TOML string layered over the defaults
pub fn parse_config(toml_str: &str) -> Result<Config, AppError> {
    let settings = config::Config::builder()
        .add_source(config::Config::try_from(&Config::default())?)
        .add_source(config::File::from_str(toml_str, config::FileFormat::Toml))
        .build()?;

    let cfg: Config = settings.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> Result<(), AppError> {
    let mut problems = Vec::new();

    if !LOG_LEVELS.contains(&cfg.logging.level.to_lowercase().as_str()) {
        problems.push(format!(
            "logging.level must be one of {} (got '{}')",
            LOG_LEVELS.join(", "),
            cfg.logging.level
        ));
    }

    if !LOG_FORMATS.contains(&cfg.logging.format.as_str()) {
        problems.push(format!(
            "logging.format must be one of {} (got '{}')",
            LOG_FORMATS.join(", "),
            cfg.logging.format
        ));
    }

    problems.extend(cfg.rates.problems());

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::ConfigError(problems.join("; ")))
    }
}
