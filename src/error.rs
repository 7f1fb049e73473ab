use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

use crate::budget::ValidationError;

/// Application error types.
///
/// The budget engine itself only fails with [`ValidationError`]; the other
/// variants cover the configuration and file handling around it.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file was read but is not the expected JSON
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Input rejected by parameter validation
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AppError {
    /// Stable machine-readable name of the error kind
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "config_error",
            Self::Io { .. } => "io_error",
            Self::Parse { .. } => "parse_error",
            Self::Validation(_) => "validation_error",
        }
    }

    /// JSON error envelope, listing every violation for validation errors
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Validation(err) => json!({
                "error": {
                    "message": self.to_string(),
                    "type": self.type_name(),
                    "violations": err.violations(),
                }
            }),
            _ => json!({
                "error": {
                    "message": self.to_string(),
                    "type": self.type_name(),
                }
            }),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::validate;

    #[test]
    fn test_error_display() {
        let error = AppError::ConfigError("rates.storage_per_gb_month must be >= 0".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: rates.storage_per_gb_month must be >= 0"
        );
    }

    #[test]
    fn test_error_type_name() {
        assert_eq!(AppError::ConfigError("x".to_string()).type_name(), "config_error");

        let err = validate(&json!({})).unwrap_err();
        assert_eq!(AppError::from(err).type_name(), "validation_error");
    }

    #[test]
    fn test_validation_envelope_lists_violations() {
        let err = validate(&json!({"project_type": "invalid"})).unwrap_err();
        let body = AppError::from(err).to_json();

        let violations = body["error"]["violations"].as_array().unwrap();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0]["field"], "project_type");
        assert_eq!(violations[1]["field"], "model_approach");
    }
}
