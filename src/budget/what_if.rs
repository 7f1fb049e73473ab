//! What-if overrides on raw input.
//!
//! An override replaces one top-level field of the raw request before it is
//! validated, so a modified scenario goes through exactly the same pipeline
//! as the original.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct Override {
    pub field: String,
    pub value: Value,
}

impl Override {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl FromStr for Override {
    type Err = String;

    /// Parse `key=value`. The value is read as JSON when it parses as a JSON
    /// number, boolean, array or object; anything else is taken as a string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, raw) = s
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{}'", s))?;

        let field = field.trim();
        if field.is_empty() {
            return Err(format!("missing field name in '{}'", s));
        }

        let raw = raw.trim();
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(value) if !value.is_string() => value,
            _ => Value::String(raw.to_string()),
        };

        Ok(Self::new(field, value))
    }
}

impl fmt::Display for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::String(s) => write!(f, "{}={}", self.field, s),
            other => write!(f, "{}={}", self.field, other),
        }
    }
}

/// Return a copy of `raw` with every override applied in order.
///
/// Non-object input is returned unchanged; validation will reject it.
pub fn apply_overrides(raw: &Value, overrides: &[Override]) -> Value {
    let mut modified = raw.clone();
    if let Value::Object(map) = &mut modified {
        for item in overrides {
            map.insert(item.field.clone(), item.value.clone());
        }
    }
    modified
}
