//! Parameter validation
//!
//! Turns raw, untyped request input into canonical [`ProjectParameters`].
//! Validation is exhaustive: every offending field is reported in one
//! [`ValidationError`] so the caller can render a single error list.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

use super::models::{ModelApproach, ProjectParameters, ProjectType, TeamMember};

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Path of the offending field, e.g. `team_size[1].headcount`
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Malformed or out-of-range input. Carries every violation found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("invalid project parameters: {}", join_violations(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of the offending fields, in the order they were found
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    /// Whether any violation refers to `field` or one of its children
    pub fn mentions(&self, field: &str) -> bool {
        self.violations.iter().any(|v| {
            v.field == field
                || v.field.starts_with(&format!("{}[", field))
                || v.field.starts_with(&format!("{}.", field))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub(crate) fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.into(),
            message: message.into(),
        });
    }

    pub(crate) fn into_result(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Validate raw input into canonical parameters.
///
/// Fields other than the six parameter fields are ignored, which lets callers
/// pass their full request payload (including persistence directives).
pub fn validate(raw: &Value) -> Result<ProjectParameters, ValidationError> {
    let mut errors = ValidationError::default();

    let Some(obj) = raw.as_object() else {
        errors.push("$", "expected a JSON object");
        return Err(errors);
    };

    let project_type = parse_enum::<ProjectType>(obj, "project_type", &ProjectType::ALL, &mut errors);
    let model_approach =
        parse_enum::<ModelApproach>(obj, "model_approach", &ModelApproach::ALL, &mut errors);
    let team_size = parse_team(obj, &mut errors);
    let dataset_gb = parse_amount(field(obj, "dataset_gb"), "dataset_gb", &mut errors);
    let label_count = parse_count(obj, "label_count", &mut errors);
    let monthly_tokens = parse_count(obj, "monthly_tokens", &mut errors);

    match (project_type, model_approach, dataset_gb, label_count, monthly_tokens) {
        (Some(pt), Some(ma), Some(gb), Some(labels), Some(tokens)) if errors.is_empty() => Ok(
            ProjectParameters::from_parts(pt, ma, team_size, gb, labels, tokens),
        ),
        _ => Err(errors),
    }
}

/// Value checks for already-typed team entries. Returns the canonical
/// (trimmed) entries that passed, in declaration order.
pub(crate) fn check_team(team: Vec<TeamMember>, errors: &mut ValidationError) -> Vec<TeamMember> {
    team.into_iter()
        .enumerate()
        .filter_map(|(idx, member)| check_member(idx, member, errors))
        .collect()
}

pub(crate) fn check_non_negative(path: &str, value: f64, errors: &mut ValidationError) -> bool {
    if !value.is_finite() {
        errors.push(path, "must be a finite number");
        false
    } else if value < 0.0 {
        errors.push(path, format!("must be >= 0 (got {})", value));
        false
    } else {
        true
    }
}

/// Roles are free text. Repeated roles are separate entries and each gets
/// its own staffing line.
fn check_member(idx: usize, member: TeamMember, errors: &mut ValidationError) -> Option<TeamMember> {
    let role = member.role.trim().to_string();

    let mut ok =
        check_non_negative(&format!("team_size[{}].headcount", idx), member.headcount, errors);
    ok &= check_non_negative(
        &format!("team_size[{}].monthly_rate", idx),
        member.monthly_rate,
        errors,
    );

    ok.then(|| TeamMember::new(role, member.headcount, member.monthly_rate))
}

/// Look up a field, treating explicit `null` as absent
fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    obj.get(name).filter(|v| !v.is_null())
}

fn parse_enum<T>(
    obj: &Map<String, Value>,
    name: &str,
    allowed: &[T],
    errors: &mut ValidationError,
) -> Option<T>
where
    T: std::str::FromStr + fmt::Display,
{
    let Some(value) = field(obj, name) else {
        errors.push(name, "is required");
        return None;
    };

    let Some(text) = value.as_str() else {
        errors.push(name, "must be a string");
        return None;
    };

    match text.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            let options = allowed
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            errors.push(name, format!("must be one of: {} (got '{}')", options, text));
            None
        }
    }
}

fn parse_team(obj: &Map<String, Value>, errors: &mut ValidationError) -> Vec<TeamMember> {
    let Some(value) = field(obj, "team_size") else {
        return Vec::new();
    };

    let Some(entries) = value.as_array() else {
        errors.push("team_size", "must be an array");
        return Vec::new();
    };

    let mut team = Vec::with_capacity(entries.len());

    for (idx, entry) in entries.iter().enumerate() {
        let Some(entry) = entry.as_object() else {
            errors.push(format!("team_size[{}]", idx), "must be an object");
            continue;
        };

        let role_path = format!("team_size[{}].role", idx);
        let role = match field(entry, "role") {
            None => {
                errors.push(role_path, "is required");
                None
            }
            Some(Value::String(role)) => Some(role.clone()),
            Some(_) => {
                errors.push(role_path, "must be a string");
                None
            }
        };

        // Type errors are reported here; range checks happen in check_member
        let headcount = parse_number(
            field(entry, "headcount"),
            &format!("team_size[{}].headcount", idx),
            errors,
        );
        let monthly_rate = parse_number(
            field(entry, "monthly_rate"),
            &format!("team_size[{}].monthly_rate", idx),
            errors,
        );

        if let (Some(role), Some(headcount), Some(monthly_rate)) = (role, headcount, monthly_rate) {
            let member = TeamMember::new(role, headcount, monthly_rate);
            if let Some(member) = check_member(idx, member, errors) {
                team.push(member);
            }
        }
    }

    team
}

fn parse_number(value: Option<&Value>, path: &str, errors: &mut ValidationError) -> Option<f64> {
    match value {
        None => {
            errors.push(path, "is required");
            None
        }
        Some(v) => match v.as_f64() {
            Some(n) => Some(n),
            None => {
                errors.push(path, "must be a number");
                None
            }
        },
    }
}

/// Non-negative finite real, zero when absent
fn parse_amount(value: Option<&Value>, path: &str, errors: &mut ValidationError) -> Option<f64> {
    if value.is_none() {
        return Some(0.0);
    }

    let n = parse_number(value, path, errors)?;
    check_non_negative(path, n, errors).then_some(n)
}

/// Non-negative integer, zero when absent. Integral floats (`1000.0`) pass.
fn parse_count(obj: &Map<String, Value>, name: &str, errors: &mut ValidationError) -> Option<u64> {
    let Some(value) = field(obj, name) else {
        return Some(0);
    };

    let Value::Number(number) = value else {
        errors.push(name, "must be a non-negative integer");
        return None;
    };

    if let Some(n) = number.as_u64() {
        return Some(n);
    }

    match number.as_f64() {
        Some(n) if n < 0.0 => {
            errors.push(name, format!("must be >= 0 (got {})", n));
            None
        }
        // 2^64 itself is representable as f64 but not as u64
        Some(n) if n.fract() == 0.0 && n < u64::MAX as f64 => Some(n as u64),
        _ => {
            errors.push(name, "must be a non-negative integer");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_input() -> Value {
        json!({
            "project_type": "prototype",
            "model_approach": "api_only",
            "team_size": [{"role": "engineer", "headcount": 1, "monthly_rate": 8000}],
            "dataset_gb": 0,
            "label_count": 0,
            "monthly_tokens": 1000000
        })
    }

    #[test]
    fn test_valid_input() {
        let params = validate(&valid_input()).unwrap();
        assert_eq!(params.project_type(), ProjectType::Prototype);
        assert_eq!(params.model_approach(), ModelApproach::ApiOnly);
        assert_eq!(params.team_size().len(), 1);
        assert_eq!(params.monthly_tokens(), 1_000_000);
    }

    #[test]
    fn test_invalid_project_type_is_named() {
        let mut input = valid_input();
        input["project_type"] = json!("invalid");

        let err = validate(&input).unwrap_err();
        assert_eq!(err.fields(), vec!["project_type"]);
        assert!(err.to_string().contains("prototype, fine_tune, production"));
    }

    #[test]
    fn test_collects_every_violation() {
        let input = json!({
            "project_type": 7,
            "team_size": [
                {"role": "lead", "headcount": -1, "monthly_rate": 100},
                {"role": "ml", "headcount": 1, "monthly_rate": "lots"},
                {"role": 3, "headcount": 1, "monthly_rate": 1}
            ],
            "dataset_gb": -0.5,
            "label_count": 1.5,
            "monthly_tokens": -10
        });

        let err = validate(&input).unwrap_err();
        assert_eq!(
            err.fields(),
            vec![
                "project_type",
                "model_approach",
                "team_size[0].headcount",
                "team_size[1].monthly_rate",
                "team_size[2].role",
                "dataset_gb",
                "label_count",
                "monthly_tokens",
            ]
        );
    }

    #[test]
    fn test_missing_optional_fields_default_to_zero() {
        let params = validate(&json!({
            "project_type": "production",
            "model_approach": "from_scratch",
            "dataset_gb": null
        }))
        .unwrap();

        assert!(params.team_size().is_empty());
        assert_eq!(params.dataset_gb(), 0.0);
        assert_eq!(params.label_count(), 0);
        assert_eq!(params.monthly_tokens(), 0);
    }

    #[test]
    fn test_repeated_roles_kept_in_declaration_order() {
        let mut input = valid_input();
        input["team_size"] = json!([
            {"role": "engineer", "headcount": 1, "monthly_rate": 8000},
            {"role": "", "headcount": 1, "monthly_rate": 3000},
            {"role": " engineer ", "headcount": 2, "monthly_rate": 9000}
        ]);

        let params = validate(&input).unwrap();
        let team = params.team_size();
        assert_eq!(team.len(), 3);
        assert_eq!(team[0].monthly_rate, 8000.0);
        assert_eq!(team[1].role, "");
        assert_eq!(team[2].role, "engineer");
        assert_eq!(team[2].monthly_rate, 9000.0);
    }

    #[test]
    fn test_integral_float_count_accepted() {
        let mut input = valid_input();
        input["label_count"] = json!(250.0);
        assert_eq!(validate(&input).unwrap().label_count(), 250);
    }

    #[test]
    fn test_count_at_two_to_the_64_rejected() {
        let mut input = valid_input();
        input["monthly_tokens"] = json!(18_446_744_073_709_551_616.0_f64);

        let err = validate(&input).unwrap_err();
        assert_eq!(err.fields(), vec!["monthly_tokens"]);
    }

    #[test]
    fn test_non_object_input() {
        let err = validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.fields(), vec!["$"]);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let mut input = valid_input();
        input["save_to_project"] = json!("proj-123");
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn test_mentions_matches_nested_paths() {
        let mut input = valid_input();
        input["team_size"] = json!([{"role": "x", "headcount": -1, "monthly_rate": 1}]);

        let err = validate(&input).unwrap_err();
        assert!(err.mentions("team_size"));
        assert!(!err.mentions("team"));
        assert!(!err.mentions("project_type"));
    }
}
