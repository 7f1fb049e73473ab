use serde_json::Value;
use tracing::{debug, warn};

use super::aggregator::{aggregate, check_amounts};
use super::line_items;
use super::models::{DeterministicResult, ProjectParameters, ProjectType};
use super::resource_model::{RateTable, ResourceModel};
use super::validator::{self, ValidationError};
use crate::metrics;

/// Entry point of the budget engine.
///
/// Runs validation, rate resolution, line item building and aggregation in
/// that order. Holds only a read-only rate table, so one instance can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct DeterministicCalculator {
    model: ResourceModel,
}

impl DeterministicCalculator {
    pub fn new(rates: RateTable) -> Self {
        Self {
            model: ResourceModel::new(rates),
        }
    }

    pub fn model(&self) -> &ResourceModel {
        &self.model
    }

    /// Validate raw input and calculate its budget.
    ///
    /// On a validation failure no later stage runs and every violation is
    /// returned.
    pub fn calculate(&self, raw: &Value) -> Result<DeterministicResult, ValidationError> {
        let params = validator::validate(raw).map_err(|err| {
            let project_type = raw
                .get("project_type")
                .and_then(Value::as_str)
                .and_then(|text| text.parse().ok());
            reject(project_type, err)
        })?;

        self.calculate_params(&params)
    }

    /// Calculate the budget for already-validated parameters.
    ///
    /// Fails only when an amount derived from the rate table would exceed
    /// [`MAX_AMOUNT`](super::aggregator::MAX_AMOUNT).
    pub fn calculate_params(
        &self,
        params: &ProjectParameters,
    ) -> Result<DeterministicResult, ValidationError> {
        debug!(
            project_type = %params.project_type(),
            model_approach = %params.model_approach(),
            roles = params.team_size().len(),
            "Calculating budget"
        );

        let items = line_items::build(params, &self.model);
        check_amounts(&items).map_err(|err| reject(Some(params.project_type()), err))?;
        let result = aggregate(items);

        debug!(
            line_items = result.line_items.len(),
            total_cost = result.total_cost,
            "Budget calculated"
        );
        metrics::record_calculation(params.project_type(), &result);

        Ok(result)
    }
}

fn reject(project_type: Option<ProjectType>, err: ValidationError) -> ValidationError {
    warn!(violations = err.len(), "Rejected project parameters");
    metrics::record_validation_failure(project_type, err.len());
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::models::CostCategory;
    use serde_json::json;

    #[test]
    fn test_example_scenario() {
        let calculator = DeterministicCalculator::default();
        let result = calculator
            .calculate(&json!({
                "project_type": "prototype",
                "model_approach": "api_only",
                "team_size": [{"role": "engineer", "headcount": 1, "monthly_rate": 8000}],
                "dataset_gb": 0,
                "label_count": 0,
                "monthly_tokens": 1000000
            }))
            .unwrap();

        let totals: Vec<_> = result
            .line_items
            .iter()
            .map(|item| (item.category, item.total_cost))
            .collect();
        assert_eq!(
            totals,
            vec![
                (CostCategory::Staffing, 16000.0),
                (CostCategory::Compute, 20.0),
                (CostCategory::Overhead, 1602.0),
            ]
        );
        assert_eq!(result.total_cost, 17622.0);
    }

    #[test]
    fn test_validation_failure_stops_pipeline() {
        let calculator = DeterministicCalculator::default();
        let err = calculator
            .calculate(&json!({"project_type": "invalid", "model_approach": "api_only"}))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["project_type"]);
    }

    #[test]
    fn test_oversized_amounts_are_rejected() {
        let calculator = DeterministicCalculator::default();

        let err = calculator
            .calculate(&json!({
                "project_type": "production",
                "model_approach": "api_only",
                "dataset_gb": 1e18
            }))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["dataset_gb"]);

        let err = calculator
            .calculate(&json!({
                "project_type": "production",
                "model_approach": "api_only",
                "team_size": [{"role": "x", "headcount": 1e200, "monthly_rate": 1e200}]
            }))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["team_size"]);
    }

    #[test]
    fn test_max_token_count_is_rejected_not_panicking() {
        let err = DeterministicCalculator::default()
            .calculate(&json!({
                "project_type": "production",
                "model_approach": "from_scratch",
                "monthly_tokens": u64::MAX
            }))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["monthly_tokens"]);
    }

    #[test]
    fn test_many_large_roles_bound_the_total() {
        let team: Vec<_> = (0..20)
            .map(|idx| json!({"role": format!("r{}", idx), "headcount": 1000, "monthly_rate": 5e6}))
            .collect();

        // Each role costs 6e10, the total crosses the bound
        let err = DeterministicCalculator::default()
            .calculate(&json!({
                "project_type": "production",
                "model_approach": "api_only",
                "team_size": team
            }))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["$"]);
    }

    #[test]
    fn test_custom_rate_table() {
        let mut rates = RateTable::default();
        rates.duration_months.prototype = 3;
        rates.overhead_fraction.prototype = 0.0;

        let calculator = DeterministicCalculator::new(rates);
        let result = calculator
            .calculate(&json!({
                "project_type": "prototype",
                "model_approach": "api_only",
                "team_size": [{"role": "engineer", "headcount": 1, "monthly_rate": 8000}]
            }))
            .unwrap();

        assert_eq!(result.line_items.len(), 1);
        assert_eq!(result.total_cost, 24000.0);
    }
}
