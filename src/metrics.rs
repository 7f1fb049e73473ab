use metrics::{counter, describe_counter, describe_histogram, histogram};

use crate::budget::{DeterministicResult, ProjectType};

/// Register metric descriptions (can be called multiple times safely).
///
/// Recording is a no-op until the host process installs a recorder; this
/// crate never installs an exporter itself.
pub fn init_metric_descriptions() {
    describe_counter!(
        "budget_calculations_total",
        "Total number of budget calculations, by outcome"
    );
    describe_counter!(
        "budget_validation_failures_total",
        "Total number of calculations rejected by validation"
    );
    describe_histogram!(
        "budget_line_items",
        "Number of line items per calculated budget"
    );
    describe_histogram!(
        "budget_validation_violations",
        "Number of field violations per rejected calculation"
    );
    describe_histogram!(
        "budget_total_cost",
        "Total cost of calculated budgets"
    );
}

/// Record a completed calculation
pub fn record_calculation(project_type: ProjectType, result: &DeterministicResult) {
    counter!(
        "budget_calculations_total",
        "project_type" => project_type.as_str(),
        "outcome" => "success",
    )
    .increment(1);

    histogram!(
        "budget_line_items",
        "project_type" => project_type.as_str(),
    )
    .record(result.line_items.len() as f64);

    histogram!(
        "budget_total_cost",
        "project_type" => project_type.as_str(),
    )
    .record(result.total_cost);
}

/// Record a rejected calculation and how many fields it rejected.
/// `project_type` is `None` when the input never named a valid one.
pub fn record_validation_failure(project_type: Option<ProjectType>, violations: usize) {
    counter!(
        "budget_calculations_total",
        "project_type" => project_type.map_or("unknown", |kind| kind.as_str()),
        "outcome" => "rejected",
    )
    .increment(1);

    counter!("budget_validation_failures_total").increment(1);
    histogram!("budget_validation_violations").record(violations as f64);
}
