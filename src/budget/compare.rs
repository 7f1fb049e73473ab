//! Category-level comparison of two budgets.
//!
//! Used to diff a deterministic result against another estimate of the same
//! shape (an AI-generated estimate, or a what-if rerun).

use serde::{Deserialize, Serialize};

use super::aggregator::{from_cents, to_cents};
use super::models::{CostCategory, DeterministicResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDelta {
    pub category: CostCategory,
    pub baseline: f64,
    pub candidate: f64,
    /// `candidate - baseline`
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetComparison {
    pub categories: Vec<CategoryDelta>,
    pub baseline_total: f64,
    pub candidate_total: f64,
    pub total_delta: f64,
}

impl BudgetComparison {
    /// Relative change of the total, `None` when the baseline is zero
    pub fn total_change_ratio(&self) -> Option<f64> {
        (self.baseline_total != 0.0).then(|| self.total_delta / self.baseline_total)
    }

    /// Categories whose totals differ
    pub fn changed(&self) -> impl Iterator<Item = &CategoryDelta> {
        self.categories.iter().filter(|c| c.delta != 0.0)
    }
}

/// Compare two results per category. Categories absent from both are skipped.
pub fn compare(baseline: &DeterministicResult, candidate: &DeterministicResult) -> BudgetComparison {
    let present = |result: &DeterministicResult, category: CostCategory| {
        result.line_items.iter().any(|item| item.category == category)
    };

    let categories = CostCategory::ORDER
        .into_iter()
        .filter(|&category| present(baseline, category) || present(candidate, category))
        .map(|category| {
            let before = baseline.category_total(category);
            let after = candidate.category_total(category);
            CategoryDelta {
                category,
                baseline: before,
                candidate: after,
                delta: difference(after, before),
            }
        })
        .collect();

    BudgetComparison {
        categories,
        baseline_total: baseline.total_cost,
        candidate_total: candidate.total_cost,
        total_delta: difference(candidate.total_cost, baseline.total_cost),
    }
}

fn difference(after: f64, before: f64) -> f64 {
    from_cents(to_cents(after).saturating_sub(to_cents(before)))
}
