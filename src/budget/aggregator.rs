//! Rounding and aggregation.
//!
//! Each line item total is rounded on its own; the grand total is the sum of
//! the already-rounded items, accumulated in integer cents. The displayed
//! total therefore always equals the sum of the displayed items, at the cost
//! of up to `0.005` of drift per item versus the unrounded sum.

use super::models::{CostCategory, DeterministicResult, LineItem};
use super::validator::ValidationError;

/// Largest amount, in USD, a line item or a total may reach. Keeps every
/// amount exact in f64 cents (`1e14 < 2^53`).
pub const MAX_AMOUNT: f64 = 1e12;

/// Round to two decimals, half away from zero
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Normalize -0.0 so results compare and serialize identically
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Whole cents of a value that is already rounded to two decimals
pub(crate) fn to_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

pub(crate) fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Exact sum of already-rounded amounts within [`MAX_AMOUNT`]. Saturates
/// instead of overflowing on anything larger.
pub fn sum_rounded(amounts: impl IntoIterator<Item = f64>) -> f64 {
    from_cents(amounts.into_iter().map(to_cents).fold(0, i64::saturating_add))
}

/// Input field that drives each category's amount
fn source_field(category: CostCategory) -> &'static str {
    match category {
        CostCategory::Staffing => "team_size",
        CostCategory::Compute => "monthly_tokens",
        CostCategory::Storage => "dataset_gb",
        CostCategory::Labeling => "label_count",
        CostCategory::Overhead => "$",
    }
}

/// Reject line items whose amounts are not finite or exceed [`MAX_AMOUNT`],
/// naming the input field responsible. Overhead follows from the other items,
/// so it is only covered by the bound on the total.
pub fn check_amounts(line_items: &[LineItem]) -> Result<(), ValidationError> {
    let within_bound = |amount: f64| amount.is_finite() && amount.abs() <= MAX_AMOUNT;
    let mut errors = ValidationError::default();

    for item in line_items
        .iter()
        .filter(|item| item.category != CostCategory::Overhead)
    {
        if !within_bound(item.total_cost) {
            errors.push(
                source_field(item.category),
                format!("{} cost exceeds the maximum of {} USD", item.category, MAX_AMOUNT),
            );
        }
    }

    if errors.is_empty() {
        let total: f64 = line_items.iter().map(|item| item.total_cost).sum();
        if !within_bound(total) {
            errors.push("$", format!("total cost exceeds the maximum of {} USD", MAX_AMOUNT));
        }
    }

    errors.into_result()
}

/// Fold ordered line items into a result. Never fails.
pub fn aggregate(line_items: Vec<LineItem>) -> DeterministicResult {
    let total_cost = sum_rounded(line_items.iter().map(|item| item.total_cost));
    DeterministicResult {
        line_items,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::models::CostCategory;

    fn item(total_cost: f64) -> LineItem {
        LineItem {
            category: CostCategory::Compute,
            description: String::new(),
            unit_cost: total_cost,
            quantity: 1.0,
            unit_type: "token".to_string(),
            total_cost,
        }
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(2.345_000_1), 2.35);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(16000.0), 16000.0);
        assert_eq!(round2(1602.000_000_000_000_2), 1602.0);
    }

    #[test]
    fn test_round2_normalizes_negative_zero() {
        let value = round2(-0.001);
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }

    #[test]
    fn test_sum_is_exact_in_cents() {
        // 0.1 + 0.2 != 0.3 in f64; cent accumulation avoids that
        assert_eq!(sum_rounded([0.1, 0.2]), 0.3);
        assert_eq!(sum_rounded(std::iter::repeat(0.01).take(1000)), 10.0);
    }

    #[test]
    fn test_sum_saturates_instead_of_panicking() {
        let total = sum_rounded([1e18, 1e18, f64::INFINITY]);
        assert!(total.is_finite());
    }

    #[test]
    fn test_check_amounts_names_source_field() {
        let mut storage = item(2e12);
        storage.category = CostCategory::Storage;
        let mut staffing = item(f64::INFINITY);
        staffing.category = CostCategory::Staffing;

        let err = check_amounts(&[staffing, item(20.0), storage]).unwrap_err();
        assert_eq!(err.fields(), vec!["team_size", "dataset_gb"]);
    }

    #[test]
    fn test_check_amounts_bounds_the_total() {
        let items = vec![item(6e11), item(6e11)];
        let err = check_amounts(&items).unwrap_err();
        assert_eq!(err.fields(), vec!["$"]);

        assert!(check_amounts(&[item(MAX_AMOUNT)]).is_ok());
    }

    #[test]
    fn test_aggregate_empty() {
        let result = aggregate(Vec::new());
        assert!(result.line_items.is_empty());
        assert_eq!(result.total_cost, 0.0);
    }

    #[test]
    fn test_aggregate_preserves_order_and_sums() {
        let result = aggregate(vec![item(16000.0), item(20.0), item(1602.0)]);
        assert_eq!(result.line_items.len(), 3);
        assert_eq!(result.line_items[1].total_cost, 20.0);
        assert_eq!(result.total_cost, 17622.0);
    }
}
