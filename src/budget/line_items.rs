use tracing::trace;

use super::aggregator::{round2, sum_rounded};
use super::models::{CostCategory, LineItem, ProjectParameters};
use super::resource_model::{overhead_charge, Charge, ResourceModel};

/// Apply the resource model to validated parameters.
///
/// Output order: staffing (team declaration order), compute, storage,
/// labeling, then overhead. Items whose rounded total is zero are omitted.
pub fn build(params: &ProjectParameters, model: &ResourceModel) -> Vec<LineItem> {
    let rates = model.resolve(params.project_type(), params.model_approach());

    let mut items: Vec<LineItem> = model
        .rules()
        .iter()
        .flat_map(|rule| {
            (rule.charges)(params, &rates)
                .into_iter()
                .filter_map(move |charge| to_line_item(rule.category, charge))
        })
        .collect();

    // Overhead depends on everything before it, so it is priced last
    let subtotal = sum_rounded(items.iter().map(|item| item.total_cost));
    if let Some(overhead) = to_line_item(CostCategory::Overhead, overhead_charge(subtotal, &rates)) {
        items.push(overhead);
    }

    items
}

fn to_line_item(category: CostCategory, charge: Charge) -> Option<LineItem> {
    let total_cost = round2(charge.unit_cost * charge.quantity);
    if total_cost == 0.0 {
        trace!(category = %category, "Omitting zero-cost charge");
        return None;
    }

    Some(LineItem {
        category,
        description: charge.description,
        unit_cost: charge.unit_cost,
        quantity: charge.quantity,
        unit_type: charge.unit_type.to_string(),
        total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::models::{ModelApproach, ProjectType, TeamMember};

    #[test]
    fn test_fixed_category_order() {
        let params = ProjectParameters::new(
            ProjectType::FineTune,
            ModelApproach::FineTune,
            vec![
                TeamMember::new("ml engineer", 1.0, 10000.0),
                TeamMember::new("data engineer", 1.0, 9000.0),
            ],
            50.0,
            2000,
            100_000,
        )
        .unwrap();

        let items = build(&params, &ResourceModel::default());
        let categories: Vec<_> = items.iter().map(|item| item.category).collect();
        assert_eq!(
            categories,
            vec![
                CostCategory::Staffing,
                CostCategory::Staffing,
                CostCategory::Compute,
                CostCategory::Storage,
                CostCategory::Labeling,
                CostCategory::Overhead,
            ]
        );
        assert!(items[0].description.starts_with("ml engineer"));
        assert!(items[1].description.starts_with("data engineer"));
    }

    #[test]
    fn test_zero_headcount_role_is_omitted() {
        let params = ProjectParameters::new(
            ProjectType::Prototype,
            ModelApproach::ApiOnly,
            vec![
                TeamMember::new("advisor", 0.0, 5000.0),
                TeamMember::new("engineer", 1.0, 8000.0),
            ],
            0.0,
            0,
            0,
        )
        .unwrap();

        let items = build(&params, &ResourceModel::default());
        assert_eq!(items.len(), 2);
        assert!(items[0].description.starts_with("engineer"));
        assert_eq!(items[1].category, CostCategory::Overhead);
    }

    #[test]
    fn test_line_total_is_rounded_product() {
        let params = ProjectParameters::new(
            ProjectType::Production,
            ModelApproach::FromScratch,
            vec![TeamMember::new("researcher", 1.5, 12345.67)],
            333.3,
            777,
            1_234_567,
        )
        .unwrap();

        for item in build(&params, &ResourceModel::default()) {
            assert_eq!(item.total_cost, round2(item.unit_cost * item.quantity));
        }
    }

    #[test]
    fn test_overhead_uses_rounded_subtotal() {
        let params = ProjectParameters::new(
            ProjectType::Prototype,
            ModelApproach::ApiOnly,
            vec![TeamMember::new("engineer", 1.0, 8000.0)],
            0.0,
            0,
            1_000_000,
        )
        .unwrap();

        let items = build(&params, &ResourceModel::default());
        let overhead = items.last().unwrap();
        assert_eq!(overhead.category, CostCategory::Overhead);
        assert_eq!(overhead.unit_cost, 16020.0);
        assert_eq!(overhead.quantity, 0.10);
        assert_eq!(overhead.total_cost, 1602.0);
    }
}
