//! Resource model: the rate table and per-category rate functions.
//!
//! All pricing knowledge lives here. Rate constants are data ([`RateTable`]),
//! and each category's cost rule is one entry of [`CATEGORY_RULES`], so the
//! whole model can be audited and tested without running a calculation.

use serde::{Deserialize, Serialize};

use super::aggregator::round2;
use super::models::{CostCategory, ModelApproach, ProjectParameters, ProjectType};

/// A value per project type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ByProjectType<T> {
    pub prototype: T,
    pub fine_tune: T,
    pub production: T,
}

impl<T: Copy> ByProjectType<T> {
    pub fn get(&self, project_type: ProjectType) -> T {
        match project_type {
            ProjectType::Prototype => self.prototype,
            ProjectType::FineTune => self.fine_tune,
            ProjectType::Production => self.production,
        }
    }

    pub fn entries(&self) -> [(ProjectType, T); 3] {
        ProjectType::ALL.map(|kind| (kind, self.get(kind)))
    }
}

/// A value per model-build approach
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ByModelApproach<T> {
    pub api_only: T,
    pub fine_tune: T,
    pub from_scratch: T,
}

impl<T: Copy> ByModelApproach<T> {
    pub fn get(&self, approach: ModelApproach) -> T {
        match approach {
            ModelApproach::ApiOnly => self.api_only,
            ModelApproach::FineTune => self.fine_tune,
            ModelApproach::FromScratch => self.from_scratch,
        }
    }

    pub fn entries(&self) -> [(ModelApproach, T); 3] {
        ModelApproach::ALL.map(|kind| (kind, self.get(kind)))
    }
}

/// Per-label rates. API-only projects never pay for labeling, so there is no
/// `api_only` entry to configure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelRates {
    pub fine_tune: f64,
    pub from_scratch: f64,
}

impl LabelRates {
    pub fn get(&self, approach: ModelApproach) -> Option<f64> {
        match approach {
            ModelApproach::ApiOnly => None,
            ModelApproach::FineTune => Some(self.fine_tune),
            ModelApproach::FromScratch => Some(self.from_scratch),
        }
    }
}

/// Every constant the cost model uses, in USD.
///
/// The defaults are a starting calibration, not authoritative pricing.
/// Deployments override them through the `[rates]` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub storage_per_gb_month: f64,
    /// Assumed project length, scales staffing, compute and storage
    pub duration_months: ByProjectType<u32>,
    /// Cost per token processed
    pub token_rate: ByModelApproach<f64>,
    pub per_label: LabelRates,
    /// Share of the pre-overhead subtotal added for infra and misc costs
    pub overhead_fraction: ByProjectType<f64>,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            storage_per_gb_month: 0.023,
            duration_months: ByProjectType {
                prototype: 2,
                fine_tune: 4,
                production: 12,
            },
            token_rate: ByModelApproach {
                api_only: 0.000_01,
                fine_tune: 0.000_02,
                from_scratch: 0.000_05,
            },
            per_label: LabelRates {
                fine_tune: 0.08,
                from_scratch: 0.12,
            },
            overhead_fraction: ByProjectType {
                prototype: 0.10,
                fine_tune: 0.15,
                production: 0.20,
            },
        }
    }
}

impl RateTable {
    /// Check every constant. Returns one message per bad key.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for (kind, months) in self.duration_months.entries() {
            if months == 0 {
                problems.push(format!("rates.duration_months.{} must be > 0", kind));
            }
        }

        let mut check_rate = |key: String, value: f64| {
            if !value.is_finite() || value < 0.0 {
                problems.push(format!("{} must be a finite number >= 0 (got {})", key, value));
            }
        };

        for (kind, rate) in self.token_rate.entries() {
            check_rate(format!("rates.token_rate.{}", kind), rate);
        }
        check_rate("rates.storage_per_gb_month".to_string(), self.storage_per_gb_month);
        check_rate("rates.per_label.fine_tune".to_string(), self.per_label.fine_tune);
        check_rate("rates.per_label.from_scratch".to_string(), self.per_label.from_scratch);

        for (kind, fraction) in self.overhead_fraction.entries() {
            if !(0.0..=1.0).contains(&fraction) {
                problems.push(format!(
                    "rates.overhead_fraction.{} must be between 0 and 1 (got {})",
                    kind, fraction
                ));
            }
        }

        problems
    }
}

/// Rates resolved for one (project type, model approach) pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRates {
    pub project_type: ProjectType,
    pub model_approach: ModelApproach,
    pub duration_months: u32,
    pub token_rate: f64,
    pub storage_per_gb_month: f64,
    /// `None` when the approach never incurs labeling cost
    pub per_label_rate: Option<f64>,
    pub overhead_fraction: f64,
}

/// An unrounded cost before it becomes a line item
#[derive(Debug, Clone, PartialEq)]
pub struct Charge {
    pub description: String,
    pub unit_cost: f64,
    pub quantity: f64,
    pub unit_type: &'static str,
}

pub type RateFn = fn(&ProjectParameters, &ResolvedRates) -> Vec<Charge>;

/// One row of the resource model
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: CostCategory,
    pub charges: RateFn,
}

/// Rules for every category priced directly from the parameters, in output
/// order. Overhead is not listed: it is priced from the subtotal of these.
pub static CATEGORY_RULES: [CategoryRule; 4] = [
    CategoryRule {
        category: CostCategory::Staffing,
        charges: staffing_charges,
    },
    CategoryRule {
        category: CostCategory::Compute,
        charges: compute_charges,
    },
    CategoryRule {
        category: CostCategory::Storage,
        charges: storage_charges,
    },
    CategoryRule {
        category: CostCategory::Labeling,
        charges: labeling_charges,
    },
];

fn staffing_charges(params: &ProjectParameters, rates: &ResolvedRates) -> Vec<Charge> {
    let months = f64::from(rates.duration_months);
    params
        .team_size()
        .iter()
        .map(|member| Charge {
            description: format!(
                "{} ({} x {} months)",
                if member.role.is_empty() { "Unnamed role" } else { &member.role },
                member.headcount,
                rates.duration_months
            ),
            unit_cost: member.monthly_rate,
            quantity: member.headcount * months,
            unit_type: "person_month",
        })
        .collect()
}

fn compute_charges(params: &ProjectParameters, rates: &ResolvedRates) -> Vec<Charge> {
    vec![Charge {
        description: format!(
            "Compute: {} tokens/month over {} months ({})",
            params.monthly_tokens(),
            rates.duration_months,
            rates.model_approach
        ),
        unit_cost: rates.token_rate,
        quantity: params.monthly_tokens() as f64 * f64::from(rates.duration_months),
        unit_type: "token",
    }]
}

fn storage_charges(params: &ProjectParameters, rates: &ResolvedRates) -> Vec<Charge> {
    vec![Charge {
        description: format!(
            "Storage: {} GB over {} months",
            params.dataset_gb(),
            rates.duration_months
        ),
        unit_cost: rates.storage_per_gb_month,
        quantity: params.dataset_gb() * f64::from(rates.duration_months),
        unit_type: "gb_month",
    }]
}

fn labeling_charges(params: &ProjectParameters, rates: &ResolvedRates) -> Vec<Charge> {
    match rates.per_label_rate {
        Some(rate) if params.label_count() > 0 => vec![Charge {
            description: format!(
                "Labeling: {} labels ({})",
                params.label_count(),
                rates.model_approach
            ),
            unit_cost: rate,
            quantity: params.label_count() as f64,
            unit_type: "label",
        }],
        _ => Vec::new(),
    }
}

/// Overhead on the subtotal of all prior (rounded) line items
pub fn overhead_charge(subtotal: f64, rates: &ResolvedRates) -> Charge {
    Charge {
        description: format!(
            "Overhead: {}% of subtotal ({})",
            round2(rates.overhead_fraction * 100.0),
            rates.project_type
        ),
        unit_cost: subtotal,
        quantity: rates.overhead_fraction,
        unit_type: "fraction",
    }
}

/// The resource model bound to one rate table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceModel {
    rates: RateTable,
}

impl ResourceModel {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn resolve(&self, project_type: ProjectType, model_approach: ModelApproach) -> ResolvedRates {
        ResolvedRates {
            project_type,
            model_approach,
            duration_months: self.rates.duration_months.get(project_type),
            token_rate: self.rates.token_rate.get(model_approach),
            storage_per_gb_month: self.rates.storage_per_gb_month,
            per_label_rate: self.rates.per_label.get(model_approach),
            overhead_fraction: self.rates.overhead_fraction.get(project_type),
        }
    }

    pub fn rules(&self) -> &'static [CategoryRule] {
        &CATEGORY_RULES
    }
}
