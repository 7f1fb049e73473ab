use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::validator::{self, ValidationError};

/// Kind of project being budgeted. Drives duration and overhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Prototype,
    FineTune,
    Production,
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] = [Self::Prototype, Self::FineTune, Self::Production];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prototype => "prototype",
            Self::FineTune => "fine_tune",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_token(s);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("unknown project type '{}'", s))
    }
}

/// How the model gets built. Drives token and labeling rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelApproach {
    ApiOnly,
    FineTune,
    FromScratch,
}

impl ModelApproach {
    pub const ALL: [ModelApproach; 3] = [Self::ApiOnly, Self::FineTune, Self::FromScratch];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiOnly => "api_only",
            Self::FineTune => "fine_tune",
            Self::FromScratch => "from_scratch",
        }
    }
}

impl fmt::Display for ModelApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelApproach {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_token(s);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| format!("unknown model approach '{}'", s))
    }
}

/// Lowercase, trim, and fold `-` and spaces into `_` ("Fine-Tune" -> "fine_tune").
fn normalize_token(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// One staffing entry of the team composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub role: String,
    pub headcount: f64,
    pub monthly_rate: f64,
}

impl TeamMember {
    pub fn new(role: impl Into<String>, headcount: f64, monthly_rate: f64) -> Self {
        Self {
            role: role.into(),
            headcount,
            monthly_rate,
        }
    }
}

/// Canonical, validated project parameters.
///
/// Fields are private so a value can only exist once it has passed validation,
/// either through [`validator::validate`] or [`ProjectParameters::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectParameters {
    project_type: ProjectType,
    model_approach: ModelApproach,
    team_size: Vec<TeamMember>,
    dataset_gb: f64,
    label_count: u64,
    monthly_tokens: u64,
}

impl ProjectParameters {
    /// Build parameters from typed values, running the same numeric checks as
    /// raw-input validation.
    pub fn new(
        project_type: ProjectType,
        model_approach: ModelApproach,
        team_size: Vec<TeamMember>,
        dataset_gb: f64,
        label_count: u64,
        monthly_tokens: u64,
    ) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();
        let team_size = validator::check_team(team_size, &mut errors);
        validator::check_non_negative("dataset_gb", dataset_gb, &mut errors);
        errors.into_result()?;

        Ok(Self::from_parts(
            project_type,
            model_approach,
            team_size,
            dataset_gb,
            label_count,
            monthly_tokens,
        ))
    }

    pub(super) fn from_parts(
        project_type: ProjectType,
        model_approach: ModelApproach,
        team_size: Vec<TeamMember>,
        dataset_gb: f64,
        label_count: u64,
        monthly_tokens: u64,
    ) -> Self {
        Self {
            project_type,
            model_approach,
            team_size,
            dataset_gb,
            label_count,
            monthly_tokens,
        }
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn model_approach(&self) -> ModelApproach {
        self.model_approach
    }

    pub fn team_size(&self) -> &[TeamMember] {
        &self.team_size
    }

    pub fn dataset_gb(&self) -> f64 {
        self.dataset_gb
    }

    pub fn label_count(&self) -> u64 {
        self.label_count
    }

    pub fn monthly_tokens(&self) -> u64 {
        self.monthly_tokens
    }
}

/// Cost categories in output precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Staffing,
    Compute,
    Storage,
    Labeling,
    Overhead,
}

impl CostCategory {
    pub const ORDER: [CostCategory; 5] = [
        Self::Staffing,
        Self::Compute,
        Self::Storage,
        Self::Labeling,
        Self::Overhead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staffing => "staffing",
            Self::Compute => "compute",
            Self::Storage => "storage",
            Self::Labeling => "labeling",
            Self::Overhead => "overhead",
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One category-level cost entry.
///
/// `total_cost` is always `round2(unit_cost * quantity)`. The same shape is
/// used by non-deterministic estimates so results can be compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub category: CostCategory,
    pub description: String,
    pub unit_cost: f64,
    pub quantity: f64,
    pub unit_type: String,
    pub total_cost: f64,
}

/// Itemized and aggregate output of one calculation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeterministicResult {
    pub line_items: Vec<LineItem>,
    pub total_cost: f64,
}

impl DeterministicResult {
    /// Sum of line item totals for one category
    pub fn category_total(&self, category: CostCategory) -> f64 {
        super::aggregator::sum_rounded(
            self.line_items
                .iter()
                .filter(|item| item.category == category)
                .map(|item| item.total_cost),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_type_parsing_is_lenient() {
        assert_eq!("prototype".parse::<ProjectType>(), Ok(ProjectType::Prototype));
        assert_eq!(" Fine-Tune ".parse::<ProjectType>(), Ok(ProjectType::FineTune));
        assert_eq!("PRODUCTION".parse::<ProjectType>(), Ok(ProjectType::Production));
        assert!("invalid".parse::<ProjectType>().is_err());
    }

    #[test]
    fn test_model_approach_parsing() {
        assert_eq!("api only".parse::<ModelApproach>(), Ok(ModelApproach::ApiOnly));
        assert_eq!("from_scratch".parse::<ModelApproach>(), Ok(ModelApproach::FromScratch));
        assert!("scratch".parse::<ModelApproach>().is_err());
    }

    #[test]
    fn test_category_order_matches_ord() {
        let mut sorted = CostCategory::ORDER;
        sorted.sort();
        assert_eq!(sorted, CostCategory::ORDER);
    }

    #[test]
    fn test_line_item_serializes_snake_case_category() {
        let item = LineItem {
            category: CostCategory::Labeling,
            description: "Data labeling".to_string(),
            unit_cost: 0.08,
            quantity: 100.0,
            unit_type: "label".to_string(),
            total_cost: 8.0,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["category"], "labeling");
        assert_eq!(json["total_cost"], 8.0);
    }

    #[test]
    fn test_new_rejects_negative_dataset() {
        let err = ProjectParameters::new(
            ProjectType::Prototype,
            ModelApproach::ApiOnly,
            vec![],
            -1.0,
            0,
            0,
        )
        .unwrap_err();

        assert_eq!(err.fields(), vec!["dataset_gb"]);
    }
}
