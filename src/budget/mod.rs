//! Deterministic budget engine
//!
//! Pipeline: validator -> resource_model -> line_items -> aggregator, driven by
//! [`DeterministicCalculator`]. Every stage is a pure function; the same input
//! always produces the same result, down to float representation.

pub mod aggregator;
pub mod calculator;
pub mod compare;
pub mod line_items;
pub mod models;
pub mod resource_model;
pub mod validator;
pub mod what_if;

pub use aggregator::{aggregate, round2};
pub use calculator::DeterministicCalculator;
pub use compare::{compare, BudgetComparison, CategoryDelta};
pub use models::{
    CostCategory, DeterministicResult, LineItem, ModelApproach, ProjectParameters, ProjectType,
    TeamMember,
};
pub use resource_model::{RateTable, ResourceModel};
pub use validator::{validate, FieldViolation, ValidationError};
pub use what_if::{apply_overrides, Override};
