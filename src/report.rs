//! Terminal rendering of budgets and comparisons

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::budget::{BudgetComparison, DeterministicResult, ValidationError};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Two-decimal amount, independent of locale
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

fn format_delta(delta: f64) -> String {
    if delta > 0.0 {
        format!("+{:.2}", delta)
    } else {
        format!("{:.2}", delta)
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    table
}

fn amount_cell(amount: f64) -> Cell {
    Cell::new(format_amount(amount)).set_alignment(CellAlignment::Right)
}

/// Line item table with a trailing total row
pub fn render_result(result: &DeterministicResult) -> String {
    let mut table = new_table(&[
        "CATEGORY",
        "DESCRIPTION",
        "UNIT COST",
        "QUANTITY",
        "UNIT",
        "TOTAL",
    ]);

    for item in &result.line_items {
        table.add_row(vec![
            Cell::new(item.category),
            Cell::new(&item.description),
            Cell::new(item.unit_cost).set_alignment(CellAlignment::Right),
            Cell::new(item.quantity).set_alignment(CellAlignment::Right),
            Cell::new(&item.unit_type),
            amount_cell(item.total_cost),
        ]);
    }

    table.add_row(vec![
        Cell::new("TOTAL").fg(Color::Green),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        amount_cell(result.total_cost).fg(Color::Green),
    ]);

    table.to_string()
}

pub fn render_comparison(comparison: &BudgetComparison) -> String {
    let mut table = new_table(&["CATEGORY", "BASELINE", "CANDIDATE", "DELTA"]);

    for row in &comparison.categories {
        let color = delta_color(row.delta);
        table.add_row(vec![
            Cell::new(row.category),
            amount_cell(row.baseline),
            amount_cell(row.candidate),
            Cell::new(format_delta(row.delta))
                .set_alignment(CellAlignment::Right)
                .fg(color),
        ]);
    }

    table.add_row(vec![
        Cell::new("TOTAL"),
        amount_cell(comparison.baseline_total),
        amount_cell(comparison.candidate_total),
        Cell::new(format_delta(comparison.total_delta))
            .set_alignment(CellAlignment::Right)
            .fg(delta_color(comparison.total_delta)),
    ]);

    table.to_string()
}

fn delta_color(delta: f64) -> Color {
    if delta > 0.0 {
        Color::Red
    } else if delta < 0.0 {
        Color::Green
    } else {
        Color::Reset
    }
}

/// One line per violation, ready for display
pub fn render_violations(err: &ValidationError) -> Vec<String> {
    err.violations()
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect()
}
