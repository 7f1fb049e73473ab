use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use ml_budget::budget::{round2, RateTable};

/// Execute the rates command
///
/// Prints the effective rate table, one row per project type and approach.
pub fn execute(rates: &RateTable) -> Result<()> {
    println!("{}", "Effective rate table (USD):".green().bold());
    println!();

    let mut by_project = Table::new();
    by_project
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    by_project.set_header(vec![
        Cell::new("PROJECT TYPE").fg(Color::Cyan),
        Cell::new("DURATION (MONTHS)").fg(Color::Cyan),
        Cell::new("OVERHEAD").fg(Color::Cyan),
    ]);
    for (kind, months) in rates.duration_months.entries() {
        by_project.add_row(vec![
            Cell::new(kind),
            Cell::new(months),
            Cell::new(format!("{}%", round2(rates.overhead_fraction.get(kind) * 100.0))),
        ]);
    }
    println!("{}", by_project);

    let mut by_approach = Table::new();
    by_approach
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    by_approach.set_header(vec![
        Cell::new("MODEL APPROACH").fg(Color::Cyan),
        Cell::new("PER TOKEN").fg(Color::Cyan),
        Cell::new("PER 1M TOKENS").fg(Color::Cyan),
        Cell::new("PER LABEL").fg(Color::Cyan),
    ]);
    for (kind, rate) in rates.token_rate.entries() {
        let per_label = rates
            .per_label
            .get(kind)
            .map_or_else(|| "n/a".to_string(), |rate| rate.to_string());
        by_approach.add_row(vec![
            Cell::new(kind),
            Cell::new(rate),
            Cell::new(format!("{:.2}", rate * 1_000_000.0)),
            Cell::new(per_label),
        ]);
    }
    println!("{}", by_approach);

    println!(
        "  {}: {} per GB-month",
        "Storage".cyan(),
        rates.storage_per_gb_month
    );

    Ok(())
}
