use anyhow::Result;
use colored::Colorize;
use ml_budget::config::{self, Config};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration after defaults, file and environment
/// have been layered.
pub fn show(cfg: &Config) -> Result<()> {
    info!("Displaying effective configuration");

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(cfg)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
///
/// Loads and validates the configuration file
pub fn validate(path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!("Validating configuration file {}", path.display());

    if !path.exists() {
        println!(
            "{}",
            format!("! {} not found, checking built-in defaults", path.display()).yellow()
        );
    }

    let cfg = config::load_config(path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Log Level: {}", cfg.logging.level);
    println!("  Log Format: {}", cfg.logging.format);
    println!(
        "  Custom Rates: {}",
        if cfg.rates == Default::default() {
            "no (built-in defaults)"
        } else {
            "yes"
        }
    );

    info!("Configuration validation successful");
    Ok(())
}
