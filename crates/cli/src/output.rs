//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use gk_core::dashboard::Status;
use gk_core::UsagePercentage;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a table from a list of items
pub fn print_table<T: Tabled + Serialize>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("{}", "No containers with declared limits found".yellow());
                return;
            }
            let table = Table::new(items).with(Style::rounded()).to_string();
            println!("{}", table);
        }
        OutputFormat::Json => print_json(items),
    }
}

/// Print items as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(items: &T) {
    if let Ok(json) = serde_json::to_string_pretty(items) {
        println!("{}", json);
    }
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a percentage with two decimals
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Color a status label
pub fn color_status(status: Status) -> String {
    match status {
        Status::Normal => status.label().green().to_string(),
        Status::Warning => status.label().yellow().to_string(),
        Status::High => status.label().red().to_string(),
    }
}

/// One-line count of containers per status
pub fn status_summary(usages: &[UsagePercentage]) -> String {
    let count = |wanted: Status| usages.iter().filter(|u| Status::of(u) == wanted).count();

    format!(
        "{} containers: {} {}, {} {}, {} {}",
        usages.len(),
        count(Status::Normal),
        color_status(Status::Normal),
        count(Status::Warning),
        color_status(Status::Warning),
        count(Status::High),
        color_status(Status::High),
    )
}
