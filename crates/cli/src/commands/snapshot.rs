//! One-shot utilization sample

use crate::output::{self, format_percentage, OutputFormat};
use anyhow::{Context, Result};
use gk_core::dashboard::{fetch_outcome, Status};
use gk_core::{MonitorConfig, UsagePercentage};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

/// Row in the snapshot table
#[derive(Tabled, Serialize)]
struct UsageRow {
    #[tabled(rename = "Container")]
    name: String,
    #[tabled(rename = "CPU")]
    cpu: String,
    #[tabled(rename = "Memory")]
    memory: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

impl From<&UsagePercentage> for UsageRow {
    fn from(usage: &UsagePercentage) -> Self {
        Self {
            name: usage.name.clone(),
            cpu: format_percentage(usage.cpu_percentage),
            memory: format_percentage(usage.memory_percentage),
            status: Status::of(usage).label(),
        }
    }
}

/// Fetch once and print the percentages
pub async fn print_snapshot(
    kubeconfig: Option<&Path>,
    config: &MonitorConfig,
    format: OutputFormat,
) -> Result<()> {
    let provider = super::connect(kubeconfig).await?;

    let outcome = fetch_outcome(&provider, &config.namespace).await;
    let usages = outcome.result.context("Failed to fetch utilization")?;

    match format {
        OutputFormat::Table => {
            let rows: Vec<UsageRow> = usages.iter().map(UsageRow::from).collect();
            output::print_table(&rows, format);
            if !usages.is_empty() {
                output::print_info(&output::status_summary(&usages));
            }
        }
        OutputFormat::Json => output::print_json(&usages_json(&usages)),
    }

    Ok(())
}

/// JSON keeps the raw numbers rather than the formatted strings
fn usages_json(usages: &[UsagePercentage]) -> Vec<JsonUsage<'_>> {
    usages
        .iter()
        .map(|usage| JsonUsage {
            name: &usage.name,
            cpu_percentage: usage.cpu_percentage,
            memory_percentage: usage.memory_percentage,
            status: Status::of(usage).label(),
        })
        .collect()
}

#[derive(Serialize)]
struct JsonUsage<'a> {
    name: &'a str,
    cpu_percentage: f64,
    memory_percentage: f64,
    status: &'static str,
}
