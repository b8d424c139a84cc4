//! gk: live container utilization for a Kubernetes namespace
//!
//! `gk resource` opens the terminal dashboard; `gk snapshot` prints a single
//! sample and exits.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{resource, snapshot};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Container utilization monitor
#[derive(Parser)]
#[command(name = "gk")]
#[command(
    author,
    version,
    about = "Watch container CPU and memory utilization against declared limits",
    long_about = None
)]
pub struct Cli {
    /// Path to kubeconfig file (uses default discovery if not specified)
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Write JSON logs to this file
    #[arg(long, env = "GK_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the live utilization dashboard
    Resource {
        /// Namespace to monitor
        #[arg(long, short)]
        namespace: Option<String>,

        /// Refresh interval in milliseconds
        #[arg(long, short)]
        interval: Option<u64>,
    },

    /// Print one utilization sample and exit
    Snapshot {
        /// Namespace to sample
        #[arg(long, short)]
        namespace: Option<String>,

        /// Output format
        #[arg(long, short, default_value = "table")]
        format: output::OutputFormat,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The dashboard owns the terminal, so it only logs when given a file
    let to_stderr = matches!(cli.command, Commands::Snapshot { .. });
    init_tracing(cli.log_file.as_deref(), cli.verbose, to_stderr)?;

    let settings = config::Config::load()?;

    match cli.command {
        Commands::Resource {
            namespace,
            interval,
        } => {
            let config = settings.monitor_config(namespace, interval)?;
            resource::run_dashboard(cli.kubeconfig.as_deref(), config).await?;
        }
        Commands::Snapshot { namespace, format } => {
            let config = settings.monitor_config(namespace, None)?;
            snapshot::print_snapshot(cli.kubeconfig.as_deref(), &config, format).await?;
        }
    }

    Ok(())
}

fn init_tracing(log_file: Option<&Path>, verbose: bool, to_stderr: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .init();
    } else if to_stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}
