//! housepoints - harvests assignment signoffs from Horus and tallies weekly
//! house points.
//!
//! The tool walks the full group roster, checks every assignment of both
//! tracks against the deadline table, and writes the resulting point ledger
//! as a CSV report. Auth tokens expire while a run is in flight; the
//! harvest checkpoints its progress and prompts the operator for a fresh
//! token whenever that happens.

mod api;
mod auth;
mod config;
mod deadlines;
mod export;
mod harvest;
mod models;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use api::ApiClient;
use auth::TerminalCredentials;
use config::Config;
use export::{CsvExporter, ExportSink};
use harvest::HarvestController;

#[derive(Parser)]
#[command(name = "housepoints")]
#[command(about = "Harvests Horus signoffs and tallies weekly house points", long_about = None)]
struct Cli {
    /// Path to a JSON config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the report (overrides the config file)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Fail on a malformed assignment name instead of skipping it
    #[arg(long)]
    strict_names: bool,

    /// Fail on a transport fault instead of counting the affected
    /// assignment as not signed off
    #[arg(long)]
    fail_on_fault: bool,
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(out) = cli.out {
        config.output = out;
    }
    config.strict_names |= cli.strict_names;
    config.fail_on_fault |= cli.fail_on_fault;

    info!(
        group_set = config.group_set_id,
        deadlines = config.deadlines.len(),
        "housepoints starting"
    );

    let client = ApiClient::new(&config)?;
    let controller = HarvestController::new(client, TerminalCredentials, config.clone());
    let entries = controller.run().await?;

    let mut exporter = CsvExporter::new(config.output.clone());
    exporter.write(&entries)?;

    println!(
        "All done! {} students written to {}.",
        entries.len(),
        exporter.path().display()
    );
    Ok(())
}
