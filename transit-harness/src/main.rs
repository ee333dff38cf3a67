//! transit-harness - replays touch/navigation scenarios against the transition
//! controller and prints the resulting render effects as JSON lines.

mod runner;
mod scenario;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use runner::Runner;
use scenario::Scenario;

#[derive(Parser, Debug)]
#[command(name = "transit-harness", about = "Replay a navigation scenario and print render effects")]
struct Args {
    /// Scenario file (JSON).
    scenario: PathBuf,

    /// Navigation config. Defaults to the user config file, then built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print each effect instead of one JSON object per line.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the effect stream.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!("Starting transit harness");

    let config = match &args.config {
        Some(path) => transit_nav::config::load_from_path(path)
            .with_context(|| format!("Failed to load config: {:?}", path))?,
        None => transit_nav::config::load().context("Failed to load user config")?,
    };
    let scenario = Scenario::load(&args.scenario)?;

    let report = Runner::new(config, &scenario)?.run(&scenario.steps).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in &report.records {
        let line = if args.pretty {
            serde_json::to_string_pretty(record)?
        } else {
            serde_json::to_string(record)?
        };
        writeln!(out, "{line}")?;
    }

    tracing::info!(
        path = %report.final_path,
        mode = ?report.final_mode,
        frames = report.frames,
        effects = report.records.len(),
        "scenario finished"
    );
    Ok(())
}
