//! Alert notifier CLI
//!
//! Evaluates an alert outcome against configured channels and prints the
//! per-channel notification decisions as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use alert_notifier::{load_config, load_evaluation};
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(name = "alert-notifier")]
#[command(about = "Decide which notification channels an alert evaluation should notify")]
#[command(version)]
struct Args {
    /// Path to the channel definitions file
    #[arg(short, long)]
    config: PathBuf,

    /// Path to the evaluation snapshot file
    #[arg(short, long)]
    evaluation: PathBuf,

    /// Evaluate at this instant (RFC 3339) instead of the current time
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, evaluation={:?}, now={:?}, log_level={:?}",
        args.config,
        args.evaluation,
        args.now,
        args.log_level
    );

    match decide(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn decide(args: &Args) -> alert_notifier::Result<()> {
    let config = load_config(&args.config)?;
    let snapshot = load_evaluation(&args.evaluation)?;

    tracing::debug!(
        "Notifiers: {}, Records: {}",
        config.notifiers.len(),
        snapshot.records.len()
    );

    let decisions = alert_notifier::run(&config, &snapshot, args.now)?;
    println!("{}", serde_json::to_string_pretty(&decisions)?);

    Ok(())
}
