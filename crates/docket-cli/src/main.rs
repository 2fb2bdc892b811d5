//! # docket CLI entry point
//!
//! Parses command-line arguments, opens the register and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docket_cli::context::open_registry;
use docket_cli::dashboard::{run_dashboard, DashboardArgs};
use docket_cli::records::{run_records, RecordsArgs};
use docket_cli::scan::{run_scan, ScanArgs};
use docket_cli::status::{run_status, StatusArgs};

/// Compliance register for licenses, certificates and contracts.
///
/// Classifies every record as active, soon to expire or expired, and runs
/// the daily check for records expiring within 90 days.
#[derive(Parser, Debug)]
#[command(name = "docket", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Register file (YAML, or JSON by extension). Defaults to the
    /// built-in demonstration register.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Evaluate as of this day (YYYY-MM-DD) instead of today.
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Every trackable record with its derived status and remaining period.
    Status(StatusArgs),

    /// The unified view of all trackable records.
    Records(RecordsArgs),

    /// Counts, compliance rate, costs and expiry timeline.
    Dashboard(DashboardArgs),

    /// Run the daily expiry check against a marker file.
    Scan(ScanArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise the verbosity flag picks the level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = open_registry(cli.data.as_deref(), cli.today.as_deref()).and_then(|registry| {
        let mut out = std::io::stdout().lock();
        match &cli.command {
            Commands::Status(args) => run_status(args, &registry, &mut out),
            Commands::Records(args) => run_records(args, &registry, &mut out),
            Commands::Dashboard(args) => run_dashboard(args, &registry, &mut out),
            Commands::Scan(args) => run_scan(args, &registry, &mut out),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
