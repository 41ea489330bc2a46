//! lbwatch CLI
//!
//! Command-line consumer of the lbwatch daemon API. With `--from-file` it
//! instead runs the snapshot pipeline locally over a saved stats dump.

mod commands;

use clap::{Parser, Subcommand};
use lbwatch_core::StatusSnapshot;
use lbwatch_monitor::StatusMonitor;
use lbwatch_stats::FileSource;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// lbwatch - HAProxy status snapshot monitor
#[derive(Parser, Debug)]
#[command(name = "lbwatch")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Daemon API address
    #[arg(long, default_value = "http://localhost:9100", global = true)]
    api: String,

    /// Build the snapshot locally from a saved stats dump instead of
    /// querying the daemon
    #[arg(long, global = true)]
    from_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the fleet summary
    Status,

    /// List all servers with classification and counters
    Servers,

    /// Print the full snapshot as JSON
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let snapshot = fetch_snapshot(&cli).await?;

    match cli.command {
        Commands::Status => commands::print_status(&snapshot),
        Commands::Servers => commands::print_servers(&snapshot),
        Commands::Json => commands::print_json(&snapshot)?,
    }

    Ok(())
}

async fn fetch_snapshot(cli: &Cli) -> anyhow::Result<StatusSnapshot> {
    match &cli.from_file {
        Some(path) => {
            let monitor = StatusMonitor::new(FileSource::new(path));
            Ok(monitor.build_snapshot().await?)
        }
        None => {
            let client = commands::ApiClient::new(&cli.api);
            client.fetch_snapshot().await
        }
    }
}
