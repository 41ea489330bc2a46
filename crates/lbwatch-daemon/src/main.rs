//! lbwatch daemon
//!
//! Serves fresh load balancer status snapshots over a JSON API. Each
//! request triggers one poll of the stats socket; nothing is cached.

use clap::Parser;
use lbwatch_api::create_router;
use lbwatch_core::MonitorConfig;
use lbwatch_monitor::StatusMonitor;
use lbwatch_stats::SocketSource;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// lbwatchd - HAProxy status snapshot daemon
#[derive(Parser, Debug)]
#[command(name = "lbwatchd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the load balancer's admin socket
    #[arg(long)]
    socket: Option<PathBuf>,

    /// Timeout for one stats query, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Address to bind the API server
    #[arg(long)]
    address: Option<String>,

    /// Port for the REST API server
    #[arg(long)]
    port: Option<u16>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    // Load config, then apply flag overrides
    let mut config = match &args.config {
        Some(path) => MonitorConfig::from_file(path).expect("Failed to load config"),
        None => MonitorConfig::default(),
    };
    if let Some(socket) = args.socket {
        config.socket.path = socket;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.socket.query_timeout_secs = timeout_secs;
    }
    if let Some(address) = args.address {
        config.api.address = address;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    info!("Starting lbwatch daemon v{}", env!("CARGO_PKG_VERSION"));
    info!("Polling admin socket {}", config.socket.path.display());

    let source = SocketSource::new(&config.socket.path)
        .with_timeout(Duration::from_secs(config.socket.query_timeout_secs));
    let monitor = StatusMonitor::new(source);
    let router = create_router(monitor);

    let addr: SocketAddr = format!("{}:{}", config.api.address, config.api.port)
        .parse()
        .expect("Invalid address");

    info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, router).await.expect("Server error");
}
