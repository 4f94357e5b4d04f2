//! Alert Relay CLI
//!
//! Command-line interface for the uptime monitor to ServerChan relay.

use std::path::PathBuf;

use alert_relay::{load_config, Config, RelayBuilder};
use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(name = "alert-relay")]
#[command(about = "Relays uptime monitor webhooks to the ServerChan push API")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port (overrides config file and PORT)
    #[arg(short, long)]
    port: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, port={:?}, log_level={:?}",
        args.config,
        args.port,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.apply_env();

    if let Some(port) = args.port {
        config.server.port = alert_relay::config::normalize_port(&port);
    }

    tracing::info!("Starting alert relay");
    tracing::debug!(
        "Port: {}, time zone: {}, ServerChan: {}",
        config.server.port,
        config.server.time_zone,
        config.server_chan.base_url
    );

    RelayBuilder::new(config).build().await?.start().await?;

    Ok(())
}
