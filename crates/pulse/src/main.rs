//! Pulse - telemetry pipeline driver
//!
//! Loads configuration, starts the aggregation/export pipeline, and drives
//! it with a synthetic workload until interrupted. A real deployment embeds
//! the pipeline instead: the hosting service calls `Telemetry::start` and
//! wires the returned handle into its request middleware.
//!
//! # Usage
//!
//! ```bash
//! pulse --config configs/pulse.toml
//! pulse --config configs/pulse.toml --log-level debug
//! ```

mod simulate;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pulse_config::Config;
use pulse_telemetry::Telemetry;

/// Pulse - telemetry aggregation and export pipeline
#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "configs/pulse.toml")]
    config: std::path::PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Milliseconds between synthetic workload events
    #[arg(long, default_value_t = 250)]
    event_period_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let config = Config::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    let cancel = CancellationToken::new();
    let telemetry = Telemetry::start(&config, cancel.clone())?;

    info!(
        flush_interval_secs = config.metrics.interval.as_secs(),
        "pulse started, driving synthetic workload"
    );
    let workload = tokio::spawn(simulate::run(
        telemetry,
        cli.event_period_ms,
        cancel.clone(),
    ));

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;

    info!("shutting down");
    cancel.cancel();
    let _ = workload.await;

    Ok(())
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}
