use anyhow::Result;
use gridsense::Config;
use gridsense::griddy::GriddyClient;
use gridsense::monitor::PriceMonitor;
use gridsense::publish::LoggingSink;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    config.validate()?;

    gridsense::logging::init_logging(&config.logging)?;

    info!(
        "Gridsense {} starting up for {}",
        env!("CARGO_PKG_VERSION"),
        config.griddy.settlement_point
    );

    let client = GriddyClient::new(&config.griddy.api_url)?;
    let sink = LoggingSink::new();
    let mut monitor = PriceMonitor::new(
        client,
        sink,
        config.griddy.settlement_point.clone(),
        config.thresholds.clone(),
    );

    // The loop has no internal terminal state; cancellation is our job.
    tokio::select! {
        _ = monitor.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    Ok(())
}
