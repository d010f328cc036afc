//! Price monitor poll loop
//!
//! Owns the refresh cadence and the latest snapshot. Each refresh fetches,
//! derives signals, publishes them as one batch, and reports how long to wait
//! before the next refresh. Scheduling is left to the caller ([`run`] is the
//! self-rescheduling default), so tests can drive transitions deterministically.
//!
//! [`run`]: PriceMonitor::run

use std::time::Duration;

use crate::config::ThresholdsConfig;
use crate::griddy::{PriceFetcher, PriceSnapshot};
use crate::logging::{LogContext, get_logger_with_context};
use crate::publish::{SignalSink, SignalUpdate, paths};
use crate::signals;

/// Floor for the server-recommended refresh delay. Guards against tight-loop
/// storms when the server reports zero or negative values.
pub const MIN_REFRESH: Duration = Duration::from_secs(5);

/// Fixed delay before retrying after a failed fetch
pub const RETRY_DELAY: Duration = Duration::from_secs(10);

/// Monitor state: either no usable data, or the latest snapshot
#[derive(Debug, Clone)]
pub enum PriceState {
    /// No snapshot yet, or the last fetch failed
    Unknown,
    /// Latest successfully fetched snapshot
    Known(PriceSnapshot),
}

impl PriceState {
    /// Whether a snapshot is held
    pub fn is_known(&self) -> bool {
        matches!(self, PriceState::Known(_))
    }
}

/// Poll loop for one settlement point
///
/// Single logical thread of control: a refresh completes fully, publishing
/// included, before the next one is scheduled. Run one monitor per zone;
/// instances share nothing.
pub struct PriceMonitor<F, S> {
    fetcher: F,
    sink: S,
    zone: String,
    thresholds: ThresholdsConfig,
    state: PriceState,
    logger: crate::logging::StructuredLogger,
}

impl<F: PriceFetcher, S: SignalSink> PriceMonitor<F, S> {
    /// Create a new monitor in the Unknown state
    pub fn new<Z: Into<String>>(fetcher: F, sink: S, zone: Z, thresholds: ThresholdsConfig) -> Self {
        let zone = zone.into();
        let logger = get_logger_with_context(LogContext::new("monitor").with_zone(zone.clone()));
        Self {
            fetcher,
            sink,
            zone,
            thresholds,
            state: PriceState::Unknown,
            logger,
        }
    }

    /// Current state
    pub fn state(&self) -> &PriceState {
        &self.state
    }

    /// Perform one refresh and return the delay until the next one
    ///
    /// Fetch errors are recovered here: the monitor drops to Unknown,
    /// publishes the no-data signals, and asks to be rescheduled after the
    /// fixed retry delay. Nothing propagates to the caller.
    pub async fn refresh(&mut self) -> Duration {
        match self.fetcher.fetch(&self.zone).await {
            Ok(snapshot) => {
                let delay = clamp_refresh_delay(snapshot.seconds_until_refresh);
                let updates = self.build_updates(&snapshot);
                self.logger.info(&format!(
                    "Refreshed: price={:.3}c/kWh, next in {}s",
                    snapshot.now.price_ckwh,
                    delay.as_secs()
                ));
                self.state = PriceState::Known(snapshot);
                self.publish(updates).await;
                delay
            }
            Err(e) => {
                self.logger.warn(&format!("Price refresh failed: {}", e));
                self.state = PriceState::Unknown;
                self.publish(vec![
                    (paths::STATUS_ACTIVE.to_string(), serde_json::json!(false)),
                    (paths::PRICE_HIGH.to_string(), serde_json::json!(false)),
                    (paths::PRICE_LOW.to_string(), serde_json::json!(false)),
                ])
                .await;
                RETRY_DELAY
            }
        }
    }

    /// Self-rescheduling loop: refresh, sleep, repeat until externally cancelled
    pub async fn run(&mut self) {
        loop {
            let delay = self.refresh().await;
            self.logger
                .debug(&format!("Next refresh in {}s", delay.as_secs()));
            tokio::time::sleep(delay).await;
        }
    }

    fn build_updates(&self, snapshot: &PriceSnapshot) -> Vec<SignalUpdate> {
        let intensity = match signals::intensity(snapshot) {
            Some(v) => v,
            None => {
                self.logger
                    .warn("Degenerate forecast window, publishing intensity 0");
                0.0
            }
        };
        vec![
            (paths::STATUS_ACTIVE.to_string(), serde_json::json!(true)),
            (
                paths::PRICE_LEVEL.to_string(),
                serde_json::json!(signals::level(snapshot)),
            ),
            (
                paths::PRICE_INTENSITY.to_string(),
                serde_json::json!(intensity),
            ),
            (
                paths::PRICE_HIGH.to_string(),
                serde_json::json!(signals::is_high(snapshot, &self.thresholds)),
            ),
            (
                paths::PRICE_LOW.to_string(),
                serde_json::json!(signals::is_low(snapshot, &self.thresholds)),
            ),
        ]
    }

    // Sink failures must not take the loop down; the host gets another batch
    // on the next refresh.
    async fn publish(&mut self, updates: Vec<SignalUpdate>) {
        if let Err(e) = self.sink.publish(updates).await {
            self.logger.warn(&format!("Failed to publish signals: {}", e));
        }
    }
}

fn clamp_refresh_delay(seconds_until_refresh: i64) -> Duration {
    let secs = seconds_until_refresh.max(0) as u64;
    Duration::from_secs(secs).max(MIN_REFRESH)
}
