use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, FixedOffset};
use gridsense::config::ThresholdsConfig;
use gridsense::error::{GridsenseError, Result};
use gridsense::griddy::{PriceFetcher, PricePoint, PriceSnapshot};
use gridsense::monitor::{MIN_REFRESH, PriceMonitor, RETRY_DELAY};
use gridsense::publish::{SignalSink, SignalUpdate, paths};

fn point(hour: i64, price: f64, low: f64) -> PricePoint {
    let date = DateTime::<FixedOffset>::parse_from_rfc3339("2020-05-05T05:00:00-05:00").unwrap()
        + ChronoDuration::hours(hour);
    PricePoint {
        date,
        hour_num: hour,
        price_type: "forecast".to_string(),
        price_ckwh: price,
        value_score: 0.0,
        mean_price_ckwh: (price + low) / 2.0,
        diff_mean_ckwh: 0.0,
        high_ckwh: price.max(low),
        low_ckwh: low,
        std_dev_ckwh: 0.0,
        price_display: price,
        date_local_tz: date,
    }
}

fn snapshot(now_price: f64, now_low: f64, forecast_prices: &[f64], secs: i64) -> PriceSnapshot {
    let now = point(5, now_price, now_low);
    let forecast = forecast_prices
        .iter()
        .enumerate()
        .map(|(i, &p)| point(6 + i as i64, p, now_low))
        .collect();
    PriceSnapshot {
        now,
        forecast,
        seconds_until_refresh: secs,
    }
}

struct FakeFetcher {
    responses: Mutex<VecDeque<Result<PriceSnapshot>>>,
}

impl FakeFetcher {
    fn new(responses: Vec<Result<PriceSnapshot>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
        }
    }
}

#[async_trait]
impl PriceFetcher for FakeFetcher {
    async fn fetch(&self, _zone: &str) -> Result<PriceSnapshot> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected extra fetch")
    }
}

#[derive(Clone, Default)]
struct RecordingSink {
    batches: Arc<Mutex<Vec<Vec<SignalUpdate>>>>,
}

impl RecordingSink {
    fn batches(&self) -> Vec<Vec<SignalUpdate>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl SignalSink for RecordingSink {
    async fn publish(&mut self, updates: Vec<SignalUpdate>) -> Result<()> {
        self.batches.lock().unwrap().push(updates);
        Ok(())
    }
}

fn monitor_with(
    responses: Vec<Result<PriceSnapshot>>,
) -> (PriceMonitor<FakeFetcher, RecordingSink>, RecordingSink) {
    let sink = RecordingSink::default();
    let monitor = PriceMonitor::new(
        FakeFetcher::new(responses),
        sink.clone(),
        "LZ_HOUSTON",
        ThresholdsConfig::default(),
    );
    (monitor, sink)
}

fn value_of(batch: &[SignalUpdate], path: &str) -> serde_json::Value {
    batch
        .iter()
        .find(|(p, _)| p == path)
        .map(|(_, v)| v.clone())
        .unwrap_or_else(|| panic!("missing signal {}", path))
}

#[tokio::test]
async fn successful_refresh_publishes_all_signals_in_one_batch() {
    let mut forecast = vec![2.0; 17];
    forecast.push(4.0);
    let (mut monitor, sink) = monitor_with(vec![Ok(snapshot(3.5, 1.0, &forecast, 300))]);

    let delay = monitor.refresh().await;

    assert_eq!(delay, Duration::from_secs(300));
    assert!(monitor.state().is_known());

    let batches = sink.batches();
    assert_eq!(batches.len(), 1, "all signals must arrive in one batch");
    let batch = &batches[0];
    assert_eq!(batch.len(), 5);
    assert_eq!(value_of(batch, paths::STATUS_ACTIVE), serde_json::json!(true));
    assert_eq!(value_of(batch, paths::PRICE_LEVEL), serde_json::json!(3.5));
    assert_eq!(
        value_of(batch, paths::PRICE_INTENSITY),
        serde_json::json!(83.0)
    );
    assert_eq!(value_of(batch, paths::PRICE_HIGH), serde_json::json!(true));
    assert_eq!(value_of(batch, paths::PRICE_LOW), serde_json::json!(false));
}

#[tokio::test]
async fn zero_refresh_delay_is_clamped() {
    let (mut monitor, _sink) = monitor_with(vec![Ok(snapshot(2.0, 1.0, &[3.0], 0))]);
    let delay = monitor.refresh().await;
    assert_eq!(delay, MIN_REFRESH);
}

#[tokio::test]
async fn negative_refresh_delay_is_clamped() {
    let (mut monitor, _sink) = monitor_with(vec![Ok(snapshot(2.0, 1.0, &[3.0], -30))]);
    let delay = monitor.refresh().await;
    assert_eq!(delay, MIN_REFRESH);
}

#[tokio::test]
async fn failed_fetch_publishes_no_data_state_and_retries_fixed() {
    let (mut monitor, sink) = monitor_with(vec![Err(GridsenseError::fetch("connection refused"))]);

    let delay = monitor.refresh().await;

    assert_eq!(delay, RETRY_DELAY);
    assert!(!monitor.state().is_known());

    let batches = sink.batches();
    assert_eq!(batches.len(), 1);
    let batch = &batches[0];
    assert_eq!(batch.len(), 3);
    assert_eq!(
        value_of(batch, paths::STATUS_ACTIVE),
        serde_json::json!(false)
    );
    assert_eq!(value_of(batch, paths::PRICE_HIGH), serde_json::json!(false));
    assert_eq!(value_of(batch, paths::PRICE_LOW), serde_json::json!(false));
    // level and intensity stay unpublished: we do not know anything
    assert!(!batch.iter().any(|(p, _)| p == paths::PRICE_LEVEL));
    assert!(!batch.iter().any(|(p, _)| p == paths::PRICE_INTENSITY));
}

#[tokio::test]
async fn failure_after_success_drops_to_unknown_with_fixed_retry() {
    // The previous snapshot recommended a long delay; the retry delay must
    // not depend on it.
    let (mut monitor, sink) = monitor_with(vec![
        Ok(snapshot(3.5, 1.0, &[4.0], 3600)),
        Err(GridsenseError::fetch("HTTP 502")),
    ]);

    let first = monitor.refresh().await;
    assert_eq!(first, Duration::from_secs(3600));
    assert!(monitor.state().is_known());

    let second = monitor.refresh().await;
    assert_eq!(second, RETRY_DELAY);
    assert!(!monitor.state().is_known());

    let batches = sink.batches();
    assert_eq!(batches.len(), 2);
    assert_eq!(
        value_of(&batches[1], paths::STATUS_ACTIVE),
        serde_json::json!(false)
    );
}

#[tokio::test]
async fn recovery_after_failure_publishes_fresh_signals() {
    let (mut monitor, sink) = monitor_with(vec![
        Err(GridsenseError::fetch("timeout")),
        Ok(snapshot(0.5, 0.1, &[0.4, 0.6], 120)),
    ]);

    assert_eq!(monitor.refresh().await, RETRY_DELAY);
    let delay = monitor.refresh().await;
    assert_eq!(delay, Duration::from_secs(120));
    assert!(monitor.state().is_known());

    let batches = sink.batches();
    assert_eq!(
        value_of(&batches[1], paths::STATUS_ACTIVE),
        serde_json::json!(true)
    );
    assert_eq!(value_of(&batches[1], paths::PRICE_LOW), serde_json::json!(true));
}

#[tokio::test]
async fn degenerate_forecast_publishes_zero_intensity_without_crashing() {
    let (mut monitor, sink) = monitor_with(vec![Ok(snapshot(3.5, 1.0, &[], 60))]);

    let delay = monitor.refresh().await;
    assert_eq!(delay, Duration::from_secs(60));

    let batch = &sink.batches()[0];
    assert_eq!(
        value_of(batch, paths::PRICE_INTENSITY),
        serde_json::json!(0.0)
    );
    assert_eq!(value_of(batch, paths::PRICE_HIGH), serde_json::json!(false));
    assert_eq!(value_of(batch, paths::PRICE_LOW), serde_json::json!(true));
}
