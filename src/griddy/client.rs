use std::time::Duration;

use async_trait::async_trait;

use crate::error::{GridsenseError, Result};
use crate::griddy::types::PriceSnapshot;
use crate::logging::get_logger;

/// Fetch contract for one pricing round trip
///
/// The monitor only depends on this trait, so tests can drive it with a fake
/// fetcher and no network.
#[async_trait]
pub trait PriceFetcher: Send + Sync {
    /// Fetch the current snapshot for a settlement point
    async fn fetch(&self, zone: &str) -> Result<PriceSnapshot>;
}

/// Griddy insights API client
pub struct GriddyClient {
    api_url: String,
    http: reqwest::Client,
    logger: crate::logging::StructuredLogger,
}

impl GriddyClient {
    /// Create a new client for the given endpoint
    pub fn new<S: Into<String>>(api_url: S) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            api_url: api_url.into(),
            http,
            logger: get_logger("griddy"),
        })
    }
}

#[async_trait]
impl PriceFetcher for GriddyClient {
    async fn fetch(&self, zone: &str) -> Result<PriceSnapshot> {
        self.logger
            .debug(&format!("Requesting prices for {}", zone));

        let response = self
            .http
            .post(&self.api_url)
            .json(&serde_json::json!({ "settlement_point": zone }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GridsenseError::fetch(format!(
                "Insights API returned {}",
                response.status()
            )));
        }

        // Body decode failures surface through the reqwest conversion as the
        // same fetch kind as transport errors.
        let snapshot: PriceSnapshot = response.json().await?;
        Ok(snapshot)
    }
}
