//! Signal publishing seam towards the hosting integration
//!
//! The monitor never depends on a host object model. It hands each refresh's
//! signals to a [`SignalSink`] as one batch, so a consumer can never observe
//! a stale level next to a fresh intensity.

use async_trait::async_trait;

use crate::error::Result;
use crate::logging::get_logger;

/// One published signal: path plus value
pub type SignalUpdate = (String, serde_json::Value);

/// Signal paths published per refresh
pub mod paths {
    /// True while a snapshot is held
    pub const STATUS_ACTIVE: &str = "/Status/Active";
    /// Current price in cents/kWh, 3 decimals
    pub const PRICE_LEVEL: &str = "/Price/Level";
    /// 0-100 intensity relative to the day low and forecast high
    pub const PRICE_INTENSITY: &str = "/Price/Intensity";
    /// High-price flag
    pub const PRICE_HIGH: &str = "/Price/High";
    /// Low-price flag
    pub const PRICE_LOW: &str = "/Price/Low";
}

/// Outbound collaborator receiving published signals
///
/// Hosting integrations implement this for their presentation layer (HomeKit
/// characteristics, D-Bus paths, MQTT topics). Updates within one call belong
/// to the same refresh and must be applied together.
#[async_trait]
pub trait SignalSink: Send {
    /// Publish one refresh's signals atomically
    async fn publish(&mut self, updates: Vec<SignalUpdate>) -> Result<()>;
}

/// Reference sink that writes every signal batch to the structured log
pub struct LoggingSink {
    logger: crate::logging::StructuredLogger,
}

impl LoggingSink {
    /// Create a new logging sink
    pub fn new() -> Self {
        Self {
            logger: get_logger("sink"),
        }
    }
}

impl Default for LoggingSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalSink for LoggingSink {
    async fn publish(&mut self, updates: Vec<SignalUpdate>) -> Result<()> {
        for (path, value) in &updates {
            self.logger.info(&format!("{} = {}", path, value));
        }
        Ok(())
    }
}
