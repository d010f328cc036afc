//! Griddy insights API integration for real-time wholesale pricing
//!
//! One POST per fetch: the request names a settlement point, the response
//! carries the current hour, a forecast, and a server-recommended refresh
//! delay. Retry policy lives in the monitor, not here.

pub mod client;
pub mod types;

// Re-exports for the public API surface
pub use client::{GriddyClient, PriceFetcher};
pub use types::{PricePoint, PriceSnapshot};

/// Default insights endpoint
pub const DEFAULT_API_URL: &str = "https://app.gogriddy.com/api/v1/insights/getnow";
