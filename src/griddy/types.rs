use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One hour of pricing as reported by the insights endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Hour start, UTC side of the wire timestamp
    pub date: DateTime<FixedOffset>,

    /// Hour index within the day
    pub hour_num: i64,

    /// Price type label ("actual", "forecast")
    pub price_type: String,

    /// Price in cents per kWh
    pub price_ckwh: f64,

    /// Provider value score for the hour
    pub value_score: f64,

    /// Day mean price in cents per kWh
    pub mean_price_ckwh: f64,

    /// Difference from the day mean
    pub diff_mean_ckwh: f64,

    /// Day high in cents per kWh
    pub high_ckwh: f64,

    /// Day low in cents per kWh
    pub low_ckwh: f64,

    /// Day standard deviation
    pub std_dev_ckwh: f64,

    /// Display price
    pub price_display: f64,

    /// Hour start in the zone-local timezone
    pub date_local_tz: DateTime<FixedOffset>,
}

/// One fetched pricing response: "now" plus a forecast sequence
///
/// Immutable once fetched. The monitor holds at most one latest snapshot and
/// replaces it wholesale on each successful refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Current-hour price record
    pub now: PricePoint,

    /// Future hours, ordered chronologically starting from the next hour
    pub forecast: Vec<PricePoint>,

    /// Server-recommended delay before the next fetch. Untrusted; the
    /// monitor clamps it to a sane minimum.
    pub seconds_until_refresh: i64,
}
