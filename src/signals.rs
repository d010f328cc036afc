//! Derived price signals
//!
//! Pure functions of a snapshot and the configured thresholds. All edge
//! handling for degenerate data lives here so the monitor never has to guard
//! against panics or non-finite values.

use crate::config::ThresholdsConfig;
use crate::griddy::PriceSnapshot;

/// Forward-looking hours considered when normalizing intensity
pub const FORECAST_WINDOW_HOURS: usize = 18;

/// Current price in cents/kWh, rounded to 3 decimals for publishing
pub fn level(snapshot: &PriceSnapshot) -> f64 {
    round3(snapshot.now.price_ckwh)
}

/// Price position on a 0-100 scale between the day low and the forecast high
///
/// Returns `None` when no finite intensity exists: an empty forecast window,
/// or a window whose high equals the day low (division by zero). Otherwise
/// the result is clamped to 0-100; the current price can legitimately fall
/// outside the `[day low, forecast high]` band.
pub fn intensity(snapshot: &PriceSnapshot) -> Option<f64> {
    let window_len = snapshot.forecast.len().min(FORECAST_WINDOW_HOURS);
    let window = &snapshot.forecast[..window_len];
    if window.is_empty() {
        return None;
    }

    let high = window
        .iter()
        .map(|p| p.price_ckwh)
        .fold(f64::NEG_INFINITY, f64::max);
    let low = snapshot.now.low_ckwh;
    let span = high - low;
    if span == 0.0 || !span.is_finite() {
        return None;
    }

    let raw = ((snapshot.now.price_ckwh - low) / span) * 100.0;
    Some(raw.round().clamp(0.0, 100.0))
}

/// Whether the reading counts as high: both an expensive absolute price and
/// an elevated intensity are required
pub fn is_high(snapshot: &PriceSnapshot, thresholds: &ThresholdsConfig) -> bool {
    snapshot.now.price_ckwh > thresholds.high_price_cents
        && effective_intensity(snapshot) > thresholds.high_price_percentage
}

/// Whether the reading counts as low: a cheap absolute price or a depressed
/// intensity each suffice on their own
pub fn is_low(snapshot: &PriceSnapshot, thresholds: &ThresholdsConfig) -> bool {
    snapshot.now.price_ckwh <= thresholds.low_price_cents
        || effective_intensity(snapshot) <= thresholds.low_price_percentage
}

// Degenerate data (no forecast window, flat band) reads as intensity 0 for
// flag purposes: it can satisfy "low" but never "high".
fn effective_intensity(snapshot: &PriceSnapshot) -> f64 {
    intensity(snapshot).unwrap_or(0.0)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round3_truncates_noise() {
        assert_eq!(round3(3.141_59), 3.142);
        assert_eq!(round3(-0.000_4), -0.0);
        assert_eq!(round3(2.5), 2.5);
    }
}
