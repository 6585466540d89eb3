//! Indicator implementations.
//!
//! Indicators are pure functions: bar history in, numeric series out.
//! They are computed once per ticker and queried by bar index; nothing is
//! recomputed bar-by-bar. All indicators read `adj_close`.

pub mod rsi;
pub mod sma;
pub mod technicals;
pub mod volume;

pub use rsi::Rsi;
pub use sma::Sma;
pub use technicals::{TechnicalSeries, Technicals};
pub use volume::VolumeSma;

use crate::domain::PriceBar;

/// Trait for single-series indicators.
///
/// `compute` returns a `Vec<f64>` of the same length as `bars`, with the
/// first `lookback()` values `f64::NAN` (warmup). No value at bar t may
/// depend on data from bar t+1 or later.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_60", "rsi_14").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[PriceBar]) -> Vec<f64>;
}

/// Create synthetic bars from adjusted closes for testing.
///
/// Generates plausible OHLV: open = prev close (or close for the first bar),
/// high/low bracket open and close, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<PriceBar> {
    make_bars_with_volume(closes, &vec![1000; closes.len()])
}

/// Synthetic bars with explicit per-bar volume (breakout tests need it).
#[cfg(test)]
pub fn make_bars_with_volume(closes: &[f64], volumes: &[u64]) -> Vec<PriceBar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                adj_close: close,
                volume: volumes[i],
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
