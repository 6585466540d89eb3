//! Drawdown and volatility analytics.
//!
//! All functions are explicit O(n) passes over the adjusted-close series:
//! monotonic running max, run-length over the underwater indicator, a
//! sliding sum/sum-of-squares window for volatility. Drawdowns are
//! fractions ≤ 0 measured from the highest price to date.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::PriceSeries;

/// Rolling window for the volatility estimate.
pub const VOLATILITY_WINDOW: usize = 20;
/// Trading days per year for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Risk profile of a price series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawdownProfile {
    /// Worst peak-to-trough loss as a fraction, always ≤ 0.
    pub max_drawdown: f64,
    pub max_drawdown_pct: f64,
    /// Longest run of consecutive bars strictly below the running max.
    pub drawdown_duration_days: usize,
    /// Calendar days from the trough to the first bar at or above the prior
    /// peak; None when the series never recovers (or is empty).
    pub recovery_days: Option<i64>,
    /// Rolling-window annualized volatility at the final bar; NaN until the
    /// window fills.
    pub annualized_volatility: f64,
}

/// Expanding maximum (monotonic non-decreasing).
pub fn running_max(prices: &[f64]) -> Vec<f64> {
    let mut result = Vec::with_capacity(prices.len());
    let mut peak = f64::NEG_INFINITY;
    for &p in prices {
        if p > peak {
            peak = p;
        }
        result.push(peak);
    }
    result
}

/// Drawdown at each bar: (price − running max) / running max, ≤ 0.
pub fn drawdown_series(prices: &[f64]) -> Vec<f64> {
    let peaks = running_max(prices);
    prices
        .iter()
        .zip(&peaks)
        .map(|(&p, &peak)| (p - peak) / peak)
        .collect()
}

/// Minimum of the drawdown series; 0.0 for an empty series.
pub fn max_drawdown(prices: &[f64]) -> f64 {
    drawdown_series(prices)
        .into_iter()
        .fold(0.0, |min, dd| if dd < min { dd } else { min })
}

/// Longest run of consecutive bars strictly below the running max.
pub fn drawdown_duration(prices: &[f64]) -> usize {
    let peaks = running_max(prices);
    let mut longest = 0;
    let mut run = 0;
    for (&p, &peak) in prices.iter().zip(&peaks) {
        if p < peak {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// Calendar days from the maximum-drawdown trough to the first later bar
/// that reaches the peak preceding that drawdown.
///
/// The trough is the first bar attaining the minimum drawdown. When the
/// trough is the very first bar the expanding max is that bar's own price,
/// so the prior peak is still well defined. Returns None when the series is
/// empty or the peak is never regained.
pub fn recovery_days(series: &PriceSeries) -> Option<i64> {
    let prices = series.adj_closes();
    if prices.is_empty() {
        return None;
    }

    let drawdowns = drawdown_series(&prices);
    let mut trough = 0;
    for (i, &dd) in drawdowns.iter().enumerate() {
        if dd < drawdowns[trough] {
            trough = i;
        }
    }

    let peak = running_max(&prices)[trough];
    let bars = series.bars();
    for bar in &bars[trough + 1..] {
        if bar.adj_close >= peak {
            return Some((bar.date - bars[trough].date).num_days());
        }
    }
    None
}

/// Annualized volatility at the final bar: sample standard deviation of the
/// last `window` daily returns × √252. NaN with fewer than `window` returns
/// or when a price inside the window is missing.
pub fn annualized_volatility(prices: &[f64], window: usize) -> f64 {
    if window < 2 || prices.len() < window + 1 {
        return f64::NAN;
    }

    // Sliding sums over the trailing `window` returns.
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    let start = prices.len() - window - 1;
    for i in start..prices.len() - 1 {
        let r = prices[i + 1] / prices[i] - 1.0;
        sum += r;
        sum_sq += r * r;
    }

    // A NaN price anywhere in the window poisons the sums; the estimate is
    // missing, not zero.
    if sum.is_nan() {
        return f64::NAN;
    }

    let n = window as f64;
    let variance = ((sum_sq - sum * sum / n) / (n - 1.0)).max(0.0);
    variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Full drawdown analysis of a series. An empty series degrades to the
/// zero-drawdown profile with missing volatility.
pub fn analyze(series: &PriceSeries) -> DrawdownProfile {
    let prices = series.adj_closes();
    let max_dd = max_drawdown(&prices);
    debug!(max_drawdown = max_dd, "drawdown analysis");
    DrawdownProfile {
        max_drawdown: max_dd,
        max_drawdown_pct: max_dd * 100.0,
        drawdown_duration_days: drawdown_duration(&prices),
        recovery_days: recovery_days(series),
        annualized_volatility: annualized_volatility(&prices, VOLATILITY_WINDOW),
    }
}
