//! PriceBar and PriceSeries, the fundamental market data units.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Daily OHLCV bar for a single symbol.
///
/// `adj_close` is the split/dividend-adjusted close; every derived
/// computation (indicators, momentum, backtests, drawdown) reads it,
/// never the raw `close`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Returns true if any price field is NaN.
    pub fn is_void(&self) -> bool {
        self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.adj_close.is_nan()
    }

    /// Basic OHLC sanity check: high >= low, bounds contain open and close.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}

/// Structural errors when assembling a series.
///
/// Missing or short data is never an error anywhere in this crate; these
/// only fire when the caller hands over bars that violate ordering.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("duplicate date {0} in price series")]
    DuplicateDate(NaiveDate),
    #[error("out-of-order date {0} in price series")]
    OutOfOrder(NaiveDate),
}

/// Ordered daily price series for one ticker.
///
/// Dates are strictly increasing (validated on construction). The series is
/// immutable once built; all analytics are pure functions of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series, validating strictly increasing dates.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        for pair in bars.windows(2) {
            if pair[1].date == pair[0].date {
                return Err(SeriesError::DuplicateDate(pair[1].date));
            }
            if pair[1].date < pair[0].date {
                return Err(SeriesError::OutOfOrder(pair[1].date));
            }
        }
        Ok(Self { bars })
    }

    pub fn empty() -> Self {
        Self { bars: Vec::new() }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Adjusted closes in bar order.
    pub fn adj_closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.adj_close).collect()
    }
}
