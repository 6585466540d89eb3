//! Indicator values as of the most recent bar.

use serde::{Deserialize, Serialize};

/// Latest price and indicator values for one ticker.
///
/// NaN means the indicator window is not yet filled (missing, never zero).
/// Every predicate treats NaN as "does not pass".
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub price: f64,
    pub sma_60: f64,
    pub sma_200: f64,
    pub rsi_14: f64,
}

impl TechnicalSnapshot {
    /// Bullish floor: price above the 200-day SMA.
    pub fn is_above_sma_200(&self) -> bool {
        !self.sma_200.is_nan() && self.price > self.sma_200
    }

    /// Momentum trigger: price above the 60-day SMA.
    pub fn is_above_sma_60(&self) -> bool {
        !self.sma_60.is_nan() && self.price > self.sma_60
    }

    /// RSI below the overbought ceiling.
    pub fn rsi_not_overbought(&self, max_rsi: f64) -> bool {
        !self.rsi_14.is_nan() && self.rsi_14 < max_rsi
    }
}
