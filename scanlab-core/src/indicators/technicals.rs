//! Technical indicator engine.
//!
//! Computes the screening indicator set (SMA 60, SMA 200, RSI 14, 20-bar
//! average volume) once per ticker and exposes the results as columns next
//! to the source series. The caller's series is never mutated.

use serde::{Deserialize, Serialize};

use crate::domain::{PriceSeries, TechnicalSnapshot};
use crate::indicators::{Indicator, Rsi, Sma, VolumeSma};

/// Short-term momentum line.
pub const SMA_SHORT_PERIOD: usize = 60;
/// Long-term trend (bullish floor).
pub const SMA_LONG_PERIOD: usize = 200;
pub const RSI_PERIOD: usize = 14;
/// Baseline window for the breakout volume check.
pub const VOLUME_SMA_PERIOD: usize = 20;
/// Overbought ceiling used by the scan filter.
pub const MAX_RSI: f64 = 80.0;

/// Technical indicator engine with configurable windows.
#[derive(Debug, Clone)]
pub struct Technicals {
    sma_short: Sma,
    sma_long: Sma,
    rsi: Rsi,
    vol_sma: VolumeSma,
}

impl Default for Technicals {
    fn default() -> Self {
        Self::new(SMA_SHORT_PERIOD, SMA_LONG_PERIOD, RSI_PERIOD)
    }
}

impl Technicals {
    pub fn new(sma_short: usize, sma_long: usize, rsi_period: usize) -> Self {
        Self {
            sma_short: Sma::new(sma_short),
            sma_long: Sma::new(sma_long),
            rsi: Rsi::new(rsi_period),
            vol_sma: VolumeSma::new(VOLUME_SMA_PERIOD),
        }
    }

    /// Compute all indicator columns for a series.
    pub fn compute(&self, series: &PriceSeries) -> TechnicalSeries {
        let bars = series.bars();
        TechnicalSeries {
            series: series.clone(),
            sma_60: self.sma_short.compute(bars),
            sma_200: self.sma_long.compute(bars),
            rsi_14: self.rsi.compute(bars),
            vol_sma_20: self.vol_sma.compute(bars),
        }
    }
}

/// A price series augmented with its indicator columns.
///
/// Column vectors are index-aligned with the bars; NaN marks an unfilled
/// window (missing, never zero).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalSeries {
    series: PriceSeries,
    pub sma_60: Vec<f64>,
    pub sma_200: Vec<f64>,
    pub rsi_14: Vec<f64>,
    pub vol_sma_20: Vec<f64>,
}

impl TechnicalSeries {
    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Snapshot of price and indicators at a bar index.
    pub fn snapshot_at(&self, i: usize) -> Option<TechnicalSnapshot> {
        let bar = self.series.bars().get(i)?;
        Some(TechnicalSnapshot {
            price: bar.adj_close,
            sma_60: self.sma_60[i],
            sma_200: self.sma_200[i],
            rsi_14: self.rsi_14[i],
        })
    }

    /// Snapshot as of the most recent bar.
    pub fn snapshot(&self) -> Option<TechnicalSnapshot> {
        if self.is_empty() {
            None
        } else {
            self.snapshot_at(self.len() - 1)
        }
    }
}
