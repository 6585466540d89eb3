//! Rolling average volume.
//!
//! Sliding-sum mean of share volume; the breakout detector compares the
//! current bar's volume against this baseline. The window includes the
//! current bar. Lookback: period - 1.

use crate::domain::PriceBar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct VolumeSma {
    period: usize,
    name: String,
}

impl VolumeSma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "volume SMA period must be >= 1");
        Self {
            period,
            name: format!("vol_sma_{period}"),
        }
    }
}

impl Indicator for VolumeSma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        let mut sum: f64 = bars.iter().take(self.period).map(|b| b.volume as f64).sum();
        result[self.period - 1] = sum / self.period as f64;

        for i in self.period..n {
            sum = sum - bars[i - self.period].volume as f64 + bars[i].volume as f64;
            result[i] = sum / self.period as f64;
        }

        result
    }
}
