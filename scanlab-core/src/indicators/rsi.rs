//! Relative Strength Index (RSI).
//!
//! Rolling-window variant: average gain and average loss are plain rolling
//! means over the last `period` price changes (no Wilder smoothing).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period (first change exists at index 1).
//! Edge cases: avg_loss == 0 with any gain saturates to 100; avg_gain == 0
//! with any loss is 0; a perfectly flat window is 50.

use crate::domain::PriceBar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period + 1 {
            return result;
        }

        // Per-bar gains and losses; NaN where either close is NaN.
        let mut gains = vec![f64::NAN; n];
        let mut losses = vec![f64::NAN; n];
        for i in 1..n {
            let curr = bars[i].adj_close;
            let prev = bars[i - 1].adj_close;
            if curr.is_nan() || prev.is_nan() {
                continue;
            }
            let change = curr - prev;
            gains[i] = if change > 0.0 { change } else { 0.0 };
            losses[i] = if change < 0.0 { -change } else { 0.0 };
        }

        // Rolling mean over the `period` changes ending at each bar,
        // maintained as sliding sums with a rescan on NaN churn.
        let mut gain_sum = 0.0;
        let mut loss_sum = 0.0;
        let mut nan_in_window = false;
        for i in 1..=self.period {
            if gains[i].is_nan() {
                nan_in_window = true;
            } else {
                gain_sum += gains[i];
                loss_sum += losses[i];
            }
        }

        if !nan_in_window {
            result[self.period] = rsi_from_sums(gain_sum, loss_sum);
        }

        for i in (self.period + 1)..n {
            let leaving = i - self.period;
            if gains[i].is_nan() || gains[leaving].is_nan() || nan_in_window {
                nan_in_window = false;
                gain_sum = 0.0;
                loss_sum = 0.0;
                for j in (i + 1 - self.period)..=i {
                    if gains[j].is_nan() {
                        nan_in_window = true;
                    } else {
                        gain_sum += gains[j];
                        loss_sum += losses[j];
                    }
                }
                if nan_in_window {
                    continue;
                }
            } else {
                gain_sum = gain_sum - gains[leaving] + gains[i];
                loss_sum = loss_sum - losses[leaving] + losses[i];
            }

            result[i] = rsi_from_sums(gain_sum, loss_sum);
        }

        result
    }
}

/// The division saturates when there are no losses in the window; the
/// zero-loss edge must be handled before dividing.
fn rsi_from_sums(gain_sum: f64, loss_sum: f64) -> f64 {
    // Sliding-sum drift can leave a tiny negative residue.
    let gain = gain_sum.max(0.0);
    let loss = loss_sum.max(0.0);
    if loss == 0.0 && gain == 0.0 {
        50.0 // flat window, no movement
    } else if loss == 0.0 {
        100.0
    } else if gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + gain / loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn rsi_saturates_to_100_on_monotone_rise() {
        // Zero losses in every window: the avg_gain/avg_loss ratio is
        // undefined and RSI must resolve to 100, never a division error.
        let bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let rsi = Rsi::new(3);
        let result = rsi.compute(&bars);
        for &v in &result[3..] {
            assert_approx(v, 100.0, 1e-9);
        }
    }

    #[test]
    fn rsi_zero_on_monotone_fall() {
        let bars = make_bars(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        let rsi = Rsi::new(3);
        let result = rsi.compute(&bars);
        assert_approx(result[3], 0.0, 1e-9);
    }

    #[test]
    fn rsi_flat_window_is_50() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0, 100.0]);
        let rsi = Rsi::new(3);
        let result = rsi.compute(&bars);
        assert_approx(result[3], 50.0, 1e-9);
        assert_approx(result[4], 50.0, 1e-9);
    }

    #[test]
    fn rsi_mixed_window() {
        // Closes: 44, 44.34, 44.09, 43.61, 44.33
        // Changes: +0.34, -0.25, -0.48, +0.72
        // Window at index 3: gains 0.34, losses 0.73
        // RSI[3] = 100 - 100/(1 + 0.34/0.73) = 31.775...
        let bars = make_bars(&[44.0, 44.34, 44.09, 43.61, 44.33]);
        let rsi = Rsi::new(3);
        let result = rsi.compute(&bars);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_approx(result[3], 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-9);
        // Window at index 4: gains 0.72, losses 0.25 + 0.48 = 0.73
        assert_approx(result[4], 100.0 - 100.0 / (1.0 + 0.72 / 0.73), 1e-9);
    }

    #[test]
    fn rsi_bounds() {
        let bars = make_bars(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        let rsi = Rsi::new(3);
        let result = rsi.compute(&bars);
        for (i, &v) in result.iter().enumerate() {
            if !v.is_nan() {
                assert!(
                    (0.0..=100.0).contains(&v),
                    "RSI out of bounds at bar {i}: {v}"
                );
            }
        }
    }

    #[test]
    fn rsi_nan_windows_are_missing() {
        let mut bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0]);
        bars[2].adj_close = f64::NAN;
        let rsi = Rsi::new(3);
        let result = rsi.compute(&bars);
        // Changes at 2 and 3 are NaN; windows touching them stay missing.
        assert!(result[3].is_nan());
        assert!(result[4].is_nan());
        assert!(result[5].is_nan());
        // Window [4,5,6] is clean again.
        assert_approx(result[6], 100.0, 1e-9);
    }

    #[test]
    fn rsi_lookback() {
        assert_eq!(Rsi::new(14).lookback(), 14);
    }
}
