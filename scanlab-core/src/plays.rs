//! Play classification: pattern detectors over the latest technicals.
//!
//! Three independent detectors, evaluated in a fixed order:
//! Golden Staircase, Mean Reversion Bounce, 60-Day Breakout. Classification
//! keeps the strictly highest confidence; on an exact tie the earlier
//! detector in that order wins. The tie-break is a behavioral contract;
//! it keeps classification deterministic across runs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{TechnicalSnapshot, Ticker};
use crate::indicators::TechnicalSeries;

/// The fixed detector set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Play {
    /// Price > 60d SMA > 200d SMA: short- and long-term trends aligned.
    GoldenStaircase,
    /// Price just above the 200d line, where institutions defend it.
    MeanReversionBounce,
    /// Price crossing above the 60d SMA on elevated volume.
    SixtyDayBreakout,
}

impl Play {
    pub fn label(&self) -> &'static str {
        match self {
            Play::GoldenStaircase => "Golden Staircase",
            Play::MeanReversionBounce => "Mean Reversion Bounce",
            Play::SixtyDayBreakout => "60d Breakout",
        }
    }
}

/// Classification result for one ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayCandidate {
    pub ticker: Ticker,
    pub play: Option<Play>,
    /// 0 when no detector fired, otherwise in (0, 100].
    pub confidence: f64,
}

/// Detector thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayClassifier {
    /// Max fraction above the 200d SMA that still counts as a bounce.
    pub bounce_threshold: f64,
    /// Volume ratio over the 20-bar average required for a breakout.
    pub volume_threshold: f64,
}

impl Default for PlayClassifier {
    fn default() -> Self {
        Self {
            bounce_threshold: 0.02,
            volume_threshold: 1.2,
        }
    }
}

/// Fixed confidence for a detected breakout.
const BREAKOUT_CONFIDENCE: f64 = 85.0;

impl PlayClassifier {
    /// Golden Staircase: price > sma_60 > sma_200, both strict.
    ///
    /// Confidence = min(100, 50 + avg of the two percent distances),
    /// so a fresh alignment starts at 50 and wider spreads score higher.
    pub fn detect_golden_staircase(&self, snap: &TechnicalSnapshot) -> Option<f64> {
        if snap.price.is_nan() || snap.sma_60.is_nan() || snap.sma_200.is_nan() {
            return None;
        }
        if !(snap.price > snap.sma_60 && snap.sma_60 > snap.sma_200) {
            return None;
        }
        let dist_from_60 = (snap.price - snap.sma_60) / snap.sma_60 * 100.0;
        let dist_from_200 = (snap.sma_60 - snap.sma_200) / snap.sma_200 * 100.0;
        let confidence = (50.0 + (dist_from_60 + dist_from_200) / 2.0).min(100.0);
        debug!(confidence, "golden staircase detected");
        Some(confidence)
    }

    /// Mean Reversion Bounce: above the 200d line by more than 0% but no
    /// more than the bounce threshold.
    ///
    /// Confidence decays linearly: 100 at the line, 50 at the threshold edge.
    pub fn detect_mean_reversion_bounce(&self, snap: &TechnicalSnapshot) -> Option<f64> {
        if snap.price.is_nan() || snap.sma_200.is_nan() {
            return None;
        }
        let percent_above = (snap.price - snap.sma_200) / snap.sma_200;
        if !(percent_above > 0.0 && percent_above <= self.bounce_threshold) {
            return None;
        }
        let confidence = 100.0 - percent_above / self.bounce_threshold * 50.0;
        debug!(confidence, "mean reversion bounce detected");
        Some(confidence)
    }

    /// 60-Day Breakout: the prior bar closed at or below its 60d SMA, the
    /// current bar closed above it, and volume runs past the threshold
    /// multiple of the 20-bar average. Needs at least two bars.
    pub fn detect_60d_breakout(&self, tech: &TechnicalSeries) -> Option<f64> {
        let n = tech.len();
        if n < 2 {
            return None;
        }
        let bars = tech.series().bars();
        let price = bars[n - 1].adj_close;
        let sma_60 = tech.sma_60[n - 1];
        let prev_price = bars[n - 2].adj_close;
        let prev_sma_60 = tech.sma_60[n - 2];
        if price.is_nan() || sma_60.is_nan() || prev_price.is_nan() || prev_sma_60.is_nan() {
            return None;
        }

        let crossed_above = prev_price <= prev_sma_60 && price > sma_60;
        if !crossed_above {
            return None;
        }

        let avg_volume = tech.vol_sma_20[n - 1];
        if avg_volume.is_nan() {
            return None;
        }
        let volume = bars[n - 1].volume as f64;
        if volume <= avg_volume * self.volume_threshold {
            return None;
        }

        debug!(volume, "60d breakout detected");
        Some(BREAKOUT_CONFIDENCE)
    }

    /// Run every detector and keep the best match.
    ///
    /// `select_best` over the fixed evaluation order implements the
    /// first-wins tie-break.
    pub fn classify(&self, ticker: &str, tech: &TechnicalSeries) -> PlayCandidate {
        let detections = [
            (
                Play::GoldenStaircase,
                tech.snapshot().and_then(|s| self.detect_golden_staircase(&s)),
            ),
            (
                Play::MeanReversionBounce,
                tech.snapshot()
                    .and_then(|s| self.detect_mean_reversion_bounce(&s)),
            ),
            (Play::SixtyDayBreakout, self.detect_60d_breakout(tech)),
        ];

        match select_best(detections) {
            Some((play, confidence)) => PlayCandidate {
                ticker: ticker.to_string(),
                play: Some(play),
                confidence,
            },
            None => PlayCandidate {
                ticker: ticker.to_string(),
                play: None,
                confidence: 0.0,
            },
        }
    }
}

/// Keep the detection with the strictly highest confidence; on an exact tie
/// the earlier entry in evaluation order wins.
fn select_best(
    detections: impl IntoIterator<Item = (Play, Option<f64>)>,
) -> Option<(Play, f64)> {
    let mut best: Option<(Play, f64)> = None;
    for (play, detection) in detections {
        if let Some(confidence) = detection {
            let replace = match best {
                Some((_, best_conf)) => confidence > best_conf,
                None => true,
            };
            if replace {
                best = Some((play, confidence));
            }
        }
    }
    best
}
