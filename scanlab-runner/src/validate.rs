//! Validation orchestration: backtest each candidate and gate the result.
//!
//! Per-candidate work (indicators, backtest, drawdown, gate) is independent
//! and runs in parallel; input order is preserved in the output. A candidate
//! with no history degrades to a rejection, never an error.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use scanlab_core::backtest;
use scanlab_core::domain::{BacktestSummary, PriceSeries, Ticker, Trade};
use scanlab_core::drawdown::{self, DrawdownProfile};
use scanlab_core::indicators::Technicals;
use scanlab_core::quality::{ConfidenceTier, QualityVerdict};

use crate::config::ValidationConfig;

/// Full validation result for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub ticker: Ticker,
    pub tier: ConfidenceTier,
    pub summary: BacktestSummary,
    pub drawdown: DrawdownProfile,
    pub verdict: QualityVerdict,
    pub trades: Vec<Trade>,
}

/// Runs historical validation for scan candidates.
#[derive(Debug, Clone, Default)]
pub struct ValidationOrchestrator {
    config: ValidationConfig,
}

impl ValidationOrchestrator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single candidate against its (2-3 year) history.
    pub fn validate_one(&self, ticker: &str, series: &PriceSeries) -> ValidationReport {
        if series.is_empty() {
            warn!(%ticker, "no historical data for validation");
            let mut verdict = self.config.gate().evaluate(&BacktestSummary::default());
            verdict.suggestions = vec!["No historical data available for backtest.".to_string()];
            return ValidationReport {
                ticker: ticker.to_string(),
                tier: verdict.tier,
                summary: BacktestSummary::default(),
                drawdown: drawdown::analyze(series),
                verdict,
                trades: Vec::new(),
            };
        }

        let tech = Technicals::default().compute(series);
        let trades = backtest::run(&tech, &self.config.backtest());
        let summary = backtest::analyze_trades(&trades);
        let profile = drawdown::analyze(series);
        let verdict = self.config.gate().evaluate(&summary);

        info!(
            %ticker,
            tier = ?verdict.tier,
            trades = summary.total_trades,
            win_rate = summary.win_rate_pct,
            "validation complete"
        );

        ValidationReport {
            ticker: ticker.to_string(),
            tier: verdict.tier,
            summary,
            drawdown: profile,
            verdict,
            trades,
        }
    }

    /// Validate every candidate. Output preserves input order.
    pub fn validate_many(
        &self,
        candidates: &[(Ticker, PriceSeries)],
    ) -> Vec<ValidationReport> {
        info!(candidates = candidates.len(), "starting validation");
        candidates
            .par_iter()
            .map(|(ticker, series)| self.validate_one(ticker, series))
            .collect()
    }
}
