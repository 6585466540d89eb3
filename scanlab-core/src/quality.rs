//! Quality gate: converts backtest statistics into an approval tier.
//!
//! Three independent checks (win rate, sample size, profit factor) combine
//! into HIGH / MEDIUM / REJECT. Rejection is an expected business outcome
//! and always ships with the full check breakdown and, when applicable,
//! improvement suggestions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::BacktestSummary;

/// Approval tier for a validated candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceTier {
    High,
    Medium,
    Reject,
}

/// One threshold check: observed value vs required threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QualityCheck {
    pub value: f64,
    pub threshold: f64,
    pub passed: bool,
}

/// The three checks, in evaluation order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QualityChecks {
    pub win_rate: QualityCheck,
    pub sample_size: QualityCheck,
    pub profit_factor: QualityCheck,
}

/// Gate verdict: tier, check breakdown, advisory suggestions (in check
/// evaluation order, empty when everything passed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityVerdict {
    pub tier: ConfidenceTier,
    pub checks: QualityChecks,
    pub suggestions: Vec<String>,
}

impl QualityVerdict {
    pub fn all_pass(&self) -> bool {
        self.checks.win_rate.passed
            && self.checks.sample_size.passed
            && self.checks.profit_factor.passed
    }
}

/// Configurable gate thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityGate {
    pub min_win_rate_pct: f64,
    pub min_trades: usize,
    pub min_profit_factor: f64,
}

impl Default for QualityGate {
    fn default() -> Self {
        Self {
            min_win_rate_pct: 60.0,
            min_trades: 5,
            min_profit_factor: 1.0,
        }
    }
}

impl QualityGate {
    /// Evaluate a backtest summary against all three checks.
    ///
    /// Tier table:
    /// - all three pass → High
    /// - sample size passes and (win rate or profit factor passes) → Medium
    /// - otherwise → Reject
    pub fn evaluate(&self, summary: &BacktestSummary) -> QualityVerdict {
        let win_rate = QualityCheck {
            value: summary.win_rate_pct,
            threshold: self.min_win_rate_pct,
            passed: summary.win_rate_pct >= self.min_win_rate_pct,
        };
        let sample_size = QualityCheck {
            value: summary.total_trades as f64,
            threshold: self.min_trades as f64,
            passed: summary.total_trades >= self.min_trades,
        };
        let profit_factor = QualityCheck {
            value: summary.profit_factor,
            threshold: self.min_profit_factor,
            passed: summary.profit_factor >= self.min_profit_factor,
        };

        let tier = if win_rate.passed && sample_size.passed && profit_factor.passed {
            ConfidenceTier::High
        } else if sample_size.passed && (win_rate.passed || profit_factor.passed) {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Reject
        };

        let checks = QualityChecks {
            win_rate,
            sample_size,
            profit_factor,
        };

        let suggestions = if tier == ConfidenceTier::High {
            Vec::new()
        } else {
            self.suggest_improvements(&checks)
        };

        debug!(?tier, "quality gate evaluated");
        QualityVerdict {
            tier,
            checks,
            suggestions,
        }
    }

    /// Advisory text per failed check, in evaluation order.
    fn suggest_improvements(&self, checks: &QualityChecks) -> Vec<String> {
        let mut suggestions = Vec::new();

        if !checks.win_rate.passed {
            let gap = checks.win_rate.threshold - checks.win_rate.value;
            suggestions.push(format!(
                "Win rate too low by {gap:.1}%. Try tightening stop loss (e.g., 10% → 7%)"
            ));
        }
        if !checks.sample_size.passed {
            suggestions.push(
                "Only a few trades in backtest. Extend backtest period to 5+ years.".to_string(),
            );
        }
        if !checks.profit_factor.passed {
            suggestions.push(
                "Losing money overall. Consider raising profit target (e.g., 20% → 25%)"
                    .to_string(),
            );
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(win_rate_pct: f64, total_trades: usize, profit_factor: f64) -> BacktestSummary {
        BacktestSummary {
            total_trades,
            win_rate_pct,
            profit_factor,
            ..Default::default()
        }
    }

    #[test]
    fn all_pass_is_high() {
        let verdict = QualityGate::default().evaluate(&summary(65.0, 10, 1.8));
        assert_eq!(verdict.tier, ConfidenceTier::High);
        assert!(verdict.all_pass());
        assert!(verdict.suggestions.is_empty());
    }

    #[test]
    fn sample_plus_one_other_is_medium() {
        // Win rate fails, sample and profit factor pass.
        let verdict = QualityGate::default().evaluate(&summary(45.0, 10, 1.8));
        assert_eq!(verdict.tier, ConfidenceTier::Medium);
        assert!(!verdict.all_pass());
        // One failed check, one suggestion.
        assert_eq!(verdict.suggestions.len(), 1);
        assert!(verdict.suggestions[0].contains("stop loss"));
    }

    #[test]
    fn everything_failing_is_reject() {
        let verdict = QualityGate::default().evaluate(&summary(45.0, 2, 0.5));
        assert_eq!(verdict.tier, ConfidenceTier::Reject);
        assert_eq!(verdict.suggestions.len(), 3);
    }

    #[test]
    fn sample_failure_alone_blocks_medium() {
        // Win rate and profit factor pass, but only 2 trades: Reject.
        let verdict = QualityGate::default().evaluate(&summary(70.0, 2, 2.0));
        assert_eq!(verdict.tier, ConfidenceTier::Reject);
        assert_eq!(verdict.suggestions.len(), 1);
        assert!(verdict.suggestions[0].contains("Extend backtest period"));
    }

    #[test]
    fn zero_trade_summary_rejects() {
        let verdict = QualityGate::default().evaluate(&BacktestSummary::default());
        assert_eq!(verdict.tier, ConfidenceTier::Reject);
        assert!(!verdict.checks.sample_size.passed);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let verdict = QualityGate::default().evaluate(&summary(60.0, 5, 1.0));
        assert_eq!(verdict.tier, ConfidenceTier::High);
    }

    #[test]
    fn suggestions_follow_check_order() {
        let verdict = QualityGate::default().evaluate(&summary(45.0, 2, 0.5));
        assert!(verdict.suggestions[0].contains("Win rate"));
        assert!(verdict.suggestions[1].contains("Extend backtest"));
        assert!(verdict.suggestions[2].contains("profit target"));
    }

    #[test]
    fn verdict_serialization_tier_names() {
        let verdict = QualityGate::default().evaluate(&summary(65.0, 10, 1.8));
        let json = serde_json::to_string(&verdict).unwrap();
        assert!(json.contains("\"HIGH\""));
    }
}
