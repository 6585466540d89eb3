//! A single-position long round trip, and the backtest summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Why a position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
    EndOfData,
}

/// Exit half of a trade. Present once the position closes, never mutated after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeExit {
    pub date: NaiveDate,
    pub price: f64,
    /// Realized return as a fraction of entry price.
    pub ret: f64,
    pub reason: ExitReason,
}

/// One trade in a single-position simulation.
///
/// Created on an entry signal with `exit: None`, mutated exactly once when
/// the exit fires. Only the last trade in a simulator's output may be open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub exit: Option<TradeExit>,
}

impl Trade {
    pub fn open(entry_date: NaiveDate, entry_price: f64) -> Self {
        Self {
            entry_date,
            entry_price,
            exit: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.exit.is_some()
    }

    /// Realized return, if the trade has closed.
    pub fn ret(&self) -> Option<f64> {
        self.exit.as_ref().map(|e| e.ret)
    }

    pub fn is_winner(&self) -> bool {
        self.ret().is_some_and(|r| r > 0.0)
    }
}

/// Aggregate statistics over completed trades.
///
/// `Default` is the all-zero summary returned when nothing completed,
/// an expected outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub total_trades: usize,
    pub winners: usize,
    pub losers: usize,
    pub win_rate_pct: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub profit_factor: f64,
    pub net_return: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn open_trade_has_no_return() {
        let trade = Trade::open(d(5), 100.0);
        assert!(!trade.is_complete());
        assert_eq!(trade.ret(), None);
        assert!(!trade.is_winner());
    }

    #[test]
    fn closed_trade_reports_return() {
        let mut trade = Trade::open(d(5), 100.0);
        trade.exit = Some(TradeExit {
            date: d(11),
            price: 120.0,
            ret: 0.20,
            reason: ExitReason::TakeProfit,
        });
        assert!(trade.is_complete());
        assert_eq!(trade.ret(), Some(0.20));
        assert!(trade.is_winner());
    }

    #[test]
    fn default_summary_is_all_zero() {
        let summary = BacktestSummary::default();
        assert_eq!(summary.total_trades, 0);
        assert_eq!(summary.win_rate_pct, 0.0);
        assert_eq!(summary.profit_factor, 0.0);
    }

    #[test]
    fn trade_serialization_roundtrip() {
        let mut trade = Trade::open(d(5), 100.0);
        trade.exit = Some(TradeExit {
            date: d(9),
            price: 89.0,
            ret: -0.11,
            reason: ExitReason::StopLoss,
        });
        let json = serde_json::to_string(&trade).unwrap();
        assert!(json.contains("stop_loss"));
        let deser: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(deser.ret(), Some(-0.11));
        assert_eq!(deser.exit.unwrap().reason, ExitReason::StopLoss);
    }
}
