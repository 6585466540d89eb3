//! Scanlab Core: momentum screening and validation analytics.
//!
//! The analytics pipeline for a momentum trade screener:
//! - Domain types (price bars, series, trades, snapshots)
//! - Technical indicator engine (SMA 60/200, RSI 14, average volume)
//! - 12-1 momentum scoring and universe ranking
//! - Play classification (Golden Staircase, Mean Reversion Bounce,
//!   60-Day Breakout)
//! - Single-position backtest simulator with stop-loss/take-profit exits
//! - Drawdown and volatility analytics
//! - Quality gate (HIGH / MEDIUM / REJECT)
//!
//! Everything here is a pure function over immutable in-memory series;
//! data retrieval, notification, and reporting live elsewhere. Missing or
//! insufficient data is a sentinel outcome (score 0.0, empty trade list,
//! NaN indicator value), never an error.

pub mod backtest;
pub mod domain;
pub mod drawdown;
pub mod indicators;
pub mod momentum;
pub mod plays;
pub mod quality;

pub use backtest::{analyze_trades, entry_signals, BacktestConfig};
pub use domain::{
    BacktestSummary, ExitReason, PriceBar, PriceSeries, SeriesError, TechnicalSnapshot, Ticker,
    Trade, TradeExit,
};
pub use drawdown::DrawdownProfile;
pub use indicators::{TechnicalSeries, Technicals};
pub use momentum::MomentumRecord;
pub use plays::{Play, PlayCandidate, PlayClassifier};
pub use quality::{ConfidenceTier, QualityChecks, QualityGate, QualityVerdict};
