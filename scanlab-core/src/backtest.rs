//! Single-position backtest simulator.
//!
//! Replays a long-only strategy over one ticker's series: enter on the
//! rising edge of "price above both the 60d and 200d SMA", exit on stop
//! loss or take profit, force-close at end of data. FLAT → LONG → FLAT,
//! never more than one open position.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{BacktestSummary, ExitReason, Trade, TradeExit};
use crate::indicators::TechnicalSeries;

/// Stop/target configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Exit when unrealized return reaches -stop_loss_pct.
    pub stop_loss_pct: f64,
    /// Exit when unrealized return reaches +take_profit_pct.
    pub take_profit_pct: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            stop_loss_pct: 0.10,
            take_profit_pct: 0.20,
        }
    }
}

/// Rising-edge entry signals: true on bars where "adj_close above both SMAs"
/// first becomes true. NaN SMA values compare false, so nothing fires inside
/// the warmup.
pub fn entry_signals(tech: &TechnicalSeries) -> Vec<bool> {
    let bars = tech.series().bars();
    let mut signals = vec![false; bars.len()];
    let mut prev_cond = false;
    for (i, bar) in bars.iter().enumerate() {
        let cond = bar.adj_close > tech.sma_60[i] && bar.adj_close > tech.sma_200[i];
        signals[i] = cond && !prev_cond;
        prev_cond = cond;
    }
    signals
}

/// Replay the state machine over the series.
///
/// Each bar: while FLAT, an entry signal opens a trade at that bar's
/// adjusted close. While LONG, exits are checked in priority order
/// (stop loss first, then take profit) against the same bar's close.
/// An open position at the end of the series is force-closed on the final
/// bar with `ExitReason::EndOfData`. Entry signals while LONG are ignored.
pub fn run(tech: &TechnicalSeries, config: &BacktestConfig) -> Vec<Trade> {
    let bars = tech.series().bars();
    if bars.is_empty() {
        return Vec::new();
    }

    let signals = entry_signals(tech);
    let mut trades: Vec<Trade> = Vec::new();
    let mut open: Option<usize> = None; // index into trades

    for (i, bar) in bars.iter().enumerate() {
        let price = bar.adj_close;

        if open.is_none() && signals[i] {
            trades.push(Trade::open(bar.date, price));
            open = Some(trades.len() - 1);
        }

        if let Some(trade_idx) = open {
            let entry_price = trades[trade_idx].entry_price;
            let pnl_pct = (price - entry_price) / entry_price;

            if pnl_pct <= -config.stop_loss_pct {
                trades[trade_idx].exit = Some(TradeExit {
                    date: bar.date,
                    price,
                    ret: pnl_pct,
                    reason: ExitReason::StopLoss,
                });
                open = None;
            } else if pnl_pct >= config.take_profit_pct {
                trades[trade_idx].exit = Some(TradeExit {
                    date: bar.date,
                    price,
                    ret: pnl_pct,
                    reason: ExitReason::TakeProfit,
                });
                open = None;
            }
        }
    }

    // Force-close a position still open at the last bar.
    if let (Some(trade_idx), Some(last)) = (open, bars.last()) {
        let entry_price = trades[trade_idx].entry_price;
        trades[trade_idx].exit = Some(TradeExit {
            date: last.date,
            price: last.adj_close,
            ret: (last.adj_close - entry_price) / entry_price,
            reason: ExitReason::EndOfData,
        });
    }

    debug!(trades = trades.len(), "backtest complete");
    trades
}

/// Summarize completed trades. Trades without a recorded return are
/// excluded; zero completed trades yields the all-zero summary.
pub fn analyze_trades(trades: &[Trade]) -> BacktestSummary {
    let returns: Vec<f64> = trades.iter().filter_map(|t| t.ret()).collect();
    if returns.is_empty() {
        return BacktestSummary::default();
    }

    let winning: Vec<f64> = returns.iter().copied().filter(|&r| r > 0.0).collect();
    let losing: Vec<f64> = returns.iter().copied().filter(|&r| r < 0.0).collect();

    let gross_profit: f64 = winning.iter().sum();
    let gross_loss: f64 = losing.iter().sum::<f64>().abs();

    BacktestSummary {
        total_trades: returns.len(),
        winners: winning.len(),
        losers: losing.len(),
        win_rate_pct: winning.len() as f64 / returns.len() as f64 * 100.0,
        avg_win: mean_or_zero(&winning),
        avg_loss: mean_or_zero(&losing),
        gross_profit,
        gross_loss,
        profit_factor: if gross_loss > 0.0 {
            gross_profit / gross_loss
        } else {
            0.0
        },
        net_return: returns.iter().sum(),
    }
}

fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
