//! 12-1 month momentum scoring and universe ranking.
//!
//! The score is the compounded return over the trailing 12 months excluding
//! the most recent month (skipping it sidesteps short-term reversal noise).
//! Prices are resampled to month-end values: the last trading-day adjusted
//! close of each calendar month.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{PriceSeries, Ticker};

pub const MOMENTUM_WINDOW_MONTHS: usize = 12;
/// Skip the most recent month.
pub const MOMENTUM_SKIP_MONTHS: usize = 1;
/// Default top-performer cut (top decile).
pub const DEFAULT_TOP_PERCENTILE: f64 = 10.0;

/// One ticker's momentum score and universe rank.
///
/// Rank 1 is best; tied scores share the average of the positions they
/// occupy, hence the fractional type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumRecord {
    pub ticker: Ticker,
    pub momentum_score: f64,
    pub rank: f64,
}

/// Month-end adjusted closes: the last trading-day close of each calendar
/// month, chronological. Relies on the series' strictly increasing dates.
pub fn monthly_closes(series: &PriceSeries) -> Vec<f64> {
    let mut months: Vec<f64> = Vec::new();
    let mut current: Option<(i32, u32)> = None;
    for bar in series.bars() {
        let key = (bar.date.year(), bar.date.month());
        if current == Some(key) {
            // Later bar in the same month supersedes the earlier close.
            if let Some(last) = months.last_mut() {
                *last = bar.adj_close;
            }
        } else {
            current = Some(key);
            months.push(bar.adj_close);
        }
    }
    months
}

/// 12-1 momentum: ∏(1+r) − 1 over the 12 monthly returns ending one month
/// before the most recent month.
///
/// Requires at least 13 monthly observations; shorter histories score 0.0
/// (a sentinel, not an error). The earliest month carries no return
/// observation, so a history of exactly 13 months compounds 11 returns.
pub fn momentum_12_1(series: &PriceSeries) -> f64 {
    let months = monthly_closes(series);
    let window = MOMENTUM_WINDOW_MONTHS + MOMENTUM_SKIP_MONTHS;
    if months.len() < window {
        debug!(months = months.len(), "insufficient history for 12-1 momentum");
        return 0.0;
    }

    let start = months.len() - window;
    let end = months.len() - MOMENTUM_SKIP_MONTHS;
    let mut compounded = 1.0;
    for i in start..end {
        if i == 0 {
            continue; // no prior month to form a return against
        }
        compounded *= months[i] / months[i - 1];
    }
    compounded - 1.0
}

/// Score every ticker in the universe and rank descending by score.
///
/// Empty series are skipped. Ties share the average rank. The result is
/// sorted ascending by rank, tied scores ordered by ticker for determinism.
pub fn score_universe(universe: &BTreeMap<Ticker, PriceSeries>) -> Vec<MomentumRecord> {
    let scores: Vec<(Ticker, f64)> = universe
        .iter()
        .filter_map(|(ticker, series)| {
            if series.is_empty() {
                debug!(%ticker, "skipping: no data");
                return None;
            }
            Some((ticker.clone(), momentum_12_1(series)))
        })
        .collect();
    rank_scores(scores)
}

/// Rank a scored universe: descending by score, ties share the average
/// rank, tied scores ordered by ticker. This is the synchronization point:
/// per-ticker scoring can run in parallel, ranking needs every score.
pub fn rank_scores(scores: Vec<(Ticker, f64)>) -> Vec<MomentumRecord> {
    let mut records: Vec<MomentumRecord> = scores
        .into_iter()
        .map(|(ticker, momentum_score)| MomentumRecord {
            ticker,
            momentum_score,
            rank: 0.0,
        })
        .collect();

    if records.is_empty() {
        warn!("no valid momentum scores in universe");
        return records;
    }

    records.sort_by(|a, b| {
        b.momentum_score
            .partial_cmp(&a.momentum_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.ticker.cmp(&b.ticker))
    });

    // Average rank over each run of equal scores.
    let mut i = 0;
    while i < records.len() {
        let mut j = i + 1;
        while j < records.len() && records[j].momentum_score == records[i].momentum_score {
            j += 1;
        }
        // Positions i..j are 1-based ranks i+1..j; their average is shared.
        let avg_rank = (i + j + 1) as f64 / 2.0;
        for record in &mut records[i..j] {
            record.rank = avg_rank;
        }
        i = j;
    }

    info!(scored = records.len(), "scored universe");
    records
}

/// Top performers: the first `floor(N × percentile / 100)` records of a
/// rank-sorted table. Empty input yields empty output.
pub fn top_performers(records: &[MomentumRecord], percentile: f64) -> Vec<MomentumRecord> {
    if records.is_empty() {
        return Vec::new();
    }
    let cutoff = (records.len() as f64 * percentile / 100.0).floor() as usize;
    let top = records[..cutoff.min(records.len())].to_vec();
    info!(percentile, count = top.len(), "selected top performers");
    top
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PriceBar, PriceSeries};
    use chrono::NaiveDate;

    /// One bar per month-end at the given closes.
    fn monthly_series(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let year = 2020 + (i / 12) as i32;
                let month = (i % 12) as u32 + 1;
                PriceBar {
                    date: NaiveDate::from_ymd_opt(year, month, 28).unwrap(),
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    adj_close: close,
                    volume: 1000,
                }
            })
            .collect();
        PriceSeries::new(bars).unwrap()
    }

    #[test]
    fn monthly_closes_take_last_bar_of_month() {
        let bars = vec![
            PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                open: 100.0,
                high: 101.0,
                low: 99.0,
                close: 100.0,
                adj_close: 100.0,
                volume: 1000,
            },
            PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                open: 100.0,
                high: 106.0,
                low: 99.0,
                close: 105.0,
                adj_close: 105.0,
                volume: 1000,
            },
            PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
                open: 105.0,
                high: 111.0,
                low: 104.0,
                close: 110.0,
                adj_close: 110.0,
                volume: 1000,
            },
        ];
        let series = PriceSeries::new(bars).unwrap();
        assert_eq!(monthly_closes(&series), vec![105.0, 110.0]);
    }

    #[test]
    fn short_history_scores_zero() {
        // 12 monthly observations, one short of the requirement.
        let closes: Vec<f64> = (0..12).map(|i| 100.0 + i as f64).collect();
        assert_eq!(momentum_12_1(&monthly_series(&closes)), 0.0);
    }

    #[test]
    fn thirteen_months_is_the_boundary() {
        let closes: Vec<f64> = (0..13).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let momentum = momentum_12_1(&monthly_series(&closes));
        // 11 usable returns (earliest month has no prior), most recent skipped.
        let expected = 1.01f64.powi(11) - 1.0;
        assert!((momentum - expected).abs() < 1e-9);
    }

    #[test]
    fn skips_most_recent_month() {
        // 1% monthly growth, then a 50% crash in the final month. The crash
        // sits inside the skip window and must not touch the score.
        let mut closes: Vec<f64> = (0..14).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let last = closes.len() - 1;
        closes[last] *= 0.5;
        let momentum = momentum_12_1(&monthly_series(&closes));
        let expected = 1.01f64.powi(12) - 1.0;
        assert!((momentum - expected).abs() < 1e-9);
    }

    #[test]
    fn empty_series_is_skipped_in_universe() {
        let mut universe = BTreeMap::new();
        universe.insert("GOOD".to_string(), monthly_series(&[100.0; 20]));
        universe.insert("EMPTY".to_string(), PriceSeries::empty());
        let records = score_universe(&universe);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ticker, "GOOD");
    }

    #[test]
    fn ranking_orders_by_score_descending() {
        let mut universe = BTreeMap::new();
        // 24 months at +2%/mo vs flat vs -1%/mo.
        universe.insert(
            "UP".to_string(),
            monthly_series(&(0..24).map(|i| 100.0 * 1.02f64.powi(i)).collect::<Vec<_>>()),
        );
        universe.insert("FLAT".to_string(), monthly_series(&[100.0; 24]));
        universe.insert(
            "DOWN".to_string(),
            monthly_series(&(0..24).map(|i| 100.0 * 0.99f64.powi(i)).collect::<Vec<_>>()),
        );
        let records = score_universe(&universe);
        assert_eq!(records[0].ticker, "UP");
        assert_eq!(records[0].rank, 1.0);
        assert_eq!(records[1].ticker, "FLAT");
        assert_eq!(records[2].ticker, "DOWN");
        assert_eq!(records[2].rank, 3.0);
    }

    #[test]
    fn tied_scores_share_average_rank() {
        let mut universe = BTreeMap::new();
        // Two histories too short to score: both 0.0, tied behind the winner.
        universe.insert("A".to_string(), monthly_series(&[100.0; 5]));
        universe.insert("B".to_string(), monthly_series(&[100.0; 5]));
        universe.insert(
            "WIN".to_string(),
            monthly_series(&(0..24).map(|i| 100.0 * 1.02f64.powi(i)).collect::<Vec<_>>()),
        );
        let records = score_universe(&universe);
        assert_eq!(records[0].ticker, "WIN");
        assert_eq!(records[0].rank, 1.0);
        // Ranks 2 and 3 averaged to 2.5 for the tie.
        assert_eq!(records[1].rank, 2.5);
        assert_eq!(records[2].rank, 2.5);
    }

    #[test]
    fn top_performers_floors_the_cut() {
        let records: Vec<MomentumRecord> = (0..25)
            .map(|i| MomentumRecord {
                ticker: format!("T{i:02}"),
                momentum_score: 1.0 - i as f64 * 0.01,
                rank: (i + 1) as f64,
            })
            .collect();
        // floor(25 * 10 / 100) = 2
        let top = top_performers(&records, 10.0);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].ticker, "T00");
    }

    #[test]
    fn top_performers_of_empty_is_empty() {
        assert!(top_performers(&[], 10.0).is_empty());
    }
}
