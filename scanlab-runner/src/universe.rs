//! Universe circuit breakers: eligibility filters on ticker metadata.
//!
//! Screens out names too small or too thin to trade before any price-series
//! work happens: market cap at least $2B, estimated daily dollar volume at
//! least $10M.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use scanlab_core::domain::Ticker;

/// Minimum market capitalization, USD.
pub const MIN_MARKET_CAP_USD: f64 = 2_000_000_000.0;
/// Minimum estimated daily dollar volume, USD.
pub const MIN_DAILY_VOLUME_USD: f64 = 10_000_000.0;
/// Rough per-share price assumed when estimating dollar volume from shares.
const ASSUMED_SHARE_PRICE_USD: f64 = 100.0;

/// Ticker metadata from the data-retrieval collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickerInfo {
    pub market_cap: f64,
    pub avg_volume: f64,
    pub avg_volume_10d: f64,
}

impl TickerInfo {
    /// Share volume used for the dollar-volume estimate: the 10-day average
    /// when available, otherwise the long-run average.
    fn volume_to_check(&self) -> f64 {
        if self.avg_volume_10d > 0.0 {
            self.avg_volume_10d
        } else {
            self.avg_volume
        }
    }

    pub fn estimated_daily_volume_usd(&self) -> f64 {
        self.volume_to_check() * ASSUMED_SHARE_PRICE_USD
    }
}

/// Keep tickers whose market cap clears the floor.
pub fn filter_by_market_cap(
    info: &BTreeMap<Ticker, TickerInfo>,
) -> BTreeMap<Ticker, TickerInfo> {
    let filtered: BTreeMap<Ticker, TickerInfo> = info
        .iter()
        .filter(|(ticker, i)| {
            let passes = i.market_cap >= MIN_MARKET_CAP_USD;
            debug!(%ticker, market_cap = i.market_cap, passes, "market cap filter");
            passes
        })
        .map(|(t, i)| (t.clone(), i.clone()))
        .collect();
    info!(passed = filtered.len(), total = info.len(), "market cap filter");
    filtered
}

/// Keep tickers whose estimated daily dollar volume clears the floor.
pub fn filter_by_volume(info: &BTreeMap<Ticker, TickerInfo>) -> BTreeMap<Ticker, TickerInfo> {
    let filtered: BTreeMap<Ticker, TickerInfo> = info
        .iter()
        .filter(|(ticker, i)| {
            let dollar_volume = i.estimated_daily_volume_usd();
            let passes = dollar_volume >= MIN_DAILY_VOLUME_USD;
            debug!(%ticker, dollar_volume, passes, "volume filter");
            passes
        })
        .map(|(t, i)| (t.clone(), i.clone()))
        .collect();
    info!(passed = filtered.len(), total = info.len(), "volume filter");
    filtered
}

/// Apply every circuit breaker in sequence.
pub fn apply_circuit_breakers(
    info: &BTreeMap<Ticker, TickerInfo>,
) -> BTreeMap<Ticker, TickerInfo> {
    let filtered = filter_by_volume(&filter_by_market_cap(info));
    info!(eligible = filtered.len(), "circuit breakers applied");
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe() -> BTreeMap<Ticker, TickerInfo> {
        let mut info = BTreeMap::new();
        info.insert(
            "AAPL".to_string(),
            TickerInfo {
                market_cap: 3_000_000_000.0,
                avg_volume: 50_000_000.0,
                avg_volume_10d: 48_000_000.0,
            },
        );
        info.insert(
            "PENNY".to_string(),
            TickerInfo {
                market_cap: 500_000_000.0,
                avg_volume: 100_000.0,
                avg_volume_10d: 0.0,
            },
        );
        info.insert(
            "LOWVOL".to_string(),
            TickerInfo {
                market_cap: 3_000_000_000.0,
                avg_volume: 50_000.0,
                avg_volume_10d: 0.0,
            },
        );
        info
    }

    #[test]
    fn small_caps_are_cut() {
        let filtered = filter_by_market_cap(&universe());
        assert!(filtered.contains_key("AAPL"));
        assert!(!filtered.contains_key("PENNY"));
        assert!(filtered.contains_key("LOWVOL"));
    }

    #[test]
    fn thin_names_are_cut() {
        let filtered = filter_by_volume(&universe());
        assert!(filtered.contains_key("AAPL"));
        // 50k shares × $100 = $5M < $10M.
        assert!(!filtered.contains_key("LOWVOL"));
    }

    #[test]
    fn ten_day_average_preferred_when_present() {
        let info = TickerInfo {
            market_cap: 3_000_000_000.0,
            avg_volume: 1_000_000.0,
            avg_volume_10d: 200_000.0,
        };
        // 200k × $100 = $20M, from the 10-day figure.
        assert_eq!(info.estimated_daily_volume_usd(), 20_000_000.0);
    }

    #[test]
    fn breakers_chain_both_filters() {
        let eligible = apply_circuit_breakers(&universe());
        assert_eq!(eligible.len(), 1);
        assert!(eligible.contains_key("AAPL"));
    }
}
