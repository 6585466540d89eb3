//! Scan orchestration: rank a universe by momentum and surface play
//! candidates.
//!
//! Per-ticker work (scoring, indicators, classification) is independent and
//! fans out over a rayon pool; universe ranking is the one synchronization
//! point. A ticker with missing or short data degrades to a sentinel and
//! never aborts the batch.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use scanlab_core::domain::{PriceSeries, Ticker};
use scanlab_core::indicators::Technicals;
use scanlab_core::momentum::{self, MomentumRecord};
use scanlab_core::plays::Play;

use crate::config::ScanConfig;
use crate::universe::{self, TickerInfo};

/// One surfaced trade setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub ticker: Ticker,
    pub momentum_score: f64,
    pub play: Play,
    pub confidence: f64,
    pub price: f64,
    pub sma_60: f64,
    pub sma_200: f64,
    pub rsi_14: f64,
}

/// Orchestrates the full scan: circuit breakers → momentum ranking → top
/// decile → technical filters → play classification.
#[derive(Debug, Clone, Default)]
pub struct ScanOrchestrator {
    config: ScanConfig,
}

impl ScanOrchestrator {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Run a complete scan over the universe.
    ///
    /// Output is sorted descending by confidence, ties broken by ticker.
    pub fn run_scan(
        &self,
        universe: &BTreeMap<Ticker, PriceSeries>,
        info: &BTreeMap<Ticker, TickerInfo>,
    ) -> Vec<Recommendation> {
        info!(tickers = universe.len(), "starting scan");

        let eligible = universe::apply_circuit_breakers(info);

        // Fan-out: per-ticker momentum scores. Fan-in: universe-wide ranking.
        let scores: Vec<(Ticker, f64)> = universe
            .par_iter()
            .filter(|(_, series)| !series.is_empty())
            .map(|(ticker, series)| (ticker.clone(), momentum::momentum_12_1(series)))
            .collect();
        let ranked = momentum::rank_scores(scores);

        let ranked: Vec<MomentumRecord> = ranked
            .into_iter()
            .filter(|r| eligible.contains_key(&r.ticker))
            .collect();
        let top = momentum::top_performers(&ranked, self.config.percentile);

        let classifier = self.config.classifier();
        let technicals = Technicals::default();
        let mut recommendations: Vec<Recommendation> = top
            .par_iter()
            .filter_map(|record| {
                let series = universe.get(&record.ticker)?;
                let tech = technicals.compute(series);
                let snap = tech.snapshot()?;

                if !snap.is_above_sma_200() || !snap.rsi_not_overbought(self.config.max_rsi) {
                    debug!(ticker = %record.ticker, "failed technical filters");
                    return None;
                }

                let candidate = classifier.classify(&record.ticker, &tech);
                let play = candidate.play?;
                debug!(
                    ticker = %record.ticker,
                    play = play.label(),
                    confidence = candidate.confidence,
                    "play detected"
                );
                Some(Recommendation {
                    ticker: record.ticker.clone(),
                    momentum_score: record.momentum_score,
                    play,
                    confidence: candidate.confidence,
                    price: snap.price,
                    sma_60: snap.sma_60,
                    sma_200: snap.sma_200,
                    rsi_14: snap.rsi_14,
                })
            })
            .collect();

        recommendations.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.ticker.cmp(&b.ticker))
        });

        info!(found = recommendations.len(), "scan complete");
        recommendations
    }
}
