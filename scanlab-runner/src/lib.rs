//! Scanlab Runner: scan and validation orchestration.
//!
//! This crate builds on `scanlab-core` to provide:
//! - Universe circuit breakers (market cap and dollar-volume floors)
//! - The scan orchestrator (momentum ranking → top decile → play
//!   classification), fanned out over tickers with rayon
//! - The validation orchestrator (backtest → drawdown → quality gate)
//! - Serializable TOML configuration for both
//!
//! Data retrieval, alerting, and report formatting are external
//! collaborators: series and ticker metadata arrive in memory, results
//! leave as plain record tables.

pub mod config;
pub mod scan;
pub mod universe;
pub mod validate;

pub use config::{ConfigError, ScanConfig, ValidationConfig};
pub use scan::{Recommendation, ScanOrchestrator};
pub use universe::{apply_circuit_breakers, TickerInfo};
pub use validate::{ValidationOrchestrator, ValidationReport};
