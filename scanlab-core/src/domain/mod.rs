//! Domain types for the momentum screening pipeline.

pub mod bar;
pub mod snapshot;
pub mod trade;

pub use bar::{PriceBar, PriceSeries, SeriesError};
pub use snapshot::TechnicalSnapshot;
pub use trade::{BacktestSummary, ExitReason, Trade, TradeExit};

/// Ticker symbol type alias.
pub type Ticker = String;
