//! Serializable scan and validation configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use scanlab_core::backtest::BacktestConfig;
use scanlab_core::indicators::technicals::MAX_RSI;
use scanlab_core::momentum::DEFAULT_TOP_PERCENTILE;
use scanlab_core::plays::PlayClassifier;
use scanlab_core::quality::QualityGate;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Parameters for a universe scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Top-X% momentum cut (10 = top decile).
    pub percentile: f64,
    /// Overbought ceiling for the RSI filter.
    pub max_rsi: f64,
    /// Max fraction above the 200d SMA for a mean-reversion bounce.
    pub bounce_threshold: f64,
    /// Volume ratio over the 20-bar average for a breakout.
    pub volume_threshold: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        let plays = PlayClassifier::default();
        Self {
            percentile: DEFAULT_TOP_PERCENTILE,
            max_rsi: MAX_RSI,
            bounce_threshold: plays.bounce_threshold,
            volume_threshold: plays.volume_threshold,
        }
    }
}

impl ScanConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.percentile) {
            return Err(ConfigError::Invalid(format!(
                "percentile must be in [0, 100], got {}",
                self.percentile
            )));
        }
        if !(0.0..=100.0).contains(&self.max_rsi) {
            return Err(ConfigError::Invalid(format!(
                "max_rsi must be in [0, 100], got {}",
                self.max_rsi
            )));
        }
        if self.bounce_threshold <= 0.0 {
            return Err(ConfigError::Invalid(
                "bounce_threshold must be positive".to_string(),
            ));
        }
        if self.volume_threshold <= 0.0 {
            return Err(ConfigError::Invalid(
                "volume_threshold must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn classifier(&self) -> PlayClassifier {
        PlayClassifier {
            bounce_threshold: self.bounce_threshold,
            volume_threshold: self.volume_threshold,
        }
    }
}

/// Parameters for backtest validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
    pub min_win_rate_pct: f64,
    pub min_trades: usize,
    pub min_profit_factor: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        let backtest = BacktestConfig::default();
        let gate = QualityGate::default();
        Self {
            stop_loss_pct: backtest.stop_loss_pct,
            take_profit_pct: backtest.take_profit_pct,
            min_win_rate_pct: gate.min_win_rate_pct,
            min_trades: gate.min_trades,
            min_profit_factor: gate.min_profit_factor,
        }
    }
}

impl ValidationConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.stop_loss_pct) {
            return Err(ConfigError::Invalid(format!(
                "stop_loss_pct must be in [0, 1), got {}",
                self.stop_loss_pct
            )));
        }
        if self.take_profit_pct <= 0.0 {
            return Err(ConfigError::Invalid(
                "take_profit_pct must be positive".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.min_win_rate_pct) {
            return Err(ConfigError::Invalid(format!(
                "min_win_rate_pct must be in [0, 100], got {}",
                self.min_win_rate_pct
            )));
        }
        Ok(())
    }

    pub fn backtest(&self) -> BacktestConfig {
        BacktestConfig {
            stop_loss_pct: self.stop_loss_pct,
            take_profit_pct: self.take_profit_pct,
        }
    }

    pub fn gate(&self) -> QualityGate {
        QualityGate {
            min_win_rate_pct: self.min_win_rate_pct,
            min_trades: self.min_trades,
            min_profit_factor: self.min_profit_factor,
        }
    }
}
