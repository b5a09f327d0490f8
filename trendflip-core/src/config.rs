//! Serializable trader configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file is a valid
//! configuration for the default setup (SOLUSDT, 1-minute candles, 100-candle
//! window, Supertrend(10, 3.0)).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::IndicatorError;
use crate::indicators::SupertrendParams;

pub const DEFAULT_INTERVAL: &str = "1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

/// Everything needed to run the polling cycle for one symbol.
///
/// `order_fraction` is passed through to the signal sink untouched; the core
/// never sizes positions itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraderConfig {
    pub symbol: String,

    /// Candle interval as the exchange spells it (minutes for "1", "5", ...).
    pub interval: String,

    /// Number of candles fetched per cycle.
    pub candle_limit: usize,

    /// Seconds between cycles. The core never sleeps; whatever schedules
    /// `TrendCycle::run_once` reads this through [`TraderConfig::poll_interval`].
    pub poll_interval_secs: u64,

    /// Fraction of available balance the order collaborator should commit per signal.
    pub order_fraction: f64,

    pub supertrend: SupertrendParams,
}

impl Default for TraderConfig {
    fn default() -> Self {
        Self {
            symbol: "SOLUSDT".into(),
            interval: DEFAULT_INTERVAL.into(),
            candle_limit: 100,
            poll_interval_secs: 60,
            order_fraction: 0.05,
            supertrend: SupertrendParams::default(),
        }
    }
}

impl TraderConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.supertrend.validate()?;

        if self.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("symbol must not be empty".into()));
        }
        if self.interval.trim().is_empty() {
            return Err(ConfigError::Invalid("interval must not be empty".into()));
        }
        if self.candle_limit < self.supertrend.min_candles() {
            return Err(ConfigError::Invalid(format!(
                "candle_limit {} is too small for period {} (need at least {})",
                self.candle_limit,
                self.supertrend.period,
                self.supertrend.min_candles()
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_secs must be > 0".into(),
            ));
        }
        if !(self.order_fraction > 0.0 && self.order_fraction <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "order_fraction must be in (0, 1], got {}",
                self.order_fraction
            )));
        }
        Ok(())
    }
}
