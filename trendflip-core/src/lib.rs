//! trendflip core: Supertrend flip detection over rolling candle windows.
//!
//! This crate contains:
//! - Domain types (candles, directions, flip signals)
//! - ATR engine (True Range + Wilder smoothing)
//! - Supertrend engine (band-flip recurrence with ratcheting bands)
//! - Trend tracker that emits a signal only on the cycle a flip occurs
//! - Candle ingestion and the candle-source / signal-sink seams
//! - The per-cycle driver and its TOML configuration

pub mod config;
pub mod cycle;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod signals;

pub use config::{ConfigError, TraderConfig};
pub use cycle::{CycleError, CycleOutcome, SignalEvent, SignalSink, SinkError, TrendCycle};
pub use domain::{Candle, Direction, OrderSide, TrendSignal};
pub use error::IndicatorError;
pub use indicators::{
    compute_atr, compute_supertrend, supertrend, SupertrendParams, SupertrendPoint,
    SupertrendState,
};
pub use signals::TrendTracker;
