//! Error type shared by the indicator engines and the trend tracker.

use thiserror::Error;

/// Deterministic, local failures of the indicator computation.
///
/// None of these are retried: the same inputs always produce the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("insufficient data: {candles} candles, need at least {required}")]
    InsufficientData { candles: usize, required: usize },

    #[error("supertrend point is undefined (index below period was never seeded)")]
    UndefinedPoint,

    #[error("ATR series has {atr} entries but there are {candles} candles")]
    MisalignedSeries { candles: usize, atr: usize },

    #[error("ATR is undefined at index {index}")]
    MissingAtr { index: usize },
}
