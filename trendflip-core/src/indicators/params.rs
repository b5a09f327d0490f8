//! Supertrend parameters and their validation.

use serde::{Deserialize, Serialize};

use crate::error::IndicatorError;

pub const DEFAULT_PERIOD: usize = 10;
pub const DEFAULT_MULTIPLIER: f64 = 3.0;

/// Recurrence window and band width for ATR + Supertrend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupertrendParams {
    pub period: usize,
    pub multiplier: f64,
}

impl Default for SupertrendParams {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

impl SupertrendParams {
    pub fn new(period: usize, multiplier: f64) -> Result<Self, IndicatorError> {
        let params = Self { period, multiplier };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), IndicatorError> {
        validate_period(self.period)?;
        validate_multiplier(self.multiplier)
    }

    /// Minimum number of candles that seeds exactly one point.
    ///
    /// Saturates at `usize::MAX`, which no window can reach.
    pub fn min_candles(&self) -> usize {
        self.period.saturating_add(1)
    }
}

pub(crate) fn validate_period(period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidParameters(
            "period must be >= 1".into(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_multiplier(multiplier: f64) -> Result<(), IndicatorError> {
    // NaN fails this comparison too.
    if !(multiplier > 0.0) {
        return Err(IndicatorError::InvalidParameters(format!(
            "multiplier must be > 0, got {multiplier}"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_enough_candles(len: usize, period: usize) -> Result<(), IndicatorError> {
    if len <= period {
        return Err(IndicatorError::InsufficientData {
            candles: len,
            required: period.saturating_add(1),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_setup() {
        let p = SupertrendParams::default();
        assert_eq!(p.period, 10);
        assert_eq!(p.multiplier, 3.0);
        assert_eq!(p.min_candles(), 11);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn rejects_zero_period() {
        let err = SupertrendParams::new(0, 3.0).unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidParameters(_)));
    }

    #[test]
    fn rejects_non_positive_multiplier() {
        for m in [0.0, -1.5, f64::NAN] {
            let err = SupertrendParams::new(10, m).unwrap_err();
            assert!(matches!(err, IndicatorError::InvalidParameters(_)), "m={m}");
        }
    }

    #[test]
    fn partial_toml_table_uses_defaults() {
        let p: SupertrendParams = toml::from_str("period = 7").unwrap();
        assert_eq!(p.period, 7);
        assert_eq!(p.multiplier, DEFAULT_MULTIPLIER);
    }

    #[test]
    fn huge_period_does_not_overflow() {
        let p = SupertrendParams::new(usize::MAX, 3.0).unwrap();
        assert_eq!(p.min_candles(), usize::MAX);
        assert_eq!(
            ensure_enough_candles(3, usize::MAX),
            Err(IndicatorError::InsufficientData {
                candles: 3,
                required: usize::MAX
            })
        );
    }

    #[test]
    fn insufficient_data_boundary() {
        assert!(ensure_enough_candles(11, 10).is_ok());
        assert_eq!(
            ensure_enough_candles(10, 10),
            Err(IndicatorError::InsufficientData {
                candles: 10,
                required: 11
            })
        );
    }
}
