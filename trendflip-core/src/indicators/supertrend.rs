//! Supertrend: ATR-based directional indicator.
//!
//! Inherently sequential: each point depends only on the previous point's
//! carried bands and direction (first-order recurrence), so the carried state
//! is kept in a small rolling accumulator instead of on every output element.
//!
//! Lookback: period (same as ATR). The first point, at index `period`, is
//! always seeded trending up on the upper band.
//!
//! Direction at i > period, against the previous *raw* bands:
//! 1. close > prev lower band -> up
//! 2. else close < prev upper band -> down
//! 3. else keep the previous direction
//!
//! Rule 1 wins whenever both could apply.
//!
//! Output value: the active band, ratcheted against the previous raw band:
//! `max(lower, prev_lower)` trending up, `min(upper, prev_upper)` trending down.

use serde::{Deserialize, Serialize};

use crate::domain::{Candle, Direction};
use crate::error::IndicatorError;
use crate::indicators::atr::compute_atr;
use crate::indicators::params::{ensure_enough_candles, validate_multiplier, validate_period};
use crate::indicators::SupertrendParams;

/// One Supertrend output point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupertrendPoint {
    /// Active band price.
    pub value: f64,
    pub trend_up: bool,
}

impl SupertrendPoint {
    pub fn direction(&self) -> Direction {
        Direction::from_trend_up(self.trend_up)
    }
}

/// Carried recurrence state: the previous raw bands and direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupertrendState {
    upper_band: f64,
    lower_band: f64,
    trend_up: bool,
    multiplier: f64,
}

fn bands(candle: &Candle, atr: f64, multiplier: f64) -> (f64, f64) {
    let hl2 = candle.hl2();
    (hl2 + multiplier * atr, hl2 - multiplier * atr)
}

impl SupertrendState {
    /// Seed the recurrence at index `period`: trending up, value = upper band.
    pub fn seed(candle: &Candle, atr: f64, multiplier: f64) -> (Self, SupertrendPoint) {
        let (upper_band, lower_band) = bands(candle, atr, multiplier);
        let state = Self {
            upper_band,
            lower_band,
            trend_up: true,
            multiplier,
        };
        let point = SupertrendPoint {
            value: upper_band,
            trend_up: true,
        };
        (state, point)
    }

    /// Advance the recurrence by one candle.
    pub fn step(&mut self, candle: &Candle, atr: f64) -> SupertrendPoint {
        let (upper_band, lower_band) = bands(candle, atr, self.multiplier);

        let trend_up = if candle.close > self.lower_band {
            true
        } else if candle.close < self.upper_band {
            false
        } else {
            self.trend_up
        };

        let value = if trend_up {
            lower_band.max(self.lower_band)
        } else {
            upper_band.min(self.upper_band)
        };

        self.upper_band = upper_band;
        self.lower_band = lower_band;
        self.trend_up = trend_up;

        SupertrendPoint { value, trend_up }
    }

    pub fn upper_band(&self) -> f64 {
        self.upper_band
    }

    pub fn lower_band(&self) -> f64 {
        self.lower_band
    }

    pub fn trend_up(&self) -> bool {
        self.trend_up
    }
}

/// Compute the full Supertrend series from candles and a matching ATR series.
///
/// `atr` must come from [`compute_atr`] with the same `period` over the same
/// candles. Entries below `period` are `None`.
pub fn compute_supertrend(
    candles: &[Candle],
    atr: &[Option<f64>],
    period: usize,
    multiplier: f64,
) -> Result<Vec<Option<SupertrendPoint>>, IndicatorError> {
    validate_period(period)?;
    validate_multiplier(multiplier)?;
    ensure_enough_candles(candles.len(), period)?;
    if atr.len() != candles.len() {
        return Err(IndicatorError::MisalignedSeries {
            candles: candles.len(),
            atr: atr.len(),
        });
    }

    let atr_at = |i: usize| atr[i].ok_or(IndicatorError::MissingAtr { index: i });

    let mut out = vec![None; candles.len()];
    let (mut state, seed) = SupertrendState::seed(&candles[period], atr_at(period)?, multiplier);
    out[period] = Some(seed);

    for i in (period + 1)..candles.len() {
        out[i] = Some(state.step(&candles[i], atr_at(i)?));
    }

    Ok(out)
}

/// ATR + Supertrend in one call, validating the parameters once.
pub fn supertrend(
    candles: &[Candle],
    params: &SupertrendParams,
) -> Result<Vec<Option<SupertrendPoint>>, IndicatorError> {
    params.validate()?;
    let atr = compute_atr(candles, params.period)?;
    compute_supertrend(candles, &atr, params.period, params.multiplier)
}
