//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! ATR uses Wilder smoothing: seed with the mean of the first `period` true
//! ranges, then `atr = (prev * (period - 1) + tr) / period`.
//! Lookback: period (TR[0] has no previous close, so the first ATR is at index `period`).

use crate::domain::Candle;
use crate::error::IndicatorError;
use crate::indicators::params::{ensure_enough_candles, validate_period};

/// Compute the True Range series from candles.
/// TR[0] = None (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range(candles: &[Candle]) -> Vec<Option<f64>> {
    let mut tr = vec![None; candles.len()];
    for (i, pair) in candles.windows(2).enumerate() {
        tr[i + 1] = Some(bar_true_range(&pair[1], pair[0].close));
    }
    tr
}

fn bar_true_range(candle: &Candle, prev_close: f64) -> f64 {
    let h = candle.high;
    let l = candle.low;
    (h - l).max((h - prev_close).abs()).max((l - prev_close).abs())
}

/// One Wilder smoothing step.
pub fn wilder_step(prev_atr: f64, tr: f64, period: usize) -> f64 {
    (prev_atr * period.saturating_sub(1) as f64 + tr) / period as f64
}

/// Compute the ATR series, aligned by index with `candles`.
///
/// Entries below `period` are `None`. Fails with `InvalidParameters` for a zero
/// period and `InsufficientData` when there are `period` or fewer candles.
pub fn compute_atr(candles: &[Candle], period: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    validate_period(period)?;
    ensure_enough_candles(candles.len(), period)?;

    let n = candles.len();
    let mut atr = vec![None; n];

    let seed: f64 = candles[..=period]
        .windows(2)
        .map(|pair| bar_true_range(&pair[1], pair[0].close))
        .sum::<f64>()
        / period as f64;
    atr[period] = Some(seed);

    let mut prev = seed;
    for i in (period + 1)..n {
        let tr = bar_true_range(&candles[i], candles[i - 1].close);
        prev = wilder_step(prev, tr, period);
        atr[i] = Some(prev);
    }

    Ok(atr)
}
