//! ATR and Supertrend indicator engines.
//!
//! Both are pure functions of the candle window and are recomputed from
//! scratch on every cycle. Series are aligned by index with the candles;
//! warmup entries are `None`.

pub mod atr;
pub mod params;
pub mod supertrend;

pub use atr::{compute_atr, true_range, wilder_step};
pub use params::{SupertrendParams, DEFAULT_MULTIPLIER, DEFAULT_PERIOD};
pub use supertrend::{compute_supertrend, supertrend, SupertrendPoint, SupertrendState};

/// Create synthetic candles from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first candle),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<crate::domain::Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            crate::domain::Candle::new(
                i as i64 * 60_000,
                open,
                open.max(close) + 1.0,
                open.min(close) - 1.0,
                close,
                1000.0,
            )
        })
        .collect()
}

/// Create candles from `(high, low, close)` triples; open = close.
#[cfg(test)]
pub fn make_hlc_candles(data: &[(f64, f64, f64)]) -> Vec<crate::domain::Candle> {
    data.iter()
        .enumerate()
        .map(|(i, &(high, low, close))| {
            crate::domain::Candle::new(i as i64 * 60_000, close, high, low, close, 1000.0)
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
