//! Look-ahead contamination tests for ATR and Supertrend.
//!
//! Invariant: no indicator value at candle t may depend on price data from
//! candle t+1 or later.
//!
//! Method: compute on a truncated series (candles 0..100) and the full series
//! (candles 0..200). Candles 0..100 must be bit-identical between both runs.
//! The same recurrence driven step by step through `SupertrendState` must
//! reproduce the batch result, so extending state incrementally and
//! recomputing from scratch agree.

use trendflip_core::domain::Candle;
use trendflip_core::indicators::*;

/// Generate N candles of synthetic OHLCV data with realistic variation.
fn make_test_candles(n: usize) -> Vec<Candle> {
    let mut candles = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        // Deterministic pseudo-random walk using a simple LCG
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05; // -5.0 to +5.0
        price += change;
        price = price.max(10.0); // floor at 10

        let open = price - 0.5;
        let close = price + 0.3;
        let high = open.max(close) + 2.0;
        let low = open.min(close) - 2.0;

        candles.push(Candle::new(
            i as i64 * 60_000,
            open,
            high,
            low,
            close,
            1000.0 + i as f64 * 100.0,
        ));
    }

    candles
}

#[test]
fn atr_no_lookahead() {
    let candles = make_test_candles(200);
    for period in [1, 5, 10, 14] {
        let full = compute_atr(&candles, period).unwrap();
        let truncated = compute_atr(&candles[..100], period).unwrap();
        assert_eq!(truncated.len(), 100);
        for i in 0..100 {
            assert_eq!(
                truncated[i].map(f64::to_bits),
                full[i].map(f64::to_bits),
                "atr_{period}: look-ahead at candle {i}"
            );
        }
    }
}

#[test]
fn supertrend_no_lookahead() {
    let candles = make_test_candles(200);
    for (period, multiplier) in [(1, 1.0), (7, 2.0), (10, 3.0), (20, 1.5)] {
        let params = SupertrendParams::new(period, multiplier).unwrap();
        let full = supertrend(&candles, &params).unwrap();
        let truncated = supertrend(&candles[..100], &params).unwrap();
        assert_eq!(truncated.len(), 100);
        assert_eq!(
            &truncated[..],
            &full[..100],
            "supertrend_{period}_{multiplier}: look-ahead detected"
        );
    }
}

#[test]
fn incremental_state_matches_full_recompute() {
    let candles = make_test_candles(150);
    let period = 10;
    let multiplier = 3.0;
    let atr = compute_atr(&candles, period).unwrap();
    let batch = compute_supertrend(&candles, &atr, period, multiplier).unwrap();

    let (mut state, seed) = SupertrendState::seed(&candles[period], atr[period].unwrap(), multiplier);
    assert_eq!(batch[period], Some(seed));

    let mut prev_atr = atr[period].unwrap();
    for i in (period + 1)..candles.len() {
        // Extend ATR one step as well, from the single previous value.
        let tr = true_range(&candles[i - 1..=i])[1].unwrap();
        let next_atr = wilder_step(prev_atr, tr, period);
        assert_eq!(next_atr.to_bits(), atr[i].unwrap().to_bits(), "atr at {i}");
        prev_atr = next_atr;

        let point = state.step(&candles[i], next_atr);
        assert_eq!(Some(point), batch[i], "supertrend at {i}");
    }
}

#[test]
fn warmup_entries_are_undefined() {
    let candles = make_test_candles(50);
    let params = SupertrendParams::new(12, 2.0).unwrap();
    let atr = compute_atr(&candles, params.period).unwrap();
    let st = supertrend(&candles, &params).unwrap();

    assert!(atr[..12].iter().all(Option::is_none));
    assert!(st[..12].iter().all(Option::is_none));
    assert!(atr[12..].iter().all(Option::is_some));
    assert!(st[12..].iter().all(Option::is_some));
}
