use tracing::debug;

use crate::data::DataError;
use crate::domain::Candle;

/// Canonicalize candles: sort ascending by timestamp, drop duplicate timestamps.
///
/// Sorting is stable, so the first occurrence of a duplicated timestamp wins.
/// Exchanges commonly return klines newest-first; this restores the order the
/// indicator engines require.
pub fn canonicalize_candles(mut candles: Vec<Candle>) -> Vec<Candle> {
    let before = candles.len();
    candles.sort_by_key(|c| c.timestamp);
    candles.dedup_by_key(|c| c.timestamp);
    if candles.len() != before {
        debug!(
            dropped = before - candles.len(),
            "dropped duplicate candle timestamps"
        );
    }
    candles
}

/// Validate candle data: sane OHLC and strictly increasing timestamps.
///
/// Reports the first offending candle.
pub fn validate_candles(candles: &[Candle]) -> Result<(), DataError> {
    for (i, candle) in candles.iter().enumerate() {
        if !candle.is_sane() {
            return Err(DataError::ValidationFailed(format!(
                "candle {i} (timestamp {}) fails OHLC sanity check",
                candle.timestamp
            )));
        }
        if i > 0 && candle.timestamp <= candles[i - 1].timestamp {
            return Err(DataError::ValidationFailed(format!(
                "candle {i} timestamp {} is not after {}",
                candle.timestamp,
                candles[i - 1].timestamp
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(ts: i64, close: f64) -> Candle {
        Candle::new(ts, close, close + 1.0, close - 1.0, close, 1000.0)
    }

    #[test]
    fn test_canonicalize_sorts_data() {
        let sorted = canonicalize_candles(vec![candle(3, 1.0), candle(1, 2.0), candle(2, 3.0)]);
        let timestamps: Vec<i64> = sorted.iter().map(|c| c.timestamp).collect();
        assert_eq!(timestamps, vec![1, 2, 3]);
    }

    #[test]
    fn test_canonicalize_removes_duplicates() {
        let out = canonicalize_candles(vec![candle(1, 100.0), candle(1, 101.0), candle(2, 102.0)]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].close, 100.0);
    }

    #[test]
    fn test_validate_accepts_clean_data() {
        assert!(validate_candles(&[candle(1, 10.0), candle(2, 11.0)]).is_ok());
        assert!(validate_candles(&[]).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_order() {
        let err = validate_candles(&[candle(2, 10.0), candle(2, 11.0)]).unwrap_err();
        assert!(err.to_string().contains("candle 1"), "{err}");
    }

    #[test]
    fn test_validate_rejects_insane_candle() {
        let mut bad = candle(2, 10.0);
        bad.low = 12.0;
        assert!(matches!(
            validate_candles(&[candle(1, 10.0), bad]),
            Err(DataError::ValidationFailed(_))
        ));
    }
}
