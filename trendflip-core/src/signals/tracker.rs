//! Trend tracker: turns a stream of Supertrend directions into one-shot flip signals.

use tracing::info;

use crate::domain::{Direction, Symbol, TrendSignal};
use crate::error::IndicatorError;
use crate::indicators::SupertrendPoint;

/// Last observed direction for one symbol.
///
/// One tracker per traded symbol, owned by the caller and threaded through
/// every cycle. Never share a tracker between symbols.
///
/// # Invariants
/// - The first observation records the direction and never emits a signal.
/// - After any successful `observe`, `last_direction()` equals the observed point's direction.
/// - A signal is emitted exactly when the observed direction differs from the stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendTracker {
    symbol: Symbol,
    last_direction: Option<bool>,
}

impl TrendTracker {
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            last_direction: None,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Stored direction as the raw `trend_up` flag, `None` before the first observation.
    pub fn last_direction(&self) -> Option<bool> {
        self.last_direction
    }

    pub fn is_initialized(&self) -> bool {
        self.last_direction.is_some()
    }

    /// Put back a previously read `last_direction()`.
    ///
    /// Used to undo an observation whose signal could not be delivered, so the
    /// next cycle sees the flip again.
    pub fn restore(&mut self, last_direction: Option<bool>) {
        self.last_direction = last_direction;
    }

    /// Observe the latest Supertrend point.
    ///
    /// `None` is a point below the seed index and is rejected with
    /// `UndefinedPoint`, leaving the stored direction untouched.
    pub fn observe(
        &mut self,
        point: Option<&SupertrendPoint>,
    ) -> Result<Option<TrendSignal>, IndicatorError> {
        let point = point.ok_or(IndicatorError::UndefinedPoint)?;
        let trend_up = point.trend_up;

        match self.last_direction {
            None => {
                self.last_direction = Some(trend_up);
                info!(
                    symbol = %self.symbol,
                    direction = %Direction::from_trend_up(trend_up),
                    "trend direction initialized"
                );
                Ok(None)
            }
            Some(last) if last != trend_up => {
                self.last_direction = Some(trend_up);
                let signal = TrendSignal::new(Direction::from_trend_up(trend_up));
                info!(
                    symbol = %self.symbol,
                    direction = %signal.direction,
                    value = point.value,
                    "trend flipped"
                );
                Ok(Some(signal))
            }
            Some(_) => Ok(None),
        }
    }
}
