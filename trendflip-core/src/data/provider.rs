//! Candle source trait and an offline replay implementation.
//!
//! The CandleSource trait abstracts over where candle windows come from (an
//! exchange REST endpoint, a websocket buffer, a CSV replay) so the cycle
//! driver can be run against mocks and recorded data.

use crate::data::DataError;
use crate::domain::Candle;

/// Supplies the trailing candle window for a symbol, ascending by timestamp.
pub trait CandleSource {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch up to `limit` most recent `interval` candles for `symbol`.
    ///
    /// `interval` is spelled the way the exchange spells it ("1", "5", "60", ...).
    fn fetch(
        &mut self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, DataError>;
}

/// Replays a recorded candle history one candle per fetch.
///
/// Each call to `fetch` reveals one more candle and returns the trailing
/// `limit` candles up to that point, the way a poller would see the market
/// advance between cycles.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    symbol: String,
    interval: Option<String>,
    history: Vec<Candle>,
    revealed: usize,
}

impl ReplaySource {
    pub fn new(symbol: impl Into<String>, history: Vec<Candle>) -> Self {
        Self {
            symbol: symbol.into(),
            interval: None,
            history,
            revealed: 0,
        }
    }

    /// Only serve fetches for `interval`, the interval the history was recorded at.
    pub fn with_interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(interval.into());
        self
    }

    /// Make the first fetch reveal `count` candles at once instead of one.
    pub fn starting_with(mut self, count: usize) -> Self {
        self.revealed = count
            .saturating_sub(1)
            .min(self.history.len().saturating_sub(1));
        self
    }

    /// Candles not yet revealed.
    pub fn remaining(&self) -> usize {
        self.history.len() - self.revealed
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

impl CandleSource for ReplaySource {
    fn name(&self) -> &str {
        "replay"
    }

    fn fetch(
        &mut self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, DataError> {
        if symbol != self.symbol {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if let Some(recorded) = &self.interval {
            if recorded != interval {
                return Err(DataError::FetchFailed(format!(
                    "history recorded at interval {recorded}, requested {interval}"
                )));
            }
        }
        if self.is_exhausted() {
            return Err(DataError::SourceExhausted);
        }
        self.revealed += 1;
        let start = self.revealed.saturating_sub(limit);
        Ok(self.history[start..self.revealed].to_vec())
    }
}
