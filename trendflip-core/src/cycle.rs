//! One polling cycle: fetch window → ATR → Supertrend → last point → tracker → sink.
//!
//! ATR and Supertrend are recomputed over the whole fetched window on every
//! cycle. The only state carried between cycles is the tracker's last
//! direction.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{ConfigError, TraderConfig, DEFAULT_INTERVAL};
use crate::data::{canonicalize_candles, CandleSource, DataError};
use crate::domain::{Candle, Direction, OrderSide, TrendSignal};
use crate::error::IndicatorError;
use crate::indicators::{supertrend, SupertrendParams, SupertrendPoint};
use crate::signals::TrendTracker;

/// Failure reported by a signal sink (order placement, notification, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SinkError(pub String);

#[derive(Debug, Error)]
pub enum CycleError {
    #[error("candle fetch failed: {0}")]
    Fetch(#[from] DataError),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),

    #[error("signal delivery failed: {0}")]
    Sink(#[from] SinkError),
}

/// A flip signal with the context an order collaborator needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub symbol: String,
    /// Open time (epoch ms) of the candle that produced the flip.
    pub timestamp: i64,
    pub direction: Direction,
    pub side: OrderSide,
    /// Supertrend value at the flip.
    pub value: f64,
    pub close: f64,
}

impl SignalEvent {
    fn new(symbol: &str, signal: TrendSignal, point: &SupertrendPoint, candle: &Candle) -> Self {
        Self {
            symbol: symbol.to_string(),
            timestamp: candle.timestamp,
            direction: signal.direction,
            side: signal.side(),
            value: point.value,
            close: candle.close,
        }
    }
}

/// Receives flip signals. Sizing and order submission are the sink's business.
pub trait SignalSink {
    fn deliver(&mut self, event: &SignalEvent) -> Result<(), SinkError>;
}

/// What a successful cycle did.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// First observation: direction recorded, nothing emitted.
    Initialized(Direction),
    Unchanged(Direction),
    Flipped(SignalEvent),
}

impl CycleOutcome {
    pub fn event(&self) -> Option<&SignalEvent> {
        match self {
            CycleOutcome::Flipped(event) => Some(event),
            _ => None,
        }
    }
}

/// Drives the per-symbol cycle. Owns the symbol's tracker.
#[derive(Debug, Clone)]
pub struct TrendCycle {
    params: SupertrendParams,
    interval: String,
    candle_limit: usize,
    tracker: TrendTracker,
}

impl TrendCycle {
    pub fn new(
        symbol: impl Into<String>,
        params: SupertrendParams,
        candle_limit: usize,
    ) -> Result<Self, IndicatorError> {
        params.validate()?;
        if candle_limit < params.min_candles() {
            return Err(IndicatorError::InvalidParameters(format!(
                "candle limit {candle_limit} cannot seed period {}",
                params.period
            )));
        }
        Ok(Self {
            params,
            interval: DEFAULT_INTERVAL.to_string(),
            candle_limit,
            tracker: TrendTracker::new(symbol),
        })
    }

    /// Candle interval requested from the source on every fetch.
    pub fn with_interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = interval.into();
        self
    }

    pub fn from_config(config: &TraderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let cycle = Self::new(
            config.symbol.clone(),
            config.supertrend,
            config.candle_limit,
        )?;
        Ok(cycle.with_interval(config.interval.clone()))
    }

    pub fn symbol(&self) -> &str {
        self.tracker.symbol()
    }

    pub fn interval(&self) -> &str {
        &self.interval
    }

    pub fn params(&self) -> &SupertrendParams {
        &self.params
    }

    pub fn tracker(&self) -> &TrendTracker {
        &self.tracker
    }

    /// Recompute the Supertrend over `candles` and feed the last point to the tracker.
    pub fn evaluate(&mut self, candles: &[Candle]) -> Result<Option<TrendSignal>, IndicatorError> {
        let point = latest_point(candles, &self.params)?;
        self.tracker.observe(Some(&point))
    }

    /// Run one full cycle against a candle source and a signal sink.
    ///
    /// A failed fetch leaves the tracker untouched. A failed delivery restores
    /// the tracker to its pre-cycle direction, so the next cycle detects the
    /// same flip and delivers again.
    pub fn run_once(
        &mut self,
        source: &mut dyn CandleSource,
        sink: &mut dyn SignalSink,
    ) -> Result<CycleOutcome, CycleError> {
        let symbol = self.tracker.symbol().to_string();
        let candles = source
            .fetch(&symbol, &self.interval, self.candle_limit)
            .map_err(|e| {
                warn!(
                    symbol = %symbol,
                    interval = %self.interval,
                    source = source.name(),
                    error = %e,
                    "candle fetch failed"
                );
                e
            })?;
        let candles = canonicalize_candles(candles);

        let point = latest_point(&candles, &self.params)?;
        let before = self.tracker.last_direction();
        let signal = self.tracker.observe(Some(&point))?;

        let Some(signal) = signal else {
            let direction = point.direction();
            return Ok(match before {
                None => CycleOutcome::Initialized(direction),
                Some(_) => CycleOutcome::Unchanged(direction),
            });
        };

        // `latest_point` succeeded, so the window is non-empty.
        let last = &candles[candles.len() - 1];
        let event = SignalEvent::new(&symbol, signal, &point, last);
        if let Err(e) = sink.deliver(&event) {
            warn!(symbol = %symbol, side = %event.side, error = %e, "signal delivery failed");
            self.tracker.restore(before);
            return Err(e.into());
        }
        Ok(CycleOutcome::Flipped(event))
    }
}

fn latest_point(
    candles: &[Candle],
    params: &SupertrendParams,
) -> Result<SupertrendPoint, IndicatorError> {
    let series = supertrend(candles, params)?;
    let point = series
        .last()
        .copied()
        .flatten()
        .ok_or(IndicatorError::UndefinedPoint)?;
    debug!(
        candles = candles.len(),
        value = point.value,
        trend_up = point.trend_up,
        "supertrend recomputed"
    );
    Ok(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_hlc_candles;

    fn worked_candles() -> Vec<Candle> {
        make_hlc_candles(&[
            (10.0, 8.0, 9.0),
            (11.0, 9.0, 10.0),
            (12.0, 10.0, 11.0),
            (13.0, 9.0, 10.0),
        ])
    }

    #[test]
    fn evaluate_first_call_is_silent() {
        let params = SupertrendParams::new(1, 1.0).unwrap();
        let mut cycle = TrendCycle::new("TEST", params, 4).unwrap();
        assert_eq!(cycle.evaluate(&worked_candles()), Ok(None));
        assert_eq!(cycle.tracker().last_direction(), Some(true));
    }

    #[test]
    fn evaluate_insufficient_data_keeps_tracker_unobserved() {
        let mut cycle = TrendCycle::new("TEST", SupertrendParams::default(), 100).unwrap();
        assert!(matches!(
            cycle.evaluate(&worked_candles()),
            Err(IndicatorError::InsufficientData { .. })
        ));
        assert!(!cycle.tracker().is_initialized());
    }

    #[test]
    fn rejects_window_that_cannot_seed() {
        assert!(matches!(
            TrendCycle::new("TEST", SupertrendParams::default(), 10),
            Err(IndicatorError::InvalidParameters(_))
        ));
    }

    #[test]
    fn from_config_uses_symbol_and_params() {
        let config = TraderConfig {
            interval: "15".into(),
            ..TraderConfig::default()
        };
        let cycle = TrendCycle::from_config(&config).unwrap();
        assert_eq!(cycle.symbol(), "SOLUSDT");
        assert_eq!(cycle.interval(), "15");
        assert_eq!(cycle.params(), &SupertrendParams::default());
    }

    #[test]
    fn outcome_event_accessor() {
        assert_eq!(CycleOutcome::Unchanged(Direction::Up).event(), None);
    }
}
