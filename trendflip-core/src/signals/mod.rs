//! Signal generation: flip detection over Supertrend directions
//!
//! Signals depend on market data only. The tracker never sees balances,
//! orders, or execution results; it answers "did the trend just flip?".

pub mod tracker;

pub use tracker::TrendTracker;
