//! Domain types for trendflip

pub mod candle;
pub mod signal;

pub use candle::Candle;
pub use signal::{Direction, OrderSide, TrendSignal};

/// Symbol type alias
pub type Symbol = String;
