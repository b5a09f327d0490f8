//! Candle ingestion, canonicalization, and sources

pub mod canonicalize;
pub mod ingest;
pub mod provider;

pub use canonicalize::{canonicalize_candles, validate_candles};
pub use ingest::{read_candles, read_candles_file, DataError};
pub use provider::{CandleSource, ReplaySource};
