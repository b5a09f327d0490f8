//! CSV candle ingestion.
//!
//! Expected header: `timestamp,open,high,low,close,volume` with the timestamp in
//! epoch milliseconds. Extra columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::domain::Candle;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("ingest failed: {0}")]
    IngestFailed(String),

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("candle source exhausted")]
    SourceExhausted,

    #[error("fetch failed: {0}")]
    FetchFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: f64,
}

impl From<CsvRow> for Candle {
    fn from(row: CsvRow) -> Self {
        Candle::new(row.timestamp, row.open, row.high, row.low, row.close, row.volume)
    }
}

/// Read candles from any CSV reader, in file order.
pub fn read_candles<R: Read>(reader: R) -> Result<Vec<Candle>, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let candles = rdr
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(i, row)| {
            row.map(Candle::from)
                .map_err(|e| DataError::IngestFailed(format!("row {}: {e}", i + 1)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(candles)
}

/// Read candles from a CSV file on disk.
pub fn read_candles_file(path: &Path) -> Result<Vec<Candle>, DataError> {
    let file = File::open(path)?;
    read_candles(file)
}
