//! trendflip CLI: compute Supertrend series and replay flip signals.
//!
//! Commands:
//! - `compute`: print per-candle ATR and Supertrend for a CSV candle file
//! - `replay`: run the polling cycle once per candle over a CSV file, printing each flip
//!   (`--follow` sleeps the configured poll interval between cycles)
//! - `check-config`: load and validate a trader TOML config

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use trendflip_core::data::{canonicalize_candles, read_candles_file, validate_candles, ReplaySource};
use trendflip_core::{
    compute_atr, compute_supertrend, Candle, CycleError, CycleOutcome, IndicatorError, SignalEvent,
    SignalSink, SinkError, SupertrendParams, TraderConfig, TrendCycle,
};

#[derive(Parser)]
#[command(
    name = "trendflip",
    about = "trendflip CLI: Supertrend flip detection over candle files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Supertrend parameter overrides shared by subcommands.
#[derive(clap::Args)]
struct ParamArgs {
    /// ATR / Supertrend period. Defaults to the config value (10).
    #[arg(long)]
    period: Option<usize>,

    /// Band multiplier. Defaults to the config value (3.0).
    #[arg(long)]
    multiplier: Option<f64>,
}

impl ParamArgs {
    fn apply(&self, params: &mut SupertrendParams) {
        if let Some(period) = self.period {
            params.period = period;
        }
        if let Some(multiplier) = self.multiplier {
            params.multiplier = multiplier;
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ATR and Supertrend series for a candle CSV file.
    Compute {
        /// CSV file with timestamp,open,high,low,close,volume columns.
        #[arg(long)]
        csv: PathBuf,

        #[command(flatten)]
        params: ParamArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Reject files with insane OHLC rows or out-of-order timestamps.
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Replay a candle CSV file through the polling cycle, one candle per cycle.
    Replay {
        /// CSV file with timestamp,open,high,low,close,volume columns.
        #[arg(long)]
        csv: PathBuf,

        /// Trader TOML config. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Symbol override.
        #[arg(long)]
        symbol: Option<String>,

        /// Candle interval override ("1", "5", ...).
        #[arg(long)]
        interval: Option<String>,

        /// Candles fetched per cycle.
        #[arg(long)]
        limit: Option<usize>,

        /// Sleep the configured poll interval between cycles, like a live poller.
        #[arg(long, default_value_t = false)]
        follow: bool,

        #[command(flatten)]
        params: ParamArgs,

        /// Reject files with insane OHLC rows or out-of-order timestamps.
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Load and validate a trader TOML config, then print it.
    CheckConfig {
        /// Path to the TOML config file.
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            csv,
            params,
            format,
            strict,
        } => run_compute(&csv, &params, format, strict),
        Commands::Replay {
            csv,
            config,
            symbol,
            interval,
            limit,
            follow,
            params,
            strict,
        } => run_replay(
            &csv,
            config.as_deref(),
            ConfigOverrides {
                symbol,
                interval,
                limit,
            },
            &params,
            ReplayMode { follow, strict },
        ),
        Commands::CheckConfig { config } => run_check_config(&config),
    }
}

fn load_candles(path: &Path, strict: bool) -> Result<Vec<Candle>> {
    let raw = read_candles_file(path)
        .with_context(|| format!("failed to read candles from {}", path.display()))?;
    let candles = if strict {
        validate_candles(&raw)?;
        raw
    } else {
        canonicalize_candles(raw)
    };
    info!(path = %path.display(), candles = candles.len(), "loaded candles");
    Ok(candles)
}

#[derive(Serialize)]
struct SeriesRow {
    timestamp: i64,
    #[serde(skip)]
    open_time: Option<DateTime<Utc>>,
    close: f64,
    atr: Option<f64>,
    supertrend: Option<f64>,
    trend_up: Option<bool>,
}

fn run_compute(path: &Path, args: &ParamArgs, format: OutputFormat, strict: bool) -> Result<()> {
    let mut params = SupertrendParams::default();
    args.apply(&mut params);
    params.validate()?;

    let candles = load_candles(path, strict)?;
    let atr = compute_atr(&candles, params.period)?;
    let st = compute_supertrend(&candles, &atr, params.period, params.multiplier)?;

    let rows: Vec<SeriesRow> = candles
        .iter()
        .zip(&atr)
        .zip(&st)
        .map(|((candle, atr), point)| SeriesRow {
            timestamp: candle.timestamp,
            open_time: candle.open_time(),
            close: candle.close,
            atr: *atr,
            supertrend: point.map(|p| p.value),
            trend_up: point.map(|p| p.trend_up),
        })
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &rows)?;
            writeln!(out)?;
        }
        OutputFormat::Table => print_table(&mut out, &rows)?,
    }
    Ok(())
}

fn print_table(out: &mut impl Write, rows: &[SeriesRow]) -> Result<()> {
    writeln!(
        out,
        "{:<20} {:>12} {:>12} {:>12} {:>6}",
        "time", "close", "atr", "supertrend", "trend"
    )?;
    for row in rows {
        let time = row
            .open_time
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| row.timestamp.to_string());
        let num = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"));
        let trend = match row.trend_up {
            Some(true) => "up",
            Some(false) => "down",
            None => "-",
        };
        writeln!(
            out,
            "{:<20} {:>12.4} {:>12} {:>12} {:>6}",
            time,
            row.close,
            num(row.atr),
            num(row.supertrend),
            trend
        )?;
    }
    Ok(())
}

/// Writes each flip as one JSON line on stdout.
struct JsonLinesSink<W: Write> {
    out: W,
    order_fraction: f64,
    delivered: usize,
}

#[derive(Serialize)]
struct SignalLine<'a> {
    #[serde(flatten)]
    event: &'a SignalEvent,
    order_fraction: f64,
}

impl<W: Write> SignalSink for JsonLinesSink<W> {
    fn deliver(&mut self, event: &SignalEvent) -> Result<(), SinkError> {
        let line = SignalLine {
            event,
            order_fraction: self.order_fraction,
        };
        serde_json::to_writer(&mut self.out, &line).map_err(|e| SinkError(e.to_string()))?;
        writeln!(self.out).map_err(|e| SinkError(e.to_string()))?;
        self.delivered += 1;
        Ok(())
    }
}

/// Command-line values that replace their config-file counterparts.
struct ConfigOverrides {
    symbol: Option<String>,
    interval: Option<String>,
    limit: Option<usize>,
}

struct ReplayMode {
    follow: bool,
    strict: bool,
}

fn run_replay(
    path: &Path,
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
    args: &ParamArgs,
    mode: ReplayMode,
) -> Result<()> {
    let mut config = match config_path {
        Some(p) => TraderConfig::load(p)?,
        None => TraderConfig::default(),
    };
    if let Some(symbol) = overrides.symbol {
        config.symbol = symbol;
    }
    if let Some(interval) = overrides.interval {
        config.interval = interval;
    }
    if let Some(limit) = overrides.limit {
        config.candle_limit = limit;
    }
    args.apply(&mut config.supertrend);
    config.validate()?;

    let candles = load_candles(path, mode.strict)?;
    if candles.len() < config.supertrend.min_candles() {
        bail!(
            "{} candles cannot seed period {}",
            candles.len(),
            config.supertrend.period
        );
    }

    let mut cycle = TrendCycle::from_config(&config)?;
    let mut source = ReplaySource::new(config.symbol.clone(), candles)
        .with_interval(config.interval.clone())
        .starting_with(config.supertrend.min_candles());
    let mut sink = JsonLinesSink {
        out: io::stdout().lock(),
        order_fraction: config.order_fraction,
        delivered: 0,
    };

    info!(
        symbol = %config.symbol,
        interval = %config.interval,
        poll_secs = config.poll_interval_secs,
        follow = mode.follow,
        "replay started"
    );

    let mut cycles = 0usize;
    while !source.is_exhausted() {
        if mode.follow && cycles > 0 {
            std::thread::sleep(config.poll_interval());
        }
        cycles += 1;
        match cycle.run_once(&mut source, &mut sink) {
            Ok(CycleOutcome::Flipped(_)) | Ok(CycleOutcome::Unchanged(_)) => {}
            Ok(CycleOutcome::Initialized(direction)) => {
                debug!(%direction, "initial direction");
            }
            // Windows shorter than the seed just wait for more candles.
            Err(CycleError::Indicator(IndicatorError::InsufficientData { .. })) => {}
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        symbol = %config.symbol,
        cycles,
        signals = sink.delivered,
        "replay finished"
    );
    Ok(())
}

fn run_check_config(path: &Path) -> Result<()> {
    let config = TraderConfig::load(path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
