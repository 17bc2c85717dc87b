//! Signals CLI — one-shot market probes meant to be run by a scheduler.
//!
//! Commands:
//! - `sma-crossover` — price vs. SMA crossover with a hysteresis band; prints
//!   the new state so the scheduler can pass it back on the next run
//! - `daily-close` — previous close, latest close and daily return digest

mod logging;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use signals_core::config::{ProbeFile, TelegramConfig, TELEGRAM_CHAT_ID};
use signals_core::crossover::{CrossoverParams, ToleranceBand};
use signals_core::data::{BarSource, CsvBarSource, YahooProvider};
use signals_core::domain::{CrossoverState, TradingSession};
use signals_core::notify::{ConsoleSink, Notifier, TelegramSink};
use signals_core::probes::{run_daily_close, run_sma_crossover, SmaCrossoverRequest};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "signals",
    about = "Signals CLI — scheduled market probes with Telegram alerts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect a price crossing of the N-day SMA and alert on state changes.
    SmaCrossover {
        /// Ticker symbol (e.g., SPY, DCAM.PA).
        ticker: String,

        /// Number of trading days in the SMA.
        lookback: usize,

        /// Session open, HH:MM in the exchange's timezone.
        trading_hours_open: String,

        /// Session close, HH:MM in the exchange's timezone.
        trading_hours_close: String,

        /// IANA timezone of the exchange (e.g., America/New_York).
        timezone: String,

        /// Percent above the SMA required to turn bullish.
        #[arg(long, default_value_t = 0.0)]
        upward_tolerance: f64,

        /// Percent below the SMA required to turn bearish.
        #[arg(long, default_value_t = 0.0)]
        downward_tolerance: f64,

        /// State returned by the previous run: neutral, above or below.
        #[arg(long)]
        previous_state: Option<String>,

        /// Read bars from a CSV file instead of Yahoo Finance.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// TOML file whose values override the positional arguments.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write messages to stderr instead of sending them to Telegram.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Send one message with the latest daily close of each ticker.
    DailyClose {
        /// Tickers to report (e.g., DCAM.PA SPY).
        #[arg(required = true)]
        tickers: Vec<String>,

        /// Write the digest to stderr instead of sending it to Telegram.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::SmaCrossover {
            ticker,
            lookback,
            trading_hours_open,
            trading_hours_close,
            timezone,
            upward_tolerance,
            downward_tolerance,
            previous_state,
            csv,
            config,
            dry_run,
        } => {
            let mut file = match &config {
                Some(path) => ProbeFile::from_file(path)
                    .with_context(|| format!("reading probe file {}", path.display()))?,
                None => ProbeFile::default(),
            };
            let session = match file.session.take() {
                Some(session) => session,
                None => TradingSession::new(&trading_hours_open, &trading_hours_close, &timezone)?,
            };
            let params = CrossoverParams {
                lookback: file.lookback.unwrap_or(lookback),
                session,
                tolerance: ToleranceBand::new(
                    file.upward_tolerance.unwrap_or(upward_tolerance),
                    file.downward_tolerance.unwrap_or(downward_tolerance),
                )?,
            };
            let request = SmaCrossoverRequest {
                ticker,
                params,
                previous_state: CrossoverState::from_persisted(previous_state.as_deref())?,
            };
            run_sma_crossover_cmd(&request, csv, dry_run)
        }
        Commands::DailyClose { tickers, dry_run } => run_daily_close_cmd(&tickers, dry_run),
    }
}

/// Where messages go: Telegram, or stdout with `--dry-run`.
enum Delivery {
    Telegram { sink: TelegramSink, chat_id: String },
    DryRun { sink: ConsoleSink, chat_id: String },
}

impl Delivery {
    fn from_env(dry_run: bool) -> Result<Self> {
        if dry_run {
            let chat_id = std::env::var(TELEGRAM_CHAT_ID).unwrap_or_else(|_| "dry-run".into());
            return Ok(Self::DryRun {
                sink: ConsoleSink::stderr(),
                chat_id,
            });
        }
        let config = TelegramConfig::from_env()?;
        let sink = TelegramSink::new(config.bot_token)?;
        Ok(Self::Telegram {
            sink,
            chat_id: config.chat_id,
        })
    }

    fn notifier(&self) -> Notifier<'_> {
        match self {
            Self::Telegram { sink, chat_id } => Notifier::new(sink, chat_id),
            Self::DryRun { sink, chat_id } => Notifier::new(sink, chat_id),
        }
    }
}

fn run_sma_crossover_cmd(
    request: &SmaCrossoverRequest,
    csv: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let delivery = Delivery::from_env(dry_run)?;

    let source: Box<dyn BarSource> = match csv {
        Some(path) => Box::new(CsvBarSource::new(path)),
        None => Box::new(YahooProvider::new()?),
    };

    let report = run_sma_crossover(source.as_ref(), delivery.notifier(), request, Utc::now())
        .with_context(|| format!("SMA crossover probe failed for {}", request.ticker))?;

    println!("{}", report.outcome.new_state);
    Ok(())
}

fn run_daily_close_cmd(tickers: &[String], dry_run: bool) -> Result<()> {
    let delivery = Delivery::from_env(dry_run)?;
    let provider = YahooProvider::new()?;
    let today = Utc::now().date_naive();

    let report = run_daily_close(&provider, delivery.notifier(), tickers, today)?;

    if report.failed() > 0 {
        tracing::warn!(
            failed = report.failed(),
            total = tickers.len(),
            "some tickers could not be reported"
        );
    }
    Ok(())
}
