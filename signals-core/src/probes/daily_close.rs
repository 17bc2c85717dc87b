//! Daily close digest: previous close, latest close and daily return for a
//! list of tickers, sent as one message.

use super::ProbeError;
use crate::data::BarSource;
use crate::domain::bar::canonicalize;
use crate::domain::Bar;
use crate::notify::{message, Notifier};
use chrono::{Duration, NaiveDate};

/// Calendar days requested per ticker; enough to span a long weekend.
const LOOKBACK_DAYS: i64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyClose {
    pub ticker: String,
    pub prev_close: f64,
    pub latest_close: f64,
    /// Date of the latest close.
    pub date: NaiveDate,
}

impl DailyClose {
    /// Last two closes of the series. Days without a close are ignored.
    pub fn from_bars(ticker: &str, bars: &[Bar]) -> Result<Self, ProbeError> {
        let bars: Vec<Bar> = canonicalize(bars)
            .into_iter()
            .filter(Bar::has_close)
            .collect();
        match bars.as_slice() {
            [.., prev, latest] => Ok(Self {
                ticker: ticker.to_string(),
                prev_close: prev.close,
                latest_close: latest.close,
                date: latest.date,
            }),
            _ => Err(ProbeError::InsufficientData {
                ticker: ticker.to_string(),
            }),
        }
    }

    /// `(latest - prev) / prev * 100`
    pub fn return_pct(&self) -> f64 {
        (self.latest_close - self.prev_close) / self.prev_close * 100.0
    }
}

#[derive(Debug)]
pub struct DailyCloseReport {
    /// One entry per requested ticker, in request order.
    pub results: Vec<(String, Result<DailyClose, ProbeError>)>,
    pub message: String,
}

impl DailyCloseReport {
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_err()).count()
    }
}

pub fn fetch_daily_close(
    source: &dyn BarSource,
    ticker: &str,
    today: NaiveDate,
) -> Result<DailyClose, ProbeError> {
    let bars = source.fetch(ticker, today - Duration::days(LOOKBACK_DAYS), today)?;
    DailyClose::from_bars(ticker, &bars)
}

/// Fetch every ticker in turn and send the digest.
///
/// A failing ticker becomes an error line; it never aborts the batch. Only a
/// delivery failure is returned as an error.
pub fn run_daily_close(
    source: &dyn BarSource,
    notifier: Notifier<'_>,
    tickers: &[String],
    today: NaiveDate,
) -> Result<DailyCloseReport, ProbeError> {
    let mut date = None;
    let mut lines = Vec::with_capacity(tickers.len());
    let mut results = Vec::with_capacity(tickers.len());

    for ticker in tickers {
        let result = fetch_daily_close(source, ticker, today);
        match &result {
            Ok(close) => {
                date.get_or_insert(close.date);
                tracing::info!(
                    ticker = %ticker,
                    prev = close.prev_close,
                    close = close.latest_close,
                    return_pct = close.return_pct(),
                    "daily close"
                );
                lines.push(message::daily_close_line(close));
            }
            Err(e) => {
                tracing::error!(ticker = %ticker, error = %e, "daily close failed");
                lines.push(message::daily_close_error_line(ticker, e));
            }
        }
        results.push((ticker.clone(), result));
    }

    let message = message::daily_close_digest(date, &lines);
    notifier.send(&message)?;

    Ok(DailyCloseReport { results, message })
}
