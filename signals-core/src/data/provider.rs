//! Bar source trait and structured error types.
//!
//! `BarSource` abstracts over where daily bars come from (Yahoo Finance, a CSV
//! export) so probes can be run offline and tested with in-memory fakes.

use crate::domain::Bar;
use chrono::NaiveDate;
use thiserror::Error;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("provider refused the request: {0}")]
    AccessDenied(String),

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("csv error: {0}")]
    Csv(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Source of daily bars for one symbol.
///
/// Implementations return whatever the source holds for `[start, end]`;
/// ordering and de-duplication are the consumer's job.
pub trait BarSource {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Bar>, DataError>;
}

impl<T: BarSource + ?Sized> BarSource for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Bar>, DataError> {
        (**self).fetch(symbol, start, end)
    }
}

/// Bars held in memory, keyed by nothing: every symbol gets the same series
/// restamped with the requested symbol. For callers that already hold bars.
#[derive(Debug, Clone, Default)]
pub struct StaticBarSource {
    bars: Vec<Bar>,
}

impl StaticBarSource {
    pub fn new(bars: Vec<Bar>) -> Self {
        Self { bars }
    }
}

impl BarSource for StaticBarSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Bar>, DataError> {
        let bars: Vec<Bar> = self
            .bars
            .iter()
            .filter(|b| b.date >= start && b.date <= end)
            .map(|b| Bar {
                symbol: symbol.to_string(),
                ..b.clone()
            })
            .collect();
        if bars.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        Ok(bars)
    }
}
