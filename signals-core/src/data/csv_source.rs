//! CSV bar source for offline runs.
//!
//! Reads one symbol's daily history from a file with a header row. Both the
//! lower-case schema (`date,open,high,low,close,volume,adj_close`) and Yahoo's
//! download layout (`Date,Open,High,Low,Close,Adj Close,Volume`) are accepted.
//! Unparseable numeric cells (e.g. `null`) are read as missing.

use super::provider::{BarSource, DataError};
use crate::domain::Bar;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date")]
    date: NaiveDate,
    #[serde(alias = "Open", default, deserialize_with = "csv::invalid_option")]
    open: Option<f64>,
    #[serde(alias = "High", default, deserialize_with = "csv::invalid_option")]
    high: Option<f64>,
    #[serde(alias = "Low", default, deserialize_with = "csv::invalid_option")]
    low: Option<f64>,
    #[serde(alias = "Close", default, deserialize_with = "csv::invalid_option")]
    close: Option<f64>,
    #[serde(alias = "Volume", default, deserialize_with = "csv::invalid_option")]
    volume: Option<f64>,
    #[serde(alias = "Adj Close", default, deserialize_with = "csv::invalid_option")]
    adj_close: Option<f64>,
}

impl CsvRow {
    fn into_bar(self, symbol: &str) -> Bar {
        let close = self.close.unwrap_or(f64::NAN);
        Bar {
            symbol: symbol.to_string(),
            date: self.date,
            open: self.open.unwrap_or(f64::NAN),
            high: self.high.unwrap_or(f64::NAN),
            low: self.low.unwrap_or(f64::NAN),
            close,
            volume: self.volume.map(|v| v.max(0.0) as u64).unwrap_or(0),
            adj_close: self.adj_close.unwrap_or(close),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvBarSource {
    path: PathBuf,
}

impl CsvBarSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Every row in the file, in file order.
    pub fn read_all(&self, symbol: &str) -> Result<Vec<Bar>, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| DataError::Csv(format!("{}: {e}", self.path.display())))?;

        reader
            .deserialize::<CsvRow>()
            .map(|row| {
                row.map(|r| r.into_bar(symbol))
                    .map_err(|e| DataError::Csv(format!("{}: {e}", self.path.display())))
            })
            .collect()
    }
}

impl BarSource for CsvBarSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Bar>, DataError> {
        let bars: Vec<Bar> = self
            .read_all(symbol)?
            .into_iter()
            .filter(|b| b.date >= start && b.date <= end)
            .collect();
        tracing::debug!(symbol, path = %self.path.display(), count = bars.len(), "loaded bars from csv");
        Ok(bars)
    }
}
