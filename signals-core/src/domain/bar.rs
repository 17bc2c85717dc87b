//! Bar: one trading day of market data for a single symbol.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLCV bar.
///
/// The crossover engine only reads `date` and `close`; the remaining columns are
/// carried so that every data source yields the same shape. A close the provider
/// did not report is stored as `f64::NAN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adj_close: f64,
}

impl Bar {
    /// Bar carrying only a close, with OHLC collapsed onto it.
    pub fn from_close(symbol: impl Into<String>, date: NaiveDate, close: f64) -> Self {
        Self {
            symbol: symbol.into(),
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
            adj_close: close,
        }
    }

    /// True when the provider reported a usable close for this day.
    pub fn has_close(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}

/// Sort bars ascending by date and collapse duplicate dates, keeping the last
/// occurrence (providers re-send the latest day while it is still trading).
pub fn canonicalize(bars: &[Bar]) -> Vec<Bar> {
    let mut sorted = bars.to_vec();
    // Stable sort keeps the arrival order within a date.
    sorted.sort_by_key(|b| b.date);

    let mut out: Vec<Bar> = Vec::with_capacity(sorted.len());
    for bar in sorted {
        match out.last_mut() {
            Some(last) if last.date == bar.date => *last = bar,
            _ => out.push(bar),
        }
    }
    out
}
