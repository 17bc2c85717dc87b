//! Indicators computed over a daily bar series.
//!
//! Indicators are pure functions: bar history in, numeric series out. The
//! crossover probe only needs the SMA, but the trait keeps the engine
//! independent of which average is plugged in.

pub mod sma;

pub use sma::Sma;

use crate::domain::Bar;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("{0} period must be >= 1")]
    ZeroPeriod(&'static str),
}

/// Series indicator.
///
/// `compute` returns a vector the same length as `bars`; the first
/// `lookback()` values are `f64::NAN` (warmup). No value at index t may depend
/// on bars after t.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g. "sma_20").
    fn name(&self) -> &str;

    /// Number of leading bars without a valid value.
    fn lookback(&self) -> usize;

    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Synthetic bars from close prices, one per calendar day from 2024-01-02.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Bar::from_close("TEST", base_date + chrono::Duration::days(i as i64), close)
        })
        .collect()
}

#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
