//! Simple Moving Average (SMA).
//!
//! Unweighted mean of the last `period` closes. The first `period - 1` values
//! are warmup (NaN), and any window holding a missing close is NaN as well:
//! an average is only reported when it is fully formed.

use super::{Indicator, IndicatorError};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::ZeroPeriod("sma"));
        }
        Ok(Self {
            period,
            name: format!("sma_{period}"),
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn window_mean(window: &[Bar]) -> f64 {
        if window.iter().any(|b| b.close.is_nan()) {
            return f64::NAN;
        }
        window.iter().map(|b| b.close).sum::<f64>() / window.len() as f64
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let mut result = vec![f64::NAN; bars.len()];
        for (i, window) in bars.windows(self.period).enumerate() {
            result[i + self.period - 1] = Self::window_mean(window);
        }
        result
    }
}
