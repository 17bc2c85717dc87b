//! SMA crossover engine.
//!
//! Turns a daily bar series, a trading session and the previously persisted
//! state into a new state plus the numbers a notification needs. The engine
//! holds no state between calls: identical inputs give identical outcomes.

pub mod hysteresis;

pub use hysteresis::{next_state, ToleranceBand};

use crate::clock;
use crate::domain::bar::canonicalize;
use crate::domain::{Bar, CrossoverState, InvalidStateError, TradingSession};
use crate::indicators::{Indicator, Sma};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrossoverError {
    #[error("not enough data to compute the {required}-day SMA ({available} usable bars)")]
    InsufficientData { required: usize, available: usize },

    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Everything the engine needs besides the bars and the previous state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossoverParams {
    /// Number of trailing trading days in the SMA.
    pub lookback: usize,
    pub session: TradingSession,
    pub tolerance: ToleranceBand,
}

/// Result of one evaluation. `new_state` is what the caller persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossoverOutcome {
    pub previous_state: CrossoverState,
    pub new_state: CrossoverState,
    pub changed: bool,
    pub price: f64,
    pub sma: f64,
    /// `(price / sma - 1) * 100`
    pub deviation_pct: f64,
    pub as_of_date: NaiveDate,
}

/// Longest SMA accepted, in trading days (about forty years of sessions).
pub const MAX_LOOKBACK: usize = 10_000;

#[derive(Debug, Clone)]
pub struct CrossoverEngine {
    params: CrossoverParams,
    sma: Sma,
}

impl CrossoverEngine {
    pub fn new(params: CrossoverParams) -> Result<Self, CrossoverError> {
        if params.lookback > MAX_LOOKBACK {
            return Err(CrossoverError::InvalidParameter(format!(
                "lookback must be at most {MAX_LOOKBACK} days, got {}",
                params.lookback
            )));
        }
        let sma = Sma::new(params.lookback)
            .map_err(|e| CrossoverError::InvalidParameter(e.to_string()))?;
        Ok(Self { params, sma })
    }

    pub fn params(&self) -> &CrossoverParams {
        &self.params
    }

    /// Evaluate at a given instant.
    ///
    /// `now` decides whether the session is open, in which case the bar for
    /// the exchange's current date is still forming and is dropped before the
    /// price and SMA are read.
    pub fn evaluate(
        &self,
        bars: &[Bar],
        previous_state: CrossoverState,
        now: DateTime<Utc>,
    ) -> Result<CrossoverOutcome, CrossoverError> {
        let lookback = self.params.lookback;
        let usable = self.usable_bars(bars, now);

        if usable.len() < lookback {
            return Err(CrossoverError::InsufficientData {
                required: lookback,
                available: usable.len(),
            });
        }

        // A missing or non-positive close leaves the window incomplete.
        let window = &usable[usable.len() - lookback..];
        let complete = window.iter().filter(|b| b.has_close()).count();
        if complete < lookback {
            return Err(CrossoverError::InsufficientData {
                required: lookback,
                available: complete,
            });
        }

        let sma = self
            .sma
            .compute(&usable)
            .last()
            .copied()
            .unwrap_or(f64::NAN);

        // Non-empty: lookback >= 1 and usable.len() >= lookback.
        let latest = &window[window.len() - 1];
        let price = latest.close;
        let new_state = next_state(previous_state, price, sma, &self.params.tolerance);

        let outcome = CrossoverOutcome {
            previous_state,
            new_state,
            changed: new_state != previous_state,
            price,
            sma,
            deviation_pct: (price / sma - 1.0) * 100.0,
            as_of_date: latest.date,
        };

        tracing::info!(
            price = outcome.price,
            sma = outcome.sma,
            state = %outcome.new_state,
            changed = outcome.changed,
            deviation_pct = outcome.deviation_pct,
            "evaluated {}-day SMA crossover as of {}",
            lookback,
            outcome.as_of_date
        );
        Ok(outcome)
    }

    /// Same as [`evaluate`](Self::evaluate) with the state given as the raw
    /// string a scheduler persisted (`None` on the first run).
    pub fn evaluate_persisted(
        &self,
        bars: &[Bar],
        previous_state: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<CrossoverOutcome, CrossoverError> {
        let previous = CrossoverState::from_persisted(previous_state)?;
        self.evaluate(bars, previous, now)
    }

    pub fn evaluate_now(
        &self,
        bars: &[Bar],
        previous_state: CrossoverState,
    ) -> Result<CrossoverOutcome, CrossoverError> {
        self.evaluate(bars, previous_state, Utc::now())
    }

    /// Sorted, de-duplicated bars with the in-progress day removed while the
    /// session is open.
    fn usable_bars(&self, bars: &[Bar], now: DateTime<Utc>) -> Vec<Bar> {
        let mut bars = canonicalize(bars);
        let session = &self.params.session;

        if clock::is_open(session, now) {
            let today = clock::local_date(session, now);
            let before = bars.len();
            bars.retain(|b| b.date < today);
            tracing::info!(
                dropped = before - bars.len(),
                "excluding the current trading day ({today}) as the market is open"
            );
        }
        tracing::debug!(usable = bars.len(), "bars available for the SMA");
        bars
    }
}
