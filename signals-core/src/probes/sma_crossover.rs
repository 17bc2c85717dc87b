//! Price vs. SMA crossover probe for a single ticker.

use super::ProbeError;
use crate::clock;
use crate::crossover::{CrossoverEngine, CrossoverOutcome, CrossoverParams};
use crate::data::BarSource;
use crate::domain::CrossoverState;
use crate::notify::{message, Notifier};
use chrono::{DateTime, Duration, Utc};

/// Calendar days always requested, however short the lookback.
const MIN_FETCH_DAYS: i64 = 10;

#[derive(Debug, Clone)]
pub struct SmaCrossoverRequest {
    pub ticker: String,
    pub params: CrossoverParams,
    pub previous_state: CrossoverState,
}

#[derive(Debug, Clone)]
pub struct SmaCrossoverReport {
    pub outcome: CrossoverOutcome,
    /// The alert that was delivered, if the state changed.
    pub alert: Option<String>,
}

/// Run the probe at `now`.
///
/// Requests twice the lookback in calendar days so weekends and holidays still
/// leave enough trading days for the average.
pub fn run_sma_crossover(
    source: &dyn BarSource,
    notifier: Notifier<'_>,
    request: &SmaCrossoverRequest,
    now: DateTime<Utc>,
) -> Result<SmaCrossoverReport, ProbeError> {
    let engine = CrossoverEngine::new(request.params.clone())?;
    let lookback = request.params.lookback;

    let today = clock::local_date(&request.params.session, now);
    let window_days = (lookback as i64).saturating_mul(2).max(MIN_FETCH_DAYS);
    let start = today - Duration::days(window_days);

    tracing::info!(
        ticker = %request.ticker,
        source = source.name(),
        %start,
        end = %today,
        "fetching daily bars"
    );
    let bars = source.fetch(&request.ticker, start, today)?;

    let outcome = engine.evaluate(&bars, request.previous_state, now)?;

    let alert = message::crossover_alert(&request.ticker, lookback, &outcome);
    if let Some(text) = &alert {
        notifier.send(text)?;
    } else {
        tracing::info!(ticker = %request.ticker, state = %outcome.new_state, "no state change, nothing to send");
    }

    Ok(SmaCrossoverReport { outcome, alert })
}
