//! Probes: one scheduled, one-shot check each.
//!
//! A probe fetches bars through a `BarSource`, runs its computation and hands
//! any message to a `Notifier`. State the scheduler must keep is returned,
//! never stored.

pub mod daily_close;
pub mod sma_crossover;

pub use daily_close::{run_daily_close, DailyClose, DailyCloseReport};
pub use sma_crossover::{run_sma_crossover, SmaCrossoverReport, SmaCrossoverRequest};

use crate::crossover::CrossoverError;
use crate::data::DataError;
use crate::notify::NotifyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Crossover(#[from] CrossoverError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error("Insufficient data for {ticker}")]
    InsufficientData { ticker: String },
}
