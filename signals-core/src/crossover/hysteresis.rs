//! Three-state hysteresis on price vs. SMA.
//!
//! Entering `Above` from `Neutral` or `Below` needs the price beyond the upper
//! band; leaving `Above` needs it at or under the lower band, not merely under
//! the SMA. Small moves straddling the average therefore never flip the state.

use crate::domain::CrossoverState;
use serde::{Deserialize, Serialize};

use super::CrossoverError;

/// Percentage bands around the SMA, applied multiplicatively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ToleranceBand {
    upward_pct: f64,
    downward_pct: f64,
}

impl ToleranceBand {
    pub fn new(upward_pct: f64, downward_pct: f64) -> Result<Self, CrossoverError> {
        for (name, value) in [("upward", upward_pct), ("downward", downward_pct)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CrossoverError::InvalidParameter(format!(
                    "{name} tolerance must be a finite percentage >= 0, got {value}"
                )));
            }
        }
        Ok(Self {
            upward_pct,
            downward_pct,
        })
    }

    pub fn upward_pct(&self) -> f64 {
        self.upward_pct
    }

    pub fn downward_pct(&self) -> f64 {
        self.downward_pct
    }

    /// Price level the close must cross to enter `Above`.
    pub fn upper(&self, sma: f64) -> f64 {
        sma * (1.0 + self.upward_pct / 100.0)
    }

    /// Price level the close must cross to enter `Below`.
    pub fn lower(&self, sma: f64) -> f64 {
        sma * (1.0 - self.downward_pct / 100.0)
    }
}

/// Derive the new state from the previous one and the latest price/SMA pair.
///
/// From `Neutral` both bounds are strict. From a settled state the flip bound
/// is inclusive: a price exactly on the opposite band flips.
pub fn next_state(
    previous: CrossoverState,
    price: f64,
    sma: f64,
    band: &ToleranceBand,
) -> CrossoverState {
    let upper = band.upper(sma);
    let lower = band.lower(sma);

    match previous {
        CrossoverState::Neutral => {
            if price > upper {
                CrossoverState::Above
            } else if price < lower {
                CrossoverState::Below
            } else {
                CrossoverState::Neutral
            }
        }
        CrossoverState::Above => {
            if price <= lower {
                CrossoverState::Below
            } else {
                CrossoverState::Above
            }
        }
        CrossoverState::Below => {
            if price >= upper {
                CrossoverState::Above
            } else {
                CrossoverState::Below
            }
        }
    }
}
