//! Crossover state carried between probe invocations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Position of the close relative to its SMA, as last decided by the
/// hysteresis state machine.
///
/// `Neutral` is only a starting condition; once `Above` or `Below` has been
/// reached the machine never returns to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossoverState {
    #[default]
    Neutral,
    Above,
    Below,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid previous state '{0}' (expected neutral, above or below)")]
pub struct InvalidStateError(pub String);

impl CrossoverState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrossoverState::Neutral => "neutral",
            CrossoverState::Above => "above",
            CrossoverState::Below => "below",
        }
    }

    /// Interpret the value a scheduler persisted from the previous run.
    ///
    /// No value (first run) means `Neutral`. `null` is accepted as the same
    /// thing since schedulers commonly persist an unset variable that way.
    pub fn from_persisted(value: Option<&str>) -> Result<Self, InvalidStateError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::Neutral),
            Some(v) if v.eq_ignore_ascii_case("null") => Ok(Self::Neutral),
            Some(v) => v.parse(),
        }
    }
}

impl FromStr for CrossoverState {
    type Err = InvalidStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "neutral" => Ok(Self::Neutral),
            "above" => Ok(Self::Above),
            "below" => Ok(Self::Below),
            other => Err(InvalidStateError(other.to_string())),
        }
    }
}

impl fmt::Display for CrossoverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_states() {
        assert_eq!("neutral".parse(), Ok(CrossoverState::Neutral));
        assert_eq!("above".parse(), Ok(CrossoverState::Above));
        assert_eq!("below".parse(), Ok(CrossoverState::Below));
    }

    #[test]
    fn rejects_unknown_state() {
        assert_eq!(
            "invalid".parse::<CrossoverState>(),
            Err(InvalidStateError("invalid".into()))
        );
    }

    #[test]
    fn absent_state_defaults_to_neutral() {
        assert_eq!(CrossoverState::from_persisted(None), Ok(CrossoverState::Neutral));
        assert_eq!(CrossoverState::from_persisted(Some("")), Ok(CrossoverState::Neutral));
        assert_eq!(CrossoverState::from_persisted(Some("Null")), Ok(CrossoverState::Neutral));
        assert_eq!(CrossoverState::from_persisted(Some("above")), Ok(CrossoverState::Above));
        assert!(CrossoverState::from_persisted(Some("sideways")).is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&CrossoverState::Below).unwrap();
        assert_eq!(json, "\"below\"");
        assert!(serde_json::from_str::<CrossoverState>("\"Below\"").is_err());
    }
}
