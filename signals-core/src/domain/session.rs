//! Trading session definition: local open/close wall-clock times and the
//! exchange timezone.

use chrono::{NaiveTime, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid session time '{0}' (expected HH:MM, 00:00-23:59)")]
    InvalidTime(String),

    #[error("unknown timezone '{0}' (expected an IANA zone id such as America/New_York)")]
    UnknownTimezone(String),
}

/// Wall-clock minute of the day, written `HH:MM`.
///
/// Ordering is chronological, so session bounds compare the same way the
/// zero-padded strings would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionTime {
    hour: u8,
    minute: u8,
}

impl SessionTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, SessionError> {
        if hour > 23 || minute > 59 {
            return Err(SessionError::InvalidTime(format!("{hour}:{minute}")));
        }
        Ok(Self { hour, minute })
    }

    /// Truncate a local time to its minute.
    pub fn from_time(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl FromStr for SessionTime {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SessionError::InvalidTime(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(h) || !two_digits(m) {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl fmt::Display for SessionTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for SessionTime {
    type Error = SessionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SessionTime> for String {
    fn from(value: SessionTime) -> Self {
        value.to_string()
    }
}

/// Local trading window of an exchange.
///
/// `open > close` describes a session that runs through midnight
/// (e.g. 20:00 to 16:30 the next day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingSession {
    pub open: SessionTime,
    pub close: SessionTime,
    pub timezone: Tz,
}

impl TradingSession {
    pub fn new(open: &str, close: &str, timezone: &str) -> Result<Self, SessionError> {
        let timezone: Tz = timezone
            .parse()
            .map_err(|_| SessionError::UnknownTimezone(timezone.to_string()))?;
        Ok(Self {
            open: open.parse()?,
            close: close.parse()?,
            timezone,
        })
    }

    pub fn wraps_midnight(&self) -> bool {
        self.open > self.close
    }
}

impl fmt::Display for TradingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} {}", self.open, self.close, self.timezone)
    }
}
