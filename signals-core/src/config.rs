//! Probe configuration: Telegram credentials from the environment and an
//! optional TOML file of crossover parameters.

use crate::domain::TradingSession;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {0} env var")]
    MissingEnv(&'static str),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Destination chat and bot credentials for Telegram delivery.
#[derive(Clone)]
pub struct TelegramConfig {
    pub chat_id: String,
    pub bot_token: String,
}

impl TelegramConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve both variables through `lookup`; empty values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingEnv(key))
        };
        Ok(Self {
            chat_id: get(TELEGRAM_CHAT_ID)?,
            bot_token: get(TELEGRAM_BOT_TOKEN)?,
        })
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("chat_id", &self.chat_id)
            .field("bot_token", &"<redacted>")
            .finish()
    }
}

/// Crossover parameters read from a TOML file. Every key is optional; the
/// values that are present override the command line.
///
/// ```toml
/// lookback = 200
/// upward_tolerance = 1.0
/// downward_tolerance = 1.5
///
/// [session]
/// open = "09:30"
/// close = "16:00"
/// timezone = "America/New_York"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeFile {
    pub lookback: Option<usize>,
    pub upward_tolerance: Option<f64>,
    pub downward_tolerance: Option<f64>,
    pub session: Option<TradingSession>,
}

impl ProbeFile {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}
