//! Telegram Bot API sink (`sendMessage`).

use super::{NotificationSink, NotifyError};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
}

pub struct TelegramSink {
    client: reqwest::blocking::Client,
    token: String,
    api_url: String,
}

impl TelegramSink {
    pub fn new(token: impl Into<String>) -> Result<Self, NotifyError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| NotifyError::Request(e.without_url()))?;
        Ok(Self {
            client,
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.token)
    }
}

impl fmt::Debug for TelegramSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramSink")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl NotificationSink for TelegramSink {
    fn send(&self, destination: &str, text: &str) -> Result<(), NotifyError> {
        let payload = SendMessagePayload {
            chat_id: destination,
            text,
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&payload)
            .send()
            .map_err(|e| NotifyError::Request(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "failed to decode error response".to_string());
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(chat_id = destination, "telegram message sent");
        Ok(())
    }
}
