//! Outbound notifications.
//!
//! Probes only see the `NotificationSink` trait; Telegram delivery and the
//! console sink used by `--dry-run` are adapters behind it.

pub mod message;
pub mod telegram;

pub use telegram::TelegramSink;

use std::io::{self, Write};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport failure. The request URL is stripped since it embeds the bot token.
    #[error("notification request failed: {0}")]
    Request(reqwest::Error),

    #[error("notification API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to write message: {0}")]
    Io(#[from] io::Error),
}

/// Delivers a text message to a destination (chat id, channel, ...).
pub trait NotificationSink {
    fn send(&self, destination: &str, text: &str) -> Result<(), NotifyError>;
}

impl<T: NotificationSink + ?Sized> NotificationSink for &T {
    fn send(&self, destination: &str, text: &str) -> Result<(), NotifyError> {
        (**self).send(destination, text)
    }
}

/// Writes messages to a local stream instead of delivering them.
///
/// Defaults to stderr: stdout is reserved for the probe's result.
#[derive(Debug)]
pub struct ConsoleSink<W = io::Stderr> {
    out: Mutex<W>,
}

impl ConsoleSink {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write> NotificationSink for ConsoleSink<W> {
    fn send(&self, destination: &str, text: &str) -> Result<(), NotifyError> {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(out, "--- message to {destination} ---\n{text}")?;
        out.flush()?;
        Ok(())
    }
}

/// A sink bound to the destination a probe reports to.
#[derive(Clone, Copy)]
pub struct Notifier<'a> {
    pub sink: &'a dyn NotificationSink,
    pub destination: &'a str,
}

impl<'a> Notifier<'a> {
    pub fn new(sink: &'a dyn NotificationSink, destination: &'a str) -> Self {
        Self { sink, destination }
    }

    pub fn send(&self, text: &str) -> Result<(), NotifyError> {
        self.sink.send(self.destination, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_sink_writes_destination_and_text() {
        let sink = ConsoleSink::new(Vec::new());
        Notifier::new(&sink, "chat-7").send("hello\nworld").unwrap();
        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "--- message to chat-7 ---\nhello\nworld\n");
    }

    #[test]
    fn default_console_sink_targets_stderr() {
        let _: ConsoleSink<io::Stderr> = ConsoleSink::stderr();
    }
}
