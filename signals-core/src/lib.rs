//! Signals core — market probes built around a hysteresis-banded SMA
//! crossover detector.
//!
//! - Domain types (bars, trading sessions, crossover state)
//! - Market clock: is the exchange inside its session right now
//! - SMA indicator and the crossover engine with its three-state hysteresis
//! - `BarSource` / `NotificationSink` seams with Yahoo, CSV and Telegram adapters
//! - Probes wiring the pieces together, and their configuration

pub mod clock;
pub mod config;
pub mod crossover;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod notify;
pub mod probes;
