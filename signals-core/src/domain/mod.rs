//! Domain types shared by the probes.

pub mod bar;
pub mod session;
pub mod state;

pub use bar::Bar;
pub use session::{SessionError, SessionTime, TradingSession};
pub use state::{CrossoverState, InvalidStateError};
