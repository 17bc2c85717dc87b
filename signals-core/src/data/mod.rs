//! Daily bar sources.

pub mod csv_source;
pub mod provider;
pub mod yahoo;

pub use csv_source::CsvBarSource;
pub use provider::{BarSource, DataError, StaticBarSource};
pub use yahoo::YahooProvider;
