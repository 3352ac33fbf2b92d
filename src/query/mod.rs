//! Query catalog and execution.
//!
//! The catalog holds the four fixed lookups; the executor runs them against
//! the store and turns every failure into an empty result plus a diagnostic.

pub mod catalog;
pub mod executor;

pub use catalog::{QueryTemplate, DELAY_THRESHOLD_MINUTES};
pub use executor::FlightData;
