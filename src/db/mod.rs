//! Store abstraction layer.
//!
//! Provides a trait-based interface over the backing relational store so the
//! query service can run against SQLite in production and in-memory fakes in
//! tests.

mod mock;
mod sqlite;
mod types;

pub use mock::{FailingStore, MockStore, RecordedQuery};
pub use sqlite::SqliteStore;
pub use types::{ParamValue, QueryParams, Row, Value};

use crate::config::DatabaseConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Opens the store described by the given configuration.
///
/// The connection itself is established lazily on the first query.
pub fn open(config: &DatabaseConfig) -> Result<Box<dyn FlightStore>> {
    config.validate()?;
    Ok(Box::new(SqliteStore::open(config)?))
}

/// Trait defining the interface for flight stores.
#[async_trait]
pub trait FlightStore: Send + Sync {
    /// Executes a statement with positional arguments and returns every row.
    ///
    /// `args[i]` is bound to placeholder `?{i + 1}`. The result is fully
    /// materialized before returning.
    async fn fetch_rows(&self, sql: &str, args: &[ParamValue]) -> Result<Vec<Row>>;

    /// Releases the underlying connection.
    async fn close(&self);
}
