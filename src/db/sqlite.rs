//! SQLite store implementation.
//!
//! Provides `SqliteStore`, which implements `FlightStore` over a single
//! read-only sqlx connection.

use crate::config::DatabaseConfig;
use crate::db::{FlightStore, ParamValue, Row, Value};
use crate::error::{FlightError, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column as SqlxColumn, Row as SqlxRow};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::debug;

/// SQLite store backed by a one-connection pool.
#[derive(Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl SqliteStore {
    /// Prepares a lazily connected, read-only store.
    ///
    /// No I/O happens here; the connection is opened on the first query and a
    /// missing database file surfaces as a query failure at that point.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| FlightError::config(format!("Invalid database path: {e}")))?
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .connect_lazy_with(options);

        debug!("Prepared store for {}", config.display_string());

        Ok(Self {
            pool,
            query_timeout: Duration::from_secs(config.query_timeout_secs),
        })
    }

    /// Creates a store from an existing connection pool.
    ///
    /// This is primarily useful for testing against seeded in-memory databases.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            query_timeout: Duration::from_secs(crate::config::DEFAULT_QUERY_TIMEOUT_SECS),
        }
    }

    /// Overrides the per-query timeout.
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }
}

#[async_trait]
impl FlightStore for SqliteStore {
    async fn fetch_rows(&self, sql: &str, args: &[ParamValue]) -> Result<Vec<Row>> {
        let start = Instant::now();

        let mut query = sqlx::query(sql);
        for arg in args {
            query = match arg {
                ParamValue::Int(v) => query.bind(*v),
                ParamValue::Text(v) => query.bind(v.clone()),
            };
        }

        let rows = tokio::time::timeout(self.query_timeout, query.fetch_all(&self.pool))
            .await
            .map_err(|_| {
                FlightError::query(format!("Query timed out after {:?}", self.query_timeout))
            })??;

        debug!(
            "Fetched {} rows in {:?}",
            rows.len(),
            start.elapsed()
        );

        Ok(rows.iter().map(convert_row).collect())
    }

    async fn close(&self) {
        self.pool.close().await;
        debug!("Store closed");
    }
}

/// Converts a sqlx SqliteRow to our Row type.
fn convert_row(row: &SqliteRow) -> Row {
    let mut converted = Row::new();
    for (index, column) in row.columns().iter().enumerate() {
        converted.push(column.name(), convert_value(row, index));
    }
    converted
}

/// Converts a single column value.
///
/// SQLite columns are dynamically typed, so the storage class of each value
/// is tried in turn instead of trusting the declared column type.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    if let Ok(v) = row.try_get::<Option<i64>, _>(index) {
        return v.map(Value::Int).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(index) {
        return v.map(Value::Float).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(index) {
        return v.map(Value::String).unwrap_or(Value::Null);
    }
    row.try_get::<Option<Vec<u8>>, _>(index)
        .ok()
        .flatten()
        .map(Value::Bytes)
        .unwrap_or(Value::Null)
}
