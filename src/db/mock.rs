//! In-memory stores for testing.

use super::{FlightStore, ParamValue, Row};
use crate::error::{FlightError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A statement the mock store has been asked to run.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub sql: String,
    pub args: Vec<ParamValue>,
}

/// A mock store that returns predefined rows and records every call.
#[derive(Debug, Default, Clone)]
pub struct MockStore {
    rows: Vec<Row>,
    calls: Arc<Mutex<Vec<RecordedQuery>>>,
    closes: Arc<AtomicUsize>,
}

impl MockStore {
    /// Creates a mock store that returns no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock store that returns the given rows for every query.
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    /// Returns the statements executed so far.
    pub fn calls(&self) -> Vec<RecordedQuery> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Returns how many times `close` was called.
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FlightStore for MockStore {
    async fn fetch_rows(&self, sql: &str, args: &[ParamValue]) -> Result<Vec<Row>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedQuery {
                sql: sql.to_string(),
                args: args.to_vec(),
            });
        }
        Ok(self.rows.clone())
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// A store whose every query fails with the given error.
pub struct FailingStore {
    make_error: fn() -> FlightError,
}

impl FailingStore {
    /// Fails every query with a backend query error.
    pub fn backend() -> Self {
        Self {
            make_error: || FlightError::query("database is locked"),
        }
    }

    /// Fails every query with an error that did not come from the backend.
    pub fn unexpected() -> Self {
        Self {
            make_error: || FlightError::internal("worker vanished"),
        }
    }
}

#[async_trait]
impl FlightStore for FailingStore {
    async fn fetch_rows(&self, _sql: &str, _args: &[ParamValue]) -> Result<Vec<Row>> {
        Err((self.make_error)())
    }

    async fn close(&self) {}
}
