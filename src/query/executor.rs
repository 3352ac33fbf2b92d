//! Fail-soft query execution.
//!
//! `FlightData` owns the store for the lifetime of the service. Every failure
//! below this boundary is reported as a one-line diagnostic and collapsed to an
//! empty result, so a broken query can never end an interactive session.

use std::io::Write;
use std::time::Instant;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, warn};

use super::catalog::{
    QueryTemplate, DELAYED_BY_AIRLINE, DELAYED_BY_AIRPORT, FLIGHTS_BY_DATE, FLIGHT_BY_ID,
};
use crate::config::DatabaseConfig;
use crate::db::{self, FlightStore, QueryParams, Row};
use crate::error::{FlightError, Result};

/// Query service over a single long-lived store.
pub struct FlightData {
    store: Box<dyn FlightStore>,
}

impl FlightData {
    /// Creates a service over an already opened store.
    pub fn new(store: Box<dyn FlightStore>) -> Self {
        Self { store }
    }

    /// Opens the configured store and wraps it in a service.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let store = db::open(config)?;
        info!("Flight store ready: {}", config.display_string());
        Ok(Self::new(store))
    }

    /// Runs one template and returns every row, or the failure.
    pub async fn try_execute(
        &self,
        template: &QueryTemplate,
        params: &QueryParams,
    ) -> Result<Vec<Row>> {
        let args = template.bind(params)?;
        debug!(
            "{} with [{}]",
            template.name,
            args.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        );
        let start = Instant::now();
        let rows = self.store.fetch_rows(template.sql, &args).await?;
        info!(
            "{} returned {} rows in {:?}",
            template.name,
            rows.len(),
            start.elapsed()
        );
        Ok(rows)
    }

    /// Runs one template, downgrading any failure to an empty result.
    ///
    /// On failure a single diagnostic line is written to `diag`: prefixed
    /// `Database error:` when the store failed, `Unexpected error:` otherwise.
    pub async fn execute<W: Write>(
        &self,
        template: &QueryTemplate,
        params: &QueryParams,
        diag: &mut W,
    ) -> Vec<Row> {
        match self.try_execute(template, params).await {
            Ok(rows) => rows,
            Err(e) => {
                report_failure(template, &e, diag);
                Vec::new()
            }
        }
    }

    /// Looks up a single flight by its identifier.
    pub async fn flight_by_id<W: Write>(&self, id: i64, diag: &mut W) -> Vec<Row> {
        let params = QueryParams::new().with("id", id);
        self.execute(&FLIGHT_BY_ID, &params, diag).await
    }

    /// Lists every flight on the given date, most delayed first.
    pub async fn flights_by_date<W: Write>(&self, date: NaiveDate, diag: &mut W) -> Vec<Row> {
        let params = QueryParams::new()
            .with("day", date.day())
            .with("month", date.month())
            .with("year", date.year());
        self.execute(&FLIGHTS_BY_DATE, &params, diag).await
    }

    /// Lists delayed flights operated by the named airline.
    pub async fn delayed_by_airline<W: Write>(&self, airline: &str, diag: &mut W) -> Vec<Row> {
        let params = QueryParams::new().with("airline_name", airline);
        self.execute(&DELAYED_BY_AIRLINE, &params, diag).await
    }

    /// Lists delayed flights departing from the given airport.
    pub async fn delayed_by_airport<W: Write>(&self, code: &str, diag: &mut W) -> Vec<Row> {
        let params = QueryParams::new().with("airport_code", code);
        self.execute(&DELAYED_BY_AIRPORT, &params, diag).await
    }

    /// Releases the store. Consuming `self` guarantees this happens once.
    pub async fn close(self) {
        self.store.close().await;
        info!("Flight store closed");
    }
}

fn report_failure<W: Write>(template: &QueryTemplate, error: &FlightError, diag: &mut W) {
    let prefix = if error.is_backend() {
        "Database error"
    } else {
        "Unexpected error"
    };
    // Already reported to the operator through `diag`
    info!("{} failed ({}): {}", template.name, error.category(), error);

    if let Err(io) = writeln!(diag, "{prefix}: {error}") {
        warn!("Could not write diagnostic: {io}");
    }
}
