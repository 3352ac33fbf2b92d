//! Fixed catalog of parameterized flight queries.
//!
//! Every template aliases its output columns to the same names (`ID`,
//! `ORIGIN_AIRPORT`, `DESTINATION_AIRPORT`, `DELAY`, `AIRLINE`) so the
//! presenter can read all four result shapes the same way.

use crate::db::{ParamValue, QueryParams};
use crate::error::{FlightError, Result};

/// Minimum departure delay, in minutes, for a flight to count as delayed.
pub const DELAY_THRESHOLD_MINUTES: i64 = 20;

/// A named, parameterized statement.
///
/// Placeholders are numbered: `params[i]` binds to `?{i + 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTemplate {
    pub name: &'static str,
    pub sql: &'static str,
    pub params: &'static [&'static str],
}

impl QueryTemplate {
    /// Resolves the declared parameters, in placeholder order.
    ///
    /// Keys the template does not declare are ignored.
    pub fn bind(&self, params: &QueryParams) -> Result<Vec<ParamValue>> {
        self.params
            .iter()
            .map(|name| {
                params.get(name).cloned().ok_or_else(|| {
                    FlightError::internal(format!(
                        "query '{}' is missing parameter '{}'",
                        self.name, name
                    ))
                })
            })
            .collect()
    }
}

pub const FLIGHT_BY_ID: QueryTemplate = QueryTemplate {
    name: "flight_by_id",
    sql: r#"
        SELECT f.ID AS ID,
               f.ORIGIN_AIRPORT AS ORIGIN_AIRPORT,
               f.DESTINATION_AIRPORT AS DESTINATION_AIRPORT,
               f.DEPARTURE_DELAY AS DELAY,
               a.AIRLINE AS AIRLINE
        FROM flights AS f
        JOIN airlines AS a ON f.AIRLINE = a.ID
        WHERE f.ID = ?1
    "#,
    params: &["id"],
};

pub const FLIGHTS_BY_DATE: QueryTemplate = QueryTemplate {
    name: "flights_by_date",
    sql: r#"
        SELECT f.ID AS ID,
               f.ORIGIN_AIRPORT AS ORIGIN_AIRPORT,
               f.DESTINATION_AIRPORT AS DESTINATION_AIRPORT,
               f.DEPARTURE_DELAY AS DELAY,
               COALESCE(a.AIRLINE, f.AIRLINE) AS AIRLINE
        FROM flights AS f
        LEFT JOIN airlines AS a ON f.AIRLINE = a.ID
        WHERE f.DAY = ?1 AND f.MONTH = ?2 AND f.YEAR = ?3
        ORDER BY DELAY DESC
    "#,
    params: &["day", "month", "year"],
};

pub const DELAYED_BY_AIRLINE: QueryTemplate = QueryTemplate {
    name: "delayed_by_airline",
    sql: r#"
        SELECT f.ID AS ID,
               f.ORIGIN_AIRPORT AS ORIGIN_AIRPORT,
               f.DESTINATION_AIRPORT AS DESTINATION_AIRPORT,
               f.DEPARTURE_DELAY AS DELAY,
               a.AIRLINE AS AIRLINE
        FROM flights AS f
        JOIN airlines AS a ON f.AIRLINE = a.ID
        WHERE a.AIRLINE = ?1 AND f.DEPARTURE_DELAY >= 20
    "#,
    params: &["airline_name"],
};

pub const DELAYED_BY_AIRPORT: QueryTemplate = QueryTemplate {
    name: "delayed_by_airport",
    sql: r#"
        SELECT f.ID AS ID,
               f.ORIGIN_AIRPORT AS ORIGIN_AIRPORT,
               f.DESTINATION_AIRPORT AS DESTINATION_AIRPORT,
               f.DEPARTURE_DELAY AS DELAY,
               a.AIRLINE AS AIRLINE
        FROM flights AS f
        JOIN airlines AS a ON f.AIRLINE = a.ID
        WHERE f.ORIGIN_AIRPORT = ?1 AND f.DEPARTURE_DELAY >= 20
    "#,
    params: &["airport_code"],
};

/// Every template in the catalog.
pub const ALL: [QueryTemplate; 4] = [
    FLIGHT_BY_ID,
    FLIGHTS_BY_DATE,
    DELAYED_BY_AIRLINE,
    DELAYED_BY_AIRPORT,
];
