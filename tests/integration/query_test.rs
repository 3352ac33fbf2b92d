//! Query catalog integration tests.
//!
//! Runs every lookup against the seeded SQLite fixture and checks the
//! presented output.

use super::common::{rendered_ids, seeded_data};
use chrono::NaiveDate;
use flight_lookup::db::{QueryParams, Row, SqliteStore};
use flight_lookup::present::present;
use flight_lookup::query::catalog::FLIGHT_BY_ID;
use flight_lookup::query::FlightData;
use pretty_assertions::assert_eq;
use sqlx::sqlite::SqlitePoolOptions;
use std::time::Duration;

fn render(rows: &[Row]) -> String {
    let mut out = Vec::new();
    present(&mut out, rows).unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_flight_by_id_joins_airline_name() {
    let data = seeded_data().await;
    let mut diag = Vec::new();

    let rows = data.flight_by_id(1, &mut diag).await;

    assert!(diag.is_empty());
    assert_eq!(
        render(&rows),
        "Got 1 results.\n1. LAX -> JFK by United Air Lines Inc., Delay: 45 Minutes\n"
    );
    data.close().await;
}

#[tokio::test]
async fn test_flight_by_id_null_delay_has_no_clause() {
    let data = seeded_data().await;

    let rows = data.flight_by_id(6, &mut Vec::new()).await;

    assert_eq!(
        render(&rows),
        "Got 1 results.\n6. LAX -> SEA by Delta Air Lines Inc.\n"
    );
}

#[tokio::test]
async fn test_unknown_flight_id_yields_zero_results() {
    let data = seeded_data().await;
    let mut diag = Vec::new();

    for id in [0, 999, -5, i64::MAX] {
        let rows = data.flight_by_id(id, &mut diag).await;
        assert_eq!(render(&rows), "Got 0 results.\n");
    }
    assert!(diag.is_empty());
}

#[tokio::test]
async fn test_flights_by_date_ordered_by_delay_descending() {
    let data = seeded_data().await;
    let date = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();

    let rows = data.flights_by_date(date, &mut Vec::new()).await;
    let output = render(&rows);

    assert!(output.starts_with("Got 4 results.\n"));
    assert_eq!(rendered_ids(&output), vec![5, 1, 3, 2]);
    assert!(output.contains("2. ATL -> LAX by Delta Air Lines Inc.\n"));
}

#[tokio::test]
async fn test_flights_by_date_keeps_unknown_airline_codes() {
    let data = seeded_data().await;
    let date = NaiveDate::from_ymd_opt(2015, 1, 4).unwrap();

    let rows = data.flights_by_date(date, &mut Vec::new()).await;

    // Airline 99 has no row in `airlines`; its code stands in for the name
    assert_eq!(
        render(&rows),
        "Got 2 results.\n\
         10. MDW -> DAL by Southwest Airlines Co., Delay: 30 Minutes\n\
         9. MSP -> DTW by 99, Delay: 12 Minutes\n"
    );
}

#[tokio::test]
async fn test_flights_on_leap_day() {
    let data = seeded_data().await;
    let date = NaiveDate::from_ymd_opt(2016, 2, 29).unwrap();

    let rows = data.flights_by_date(date, &mut Vec::new()).await;

    assert_eq!(
        render(&rows),
        "Got 1 results.\n7. DEN -> PHX by Southwest Airlines Co., Delay: 5 Minutes\n"
    );
}

#[tokio::test]
async fn test_delayed_by_airline_applies_threshold() {
    let data = seeded_data().await;

    let rows = data
        .delayed_by_airline("United Air Lines Inc.", &mut Vec::new())
        .await;
    let mut ids = rendered_ids(&render(&rows));
    ids.sort();
    assert_eq!(ids, vec![1, 8]);

    let rows = data
        .delayed_by_airline("Delta Air Lines Inc.", &mut Vec::new())
        .await;
    assert_eq!(rendered_ids(&render(&rows)), vec![5]);

    let rows = data.delayed_by_airline("", &mut Vec::new()).await;
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_delayed_by_airport_includes_threshold_boundary() {
    let data = seeded_data().await;

    let rows = data.delayed_by_airport("LAX", &mut Vec::new()).await;
    let mut ids = rendered_ids(&render(&rows));
    ids.sort();

    // 3 is delayed exactly 20 minutes; 6 has no delay; 8 is stored as 'lax'
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_missing_tables_report_database_error() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let data = FlightData::new(Box::new(SqliteStore::from_pool(pool)));
    let mut diag = Vec::new();

    let rows = data.flight_by_id(1, &mut diag).await;

    assert!(rows.is_empty());
    let diag = String::from_utf8(diag).unwrap();
    assert_eq!(diag.lines().count(), 1);
    assert!(diag.starts_with("Database error: "));
    assert!(diag.contains("no such table"));
}

#[tokio::test]
async fn test_try_execute_with_explicit_params() {
    let data = seeded_data().await;

    let rows = data
        .try_execute(&FLIGHT_BY_ID, &QueryParams::new().with("id", 5i64))
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get("AIRLINE").map(|v| v.to_display_string()),
        Some("Delta Air Lines Inc.".to_string())
    );
}

#[tokio::test]
async fn test_query_timeout_reports_database_error() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    // A view that has to generate millions of rows before any filter applies
    sqlx::raw_sql(
        r#"
        CREATE TABLE airlines (ID INTEGER PRIMARY KEY, AIRLINE TEXT NOT NULL);
        INSERT INTO airlines VALUES (1, 'United Air Lines Inc.');
        CREATE VIEW flights AS
            WITH RECURSIVE n(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM n WHERE x < 5000000)
            SELECT x AS ID, 2015 AS YEAR, 1 AS MONTH, 1 AS DAY, 1 AS AIRLINE,
                   'LAX' AS ORIGIN_AIRPORT, 'JFK' AS DESTINATION_AIRPORT, 0 AS DEPARTURE_DELAY
            FROM n;
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let store = SqliteStore::from_pool(pool).with_query_timeout(Duration::from_millis(1));
    let data = FlightData::new(Box::new(store));
    let mut diag = Vec::new();

    let rows = data.flight_by_id(-1, &mut diag).await;

    assert!(rows.is_empty());
    let diag = String::from_utf8(diag).unwrap();
    assert_eq!(diag.lines().count(), 1);
    assert!(diag.starts_with("Database error: "));
    assert!(diag.contains("timed out"));
}
