//! Shared fixtures: a small flights database in memory.

use flight_lookup::db::SqliteStore;
use flight_lookup::query::FlightData;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

const SCHEMA: &str = r#"
CREATE TABLE airlines (
    ID INTEGER PRIMARY KEY,
    AIRLINE TEXT NOT NULL
);
CREATE TABLE flights (
    ID INTEGER PRIMARY KEY,
    YEAR INTEGER,
    MONTH INTEGER,
    DAY INTEGER,
    AIRLINE INTEGER,
    ORIGIN_AIRPORT TEXT,
    DESTINATION_AIRPORT TEXT,
    DEPARTURE_DELAY INTEGER
);
"#;

const SEED: &str = r#"
INSERT INTO airlines (ID, AIRLINE) VALUES
    (1, 'United Air Lines Inc.'),
    (2, 'Delta Air Lines Inc.'),
    (3, 'Southwest Airlines Co.');

INSERT INTO flights (ID, YEAR, MONTH, DAY, AIRLINE, ORIGIN_AIRPORT, DESTINATION_AIRPORT, DEPARTURE_DELAY) VALUES
    (1, 2015, 1, 1, 1, 'LAX', 'JFK', 45),
    (2, 2015, 1, 1, 2, 'ATL', 'LAX', -3),
    (3, 2015, 1, 1, 3, 'LAX', 'SFO', 20),
    (4, 2015, 1, 2, 1, 'SFO', 'ORD', 19),
    (5, 2015, 1, 1, 2, 'JFK', 'ATL', 120),
    (6, 2015, 1, 2, 2, 'LAX', 'SEA', NULL),
    (7, 2016, 2, 29, 3, 'DEN', 'PHX', 5),
    (8, 2015, 1, 3, 1, 'lax', 'BOS', 60),
    (9, 2015, 1, 4, 99, 'MSP', 'DTW', 12),
    (10, 2015, 1, 4, 3, 'MDW', 'DAL', 30);
"#;

/// Creates an in-memory database with the flights fixture loaded.
pub async fn seeded_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();
    sqlx::raw_sql(SEED).execute(&pool).await.unwrap();

    pool
}

/// Creates a query service over the seeded fixture.
pub async fn seeded_data() -> FlightData {
    FlightData::new(Box::new(SqliteStore::from_pool(seeded_pool().await)))
}

/// Returns the flight IDs rendered in presenter output, in order.
pub fn rendered_ids(output: &str) -> Vec<i64> {
    output
        .lines()
        .filter(|line| line.contains(" -> "))
        .filter_map(|line| line.split('.').next()?.parse().ok())
        .collect()
}
