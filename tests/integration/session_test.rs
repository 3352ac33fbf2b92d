//! Interactive session integration tests.
//!
//! Drives the full menu loop with scripted console input against the seeded
//! fixture.

use super::common::{rendered_ids, seeded_data};
use flight_lookup::app::{App, Console};
use flight_lookup::db::SqliteStore;
use flight_lookup::query::FlightData;
use sqlx::sqlite::SqlitePoolOptions;
use std::io::Cursor;

async fn run_script(data: FlightData, script: &str) -> String {
    let console = Console::new(Cursor::new(script.to_string()), Vec::new());
    let mut app = App::new(console, data);
    app.run().await.unwrap();
    let (_, output) = app.shutdown().await.into_parts();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_session_runs_each_lookup_then_exits() {
    let script = "1\n5\n2\n01/01/2015\n3\nDelta Air Lines Inc.\n4\nSFO\n5\n";
    let output = run_script(seeded_data().await, script).await;

    assert_eq!(output.matches("------Menu------").count(), 5);
    assert!(output.contains("Got 1 results.\n5. JFK -> ATL by Delta Air Lines Inc., Delay: 120 Minutes\n"));
    assert!(output.contains("Got 4 results.\n"));
    // SFO has one departure and it is below the delay threshold
    assert!(output.contains("Got 0 results.\n"));
}

#[tokio::test]
async fn test_session_recovers_from_bad_input() {
    let script = "seven\n2\n31/02/2016\n2016/02/29\n29/02/2016\n4\nLA\nL@X\nden\n5\n";
    let output = run_script(seeded_data().await, script).await;

    assert_eq!(output.matches("Invalid selection. Try again...").count(), 1);
    assert_eq!(output.matches("Invalid date format. ").count(), 2);
    assert_eq!(
        output.matches("Invalid airport code. Please try again.").count(),
        2
    );
    assert!(output.contains("7. DEN -> PHX by Southwest Airlines Co., Delay: 5 Minutes\n"));
}

#[tokio::test]
async fn test_session_survives_backend_failure() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let data = FlightData::new(Box::new(SqliteStore::from_pool(pool)));

    let output = run_script(data, "1\n1\n3\nUnited Air Lines Inc.\n5\n").await;

    assert_eq!(output.matches("Database error: ").count(), 2);
    assert_eq!(output.matches("Got 0 results.").count(), 2);
    assert_eq!(output.matches("------Menu------").count(), 3);
    assert!(rendered_ids(&output).is_empty());
}
