//! Result normalization and console rendering.
//!
//! Raw rows are mapped onto [`FlightRecord`] by canonical column name. A row
//! that cannot be mapped is reported and skipped; it never aborts the batch.

use std::fmt;
use std::io::{self, Write};

use tracing::debug;

use crate::db::{Row, Value};
use crate::error::RowError;

pub const COL_ID: &str = "ID";
pub const COL_ORIGIN: &str = "ORIGIN_AIRPORT";
pub const COL_DESTINATION: &str = "DESTINATION_AIRPORT";
pub const COL_AIRLINE: &str = "AIRLINE";
pub const COL_DELAY: &str = "DELAY";

/// Presentation-ready view of one flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightRecord {
    pub id: i64,
    pub origin_airport: String,
    pub destination_airport: String,
    pub airline: String,
    pub delay_minutes: i64,
}

impl FlightRecord {
    /// Normalizes one raw row.
    ///
    /// `ID`, `ORIGIN_AIRPORT`, `DESTINATION_AIRPORT` and `AIRLINE` must be
    /// present and non-NULL. `DELAY` defaults to 0 when absent or NULL.
    pub fn from_row(row: &Row) -> Result<Self, RowError> {
        let delay_minutes = match row.get(COL_DELAY) {
            None | Some(Value::Null) => 0,
            Some(value) => coerce_int(COL_DELAY, value)?,
        };

        Ok(Self {
            id: coerce_int(COL_ID, required(row, COL_ID)?)?,
            origin_airport: required_text(row, COL_ORIGIN)?,
            destination_airport: required_text(row, COL_DESTINATION)?,
            airline: required_text(row, COL_AIRLINE)?,
            delay_minutes,
        })
    }

    /// Only a strictly positive delay is worth mentioning.
    pub fn is_delayed(&self) -> bool {
        self.delay_minutes > 0
    }
}

impl fmt::Display for FlightRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} -> {} by {}",
            self.id, self.origin_airport, self.destination_airport, self.airline
        )?;
        if self.is_delayed() {
            write!(f, ", Delay: {} Minutes", self.delay_minutes)?;
        }
        Ok(())
    }
}

fn required<'a>(row: &'a Row, field: &'static str) -> Result<&'a Value, RowError> {
    match row.get(field) {
        None | Some(Value::Null) => Err(RowError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn required_text(row: &Row, field: &'static str) -> Result<String, RowError> {
    required(row, field).map(Value::to_display_string)
}

/// Coerces a column value to an integer.
///
/// Reals are truncated toward zero; text must parse as an integer once
/// surrounding whitespace is trimmed.
fn coerce_int(field: &'static str, value: &Value) -> Result<i64, RowError> {
    let invalid = || RowError::InvalidInteger {
        field,
        value: value.to_display_string(),
    };

    match value {
        Value::Int(v) => Ok(*v),
        Value::Float(v) if v.is_finite() => Ok(v.trunc() as i64),
        Value::String(s) => s.trim().parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// Writes the result count followed by one line per well-formed row.
///
/// Malformed rows get an `Error processing result:` line instead.
pub fn present<W: Write>(out: &mut W, rows: &[Row]) -> io::Result<()> {
    writeln!(out, "Got {} results.", rows.len())?;

    for row in rows {
        match FlightRecord::from_row(row) {
            Ok(record) => writeln!(out, "{record}")?,
            Err(e) => {
                debug!("Skipping malformed row: {e}");
                writeln!(out, "Error processing result: {e}")?;
            }
        }
    }

    Ok(())
}
