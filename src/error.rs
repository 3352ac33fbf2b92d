//! Error types for the flight lookup tool.
//!
//! Defines the main error enum used throughout the application, plus the
//! row-level error raised while normalizing a single result row.

use thiserror::Error;

/// Main error type for flight lookup operations.
#[derive(Error, Debug)]
pub enum FlightError {
    /// Store connection errors (missing database file, cannot open, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution errors (syntax errors, timeouts, decode failures, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration errors (invalid config file, unsupported URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operator input that failed validation.
    #[error("Invalid input: {0}")]
    Input(String),

    /// Console I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FlightError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an input validation error with the given message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if the failure originated in the backing store.
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Query(_))
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Config(_) => "Configuration Error",
            Self::Input(_) => "Input Error",
            Self::Io(_) => "I/O Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

impl From<sqlx::Error> for FlightError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => Self::connection(error.to_string()),
            other => Self::query(other.to_string()),
        }
    }
}

/// A result row that could not be turned into a flight record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("invalid integer for '{field}': {value}")]
    InvalidInteger { field: &'static str, value: String },
}

/// Result type alias using FlightError.
pub type Result<T> = std::result::Result<T, FlightError>;
