//! Flight lookup - an interactive query tool for a SQLite flight database.
//!
//! This library exposes the core modules for use in integration tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod present;
pub mod query;
