//! Command-line argument parsing.
//!
//! Without a subcommand the interactive menu runs. A subcommand performs one
//! lookup and exits, which is handy for scripting.

use crate::app::{parse_flight_id, parse_travel_date, validate_airport_code, Lookup};
use crate::config::{Config, DatabaseConfig};
use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Look up flights and delays in a SQLite flight database.
#[derive(Parser, Debug)]
#[command(name = "flights")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite connection string (e.g., sqlite:data/flights.sqlite3)
    #[arg(short = 'd', long, value_name = "URL", env = "FLIGHTS_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Per-query timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Write logs to a file instead of stderr
    #[arg(long)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One-shot lookups.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show a flight by its ID
    Id {
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// Show all flights on a date (DD/MM/YYYY)
    Date { date: String },
    /// Show delayed flights for an airline
    Airline { name: String },
    /// Show delayed flights departing from an airport (IATA code)
    Airport { code: String },
}

impl Command {
    /// Validates the argument the same way the interactive prompts do.
    pub fn to_lookup(&self) -> Result<Lookup> {
        Ok(match self {
            Self::Id { id } => Lookup::FlightById(parse_flight_id(id)?),
            Self::Date { date } => Lookup::FlightsByDate(parse_travel_date(date)?),
            Self::Airline { name } => Lookup::DelayedByAirline(name.clone()),
            Self::Airport { code } => Lookup::DelayedByAirport(validate_airport_code(code)?),
        })
    }
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Resolves the database settings.
    ///
    /// Precedence: `--database-url` / `FLIGHTS_DATABASE_URL`, then the config
    /// file, then the built-in default.
    pub fn resolve_database(&self, config: &Config) -> DatabaseConfig {
        let mut database = config.database.clone();
        if let Some(url) = &self.database_url {
            database.url = url.clone();
        }
        if let Some(secs) = self.timeout {
            database.query_timeout_secs = secs;
        }
        database
    }
}
