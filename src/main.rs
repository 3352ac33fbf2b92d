//! Flight lookup - an interactive query tool for a SQLite flight database.

use flight_lookup::app::{App, Console};
use flight_lookup::cli::Cli;
use flight_lookup::config::Config;
use flight_lookup::error::Result;
use flight_lookup::logging;
use flight_lookup::query::FlightData;
use std::io::{self, Write};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();
    if cli.log_file {
        logging::init_file_logging();
    } else {
        logging::init_stderr_logging();
    }

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;
    let database = cli.resolve_database(&config);

    // Validate one-shot input before touching the store
    let lookup = cli.command.as_ref().map(|c| c.to_lookup()).transpose()?;

    let data = FlightData::open(&database)?;

    match lookup {
        Some(lookup) => {
            let mut stdout = io::stdout().lock();
            let result = lookup.run(&data, &mut stdout).await;
            stdout.flush()?;
            data.close().await;
            result
        }
        None => {
            let console = Console::new(io::stdin().lock(), io::stdout().lock());
            let mut app = App::new(console, data);
            let result = app.run().await;
            app.shutdown().await;
            result
        }
    }
}
