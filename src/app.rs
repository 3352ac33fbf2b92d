//! Interactive control loop.
//!
//! A menu state plus one state per lookup. Each lookup validates its input,
//! re-prompting until it is well formed, runs the query, presents the rows,
//! and returns to the menu.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{FlightError, Result};
use crate::present::present;
use crate::query::FlightData;

/// Date format accepted for travel dates (DD/MM/YYYY).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Length of an IATA airport code.
pub const AIRPORT_CODE_LENGTH: usize = 3;

/// One entry of the top-level menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    FlightById,
    FlightsByDate,
    DelayedByAirline,
    DelayedByAirport,
    Exit,
}

impl MenuAction {
    /// Every action, in menu order.
    pub const ALL: [MenuAction; 5] = [
        Self::FlightById,
        Self::FlightsByDate,
        Self::DelayedByAirline,
        Self::DelayedByAirport,
        Self::Exit,
    ];

    /// Numeric key the operator types to select this action.
    pub fn key(self) -> u32 {
        match self {
            Self::FlightById => 1,
            Self::FlightsByDate => 2,
            Self::DelayedByAirline => 3,
            Self::DelayedByAirport => 4,
            Self::Exit => 5,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::FlightById => "Show flight by ID",
            Self::FlightsByDate => "Show flights by date",
            Self::DelayedByAirline => "Delayed flights by airline",
            Self::DelayedByAirport => "Delayed flights by origin airport",
            Self::Exit => "Exit",
        }
    }

    /// Parses a menu choice; anything but an integer key in range is `None`.
    pub fn from_choice(input: &str) -> Option<Self> {
        let key: u32 = input.trim().parse().ok()?;
        Self::ALL.into_iter().find(|action| action.key() == key)
    }
}

/// Parses a flight identifier. Any integer is accepted.
pub fn parse_flight_id(input: &str) -> Result<i64> {
    input
        .trim()
        .parse()
        .map_err(|_| FlightError::input("Invalid input. Please enter a numeric ID."))
}

/// Parses a travel date in DD/MM/YYYY form.
///
/// The year must be exactly four ASCII digits; chrono's `%Y` alone would
/// also take `16` or `+2015`.
pub fn parse_travel_date(input: &str) -> Result<NaiveDate> {
    let year = input.rsplit('/').next().unwrap_or_default();
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FlightError::input(format!(
            "Invalid date format. '{input}' does not match DD/MM/YYYY"
        )));
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|e| FlightError::input(format!("Invalid date format. {e}")))
}

/// Validates an IATA airport code: exactly three alphabetic characters.
///
/// Returns the code upper-cased, since the store keeps codes upper-case and
/// compares them case-sensitively. The flip side: a row whose origin was
/// stored in lower case (`lax`) can never be matched from this prompt.
pub fn validate_airport_code(input: &str) -> Result<String> {
    if input.chars().count() == AIRPORT_CODE_LENGTH && input.chars().all(char::is_alphabetic) {
        Ok(input.to_uppercase())
    } else {
        Err(FlightError::input("Invalid airport code. Please try again."))
    }
}

/// Line-based prompt/response channel with the operator.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `prompt` and reads one line without its line terminator.
    ///
    /// Returns `None` once the input is exhausted.
    pub fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Prompts until `parse` accepts the line, printing each rejection.
    pub fn prompt_until<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<Option<T>> {
        loop {
            let Some(line) = self.prompt(prompt)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(FlightError::Input(message)) => self.say(&message)?,
                Err(e) => return Err(e),
            }
        }
    }

    /// Prints one line.
    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Returns the underlying reader and writer.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

/// A fully validated lookup, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    FlightById(i64),
    FlightsByDate(NaiveDate),
    DelayedByAirline(String),
    DelayedByAirport(String),
}

impl Lookup {
    /// Runs the lookup and presents its rows. Query failures are reported
    /// to `out` as diagnostics, never returned.
    pub async fn run<W: Write>(&self, data: &FlightData, out: &mut W) -> Result<()> {
        let rows = match self {
            Self::FlightById(id) => data.flight_by_id(*id, out).await,
            Self::FlightsByDate(date) => data.flights_by_date(*date, out).await,
            Self::DelayedByAirline(name) => data.delayed_by_airline(name, out).await,
            Self::DelayedByAirport(code) => data.delayed_by_airport(code, out).await,
        };
        present(out, &rows)?;
        Ok(())
    }
}

/// The interactive application: a console bound to a query service.
pub struct App<R, W> {
    console: Console<R, W>,
    data: FlightData,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(console: Console<R, W>, data: FlightData) -> Self {
        Self { console, data }
    }

    /// Runs the menu loop until the operator exits or input ends.
    ///
    /// Query and row failures never end the loop; only console I/O errors do.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let Some(action) = self.choose_action()? else {
                debug!("Input closed at menu");
                return Ok(());
            };
            debug!("Menu selection: {:?}", action);

            if action == MenuAction::Exit {
                return Ok(());
            }

            let Some(lookup) = self.read_lookup(action)? else {
                debug!("Input closed during {:?}", action);
                return Ok(());
            };
            lookup.run(&self.data, self.console.output()).await?;
        }
    }

    /// Shows the menu and reads choices until one is valid.
    fn choose_action(&mut self) -> Result<Option<MenuAction>> {
        self.console.say("\n------Menu------\n")?;
        for action in MenuAction::ALL {
            self.console
                .say(&format!("{}. {}", action.key(), action.description()))?;
        }

        let prompt = format!("\nPlease enter your choice (1-{}): ", MenuAction::ALL.len());
        self.console.prompt_until(&prompt, |line| {
            MenuAction::from_choice(line)
                .ok_or_else(|| FlightError::input("Invalid selection. Try again..."))
        })
    }

    /// Collects validated input for the chosen lookup.
    fn read_lookup(&mut self, action: MenuAction) -> Result<Option<Lookup>> {
        let console = &mut self.console;
        let lookup = match action {
            MenuAction::FlightById => console
                .prompt_until("Enter flight ID: ", parse_flight_id)?
                .map(Lookup::FlightById),
            MenuAction::FlightsByDate => console
                .prompt_until("Enter date in DD/MM/YYYY format: ", parse_travel_date)?
                .map(Lookup::FlightsByDate),
            MenuAction::DelayedByAirline => console
                .prompt("Enter airline name: ")?
                .map(Lookup::DelayedByAirline),
            MenuAction::DelayedByAirport => console
                .prompt_until("Enter origin airport IATA code: ", validate_airport_code)?
                .map(Lookup::DelayedByAirport),
            MenuAction::Exit => None,
        };
        Ok(lookup)
    }

    /// Releases the query service and hands back the console.
    pub async fn shutdown(self) -> Console<R, W> {
        self.data.close().await;
        self.console
    }
}
