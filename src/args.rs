//! These structs provide the CLI interface for the drivelog CLI.

use crate::model::RecordDraft;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// drivelog: a command-line daily work log for a driver.
///
/// Each record holds one day of activity: odometer readings, revenue, fuel,
/// card-payment transfers and free-text notes. Everything is entered manually
/// and kept in a local JSON datastore under the drivelog home directory —
/// there is no server and no sync.
///
/// Numeric values are entered the way you would write them: "18", "120,50",
/// "1.234,56" and "32,40 €" are all accepted. A value that cannot be read as
/// a number is simply stored as empty.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration files.
    ///
    /// This is the first command you should run. By default the data lives in
    /// $HOME/drivelog; pass --drivelog-home or set DRIVELOG_HOME to put it
    /// somewhere else.
    Init,
    /// Add a new daily record.
    Add(AddArgs),
    /// Replace an existing record, identified by its ID.
    ///
    /// This is a full replacement, not a patch: field flags you do not
    /// provide are cleared. Find the ID with 'drivelog list'.
    Edit(EditArgs),
    /// Delete a record, identified by its ID.
    Delete(DeleteArgs),
    /// List records, optionally filtered, as a table, JSON or CSV.
    List(ListArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate
    /// for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where drivelog data and configuration is held.
    /// Defaults to ~/drivelog
    #[arg(long, env = "DRIVELOG_HOME", default_value_t = default_drivelog_home())]
    drivelog_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, drivelog_home: PathBuf) -> Self {
        Self {
            log_level,
            drivelog_home: drivelog_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn drivelog_home(&self) -> &DisplayPath {
        &self.drivelog_home
    }
}

/// The record fields shared by `add` and `edit`.
///
/// Numeric flags take loose input; anything unreadable becomes an empty
/// field rather than an error.
#[derive(Debug, Default, Parser, Clone)]
pub struct FieldArgs {
    /// The record's date, YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Odometer reading at the start of the day, km. e.g. 152340
    #[arg(long)]
    pub km_start: Option<String>,

    /// Odometer reading at the end of the day, km. e.g. 152410
    #[arg(long)]
    pub km_end: Option<String>,

    /// Manual total distance, km. When positive it overrides the odometer
    /// difference.
    #[arg(long)]
    pub distance: Option<String>,

    /// Total revenue for the day, EUR. e.g. 120,50
    #[arg(long)]
    pub revenue: Option<String>,

    /// Fuel bought, liters. e.g. 18
    #[arg(long)]
    pub fuel_liters: Option<String>,

    /// Fuel cost, EUR. e.g. 32,40
    #[arg(long)]
    pub fuel_cost: Option<String>,

    /// Number of card-payment transfers. e.g. 6
    #[arg(long)]
    pub transfers: Option<String>,

    /// Total taken in card payments, EUR. e.g. 85,00
    #[arg(long)]
    pub card_total: Option<String>,

    /// Free-text notes. e.g. "aeroporto / hotel / portagens"
    #[arg(long)]
    pub notes: Option<String>,
}

impl FieldArgs {
    /// Builds the normalization input, carrying `id` through for edits.
    pub fn into_draft(self, id: Option<String>) -> RecordDraft {
        RecordDraft {
            id,
            date: self.date,
            odometer_start: self.km_start,
            odometer_end: self.km_end,
            distance_total: self.distance,
            revenue_total: self.revenue,
            fuel_liters: self.fuel_liters,
            fuel_cost: self.fuel_cost,
            transfer_count: self.transfers,
            card_payments_total: self.card_total,
            notes: self.notes,
        }
    }
}

/// Args for the `drivelog add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    #[clap(flatten)]
    pub fields: FieldArgs,
}

/// Args for the `drivelog edit` command.
#[derive(Debug, Parser, Clone)]
pub struct EditArgs {
    /// The ID of the record to replace.
    #[arg(long)]
    pub id: String,

    #[clap(flatten)]
    pub fields: FieldArgs,
}

/// Args for the `drivelog delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ID of the record to delete.
    #[arg(long)]
    pub id: String,

    /// Delete without asking for confirmation.
    #[arg(long)]
    pub yes: bool,
}

/// Args for the `drivelog list` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ListArgs {
    /// Show only records whose date or notes contain this text.
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Show only records on or after this date, YYYY-MM-DD.
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Show only records on or before this date, YYYY-MM-DD.
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// The output format.
    #[arg(long, value_enum, default_value_t)]
    pub format: crate::commands::OutputFormat,
}

fn default_drivelog_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("drivelog"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --drivelog-home or DRIVELOG_HOME instead of relying on the \
                default drivelog home directory. If you continue using the program right now, you \
                may have problems!",
            );
            PathBuf::from("drivelog")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
