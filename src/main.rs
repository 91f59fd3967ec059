use clap::Parser;
use drivelog::args::{Args, Command};
use drivelog::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().drivelog_home().path();

    // Route to the appropriate command handler. Logs go to stderr; the list
    // payload is the one thing written to stdout.
    let _: () = match args.command() {
        Command::Init => commands::init(home)?.print(),

        Command::Add(add_args) => {
            let config = Config::load(home)?;
            commands::add(config, add_args.clone())?.print()
        }

        Command::Edit(edit_args) => {
            let config = Config::load(home)?;
            commands::edit(config, edit_args.clone())?.print()
        }

        Command::Delete(delete_args) => {
            let config = Config::load(home)?;
            commands::delete(config, delete_args.clone())?.print()
        }

        Command::List(list_args) => {
            let config = Config::load(home)?;
            let out = commands::list(config, list_args.clone())?;
            if let Some(rows) = out.structure() {
                println!("{rows}");
            }
            out.print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
