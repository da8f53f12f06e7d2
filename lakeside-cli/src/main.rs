//! Main entry point for the lakeside CLI.
//!
//! This is the command-line interface for the lakeside reservation system.
//! It provides commands for managing rooms and bookings:
//! - `add-room`, `update-room`, `delete-room`, `rooms`, `room-types`: the catalog
//! - `reserve`: Book a room for a stay
//! - `cancel`: Cancel a booking
//! - `lookup`: Find a booking by confirmation code
//! - `bookings`, `available`: Queries

mod cli;
mod commands;
mod error;
mod output;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let _log_level = lakeside::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        config_file: cli.config,
        busy_timeout: cli.busy_timeout,
        lock_timeout_ms: cli.lock_timeout_ms,
        disable_autoinit: cli.disable_autoinit,
    };

    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::AddRoom(cmd) => cmd.execute(&global),
        cli::Command::UpdateRoom(cmd) => cmd.execute(&global),
        cli::Command::DeleteRoom(cmd) => cmd.execute(&global),
        cli::Command::Rooms(cmd) => cmd.execute(&global),
        cli::Command::RoomTypes(cmd) => cmd.execute(&global),
        cli::Command::Reserve(cmd) => cmd.execute(&global),
        cli::Command::Cancel(cmd) => cmd.execute(&global),
        cli::Command::Lookup(cmd) => cmd.execute(&global),
        cli::Command::Bookings(cmd) => cmd.execute(&global),
        cli::Command::Available(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
