//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddRoomCommand, AvailableCommand, BookingsCommand, CancelCommand, CompletionsCommand,
    DeleteRoomCommand, InitCommand, LookupCommand, ReserveCommand, RoomTypesCommand,
    RoomsCommand, UpdateRoomCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing hotel rooms and reservations.
#[derive(Parser)]
#[command(name = "lakeside")]
#[command(version, about = "Manage hotel rooms and reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "LAKESIDE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Additional configuration file, layered above the data directory's config.yaml
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Override the database busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true)]
    pub busy_timeout: Option<u32>,

    /// Override how long to wait for a room lock (in milliseconds)
    #[arg(long, value_name = "MS", global = true)]
    pub lock_timeout_ms: Option<u64>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "LAKESIDE_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Add a room to the catalog
    AddRoom(AddRoomCommand),

    /// Change a room's type or price
    UpdateRoom(UpdateRoomCommand),

    /// Remove a room and its bookings
    DeleteRoom(DeleteRoomCommand),

    /// List rooms
    Rooms(RoomsCommand),

    /// List the distinct room types
    RoomTypes(RoomTypesCommand),

    /// Book a room for a stay
    Reserve(ReserveCommand),

    /// Cancel a booking
    Cancel(CancelCommand),

    /// Show the booking behind a confirmation code
    Lookup(LookupCommand),

    /// List bookings
    Bookings(BookingsCommand),

    /// List rooms free for a stay
    Available(AvailableCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_reserve() {
        let cli = Cli::try_parse_from([
            "lakeside",
            "reserve",
            "--room",
            "3",
            "--check-in",
            "2024-01-10",
            "--check-out",
            "2024-01-12",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Reserve(_)));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "lakeside",
            "rooms",
            "--data-dir",
            "/tmp/lakeside",
            "--lock-timeout-ms",
            "250",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/lakeside")));
        assert_eq!(cli.lock_timeout_ms, Some(250));
    }
}
