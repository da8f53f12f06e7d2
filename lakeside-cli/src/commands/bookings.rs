//! Bookings command implementation.
//!
//! Lists every booking, or the bookings of one room or one guest.

use crate::error::CliError;
use crate::output::{resolve_format, write_bookings};
use crate::utils::{load_configuration, open_coordinator, GlobalOptions};
use clap::Args;
use lakeside::config::OutputFormat;
use lakeside::RoomId;

/// List bookings.
#[derive(Args)]
pub struct BookingsCommand {
    /// Only bookings of this room
    #[arg(long, value_name = "ROOM_ID", conflicts_with = "email")]
    pub room: Option<i64>,

    /// Only bookings made under this email (case-insensitive)
    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,

    /// Output format (table, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl BookingsCommand {
    /// Execute the bookings command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let coordinator = open_coordinator(global, &config)?;

        let mut bookings = match (self.room, self.email.as_deref()) {
            (Some(room), _) => coordinator.bookings_for_room(RoomId::new(room))?,
            (None, Some(email)) => coordinator.bookings_for_guest(email)?,
            (None, None) => coordinator.all_bookings()?,
        };
        bookings.sort_by_key(|b| (b.range().check_in(), b.room_id()));

        let format = resolve_format(self.format, &config);
        write_bookings(&mut std::io::stdout().lock(), &bookings, format)
    }
}
