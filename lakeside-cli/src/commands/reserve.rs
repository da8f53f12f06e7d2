//! Reserve command implementation.
//!
//! This module implements the `reserve` command, which books one room for
//! one stay and prints the confirmation code.

use crate::error::CliError;
use crate::utils::{load_configuration, open_coordinator, parse_timeout_ms, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use lakeside::{DateRange, GuestInfo, RoomId};

/// Book a room for a stay.
#[derive(Args)]
pub struct ReserveCommand {
    /// Room id
    #[arg(long, value_name = "ROOM_ID")]
    pub room: i64,

    /// First night of the stay (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: NaiveDate,

    /// Departure day (YYYY-MM-DD); the guest does not sleep this night
    #[arg(long, value_name = "DATE")]
    pub check_out: NaiveDate,

    /// Guest's full name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Guest's email address
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    /// Number of adults
    #[arg(long, default_value_t = 1)]
    pub adults: u32,

    /// Number of children
    #[arg(long, default_value_t = 0)]
    pub children: u32,

    /// Wait at most this long for the room, overriding the configured lock timeout
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

impl ReserveCommand {
    /// Execute the reserve command.
    ///
    /// Prints the confirmation code on stdout and nothing else, so the
    /// output can be captured by scripts.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Refuse bad input before touching the database
        let range = DateRange::new(self.check_in, self.check_out).map_err(lakeside::Error::from)?;
        let guest = GuestInfo::builder(self.name, self.email)
            .adults(self.adults)
            .children(self.children)
            .build()
            .map_err(lakeside::Error::from)?;
        let timeout = self.timeout_ms.map(parse_timeout_ms).transpose()?;

        let config = load_configuration(global)?;
        let coordinator = open_coordinator(global, &config)?;
        let room = RoomId::new(self.room);

        let code = match timeout {
            Some(timeout) => coordinator.reserve_with_timeout(room, range, guest, timeout)?,
            None => coordinator.reserve(room, range, guest)?,
        };

        println!("{code}");
        if global.verbose {
            eprintln!("Booked room {room} for {range} ({} nights)", range.nights());
        }
        Ok(())
    }
}
