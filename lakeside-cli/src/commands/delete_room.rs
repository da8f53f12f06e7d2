//! Delete-room command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_coordinator, GlobalOptions};
use chrono::Local;
use clap::Args;
use lakeside::RoomId;

/// Remove a room and its bookings.
#[derive(Args)]
pub struct DeleteRoomCommand {
    /// Room id
    #[arg(value_name = "ROOM_ID")]
    pub id: i64,

    /// Delete even if the room still has current or future stays
    #[arg(long)]
    pub force: bool,
}

impl DeleteRoomCommand {
    /// Execute the delete-room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let coordinator = open_coordinator(global, &config)?;
        let room_id = RoomId::new(self.id);

        if !self.force && coordinator.has_upcoming_bookings(room_id, Local::now().date_naive())? {
            return Err(CliError::InvalidArguments(format!(
                "room {room_id} has upcoming bookings (use --force to delete anyway)"
            )));
        }

        let removed = coordinator.store().delete_room(room_id)?;
        if !global.quiet {
            println!("Deleted room {room_id} and {removed} booking(s)");
        }
        Ok(())
    }
}
