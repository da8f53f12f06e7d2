//! Update-room command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;
use lakeside::{Price, RoomId, RoomUpdate};

/// Change a room's type or price.
#[derive(Args)]
pub struct UpdateRoomCommand {
    /// Room id
    #[arg(value_name = "ROOM_ID")]
    pub id: i64,

    /// New room type
    #[arg(long = "type", value_name = "TYPE")]
    pub room_type: Option<String>,

    /// New nightly rate
    #[arg(long, value_name = "AMOUNT")]
    pub price: Option<Price>,
}

impl UpdateRoomCommand {
    /// Execute the update-room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut update = RoomUpdate::default();
        if let Some(ref room_type) = self.room_type {
            update = update
                .room_type(room_type)
                .map_err(lakeside::Error::from)?;
        }
        if let Some(price) = self.price {
            update = update.price(price);
        }
        if update.is_empty() {
            return Err(CliError::InvalidArguments(
                "nothing to update (pass --type and/or --price)".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;
        let room = store.update_room(RoomId::new(self.id), &update)?;

        if !global.quiet {
            println!(
                "Room {} is now {} at {} per night",
                room.id(),
                room.room_type(),
                room.price()
            );
        }
        Ok(())
    }
}
