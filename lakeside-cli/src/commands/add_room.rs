//! Add-room command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;
use lakeside::{NewRoom, Price};

/// Add a room to the catalog.
#[derive(Args)]
pub struct AddRoomCommand {
    /// Room type, e.g. "Double"
    #[arg(long = "type", value_name = "TYPE")]
    pub room_type: String,

    /// Nightly rate, e.g. 120.00
    #[arg(long, value_name = "AMOUNT")]
    pub price: Price,
}

impl AddRoomCommand {
    /// Execute the add-room command.
    ///
    /// Prints the new room's id on stdout.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;

        let new_room = NewRoom::new(&self.room_type, self.price).map_err(lakeside::Error::from)?;
        let room = store.add_room(&new_room)?;

        println!("{}", room.id());
        if !global.quiet {
            eprintln!(
                "Added room {} ({}, {} per night)",
                room.id(),
                room.room_type(),
                room.price()
            );
        }
        Ok(())
    }
}
