//! Rooms command implementation.
//!
//! Lists the catalog, optionally narrowed to one room type.

use crate::error::CliError;
use crate::output::{resolve_format, write_rooms};
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;
use lakeside::config::OutputFormat;
use lakeside::RoomCatalog;

/// List rooms.
#[derive(Args)]
pub struct RoomsCommand {
    /// Only rooms of this type (case-insensitive)
    #[arg(long = "type", value_name = "TYPE")]
    pub room_type: Option<String>,

    /// Output format (table, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl RoomsCommand {
    /// Execute the rooms command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;

        let rooms = match self.room_type.as_deref() {
            Some(t) if !t.trim().is_empty() => store.list_rooms_by_type(t)?,
            _ => store.list_rooms()?,
        };

        let format = resolve_format(self.format, &config);
        write_rooms(&mut std::io::stdout().lock(), &rooms, format)
    }
}
