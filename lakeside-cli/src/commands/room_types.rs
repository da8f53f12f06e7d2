//! Room-types command implementation.

use crate::error::CliError;
use crate::output::{resolve_format, write_room_types};
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;
use lakeside::config::OutputFormat;
use lakeside::RoomCatalog;

/// List the distinct room types.
#[derive(Args)]
pub struct RoomTypesCommand {
    /// Output format (table, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl RoomTypesCommand {
    /// Execute the room-types command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;
        let types = store.list_room_types()?;

        let format = resolve_format(self.format, &config);
        write_room_types(&mut std::io::stdout().lock(), &types, format)
    }
}
