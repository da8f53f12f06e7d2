//! Available command implementation.
//!
//! Lists the rooms that are free for every night of a stay.

use crate::error::CliError;
use crate::output::{resolve_format, write_rooms};
use crate::utils::{load_configuration, open_coordinator, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use lakeside::config::OutputFormat;
use lakeside::DateRange;

/// List rooms free for a stay.
#[derive(Args)]
pub struct AvailableCommand {
    /// First night of the stay (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: NaiveDate,

    /// Departure day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_out: NaiveDate,

    /// Only rooms of this type (case-insensitive)
    #[arg(long = "type", value_name = "TYPE", default_value = "")]
    pub room_type: String,

    /// Output format (table, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl AvailableCommand {
    /// Execute the available command.
    ///
    /// An empty result is not an error.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let range = DateRange::new(self.check_in, self.check_out).map_err(lakeside::Error::from)?;

        let config = load_configuration(global)?;
        let coordinator = open_coordinator(global, &config)?;
        let rooms = coordinator.find_available_rooms(range, &self.room_type)?;

        let format = resolve_format(self.format, &config);
        write_rooms(&mut std::io::stdout().lock(), &rooms, format)
    }
}
