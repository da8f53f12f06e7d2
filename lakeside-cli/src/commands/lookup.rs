//! Lookup command implementation.

use crate::error::CliError;
use crate::output::{resolve_format, write_booking_detail};
use crate::utils::{load_configuration, open_coordinator, GlobalOptions};
use clap::Args;
use lakeside::config::OutputFormat;
use lakeside::ConfirmationCode;

/// Show the booking behind a confirmation code.
#[derive(Args)]
pub struct LookupCommand {
    /// Ten-digit confirmation code
    #[arg(value_name = "CODE")]
    pub code: String,

    /// Output format (table, json, csv, tsv)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,
}

impl LookupCommand {
    /// Execute the lookup command.
    ///
    /// Exits with code 1 if no booking carries the code.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let code = ConfirmationCode::parse(&self.code).map_err(lakeside::Error::from)?;

        let config = load_configuration(global)?;
        let coordinator = open_coordinator(global, &config)?;
        let booking = coordinator.by_confirmation_code(&code)?;

        let format = resolve_format(self.format, &config);
        write_booking_detail(&mut std::io::stdout().lock(), &booking, format)
    }
}
