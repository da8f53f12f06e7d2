//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_coordinator, GlobalOptions};
use clap::Args;
use lakeside::{BookingId, ConfirmationCode};

/// Cancel a booking by id or by confirmation code.
#[derive(Args)]
pub struct CancelCommand {
    /// Booking id
    #[arg(value_name = "BOOKING_ID", conflicts_with = "code", required_unless_present = "code")]
    pub id: Option<i64>,

    /// Confirmation code of the booking
    #[arg(long, value_name = "CODE")]
    pub code: Option<String>,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let code = self
            .code
            .as_deref()
            .map(ConfirmationCode::parse)
            .transpose()
            .map_err(lakeside::Error::from)?;

        let config = load_configuration(global)?;
        let coordinator = open_coordinator(global, &config)?;

        let booking_id = match (self.id, code) {
            (Some(id), _) => BookingId::new(id),
            (None, Some(code)) => coordinator.by_confirmation_code(&code)?.id(),
            (None, None) => {
                return Err(CliError::InvalidArguments(
                    "pass a booking id or --code".to_string(),
                ))
            }
        };

        let booking = coordinator.cancel(booking_id)?;
        if !global.quiet {
            println!(
                "Cancelled booking {} ({}) for room {}, {}",
                booking.id(),
                booking.confirmation_code(),
                booking.room_id(),
                booking.range()
            );
        }
        Ok(())
    }
}
