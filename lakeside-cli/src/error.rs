//! CLI-specific error types with exit codes.
//!
//! Library errors are wrapped and mapped onto stable exit codes so that
//! scripts can tell an unavailable room apart from a busy database.

use lakeside::Error as LibError;
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Timed out waiting for a room or the database.
    Timeout(String),

    /// Data directory not found (and auto-init disabled).
    NoDataDirectory,

    /// Configuration error.
    Config(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Room unavailable, or room/booking not found
    /// - 2: Timeout waiting for a room or the database
    /// - 3: No data directory found
    /// - 4: Invalid arguments (including invalid dates and guest details)
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(lib_err) => match lib_err {
                LibError::RoomUnavailable { .. } | LibError::NotFound { .. } => 1,
                LibError::Timeout { .. } => 2,
                LibError::DataDirectoryNotFound { .. } => 3,
                LibError::InvalidRange { .. } | LibError::Validation { .. } => 4,
                LibError::Io(_) => 5,
                LibError::Configuration(_) => 7,
                _ => 6,
            },
            CliError::Timeout(_) => 2,
            CliError::NoDataDirectory => 3,
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Timeout(msg) => write!(f, "Timeout: {msg}"),
            CliError::NoDataDirectory => {
                write!(
                    f,
                    "Data directory not found (run `lakeside init` or drop --disable-autoinit)"
                )
            }
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::Timeout { .. } => CliError::Timeout(e.to_string()),
            LibError::DataDirectoryNotFound { .. } => CliError::NoDataDirectory,
            LibError::Io(io) => CliError::Io(io),
            other => CliError::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
