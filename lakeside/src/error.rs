//! Error types for the lakeside library.
//!
//! Every fallible operation in the crate returns [`Result`], whose error side
//! is the [`Error`] enum below. Business rejections (`InvalidRange`,
//! `NotFound`, `RoomUnavailable`) are kept apart from transient and
//! infrastructure failures so that callers can decide what to present and
//! what to retry.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::booking::RoomId;
use crate::date_range::DateRange;

/// Result type alias for operations that may fail with a lakeside error.
///
/// # Examples
///
/// ```
/// use lakeside::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the lakeside library.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested stay does not end strictly after it starts.
    #[error("invalid date range {check_in}..{check_out}: {reason}")]
    InvalidRange {
        /// Requested check-in date.
        check_in: NaiveDate,
        /// Requested check-out date.
        check_out: NaiveDate,
        /// Why the range was rejected.
        reason: String,
    },

    /// The referenced room or booking does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// An existing booking (or a concurrent writer that won) occupies the range.
    #[error("room {room} is not available for {range}")]
    RoomUnavailable {
        /// The room that was requested.
        room: RoomId,
        /// The range that was requested.
        range: DateRange,
    },

    /// A per-room lock or a store call exceeded its bound.
    #[error("timed out after {waited_ms}ms waiting for {what}")]
    Timeout {
        /// What the caller was waiting on.
        what: String,
        /// How long the caller waited, in milliseconds.
        waited_ms: u64,
    },

    /// Every generated confirmation code was already taken.
    #[error("could not allocate a unique confirmation code after {attempts} attempt(s)")]
    ConfirmationCodeCollision {
        /// Number of codes tried.
        attempts: u32,
    },

    /// The store rejected a booking because its confirmation code is in use.
    ///
    /// Raised by [`crate::BookingStore::save`]; the coordinator retries it.
    #[error("confirmation code {code} is already in use")]
    ConfirmationCodeTaken {
        /// The duplicate code.
        code: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },
}

impl From<crate::date_range::InvalidDateRangeError> for Error {
    fn from(err: crate::date_range::InvalidDateRangeError) -> Self {
        Self::InvalidRange {
            check_in: err.check_in,
            check_out: err.check_out,
            reason: err.reason,
        }
    }
}

impl From<crate::booking::ValidationError> for Error {
    fn from(err: crate::booking::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Builds a [`Error::NotFound`] for a resource description.
    pub(crate) fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Check if the error reports a missing room or booking.
    ///
    /// # Examples
    ///
    /// ```
    /// use lakeside::Error;
    ///
    /// let err = Error::NotFound { resource: "booking 7".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if retrying the same request may succeed.
    ///
    /// Only timeouts qualify. An unavailable room stays unavailable until
    /// somebody cancels, so it is not retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if the error is an expected, caller-facing business outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// use lakeside::Error;
    ///
    /// let err = Error::ConfirmationCodeCollision { attempts: 5 };
    /// assert!(!err.is_business_rejection());
    /// ```
    #[must_use]
    pub fn is_business_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidRange { .. }
                | Self::NotFound { .. }
                | Self::RoomUnavailable { .. }
                | Self::Validation { .. }
        )
    }
}
