//! Configuration schema definitions.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::coordinator::CoordinatorSettings;
use crate::date_range::TurnoverPolicy;
use crate::error::Result;

/// Default per-room lock bound, in milliseconds.
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;

/// Default number of confirmation codes tried per booking.
pub const DEFAULT_CONFIRMATION_ATTEMPTS: u32 = 5;

/// Upper bound accepted for `reservations.confirmation_attempts`.
pub const MAX_CONFIRMATION_ATTEMPTS: u32 = 20;

/// Default SQLite busy timeout, in seconds.
pub const DEFAULT_MAXIMUM_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that partial files can be layered on top of
/// each other; [`Config::defaults`] fills in the built-in values.
///
/// # Examples
///
/// ```
/// use lakeside::config::{Config, OutputFormat};
///
/// let config = Config::from_yaml("output_format: json\n").unwrap();
/// assert_eq!(config.output_format, Some(OutputFormat::Json));
/// assert!(config.reservations.is_none());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Admission settings.
    pub reservations: Option<ReservationConfig>,

    /// Maximum time to wait for the database lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

/// The `reservations` section.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ReservationConfig {
    /// How long a request may wait for its room's lock (milliseconds).
    pub lock_timeout_ms: Option<u64>,

    /// How many confirmation codes to try before giving up.
    pub confirmation_attempts: Option<u32>,

    /// Whether back-to-back stays may share a turnover date.
    pub turnover: Option<TurnoverPolicy>,
}

impl Config {
    /// Returns the built-in defaults with every field set.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            reservations: Some(ReservationConfig {
                lock_timeout_ms: Some(DEFAULT_LOCK_TIMEOUT_MS),
                confirmation_attempts: Some(DEFAULT_CONFIRMATION_ATTEMPTS),
                turnover: Some(TurnoverPolicy::default()),
            }),
            maximum_lock_wait_seconds: Some(DEFAULT_MAXIMUM_LOCK_WAIT_SECONDS),
            disable_autoinit: Some(false),
            output_format: Some(OutputFormat::default()),
        }
    }

    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] if the YAML is malformed or
    /// names an unknown field.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        // An empty document is an empty configuration, not an error
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Builds the admission settings, falling back to defaults for unset fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use lakeside::config::Config;
    /// use lakeside::TurnoverPolicy;
    ///
    /// let config = Config::from_yaml("reservations:\n  turnover: strict\n").unwrap();
    /// let settings = config.coordinator_settings();
    /// assert_eq!(settings.turnover, TurnoverPolicy::Strict);
    /// assert_eq!(settings.code_attempts, 5);
    /// ```
    #[must_use]
    pub fn coordinator_settings(&self) -> CoordinatorSettings {
        let section = self.reservations.clone().unwrap_or_default();
        CoordinatorSettings {
            lock_timeout: Duration::from_millis(
                section.lock_timeout_ms.unwrap_or(DEFAULT_LOCK_TIMEOUT_MS),
            ),
            code_attempts: section
                .confirmation_attempts
                .unwrap_or(DEFAULT_CONFIRMATION_ATTEMPTS),
            turnover: section.turnover.unwrap_or_default(),
        }
    }

    /// The SQLite busy timeout.
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_MAXIMUM_LOCK_WAIT_SECONDS),
        )
    }

    /// Whether opening a missing database should fail instead of creating it.
    #[must_use]
    pub fn autoinit_disabled(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use lakeside::config::OutputFormat;
///
/// let format: OutputFormat = "TSV".parse().unwrap();
/// assert_eq!(format, OutputFormat::Tsv);
/// assert_eq!(format.to_string(), "tsv");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            _ => Err(format!(
                "invalid output format: {s} (expected table, json, csv or tsv)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_defaults_are_complete() {
        let config = Config::defaults();
        let reservations = config.reservations.as_ref().unwrap();
        assert_eq!(reservations.lock_timeout_ms, Some(5000));
        assert_eq!(reservations.confirmation_attempts, Some(5));
        assert_eq!(reservations.turnover, Some(TurnoverPolicy::SameDay));
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
        assert!(!config.autoinit_disabled());
        assert_eq!(config.output_format, Some(OutputFormat::Table));
    }

    #[test]
    fn test_settings_from_empty_config() {
        assert_eq!(
            Config::default().coordinator_settings(),
            CoordinatorSettings::default()
        );
    }

    #[test]
    fn test_complete_config() {
        let yaml = r"
reservations:
  lock_timeout_ms: 250
  confirmation_attempts: 8
  turnover: strict
maximum_lock_wait_seconds: 2
disable_autoinit: true
output_format: csv
";
        let config = Config::from_yaml(yaml).unwrap();
        let settings = config.coordinator_settings();
        assert_eq!(settings.lock_timeout, Duration::from_millis(250));
        assert_eq!(settings.code_attempts, 8);
        assert_eq!(settings.turnover, TurnoverPolicy::Strict);
        assert_eq!(config.busy_timeout(), Duration::from_secs(2));
        assert!(config.autoinit_disabled());
        assert_eq!(config.output_format, Some(OutputFormat::Csv));
    }

    #[test]
    fn test_config_deny_unknown_fields() {
        let err = Config::from_yaml("rates:\n  weekend: 1.2\n").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));

        let err = Config::from_yaml("reservations:\n  overbook: true\n").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(" Table ".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
