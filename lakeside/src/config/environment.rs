//! Environment variable handling for configuration overrides.
//!
//! `LAKESIDE_DATA_DIR` is not read here; it selects the data directory
//! before any configuration is loaded (see [`crate::database::resolve_data_dir`]).

use std::env;
use std::str::FromStr;

use crate::config::schema::{Config, OutputFormat};
use crate::date_range::TurnoverPolicy;
use crate::error::{Error, Result};

/// Overrides `reservations.lock_timeout_ms`.
pub const LOCK_TIMEOUT_MS_ENV: &str = "LAKESIDE_LOCK_TIMEOUT_MS";
/// Overrides `reservations.confirmation_attempts`.
pub const CONFIRMATION_ATTEMPTS_ENV: &str = "LAKESIDE_CONFIRMATION_ATTEMPTS";
/// Overrides `reservations.turnover`.
pub const TURNOVER_ENV: &str = "LAKESIDE_TURNOVER";
/// Overrides `maximum_lock_wait_seconds`.
pub const MAXIMUM_LOCK_WAIT_SECONDS_ENV: &str = "LAKESIDE_MAXIMUM_LOCK_WAIT_SECONDS";
/// Overrides `disable_autoinit`.
pub const DISABLE_AUTOINIT_ENV: &str = "LAKESIDE_DISABLE_AUTOINIT";
/// Overrides `output_format`.
pub const OUTPUT_FORMAT_ENV: &str = "LAKESIDE_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use lakeside::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Applies `LAKESIDE_*` variables from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the variable if a value cannot be
    /// parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        Self::apply_from(config, |name| env::var(name).ok())
    }

    /// Applies overrides read through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// See [`Self::apply_overrides`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lakeside::config::{Config, EnvironmentConfig};
    ///
    /// let mut config = Config::default();
    /// EnvironmentConfig::apply_from(&mut config, |name| {
    ///     (name == "LAKESIDE_TURNOVER").then(|| "strict".to_string())
    /// })
    /// .unwrap();
    /// assert!(config.reservations.unwrap().turnover.is_some());
    /// ```
    pub fn apply_from<F>(config: &mut Config, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(LOCK_TIMEOUT_MS_ENV) {
            let ms = Self::parse_number(LOCK_TIMEOUT_MS_ENV, &val)?;
            config
                .reservations
                .get_or_insert_with(Default::default)
                .lock_timeout_ms = Some(ms);
        }

        if let Some(val) = lookup(CONFIRMATION_ATTEMPTS_ENV) {
            let attempts = Self::parse_number(CONFIRMATION_ATTEMPTS_ENV, &val)?;
            config
                .reservations
                .get_or_insert_with(Default::default)
                .confirmation_attempts = Some(attempts);
        }

        if let Some(val) = lookup(TURNOVER_ENV) {
            let turnover = TurnoverPolicy::from_str(&val).map_err(|message| Error::Validation {
                field: TURNOVER_ENV.into(),
                message,
            })?;
            config
                .reservations
                .get_or_insert_with(Default::default)
                .turnover = Some(turnover);
        }

        if let Some(val) = lookup(MAXIMUM_LOCK_WAIT_SECONDS_ENV) {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number(MAXIMUM_LOCK_WAIT_SECONDS_ENV, &val)?);
        }

        if let Some(val) = lookup(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        if let Some(val) = lookup(OUTPUT_FORMAT_ENV) {
            let format = OutputFormat::from_str(&val).map_err(|message| Error::Validation {
                field: OUTPUT_FORMAT_ENV.into(),
                message,
            })?;
            config.output_format = Some(format);
        }

        Ok(())
    }

    /// Parses a boolean value.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Must be a non-negative integer, got '{s}'"),
        })
    }
}
