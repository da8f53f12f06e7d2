//! Configuration validation.

use crate::config::schema::{Config, ReservationConfig, MAX_CONFIRMATION_ATTEMPTS};
use crate::error::{Error, Result};

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use lakeside::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::defaults()).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref reservations) = config.reservations {
            Self::validate_reservations(reservations)?;
        }

        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        Ok(())
    }

    fn validate_reservations(section: &ReservationConfig) -> Result<()> {
        if section.lock_timeout_ms == Some(0) {
            return Err(Error::Validation {
                field: "reservations.lock_timeout_ms".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        if let Some(attempts) = section.confirmation_attempts {
            if attempts == 0 || attempts > MAX_CONFIRMATION_ATTEMPTS {
                return Err(Error::Validation {
                    field: "reservations.confirmation_attempts".into(),
                    message: format!(
                        "Must be between 1 and {MAX_CONFIRMATION_ATTEMPTS}, got {attempts}"
                    ),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_reservations(section: ReservationConfig) -> Config {
        Config {
            reservations: Some(section),
            ..Default::default()
        }
    }

    fn field_of(result: Result<()>) -> String {
        match result {
            Err(Error::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_and_default_config() {
        ConfigValidator::validate(&Config::default()).unwrap();
        ConfigValidator::validate(&Config::defaults()).unwrap();
    }

    #[test]
    fn test_zero_lock_timeout_rejected() {
        let config = with_reservations(ReservationConfig {
            lock_timeout_ms: Some(0),
            ..Default::default()
        });
        assert_eq!(
            field_of(ConfigValidator::validate(&config)),
            "reservations.lock_timeout_ms"
        );
    }

    #[test]
    fn test_attempt_bounds() {
        for attempts in [0, MAX_CONFIRMATION_ATTEMPTS + 1] {
            let config = with_reservations(ReservationConfig {
                confirmation_attempts: Some(attempts),
                ..Default::default()
            });
            assert_eq!(
                field_of(ConfigValidator::validate(&config)),
                "reservations.confirmation_attempts"
            );
        }
        for attempts in [1, MAX_CONFIRMATION_ATTEMPTS] {
            let config = with_reservations(ReservationConfig {
                confirmation_attempts: Some(attempts),
                ..Default::default()
            });
            ConfigValidator::validate(&config).unwrap();
        }
    }

    #[test]
    fn test_zero_busy_timeout_rejected() {
        let config = Config {
            maximum_lock_wait_seconds: Some(0),
            ..Default::default()
        };
        assert_eq!(
            field_of(ConfigValidator::validate(&config)),
            "maximum_lock_wait_seconds"
        );
    }
}
