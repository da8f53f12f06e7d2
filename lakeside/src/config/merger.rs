//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, ReservationConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use lakeside::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(1), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(9), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(9));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges sources given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merges `source` into `target`; set fields in `source` win.
    ///
    /// The `reservations` section is merged field by field.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_reservations) = source.reservations {
            target.reservations = Some(match &target.reservations {
                Some(target_reservations) => {
                    Self::merge_reservations(target_reservations, source_reservations)
                }
                None => source_reservations.clone(),
            });
        }
    }

    fn merge_reservations(target: &ReservationConfig, source: &ReservationConfig) -> ReservationConfig {
        ReservationConfig {
            lock_timeout_ms: source.lock_timeout_ms.or(target.lock_timeout_ms),
            confirmation_attempts: source.confirmation_attempts.or(target.confirmation_attempts),
            turnover: source.turnover.or(target.turnover),
        }
    }
}
