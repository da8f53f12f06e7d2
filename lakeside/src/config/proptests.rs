//! Property-based tests for configuration merging and validation.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat, ReservationConfig, MAX_CONFIRMATION_ATTEMPTS};
use super::validator::ConfigValidator;
use crate::date_range::TurnoverPolicy;
use proptest::prelude::*;

fn turnover_strategy() -> impl Strategy<Value = TurnoverPolicy> {
    prop_oneof![Just(TurnoverPolicy::SameDay), Just(TurnoverPolicy::Strict)]
}

fn format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Table),
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
        Just(OutputFormat::Tsv),
    ]
}

fn reservations_strategy() -> impl Strategy<Value = ReservationConfig> {
    (
        prop::option::of(1u64..=60_000),
        prop::option::of(1u32..=MAX_CONFIRMATION_ATTEMPTS),
        prop::option::of(turnover_strategy()),
    )
        .prop_map(|(lock_timeout_ms, confirmation_attempts, turnover)| ReservationConfig {
            lock_timeout_ms,
            confirmation_attempts,
            turnover,
        })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(reservations_strategy()),
        prop::option::of(1u64..=600),
        prop::option::of(any::<bool>()),
        prop::option::of(format_strategy()),
    )
        .prop_map(
            |(reservations, maximum_lock_wait_seconds, disable_autoinit, output_format)| Config {
                reservations,
                maximum_lock_wait_seconds,
                disable_autoinit,
                output_format,
            },
        )
}

proptest! {
    // Set fields of the higher layer always win; unset ones leave the lower layer alone
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(
            result.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(result.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
        prop_assert_eq!(result.output_format, high.output_format.or(low.output_format));

        let low_settings = low.coordinator_settings();
        let high_section = high.reservations.clone().unwrap_or_default();
        let settings = result.coordinator_settings();
        prop_assert_eq!(settings.turnover, high_section.turnover.unwrap_or(low_settings.turnover));
        prop_assert_eq!(
            settings.code_attempts,
            high_section.confirmation_attempts.unwrap_or(low_settings.code_attempts)
        );
    }

    #[test]
    fn config_merge_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    #[test]
    fn config_merge_associative(
        a in config_strategy(),
        b in config_strategy(),
        c in config_strategy()
    ) {
        let mut left = a.clone();
        ConfigMerger::merge_into(&mut left, &b);
        ConfigMerger::merge_into(&mut left, &c);

        let mut b_then_c = b;
        ConfigMerger::merge_into(&mut b_then_c, &c);
        let mut right = a;
        ConfigMerger::merge_into(&mut right, &b_then_c);

        prop_assert_eq!(left, right);
    }

    // Anything the strategy generates stays within the accepted bounds
    #[test]
    fn generated_configs_validate(config in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn too_many_attempts_rejected(attempts in (MAX_CONFIRMATION_ATTEMPTS + 1)..=1000) {
        let config = Config {
            reservations: Some(ReservationConfig {
                confirmation_attempts: Some(attempts),
                ..Default::default()
            }),
            ..Default::default()
        };
        prop_assert!(ConfigValidator::validate(&config).is_err());
    }
}
