//! Property-based tests for `DateRange` overlap semantics.

use super::{DateRange, TurnoverPolicy};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

// Ranges within a two-year window, one to thirty nights long
fn range_strategy() -> impl Strategy<Value = DateRange> {
    (0u64..730, 1u64..=30).prop_map(|(offset, nights)| {
        let check_in = base() + Days::new(offset);
        DateRange::new(check_in, check_in + Days::new(nights)).unwrap()
    })
}

fn policy_strategy() -> impl Strategy<Value = TurnoverPolicy> {
    prop_oneof![Just(TurnoverPolicy::SameDay), Just(TurnoverPolicy::Strict)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn overlap_is_symmetric(a in range_strategy(), b in range_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn conflict_is_symmetric(a in range_strategy(), b in range_strategy(), policy in policy_strategy()) {
        prop_assert_eq!(a.conflicts_with(&b, policy), b.conflicts_with(&a, policy));
    }

    #[test]
    fn range_overlaps_itself(a in range_strategy()) {
        prop_assert!(a.overlaps(&a));
    }

    // Overlap means at least one night is shared
    #[test]
    fn overlap_matches_shared_night(a in range_strategy(), b in range_strategy()) {
        let shared = a.check_in().iter_days()
            .take_while(|d| *d < a.check_out())
            .any(|d| b.contains(d));
        prop_assert_eq!(a.overlaps(&b), shared);
    }

    #[test]
    fn back_to_back_never_overlaps(a in range_strategy(), nights in 1u64..=30) {
        let next = DateRange::new(a.check_out(), a.check_out() + Days::new(nights)).unwrap();
        prop_assert!(!a.overlaps(&next));
        prop_assert!(a.conflicts_with(&next, TurnoverPolicy::Strict));
    }

    #[test]
    fn strict_conflicts_superset_of_same_day(a in range_strategy(), b in range_strategy()) {
        if a.conflicts_with(&b, TurnoverPolicy::SameDay) {
            prop_assert!(a.conflicts_with(&b, TurnoverPolicy::Strict));
        }
    }

    #[test]
    fn nights_matches_length(offset in 0u64..730, nights in 1u64..=30) {
        let check_in = base() + Days::new(offset);
        let r = DateRange::new(check_in, check_in + Days::new(nights)).unwrap();
        prop_assert_eq!(r.nights(), nights);
    }
}
