//! Property-based tests for guest head counts and confirmation codes.

use super::{ConfirmationCode, GuestInfo};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Total stays equal to adults + children through any sequence of updates
    #[test]
    fn total_guests_tracks_counts(
        adults in 1u32..10,
        children in 0u32..10,
        updates in prop::collection::vec((any::<bool>(), 0u32..10), 0..20),
    ) {
        let mut guest = GuestInfo::builder("Guest", "guest@example.com")
            .adults(adults)
            .children(children)
            .build()
            .unwrap();

        for (is_adult, n) in updates {
            if is_adult {
                let _ = guest.set_adults(n);
            } else {
                guest.set_children(n);
            }
            prop_assert_eq!(guest.total_guests(), guest.adults() + guest.children());
            prop_assert!(guest.adults() >= 1);
        }
    }

    #[test]
    fn ten_digit_strings_are_codes(code in "[0-9]{10}") {
        let parsed = ConfirmationCode::parse(&code).unwrap();
        prop_assert_eq!(parsed.as_str(), code.as_str());
    }

    #[test]
    fn other_lengths_are_rejected(code in "[0-9]{0,9}|[0-9]{11,15}") {
        prop_assert!(ConfirmationCode::parse(&code).is_err());
    }
}
