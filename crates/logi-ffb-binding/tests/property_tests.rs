//! Property-based tests for binding value types.

use logi_ffb_binding::prelude::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_saturating_force_always_bounded(percent in any::<i32>()) {
        let force = ForceCommand::saturating(percent);
        prop_assert!((-100..=100).contains(&force.percent()));
    }

    #[test]
    fn prop_saturating_matches_new_inside_domain(percent in -100i32..=100) {
        prop_assert_eq!(ForceCommand::new(percent), Some(ForceCommand::saturating(percent)));
    }

    #[test]
    fn prop_new_rejects_outside_domain(percent in prop_oneof![i32::MIN..-100, 101..i32::MAX]) {
        prop_assert!(ForceCommand::new(percent).is_none());
    }

    #[test]
    fn prop_saturating_is_monotonic(a in any::<i32>(), b in any::<i32>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ForceCommand::saturating(lo) <= ForceCommand::saturating(hi));
    }
}
