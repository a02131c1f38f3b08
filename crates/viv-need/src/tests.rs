//! Unit tests for viv-need.

use viv_core::Tick;

use crate::{Need, NeedKind, NeedSet};

fn hunger(level: f64) -> Need {
    // 1 unit/minute from `level`, critical at 20, max 100.
    Need::new(NeedKind::Hunger, level, 100.0, 1.0, 20.0)
}

mod need {
    use super::*;

    #[test]
    fn decay_is_linear_and_clamped() {
        let mut n = hunger(100.0);
        n.decay(30);
        assert_eq!(n.level(), 70.0);
        n.decay(1_000);
        assert_eq!(n.level(), 0.0);
    }

    #[test]
    fn monotonic_between_restorations() {
        let mut n = hunger(100.0);
        let mut prev = n.level();
        for _ in 0..50 {
            n.decay(3);
            assert!(n.level() <= prev);
            prev = n.level();
        }
    }

    #[test]
    fn restore_is_clamped_at_max() {
        let mut n = hunger(20.0);
        n.restore(50.0);
        assert_eq!(n.level(), 70.0);
        n.restore(500.0);
        assert_eq!(n.level(), 100.0);
        // Negative amounts never lower the level.
        n.restore(-10.0);
        assert_eq!(n.level(), 100.0);
    }

    #[test]
    fn time_to_threshold_exact() {
        // Level 100, threshold 20, rate 1/min → 80 minutes.
        assert_eq!(hunger(100.0).time_to_threshold(), Some(80));
    }

    #[test]
    fn time_to_threshold_rounds_up() {
        let n = Need::new(NeedKind::Hunger, 100.0, 100.0, 3.0, 20.0);
        // (100 - 20) / 3 = 26.67 → 27 minutes.
        assert_eq!(n.time_to_threshold(), Some(27));
    }

    #[test]
    fn zero_rate_never_crosses() {
        let n = Need::new(NeedKind::Income, 50.0, 100.0, 0.0, 20.0);
        assert_eq!(n.time_to_threshold(), None);
        assert_eq!(n.signed_minutes_to_threshold(), None);
        assert_eq!(n.threshold_crossing(Tick(0)), None);
    }

    #[test]
    fn already_critical() {
        let n = hunger(20.0);
        assert!(n.is_critical());
        assert_eq!(n.time_to_threshold(), Some(0));
        // A past crossing is not a future event.
        assert_eq!(n.threshold_crossing(Tick(100)), None);
    }

    #[test]
    fn signed_minutes_goes_negative_when_overdue() {
        let mut n = hunger(100.0);
        assert_eq!(n.signed_minutes_to_threshold(), Some(80.0));
        n.decay(90);
        assert_eq!(n.signed_minutes_to_threshold(), Some(-10.0));
    }

    #[test]
    fn threshold_crossing_is_absolute() {
        assert_eq!(hunger(100.0).threshold_crossing(Tick(5)), Some(Tick(85)));
    }

    #[test]
    fn reset_restores_initial_level() {
        let mut n = hunger(90.0);
        n.decay(40);
        n.reset();
        assert_eq!(n.level(), 90.0);
    }
}

mod set {
    use super::*;

    fn full_set() -> NeedSet {
        let mut set = NeedSet::new();
        set.insert(Need::new(NeedKind::Rest, 100.0, 100.0, 0.1, 30.0));
        set.insert(hunger(100.0));
        set
    }

    #[test]
    fn insert_get_and_len() {
        let set = full_set();
        assert_eq!(set.len(), 2);
        assert!(set.get(NeedKind::Hunger).is_some());
        assert!(set.get(NeedKind::Travel).is_none());
    }

    #[test]
    fn iteration_is_canonical_order() {
        let kinds: Vec<NeedKind> = full_set().iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NeedKind::Rest, NeedKind::Hunger]);
    }

    #[test]
    fn insert_replaces_same_kind() {
        let mut set = full_set();
        set.insert(hunger(5.0));
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(NeedKind::Hunger).unwrap().level(), 5.0);
    }

    #[test]
    fn decay_all_skips_restored_kind() {
        let mut set = full_set();
        set.decay_all(10, Some(NeedKind::Hunger));
        assert_eq!(set.get(NeedKind::Hunger).unwrap().level(), 100.0);
        assert_eq!(set.get(NeedKind::Rest).unwrap().level(), 99.0);
    }

    #[test]
    fn boundedness_holds_under_decay_and_restore() {
        let mut set = full_set();
        for _ in 0..100 {
            set.decay_all(37, None);
            for need in set.iter() {
                assert!(need.level() >= 0.0 && need.level() <= need.max);
            }
        }
        set.iter_mut().for_each(|n| n.restore(1_000.0));
        for need in set.iter() {
            assert!(need.level() <= need.max);
        }
    }
}
