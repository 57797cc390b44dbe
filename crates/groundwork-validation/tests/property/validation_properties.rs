use groundwork_validation::calculate_confidence;
use proptest::prelude::*;

proptest! {
    #[test]
    fn confidence_is_bounded(faithful in any::<bool>(), score in -2.0f64..3.0, sourced in any::<bool>()) {
        let c = calculate_confidence(faithful, score, sourced);
        prop_assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn confidence_never_rises_with_risk(a in 0.0f64..1.0, b in 0.0f64..1.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(calculate_confidence(true, high, true) <= calculate_confidence(true, low, true));
    }

    #[test]
    fn unfaithful_is_capped(score in 0.0f64..1.0, sourced in any::<bool>()) {
        prop_assert_eq!(calculate_confidence(false, score, sourced), 0.3);
    }
}
