use apa_model::{
    exact_improvement, feedback_improvement, sensitivity, system_accuracy, Ensemble,
    FeedbackMechanism, ModelError, Retry, SelfCheck, Verification,
};
use apa_test_utils::{
    agent_count, assert_close, interior_probability, invalid_probability, probability,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_accuracy_is_power_and_probability(p in probability(), n in agent_count()) {
        let a = system_accuracy(p, n).unwrap();
        prop_assert_eq!(a, p.powi(n));
        prop_assert!((0.0..=1.0).contains(&a));
    }

    #[test]
    fn prop_vacuous_pipeline_is_perfect(p in probability()) {
        prop_assert_eq!(system_accuracy(p, 0).unwrap(), 1.0);
    }

    #[test]
    fn prop_strictly_decreasing_in_depth(p in interior_probability(), n in 0..40i32) {
        let shallow = system_accuracy(p, n).unwrap();
        let deep = system_accuracy(p, n + 1).unwrap();
        prop_assert!(deep < shallow);
    }

    #[test]
    fn prop_strictly_increasing_in_accuracy(
        p in 0.01..0.98f64,
        step in 0.001..0.01f64,
        n in 1..40i32,
    ) {
        let low = system_accuracy(p, n).unwrap();
        let high = system_accuracy(p + step, n).unwrap();
        prop_assert!(high > low);
    }

    #[test]
    fn prop_sensitivity_matches_forward_difference(p in 0.0..0.99f64, n in agent_count()) {
        let eps = 1e-6;
        let numeric = (system_accuracy(p + eps, n).unwrap() - system_accuracy(p, n).unwrap()) / eps;
        let analytic = sensitivity(p, n).unwrap();
        prop_assert!(analytic >= 0.0);
        // Truncation error is bounded by n(n-1)/2 * eps.
        prop_assert!(
            (numeric - analytic).abs() <= 2e-3,
            "numeric {} analytic {}",
            numeric,
            analytic
        );
    }

    #[test]
    fn prop_linear_estimate_is_second_order_close(
        p in interior_probability(),
        delta in 0.0..0.01f64,
        n in 1..20i32,
    ) {
        prop_assume!(p + delta <= 1.0);
        let approx = feedback_improvement(p, n, delta).unwrap();
        let exact = exact_improvement(p, n, delta).unwrap();
        let bound = f64::from(n * n) * delta * delta;
        prop_assert!((exact - approx).abs() <= bound + 1e-12);
    }

    #[test]
    fn prop_invalid_probability_rejected(p in invalid_probability(), n in agent_count()) {
        let is_invalid = matches!(system_accuracy(p, n), Err(ModelError::InvalidParameter { .. }));
        prop_assert!(is_invalid);
    }

    #[test]
    fn prop_negative_depth_rejected(p in probability(), n in -1000..0i32) {
        let err = system_accuracy(p, n).unwrap_err();
        prop_assert_eq!(err.parameter(), "n");
    }

    #[test]
    fn prop_mechanisms_never_lower_accuracy(
        p in probability(),
        v in probability(),
        attempts in 1..6u32,
    ) {
        let mechanisms: Vec<Box<dyn FeedbackMechanism>> = vec![
            Box::new(Verification::new(v).unwrap()),
            Box::new(SelfCheck::new(v).unwrap()),
            Box::new(Retry::new(attempts).unwrap()),
        ];
        for mechanism in &mechanisms {
            let improved = mechanism.effective_accuracy(p).unwrap();
            prop_assert!(
                improved >= p - 1e-12,
                "{} lowered {} to {}",
                mechanism.label(),
                p,
                improved
            );
            prop_assert!(improved <= 1.0);
        }
    }

    #[test]
    fn prop_ensemble_amplifies_majority_correct_agents(
        p in 0.5..=1.0f64,
        members in (0..20u32).prop_map(|k| 2 * k + 1),
    ) {
        let ensemble = Ensemble::new(members).unwrap();
        let improved = ensemble.effective_accuracy(p).unwrap();
        prop_assert!(
            improved >= p - 1e-9,
            "{} lowered {} to {}",
            ensemble.label(),
            p,
            improved
        );
        prop_assert!(improved <= 1.0);
    }
}

#[test]
fn reference_scenarios() {
    assert_close(system_accuracy(0.9, 5).unwrap(), 0.59049, 1e-5);
    assert_close(system_accuracy(0.9, 10).unwrap(), 0.34868, 1e-5);
    assert_close(system_accuracy(0.8, 5).unwrap(), 0.32768, 1e-5);
}

#[test]
fn out_of_domain_inputs_rejected() {
    for (p, n) in [(-0.1, 3), (1.1, 3), (0.5, -1)] {
        assert!(matches!(
            system_accuracy(p, n),
            Err(ModelError::InvalidParameter { .. })
        ));
    }
}
