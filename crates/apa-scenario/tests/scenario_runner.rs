use apa_scenario::{
    decay_series, feedback_comparison, run_analysis, strategy_table, ScenarioConfig,
    ScenarioError,
};
use apa_test_utils::{assert_close, assert_probabilities, interior_probability};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io::Write;

proptest! {
    #[test]
    fn prop_decay_curves_fall_with_depth(
        accuracies in proptest::collection::vec(interior_probability(), 1..6),
        max_agents in 1..30i32,
    ) {
        let series = decay_series(&accuracies, max_agents).unwrap();
        prop_assert_eq!(series.len(), accuracies.len());
        for s in &series {
            prop_assert_eq!(s.points.len(), max_agents as usize);
            let values: Vec<f64> = s.points.iter().map(|pt| pt.system_accuracy).collect();
            assert_probabilities(&values);
            prop_assert!(values.windows(2).all(|w| w[1] < w[0]));
        }
    }

    #[test]
    fn prop_comparison_sign_follows_accuracy(
        base in 0.1..0.9f64,
        step in 0.001..0.09f64,
        n in 1..20i32,
    ) {
        let up = feedback_comparison(n, base, base + step).unwrap();
        prop_assert!(up.improvement_pct > 0.0);
        let down = feedback_comparison(n, base + step, base).unwrap();
        prop_assert!(down.improvement_pct < 0.0);
    }
}

#[test]
fn sensitivity_table_matches_reference_analysis() {
    let rows = strategy_table(5, 0.90, &[0.01, 0.02, 0.03, 0.05, 0.10]).unwrap();
    let gains: Vec<f64> = rows
        .iter()
        .map(|r| (r.relative_gain_pct.unwrap() * 100.0).round() / 100.0)
        .collect();
    // 0.91^5, 0.92^5, 0.93^5, 0.95^5, 1.0^5 against 0.9^5
    assert_eq!(gains, vec![5.68, 11.62, 17.82, 31.04, 69.35]);
    assert_close(rows[4].improved_system_accuracy, 1.0, 1e-12);
}

#[test]
fn analysis_from_scenario_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[paper_example]
agent_count = 10

[decay]
accuracies = [0.8]
max_agents = 3

[[mechanisms.mechanisms]]
kind = "retry"
attempts = 2
"#
    )
    .unwrap();

    let config = ScenarioConfig::load(file.path()).unwrap();
    let report = run_analysis(&config).unwrap();

    assert_close(report.paper_example.base_system_accuracy, 0.348_678_440_1, 1e-9);
    assert_eq!(report.decay.len(), 1);
    assert_eq!(report.decay[0].points.len(), 3);
    assert_close(report.decay[0].points[2].system_accuracy, 0.512, 1e-12);
    assert_eq!(report.mechanisms.rows.len(), 1);
}

#[test]
fn missing_scenario_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ScenarioConfig::load(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ScenarioError::Io { .. }));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn zero_baseline_example_is_rejected_by_section() {
    let err = ScenarioConfig::from_toml_str("[paper_example]\nbase_accuracy = 0.0\n").unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::InvalidSection {
            section: "paper_example",
            ..
        }
    ));
    assert!(err.to_string().contains("paper_example"));
}

#[test]
fn analysis_with_failing_agents() {
    let config = ScenarioConfig::from_toml_str(
        r#"
[sensitivity]
base_accuracy = 0.0
deltas = [0.1]

[mechanisms]
base_accuracy = 0.0
"#,
    )
    .unwrap();
    let report = run_analysis(&config).unwrap();

    let row = &report.sensitivity.rows[0];
    assert_eq!(row.baseline_system_accuracy, 0.0);
    assert_eq!(row.relative_gain_pct, None);
    assert!(report.mechanisms.rows.iter().all(|r| r.relative_gain_pct.is_none()));

    let text = report.render_text();
    assert!(text.contains("(gain: n/a,"));
    assert!(text.contains("→ A=0.77378 (n/a)"));
}

#[test]
fn boundary_accuracies_hold_across_depths() {
    let series = decay_series(&[0.0, 1.0], 5).unwrap();
    for pt in &series[0].points {
        assert_eq!(pt.system_accuracy, 0.0);
    }
    for pt in &series[1].points {
        assert_eq!(pt.system_accuracy, 1.0);
    }

    let cmp = feedback_comparison(5, 1.0, 1.0).unwrap();
    assert_eq!(cmp.improvement_pct, 0.0);

    let rows = strategy_table(5, 0.0, &[0.1]).unwrap();
    assert_close(rows[0].exact, 1e-5, 1e-15);
    assert_eq!(rows[0].approx, 0.0);
}
