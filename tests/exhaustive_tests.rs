//! All-possible and best-subset regression tests.

mod common;

use approx::assert_relative_eq;
use regress_select::core::{Dataset, PredictorSet};
use regress_select::selection::{
    all_possible, best_subset, Direction, ErrorKind, Reportable, SelectionError, SelectionOutcome,
    SubsetMetric, VariableSelector,
};
use regress_select::utils::binomial;

fn subset(names: &[&str]) -> PredictorSet {
    PredictorSet::from_names(names.iter().copied())
}

// ============================================================================
// Two-Predictor Scenario
// ============================================================================

#[test]
fn test_disp_hp_has_three_subsets() {
    let data = common::mtcars_disp_hp();
    let table = all_possible(&data).expect("enumeration should succeed");

    assert_eq!(table.n_subsets(), 3);
    let labels: Vec<String> = table.rows.iter().map(|r| r.predictors.to_string()).collect();
    // disp has the larger R² of the single-predictor models.
    assert_eq!(labels, ["disp", "hp", "disp hp"]);
    let indices: Vec<usize> = table.rows.iter().map(|r| r.index).collect();
    assert_eq!(indices, [1, 2, 3]);
}

#[test]
fn test_disp_hp_metrics() {
    let data = common::mtcars_disp_hp();
    let table = all_possible(&data).expect("enumeration should succeed");

    let disp = table.find(&subset(&["disp"])).expect("disp row").metrics;
    assert_relative_eq!(disp.r_squared, 0.7183433404897299, epsilon = 1e-10);
    assert_relative_eq!(disp.adj_r_squared, 0.7089547851727209, epsilon = 1e-10);
    assert_relative_eq!(disp.aic, 170.2093890987089, epsilon = 1e-8);
    assert_relative_eq!(disp.cp, 4.443791835760379, epsilon = 1e-8);
    assert_relative_eq!(disp.predicted_r_squared, 0.6751205414778463, epsilon = 1e-8);

    let hp = table.find(&subset(&["hp"])).expect("hp row").metrics;
    assert_relative_eq!(hp.r_squared, 0.6024373414239341, epsilon = 1e-10);
    assert_relative_eq!(hp.aic, 181.23862889447577, epsilon = 1e-8);
    assert_relative_eq!(hp.cp, 17.794905609334762, epsilon = 1e-8);

    let both = table.find(&subset(&["disp", "hp"])).expect("full row").metrics;
    assert_relative_eq!(both.r_squared, 0.7482401820617403, epsilon = 1e-10);
    assert_relative_eq!(both.aic, 168.61856413576282, epsilon = 1e-8);
    assert_relative_eq!(both.cp, 3.0, epsilon = 1e-9);
    assert_relative_eq!(both.predicted_r_squared, 0.694543803290716, epsilon = 1e-8);
}

#[test]
fn test_disp_hp_best_subset_by_r_squared() {
    let data = common::mtcars_disp_hp();
    let best = best_subset(&data, SubsetMetric::RSquared).expect("enumeration should succeed");

    assert_eq!(best.rows.len(), 2);
    assert_eq!(best.rows[0].predictors.to_string(), "disp");
    assert_eq!(best.rows[1].predictors.to_string(), "disp hp");
    assert!(best.rows[1].metrics.r_squared > best.rows[0].metrics.r_squared);

    let overall = best.best_overall().expect("non-empty");
    assert_eq!(overall.size, 2);
}

#[test]
fn test_sas_aic_in_table() {
    let data = common::mtcars_disp_hp();
    let table = VariableSelector::builder()
        .direction(Direction::Exhaustive)
        .ic_method(regress_select::selection::IcMethod::Sas)
        .build()
        .and_then(|s| s.select(&data))
        .ok()
        .and_then(SelectionOutcome::into_all_possible)
        .expect("enumeration should succeed");

    let disp = table.find(&subset(&["disp"])).expect("disp row");
    assert_relative_eq!(disp.metrics.aic, 77.39732297360985, epsilon = 1e-8);
    let hp = table.find(&subset(&["hp"])).expect("hp row");
    assert_relative_eq!(hp.metrics.aic, 88.42656276937673, epsilon = 1e-8);
}

// ============================================================================
// Four-Predictor Enumeration
// ============================================================================

#[test]
fn test_subset_count_is_two_to_the_p_minus_one() {
    let data = common::mtcars();
    let table = all_possible(&data).expect("enumeration should succeed");
    assert_eq!(table.n_subsets(), 15);

    for k in 1..=4 {
        assert_eq!(table.rows_of_size(k).count(), binomial(4, k));
    }
}

#[test]
fn test_max_order_caps_subset_size() {
    let data = common::mtcars();
    for m in 1..=4 {
        let table = VariableSelector::builder()
            .direction(Direction::Exhaustive)
            .max_order(m)
            .build()
            .and_then(|s| s.select(&data))
            .ok()
            .and_then(SelectionOutcome::into_all_possible)
            .expect("enumeration should succeed");

        let expected: usize = (1..=m).map(|k| binomial(4, k)).sum();
        assert_eq!(table.n_subsets(), expected);
        assert!(table.rows.iter().all(|r| r.size <= m));
    }
}

#[test]
fn test_rows_grouped_then_sorted() {
    let data = common::mtcars();
    let table = all_possible(&data).expect("enumeration should succeed");

    let first_group: Vec<String> = table.rows_of_size(1).map(|r| r.predictors.to_string()).collect();
    assert_eq!(first_group, ["wt", "disp", "hp", "qsec"]);

    let second_group: Vec<String> =
        table.rows_of_size(2).map(|r| r.predictors.to_string()).collect();
    assert_eq!(second_group[0], "hp wt");
    assert_eq!(second_group[1], "wt qsec");

    for (i, row) in table.rows.iter().enumerate() {
        assert_eq!(row.index, i + 1);
    }
    let last = table.rows.last().expect("rows");
    assert_relative_eq!(last.metrics.cp, 5.0, epsilon = 1e-9);
    assert_relative_eq!(last.metrics.r_squared, 0.8351442754766714, epsilon = 1e-10);
}

#[test]
fn test_best_subset_under_other_metrics() {
    let data = common::mtcars();

    let by_cp = best_subset(&data, SubsetMetric::Cp).expect("enumeration should succeed");
    let labels: Vec<String> = by_cp.rows.iter().map(|r| r.predictors.to_string()).collect();
    assert_eq!(labels, ["wt", "hp wt", "hp wt qsec", "disp hp wt qsec"]);
    let best = by_cp.best_overall().expect("non-empty");
    assert_eq!(best.predictors.to_string(), "hp wt");
    assert_relative_eq!(best.metrics.cp, 2.3690045504171557, epsilon = 1e-8);

    let by_adj = by_cp.winners(SubsetMetric::AdjRSquared);
    assert_eq!(by_adj[2].predictors.to_string(), "hp wt qsec");

    let by_aic = best_subset(&data, SubsetMetric::Aic).expect("enumeration should succeed");
    assert_eq!(
        by_aic.best_overall().map(|r| r.predictors.to_string()),
        Some("hp wt".to_string())
    );
}

#[test]
fn test_constraints_in_enumeration() {
    let data = common::mtcars();
    let table = VariableSelector::builder()
        .direction(Direction::Exhaustive)
        .include(["wt"])
        .exclude(["disp"])
        .build()
        .and_then(|s| s.select(&data))
        .ok()
        .and_then(SelectionOutcome::into_all_possible)
        .expect("enumeration should succeed");

    // Two free predictors: hp and qsec.
    assert_eq!(table.n_subsets(), 3);
    for row in &table.rows {
        assert!(row.predictors.contains("wt"));
        assert!(!row.predictors.contains("disp"));
    }
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_one_predictor_is_rejected() {
    let data = Dataset::from_columns("mpg", &common::mtcars::MPG, &[("wt", &common::mtcars::WT)])
        .expect("valid dataset");

    let err = all_possible(&data).expect_err("one predictor is too few");
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(matches!(err, SelectionError::TooFewPredictors { needed: 2, got: 1 }));

    let err = best_subset(&data, SubsetMetric::RSquared).expect_err("one predictor is too few");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_single_constant_predictor_is_too_few() {
    let data = Dataset::from_columns("y", &[1.0, 2.0, 4.0, 3.0, 5.0], &[("c", &[1.0; 5])])
        .expect("valid dataset");

    // The count is checked before the constant column reaches a fit.
    for direction in [Direction::Exhaustive, Direction::BestSubset] {
        let err = VariableSelector::builder()
            .direction(direction)
            .build()
            .and_then(|s| s.select(&data))
            .expect_err("one predictor is too few");
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(matches!(err, SelectionError::TooFewPredictors { needed: 2, got: 1 }));
    }
}

#[test]
fn test_two_rows_one_predictor_is_too_few() {
    let data = Dataset::from_columns("y", &[1.0, 2.0], &[("a", &[1.0, 3.0])])
        .expect("valid dataset");

    let err = all_possible(&data).expect_err("one predictor is too few");
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(matches!(err, SelectionError::TooFewPredictors { needed: 2, got: 1 }));

    let err = best_subset(&data, SubsetMetric::Cp).expect_err("one predictor is too few");
    assert!(matches!(err, SelectionError::TooFewPredictors { needed: 2, got: 1 }));
}

#[test]
fn test_zero_predictors_is_rejected() {
    let data = Dataset::from_columns("mpg", &common::mtcars::MPG, &[]).expect("valid dataset");
    let err = all_possible(&data).expect_err("no predictors");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_exclusions_can_leave_too_few() {
    let data = common::mtcars();
    let err = VariableSelector::builder()
        .direction(Direction::BestSubset)
        .exclude(["disp", "hp", "wt"])
        .build()
        .and_then(|s| s.select(&data))
        .expect_err("one candidate left");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_max_order_above_predictor_count() {
    let data = common::mtcars_disp_hp();
    let err = VariableSelector::builder()
        .direction(Direction::Exhaustive)
        .max_order(3)
        .build()
        .and_then(|s| s.select(&data))
        .expect_err("only two predictors");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

// ============================================================================
// Reporting
// ============================================================================

#[test]
fn test_reportable_tables() {
    let data = common::mtcars_disp_hp();
    let table = all_possible(&data).expect("enumeration should succeed");

    let rows = table.summary_rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].label, "3 [2] disp hp");
    assert_relative_eq!(rows[2].get("cp").expect("cp column"), 3.0, epsilon = 1e-9);

    let series = table.plot_series();
    let cp = series.iter().find(|s| s.name == "cp").expect("cp series");
    assert_eq!(cp.points.len(), 3);
    assert_eq!(cp.labels, ["disp", "hp", "disp hp"]);
}
