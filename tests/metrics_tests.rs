//! Model comparison metrics against reference values for `mpg ~ wt + hp`.

mod common;

use approx::assert_relative_eq;
use regress_select::core::{Dataset, PredictorSet};
use regress_select::selection::{
    CandidateFitter, CandidateResult, ErrorKind, IcMethod, MetricsVector, ModelMetrics,
};

fn wt_hp() -> (CandidateResult, CandidateResult) {
    let data = common::mtcars();
    let fitter = CandidateFitter::new(&data);
    let fit = fitter
        .fit(&PredictorSet::from_names(["wt", "hp"]))
        .expect("fit should succeed");
    let full = fitter.fit(&data.all_predictors()).expect("full fit");
    (fit, full)
}

// ============================================================================
// Fit Summary
// ============================================================================

#[test]
fn test_coefficients_and_p_values() {
    let (fit, _) = wt_hp();

    assert_eq!(fit.n_parameters, 3);
    assert_eq!(fit.residual_df(), 29);
    assert_relative_eq!(fit.intercept, 37.227270116447045, epsilon = 1e-8);
    assert_relative_eq!(fit.coefficients[0], -3.877830742404605, epsilon = 1e-8);
    assert_relative_eq!(fit.coefficients[1], -0.03177294698216149, epsilon = 1e-10);
    assert_relative_eq!(
        fit.p_value("wt").expect("wt in model"),
        1.1196471362002612e-06,
        max_relative = 1e-6
    );
    assert_relative_eq!(
        ModelMetrics::term_p_value(&fit, "hp").expect("computable"),
        fit.p_value("hp").expect("hp in model"),
        max_relative = 1e-9
    );
}

#[test]
fn test_unknown_term_p_value() {
    let (fit, _) = wt_hp();
    let err = ModelMetrics::term_p_value(&fit, "qsec").expect_err("qsec not in model");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

// ============================================================================
// Information Criteria
// ============================================================================

#[test]
fn test_aic_both_forms() {
    let (fit, _) = wt_hp();
    assert_relative_eq!(
        ModelMetrics::aic(&fit, IcMethod::LogLikelihood).expect("computable"),
        156.6523388256413,
        epsilon = 1e-8
    );
    assert_relative_eq!(
        ModelMetrics::aic(&fit, IcMethod::Sas).expect("computable"),
        63.84027270054225,
        epsilon = 1e-8
    );
}

#[test]
fn test_sbc_both_forms() {
    let (fit, _) = wt_hp();
    assert_relative_eq!(
        ModelMetrics::sbc(&fit, IcMethod::LogLikelihood).expect("computable"),
        162.5152824368402,
        epsilon = 1e-8
    );
    assert_relative_eq!(
        ModelMetrics::sbc(&fit, IcMethod::Sas).expect("computable"),
        68.23748040894142,
        epsilon = 1e-8
    );
}

#[test]
fn test_aicc_and_sbic() {
    let (fit, full) = wt_hp();
    assert_relative_eq!(
        ModelMetrics::aic_corrected(&fit).expect("computable"),
        99.32175418202374,
        epsilon = 1e-8
    );
    assert_relative_eq!(
        ModelMetrics::sbic(&fit, &full).expect("computable"),
        66.57545882691437,
        epsilon = 1e-8
    );
}

// ============================================================================
// Prediction Criteria
// ============================================================================

#[test]
fn test_mallows_cp() {
    let (fit, full) = wt_hp();
    assert_relative_eq!(
        ModelMetrics::mallows_cp(&fit, &full).expect("computable"),
        2.369004550417163,
        epsilon = 1e-8
    );
    // The full model's Cp is its parameter count.
    assert_relative_eq!(
        ModelMetrics::mallows_cp(&full, &full).expect("computable"),
        5.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_press_and_predicted_r_squared() {
    let (fit, _) = wt_hp();
    let press = ModelMetrics::press(&fit).expect("computable");
    assert_relative_eq!(press, 246.50625903577097, epsilon = 1e-7);
    assert!(press > fit.sse());
    assert_relative_eq!(
        ModelMetrics::predicted_r_squared(&fit).expect("computable"),
        0.7810870967289983,
        epsilon = 1e-9
    );
}

#[test]
fn test_msep_fpe_apc_hsp() {
    let (fit, _) = wt_hp();
    assert_relative_eq!(ModelMetrics::msep(&fit).expect("computable"), 7.431391517628209, epsilon = 1e-9);
    assert_relative_eq!(ModelMetrics::fpe(&fit).expect("computable"), 7.356326956844087, epsilon = 1e-9);
    assert_relative_eq!(ModelMetrics::apc(&fit).expect("computable"), 0.2090520408311137, epsilon = 1e-10);
    assert_relative_eq!(ModelMetrics::hsp(&fit).expect("computable"), 0.24020659450919468, epsilon = 1e-10);
}

#[test]
fn test_summary_vector_matches_individual_metrics() {
    let (fit, full) = wt_hp();
    let metrics = ModelMetrics::summarize(&fit, &full, IcMethod::LogLikelihood);

    assert_relative_eq!(metrics.r_squared, 0.8267854518827915, epsilon = 1e-10);
    assert_relative_eq!(metrics.adj_r_squared, 0.8148396209781564, epsilon = 1e-10);
    assert_relative_eq!(metrics.cp, 2.369004550417163, epsilon = 1e-8);
    assert_relative_eq!(metrics.aic, 156.6523388256413, epsilon = 1e-8);

    let named = metrics.named();
    let names: Vec<&str> = named.iter().map(|(n, _)| *n).collect();
    assert_eq!(names, MetricsVector::NAMES);
    assert!(named.iter().all(|(_, v)| v.is_finite()));
}

// ============================================================================
// Degrees-of-Freedom Limits
// ============================================================================

fn saturated() -> (CandidateResult, CandidateResult) {
    let data = Dataset::from_columns(
        "y",
        &[1.0, 3.0, 2.0, 5.0],
        &[("a", &[1.0, 2.0, 3.0, 4.0]), ("b", &[1.0, 0.0, 1.0, 3.0])],
    )
    .expect("valid dataset");
    let fitter = CandidateFitter::new(&data);
    let fit = fitter.fit(&data.all_predictors()).expect("one residual df remains");
    let small = fitter
        .fit(&PredictorSet::from_names(["a"]))
        .expect("fit should succeed");
    (fit, small)
}

#[test]
fn test_cp_sbic_aicc_need_spare_df() {
    let (fit, _) = saturated();
    assert_eq!(fit.residual_df(), 1);

    for err in [
        ModelMetrics::mallows_cp(&fit, &fit).expect_err("n - p - 2 < 0"),
        ModelMetrics::sbic(&fit, &fit).expect_err("n - p - 2 < 0"),
        ModelMetrics::aic_corrected(&fit).expect_err("n - p - 2 < 0"),
    ] {
        assert_eq!(err.kind(), ErrorKind::NotComputable);
    }
}

#[test]
fn test_msep_hsp_need_residual_df() {
    let (fit, small) = saturated();
    assert_eq!(
        ModelMetrics::msep(&fit).map_err(|e| e.kind()),
        Err(ErrorKind::NotComputable)
    );
    assert_eq!(
        ModelMetrics::hsp(&fit).map_err(|e| e.kind()),
        Err(ErrorKind::NotComputable)
    );
    assert!(ModelMetrics::msep(&small).is_ok());
}

#[test]
fn test_summary_marks_unavailable_metrics_nan() {
    let (fit, small) = saturated();
    let metrics = ModelMetrics::summarize(&fit, &fit, IcMethod::LogLikelihood);
    assert!(metrics.cp.is_nan());
    assert!(metrics.sbic.is_nan());
    assert!(metrics.msep.is_nan());
    assert!(metrics.aic.is_finite());

    let metrics = ModelMetrics::summarize(&small, &fit, IcMethod::LogLikelihood);
    // The reference model has MSE but the subset has only one spare df.
    assert!(metrics.cp.is_nan());
    assert!(metrics.fpe.is_finite());
}
