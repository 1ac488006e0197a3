//! Coefficient inference calculations.

use crate::utils::{augmented_design, cross_product_inverse};
use faer::{Col, Mat};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Standard errors of the slope coefficients and, when fit, of the intercept.
#[derive(Debug, Clone)]
pub struct StandardErrors {
    pub coefficients: Col<f64>,
    pub intercept: Option<f64>,
}

/// Computes inference statistics for regression coefficients.
pub struct CoefficientInference;

impl CoefficientInference {
    /// Compute standard errors for OLS coefficients.
    ///
    /// SE(β_j) = sqrt(σ² * (X'X)^(-1)_{jj}), where X carries a leading column of
    /// ones when `with_intercept` is set. Aliased columns are left out of X and
    /// receive a NaN standard error. Returns `None` if X'X cannot be inverted.
    pub fn standard_errors(
        x: &Mat<f64>,
        mse: f64,
        aliased: &[bool],
        with_intercept: bool,
        tolerance: f64,
    ) -> Option<StandardErrors> {
        let active: Vec<usize> = (0..x.ncols()).filter(|&j| !aliased[j]).collect();
        let reduced = Mat::from_fn(x.nrows(), active.len(), |i, j| x[(i, active[j])]);
        let design = if with_intercept {
            augmented_design(&reduced)
        } else {
            reduced
        };
        if design.ncols() == 0 {
            return None;
        }

        let inverse = cross_product_inverse(&design, tolerance)?;
        let offset = usize::from(with_intercept);
        let se_of = |k: usize| {
            let var = mse * inverse[(k, k)];
            if var >= 0.0 {
                var.sqrt()
            } else {
                f64::NAN
            }
        };

        let mut coefficients = Col::from_fn(x.ncols(), |_| f64::NAN);
        for (k, &j) in active.iter().enumerate() {
            coefficients[j] = se_of(k + offset);
        }

        Some(StandardErrors {
            coefficients,
            intercept: with_intercept.then(|| se_of(0)),
        })
    }

    /// Compute t-statistics for coefficients.
    ///
    /// t_j = β_j / SE(β_j)
    pub fn t_statistics(coefficients: &Col<f64>, std_errors: &Col<f64>) -> Col<f64> {
        Col::from_fn(coefficients.nrows(), |j| {
            Self::t_statistic(coefficients[j], std_errors[j])
        })
    }

    /// Single t-statistic; NaN when the standard error is unusable.
    pub fn t_statistic(estimate: f64, std_error: f64) -> f64 {
        if std_error.is_nan() || std_error == 0.0 {
            f64::NAN
        } else {
            estimate / std_error
        }
    }

    /// Two-sided p-value 2 * P(|T| > |t|) with T ~ t(df).
    ///
    /// NaN when `df` is not positive or `t` is not a number.
    pub fn two_sided_p_value(t: f64, df: f64) -> f64 {
        if df <= 0.0 || t.is_nan() {
            return f64::NAN;
        }
        match StudentsT::new(0.0, 1.0, df) {
            Ok(dist) => 2.0 * dist.sf(t.abs()),
            Err(_) => f64::NAN,
        }
    }

    /// Compute p-values from t-statistics.
    pub fn p_values(t_statistics: &Col<f64>, df: f64) -> Col<f64> {
        Col::from_fn(t_statistics.nrows(), |j| {
            Self::two_sided_p_value(t_statistics[j], df)
        })
    }

    /// Compute confidence intervals for coefficients.
    ///
    /// CI_j = β_j ± t_{α/2, df} * SE(β_j)
    pub fn confidence_intervals(
        coefficients: &Col<f64>,
        std_errors: &Col<f64>,
        df: f64,
        confidence_level: f64,
    ) -> (Col<f64>, Col<f64>) {
        let n = coefficients.nrows();
        let t_crit = if df > 0.0 {
            StudentsT::new(0.0, 1.0, df)
                .map(|d| d.inverse_cdf(1.0 - (1.0 - confidence_level) / 2.0))
                .unwrap_or(f64::NAN)
        } else {
            f64::NAN
        };

        let lower = Col::from_fn(n, |j| coefficients[j] - t_crit * std_errors[j]);
        let upper = Col::from_fn(n, |j| coefficients[j] + t_crit * std_errors[j]);
        (lower, upper)
    }
}
