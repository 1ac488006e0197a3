//! Standardized, studentized and deleted residuals.

use faer::Col;

/// Cutoff on |studentized residual| beyond which an observation is an outlier.
pub const OUTLIER_THRESHOLD: f64 = 3.0;

/// Internally studentized residuals: e_i / (s * sqrt(1 - h_ii)).
pub fn studentized_residuals(residuals: &Col<f64>, leverage: &Col<f64>, mse: f64) -> Col<f64> {
    let n = residuals.nrows();
    if mse <= 0.0 || !mse.is_finite() {
        return Col::from_fn(n, |_| f64::NAN);
    }

    let s = mse.sqrt();
    Col::from_fn(n, |i| {
        let one_minus_h = 1.0 - leverage[i];
        if one_minus_h <= 0.0 {
            f64::NAN
        } else {
            residuals[i] / (s * one_minus_h.sqrt())
        }
    })
}

/// Deleted (externally studentized) residuals.
///
/// Uses the leave-one-out variance
/// s²_(i) = (RSS - e_i² / (1 - h_ii)) / (n - p - 1),
/// so no refit is needed.
pub fn deleted_residuals(
    residuals: &Col<f64>,
    leverage: &Col<f64>,
    mse: f64,
    n_params: usize,
) -> Col<f64> {
    let n = residuals.nrows();
    let df_resid = n.saturating_sub(n_params);

    if df_resid <= 1 || mse <= 0.0 || !mse.is_finite() {
        return Col::from_fn(n, |_| f64::NAN);
    }

    let rss = mse * df_resid as f64;
    let df_loo = (df_resid - 1) as f64;

    Col::from_fn(n, |i| {
        let one_minus_h = 1.0 - leverage[i];
        if one_minus_h <= 0.0 {
            return f64::NAN;
        }
        let e_i = residuals[i];
        let mse_loo = (rss - e_i * e_i / one_minus_h) / df_loo;
        if mse_loo <= 0.0 {
            f64::NAN
        } else {
            e_i / (mse_loo.sqrt() * one_minus_h.sqrt())
        }
    })
}

/// Indices whose |residual| exceeds `threshold` (default [`OUTLIER_THRESHOLD`]).
pub fn residual_outliers(studentized: &Col<f64>, threshold: Option<f64>) -> Vec<usize> {
    let cutoff = threshold.unwrap_or(OUTLIER_THRESHOLD);

    studentized
        .iter()
        .enumerate()
        .filter(|(_, &r)| r.is_finite() && r.abs() > cutoff)
        .map(|(i, _)| i)
        .collect()
}
