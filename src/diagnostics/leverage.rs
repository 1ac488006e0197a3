//! Leverage (hat matrix diagonal) calculations.

use crate::utils::{augmented_design, cross_product_inverse};
use faer::{Col, Mat};

/// Compute leverage values (diagonal of hat matrix H = X(X'X)^(-1)X').
///
/// `x` holds the predictor columns only; a column of ones is prepended when
/// `with_intercept` is set. Returns NaN for every observation if X'X is singular.
///
/// # Properties
/// - h_ii ∈ [0, 1]
/// - Σ h_ii = p (number of parameters)
pub fn compute_leverage(x: &Mat<f64>, with_intercept: bool) -> Col<f64> {
    let n = x.nrows();
    let design = if with_intercept {
        augmented_design(x)
    } else {
        x.to_owned()
    };
    let p = design.ncols();

    if p == 0 {
        return Col::zeros(n);
    }

    let Some(xtx_inv) = cross_product_inverse(&design, 1e-12) else {
        return Col::from_fn(n, |_| f64::NAN);
    };

    Col::from_fn(n, |i| {
        let mut h_ii = 0.0;
        for j in 0..p {
            let row_j = design[(i, j)];
            for k in 0..p {
                h_ii += row_j * xtx_inv[(j, k)] * design[(i, k)];
            }
        }
        h_ii.clamp(0.0, 1.0)
    })
}

/// Default high-leverage cutoff, 2p/n.
pub fn leverage_threshold(n_params: usize, n_observations: usize) -> f64 {
    2.0 * n_params as f64 / n_observations as f64
}

/// Identify high leverage points.
///
/// Returns indices of observations with leverage > threshold
/// (default [`leverage_threshold`]).
pub fn high_leverage_points(
    leverage: &Col<f64>,
    n_params: usize,
    threshold: Option<f64>,
) -> Vec<usize> {
    let cutoff = threshold.unwrap_or_else(|| leverage_threshold(n_params, leverage.nrows()));

    leverage
        .iter()
        .enumerate()
        .filter(|(_, &h)| h > cutoff)
        .map(|(i, _)| i)
        .collect()
}
