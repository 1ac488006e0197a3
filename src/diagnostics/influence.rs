//! Influence measures: Cook's distance, DFFITS, and a combined summary.

use super::leverage::{high_leverage_points, leverage_threshold};
use super::residuals::{deleted_residuals, residual_outliers, studentized_residuals};
use faer::Col;

/// Compute Cook's distance for each observation.
///
/// D_i = (e_i² / (p * MSE)) * (h_ii / (1 - h_ii)²)
pub fn cooks_distance(
    residuals: &Col<f64>,
    leverage: &Col<f64>,
    mse: f64,
    n_params: usize,
) -> Col<f64> {
    let n = residuals.nrows();

    if mse <= 0.0 || !mse.is_finite() || n_params == 0 {
        return Col::from_fn(n, |_| f64::NAN);
    }

    Col::from_fn(n, |i| {
        let h_ii = leverage[i];
        let one_minus_h = 1.0 - h_ii;
        if one_minus_h <= 0.0 {
            return f64::NAN;
        }
        let e_i = residuals[i];
        (e_i * e_i / (n_params as f64 * mse)) * (h_ii / (one_minus_h * one_minus_h))
    })
}

/// Compute DFFITS for each observation.
///
/// DFFITS_i = t_i * sqrt(h_ii / (1 - h_ii)), with t_i the deleted residual.
pub fn dffits(residuals: &Col<f64>, leverage: &Col<f64>, mse: f64, n_params: usize) -> Col<f64> {
    let deleted = deleted_residuals(residuals, leverage, mse, n_params);

    Col::from_fn(residuals.nrows(), |i| {
        let h_ii = leverage[i];
        if h_ii >= 1.0 {
            f64::NAN
        } else {
            deleted[i] * (h_ii / (1.0 - h_ii)).sqrt()
        }
    })
}

/// Default Cook's distance cutoff, 4/n.
pub fn cooks_threshold(n_observations: usize) -> f64 {
    4.0 / n_observations as f64
}

/// Default DFFITS cutoff, 2 * sqrt(p/n).
pub fn dffits_threshold(n_params: usize, n_observations: usize) -> f64 {
    2.0 * (n_params as f64 / n_observations as f64).sqrt()
}

fn exceeding(values: &Col<f64>, cutoff: f64) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| v.is_finite() && v.abs() > cutoff)
        .map(|(i, _)| i)
        .collect()
}

/// Every per-observation influence statistic with its cutoff and the
/// observations flagged against it, ready for display without further math.
#[derive(Debug, Clone)]
pub struct InfluenceMeasures {
    pub leverage: Col<f64>,
    pub leverage_threshold: f64,
    pub high_leverage: Vec<usize>,

    pub cooks_distance: Col<f64>,
    pub cooks_threshold: f64,
    pub influential_cooks: Vec<usize>,

    pub dffits: Col<f64>,
    pub dffits_threshold: f64,
    pub influential_dffits: Vec<usize>,

    pub studentized_residuals: Col<f64>,
    pub deleted_residuals: Col<f64>,
    pub outliers: Vec<usize>,
}

impl InfluenceMeasures {
    /// Compute all measures from the residuals, leverage and MSE of a fit
    /// with `n_params` parameters (intercept included).
    pub fn compute(residuals: &Col<f64>, leverage: &Col<f64>, mse: f64, n_params: usize) -> Self {
        let n = residuals.nrows();

        let cooks = cooks_distance(residuals, leverage, mse, n_params);
        let dffits_values = dffits(residuals, leverage, mse, n_params);
        let studentized = studentized_residuals(residuals, leverage, mse);
        let deleted = deleted_residuals(residuals, leverage, mse, n_params);

        let lev_cut = leverage_threshold(n_params, n);
        let cooks_cut = cooks_threshold(n);
        let dffits_cut = dffits_threshold(n_params, n);

        Self {
            high_leverage: high_leverage_points(leverage, n_params, Some(lev_cut)),
            leverage: leverage.clone(),
            leverage_threshold: lev_cut,
            influential_cooks: exceeding(&cooks, cooks_cut),
            cooks_distance: cooks,
            cooks_threshold: cooks_cut,
            influential_dffits: exceeding(&dffits_values, dffits_cut),
            dffits: dffits_values,
            dffits_threshold: dffits_cut,
            outliers: residual_outliers(&deleted, None),
            studentized_residuals: studentized,
            deleted_residuals: deleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooks_distance_non_negative() {
        let residuals = Col::from_fn(20, |i| i as f64 - 9.5);
        let leverage = Col::from_fn(20, |i| 0.1 + 0.02 * i as f64);

        let cooks = cooks_distance(&residuals, &leverage, 10.0, 3);
        assert!(cooks.iter().all(|&d| d >= 0.0));
    }

    #[test]
    fn test_high_influence_point_is_flagged() {
        let mut residuals = Col::from_fn(30, |i| if i % 2 == 0 { 0.8 } else { -0.8 });
        let mut leverage = Col::from_fn(30, |_| 0.06);
        residuals[15] = 3.0;
        leverage[15] = 0.4;
        let rss: f64 = residuals.iter().map(|e| e * e).sum();
        let mse = rss / 28.0;

        let measures = InfluenceMeasures::compute(&residuals, &leverage, mse, 2);

        assert!(measures.influential_cooks.contains(&15));
        assert!(measures.influential_dffits.contains(&15));
        assert!(measures.high_leverage.contains(&15));
        assert!((measures.cooks_threshold - 4.0 / 30.0).abs() < 1e-12);
    }
}
