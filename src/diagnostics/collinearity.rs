//! Variance inflation factors and tolerances for named predictors.

use crate::core::{Dataset, DatasetError, PredictorSet};
use crate::solvers::{FittedRegressor, OlsRegressor, Regressor};

/// Collinearity statistics of one predictor against the rest of the model.
#[derive(Debug, Clone, PartialEq)]
pub struct CollinearityStat {
    pub predictor: String,
    /// R² from regressing this predictor on the other predictors.
    pub r_squared: f64,
    /// 1 - R².
    pub tolerance: f64,
    /// 1 / tolerance; infinite for an exact linear dependency.
    pub vif: f64,
}

/// Compute tolerance and VIF for every predictor of `predictors`.
///
/// With a single predictor there is nothing to regress on, so its VIF is 1.
pub fn vif_tolerance(
    data: &Dataset,
    predictors: &PredictorSet,
) -> Result<Vec<CollinearityStat>, DatasetError> {
    let regressor = OlsRegressor::builder().compute_inference(false).build();

    predictors
        .iter()
        .map(|target| {
            let others: Vec<&str> = predictors.iter().filter(|&p| p != target).collect();
            let r_squared = if others.is_empty() {
                0.0
            } else {
                let x = data.design_matrix(&others)?;
                let y = data.column(target)?;
                // A failed auxiliary fit means no usable information, treat as independent.
                regressor.fit(&x, y).map_or(0.0, |fitted| fitted.r_squared())
            };

            let tolerance = 1.0 - r_squared;
            let vif = if tolerance > 1e-14 {
                (1.0 / tolerance).max(1.0)
            } else {
                f64::INFINITY
            };

            Ok(CollinearityStat {
                predictor: target.to_string(),
                r_squared,
                tolerance,
                vif,
            })
        })
        .collect()
}

/// Predictors whose VIF exceeds `threshold` (commonly 5 or 10).
pub fn high_vif_predictors(stats: &[CollinearityStat], threshold: f64) -> Vec<&str> {
    stats
        .iter()
        .filter(|s| s.vif > threshold)
        .map(|s| s.predictor.as_str())
        .collect()
}
