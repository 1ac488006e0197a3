//! Regression diagnostics (leverage, residuals, influence, collinearity).
//!
//! - **Leverage**: observations with unusual predictor values
//! - **Residuals**: studentized and deleted residuals for outlier detection
//! - **Influence**: Cook's distance and DFFITS, bundled with their cutoffs
//! - **Collinearity**: VIF and tolerance per named predictor
//!
//! Every function returns the flagged observation indices alongside the raw
//! values, so plotting code never recomputes a statistic.

mod collinearity;
mod influence;
mod leverage;
mod residuals;

pub use collinearity::{high_vif_predictors, vif_tolerance, CollinearityStat};
pub use influence::{
    cooks_distance, cooks_threshold, dffits, dffits_threshold, InfluenceMeasures,
};
pub use leverage::{compute_leverage, high_leverage_points, leverage_threshold};
pub use residuals::{
    deleted_residuals, residual_outliers, studentized_residuals, OUTLIER_THRESHOLD,
};
