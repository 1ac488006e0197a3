//! Regression result structures.

use faer::Col;

/// Analysis-of-variance decomposition of a least-squares fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnovaTable {
    /// Total sum of squares around the response mean.
    pub total_ss: f64,
    /// Explained (regression) sum of squares.
    pub model_ss: f64,
    /// Residual sum of squares.
    pub residual_ss: f64,
    /// Model degrees of freedom.
    pub model_df: usize,
    /// Residual degrees of freedom.
    pub residual_df: usize,
}

impl AnovaTable {
    /// Mean square for the regression.
    pub fn model_ms(&self) -> f64 {
        if self.model_df > 0 {
            self.model_ss / self.model_df as f64
        } else {
            f64::NAN
        }
    }

    /// Mean square error.
    pub fn residual_ms(&self) -> f64 {
        if self.residual_df > 0 {
            self.residual_ss / self.residual_df as f64
        } else {
            f64::NAN
        }
    }
}

/// Complete result from a regression fit.
///
/// Contains coefficients, fit statistics, the ANOVA decomposition and
/// optionally inference statistics (standard errors, t-statistics, p-values,
/// confidence intervals).
#[derive(Debug, Clone)]
pub struct RegressionResult {
    // ========== Core Results ==========
    /// Estimated coefficients (excluding intercept).
    /// Aliased (collinear) coefficients are set to NaN.
    pub coefficients: Col<f64>,

    /// Intercept term (if model was fit with intercept).
    pub intercept: Option<f64>,

    /// Residuals (y - fitted_values).
    pub residuals: Col<f64>,

    /// Fitted values (predictions on training data).
    pub fitted_values: Col<f64>,

    // ========== Rank Information ==========
    /// Numerical rank of the design matrix (excluding intercept).
    pub rank: usize,

    /// Number of parameters (including intercept if present).
    pub n_parameters: usize,

    /// Number of observations.
    pub n_observations: usize,

    /// Indicates which coefficients are aliased (perfectly collinear).
    pub aliased: Vec<bool>,

    // ========== Fit Statistics ==========
    /// Sums of squares and degrees of freedom.
    pub anova: AnovaTable,

    /// Coefficient of determination (R²).
    pub r_squared: f64,

    /// Adjusted R².
    pub adj_r_squared: f64,

    /// Root mean squared error.
    pub rmse: f64,

    /// Mean squared error.
    pub mse: f64,

    /// F-statistic for overall model significance.
    pub f_statistic: f64,

    /// P-value for F-statistic.
    pub f_pvalue: f64,

    /// Gaussian log-likelihood with the maximum-likelihood variance `RSS / n`.
    pub log_likelihood: f64,

    // ========== Inference Statistics (Optional) ==========
    /// Standard errors of coefficients.
    pub std_errors: Option<Col<f64>>,

    /// Standard error of intercept.
    pub intercept_std_error: Option<f64>,

    /// t-statistics for coefficients.
    pub t_statistics: Option<Col<f64>>,

    /// P-values for coefficient significance tests.
    pub p_values: Option<Col<f64>>,

    /// P-value for intercept.
    pub intercept_p_value: Option<f64>,

    /// Lower bounds of confidence intervals.
    pub conf_interval_lower: Option<Col<f64>>,

    /// Upper bounds of confidence intervals.
    pub conf_interval_upper: Option<Col<f64>>,

    /// Confidence level used for intervals.
    pub confidence_level: f64,
}

impl RegressionResult {
    /// Create a new empty result (used internally by solvers).
    pub(crate) fn empty(n_features: usize, n_observations: usize) -> Self {
        Self {
            coefficients: Col::zeros(n_features),
            intercept: None,
            residuals: Col::zeros(n_observations),
            fitted_values: Col::zeros(n_observations),
            rank: 0,
            n_parameters: 0,
            n_observations,
            aliased: vec![false; n_features],
            anova: AnovaTable {
                total_ss: 0.0,
                model_ss: 0.0,
                residual_ss: 0.0,
                model_df: 0,
                residual_df: n_observations,
            },
            r_squared: 0.0,
            adj_r_squared: 0.0,
            rmse: 0.0,
            mse: 0.0,
            f_statistic: 0.0,
            f_pvalue: 1.0,
            log_likelihood: 0.0,
            std_errors: None,
            intercept_std_error: None,
            t_statistics: None,
            p_values: None,
            intercept_p_value: None,
            conf_interval_lower: None,
            conf_interval_upper: None,
            confidence_level: 0.95,
        }
    }

    /// Residual degrees of freedom (n - p).
    pub fn residual_df(&self) -> usize {
        self.n_observations.saturating_sub(self.n_parameters)
    }

    /// Model degrees of freedom (p - 1 if intercept, else p).
    pub fn model_df(&self) -> usize {
        if self.intercept.is_some() {
            self.n_parameters.saturating_sub(1)
        } else {
            self.n_parameters
        }
    }

    /// Check if any coefficients are aliased.
    pub fn has_aliased(&self) -> bool {
        self.aliased.iter().any(|&a| a)
    }

    /// Get coefficient value, returning None for aliased coefficients.
    pub fn get_coefficient(&self, index: usize) -> Option<f64> {
        if index < self.coefficients.nrows() && !self.aliased[index] {
            Some(self.coefficients[index])
        } else {
            None
        }
    }

    /// Total sum of squares (TSS).
    pub fn tss(&self) -> f64 {
        self.anova.total_ss
    }

    /// Residual sum of squares (RSS).
    pub fn rss(&self) -> f64 {
        self.anova.residual_ss
    }

    /// Explained sum of squares (ESS = TSS - RSS).
    pub fn ess(&self) -> f64 {
        self.anova.model_ss
    }
}
