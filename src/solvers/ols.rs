//! Ordinary Least Squares regression solver.

use crate::core::{AnovaTable, RegressionOptions, RegressionOptionsBuilder, RegressionResult};
use crate::inference::CoefficientInference;
use crate::solvers::traits::{FittedRegressor, RegressionError, Regressor};
use crate::utils::{center_columns, center_vector, detect_constant_columns};
use faer::{Col, Mat};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Ordinary Least Squares regression estimator.
///
/// Columns that are linear combinations of earlier columns are detected before
/// the QR solve. Aliased (collinear) coefficients are set to NaN and flagged in
/// [`RegressionResult::aliased`].
///
/// # Example
///
/// ```rust,ignore
/// use regress_select::solvers::{OlsRegressor, Regressor, FittedRegressor};
/// use faer::{Mat, Col};
///
/// let x = Mat::from_fn(100, 2, |i, j| (i + j) as f64);
/// let y = Col::from_fn(100, |i| 1.0 + 2.0 * i as f64);
///
/// let fitted = OlsRegressor::builder()
///     .with_intercept(true)
///     .build()
///     .fit(&x, &y)?;
///
/// println!("R² = {}", fitted.r_squared());
/// ```
#[derive(Debug, Clone)]
pub struct OlsRegressor {
    options: RegressionOptions,
}

impl OlsRegressor {
    /// Create a new OLS regressor with the given options.
    pub fn new(options: RegressionOptions) -> Self {
        Self { options }
    }

    /// Create a builder for configuring the regressor.
    pub fn builder() -> OlsRegressorBuilder {
        OlsRegressorBuilder::default()
    }

    pub fn options(&self) -> &RegressionOptions {
        &self.options
    }
}

impl Regressor for OlsRegressor {
    type Fitted = FittedOls;

    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if x.nrows() != y.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: x.nrows(),
                y_len: y.nrows(),
            });
        }

        if n_samples < 2 {
            return Err(RegressionError::InsufficientObservations {
                needed: 2,
                got: n_samples,
            });
        }

        let with_intercept = self.options.with_intercept;
        let n_params = n_features + usize::from(with_intercept);
        if n_samples < n_params {
            return Err(RegressionError::InsufficientObservations {
                needed: n_params,
                got: n_samples,
            });
        }

        let constant_cols = detect_constant_columns(x, self.options.rank_tolerance);

        // Without an intercept the constant columns carry the level, so only
        // an all-constant design is hopeless.
        let (coefficients, aliased, rank, intercept) = if with_intercept {
            let (x_centered, x_means) = center_columns(x);
            let (y_centered, y_mean) = center_vector(y);
            let (coefficients, aliased, rank) =
                self.solve_with_qr(&x_centered, &y_centered, &constant_cols);

            let intercept = y_mean
                - (0..n_features)
                    .filter(|&j| !aliased[j])
                    .map(|j| x_means[j] * coefficients[j])
                    .sum::<f64>();
            (coefficients, aliased, rank, Some(intercept))
        } else {
            if n_features > 0 && constant_cols.iter().all(|&c| c) {
                return Err(RegressionError::AllFeaturesConstant);
            }
            let no_constants = vec![false; n_features];
            let (coefficients, aliased, rank) = self.solve_with_qr(x, y, &no_constants);
            (coefficients, aliased, rank, None)
        };

        let fitted_values = Col::from_fn(n_samples, |i| {
            intercept.unwrap_or(0.0)
                + (0..n_features)
                    .filter(|&j| !aliased[j])
                    .map(|j| x[(i, j)] * coefficients[j])
                    .sum::<f64>()
        });
        let residuals = Col::from_fn(n_samples, |i| y[i] - fitted_values[i]);

        let mut result = RegressionResult::empty(n_features, n_samples);
        result.coefficients = coefficients;
        result.intercept = intercept;
        result.residuals = residuals;
        result.fitted_values = fitted_values;
        result.aliased = aliased;
        result.rank = rank;
        result.n_parameters = rank + usize::from(with_intercept);
        result.confidence_level = self.options.confidence_level;

        self.compute_statistics(y, &mut result);
        if self.options.compute_inference {
            self.compute_inference(x, &mut result);
        }

        Ok(FittedOls {
            options: self.options.clone(),
            result,
        })
    }
}

impl OlsRegressor {
    /// Solve the least squares problem on the linearly independent columns.
    ///
    /// Returns coefficients in original column order, the aliased mask and the rank.
    fn solve_with_qr(
        &self,
        x: &Mat<f64>,
        y: &Col<f64>,
        constant_cols: &[bool],
    ) -> (Col<f64>, Vec<bool>, usize) {
        let n_features = x.ncols();
        let n_samples = x.nrows();

        let kept = independent_columns(x, constant_cols);
        let mut aliased = vec![true; n_features];
        let mut coefficients = Col::from_fn(n_features, |_| f64::NAN);
        if kept.is_empty() {
            return (coefficients, aliased, 0);
        }

        let rank = kept.len();
        let x_kept = Mat::from_fn(n_samples, rank, |i, j| x[(i, kept[j])]);
        let qr = x_kept.qr();
        let q = qr.compute_Q();
        let r = qr.R();

        let qty = q.transpose() * y;
        let mut beta = vec![0.0; rank];
        for i in (0..rank).rev() {
            let tail: f64 = ((i + 1)..rank).map(|j| r[(i, j)] * beta[j]).sum();
            beta[i] = (qty[i] - tail) / r[(i, i)];
        }

        for (k, &j) in kept.iter().enumerate() {
            coefficients[j] = beta[k];
            aliased[j] = false;
        }

        (coefficients, aliased, rank)
    }

    /// Fill in the ANOVA decomposition and goodness-of-fit statistics.
    fn compute_statistics(&self, y: &Col<f64>, result: &mut RegressionResult) {
        let n = y.nrows();
        let y_mean = y.iter().sum::<f64>() / n as f64;

        // Without an intercept the total sum of squares is uncentered.
        let tss: f64 = if result.intercept.is_some() {
            y.iter().map(|&yi| (yi - y_mean).powi(2)).sum()
        } else {
            y.iter().map(|&yi| yi * yi).sum()
        };
        let rss: f64 = result.residuals.iter().map(|&r| r * r).sum();

        let model_df = result.model_df();
        let residual_df = result.residual_df();
        result.anova = AnovaTable {
            total_ss: tss,
            model_ss: tss - rss,
            residual_ss: rss,
            model_df,
            residual_df,
        };

        result.r_squared = if tss > 0.0 {
            (1.0 - rss / tss).clamp(0.0, 1.0)
        } else if rss < 1e-10 {
            1.0
        } else {
            0.0
        };

        let df_total = (if result.intercept.is_some() { n - 1 } else { n }) as f64;
        result.adj_r_squared = if residual_df > 0 {
            1.0 - (1.0 - result.r_squared) * df_total / residual_df as f64
        } else {
            f64::NAN
        };

        result.mse = result.anova.residual_ms();
        result.rmse = result.mse.sqrt();

        result.f_statistic = if model_df > 0 && result.mse > 0.0 {
            result.anova.model_ms() / result.mse
        } else {
            f64::NAN
        };
        result.f_pvalue = if result.f_statistic.is_finite() && residual_df > 0 {
            FisherSnedecor::new(model_df as f64, residual_df as f64)
                .map_or(f64::NAN, |d| d.sf(result.f_statistic))
        } else {
            f64::NAN
        };

        let sigma2_ml = rss / n as f64;
        result.log_likelihood = if sigma2_ml > 0.0 {
            -0.5 * n as f64 * (1.0 + (2.0 * std::f64::consts::PI).ln() + sigma2_ml.ln())
        } else {
            f64::NAN
        };
    }

    /// Compute inference statistics (standard errors, t-stats, p-values, CIs).
    ///
    /// Left as `None` when the residual degrees of freedom are exhausted or the
    /// cross-product matrix cannot be inverted.
    fn compute_inference(&self, x: &Mat<f64>, result: &mut RegressionResult) {
        let df = result.residual_df() as f64;
        if df <= 0.0 || !result.mse.is_finite() {
            return;
        }

        let Some(se) = CoefficientInference::standard_errors(
            x,
            result.mse,
            &result.aliased,
            result.intercept.is_some(),
            self.options.rank_tolerance,
        ) else {
            return;
        };

        let t_stats = CoefficientInference::t_statistics(&result.coefficients, &se.coefficients);
        let p_vals = CoefficientInference::p_values(&t_stats, df);
        let (ci_lower, ci_upper) = CoefficientInference::confidence_intervals(
            &result.coefficients,
            &se.coefficients,
            df,
            self.options.confidence_level,
        );

        if let (Some(intercept), Some(se_int)) = (result.intercept, se.intercept) {
            let t_int = CoefficientInference::t_statistic(intercept, se_int);
            result.intercept_std_error = Some(se_int);
            result.intercept_p_value = Some(CoefficientInference::two_sided_p_value(t_int, df));
        }

        result.std_errors = Some(se.coefficients);
        result.t_statistics = Some(t_stats);
        result.p_values = Some(p_vals);
        result.conf_interval_lower = Some(ci_lower);
        result.conf_interval_upper = Some(ci_upper);
    }
}

/// Relative residual norm below which a column counts as a linear
/// combination of the columns before it.
const ALIAS_TOLERANCE: f64 = 1e-7;

/// Indices of columns that are linearly independent of the earlier ones.
///
/// Each column is appended to the kept ones and factored with QR; the last
/// diagonal of R is its residual norm against the kept span. Columns are taken
/// in their given order, so of two collinear columns the later one is aliased.
fn independent_columns(x: &Mat<f64>, constant_cols: &[bool]) -> Vec<usize> {
    let n = x.nrows();
    let mut kept: Vec<usize> = Vec::new();

    for j in 0..x.ncols() {
        if constant_cols[j] || kept.len() == n {
            continue;
        }
        let norm = (0..n).map(|i| x[(i, j)] * x[(i, j)]).sum::<f64>().sqrt();
        if norm == 0.0 {
            continue;
        }

        let k = kept.len();
        let trial = Mat::from_fn(n, k + 1, |i, c| x[(i, if c < k { kept[c] } else { j })]);
        let qr = trial.qr();
        let residual = qr.R()[(k, k)].abs();
        if residual > ALIAS_TOLERANCE * norm {
            kept.push(j);
        }
    }

    kept
}

/// A fitted OLS regression model.
#[derive(Debug, Clone)]
pub struct FittedOls {
    options: RegressionOptions,
    result: RegressionResult,
}

impl FittedOls {
    /// Get the options used to fit this model.
    pub fn options(&self) -> &RegressionOptions {
        &self.options
    }

    /// Consume the fitted model, keeping only its result.
    pub fn into_result(self) -> RegressionResult {
        self.result
    }
}

impl FittedRegressor for FittedOls {
    fn predict(&self, x: &Mat<f64>) -> Col<f64> {
        let intercept = self.result.intercept.unwrap_or(0.0);
        Col::from_fn(x.nrows(), |i| {
            intercept
                + (0..x.ncols())
                    .filter_map(|j| self.result.get_coefficient(j).map(|b| x[(i, j)] * b))
                    .sum::<f64>()
        })
    }

    fn result(&self) -> &RegressionResult {
        &self.result
    }
}

/// Builder for `OlsRegressor`.
#[derive(Debug, Clone, Default)]
pub struct OlsRegressorBuilder {
    builder: RegressionOptionsBuilder,
}

impl OlsRegressorBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include an intercept term.
    pub fn with_intercept(mut self, include: bool) -> Self {
        self.builder = self.builder.with_intercept(include);
        self
    }

    /// Set whether to compute inference statistics.
    pub fn compute_inference(mut self, compute: bool) -> Self {
        self.builder = self.builder.compute_inference(compute);
        self
    }

    /// Set the confidence level for confidence intervals.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.builder = self.builder.confidence_level(level);
        self
    }

    /// Set the rank tolerance for QR decomposition.
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.builder = self.builder.rank_tolerance(tol);
        self
    }

    /// Build the OLS regressor.
    pub fn build(self) -> OlsRegressor {
        OlsRegressor::new(self.builder.build_unchecked())
    }
}
