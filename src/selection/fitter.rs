//! Fitting candidate predictor subsets.

use super::error::SelectionError;
use crate::core::{AnovaTable, Dataset, PredictorSet};
use crate::diagnostics::{compute_leverage, InfluenceMeasures};
use crate::solvers::{OlsRegressor, Regressor};
use faer::{Col, Mat};

/// The fit of one predictor subset, in a shape every criterion can consume.
///
/// Coefficient, standard-error and p-value vectors follow the order of
/// `predictors`; the intercept is reported separately.
#[derive(Debug, Clone)]
pub struct CandidateResult {
    pub predictors: PredictorSet,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    pub std_errors: Vec<f64>,
    pub p_values: Vec<f64>,
    pub fitted_values: Col<f64>,
    pub residuals: Col<f64>,
    /// Hat-matrix diagonal.
    pub leverage: Col<f64>,
    pub anova: AnovaTable,
    pub n_observations: usize,
    /// Coefficients including the intercept.
    pub n_parameters: usize,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub mse: f64,
    pub rmse: f64,
    pub log_likelihood: f64,
}

impl CandidateResult {
    /// Residual sum of squares.
    pub fn sse(&self) -> f64 {
        self.anova.residual_ss
    }

    /// Total sum of squares.
    pub fn tss(&self) -> f64 {
        self.anova.total_ss
    }

    pub fn residual_df(&self) -> usize {
        self.anova.residual_df
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.predictors.iter().position(|p| p == name)
    }

    pub fn coefficient(&self, name: &str) -> Option<f64> {
        self.index_of(name).map(|j| self.coefficients[j])
    }

    pub fn std_error(&self, name: &str) -> Option<f64> {
        self.index_of(name).map(|j| self.std_errors[j])
    }

    /// Two-sided p-value of the named term's t-test.
    pub fn p_value(&self, name: &str) -> Option<f64> {
        self.index_of(name).map(|j| self.p_values[j])
    }

    /// Leverage, Cook's distance, DFFITS and residual outliers of this fit.
    pub fn influence(&self) -> InfluenceMeasures {
        InfluenceMeasures::compute(&self.residuals, &self.leverage, self.mse, self.n_parameters)
    }
}

/// Builds design matrices for predictor subsets and fits them by OLS.
///
/// The dataset is only read, so one fitter can serve any number of fits.
#[derive(Debug, Clone)]
pub struct CandidateFitter<'a> {
    data: &'a Dataset,
    regressor: OlsRegressor,
}

impl<'a> CandidateFitter<'a> {
    pub fn new(data: &'a Dataset) -> Self {
        Self {
            data,
            regressor: OlsRegressor::builder()
                .with_intercept(true)
                .compute_inference(true)
                .build(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.data
    }

    /// Fit `response ~ predictors` with an intercept.
    ///
    /// Fails with a degenerate-model error when the subset is empty, leaves
    /// fewer than one residual degree of freedom, or contains an aliased column.
    pub fn fit(&self, predictors: &PredictorSet) -> Result<CandidateResult, SelectionError> {
        if predictors.is_empty() {
            return Err(SelectionError::degenerate(predictors, "empty predictor subset"));
        }
        let x = self.data.design_matrix(predictors.names())?;
        self.fit_design(predictors, &x)
    }

    /// Fit the intercept-only model, the baseline of forward searches.
    pub fn fit_intercept_only(&self) -> Result<CandidateResult, SelectionError> {
        let x = Mat::zeros(self.data.n_observations(), 0);
        self.fit_design(&PredictorSet::new(), &x)
    }

    /// Fit the empty subset as intercept-only, anything else through [`fit`](Self::fit).
    pub(crate) fn fit_or_baseline(
        &self,
        predictors: &PredictorSet,
    ) -> Result<CandidateResult, SelectionError> {
        if predictors.is_empty() {
            self.fit_intercept_only()
        } else {
            self.fit(predictors)
        }
    }

    fn fit_design(
        &self,
        predictors: &PredictorSet,
        x: &Mat<f64>,
    ) -> Result<CandidateResult, SelectionError> {
        let n = self.data.n_observations();
        let p = predictors.len();
        if n < p + 2 {
            return Err(SelectionError::degenerate(
                predictors,
                format!("n - p - 1 = {} leaves no residual degrees of freedom", n as i64 - p as i64 - 1),
            ));
        }

        let result = self.regressor.fit(x, self.data.response())?.into_result();

        if result.has_aliased() {
            let aliased: Vec<&str> = predictors
                .iter()
                .zip(&result.aliased)
                .filter(|(_, &a)| a)
                .map(|(name, _)| name)
                .collect();
            return Err(SelectionError::degenerate(
                predictors,
                format!("singular design, aliased: {}", aliased.join(", ")),
            ));
        }

        let nan_column = || vec![f64::NAN; p];
        let std_errors = result
            .std_errors
            .as_ref()
            .map_or_else(nan_column, |se| se.iter().copied().collect());
        let p_values = result
            .p_values
            .as_ref()
            .map_or_else(nan_column, |pv| pv.iter().copied().collect());

        Ok(CandidateResult {
            predictors: predictors.clone(),
            intercept: result.intercept.unwrap_or(0.0),
            coefficients: result.coefficients.iter().copied().collect(),
            std_errors,
            p_values,
            leverage: compute_leverage(x, true),
            fitted_values: result.fitted_values,
            residuals: result.residuals,
            anova: result.anova,
            n_observations: n,
            n_parameters: result.n_parameters,
            r_squared: result.r_squared,
            adj_r_squared: result.adj_r_squared,
            mse: result.mse,
            rmse: result.rmse,
            log_likelihood: result.log_likelihood,
        })
    }
}
