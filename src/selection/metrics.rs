//! Model selection criteria computed from a candidate fit.
//!
//! Throughout, `n` is the number of observations and `p` the number of
//! coefficients including the intercept. Criteria that compare a subset to the
//! model with every predictor (Cp, SBIC) take that reference fit as `full`.

use super::error::SelectionError;
use super::fitter::CandidateResult;
use crate::inference::CoefficientInference;
use std::str::FromStr;

/// Form used for AIC and SBC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IcMethod {
    /// `-2·logLik + k·(p + 1)`, counting the error variance as a parameter.
    #[default]
    LogLikelihood,
    /// `n·ln(SSE/n) + k·p`.
    Sas,
}

impl FromStr for IcMethod {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "loglik" | "r" | "likelihood" => Ok(Self::LogLikelihood),
            "sas" => Ok(Self::Sas),
            _ => Err(SelectionError::UnknownSetting {
                what: "information criterion method",
                value: s.to_string(),
            }),
        }
    }
}

/// Every selection metric of one candidate, as reported for exhaustive search.
///
/// Entries that are not computable for this candidate hold NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsVector {
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub predicted_r_squared: f64,
    pub rmse: f64,
    pub cp: f64,
    pub aic: f64,
    pub sbic: f64,
    pub sbc: f64,
    pub msep: f64,
    pub fpe: f64,
    pub apc: f64,
    pub hsp: f64,
}

impl MetricsVector {
    /// Report names, in the order of [`named`](Self::named).
    pub const NAMES: [&'static str; 12] = [
        "rsquare", "adjr", "predrsq", "rmse", "cp", "aic", "sbic", "sbc", "msep", "fpe", "apc",
        "hsp",
    ];

    /// Named values in report order.
    pub fn named(&self) -> [(&'static str, f64); 12] {
        let values = [
            self.r_squared,
            self.adj_r_squared,
            self.predicted_r_squared,
            self.rmse,
            self.cp,
            self.aic,
            self.sbic,
            self.sbc,
            self.msep,
            self.fpe,
            self.apc,
            self.hsp,
        ];
        std::array::from_fn(|j| (Self::NAMES[j], values[j]))
    }
}

/// Pure functions over [`CandidateResult`]s.
pub struct ModelMetrics;

impl ModelMetrics {
    /// Akaike information criterion.
    pub fn aic(fit: &CandidateResult, method: IcMethod) -> Result<f64, SelectionError> {
        Self::information_criterion(fit, method, 2.0, "AIC")
    }

    /// Schwarz Bayesian criterion, the AIC with penalty `ln(n)`.
    pub fn sbc(fit: &CandidateResult, method: IcMethod) -> Result<f64, SelectionError> {
        Self::information_criterion(fit, method, (fit.n_observations as f64).ln(), "SBC")
    }

    fn information_criterion(
        fit: &CandidateResult,
        method: IcMethod,
        penalty: f64,
        quantity: &'static str,
    ) -> Result<f64, SelectionError> {
        let n = fit.n_observations as f64;
        let p = fit.n_parameters as f64;
        let sse = fit.sse();
        if sse <= 0.0 {
            return Err(SelectionError::not_computable(quantity, "residual sum of squares is zero"));
        }

        Ok(match method {
            IcMethod::LogLikelihood => -2.0 * fit.log_likelihood + penalty * (p + 1.0),
            IcMethod::Sas => n * (sse / n).ln() + penalty * p,
        })
    }

    /// Corrected AIC, `n·ln(SSE/n) + n(n+p)/(n−p−2)`.
    pub fn aic_corrected(fit: &CandidateResult) -> Result<f64, SelectionError> {
        let denom = Self::spare_df(fit, "AICc")?;
        let n = fit.n_observations as f64;
        let p = fit.n_parameters as f64;
        let sse = fit.sse();
        if sse <= 0.0 {
            return Err(SelectionError::not_computable("AICc", "residual sum of squares is zero"));
        }
        Ok(n * (sse / n).ln() + n * (n + p) / denom)
    }

    /// Mallow's Cp, `SSE_sub / MSE_full − (n − 2p)`.
    pub fn mallows_cp(
        fit: &CandidateResult,
        full: &CandidateResult,
    ) -> Result<f64, SelectionError> {
        Self::spare_df(fit, "Cp")?;
        let sigma2 = Self::full_mse(full, "Cp")?;
        let n = fit.n_observations as f64;
        let p = fit.n_parameters as f64;
        Ok(fit.sse() / sigma2 - (n - 2.0 * p))
    }

    /// Sawa's Bayesian information criterion.
    ///
    /// `n·ln(SSE/n) + 2(p+2)q − 2q²` with `q = n·σ̂²/SSE`, where σ̂² is the
    /// pure-error variance estimate of the full model.
    pub fn sbic(fit: &CandidateResult, full: &CandidateResult) -> Result<f64, SelectionError> {
        Self::spare_df(fit, "SBIC")?;
        let sigma2 = Self::full_mse(full, "SBIC")?;
        let n = fit.n_observations as f64;
        let p = fit.n_parameters as f64;
        let sse = fit.sse();
        if sse <= 0.0 {
            return Err(SelectionError::not_computable("SBIC", "residual sum of squares is zero"));
        }
        let q = n * sigma2 / sse;
        Ok(n * (sse / n).ln() + 2.0 * (p + 2.0) * q - 2.0 * q * q)
    }

    /// Prediction sum of squares, `Σ (e_i / (1 − h_ii))²`.
    pub fn press(fit: &CandidateResult) -> Result<f64, SelectionError> {
        fit.residuals
            .iter()
            .zip(fit.leverage.iter())
            .try_fold(0.0, |acc, (&e, &h)| {
                let one_minus_h = 1.0 - h;
                if !(one_minus_h > 0.0) {
                    return Err(SelectionError::not_computable(
                        "PRESS",
                        "an observation has leverage 1",
                    ));
                }
                Ok(acc + (e / one_minus_h).powi(2))
            })
    }

    /// Predicted R², `1 − PRESS/TSS`.
    pub fn predicted_r_squared(fit: &CandidateResult) -> Result<f64, SelectionError> {
        let tss = fit.tss();
        if tss <= 0.0 {
            return Err(SelectionError::not_computable(
                "predicted R²",
                "response has zero variance",
            ));
        }
        Ok(1.0 - Self::press(fit)? / tss)
    }

    /// Estimated mean square error of prediction, `MSE·(n+1)(n−2)/(n(n−p−1))`.
    pub fn msep(fit: &CandidateResult) -> Result<f64, SelectionError> {
        let n = fit.n_observations as f64;
        let df = Self::residual_df_minus_one(fit, "MSEP")?;
        Ok(fit.mse * (n + 1.0) * (n - 2.0) / (n * df))
    }

    /// Final prediction error, `MSE·(n+p)/n`.
    pub fn fpe(fit: &CandidateResult) -> Result<f64, SelectionError> {
        let n = fit.n_observations as f64;
        let p = fit.n_parameters as f64;
        Self::finite_mse(fit, "FPE")?;
        Ok(fit.mse * (n + p) / n)
    }

    /// Amemiya's prediction criterion, `(n+p)/(n−p)·(1−R²)`.
    pub fn apc(fit: &CandidateResult) -> Result<f64, SelectionError> {
        let n = fit.n_observations as f64;
        let p = fit.n_parameters as f64;
        if n - p <= 0.0 {
            return Err(SelectionError::not_computable("APC", "n - p <= 0"));
        }
        Ok((n + p) / (n - p) * (1.0 - fit.r_squared))
    }

    /// Hocking's Sp, `MSE/(n−p−1)`.
    pub fn hsp(fit: &CandidateResult) -> Result<f64, SelectionError> {
        let df = Self::residual_df_minus_one(fit, "HSP")?;
        Ok(fit.mse / df)
    }

    /// Two-sided t-test p-value of a coefficient estimate.
    pub fn coefficient_p_value(
        estimate: f64,
        std_error: f64,
        residual_df: usize,
    ) -> Result<f64, SelectionError> {
        if residual_df == 0 {
            return Err(SelectionError::not_computable(
                "p-value",
                "no residual degrees of freedom",
            ));
        }
        if !(std_error > 0.0) || !std_error.is_finite() {
            return Err(SelectionError::not_computable(
                "p-value",
                format!("standard error {std_error} is unusable"),
            ));
        }
        let t = CoefficientInference::t_statistic(estimate, std_error);
        Ok(CoefficientInference::two_sided_p_value(t, residual_df as f64))
    }

    /// p-value of the named term of `fit`.
    pub fn term_p_value(fit: &CandidateResult, name: &str) -> Result<f64, SelectionError> {
        let (Some(estimate), Some(se)) = (fit.coefficient(name), fit.std_error(name)) else {
            return Err(SelectionError::UnknownPredictor(name.to_string()));
        };
        Self::coefficient_p_value(estimate, se, fit.residual_df())
    }

    /// The full metric vector; non-computable entries become NaN.
    pub fn summarize(
        fit: &CandidateResult,
        full: &CandidateResult,
        method: IcMethod,
    ) -> MetricsVector {
        let or_nan = |r: Result<f64, SelectionError>| r.unwrap_or(f64::NAN);
        MetricsVector {
            r_squared: fit.r_squared,
            adj_r_squared: fit.adj_r_squared,
            predicted_r_squared: or_nan(Self::predicted_r_squared(fit)),
            rmse: fit.rmse,
            cp: or_nan(Self::mallows_cp(fit, full)),
            aic: or_nan(Self::aic(fit, method)),
            sbic: or_nan(Self::sbic(fit, full)),
            sbc: or_nan(Self::sbc(fit, method)),
            msep: or_nan(Self::msep(fit)),
            fpe: or_nan(Self::fpe(fit)),
            apc: or_nan(Self::apc(fit)),
            hsp: or_nan(Self::hsp(fit)),
        }
    }

    /// `n − p − 2`, which must be positive for Cp, SBIC and AICc.
    fn spare_df(fit: &CandidateResult, quantity: &'static str) -> Result<f64, SelectionError> {
        let df = fit.n_observations as f64 - fit.n_parameters as f64 - 2.0;
        if df <= 0.0 {
            return Err(SelectionError::not_computable(quantity, "n - p - 2 <= 0"));
        }
        Ok(df)
    }

    fn residual_df_minus_one(
        fit: &CandidateResult,
        quantity: &'static str,
    ) -> Result<f64, SelectionError> {
        let df = fit.n_observations as f64 - fit.n_parameters as f64 - 1.0;
        if df <= 0.0 {
            return Err(SelectionError::not_computable(quantity, "n - p - 1 <= 0"));
        }
        Self::finite_mse(fit, quantity)?;
        Ok(df)
    }

    fn finite_mse(fit: &CandidateResult, quantity: &'static str) -> Result<(), SelectionError> {
        if fit.mse.is_finite() {
            Ok(())
        } else {
            Err(SelectionError::not_computable(quantity, "mean square error undefined"))
        }
    }

    fn full_mse(full: &CandidateResult, quantity: &'static str) -> Result<f64, SelectionError> {
        if full.residual_df() == 0 || !(full.mse > 0.0) {
            return Err(SelectionError::not_computable(
                quantity,
                "full model has no error variance estimate",
            ));
        }
        Ok(full.mse)
    }
}
