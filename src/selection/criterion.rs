//! Selection criteria and the comparison strategy shared by every search.

use super::error::SelectionError;
use super::fitter::CandidateResult;
use super::metrics::{IcMethod, MetricsVector, ModelMetrics};
use std::fmt;
use std::str::FromStr;

/// Which way a statistic improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    Lower,
    Higher,
}

impl Preference {
    /// Whether `candidate` is strictly preferred to `incumbent`.
    ///
    /// NaN is never preferred, and an exact tie keeps the incumbent.
    pub fn prefers(self, candidate: f64, incumbent: f64) -> bool {
        if candidate.is_nan() {
            return false;
        }
        if incumbent.is_nan() {
            return true;
        }
        match self {
            Self::Lower => candidate < incumbent,
            Self::Higher => candidate > incumbent,
        }
    }

    /// Index of the preferred value, the first one on ties.
    pub fn best_index(self, values: impl IntoIterator<Item = f64>) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, v) in values.into_iter().enumerate() {
            match best {
                None if !v.is_nan() => best = Some((i, v)),
                Some((_, b)) if self.prefers(v, b) => best = Some((i, v)),
                _ => {}
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Statistic driving a stepwise search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Criterion {
    /// Significance of the entering or leaving term.
    #[default]
    PValue,
    Aic,
    Sbc,
    Sbic,
    RSquared,
    AdjRSquared,
}

impl Criterion {
    /// Direction of improvement of the model score.
    ///
    /// For [`Criterion::PValue`] this is the entry direction; removal looks for
    /// the largest p-value instead.
    pub fn preference(self) -> Preference {
        match self {
            Self::PValue | Self::Aic | Self::Sbc | Self::Sbic => Preference::Lower,
            Self::RSquared | Self::AdjRSquared => Preference::Higher,
        }
    }

    pub fn is_p_value(self) -> bool {
        matches!(self, Self::PValue)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PValue => "p-value",
            Self::Aic => "aic",
            Self::Sbc => "sbc",
            Self::Sbic => "sbic",
            Self::RSquared => "rsq",
            Self::AdjRSquared => "adjrsq",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Criterion {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p-value" | "pvalue" | "p" => Ok(Self::PValue),
            "aic" => Ok(Self::Aic),
            "sbc" | "bic" => Ok(Self::Sbc),
            "sbic" => Ok(Self::Sbic),
            "rsq" | "r2" | "rsquared" => Ok(Self::RSquared),
            "adjrsq" | "adjr2" => Ok(Self::AdjRSquared),
            _ => Err(SelectionError::UnknownSetting {
                what: "criterion",
                value: s.to_string(),
            }),
        }
    }
}

/// Metric ranking subsets of equal size in best-subset search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubsetMetric {
    #[default]
    RSquared,
    AdjRSquared,
    PredictedRSquared,
    Cp,
    Aic,
    Sbic,
    Sbc,
    Msep,
    Fpe,
    Apc,
    Hsp,
}

impl SubsetMetric {
    pub fn preference(self) -> Preference {
        match self {
            Self::RSquared | Self::AdjRSquared | Self::PredictedRSquared => Preference::Higher,
            _ => Preference::Lower,
        }
    }

    /// Pick this metric out of a metrics vector.
    pub fn value(self, metrics: &MetricsVector) -> f64 {
        match self {
            Self::RSquared => metrics.r_squared,
            Self::AdjRSquared => metrics.adj_r_squared,
            Self::PredictedRSquared => metrics.predicted_r_squared,
            Self::Cp => metrics.cp,
            Self::Aic => metrics.aic,
            Self::Sbic => metrics.sbic,
            Self::Sbc => metrics.sbc,
            Self::Msep => metrics.msep,
            Self::Fpe => metrics.fpe,
            Self::Apc => metrics.apc,
            Self::Hsp => metrics.hsp,
        }
    }
}

impl FromStr for SubsetMetric {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rsq" | "rsquare" | "r2" => Ok(Self::RSquared),
            "adjrsq" | "adjr" | "adjr2" => Ok(Self::AdjRSquared),
            "predrsq" => Ok(Self::PredictedRSquared),
            "cp" => Ok(Self::Cp),
            "aic" => Ok(Self::Aic),
            "sbic" => Ok(Self::Sbic),
            "sbc" => Ok(Self::Sbc),
            "msep" => Ok(Self::Msep),
            "fpe" => Ok(Self::Fpe),
            "apc" => Ok(Self::Apc),
            "hsp" => Ok(Self::Hsp),
            _ => Err(SelectionError::UnknownSetting {
                what: "subset metric",
                value: s.to_string(),
            }),
        }
    }
}

/// Scores candidate fits under one criterion.
///
/// Every search consults a single scorer, so switching criterion never changes
/// the shape of the search itself.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    criterion: Criterion,
    method: IcMethod,
    full: &'a CandidateResult,
}

impl<'a> Scorer<'a> {
    /// `full` is the reference model used by SBIC.
    pub fn new(criterion: Criterion, method: IcMethod, full: &'a CandidateResult) -> Self {
        Self {
            criterion,
            method,
            full,
        }
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Criterion value of a whole model. NaN for the p-value criterion, which
    /// scores terms rather than models.
    pub fn model_score(&self, fit: &CandidateResult) -> Result<f64, SelectionError> {
        match self.criterion {
            Criterion::PValue => Ok(f64::NAN),
            Criterion::Aic => ModelMetrics::aic(fit, self.method),
            Criterion::Sbc => ModelMetrics::sbc(fit, self.method),
            Criterion::Sbic => ModelMetrics::sbic(fit, self.full),
            Criterion::RSquared => Ok(fit.r_squared),
            Criterion::AdjRSquared => Ok(fit.adj_r_squared),
        }
    }

    /// p-value of `term` within `fit`.
    pub fn term_p_value(&self, fit: &CandidateResult, term: &str) -> Result<f64, SelectionError> {
        ModelMetrics::term_p_value(fit, term)
    }

    /// AIC under the configured form, NaN when not computable.
    pub fn aic_or_nan(&self, fit: &CandidateResult) -> f64 {
        ModelMetrics::aic(fit, self.method).unwrap_or(f64::NAN)
    }

    /// Whether `candidate` strictly improves on `incumbent` as a model score.
    pub fn improves(&self, candidate: f64, incumbent: f64) -> bool {
        self.criterion.preference().prefers(candidate, incumbent)
    }
}
