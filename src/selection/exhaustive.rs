//! All-possible and best-subset regression.

use super::constraints::ConstraintSet;
use super::criterion::SubsetMetric;
use super::error::SelectionError;
use super::fitter::{CandidateFitter, CandidateResult};
use super::metrics::{IcMethod, ModelMetrics};
use super::report::{BestSubsetResult, SelectionReport, SubsetEnumerationResult, SubsetRow};
use crate::core::{Dataset, OptionsError, PredictorSet};
use crate::utils::{binomial, Combinations};
use log::{debug, trace};

/// Fewest candidate predictors an enumeration accepts.
pub const MIN_CANDIDATES: usize = 2;

/// Fits and scores every subset of the free predictors.
///
/// Included predictors join every subset; `max_order` caps how many free
/// predictors a subset may hold.
pub struct ExhaustiveEnumerator<'a> {
    fitter: CandidateFitter<'a>,
    included: &'a PredictorSet,
    free: Vec<String>,
    max_order: usize,
    method: IcMethod,
    full: &'a CandidateResult,
}

impl<'a> ExhaustiveEnumerator<'a> {
    /// Validates the predictor count and `max_order` before anything is fit.
    pub fn new(
        data: &'a Dataset,
        constraints: &'a ConstraintSet,
        max_order: Option<usize>,
        method: IcMethod,
        full: &'a CandidateResult,
    ) -> Result<Self, SelectionError> {
        let (free, max_order) = Self::check_candidates(data, constraints, max_order)?;

        Ok(Self {
            fitter: CandidateFitter::new(data),
            included: constraints.included(),
            free,
            max_order,
            method,
            full,
        })
    }

    /// Free predictors and the effective maximum order, or the reason the
    /// enumeration cannot run. Needs no model fit.
    pub fn check_candidates(
        data: &Dataset,
        constraints: &ConstraintSet,
        max_order: Option<usize>,
    ) -> Result<(Vec<String>, usize), SelectionError> {
        constraints.check_against(data)?;
        let free = constraints.free_predictors(data);
        let candidates = free.len() + constraints.included().len();
        if candidates < MIN_CANDIDATES {
            return Err(SelectionError::TooFewPredictors {
                needed: MIN_CANDIDATES,
                got: candidates,
            });
        }
        if free.is_empty() {
            return Err(SelectionError::UnsupportedCombination(
                "every candidate predictor is force-included".to_string(),
            ));
        }

        let max_order = match max_order {
            None => free.len(),
            Some(m) if (1..=free.len()).contains(&m) => m,
            Some(m) => return Err(OptionsError::InvalidMaxOrder(m).into()),
        };
        Ok((free, max_order))
    }

    /// Number of subsets an enumeration visits.
    pub fn subset_count(&self) -> usize {
        (1..=self.max_order)
            .map(|k| binomial(self.free.len(), k))
            .sum()
    }

    /// Every subset, grouped by size and sorted by R² within each size.
    pub fn all_possible(&self) -> Result<SubsetEnumerationResult, SelectionError> {
        Ok(SelectionReport::all_possible(self.enumerate()?))
    }

    /// The top subset of each size under `metric`.
    pub fn best_subset(&self, metric: SubsetMetric) -> Result<BestSubsetResult, SelectionError> {
        Ok(SelectionReport::best_subset(self.enumerate()?, metric))
    }

    /// Fit every subset in lexicographic order within increasing size.
    fn enumerate(&self) -> Result<Vec<SubsetRow>, SelectionError> {
        debug!(
            "enumerating {} subsets of {} free predictors (max order {})",
            self.subset_count(),
            self.free.len(),
            self.max_order
        );

        let mut rows = Vec::with_capacity(self.subset_count());
        for k in 1..=self.max_order {
            for combination in Combinations::new(self.free.len(), k) {
                let predictors = PredictorSet::from_names(
                    self.included
                        .iter()
                        .chain(combination.iter().map(|&j| self.free[j].as_str())),
                );
                let fit = self.fitter.fit(&predictors)?;
                let metrics = ModelMetrics::summarize(&fit, self.full, self.method);
                trace!("[{predictors}] r2 = {:.6}", metrics.r_squared);

                rows.push(SubsetRow {
                    index: rows.len() + 1,
                    size: predictors.len(),
                    predictors,
                    metrics,
                });
            }
        }
        Ok(rows)
    }
}
