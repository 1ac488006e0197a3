//! Front door of the selection engine.

use super::constraints::ConstraintSet;
use super::criterion::{Criterion, SubsetMetric};
use super::error::SelectionError;
use super::exhaustive::ExhaustiveEnumerator;
use super::fitter::{CandidateFitter, CandidateResult};
use super::metrics::IcMethod;
use super::options::{Direction, SelectionOptions, SelectionOptionsBuilder};
use super::report::{BestSubsetResult, Reportable, SelectionResult, SubsetEnumerationResult};
use super::stepwise::StepwiseEngine;
use crate::core::Dataset;
use log::info;

/// Result of [`VariableSelector::select`], by search family.
#[derive(Debug, Clone)]
pub enum SelectionOutcome {
    Stepwise(SelectionResult),
    AllPossible(SubsetEnumerationResult),
    BestSubset(BestSubsetResult),
}

impl SelectionOutcome {
    pub fn as_reportable(&self) -> &dyn Reportable {
        match self {
            Self::Stepwise(r) => r,
            Self::AllPossible(r) => r,
            Self::BestSubset(r) => r,
        }
    }

    pub fn into_stepwise(self) -> Option<SelectionResult> {
        match self {
            Self::Stepwise(r) => Some(r),
            _ => None,
        }
    }

    pub fn into_all_possible(self) -> Option<SubsetEnumerationResult> {
        match self {
            Self::AllPossible(r) => Some(r),
            _ => None,
        }
    }

    pub fn into_best_subset(self) -> Option<BestSubsetResult> {
        match self {
            Self::BestSubset(r) => Some(r),
            _ => None,
        }
    }
}

/// Selects predictors of a [`Dataset`] under a [`SelectionOptions`].
///
/// # Example
///
/// ```rust,ignore
/// use regress_select::prelude::*;
///
/// let selector = VariableSelector::builder()
///     .direction(Direction::Both)
///     .criterion(Criterion::Aic)
///     .exclude(["qsec"])
///     .build()?;
///
/// let outcome = selector.select(&data)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct VariableSelector {
    options: SelectionOptions,
}

impl VariableSelector {
    /// Fails when the options are inconsistent.
    pub fn new(options: SelectionOptions) -> Result<Self, SelectionError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn builder() -> VariableSelectorBuilder {
        VariableSelectorBuilder::default()
    }

    pub fn options(&self) -> &SelectionOptions {
        &self.options
    }

    /// Validate constraints against `data`, fit the reference model with every
    /// candidate predictor, then run the configured search.
    pub fn select(&self, data: &Dataset) -> Result<SelectionOutcome, SelectionError> {
        let options = &self.options;
        let constraints = ConstraintSet::new(&options.include, &options.exclude)?;
        constraints.check_against(data)?;
        if !options.direction.is_stepwise() {
            ExhaustiveEnumerator::check_candidates(data, &constraints, options.max_order)?;
        }

        let full = CandidateFitter::new(data).fit_or_baseline(&constraints.candidate_set(data))?;

        if options.progress {
            info!(
                "{} selection on '{}' with {} candidate predictors",
                options.direction,
                data.response_name(),
                full.predictors.len()
            );
        }

        let outcome = match options.direction {
            Direction::Forward | Direction::Backward | Direction::Both => {
                let engine = StepwiseEngine::new(data, &constraints, options, &full)?;
                SelectionOutcome::Stepwise(engine.run()?)
            }
            Direction::Exhaustive => SelectionOutcome::AllPossible(
                self.enumerator(data, &constraints, &full)?.all_possible()?,
            ),
            Direction::BestSubset => SelectionOutcome::BestSubset(
                self.enumerator(data, &constraints, &full)?
                    .best_subset(options.subset_metric)?,
            ),
        };
        Ok(outcome)
    }

    fn enumerator<'a>(
        &self,
        data: &'a Dataset,
        constraints: &'a ConstraintSet,
        full: &'a CandidateResult,
    ) -> Result<ExhaustiveEnumerator<'a>, SelectionError> {
        ExhaustiveEnumerator::new(
            data,
            constraints,
            self.options.max_order,
            self.options.ic_method,
            full,
        )
    }

    /// Run a stepwise search; fails for exhaustive directions.
    pub fn select_stepwise(&self, data: &Dataset) -> Result<SelectionResult, SelectionError> {
        self.select(data)?.into_stepwise().ok_or_else(|| {
            SelectionError::UnsupportedCombination(format!(
                "direction '{}' is not stepwise",
                self.options.direction
            ))
        })
    }
}

/// Builder for [`VariableSelector`].
#[derive(Debug, Clone, Default)]
pub struct VariableSelectorBuilder {
    options: SelectionOptionsBuilder,
}

impl VariableSelectorBuilder {
    pub fn direction(mut self, direction: Direction) -> Self {
        self.options = self.options.direction(direction);
        self
    }

    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.options = self.options.criterion(criterion);
        self
    }

    pub fn entry_alpha(mut self, alpha: f64) -> Self {
        self.options = self.options.entry_alpha(alpha);
        self
    }

    pub fn removal_alpha(mut self, alpha: f64) -> Self {
        self.options = self.options.removal_alpha(alpha);
        self
    }

    pub fn max_order(mut self, max_order: usize) -> Self {
        self.options = self.options.max_order(max_order);
        self
    }

    pub fn include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.include(names);
        self
    }

    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.exclude(names);
        self
    }

    pub fn hierarchical(mut self, hierarchical: bool) -> Self {
        self.options = self.options.hierarchical(hierarchical);
        self
    }

    pub fn ic_method(mut self, method: IcMethod) -> Self {
        self.options = self.options.ic_method(method);
        self
    }

    pub fn subset_metric(mut self, metric: SubsetMetric) -> Self {
        self.options = self.options.subset_metric(metric);
        self
    }

    pub fn progress(mut self, progress: bool) -> Self {
        self.options = self.options.progress(progress);
        self
    }

    pub fn details(mut self, details: bool) -> Self {
        self.options = self.options.details(details);
        self
    }

    pub fn build(self) -> Result<VariableSelector, SelectionError> {
        VariableSelector::new(self.options.build_unchecked())
    }
}

fn stepwise(
    data: &Dataset,
    builder: VariableSelectorBuilder,
) -> Result<SelectionResult, SelectionError> {
    builder.build()?.select_stepwise(data)
}

/// Forward selection by p-value.
pub fn forward_p(data: &Dataset, entry_alpha: f64) -> Result<SelectionResult, SelectionError> {
    stepwise(
        data,
        VariableSelector::builder()
            .direction(Direction::Forward)
            .entry_alpha(entry_alpha),
    )
}

/// Backward elimination by p-value.
pub fn backward_p(data: &Dataset, removal_alpha: f64) -> Result<SelectionResult, SelectionError> {
    stepwise(
        data,
        VariableSelector::builder()
            .direction(Direction::Backward)
            .removal_alpha(removal_alpha),
    )
}

/// Bidirectional selection by p-value.
pub fn both_p(
    data: &Dataset,
    entry_alpha: f64,
    removal_alpha: f64,
) -> Result<SelectionResult, SelectionError> {
    stepwise(
        data,
        VariableSelector::builder()
            .direction(Direction::Both)
            .entry_alpha(entry_alpha)
            .removal_alpha(removal_alpha),
    )
}

/// Forward selection by AIC.
pub fn forward_aic(data: &Dataset) -> Result<SelectionResult, SelectionError> {
    stepwise(
        data,
        VariableSelector::builder()
            .direction(Direction::Forward)
            .criterion(Criterion::Aic),
    )
}

/// Backward elimination by AIC.
pub fn backward_aic(data: &Dataset) -> Result<SelectionResult, SelectionError> {
    stepwise(
        data,
        VariableSelector::builder()
            .direction(Direction::Backward)
            .criterion(Criterion::Aic),
    )
}

/// Bidirectional selection by AIC.
pub fn both_aic(data: &Dataset) -> Result<SelectionResult, SelectionError> {
    stepwise(
        data,
        VariableSelector::builder()
            .direction(Direction::Both)
            .criterion(Criterion::Aic),
    )
}

/// All possible regressions over every predictor of `data`.
pub fn all_possible(data: &Dataset) -> Result<SubsetEnumerationResult, SelectionError> {
    VariableSelector::builder()
        .direction(Direction::Exhaustive)
        .build()?
        .select(data)?
        .into_all_possible()
        .ok_or_else(|| SelectionError::UnsupportedCombination("all possible".to_string()))
}

/// Best subset of each size under `metric`.
pub fn best_subset(
    data: &Dataset,
    metric: SubsetMetric,
) -> Result<BestSubsetResult, SelectionError> {
    VariableSelector::builder()
        .direction(Direction::BestSubset)
        .subset_metric(metric)
        .build()?
        .select(data)?
        .into_best_subset()
        .ok_or_else(|| SelectionError::UnsupportedCombination("best subset".to_string()))
}
