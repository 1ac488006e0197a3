//! Options for a variable-selection run.

use super::criterion::{Criterion, SubsetMetric};
use super::error::SelectionError;
use super::metrics::IcMethod;
use crate::core::OptionsError;
use std::fmt;
use std::str::FromStr;

/// Search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
    /// Forward entries, each followed by a backward pass.
    Both,
    /// Every subset of the free predictors ("all possible regression").
    Exhaustive,
    /// The top subset of each size.
    BestSubset,
}

impl Direction {
    pub fn is_stepwise(self) -> bool {
        matches!(self, Self::Forward | Self::Backward | Self::Both)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Both => "both",
            Self::Exhaustive => "exhaustive",
            Self::BestSubset => "best-subset",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "backward" => Ok(Self::Backward),
            "both" | "stepwise" => Ok(Self::Both),
            "exhaustive" | "all-possible" | "all" => Ok(Self::Exhaustive),
            "best-subset" | "best" => Ok(Self::BestSubset),
            _ => Err(SelectionError::UnknownSetting {
                what: "direction",
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration of a selection run.
#[derive(Debug, Clone)]
pub struct SelectionOptions {
    pub direction: Direction,
    pub criterion: Criterion,
    /// A term enters when its p-value is at most this (default: 0.1).
    pub entry_alpha: f64,
    /// A term leaves when its p-value exceeds this (default: 0.3).
    pub removal_alpha: f64,
    /// Largest number of free predictors in an enumerated subset.
    pub max_order: Option<usize>,
    /// Predictors kept in every model.
    pub include: Vec<String>,
    /// Predictors kept out of every model.
    pub exclude: Vec<String>,
    /// Test candidates strictly in declared predictor order.
    pub hierarchical: bool,
    pub ic_method: IcMethod,
    /// Ranking metric for best-subset search (default: R²).
    pub subset_metric: SubsetMetric,
    /// Log each accepted step at info level.
    pub progress: bool,
    /// Log each candidate evaluation at info level.
    pub details: bool,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Forward,
            criterion: Criterion::PValue,
            entry_alpha: 0.1,
            removal_alpha: 0.3,
            max_order: None,
            include: Vec::new(),
            exclude: Vec::new(),
            hierarchical: false,
            ic_method: IcMethod::LogLikelihood,
            subset_metric: SubsetMetric::RSquared,
            progress: false,
            details: false,
        }
    }
}

impl SelectionOptions {
    pub fn builder() -> SelectionOptionsBuilder {
        SelectionOptionsBuilder::default()
    }

    /// Check option values and their combinations.
    ///
    /// Predictor names are checked later, against the dataset.
    pub fn validate(&self) -> Result<(), SelectionError> {
        for (name, value) in [
            ("entry_alpha", self.entry_alpha),
            ("removal_alpha", self.removal_alpha),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(OptionsError::InvalidSignificance { name, value }.into());
            }
        }
        if self.max_order == Some(0) {
            return Err(OptionsError::InvalidMaxOrder(0).into());
        }
        if self.hierarchical && !matches!(self.direction, Direction::Forward | Direction::Backward)
        {
            return Err(SelectionError::UnsupportedCombination(format!(
                "hierarchical selection with direction '{}'",
                self.direction
            )));
        }
        if self.max_order.is_some() && self.direction.is_stepwise() {
            return Err(SelectionError::UnsupportedCombination(format!(
                "max_order with direction '{}'",
                self.direction
            )));
        }
        Ok(())
    }
}

/// Builder for [`SelectionOptions`].
#[derive(Debug, Clone, Default)]
pub struct SelectionOptionsBuilder {
    options: SelectionOptions,
}

impl SelectionOptionsBuilder {
    pub fn direction(mut self, direction: Direction) -> Self {
        self.options.direction = direction;
        self
    }

    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.options.criterion = criterion;
        self
    }

    pub fn entry_alpha(mut self, alpha: f64) -> Self {
        self.options.entry_alpha = alpha;
        self
    }

    pub fn removal_alpha(mut self, alpha: f64) -> Self {
        self.options.removal_alpha = alpha;
        self
    }

    pub fn max_order(mut self, max_order: usize) -> Self {
        self.options.max_order = Some(max_order);
        self
    }

    /// Force `names` into every model.
    pub fn include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.include.extend(names.into_iter().map(Into::into));
        self
    }

    /// Keep `names` out of every model.
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn hierarchical(mut self, hierarchical: bool) -> Self {
        self.options.hierarchical = hierarchical;
        self
    }

    pub fn ic_method(mut self, method: IcMethod) -> Self {
        self.options.ic_method = method;
        self
    }

    pub fn subset_metric(mut self, metric: SubsetMetric) -> Self {
        self.options.subset_metric = metric;
        self
    }

    pub fn progress(mut self, progress: bool) -> Self {
        self.options.progress = progress;
        self
    }

    pub fn details(mut self, details: bool) -> Self {
        self.options.details = details;
        self
    }

    /// Build the options, validating them first.
    pub fn build(self) -> Result<SelectionOptions, SelectionError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build without validation.
    pub fn build_unchecked(self) -> SelectionOptions {
        self.options
    }
}
