//! Variable selection for least-squares models.
//!
//! - **Stepwise**: forward, backward and bidirectional search driven by
//!   p-values or by AIC, SBC, SBIC, R² or adjusted R²
//! - **Exhaustive**: all possible regressions and best subsets per size
//! - **Constraints**: force-included and force-excluded predictors, and
//!   hierarchical entry in declared order
//!
//! Every candidate model is fit by [`CandidateFitter`] and scored by
//! [`ModelMetrics`]; searches differ only in which candidates they build and how
//! a [`Scorer`] compares them.

mod constraints;
mod criterion;
pub mod error;
mod exhaustive;
mod fitter;
mod metrics;
mod options;
mod report;
mod selector;
mod stepwise;

pub use constraints::ConstraintSet;
pub use criterion::{Criterion, Preference, Scorer, SubsetMetric};
pub use error::{ErrorKind, SelectionError};
pub use exhaustive::{ExhaustiveEnumerator, MIN_CANDIDATES};
pub use fitter::{CandidateFitter, CandidateResult};
pub use metrics::{IcMethod, MetricsVector, ModelMetrics};
pub use options::{Direction, SelectionOptions, SelectionOptionsBuilder};
pub use report::{
    BestSubsetResult, PlotSeries, ReportRow, Reportable, SelectionReport, SelectionResult,
    StepAction, StepRecord, SubsetEnumerationResult, SubsetRow,
};
pub use selector::{
    all_possible, backward_aic, backward_p, best_subset, both_aic, both_p, forward_aic, forward_p,
    SelectionOutcome, VariableSelector, VariableSelectorBuilder,
};
pub use stepwise::{EngineState, Phase, StepwiseEngine};
