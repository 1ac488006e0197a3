//! Least-squares model building with automated variable selection.
//!
//! This library fits ordinary least-squares models with full inference and
//! searches predictor subsets: stepwise forward, backward and bidirectional
//! selection under p-value or information criteria, and exhaustive
//! all-possible and best-subset regression. Diagnostics for the chosen model
//! (leverage, influence, studentized residuals, collinearity) come precomputed
//! with their cutoffs.
//!
//! # Example
//!
//! ```rust,ignore
//! use regress_select::prelude::*;
//!
//! let data = Dataset::from_columns("mpg", &mpg, &[("disp", &disp), ("hp", &hp), ("wt", &wt)])?;
//!
//! // Forward selection by p-value, entry level 0.1
//! let result = forward_p(&data, 0.1)?;
//! for step in &result.steps {
//!     println!("{} {} p = {:.4}", step.action, step.variable, step.criterion_value);
//! }
//!
//! // Every subset, grouped by size
//! let table = all_possible(&data)?;
//! println!("{} subsets", table.n_subsets());
//! ```

pub mod core;
pub mod diagnostics;
pub mod inference;
pub mod selection;
pub mod solvers;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        Dataset, DatasetError, PredictorSet, RegressionOptions, RegressionOptionsBuilder,
        RegressionResult,
    };
    pub use crate::diagnostics::{
        compute_leverage, cooks_distance, dffits, high_leverage_points, studentized_residuals,
        vif_tolerance, InfluenceMeasures,
    };
    pub use crate::selection::{
        all_possible, backward_aic, backward_p, best_subset, both_aic, both_p, forward_aic,
        forward_p, Criterion, Direction, ErrorKind, IcMethod, ModelMetrics, Reportable,
        SelectionError, SelectionOptions, SelectionOutcome, SelectionResult, StepAction,
        SubsetMetric, VariableSelector,
    };
    pub use crate::solvers::{FittedRegressor, OlsRegressor, Regressor};
}

pub use crate::core::{Dataset, PredictorSet, RegressionOptions, RegressionResult};
pub use crate::selection::{SelectionError, SelectionOptions, VariableSelector};
pub use crate::solvers::{FittedRegressor, OlsRegressor, Regressor};
