//! Regression solvers.
//!
//! The ordinary least-squares fitter is the only estimator: every candidate
//! model explored by the selection engine is fit through it.

mod ols;
mod traits;

pub use ols::{FittedOls, OlsRegressor, OlsRegressorBuilder};
pub use traits::{FittedRegressor, RegressionError, Regressor};
