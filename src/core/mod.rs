//! Core types for regression analysis.

mod dataset;
mod options;
mod result;

pub use dataset::{Dataset, DatasetError, PredictorSet};
pub use options::{OptionsError, RegressionOptions, RegressionOptionsBuilder};
pub use result::{AnovaTable, RegressionResult};
