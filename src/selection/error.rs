//! Errors raised by the variable-selection engine.

use crate::core::{DatasetError, OptionsError, PredictorSet};
use crate::solvers::RegressionError;
use thiserror::Error;

/// Broad category of a [`SelectionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad options, constraints or predictor names; nothing was fit.
    Configuration,
    /// A candidate design could not be fit.
    DegenerateModel,
    /// A criterion's degrees-of-freedom requirement failed.
    NotComputable,
}

/// Errors that can occur while selecting predictors.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("predictors both included and excluded: {}", .0.join(", "))]
    ConstraintOverlap(Vec<String>),

    #[error("unknown predictor '{0}'")]
    UnknownPredictor(String),

    #[error("at least {needed} candidate predictors are required, got {got}")]
    TooFewPredictors { needed: usize, got: usize },

    #[error("unsupported configuration: {0}")]
    UnsupportedCombination(String),

    #[error("unrecognised {what} '{value}'")]
    UnknownSetting { what: &'static str, value: String },

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] OptionsError),

    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("degenerate model [{predictors}]: {reason}")]
    DegenerateModel {
        predictors: PredictorSet,
        reason: String,
    },

    #[error("regression failed: {0}")]
    Regression(#[from] RegressionError),

    #[error("{quantity} is not computable: {reason}")]
    NotComputable {
        quantity: &'static str,
        reason: String,
    },
}

impl SelectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConstraintOverlap(_)
            | Self::UnknownPredictor(_)
            | Self::TooFewPredictors { .. }
            | Self::UnsupportedCombination(_)
            | Self::UnknownSetting { .. }
            | Self::InvalidOptions(_)
            | Self::Dataset(_) => ErrorKind::Configuration,
            Self::DegenerateModel { .. } | Self::Regression(_) => ErrorKind::DegenerateModel,
            Self::NotComputable { .. } => ErrorKind::NotComputable,
        }
    }

    pub(crate) fn not_computable(quantity: &'static str, reason: impl Into<String>) -> Self {
        Self::NotComputable {
            quantity,
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(predictors: &PredictorSet, reason: impl Into<String>) -> Self {
        Self::DegenerateModel {
            predictors: predictors.clone(),
            reason: reason.into(),
        }
    }
}
