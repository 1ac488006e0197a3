//! Named response/predictor data and predictor subsets.

use faer::{Col, Mat};
use std::fmt;
use thiserror::Error;

/// Errors raised while building or querying a [`Dataset`].
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("predictor '{name}' has {got} values but the response has {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("predictor '{0}' is defined more than once")]
    DuplicatePredictor(String),

    #[error("unknown predictor '{0}'")]
    UnknownPredictor(String),

    #[error("dataset has no observations")]
    Empty,
}

/// A response vector plus named predictor columns of equal length.
///
/// The declaration order of the predictors is the caller's predictor order:
/// it drives tie-breaks and hierarchical selection.
#[derive(Debug, Clone)]
pub struct Dataset {
    response_name: String,
    response: Col<f64>,
    names: Vec<String>,
    columns: Vec<Col<f64>>,
}

impl Dataset {
    /// Create a dataset holding only the response.
    pub fn new(response_name: impl Into<String>, response: Col<f64>) -> Result<Self, DatasetError> {
        if response.nrows() == 0 {
            return Err(DatasetError::Empty);
        }
        Ok(Self {
            response_name: response_name.into(),
            response,
            names: Vec::new(),
            columns: Vec::new(),
        })
    }

    /// Build a dataset from plain slices.
    pub fn from_columns(
        response_name: &str,
        response: &[f64],
        predictors: &[(&str, &[f64])],
    ) -> Result<Self, DatasetError> {
        let y = Col::from_fn(response.len(), |i| response[i]);
        predictors
            .iter()
            .try_fold(Self::new(response_name, y)?, |data, (name, values)| {
                data.with_predictor(*name, Col::from_fn(values.len(), |i| values[i]))
            })
    }

    /// Append a predictor column.
    pub fn with_predictor(
        mut self,
        name: impl Into<String>,
        column: Col<f64>,
    ) -> Result<Self, DatasetError> {
        let name = name.into();
        if column.nrows() != self.response.nrows() {
            return Err(DatasetError::LengthMismatch {
                name,
                expected: self.response.nrows(),
                got: column.nrows(),
            });
        }
        if self.names.contains(&name) {
            return Err(DatasetError::DuplicatePredictor(name));
        }
        self.names.push(name);
        self.columns.push(column);
        Ok(self)
    }

    pub fn response_name(&self) -> &str {
        &self.response_name
    }

    pub fn response(&self) -> &Col<f64> {
        &self.response
    }

    pub fn n_observations(&self) -> usize {
        self.response.nrows()
    }

    /// Predictor names in declaration order.
    pub fn predictor_names(&self) -> &[String] {
        &self.names
    }

    pub fn n_predictors(&self) -> usize {
        self.names.len()
    }

    /// Position of a predictor in declaration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Result<&Col<f64>, DatasetError> {
        self.position(name)
            .map(|j| &self.columns[j])
            .ok_or_else(|| DatasetError::UnknownPredictor(name.to_string()))
    }

    /// Assemble the `n × k` design matrix (no intercept column) for `names`.
    pub fn design_matrix<S: AsRef<str>>(&self, names: &[S]) -> Result<Mat<f64>, DatasetError> {
        let columns = names
            .iter()
            .map(|name| self.column(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Mat::from_fn(self.n_observations(), columns.len(), |i, j| {
            columns[j][i]
        }))
    }

    /// The full predictor set in declaration order.
    pub fn all_predictors(&self) -> PredictorSet {
        PredictorSet::from_names(self.names.iter().cloned())
    }
}

/// An ordered set of predictor names.
///
/// Order is insertion order and only matters for display; membership decides
/// equality of models (see [`PredictorSet::same_members`]). Updates return a new
/// snapshot instead of mutating in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PredictorSet {
    names: Vec<String>,
}

impl PredictorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from names, dropping repeated entries.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            let name = name.into();
            if !set.contains(&name) {
                set.names.push(name);
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Snapshot with `name` appended (unchanged if already present).
    pub fn with(&self, name: &str) -> Self {
        let mut next = self.clone();
        if !next.contains(name) {
            next.names.push(name.to_string());
        }
        next
    }

    /// Snapshot with `name` removed.
    pub fn without(&self, name: &str) -> Self {
        Self {
            names: self.names.iter().filter(|n| *n != name).cloned().collect(),
        }
    }

    /// Membership equality, ignoring order.
    pub fn same_members(&self, other: &PredictorSet) -> bool {
        self.len() == other.len() && self.iter().all(|n| other.contains(n))
    }

    /// Order-independent key, used to detect revisited models.
    pub fn membership_key(&self) -> Vec<String> {
        let mut key = self.names.clone();
        key.sort();
        key
    }
}

impl fmt::Display for PredictorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.names.is_empty() {
            write!(f, "(intercept only)")
        } else {
            write!(f, "{}", self.names.join(" "))
        }
    }
}
