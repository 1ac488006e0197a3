//! Force-included, force-excluded and free predictors.

use super::error::SelectionError;
use crate::core::{Dataset, PredictorSet};

/// Inclusion and exclusion constraints of a selection run.
///
/// Construction guarantees the two sets are disjoint.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    included: PredictorSet,
    excluded: PredictorSet,
}

impl ConstraintSet {
    /// Fails with [`SelectionError::ConstraintOverlap`] naming every predictor
    /// found in both lists.
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self, SelectionError> {
        let included = PredictorSet::from_names(include.iter().map(|s| s.as_ref()));
        let excluded = PredictorSet::from_names(exclude.iter().map(|s| s.as_ref()));

        let overlap: Vec<String> = included
            .iter()
            .filter(|name| excluded.contains(name))
            .map(str::to_string)
            .collect();
        if !overlap.is_empty() {
            return Err(SelectionError::ConstraintOverlap(overlap));
        }

        Ok(Self { included, excluded })
    }

    /// Every constrained name must be a predictor of `data`.
    pub fn check_against(&self, data: &Dataset) -> Result<(), SelectionError> {
        match self
            .included
            .iter()
            .chain(self.excluded.iter())
            .find(|name| data.position(name).is_none())
        {
            Some(unknown) => Err(SelectionError::UnknownPredictor(unknown.to_string())),
            None => Ok(()),
        }
    }

    pub fn included(&self) -> &PredictorSet {
        &self.included
    }

    pub fn excluded(&self) -> &PredictorSet {
        &self.excluded
    }

    pub fn is_included(&self, name: &str) -> bool {
        self.included.contains(name)
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    /// Predictors the search may add or remove, in declaration order.
    pub fn free_predictors(&self, data: &Dataset) -> Vec<String> {
        data.predictor_names()
            .iter()
            .filter(|name| !self.is_included(name) && !self.is_excluded(name))
            .cloned()
            .collect()
    }

    /// Included predictors followed by the free ones: the largest model a
    /// search may reach.
    pub fn candidate_set(&self, data: &Dataset) -> PredictorSet {
        PredictorSet::from_names(
            self.included
                .iter()
                .map(str::to_string)
                .chain(self.free_predictors(data)),
        )
    }

    /// Whether `set` honours both constraint lists.
    pub fn admits(&self, set: &PredictorSet) -> bool {
        self.included.iter().all(|name| set.contains(name))
            && !set.iter().any(|name| self.is_excluded(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Dataset {
        Dataset::from_columns(
            "y",
            &[1.0, 2.0, 3.0, 5.0],
            &[
                ("a", &[1.0, 0.0, 1.0, 0.0]),
                ("b", &[2.0, 4.0, 6.0, 7.0]),
                ("c", &[0.5, 0.1, 0.3, 0.9]),
                ("d", &[1.0, 1.0, 2.0, 3.0]),
            ],
        )
        .expect("valid dataset")
    }

    #[test]
    fn test_overlap_is_rejected() {
        let err = ConstraintSet::new(&["a", "b"], &["b", "c"]).expect_err("b overlaps");
        assert!(matches!(err, SelectionError::ConstraintOverlap(ref v) if v == &["b"]));
    }

    #[test]
    fn test_free_predictors_follow_declaration_order() {
        let constraints = ConstraintSet::new(&["c"], &["a"]).expect("disjoint");
        assert_eq!(constraints.free_predictors(&data()), vec!["b", "d"]);
        assert_eq!(constraints.candidate_set(&data()).names(), ["c", "b", "d"]);
    }

    #[test]
    fn test_unknown_names() {
        let constraints = ConstraintSet::new(&["zzz"], &[]).expect("disjoint");
        assert!(matches!(
            constraints.check_against(&data()),
            Err(SelectionError::UnknownPredictor(ref n)) if n == "zzz"
        ));
    }

    #[test]
    fn test_admits() {
        let constraints = ConstraintSet::new(&["b"], &["d"]).expect("disjoint");
        assert!(constraints.admits(&PredictorSet::from_names(["a", "b"])));
        assert!(!constraints.admits(&PredictorSet::from_names(["a"])));
        assert!(!constraints.admits(&PredictorSet::from_names(["b", "d"])));
    }
}
