//! Result objects of selection runs and their reporting capability.

use super::criterion::{Criterion, Preference, SubsetMetric};
use super::fitter::CandidateResult;
use super::metrics::MetricsVector;
use super::options::Direction;
use crate::core::PredictorSet;
use std::fmt;

/// What a step did to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Enter,
    Remove,
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => f.write_str("enter"),
            Self::Remove => f.write_str("remove"),
        }
    }
}

/// One accepted move of a stepwise search.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    /// 1-based.
    pub step: usize,
    pub action: StepAction,
    pub variable: String,
    /// Model after the move.
    pub predictors: PredictorSet,
    /// Criterion value of the new model; the triggering p-value in p-value mode.
    pub criterion_value: f64,
    /// Set in p-value mode only.
    pub p_value: Option<f64>,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub aic: f64,
    pub rmse: f64,
}

/// Outcome of a forward, backward or bidirectional search.
///
/// An empty step log is a valid result: no predictor met the selection rule
/// and `model` is the starting model.
#[derive(Debug, Clone)]
pub struct SelectionResult {
    pub direction: Direction,
    pub criterion: Criterion,
    /// Terminal fit.
    pub model: CandidateResult,
    pub steps: Vec<StepRecord>,
    /// Criterion value of the starting model, NaN in p-value mode.
    pub base_value: f64,
}

impl SelectionResult {
    /// Predictors of the terminal model.
    pub fn predictors(&self) -> &PredictorSet {
        &self.model.predictors
    }

    pub fn n_steps(&self) -> usize {
        self.steps.len()
    }

    /// True when the run converged without moving.
    pub fn selected_nothing(&self) -> bool {
        self.steps.is_empty()
    }

    /// Criterion value after each step.
    pub fn trajectory(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.criterion_value).collect()
    }

    /// Variables entered, in order.
    pub fn entered(&self) -> Vec<&str> {
        self.variables(StepAction::Enter)
    }

    /// Variables removed, in order.
    pub fn removed(&self) -> Vec<&str> {
        self.variables(StepAction::Remove)
    }

    fn variables(&self, action: StepAction) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| s.action == action)
            .map(|s| s.variable.as_str())
            .collect()
    }
}

/// One enumerated subset with its metric vector.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetRow {
    /// 1-based position in the report.
    pub index: usize,
    /// Number of predictors in the subset.
    pub size: usize,
    pub predictors: PredictorSet,
    pub metrics: MetricsVector,
}

/// Every enumerated subset, grouped by size and sorted by R² within a size.
#[derive(Debug, Clone)]
pub struct SubsetEnumerationResult {
    pub rows: Vec<SubsetRow>,
}

impl SubsetEnumerationResult {
    pub fn n_subsets(&self) -> usize {
        self.rows.len()
    }

    pub fn rows_of_size(&self, size: usize) -> impl Iterator<Item = &SubsetRow> {
        self.rows.iter().filter(move |r| r.size == size)
    }

    /// Row whose subset has exactly these members.
    pub fn find(&self, predictors: &PredictorSet) -> Option<&SubsetRow> {
        self.rows.iter().find(|r| r.predictors.same_members(predictors))
    }
}

/// The top subset of each size under a ranking metric.
#[derive(Debug, Clone)]
pub struct BestSubsetResult {
    pub metric: SubsetMetric,
    /// One row per size, increasing size.
    pub rows: Vec<SubsetRow>,
    evaluated: Vec<SubsetRow>,
}

impl BestSubsetResult {
    /// The winner across sizes; the smaller subset on ties.
    pub fn best_overall(&self) -> Option<&SubsetRow> {
        let preference = self.metric.preference();
        preference
            .best_index(self.rows.iter().map(|r| self.metric.value(&r.metrics)))
            .map(|i| &self.rows[i])
    }

    /// Per-size winners under another metric, from the same enumeration.
    pub fn winners(&self, metric: SubsetMetric) -> Vec<&SubsetRow> {
        per_size_winners(&self.evaluated, metric)
    }

    /// Every subset that was fitted, in enumeration order.
    pub fn evaluated(&self) -> &[SubsetRow] {
        &self.evaluated
    }
}

/// A labelled row of named values.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub label: String,
    pub values: Vec<(&'static str, f64)>,
}

impl ReportRow {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

/// A named series with one label per point.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub name: String,
    pub points: Vec<f64>,
    pub labels: Vec<String>,
}

/// What printing and plotting code needs from a selection result.
///
/// Every value is precomputed; consumers perform no statistics.
pub trait Reportable {
    /// Human-readable name of the procedure.
    fn method(&self) -> String;

    fn summary_rows(&self) -> Vec<ReportRow>;

    fn plot_series(&self) -> Vec<PlotSeries>;
}

impl Reportable for SelectionResult {
    fn method(&self) -> String {
        format!("stepwise {} selection by {}", self.direction, self.criterion)
    }

    fn summary_rows(&self) -> Vec<ReportRow> {
        self.steps
            .iter()
            .map(|s| ReportRow {
                label: format!("{} {} {}", s.step, s.action, s.variable),
                values: vec![
                    (self.criterion.label(), s.criterion_value),
                    ("rsquare", s.r_squared),
                    ("adjr", s.adj_r_squared),
                    ("aic", s.aic),
                    ("rmse", s.rmse),
                ],
            })
            .collect()
    }

    fn plot_series(&self) -> Vec<PlotSeries> {
        let labels: Vec<String> = self.steps.iter().map(|s| s.variable.clone()).collect();
        let series = |name: &str, f: fn(&StepRecord) -> f64| PlotSeries {
            name: name.to_string(),
            points: self.steps.iter().map(f).collect(),
            labels: labels.clone(),
        };
        vec![
            series(self.criterion.label(), |s| s.criterion_value),
            series("rsquare", |s| s.r_squared),
            series("adjr", |s| s.adj_r_squared),
            series("aic", |s| s.aic),
            series("rmse", |s| s.rmse),
        ]
    }
}

fn subset_summary(rows: &[SubsetRow]) -> Vec<ReportRow> {
    rows.iter()
        .map(|r| ReportRow {
            label: format!("{} [{}] {}", r.index, r.size, r.predictors),
            values: r.metrics.named().to_vec(),
        })
        .collect()
}

fn subset_series<'a>(rows: impl Iterator<Item = &'a SubsetRow> + Clone) -> Vec<PlotSeries> {
    let labels: Vec<String> = rows.clone().map(|r| r.predictors.to_string()).collect();
    let columns: Vec<Vec<(&'static str, f64)>> =
        rows.map(|r| r.metrics.named().to_vec()).collect();

    MetricsVector::NAMES
        .iter()
        .enumerate()
        .map(|(j, name)| PlotSeries {
            name: name.to_string(),
            points: columns.iter().map(|row| row[j].1).collect(),
            labels: labels.clone(),
        })
        .collect()
}

impl Reportable for SubsetEnumerationResult {
    fn method(&self) -> String {
        "all possible regression".to_string()
    }

    fn summary_rows(&self) -> Vec<ReportRow> {
        subset_summary(&self.rows)
    }

    fn plot_series(&self) -> Vec<PlotSeries> {
        subset_series(self.rows.iter())
    }
}

impl Reportable for BestSubsetResult {
    fn method(&self) -> String {
        format!("best subset regression by {:?}", self.metric)
    }

    fn summary_rows(&self) -> Vec<ReportRow> {
        subset_summary(&self.rows)
    }

    fn plot_series(&self) -> Vec<PlotSeries> {
        subset_series(self.rows.iter())
    }
}

fn per_size_winners(evaluated: &[SubsetRow], metric: SubsetMetric) -> Vec<&SubsetRow> {
    let mut sizes: Vec<usize> = evaluated.iter().map(|r| r.size).collect();
    sizes.sort_unstable();
    sizes.dedup();

    let preference: Preference = metric.preference();
    sizes
        .into_iter()
        .filter_map(|size| {
            let group: Vec<&SubsetRow> = evaluated.iter().filter(|r| r.size == size).collect();
            // A size whose rows are all NaN still reports its first subset.
            let winner = preference
                .best_index(group.iter().map(|r| metric.value(&r.metrics)))
                .unwrap_or(0);
            group.get(winner).copied()
        })
        .collect()
}

/// Assembles result objects; performs no statistics of its own.
pub struct SelectionReport;

impl SelectionReport {
    pub fn stepwise(
        direction: Direction,
        criterion: Criterion,
        base_value: f64,
        model: CandidateResult,
        steps: Vec<StepRecord>,
    ) -> SelectionResult {
        SelectionResult {
            direction,
            criterion,
            model,
            steps,
            base_value,
        }
    }

    /// Group rows by size, sort each group by R² descending (stable), and
    /// renumber from 1.
    pub fn all_possible(mut rows: Vec<SubsetRow>) -> SubsetEnumerationResult {
        rows.sort_by(|a, b| {
            a.size.cmp(&b.size).then_with(|| {
                b.metrics
                    .r_squared
                    .partial_cmp(&a.metrics.r_squared)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });
        renumber(&mut rows);
        SubsetEnumerationResult { rows }
    }

    /// Keep the winner of each size; rows arrive in enumeration order.
    pub fn best_subset(mut evaluated: Vec<SubsetRow>, metric: SubsetMetric) -> BestSubsetResult {
        renumber(&mut evaluated);
        let mut rows: Vec<SubsetRow> = per_size_winners(&evaluated, metric)
            .into_iter()
            .cloned()
            .collect();
        renumber(&mut rows);
        BestSubsetResult {
            metric,
            rows,
            evaluated,
        }
    }
}

fn renumber(rows: &mut [SubsetRow]) {
    for (i, row) in rows.iter_mut().enumerate() {
        row.index = i + 1;
    }
}
