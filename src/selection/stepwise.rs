//! Forward, backward and bidirectional stepwise search.
//!
//! The engine is a small state machine:
//!
//! ```text
//! Ready -> Evaluating(phase) -> Advanced(phase) -> Evaluating(..) -> ... -> Converged
//!                  \-> Failed (candidate fit degenerate)
//! ```
//!
//! Each accepted move produces a new [`PredictorSet`] snapshot and a
//! [`StepRecord`]; the model is never edited in place.

use super::constraints::ConstraintSet;
use super::criterion::{Preference, Scorer};
use super::error::SelectionError;
use super::fitter::{CandidateFitter, CandidateResult};
use super::options::{Direction, SelectionOptions};
use super::report::{SelectionReport, SelectionResult, StepAction, StepRecord};
use crate::core::{Dataset, PredictorSet};
use log::{debug, log, trace, Level};
use std::collections::HashSet;

/// Half of a stepwise iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entry,
    Removal,
}

/// States of a stepwise run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constraints validated, starting model fitted.
    Ready,
    /// Scoring the candidates of one phase.
    Evaluating(Phase),
    /// A move of this phase was accepted.
    Advanced(Phase),
    /// No candidate passes its test.
    Converged,
    /// A candidate fit was degenerate.
    Failed,
}

impl EngineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Converged | Self::Failed)
    }
}

/// The best candidate of one phase.
struct Move {
    variable: String,
    statistic: f64,
    fit: CandidateResult,
}

/// Mutable bookkeeping of one run.
struct Search {
    current: CandidateResult,
    /// Criterion value of `current`; NaN in p-value mode.
    current_score: f64,
    steps: Vec<StepRecord>,
    visited: HashSet<Vec<String>>,
    /// Blocked from removal until the backward pass after its entry ends.
    entered_last: Option<String>,
}

/// Stepwise selection over the free predictors of a dataset.
pub struct StepwiseEngine<'a> {
    fitter: CandidateFitter<'a>,
    constraints: &'a ConstraintSet,
    options: &'a SelectionOptions,
    scorer: Scorer<'a>,
    free: Vec<String>,
}

impl<'a> StepwiseEngine<'a> {
    /// `full` is the reference model with every candidate predictor.
    pub fn new(
        data: &'a Dataset,
        constraints: &'a ConstraintSet,
        options: &'a SelectionOptions,
        full: &'a CandidateResult,
    ) -> Result<Self, SelectionError> {
        if !options.direction.is_stepwise() {
            return Err(SelectionError::UnsupportedCombination(format!(
                "stepwise engine with direction '{}'",
                options.direction
            )));
        }
        constraints.check_against(data)?;

        Ok(Self {
            fitter: CandidateFitter::new(data),
            constraints,
            options,
            scorer: Scorer::new(options.criterion, options.ic_method, full),
            free: constraints.free_predictors(data),
        })
    }

    /// Run from the default start: the included predictors for forward and
    /// bidirectional search, every candidate for backward search.
    pub fn run(&self) -> Result<SelectionResult, SelectionError> {
        let start = match self.options.direction {
            Direction::Backward => self.constraints.candidate_set(self.fitter.dataset()),
            _ => self.constraints.included().clone(),
        };
        self.run_from(&start)
    }

    /// Run from an explicit starting model.
    ///
    /// Rerunning from the final model of a previous run with the same options
    /// converges without steps.
    pub fn run_from(&self, start: &PredictorSet) -> Result<SelectionResult, SelectionError> {
        let data = self.fitter.dataset();
        if let Some(unknown) = start.iter().find(|name| data.position(name).is_none()) {
            return Err(SelectionError::UnknownPredictor(unknown.to_string()));
        }
        if !self.constraints.admits(start) {
            return Err(SelectionError::UnsupportedCombination(format!(
                "starting model [{start}] violates the include/exclude constraints"
            )));
        }

        debug!(
            "{} selection by {} from [{}] over {} free predictors",
            self.options.direction,
            self.options.criterion,
            start,
            self.free.len()
        );

        let mut search = self.begin(start)?;
        let base_value = search.current_score;
        let mut state = EngineState::Ready;

        while !state.is_terminal() {
            let next = match self.transition(state, &mut search) {
                Ok(next) => next,
                Err(err) => {
                    trace!("{state:?} -> Failed: {err}");
                    return Err(err);
                }
            };
            trace!("{state:?} -> {next:?}");
            state = next;
        }

        debug!(
            "converged after {} steps with [{}]",
            search.steps.len(),
            search.current.predictors
        );

        Ok(SelectionReport::stepwise(
            self.options.direction,
            self.options.criterion,
            base_value,
            search.current,
            search.steps,
        ))
    }

    fn begin(&self, start: &PredictorSet) -> Result<Search, SelectionError> {
        let current = self.fitter.fit_or_baseline(start)?;
        let current_score = self.scorer.model_score(&current)?;
        let mut visited = HashSet::new();
        visited.insert(start.membership_key());

        Ok(Search {
            current,
            current_score,
            steps: Vec::new(),
            visited,
            entered_last: None,
        })
    }

    fn transition(
        &self,
        state: EngineState,
        search: &mut Search,
    ) -> Result<EngineState, SelectionError> {
        let next = match state {
            EngineState::Ready => EngineState::Evaluating(self.first_phase()),
            EngineState::Evaluating(phase) => {
                let chosen = match phase {
                    Phase::Entry => self.evaluate_entry(search)?,
                    Phase::Removal => self.evaluate_removal(search)?,
                };
                match chosen {
                    Some(mv) => {
                        self.advance(search, phase, mv);
                        EngineState::Advanced(phase)
                    }
                    None => self.exhausted(phase, search),
                }
            }
            EngineState::Advanced(_) => EngineState::Evaluating(self.phase_after_move()),
            EngineState::Converged | EngineState::Failed => state,
        };
        Ok(next)
    }

    fn first_phase(&self) -> Phase {
        match self.options.direction {
            Direction::Backward => Phase::Removal,
            _ => Phase::Entry,
        }
    }

    /// Phase to evaluate after an accepted move. Bidirectional search follows
    /// every entry with a backward pass.
    fn phase_after_move(&self) -> Phase {
        match self.options.direction {
            Direction::Forward => Phase::Entry,
            _ => Phase::Removal,
        }
    }

    /// State after a phase found nothing to do.
    fn exhausted(&self, phase: Phase, search: &mut Search) -> EngineState {
        match (self.options.direction, phase) {
            // End of a backward pass: entries are considered again.
            (Direction::Both, Phase::Removal) => {
                search.entered_last = None;
                EngineState::Evaluating(Phase::Entry)
            }
            _ => EngineState::Converged,
        }
    }

    fn entry_candidates<'s>(&'s self, search: &Search) -> Vec<&'s str> {
        let mut candidates: Vec<&str> = self
            .free
            .iter()
            .map(String::as_str)
            .filter(|name| !search.current.predictors.contains(name))
            .collect();
        if self.options.hierarchical {
            candidates.truncate(1);
        }
        candidates
    }

    fn removal_candidates<'s>(&'s self, search: &Search) -> Vec<&'s str> {
        let mut candidates: Vec<&str> = self
            .free
            .iter()
            .map(String::as_str)
            .filter(|name| search.current.predictors.contains(name))
            .filter(|name| search.entered_last.as_deref() != Some(*name))
            .collect();
        if self.options.hierarchical {
            let last = candidates.pop();
            candidates = last.into_iter().collect();
        }
        candidates
    }

    fn evaluate_entry(&self, search: &Search) -> Result<Option<Move>, SelectionError> {
        let p_value_mode = self.scorer.criterion().is_p_value();
        let preference = self.scorer.criterion().preference();
        let mut best: Option<Move> = None;

        for name in self.entry_candidates(search) {
            let next = search.current.predictors.with(name);
            if search.visited.contains(&next.membership_key()) {
                trace!("skip {name}: [{next}] already visited");
                continue;
            }

            let fit = self.fitter.fit(&next)?;
            let statistic = if p_value_mode {
                self.scorer.term_p_value(&fit, name)
            } else {
                self.scorer.model_score(&fit)
            };
            let Some(statistic) = self.candidate_value(name, statistic)? else {
                continue;
            };

            if Self::replaces(preference, statistic, best.as_ref()) {
                best = Some(Move {
                    variable: name.to_string(),
                    statistic,
                    fit,
                });
            }
        }

        Ok(best.filter(|mv| {
            if p_value_mode {
                mv.statistic <= self.options.entry_alpha
            } else {
                self.scorer.improves(mv.statistic, search.current_score)
            }
        }))
    }

    fn evaluate_removal(&self, search: &Search) -> Result<Option<Move>, SelectionError> {
        if self.scorer.criterion().is_p_value() {
            return self.evaluate_removal_by_p_value(search);
        }

        let preference = self.scorer.criterion().preference();
        let mut best: Option<Move> = None;

        for name in self.removal_candidates(search) {
            let next = search.current.predictors.without(name);
            if search.visited.contains(&next.membership_key()) {
                trace!("skip {name}: [{next}] already visited");
                continue;
            }

            let fit = self.fitter.fit_or_baseline(&next)?;
            let Some(statistic) = self.candidate_value(name, self.scorer.model_score(&fit))?
            else {
                continue;
            };

            if Self::replaces(preference, statistic, best.as_ref()) {
                best = Some(Move {
                    variable: name.to_string(),
                    statistic,
                    fit,
                });
            }
        }

        Ok(best.filter(|mv| self.scorer.improves(mv.statistic, search.current_score)))
    }

    /// The term with the largest p-value in the current model leaves when that
    /// p-value exceeds the removal level.
    fn evaluate_removal_by_p_value(&self, search: &Search) -> Result<Option<Move>, SelectionError> {
        let mut best: Option<(&str, f64, PredictorSet)> = None;

        for name in self.removal_candidates(search) {
            let next = search.current.predictors.without(name);
            if search.visited.contains(&next.membership_key()) {
                trace!("skip {name}: [{next}] already visited");
                continue;
            }

            let p_value = self.scorer.term_p_value(&search.current, name);
            let Some(p_value) = self.candidate_value(name, p_value)? else {
                continue;
            };
            let replaces = match &best {
                None => true,
                Some((_, incumbent, _)) => Preference::Higher.prefers(p_value, *incumbent),
            };
            if replaces {
                best = Some((name, p_value, next));
            }
        }

        match best {
            Some((name, p_value, next)) if p_value > self.options.removal_alpha => {
                Ok(Some(Move {
                    variable: name.to_string(),
                    statistic: p_value,
                    fit: self.fitter.fit_or_baseline(&next)?,
                }))
            }
            _ => Ok(None),
        }
    }

    /// Unwrap a candidate's statistic, dropping it when not computable.
    fn candidate_value(
        &self,
        name: &str,
        value: Result<f64, SelectionError>,
    ) -> Result<Option<f64>, SelectionError> {
        match value {
            Ok(v) if v.is_nan() => {
                log!(self.detail_level(), "candidate {name}: statistic undefined, skipped");
                Ok(None)
            }
            Ok(v) => {
                log!(self.detail_level(), "candidate {name}: {} = {v:.6}", self.scorer.criterion());
                Ok(Some(v))
            }
            Err(err @ SelectionError::NotComputable { .. }) => {
                log!(self.dropped_level(), "candidate {name} dropped: {err}");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn replaces(preference: Preference, statistic: f64, best: Option<&Move>) -> bool {
        best.map_or(true, |b| preference.prefers(statistic, b.statistic))
    }

    fn advance(&self, search: &mut Search, phase: Phase, mv: Move) {
        let action = match phase {
            Phase::Entry => StepAction::Enter,
            Phase::Removal => StepAction::Remove,
        };
        let p_value_mode = self.scorer.criterion().is_p_value();

        let record = StepRecord {
            step: search.steps.len() + 1,
            action,
            variable: mv.variable.clone(),
            predictors: mv.fit.predictors.clone(),
            criterion_value: mv.statistic,
            p_value: p_value_mode.then_some(mv.statistic),
            r_squared: mv.fit.r_squared,
            adj_r_squared: mv.fit.adj_r_squared,
            aic: self.scorer.aic_or_nan(&mv.fit),
            rmse: mv.fit.rmse,
        };

        log!(
            self.progress_level(),
            "step {}: {} {} ({} = {:.6}), model [{}]",
            record.step,
            record.action,
            record.variable,
            self.scorer.criterion(),
            record.criterion_value,
            record.predictors
        );

        if action == StepAction::Enter {
            search.entered_last = Some(mv.variable);
        }
        search.current_score = if p_value_mode { f64::NAN } else { mv.statistic };
        search.visited.insert(mv.fit.predictors.membership_key());
        search.current = mv.fit;
        search.steps.push(record);
    }

    fn progress_level(&self) -> Level {
        if self.options.progress {
            Level::Info
        } else {
            Level::Debug
        }
    }

    fn detail_level(&self) -> Level {
        if self.options.details {
            Level::Info
        } else {
            Level::Debug
        }
    }

    /// Dropped candidates stay visible whenever progress is reported.
    fn dropped_level(&self) -> Level {
        if self.options.progress {
            Level::Info
        } else {
            self.detail_level()
        }
    }
}
