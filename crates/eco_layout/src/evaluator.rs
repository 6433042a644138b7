//! The evaluation driver.

use crate::error::EvalError;
use crate::input::{AppliedRound, EcoPlanEntry, LayoutRecord};
use crate::layout::Layout;
use crate::round::{apply_round, EvalState, RoundSummary};
use crate::score::{score, CostWeights, ScoreReport};
use crate::utilization::{BinCount, UtilizationMap};

/// Owns the layout and the accumulated statistics of one evaluation.
#[derive(Debug)]
pub struct Evaluator {
    layout: Layout,
    state: EvalState,
    weights: CostWeights,
    bins: Option<BinCount>,
    utilization: Vec<UtilizationMap>,
}

impl Evaluator {
    /// Loads the starting layout, taking the cost weights from it.
    pub fn new(record: &LayoutRecord) -> Result<Self, EvalError> {
        Ok(Self {
            layout: Layout::from_record(record)?,
            state: EvalState::new(),
            weights: CostWeights {
                alpha: record.alpha,
                beta: record.beta,
            },
            bins: None,
            utilization: Vec::new(),
        })
    }

    /// Replaces the cost weights.
    pub fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Records a utilization map on a `bins` grid now and after every legal
    /// round from here on.
    pub fn track_utilization(mut self, bins: BinCount) -> Self {
        let round = self.state.rounds_applied();
        self.utilization.push(self.layout.utilization(bins, round));
        self.bins = Some(bins);
        self
    }

    /// Fails unless the moves log has exactly one block per plan entry.
    pub fn check_round_counts(
        plan: &[EcoPlanEntry],
        applied: &[AppliedRound],
    ) -> Result<(), EvalError> {
        if plan.len() != applied.len() {
            return Err(EvalError::RoundCountMismatch {
                planned: plan.len(),
                applied: applied.len(),
            });
        }
        Ok(())
    }

    /// Applies the next round and checks it.
    pub fn apply_round(
        &mut self,
        entry: &EcoPlanEntry,
        applied: &AppliedRound,
    ) -> Result<RoundSummary, EvalError> {
        let round = self.state.rounds_applied() + 1;
        let summary = apply_round(&mut self.layout, &mut self.state, round, entry, applied)?;
        if let Some(bins) = self.bins {
            self.utilization.push(self.layout.utilization(bins, round));
        }
        Ok(summary)
    }

    /// Checks round counts, applies every round in order, and scores.
    ///
    /// Stops at the first failing round; no score is produced then.
    pub fn run(
        &mut self,
        plan: &[EcoPlanEntry],
        applied: &[AppliedRound],
    ) -> Result<ScoreReport, EvalError> {
        Self::check_round_counts(plan, applied)?;
        for (entry, round) in plan.iter().zip(applied) {
            self.apply_round(entry, round)?;
        }
        Ok(self.score())
    }

    /// Re-checks the whole layout pairwise, without the row index.
    ///
    /// Returns the first violation, attributed to the last applied round.
    pub fn audit(&self) -> Result<(), EvalError> {
        match self.layout.audit().into_iter().next() {
            Some(violation) => Err(EvalError::Illegal {
                round: self.state.rounds_applied(),
                violation,
            }),
            None => Ok(()),
        }
    }

    /// Scores the rounds applied so far.
    pub fn score(&self) -> ScoreReport {
        score(&self.state, self.weights)
    }

    /// The current layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Accumulated statistics.
    pub fn state(&self) -> &EvalState {
        &self.state
    }

    /// Utilization maps recorded so far, oldest first. Empty unless
    /// [`Evaluator::track_utilization`] was called.
    pub fn utilization(&self) -> &[UtilizationMap] {
        &self.utilization
    }

    /// Weights used for scoring.
    pub fn weights(&self) -> CostWeights {
        self.weights
    }
}

/// Evaluates a complete plan against a layout in one call.
pub fn evaluate(
    layout: &LayoutRecord,
    plan: &[EcoPlanEntry],
    applied: &[AppliedRound],
) -> Result<ScoreReport, EvalError> {
    Evaluator::new(layout)?.run(plan, applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::die::{DieBoundary, PlacementRow};
    use crate::geometry::Coord;
    use crate::input::CellRecord;

    fn record() -> LayoutRecord {
        LayoutRecord {
            die: DieBoundary::new(0.0, 0.0, 100.0, 10.0),
            alpha: 1.0,
            beta: 2.0,
            cells: Vec::new(),
            rows: vec![PlacementRow {
                origin: Coord::new(0.0, 0.0),
                site_width: 1.0,
                site_height: 10.0,
                site_count: 100,
            }],
        }
    }

    fn entry(name: &str) -> EcoPlanEntry {
        EcoPlanEntry {
            remove: Vec::new(),
            new_cell: CellRecord {
                name: name.to_string(),
                origin: Coord::new(0.0, 0.0),
                width: 10.0,
                height: 10.0,
                fixed: false,
            },
        }
    }

    fn placed(x: f64) -> AppliedRound {
        AppliedRound {
            placement: Coord::new(x, 0.0),
            moves: Vec::new(),
        }
    }

    #[test]
    fn round_count_mismatch_runs_nothing() {
        let mut eval = Evaluator::new(&record()).unwrap();
        let err = eval.run(&[entry("A"), entry("B")], &[placed(0.0)]).unwrap_err();
        assert!(matches!(
            err,
            EvalError::RoundCountMismatch {
                planned: 2,
                applied: 1
            }
        ));
        assert_eq!(eval.state().rounds_applied(), 0);
        assert!(eval.layout().cells().is_empty());
    }

    #[test]
    fn rounds_are_numbered_from_one() {
        let mut eval = Evaluator::new(&record()).unwrap();
        let first = eval.apply_round(&entry("A"), &placed(0.0)).unwrap();
        let second = eval.apply_round(&entry("B"), &placed(20.0)).unwrap();
        assert_eq!((first.round, second.round), (1, 2));
        assert!(eval.audit().is_ok());
    }

    #[test]
    fn weight_override_changes_the_score() {
        let report = evaluate(&record(), &[entry("A")], &[placed(30.0)]).unwrap();
        assert_eq!(report.total, 1.0 + 2.0 * 30.0);

        let mut eval = Evaluator::new(&record())
            .unwrap()
            .with_weights(CostWeights {
                alpha: 5.0,
                beta: 0.0,
            });
        let report = eval.run(&[entry("A")], &[placed(30.0)]).unwrap();
        assert_eq!(report.total, 5.0);
        assert_eq!(report.move_pct, 100.0);
        assert_eq!(eval.weights().beta, 0.0);
    }

    #[test]
    fn utilization_is_tracked_per_legal_round() {
        let bins = BinCount::new(2, 1).unwrap();
        let mut eval = Evaluator::new(&record()).unwrap().track_utilization(bins);
        eval.apply_round(&entry("A"), &placed(0.0)).unwrap();
        eval.apply_round(&entry("B"), &placed(60.0)).unwrap();
        assert!(eval.apply_round(&entry("C"), &placed(5.0)).is_err());

        let maps = eval.utilization();
        let rounds: Vec<usize> = maps.iter().map(|m| m.round).collect();
        assert_eq!(rounds, vec![0, 1, 2]);
        assert_eq!(maps[0].peak(), 0.0);
        // 10x10 cells in 50x10 bins.
        assert_eq!(maps[1].bins, vec![vec![0.2, 0.0]]);
        assert_eq!(maps[2].bins, vec![vec![0.2, 0.2]]);
        assert_eq!(maps[2].die_usage, 0.2);
    }

    #[test]
    fn utilization_is_off_by_default() {
        let mut eval = Evaluator::new(&record()).unwrap();
        eval.apply_round(&entry("A"), &placed(0.0)).unwrap();
        assert!(eval.utilization().is_empty());
    }
}
