//! The ECO cost: `alpha * moves + beta * displacement`.

use crate::round::EvalState;
use serde::{Deserialize, Serialize};

/// Weights of the two cost terms.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostWeights {
    /// Weight of the move count.
    pub alpha: f64,
    /// Weight of the total displacement.
    pub beta: f64,
}

/// Final cost breakdown of a fully legal evaluation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreReport {
    /// Move operations across all rounds.
    pub move_count: u64,
    /// Distinct cells ever moved or inserted.
    pub moved_cells: usize,
    /// Summed Manhattan displacement of those cells.
    pub total_distance: f64,
    /// Move-count weight used.
    pub alpha: f64,
    /// Displacement weight used.
    pub beta: f64,
    /// `alpha * move_count`.
    pub move_cost: f64,
    /// `beta * total_distance`.
    pub distance_cost: f64,
    /// Sum of both terms.
    pub total: f64,
    /// Share of the move term in percent; 0 when the total is 0.
    pub move_pct: f64,
    /// Share of the displacement term in percent; 0 when the total is 0.
    pub distance_pct: f64,
    /// Rounds evaluated.
    pub rounds: usize,
}

/// Scores the accumulated state.
pub fn score(state: &EvalState, weights: CostWeights) -> ScoreReport {
    let move_count = state.move_count();
    let total_distance = state.total_distance();
    let move_cost = weights.alpha * move_count as f64;
    let distance_cost = weights.beta * total_distance;
    let total = move_cost + distance_cost;
    let pct = |part: f64| if total == 0.0 { 0.0 } else { part / total * 100.0 };

    let report = ScoreReport {
        move_count,
        moved_cells: state.ledger().len(),
        total_distance,
        alpha: weights.alpha,
        beta: weights.beta,
        move_cost,
        distance_cost,
        total,
        move_pct: pct(move_cost),
        distance_pct: pct(distance_cost),
        rounds: state.rounds_applied(),
    };
    log::info!(
        "score {}: {} move(s), distance {}",
        report.total,
        report.move_count,
        report.total_distance
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state_scores_zero() {
        let report = score(&EvalState::new(), CostWeights { alpha: 3.0, beta: 4.0 });
        assert_eq!(report.total, 0.0);
        assert_eq!(report.move_pct, 0.0);
        assert_eq!(report.distance_pct, 0.0);
        assert_eq!(report.rounds, 0);
    }

    #[test]
    fn report_serializes_every_term() {
        let report = score(&EvalState::new(), CostWeights { alpha: 1.0, beta: 2.0 });
        let json = serde_json::to_value(&report).unwrap();
        for key in [
            "move_count",
            "moved_cells",
            "total_distance",
            "alpha",
            "beta",
            "move_cost",
            "distance_cost",
            "total",
            "move_pct",
            "distance_pct",
            "rounds",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["beta"], 2.0);
    }
}
