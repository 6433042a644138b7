//! Applying one ECO round to the layout.
//!
//! A round runs in a fixed order: register the new cell, drop the remove
//! set, reposition the moved cells with their row re-insertion deferred,
//! place the new cell, re-index everything touched, then check legality.
//! Re-insertion waits until every move is applied so two cells swapping
//! places never collide halfway through.
//!
//! A failing round leaves the layout partially mutated. Evaluation stops
//! there, so nothing is rolled back.

use crate::cell::Cell;
use crate::error::{CellRole, EvalError};
use crate::geometry::{hpwl, Coord};
use crate::ids::CellId;
use crate::input::{AppliedRound, EcoPlanEntry};
use crate::layout::Layout;
use crate::legality::TouchedCells;
use eco_common::{Ident, InternalError};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Displacement bookkeeping for one cell that has moved at least once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveRecord {
    /// Interned cell name.
    pub name: Ident,
    /// Where the cell was when it first entered the layout.
    pub original: Coord,
    /// Where its last move put it.
    pub current: Coord,
}

impl MoveRecord {
    /// Manhattan distance from the original to the latest position.
    pub fn displacement(&self) -> f64 {
        hpwl(self.original, self.current)
    }
}

/// What one successful round did.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundSummary {
    /// 1-based round number.
    pub round: usize,
    /// Name of the inserted cell.
    pub new_cell: String,
    /// Cells removed by the plan entry.
    pub removed: usize,
    /// Distinct pre-existing cells moved.
    pub moved: usize,
    /// Move operations counted, the new cell's placement included.
    pub moves: u64,
}

/// Statistics accumulated across rounds.
#[derive(Debug, Default)]
pub struct EvalState {
    move_count: u64,
    ledger: Vec<MoveRecord>,
    ledger_index: HashMap<Ident, usize>,
    summaries: Vec<RoundSummary>,
}

impl EvalState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total move operations so far.
    pub fn move_count(&self) -> u64 {
        self.move_count
    }

    /// One record per cell ever moved, in first-move order.
    ///
    /// Records outlive the cell: a cell moved and later merged away still
    /// contributes its displacement.
    pub fn ledger(&self) -> &[MoveRecord] {
        &self.ledger
    }

    /// Sum of every ledger entry's displacement.
    pub fn total_distance(&self) -> f64 {
        self.ledger.iter().map(MoveRecord::displacement).sum()
    }

    /// Summaries of the rounds applied so far.
    pub fn summaries(&self) -> &[RoundSummary] {
        &self.summaries
    }

    /// Number of rounds applied so far.
    pub fn rounds_applied(&self) -> usize {
        self.summaries.len()
    }

    fn record_move(&mut self, cell: &Cell) {
        self.move_count += 1;
        match self.ledger_index.get(&cell.name) {
            Some(&slot) => self.ledger[slot].current = cell.current,
            None => {
                self.ledger_index.insert(cell.name, self.ledger.len());
                self.ledger.push(MoveRecord {
                    name: cell.name,
                    original: cell.original(),
                    current: cell.current,
                });
            }
        }
    }
}

/// Applies round `round` (1-based) and checks the cells it touched.
///
/// Names in the remove set and the move list must refer to cells that existed
/// before this round; the round's own new cell is not eligible for either.
pub fn apply_round(
    layout: &mut Layout,
    state: &mut EvalState,
    round: usize,
    entry: &EcoPlanEntry,
    applied: &AppliedRound,
) -> Result<RoundSummary, EvalError> {
    let record = &entry.new_cell;
    let new_cell = layout
        .cells
        .make_cell(&record.name, record.origin, record.width, record.height, false);
    let new_id = layout.cells.insert(new_cell)?;

    for name in &entry.remove {
        let id = existing(layout, new_id, round, name, CellRole::Removal)?;
        let cell = layout.cells.remove(id).ok_or_else(|| missing(id))?;
        layout.index.remove(id, &cell);
        log::debug!("round {round}: removed {name} at {}", cell.current);
    }

    let mut touched = TouchedCells::default();
    let mut unindexed = HashSet::new();
    for mv in &applied.moves {
        let id = existing(layout, new_id, round, &mv.name, CellRole::Move)?;
        let cell = layout.cells.get_mut(id).ok_or_else(|| missing(id))?;
        if unindexed.insert(id) {
            layout.index.remove(id, cell);
            touched.moved.push(id);
        }
        cell.current = mv.to;
        state.record_move(cell);
    }

    let cell = layout.cells.get_mut(new_id).ok_or_else(|| missing(new_id))?;
    cell.current = applied.placement;
    state.record_move(cell);
    touched.inserted = Some(new_id);

    for id in touched.all() {
        let cell = layout.cells.get(id).ok_or_else(|| missing(id))?;
        layout.index.insert(id, cell);
    }

    log::debug!(
        "round {round}: placed {} at {}, {} cell(s) moved, {} touched",
        record.name,
        applied.placement,
        touched.moved.len(),
        touched.len()
    );
    layout.checker(round).check_round(&touched)?;

    let summary = RoundSummary {
        round,
        new_cell: record.name.clone(),
        removed: entry.remove.len(),
        moved: touched.moved.len(),
        moves: applied.moves.len() as u64 + 1,
    };
    state.summaries.push(summary.clone());
    Ok(summary)
}

fn existing(
    layout: &Layout,
    new_id: CellId,
    round: usize,
    name: &str,
    role: CellRole,
) -> Result<CellId, EvalError> {
    layout
        .cells
        .find(name)
        .filter(|&id| id != new_id)
        .ok_or_else(|| EvalError::UnknownCell {
            round,
            name: name.to_string(),
            role,
        })
}

fn missing(id: CellId) -> EvalError {
    InternalError::new(format!("cell {id} vanished from the registry mid-round")).into()
}
