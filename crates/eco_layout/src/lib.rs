//! Legality checking and scoring of incremental ECO placement rounds.
//!
//! An evaluation starts from a legal layout and replays an ECO plan round by
//! round. Each round merges some cells away, inserts one new cell and moves a
//! list of existing cells. After every round the touched cells are checked
//! against four rules, in order:
//!
//! 1. **Fixed**: no `FIX` cell was moved.
//! 2. **Boundary**: every touched cell lies within the die.
//! 3. **On-site**: x is a whole site and y starts a placement row.
//! 4. **Overlap**: no touched cell shares area with a neighbor in any row it
//!    spans.
//!
//! The first failure ends the evaluation. If every round passes, the cost is
//! `alpha * moves + beta * displacement`, where displacement sums the
//! Manhattan distance of every moved cell from where it entered the layout.
//!
//! Optionally, a [`UtilizationMap`] of the placement area is taken before the
//! first round and after every legal one.
//!
//! # Usage
//!
//! ```ignore
//! use eco_layout::Evaluator;
//!
//! let mut eval = Evaluator::new(&layout_record)?;
//! let report = eval.run(&plan, &applied)?;
//! println!("cost {}", report.total);
//! ```

#![warn(missing_docs)]

pub mod cell;
pub mod die;
pub mod error;
pub mod evaluator;
pub mod geometry;
pub mod ids;
pub mod input;
pub mod layout;
pub mod legality;
pub mod round;
pub mod row_index;
pub mod score;
pub mod utilization;

pub use cell::{Cell, CellRegistry};
pub use die::{DieBoundary, PlacementRow, RowGrid};
pub use error::{CellRole, EvalError};
pub use evaluator::{evaluate, Evaluator};
pub use geometry::{hpwl, Coord, Rect};
pub use ids::{CellId, RowId};
pub use input::{AppliedRound, CellMove, CellRecord, EcoPlanEntry, LayoutRecord};
pub use layout::Layout;
pub use legality::{audit_layout, LegalityChecker, SiteMisalignment, TouchedCells, Violation};
pub use round::{apply_round, EvalState, MoveRecord, RoundSummary};
pub use row_index::{Neighbors, RowIndex, SlotKey};
pub use score::{score, CostWeights, ScoreReport};
pub use utilization::{BinCount, UtilizationMap};
