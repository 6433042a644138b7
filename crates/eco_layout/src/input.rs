//! Structured records handed to the evaluator by the input parsers.

use crate::die::{DieBoundary, PlacementRow};
use crate::geometry::Coord;
use serde::{Deserialize, Serialize};

/// One cell line of the layout file, or the new cell of an ECO entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    /// Cell name.
    pub name: String,
    /// Lower-left corner.
    pub origin: Coord,
    /// Cell width.
    pub width: f64,
    /// Cell height.
    pub height: f64,
    /// Whether the cell is `FIX`.
    pub fixed: bool,
}

/// The starting layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutRecord {
    /// The die every cell must fit in.
    pub die: DieBoundary,
    /// Weight of the move count in the cost.
    pub alpha: f64,
    /// Weight of the total displacement in the cost.
    pub beta: f64,
    /// Initial cells in file order.
    pub cells: Vec<CellRecord>,
    /// Placement rows in file order.
    pub rows: Vec<PlacementRow>,
}

/// One ECO plan entry: cells merged away and the cell replacing them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EcoPlanEntry {
    /// Names of the cells to remove. May be empty.
    pub remove: Vec<String>,
    /// The new cell, at its intended position. Never fixed.
    pub new_cell: CellRecord,
}

/// One move of a pre-existing cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellMove {
    /// Name of the moved cell.
    pub name: String,
    /// Its new lower-left corner.
    pub to: Coord,
}

/// What a round actually did, as recorded in the moves log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedRound {
    /// Where the round's new cell was placed.
    pub placement: Coord,
    /// Moves of pre-existing cells, in log order.
    pub moves: Vec<CellMove>,
}
