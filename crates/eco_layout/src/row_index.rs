//! Per-row ordered occupancy index.
//!
//! Every placement row owns a bucket of the cells whose vertical extent
//! reaches it, ordered by `(x, y)` of the cell's current position. A cell
//! spanning several rows sits in several buckets. Buckets store [`CellId`]s
//! only; the [`CellRegistry`](crate::CellRegistry) keeps ownership.
//!
//! The cell ID is the last component of the ordering key. Two distinct cells
//! at the same coordinate therefore occupy adjacent slots instead of one
//! replacing the other, and the overlap check sees them as neighbors.

use crate::cell::Cell;
use crate::die::RowGrid;
use crate::ids::{CellId, RowId};
use ordered_float::OrderedFloat;
use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

/// Ordering key of a cell inside a row bucket.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct SlotKey {
    x: OrderedFloat<f64>,
    y: OrderedFloat<f64>,
    /// The indexed cell.
    pub cell: CellId,
}

impl SlotKey {
    /// Builds the key for `cell` at its current position.
    pub fn of(id: CellId, cell: &Cell) -> Self {
        Self {
            x: OrderedFloat(cell.current.x),
            y: OrderedFloat(cell.current.y),
            cell: id,
        }
    }

    /// Returns `true` if both keys sit at the same coordinate.
    pub fn same_position(&self, other: &SlotKey) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// Immediate neighbors of a cell within one row bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbors {
    /// Closest key ordered before the cell.
    pub prev: Option<SlotKey>,
    /// Closest key ordered after the cell.
    pub next: Option<SlotKey>,
}

/// Row-bucketed index over the current cell positions.
#[derive(Clone, Debug)]
pub struct RowIndex {
    grid: RowGrid,
    buckets: Vec<BTreeSet<SlotKey>>,
}

impl RowIndex {
    /// Creates an empty index over the given rows.
    pub fn new(grid: RowGrid) -> Self {
        let buckets = vec![BTreeSet::new(); grid.len()];
        Self { grid, buckets }
    }

    /// The row grid the buckets correspond to.
    pub fn grid(&self) -> &RowGrid {
        &self.grid
    }

    /// Adds the cell to every bucket its current extent reaches.
    ///
    /// Returns the number of buckets it now occupies.
    pub fn insert(&mut self, id: CellId, cell: &Cell) -> usize {
        let key = SlotKey::of(id, cell);
        let span = self.grid.span(&cell.rect());
        let count = span.len();
        for row in span {
            self.buckets[row].insert(key);
        }
        log::trace!("index: inserted cell {id} into {count} row(s)");
        count
    }

    /// Removes the cell from the buckets computed from its *current* position.
    ///
    /// Must be called before the cell's coordinate changes. Returns how many
    /// buckets actually held it.
    pub fn remove(&mut self, id: CellId, cell: &Cell) -> usize {
        let key = SlotKey::of(id, cell);
        let removed = self
            .grid
            .span(&cell.rect())
            .filter(|&row| self.buckets[row].remove(&key))
            .count();
        log::trace!("index: removed cell {id} from {removed} row(s)");
        removed
    }

    /// Predecessor and successor of `key` in the bucket of `row`, or `None`
    /// if the row does not exist or its bucket does not hold `key`.
    pub fn neighbors(&self, row: RowId, key: &SlotKey) -> Option<Neighbors> {
        let bucket = self.buckets.get(row.index())?;
        if !bucket.contains(key) {
            return None;
        }
        Some(Neighbors {
            prev: bucket.range(..*key).next_back().copied(),
            next: bucket.range((Excluded(*key), Unbounded)).next().copied(),
        })
    }

    /// Cells in the bucket of `row`, in key order.
    pub fn bucket(&self, row: RowId) -> impl Iterator<Item = CellId> + '_ {
        self.buckets[row.index()].iter().map(|k| k.cell)
    }

    /// Total number of `(row, cell)` entries.
    pub fn entry_count(&self) -> usize {
        self.buckets.iter().map(BTreeSet::len).sum()
    }
}
