//! The live layout: die, cell registry and row index kept in step.

use crate::cell::{Cell, CellRegistry};
use crate::die::{DieBoundary, RowGrid};
use crate::error::EvalError;
use crate::input::LayoutRecord;
use crate::legality::{audit_layout, LegalityChecker, Violation};
use crate::row_index::RowIndex;
use crate::utilization::{BinCount, UtilizationMap};

/// A die with its registered cells and their row occupancy.
#[derive(Debug)]
pub struct Layout {
    pub(crate) die: DieBoundary,
    pub(crate) cells: CellRegistry,
    pub(crate) index: RowIndex,
}

impl Layout {
    /// Builds the layout from a parsed record.
    ///
    /// Rows are validated and sorted by y, every cell is registered at its
    /// file position and indexed into the rows it spans. The starting layout
    /// is trusted to be legal; use [`Layout::audit`] to verify it.
    pub fn from_record(record: &LayoutRecord) -> Result<Self, EvalError> {
        let grid = RowGrid::new(record.rows.clone())?;
        let mut cells = CellRegistry::new();
        let mut index = RowIndex::new(grid);

        for rec in &record.cells {
            let cell = cells.make_cell(&rec.name, rec.origin, rec.width, rec.height, rec.fixed);
            let id = cells.insert(cell.clone())?;
            index.insert(id, &cell);
        }

        log::info!(
            "loaded layout: {} cell(s), {} row(s), die {}",
            cells.len(),
            index.grid().len(),
            record.die
        );
        Ok(Self {
            die: record.die,
            cells,
            index,
        })
    }

    /// The die boundary.
    pub fn die(&self) -> &DieBoundary {
        &self.die
    }

    /// The sorted placement rows.
    pub fn grid(&self) -> &RowGrid {
        self.index.grid()
    }

    /// All live cells.
    pub fn cells(&self) -> &CellRegistry {
        &self.cells
    }

    /// The per-row occupancy index.
    pub fn index(&self) -> &RowIndex {
        &self.index
    }

    /// Looks up a live cell by name.
    pub fn cell(&self, name: &str) -> Option<&Cell> {
        self.cells.find(name).and_then(|id| self.cells.get(id))
    }

    /// A checker over the current state, attributing failures to `round`.
    pub fn checker(&self, round: usize) -> LegalityChecker<'_> {
        LegalityChecker::new(round, &self.die, &self.cells, &self.index)
    }

    /// Bin utilization of the current cells, labelled with `round`.
    pub fn utilization(&self, bins: BinCount, round: usize) -> UtilizationMap {
        UtilizationMap::measure(self, bins, round)
    }

    /// Brute-force check of every live cell, independent of the row index.
    pub fn audit(&self) -> Vec<Violation> {
        audit_layout(&self.die, self.index.grid(), &self.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::die::PlacementRow;
    use crate::geometry::Coord;
    use crate::input::CellRecord;
    use crate::ids::RowId;

    fn record(cells: Vec<CellRecord>, rows: Vec<PlacementRow>) -> LayoutRecord {
        LayoutRecord {
            die: DieBoundary::new(0.0, 0.0, 100.0, 30.0),
            alpha: 1.0,
            beta: 1.0,
            cells,
            rows,
        }
    }

    fn cell(name: &str, x: f64, y: f64, h: f64) -> CellRecord {
        CellRecord {
            name: name.to_string(),
            origin: Coord::new(x, y),
            width: 5.0,
            height: h,
            fixed: false,
        }
    }

    fn row(y: f64) -> PlacementRow {
        PlacementRow {
            origin: Coord::new(0.0, y),
            site_width: 1.0,
            site_height: 10.0,
            site_count: 100,
        }
    }

    #[test]
    fn rows_are_sorted_and_cells_indexed() {
        let layout = Layout::from_record(&record(
            vec![cell("A", 0.0, 20.0, 10.0), cell("B", 10.0, 0.0, 20.0)],
            vec![row(20.0), row(0.0), row(10.0)],
        ))
        .unwrap();
        let ys: Vec<f64> = layout.grid().rows().iter().map(|r| r.origin.y).collect();
        assert_eq!(ys, vec![0.0, 10.0, 20.0]);
        assert_eq!(layout.index().entry_count(), 3);
        assert_eq!(layout.index().bucket(RowId::from_raw(2)).count(), 1);
        assert_eq!(layout.cell("B").map(|c| c.current), Some(Coord::new(10.0, 0.0)));
        assert!(layout.audit().is_empty());
    }

    #[test]
    fn duplicate_cell_names_are_rejected() {
        let err = Layout::from_record(&record(
            vec![cell("A", 0.0, 0.0, 10.0), cell("A", 10.0, 0.0, 10.0)],
            vec![row(0.0)],
        ))
        .unwrap_err();
        assert!(matches!(err, EvalError::DuplicateCell { ref name } if name == "A"));
    }

    #[test]
    fn empty_row_set_is_rejected() {
        let err = Layout::from_record(&record(Vec::new(), Vec::new())).unwrap_err();
        assert!(matches!(err, EvalError::InvalidRows(_)));
    }
}
