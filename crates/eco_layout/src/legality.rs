//! The four legality rules and the full-layout audit.
//!
//! A round is checked only over the cells it touched. The overlap rule then
//! needs just the immediate row neighbors of each touched cell: the layout
//! was legal before the round, so untouched cells are pairwise disjoint and
//! ordered by x inside every row bucket.

use crate::cell::{Cell, CellRegistry};
use crate::die::{DieBoundary, RowGrid};
use crate::error::EvalError;
use crate::geometry::{Coord, Rect};
use crate::ids::{CellId, RowId};
use crate::row_index::{RowIndex, SlotKey};
use eco_common::{EcoResult, InternalError};
use eco_diagnostics::{Category, DiagnosticCode};
use std::fmt;

/// Why a cell is off the placement site grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiteMisalignment {
    /// The x coordinate is not a whole site.
    FractionalX,
    /// The y coordinate is not the start of any placement row.
    NoRowAtY,
}

impl fmt::Display for SiteMisalignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteMisalignment::FractionalX => write!(f, "x is not aligned to the site grid"),
            SiteMisalignment::NoRowAtY => write!(f, "y does not start a placement row"),
        }
    }
}

/// A broken legality rule, with enough geometry to find the offending move.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Violation {
    /// A `FIX` cell appears in the round's move list.
    #[error("fixed cell {cell} was moved from {from} to {to}")]
    FixedCellMoved {
        /// Cell name.
        cell: String,
        /// Position before the move.
        from: Coord,
        /// Position after the move.
        to: Coord,
    },

    /// Part of a cell lies outside the die.
    #[error("cell {cell} lies outside the die boundary {die}")]
    OutOfDie {
        /// Cell name.
        cell: String,
        /// The cell's extent.
        extent: Rect,
        /// The die it must fit in.
        die: DieBoundary,
    },

    /// A cell is not on a placement site.
    #[error("cell {cell} at {at} is not on a placement site: {reason}")]
    OffSite {
        /// Cell name.
        cell: String,
        /// The offending lower-left corner.
        at: Coord,
        /// Which coordinate is misaligned.
        reason: SiteMisalignment,
    },

    /// Two cells share area.
    #[error("cells {cell} and {other} overlap")]
    Overlap {
        /// The touched cell.
        cell: String,
        /// Its extent.
        extent: Rect,
        /// The cell it collides with.
        other: String,
        /// The other cell's extent.
        other_extent: Rect,
    },
}

impl Violation {
    /// Stable diagnostic code (`L1xx`).
    pub fn code(&self) -> DiagnosticCode {
        let number = match self {
            Violation::FixedCellMoved { .. } => 101,
            Violation::OutOfDie { .. } => 102,
            Violation::OffSite { .. } => 103,
            Violation::Overlap { .. } => 104,
        };
        DiagnosticCode::new(Category::Legality, number)
    }

    /// Extra lines for a diagnostic, mostly cell extents.
    pub fn notes(&self) -> Vec<String> {
        match self {
            Violation::FixedCellMoved { .. } => {
                vec!["the layout marks this cell FIX".to_string()]
            }
            Violation::OutOfDie { cell, extent, die } => vec![
                format!("cell {cell} {extent}"),
                format!("die x:{}~{} y:{}~{}", die.left_x, die.right_x, die.low_y, die.high_y),
            ],
            Violation::OffSite { .. } => Vec::new(),
            Violation::Overlap {
                cell,
                extent,
                other,
                other_extent,
            } => vec![
                format!("cell {cell} {extent}"),
                format!("cell {other} {other_extent}"),
            ],
        }
    }
}

/// The cells a round changed: moved pre-existing cells and the inserted one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TouchedCells {
    /// Pre-existing cells repositioned this round, without repeats.
    pub moved: Vec<CellId>,
    /// The round's new cell.
    pub inserted: Option<CellId>,
}

impl TouchedCells {
    /// Every touched cell, moved ones first.
    pub fn all(&self) -> impl Iterator<Item = CellId> + '_ {
        self.moved.iter().copied().chain(self.inserted)
    }

    /// Number of touched cells.
    pub fn len(&self) -> usize {
        self.moved.len() + usize::from(self.inserted.is_some())
    }

    /// Returns `true` if the round touched nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Checks one round's touched cells against the current layout.
pub struct LegalityChecker<'a> {
    round: usize,
    die: &'a DieBoundary,
    cells: &'a CellRegistry,
    index: &'a RowIndex,
}

impl<'a> LegalityChecker<'a> {
    /// Creates a checker reporting failures against 1-based `round`.
    pub fn new(
        round: usize,
        die: &'a DieBoundary,
        cells: &'a CellRegistry,
        index: &'a RowIndex,
    ) -> Self {
        Self {
            round,
            die,
            cells,
            index,
        }
    }

    /// Runs fixed, boundary, on-site and overlap in that order, stopping at the
    /// first failure.
    pub fn check_round(&self, touched: &TouchedCells) -> Result<(), EvalError> {
        self.check_fixed(touched)?;
        self.check_boundary(touched)?;
        self.check_on_site(touched)?;
        self.check_overlap(touched)
    }

    /// Fails if any moved cell is fixed. The inserted cell is never fixed and
    /// is not consulted.
    pub fn check_fixed(&self, touched: &TouchedCells) -> Result<(), EvalError> {
        for &id in &touched.moved {
            let cell = self.live(id)?;
            if cell.is_fixed() {
                return Err(self.illegal(Violation::FixedCellMoved {
                    cell: self.cells.resolve(cell.name).to_string(),
                    // A fixed cell has never legally moved, so its original
                    // position is where this round found it.
                    from: cell.original(),
                    to: cell.current,
                }));
            }
        }
        Ok(())
    }

    /// Fails if any touched cell reaches outside the die.
    pub fn check_boundary(&self, touched: &TouchedCells) -> Result<(), EvalError> {
        for id in touched.all() {
            let cell = self.live(id)?;
            if let Some(v) = boundary_violation(self.die, self.cells, cell) {
                return Err(self.illegal(v));
            }
        }
        Ok(())
    }

    /// Fails if any touched cell has a fractional x or a y that starts no row.
    pub fn check_on_site(&self, touched: &TouchedCells) -> Result<(), EvalError> {
        for id in touched.all() {
            let cell = self.live(id)?;
            if let Some(v) = site_violation(self.index.grid(), self.cells, cell) {
                return Err(self.illegal(v));
            }
        }
        Ok(())
    }

    /// Fails if any touched cell overlaps its predecessor or successor in a
    /// row it spans. Neighbors at the identical position count as overlapping.
    pub fn check_overlap(&self, touched: &TouchedCells) -> Result<(), EvalError> {
        for id in touched.all() {
            let cell = self.live(id)?;
            let key = SlotKey::of(id, cell);
            let extent = cell.rect();

            for row in self.index.grid().span(&extent) {
                let row = RowId::from_raw(row as u32);
                let neighbors = self.index.neighbors(row, &key).ok_or_else(|| {
                    InternalError::new(format!(
                        "cell {} is missing from row {row}",
                        self.cells.name_of(id)
                    ))
                })?;

                for other_key in [neighbors.prev, neighbors.next].into_iter().flatten() {
                    let other = self.live(other_key.cell)?;
                    let other_extent = other.rect();
                    if key.same_position(&other_key) || extent.overlaps(&other_extent) {
                        return Err(self.illegal(Violation::Overlap {
                            cell: self.cells.resolve(cell.name).to_string(),
                            extent,
                            other: self.cells.resolve(other.name).to_string(),
                            other_extent,
                        }));
                    }
                }
            }
        }
        Ok(())
    }

    fn live(&self, id: CellId) -> EcoResult<&'a Cell> {
        self.cells
            .get(id)
            .ok_or_else(|| InternalError::new(format!("cell {id} is indexed but not registered")))
    }

    fn illegal(&self, violation: Violation) -> EvalError {
        EvalError::Illegal {
            round: self.round,
            violation,
        }
    }
}

fn boundary_violation(die: &DieBoundary, cells: &CellRegistry, cell: &Cell) -> Option<Violation> {
    let extent = cell.rect();
    (!die.contains(&extent)).then(|| Violation::OutOfDie {
        cell: cells.resolve(cell.name).to_string(),
        extent,
        die: *die,
    })
}

fn site_violation(grid: &RowGrid, cells: &CellRegistry, cell: &Cell) -> Option<Violation> {
    let at = cell.current;
    let reason = if at.x.fract() != 0.0 {
        SiteMisalignment::FractionalX
    } else if grid.row_starting_at(at.y).is_none() {
        SiteMisalignment::NoRowAtY
    } else {
        return None;
    };
    Some(Violation::OffSite {
        cell: cells.resolve(cell.name).to_string(),
        at,
        reason,
    })
}

/// Checks every live cell against the boundary and site rules and every pair
/// against the overlap rule, without the row index.
///
/// Quadratic in the number of cells. Returns all violations found, with each
/// overlapping pair reported once.
pub fn audit_layout(die: &DieBoundary, grid: &RowGrid, cells: &CellRegistry) -> Vec<Violation> {
    let live: Vec<&Cell> = cells.iter().map(|(_, cell)| cell).collect();
    let mut found = Vec::new();

    for cell in &live {
        found.extend(boundary_violation(die, cells, cell));
        found.extend(site_violation(grid, cells, cell));
    }

    for (i, a) in live.iter().enumerate() {
        for b in &live[i + 1..] {
            let (ra, rb) = (a.rect(), b.rect());
            if ra.origin() == rb.origin() || ra.overlaps(&rb) {
                found.push(Violation::Overlap {
                    cell: cells.resolve(a.name).to_string(),
                    extent: ra,
                    other: cells.resolve(b.name).to_string(),
                    other_extent: rb,
                });
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::die::PlacementRow;

    struct Fixture {
        die: DieBoundary,
        cells: CellRegistry,
        index: RowIndex,
    }

    impl Fixture {
        fn new(rows: usize) -> Self {
            let grid = RowGrid::new(
                (0..rows)
                    .map(|i| PlacementRow {
                        origin: Coord::new(0.0, i as f64 * 10.0),
                        site_width: 1.0,
                        site_height: 10.0,
                        site_count: 100,
                    })
                    .collect(),
            )
            .unwrap();
            Self {
                die: DieBoundary::new(0.0, 0.0, 100.0, rows as f64 * 10.0),
                cells: CellRegistry::new(),
                index: RowIndex::new(grid),
            }
        }

        fn add(&mut self, name: &str, x: f64, y: f64, w: f64, h: f64, fixed: bool) -> CellId {
            let cell = self.cells.make_cell(name, Coord::new(x, y), w, h, fixed);
            let id = self.cells.insert(cell).unwrap();
            self.index.insert(id, self.cells.get(id).unwrap());
            id
        }

        fn relocate(&mut self, id: CellId, x: f64, y: f64) {
            self.index.remove(id, self.cells.get(id).unwrap());
            self.cells.get_mut(id).unwrap().current = Coord::new(x, y);
            self.index.insert(id, self.cells.get(id).unwrap());
        }

        fn checker(&self) -> LegalityChecker<'_> {
            LegalityChecker::new(1, &self.die, &self.cells, &self.index)
        }
    }

    fn moved(ids: &[CellId]) -> TouchedCells {
        TouchedCells {
            moved: ids.to_vec(),
            inserted: None,
        }
    }

    fn violation(result: Result<(), EvalError>) -> Violation {
        match result {
            Err(EvalError::Illegal { violation, .. }) => violation,
            other => panic!("expected a violation, got {other:?}"),
        }
    }

    #[test]
    fn fixed_cell_move_is_reported_with_positions() {
        let mut fx = Fixture::new(1);
        let f = fx.add("F", 0.0, 0.0, 10.0, 10.0, true);
        fx.relocate(f, 40.0, 0.0);
        let v = violation(fx.checker().check_fixed(&moved(&[f])));
        assert_eq!(
            v.to_string(),
            "fixed cell F was moved from (0, 0) to (40, 0)"
        );
    }

    #[test]
    fn inserted_cell_skips_fixed_check() {
        let mut fx = Fixture::new(1);
        let n = fx.add("N", 20.0, 0.0, 10.0, 10.0, false);
        let touched = TouchedCells {
            moved: Vec::new(),
            inserted: Some(n),
        };
        assert!(fx.checker().check_fixed(&touched).is_ok());
        assert!(fx.checker().check_round(&touched).is_ok());
    }

    #[test]
    fn empty_round_passes_every_rule() {
        let fx = Fixture::new(1);
        let touched = TouchedCells::default();
        assert!(touched.is_empty());
        assert!(fx.checker().check_round(&touched).is_ok());
    }

    #[test]
    fn boundary_is_closed() {
        let mut fx = Fixture::new(1);
        let edge = fx.add("E", 90.0, 0.0, 10.0, 10.0, false);
        assert!(fx.checker().check_boundary(&moved(&[edge])).is_ok());
        fx.relocate(edge, 91.0, 0.0);
        let v = violation(fx.checker().check_boundary(&moved(&[edge])));
        assert!(matches!(v, Violation::OutOfDie { ref cell, .. } if cell == "E"));
        assert_eq!(v.notes()[0], "cell E x:91~101 y:0~10");
    }

    #[test]
    fn site_rules() {
        let mut fx = Fixture::new(2);
        let c = fx.add("C", 3.0, 10.0, 5.0, 10.0, false);
        assert!(fx.checker().check_on_site(&moved(&[c])).is_ok());

        fx.relocate(c, 3.0, 15.0);
        let v = violation(fx.checker().check_on_site(&moved(&[c])));
        assert!(matches!(v, Violation::OffSite { reason: SiteMisalignment::NoRowAtY, .. }));

        fx.relocate(c, 3.5, 10.0);
        let v = violation(fx.checker().check_on_site(&moved(&[c])));
        assert!(matches!(v, Violation::OffSite { reason: SiteMisalignment::FractionalX, .. }));
    }

    #[test]
    fn overlap_with_predecessor() {
        let mut fx = Fixture::new(1);
        fx.add("F", 0.0, 0.0, 10.0, 10.0, true);
        let n = fx.add("N", 5.0, 0.0, 10.0, 10.0, false);
        let v = violation(fx.checker().check_overlap(&moved(&[n])));
        assert_eq!(v.to_string(), "cells N and F overlap");
    }

    #[test]
    fn overlap_with_successor() {
        let mut fx = Fixture::new(1);
        let a = fx.add("A", 0.0, 0.0, 10.0, 10.0, false);
        fx.add("B", 8.0, 0.0, 4.0, 10.0, false);
        let v = violation(fx.checker().check_overlap(&moved(&[a])));
        assert!(matches!(v, Violation::Overlap { ref other, .. } if other == "B"));
    }

    #[test]
    fn abutting_cells_are_legal() {
        let mut fx = Fixture::new(1);
        fx.add("A", 0.0, 0.0, 10.0, 10.0, false);
        let b = fx.add("B", 10.0, 0.0, 10.0, 10.0, false);
        assert!(fx.checker().check_overlap(&moved(&[b])).is_ok());
    }

    #[test]
    fn coincident_zero_width_cells_collide() {
        let mut fx = Fixture::new(1);
        fx.add("A", 4.0, 0.0, 0.0, 10.0, false);
        let b = fx.add("B", 4.0, 0.0, 0.0, 10.0, false);
        assert!(matches!(
            violation(fx.checker().check_overlap(&moved(&[b]))),
            Violation::Overlap { .. }
        ));
    }

    #[test]
    fn tall_cell_collides_in_upper_row() {
        let mut fx = Fixture::new(2);
        fx.add("LOW", 0.0, 0.0, 10.0, 10.0, false);
        fx.add("HIGH", 20.0, 10.0, 10.0, 10.0, false);
        let tall = fx.add("TALL", 25.0, 0.0, 4.0, 20.0, false);
        let v = violation(fx.checker().check_overlap(&moved(&[tall])));
        assert!(matches!(v, Violation::Overlap { ref other, .. } if other == "HIGH"));
    }

    #[test]
    fn unindexed_cell_is_internal_error() {
        let mut fx = Fixture::new(1);
        let cell = fx.cells.make_cell("GHOST", Coord::new(0.0, 0.0), 1.0, 10.0, false);
        let ghost = fx.cells.insert(cell).unwrap();
        let err = fx.checker().check_overlap(&moved(&[ghost])).unwrap_err();
        assert!(matches!(err, EvalError::Internal(_)));
    }

    #[test]
    fn checks_run_in_rule_order() {
        let mut fx = Fixture::new(1);
        fx.add("A", 0.0, 0.0, 10.0, 10.0, false);
        let f = fx.add("F", 50.0, 0.0, 10.0, 10.0, true);
        fx.relocate(f, 0.5, 0.0);
        let v = violation(fx.checker().check_round(&moved(&[f])));
        assert!(matches!(v, Violation::FixedCellMoved { .. }));
    }

    #[test]
    fn audit_reports_each_pair_once() {
        let mut fx = Fixture::new(1);
        fx.add("A", 0.0, 0.0, 10.0, 10.0, false);
        fx.add("B", 5.0, 0.0, 10.0, 10.0, false);
        fx.add("C", 30.0, 0.0, 10.0, 10.0, false);
        let found = audit_layout(&fx.die, fx.index.grid(), &fx.cells);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].to_string(), "cells A and B overlap");
    }

    #[test]
    fn audit_of_legal_layout_is_empty() {
        let mut fx = Fixture::new(2);
        fx.add("A", 0.0, 0.0, 10.0, 10.0, false);
        fx.add("B", 10.0, 0.0, 10.0, 20.0, false);
        fx.add("C", 0.0, 10.0, 10.0, 10.0, false);
        assert!(audit_layout(&fx.die, fx.index.grid(), &fx.cells).is_empty());
    }
}
