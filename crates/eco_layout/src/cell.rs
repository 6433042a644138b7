//! Cells and the registry that owns them.
//!
//! The [`CellRegistry`] is the single owner of every [`Cell`]. Cells live in
//! a slot arena indexed by [`CellId`]; removal leaves a tombstone so IDs held
//! elsewhere (the row index, round bookkeeping) never alias a different cell.

use crate::error::EvalError;
use crate::geometry::{Coord, Rect};
use crate::ids::CellId;
use eco_common::{Ident, Interner};
use std::collections::HashMap;

/// A placed standard cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Interned cell name.
    pub name: Ident,
    original: Coord,
    /// Where the cell is now.
    pub current: Coord,
    width: f64,
    height: f64,
    fixed: bool,
}

impl Cell {
    /// Creates a cell whose current position equals its original position.
    pub fn new(name: Ident, origin: Coord, width: f64, height: f64, fixed: bool) -> Self {
        Self {
            name,
            original: origin,
            current: origin,
            width,
            height,
            fixed,
        }
    }

    /// Position when the cell entered the layout.
    pub fn original(&self) -> Coord {
        self.original
    }

    /// Cell width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Cell height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Whether the cell may never be moved.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Extent at the current position.
    pub fn rect(&self) -> Rect {
        Rect::new(self.current, self.width, self.height)
    }
}

/// Name-keyed owner of all live cells.
#[derive(Debug, Default)]
pub struct CellRegistry {
    slots: Vec<Option<Cell>>,
    by_name: HashMap<Ident, CellId>,
    names: Interner,
}

impl CellRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `name` and builds a cell for it without registering it.
    pub fn make_cell(
        &mut self,
        name: &str,
        origin: Coord,
        width: f64,
        height: f64,
        fixed: bool,
    ) -> Cell {
        let ident = self.names.intern(name);
        Cell::new(ident, origin, width, height, fixed)
    }

    /// Registers a cell, failing if a live cell already has its name.
    pub fn insert(&mut self, cell: Cell) -> Result<CellId, EvalError> {
        if self.by_name.contains_key(&cell.name) {
            return Err(EvalError::DuplicateCell {
                name: self.names.resolve(cell.name).to_string(),
            });
        }
        let id = CellId::from_raw(self.slots.len() as u32);
        self.by_name.insert(cell.name, id);
        self.slots.push(Some(cell));
        Ok(id)
    }

    /// Unregisters a cell and hands it back. Returns `None` if already gone.
    pub fn remove(&mut self, id: CellId) -> Option<Cell> {
        let cell = self.slots.get_mut(id.index())?.take()?;
        self.by_name.remove(&cell.name);
        Some(cell)
    }

    /// Finds a live cell by name.
    pub fn find(&self, name: &str) -> Option<CellId> {
        self.names
            .get(name)
            .and_then(|ident| self.by_name.get(&ident).copied())
    }

    /// Returns the live cell with the given ID.
    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Returns the live cell with the given ID, mutably.
    pub fn get_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Resolves an interned name.
    pub fn resolve(&self, name: Ident) -> &str {
        self.names.resolve(name)
    }

    /// Name of a cell ID, or `"<removed>"` for a tombstone.
    pub fn name_of(&self, id: CellId) -> &str {
        self.get(id).map_or("<removed>", |c| self.names.resolve(c.name))
    }

    /// Number of live cells.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` if no cell is live.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Iterates over live cells in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|c| (CellId::from_raw(i as u32), c)))
    }
}
