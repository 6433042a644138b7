//! Opaque ID newtypes for layout entities.
//!
//! [`CellId`] indexes the cell registry's slot arena and [`RowId`] indexes
//! the sorted placement rows. Both are `Copy`, `Ord`, and `Hash`.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            /// Returns the index as a `usize` for slice access.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Stable handle of a cell in the registry. Never reused after removal.
    CellId
);

define_id!(
    /// Position of a placement row after sorting by ascending y.
    RowId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn cell_id_roundtrip() {
        let id = CellId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn ids_order_by_raw_index() {
        let set: BTreeSet<_> = [3, 1, 2].into_iter().map(RowId::from_raw).collect();
        let raw: Vec<_> = set.into_iter().map(RowId::as_raw).collect();
        assert_eq!(raw, vec![1, 2, 3]);
    }

    #[test]
    fn id_display() {
        assert_eq!(format!("{}", CellId::from_raw(7)), "7");
    }
}
