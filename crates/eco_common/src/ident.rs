//! Interned cell names.
//!
//! Every cell name that appears in the layout, the ECO plan, or the moves log
//! is interned once. The registry, the move ledger, and diagnostics all key on
//! the resulting [`Ident`], so name comparisons and copies are O(1).

use lasso::Rodeo;

/// An interned cell name.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Ident(u32);

impl Ident {
    /// Creates an `Ident` from a raw index. Intended for tests.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this identifier.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

// SAFETY: `Ident` wraps a `u32`, which always fits in a `usize` on the
// platforms we build for; `try_from_usize` rejects anything wider.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// String interner for cell names, backed by [`lasso::Rodeo`].
///
/// Evaluation is single-threaded, so the non-synchronised rodeo is used.
#[derive(Debug)]
pub struct Interner {
    rodeo: Rodeo<Ident>,
}

impl Interner {
    /// Creates a new empty interner.
    pub fn new() -> Self {
        Self {
            rodeo: Rodeo::new(),
        }
    }

    /// Interns a name, returning the existing [`Ident`] if it was seen before.
    pub fn intern(&mut self, name: &str) -> Ident {
        self.rodeo.get_or_intern(name)
    }

    /// Looks up a name without interning it.
    pub fn get(&self, name: &str) -> Option<Ident> {
        self.rodeo.get(name)
    }

    /// Resolves an [`Ident`] back to its name.
    ///
    /// # Panics
    ///
    /// Panics if the `Ident` was not created by this interner.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.rodeo.resolve(&ident)
    }

    /// Returns the number of distinct names interned so far.
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    /// Returns `true` if nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_resolve_roundtrip() {
        let mut interner = Interner::new();
        let id = interner.intern("FF_1");
        assert_eq!(interner.resolve(id), "FF_1");
    }

    #[test]
    fn same_name_same_ident() {
        let mut interner = Interner::new();
        let a = interner.intern("C12");
        let b = interner.intern("C12");
        assert_eq!(a, b);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn get_does_not_intern() {
        let mut interner = Interner::new();
        assert!(interner.get("FF_9").is_none());
        assert!(interner.is_empty());
        let id = interner.intern("FF_9");
        assert_eq!(interner.get("FF_9"), Some(id));
    }
}
