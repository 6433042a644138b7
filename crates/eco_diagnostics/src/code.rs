//! Diagnostic codes with category prefixes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The family a diagnostic belongs to; determines the code prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Malformed input text, prefixed with `P`.
    Parse,
    /// Inconsistent cell references or row sets, prefixed with `S`.
    Structural,
    /// A round that leaves the layout illegal, prefixed with `L`.
    Legality,
    /// Plan and moves log disagree on the number of rounds, prefixed with `C`.
    Consistency,
    /// Non-fatal input oddities, prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Parse => 'P',
            Category::Structural => 'S',
            Category::Legality => 'L',
            Category::Consistency => 'C',
            Category::Warning => 'W',
        }
    }
}

/// A category prefix plus a number, displayed as e.g. `L104`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// Category of this code.
    pub category: Category,
    /// Number within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        assert_eq!(
            DiagnosticCode::new(Category::Legality, 104).to_string(),
            "L104"
        );
        assert_eq!(DiagnosticCode::new(Category::Parse, 7).to_string(), "P007");
        assert_eq!(
            DiagnosticCode::new(Category::Consistency, 301).to_string(),
            "C301"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let code = DiagnosticCode::new(Category::Structural, 201);
        let json = serde_json::to_string(&code).unwrap();
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, back);
    }
}
