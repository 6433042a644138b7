//! Structured diagnostic messages.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use eco_source::Span;
use serde::{Deserialize, Serialize};

/// A single reportable problem.
///
/// Legality failures carry no span (they concern cell coordinates, not a
/// position in a file) and list the involved cell extents as notes instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Stable code identifying the kind of problem.
    pub code: DiagnosticCode,
    /// Primary message.
    pub message: String,
    /// Location in an input file, or [`Span::DUMMY`].
    pub span: Span,
    /// Additional context lines (`= note: ...`).
    pub notes: Vec<String>,
    /// Suggestions (`= help: ...`).
    pub help: Vec<String>,
}

impl Diagnostic {
    fn with_severity(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            span,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates an error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Error, code, message, span)
    }

    /// Creates a warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Warning, code, message, span)
    }

    /// Appends a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Appends a help line.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn create_error() {
        let code = DiagnosticCode::new(Category::Legality, 104);
        let diag = Diagnostic::error(code, "cells N and F overlap", Span::DUMMY);
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "cells N and F overlap");
        assert_eq!(diag.code.to_string(), "L104");
    }

    #[test]
    fn builder_methods() {
        let code = DiagnosticCode::new(Category::Parse, 401);
        let diag = Diagnostic::warning(code, "line ignored", Span::DUMMY)
            .with_note("expected 6 fields")
            .with_help("remove the line");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.notes, vec!["expected 6 fields"]);
        assert_eq!(diag.help, vec!["remove the line"]);
    }
}
