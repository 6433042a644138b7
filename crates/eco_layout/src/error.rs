//! Evaluation errors and their diagnostic form.
//!
//! Every error is fatal: evaluation stops at the first one and no score is
//! produced. Round numbers in messages are 1-based.

use crate::legality::Violation;
use eco_common::InternalError;
use eco_diagnostics::{Category, Diagnostic, DiagnosticCode};
use eco_source::Span;
use std::fmt;

/// What a missing cell name was referenced for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellRole {
    /// Named in an ECO entry's remove set.
    Removal,
    /// Named in the moves log.
    Move,
}

impl fmt::Display for CellRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellRole::Removal => write!(f, "listed for removal"),
            CellRole::Move => write!(f, "listed as moved"),
        }
    }
}

/// A fatal evaluation failure.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// A referenced cell is not in the registry.
    #[error("round {round}: cell {name} is {role} but does not exist")]
    UnknownCell {
        /// 1-based round number.
        round: usize,
        /// The missing name.
        name: String,
        /// Where the name was referenced.
        role: CellRole,
    },

    /// Two live cells would share a name.
    #[error("cell {name} is defined more than once")]
    DuplicateCell {
        /// The clashing name.
        name: String,
    },

    /// The placement rows cannot be indexed.
    #[error("invalid placement rows: {0}")]
    InvalidRows(String),

    /// A round left the layout illegal.
    #[error("round {round}: {violation}")]
    Illegal {
        /// 1-based round number.
        round: usize,
        /// The failed rule.
        violation: Violation,
    },

    /// The moves log and the ECO plan describe a different number of rounds.
    #[error("moves log describes {applied} round(s) but the ECO plan has {planned}")]
    RoundCountMismatch {
        /// Entries in the ECO plan.
        planned: usize,
        /// Blocks in the moves log.
        applied: usize,
    },

    /// The registry and the row index disagree; a bug in the evaluator.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl EvalError {
    /// Stable diagnostic code for this error.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            EvalError::Illegal { violation, .. } => violation.code(),
            EvalError::UnknownCell { .. } => DiagnosticCode::new(Category::Structural, 201),
            EvalError::DuplicateCell { .. } => DiagnosticCode::new(Category::Structural, 202),
            EvalError::InvalidRows(_) => DiagnosticCode::new(Category::Structural, 203),
            EvalError::Internal(_) => DiagnosticCode::new(Category::Structural, 204),
            EvalError::RoundCountMismatch { .. } => {
                DiagnosticCode::new(Category::Consistency, 301)
            }
        }
    }

    /// Converts the error into a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code(), self.to_string(), Span::DUMMY);
        match self {
            EvalError::Illegal { violation, .. } => {
                for note in violation.notes() {
                    diag = diag.with_note(note);
                }
            }
            EvalError::RoundCountMismatch { .. } => {
                diag = diag.with_help("every ECO entry needs exactly one block in the moves log");
            }
            EvalError::Internal(_) => {
                diag = diag.with_note("the row index lost track of a registered cell");
            }
            _ => {}
        }
        diag
    }
}
