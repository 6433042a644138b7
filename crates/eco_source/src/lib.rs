//! Input-file database and source locations for diagnostics.
//!
//! The evaluator reads three text files (layout, ECO plan, moves log). Each is
//! loaded into the [`SourceDb`] once; parsers tag records with byte [`Span`]s,
//! and diagnostics resolve those spans to `path:line:col` when rendered.

#![warn(missing_docs)]

pub mod source_db;
pub mod span;

pub use source_db::{SourceDb, SourceFile};
pub use span::{FileId, ResolvedSpan, Span};
