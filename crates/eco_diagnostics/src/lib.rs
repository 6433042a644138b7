//! Diagnostics for malformed inputs and failed legality checks.
//!
//! A [`Diagnostic`] carries a severity, a stable [`DiagnosticCode`], a message,
//! an optional input-file span, and free-form notes. Parsers and the evaluator
//! push them into a [`DiagnosticSink`]; the CLI renders them with
//! [`TerminalRenderer`] or serializes them as JSON.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
