//! Parsers for the three evaluator input files.
//!
//! Each file is line-oriented and whitespace-separated. Parsers never fail
//! outright: malformed lines are reported to the [`DiagnosticSink`] with the
//! span of the offending field and skipped, so one run reports every problem
//! it can find. Callers must check [`DiagnosticSink::has_errors`] before
//! evaluating the returned records.
//!
//! - [`parse_layout`]: the starting layout (`Alpha`, `Beta`, `DieSize`, cells,
//!   `PlacementRows`).
//! - [`parse_plan`]: the ECO plan, one `Banking_Cell:` line per round.
//! - [`parse_moves`]: the moves log, one block per round.

#![warn(missing_docs)]

pub mod codes;
mod fields;
mod layout;
mod moves;
mod plan;
/// Splitting lines into spanned fields.
pub mod token;

pub use layout::parse_layout;
pub use moves::parse_moves;
pub use plan::parse_plan;

#[cfg(test)]
pub(crate) mod test_util {
    use eco_diagnostics::{Diagnostic, DiagnosticSink};
    use eco_source::{FileId, SourceDb};

    pub fn run<T>(
        text: &str,
        parse: impl FnOnce(FileId, &SourceDb, &DiagnosticSink) -> T,
    ) -> (T, Vec<Diagnostic>) {
        let mut db = SourceDb::new();
        let id = db.add_source("input.txt", text.to_string());
        let sink = DiagnosticSink::new();
        let parsed = parse(id, &db, &sink);
        (parsed, sink.take_all())
    }

    pub fn codes(diags: &[Diagnostic]) -> Vec<String> {
        diags.iter().map(|d| d.code.to_string()).collect()
    }
}
