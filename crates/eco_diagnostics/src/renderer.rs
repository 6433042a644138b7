//! Human-readable rendering of diagnostics.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use colored::Colorize;
use eco_source::SourceDb;

/// Formats a diagnostic for output.
pub trait DiagnosticRenderer {
    /// Renders one diagnostic to a string.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Renders diagnostics in a compiler-style terminal format:
///
/// ```text
/// error[P401]: expected a number, found `abc`
///   --> case1.lg:4:9
///    |
///  4 | FF_1 10 abc 5 10 NOTFIX
///    |         ^^^
///    = note: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to emit ANSI colors.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let head = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return format!("{head}: {}", diag.message);
        }
        let head = match diag.severity {
            Severity::Error => head.red().bold(),
            Severity::Warning => head.yellow().bold(),
            Severity::Note => head.cyan().bold(),
        };
        format!("{head}: {}", diag.message.bold())
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = self.header(diag);
        out.push('\n');

        if !diag.span.is_dummy() {
            let resolved = source_db.resolve_span(diag.span);
            let file = source_db.get_file(diag.span.file);
            let line_num = resolved.line.to_string();
            let gutter = " ".repeat(line_num.len());
            let carets = "^".repeat(diag.span.len().max(1) as usize);
            let indent = " ".repeat(resolved.col as usize - 1);

            out.push_str(&format!("{gutter}--> {resolved}\n"));
            out.push_str(&format!("{gutter} |\n"));
            out.push_str(&format!(
                "{line_num} | {}\n",
                file.line_text(diag.span.start)
            ));
            out.push_str(&format!("{gutter} | {indent}{carets}\n"));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}
