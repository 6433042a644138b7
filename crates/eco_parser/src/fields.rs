//! Typed field conversion with diagnostics.

use crate::codes;
use crate::token::{Field, Line};
use eco_diagnostics::{Diagnostic, DiagnosticSink};
use std::str::FromStr;

/// Converts fields, reporting failures into the sink.
pub(crate) struct FieldReader<'s> {
    sink: &'s DiagnosticSink,
}

impl<'s> FieldReader<'s> {
    pub(crate) fn new(sink: &'s DiagnosticSink) -> Self {
        Self { sink }
    }

    pub(crate) fn sink(&self) -> &DiagnosticSink {
        self.sink
    }

    /// A finite real number.
    pub(crate) fn number(&self, field: &Field<'_>, what: &str) -> Option<f64> {
        match f64::from_str(field.text) {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                self.sink.emit(Diagnostic::error(
                    codes::BAD_NUMBER,
                    format!("expected a number for {what}, found `{}`", field.text),
                    field.span,
                ));
                None
            }
        }
    }

    /// A non-negative integer.
    pub(crate) fn count(&self, field: &Field<'_>, what: &str) -> Option<u32> {
        match u32::from_str(field.text) {
            Ok(value) => Some(value),
            Err(_) => {
                self.sink.emit(Diagnostic::error(
                    codes::BAD_COUNT,
                    format!("expected a non-negative integer for {what}, found `{}`", field.text),
                    field.span,
                ));
                None
            }
        }
    }

    /// Several numbers at once; `None` if any of them is malformed. Every bad
    /// field is reported, not just the first.
    pub(crate) fn numbers<const N: usize>(
        &self,
        fields: &[Field<'_>],
        what: [&str; N],
    ) -> Option<[f64; N]> {
        let mut out = [0.0; N];
        let mut ok = true;
        for (i, (field, name)) in fields.iter().zip(what).enumerate() {
            match self.number(field, name) {
                Some(value) => out[i] = value,
                None => ok = false,
            }
        }
        ok.then_some(out)
    }

    /// Reports and returns `false` unless `line` has exactly `expected` fields.
    pub(crate) fn expect_len(&self, line: &Line<'_>, expected: usize, shape: &str) -> bool {
        if line.len() == expected {
            return true;
        }
        self.sink.emit(
            Diagnostic::error(
                codes::FIELD_COUNT,
                format!(
                    "`{}` line has {} field(s), expected {expected}",
                    line.head().text,
                    line.len()
                ),
                line.span,
            )
            .with_help(format!("expected `{shape}`")),
        );
        false
    }
}
