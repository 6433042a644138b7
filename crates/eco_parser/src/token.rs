//! Splitting input lines into whitespace-separated fields with spans.

use eco_source::{FileId, SourceFile, Span};

/// One whitespace-delimited field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field<'a> {
    /// The field text.
    pub text: &'a str,
    /// Location of the field in its file.
    pub span: Span,
}

/// A non-blank input line split into fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line<'a> {
    /// The fields, in order. Never empty.
    pub fields: Vec<Field<'a>>,
    /// From the start of the first field to the end of the last.
    pub span: Span,
}

impl<'a> Line<'a> {
    /// The first field.
    pub fn head(&self) -> &Field<'a> {
        &self.fields[0]
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false`; blank lines are never produced.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Splits every non-blank line of `file` into fields.
pub fn lines(file: &SourceFile) -> impl Iterator<Item = Line<'_>> {
    let id = file.id;
    file.lines()
        .filter_map(move |(start, text)| split_line(id, start, text))
}

fn split_line(file: FileId, line_start: u32, text: &str) -> Option<Line<'_>> {
    let base = text.as_ptr() as usize;
    let fields: Vec<Field<'_>> = text
        .split_ascii_whitespace()
        .map(|word| {
            let start = line_start + (word.as_ptr() as usize - base) as u32;
            Field {
                text: word,
                span: Span::new(file, start, start + word.len() as u32),
            }
        })
        .collect();
    let first = fields.first()?.span;
    let last = fields.last()?.span;
    Some(Line {
        span: first.to(last),
        fields,
    })
}
