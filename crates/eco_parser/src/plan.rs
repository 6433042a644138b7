//! The ECO plan file.

use crate::codes;
use crate::fields::FieldReader;
use crate::token::{lines, Line};
use eco_diagnostics::{Diagnostic, DiagnosticSink};
use eco_layout::{CellRecord, Coord, EcoPlanEntry};
use eco_source::{FileId, SourceDb};

const ENTRY_KEYWORD: &str = "Banking_Cell:";
const ARROW: &str = "-->";
const ENTRY_SHAPE: &str = "Banking_Cell: <removed>... --> <name> <x> <y> <width> <height>";

/// Parses an ECO plan file into its entries, in file order.
pub fn parse_plan(
    file_id: FileId,
    source_db: &SourceDb,
    sink: &DiagnosticSink,
) -> Vec<EcoPlanEntry> {
    let reader = FieldReader::new(sink);
    let entries: Vec<EcoPlanEntry> = lines(source_db.get_file(file_id))
        .filter_map(|line| {
            if line.head().text == ENTRY_KEYWORD {
                entry(&reader, &line)
            } else {
                sink.emit(Diagnostic::warning(
                    codes::IGNORED_PLAN_LINE,
                    format!("ignoring line starting with `{}`", line.head().text),
                    line.span,
                ));
                None
            }
        })
        .collect();
    log::debug!("parsed plan: {} entries", entries.len());
    entries
}

fn entry(reader: &FieldReader<'_>, line: &Line<'_>) -> Option<EcoPlanEntry> {
    let Some(arrow) = line.fields.iter().position(|f| f.text == ARROW) else {
        reader.sink().emit(
            Diagnostic::error(
                codes::MISSING_ARROW,
                format!("`{ENTRY_KEYWORD}` entry has no `{ARROW}` before the new cell"),
                line.span,
            )
            .with_help(format!("expected `{ENTRY_SHAPE}`")),
        );
        return None;
    };

    let new_cell = &line.fields[arrow + 1..];
    if new_cell.len() != 5 {
        let span = new_cell
            .first()
            .zip(new_cell.last())
            .map_or(line.fields[arrow].span, |(a, b)| a.span.to(b.span));
        reader.sink().emit(
            Diagnostic::error(
                codes::FIELD_COUNT,
                format!(
                    "new cell description has {} field(s), expected 5",
                    new_cell.len()
                ),
                span,
            )
            .with_help(format!("expected `{ENTRY_SHAPE}`")),
        );
        return None;
    }

    let [x, y, width, height] = reader.numbers(&new_cell[1..], ["x", "y", "width", "height"])?;
    Some(EcoPlanEntry {
        remove: line.fields[1..arrow]
            .iter()
            .map(|f| f.text.to_string())
            .collect(),
        new_cell: CellRecord {
            name: new_cell[0].text.to_string(),
            origin: Coord::new(x, y),
            width,
            height,
            fixed: false,
        },
    })
}
