//! The starting layout file.

use crate::codes;
use crate::fields::FieldReader;
use crate::token::{lines, Line};
use eco_diagnostics::{Diagnostic, DiagnosticSink};
use eco_layout::{CellRecord, Coord, DieBoundary, LayoutRecord, PlacementRow};
use eco_source::{FileId, SourceDb, SourceFile, Span};
use std::collections::HashMap;

const CELL_SHAPE: &str = "<name> <x> <y> <width> <height> FIX|NOTFIX";
const ROW_SHAPE: &str = "PlacementRows <x> <y> <siteWidth> <siteHeight> <numSites>";

/// Parses a layout file.
///
/// Returns `None` when the file lacks a `DieSize` line, since no record can be
/// built without one. Missing `Alpha`/`Beta` default to 0 with a warning.
pub fn parse_layout(
    file_id: FileId,
    source_db: &SourceDb,
    sink: &DiagnosticSink,
) -> Option<LayoutRecord> {
    let file = source_db.get_file(file_id);
    let mut state = LayoutParser {
        file,
        reader: FieldReader::new(sink),
        alpha: None,
        beta: None,
        die: None,
        cells: Vec::new(),
        rows: Vec::new(),
        seen: HashMap::new(),
    };
    for line in lines(file) {
        state.line(&line);
    }

    let start = Span::new(file_id, 0, 0);
    let alpha = state.weight(state.alpha, "Alpha", start);
    let beta = state.weight(state.beta, "Beta", start);
    if state.rows.is_empty() {
        sink.emit(Diagnostic::error(
            codes::MISSING_ROWS,
            "layout defines no placement rows",
            start,
        ));
    }
    let Some(die) = state.die else {
        sink.emit(
            Diagnostic::error(codes::MISSING_DIE, "layout has no `DieSize` line", start)
                .with_help("expected `DieSize <leftX> <lowY> <rightX> <highY>`"),
        );
        return None;
    };

    log::debug!(
        "parsed layout: {} cell(s), {} row(s)",
        state.cells.len(),
        state.rows.len()
    );
    Some(LayoutRecord {
        die,
        alpha,
        beta,
        cells: state.cells,
        rows: state.rows,
    })
}

struct LayoutParser<'s> {
    file: &'s SourceFile,
    reader: FieldReader<'s>,
    alpha: Option<(f64, Span)>,
    beta: Option<(f64, Span)>,
    die: Option<DieBoundary>,
    cells: Vec<CellRecord>,
    rows: Vec<PlacementRow>,
    seen: HashMap<String, Span>,
}

impl LayoutParser<'_> {
    fn line(&mut self, line: &Line<'_>) {
        let f = &line.fields;
        match line.head().text {
            "Alpha" | "Beta" => {
                if !self.reader.expect_len(line, 2, "Alpha|Beta <value>") {
                    return;
                }
                let Some(value) = self.reader.number(&f[1], line.head().text) else {
                    return;
                };
                let slot = if line.head().text == "Alpha" {
                    &mut self.alpha
                } else {
                    &mut self.beta
                };
                if slot.is_some() {
                    self.reader.sink().emit(Diagnostic::warning(
                        codes::REPEATED_KEYWORD,
                        format!("`{}` is set more than once; using this value", line.head().text),
                        line.span,
                    ));
                }
                *slot = Some((value, line.span));
            }
            "DieSize" => {
                if !self
                    .reader
                    .expect_len(line, 5, "DieSize <leftX> <lowY> <rightX> <highY>")
                {
                    return;
                }
                let Some([l, b, r, t]) =
                    self.reader.numbers(&f[1..], ["leftX", "lowY", "rightX", "highY"])
                else {
                    return;
                };
                if self.die.is_some() {
                    self.reader.sink().emit(Diagnostic::warning(
                        codes::REPEATED_KEYWORD,
                        "`DieSize` is set more than once; using this value",
                        line.span,
                    ));
                }
                self.die = Some(DieBoundary::new(l, b, r, t));
            }
            "PlacementRows" => {
                if !self.reader.expect_len(line, 6, ROW_SHAPE) {
                    return;
                }
                let coords = self
                    .reader
                    .numbers(&f[1..5], ["row x", "row y", "site width", "site height"]);
                let sites = self.reader.count(&f[5], "site count");
                if let (Some([x, y, site_width, site_height]), Some(site_count)) = (coords, sites) {
                    self.rows.push(PlacementRow {
                        origin: Coord::new(x, y),
                        site_width,
                        site_height,
                        site_count,
                    });
                }
            }
            _ if line.len() == 6 => self.cell(line),
            _ => self.reader.sink().emit(
                Diagnostic::warning(
                    codes::IGNORED_LAYOUT_LINE,
                    format!("unrecognized layout line starting with `{}`", line.head().text),
                    line.span,
                )
                .with_help(format!("cell lines look like `{CELL_SHAPE}`")),
            ),
        }
    }

    fn cell(&mut self, line: &Line<'_>) {
        let f = &line.fields;
        let name = f[0];
        let coords = self
            .reader
            .numbers(&f[1..5], ["x", "y", "width", "height"]);
        let fixed = match f[5].text {
            "FIX" => Some(true),
            "NOTFIX" => Some(false),
            other => {
                self.reader.sink().emit(
                    Diagnostic::error(
                        codes::BAD_FIXED_FLAG,
                        format!("cell {} has fixed flag `{other}`", name.text),
                        f[5].span,
                    )
                    .with_help("use `FIX` or `NOTFIX`"),
                );
                None
            }
        };

        if let Some(first) = self.seen.get(name.text) {
            self.reader.sink().emit(
                Diagnostic::error(
                    codes::DUPLICATE_CELL,
                    format!("cell {} is defined more than once", name.text),
                    name.span,
                )
                .with_note(format!(
                    "first defined on line {}",
                    self.file.line_col(first.start).0
                )),
            );
            return;
        }
        self.seen.insert(name.text.to_string(), name.span);

        if let (Some([x, y, width, height]), Some(fixed)) = (coords, fixed) {
            self.cells.push(CellRecord {
                name: name.text.to_string(),
                origin: Coord::new(x, y),
                width,
                height,
                fixed,
            });
        }
    }

    fn weight(&self, value: Option<(f64, Span)>, keyword: &str, at: Span) -> f64 {
        match value {
            Some((value, _)) => value,
            None => {
                self.reader.sink().emit(Diagnostic::warning(
                    codes::MISSING_WEIGHT,
                    format!("layout has no `{keyword}` line; using 0"),
                    at,
                ));
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{codes, run};

    const LAYOUT: &str = "\
Alpha 1
Beta 2.5
DieSize 0 0 100 40
FF_1 0 0 10 10 NOTFIX
C2 10 0 5 20 FIX
PlacementRows 0 10 1 10 100
PlacementRows 0 0 1 10 100
";

    #[test]
    fn parses_every_record() {
        let (record, diags) = run(LAYOUT, parse_layout);
        assert!(diags.is_empty(), "{diags:?}");
        let record = record.unwrap();
        assert_eq!(record.alpha, 1.0);
        assert_eq!(record.beta, 2.5);
        assert_eq!(record.die, DieBoundary::new(0.0, 0.0, 100.0, 40.0));
        assert_eq!(record.cells.len(), 2);
        assert_eq!(record.cells[1].name, "C2");
        assert!(record.cells[1].fixed);
        assert_eq!(record.cells[1].height, 20.0);
        assert_eq!(record.rows.len(), 2);
        assert_eq!(record.rows[0].origin.y, 10.0);
    }

    #[test]
    fn missing_weights_default_with_warning() {
        let (record, diags) = run(
            "DieSize 0 0 10 10\nPlacementRows 0 0 1 10 10\n",
            parse_layout,
        );
        let record = record.unwrap();
        assert_eq!((record.alpha, record.beta), (0.0, 0.0));
        assert_eq!(codes(&diags), vec!["W501", "W501"]);
        assert!(diags.iter().all(|d| !d.severity.is_error()));
    }

    #[test]
    fn missing_die_and_rows_are_errors() {
        let (record, diags) = run("Alpha 1\nBeta 1\n", parse_layout);
        assert!(record.is_none());
        assert_eq!(codes(&diags), vec!["P405", "P404"]);
    }

    #[test]
    fn bad_fixed_flag_points_at_the_flag() {
        let text = "DieSize 0 0 10 10\nPlacementRows 0 0 1 10 10\nAlpha 0\nBeta 0\nA 0 0 1 10 fixed\n";
        let mut db = SourceDb::new();
        let id = db.add_source("l.txt", text.to_string());
        let sink = DiagnosticSink::new();
        let record = parse_layout(id, &db, &sink).unwrap();
        let diags = sink.take_all();

        assert!(record.cells.is_empty());
        assert_eq!(codes(&diags), vec!["P403"]);
        assert_eq!(db.snippet(diags[0].span), "fixed");
    }

    #[test]
    fn every_bad_number_is_reported() {
        let (_, diags) = run(
            "Alpha 0\nBeta 0\nDieSize 0 0 x 10\nPlacementRows 0 0 1 10 10\nA one 0 1 NaN NOTFIX\n",
            parse_layout,
        );
        assert_eq!(codes(&diags), vec!["P401", "P401", "P401", "P404"]);
    }

    #[test]
    fn duplicate_cell_is_an_error() {
        let (record, diags) = run(
            "Alpha 0\nBeta 0\nDieSize 0 0 10 10\nPlacementRows 0 0 1 10 10\nA 0 0 1 10 NOTFIX\nA 2 0 1 10 NOTFIX\n",
            parse_layout,
        );
        assert_eq!(record.unwrap().cells.len(), 1);
        assert_eq!(codes(&diags), vec!["P406"]);
        assert_eq!(diags[0].notes, vec!["first defined on line 5"]);
    }

    #[test]
    fn wrong_field_count_and_stray_lines() {
        let (_, diags) = run(
            "Alpha 0\nBeta 0\nDieSize 0 0 10\nPlacementRows 0 0 1 10 10\nNumInput 3\n",
            parse_layout,
        );
        assert_eq!(codes(&diags), vec!["P402", "W503", "P404"]);
    }

    #[test]
    fn fractional_site_count_is_rejected() {
        let (record, diags) = run(
            "Alpha 0\nBeta 0\nDieSize 0 0 10 10\nPlacementRows 0 0 1 10 2.5\n",
            parse_layout,
        );
        assert!(record.unwrap().rows.is_empty());
        assert_eq!(codes(&diags), vec!["P409", "P405"]);
    }
}
