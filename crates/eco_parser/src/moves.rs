//! The applied-moves log.
//!
//! One block per round:
//!
//! ```text
//! <placeX> <placeY>
//! <moveCount>
//! <name> <x> <y>      (moveCount lines)
//! ```
//!
//! A malformed placement or count line loses the block alignment, so parsing
//! stops there. A malformed move line is reported and skipped.

use crate::codes;
use crate::fields::FieldReader;
use crate::token::lines;
use eco_diagnostics::{Diagnostic, DiagnosticSink};
use eco_layout::{AppliedRound, CellMove, Coord};
use eco_source::{FileId, SourceDb, Span};

/// Parses a moves log into one [`AppliedRound`] per block.
pub fn parse_moves(
    file_id: FileId,
    source_db: &SourceDb,
    sink: &DiagnosticSink,
) -> Vec<AppliedRound> {
    let file = source_db.get_file(file_id);
    let end = file.content.len() as u32;
    let eof = Span::new(file_id, end, end);
    let reader = FieldReader::new(sink);
    let mut lines = lines(file);
    let mut rounds = Vec::new();

    while let Some(place) = lines.next() {
        let round = rounds.len() + 1;
        if !reader.expect_len(&place, 2, "<placeX> <placeY>") {
            break;
        }
        let Some([x, y]) = reader.numbers(&place.fields, ["placement x", "placement y"]) else {
            break;
        };

        let Some(count_line) = lines.next() else {
            sink.emit(truncated(
                format!("block for round {round} ends before its move count"),
                eof,
            ));
            break;
        };
        if !reader.expect_len(&count_line, 1, "<moveCount>") {
            break;
        }
        let Some(count) = reader.count(count_line.head(), "move count") else {
            break;
        };

        let mut moves = Vec::new();
        for seen in 0..count {
            let Some(line) = lines.next() else {
                sink.emit(
                    truncated(
                        format!("round {round} announces {count} move(s) but only {seen} follow"),
                        eof,
                    )
                    .with_note(format!(
                        "move count is on line {}",
                        file.line_col(count_line.span.start).0
                    )),
                );
                return rounds;
            };
            if !reader.expect_len(&line, 3, "<name> <x> <y>") {
                continue;
            }
            if let Some([mx, my]) = reader.numbers(&line.fields[1..], ["x", "y"]) {
                moves.push(CellMove {
                    name: line.head().text.to_string(),
                    to: Coord::new(mx, my),
                });
            }
        }

        rounds.push(AppliedRound {
            placement: Coord::new(x, y),
            moves,
        });
    }

    log::debug!("parsed moves log: {} block(s)", rounds.len());
    rounds
}

fn truncated(message: String, at: Span) -> Diagnostic {
    Diagnostic::error(codes::TRUNCATED_BLOCK, message, at)
}
