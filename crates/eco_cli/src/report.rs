//! Score output: tables for people, JSON for scripts.

use eco_layout::{RoundSummary, ScoreReport, UtilizationMap};
use prettytable::{format, row, Cell, Row, Table};
use serde::Serialize;

/// Builds the cost breakdown table with `precision` digits after the point.
pub fn score_table(report: &ScoreReport, precision: usize) -> Table {
    let fixed = |value: f64| format!("{value:.precision$}");
    let pct = |value: f64| format!("{value:.precision$}(%)");
    let total_pct = if report.total == 0.0 { 0.0 } else { 100.0 };

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row![b => "Cost", "-", "Weight", "Value", "Percentage(%)"]);
    table.add_row(row![
        "Move Times",
        r->fixed(report.move_count as f64),
        r->fixed(report.alpha),
        r->fixed(report.move_cost),
        r->pct(report.move_pct)
    ]);
    table.add_row(row![
        "Total Distance",
        r->fixed(report.total_distance),
        r->fixed(report.beta),
        r->fixed(report.distance_cost),
        r->pct(report.distance_pct)
    ]);
    table.add_row(row![
        "Total",
        "-",
        "-",
        r->fixed(report.total),
        r->pct(total_pct)
    ]);
    table
}

/// Bin utilization in percent, top row of bins first so the table reads
/// like the die.
pub fn utilization_table(map: &UtilizationMap) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    let columns = map.bins.first().map_or(0, Vec::len);

    let mut titles = vec![Cell::new("y\\x")];
    titles.extend((0..columns).map(|i| Cell::new(&i.to_string())));
    table.set_titles(Row::new(titles));
    for (j, bins) in map.bins.iter().enumerate().rev() {
        let mut cells = vec![Cell::new(&j.to_string())];
        cells.extend(bins.iter().map(|value| {
            Cell::new_align(&format!("{:.0}", value * 100.0), format::Alignment::RIGHT)
        }));
        table.add_row(Row::new(cells));
    }
    table
}

#[derive(Serialize)]
struct JsonReport<'a> {
    score: &'a ScoreReport,
    rounds: &'a [RoundSummary],
    #[serde(skip_serializing_if = "no_maps")]
    utilization: &'a [UtilizationMap],
}

fn no_maps(maps: &&[UtilizationMap]) -> bool {
    maps.is_empty()
}

/// Renders the score, per-round summaries and any utilization maps as
/// pretty-printed JSON.
pub fn render_json(
    report: &ScoreReport,
    rounds: &[RoundSummary],
    utilization: &[UtilizationMap],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        score: report,
        rounds,
        utilization,
    })
}
