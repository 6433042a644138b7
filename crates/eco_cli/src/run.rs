//! The evaluation pipeline behind `ecoeval`.
//!
//! 1. Load `eco.toml` (explicit `--config`, or discovered in the working
//!    directory) and merge CLI overrides
//! 2. Read and parse the layout, plan and moves files
//! 3. Check that plan and moves log agree on the number of rounds
//! 4. Replay every round, stopping at the first illegal one
//! 5. Optionally audit the final layout pairwise
//! 6. Print the score, and the utilization maps if requested

use std::path::{Path, PathBuf};

use eco_config::{EvalConfig, ReportFormat};
use eco_diagnostics::{DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer};
use eco_layout::{BinCount, CostWeights, EvalError, Evaluator};
use eco_source::SourceDb;

use crate::report::{render_json, score_table, utilization_table};
use crate::{EvalArgs, GlobalArgs, OutputFormat};

/// Settings after merging the config file with command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Score output format.
    pub format: ReportFormat,
    /// Digits after the decimal point in the table.
    pub precision: usize,
    /// Whether to audit the final layout pairwise.
    pub audit: bool,
    /// Override of the layout's alpha.
    pub alpha: Option<f64>,
    /// Override of the layout's beta.
    pub beta: Option<f64>,
    /// Bin grid for utilization maps, if requested.
    pub utilization: Option<BinCount>,
}

/// Merges CLI flags over the config file. Flags win.
pub fn merge_settings(config: &EvalConfig, args: &EvalArgs) -> Settings {
    Settings {
        format: match args.format {
            Some(OutputFormat::Table) => ReportFormat::Table,
            Some(OutputFormat::Json) => ReportFormat::Json,
            None => config.report.format,
        },
        precision: args
            .precision
            .map_or(config.report.precision, usize::from),
        audit: args.audit || config.check.audit,
        alpha: config.weights.alpha,
        beta: config.weights.beta,
        utilization: args.utilization,
    }
}

fn load_settings(
    args: &EvalArgs,
    global: &GlobalArgs,
) -> Result<Settings, eco_config::ConfigError> {
    let path = match &global.config {
        Some(path) => Some(PathBuf::from(path)),
        None => eco_config::discover_config(Path::new(".")),
    };
    let config = match path {
        Some(path) => {
            log::debug!("using config {}", path.display());
            eco_config::load_config(&path)?
        }
        None => EvalConfig::default(),
    };
    Ok(merge_settings(&config, args))
}

/// Runs one evaluation. Returns exit code 0 if every round is legal, 1
/// otherwise.
pub fn run(args: &EvalArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let settings = load_settings(args, global)?;
    let renderer = TerminalRenderer::new(global.color);

    // Step 2: read and parse inputs
    if !global.quiet {
        eprintln!("    Loading {}", args.layout.display());
    }
    let mut source_db = SourceDb::new();
    let layout_id = source_db.load_file(&args.layout)?;
    let plan_id = source_db.load_file(&args.plan)?;
    let moves_id = source_db.load_file(&args.moves)?;

    let sink = DiagnosticSink::new();
    let layout = eco_parser::parse_layout(layout_id, &source_db, &sink);
    let plan = eco_parser::parse_plan(plan_id, &source_db, &sink);
    let moves = eco_parser::parse_moves(moves_id, &source_db, &sink);

    for diag in sink.diagnostics() {
        if diag.severity == Severity::Error || !global.quiet {
            eprint!("{}", renderer.render(&diag, &source_db));
        }
    }
    let layout = match layout {
        Some(layout) if !sink.has_errors() => layout,
        _ => {
            eprintln!(
                "error: could not parse the inputs ({} error(s))",
                sink.error_count()
            );
            return Ok(1);
        }
    };

    // Steps 3-5: evaluate
    let fail = |err: EvalError| {
        eprint!("{}", renderer.render(&err.to_diagnostic(), &source_db));
        1
    };

    let mut evaluator = match Evaluator::new(&layout) {
        Ok(evaluator) => evaluator,
        Err(err) => return Ok(fail(err)),
    };
    evaluator = evaluator.with_weights(CostWeights {
        alpha: settings.alpha.unwrap_or(layout.alpha),
        beta: settings.beta.unwrap_or(layout.beta),
    });
    if let Some(bins) = settings.utilization {
        evaluator = evaluator.track_utilization(bins);
    }
    if let Err(err) = Evaluator::check_round_counts(&plan, &moves) {
        return Ok(fail(err));
    }

    let total = plan.len();
    for (i, (entry, applied)) in plan.iter().zip(&moves).enumerate() {
        if !global.quiet {
            eprintln!("   Checking round {}/{total}", i + 1);
        }
        match evaluator.apply_round(entry, applied) {
            Ok(summary) if global.verbose && !global.quiet => eprintln!(
                "             placed {}, removed {}, moved {}",
                summary.new_cell, summary.removed, summary.moved
            ),
            Ok(_) => {}
            Err(err) => return Ok(fail(err)),
        }
    }
    if settings.audit {
        if let Err(err) = evaluator.audit() {
            return Ok(fail(err));
        }
    }
    if !global.quiet {
        eprintln!("     Passed {total} round(s)");
    }

    // Step 6: print the score
    let score = evaluator.score();
    let maps = evaluator.utilization();
    match settings.format {
        ReportFormat::Table => {
            println!("{}", score_table(&score, settings.precision));
            if let (Some(first), Some(last)) = (maps.first(), maps.last()) {
                println!(
                    "Utilization after round {} (peak {:.1}%, die usage {:.1}% from {:.1}%)",
                    last.round,
                    last.peak() * 100.0,
                    last.die_usage * 100.0,
                    first.die_usage * 100.0
                );
                println!("{}", utilization_table(last));
            }
        }
        ReportFormat::Json => println!(
            "{}",
            render_json(&score, evaluator.state().summaries(), maps)?
        ),
    }
    Ok(0)
}
