//! `ecoeval`: checks an ECO placement run round by round and scores it.
//!
//! Takes the starting layout, the ECO plan and the moves log, replays every
//! round, and prints the cost table if all rounds are legal. Exits 0 on
//! success, 1 on any input or legality error, and 2 on bad arguments.

#![warn(missing_docs)]

mod report;
mod run;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, ValueEnum};
use eco_layout::BinCount;
use log::LevelFilter;

/// ECO placement legality checker and scorer.
#[derive(Parser, Debug)]
#[command(name = "ecoeval", version, about = "ECO placement legality checker and scorer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `eco.toml` configuration file.
    #[arg(long)]
    pub config: Option<String>,

    /// What to evaluate and how to report it.
    #[command(flatten)]
    pub eval: EvalArgs,
}

/// Input files and report options.
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Starting layout file.
    pub layout: PathBuf,

    /// ECO plan file.
    pub plan: PathBuf,

    /// Applied-moves log.
    pub moves: PathBuf,

    /// Score output format. Overrides `eco.toml`.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Digits after the decimal point in the score table, at most 12.
    /// Overrides `eco.toml`.
    #[arg(long, value_parser = clap::value_parser!(u8).range(..=eco_config::MAX_PRECISION as i64))]
    pub precision: Option<u8>,

    /// After the last round, cross-check the whole layout pairwise.
    #[arg(long)]
    pub audit: bool,

    /// Report bin utilization on an `<X>x<Y>` grid over the placement rows,
    /// before the first round and after each legal one.
    #[arg(long, value_name = "XxY", value_parser = parse_bins)]
    pub utilization: Option<BinCount>,
}

/// Parses a bin grid such as `8x4`.
fn parse_bins(value: &str) -> Result<BinCount, String> {
    let (x, y) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected <X>x<Y>, got `{value}`"))?;
    let count = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid bin count `{part}`: {e}"))
    };
    BinCount::new(count(x)?, count(y)?).ok_or_else(|| "bin counts must be positive".to_string())
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Score output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Cost breakdown table.
    Table,
    /// Machine-readable JSON.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };
    colored::control::set_override(color);

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    match run::run(&cli.eval, &global) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// `-q` and `-v` pick the default level; `RUST_LOG` overrides it.
fn init_logging(quiet: bool, verbose: bool) {
    env_logger::Builder::new()
        .filter_level(log_level(quiet, verbose))
        .parse_default_env()
        .init();
}

fn log_level(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILES: [&str; 4] = ["ecoeval", "case.lg", "case.opt", "case.out"];

    #[test]
    fn parse_positional_files() {
        let cli = Cli::parse_from(FILES);
        assert_eq!(cli.eval.layout, PathBuf::from("case.lg"));
        assert_eq!(cli.eval.plan, PathBuf::from("case.opt"));
        assert_eq!(cli.eval.moves, PathBuf::from("case.out"));
        assert!(cli.eval.format.is_none());
        assert!(cli.eval.precision.is_none());
        assert!(!cli.eval.audit);
        assert!(cli.eval.utilization.is_none());
    }

    #[test]
    fn parse_report_options() {
        let cli = Cli::parse_from([
            "ecoeval",
            "--format",
            "json",
            "--precision",
            "6",
            "--audit",
            "case.lg",
            "case.opt",
            "case.out",
        ]);
        assert_eq!(cli.eval.format, Some(OutputFormat::Json));
        assert_eq!(cli.eval.precision, Some(6));
        assert!(cli.eval.audit);
    }

    #[test]
    fn parse_global_flags() {
        let mut argv = vec!["ecoeval", "--quiet", "--color", "never", "--config", "x.toml"];
        argv.extend_from_slice(&FILES[1..]);
        let cli = Cli::parse_from(argv);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.config.as_deref(), Some("x.toml"));
    }

    #[test]
    fn missing_input_file_is_an_argument_error() {
        let err = Cli::try_parse_from(["ecoeval", "case.lg", "case.opt"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let mut argv = vec!["ecoeval", "--format", "xml"];
        argv.extend_from_slice(&FILES[1..]);
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn precision_above_twelve_is_rejected() {
        for value in ["13", "1000000000", "-1"] {
            let mut argv = vec!["ecoeval", "--precision", value];
            argv.extend_from_slice(&FILES[1..]);
            let err = Cli::try_parse_from(argv).unwrap_err();
            assert_eq!(err.exit_code(), 2, "--precision {value}");
        }
        let mut argv = vec!["ecoeval", "--precision", "12"];
        argv.extend_from_slice(&FILES[1..]);
        assert_eq!(Cli::parse_from(argv).eval.precision, Some(12));
    }

    #[test]
    fn parse_utilization_grid() {
        let mut argv = vec!["ecoeval", "--utilization", "8x4"];
        argv.extend_from_slice(&FILES[1..]);
        let bins = Cli::parse_from(argv).eval.utilization.unwrap();
        assert_eq!((bins.x(), bins.y()), (8, 4));
        assert_eq!(parse_bins("3X2").map(|b| b.to_string()), Ok("3x2".to_string()));
    }

    #[test]
    fn malformed_utilization_grid_is_rejected() {
        for value in ["8", "0x4", "4x", "ax2"] {
            assert!(parse_bins(value).is_err(), "{value}");
            let mut argv = vec!["ecoeval", "--utilization", value];
            argv.extend_from_slice(&FILES[1..]);
            assert_eq!(Cli::try_parse_from(argv).unwrap_err().exit_code(), 2);
        }
    }

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(log_level(false, false), LevelFilter::Warn);
        assert_eq!(log_level(false, true), LevelFilter::Debug);
        assert_eq!(log_level(true, true), LevelFilter::Error);
    }
}
