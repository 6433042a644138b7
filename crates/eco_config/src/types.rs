//! Configuration types deserialized from `eco.toml`.

use serde::Deserialize;

/// Top-level evaluator configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvalConfig {
    /// Score report formatting.
    #[serde(default)]
    pub report: ReportConfig,
    /// Cost weight overrides.
    #[serde(default)]
    pub weights: WeightOverrides,
    /// Extra verification switches.
    #[serde(default)]
    pub check: CheckConfig,
}

/// How the final score is presented.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Digits printed after the decimal point.
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Output format.
    #[serde(default)]
    pub format: ReportFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            format: ReportFormat::default(),
        }
    }
}

fn default_precision() -> usize {
    3
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Box-drawn cost table.
    #[default]
    Table,
    /// Machine-readable JSON.
    Json,
}

/// Optional replacements for the `Alpha`/`Beta` weights of the layout file.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightOverrides {
    /// Weight of the move-count term.
    pub alpha: Option<f64>,
    /// Weight of the displacement term.
    pub beta: Option<f64>,
}

/// Additional checks beyond the per-round legality pass.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Cross-check the final layout with a brute-force pairwise scan.
    #[serde(default)]
    pub audit: bool,
}
