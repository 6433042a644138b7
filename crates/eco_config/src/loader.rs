//! Configuration file discovery, parsing, and validation.

use crate::error::ConfigError;
use crate::types::EvalConfig;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "eco.toml";

/// Largest accepted number of digits after the decimal point.
pub const MAX_PRECISION: usize = 12;

/// Returns `<dir>/eco.toml` if it exists.
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Reads and validates a configuration file.
pub fn load_config(path: &Path) -> Result<EvalConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates configuration text.
pub fn load_config_from_str(content: &str) -> Result<EvalConfig, ConfigError> {
    let config: EvalConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &EvalConfig) -> Result<(), ConfigError> {
    if config.report.precision > MAX_PRECISION {
        return Err(ConfigError::ValidationError(format!(
            "report.precision must be at most {MAX_PRECISION}, got {}",
            config.report.precision
        )));
    }
    for (key, value) in [
        ("weights.alpha", config.weights.alpha),
        ("weights.beta", config.weights.beta),
    ] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{key} must be a finite non-negative number, got {v}"
                )));
            }
        }
    }
    Ok(())
}
