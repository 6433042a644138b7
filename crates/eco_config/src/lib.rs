//! Loading and validation of the optional `eco.toml` evaluator configuration.
//!
//! The configuration controls how the score report is formatted, lets the
//! user override the cost weights read from the layout file, and switches on
//! the full pairwise audit after the last round.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{discover_config, load_config, load_config_from_str, CONFIG_FILE_NAME, MAX_PRECISION};
pub use types::*;
