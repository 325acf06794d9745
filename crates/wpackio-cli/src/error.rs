//! Error handling for the wpackio CLI.
//!
//! [`CliError`] is what commands return. Library errors convert into it via
//! `#[from]`, and [`cli_error_to_miette`] turns it into the final report
//! printed by `main`.
//!
//! # Example
//!
//! ```rust,no_run
//! use wpackio_cli::error::{CliError, Result};
//!
//! fn timeout(value: &str) -> Result<u64> {
//!     value
//!         .parse()
//!         .map_err(|_| CliError::InvalidArgument(format!("--timeout expects seconds, got {value}")))
//! }
//! ```

mod report;

use thiserror::Error;
use wpackio_bundler::BuildError;
use wpackio_config::ConfigError;

pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Project or server configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The build did not produce a usable result
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;
