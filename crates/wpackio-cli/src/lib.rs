//! wpackio CLI - production builds for WordPress themes and plugins.
//!
//! The heavy lifting lives in `wpackio-config` (loading and composing
//! configuration) and `wpackio-bundler` (running webpack and classifying the
//! result). This crate is the terminal front end around them:
//!
//! - [`cli`] - argument parsing with clap
//! - [`commands`] - command implementations
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages, progress bar, spinner, boxed banners
//!
//! # Example
//!
//! ```rust,no_run
//! use wpackio_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
