//! Command-line interface definition.
//!
//! - `wpackio build` - production build of the project in the context directory

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// wpackio - webpack builds for WordPress themes and plugins
#[derive(Parser, Debug)]
#[command(
    name = "wpackio",
    version,
    about = "Production builds for WordPress themes and plugins",
    long_about = "wpackio composes a webpack configuration from wpackio.project and\n\
                  wpackio.server config files, runs webpack and reports the result\n\
                  as a success, warning or error."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    ///
    /// Hides the spinner and banners. Useful for CI.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a production build
    ///
    /// Compiles every file group from the project config with minification,
    /// hashed filenames and source maps, and writes the output to disk.
    Build(BuildArgs),
}

/// Arguments for the build command
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Path to the project root
    ///
    /// Relative paths are resolved from the current working directory. It
    /// should be the directory that `wp-content/<themes|plugins>/<slug>/`
    /// maps to. Defaults to the current working directory.
    #[arg(short, long, value_name = "DIR")]
    pub context: Option<PathBuf>,

    /// Seconds to wait for webpack before giving up
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}
