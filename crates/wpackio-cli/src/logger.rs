//! Logging setup for the wpackio CLI.
//!
//! Library crates log through `tracing` macros; this module installs the
//! subscriber that renders them.
//!
//! # Example
//!
//! ```rust,no_run
//! use wpackio_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("starting build");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "wpackio_cli=debug,wpackio_bundler=debug,wpackio_config=debug";
const QUIET_FILTER: &str = "wpackio_cli=error,wpackio_bundler=error,wpackio_config=error";
const DEFAULT_FILTER: &str = "wpackio_cli=warn,wpackio_bundler=warn,wpackio_config=warn";

/// Initialize the tracing subscriber.
///
/// The filter is picked in this order:
/// 1. `--verbose`: DEBUG for wpackio crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG`, when set
/// 4. WARN for wpackio crates; the terminal UI covers normal progress
///
/// Calling it twice is harmless; the second call is ignored.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize the subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    // A subscriber may already be installed (tests, embedding).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins_over_quiet() {
        let filter = filter_for(true, true).to_string();
        assert!(filter.contains("wpackio_bundler=debug"));
    }

    #[test]
    fn quiet_is_errors_only() {
        let filter = filter_for(false, true).to_string();
        assert!(filter.contains("wpackio_cli=error"));
        assert!(!filter.contains("debug"));
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}
