//! Error types for the build orchestrator and the bundling engine.

use miette::Diagnostic;
use thiserror::Error;
use wpackio_config::ConfigError;

/// Engine-fatal failures: the engine could not produce statistics at all.
///
/// Compilation errors are *not* engine errors; they arrive inside the
/// statistics and are classified by the orchestrator.
#[derive(Error, Debug, Diagnostic)]
pub enum EngineError {
    /// Failed to spawn the engine process
    #[error("Failed to spawn webpack through {package_manager}: {source}")]
    #[diagnostic(
        code(wpackio::engine::spawn_failed),
        help("Check that {package_manager} is installed and webpack is a dependency of the project")
    )]
    SpawnFailed {
        package_manager: String,
        #[source]
        source: std::io::Error,
    },

    /// Engine exited without writing statistics to stdout
    #[error("webpack exited with code {exit_code} without producing statistics")]
    #[diagnostic(code(wpackio::engine::no_stats))]
    ExitedWithoutStats {
        exit_code: i32,
        #[help]
        stderr: String,
    },

    /// Statistics output was not valid JSON
    #[error("Failed to parse webpack statistics: {source}")]
    #[diagnostic(
        code(wpackio::engine::invalid_stats),
        help("webpack must be invoked with --json and print nothing else to stdout")
    )]
    InvalidStats {
        #[source]
        source: serde_json::Error,
    },

    /// Engine process timed out
    #[error("webpack timed out after {timeout_secs} seconds")]
    #[diagnostic(
        code(wpackio::engine::timeout),
        help("Try increasing the timeout or check whether a loader is stuck")
    )]
    Timeout { timeout_secs: u64 },

    /// The engine dropped its completion callback without invoking it
    #[error("Bundling engine finished without reporting a result")]
    #[diagnostic(code(wpackio::engine::callback_dropped))]
    CallbackDropped,

    /// Composed configuration could not be serialized for the engine
    #[error("Failed to serialize engine configuration: {source}")]
    #[diagnostic(code(wpackio::engine::config_serialization))]
    ConfigSerialization {
        #[source]
        source: serde_json::Error,
    },

    /// Engine reported a fatal error of its own
    #[error("{message}")]
    #[diagnostic(code(wpackio::engine::fatal))]
    Fatal { message: String },

    #[error("I/O error: {0}")]
    #[diagnostic(code(wpackio::engine::io))]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn spawn_failed(package_manager: impl Into<String>, source: std::io::Error) -> Self {
        Self::SpawnFailed {
            package_manager: package_manager.into(),
            source,
        }
    }

    pub fn exited_without_stats(exit_code: i32, stderr: String) -> Self {
        Self::ExitedWithoutStats { exit_code, stderr }
    }

    pub fn invalid_stats(source: serde_json::Error) -> Self {
        Self::InvalidStats { source }
    }

    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal {
            message: message.into(),
        }
    }
}

/// Everything that can stop [`Build::build`](crate::Build::build) from
/// producing a [`BuildOutcome`](crate::BuildOutcome).
#[derive(Error, Debug, Diagnostic)]
pub enum BuildError {
    #[error(transparent)]
    #[diagnostic(code(wpackio::build::config))]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Engine(#[from] EngineError),

    /// Compilation finished with errors; the message is the errors joined by newlines.
    #[error("{}", .errors.join("\n"))]
    #[diagnostic(code(wpackio::build::compilation))]
    Compilation { errors: Vec<String> },
}

pub type Result<T> = std::result::Result<T, BuildError>;
