//! # wpackio-bundler
//!
//! Production build orchestration for wpackio projects.
//!
//! A [`Build`] composes the bundler configuration from the project and server
//! config, submits it to an [`Engine`], waits for the engine's single
//! completion callback, and classifies the statistics into a
//! [`BuildOutcome`]: success, warn, or failed.
//!
//! ```text
//! ProjectConfig + ServerConfig + cwd
//!        ↓ compose (production)
//! EngineConfiguration → Engine::submit → Compiler::run(callback)
//!        ↓ oneshot
//! CompilationStats → format_messages → classify → BuildOutcome
//! ```
//!
//! The engine is a trait so tests can stand in a scripted one; the real
//! implementation is [`WebpackEngine`].

pub mod build;
pub mod engine;
pub mod error;
pub mod messages;
pub mod package_manager;
pub mod stats;
pub mod summary;
pub mod webpack;

pub use build::{Build, BuildOutcome, BuildStatus};
pub use engine::{
    run_compiler, CompletionCallback, Compiler, Engine, ProgressEvent, ProgressHandler,
};
pub use error::{BuildError, EngineError, Result};
pub use messages::{format_message, format_messages, FormattedMessages};
pub use package_manager::PackageManager;
pub use stats::{AssetStats, CompilationStats, RawMessage};
pub use summary::{render_summary, SummaryOptions};
pub use webpack::WebpackEngine;
