//! Production build orchestration.
//!
//! [`Build`] runs exactly one production compilation and classifies the
//! result into a [`BuildOutcome`]. All three outcomes come back through the
//! same `Ok` channel; `Err` is reserved for runs that never produced
//! statistics (bad configuration, engine failure).

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use wpackio_config::{compose, ProjectConfig, ServerConfig};

use crate::engine::{run_compiler, Engine};
use crate::error::{BuildError, Result};
use crate::messages::{format_messages, FormattedMessages};
use crate::summary::{render_summary, SummaryOptions};

/// Status tag of a [`BuildOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    Success,
    Warn,
    Error,
}

impl BuildStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildStatus::Success => "success",
            BuildStatus::Warn => "warn",
            BuildStatus::Error => "error",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified result of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// No errors, no warnings. `log` is the assets/entrypoints summary.
    Success { log: String },
    /// Warnings only. `log` is the warnings joined by newlines.
    Warn { log: String },
    /// At least one error. Warnings are not reported.
    Failed { errors: Vec<String> },
}

impl BuildOutcome {
    /// Classify normalized messages. First match wins: clean → success, any
    /// error → failed, otherwise warn. `summary` is only rendered on success.
    pub fn classify(messages: FormattedMessages, summary: impl FnOnce() -> String) -> Self {
        let FormattedMessages { errors, warnings } = messages;
        if errors.is_empty() && warnings.is_empty() {
            BuildOutcome::Success { log: summary() }
        } else if !errors.is_empty() {
            BuildOutcome::Failed { errors }
        } else {
            BuildOutcome::Warn {
                log: warnings.join("\n"),
            }
        }
    }

    pub fn status(&self) -> BuildStatus {
        match self {
            BuildOutcome::Success { .. } => BuildStatus::Success,
            BuildOutcome::Warn { .. } => BuildStatus::Warn,
            BuildOutcome::Failed { .. } => BuildStatus::Error,
        }
    }

    /// Log text; for `Failed` the errors joined by newlines.
    pub fn log(&self) -> String {
        match self {
            BuildOutcome::Success { log } | BuildOutcome::Warn { log } => log.clone(),
            BuildOutcome::Failed { errors } => errors.join("\n"),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, BuildOutcome::Failed { .. })
    }

    /// Treat `Failed` as an error, for callers that want to `?` past it.
    pub fn into_result(self) -> Result<BuildOutcome> {
        match self {
            BuildOutcome::Failed { errors } => Err(BuildError::Compilation { errors }),
            outcome => Ok(outcome),
        }
    }
}

/// One production build of a project.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use std::sync::Arc;
/// use wpackio_bundler::{Build, BuildOutcome, PackageManager, WebpackEngine};
/// use wpackio_config::ConfigDiscovery;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cwd = PathBuf::from("/srv/wp-content/plugins/demo");
/// let discovery = ConfigDiscovery::new(&cwd);
/// let engine = Arc::new(WebpackEngine::new(PackageManager::detect(&cwd)));
///
/// let build = Build::new(discovery.load_project()?, discovery.load_server()?, cwd, engine);
/// match build.build().await? {
///     BuildOutcome::Success { log } => println!("{log}"),
///     BuildOutcome::Warn { log } => eprintln!("{log}"),
///     BuildOutcome::Failed { errors } => eprintln!("{}", errors.join("\n")),
/// }
/// # Ok(()) }
/// ```
pub struct Build {
    project: ProjectConfig,
    server: ServerConfig,
    cwd: PathBuf,
    engine: Arc<dyn Engine>,
    summary: SummaryOptions,
}

impl Build {
    /// Store the inputs. Nothing is read or spawned until [`Build::build`].
    pub fn new(
        project: ProjectConfig,
        server: ServerConfig,
        cwd: impl Into<PathBuf>,
        engine: Arc<dyn Engine>,
    ) -> Self {
        Self {
            project,
            server,
            cwd: cwd.into(),
            engine,
            summary: SummaryOptions::concise(),
        }
    }

    /// Colorize the success summary.
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.summary = self.summary.with_colors(colors);
        self
    }

    pub fn project(&self) -> &ProjectConfig {
        &self.project
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    pub fn cwd(&self) -> &PathBuf {
        &self.cwd
    }

    /// Run one production compilation and classify it.
    pub async fn build(&self) -> Result<BuildOutcome> {
        let config = compose(&self.project, &self.server, &self.cwd, false)?;
        tracing::info!(
            app = %self.project.app_name,
            compilations = config.compilations.len(),
            "starting production build"
        );

        let compiler = self.engine.submit(config)?;
        let stats = run_compiler(compiler).await?;

        let messages = format_messages(&stats);
        tracing::debug!(
            errors = messages.errors.len(),
            warnings = messages.warnings.len(),
            "compilation finished"
        );

        let outcome = BuildOutcome::classify(messages, || render_summary(&stats, &self.summary));
        tracing::info!(status = %outcome.status(), "build classified");
        Ok(outcome)
    }
}

impl fmt::Debug for Build {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Build")
            .field("project", &self.project.app_name)
            .field("cwd", &self.cwd)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}
