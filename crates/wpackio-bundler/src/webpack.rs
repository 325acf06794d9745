//! webpack as the bundling engine.
//!
//! The composed configuration is written as JSON next to a small CommonJS
//! shim that turns it into real webpack options (regular expressions, the CSS
//! extraction plugin, the banner). webpack then runs through the project's
//! package manager with `--json`, and its stdout is parsed as statistics.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use wpackio_config::EngineConfiguration;

use crate::engine::{CompletionCallback, Compiler, Engine, ProgressEvent, ProgressHandler};
use crate::error::EngineError;
use crate::package_manager::PackageManager;
use crate::stats::CompilationStats;

/// Default timeout for a webpack run (10 minutes)
const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Stderr kept for error reports (64 KiB)
const MAX_STDERR_SIZE: usize = 64 * 1024;

/// Cache directory, relative to the compilation context.
const CACHE_DIR: &str = "node_modules/.cache/wpackio";

const CONFIG_JSON: &str = "webpack.config.json";
const CONFIG_SHIM: &str = "webpack.config.js";

const SHIM_SOURCE: &str = r#"// Generated by wpackio. Do not edit.
const webpack = require('webpack');
const compilations = require('./webpack.config.json');

const toRegExp = (source) => (typeof source === 'string' ? new RegExp(source) : source);

module.exports = compilations.map((compilation) => {
	const { wpackio = {}, ...config } = compilation;
	const plugins = [];
	let MiniCssExtractPlugin = null;
	if (wpackio.extractCss) {
		MiniCssExtractPlugin = require('mini-css-extract-plugin');
		plugins.push(new MiniCssExtractPlugin({ filename: '[name]-[contenthash:8].css' }));
	}
	if (wpackio.banner) {
		plugins.push(new webpack.BannerPlugin({ banner: wpackio.banner }));
	}
	config.module.rules = config.module.rules.map((rule) => {
		const next = { ...rule, test: toRegExp(rule.test) };
		if (rule.exclude) {
			next.exclude = toRegExp(rule.exclude);
		}
		if (rule.use) {
			next.use = rule.use.map((use) =>
				use.loader === 'mini-css-extract-plugin' && MiniCssExtractPlugin
					? MiniCssExtractPlugin.loader
					: use
			);
		}
		return next;
	});
	return { ...config, plugins };
});
"#;

static PROGRESS_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,3})%\s*(.*)$").expect("Invalid progress regex"));

/// Runs webpack out of process.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use wpackio_bundler::{PackageManager, WebpackEngine};
///
/// let cwd = Path::new("/srv/wp-content/plugins/demo");
/// let engine = WebpackEngine::new(PackageManager::detect(cwd));
/// ```
#[derive(Clone)]
pub struct WebpackEngine {
    package_manager: PackageManager,
    timeout_secs: u64,
    progress: Option<ProgressHandler>,
}

impl std::fmt::Debug for WebpackEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebpackEngine")
            .field("package_manager", &self.package_manager)
            .field("timeout_secs", &self.timeout_secs)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl WebpackEngine {
    pub fn new(package_manager: PackageManager) -> Self {
        Self {
            package_manager,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            progress: None,
        }
    }

    /// Set the timeout for a run, in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Forward webpack's progress output to `handler`.
    pub fn with_progress(mut self, handler: ProgressHandler) -> Self {
        self.progress = Some(handler);
        self
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }
}

impl Engine for WebpackEngine {
    fn submit(&self, config: EngineConfiguration) -> Result<Box<dyn Compiler>, EngineError> {
        let cache_dir = config.context.join(CACHE_DIR);
        let config_path = write_config(&cache_dir, &config)?;

        tracing::debug!(
            config = %config_path.display(),
            compilations = config.compilations.len(),
            "submitted configuration to webpack"
        );

        Ok(Box::new(WebpackCompiler {
            package_manager: self.package_manager,
            context: config.context,
            config_path,
            timeout_secs: self.timeout_secs,
            progress: self.progress.clone(),
        }))
    }
}

/// Write the JSON configuration and the shim; returns the shim path.
fn write_config(cache_dir: &Path, config: &EngineConfiguration) -> Result<PathBuf, EngineError> {
    let json = serde_json::to_string_pretty(&config.compilations)
        .map_err(|source| EngineError::ConfigSerialization { source })?;

    std::fs::create_dir_all(cache_dir)?;
    std::fs::write(cache_dir.join(CONFIG_JSON), json)?;

    let shim = cache_dir.join(CONFIG_SHIM);
    std::fs::write(&shim, SHIM_SOURCE)?;
    Ok(shim)
}

struct WebpackCompiler {
    package_manager: PackageManager,
    context: PathBuf,
    config_path: PathBuf,
    timeout_secs: u64,
    progress: Option<ProgressHandler>,
}

impl Compiler for WebpackCompiler {
    fn run(self: Box<Self>, done: CompletionCallback) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let compiler = *self;
                handle.spawn(async move {
                    let result = compiler.execute().await;
                    done(result);
                });
            }
            Err(_) => done(Err(EngineError::fatal(
                "webpack runs need a tokio runtime to spawn on",
            ))),
        }
    }
}

impl WebpackCompiler {
    fn command(&self) -> Command {
        let parts = self.package_manager.webpack_command();
        let mut cmd = Command::new(parts[0]);
        cmd.args(&parts[1..])
            .arg("--config")
            .arg(&self.config_path)
            .arg("--json");

        if self.progress.is_some() {
            cmd.arg("--progress");
        }

        cmd.current_dir(&self.context)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    async fn execute(self) -> Result<CompilationStats, EngineError> {
        tracing::info!(
            package_manager = self.package_manager.name(),
            context = %self.context.display(),
            "running webpack"
        );

        let mut child = self
            .command()
            .spawn()
            .map_err(|source| EngineError::spawn_failed(self.package_manager.name(), source))?;

        let mut stdout = child.stdout.take().ok_or_else(|| {
            EngineError::spawn_failed(
                self.package_manager.name(),
                std::io::Error::new(std::io::ErrorKind::BrokenPipe, "Failed to capture stdout"),
            )
        })?;
        let stderr = child.stderr.take();
        let stderr_task = tokio::spawn(read_stderr(stderr, self.progress.clone()));

        let wait = async {
            let mut out = Vec::new();
            stdout.read_to_end(&mut out).await?;
            let status = child.wait().await?;
            Ok::<_, std::io::Error>((out, status))
        };

        let (out, status) = timeout(Duration::from_secs(self.timeout_secs), wait)
            .await
            .map_err(|_| EngineError::timeout(self.timeout_secs))??;

        let stderr = stderr_task.await.unwrap_or_default();
        let exit_code = status.code().unwrap_or(-1);
        tracing::debug!(exit_code, stdout_bytes = out.len(), "webpack exited");

        // webpack exits non-zero on compile errors but still prints statistics.
        parse_stats(&String::from_utf8_lossy(&out), status.success(), exit_code, stderr)
    }
}

fn parse_stats(
    stdout: &str,
    success: bool,
    exit_code: i32,
    stderr: String,
) -> Result<CompilationStats, EngineError> {
    let Some(start) = stdout.find('{') else {
        return Err(EngineError::exited_without_stats(exit_code, stderr));
    };

    // Package managers may print a footer after the JSON (`Done in 2.31s.`),
    // so only the first value is read.
    let mut values =
        serde_json::Deserializer::from_str(&stdout[start..]).into_iter::<CompilationStats>();
    match values.next() {
        Some(Ok(stats)) => Ok(stats),
        Some(Err(source)) if success => Err(EngineError::invalid_stats(source)),
        _ => Err(EngineError::exited_without_stats(exit_code, stderr)),
    }
}

async fn read_stderr<R>(stderr: Option<R>, progress: Option<ProgressHandler>) -> String
where
    R: AsyncRead + Unpin,
{
    let Some(stderr) = stderr else {
        return String::new();
    };

    let mut collected = String::new();
    let mut lines = BufReader::new(stderr).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if let Some(event) = parse_progress(&line) {
            if let Some(handler) = &progress {
                handler(event);
            }
            continue;
        }
        if collected.len() < MAX_STDERR_SIZE {
            collected.push_str(&line);
            collected.push('\n');
        }
    }
    collected
}

/// Parse a progress line such as `[webpack.Progress] 42% building 10/12 modules`.
pub fn parse_progress(line: &str) -> Option<ProgressEvent> {
    let caps = PROGRESS_LINE.captures(line.trim())?;
    let percent: f64 = caps[1].parse().ok()?;
    if percent > 100.0 {
        return None;
    }
    Some(ProgressEvent::new(percent, caps[2].trim()))
}
