//! Engine-ready configuration types.
//!
//! Field names follow what the bundling engine expects once serialized, so the
//! JSON form of [`EngineConfiguration::compilations`] can be handed to it as a
//! multi-compiler configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// Compilation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn from_dev_flag(is_dev: bool) -> Self {
        if is_dev {
            Mode::Development
        } else {
            Mode::Production
        }
    }

    pub fn is_dev(self) -> bool {
        self == Mode::Development
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => f.write_str("development"),
            Mode::Production => f.write_str("production"),
        }
    }
}

/// A fully composed bundler configuration, one compilation per file group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfiguration {
    pub mode: Mode,
    pub context: PathBuf,
    pub compilations: Vec<CompilationConfig>,
}

impl EngineConfiguration {
    /// Names of the compilations, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.compilations.iter().map(|c| c.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationConfig {
    pub name: String,
    pub mode: Mode,
    pub context: PathBuf,
    pub entry: IndexMap<String, String>,
    pub output: OutputConfig,
    pub devtool: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub externals: IndexMap<String, String>,
    pub resolve: ResolveConfig,
    pub module: ModuleConfig,
    pub optimization: OptimizationConfig,
    /// Options consumed by the engine's loader shim, not by the engine itself.
    pub wpackio: ShimOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    pub path: PathBuf,
    pub public_path: String,
    pub filename: String,
    pub chunk_filename: String,
    /// Unique per project so several wpackio bundles can share one page.
    pub unique_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveConfig {
    pub extensions: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub alias: IndexMap<String, PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub rules: Vec<RuleConfig>,
}

/// A module rule. `test` and `exclude` are regular expression sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub test: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    #[serde(rename = "use", default, skip_serializing_if = "Vec::is_empty")]
    pub use_: Vec<LoaderConfig>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub loader: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl LoaderConfig {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationConfig {
    pub minimize: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_chunks: Option<SplitChunksConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_chunk: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitChunksConfig {
    pub chunks: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShimOptions {
    /// Extract CSS into files instead of injecting it at runtime.
    pub extract_css: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    pub error_overlay: bool,
}
