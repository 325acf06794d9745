//! Compilation statistics as reported by the bundling engine.
//!
//! This models the subset of webpack's verbose `--json` output that the
//! orchestrator reads: messages for classification, plus assets and
//! entrypoints for the summary. Unknown fields are ignored, and both the
//! webpack 4 (plain strings) and webpack 5 (objects) message shapes are
//! accepted.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Statistics for one compilation, or for a multi compiler with `children`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Compilation time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,

    /// Unix timestamp in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub built_at: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,

    #[serde(default)]
    pub assets: Vec<AssetStats>,

    #[serde(default)]
    pub entrypoints: IndexMap<String, EntrypointStats>,

    #[serde(default)]
    pub errors: Vec<RawMessage>,

    #[serde(default)]
    pub warnings: Vec<RawMessage>,

    #[serde(default)]
    pub modules: Vec<ModuleStats>,

    #[serde(default)]
    pub children: Vec<CompilationStats>,
}

impl CompilationStats {
    /// Parse the engine's JSON output.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_error(mut self, message: impl Into<RawMessage>) -> Self {
        self.errors.push(message.into());
        self
    }

    pub fn with_warning(mut self, message: impl Into<RawMessage>) -> Self {
        self.warnings.push(message.into());
        self
    }

    pub fn with_asset(mut self, asset: AssetStats) -> Self {
        self.assets.push(asset);
        self
    }

    pub fn with_entrypoint(mut self, name: impl Into<String>, assets: &[&str]) -> Self {
        let assets = assets
            .iter()
            .map(|asset| EntrypointAsset::Name(asset.to_string()))
            .collect();
        self.entrypoints
            .insert(name.into(), EntrypointStats { assets });
        self
    }

    pub fn with_child(mut self, child: CompilationStats) -> Self {
        self.children.push(child);
        self
    }

    /// Whether this compilation or any child reported errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.children.iter().any(Self::has_errors)
    }

    /// Whether this compilation or any child reported warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty() || self.children.iter().any(Self::has_warnings)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStats {
    pub name: String,

    #[serde(default)]
    pub size: u64,

    #[serde(default)]
    pub emitted: bool,

    #[serde(default)]
    pub chunks: Vec<ChunkId>,

    #[serde(default)]
    pub chunk_names: Vec<String>,
}

impl AssetStats {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            emitted: true,
            chunks: Vec::new(),
            chunk_names: Vec::new(),
        }
    }

    pub fn with_chunk_name(mut self, chunk: impl Into<String>) -> Self {
        self.chunk_names.push(chunk.into());
        self
    }
}

/// Chunk ids are numeric in production builds and named in development.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChunkId {
    Number(u64),
    Name(String),
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkId::Number(id) => write!(f, "{id}"),
            ChunkId::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleStats {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntrypointStats {
    #[serde(default)]
    pub assets: Vec<EntrypointAsset>,
}

/// webpack 4 lists entrypoint assets by name, webpack 5 as objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntrypointAsset {
    Name(String),
    Detailed {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<u64>,
    },
}

impl EntrypointAsset {
    pub fn name(&self) -> &str {
        match self {
            EntrypointAsset::Name(name) => name,
            EntrypointAsset::Detailed { name, .. } => name,
        }
    }
}

/// An error or warning exactly as the engine reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawMessage {
    Text(String),
    Detailed(MessageDetail),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDetail {
    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<String>,
}

impl RawMessage {
    /// The message body, with the module name on the first line when known.
    pub fn text(&self) -> String {
        match self {
            RawMessage::Text(text) => text.clone(),
            RawMessage::Detailed(detail) => match detail.module_name.as_deref() {
                Some(module) if !module.is_empty() => format!("{module}\n{}", detail.message),
                _ => detail.message.clone(),
            },
        }
    }
}

impl From<&str> for RawMessage {
    fn from(text: &str) -> Self {
        RawMessage::Text(text.to_string())
    }
}

impl From<String> for RawMessage {
    fn from(text: String) -> Self {
        RawMessage::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_webpack5_objects() {
        let stats = CompilationStats::from_json(
            r#"{
  "hash": "abc123",
  "version": "5.90.0",
  "time": 812,
  "builtAt": 1700000000000,
  "assets": [
    { "type": "asset", "name": "main-1a2b3c4d.js", "size": 2048, "emitted": true, "chunkNames": ["main"], "info": {} }
  ],
  "entrypoints": {
    "main": { "name": "main", "assets": [{ "name": "main-1a2b3c4d.js", "size": 2048 }] }
  },
  "errors": [
    { "moduleName": "./src/app.js", "message": "Module not found: Error: Can't resolve './foo'", "loc": "1:0-15" }
  ],
  "warnings": [],
  "errorsCount": 1
}"#,
        )
        .unwrap();

        assert_eq!(stats.assets[0].chunk_names, vec!["main"]);
        assert_eq!(stats.entrypoints["main"].assets[0].name(), "main-1a2b3c4d.js");
        assert_eq!(
            stats.errors[0].text(),
            "./src/app.js\nModule not found: Error: Can't resolve './foo'"
        );
        assert!(stats.has_errors());
        assert!(!stats.has_warnings());
    }

    #[test]
    fn parses_webpack4_strings() {
        let stats = CompilationStats::from_json(
            r#"{
  "entrypoints": { "main": { "assets": ["main.js", "main.css"] } },
  "errors": [],
  "warnings": ["./src/app.js\nUnused variable x"]
}"#,
        )
        .unwrap();

        assert_eq!(stats.entrypoints["main"].assets[1].name(), "main.css");
        assert_eq!(stats.warnings[0].text(), "./src/app.js\nUnused variable x");
    }

    #[test]
    fn child_messages_count_for_the_parent() {
        let stats = CompilationStats::default()
            .with_child(CompilationStats::default().with_warning("careful"));
        assert!(stats.has_warnings());
        assert!(!stats.has_errors());
    }

    #[test]
    fn rejects_non_object_output() {
        assert!(CompilationStats::from_json("webpack: command not found").is_err());
    }
}
