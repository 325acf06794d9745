//! Project configuration: what gets bundled and where it ends up.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Whether the project is a WordPress plugin or a theme.
///
/// Decides the `wp-content/<plugins|themes>` segment of the public path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    #[default]
    Plugin,
    Theme,
}

impl ProjectKind {
    /// Directory under `wp-content` that holds projects of this kind.
    pub fn content_dir(self) -> &'static str {
        match self {
            ProjectKind::Plugin => "plugins",
            ProjectKind::Theme => "themes",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectKind::Plugin => f.write_str("plugin"),
            ProjectKind::Theme => f.write_str("theme"),
        }
    }
}

/// One group of entry points compiled together.
///
/// Each group becomes its own compilation and its own output directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    pub name: String,

    /// Entry name -> source path, relative to the working directory.
    pub entry: IndexMap<String, PathBuf>,

    /// Per-group override of [`ProjectConfig::optimize_split_chunks`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimize_split_chunks: Option<bool>,
}

/// Immutable settings describing entry points and output targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    pub app_name: String,

    #[serde(default, rename = "type")]
    pub kind: ProjectKind,

    pub slug: String,

    #[serde(default)]
    pub files: Vec<FileConfig>,

    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    #[serde(default)]
    pub has_react: bool,

    #[serde(default)]
    pub has_sass: bool,

    #[serde(default)]
    pub has_flow: bool,

    /// Module name -> global variable provided by WordPress at runtime.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub externals: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub alias: IndexMap<String, PathBuf>,

    #[serde(default = "default_true")]
    pub error_overlay: bool,

    #[serde(default = "default_true")]
    pub optimize_split_chunks: bool,

    /// Comment prepended to every emitted asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

impl ProjectConfig {
    /// Minimal config for the given app name and slug, everything else defaulted.
    pub fn new(app_name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            kind: ProjectKind::default(),
            slug: slug.into(),
            files: Vec::new(),
            output_path: default_output_path(),
            has_react: false,
            has_sass: false,
            has_flow: false,
            externals: IndexMap::new(),
            alias: IndexMap::new(),
            error_overlay: true,
            optimize_split_chunks: true,
            banner: None,
        }
    }

    /// Add a file group.
    pub fn with_file(mut self, file: FileConfig) -> Self {
        self.files.push(file);
        self
    }

    /// Whether split chunks are enabled for the given group.
    pub fn split_chunks_for(&self, file: &FileConfig) -> bool {
        file.optimize_split_chunks
            .unwrap_or(self.optimize_split_chunks)
    }

    /// Generate example `wpackio.project.json` content.
    pub fn example_json() -> String {
        let mut entry = IndexMap::new();
        entry.insert("main".to_string(), PathBuf::from("src/app/index.js"));
        entry.insert("mobile".to_string(), PathBuf::from("src/app/mobile.js"));

        let mut config = Self::new("wpackio-plugin", "wpackio-plugin").with_file(FileConfig {
            name: "app".to_string(),
            entry,
            optimize_split_chunks: None,
        });
        config.has_sass = true;
        config
            .externals
            .insert("jquery".to_string(), "jQuery".to_string());

        serde_json::to_string_pretty(&config).unwrap_or_default()
    }
}

impl FileConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry: IndexMap::new(),
            optimize_split_chunks: None,
        }
    }

    pub fn with_entry(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.entry.insert(name.into(), path.into());
        self
    }

    /// Whether any entry is a TypeScript source.
    pub fn has_typescript(&self) -> bool {
        self.entry.values().any(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("ts" | "tsx")
            )
        })
    }
}

pub(crate) fn default_output_path() -> PathBuf {
    PathBuf::from("dist")
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProjectKind::Theme).unwrap(),
            "\"theme\""
        );
        assert_eq!(ProjectKind::Plugin.content_dir(), "plugins");
        assert_eq!(ProjectKind::Theme.content_dir(), "themes");
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let config: ProjectConfig = serde_json::from_str(
            r#"{
                "appName": "My Plugin",
                "slug": "my-plugin",
                "type": "theme",
                "files": [{ "name": "app", "entry": { "main": "src/main.js" } }],
                "hasReact": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.kind, ProjectKind::Theme);
        assert_eq!(config.output_path, PathBuf::from("dist"));
        assert!(config.has_react);
        assert!(config.optimize_split_chunks);
        assert!(config.error_overlay);
        assert_eq!(config.files[0].entry["main"], PathBuf::from("src/main.js"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<ProjectConfig, _> =
            serde_json::from_str(r#"{ "appName": "a", "slug": "a", "hasVue": true }"#);
        assert!(result.is_err());
    }

    #[test]
    fn entry_order_is_preserved() {
        let file = FileConfig::new("app")
            .with_entry("zeta", "src/z.js")
            .with_entry("alpha", "src/a.js");
        let names: Vec<_> = file.entry.keys().cloned().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn split_chunks_override() {
        let config = ProjectConfig::new("a", "a");
        let mut file = FileConfig::new("app");
        assert!(config.split_chunks_for(&file));
        file.optimize_split_chunks = Some(false);
        assert!(!config.split_chunks_for(&file));
    }

    #[test]
    fn detects_typescript_entries() {
        assert!(FileConfig::new("app").with_entry("main", "src/main.tsx").has_typescript());
        assert!(!FileConfig::new("app").with_entry("main", "src/main.js").has_typescript());
    }

    #[test]
    fn example_json_round_trips() {
        let example = ProjectConfig::example_json();
        let config: ProjectConfig = serde_json::from_str(&example).unwrap();
        assert_eq!(config.slug, "wpackio-plugin");
        assert_eq!(config.files.len(), 1);
        assert_eq!(config.externals["jquery"], "jQuery");
    }
}
