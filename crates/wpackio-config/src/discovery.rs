//! File-based config discovery for CLI use.
//!
//! Looks for `wpackio.project.{toml,json}` (falling back to the `wpackio` field
//! of `package.json`) and `wpackio.server.{toml,json}` in the context
//! directory, then layers `WPACKIO_PROJECT_*` / `WPACKIO_SERVER_*` environment
//! variables on top. Priority: environment > file > defaults.

use std::fs;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    value::{Uncased, UncasedStr},
    Figment,
};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::project::ProjectConfig;
use crate::server::ServerConfig;

pub const PROJECT_FILES: &[&str] = &["wpackio.project.toml", "wpackio.project.json"];
pub const SERVER_FILES: &[&str] = &["wpackio.server.toml", "wpackio.server.json"];

const PACKAGE_JSON_FIELD: &str = "wpackio";

/// File-based configuration discovery rooted at the project context.
///
/// # Example
///
/// ```no_run
/// use wpackio_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new("/srv/wp-content/plugins/my-plugin");
/// let project = discovery.load_project().unwrap();
/// let server = discovery.load_server().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the project config file.
    ///
    /// Searches in this order:
    /// 1. `wpackio.project.toml`
    /// 2. `wpackio.project.json`
    /// 3. `package.json` with a non-null `wpackio` field
    pub fn find_project(&self) -> Option<PathBuf> {
        if let Some(path) = self.first_existing(PROJECT_FILES) {
            return Some(path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        parsed
            .get(PACKAGE_JSON_FIELD)
            .filter(|v| !v.is_null())
            .map(|_| pkg_path)
    }

    /// Find the server config file, if any.
    pub fn find_server(&self) -> Option<PathBuf> {
        self.first_existing(SERVER_FILES)
    }

    /// Load the project config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no project config exists.
    pub fn load_project(&self) -> Result<ProjectConfig> {
        let path = self.find_project().ok_or_else(|| ConfigError::NotFound {
            kind: "project",
            root: self.root.clone(),
        })?;
        tracing::debug!(path = %path.display(), "loading project config");

        let figment = Figment::new()
            .merge(file_provider(&path)?)
            .merge(env_provider("WPACKIO_PROJECT_"));

        Ok(figment.extract()?)
    }

    /// Load the server config. A missing file means defaults.
    pub fn load_server(&self) -> Result<ServerConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(ServerConfig::default()));

        match self.find_server() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading server config");
                figment = figment.merge(file_provider(&path)?);
            }
            None => tracing::debug!("no server config found, using defaults"),
        }

        Ok(figment.merge(env_provider("WPACKIO_SERVER_")).extract()?)
    }

    fn first_existing(&self, names: &[&str]) -> Option<PathBuf> {
        names
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file())
    }
}

fn file_provider(path: &Path) -> Result<Figment> {
    if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
        let content = fs::read_to_string(path)?;
        let parsed: Value = serde_json::from_str(&content).map_err(|e| {
            ConfigError::invalid("package.json", format!("Invalid JSON: {e}"))
        })?;
        let section = parsed
            .get(PACKAGE_JSON_FIELD)
            .cloned()
            .unwrap_or(Value::Null);
        return Ok(Figment::from(Json::string(&section.to_string())));
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Ok(Figment::from(Toml::file_exact(path))),
        Some("json") => Ok(Figment::from(Json::file_exact(path))),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn env_provider(prefix: &str) -> Env {
    Env::prefixed(prefix).map(camel_key)
}

/// `ui_port` -> `uiPort`, so env keys line up with the camelCase file format.
fn camel_key(key: &UncasedStr) -> Uncased<'_> {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.as_str().chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    Uncased::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn camel_key_conversion() {
        assert_eq!(camel_key(UncasedStr::new("ui_port")).as_str(), "uiPort");
        assert_eq!(camel_key(UncasedStr::new("PORT")).as_str(), "port");
        assert_eq!(
            camel_key(UncasedStr::new("DIST_PUBLIC_PATH")).as_str(),
            "distPublicPath"
        );
    }

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path());
        assert!(discovery.find_project().is_none());
        assert!(discovery.find_server().is_none());
    }

    #[test]
    fn package_json_without_field_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "x" }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find_project().is_none());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let result = file_provider(Path::new("wpackio.project.yaml"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
