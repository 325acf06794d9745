//! Config validation.
//!
//! Schema checks (`validate`) never touch the filesystem; `validate_entries`
//! is the CLI-side check that every entry exists under the working directory.

use std::collections::HashSet;
use std::path::{Component, Path};

use crate::error::{ConfigError, Result};
use crate::project::ProjectConfig;
use crate::server::ServerConfig;

/// Validate a WordPress slug: lowercase ASCII letters, digits, `-` and `_`.
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(ConfigError::missing("slug", "Set the plugin or theme directory name"));
    }

    if let Some(c) = slug
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
    {
        return Err(ConfigError::invalid(
            "slug",
            format!("Invalid character '{c}' (use lowercase letters, digits, '-' or '_')"),
        ));
    }

    Ok(())
}

fn is_plain_relative(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn is_single_segment(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

impl ProjectConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            return Err(ConfigError::missing("appName", "Give the project a name"));
        }

        validate_slug(&self.slug)?;

        if !is_plain_relative(&self.output_path) {
            return Err(ConfigError::invalid(
                "outputPath",
                format!(
                    "'{}' must be a relative path inside the project",
                    self.output_path.display()
                ),
            ));
        }

        if self.files.is_empty() {
            return Err(ConfigError::missing(
                "files",
                "Add at least one file group with an entry",
            ));
        }

        let mut seen = HashSet::new();
        for (idx, file) in self.files.iter().enumerate() {
            if !is_single_segment(&file.name) {
                return Err(ConfigError::invalid(
                    format!("files[{idx}].name"),
                    "Name must be a single directory name",
                ));
            }
            if !seen.insert(file.name.as_str()) {
                return Err(ConfigError::invalid(
                    format!("files[{idx}].name"),
                    format!("Duplicate file group '{}'", file.name),
                ));
            }
            if file.entry.is_empty() {
                return Err(ConfigError::missing(
                    format!("files[{idx}].entry"),
                    format!("File group '{}' needs at least one entry", file.name),
                ));
            }
            if let Some((name, _)) = file.entry.iter().find(|(name, _)| name.is_empty()) {
                return Err(ConfigError::invalid(
                    format!("files[{idx}].entry"),
                    format!("Entry name '{name}' cannot be empty"),
                ));
            }
        }

        Ok(())
    }

    /// Check that every entry resolves to an existing file under `cwd`.
    pub fn validate_entries(&self, cwd: &Path) -> Result<()> {
        for file in &self.files {
            for path in file.entry.values() {
                let resolved = if path.is_absolute() {
                    path.clone()
                } else {
                    cwd.join(path)
                };
                if !resolved.is_file() {
                    return Err(ConfigError::EntryNotFound(resolved));
                }
            }
        }
        Ok(())
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ConfigError::invalid("port", "Port must be between 1 and 65535"));
        }

        if self.port == self.ui_port {
            return Err(ConfigError::invalid(
                "uiPort",
                format!("UI port {} collides with the server port", self.ui_port),
            ));
        }

        if !(self.proxy.starts_with("http://") || self.proxy.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "proxy",
                format!("'{}' must be an http:// or https:// URL", self.proxy),
            ));
        }

        if matches!(self.dist_public_path.as_deref(), Some(p) if p.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "distPublicPath",
                "Remove the field or give it a value",
            ));
        }

        Ok(())
    }
}
