//! Error types for configuration loading, validation and composition.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Discovery errors
    #[error("{kind} config not found in {}", .root.display())]
    NotFound { kind: &'static str, root: PathBuf },

    #[error("unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    // Parsing and validation errors
    #[error("invalid value for '{field}'{}", .hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    #[error("missing required field '{field}': {hint}")]
    MissingField { field: String, hint: String },

    // Filesystem validation errors
    #[error("entry path not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    // Composition errors
    #[error("working directory must be absolute: {}", .0.display())]
    RelativeContext(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn missing(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            hint: hint.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        let field = err
            .path
            .last()
            .cloned()
            .unwrap_or_else(|| "configuration".to_string());
        Self::InvalidValue {
            field,
            hint: Some(err.kind.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_includes_hint() {
        let err = ConfigError::invalid("slug", "must not contain spaces");
        assert_eq!(
            err.to_string(),
            "invalid value for 'slug': must not contain spaces"
        );
    }

    #[test]
    fn invalid_value_without_hint() {
        let err = ConfigError::InvalidValue {
            field: "port".into(),
            hint: None,
        };
        assert_eq!(err.to_string(), "invalid value for 'port'");
    }

    #[test]
    fn not_found_names_kind_and_root() {
        let err = ConfigError::NotFound {
            kind: "project",
            root: PathBuf::from("/srv/plugin"),
        };
        let msg = err.to_string();
        assert!(msg.contains("project config not found"));
        assert!(msg.contains("/srv/plugin"));
    }
}
