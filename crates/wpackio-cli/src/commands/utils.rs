//! Helpers shared by commands.

use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Resolve the project context directory.
///
/// `--context` wins when given; relative values are resolved from the
/// current working directory. Without it the current working directory is
/// the context.
///
/// # Errors
///
/// Returns [`CliError::InvalidArgument`] if the directory does not exist or
/// is not a directory.
pub fn resolve_context(context: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to get current directory: {e}"),
        ))
    })?;

    let Some(context) = context else {
        return Ok(cwd);
    };

    let absolute = if context.is_absolute() {
        context.to_path_buf()
    } else {
        cwd.join(context)
    };

    if !absolute.exists() {
        return Err(CliError::InvalidArgument(format!(
            "Context directory does not exist: {}",
            absolute.display()
        )));
    }
    if !absolute.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "Context is not a directory: {}",
            absolute.display()
        )));
    }

    tracing::debug!(context = %absolute.display(), "resolved context from --context");
    Ok(absolute)
}
