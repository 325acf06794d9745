//! Conversion of CLI errors into miette reports.

use miette::Report;
use wpackio_bundler::BuildError;

use crate::error::CliError;

const CONFIG_HELP: &str =
    "Check wpackio.project.{toml,json} and wpackio.server.{toml,json} in the context directory";

/// Convert a [`CliError`] into the report printed on exit.
///
/// Engine failures keep their own diagnostic code and help. Compilation
/// errors were already printed in full by the build command, so the report
/// only summarizes them.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => build_error_to_miette(e),
        CliError::Config(e) => miette::miette!(help = CONFIG_HELP, "Configuration error: {}", e),
        other => miette::miette!("{}", other),
    }
}

fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::Config(e) => miette::miette!(help = CONFIG_HELP, "Configuration error: {}", e),
        BuildError::Compilation { errors } => miette::miette!(
            code = "wpackio::build::compilation",
            "Production build failed with {} error{}",
            errors.len(),
            if errors.len() == 1 { "" } else { "s" }
        ),
        engine @ BuildError::Engine(_) => Report::new(engine),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wpackio_bundler::EngineError;
    use wpackio_config::ConfigError;

    #[test]
    fn engine_errors_keep_code() {
        let report = cli_error_to_miette(CliError::Build(EngineError::timeout(30).into()));
        let code = report.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("wpackio::engine::timeout"));
    }

    #[test]
    fn compilation_errors_are_summarized() {
        let report = cli_error_to_miette(CliError::Build(BuildError::Compilation {
            errors: vec!["a".into(), "b".into()],
        }));
        assert_eq!(report.to_string(), "Production build failed with 2 errors");
    }

    #[test]
    fn config_errors_carry_help() {
        let report = cli_error_to_miette(ConfigError::missing("files", "x").into());
        assert!(report.help().is_some());
        assert!(report.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn other_errors_use_display() {
        let report = cli_error_to_miette(CliError::InvalidArgument("--context".into()));
        assert_eq!(report.to_string(), "Invalid argument: --context");
    }
}
