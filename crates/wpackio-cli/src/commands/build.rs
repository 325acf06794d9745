//! `wpackio build`: one production build of the project in the context
//! directory.

use std::sync::Arc;
use std::time::Instant;

use wpackio_bundler::{Build, BuildOutcome, PackageManager, ProgressEvent, ProgressHandler, WebpackEngine};
use wpackio_config::ConfigDiscovery;

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui::{self, Spinner};

/// Execute the build command.
///
/// # Build Process
///
/// 1. Resolve the context directory
/// 2. Load and validate project and server configuration
/// 3. Detect the package manager
/// 4. Run webpack behind a spinner that shows its progress
/// 5. Report the outcome
///
/// Warnings still exit successfully. Compilation errors are printed in full
/// and returned as [`CliError::Build`](crate::error::CliError::Build).
///
/// # Errors
///
/// Returns errors for an invalid context, invalid configuration, a failed
/// compilation, or an engine that could not produce statistics.
pub async fn execute(args: BuildArgs, quiet: bool) -> Result<()> {
    let start_time = Instant::now();

    let cwd = utils::resolve_context(args.context.as_deref())?;
    let discovery = ConfigDiscovery::new(&cwd);

    let project = discovery.load_project()?;
    project.validate()?;
    project.validate_entries(&cwd)?;
    let server = discovery.load_server()?;
    server.validate()?;

    let package_manager = PackageManager::detect(&cwd);
    tracing::debug!(
        app = %project.app_name,
        package_manager = %package_manager,
        context = %cwd.display(),
        "configuration loaded"
    );

    if !quiet {
        eprintln!("{}", ui::intro());
        ui::info(&build_headline(&project.app_name, package_manager));
    }

    let spinner = if !quiet && Spinner::should_show() {
        Spinner::new("Creating production build")
    } else {
        Spinner::hidden()
    };

    let mut engine =
        WebpackEngine::new(package_manager).with_progress(progress_handler(spinner.clone()));
    if let Some(timeout) = args.timeout {
        engine = engine.with_timeout(timeout);
    }

    let build = Build::new(project, server, cwd, Arc::new(engine)).with_colors(ui::colors_enabled());
    let outcome = match build.build().await {
        Ok(outcome) => outcome,
        Err(err) => {
            spinner.clear();
            if !quiet {
                ui::error("Build did not finish");
            }
            return Err(err.into());
        }
    };
    spinner.clear();

    let elapsed = ui::format_duration(start_time.elapsed());
    match &outcome {
        BuildOutcome::Success { .. } => {
            if !quiet {
                ui::success(&format!("Compiled in {elapsed}"));
                ui::print_outcome(&outcome);
                eprintln!("\n{}", ui::end_build_info(build.server().local_url(), package_manager));
            }
        }
        BuildOutcome::Warn { .. } => {
            if !quiet {
                ui::warning(&format!("Compiled with warnings in {elapsed}"));
                ui::print_outcome(&outcome);
            }
        }
        BuildOutcome::Failed { .. } => {
            ui::error(&format!("Failed to compile in {elapsed}"));
            ui::print_outcome(&outcome);
        }
    }

    outcome.into_result()?;
    Ok(())
}

fn build_headline(app_name: &str, package_manager: PackageManager) -> String {
    format!("Creating production build of {app_name} with {package_manager}")
}

fn progress_handler(spinner: Spinner) -> ProgressHandler {
    Arc::new(move |event: ProgressEvent| {
        spinner.set_message(&format!("{} {}", ui::progress_bar(event.percent), event.message));
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_updates_the_spinner() {
        let spinner = Spinner::hidden();
        let handler = progress_handler(spinner.clone());
        handler(ProgressEvent::new(50.0, "building"));
        assert!(spinner.message().contains("50%"));
        assert!(spinner.message().ends_with("building"));
    }

    #[test]
    fn headline_names_app_and_package_manager() {
        assert_eq!(
            build_headline("Demo Plugin", PackageManager::Yarn),
            "Creating production build of Demo Plugin with yarn"
        );
    }
}
