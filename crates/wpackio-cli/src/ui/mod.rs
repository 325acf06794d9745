//! Terminal UI: status messages, the build progress bar, boxed banners and
//! error reports.
//!
//! Everything writes to stderr except the build summary, which goes to
//! stdout so it can be piped.
//!
//! # Examples
//!
//! ```no_run
//! use wpackio_cli::ui;
//!
//! ui::init_colors(false);
//!
//! let spinner = ui::Spinner::new("Compiling");
//! spinner.set_message(&ui::progress_bar(42.0));
//! spinner.clear();
//!
//! ui::success("Compiled in 2.31s");
//! ```

mod banner;
mod format;
mod messages;
mod progress;
mod report;
mod spinner;

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::{OwoColorize, Style};

pub use banner::{BorderColor, BoxStyle, boxed, end_build_info, intro, logo, logo_small};
pub use format::format_duration;
pub use messages::{error, info, success, warning};
pub use progress::{progress_bar, render_progress_bar};
pub use report::{print_outcome, pretty_print_error, render_error_report};
pub use spinner::Spinner;

static COLORS: AtomicBool = AtomicBool::new(false);

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
}

/// Check if color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise colors follow whether
/// stderr is attended.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Decide once whether the UI paints. Call early in `main`.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    COLORS.store(enabled, Ordering::Relaxed);
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}

/// Whether [`init_colors`] turned colors on.
pub fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

pub(crate) fn paint(text: &str, style: Style, colors: bool) -> String {
    if colors {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn is_ci_with_ci_var() {
        unsafe { std::env::set_var("CI", "true") };
        assert!(is_ci());
        unsafe { std::env::remove_var("CI") };
    }

    #[test]
    #[serial]
    fn no_color_overrides_force_color() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(!should_use_color());
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::remove_var("FORCE_COLOR");
        }
    }

    #[test]
    #[serial]
    fn force_color_enables_colors() {
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::set_var("FORCE_COLOR", "1");
        }
        init_colors(false);
        assert!(colors_enabled());
        init_colors(true);
        assert!(!colors_enabled());
        unsafe { std::env::remove_var("FORCE_COLOR") };
    }

    #[test]
    fn paint_is_plain_without_colors() {
        assert_eq!(paint("x", Style::new().red(), false), "x");
        assert!(paint("x", Style::new().red(), true).contains('\u{1b}'));
    }
}
