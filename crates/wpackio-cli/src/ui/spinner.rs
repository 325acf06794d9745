//! Spinner shown while webpack runs.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner for a task without known duration.
///
/// Cloning is cheap and every clone drives the same spinner, so one can be
/// moved into a progress handler while the command keeps another.
///
/// ```no_run
/// use wpackio_cli::ui::Spinner;
///
/// let spinner = Spinner::new("Compiling");
/// spinner.set_message("[==========----------] 50% building");
/// spinner.clear();
/// ```
#[derive(Clone)]
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Create and start a spinner on stderr.
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["◐", "◓", "◑", "◒", "✓"]);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// A spinner that draws nothing, for quiet mode and non-interactive output.
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    /// Whether a visible spinner makes sense here.
    pub fn should_show() -> bool {
        console::user_attended_stderr() && !super::is_ci()
    }

    pub fn set_message(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    /// Remove the spinner line so the final status prints in its place.
    pub fn clear(&self) {
        self.pb.finish_and_clear();
    }

    pub fn message(&self) -> String {
        self.pb.message()
    }
}
