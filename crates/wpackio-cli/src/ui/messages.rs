//! Status message functions for terminal output.

use owo_colors::Style;

use super::{colors_enabled, paint};

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", paint("✓", Style::new().green().bold(), colors_enabled()), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", paint("ℹ", Style::new().blue().bold(), colors_enabled()), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    let colors = colors_enabled();
    eprintln!(
        "{} {}",
        paint("⚠", Style::new().yellow().bold(), colors),
        paint(message, Style::new().yellow(), colors)
    );
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    let colors = colors_enabled();
    eprintln!(
        "{} {}",
        paint("✗", Style::new().red().bold(), colors),
        paint(message, Style::new().red(), colors)
    );
}
