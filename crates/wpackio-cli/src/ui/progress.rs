//! Text progress bar for webpack's progress reports.

use owo_colors::{AnsiColors, Style};

use super::{colors_enabled, paint};

const CELLS: usize = 20;

/// `[=====---------------] 25%`, painted when colors are enabled.
pub fn progress_bar(done: f64) -> String {
    render_progress_bar(done, colors_enabled())
}

/// Render the bar with explicit color control.
///
/// Non-finite input counts as 0 and the percentage is clamped to 0..=100.
/// Done cells fade from red to green as the bar fills.
///
/// ```
/// use wpackio_cli::ui::render_progress_bar;
///
/// assert_eq!(render_progress_bar(50.0, false), "[==========----------] 50%");
/// assert_eq!(render_progress_bar(f64::NAN, false), "[--------------------] 0%");
/// ```
pub fn render_progress_bar(done: f64, colors: bool) -> String {
    // `clamp` keeps -0.0, which would print as `-0%`.
    let done = if done.is_finite() && done > 0.0 { done.min(100.0) } else { 0.0 };
    let filled = ((done / 100.0) * CELLS as f64).floor() as usize;

    let stops = gradient_stops(filled);
    let bar: String = (0..filled)
        .map(|cell| {
            let color = stops[cell * stops.len() / filled];
            paint("=", Style::new().color(color), colors)
        })
        .collect();
    let rest = paint(&"-".repeat(CELLS - filled), Style::new().bright_black(), colors);
    let percent = paint(&done.to_string(), Style::new().yellow(), colors);

    format!("[{bar}{rest}] {percent}%")
}

fn gradient_stops(filled: usize) -> &'static [AnsiColors] {
    use AnsiColors::{Green, Red, Yellow};
    match filled {
        0..5 => &[Red],
        5..10 => &[Red, Red, Yellow],
        10..15 => &[Red, Red, Yellow, Yellow],
        _ => &[Red, Red, Yellow, Yellow, Green],
    }
}
