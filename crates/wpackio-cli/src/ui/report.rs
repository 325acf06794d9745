//! Printing build outcomes and error reports.

use console::measure_text_width;
use owo_colors::Style;
use wpackio_bundler::BuildOutcome;

use super::{colors_enabled, paint};

const FAILED_HEADLINE: &str = "Could not create production build";
const WARN_HEADLINE: &str = "Compiled with warnings";

/// Error report with `=` rules around the headline and every line of
/// `message` behind a dim pointer.
///
/// ```
/// use wpackio_cli::ui::render_error_report;
///
/// let text = render_error_report("Build failed", "one\ntwo", false);
/// assert!(text.starts_with("==============\n✖ Build failed\n=============="));
/// assert!(text.ends_with("  ❯  one\n  ❯  two"));
/// ```
pub fn render_error_report(headline: &str, message: &str, colors: bool) -> String {
    let rule = paint(
        &"=".repeat(measure_text_width(headline) + 2),
        Style::new().dimmed(),
        colors,
    );
    let prefix = format!("  {}  ", paint("❯", Style::new().red().dimmed(), colors));
    let banner = paint(
        " please review the following errors ",
        Style::new().on_red().black(),
        colors,
    );

    let mut out = vec![
        rule.clone(),
        format!("{} {headline}", paint("✖", Style::new().red(), colors)),
        rule,
        String::new(),
        banner,
        String::new(),
    ];
    out.extend(message.lines().map(|line| format!("{prefix}{line}")));
    out.join("\n")
}

/// Print an error report to stderr.
pub fn pretty_print_error(headline: &str, message: &str) {
    eprintln!("{}\n", render_error_report(headline, message, colors_enabled()));
}

/// Print a build outcome.
///
/// The success summary goes to stdout; warnings and errors to stderr.
pub fn print_outcome(outcome: &BuildOutcome) {
    match outcome {
        BuildOutcome::Success { log } => println!("{log}"),
        BuildOutcome::Warn { log } => {
            super::warning(WARN_HEADLINE);
            eprintln!();
            for line in log.lines() {
                eprintln!("  {line}");
            }
            eprintln!();
        }
        BuildOutcome::Failed { errors } => {
            pretty_print_error(FAILED_HEADLINE, &errors.join("\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_report_layout() {
        let text = render_error_report("Oops", "Module not found: './foo'", false);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "======");
        assert_eq!(lines[1], "✖ Oops");
        assert_eq!(lines[2], "======");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], " please review the following errors ");
        assert_eq!(lines[6], "  ❯  Module not found: './foo'");
    }

    #[test]
    fn every_message_line_is_prefixed() {
        let text = render_error_report("x", "a\n\nb", false);
        assert!(text.ends_with("  ❯  a\n  ❯  \n  ❯  b"));
    }

    #[test]
    fn colored_report_has_escapes() {
        assert!(render_error_report("x", "a", true).contains('\u{1b}'));
    }

    #[test]
    fn print_outcome_handles_every_variant() {
        print_outcome(&BuildOutcome::Success { log: "summary".into() });
        print_outcome(&BuildOutcome::Warn { log: "w".into() });
        print_outcome(&BuildOutcome::Failed {
            errors: vec!["e".into()],
        });
    }
}
