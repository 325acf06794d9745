//! Message normalizer.
//!
//! Turns the engine's raw errors and warnings into short, readable messages:
//! loader headers and internal stack frames are dropped, parser failures are
//! rewritten as `Syntax error: ...`, and verbose resolver messages are cut
//! down to the file and the reason. When any error is a syntax error only the
//! syntax errors are kept, since the rest are usually follow-on noise.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::stats::{CompilationStats, RawMessage};

const SYNTAX_ERROR_LABEL: &str = "Syntax error:";

static LOADER_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Module [A-z ]+\(from").expect("valid regex"));

static PARSING_ERROR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Line (\d+):(?:(\d+):)?\s*Parsing error: (.+)$").expect("valid regex")
});

static CSS_SYNTAX_ERROR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"SyntaxError\s+\((\d+):(\d+)\)\s*(.+?)\n").expect("valid regex")
});

static EXPORT_NOT_FOUND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^.*export '([^']+)' was not found in '([^']+)'.*$").expect("valid regex")
});

static DEFAULT_EXPORT_NOT_FOUND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^.*export 'default' \(imported as '([^']+)'\) was not found in '([^']+)'.*$")
        .expect("valid regex")
});

static NAMED_EXPORT_NOT_FOUND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^.*export '([^']+)' \(imported as '([^']+)'\) was not found in '([^']+)'.*$")
        .expect("valid regex")
});

static FILE_LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*) \d+:\d+-\d+$").expect("valid regex"));

static MISSING_SASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Cannot find module.+sass").expect("valid regex"));

static STACK_FRAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*at\s.*:\d+:\d+[\s)]*$").expect("valid regex"));

static ANONYMOUS_FRAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*at\s<anonymous>\s*$").expect("valid regex"));

/// Normalized errors and warnings, in reported order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedMessages {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl FormattedMessages {
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self { errors, warnings }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Normalize all errors and warnings of a (possibly multi-compiler) run.
///
/// A multi-compiler root already lists every child's messages (webpack 4
/// prefixes them with `(name) `), so each list is taken from the root when it
/// is non-empty and from the children only when the root has none.
pub fn format_messages(stats: &CompilationStats) -> FormattedMessages {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    collect(stats, |s| &s.errors, &mut errors);
    collect(stats, |s| &s.warnings, &mut warnings);

    if errors.iter().any(|e| is_likely_syntax_error(e)) {
        errors.retain(|e| is_likely_syntax_error(e));
    }

    FormattedMessages { errors, warnings }
}

fn collect<F>(stats: &CompilationStats, list: F, out: &mut Vec<String>)
where
    F: Fn(&CompilationStats) -> &Vec<RawMessage> + Copy,
{
    let own = list(stats);
    if !own.is_empty() {
        out.extend(own.iter().map(format_message));
        return;
    }
    for child in &stats.children {
        collect(child, list, out);
    }
}

pub fn is_likely_syntax_error(message: &str) -> bool {
    message.contains(SYNTAX_ERROR_LABEL)
}

/// Normalize a single raw message.
pub fn format_message(message: &RawMessage) -> String {
    let text = message.text();

    // Loader headers, then parser errors line by line.
    let lines: Vec<String> = text
        .split('\n')
        .filter(|line| !LOADER_HEADER.is_match(line))
        .map(|line| match PARSING_ERROR.captures(line) {
            Some(caps) => {
                let location = match caps.get(2) {
                    Some(col) => format!("{}:{}", &caps[1], col.as_str()),
                    None => caps[1].to_string(),
                };
                format!("{SYNTAX_ERROR_LABEL} {} ({location})", &caps[3])
            }
            None => line.to_string(),
        })
        .collect();

    let mut message = lines.join("\n");
    message = CSS_SYNTAX_ERROR
        .replace_all(&message, format!("{SYNTAX_ERROR_LABEL} $3 ($1:$2)\n").as_str())
        .into_owned();
    message = EXPORT_NOT_FOUND
        .replace_all(&message, "Attempted import error: '$1' is not exported from '$2'.")
        .into_owned();
    message = DEFAULT_EXPORT_NOT_FOUND
        .replace_all(
            &message,
            "Attempted import error: '$2' does not contain a default export (imported as '$1').",
        )
        .into_owned();
    message = NAMED_EXPORT_NOT_FOUND
        .replace_all(
            &message,
            "Attempted import error: '$1' is not exported from '$3' (imported as '$2').",
        )
        .into_owned();

    let mut lines: Vec<String> = message.split('\n').map(str::to_string).collect();

    if lines.len() > 2 && lines[1].trim().is_empty() {
        lines.remove(1);
    }

    if let Some(first) = lines.first_mut() {
        *first = FILE_LOCATION.replace(first, "$1").into_owned();
    }

    if lines.len() > 1 && lines[1].starts_with("Module not found: ") {
        let reason = lines[1]
            .replacen("Error: ", "", 1)
            .replacen("Module not found: Cannot find file:", "Cannot find file:", 1);
        lines.truncate(1);
        lines.push(reason);
    }

    if lines.len() > 1 && MISSING_SASS.is_match(&lines[1]) {
        lines[1] = "To import Sass files, you first need to install sass.\n\
                    Run `npm install sass` or `yarn add sass` inside your workspace."
            .to_string();
    }

    let message = lines.join("\n");

    // Internal stack frames, except the ones webpack maps back to user code.
    let lines: Vec<&str> = message
        .split('\n')
        .filter(|line| !(STACK_FRAME.is_match(line) && !line.contains("webpack:")))
        .filter(|line| !ANONYMOUS_FRAME.is_match(line))
        .collect();

    let mut deduped: Vec<&str> = Vec::with_capacity(lines.len());
    for (idx, line) in lines.iter().enumerate() {
        if idx == 0 || !line.trim().is_empty() || line.trim() != lines[idx - 1].trim() {
            deduped.push(*line);
        }
    }

    deduped.join("\n").trim().to_string()
}
