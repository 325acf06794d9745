//! Textual summary of a compilation, in the shape webpack prints it.

use chrono::{DateTime, Local};
use owo_colors::OwoColorize;

use crate::stats::{AssetStats, CompilationStats};

/// What to include in [`render_summary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryOptions {
    pub assets: bool,
    pub entrypoints: bool,
    pub chunks: bool,
    pub hash: bool,
    pub version: bool,
    pub modules: bool,
    pub built_at: bool,
    pub timings: bool,
    pub colors: bool,
}

impl SummaryOptions {
    /// Assets and entrypoints only: the production build summary.
    pub fn concise() -> Self {
        Self {
            assets: true,
            entrypoints: true,
            ..Self::default()
        }
    }

    /// Everything on.
    pub fn verbose() -> Self {
        Self {
            assets: true,
            entrypoints: true,
            chunks: true,
            hash: true,
            version: true,
            modules: true,
            built_at: true,
            timings: true,
            colors: false,
        }
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }
}

/// Render the statistics as text.
pub fn render_summary(stats: &CompilationStats, options: &SummaryOptions) -> String {
    let mut out = Vec::new();
    render_into(stats, options, &mut out);
    out.join("\n")
}

fn render_into(stats: &CompilationStats, options: &SummaryOptions, out: &mut Vec<String>) {
    if options.hash {
        if let Some(hash) = &stats.hash {
            out.push(format!("Hash: {}", paint(hash, options.colors, Style::Bold)));
        }
    }
    if options.version {
        if let Some(version) = &stats.version {
            out.push(format!("Version: webpack {}", paint(version, options.colors, Style::Bold)));
        }
    }
    if options.timings {
        if let Some(time) = stats.time {
            out.push(format!(
                "Time: {}ms",
                paint(&time.to_string(), options.colors, Style::Bold)
            ));
        }
    }
    if options.built_at {
        if let Some(built_at) = stats.built_at.and_then(DateTime::from_timestamp_millis) {
            let local = built_at.with_timezone(&Local);
            out.push(format!(
                "Built at: {}",
                paint(
                    &local.format("%Y-%m-%d %H:%M:%S").to_string(),
                    options.colors,
                    Style::Bold
                )
            ));
        }
    }

    if options.assets && !stats.assets.is_empty() {
        out.extend(asset_table(&stats.assets, options));
    }

    if options.entrypoints {
        for (name, entry) in &stats.entrypoints {
            let assets = entry
                .assets
                .iter()
                .map(|asset| paint(asset.name(), options.colors, Style::Green))
                .collect::<Vec<_>>()
                .join(" ");
            out.push(format!(
                "Entrypoint {} = {}",
                paint(name, options.colors, Style::Bold),
                assets
            ));
        }
    }

    if options.modules {
        for module in &stats.modules {
            out.push(format!(
                "{} {}",
                module.name,
                paint(&format_size(module.size), options.colors, Style::Dim)
            ));
        }
    }

    for child in &stats.children {
        let mut nested = Vec::new();
        render_into(child, options, &mut nested);
        let name = child.name.as_deref().unwrap_or("");
        out.push(String::new());
        out.push(format!("Child {}:", paint(name, options.colors, Style::Bold)));
        out.extend(nested.into_iter().map(|line| {
            if line.is_empty() {
                line
            } else {
                format!("    {line}")
            }
        }));
    }
}

fn asset_table(assets: &[AssetStats], options: &SummaryOptions) -> Vec<String> {
    let mut header = vec!["Asset".to_string(), "Size".to_string()];
    if options.chunks {
        header.push("Chunks".to_string());
    }
    header.push(String::new());
    header.push("Chunk Names".to_string());

    let rows: Vec<Vec<String>> = assets
        .iter()
        .map(|asset| {
            let mut row = vec![asset.name.clone(), format_size(asset.size)];
            if options.chunks {
                row.push(
                    asset
                        .chunks
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", "),
                );
            }
            row.push(if asset.emitted {
                "[emitted]".to_string()
            } else {
                String::new()
            });
            row.push(asset.chunk_names.join(", "));
            row
        })
        .collect();

    let columns = header.len();
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    // Asset, Size and Chunks are right-aligned like webpack does.
    let right_aligned = if options.chunks { 3 } else { 2 };
    let format_row = |row: &[String], is_header: bool| -> String {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let padded = if col < right_aligned {
                    format!("{cell:>width$}", width = widths[col])
                } else {
                    format!("{cell:<width$}", width = widths[col])
                };
                let style = match (is_header, col) {
                    (true, _) => Style::Bold,
                    (false, 0) => Style::GreenBold,
                    (false, c) if c == columns - 2 => Style::Green,
                    _ => Style::Plain,
                };
                paint(&padded, options.colors, style)
            })
            .collect();
        cells.join("  ").trim_end().to_string()
    };

    std::iter::once(format_row(&header, true))
        .chain(rows.iter().map(|row| format_row(row, false)))
        .collect()
}

/// Size with binary units, three significant digits, trailing zeros dropped.
///
/// ```
/// use wpackio_bundler::summary::format_size;
///
/// assert_eq!(format_size(0), "0 bytes");
/// assert_eq!(format_size(500), "500 bytes");
/// assert_eq!(format_size(1536), "1.5 KiB");
/// assert_eq!(format_size(2 * 1024 * 1024), "2 MiB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["bytes", "KiB", "MiB", "GiB"];

    if bytes == 0 {
        return "0 bytes".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    let decimals = if size >= 100.0 {
        0
    } else if size >= 10.0 {
        1
    } else {
        2
    };
    let mut value = format!("{size:.decimals$}");
    if value.contains('.') {
        value = value.trim_end_matches('0').trim_end_matches('.').to_string();
    }

    format!("{value} {}", UNITS[unit_idx])
}

#[derive(Clone, Copy)]
enum Style {
    Plain,
    Bold,
    Dim,
    Green,
    GreenBold,
}

fn paint(text: &str, colors: bool, style: Style) -> String {
    if !colors {
        return text.to_string();
    }
    match style {
        Style::Plain => text.to_string(),
        Style::Bold => text.bold().to_string(),
        Style::Dim => text.dimmed().to_string(),
        Style::Green => text.green().to_string(),
        Style::GreenBold => text.green().bold().to_string(),
    }
}
