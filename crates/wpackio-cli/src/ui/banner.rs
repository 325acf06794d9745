//! Boxed banners: the intro logo and the end-of-build message.

use console::measure_text_width;
use owo_colors::{OwoColorize, Style};
use wpackio_bundler::PackageManager;

use super::{colors_enabled, paint};

const LOGO: &str = r"                        _      _
__      ___ __   __ _  ___| | __ (_) ___
\ \ /\ / / '_ \ / _` |/ __| |/ / | |/ _ \
 \ V  V /| |_) | (_| | (__|   < _| | (_) |
  \_/\_/ | .__/ \__,_|\___|_|\_(_)_|\___/
         |_|";

const HOMEPAGE: &str = "https://wpack.io";

// Purple, red, orange.
const GRADIENT: [(u8, u8, u8); 3] = [(0x83, 0x3a, 0xb4), (0xfd, 0x1d, 0x1d), (0xfc, 0xb0, 0x45)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderColor {
    Cyan,
    Magenta,
}

/// Border and layout of a [`boxed`] message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxStyle {
    pub border: BorderColor,
    /// Blank lines above and below; three times as many spaces left and right.
    pub padding: usize,
    pub dim_border: bool,
    pub center: bool,
    pub colors: bool,
}

impl BoxStyle {
    /// Cyan, left-aligned: informational messages.
    pub fn info() -> Self {
        Self {
            border: BorderColor::Cyan,
            padding: 1,
            dim_border: false,
            center: false,
            colors: colors_enabled(),
        }
    }

    /// Dim magenta, centered: the logo.
    pub fn logo() -> Self {
        Self {
            border: BorderColor::Magenta,
            padding: 1,
            dim_border: true,
            center: true,
            colors: colors_enabled(),
        }
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    fn border_style(&self) -> Style {
        let style = match self.border {
            BorderColor::Cyan => Style::new().cyan(),
            BorderColor::Magenta => Style::new().magenta(),
        };
        if self.dim_border { style.dimmed() } else { style }
    }
}

/// Draw `text` inside a rounded box. Widths ignore ANSI escapes.
///
/// ```
/// use wpackio_cli::ui::{boxed, BoxStyle};
///
/// let text = boxed("hi", BoxStyle::info().with_colors(false));
/// assert_eq!(text.lines().next(), Some("╭────────╮"));
/// ```
pub fn boxed(text: &str, style: BoxStyle) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let content_width = lines.iter().map(|l| measure_text_width(l)).max().unwrap_or(0);
    let side = style.padding * 3;
    let inner = content_width + side * 2;
    let border = |s: &str| paint(s, style.border_style(), style.colors);

    let mut out = Vec::with_capacity(lines.len() + style.padding * 2 + 2);
    out.push(border(&format!("╭{}╮", "─".repeat(inner))));

    let blank = format!("{}{}{}", border("│"), " ".repeat(inner), border("│"));
    out.extend(std::iter::repeat_n(blank.clone(), style.padding));

    for line in &lines {
        let free = content_width - measure_text_width(line);
        let (left, right) = if style.center {
            (free / 2, free - free / 2)
        } else {
            (0, free)
        };
        out.push(format!(
            "{}{}{}{}{}",
            border("│"),
            " ".repeat(side + left),
            line,
            " ".repeat(right + side),
            border("│")
        ));
    }

    out.extend(std::iter::repeat_n(blank, style.padding));
    out.push(border(&format!("╰{}╯", "─".repeat(inner))));
    out.join("\n")
}

/// The ASCII logo, painted with a left-to-right gradient when colors are on.
pub fn logo() -> String {
    gradient(LOGO, colors_enabled())
}

/// `wpack.io` in the logo gradient.
pub fn logo_small() -> String {
    gradient("wpack.io", colors_enabled())
}

/// Boxed logo printed before a build.
pub fn intro() -> String {
    format!("\n{}\n", boxed(&logo(), BoxStyle::logo()))
}

/// Box printed after a successful production build.
pub fn end_build_info(local_url: &str, package_manager: PackageManager) -> String {
    let colors = colors_enabled();
    let bullet = paint("❯", Style::new().magenta(), colors);
    let link = paint(HOMEPAGE, Style::new().blue().underline(), colors);
    let small = logo_small();

    let message = format!(
        "{small} production build was {successful}.

All files were written to disk and you can visit your local server.

If your filesize is too large, remember you can use advanced
dynamic import and multiple entry-points easily with {small}.

    {bullet} Local Server: {url}.
    {bullet} Build again: {command}.
    {bullet} For more info, visit: {link}.",
        successful = paint("successful", Style::new().green(), colors),
        url = paint(local_url, Style::new().blue().underline(), colors),
        command = paint(&package_manager.run_script("build"), Style::new().yellow(), colors),
    );

    boxed(&message, BoxStyle::info())
}

fn gradient(text: &str, colors: bool) -> String {
    if !colors {
        return text.to_string();
    }
    let width = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    text.lines()
        .map(|line| {
            line.chars()
                .enumerate()
                .map(|(col, ch)| {
                    let (r, g, b) = gradient_at(col, width);
                    ch.truecolor(r, g, b).to_string()
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn gradient_at(col: usize, width: usize) -> (u8, u8, u8) {
    if width <= 1 {
        return GRADIENT[0];
    }
    let t = col as f64 / (width - 1) as f64 * (GRADIENT.len() - 1) as f64;
    let idx = (t.floor() as usize).min(GRADIENT.len() - 2);
    let frac = t - idx as f64;
    let (a, b) = (GRADIENT[idx], GRADIENT[idx + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
