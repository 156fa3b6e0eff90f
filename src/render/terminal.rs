//! ANSI terminal renderer.
//!
//! Tokens are printed inline with xterm 256-color foregrounds, so every palette
//! slot stays distinct on terminals without truecolor support. Comparisons lay
//! the results out as bordered columns next to each other. Whether escape codes
//! are emitted at all is decided by `colored` (`--color`, `NO_COLOR`, TTY check).

use crossterm::style::{Color, Stylize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::palette::{PALETTE, color};
use super::{RenderOptions, Renderer};
use crate::core::Result;
use crate::tokens::{TokenizationResult, format_token_count};

const HEADER: u8 = 86;
const MUTED: u8 = 240;
const TOKEN_ID: u8 = 243;
const BOUNDARY: u8 = 238;

/// Inner width of one comparison column.
pub const COLUMN_WIDTH: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Plain,
    Bold,
    Italic,
}

fn paint(text: &str, ansi: u8, style: Style) -> String {
    if !colored::control::SHOULD_COLORIZE.should_colorize() {
        return text.to_string();
    }
    let styled = text.with(Color::AnsiValue(ansi));
    match style {
        Style::Plain => styled.to_string(),
        Style::Bold => styled.bold().to_string(),
        Style::Italic => styled.italic().to_string(),
    }
}

/// A run of identically styled text.
struct Segment {
    text: String,
    ansi: u8,
    style: Style,
}

impl Segment {
    fn new(text: impl Into<String>, ansi: u8, style: Style) -> Self {
        Self {
            text: text.into(),
            ansi,
            style,
        }
    }

    fn paint(&self, text: &str) -> String {
        paint(text, self.ansi, self.style)
    }
}

/// One laid-out line and its width in terminal columns.
#[derive(Default)]
struct Line {
    width: usize,
    rendered: String,
}

/// Renders to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer {
    options: RenderOptions,
}

impl TerminalRenderer {
    /// Create a renderer with the given decorations.
    #[must_use]
    pub const fn new(options: RenderOptions) -> Self {
        Self {
            options,
        }
    }

    fn token_segments(&self, result: &TokenizationResult) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(result.tokens.len() * 2);
        let last = result.tokens.len().saturating_sub(1);

        for (i, token) in result.tokens.iter().enumerate() {
            segments.push(Segment::new(token.text.as_str(), color(i).ansi, Style::Bold));
            if let Some(id) = self.options.visible_id(token) {
                segments.push(Segment::new(format!("[{id}]"), TOKEN_ID, Style::Plain));
            }
            if self.options.show_boundaries && i < last {
                segments.push(Segment::new("|", BOUNDARY, Style::Plain));
            }
        }

        segments
    }

    fn column(&self, result: &TokenizationResult) -> Vec<String> {
        let title = truncate_to_width(&result.model_label, COLUMN_WIDTH);
        let mut lines = vec![
            Line {
                width: title.width(),
                rendered: paint(&title, HEADER, Style::Bold),
            },
            Line::default(),
        ];

        let stats = format!("Tokens: {}", result.total_count);
        lines.push(Line {
            width: stats.width(),
            rendered: paint(&stats, MUTED, Style::Italic),
        });
        lines.push(Line::default());
        lines.extend(layout(&self.token_segments(result), COLUMN_WIDTH));

        frame(&lines, COLUMN_WIDTH)
    }
}

impl Renderer for TerminalRenderer {
    fn render_single(&self, result: &TokenizationResult) -> Result<String> {
        let mut out = header_box(&result.model_label);
        out.push('\n');

        let mut stats = format!("Total tokens: {}", result.total_count);
        if result.total_count >= 1_000 {
            stats.push_str(&format!(" ({})", format_token_count(result.total_count)));
        }
        out.push_str(&paint(&stats, MUTED, Style::Italic));
        out.push_str("\n\n");

        for segment in self.token_segments(result) {
            out.push_str(&segment.paint(&segment.text));
        }
        out.push('\n');

        Ok(out)
    }

    fn render_comparison(&self, results: &[TokenizationResult]) -> Result<String> {
        match results {
            [] => return Ok(String::new()),
            [single] => return self.render_single(single),
            _ => {}
        }

        let columns: Vec<Vec<String>> = results.iter().map(|result| self.column(result)).collect();
        let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
        let blank = " ".repeat(COLUMN_WIDTH + 4);

        let mut out = header_box("Token Comparison");
        out.push('\n');
        for row in 0..rows {
            let cells: Vec<&str> = columns
                .iter()
                .map(|column| column.get(row).map_or(blank.as_str(), String::as_str))
                .collect();
            out.push_str(cells.join(" ").trim_end());
            out.push('\n');
        }

        Ok(out)
    }

    fn render_count_only(&self, results: &[TokenizationResult]) -> Result<String> {
        let mut out = header_box("Token Counts");
        out.push('\n');

        for result in results {
            out.push_str(&format!(
                "{}: {}\n",
                paint(&result.model_label, PALETTE[1].ansi, Style::Bold),
                paint(&format!("{} tokens", result.total_count), PALETTE[3].ansi, Style::Plain)
            ));
        }

        Ok(out)
    }
}

fn header_box(title: &str) -> String {
    let bar = "─".repeat(title.width() + 2);
    format!(
        "{}\n{}\n{}\n",
        paint(&format!("╭{bar}╮"), HEADER, Style::Bold),
        paint(&format!("│ {title} │"), HEADER, Style::Bold),
        paint(&format!("╰{bar}╯"), HEADER, Style::Bold)
    )
}

/// Longest prefix of `text` that fits in `width` terminal columns.
fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|ch| {
            used += ch.width().unwrap_or(0);
            used <= width
        })
        .collect()
}

/// Wrap styled segments into lines of at most `width` terminal columns.
///
/// Newlines in token text start a new line; other control characters show as
/// spaces so the frame stays aligned. Wide characters count as two columns.
fn layout(segments: &[Segment], width: usize) -> Vec<Line> {
    let mut lines = vec![Line::default()];

    for segment in segments {
        let mut pending = String::new();
        let mut pending_width = 0;

        for ch in segment.text.chars() {
            if ch == '\n' {
                flush(&mut lines, &mut pending, &mut pending_width, segment);
                lines.push(Line::default());
                continue;
            }

            let ch = if ch.is_control() { ' ' } else { ch };
            let ch_width = ch.width().unwrap_or(0);
            let used = lines.last().map_or(0, |line| line.width) + pending_width;
            if used > 0 && used + ch_width > width {
                flush(&mut lines, &mut pending, &mut pending_width, segment);
                lines.push(Line::default());
            }

            pending.push(ch);
            pending_width += ch_width;
        }

        flush(&mut lines, &mut pending, &mut pending_width, segment);
    }

    lines
}

fn flush(lines: &mut [Line], pending: &mut String, pending_width: &mut usize, segment: &Segment) {
    if pending.is_empty() {
        return;
    }
    if let Some(line) = lines.last_mut() {
        line.width += *pending_width;
        line.rendered.push_str(&segment.paint(pending));
    }
    pending.clear();
    *pending_width = 0;
}

fn frame(lines: &[Line], width: usize) -> Vec<String> {
    let border = |text: &str| paint(text, MUTED, Style::Plain);
    let bar = "─".repeat(width + 2);

    let mut framed = Vec::with_capacity(lines.len() + 2);
    framed.push(border(&format!("╭{bar}╮")));
    for line in lines {
        let padding = " ".repeat(width.saturating_sub(line.width));
        framed.push(format!("{} {}{padding} {}", border("│"), line.rendered, border("│")));
    }
    framed.push(border(&format!("╰{bar}╯")));
    framed
}
