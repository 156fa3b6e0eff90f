//! GitHub-flavored Markdown renderer.
//!
//! Tokens are listed in a table with one row per token. Token text goes into
//! a code span so whitespace stays visible, and the characters that would break
//! a table row (`|`, newline, carriage return, tab) are escaped. The palette
//! slot is shown as a swatch glyph in the `Color` column.

use super::palette::color;
use super::{RenderOptions, Renderer};
use crate::core::Result;
use crate::tokens::TokenizationResult;

/// Renders Markdown documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a renderer with the given decorations.
    #[must_use]
    pub const fn new(options: RenderOptions) -> Self {
        Self {
            options,
        }
    }

    fn token_table(&self, result: &TokenizationResult) -> String {
        let mut md = if self.options.show_ids {
            String::from("| # | Token | Color | ID |\n|---|-------|-------|----|\n")
        } else {
            String::from("| # | Token | Color |\n|---|-------|-------|\n")
        };

        for (i, token) in result.tokens.iter().enumerate() {
            md.push_str(&format!(
                "| {} | {} | {} |",
                i + 1,
                code_span(&escape_cell(&token.text)),
                color(i).swatch
            ));
            if self.options.show_ids {
                match self.options.visible_id(token) {
                    Some(id) => md.push_str(&format!(" {id} |")),
                    None => md.push_str("  |"),
                }
            }
            md.push('\n');
        }

        md
    }

    fn boundaries(result: &TokenizationResult) -> String {
        let joined: Vec<&str> = result.tokens.iter().map(|token| token.text.as_str()).collect();
        fenced_block(&joined.join("|"))
    }

    /// Body of one result, below its heading.
    fn result_body(&self, result: &TokenizationResult, section: &str) -> String {
        let mut md = format!("**Total tokens:** {}\n\n", result.total_count);

        if result.is_count_only() || result.tokens.is_empty() {
            md.push_str(&format!("{section} Text\n\n"));
            md.push_str(&fenced_block(&result.source_text));
            return md;
        }

        md.push_str(&format!("{section} Tokens\n\n"));
        md.push_str(&self.token_table(result));

        if self.options.show_boundaries {
            md.push_str(&format!("\n{section} Boundaries\n\n"));
            md.push_str(&Self::boundaries(result));
        }

        md
    }
}

impl Renderer for MarkdownRenderer {
    fn render_single(&self, result: &TokenizationResult) -> Result<String> {
        Ok(format!("# {}\n\n{}", result.model_label, self.result_body(result, "##")))
    }

    fn render_comparison(&self, results: &[TokenizationResult]) -> Result<String> {
        match results {
            [] => return Ok(String::new()),
            [single] => return self.render_single(single),
            _ => {}
        }

        let mut md = String::from("# Token Comparison\n\n## Token Counts\n\n");
        md.push_str(&count_table(results));

        for result in results {
            md.push_str(&format!("\n## {}\n\n", result.model_label));
            md.push_str(&self.result_body(result, "###"));
        }

        Ok(md)
    }

    fn render_count_only(&self, results: &[TokenizationResult]) -> Result<String> {
        Ok(format!("# Token Counts\n\n{}", count_table(results)))
    }
}

fn count_table(results: &[TokenizationResult]) -> String {
    let mut md = String::from("| Model | Token Count |\n|-------|-------------|\n");
    for result in results {
        md.push_str(&format!("| {} | {} |\n", escape_cell(&result.model_label), result.total_count));
    }
    md
}

/// Escape characters that would end a table cell or row.
#[must_use]
pub fn escape_cell(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '|' => escaped.push_str("\\|"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wrap `content` in a code span whose fence is longer than any backtick run
/// inside it.
#[must_use]
pub fn code_span(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let fence = "`".repeat(longest_backtick_run(content) + 1);
    let pad = content.starts_with('`')
        || content.ends_with('`')
        || (content.starts_with(' ') && content.ends_with(' ') && content.trim() != "");

    if pad { format!("{fence} {content} {fence}") } else { format!("{fence}{content}{fence}") }
}

fn fenced_block(content: &str) -> String {
    let fence = "`".repeat((longest_backtick_run(content) + 1).max(3));
    format!("{fence}\n{content}\n{fence}\n")
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
