//! HTML renderer.
//!
//! Two modes produce a self-contained document (inline CSS, no external
//! assets):
//!
//! - [`HtmlMode::Inline`] writes every token as a colored `<span>` carrying the
//!   `token-<slot>` class.
//! - [`HtmlMode::FromMarkdown`] renders with [`MarkdownRenderer`] and converts
//!   the result with `pulldown-cmark` (tables enabled).

use pulldown_cmark::{Options, Parser};

use super::markdown::MarkdownRenderer;
use super::palette::{PALETTE, slot};
use super::{RenderOptions, Renderer};
use crate::core::{Result, TokvizError};
use crate::tokens::TokenizationResult;

/// How the document body is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HtmlMode {
    /// Colored token spans
    #[default]
    Inline,
    /// Converted Markdown output
    FromMarkdown,
}

const BASE_CSS: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; \
max-width: 1200px; margin: 0 auto; padding: 20px; background: #1e1e1e; color: #d4d4d4; }
h1, h2, h3 { color: #5fffd7; }
.stats { color: #888; font-style: italic; margin-bottom: 16px; }
.tokens { font-family: 'SF Mono', Monaco, 'Cascadia Code', monospace; font-size: 14px; \
line-height: 1.8; white-space: pre-wrap; word-break: break-word; background: #252526; \
padding: 16px; border-radius: 6px; }
.token { font-weight: bold; }
.token-id { color: #767676; font-size: 11px; }
.boundary { color: #444; }
.comparison { display: flex; flex-wrap: wrap; gap: 16px; }
.comparison-model { flex: 1 1 320px; border: 1px solid #444; border-radius: 6px; padding: 12px; }
table { border-collapse: collapse; margin: 12px 0; }
th, td { border: 1px solid #444; padding: 4px 10px; text-align: left; }
th { background: #2d2d2d; }
code { background: #2d2d2d; padding: 1px 4px; border-radius: 3px; white-space: pre; }
pre { background: #252526; padding: 12px; border-radius: 6px; overflow-x: auto; }
.count-model { color: #af87ff; font-weight: bold; }
.count-value { color: #ffff87; }
";

/// Renders HTML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
    mode: HtmlMode,
}

impl HtmlRenderer {
    /// Create a renderer with the given decorations and mode.
    #[must_use]
    pub const fn new(options: RenderOptions, mode: HtmlMode) -> Self {
        Self {
            options,
            mode,
        }
    }

    const fn markdown(&self) -> MarkdownRenderer {
        MarkdownRenderer::new(self.options)
    }

    fn token_spans(&self, result: &TokenizationResult) -> String {
        let mut html = String::from("<div class=\"tokens\">");
        let last = result.tokens.len().saturating_sub(1);

        for (i, token) in result.tokens.iter().enumerate() {
            html.push_str(&format!(
                "<span class=\"token token-{}\">{}</span>",
                slot(i),
                escape_html(&token.text)
            ));
            if let Some(id) = self.options.visible_id(token) {
                html.push_str(&format!("<span class=\"token-id\">[{id}]</span>"));
            }
            if self.options.show_boundaries && i < last {
                html.push_str("<span class=\"boundary\">|</span>");
            }
        }

        html.push_str("</div>\n");
        html
    }

    fn model_block(&self, result: &TokenizationResult, heading: &str) -> String {
        format!(
            "<{heading}>{}</{heading}>\n<div class=\"stats\">Total tokens: {}</div>\n{}",
            escape_html(&result.model_label),
            result.total_count,
            self.token_spans(result)
        )
    }
}

impl Renderer for HtmlRenderer {
    fn render_single(&self, result: &TokenizationResult) -> Result<String> {
        match self.mode {
            HtmlMode::Inline => {
                Ok(document("Token Visualization", &self.model_block(result, "h1")))
            }
            HtmlMode::FromMarkdown => markdown_to_html(&self.markdown().render_single(result)?),
        }
    }

    fn render_comparison(&self, results: &[TokenizationResult]) -> Result<String> {
        match results {
            [] => return Ok(String::new()),
            [single] => return self.render_single(single),
            _ => {}
        }

        match self.mode {
            HtmlMode::Inline => {
                let mut body = String::from("<h1>Token Comparison</h1>\n<div class=\"comparison\">\n");
                for result in results {
                    body.push_str("<div class=\"comparison-model\">\n");
                    body.push_str(&self.model_block(result, "h2"));
                    body.push_str("</div>\n");
                }
                body.push_str("</div>\n");
                Ok(document("Token Comparison", &body))
            }
            HtmlMode::FromMarkdown => markdown_to_html(&self.markdown().render_comparison(results)?),
        }
    }

    fn render_count_only(&self, results: &[TokenizationResult]) -> Result<String> {
        match self.mode {
            HtmlMode::Inline => {
                let mut body = String::from("<h1>Token Counts</h1>\n<ul class=\"counts\">\n");
                for result in results {
                    body.push_str(&format!(
                        "<li><span class=\"count-model\">{}</span>: <span class=\"count-value\">{} tokens</span></li>\n",
                        escape_html(&result.model_label),
                        result.total_count
                    ));
                }
                body.push_str("</ul>\n");
                Ok(document("Token Counts", &body))
            }
            HtmlMode::FromMarkdown => markdown_to_html(&self.markdown().render_count_only(results)?),
        }
    }
}

/// Convert Markdown to a standalone HTML document.
///
/// # Errors
///
/// Returns [`TokvizError::RenderFailed`] if the converted HTML cannot be
/// written.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut body = String::new();
    pulldown_cmark::html::write_html_fmt(&mut body, Parser::new_ext(markdown, options)).map_err(
        |e| TokvizError::RenderFailed {
            reason: format!("Markdown conversion failed: {e}"),
        },
    )?;

    Ok(document("Token Visualization", &body))
}

fn document(title: &str, body: &str) -> String {
    let mut css = String::from(BASE_CSS);
    for (i, entry) in PALETTE.iter().enumerate() {
        css.push_str(&format!(".token-{i} {{ color: {}; }}\n", entry.hex));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
<title>{title}</title>\n<style>\n{css}</style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
