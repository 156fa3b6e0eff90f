//! Output renderers.
//!
//! A [`Renderer`] turns [`TokenizationResult`]s into a string. Three formats
//! exist and all of them follow the same rules:
//!
//! - the token at position `i` is colored with palette slot `i % 8`
//!   ([`palette`]);
//! - token ids and boundary markers are opt-in ([`RenderOptions`]), ids only
//!   show when the token has one, and boundary markers sit strictly between
//!   tokens;
//! - a comparison of zero results renders as the empty string, a comparison of
//!   one result renders exactly like [`Renderer::render_single`];
//! - count-only output lists each model with its count, in input order.
//!
//! Renderers are pure. The `Result` return type is there for the Markdown to
//! HTML conversion, the only step that can fail.

pub mod html;
pub mod markdown;
pub mod palette;
pub mod terminal;


use crate::core::Result;
use crate::tokens::{Token, TokenizationResult};

pub use html::{HtmlMode, HtmlRenderer, markdown_to_html};
pub use markdown::MarkdownRenderer;
pub use terminal::TerminalRenderer;

/// Shared rendering contract.
pub trait Renderer: Send + Sync {
    /// Render one result with per-token detail.
    fn render_single(&self, result: &TokenizationResult) -> Result<String>;

    /// Render several results side by side, in the given order.
    fn render_comparison(&self, results: &[TokenizationResult]) -> Result<String>;

    /// Render only the model labels and counts.
    fn render_count_only(&self, results: &[TokenizationResult]) -> Result<String>;
}

/// Optional decorations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Show `[id]` after each token that has one
    pub show_ids: bool,
    /// Mark boundaries between adjacent tokens
    pub show_boundaries: bool,
}

impl RenderOptions {
    /// The id to print for `token`, if any.
    #[must_use]
    pub const fn visible_id(&self, token: &Token) -> Option<u32> {
        if self.show_ids { token.id } else { None }
    }
}

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// ANSI-colored terminal output
    #[default]
    Terminal,
    /// GitHub-flavored Markdown
    Markdown,
    /// Self-contained HTML with inline token spans
    Html,
    /// The Markdown output converted to an HTML document
    MarkdownHtml,
}

/// Renderer for `format`.
#[must_use]
pub fn renderer_for(format: OutputFormat, options: RenderOptions) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalRenderer::new(options)),
        OutputFormat::Markdown => Box::new(MarkdownRenderer::new(options)),
        OutputFormat::Html => Box::new(HtmlRenderer::new(options, HtmlMode::Inline)),
        OutputFormat::MarkdownHtml => Box::new(HtmlRenderer::new(options, HtmlMode::FromMarkdown)),
    }
}
