//! Renderers through the public API.

use tokviz::render::palette::{PALETTE, color};
use tokviz::render::{OutputFormat, RenderOptions, renderer_for};
use tokviz::tokens::{Token, TokenizationResult};

fn result(label: &str, texts: &[&str]) -> TokenizationResult {
    let source: String = texts.concat();
    let mut offset = 0;
    let tokens = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let token = Token::new(*text, i as u32, offset, offset + text.len());
            offset += text.len();
            token
        })
        .collect();
    TokenizationResult::from_tokens(tokens, source, label)
}

const FORMATS: [OutputFormat; 4] =
    [OutputFormat::Terminal, OutputFormat::Markdown, OutputFormat::Html, OutputFormat::MarkdownHtml];

#[test]
fn palette_slots_wrap_after_eight() {
    assert_eq!(PALETTE.len(), 8);
    assert_eq!(color(8).hex, color(0).hex);
    assert_eq!(color(13).name, color(5).name);
}

#[test]
fn every_format_renders_empty_comparison_as_empty() {
    for format in FORMATS {
        let renderer = renderer_for(format, RenderOptions::default());
        assert_eq!(renderer.render_comparison(&[]).unwrap(), "", "{format:?}");
    }
}

#[test]
fn every_format_mentions_each_count() {
    let results =
        [result("alpha", &["a", "b"]), TokenizationResult::count_only("ab", 17, "beta")];
    for format in FORMATS {
        let out = renderer_for(format, RenderOptions::default()).render_count_only(&results).unwrap();
        let alpha = out.find("alpha").unwrap_or_else(|| panic!("{format:?}: {out}"));
        let beta = out.find("beta").unwrap_or_else(|| panic!("{format:?}: {out}"));
        assert!(alpha < beta, "{format:?}");
        assert!(out.contains("17"), "{format:?}");
    }
}

#[test]
fn markdown_escapes_table_breaking_text() {
    let renderer = renderer_for(OutputFormat::Markdown, RenderOptions::default());
    let out = renderer.render_single(&result("special", &["a|b", "x\ny"])).unwrap();
    assert!(out.contains("`a\\|b`"));
    assert!(out.contains("`x\\ny`"));
}

#[test]
fn html_escapes_token_text() {
    let renderer = renderer_for(OutputFormat::Html, RenderOptions::default());
    let out = renderer.render_single(&result("tags", &["<b>", "&"])).unwrap();
    assert!(out.contains("&lt;b&gt;"));
    assert!(out.contains("&amp;"));
    assert!(!out.contains("<b>"));
}
