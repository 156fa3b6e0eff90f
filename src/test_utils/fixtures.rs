//! Sample tokenization results.

use crate::tokens::{Token, TokenizationResult};

/// `"Hello, world!"` as `cl100k_base` tokenizes it.
#[must_use]
pub fn hello_world() -> TokenizationResult {
    TokenizationResult::from_tokens(
        vec![
            Token::new("Hello", 9906, 0, 5),
            Token::new(",", 11, 5, 6),
            Token::new(" world", 1917, 6, 12),
            Token::new("!", 0, 12, 13),
        ],
        "Hello, world!",
        "cl100k_base",
    )
}

/// Text of token `index` in [`synthetic`].
#[must_use]
pub fn synthetic_text(index: usize) -> String {
    format!("t{index:02}")
}

/// `count` tokens with distinct texts and ids, labelled `synthetic`.
#[must_use]
pub fn synthetic(count: usize) -> TokenizationResult {
    let mut tokens = Vec::with_capacity(count);
    let mut source = String::new();

    for i in 0..count {
        let text = synthetic_text(i);
        let start = source.len();
        source.push_str(&text);
        tokens.push(Token::new(text, 1000 + i as u32, start, source.len()));
    }

    TokenizationResult::from_tokens(tokens, source, "synthetic")
}

/// Count-only result for a fixed text.
#[must_use]
pub fn count_only(label: &str, count: usize) -> TokenizationResult {
    TokenizationResult::count_only("Count me, please.", count, label)
}

/// Tokens containing characters that need escaping in tables.
#[must_use]
pub fn with_special_characters() -> TokenizationResult {
    let texts = ["a|b", "line\n", "tab\t", "`tick`", "end"];
    let mut tokens = Vec::with_capacity(texts.len());
    let mut source = String::new();

    for (i, text) in texts.iter().enumerate() {
        let start = source.len();
        source.push_str(text);
        tokens.push(Token::new(*text, i as u32, start, source.len()));
    }

    TokenizationResult::from_tokens(tokens, source, "special")
}
