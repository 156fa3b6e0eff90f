//! Local backends through the public API.

use tokviz::backend::bpe::BpeEngine;
use tokviz::backend::{Backend, PieceBackend};

fn gpt4() -> PieceBackend<BpeEngine> {
    PieceBackend::new(BpeEngine::new("cl100k_base").unwrap())
}

#[tokio::test]
async fn spans_cover_the_text_in_order() {
    let backend = gpt4();
    let text = "The quick brown fox jumps over the lazy dog. 🦊 naïve café";
    let result = backend.encode(text).await.unwrap();

    assert_eq!(result.reconstructed_text(), text);
    assert_eq!(result.total_count, result.tokens.len());

    let mut cursor = 0;
    for token in &result.tokens {
        assert!(token.start >= cursor, "{token:?} starts before {cursor}");
        assert!(token.start <= token.end);
        assert!(token.end <= text.len());
        assert!(text.is_char_boundary(token.end));
        cursor = token.start;
    }
}

#[tokio::test]
async fn count_matches_encode() {
    let backend = gpt4();
    let text = "fn main() {\n    println!(\"hi\");\n}\n";

    let count = backend.count_tokens(text).await.unwrap();
    let result = backend.encode(text).await.unwrap();
    assert_eq!(count, result.tokens.len());
}

#[tokio::test]
async fn empty_text_has_no_tokens() {
    let result = gpt4().encode("").await.unwrap();
    assert!(result.tokens.is_empty());
    assert_eq!(result.total_count, 0);
}

#[tokio::test]
async fn encodings_split_differently() {
    let text = "          indented code";
    let cl100k = gpt4().encode(text).await.unwrap();
    let p50k = PieceBackend::new(BpeEngine::new("p50k_base").unwrap()).encode(text).await.unwrap();

    assert_eq!(cl100k.model_label, "cl100k_base");
    assert_eq!(p50k.model_label, "p50k_base");
    assert_eq!(cl100k.reconstructed_text(), p50k.reconstructed_text());
}
