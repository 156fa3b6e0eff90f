//! Tokenizer backends.
//!
//! Every tokenizer tokviz can drive sits behind the [`Backend`] trait. There are
//! four variants:
//!
//! | Module | Engine | Per-token ids | Decoding |
//! |--------|--------|---------------|----------|
//! | [`bpe`] | `tiktoken-rs` encoding profiles | yes | yes |
//! | [`sentencepiece`] | sentencepiece `tokenizer.model` | yes | yes |
//! | [`hf`] | HuggingFace `tokenizer.json` | yes | yes |
//! | [`anthropic`] | Anthropic token counting API | no | no |
//!
//! The engines are treated as black boxes. The id-only engines (BPE and
//! sentencepiece) share the offset reconstruction in [`pieces`]; the
//! `tokenizer.json` engine reports native offsets and uses them directly.
//!
//! Backends are never built directly by commands. The [`registry`] maps each
//! supported model identifier to a construction function, and construction is
//! where every configuration error (missing credential, missing model file,
//! unknown encoding) is raised.

pub mod anthropic;
pub mod bpe;
pub mod hf;
pub mod pieces;
pub mod registry;
pub mod sentencepiece;

use async_trait::async_trait;

use crate::core::Result;
use crate::tokens::TokenizationResult;

pub use pieces::{Piece, PieceBackend, PieceEngine};
pub use registry::{BackendSettings, ModelId};

/// What a backend can report beyond a token count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Tokens carry engine ids
    pub token_ids: bool,
    /// Token texts are decoded from the engine and reconstruct the input
    pub decoding: bool,
}

/// Shared contract implemented by every tokenizer backend.
///
/// For a fixed configuration `encode` is a pure function of its input, with one
/// exception: the remote counter may perform a single external call per text it
/// has not cached yet. `count_tokens` is the cheaper path and always agrees with
/// `encode(text).total_count`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Human-readable backend name, e.g. `OpenAI (cl100k_base)`.
    fn name(&self) -> String;

    /// Tokenize `text` into a full result.
    async fn encode(&self, text: &str) -> Result<TokenizationResult>;

    /// Count the tokens in `text` without building per-token detail.
    async fn count_tokens(&self, text: &str) -> Result<usize>;

    /// Whether tokens carry engine ids.
    fn supports_token_ids(&self) -> bool;

    /// Whether token texts are decoded from the engine.
    fn supports_decoding(&self) -> bool;

    /// Both capability flags as one descriptor.
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            token_ids: self.supports_token_ids(),
            decoding: self.supports_decoding(),
        }
    }
}
