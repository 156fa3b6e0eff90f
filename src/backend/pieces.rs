//! Offset reconstruction for engines that only return token ids.
//!
//! Byte-pair and sentencepiece engines hand back an ordered list of ids. A
//! [`PieceEngine`] turns the input into [`Piece`]s (id plus the raw bytes that id
//! decodes to), and [`assemble_tokens`] places them on the input by accumulating
//! byte lengths.
//!
//! Two placement modes exist:
//!
//! - **Exact**: the pieces concatenate to the input byte-for-byte (the usual
//!   case for byte-level BPE). Token texts are slices of the input. A piece that
//!   ends inside a multi-byte character is widened to the next character
//!   boundary and the following piece starts there, so some pieces of a split
//!   character get empty text. Concatenating the texts gives back the input.
//! - **Best effort**: the engine normalized the text or added control pieces.
//!   Each token keeps its lossily decoded text and offsets accumulate over those
//!   texts. Reconstruction is not guaranteed in this mode.

use async_trait::async_trait;
use tracing::trace;

use super::Backend;
use crate::core::{Result, TokvizError};
use crate::tokens::{Token, TokenizationResult};

/// One engine token: its id and the bytes it decodes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// Engine token id
    pub id: u32,
    /// Raw decoded bytes, possibly a partial UTF-8 sequence
    pub bytes: Vec<u8>,
}

impl Piece {
    /// Create a piece from an id and its decoded bytes.
    pub fn new(id: u32, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            bytes: bytes.into(),
        }
    }
}

/// An id-only tokenizer engine.
pub trait PieceEngine: Send + Sync {
    /// Backend display name.
    fn name(&self) -> String;

    /// Label stored in results (encoding or model family).
    fn label(&self) -> String;

    /// Split `text` into pieces, in engine order.
    fn split(&self, text: &str) -> std::result::Result<Vec<Piece>, String>;

    /// Number of pieces for `text`.
    fn count(&self, text: &str) -> std::result::Result<usize, String> {
        self.split(text).map(|pieces| pieces.len())
    }
}

/// Place pieces on `text`, see the module docs for the two modes.
#[must_use]
pub fn assemble_tokens(text: &str, pieces: Vec<Piece>) -> Vec<Token> {
    if covers_exactly(text, &pieces) {
        assemble_exact(text, pieces)
    } else {
        trace!(pieces = pieces.len(), "decoded pieces differ from input, using accumulated offsets");
        assemble_accumulated(pieces)
    }
}

fn covers_exactly(text: &str, pieces: &[Piece]) -> bool {
    let source = text.as_bytes();
    let mut offset = 0;
    for piece in pieces {
        let end = offset + piece.bytes.len();
        if end > source.len() || source[offset..end] != piece.bytes[..] {
            return false;
        }
        offset = end;
    }
    offset == source.len()
}

fn assemble_exact(text: &str, pieces: Vec<Piece>) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(pieces.len());
    let mut raw_end = 0;
    let mut start = 0;

    for piece in pieces {
        raw_end += piece.bytes.len();
        let end = next_char_boundary(text, raw_end).max(start);
        tokens.push(Token::new(&text[start..end], piece.id, start, end));
        start = end;
    }

    tokens
}

fn assemble_accumulated(pieces: Vec<Piece>) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(pieces.len());
    let mut position = 0;

    for piece in pieces {
        let text = String::from_utf8_lossy(&piece.bytes).into_owned();
        let end = position + text.len();
        tokens.push(Token::new(text, piece.id, position, end));
        position = end;
    }

    tokens
}

/// Smallest character boundary at or after `index`, capped at the text length.
fn next_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

/// [`Backend`] over any [`PieceEngine`].
pub struct PieceBackend<E> {
    engine: E,
}

impl<E: PieceEngine> PieceBackend<E> {
    /// Wrap an engine.
    pub const fn new(engine: E) -> Self {
        Self {
            engine,
        }
    }

    /// The wrapped engine.
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    fn engine_error(&self, reason: String) -> TokvizError {
        TokvizError::EncodeFailed {
            backend: self.engine.name(),
            reason,
        }
    }
}

#[async_trait]
impl<E: PieceEngine> Backend for PieceBackend<E> {
    fn name(&self) -> String {
        self.engine.name()
    }

    async fn encode(&self, text: &str) -> Result<TokenizationResult> {
        let pieces = self.engine.split(text).map_err(|reason| self.engine_error(reason))?;
        let tokens = assemble_tokens(text, pieces);
        Ok(TokenizationResult::from_tokens(tokens, text, self.engine.label()))
    }

    async fn count_tokens(&self, text: &str) -> Result<usize> {
        self.engine.count(text).map_err(|reason| self.engine_error(reason))
    }

    fn supports_token_ids(&self) -> bool {
        true
    }

    fn supports_decoding(&self) -> bool {
        true
    }
}
