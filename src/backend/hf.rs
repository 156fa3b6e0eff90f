//! HuggingFace `tokenizer.json` backend.
//!
//! Unlike the id-only engines, `tokenizers` reports byte offsets for every
//! token, so no accumulation is needed. Offsets are kept as reported. Token text
//! is the covered input slice, widened backwards over gaps the engine trimmed
//! (byte-level BPE offsets usually exclude the leading space of a word).

use std::path::Path;

use async_trait::async_trait;
use tokenizers::Tokenizer;
use tracing::debug;

use super::Backend;
use crate::core::{Result, TokvizError};
use crate::tokens::{Token, TokenizationResult};

/// Backend driven by a `tokenizer.json` file.
pub struct HfBackend {
    label: String,
    tokenizer: Tokenizer,
}

impl HfBackend {
    /// Load `path` and label results with `label`.
    ///
    /// # Errors
    ///
    /// Returns [`TokvizError::ModelArtifactNotFound`] when the file does not
    /// exist and [`TokvizError::ModelArtifactInvalid`] when it cannot be parsed.
    pub fn from_file(label: impl Into<String>, path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(TokvizError::ModelArtifactNotFound {
                path: path.display().to_string(),
            });
        }

        let tokenizer = Tokenizer::from_file(path).map_err(|e| TokvizError::ModelArtifactInvalid {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        debug!("Loaded tokenizer.json from {}", path.display());

        Ok(Self {
            label: label.into(),
            tokenizer,
        })
    }

    fn encode_failed(&self, reason: impl ToString) -> TokvizError {
        TokvizError::EncodeFailed {
            backend: self.name(),
            reason: reason.to_string(),
        }
    }

    fn decode_one(&self, id: u32, fallback: &str) -> String {
        self.tokenizer.decode(&[id], false).unwrap_or_else(|_| fallback.to_string())
    }
}

#[async_trait]
impl Backend for HfBackend {
    fn name(&self) -> String {
        self.label.clone()
    }

    async fn encode(&self, text: &str) -> Result<TokenizationResult> {
        let encoding = self.tokenizer.encode(text, false).map_err(|e| self.encode_failed(e))?;

        let ids = encoding.get_ids();
        let offsets = encoding.get_offsets();
        let pieces = encoding.get_tokens();

        let mut tokens: Vec<Token> = Vec::with_capacity(ids.len());
        let mut covered = 0;
        for ((&id, &(start, end)), piece) in ids.iter().zip(offsets).zip(pieces) {
            let from = covered.min(start);
            let token_text = match text.get(from..end) {
                Some(slice) if end >= from => slice.to_string(),
                _ => self.decode_one(id, piece),
            };
            tokens.push(Token::new(token_text, id, start, end));
            covered = covered.max(end);
        }

        if let Some(last) = tokens.last_mut() {
            if let Some(rest) = text.get(covered..) {
                last.text.push_str(rest);
            }
        }

        Ok(TokenizationResult::from_tokens(tokens, text, self.label.clone()))
    }

    async fn count_tokens(&self, text: &str) -> Result<usize> {
        let encoding = self.tokenizer.encode(text, false).map_err(|e| self.encode_failed(e))?;
        Ok(encoding.len())
    }

    fn supports_token_ids(&self) -> bool {
        true
    }

    fn supports_decoding(&self) -> bool {
        true
    }
}
