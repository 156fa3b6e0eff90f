//! Byte-pair encoding backend over the `tiktoken-rs` encoding profiles.

use tiktoken_rs::CoreBPE;
use tracing::debug;

use super::pieces::{Piece, PieceEngine};
use crate::core::{Result, TokvizError};

/// Encoding used by the GPT-4 and GPT-3.5 model identifiers unless overridden.
pub const DEFAULT_ENCODING: &str = "cl100k_base";

/// Encoding used by the GPT-5 family.
pub const GPT5_ENCODING: &str = "o200k_base";

/// Encoding profiles that can be selected by name.
pub const SUPPORTED_ENCODINGS: &[&str] =
    &["cl100k_base", "o200k_base", "p50k_base", "p50k_edit", "r50k_base"];

/// A loaded byte-pair encoding profile.
pub struct BpeEngine {
    encoding: String,
    bpe: CoreBPE,
}

impl BpeEngine {
    /// Load the named encoding profile.
    ///
    /// # Errors
    ///
    /// Returns [`TokvizError::UnknownEncoding`] if the name is not one of
    /// [`SUPPORTED_ENCODINGS`], or [`TokvizError::ModelArtifactInvalid`] if the
    /// bundled profile fails to load.
    pub fn new(encoding: &str) -> Result<Self> {
        let loaded = match encoding {
            "cl100k_base" => tiktoken_rs::cl100k_base(),
            "o200k_base" => tiktoken_rs::o200k_base(),
            "p50k_base" => tiktoken_rs::p50k_base(),
            "p50k_edit" => tiktoken_rs::p50k_edit(),
            "r50k_base" => tiktoken_rs::r50k_base(),
            other => {
                return Err(TokvizError::UnknownEncoding {
                    name: other.to_string(),
                });
            }
        };

        let bpe = loaded.map_err(|e| TokvizError::ModelArtifactInvalid {
            path: encoding.to_string(),
            reason: e.to_string(),
        })?;
        debug!("Loaded BPE encoding {encoding}");

        Ok(Self {
            encoding: encoding.to_string(),
            bpe,
        })
    }

    /// The encoding profile name.
    pub fn encoding(&self) -> &str {
        &self.encoding
    }
}

impl PieceEngine for BpeEngine {
    fn name(&self) -> String {
        format!("OpenAI ({})", self.encoding)
    }

    fn label(&self) -> String {
        self.encoding.clone()
    }

    // Special-token text in the input is encoded as ordinary text.
    fn split(&self, text: &str) -> std::result::Result<Vec<Piece>, String> {
        let ids = self.bpe.encode_ordinary(text);
        let pieces = ids
            .iter()
            .zip(self.bpe._decode_native_and_split(ids.clone()))
            .map(|(&id, bytes)| Piece::new(id, bytes))
            .collect();
        Ok(pieces)
    }

    fn count(&self, text: &str) -> std::result::Result<usize, String> {
        Ok(self.bpe.encode_ordinary(text).len())
    }
}
