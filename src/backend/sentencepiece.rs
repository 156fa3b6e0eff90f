//! LLaMA backend over a sentencepiece `tokenizer.model`.
//!
//! The engine links the native sentencepiece library, so it is only compiled
//! with the `sentencepiece` cargo feature. Without it, [`open`] fails with
//! [`TokvizError::FeatureDisabled`] and every other model keeps working.
//!
//! Pieces are turned back into bytes from the vocabulary: the `▁` word marker
//! becomes a space, byte-fallback pieces (`<0x0A>`) become that byte, and the
//! BOS/EOS markers become empty. The dummy prefix space sentencepiece adds in
//! front of the first word is dropped when the input did not start with one,
//! which lets most inputs be placed exactly.

use std::path::Path;

use super::Backend;
use crate::core::Result;

/// Label stored in LLaMA results.
pub const MODEL_LABEL: &str = "LLaMA";

/// Cargo feature that enables this backend.
pub const FEATURE: &str = "sentencepiece";

#[cfg_attr(not(feature = "sentencepiece"), allow(dead_code))]
const WORD_BOUNDARY: char = '\u{2581}';

/// Load a sentencepiece model file as a backend.
///
/// # Errors
///
/// - [`TokvizError::FeatureDisabled`] when built without the `sentencepiece` feature
/// - [`TokvizError::ModelArtifactNotFound`] when `path` does not exist
/// - [`TokvizError::ModelArtifactInvalid`] when the file is not a sentencepiece model
pub fn open(model_id: &str, path: &Path) -> Result<Box<dyn Backend>> {
    #[cfg(feature = "sentencepiece")]
    {
        let _ = model_id;
        let engine = engine::SentencePieceEngine::open(path)?;
        Ok(Box::new(super::PieceBackend::new(engine)))
    }

    #[cfg(not(feature = "sentencepiece"))]
    {
        let _ = path;
        Err(crate::core::TokvizError::FeatureDisabled {
            model: model_id.to_string(),
            feature: FEATURE.to_string(),
        })
    }
}

/// Bytes a vocabulary piece stands for.
#[cfg_attr(not(feature = "sentencepiece"), allow(dead_code))]
fn piece_bytes(piece: &str) -> Vec<u8> {
    if let Some(byte) = byte_fallback(piece) {
        return vec![byte];
    }
    piece.replace(WORD_BOUNDARY, " ").into_bytes()
}

/// Parse `<0xNN>` byte-fallback pieces.
#[cfg_attr(not(feature = "sentencepiece"), allow(dead_code))]
fn byte_fallback(piece: &str) -> Option<u8> {
    let hex = piece.strip_prefix("<0x")?.strip_suffix('>')?;
    if hex.len() != 2 {
        return None;
    }
    u8::from_str_radix(hex, 16).ok()
}

/// Remove the dummy prefix space from the first non-empty piece.
#[cfg_attr(not(feature = "sentencepiece"), allow(dead_code))]
fn strip_dummy_prefix(text: &str, pieces: &mut [Vec<u8>]) {
    if text.starts_with(' ') {
        return;
    }
    if let Some(first) = pieces.iter_mut().find(|bytes| !bytes.is_empty()) {
        if first.first() == Some(&b' ') {
            first.remove(0);
        }
    }
}

#[cfg(feature = "sentencepiece")]
mod engine {
    use std::path::Path;

    use sentencepiece::SentencePieceProcessor;
    use tracing::debug;

    use super::{MODEL_LABEL, piece_bytes, strip_dummy_prefix};
    use crate::backend::pieces::{Piece, PieceEngine};
    use crate::core::{Result, TokvizError};

    pub struct SentencePieceEngine {
        processor: SentencePieceProcessor,
    }

    impl SentencePieceEngine {
        pub fn open(path: &Path) -> Result<Self> {
            if !path.exists() {
                return Err(TokvizError::ModelArtifactNotFound {
                    path: path.display().to_string(),
                });
            }

            let processor =
                SentencePieceProcessor::open(path).map_err(|e| TokvizError::ModelArtifactInvalid {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            debug!("Loaded sentencepiece model from {}", path.display());

            Ok(Self {
                processor,
            })
        }
    }

    impl PieceEngine for SentencePieceEngine {
        fn name(&self) -> String {
            "LLaMA (sentencepiece)".to_string()
        }

        fn label(&self) -> String {
            MODEL_LABEL.to_string()
        }

        // Sequences are wrapped in BOS/EOS markers when the model defines them.
        fn split(&self, text: &str) -> std::result::Result<Vec<Piece>, String> {
            let encoded = self.processor.encode(text).map_err(|e| e.to_string())?;

            let mut ids = Vec::with_capacity(encoded.len() + 2);
            let mut bytes = Vec::with_capacity(encoded.len() + 2);
            if let Some(bos) = self.processor.bos_id() {
                ids.push(bos);
                bytes.push(Vec::new());
            }
            for piece in &encoded {
                ids.push(piece.id);
                bytes.push(piece_bytes(&piece.piece));
            }
            if let Some(eos) = self.processor.eos_id() {
                ids.push(eos);
                bytes.push(Vec::new());
            }

            strip_dummy_prefix(text, &mut bytes);
            Ok(ids.into_iter().zip(bytes).map(|(id, bytes)| Piece::new(id, bytes)).collect())
        }
    }
}
