//! Supported model identifiers and how to build each one.
//!
//! The registry is a static table. Command-line model names are validated
//! against it up front ([`resolve`]), so an invocation naming one bad model
//! fails before any backend is constructed. Construction itself happens in
//! [`ModelId::build`], which is where configuration errors surface.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::anthropic::{self, AnthropicCounter, RemoteOptions};
use super::bpe::{self, BpeEngine};
use super::hf::HfBackend;
use super::{Backend, PieceBackend, sentencepiece};
use crate::cache::DiskCache;
use crate::core::{Result, TokvizError};

/// Engine family behind a model identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Byte-pair encoding via `tiktoken-rs`
    Bpe,
    /// Sentencepiece model file
    SentencePiece,
    /// HuggingFace `tokenizer.json`
    HuggingFace,
    /// Remote count API
    Remote,
}

/// Everything a backend may need at construction time.
#[derive(Clone)]
pub struct BackendSettings {
    /// BPE encoding for `gpt4` / `gpt3.5`
    pub encoding: String,
    /// Claude model for the remote counter
    pub claude_model: String,
    /// Sentencepiece model for `llama`
    pub llama_model: Option<PathBuf>,
    /// `tokenizer.json` for `llama3`
    pub llama3_tokenizer: Option<PathBuf>,
    /// Anthropic API base URL
    pub api_base: String,
    /// Per-request timeout for the remote counter
    pub request_timeout: Duration,
    /// Cache for the remote counter, `None` disables caching
    pub cache: Option<Arc<DiskCache>>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            encoding: bpe::DEFAULT_ENCODING.to_string(),
            claude_model: anthropic::DEFAULT_MODEL.to_string(),
            llama_model: None,
            llama3_tokenizer: None,
            api_base: anthropic::DEFAULT_API_BASE.to_string(),
            request_timeout: anthropic::DEFAULT_TIMEOUT,
            cache: None,
        }
    }
}

type BuildFn = fn(&ModelEntry, &BackendSettings) -> Result<Box<dyn Backend>>;

/// One row of the registry.
pub struct ModelEntry {
    /// Identifier accepted on the command line
    pub id: &'static str,
    /// Engine family
    pub kind: BackendKind,
    /// One-line description for help output
    pub description: &'static str,
    build: BuildFn,
}

impl fmt::Debug for ModelEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelEntry").field("id", &self.id).field("kind", &self.kind).finish()
    }
}

/// Every supported model, in help order.
pub static REGISTRY: &[ModelEntry] = &[
    ModelEntry {
        id: "gpt4",
        kind: BackendKind::Bpe,
        description: "GPT-4 (BPE, --encoding, default cl100k_base)",
        build: build_configured_bpe,
    },
    ModelEntry {
        id: "gpt3.5",
        kind: BackendKind::Bpe,
        description: "GPT-3.5 (BPE, --encoding, default cl100k_base)",
        build: build_configured_bpe,
    },
    ModelEntry {
        id: "gpt5",
        kind: BackendKind::Bpe,
        description: "GPT-5 (BPE, o200k_base)",
        build: build_gpt5,
    },
    ModelEntry {
        id: "gpt5-mini",
        kind: BackendKind::Bpe,
        description: "GPT-5 mini (BPE, o200k_base)",
        build: build_gpt5,
    },
    ModelEntry {
        id: "gpt5-nano",
        kind: BackendKind::Bpe,
        description: "GPT-5 nano (BPE, o200k_base)",
        build: build_gpt5,
    },
    ModelEntry {
        id: "claude",
        kind: BackendKind::Remote,
        description: "Claude (Anthropic count API, count only, needs ANTHROPIC_API_KEY)",
        build: build_claude,
    },
    ModelEntry {
        id: "llama",
        kind: BackendKind::SentencePiece,
        description: "LLaMA (sentencepiece, --llama-model)",
        build: build_llama,
    },
    ModelEntry {
        id: "llama3",
        kind: BackendKind::HuggingFace,
        description: "LLaMA 3 (tokenizer.json, --llama3-tokenizer)",
        build: build_llama3,
    },
];

/// All supported model identifiers.
#[must_use]
pub fn supported_models() -> Vec<&'static str> {
    REGISTRY.iter().map(|entry| entry.id).collect()
}

/// A model identifier known to be in the registry.
#[derive(Clone, Copy)]
pub struct ModelId(&'static ModelEntry);

impl ModelId {
    /// The identifier string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0.id
    }

    /// The registry row.
    #[must_use]
    pub fn entry(&self) -> &'static ModelEntry {
        self.0
    }

    /// Returns `true` if this model is counted by a remote API.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.0.kind == BackendKind::Remote
    }

    /// Construct the backend for this model.
    ///
    /// # Errors
    ///
    /// Returns the configuration error of the backend: missing credential,
    /// missing or invalid model file, unknown encoding or a disabled feature.
    pub fn build(&self, settings: &BackendSettings) -> Result<Box<dyn Backend>> {
        debug!("Building backend for {}", self.0.id);
        (self.0.build)(self.0, settings)
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelId").field(&self.0.id).finish()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.id)
    }
}

impl PartialEq for ModelId {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for ModelId {}

impl FromStr for ModelId {
    type Err = TokvizError;

    fn from_str(name: &str) -> Result<Self> {
        let wanted = name.trim();
        REGISTRY.iter().find(|entry| entry.id.eq_ignore_ascii_case(wanted)).map(ModelId).ok_or_else(
            || TokvizError::UnknownModel {
                name: name.to_string(),
                suggestion: closest_model(wanted),
            },
        )
    }
}

/// Validate every name before anything is built.
///
/// # Errors
///
/// Returns [`TokvizError::UnknownModel`] for the first unknown name, or a
/// configuration error when `names` is empty.
pub fn resolve<S: AsRef<str>>(names: &[S]) -> Result<Vec<ModelId>> {
    if names.is_empty() {
        return Err(TokvizError::ConfigError {
            message: "At least one model is required".to_string(),
        });
    }
    names.iter().map(|name| name.as_ref().parse()).collect()
}

fn closest_model(name: &str) -> Option<String> {
    let lowered = name.to_ascii_lowercase();
    REGISTRY
        .iter()
        .map(|entry| (entry.id, strsim::levenshtein(&lowered, entry.id)))
        .filter(|(_, distance)| *distance <= 3)
        .min_by_key(|(_, distance)| *distance)
        .map(|(id, _)| id.to_string())
}

fn build_bpe(encoding: &str) -> Result<Box<dyn Backend>> {
    Ok(Box::new(PieceBackend::new(BpeEngine::new(encoding)?)))
}

fn build_configured_bpe(_: &ModelEntry, settings: &BackendSettings) -> Result<Box<dyn Backend>> {
    build_bpe(&settings.encoding)
}

fn build_gpt5(_: &ModelEntry, _: &BackendSettings) -> Result<Box<dyn Backend>> {
    build_bpe(bpe::GPT5_ENCODING)
}

fn build_claude(_: &ModelEntry, settings: &BackendSettings) -> Result<Box<dyn Backend>> {
    let options = RemoteOptions {
        api_base: settings.api_base.clone(),
        timeout: settings.request_timeout,
        cache: settings.cache.clone(),
    };
    Ok(Box::new(AnthropicCounter::from_env(settings.claude_model.clone(), options)?))
}

fn build_llama(entry: &ModelEntry, settings: &BackendSettings) -> Result<Box<dyn Backend>> {
    let path = settings.llama_model.as_deref().ok_or_else(|| TokvizError::ConfigError {
        message: "The llama model requires --llama-model pointing at a tokenizer.model file"
            .to_string(),
    })?;
    sentencepiece::open(entry.id, path)
}

fn build_llama3(entry: &ModelEntry, settings: &BackendSettings) -> Result<Box<dyn Backend>> {
    let path = settings.llama3_tokenizer.as_deref().ok_or_else(|| TokvizError::ConfigError {
        message: "The llama3 model requires --llama3-tokenizer pointing at a tokenizer.json file"
            .to_string(),
    })?;
    Ok(Box::new(HfBackend::from_file(entry.id, path)?))
}
