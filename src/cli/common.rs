//! Arguments and helpers shared by the tokenizing commands.

use anyhow::{Context, Result};
use clap::Args;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::{BackendSettings, ModelId, anthropic, bpe};
use crate::cache::DiskCache;
use crate::config::{GlobalConfig, expand_path};
use crate::core::TokvizError;
use crate::render::RenderOptions;

/// Backend configuration flags.
///
/// Every flag overrides the matching key of the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// BPE encoding for gpt4 and gpt3.5 (cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base)
    #[arg(short, long, value_name = "ENCODING")]
    pub encoding: Option<String>,

    /// Claude model used for remote token counting
    #[arg(long, value_name = "MODEL")]
    pub claude_model: Option<String>,

    /// Path to a sentencepiece tokenizer.model (llama)
    #[arg(long, value_name = "PATH")]
    pub llama_model: Option<PathBuf>,

    /// Path to a HuggingFace tokenizer.json (llama3)
    #[arg(long, value_name = "PATH")]
    pub llama3_tokenizer: Option<PathBuf>,

    /// Always ask the remote API instead of using cached counts
    #[arg(short, long)]
    pub no_cache: bool,
}

impl ModelArgs {
    /// Merge flags, config file and defaults into backend settings for `models`.
    ///
    /// The cache is only opened when one of `models` counts remotely.
    ///
    /// # Errors
    ///
    /// Returns an error if a remote model is selected with caching enabled and
    /// no cache directory can be determined.
    pub fn settings(&self, global: &GlobalConfig, models: &[ModelId]) -> Result<BackendSettings> {
        let cache = if self.no_cache || !models.iter().any(ModelId::is_remote) {
            None
        } else {
            Some(Arc::new(DiskCache::new(global.cache_dir.as_deref())?))
        };

        Ok(BackendSettings {
            encoding: self
                .encoding
                .clone()
                .or_else(|| global.encoding.clone())
                .unwrap_or_else(|| bpe::DEFAULT_ENCODING.to_string()),
            claude_model: self
                .claude_model
                .clone()
                .or_else(|| global.claude_model.clone())
                .unwrap_or_else(|| anthropic::DEFAULT_MODEL.to_string()),
            llama_model: self
                .llama_model
                .as_ref()
                .or(global.llama_model.as_ref())
                .map(|path| expand_path(path)),
            llama3_tokenizer: self
                .llama3_tokenizer
                .as_ref()
                .or(global.llama3_tokenizer.as_ref())
                .map(|path| expand_path(path)),
            api_base: global
                .api_base
                .clone()
                .unwrap_or_else(|| anthropic::DEFAULT_API_BASE.to_string()),
            request_timeout: global
                .request_timeout_secs
                .map_or(anthropic::DEFAULT_TIMEOUT, Duration::from_secs),
            cache,
        })
    }
}

/// Token decoration flags.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct DisplayArgs {
    /// Show the id after each token
    #[arg(short = 'i', long)]
    pub show_ids: bool,

    /// Mark the boundaries between tokens
    #[arg(short = 'b', long)]
    pub show_boundaries: bool,
}

impl DisplayArgs {
    /// The matching render options.
    #[must_use]
    pub const fn options(&self) -> RenderOptions {
        RenderOptions {
            show_ids: self.show_ids,
            show_boundaries: self.show_boundaries,
        }
    }
}

/// Read all of `reader` and trim surrounding whitespace.
///
/// # Errors
///
/// Returns [`TokvizError::EmptyInput`] when nothing but whitespace was read,
/// or an I/O error if the input is unreadable or not UTF-8.
pub fn read_input<R: Read>(mut reader: R) -> Result<String> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw).context("Failed to read input from stdin")?;

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TokvizError::EmptyInput.into());
    }
    Ok(trimmed.to_string())
}

/// Read the text to tokenize from standard input.
///
/// # Errors
///
/// See [`read_input`].
pub fn read_stdin() -> Result<String> {
    read_input(std::io::stdin().lock())
}

/// Write rendered output to standard output.
///
/// # Errors
///
/// Returns an error if stdout is closed.
pub fn write_output(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes()).context("Failed to write output")?;
    stdout.flush().context("Failed to flush output")?;
    Ok(())
}
