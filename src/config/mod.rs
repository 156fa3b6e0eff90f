//! Configuration management for tokviz
//!
//! tokviz reads one optional TOML file with user-wide defaults. Command-line
//! flags always win over the file, and the file only fills in what the flags
//! leave unset.
//!
//! # Location
//!
//! The first of these that applies is used:
//!
//! 1. `--config PATH`
//! 2. `TOKVIZ_CONFIG`
//! 3. `~/.tokviz/config.toml` (`%LOCALAPPDATA%\tokviz\config.toml` on Windows)
//!
//! A missing file is not an error; every key has a default.
//!
//! # Format
//!
//! ```toml
//! # BPE profile for gpt4 / gpt3.5
//! encoding = "cl100k_base"
//!
//! # Model sent to the Anthropic token counting endpoint
//! claude_model = "claude-3-5-sonnet-20241022"
//!
//! # Local tokenizer files
//! llama_model = "~/models/llama/tokenizer.model"
//! llama3_tokenizer = "~/models/llama3/tokenizer.json"
//!
//! # Remote counter settings
//! api_base = "https://api.anthropic.com"
//! request_timeout_secs = 30
//!
//! # Where remote counts are cached
//! cache_dir = "~/.cache/tokviz"
//! ```
//!
//! The API key is never read from this file; it only comes from
//! `ANTHROPIC_API_KEY`.
//!
//! # Cache Directory
//!
//! [`get_cache_dir`] resolves the cache location: `TOKVIZ_CACHE_DIR`, then the
//! file's `cache_dir`, then the platform cache directory.

mod global;

pub use global::GlobalConfig;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Environment variable overriding the cache directory.
pub const CACHE_DIR_ENV: &str = "TOKVIZ_CACHE_DIR";

/// Environment variable pointing at the config file.
pub const CONFIG_PATH_ENV: &str = "TOKVIZ_CONFIG";

/// Get the cache directory for remote token counts.
///
/// Resolution order:
/// 1. `TOKVIZ_CACHE_DIR` environment variable
/// 2. `configured` (the config file's `cache_dir`, tilde-expanded)
/// 3. `<platform cache dir>/tokviz`, e.g. `~/.cache/tokviz` on Linux
///
/// The directory is not created here; the cache creates it on first write.
///
/// # Errors
///
/// Returns an error if no platform cache or home directory can be determined.
pub fn get_cache_dir(configured: Option<&Path>) -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CACHE_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    if let Some(dir) = configured {
        return Ok(expand_path(dir));
    }

    let base = dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
        .ok_or_else(|| anyhow::anyhow!("Unable to determine cache directory"))?;

    Ok(base.join("tokviz"))
}

/// Expand a leading `~` and environment variables in a user-supplied path.
///
/// Paths that fail to expand (undefined variables) are returned unchanged.
#[must_use]
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}
