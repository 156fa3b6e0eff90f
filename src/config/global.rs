//! User-wide configuration file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use super::CONFIG_PATH_ENV;

/// Defaults read from `~/.tokviz/config.toml`.
///
/// Every field is optional. A field left unset falls back to the built-in
/// default, and any command-line flag overrides the file.
///
/// # Examples
///
/// ```rust,no_run
/// use tokviz::config::GlobalConfig;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = GlobalConfig::load().await?;
/// if let Some(encoding) = &config.encoding {
///     println!("Default encoding: {encoding}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// BPE encoding profile for `gpt4` and `gpt3.5`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,

    /// Model name sent to the Anthropic token counting endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude_model: Option<String>,

    /// Path to a sentencepiece `tokenizer.model`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llama_model: Option<PathBuf>,

    /// Path to a HuggingFace `tokenizer.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llama3_tokenizer: Option<PathBuf>,

    /// Directory for cached remote counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Base URL of the Anthropic API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Timeout for one remote request, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl GlobalConfig {
    /// Load from the default location, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` if given, else from `TOKVIZ_CONFIG`, else the default
    /// location.
    ///
    /// An explicitly requested file must exist. The default location may be
    /// missing, in which case defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or any file that exists
    /// cannot be read or contains invalid TOML.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let explicit = path.or_else(|| {
            std::env::var(CONFIG_PATH_ENV).ok().filter(|value| !value.is_empty()).map(PathBuf::from)
        });

        if let Some(path) = explicit {
            return Self::load_from(&super::expand_path(&path)).await;
        }

        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Default config file location.
    ///
    /// - Unix/macOS: `~/.tokviz/config.toml`
    /// - Windows: `%LOCALAPPDATA%\tokviz\config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be found.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("tokviz")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".tokviz")
        };

        Ok(config_dir.join("config.toml"))
    }
}
