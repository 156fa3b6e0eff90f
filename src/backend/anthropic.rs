//! Anthropic token counting backend.
//!
//! Claude tokenizers are not public, so this backend asks the
//! `/v1/messages/count_tokens` endpoint for a count. It can only report the
//! total: [`Backend::encode`] wraps the count in the single sentinel-token
//! shape, and both capability flags are `false`.
//!
//! Every count goes through the [`DiskCache`] when one is attached. A text the
//! cache has already seen costs no request; a new text costs exactly one. There
//! are no retries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Backend;
use crate::cache::{CacheLookup, DiskCache};
use crate::core::{Result, TokvizError};
use crate::tokens::TokenizationResult;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Production API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";

/// Model counted when none is configured.
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Timeout applied to each request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Prefix of every cache key written by this backend.
pub const CACHE_NAMESPACE: &str = "claude";

const API_VERSION: &str = "2023-06-01";
const TOKEN_COUNTING_BETA: &str = "token-counting-2024-11-01";

/// Transport settings for [`AnthropicCounter`].
#[derive(Clone)]
pub struct RemoteOptions {
    /// Base URL, without the `/v1/...` path
    pub api_base: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Cache consulted before every request, `None` to always ask the API
    pub cache: Option<Arc<DiskCache>>,
}

impl Default for RemoteOptions {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            cache: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct CountTokensRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CountTokensResponse {
    input_tokens: usize,
}

/// Count-only backend for Claude models.
pub struct AnthropicCounter {
    model: String,
    headers: HeaderMap,
    api_base: String,
    client: reqwest::Client,
    cache: Option<Arc<DiskCache>>,
}

impl std::fmt::Debug for AnthropicCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicCounter")
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

impl AnthropicCounter {
    /// Build a counter reading the key from `ANTHROPIC_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`TokvizError::MissingCredential`] when the variable is unset or
    /// empty.
    pub fn from_env(model: impl Into<String>, options: RemoteOptions) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        Self::new(model, api_key, options)
    }

    /// Build a counter with an explicit key.
    ///
    /// # Errors
    ///
    /// Returns [`TokvizError::MissingCredential`] for an empty key and
    /// [`TokvizError::ConfigError`] for a key that is not a valid header value
    /// or if the HTTP client cannot be created.
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        options: RemoteOptions,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(TokvizError::MissingCredential {
                variable: API_KEY_ENV.to_string(),
            });
        }

        let headers = request_headers(&api_key)?;
        let client = reqwest::Client::builder().timeout(options.timeout).build().map_err(|e| {
            TokvizError::ConfigError {
                message: format!("Failed to create HTTP client: {e}"),
            }
        })?;

        Ok(Self {
            model: model.into(),
            headers,
            api_base: options.api_base.trim_end_matches('/').to_string(),
            client,
            cache: options.cache,
        })
    }

    /// The Claude model counted against.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Cache key for `text`: `claude:<model>:<text>`.
    #[must_use]
    pub fn cache_key(&self, text: &str) -> String {
        format!("{CACHE_NAMESPACE}:{}:{text}", self.model)
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages/count_tokens", self.api_base)
    }

    async fn request_count(&self, text: &str) -> Result<usize> {
        let endpoint = self.endpoint();
        let body = CountTokensRequest {
            model: &self.model,
            messages: [Message {
                role: "user",
                content: text,
            }],
        };

        debug!("Requesting token count for {} from {endpoint}", self.model);
        let response = self
            .client
            .post(&endpoint)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| TokvizError::Transport {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| TokvizError::Transport {
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(TokvizError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CountTokensResponse =
            serde_json::from_str(&body).map_err(|e| TokvizError::MalformedResponse {
                reason: e.to_string(),
                body: body.clone(),
            })?;
        Ok(parsed.input_tokens)
    }
}

fn request_headers(api_key: &str) -> Result<HeaderMap> {
    let mut key = HeaderValue::from_str(api_key).map_err(|e| TokvizError::ConfigError {
        message: format!("Invalid API key: {e}"),
    })?;
    key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert("x-api-key", key);
    headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
    headers.insert("anthropic-beta", HeaderValue::from_static(TOKEN_COUNTING_BETA));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

#[async_trait]
impl Backend for AnthropicCounter {
    fn name(&self) -> String {
        format!("Claude ({})", self.model)
    }

    async fn encode(&self, text: &str) -> Result<TokenizationResult> {
        let count = self.count_tokens(text).await?;
        Ok(TokenizationResult::count_only(text, count, self.model.clone()))
    }

    async fn count_tokens(&self, text: &str) -> Result<usize> {
        let key = self.cache_key(text);

        if let Some(cache) = &self.cache {
            match cache.get::<usize>(&key) {
                CacheLookup::Hit(count) => {
                    debug!("Cache hit for {} ({count} tokens)", self.model);
                    return Ok(count);
                }
                CacheLookup::Miss => debug!("Cache miss for {}", self.model),
                CacheLookup::Corrupt(reason) => {
                    warn!("Ignoring corrupt cache entry: {reason}");
                }
            }
        }

        let count = self.request_count(text).await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(&key, &count) {
                warn!("Failed to cache token count: {e:#}");
            }
        }

        Ok(count)
    }

    fn supports_token_ids(&self) -> bool {
        false
    }

    fn supports_decoding(&self) -> bool {
        false
    }
}
