//! Token data model.
//!
//! A [`TokenizationResult`] is what every backend produces and every renderer
//! consumes. It is plain data: an ordered list of [`Token`]s, the total count,
//! the source text and a label naming the model or encoding that produced it.
//!
//! # Shapes
//!
//! - **Per-token backends** fill `tokens` with one entry per engine token and
//!   `total_count == tokens.len()`.
//! - **Count-only backends** hold a single sentinel token spanning the whole
//!   input (no id, `start = 0`, `end = source_text.len()`), and `total_count` is
//!   whatever the external counter reported.
//!
//! # Usage
//!
//! ```rust
//! use tokviz::tokens::{Token, TokenizationResult};
//!
//! let result = TokenizationResult::count_only("Hello", 2, "claude-3-5-haiku");
//! assert!(result.is_count_only());
//! assert_eq!(result.total_count, 2);
//! assert_eq!(result.tokens[0], Token::sentinel("Hello"));
//! ```

use serde::{Deserialize, Serialize};

/// Value used for an absent token id when a token is serialized.
pub const ABSENT_ID: i64 = -1;

/// A single token and its byte span in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Decoded text of this token
    pub text: String,
    /// Engine token id, `None` when the backend has no per-token ids
    #[serde(with = "sentinel_id")]
    pub id: Option<u32>,
    /// Start byte offset in the source text
    pub start: usize,
    /// End byte offset in the source text (exclusive)
    pub end: usize,
}

impl Token {
    /// Create a token with an id.
    #[must_use]
    pub fn new(text: impl Into<String>, id: u32, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            id: Some(id),
            start,
            end,
        }
    }

    /// Create the placeholder token used by count-only backends.
    #[must_use]
    pub fn sentinel(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            text,
            id: None,
            start: 0,
            end,
        }
    }

    /// The id as a signed integer, [`ABSENT_ID`] when absent.
    #[must_use]
    pub fn raw_id(&self) -> i64 {
        self.id.map_or(ABSENT_ID, i64::from)
    }
}

/// The full result of tokenizing one text with one backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizationResult {
    /// Tokens ordered by non-decreasing `start`
    pub tokens: Vec<Token>,
    /// Number of tokens the backend reports for the text
    pub total_count: usize,
    /// The text that was tokenized
    pub source_text: String,
    /// Model or encoding label shown in headers
    pub model_label: String,
}

impl TokenizationResult {
    /// Build a per-token result; `total_count` is the number of tokens.
    #[must_use]
    pub fn from_tokens(
        tokens: Vec<Token>,
        source_text: impl Into<String>,
        model_label: impl Into<String>,
    ) -> Self {
        Self {
            total_count: tokens.len(),
            tokens,
            source_text: source_text.into(),
            model_label: model_label.into(),
        }
    }

    /// Build the single-sentinel-token shape used by count-only backends.
    #[must_use]
    pub fn count_only(
        source_text: impl Into<String>,
        total_count: usize,
        model_label: impl Into<String>,
    ) -> Self {
        let source_text = source_text.into();
        Self {
            tokens: vec![Token::sentinel(source_text.clone())],
            total_count,
            source_text,
            model_label: model_label.into(),
        }
    }

    /// `true` when the result carries no per-token detail.
    #[must_use]
    pub fn is_count_only(&self) -> bool {
        self.tokens.len() == 1 && self.tokens[0].id.is_none()
    }

    /// `true` when at least one token carries an id.
    #[must_use]
    pub fn has_token_ids(&self) -> bool {
        self.tokens.iter().any(|token| token.id.is_some())
    }

    /// Concatenate token texts in ascending `start` order.
    #[must_use]
    pub fn reconstructed_text(&self) -> String {
        let mut ordered: Vec<&Token> = self.tokens.iter().collect();
        ordered.sort_by_key(|token| token.start);
        ordered.iter().map(|token| token.text.as_str()).collect()
    }
}

/// Format a token count for human-readable display.
///
/// Formats large numbers with k/M suffixes for readability.
///
/// # Examples
///
/// ```rust
/// use tokviz::tokens::format_token_count;
///
/// assert_eq!(format_token_count(500), "500");
/// assert_eq!(format_token_count(1500), "1.5k");
/// assert_eq!(format_token_count(1500000), "1.5M");
/// ```
#[must_use]
pub fn format_token_count(count: usize) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}k", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

mod sentinel_id {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ABSENT_ID;

    pub fn serialize<S: Serializer>(id: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(id.map_or(ABSENT_ID, i64::from))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if raw < 0 {
            return Ok(None);
        }
        u32::try_from(raw).map(Some).map_err(serde::de::Error::custom)
    }
}
