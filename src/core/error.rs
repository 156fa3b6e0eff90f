//! Error handling for tokviz
//!
//! This module provides the error types and user-friendly error reporting for the
//! tokenizer visualizer. The error system is built around two principles:
//! 1. **Strongly-typed errors** so backends and renderers can be matched precisely
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`TokvizError`] - Enumerated error types for every failure case
//! - [`ErrorContext`] - Wrapper that adds details and suggestions for display
//!
//! # Error Categories
//!
//! - **Configuration** (raised while building a backend, never retried):
//!   [`TokvizError::MissingCredential`], [`TokvizError::ModelArtifactNotFound`],
//!   [`TokvizError::ModelArtifactInvalid`], [`TokvizError::UnknownModel`],
//!   [`TokvizError::UnknownEncoding`], [`TokvizError::FeatureDisabled`],
//!   [`TokvizError::ConfigError`]
//! - **Transport** (raised by the call that triggered them):
//!   [`TokvizError::Transport`], [`TokvizError::ApiStatus`],
//!   [`TokvizError::MalformedResponse`]
//! - **Engine**: [`TokvizError::EncodeFailed`]
//! - **Rendering**: [`TokvizError::RenderFailed`]
//! - **Input**: [`TokvizError::EmptyInput`]
//!
//! Cache failures never show up here as call failures: the cache downgrades
//! them to misses and logs them.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tokviz::core::{TokvizError, user_friendly_error};
//!
//! let error = TokvizError::MissingCredential {
//!     variable: "ANTHROPIC_API_KEY".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error with a suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for tokviz operations.
///
/// Configuration variants are produced while a backend is being constructed, so
/// a bad model name or a missing credential stops the invocation before any text
/// is encoded. Transport and engine variants only come out of the specific
/// `encode`/`count_tokens` call that failed.
#[derive(Error, Debug, Clone)]
pub enum TokvizError {
    /// A required credential is not present in the environment.
    #[error("Environment variable {variable} is not set")]
    MissingCredential {
        /// Name of the environment variable that should hold the credential
        variable: String,
    },

    /// A local tokenizer artifact (model or vocabulary file) does not exist.
    #[error("Tokenizer file not found: {path}")]
    ModelArtifactNotFound {
        /// Path that was checked
        path: String,
    },

    /// A local tokenizer artifact exists but the engine refused to load it.
    #[error("Failed to load tokenizer file {path}: {reason}")]
    ModelArtifactInvalid {
        /// Path that failed to load
        path: String,
        /// Engine-reported reason
        reason: String,
    },

    /// The requested model identifier is not in the registry.
    #[error("Unknown model: {name}")]
    UnknownModel {
        /// Identifier as typed by the user
        name: String,
        /// Closest supported identifier, if any
        suggestion: Option<String>,
    },

    /// The requested byte-pair encoding profile does not exist.
    #[error("Unknown encoding: {name}")]
    UnknownEncoding {
        /// Encoding name as typed by the user
        name: String,
    },

    /// The model needs a cargo feature this binary was built without.
    #[error("Model '{model}' requires the '{feature}' feature, which this build does not include")]
    FeatureDisabled {
        /// Model identifier
        model: String,
        /// Cargo feature name
        feature: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// The request to a remote tokenizer never produced a response.
    #[error("Request to {endpoint} failed: {reason}")]
    Transport {
        /// Endpoint URL
        endpoint: String,
        /// Transport-level reason (connection refused, timeout, ...)
        reason: String,
    },

    /// The remote tokenizer answered with a non-success status.
    #[error("API request failed with status {status}: {body}")]
    ApiStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// The remote tokenizer answered 2xx but the payload could not be decoded.
    #[error("Failed to decode API response: {reason}")]
    MalformedResponse {
        /// Decoder error
        reason: String,
        /// Raw response body
        body: String,
    },

    /// A local engine failed to encode or decode text.
    #[error("{backend} failed to encode text: {reason}")]
    EncodeFailed {
        /// Backend display name
        backend: String,
        /// Engine-reported reason
        reason: String,
    },

    /// Rendering or Markdown conversion failed.
    #[error("Rendering failed: {reason}")]
    RenderFailed {
        /// What went wrong
        reason: String,
    },

    /// Nothing was read from standard input.
    #[error("No input provided (stdin is empty)")]
    EmptyInput,

    /// Generic error with a message
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl TokvizError {
    /// Returns `true` for errors raised while constructing a backend.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential { .. }
                | Self::ModelArtifactNotFound { .. }
                | Self::ModelArtifactInvalid { .. }
                | Self::UnknownModel { .. }
                | Self::UnknownEncoding { .. }
                | Self::FeatureDisabled { .. }
                | Self::ConfigError { .. }
        )
    }

    /// Returns `true` for errors raised by a remote call.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::ApiStatus { .. } | Self::MalformedResponse { .. }
        )
    }
}

/// Error wrapper carrying a user-facing suggestion and details.
///
/// `ErrorContext` is what the binary prints when a command fails. It keeps the
/// underlying [`TokvizError`], prefixed by the operation that failed when one is
/// known, and adds two optional lines:
/// - **details** (yellow): why the error happened
/// - **suggestion** (green): what to do about it
///
/// # Examples
///
/// ```rust,no_run
/// use tokviz::core::{ErrorContext, TokvizError};
///
/// let context = ErrorContext::new(TokvizError::EmptyInput)
///     .with_suggestion("Pipe some text into tokviz, e.g. echo hello | tokviz")
///     .with_details("tokviz reads the text to tokenize from standard input");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: TokvizError,
    /// What was being done when the error occurred, e.g. `Tokenization failed for 'claude'`
    pub context: Option<String>,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: TokvizError) -> Self {
        Self {
            error,
            context: None,
            suggestion: None,
            details: None,
        }
    }

    /// Name the operation that failed.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        match &self.context {
            Some(context) => eprintln!("{}: {context}: {}", "error".red().bold(), self.error),
            None => eprintln!("{}: {}", "error".red().bold(), self.error),
        }

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{context}: ")?;
        }
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// Recognizes [`TokvizError`] anywhere in the chain (commands usually wrap
/// backend errors with `anyhow::Context`) and keeps the messages wrapped around
/// it as the context. I/O errors get a permissions hint. Anything else is shown
/// with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let mut outer = Vec::new();
    for cause in error.chain() {
        if let Some(tokviz_error) = cause.downcast_ref::<TokvizError>() {
            let ctx = create_error_context(tokviz_error.clone());
            return if outer.is_empty() { ctx } else { ctx.with_context(outer.join(": ")) };
        }
        outer.push(cause.to_string());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::PermissionDenied {
            return ErrorContext::new(TokvizError::Other {
                message: io_error.to_string(),
            })
            .with_suggestion("Check file permissions on the cache and tokenizer model paths");
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(TokvizError::Other {
        message,
    })
}

/// Map each [`TokvizError`] variant to a context with tailored suggestions.
fn create_error_context(error: TokvizError) -> ErrorContext {
    match &error {
        TokvizError::MissingCredential {
            variable,
        } => {
            let suggestion = format!("Export {variable} before running tokviz, or pick a local model");
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("The claude model counts tokens through the Anthropic API")
        }
        TokvizError::ModelArtifactNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the --llama-model / --llama3-tokenizer path"),
        TokvizError::ModelArtifactInvalid {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "llama expects a sentencepiece tokenizer.model, llama3 expects a HuggingFace tokenizer.json",
        ),
        TokvizError::UnknownModel {
            suggestion,
            ..
        } => {
            let supported = crate::backend::registry::supported_models().join(", ");
            let ctx = ErrorContext::new(error.clone())
                .with_details(format!("Supported models: {supported}"));
            match suggestion {
                Some(name) => ctx.with_suggestion(format!("Did you mean '{name}'?")),
                None => ctx,
            }
        }
        TokvizError::UnknownEncoding {
            ..
        } => ErrorContext::new(error).with_suggestion(format!(
            "Use one of: {}",
            crate::backend::bpe::SUPPORTED_ENCODINGS.join(", ")
        )),
        TokvizError::FeatureDisabled {
            feature,
            ..
        } => {
            let suggestion = format!("Rebuild with `cargo install tokviz --features {feature}`");
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        TokvizError::Transport {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check your network connection and try again")
            .with_details("Requests are not retried automatically"),
        TokvizError::ApiStatus {
            status,
            ..
        } => {
            let suggestion = match status {
                401 | 403 => "Check that ANTHROPIC_API_KEY is valid",
                404 => "Check the --claude-model name",
                429 => "You are being rate limited; wait a moment and retry",
                _ => "Retry later or run with --verbose for more information",
            };
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        TokvizError::EmptyInput => ErrorContext::new(error)
            .with_suggestion("Pipe text into tokviz, e.g. `echo 'Hello, world!' | tokviz`"),
        _ => ErrorContext::new(error),
    }
}
