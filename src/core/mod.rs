//! Core types for tokviz
//!
//! This module holds the error system shared by every other module:
//! - [`TokvizError`] - Enumerated error types covering all tokviz failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to the user-friendly format
//!
//! Backends and renderers return [`Result<T>`], the crate-wide alias over
//! [`TokvizError`]. Command implementations use `anyhow` on top of it for context.

pub mod error;

pub use error::{ErrorContext, TokvizError, user_friendly_error};

/// Result alias used by backends, renderers and the cache.
pub type Result<T> = std::result::Result<T, TokvizError>;
