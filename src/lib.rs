//! tokviz - see how LLM tokenizers split text
//!
//! tokviz runs one text through several tokenizers and renders the result as a
//! colored terminal view, GitHub-flavored Markdown or a standalone HTML page.
//!
//! # Architecture Overview
//!
//! ```text
//! cli ──▶ session ──▶ backend::registry ──▶ Backend::encode ──▶ render::Renderer
//!                                               │
//!                                               └─ anthropic ──▶ cache (disk)
//! ```
//!
//! - Every tokenizer implements [`backend::Backend`]. Local engines (BPE via
//!   `tiktoken-rs`, sentencepiece, HuggingFace `tokenizer.json`) report one
//!   token per engine id; the Anthropic backend only reports a total count.
//! - Every backend produces a [`tokens::TokenizationResult`], plain data that the
//!   renderers consume.
//! - Remote counts are cached on disk by [`cache::DiskCache`], so identical
//!   queries never reach the API twice.
//! - Every output format implements [`render::Renderer`] and shares one color
//!   palette, so token `i` has the same color everywhere.
//!
//! # Core Modules
//!
//! - [`backend`] - Tokenizer backends and the model registry
//! - [`tokens`] - Token and result data model
//! - [`cache`] - Content-addressed disk cache for remote counts
//! - [`render`] - Terminal, Markdown and HTML renderers
//! - [`session`] - Builds backends, runs them concurrently, renders results
//! - [`cli`] - Command-line interface
//! - [`config`] - Config file and cache directory resolution
//! - [`core`] - Error types and user-facing error formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use tokviz::backend::{BackendSettings, registry::resolve};
//! use tokviz::render::{OutputFormat, RenderOptions};
//! use tokviz::session::Session;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let session = Session::new(BackendSettings::default());
//! let models = resolve(&["gpt4", "gpt5"])?;
//! let markdown = session
//!     .compare(&models, "Hello, world!", OutputFormat::Markdown, RenderOptions::default())
//!     .await?;
//! println!("{markdown}");
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod cache;
pub mod cli;
pub mod config;
pub mod core;
pub mod render;
pub mod session;
pub mod tokens;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
