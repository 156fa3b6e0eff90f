//! Test utilities for tokviz
//!
//! Helpers shared by unit tests and the `tests/` suites:
//! - [`fixtures`] - ready-made [`TokenizationResult`](crate::tokens::TokenizationResult)s
//! - [`ScriptedEngine`] - a deterministic [`PieceEngine`] that needs no model files
//! - [`init_test_logging`] - opt-in tracing output
//!
//! # Example
//!
//! ```rust,no_run
//! use tokviz::render::{MarkdownRenderer, Renderer};
//! use tokviz::test_utils::fixtures;
//!
//! let md = MarkdownRenderer::default().render_single(&fixtures::hello_world()).unwrap();
//! assert!(md.contains("**Total tokens:** 4"));
//! ```

pub mod fixtures;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::backend::{Piece, PieceEngine};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, tests stay silent.
///
/// ```bash
/// RUST_LOG=tokviz=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// Piece engine with fixed, model-free behavior.
///
/// `chunks(n)` cuts the input every `n` bytes (ids count up from 0), which
/// splits multi-byte characters the way byte-level BPE can. `failing` rejects
/// every input.
#[derive(Debug, Clone)]
pub struct ScriptedEngine {
    chunk: usize,
    failure: Option<String>,
}

impl ScriptedEngine {
    /// Split every `chunk` bytes.
    #[must_use]
    pub fn chunks(chunk: usize) -> Self {
        Self {
            chunk: chunk.max(1),
            failure: None,
        }
    }

    /// Fail every call with `reason`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            chunk: 1,
            failure: Some(reason.into()),
        }
    }
}

impl PieceEngine for ScriptedEngine {
    fn name(&self) -> String {
        format!("Scripted ({}-byte chunks)", self.chunk)
    }

    fn label(&self) -> String {
        "scripted".to_string()
    }

    fn split(&self, text: &str) -> Result<Vec<Piece>, String> {
        if let Some(reason) = &self.failure {
            return Err(reason.clone());
        }

        Ok(text
            .as_bytes()
            .chunks(self.chunk)
            .enumerate()
            .map(|(i, bytes)| Piece::new(i as u32, bytes))
            .collect())
    }
}
