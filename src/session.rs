//! Orchestration of one tokviz invocation.
//!
//! A [`Session`] turns validated model identifiers into backends, runs them and
//! hands the results to a renderer. Multi-model flows build every backend
//! before encoding anything, so a configuration problem with any model is
//! reported before a single request is sent. Encoding then runs concurrently;
//! results keep the requested order and the first failure aborts the run.

use anyhow::{Context, Result};
use futures::future::try_join_all;
use tracing::debug;

use crate::backend::{Backend, BackendSettings, ModelId};
use crate::render::{OutputFormat, RenderOptions, renderer_for};
use crate::tokens::TokenizationResult;

/// Backends built for one invocation.
pub struct Session {
    settings: BackendSettings,
}

impl Session {
    /// Create a session with the given backend settings.
    #[must_use]
    pub const fn new(settings: BackendSettings) -> Self {
        Self {
            settings,
        }
    }

    /// The backend settings in use.
    #[must_use]
    pub const fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    /// Build one backend per model, failing on the first configuration error.
    ///
    /// # Errors
    ///
    /// Returns the construction error of the first model that cannot be built.
    pub fn build_backends(&self, models: &[ModelId]) -> Result<Vec<Box<dyn Backend>>> {
        models
            .iter()
            .map(|model| {
                model
                    .build(&self.settings)
                    .with_context(|| format!("Failed to set up model '{model}'"))
            })
            .collect()
    }

    /// Encode `text` with every model, concurrently, in the given order.
    ///
    /// # Errors
    ///
    /// Returns the first construction or encoding error; no partial results
    /// are returned.
    pub async fn tokenize(&self, models: &[ModelId], text: &str) -> Result<Vec<TokenizationResult>> {
        let backends = self.build_backends(models)?;
        debug!("Encoding {} bytes with {} backend(s)", text.len(), backends.len());

        try_join_all(models.iter().zip(&backends).map(|(model, backend)| async move {
            backend.encode(text).await.with_context(|| format!("Tokenization failed for '{model}'"))
        }))
        .await
    }

    /// Render one model's tokens.
    ///
    /// # Errors
    ///
    /// Returns construction, encoding or rendering errors.
    pub async fn visualize(
        &self,
        model: ModelId,
        text: &str,
        format: OutputFormat,
        options: RenderOptions,
    ) -> Result<String> {
        let results = self.tokenize(&[model], text).await?;
        let renderer = renderer_for(format, options);
        let result = results.first().context("No tokenization result produced")?;
        Ok(renderer.render_single(result)?)
    }

    /// Render several models next to each other.
    ///
    /// # Errors
    ///
    /// Returns construction, encoding or rendering errors.
    pub async fn compare(
        &self,
        models: &[ModelId],
        text: &str,
        format: OutputFormat,
        options: RenderOptions,
    ) -> Result<String> {
        let results = self.tokenize(models, text).await?;
        Ok(renderer_for(format, options).render_comparison(&results)?)
    }

    /// Render only the token count of each model.
    ///
    /// # Errors
    ///
    /// Returns construction, encoding or rendering errors.
    pub async fn count(&self, models: &[ModelId], text: &str, format: OutputFormat) -> Result<String> {
        let results = self.tokenize(models, text).await?;
        Ok(renderer_for(format, RenderOptions::default()).render_count_only(&results)?)
    }
}
