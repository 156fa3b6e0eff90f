//! `tokviz count`: token counts only, for one or more models.

use anyhow::Result;
use clap::Args;

use super::common::{ModelArgs, read_stdin, write_output};
use crate::backend::ModelId;
use crate::backend::registry::resolve;
use crate::config::GlobalConfig;
use crate::render::OutputFormat;
use crate::session::Session;

/// Count tokens without per-token detail.
///
/// ```bash
/// cat prompt.txt | tokviz count --models gpt4,gpt5,claude
/// ```
#[derive(Args, Debug, Clone)]
pub struct CountCommand {
    /// Comma-separated models to count with
    #[arg(short, long, value_delimiter = ',', default_value = "gpt4", value_name = "MODELS")]
    pub models: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub backend: ModelArgs,
}

impl CountCommand {
    /// Validate the models, read stdin and print the counts.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown models, empty input, or any backend
    /// failure.
    pub async fn execute(self, global: &GlobalConfig) -> Result<()> {
        let models = resolve(&self.models)?;
        let input = read_stdin()?;
        let output = self.run(&models, global, &input).await?;
        write_output(&output)
    }

    /// Count `input` with already validated models.
    ///
    /// # Errors
    ///
    /// Returns the first backend construction or encoding error.
    pub async fn run(&self, models: &[ModelId], global: &GlobalConfig, input: &str) -> Result<String> {
        let session = Session::new(self.backend.settings(global, models)?);
        session.count(models, input, self.format).await
    }
}
