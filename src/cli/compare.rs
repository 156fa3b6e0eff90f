//! `tokviz compare`: several models side by side.

use anyhow::Result;
use clap::Args;

use super::common::{DisplayArgs, ModelArgs, read_stdin, write_output};
use crate::backend::ModelId;
use crate::backend::registry::resolve;
use crate::config::GlobalConfig;
use crate::render::OutputFormat;
use crate::session::Session;

/// Compare how several models tokenize the same text.
///
/// ```bash
/// echo "naïve café" | tokviz compare --models gpt4,gpt5 --show-boundaries
/// ```
#[derive(Args, Debug, Clone)]
pub struct CompareCommand {
    /// Comma-separated models to compare
    #[arg(short, long, value_delimiter = ',', required = true, value_name = "MODELS")]
    pub models: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub display: DisplayArgs,

    #[command(flatten)]
    pub backend: ModelArgs,
}

impl CompareCommand {
    /// Validate the models, read stdin and print the comparison.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown models, empty input, or any backend or
    /// rendering failure.
    pub async fn execute(self, global: &GlobalConfig) -> Result<()> {
        let models = resolve(&self.models)?;
        let input = read_stdin()?;
        let output = self.run(&models, global, &input).await?;
        write_output(&output)
    }

    /// Compare `input` across already validated models.
    ///
    /// # Errors
    ///
    /// Returns the first backend construction, encoding or rendering error.
    pub async fn run(&self, models: &[ModelId], global: &GlobalConfig, input: &str) -> Result<String> {
        let session = Session::new(self.backend.settings(global, models)?);
        session.compare(models, input, self.format, self.display.options()).await
    }
}
