//! `tokviz visualize`: show how one model splits the input.

use anyhow::Result;
use clap::Args;

use super::common::{DisplayArgs, ModelArgs, read_stdin, write_output};
use crate::backend::ModelId;
use crate::config::GlobalConfig;
use crate::render::OutputFormat;
use crate::session::Session;

/// Visualize the tokens of one model.
///
/// This is also what runs when no subcommand is given.
///
/// ```bash
/// echo "Hello, world!" | tokviz visualize --model gpt4 --show-ids
/// echo "Hello, world!" | tokviz -m gpt5 -f markdown
/// ```
#[derive(Args, Debug, Clone)]
pub struct VisualizeCommand {
    /// Model to tokenize with (gpt4, gpt3.5, gpt5, gpt5-mini, gpt5-nano, claude, llama, llama3)
    #[arg(short, long, default_value = "gpt4", value_name = "MODEL")]
    pub model: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub display: DisplayArgs,

    #[command(flatten)]
    pub backend: ModelArgs,
}

impl VisualizeCommand {
    /// Validate the model, read stdin and print the rendering.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown model, empty input, or any backend or
    /// rendering failure.
    pub async fn execute(self, global: &GlobalConfig) -> Result<()> {
        let model: ModelId = self.model.parse()?;
        let input = read_stdin()?;
        let output = self.run(model, global, &input).await?;
        write_output(&output)
    }

    /// Render `input` with an already validated model.
    ///
    /// # Errors
    ///
    /// Returns backend construction, encoding or rendering errors.
    pub async fn run(&self, model: ModelId, global: &GlobalConfig, input: &str) -> Result<String> {
        let session = Session::new(self.backend.settings(global, &[model])?);
        session.visualize(model, input, self.format, self.display.options()).await
    }
}
