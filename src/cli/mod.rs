//! Command-line interface for tokviz.
//!
//! # Commands
//!
//! - `visualize` (default) - color the tokens of one model
//! - `count` - token counts for one or more models
//! - `compare` - several models side by side
//! - `cache` - inspect or clear the remote count cache
//!
//! Text is always read from standard input. Rendered output is the only thing
//! written to stdout; logs and errors go to stderr.
//!
//! ```bash
//! echo "Hello, world!" | tokviz                          # gpt4, terminal
//! echo "Hello, world!" | tokviz -m gpt5 -i -b            # ids and boundaries
//! cat doc.md | tokviz count --models gpt4,claude -f markdown
//! cat doc.md | tokviz compare --models gpt4,gpt5 -f html > tokens.html
//! tokviz cache info
//! ```
//!
//! # Global Options
//!
//! - `--verbose` / `--quiet` - log level (`debug` / `error`); otherwise `RUST_LOG` or `warn`
//! - `--config PATH` - config file (see [`crate::config`])
//! - `--color auto|always|never` - terminal colors

mod cache;
mod common;
mod compare;
mod count;
mod visualize;

pub use cache::{CacheCommand, CacheSubcommand};
pub use common::{DisplayArgs, ModelArgs, read_input};
pub use compare::CompareCommand;
pub use count::CountCommand;
pub use visualize::VisualizeCommand;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::GlobalConfig;

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

/// Process-level settings derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can execute commands with a chosen
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter; `None` leaves `RUST_LOG` (or `warn`) in charge
    pub log_level: Option<String>,
    /// Color mode
    pub color: ColorMode,
    /// Explicit config file
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the color override and the stderr log subscriber.
    ///
    /// Only the first subscriber installed in a process takes effect.
    pub fn apply(&self) {
        match self.color {
            ColorMode::Always => {
                colored::control::set_override(true);
                crossterm::style::force_color_output(true);
            }
            ColorMode::Never => {
                colored::control::set_override(false);
                crossterm::style::force_color_output(false);
            }
            ColorMode::Auto => {}
        }

        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Visualize how LLM tokenizers split text.
#[derive(Parser, Debug)]
#[command(
    name = "tokviz",
    about = "Visualize and compare how LLM tokenizers split text",
    version,
    long_about = "tokviz reads text from stdin and shows how it is tokenized by OpenAI BPE \
encodings, Claude (via the Anthropic token counting API), sentencepiece LLaMA models and \
HuggingFace tokenizer.json files. Output can be a colored terminal view, Markdown or HTML."
)]
pub struct Cli {
    /// Subcommand to run; `visualize` when omitted
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    visualize: VisualizeCommand,

    /// Log debug output to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file (default: ~/.tokviz/config.toml, or TOKVIZ_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// When to use terminal colors
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Color the tokens of one model (default)
    Visualize(VisualizeCommand),
    /// Count tokens for one or more models
    Count(CountCommand),
    /// Compare several models side by side
    Compare(CompareCommand),
    /// Inspect or clear the remote count cache
    Cache(CacheCommand),
}

impl Cli {
    /// Run the parsed command.
    ///
    /// # Errors
    ///
    /// Returns whatever the command fails with; `main` turns it into a
    /// user-facing message.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            color: self.color,
            config_path: self.config.clone(),
        }
    }

    /// Run the parsed command with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns config file errors and command failures.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.apply();
        let global = GlobalConfig::load_with_optional(config.config_path.clone()).await?;

        match self.command {
            Some(Commands::Visualize(cmd)) => cmd.execute(&global).await,
            Some(Commands::Count(cmd)) => cmd.execute(&global).await,
            Some(Commands::Compare(cmd)) => cmd.execute(&global).await,
            Some(Commands::Cache(cmd)) => cmd.execute(&global).await,
            None => self.visualize.execute(&global).await,
        }
    }
}
