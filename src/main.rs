//! tokviz CLI entry point
//!
//! Parses arguments, runs the command and prints failures as user-friendly
//! errors. Supported commands:
//! - `visualize` - color the tokens of one model (default)
//! - `count` - token counts for one or more models
//! - `compare` - several models side by side
//! - `cache` - inspect or clear the remote count cache

use anyhow::Result;
use clap::Parser;
use tokviz::cli;
use tokviz::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
