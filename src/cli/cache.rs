//! `tokviz cache`: inspect or clear the remote count cache.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::cache::DiskCache;
use crate::config::GlobalConfig;

/// Manage cached remote token counts.
#[derive(Args, Debug, Clone)]
pub struct CacheCommand {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache operations.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSubcommand {
    /// Delete every cached count
    Clear,
    /// Show where the cache lives and how much it holds
    Info,
}

impl CacheCommand {
    /// Run the subcommand against the configured cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be resolved, listed or
    /// removed.
    pub async fn execute(self, global: &GlobalConfig) -> Result<()> {
        let cache = DiskCache::new(global.cache_dir.as_deref())?;
        println!("{}", self.run(&cache)?);
        Ok(())
    }

    /// Perform the operation and return the report.
    ///
    /// # Errors
    ///
    /// See [`CacheCommand::execute`].
    pub fn run(&self, cache: &DiskCache) -> Result<String> {
        match self.command {
            CacheSubcommand::Clear => {
                let entries = cache.entry_count()?;
                cache.clear()?;
                Ok(format!(
                    "{} Removed {entries} cached count(s) from {}",
                    "✓".green(),
                    cache.cache_dir().display()
                ))
            }
            CacheSubcommand::Info => Ok(format!(
                "{}\n  Location: {}\n  Entries:  {}\n  Size:     {}",
                "Token count cache".bold(),
                cache.cache_dir().display(),
                cache.entry_count()?,
                format_size(cache.size_bytes()?)
            )),
        }
    }
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 { format!("{bytes} B") } else { format!("{size:.1} {}", UNITS[unit]) }
}
