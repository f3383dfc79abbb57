//! `blogsync init --author <name> [--content-dir <dir>] [--api-base <url>]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use blogsync_core::{
    config::{self, DEFAULT_FILE},
    Config,
};

/// Write a starter config.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Upstream username whose articles are mirrored.
    #[arg(long, short = 'a')]
    pub author: String,

    /// Content directory, relative to the config file.
    #[arg(long, value_name = "DIR")]
    pub content_dir: Option<PathBuf>,

    /// Articles endpoint.
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Where to write the config.
    #[arg(long, short = 'c', value_name = "FILE", default_value = DEFAULT_FILE)]
    pub config: PathBuf,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let mut cfg = Config::for_author(self.author);
        if let Some(dir) = self.content_dir {
            cfg.content_dir = dir;
        }
        if let Some(base) = self.api_base {
            cfg.api_base = base;
        }

        config::init_at(&self.config, &cfg)
            .with_context(|| format!("failed to init '{}'", self.config.display()))?;

        println!("✓ Wrote {}", self.config.display());
        println!("  author:      {}", cfg.author);
        println!("  content dir: {}", cfg.content_dir.display());
        Ok(())
    }
}
