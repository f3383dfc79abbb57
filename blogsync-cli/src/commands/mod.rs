//! Subcommands and the config resolution they share.

pub mod diff;
pub mod init;
pub mod list;
pub mod sync;

use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use blogsync_core::{
    config::{self, DEFAULT_FILE},
    Config, ConfigError,
};
use blogsync_renderer::Renderer;
use blogsync_sync::{ApiClient, ContentStore, RunLimits, SyncPipeline};

/// Where the config lives and which of its values to override.
#[derive(Args, Debug, Clone)]
pub struct SiteArgs {
    /// Path to the config file.
    #[arg(long, short = 'c', value_name = "FILE", default_value = DEFAULT_FILE)]
    pub config: PathBuf,

    /// Upstream username (overrides `author`).
    #[arg(long, short = 'a', env = "BLOGSYNC_AUTHOR")]
    pub author: Option<String>,

    /// Content directory (overrides `content_dir`).
    #[arg(long, value_name = "DIR", env = "BLOGSYNC_CONTENT_DIR")]
    pub content_dir: Option<PathBuf>,

    /// Articles endpoint (overrides `api_base`).
    #[arg(long, value_name = "URL", env = "BLOGSYNC_API_BASE")]
    pub api_base: Option<String>,
}

/// A fully resolved config plus the absolute-ish store location.
#[derive(Debug, Clone)]
pub struct Site {
    pub config: Config,
    pub content_dir: PathBuf,
}

impl SiteArgs {
    /// Load the config file, apply overrides, and validate.
    ///
    /// A missing config file is fine as long as `--author` (or
    /// `BLOGSYNC_AUTHOR`) supplies the one required value.
    pub fn resolve(&self) -> Result<Site> {
        let mut config = match config::load_at(&self.config) {
            Ok(config) => config,
            Err(ConfigError::NotFound { .. }) if self.author.is_some() => {
                Config::for_author(String::new())
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("cannot load '{}'", self.config.display()))
            }
        };

        if let Some(author) = &self.author {
            config.author = author.clone();
        }
        if let Some(dir) = &self.content_dir {
            config.content_dir = dir.clone();
        }
        if let Some(base) = &self.api_base {
            config.api_base = base.clone();
        }
        config.validate().context("invalid configuration")?;

        let base_dir = self
            .config
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let content_dir = config.content_dir_from(base_dir);
        Ok(Site {
            config,
            content_dir,
        })
    }
}

impl Site {
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::from_config(&self.config).context("cannot build API client")
    }

    pub fn pipeline(&self) -> Result<SyncPipeline<ApiClient>> {
        let renderer = Renderer::new().context("cannot load article template")?;
        let store = ContentStore::new(&self.content_dir, &self.config.extension);
        Ok(SyncPipeline::new(
            self.client()?,
            renderer,
            store,
            RunLimits::from_config(&self.config),
        ))
    }
}

/// Drive `fut` to completion on a single-threaded runtime.
pub fn block_on<F: Future>(fut: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;
    Ok(runtime.block_on(fut))
}
