//! `blogsync.yaml` — per-site sync configuration.
//!
//! # Layout
//!
//! ```text
//! <site root>/
//!   blogsync.yaml            (author + endpoints + store location)
//!   src/content/blog/        (default content store)
//! ```
//!
//! # API pattern
//!
//! Every function takes the config path explicitly (`_at`); the CLI resolves
//! it from `--config` or [`DEFAULT_FILE`] in the working directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{io_err, ConfigError};

/// File name looked up in the working directory when `--config` is absent.
pub const DEFAULT_FILE: &str = "blogsync.yaml";
pub const DEFAULT_API_BASE: &str = "https://dev.to/api/articles";
pub const DEFAULT_CONTENT_DIR: &str = "src/content/blog";
pub const DEFAULT_EXTENSION: &str = "md";

/// Sync settings for one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Upstream username whose articles are mirrored.
    pub author: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Directory holding one file per slug. Relative paths resolve against
    /// the config file's directory.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Per-request timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Hard deadline for a whole sync run.
    #[serde(default = "default_run_deadline")]
    pub run_deadline_secs: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_owned()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CONTENT_DIR)
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_owned()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_run_deadline() -> u64 {
    120
}

impl Config {
    /// A config with every optional field at its default.
    pub fn for_author(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            api_base: default_api_base(),
            content_dir: default_content_dir(),
            extension: default_extension(),
            request_timeout_secs: default_request_timeout(),
            run_deadline_secs: default_run_deadline(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn run_deadline(&self) -> Duration {
        Duration::from_secs(self.run_deadline_secs)
    }

    /// `content_dir`, anchored at `base` when relative.
    pub fn content_dir_from(&self, base: &Path) -> PathBuf {
        if self.content_dir.is_absolute() {
            self.content_dir.clone()
        } else {
            base.join(&self.content_dir)
        }
    }

    /// Reject values that would make a sync run meaningless or unsafe.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.author.trim().is_empty() {
            return Err(invalid("author", "must not be empty"));
        }
        if self.author.contains(['/', '?', '#']) {
            return Err(invalid("author", "must be a bare username"));
        }
        Url::parse(&self.api_base).map_err(|e| invalid("api_base", e.to_string()))?;
        if self.extension.is_empty() || self.extension.contains(['.', '/', '\\']) {
            return Err(invalid("extension", "must be a bare extension such as `md`"));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs", "must be at least 1"));
        }
        if self.run_deadline_secs == 0 {
            return Err(invalid("run_deadline_secs", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load and validate the config at `path`.
///
/// Returns `ConfigError::NotFound` if absent,
/// `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let config: Config = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    config.validate()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save `config` to `path`.
///
/// Write flow: serialize → `.tmp` sibling → `rename`.
pub fn save_at(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_FILE.to_owned());
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp_path, yaml).map_err(|e| io_err(&tmp_path, e))?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

/// Create a new config at `path`. Refuses to overwrite an existing file.
pub fn init_at(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    config.validate()?;
    save_at(path, config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
