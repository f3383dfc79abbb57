//! Error types for blogsync-sync.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use blogsync_core::ValidationError;
use blogsync_renderer::RenderError;

/// Errors from rendering and the content store.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}

/// Everything that can go wrong reading from the content API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured base URL cannot take path segments.
    #[error("invalid API base URL `{0}`")]
    BaseUrl(String),

    /// `reqwest::Client` could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, DNS, TLS, or timeout failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Any non-2xx response.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    /// Body was not JSON.
    #[error("{url} returned malformed JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON did not match the expected payload shape.
    #[error("{url} returned an unexpected payload: {source}")]
    Invalid {
        url: String,
        #[source]
        source: ValidationError,
    },
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport { source, .. } if source.is_timeout())
    }
}
