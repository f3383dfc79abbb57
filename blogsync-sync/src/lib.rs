//! # blogsync-sync
//!
//! Content API client, atomic content store, and sync orchestration.
//!
//! Build a [`SyncPipeline`] from an [`ApiClient`], a
//! [`Renderer`](blogsync_renderer::Renderer), and a [`ContentStore`], then
//! call [`SyncPipeline::run`] to mirror every article of an author, or
//! [`diff_all`] to preview the changes.

pub mod client;
pub mod diff;
pub mod error;
pub mod pipeline;
pub mod writer;

pub use client::{ApiClient, ArticleSource};
pub use diff::{diff_all, DiffReport, FileDiff};
pub use error::{FetchError, SyncError};
pub use pipeline::{
    ArticleOutcome, ArticleStatus, Listing, RenderedBatch, RunLimits, SyncPipeline, SyncReport,
};
pub use writer::{ContentStore, WriteResult};
