//! Blogsync core library — article types, payload validation, configuration.
//!
//! - [`types`] — newtypes and article records
//! - [`schema`] — validation of raw API JSON into [`types`]
//! - [`config`] — `blogsync.yaml` load / save / init
//! - [`error`] — [`ConfigError`], [`ValidationError`]

pub mod config;
pub mod error;
pub mod schema;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, ValidationError, Violation, ViolationKind};
pub use types::{
    ArticleContent, ArticleId, ArticleMeta, ArticleSummary, RenderedDocument, Slug,
};
