//! # blogsync-renderer
//!
//! Tera-based renderer that turns a validated [`ArticleContent`] into a
//! content file: a YAML front-matter block followed by the raw markdown body.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use blogsync_core::ArticleContent;
//! use blogsync_renderer::Renderer;
//!
//! fn print(article: &ArticleContent) {
//!     if let Ok(renderer) = Renderer::new() {
//!         if let Ok(doc) = renderer.render(article) {
//!             println!("{}: {} bytes", doc.slug, doc.content.len());
//!         }
//!     }
//! }
//! ```
//!
//! [`ArticleContent`]: blogsync_core::ArticleContent

pub mod context;
pub mod engine;
pub mod error;

pub use context::DocumentContext;
pub use engine::{Renderer, FRONT_MATTER_KEYS};
pub use error::RenderError;
