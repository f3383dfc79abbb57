//! Tera rendering engine — [`Renderer`].
//!
//! # Output layout
//!
//! ```text
//! ---
//! id: 1234
//! title: "..."
//! ...                      (keys in FRONT_MATTER_KEYS order)
//! tags: ["a", "b"]
//! ---
//!
//! <body_markdown verbatim>
//! ```

use tera::Tera;

use blogsync_core::types::{ArticleContent, RenderedDocument};

use crate::context::DocumentContext;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded at compile time.
// ---------------------------------------------------------------------------

const ARTICLE_TEMPLATE: &str = "article.md";
const ARTICLE_SOURCE: &str = include_str!("templates/article.md.tera");

/// Front-matter keys in the order they are written.
pub const FRONT_MATTER_KEYS: &[&str] = &[
    "id",
    "title",
    "description",
    "path",
    "url",
    "commentsCount",
    "publicReactionsCount",
    "publishedTimestamp",
    "positiveReactionsCount",
    "coverImage",
    "socialImage",
    "canonicalUrl",
    "createdAt",
    "editedAt",
    "crosspostedAt",
    "publishedAt",
    "lastCommentAt",
    "readingTimeMinutes",
    "tags",
];

fn build_tera() -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(ARTICLE_TEMPLATE, ARTICLE_SOURCE)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Renders articles into content files.
///
/// Uses the embedded template only. Create once with [`Renderer::new`] and
/// reuse; rendering takes `&self` and is safe to call from concurrent tasks.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Construct a new [`Renderer`] with the embedded template.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Renderer { tera: build_tera()? })
    }

    /// Render one article. Same input, same bytes.
    pub fn render(&self, content: &ArticleContent) -> Result<RenderedDocument, RenderError> {
        let ctx = DocumentContext::from_content(content);
        self.render_with_context(content, &ctx)
    }

    /// Render using a caller-provided [`DocumentContext`].
    pub fn render_with_context(
        &self,
        content: &ArticleContent,
        ctx: &DocumentContext,
    ) -> Result<RenderedDocument, RenderError> {
        let rendered = self.tera.render(ARTICLE_TEMPLATE, &ctx.to_tera_context()?)?;
        Ok(RenderedDocument {
            slug: content.slug().clone(),
            content: rendered,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
