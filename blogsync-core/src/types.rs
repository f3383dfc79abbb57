//! Article records as delivered by the content API.
//!
//! Values of these types only come out of [`crate::schema`], so every field
//! has already been checked against its constraint.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Upstream numeric article identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub u64);

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for ArticleId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// URL-safe article key. Doubles as the stored file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(pub String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Slug {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Slug {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Fields common to the list-item and full-content payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleMeta {
    pub id: ArticleId,
    /// Always `"article"`.
    pub type_of: String,
    pub title: String,
    pub description: String,
    pub readable_publish_date: String,
    pub slug: Slug,
    pub path: String,
    pub url: String,
    pub comments_count: u64,
    pub public_reactions_count: u64,
    pub collection_id: Option<u64>,
    pub published_timestamp: String,
    pub positive_reactions_count: u64,
    pub cover_image: String,
    pub social_image: String,
    pub canonical_url: String,
    pub created_at: String,
    pub edited_at: Option<String>,
    pub crossposted_at: Option<String>,
    pub published_at: String,
    pub last_comment_at: String,
    pub reading_time_minutes: u64,
}

/// One entry of `GET <base>?username=<author>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    #[serde(flatten)]
    pub meta: ArticleMeta,
    pub tag_list: Vec<String>,
    /// Comma-joined form of `tag_list`, as sent upstream.
    pub tags: String,
}

/// Body of `GET <base>/<author>/<slug>`.
///
/// Upstream swaps the representations of the two tag fields relative to
/// [`ArticleSummary`]; `tag_list` here is already split and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleContent {
    #[serde(flatten)]
    pub meta: ArticleMeta,
    pub tag_list: Vec<String>,
    pub tags: Vec<String>,
    pub body_html: String,
    pub body_markdown: String,
}

impl ArticleContent {
    pub fn slug(&self) -> &Slug {
        &self.meta.slug
    }
}

/// A rendered content file, held in memory between render and write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub slug: Slug,
    pub content: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
