//! Shared fixtures: realistic API payloads and an in-memory [`ArticleSource`].

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use blogsync_core::{
    schema::{validate_content, validate_summaries},
    ArticleContent, ArticleSummary, Slug,
};
use blogsync_sync::{ArticleSource, FetchError};

pub const AUTHOR: &str = "jane";

pub fn summary_json(slug: &str, id: u64) -> Value {
    json!({
        "type_of": "article",
        "id": id,
        "title": format!("Post {slug}"),
        "description": format!("About {slug}"),
        "readable_publish_date": "Jun 1",
        "slug": slug,
        "path": format!("/jane/{slug}"),
        "url": format!("https://dev.to/jane/{slug}"),
        "comments_count": 0,
        "public_reactions_count": 1,
        "collection_id": null,
        "published_timestamp": "2024-06-01T09:00:00Z",
        "positive_reactions_count": 1,
        "cover_image": "https://cdn.example.com/cover.png",
        "social_image": "https://cdn.example.com/social.png",
        "canonical_url": format!("https://dev.to/jane/{slug}"),
        "created_at": "2024-05-31T09:00:00Z",
        "edited_at": null,
        "crossposted_at": null,
        "published_at": "2024-06-01T09:00:00Z",
        "last_comment_at": "2024-06-01T09:00:00Z",
        "reading_time_minutes": 1,
        "tag_list": ["rust"],
        "tags": "rust"
    })
}

pub fn content_json(slug: &str, id: u64, body: &str) -> Value {
    let mut value = summary_json(slug, id);
    value["tag_list"] = json!("rust, testing");
    value["tags"] = json!(["rust", "testing"]);
    value["body_html"] = json!(format!("<p>{body}</p>"));
    value["body_markdown"] = json!(body);
    value
}

/// In-memory source. Slugs absent from `contents` answer 404; slugs in
/// `hanging` never answer.
#[derive(Default)]
pub struct FakeSource {
    pub listing: Option<Value>,
    pub contents: HashMap<String, Value>,
    pub hanging: HashSet<String>,
    pub requested: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn with_listing(slugs: &[&str]) -> Self {
        let items: Vec<Value> = slugs
            .iter()
            .enumerate()
            .map(|(i, slug)| summary_json(slug, i as u64 + 1))
            .collect();
        Self {
            listing: Some(Value::Array(items)),
            ..Self::default()
        }
    }

    /// Serve content for `slug`. Listing ids are 1-based list positions.
    pub fn serve(mut self, slug: &str, id: u64, body: &str) -> Self {
        self.contents
            .insert(slug.to_owned(), content_json(slug, id, body));
        self
    }

    pub fn hang(mut self, slug: &str) -> Self {
        self.hanging.insert(slug.to_owned());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        let mut seen = self.requested.lock().unwrap().clone();
        seen.sort();
        seen
    }
}

fn not_found(what: &str) -> FetchError {
    FetchError::Status {
        url: format!("fake://{what}"),
        status: StatusCode::NOT_FOUND,
    }
}

#[async_trait]
impl ArticleSource for FakeSource {
    async fn fetch_summaries(&self, author: &str) -> Result<Vec<ArticleSummary>, FetchError> {
        let listing = self.listing.as_ref().ok_or_else(|| not_found(author))?;
        validate_summaries(listing).map_err(|source| FetchError::Invalid {
            url: "fake://list".into(),
            source,
        })
    }

    async fn fetch_content(
        &self,
        _author: &str,
        slug: &Slug,
    ) -> Result<ArticleContent, FetchError> {
        self.requested.lock().unwrap().push(slug.to_string());
        if self.hanging.contains(slug.as_str()) {
            return std::future::pending().await;
        }
        let value = self
            .contents
            .get(slug.as_str())
            .ok_or_else(|| not_found(slug.as_str()))?;
        validate_content(value).map_err(|source| FetchError::Invalid {
            url: format!("fake://{slug}"),
            source,
        })
    }
}
