//! Content API client.
//!
//! | Call                 | Request                          | Payload            |
//! |----------------------|----------------------------------|--------------------|
//! | `fetch_summaries`    | `GET <base>?username=<author>`   | `[ArticleSummary]` |
//! | `fetch_content`      | `GET <base>/<author>/<slug>`     | `ArticleContent`   |
//!
//! One request per call; no retry, no auth. Every failure mode (transport,
//! status, JSON, shape) comes back as a [`FetchError`] for the caller to log.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use blogsync_core::{
    schema::{validate_content, validate_summaries},
    ArticleContent, ArticleSummary, Config, Slug,
};

use crate::error::FetchError;

/// Where articles come from. [`ApiClient`] is the real implementation.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// List every published article of `author`.
    async fn fetch_summaries(&self, author: &str) -> Result<Vec<ArticleSummary>, FetchError>;

    /// Fetch one article, body included.
    async fn fetch_content(&self, author: &str, slug: &Slug)
        -> Result<ArticleContent, FetchError>;
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// HTTP client for the public article endpoints.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    /// `base` is the articles collection URL, e.g. `https://dev.to/api/articles`.
    /// `timeout` bounds each request from connect to last body byte.
    pub fn new(base: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base = Url::parse(base).map_err(|_| FetchError::BaseUrl(base.to_owned()))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::BaseUrl(base.to_string()));
        }
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client, base })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(&config.api_base, config.request_timeout())
    }

    pub fn user_agent() -> &'static str {
        concat!("blogsync/", env!("CARGO_PKG_VERSION"))
    }

    /// `<base>?username=<author>`
    pub fn summaries_url(&self, author: &str) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut().clear().append_pair("username", author);
        url
    }

    /// `<base>/<author>/<slug>`, each segment percent-encoded.
    pub fn content_url(&self, author: &str, slug: &Slug) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| FetchError::BaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .push(author)
            .push(slug.as_str());
        Ok(url)
    }

    async fn get_json(&self, url: &Url) -> Result<Value, FetchError> {
        let label = url.to_string();
        tracing::debug!(url = %label, "GET");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: label.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: label, status });
        }

        let bytes = resp.bytes().await.map_err(|source| FetchError::Transport {
            url: label.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode { url: label, source })
    }
}

#[async_trait]
impl ArticleSource for ApiClient {
    async fn fetch_summaries(&self, author: &str) -> Result<Vec<ArticleSummary>, FetchError> {
        let url = self.summaries_url(author);
        let json = self.get_json(&url).await?;
        validate_summaries(&json).map_err(|source| FetchError::Invalid {
            url: url.to_string(),
            source,
        })
    }

    async fn fetch_content(
        &self,
        author: &str,
        slug: &Slug,
    ) -> Result<ArticleContent, FetchError> {
        let url = self.content_url(author, slug)?;
        let json = self.get_json(&url).await?;
        validate_content(&json).map_err(|source| FetchError::Invalid {
            url: url.to_string(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
