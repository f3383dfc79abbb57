//! Sync orchestration: list → per-article fetch → render → write.
//!
//! Every listed article gets its own pipeline. Pipelines run concurrently on
//! the calling task (`join_all`, no spawning) and share nothing but the
//! read-only renderer, client, and store handle. A failure in one article is
//! recorded in its [`ArticleOutcome`] and never affects another.
//!
//! The whole run, listing included, is bounded by [`RunLimits::run_deadline`];
//! pipelines still pending at the deadline are dropped and reported as
//! [`ArticleStatus::TimedOut`].

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tokio::time::{timeout_at, Instant};

use blogsync_core::{ArticleSummary, Config, RenderedDocument, Slug};
use blogsync_renderer::Renderer;

use crate::client::ArticleSource;
use crate::writer::{ContentStore, WriteResult};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Time budget for one run. Per-request timeouts live in the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    pub run_deadline: Duration,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            run_deadline: Duration::from_secs(120),
        }
    }
}

impl RunLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            run_deadline: config.run_deadline(),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Result of the list call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Listing {
    Fetched { count: usize },
    Failed { reason: String },
    TimedOut,
}

/// What happened to one listed article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ArticleStatus {
    Written { path: PathBuf },
    Unchanged { path: PathBuf },
    WouldWrite { path: PathBuf },
    /// Content could not be fetched or validated; the store was not touched.
    Skipped { reason: String },
    /// Content was fetched but rendering or storing it failed.
    Failed { reason: String },
    /// Still pending when the run deadline passed.
    TimedOut,
}

impl From<WriteResult> for ArticleStatus {
    fn from(result: WriteResult) -> Self {
        match result {
            WriteResult::Written { path } => ArticleStatus::Written { path },
            WriteResult::Unchanged { path } => ArticleStatus::Unchanged { path },
            WriteResult::WouldWrite { path } => ArticleStatus::WouldWrite { path },
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleStatus::Written { path } => write!(f, "wrote {}", path.display()),
            ArticleStatus::Unchanged { path } => write!(f, "unchanged {}", path.display()),
            ArticleStatus::WouldWrite { path } => write!(f, "would write {}", path.display()),
            ArticleStatus::Skipped { reason } => write!(f, "skipped: {reason}"),
            ArticleStatus::Failed { reason } => write!(f, "failed: {reason}"),
            ArticleStatus::TimedOut => write!(f, "timed out"),
        }
    }
}

impl ArticleStatus {
    pub fn is_problem(&self) -> bool {
        matches!(
            self,
            ArticleStatus::Skipped { .. } | ArticleStatus::Failed { .. } | ArticleStatus::TimedOut
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleOutcome {
    pub slug: Slug,
    #[serde(flatten)]
    pub status: ArticleStatus,
}

/// Everything a run did, one entry per listed article in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub author: String,
    pub listing: Listing,
    pub articles: Vec<ArticleOutcome>,
    pub duration_ms: u128,
}

impl SyncReport {
    fn count(&self, pred: impl Fn(&ArticleStatus) -> bool) -> usize {
        self.articles.iter().filter(|a| pred(&a.status)).count()
    }

    /// Written, or would be written in a dry run.
    pub fn written(&self) -> usize {
        self.count(|s| {
            matches!(
                s,
                ArticleStatus::Written { .. } | ArticleStatus::WouldWrite { .. }
            )
        })
    }

    pub fn unchanged(&self) -> usize {
        self.count(|s| matches!(s, ArticleStatus::Unchanged { .. }))
    }

    pub fn problems(&self) -> usize {
        self.count(ArticleStatus::is_problem)
    }

    /// Listing succeeded and no article had a problem.
    pub fn is_clean(&self) -> bool {
        matches!(self.listing, Listing::Fetched { .. }) && self.problems() == 0
    }
}

/// Rendered documents without any writes; see [`SyncPipeline::render_all`].
#[derive(Debug, Clone)]
pub struct RenderedBatch {
    pub listing: Listing,
    pub documents: Vec<RenderedDocument>,
    /// Articles that could not be rendered, with the reason.
    pub problems: Vec<ArticleOutcome>,
}

// ---------------------------------------------------------------------------
// SyncPipeline
// ---------------------------------------------------------------------------

/// Composes an [`ArticleSource`], the [`Renderer`], and a [`ContentStore`].
pub struct SyncPipeline<S> {
    source: S,
    renderer: Renderer,
    store: ContentStore,
    limits: RunLimits,
}

impl<S: ArticleSource> SyncPipeline<S> {
    pub fn new(source: S, renderer: Renderer, store: ContentStore, limits: RunLimits) -> Self {
        Self {
            source,
            renderer,
            store,
            limits,
        }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Sync every article of `author` into the store.
    ///
    /// Never fails: listing, fetch, render, and storage problems are all
    /// reported in the returned [`SyncReport`] and logged.
    pub async fn run(&self, author: &str, dry_run: bool) -> SyncReport {
        let started = Instant::now();
        let deadline = started + self.limits.run_deadline;
        tracing::info!(author, dry_run, "sync started");

        let (listing, summaries) = self.list(author, deadline).await;
        let first = first_occurrences(&summaries);

        let pipelines = summaries.iter().zip(first).map(|(summary, first)| async move {
            let slug = summary.meta.slug.clone();
            if !first {
                return ArticleOutcome {
                    slug,
                    status: duplicate(),
                };
            }
            let status = match timeout_at(deadline, self.sync_one(author, summary, dry_run)).await
            {
                Ok(status) => status,
                Err(_) => {
                    tracing::warn!(slug = %slug, "run deadline passed; article abandoned");
                    ArticleStatus::TimedOut
                }
            };
            ArticleOutcome { slug, status }
        });
        let articles = join_all(pipelines).await;

        let report = SyncReport {
            author: author.to_owned(),
            listing,
            articles,
            duration_ms: started.elapsed().as_millis(),
        };
        tracing::info!(
            author,
            written = report.written(),
            unchanged = report.unchanged(),
            problems = report.problems(),
            duration_ms = report.duration_ms as u64,
            "sync finished"
        );
        report
    }

    /// Fetch and render every article of `author` without touching the store.
    pub async fn render_all(&self, author: &str) -> RenderedBatch {
        let deadline = Instant::now() + self.limits.run_deadline;
        let (listing, summaries) = self.list(author, deadline).await;
        let first = first_occurrences(&summaries);

        let pipelines = summaries.iter().zip(first).map(|(summary, first)| async move {
            if !first {
                return Err(duplicate());
            }
            timeout_at(deadline, self.fetch_and_render(author, summary))
                .await
                .unwrap_or(Err(ArticleStatus::TimedOut))
        });
        let results = join_all(pipelines).await;

        let mut documents = Vec::new();
        let mut problems = Vec::new();
        for (summary, result) in summaries.iter().zip(results) {
            match result {
                Ok(doc) => documents.push(doc),
                Err(status) => problems.push(ArticleOutcome {
                    slug: summary.meta.slug.clone(),
                    status,
                }),
            }
        }
        RenderedBatch {
            listing,
            documents,
            problems,
        }
    }

    // -----------------------------------------------------------------------
    // Steps
    // -----------------------------------------------------------------------

    async fn list(&self, author: &str, deadline: Instant) -> (Listing, Vec<ArticleSummary>) {
        match timeout_at(deadline, self.source.fetch_summaries(author)).await {
            Ok(Ok(summaries)) => {
                tracing::info!(author, count = summaries.len(), "listed articles");
                (
                    Listing::Fetched {
                        count: summaries.len(),
                    },
                    summaries,
                )
            }
            Ok(Err(e)) => {
                tracing::warn!(author, error = %e, "article listing failed; nothing to sync");
                (
                    Listing::Failed {
                        reason: e.to_string(),
                    },
                    Vec::new(),
                )
            }
            Err(_) => {
                tracing::warn!(author, "article listing timed out; nothing to sync");
                (Listing::TimedOut, Vec::new())
            }
        }
    }

    async fn sync_one(
        &self,
        author: &str,
        summary: &ArticleSummary,
        dry_run: bool,
    ) -> ArticleStatus {
        let doc = match self.fetch_and_render(author, summary).await {
            Ok(doc) => doc,
            Err(status) => return status,
        };
        match self.store.write(&doc, dry_run).await {
            Ok(result) => result.into(),
            Err(e) => {
                tracing::warn!(slug = %doc.slug, error = %e, "failed to store article");
                ArticleStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn fetch_and_render(
        &self,
        author: &str,
        summary: &ArticleSummary,
    ) -> Result<RenderedDocument, ArticleStatus> {
        let slug = &summary.meta.slug;
        let content = self
            .source
            .fetch_content(author, slug)
            .await
            .map_err(|e| {
                tracing::warn!(slug = %slug, error = %e, "skipping article: content unavailable");
                ArticleStatus::Skipped {
                    reason: e.to_string(),
                }
            })?;

        if content.meta.slug != *slug || content.meta.id != summary.meta.id {
            let reason = format!(
                "content is article {} `{}`, listing said {} `{}`",
                content.meta.id, content.meta.slug, summary.meta.id, slug
            );
            tracing::warn!(slug = %slug, "skipping article: {reason}");
            return Err(ArticleStatus::Skipped { reason });
        }

        self.renderer.render(&content).map_err(|e| {
            tracing::warn!(slug = %slug, error = %e, "failed to render article");
            ArticleStatus::Failed {
                reason: e.to_string(),
            }
        })
    }
}

/// `true` for the first summary carrying each slug.
fn first_occurrences(summaries: &[ArticleSummary]) -> Vec<bool> {
    let mut seen = HashSet::new();
    summaries
        .iter()
        .map(|s| {
            let first = seen.insert(&s.meta.slug);
            if !first {
                tracing::warn!(slug = %s.meta.slug, "slug listed twice; later copy skipped");
            }
            first
        })
        .collect()
}

fn duplicate() -> ArticleStatus {
    ArticleStatus::Skipped {
        reason: "duplicate slug in listing".to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
