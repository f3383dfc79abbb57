//! Dry-run unified diff support for `blogsync diff`.

use std::path::PathBuf;

use similar::TextDiff;

use blogsync_core::Slug;

use crate::client::ArticleSource;
use crate::pipeline::{ArticleOutcome, Listing, SyncPipeline};
use crate::SyncError;

/// A single rendered file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub slug: Slug,
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Diff result for one author.
#[derive(Debug, Clone)]
pub struct DiffReport {
    pub listing: Listing,
    pub diffs: Vec<FileDiff>,
    /// Articles that could not be rendered; they have no diff.
    pub problems: Vec<ArticleOutcome>,
}

/// Render what `sync` would write and compare it to the stored files.
///
/// No files are written. Articles whose stored file already matches are
/// omitted; a missing file diffs against empty content.
pub async fn diff_all<S: ArticleSource>(
    pipeline: &SyncPipeline<S>,
    author: &str,
) -> Result<DiffReport, SyncError> {
    let batch = pipeline.render_all(author).await;
    let store = pipeline.store();

    let mut diffs = Vec::new();
    for doc in batch.documents {
        let existing = store.read_existing(&doc.slug).await?.unwrap_or_default();
        if existing == doc.content {
            continue;
        }

        let path = store.path_for(&doc.slug);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| doc.slug.to_string());
        let old_header = format!("a/{file_name}");
        let new_header = format!("b/{file_name}");
        let unified = TextDiff::from_lines(&existing, &doc.content)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(FileDiff {
            slug: doc.slug,
            path,
            unified_diff: unified,
        });
    }

    Ok(DiffReport {
        listing: batch.listing,
        diffs,
        problems: batch.problems,
    })
}
