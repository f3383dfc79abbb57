//! Content store and atomic writer.
//!
//! ## `atomic_write` protocol
//!
//! 1. Render content (already done by caller).
//! 2. Read the current file; identical bytes → `Unchanged`, nothing touched.
//! 3. Dry run → `WouldWrite`, nothing touched.
//! 4. Write to `.<slug>.<ext>.blogsync.tmp` in the store directory.
//! 5. Rename over `<slug>.<ext>` (atomic on POSIX). The tmp file is removed
//!    if the write or rename fails, or if the write is dropped before the
//!    rename (e.g. at the run deadline).
//!
//! A reader of the store therefore sees either the previous document or the
//! new one, never a missing or half-written file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use blogsync_core::{RenderedDocument, Slug};

use crate::error::{io_err, SyncError};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// Stored content is already byte-identical; nothing written.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// ContentStore
// ---------------------------------------------------------------------------

/// A directory holding one `<slug>.<ext>` file per article.
#[derive(Debug, Clone)]
pub struct ContentStore {
    dir: PathBuf,
    extension: String,
}

impl ContentStore {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<slug>.<ext>`. No I/O.
    pub fn path_for(&self, slug: &Slug) -> PathBuf {
        self.dir.join(format!("{slug}.{}", self.extension))
    }

    fn tmp_path_for(&self, slug: &Slug) -> PathBuf {
        self.dir
            .join(format!(".{slug}.{}.blogsync.tmp", self.extension))
    }

    /// Replace the stored file for `doc.slug` with `doc.content`.
    pub async fn write(
        &self,
        doc: &RenderedDocument,
        dry_run: bool,
    ) -> Result<WriteResult, SyncError> {
        let path = self.path_for(&doc.slug);
        let tmp = self.tmp_path_for(&doc.slug);
        atomic_write(&path, &doc.content, dry_run, &tmp).await
    }

    /// Current stored text for `slug`, or `None` if there is no file.
    pub async fn read_existing(&self, slug: &Slug) -> Result<Option<String>, SyncError> {
        let path = self.path_for(slug);
        Ok(read_bytes_if_present(&path)
            .await?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

async fn atomic_write(
    path: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, SyncError> {
    if read_bytes_if_present(path).await?.as_deref() == Some(content.as_bytes()) {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_err(parent, e))?;
    }
    let mut guard = TmpGuard::new(tmp);
    tokio::fs::write(tmp, content)
        .await
        .map_err(|e| io_err(tmp, e))?;
    tokio::fs::rename(tmp, path)
        .await
        .map_err(|e| io_err(path, e))?;
    guard.disarm();

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

/// Removes the tmp file on drop unless disarmed after a successful rename.
struct TmpGuard<'a> {
    path: &'a Path,
    armed: bool,
}

impl<'a> TmpGuard<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for TmpGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let _ = std::fs::remove_file(self.path);
        }
    }
}

async fn read_bytes_if_present(path: &Path) -> Result<Option<Vec<u8>>, SyncError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
