//! On-disk manifest shapes and the output-tree writer.
//!
//! Every file the generator emits is one of the small JSON shapes below,
//! written at a conventional path the client router derives from its route:
//!
//! ```text
//! index.json                             {pages}
//! index/{n}.json                         {posts}
//! archive.json                           {years}
//! archive/{year}.json                    {months, cover?}
//! archive/{year}/{month}.json            {days, cover?}
//! archive/{year}/{month}/{day}.json      {pages, cover?}
//! archive/{year}/{month}/{day}/{n}.json  {posts}
//! categories.json                        {topCategories}
//! categories/{path}.json                 {children, pages}
//! categories/{path}/{n}.json             {posts}
//! tags.json                              {tags}
//! tags/{tag}.json                        {pages}
//! tags/{tag}/{n}.json                    {posts}
//! posts/{id}.json                        full post record
//! ```
//!
//! Field names are part of the wire format consumed by the front-end — do not
//! rename them. An absent `cover` is omitted entirely rather than serialized
//! as null.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output-tree write failures. Always fatal: a half-written index tree is
/// strictly worse than none, so these abort the run.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level feed manifest: number of feed pages.
#[derive(Debug, Serialize)]
pub struct IndexManifest {
    pub pages: usize,
}

/// One page of any paginated axis: post ids in page order.
#[derive(Debug, Serialize)]
pub struct PageManifest {
    pub posts: Vec<String>,
}

/// Archive root: years in descending order.
#[derive(Debug, Serialize)]
pub struct ArchiveManifest {
    pub years: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ArchiveYearManifest {
    pub months: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArchiveMonthManifest {
    pub days: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArchiveDayManifest {
    pub pages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

/// Category root: sorted distinct first segments across all posts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesManifest {
    pub top_categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryManifest {
    /// Immediate child segment names, sorted.
    pub children: Vec<String>,
    /// Pages of posts attached directly to this node (0 for pure containers).
    pub pages: usize,
}

/// Tag root: sorted distinct tag names.
#[derive(Debug, Serialize)]
pub struct TagsManifest {
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TagManifest {
    pub pages: usize,
}

/// Writes manifests under a single output root, creating parent directories
/// as needed. There is exactly one writer per run and one write per output
/// path, so no locking is involved.
#[derive(Debug)]
pub struct ManifestWriter {
    root: PathBuf,
    written: usize,
}

impl ManifestWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: 0,
        }
    }

    /// Remove the previous output tree so a re-run never mixes stale files
    /// with fresh ones. A missing tree is not an error.
    pub fn clear(&self) -> Result<(), WriteError> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Serialize `value` as pretty-printed JSON at `relative` under the root.
    pub fn write<T: Serialize>(
        &mut self,
        relative: impl AsRef<Path>,
        value: &T,
    ) -> Result<(), WriteError> {
        let path = self.root.join(relative.as_ref());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)?;
        self.written += 1;
        Ok(())
    }

    /// Number of files written so far.
    pub fn files_written(&self) -> usize {
        self.written
    }
}
