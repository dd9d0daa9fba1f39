//! Filesystem scanning and post collection.
//!
//! Stage 1 of the build pipeline. Walks the source directory for documents,
//! parses each one, and derives a normalized [`Post`] record per file —
//! the single input every index builder consumes.
//!
//! ## Source Layout
//!
//! Posts may nest arbitrarily; the directory structure carries no meaning
//! beyond the source-relative `path` recorded on each post (used to resolve
//! relative cover references):
//!
//! ```text
//! posts/
//! ├── config.toml            # Site configuration (optional)
//! ├── hello-world.md
//! └── travel/
//!     ├── tokyo.md
//!     └── tokyo-skyline.jpg  # Referenced as `cover: ./tokyo-skyline.jpg`
//! ```
//!
//! ## Derivations
//!
//! - **id**: `{year}/{month}/{day}/{fileStem}` from the creation date —
//!   stable across re-runs as long as date and stem are unchanged
//! - **title**: front matter, else the file stem
//! - **category**: front matter split on `/`, segments trimmed, empties
//!   dropped; absent → the `uncategorized` sentinel
//! - **summary**: text before a `<!-- more -->` marker, else the first three
//!   paragraphs (fenced code blocks excluded)
//! - **cover**: front matter, else the first inline image in the body
//! - **dates**: front matter `createdAt` (epoch ms) wins; otherwise the
//!   filesystem creation time, falling back to the modification time on
//!   filesystems that record no birth time
//!
//! ## Failure Isolation
//!
//! A single document's read or parse failure is logged and the document
//! skipped; it never aborts the batch. Reads and parses run in parallel —
//! documents share no state — and results keep the sorted scan order, so
//! timestamp ties resolve identically on every run.

use crate::frontmatter;
use chrono::{DateTime, Local};
use pulldown_cmark::{Event, Parser, Tag};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Sentinel category for posts without category metadata. Behaves like any
/// real category in the tree.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Marks the end of the hand-written summary portion of a body.
const READ_MORE_MARKER: &str = "<!-- more -->";

/// Paragraphs to extract when no marker is present.
const SUMMARY_PARAGRAPHS: usize = 3;

/// Calendar date as zero-padded strings, the form the client renders and the
/// archive tree sorts on (lexicographic order matches chronological order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDate {
    pub year: String,
    pub month: String,
    pub day: String,
}

/// Normalized post record. Built once per source file, immutable afterwards;
/// serialized as `posts/{id}.json` minus the sort-only timestamp.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// `{year}/{month}/{day}/{fileStem}` — unique across the corpus.
    pub id: String,
    /// Source-relative path, forward slashes.
    pub path: String,
    pub title: String,
    /// Ordered category path segments, never empty.
    pub category: Vec<String>,
    pub tags: Vec<String>,
    pub summary: String,
    /// Raw cover reference as authored; resolution to a published path
    /// happens at selection time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub create_date: PostDate,
    pub update_date: PostDate,
    /// Sort key only — never persisted.
    #[serde(skip)]
    pub create_timestamp: i64,
}

/// Collect all posts under `root`, in deterministic scan order.
///
/// Infallible by design: per-document failures are logged and skipped, and a
/// missing source directory yields an empty corpus (the generated index is
/// empty but valid).
pub fn collect_posts(root: &Path, extension: &str) -> Vec<Post> {
    if !root.is_dir() {
        log::warn!(
            "post source {} is not a directory; generating an empty index",
            root.display()
        );
        return Vec::new();
    }

    let files = find_documents(root, extension);
    log::debug!(
        "found {} .{} files under {}",
        files.len(),
        extension,
        root.display()
    );

    let read: Vec<Option<Post>> = files
        .par_iter()
        .map(|path| match read_post(root, path) {
            Ok(post) => Some(post),
            Err(err) => {
                log::warn!("skipping {}: {err}", path.display());
                None
            }
        })
        .collect();

    let mut seen = HashSet::new();
    read.into_iter()
        .flatten()
        .filter(|post| {
            if seen.insert(post.id.clone()) {
                true
            } else {
                log::warn!(
                    "duplicate post id {} ({}); keeping the first occurrence",
                    post.id,
                    post.path
                );
                false
            }
        })
        .collect()
}

/// Recursively list document files, sorted by file name for a stable walk.
fn find_documents(root: &Path, extension: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::warn!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// Read one document and derive its [`Post`].
fn read_post(root: &Path, path: &Path) -> Result<Post, std::io::Error> {
    let content = fs::read_to_string(path)?;
    let meta = fs::metadata(path)?;
    let created = meta.created().or_else(|_| meta.modified())?;
    let modified = meta.modified()?;

    let parsed = frontmatter::parse(&content);
    let fm = parsed.front_matter.unwrap_or_default();

    let relative = path.strip_prefix(root).unwrap_or(path);
    let rel_path = relative.to_string_lossy().replace('\\', "/");
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let create_dt: DateTime<Local> = fm
        .created_at
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map(|utc| utc.with_timezone(&Local))
        .unwrap_or_else(|| created.into());
    let update_dt: DateTime<Local> = modified.into();

    let create_date = format_date(&create_dt);
    let update_date = format_date(&update_dt);
    let id = format!(
        "{}/{}/{}/{}",
        create_date.year, create_date.month, create_date.day, stem
    );

    Ok(Post {
        id,
        path: rel_path,
        title: fm.title.unwrap_or_else(|| stem.clone()),
        category: category_segments(fm.category.as_deref()),
        tags: fm.tags.unwrap_or_default(),
        summary: extract_summary(&parsed.body),
        cover: fm.cover.or_else(|| first_inline_image(&parsed.body)),
        create_date,
        update_date,
        create_timestamp: create_dt.timestamp_millis(),
    })
}

fn format_date(dt: &DateTime<Local>) -> PostDate {
    PostDate {
        year: dt.format("%Y").to_string(),
        month: dt.format("%m").to_string(),
        day: dt.format("%d").to_string(),
    }
}

/// Split a raw category value into trimmed, non-empty segments; absent or
/// effectively empty values map to the sentinel.
fn category_segments(raw: Option<&str>) -> Vec<String> {
    let segments: Vec<String> = raw
        .unwrap_or_default()
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if segments.is_empty() {
        vec![UNCATEGORIZED.to_string()]
    } else {
        segments
    }
}

/// Summary: everything before the read-more marker, or the first few
/// paragraphs. A paragraph is text between blank-line separators; paragraphs
/// opening a fenced code block do not count.
fn extract_summary(body: &str) -> String {
    if let Some(idx) = body.find(READ_MORE_MARKER) {
        return body[..idx].trim().to_string();
    }

    let mut paragraphs: Vec<&str> = Vec::new();
    for section in split_paragraphs(body) {
        let trimmed = section.trim();
        if trimmed.is_empty() || trimmed.starts_with("```") {
            continue;
        }
        paragraphs.push(trimmed);
        if paragraphs.len() == SUMMARY_PARAGRAPHS {
            break;
        }
    }
    paragraphs.join("\n\n")
}

/// Split on blank lines (lines that are empty after trimming), preserving
/// paragraph-internal line breaks.
fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start: Option<usize> = None;
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        if line.trim().is_empty() {
            if let Some(s) = start.take() {
                sections.push(&text[s..line_start]);
            }
        } else if start.is_none() {
            start = Some(line_start);
        }
    }
    if let Some(s) = start {
        sections.push(&text[s..]);
    }
    sections
}

/// First inline image destination in the body, via markdown events rather
/// than regex — links inside code spans or fenced blocks do not count.
fn first_inline_image(body: &str) -> Option<String> {
    for event in Parser::new(body) {
        if let Event::Start(Tag::Image { dest_url, .. }) = event {
            return Some(dest_url.into_string());
        }
    }
    None
}
