//! Shared test utilities for the postdex test suite.
//!
//! Hand-built [`Post`] records for exercising the index builders without
//! touching the filesystem. Ids are kept short and symbolic; dates only need
//! to be internally consistent with the record's `create_date`.

use crate::scan::{Post, PostDate};

/// Build a minimal post: symbolic id, feed position driven by `timestamp`.
pub fn post(id: &str, timestamp: i64) -> Post {
    Post {
        id: id.to_string(),
        path: format!("{id}.md"),
        title: id.to_string(),
        category: vec![crate::scan::UNCATEGORIZED.to_string()],
        tags: Vec::new(),
        summary: String::new(),
        cover: None,
        create_date: date("2024", "01", "05"),
        update_date: date("2024", "01", "05"),
        create_timestamp: timestamp,
    }
}

/// Build a post pinned to a creation date, for archive-tree tests.
pub fn dated_post(id: &str, year: &str, month: &str, day: &str, timestamp: i64) -> Post {
    let mut p = post(id, timestamp);
    p.create_date = date(year, month, day);
    p
}

/// Post with a cover reference, for cover-selection tests.
pub fn covered_post(id: &str, path: &str, cover: &str, timestamp: i64) -> Post {
    let mut p = post(id, timestamp);
    p.path = path.to_string();
    p.cover = Some(cover.to_string());
    p
}

pub fn date(year: &str, month: &str, day: &str) -> PostDate {
    PostDate {
        year: year.to_string(),
        month: month.to_string(),
        day: day.to_string(),
    }
}

/// Assign a category path, replacing the default sentinel.
pub fn with_category(mut p: Post, segments: &[&str]) -> Post {
    p.category = segments.iter().map(|s| s.to_string()).collect();
    p
}

/// Assign tags.
pub fn with_tags(mut p: Post, tags: &[&str]) -> Post {
    p.tags = tags.iter().map(|t| t.to_string()).collect();
    p
}
