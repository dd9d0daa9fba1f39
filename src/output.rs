//! CLI output formatting for the pipeline stages.
//!
//! Output is information-centric: each section leads with what exists in the
//! generated index (posts, pages, axes), with source paths shown as indented
//! context. Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ```text
//! Posts
//!     001 Shader Tricks
//!         Source: graphics/shader-tricks.md
//!
//! Index
//!     42 posts, 5 pages
//! Archive
//!     3 years
//! Categories
//!     4 top-level, 9 nodes
//! Tags
//!     12 tags
//!
//! Wrote 181 files
//! ```

use crate::generate::BuildSummary;
use crate::scan::Post;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Format the post inventory: positional index + title, source and axis
/// membership as indented context.
pub fn format_post_list(posts: &[Post]) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Posts".to_string());
    for (i, post) in posts.iter().enumerate() {
        lines.push(format!("    {} {}", format_index(i + 1), post.title));
        lines.push(format!("        Source: {}", post.path));
        lines.push(format!("        Id: {}", post.id));
        if post.category != [crate::scan::UNCATEGORIZED] {
            lines.push(format!("        Category: {}", post.category.join("/")));
        }
        if !post.tags.is_empty() {
            lines.push(format!("        Tags: {}", post.tags.join(", ")));
        }
    }
    if posts.is_empty() {
        lines.push("    (none)".to_string());
    }
    lines
}

/// Format build results: one section per index axis, then the write total.
pub fn format_build_summary(summary: &BuildSummary) -> Vec<String> {
    vec![
        "Index".to_string(),
        format!(
            "    {}, {}",
            plural(summary.posts, "post"),
            plural(summary.index_pages, "page")
        ),
        "Archive".to_string(),
        format!("    {}", plural(summary.years, "year")),
        "Categories".to_string(),
        format!(
            "    {} top-level, {}",
            summary.top_categories,
            plural(summary.category_nodes, "node")
        ),
        "Tags".to_string(),
        format!("    {}", plural(summary.tags, "tag")),
        String::new(),
        format!("Wrote {}", plural(summary.files_written, "file")),
    ]
}

/// Print the post inventory to stdout.
pub fn print_post_list(posts: &[Post]) {
    for line in format_post_list(posts) {
        println!("{}", line);
    }
}

/// Print build results to stdout.
pub fn print_build_summary(summary: &BuildSummary) {
    for line in format_build_summary(summary) {
        println!("{}", line);
    }
}
