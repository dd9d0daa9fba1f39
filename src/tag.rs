//! Flat per-tag buckets.
//!
//! No hierarchy here: a post with N tags contributes to N independent
//! buckets, and cross-tag ordering is irrelevant. The global manifest lists
//! the sorted distinct tag names; each bucket paginates its posts in
//! descending timestamp order like every other axis.

use crate::manifest::{ManifestWriter, PageManifest, TagManifest, TagsManifest, WriteError};
use crate::paging;
use crate::scan::Post;
use std::collections::BTreeMap;

/// Group posts by tag; BTreeMap keeps the tag list sorted.
pub fn build_buckets(posts: &[Post]) -> BTreeMap<&str, Vec<&Post>> {
    let mut buckets: BTreeMap<&str, Vec<&Post>> = BTreeMap::new();
    for post in posts {
        for tag in &post.tags {
            buckets.entry(tag.as_str()).or_default().push(post);
        }
    }
    buckets
}

/// Write the tag manifests. Returns the number of distinct tags.
pub fn write_tags(posts: &[Post], writer: &mut ManifestWriter) -> Result<usize, WriteError> {
    let buckets = build_buckets(posts);

    writer.write(
        "tags.json",
        &TagsManifest {
            tags: buckets.keys().map(|t| t.to_string()).collect(),
        },
    )?;

    for (tag, bucket) in &buckets {
        let mut bucket: Vec<&Post> = bucket.clone();
        bucket.sort_by(|a, b| b.create_timestamp.cmp(&a.create_timestamp));

        writer.write(
            format!("tags/{tag}.json"),
            &TagManifest {
                pages: paging::page_count(bucket.len()),
            },
        )?;
        for (n, chunk) in paging::numbered_chunks(&bucket) {
            writer.write(
                format!("tags/{tag}/{n}.json"),
                &PageManifest {
                    posts: chunk.iter().map(|p| p.id.clone()).collect(),
                },
            )?;
        }
    }

    Ok(buckets.len())
}
