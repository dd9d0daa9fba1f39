//! Index generation.
//!
//! Stage 2 of the build pipeline. Takes the collected posts and writes the
//! complete JSON index tree: per-post manifests, the chronological feed, the
//! date archive, the category tree, and the tag buckets.
//!
//! ## Output Structure
//!
//! ```text
//! generated/
//! ├── index.json                 # {pages}
//! ├── index/1.json               # {posts: [id, ...]}
//! ├── archive.json               # {years}
//! ├── archive/2024.json          # {months, cover?}
//! ├── archive/2024/01.json       # {days, cover?}
//! ├── archive/2024/01/05.json    # {pages, cover?}
//! ├── archive/2024/01/05/1.json  # {posts}
//! ├── categories.json            # {topCategories}
//! ├── categories/dev.json        # {children, pages}
//! ├── categories/dev/1.json      # {posts}
//! ├── tags.json                  # {tags}
//! ├── tags/rust.json             # {pages}
//! ├── tags/rust/1.json           # {posts}
//! └── posts/2024/01/05/hello.json
//! ```
//!
//! Generation is strictly sequential: every axis depends on the complete,
//! globally sorted post set. The previous tree is cleared first, so a
//! crashed earlier run never leaves stale files mixed with fresh ones, and
//! any write failure aborts the run.

use crate::archive;
use crate::category;
use crate::config::SiteConfig;
use crate::manifest::{IndexManifest, ManifestWriter, PageManifest, WriteError};
use crate::paging;
use crate::scan::Post;
use crate::tag;
use std::path::Path;

/// Counts of what a build produced, for display.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub posts: usize,
    pub index_pages: usize,
    pub years: usize,
    pub top_categories: usize,
    pub category_nodes: usize,
    pub tags: usize,
    pub files_written: usize,
}

/// Sort the corpus and write the complete index tree under `output`.
///
/// Sorting happens here (not per builder) so every axis sees the same global
/// order and timestamp ties resolve identically everywhere.
pub fn generate(
    posts: &mut [Post],
    config: &SiteConfig,
    output: &Path,
) -> Result<BuildSummary, WriteError> {
    paging::sort_by_create_desc(posts);

    let mut writer = ManifestWriter::new(output);
    writer.clear()?;

    for post in posts.iter() {
        writer.write(format!("posts/{}.json", post.id), post)?;
    }

    let index_pages = paging::page_count(posts.len());
    writer.write("index.json", &IndexManifest { pages: index_pages })?;
    let all: Vec<&Post> = posts.iter().collect();
    for (n, chunk) in paging::numbered_chunks(&all) {
        writer.write(
            format!("index/{n}.json"),
            &PageManifest {
                posts: chunk.iter().map(|p| p.id.clone()).collect(),
            },
        )?;
    }

    let years = archive::write_archive(posts, &config.site.base_path, &mut writer)?;
    let (top_categories, category_nodes) = category::write_categories(posts, &mut writer)?;
    let tags = tag::write_tags(posts, &mut writer)?;

    Ok(BuildSummary {
        posts: posts.len(),
        index_pages,
        years,
        top_categories,
        category_nodes,
        tags,
        files_written: writer.files_written(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::dated_post;
    use tempfile::TempDir;

    fn corpus(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| dated_post(&format!("p{i:02}"), "2024", "01", "05", i as i64))
            .collect()
    }

    #[test]
    fn index_splits_into_ceil_pages() {
        let tmp = TempDir::new().unwrap();
        let mut posts = corpus(23);
        let summary = generate(&mut posts, &SiteConfig::default(), tmp.path()).unwrap();
        assert_eq!(summary.index_pages, 3);

        let root: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(tmp.path().join("index.json")).unwrap())
                .unwrap();
        assert_eq!(root["pages"], 3);

        let last: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(tmp.path().join("index/3.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(last["posts"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn concatenated_pages_reproduce_global_order() {
        let tmp = TempDir::new().unwrap();
        let mut posts = corpus(35);
        let summary = generate(&mut posts, &SiteConfig::default(), tmp.path()).unwrap();

        let mut rebuilt: Vec<String> = Vec::new();
        for n in 1..=summary.index_pages {
            let page: serde_json::Value = serde_json::from_str(
                &std::fs::read_to_string(tmp.path().join(format!("index/{n}.json"))).unwrap(),
            )
            .unwrap();
            for id in page["posts"].as_array().unwrap() {
                rebuilt.push(id.as_str().unwrap().to_string());
            }
        }

        let expected: Vec<String> = posts.iter().map(|p| p.id.clone()).collect();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn stale_output_is_cleared() {
        let tmp = TempDir::new().unwrap();
        let stale = tmp.path().join("posts/1999/01/01/ghost.json");
        std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
        std::fs::write(&stale, "{}").unwrap();

        let mut posts = corpus(1);
        generate(&mut posts, &SiteConfig::default(), tmp.path()).unwrap();
        assert!(!stale.exists());
        assert!(tmp.path().join("index.json").is_file());
    }

    #[test]
    fn empty_corpus_still_writes_valid_roots() {
        let tmp = TempDir::new().unwrap();
        let mut posts = Vec::new();
        let summary = generate(&mut posts, &SiteConfig::default(), tmp.path()).unwrap();
        assert_eq!(summary.posts, 0);
        assert_eq!(summary.index_pages, 0);

        let root: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(tmp.path().join("index.json")).unwrap())
                .unwrap();
        assert_eq!(root["pages"], 0);
        let archive: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(tmp.path().join("archive.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(archive["years"], serde_json::json!([]));
    }

    #[test]
    fn per_post_manifest_written_under_id_path() {
        let tmp = TempDir::new().unwrap();
        let mut posts = vec![dated_post("2024/01/05/hello", "2024", "01", "05", 1)];
        generate(&mut posts, &SiteConfig::default(), tmp.path()).unwrap();
        assert!(tmp.path().join("posts/2024/01/05/hello.json").is_file());
    }
}
