//! Hierarchical category tree from slash-delimited category paths.
//!
//! Every post's category path contributes a node for each of its prefixes
//! (`["a", "b"]` registers `a` and `a/b`), but the post itself attaches only
//! to the node matching its full path — ancestors record the existence of
//! their immediate children, never descendant posts. A node with children
//! and no directly attached posts is a pure container (`pages: 0`).
//!
//! The tree is explicit: nodes addressed by path-segment arrays, built with
//! an idempotent insert-or-create walk per segment.

use crate::manifest::{
    CategoriesManifest, CategoryManifest, ManifestWriter, PageManifest, WriteError,
};
use crate::paging;
use crate::scan::Post;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct CategoryNode {
    /// Immediate children keyed by segment name; BTreeMap keeps them sorted.
    children: BTreeMap<String, CategoryNode>,
    /// Indices (into the post slice) of posts whose full path ends here.
    posts: Vec<usize>,
}

impl CategoryNode {
    pub fn child_names(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }

    pub fn post_indices(&self) -> &[usize] {
        &self.posts
    }
}

#[derive(Debug, Default)]
pub struct CategoryTree {
    root: CategoryNode,
}

impl CategoryTree {
    /// Insert every post, creating the chain of nodes for its path and
    /// appending the post at the final segment.
    pub fn build(posts: &[Post]) -> Self {
        let mut root = CategoryNode::default();
        for (index, post) in posts.iter().enumerate() {
            let mut node = &mut root;
            for segment in &post.category {
                node = node.children.entry(segment.clone()).or_default();
            }
            node.posts.push(index);
        }
        CategoryTree { root }
    }

    /// Sorted first segments across all posts.
    pub fn top_categories(&self) -> Vec<String> {
        self.root.child_names()
    }

    /// Look up a node by its full path. Test and inspection helper; writing
    /// walks the tree directly.
    pub fn node(&self, path: &[&str]) -> Option<&CategoryNode> {
        let mut node = &self.root;
        for segment in path {
            node = node.children.get(*segment)?;
        }
        Some(node)
    }

    pub fn root(&self) -> &CategoryNode {
        &self.root
    }
}

/// Write the category manifests. Returns `(top-level, total)` node counts.
pub fn write_categories(
    posts: &[Post],
    writer: &mut ManifestWriter,
) -> Result<(usize, usize), WriteError> {
    let tree = CategoryTree::build(posts);

    writer.write(
        "categories.json",
        &CategoriesManifest {
            top_categories: tree.top_categories(),
        },
    )?;

    let mut path: Vec<&str> = Vec::new();
    let total = write_subtree(tree.root(), &mut path, posts, writer)?;
    Ok((tree.root().children.len(), total))
}

fn write_subtree<'a>(
    node: &'a CategoryNode,
    path: &mut Vec<&'a str>,
    posts: &[Post],
    writer: &mut ManifestWriter,
) -> Result<usize, WriteError> {
    let mut count = 0;
    for (segment, child) in &node.children {
        path.push(segment.as_str());
        let rel = path.join("/");

        let mut attached: Vec<&Post> = child.posts.iter().map(|&i| &posts[i]).collect();
        attached.sort_by(|a, b| b.create_timestamp.cmp(&a.create_timestamp));

        writer.write(
            format!("categories/{rel}.json"),
            &CategoryManifest {
                children: child.child_names(),
                pages: paging::page_count(attached.len()),
            },
        )?;
        for (n, chunk) in paging::numbered_chunks(&attached) {
            writer.write(
                format!("categories/{rel}/{n}.json"),
                &PageManifest {
                    posts: chunk.iter().map(|p| p.id.clone()).collect(),
                },
            )?;
        }

        count += 1 + write_subtree(child, path, posts, writer)?;
        path.pop();
    }
    Ok(count)
}
