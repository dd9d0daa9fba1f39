//! # Postdex
//!
//! A static JSON index generator for markdown blog posts. Your filesystem is
//! the data source: markdown files become posts, front matter supplies titles,
//! categories, tags, and covers, and creation dates drive the archive.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! Postdex processes content in two stages:
//!
//! ```text
//! 1. Scan      posts/     →  Vec<Post>       (filesystem → normalized records)
//! 2. Generate  Vec<Post>  →  generated/      (paginated JSON index tree)
//! ```
//!
//! The scan stage reads and parses documents in parallel — each file is
//! independent. The generate stage is strictly sequential: every index axis
//! (feed, archive, categories, tags) depends on the complete, globally sorted
//! post set, so there is nothing to parallelize without a merge step.
//!
//! The run is idempotent. The previous output tree is cleared before writing,
//! and every derivation — sorting, pagination, cover selection — is
//! deterministic, so regenerating an unchanged corpus produces a byte-identical
//! tree. A client can cache aggressively and diff cheaply.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — walks the source directory, parses front matter, derives normalized [`scan::Post`] records |
//! | [`frontmatter`] | YAML front matter extraction; degrades gracefully, never fails hard |
//! | [`generate`] | Stage 2 — orchestrates all index builders over the sorted post set |
//! | [`paging`] | Fixed-size 1-indexed pagination shared by every index axis |
//! | [`archive`] | Year → month → day tree with per-level covers |
//! | [`category`] | Hierarchical category tree from slash-delimited paths |
//! | [`tag`] | Flat per-tag buckets |
//! | [`cover`] | Deterministic representative-cover selection per grouping |
//! | [`manifest`] | On-disk JSON shapes and the output-tree writer |
//! | [`config`] | `config.toml` loading and validation |
//! | [`output`] | CLI output formatting — summary display of build results |
//!
//! # Design Decisions
//!
//! ## JSON Manifests, No HTML
//!
//! The output is a tree of small JSON files laid out so a client-side router
//! can fetch exactly what a view needs: one file per feed page, per archive
//! drill-down level, per category node, per tag. No backend, no query
//! interface — the directory layout *is* the API.
//!
//! ## Deterministic Covers
//!
//! Each grouping (a year, a month, a day, a tag, a category page) displays one
//! representative cover image chosen pseudo-randomly from the posts beneath
//! it. The choice is seeded from a fingerprint of the eligible post ids, so it
//! is stable across regenerations and independent of iteration order — covers
//! never "flicker" between deploys unless the underlying post set changes.
//! See [`cover`] for the exact arithmetic.
//!
//! ## Isolate-and-Skip Error Handling
//!
//! One unreadable or malformed document never aborts a build: it is logged
//! and excluded from every aggregate. Output-tree write failures are the
//! opposite — fatal and surfaced as a non-zero exit, because a half-written
//! index tree is strictly worse than none. There are no retries; resilience
//! is re-running the idempotent batch.

pub mod archive;
pub mod category;
pub mod config;
pub mod cover;
pub mod frontmatter;
pub mod generate;
pub mod manifest;
pub mod output;
pub mod paging;
pub mod scan;
pub mod tag;

#[cfg(test)]
pub(crate) mod test_helpers;
