//! Deterministic representative-cover selection.
//!
//! Every grouping in the index (a year, a month, a day, a category page, a
//! tag) shows one cover image picked from the posts beneath it. The pick
//! must feel random across groupings yet be perfectly reproducible: the same
//! post set yields the same cover on every regeneration, regardless of the
//! order a builder happens to iterate in. Anything less and covers would
//! "flicker" between deploys.
//!
//! Selection is therefore a pure function of the *set* of eligible post ids:
//!
//! 1. Candidates (posts carrying a cover reference) are canonicalized by
//!    sorting on id.
//! 2. The ids joined by `|` form a fingerprint.
//! 3. The fingerprint hashes with a wrapping ×31 accumulator into a `u32`.
//! 4. One step of a mulberry-style two-multiply xorshift mix turns the hash
//!    into a float in `[0, 1)`, which indexes the candidate list.
//!
//! The arithmetic is exact 32-bit wraparound throughout — the wire format of
//! covers already published depends on it, so do not "fix" the constants or
//! widen the types.

use crate::scan::Post;

/// Pick the representative cover for a grouping of posts.
///
/// Returns the resolved (publishable) cover path, or `None` when no post in
/// the grouping carries a cover reference.
pub fn select_cover(posts: &[&Post], base_path: &str) -> Option<String> {
    let mut eligible: Vec<&Post> = posts
        .iter()
        .copied()
        .filter(|p| p.cover.is_some())
        .collect();
    if eligible.is_empty() {
        return None;
    }
    // Canonical order: the result must not depend on caller iteration order.
    eligible.sort_by(|a, b| a.id.cmp(&b.id));

    let fingerprint = eligible
        .iter()
        .map(|p| p.id.as_str())
        .collect::<Vec<_>>()
        .join("|");
    let value = seeded_unit(fingerprint_hash(&fingerprint));
    let index = (value * eligible.len() as f64).floor() as usize;

    let chosen = eligible[index];
    let cover = chosen.cover.as_deref()?;
    Some(resolve_cover_path(cover, &chosen.path, base_path))
}

/// Accumulate `h = h * 31 + codepoint` over the fingerprint, wrapping at 32
/// bits, result read as unsigned.
fn fingerprint_hash(fingerprint: &str) -> u32 {
    let mut h: u32 = 0;
    for c in fingerprint.chars() {
        h = h.wrapping_mul(31).wrapping_add(c as u32);
    }
    h
}

/// One mulberry-style mix step: seed offset, two 32-bit multiplies with
/// xorshifts, then scale into `[0, 1)`.
fn seeded_unit(seed: u32) -> f64 {
    let mut s = seed.wrapping_add(0x6D2B_79F5);
    s = (s ^ (s >> 15)).wrapping_mul(s | 1);
    s = s.wrapping_add((s ^ (s >> 7)).wrapping_mul(s | 61)) ^ s;
    ((s ^ (s >> 14)) as f64) / 4_294_967_296.0
}

/// Resolve a cover reference to its published path.
///
/// Values with a scheme or a leading path separator pass through unchanged;
/// everything else is relative to the owning post's directory under the
/// published posts base path.
pub fn resolve_cover_path(cover: &str, post_path: &str, base_path: &str) -> String {
    if cover.starts_with('/') || cover.starts_with("http://") || cover.starts_with("https://") {
        return cover.to_string();
    }
    let post_dir = post_path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
    posix_join(base_path, &[post_dir, cover])
}

/// Join and normalize slash-delimited segments, resolving `.` and `..`.
/// The result is always absolute; `base` is expected to lead with `/`.
fn posix_join(base: &str, parts: &[&str]) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for part in std::iter::once(base).chain(parts.iter().copied()) {
        for segment in part.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s => segments.push(s),
            }
        }
    }
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::covered_post;

    const BASE: &str = "/sites/blog/posts";

    #[test]
    fn hash_of_empty_fingerprint_is_zero() {
        assert_eq!(fingerprint_hash(""), 0);
    }

    #[test]
    fn hash_accumulates_times_31() {
        assert_eq!(fingerprint_hash("a"), 97);
        assert_eq!(fingerprint_hash("ab"), 97 * 31 + 98);
        assert_eq!(fingerprint_hash("a|b"), (97 * 31 + 124) * 31 + 98);
    }

    #[test]
    fn hash_wraps_at_32_bits() {
        // Long input overflows 32 bits many times over; must not panic and
        // must stay deterministic.
        let long = "x".repeat(10_000);
        assert_eq!(fingerprint_hash(&long), fingerprint_hash(&long));
    }

    #[test]
    fn seeded_unit_is_deterministic_and_in_range() {
        for seed in [0u32, 1, 97, 0xDEAD_BEEF, u32::MAX] {
            let v = seeded_unit(seed);
            assert_eq!(v, seeded_unit(seed));
            assert!((0.0..1.0).contains(&v), "seed {seed} gave {v}");
        }
    }

    #[test]
    fn no_candidates_means_no_cover() {
        let plain = crate::test_helpers::post("2024/01/05/plain", 100);
        assert_eq!(select_cover(&[&plain], BASE), None);
        assert_eq!(select_cover(&[], BASE), None);
    }

    #[test]
    fn single_candidate_is_always_chosen() {
        let p = covered_post("2024/01/05/a", "a.md", "pic.png", 100);
        assert_eq!(
            select_cover(&[&p], BASE),
            Some("/sites/blog/posts/pic.png".to_string())
        );
    }

    #[test]
    fn selection_ignores_input_order() {
        let a = covered_post("2024/01/05/a", "a.md", "a.png", 100);
        let b = covered_post("2024/01/06/b", "b.md", "b.png", 200);
        let c = covered_post("2024/01/07/c", "c.md", "c.png", 300);

        let forward = select_cover(&[&a, &b, &c], BASE);
        let reversed = select_cover(&[&c, &b, &a], BASE);
        let shuffled = select_cover(&[&b, &c, &a], BASE);
        assert!(forward.is_some());
        assert_eq!(forward, reversed);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn selection_is_a_member_of_the_candidates() {
        let a = covered_post("2024/01/05/a", "a.md", "a.png", 100);
        let b = covered_post("2024/01/06/b", "b.md", "b.png", 200);
        let chosen = select_cover(&[&a, &b], BASE).unwrap();
        assert!(
            chosen == "/sites/blog/posts/a.png" || chosen == "/sites/blog/posts/b.png",
            "unexpected cover {chosen}"
        );
    }

    #[test]
    fn posts_without_covers_do_not_dilute_the_pool() {
        let a = covered_post("2024/01/05/a", "a.md", "a.png", 100);
        let plain = crate::test_helpers::post("2024/01/06/plain", 200);
        assert_eq!(
            select_cover(&[&plain, &a], BASE),
            Some("/sites/blog/posts/a.png".to_string())
        );
    }

    #[test]
    fn absolute_url_passes_through() {
        assert_eq!(
            resolve_cover_path("https://cdn.example/x.png", "a/b.md", BASE),
            "https://cdn.example/x.png"
        );
        assert_eq!(
            resolve_cover_path("http://cdn.example/x.png", "a/b.md", BASE),
            "http://cdn.example/x.png"
        );
    }

    #[test]
    fn protocol_relative_url_passes_through() {
        assert_eq!(
            resolve_cover_path("//cdn.example/x.png", "a/b.md", BASE),
            "//cdn.example/x.png"
        );
    }

    #[test]
    fn site_absolute_path_passes_through() {
        assert_eq!(
            resolve_cover_path("/static/x.png", "a/b.md", BASE),
            "/static/x.png"
        );
    }

    #[test]
    fn relative_cover_resolves_under_post_directory() {
        assert_eq!(
            resolve_cover_path("pic.png", "travel/tokyo.md", BASE),
            "/sites/blog/posts/travel/pic.png"
        );
    }

    #[test]
    fn relative_cover_in_root_post_resolves_under_base() {
        assert_eq!(
            resolve_cover_path("pic.png", "hello.md", BASE),
            "/sites/blog/posts/pic.png"
        );
    }

    #[test]
    fn dot_segments_are_normalized() {
        assert_eq!(
            resolve_cover_path("./img/pic.png", "travel/tokyo.md", BASE),
            "/sites/blog/posts/travel/img/pic.png"
        );
        assert_eq!(
            resolve_cover_path("../shared/pic.png", "travel/tokyo.md", BASE),
            "/sites/blog/posts/shared/pic.png"
        );
    }
}
