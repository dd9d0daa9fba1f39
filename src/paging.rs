//! Fixed-size pagination shared by every index axis.
//!
//! Pages are 1-indexed contiguous slices of an already-sorted post list.
//! Every axis (feed, archive days, category nodes, tag buckets) paginates
//! identically, so the client needs exactly one pager.

use crate::scan::Post;

/// Posts per page across all paginated manifests.
pub const PAGE_SIZE: usize = 10;

/// Number of pages a list of `total` posts occupies.
pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

/// Iterate `(page_number, slice)` pairs, page numbers starting at 1.
/// Every page but possibly the last holds exactly [`PAGE_SIZE`] items.
pub fn numbered_chunks<T>(items: &[T]) -> impl Iterator<Item = (usize, &[T])> {
    items
        .chunks(PAGE_SIZE)
        .enumerate()
        .map(|(i, chunk)| (i + 1, chunk))
}

/// Sort posts descending by creation timestamp. The sort is stable, so posts
/// sharing a timestamp keep their scan-order relative positions — re-runs on
/// an unchanged corpus paginate identically.
pub fn sort_by_create_desc(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.create_timestamp.cmp(&a.create_timestamp));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_three_items_make_three_pages() {
        assert_eq!(page_count(23), 3);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        assert_eq!(page_count(20), 2);
    }

    #[test]
    fn empty_list_has_zero_pages() {
        assert_eq!(page_count(0), 0);
        assert_eq!(numbered_chunks::<u32>(&[]).count(), 0);
    }

    #[test]
    fn chunks_are_one_indexed_and_full_except_last() {
        let items: Vec<u32> = (0..23).collect();
        let chunks: Vec<(usize, &[u32])> = numbered_chunks(&items).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].0, 1);
        assert_eq!(chunks[0].1.len(), PAGE_SIZE);
        assert_eq!(chunks[1].0, 2);
        assert_eq!(chunks[1].1.len(), PAGE_SIZE);
        assert_eq!(chunks[2].0, 3);
        assert_eq!(chunks[2].1.len(), 3);
    }

    #[test]
    fn concatenated_chunks_reproduce_input() {
        let items: Vec<u32> = (0..35).collect();
        let rebuilt: Vec<u32> = numbered_chunks(&items)
            .flat_map(|(_, chunk)| chunk.iter().copied())
            .collect();
        assert_eq!(rebuilt, items);
    }

    #[test]
    fn sort_is_descending_and_stable() {
        use crate::test_helpers::post;
        let mut posts = vec![post("a", 100), post("b", 300), post("c", 100), post("d", 200)];
        sort_by_create_desc(&mut posts);
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        // a and c tie on timestamp; a was first in scan order and stays first.
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }
}
