//! Date archive: a year → month → day tree over the post corpus.
//!
//! The tree is built with an idempotent find-or-create-then-append per level
//! and holds indices into the globally sorted post slice — nodes are
//! ephemeral grouping state, never themselves persisted. What gets written
//! is each node's derived summary: child names, page count, cover.
//!
//! Sibling lists sort descending by plain string comparison; the zero-padded
//! date components make lexicographic order chronological. Covers widen with
//! altitude: a day's cover is drawn from that day's posts, a month's from
//! every post in the month, a year's from every post in the year.

use crate::cover;
use crate::manifest::{
    ArchiveDayManifest, ArchiveManifest, ArchiveMonthManifest, ArchiveYearManifest, ManifestWriter,
    PageManifest, WriteError,
};
use crate::paging;
use crate::scan::Post;

#[derive(Debug)]
pub struct ArchiveTree {
    pub years: Vec<YearNode>,
}

#[derive(Debug)]
pub struct YearNode {
    pub year: String,
    pub months: Vec<MonthNode>,
}

#[derive(Debug)]
pub struct MonthNode {
    pub month: String,
    pub days: Vec<DayNode>,
}

#[derive(Debug)]
pub struct DayNode {
    pub day: String,
    /// Indices into the post slice the tree was built from.
    pub posts: Vec<usize>,
}

/// Group posts by creation date. Every post lands in exactly one day bucket.
/// Sibling lists come out sorted descending; day buckets are re-sorted
/// descending by timestamp (insertion order is not guaranteed sorted).
pub fn build_tree(posts: &[Post]) -> ArchiveTree {
    let mut years: Vec<YearNode> = Vec::new();

    for (index, post) in posts.iter().enumerate() {
        let date = &post.create_date;

        let yi = match years.iter().position(|y| y.year == date.year) {
            Some(i) => i,
            None => {
                years.push(YearNode {
                    year: date.year.clone(),
                    months: Vec::new(),
                });
                years.len() - 1
            }
        };
        let months = &mut years[yi].months;

        let mi = match months.iter().position(|m| m.month == date.month) {
            Some(i) => i,
            None => {
                months.push(MonthNode {
                    month: date.month.clone(),
                    days: Vec::new(),
                });
                months.len() - 1
            }
        };
        let days = &mut months[mi].days;

        let di = match days.iter().position(|d| d.day == date.day) {
            Some(i) => i,
            None => {
                days.push(DayNode {
                    day: date.day.clone(),
                    posts: Vec::new(),
                });
                days.len() - 1
            }
        };
        days[di].posts.push(index);
    }

    years.sort_by(|a, b| b.year.cmp(&a.year));
    for year in &mut years {
        year.months.sort_by(|a, b| b.month.cmp(&a.month));
        for month in &mut year.months {
            month.days.sort_by(|a, b| b.day.cmp(&a.day));
            for day in &mut month.days {
                day.posts
                    .sort_by(|&a, &b| posts[b].create_timestamp.cmp(&posts[a].create_timestamp));
            }
        }
    }

    ArchiveTree { years }
}

/// Write the archive manifests. Returns the number of years.
pub fn write_archive(
    posts: &[Post],
    base_path: &str,
    writer: &mut ManifestWriter,
) -> Result<usize, WriteError> {
    let tree = build_tree(posts);

    writer.write(
        "archive.json",
        &ArchiveManifest {
            years: tree.years.iter().map(|y| y.year.clone()).collect(),
        },
    )?;

    for year in &tree.years {
        let year_posts: Vec<&Post> = year
            .months
            .iter()
            .flat_map(|m| m.days.iter())
            .flat_map(|d| d.posts.iter())
            .map(|&i| &posts[i])
            .collect();
        writer.write(
            format!("archive/{}.json", year.year),
            &ArchiveYearManifest {
                months: year.months.iter().map(|m| m.month.clone()).collect(),
                cover: cover::select_cover(&year_posts, base_path),
            },
        )?;

        for month in &year.months {
            let month_posts: Vec<&Post> = month
                .days
                .iter()
                .flat_map(|d| d.posts.iter())
                .map(|&i| &posts[i])
                .collect();
            writer.write(
                format!("archive/{}/{}.json", year.year, month.month),
                &ArchiveMonthManifest {
                    days: month.days.iter().map(|d| d.day.clone()).collect(),
                    cover: cover::select_cover(&month_posts, base_path),
                },
            )?;

            for day in &month.days {
                let day_posts: Vec<&Post> = day.posts.iter().map(|&i| &posts[i]).collect();
                writer.write(
                    format!("archive/{}/{}/{}.json", year.year, month.month, day.day),
                    &ArchiveDayManifest {
                        pages: paging::page_count(day_posts.len()),
                        cover: cover::select_cover(&day_posts, base_path),
                    },
                )?;

                for (n, chunk) in paging::numbered_chunks(&day_posts) {
                    writer.write(
                        format!(
                            "archive/{}/{}/{}/{}.json",
                            year.year, month.month, day.day, n
                        ),
                        &PageManifest {
                            posts: chunk.iter().map(|p| p.id.clone()).collect(),
                        },
                    )?;
                }
            }
        }
    }

    Ok(tree.years.len())
}
