//! # Pagination
//!
//! Groups a chronologically sorted entry stream into one [`Page`] per
//! year-month. Reference counters restart at 1 on every page.
//!
//! A page is complete when the next entry belongs to another month, or when
//! the stream ends. Each page keeps the year of its own entries, so a
//! December page followed by January is still filed under December's year.

use crate::entry::Entry;
use crate::markup::{Counters, FootnoteTargets, convert_entry};
use crate::page::{MonthKey, Page};
use crate::render::{RenderError, Renderer, write_page};
use std::path::{Path, PathBuf};

struct OpenPage {
    key: MonthKey,
    page: Page,
    counters: Counters,
}

/// Accumulates entries into the page of the current month.
pub struct PageBuilder<'t> {
    targets: &'t FootnoteTargets,
    current: Option<OpenPage>,
}

impl<'t> PageBuilder<'t> {
    pub fn new(targets: &'t FootnoteTargets) -> Self {
        Self {
            targets,
            current: None,
        }
    }

    /// Adds the next entry, returning the previous page if this entry starts a new month.
    pub fn push(&mut self, entry: &Entry) -> Option<Page> {
        let key = MonthKey::of(entry.begin);
        let same_month = self.current.as_ref().is_some_and(|open| open.key == key);
        let finished = if same_month {
            None
        } else {
            self.current.take().map(|open| open.page)
        };

        let open = self.current.get_or_insert_with(|| OpenPage {
            key,
            page: Page::new(key),
            counters: Counters::default(),
        });

        let converted = convert_entry(entry, open.counters, self.targets);
        open.page.entries.push(converted.entry);
        open.page.links.extend(converted.links);
        open.page.media_links.extend(converted.media_links);
        open.counters = converted.counters;

        finished
    }

    /// The page still being accumulated, if any.
    pub fn finish(self) -> Option<Page> {
        self.current.map(|open| open.page)
    }
}

/// Groups sorted entries into pages.
pub fn paginate(entries: &[Entry], targets: &FootnoteTargets) -> Vec<Page> {
    let mut builder = PageBuilder::new(targets);
    let mut pages: Vec<Page> = entries.iter().filter_map(|e| builder.push(e)).collect();
    pages.extend(builder.finish());
    pages
}

/// Renders every page of `entries` to `output_root`, one file per month.
///
/// Pages are written as soon as they are complete; an error stops the run
/// and leaves already written pages in place.
pub fn publish(
    entries: &[Entry],
    output_root: &Path,
    renderer: &dyn Renderer,
    targets: &FootnoteTargets,
) -> Result<Vec<PathBuf>, RenderError> {
    let mut builder = PageBuilder::new(targets);
    let mut written = Vec::new();

    for entry in entries {
        if let Some(page) = builder.push(entry) {
            written.push(write_page(output_root, &page, renderer)?);
        }
    }
    if let Some(page) = builder.finish() {
        written.push(write_page(output_root, &page, renderer)?);
    }

    log::info!("Wrote {} pages to {}", written.len(), output_root.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn entry(begin: &str, body: &str, media: &[&str]) -> Entry {
        Entry {
            topic: begin.to_string(),
            body: body.to_string(),
            media: media.iter().map(|m| m.to_string()).collect(),
            ..Entry::new(NaiveDate::parse_from_str(begin, "%Y-%m-%d").unwrap())
        }
    }

    #[test]
    fn groups_by_year_and_month() {
        let entries = vec![
            entry("2023-11-30", "", &[]),
            entry("2023-12-01", "", &[]),
            entry("2023-12-24", "", &[]),
            entry("2024-12-01", "", &[]),
        ];

        let pages = paginate(&entries, &FootnoteTargets::default());

        let shape: Vec<_> = pages
            .iter()
            .map(|p| (p.year.as_str(), p.month.as_str(), p.entries.len()))
            .collect();
        assert_eq!(
            shape,
            vec![
                ("2023", "11-November", 1),
                ("2023", "12-December", 2),
                ("2024", "12-December", 1),
            ]
        );
    }

    #[test]
    fn entries_keep_sorted_order_within_a_page() {
        let entries = vec![
            entry("2023-12-01", "", &[]),
            entry("2023-12-01", "", &[]),
            entry("2023-12-05", "", &[]),
        ];
        let pages = paginate(&entries, &FootnoteTargets::default());
        let begins: Vec<_> = pages[0].entries.iter().map(|e| e.topic.as_str()).collect();
        assert_eq!(begins, ["2023-12-01", "2023-12-01", "2023-12-05"]);
    }

    #[test]
    fn december_page_keeps_its_year_across_new_year() {
        let entries = vec![
            entry("2023-12-30", "", &[]),
            entry("2024-01-02", "", &[]),
        ];

        let targets = FootnoteTargets::default();
        let mut builder = PageBuilder::new(&targets);
        assert!(builder.push(&entries[0]).is_none());
        let december = builder.push(&entries[1]).unwrap();

        assert_eq!(december.year, "2023");
        assert_eq!(december.month, "12-December");
        let january = builder.finish().unwrap();
        assert_eq!(january.year, "2024");
        assert_eq!(january.month, "01-January");
    }

    #[test]
    fn counters_run_within_a_page_and_reset_per_page() {
        let entries = vec![
            entry("2023-12-01", "[[a]] [[b]]", &["1.jpg"]),
            entry("2023-12-02", "[[c]]", &["2.jpg", "3.jpg"]),
            entry("2024-01-01", "[[d]]", &["4.jpg"]),
        ];

        let pages = paginate(&entries, &FootnoteTargets::default());

        let december = &pages[0];
        assert_eq!(december.entries[0].body, "[a][LINK:1] [b][LINK:2]");
        assert_eq!(december.entries[1].body, "[c][LINK:3]");
        assert_eq!(december.entries[1].media, vec!["[BILD 2]", "[BILD 3]"]);
        assert_eq!(december.links.len(), 3);
        assert_eq!(december.media_links.len(), 3);
        assert!(december.links[2].starts_with("[h|[LINK 3]: c|"));

        let january = &pages[1];
        assert_eq!(january.entries[0].body, "[d][LINK:1]");
        assert_eq!(january.entries[0].media, vec!["[BILD 1]"]);
        assert!(january.media_links[0].starts_with("[h|[BILD 1]|"));
    }

    #[test]
    fn last_month_is_flushed() {
        let entries = vec![entry("2023-12-01", "", &[])];
        let pages = paginate(&entries, &FootnoteTargets::default());
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn no_entries_no_pages() {
        assert!(paginate(&[], &FootnoteTargets::default()).is_empty());
    }

    #[test]
    fn month_revisited_after_gap_starts_a_new_page() {
        // Unsorted input: grouping is by contiguous runs only
        let entries = vec![
            entry("2023-12-01", "", &[]),
            entry("2024-01-01", "", &[]),
            entry("2023-12-02", "", &[]),
        ];
        assert_eq!(paginate(&entries, &FootnoteTargets::default()).len(), 3);
    }
}
