use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// An entry ready for display: formatted dates and rewritten body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputEntry {
    pub begin: String,
    /// Empty unless the entry spans several days.
    pub end: String,
    pub topic: String,
    pub appendix: String,
    /// Inline labels such as `[BILD 1]`, one per media file.
    pub media: Vec<String>,
    pub body: String,
}

/// One monthly index page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    pub year: String,
    pub month: String,
    pub entries: Vec<OutputEntry>,
    /// Link footnotes, numbered from 1 in page order.
    pub links: Vec<String>,
    /// Media footnotes, numbered from 1 in page order.
    pub media_links: Vec<String>,
}

impl Page {
    pub fn new(key: MonthKey) -> Self {
        Self {
            year: key.year_label(),
            month: key.month_label(),
            ..Self::default()
        }
    }
}

/// Year and month an entry is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year_label(self) -> String {
        self.year.to_string()
    }

    /// Directory label such as `12-December`.
    pub fn month_label(self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%m-%B").to_string(),
            None => format!("{:02}", self.month),
        }
    }
}
