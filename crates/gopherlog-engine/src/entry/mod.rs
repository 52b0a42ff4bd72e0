//! # Entry
//!
//! One dated log record, parsed from a single file of the form
//!
//! ```text
//! # comment
//! BEGIN: 2023-12-01
//! END: None
//! TOPIC: Kitchen cleanup
//! APPENDIX: see the wiki
//! MEDIA: photo1.jpg
//!
//! Body text with [[:kitchen:rules|Rules]] references.
//! ```
//!
//! The file holds exactly one blank line, separating header from body. The
//! body is kept verbatim. Markup in the body is rewritten later, per page, by
//! [`crate::markup`].

pub mod header;

use chrono::NaiveDate;
use std::fmt;

pub use header::HeaderKey;

/// Boundary between header and body.
pub const BODY_SEPARATOR: &str = "\n\n";

#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("malformed entry: expected one blank line between header and body, found {found}")]
    BodySeparator { found: usize },
    #[error("malformed entry: no BEGIN header")]
    MissingBegin,
    #[error("invalid {key} date {value:?}: {source}")]
    DateParse {
        key: &'static str,
        value: String,
        source: chrono::ParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub begin: NaiveDate,
    pub end: Option<NaiveDate>,
    pub topic: String,
    pub appendix: String,
    /// One filename per `MEDIA` header line, in header order.
    pub media: Vec<String>,
    pub body: String,
}

impl Entry {
    /// Creates a single-day entry with empty fields.
    pub fn new(begin: NaiveDate) -> Self {
        Self {
            begin,
            end: None,
            topic: String::new(),
            appendix: String::new(),
            media: Vec::new(),
            body: String::new(),
        }
    }

    /// Parses the contents of an entry file.
    pub fn parse(content: &str) -> Result<Self, EntryError> {
        let found = content.matches(BODY_SEPARATOR).count();
        let Some((head, body)) = content.split_once(BODY_SEPARATOR).filter(|_| found == 1) else {
            return Err(EntryError::BodySeparator { found });
        };

        let mut begin = None;
        let mut end = None;
        let mut topic = String::new();
        let mut appendix = String::new();
        let mut media = Vec::new();

        for (key, value) in head.lines().filter_map(header::split_line) {
            let Some(key) = HeaderKey::from_key(key) else {
                continue;
            };
            match key {
                HeaderKey::Begin => begin = Some(parse_date(key, value)?),
                HeaderKey::End => {
                    end = if value == HeaderKey::NO_END {
                        None
                    } else {
                        Some(parse_date(key, value)?)
                    };
                }
                HeaderKey::Topic => topic = value.to_string(),
                HeaderKey::Appendix => appendix = value.to_string(),
                HeaderKey::Media => {
                    // Only the first file of a line counts; list extra files on their own lines.
                    let first = value
                        .split(HeaderKey::MEDIA_SEPARATOR)
                        .next()
                        .unwrap_or_default();
                    media.push(first.to_string());
                }
            }
        }

        let begin = begin.ok_or(EntryError::MissingBegin)?;
        let end = end.filter(|end| {
            let ordered = *end >= begin;
            if !ordered {
                log::warn!("Dropping END {end} before BEGIN {begin}");
            }
            ordered
        });

        Ok(Self {
            begin,
            end,
            topic,
            appendix,
            media,
            body: body.to_string(),
        })
    }

    /// The end date if it extends the entry past its first day.
    pub fn visible_end(&self) -> Option<NaiveDate> {
        self.end.filter(|end| *end > self.begin)
    }
}

fn parse_date(key: HeaderKey, value: &str) -> Result<NaiveDate, EntryError> {
    NaiveDate::parse_from_str(value, HeaderKey::DATE_FORMAT).map_err(|source| {
        EntryError::DateParse {
            key: key.as_str(),
            value: value.to_string(),
            source,
        }
    })
}

/// Writes the entry back out in file format.
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = HeaderKey::SEPARATOR;
        writeln!(
            f,
            "{}{sep}{}",
            HeaderKey::Begin.as_str(),
            self.begin.format(HeaderKey::DATE_FORMAT)
        )?;
        match self.end {
            Some(end) => writeln!(
                f,
                "{}{sep}{}",
                HeaderKey::End.as_str(),
                end.format(HeaderKey::DATE_FORMAT)
            )?,
            None => writeln!(f, "{}{sep}{}", HeaderKey::End.as_str(), HeaderKey::NO_END)?,
        }
        writeln!(f, "{}{sep}{}", HeaderKey::Topic.as_str(), self.topic)?;
        writeln!(f, "{}{sep}{}", HeaderKey::Appendix.as_str(), self.appendix)?;
        for file in &self.media {
            writeln!(f, "{}{sep}{file}", HeaderKey::Media.as_str())?;
        }
        write!(f, "\n{}", self.body)
    }
}
