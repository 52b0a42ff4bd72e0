use crate::entry::Entry;
use crate::page::OutputEntry;

use super::{
    cursor::Cursor,
    kinds::{BracketRef, LinkKind, MediaLabel, Reference},
};

/// Date format for page output, e.g. `Monday, 2. January 2006`.
pub const DISPLAY_DATE_FORMAT: &str = "%A, %-d. %B %Y";
/// Prefix of a displayed end date ("through").
pub const END_PREFIX: &str = "bis ";

/// Running reference numbers for one page.
///
/// Both start at 1 for every page. The converter takes them by value and
/// hands back the numbers the next entry on the same page should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub link: usize,
    pub media: usize,
}

impl Default for Counters {
    fn default() -> Self {
        Self { link: 1, media: 1 }
    }
}

/// Where footnotes point and how they are written as gopher menu lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootnoteTargets {
    /// Wiki page script; namespace targets are appended as `?id=<target>`.
    pub wiki_url: String,
    /// Prefix for media filenames.
    pub media_url: String,
    pub host: String,
    pub port: u16,
}

impl Default for FootnoteTargets {
    fn default() -> Self {
        Self {
            wiki_url: "http://www.binary-kitchen.de/wiki/doku.php".to_string(),
            media_url: "https://raw.githubusercontent.com/Binary-Kitchen/kitchenlog/master/media/"
                .to_string(),
            host: "gopher.binary-kitchen.de".to_string(),
            port: 70,
        }
    }
}

impl FootnoteTargets {
    /// URL a reference resolves to.
    pub fn resolve(&self, reference: &Reference<'_>) -> String {
        match reference.kind {
            LinkKind::Namespace => format!("{}?id={}", self.wiki_url, reference.target),
            LinkKind::External => reference.target.to_string(),
        }
    }

    pub fn link_footnote(&self, n: usize, reference: &Reference<'_>) -> String {
        self.menu_line(
            &format!("[LINK {n}]: {}", reference.display),
            &self.resolve(reference),
        )
    }

    pub fn media_footnote(&self, label: &str, file: &str) -> String {
        self.menu_line(label, &format!("{}{file}", self.media_url))
    }

    /// Gph HTML-link item: `[h|<text>|URL:<url>|<host>|<port>]`.
    fn menu_line(&self, text: &str, url: &str) -> String {
        format!("[h|{text}|URL:{url}|{}|{}]", self.host, self.port)
    }
}

/// Result of converting one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub entry: OutputEntry,
    pub links: Vec<String>,
    pub media_links: Vec<String>,
    pub counters: Counters,
}

/// Rewrites every `[[...]]` span in `body`.
///
/// Each span becomes `[<display>][LINK:<n>]` and adds one footnote to
/// `links`. Brackets do not nest: a span ends at the first `]]` after its
/// `[[`. An unterminated `[[` leaves the rest of the body as it is.
/// Returns the rewritten body and the next link number.
pub fn rewrite_references(
    body: &str,
    mut next: usize,
    targets: &FootnoteTargets,
    links: &mut Vec<String>,
) -> (String, usize) {
    let mut out = String::with_capacity(body.len());
    let mut cur = Cursor::new(body);

    loop {
        let text_start = cur.pos();
        let Some(open) = cur.seek(BracketRef::OPEN) else {
            out.push_str(cur.slice_from(text_start));
            break;
        };
        out.push_str(cur.slice_from(text_start));

        cur.bump_n(BracketRef::OPEN.len());
        let inner_start = cur.pos();
        if cur.seek(BracketRef::CLOSE).is_none() {
            out.push_str(&body[open..]);
            break;
        }
        let reference = Reference::classify(cur.slice_from(inner_start));
        cur.bump_n(BracketRef::CLOSE.len());

        out.push('[');
        out.push_str(reference.display);
        out.push_str(&format!("][LINK:{next}]"));
        links.push(targets.link_footnote(next, &reference));
        next += 1;
    }

    (out, next)
}

/// Formats one entry for a page, numbering its references from `counters`.
pub fn convert_entry(entry: &Entry, counters: Counters, targets: &FootnoteTargets) -> Converted {
    let mut links = Vec::new();
    let (body, next_link) = rewrite_references(&entry.body, counters.link, targets, &mut links);

    let mut media = Vec::with_capacity(entry.media.len());
    let mut media_links = Vec::with_capacity(entry.media.len());
    let mut next_media = counters.media;
    for file in &entry.media {
        let label = MediaLabel::format(next_media);
        media_links.push(targets.media_footnote(&label, file));
        media.push(label);
        next_media += 1;
    }

    let end = entry
        .visible_end()
        .map(|end| format!("{END_PREFIX}{}", end.format(DISPLAY_DATE_FORMAT)))
        .unwrap_or_default();

    Converted {
        entry: OutputEntry {
            begin: entry.begin.format(DISPLAY_DATE_FORMAT).to_string(),
            end,
            topic: entry.topic.clone(),
            appendix: entry.appendix.clone(),
            media,
            body,
        },
        links,
        media_links,
        counters: Counters {
            link: next_link,
            media: next_media,
        },
    }
}
