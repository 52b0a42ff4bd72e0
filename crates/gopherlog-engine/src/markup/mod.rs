//! # Markup
//!
//! Rewrites entry bodies for display on a page.
//!
//! - **Bracket references**: `[[:ns:page|Name]]`, `[[page]]` and
//!   `[[http://…|Name]]` become `[Name][LINK:n]` with a footnote per reference.
//! - **Media**: every `MEDIA` file becomes an inline label `[BILD n]` with a
//!   footnote pointing at the media base URL.
//!
//! Numbering is page-scoped, so conversion happens during pagination and the
//! counters are threaded through [`convert_entry`] explicitly.

pub mod convert;
pub mod cursor;
pub mod kinds;

pub use convert::{Converted, Counters, FootnoteTargets, convert_entry, rewrite_references};
pub use kinds::{LinkKind, Reference};
