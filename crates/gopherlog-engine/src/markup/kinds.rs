//! Delimiters and classification for the inline constructs the converter
//! rewrites. The scanner uses these constants; it never hardcodes `[[`.

/// `[[target]]` or `[[target|Display name]]`.
pub struct BracketRef;

impl BracketRef {
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
    pub const ALIAS: char = '|';
    /// Leading marker forcing a namespace reference.
    pub const NAMESPACE: char = ':';
    pub const SCHEMES: [&'static str; 2] = ["http://", "https://"];
}

/// Inline image placeholder label, e.g. `[BILD 3]`.
pub struct MediaLabel;

impl MediaLabel {
    pub const PREFIX: &'static str = "BILD";

    pub fn format(n: usize) -> String {
        format!("[{} {n}]", Self::PREFIX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Page in the wiki, resolved against the wiki base URL.
    Namespace,
    /// Full URL, used verbatim.
    External,
}

/// A classified bracket reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    pub kind: LinkKind,
    pub target: &'a str,
    pub display: &'a str,
}

impl<'a> Reference<'a> {
    /// Classifies the text between `[[` and `]]`.
    ///
    /// A leading `:` always means a namespace reference. Otherwise text
    /// containing an http(s) scheme is an external link, and anything else
    /// falls back to a namespace reference.
    pub fn classify(inner: &'a str) -> Self {
        let (kind, rest) = match inner.strip_prefix(BracketRef::NAMESPACE) {
            Some(rest) => (LinkKind::Namespace, rest),
            None if BracketRef::SCHEMES.iter().any(|s| inner.contains(s)) => {
                (LinkKind::External, inner)
            }
            None => (LinkKind::Namespace, inner),
        };

        let (target, display) = rest.split_once(BracketRef::ALIAS).unwrap_or((rest, rest));
        Self {
            kind,
            target,
            display,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::namespace_with_alias(":kitchen:rules|Rules", LinkKind::Namespace, "kitchen:rules", "Rules")]
    #[case::external_with_alias("http://example.org|Example", LinkKind::External, "http://example.org", "Example")]
    #[case::https("https://example.org", LinkKind::External, "https://example.org", "https://example.org")]
    #[case::bare_page("justapage", LinkKind::Namespace, "justapage", "justapage")]
    #[case::colon_beats_scheme(":http://x|y", LinkKind::Namespace, "http://x", "y")]
    #[case::scheme_anywhere("see http://x", LinkKind::External, "see http://x", "see http://x")]
    #[case::empty("", LinkKind::Namespace, "", "")]
    #[case::empty_alias("page|", LinkKind::Namespace, "page", "")]
    #[case::second_pipe_stays_in_display("a|b|c", LinkKind::Namespace, "a", "b|c")]
    fn classifies_references(
        #[case] inner: &str,
        #[case] kind: LinkKind,
        #[case] target: &str,
        #[case] display: &str,
    ) {
        assert_eq!(
            Reference::classify(inner),
            Reference {
                kind,
                target,
                display
            }
        );
    }

    #[test]
    fn media_label_format() {
        assert_eq!(MediaLabel::format(1), "[BILD 1]");
        assert_eq!(MediaLabel::format(12), "[BILD 12]");
    }
}
