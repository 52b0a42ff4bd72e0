/// Header keys recognised in an entry file.
///
/// The header is a block of `KEY: value` lines above the first blank line.
/// Keys not listed here are ignored by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKey {
    Begin,
    End,
    Topic,
    Appendix,
    Media,
}

impl HeaderKey {
    pub const COMMENT: char = '#';
    pub const SEPARATOR: &'static str = ": ";
    pub const MEDIA_SEPARATOR: char = ',';
    /// Literal `END` value meaning "single-day entry".
    pub const NO_END: &'static str = "None";
    pub const DATE_FORMAT: &'static str = "%Y-%m-%d";

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "BEGIN" => Some(Self::Begin),
            "END" => Some(Self::End),
            "TOPIC" => Some(Self::Topic),
            "APPENDIX" => Some(Self::Appendix),
            "MEDIA" => Some(Self::Media),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Begin => "BEGIN",
            Self::End => "END",
            Self::Topic => "TOPIC",
            Self::Appendix => "APPENDIX",
            Self::Media => "MEDIA",
        }
    }
}

/// Splits one header line into its key and value.
///
/// Returns `None` for comments and for lines without a `": "` separator.
pub fn split_line(line: &str) -> Option<(&str, &str)> {
    if line.starts_with(HeaderKey::COMMENT) {
        return None;
    }
    line.split_once(HeaderKey::SEPARATOR)
}
