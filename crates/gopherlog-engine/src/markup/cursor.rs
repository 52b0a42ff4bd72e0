/// A byte cursor over a string slice.
///
/// Used by the bracket-reference scanner and the template parser. Matches are
/// only ever taken at ASCII delimiters, so slicing at a matched position is
/// always on a char boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    pub s: &'a str,
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Advances until the remaining input starts with `pat`.
    ///
    /// Returns the position of the match, or `None` (cursor at end) if
    /// `pat` never occurs.
    pub fn seek(&mut self, pat: &[u8]) -> Option<usize> {
        while !self.eof() {
            if self.starts_with(pat) {
                return Some(self.pos());
            }
            self.bump();
        }
        None
    }

    /// Text from `start` up to the cursor.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.s[start..self.i.min(self.s.len())]
    }
}
