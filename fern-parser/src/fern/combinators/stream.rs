//! The input stream threaded through every parser
//!
//! A `Stream` is the full source text plus the current byte offset. Copies
//! are cheap (the text is shared), which is what makes the unconditional
//! backtracking in `or` affordable: every alternative gets its own copy and
//! a failed branch simply drops it.

use std::fmt;
use std::rc::Rc;

use regex::Regex;

use crate::fern::ast::range::{Location, SourceText};

#[derive(Clone)]
pub struct Stream {
    source: Rc<SourceText>,
    offset: usize,
}

impl Stream {
    pub fn new(text: &str) -> Self {
        Stream {
            source: Rc::new(SourceText::new(text)),
            offset: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The input left to consume.
    pub fn remaining(&self) -> &str {
        &self.source.text()[self.offset..]
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// The row/column location of the current offset.
    pub fn location(&self) -> Location {
        self.source.location_at(self.offset)
    }

    /// A copy advanced by `bytes`.
    pub fn advance(&self, bytes: usize) -> Stream {
        Stream {
            source: Rc::clone(&self.source),
            offset: self.offset + bytes,
        }
    }

    /// Match an anchored regex at the current position, returning the match
    /// length and text. Patterns are expected to carry a `^` anchor; matches
    /// elsewhere in the remaining input never count.
    pub fn match_regex(&self, pattern: &Regex) -> Option<(usize, String)> {
        pattern
            .find(self.remaining())
            .filter(|found| found.start() == 0)
            .map(|found| (found.end(), found.as_str().to_string()))
    }

    /// Does the remaining input start with `prefix`?
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// The next character, if any.
    pub fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }
}

impl PartialEq for Stream {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.source, &other.source) && self.offset == other.offset
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview: String = self.remaining().chars().take(16).collect();
        write!(f, "Stream(@{} {:?})", self.offset, preview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]+").unwrap());

    #[test]
    fn test_advance_and_remaining() {
        let stream = Stream::new("abc def");
        assert_eq!(stream.remaining(), "abc def");
        let later = stream.advance(4);
        assert_eq!(later.remaining(), "def");
        assert_eq!(stream.remaining(), "abc def");
    }

    #[test]
    fn test_match_regex_is_anchored() {
        let stream = Stream::new("  abc");
        assert_eq!(stream.match_regex(&WORD), None);
        let at_word = stream.advance(2);
        assert_eq!(at_word.match_regex(&WORD), Some((3, "abc".to_string())));
    }

    #[test]
    fn test_location_tracks_rows() {
        let stream = Stream::new("ab\ncd");
        assert_eq!(stream.location(), Location::new(0, 0));
        assert_eq!(stream.advance(3).location(), Location::new(1, 0));
        assert_eq!(stream.advance(4).location(), Location::new(1, 1));
    }

    #[test]
    fn test_equality_compares_offsets() {
        let stream = Stream::new("abc");
        assert_eq!(stream.clone(), stream.clone());
        assert_ne!(stream.clone(), stream.advance(1));
    }
}
