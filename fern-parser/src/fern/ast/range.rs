//! Source locations for AST nodes
//!
//! This module defines the data structures for representing positions in fern
//! source text, as well as the utility for converting byte offsets to
//! row/column locations.
//!
//! ## Types
//!
//! - [`Location`] - A row:column position in source text
//! - [`Range`] - A start/end pair of locations
//! - [`Ranged`] - A value paired with the range it was parsed from
//! - [`SourceText`] - Source text with a line-start table for offset lookup
//!
//! ## Key Design
//!
//! - **Mandatory locations**: every AST node is wrapped in (or carries) a
//!   `Range`; there is no "unknown location" state beyond the zero default
//! - **Row-major ordering**: `Range.start <= Range.end` always holds, with
//!   locations compared row first, column second
//! - **0-based**: rows and columns both start at 0; columns count characters,
//!   not bytes, so multi-byte source text reports sensible columns
//! - **Efficient conversion**: O(log n) binary search over line starts when
//!   turning a byte offset into a location

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text (row and column, both 0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub row: usize,
    pub column: usize,
}

impl Location {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// A region of source text delimited by a start and end location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Location,
    pub end: Location,
}

impl Range {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// The smallest range covering both `first` and `last`.
    pub fn containing(first: &Range, last: &Range) -> Range {
        Range::new(first.start, last.end)
    }

    /// Check if a location falls within this range (inclusive on both ends).
    pub fn contains(&self, location: Location) -> bool {
        self.start <= location && location <= self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A parsed value together with the source range it was consumed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranged<T> {
    pub range: Range,
    pub value: T,
}

impl<T> Ranged<T> {
    pub fn new(range: Range, value: T) -> Self {
        Self { range, value }
    }

    /// Apply `f` to the value, keeping the range.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Ranged<U> {
        Ranged {
            range: self.range,
            value: f(self.value),
        }
    }
}

/// Source text plus a precomputed table of line start offsets.
///
/// Built once per parse; every location attached to the AST comes from
/// [`SourceText::location_at`].
#[derive(Debug)]
pub struct SourceText {
    text: String,
    line_starts: Vec<usize>,
}

impl SourceText {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, ch) in text.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            text: text.to_string(),
            line_starts,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Convert a byte offset into a row/column location.
    pub fn location_at(&self, offset: usize) -> Location {
        let row = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);
        let column = self.text[self.line_starts[row]..offset].chars().count();
        Location::new(row, column)
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
