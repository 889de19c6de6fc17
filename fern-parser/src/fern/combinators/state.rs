//! Parse state threaded through every combinator
//!
//! Two things ride along with the input: the stack of open indentation
//! columns (one entry per open layout scope) and the comments collected by
//! the whitespace parsers. The state is a plain value; `or` and `many` clone
//! it before each attempt so a failed branch cannot leak a push, a pop, or a
//! comment into the branch that is retried.

use crate::fern::ast::range::Ranged;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseState {
    indents: Vec<usize>,
    comments: Vec<Ranged<String>>,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The column that layout checks compare against. With no open scope the
    /// whole file is the scope and the indent is column 0.
    pub fn current_indent(&self) -> usize {
        self.indents.last().copied().unwrap_or(0)
    }

    pub fn push_indent(&mut self, column: usize) {
        self.indents.push(column);
    }

    pub fn pop_indent(&mut self) -> Option<usize> {
        self.indents.pop()
    }

    pub fn indent_depth(&self) -> usize {
        self.indents.len()
    }

    pub fn add_comment(&mut self, comment: Ranged<String>) {
        self.comments.push(comment);
    }

    pub fn comments(&self) -> &[Ranged<String>] {
        &self.comments
    }

    pub fn take_comments(self) -> Vec<Ranged<String>> {
        self.comments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fern::ast::range::Range;

    #[test]
    fn test_indent_stack() {
        let mut state = ParseState::new();
        assert_eq!(state.current_indent(), 0);
        state.push_indent(4);
        state.push_indent(8);
        assert_eq!(state.current_indent(), 8);
        assert_eq!(state.pop_indent(), Some(8));
        assert_eq!(state.current_indent(), 4);
        assert_eq!(state.pop_indent(), Some(4));
        assert_eq!(state.current_indent(), 0);
        assert_eq!(state.pop_indent(), None);
    }

    #[test]
    fn test_comments_accumulate_in_order() {
        let mut state = ParseState::new();
        state.add_comment(Ranged::new(Range::default(), "-- one".to_string()));
        state.add_comment(Ranged::new(Range::default(), "-- two".to_string()));
        let comments = state.take_comments();
        assert_eq!(comments[0].value, "-- one");
        assert_eq!(comments[1].value, "-- two");
    }
}
