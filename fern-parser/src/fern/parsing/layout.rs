//! Indentation-aware whitespace parsers
//!
//!     Three whitespace parsers implement the offside rule against the top
//!     of the indent stack:
//!
//!     - [`spacing`]: whitespace that may cross onto a new line only if the
//!       line is indented strictly deeper than the current indent. Used
//!       wherever a construct may continue on the next line.
//!     - [`exact_indent`]: whitespace that must land on a line indented
//!       exactly at the current indent. Separates sibling declarations,
//!       `let` bindings, and `case` branches.
//!     - [`lax_spacing`]: whitespace with no indent check. Used only where
//!       the construct is already bounded by the caller, e.g. inside
//!       brackets.
//!
//!     All three swallow comments and record them in the parse state instead
//!     of discarding them; the file assembler later turns adjacent `{-|`
//!     comments into documentation.
//!
//!     An indentation requirement that is not met is a parse failure like
//!     any other, handled by the usual backtracking.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fern::combinators::{
    choice, many1, maybe, ranged, regex_match, Parser, Reply,
};
use crate::fern::lexing::{block_comment, line_comment};

static NEWLINES_THEN_SPACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[ ]*\r?\n)+[ ]*").unwrap());
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ +").unwrap());

/// A comment, recorded into the parse state.
pub fn captured_comment() -> Parser<()> {
    let comment = ranged(line_comment().or(block_comment()));
    Parser::new(move |state, stream| {
        let reply = comment.parse(state, stream);
        match reply.result {
            Ok(found) => {
                let mut state = reply.state;
                state.add_comment(found);
                Reply::ok(state, reply.stream, ())
            }
            Err(messages) => Reply::err(reply.state, reply.stream, messages),
        }
    })
}

/// One comment, newline run (with the following line's indentation), or
/// inline space run. No indent check of its own.
fn whitespace_element() -> Parser<()> {
    choice(vec![
        captured_comment(),
        regex_match(&NEWLINES_THEN_SPACES, "a line break").map(|_| ()),
        regex_match(&SPACES, "whitespace").map(|_| ()),
    ])
}

/// Succeed when the column we landed on relates to the current indent as
/// `predicate` demands.
fn check_column(predicate: fn(usize, usize) -> bool, message: &'static str) -> Parser<()> {
    Parser::new(move |state, stream| {
        let column = stream.location().column;
        let indent = state.current_indent();
        if predicate(column, indent) {
            Reply::ok(state, stream, ())
        } else {
            Reply::err(state, stream, vec![message.to_string()])
        }
    })
}

/// Whitespace continuing the current construct: after any line breaks the
/// position must be strictly deeper than the current indent.
pub fn spacing() -> Parser<()> {
    many1(whitespace_element())
        .keep(check_column(
            |column, indent| column > indent,
            "expected the line to be indented deeper than its enclosing block",
        ))
}

/// Whitespace landing exactly at the current indent; separates siblings.
pub fn exact_indent() -> Parser<()> {
    many1(whitespace_element())
        .keep(check_column(
            |column, indent| column == indent,
            "expected the line to be indented exactly at its enclosing block",
        ))
}

/// Whitespace with no indent requirement.
pub fn lax_spacing() -> Parser<()> {
    many1(whitespace_element()).map(|_| ())
}

/// Optional [`spacing`].
pub fn maybe_spacing() -> Parser<()> {
    maybe(spacing()).map(|_| ())
}

/// Optional [`lax_spacing`].
pub fn maybe_lax_spacing() -> Parser<()> {
    maybe(lax_spacing()).map(|_| ())
}

/// Open a layout scope at the current column, run `parser`, and close the
/// scope on every exit path, including failures that an enclosing `or` will
/// retry.
pub fn indented_block<T: 'static>(parser: Parser<T>) -> Parser<T> {
    Parser::new(move |mut state, stream| {
        let column = stream.location().column;
        state.push_indent(column);
        let mut reply = parser.parse(state, stream);
        reply.state.pop_indent();
        reply
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fern::combinators::state::ParseState;
    use crate::fern::combinators::stream::Stream;
    use crate::fern::combinators::token;

    fn run_with_indent<T: 'static>(
        parser: &Parser<T>,
        indent: usize,
        input: &str,
    ) -> Reply<T> {
        let mut state = ParseState::new();
        state.push_indent(indent);
        parser.parse(state, Stream::new(input))
    }

    #[test]
    fn test_spacing_accepts_inline_spaces() {
        let reply = run_with_indent(&spacing(), 0, "   x");
        assert!(reply.result.is_ok());
        assert_eq!(reply.stream.offset(), 3);
    }

    #[test]
    fn test_spacing_accepts_deeper_continuation() {
        let reply = run_with_indent(&spacing(), 4, "\n        x");
        assert!(reply.result.is_ok());
        assert_eq!(reply.stream.location().column, 8);
    }

    #[test]
    fn test_spacing_rejects_shallower_line() {
        let reply = run_with_indent(&spacing(), 4, "\n    x");
        assert!(reply.result.is_err());
    }

    #[test]
    fn test_spacing_skips_blank_lines() {
        let reply = run_with_indent(&spacing(), 0, "\n\n   \n  x");
        assert!(reply.result.is_ok());
        assert_eq!(reply.stream.location().column, 2);
    }

    #[test]
    fn test_exact_indent_requires_matching_column() {
        assert!(run_with_indent(&exact_indent(), 4, "\n    x").result.is_ok());
        assert!(run_with_indent(&exact_indent(), 4, "\n      x").result.is_err());
        assert!(run_with_indent(&exact_indent(), 4, "\n  x").result.is_err());
    }

    #[test]
    fn test_comments_are_captured_not_discarded() {
        let reply = run_with_indent(&spacing(), 0, "-- note\n  {- block -} x");
        assert!(reply.result.is_ok());
        let comments = reply.state.comments();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].value, "-- note");
        assert_eq!(comments[1].value, "{- block -}");
    }

    #[test]
    fn test_indented_block_pushes_current_column() {
        let inner: Parser<usize> = Parser::new(|state, stream| {
            let indent = state.current_indent();
            Reply::ok(state, stream, indent)
        });
        let parser = spacing().keep(indented_block(inner));
        let reply = run_with_indent(&parser, 0, "  x");
        assert_eq!(reply.result, Ok(2));
    }

    #[test]
    fn test_indented_block_pops_on_failure() {
        let failing = indented_block(token("nope"));
        let reply = run_with_indent(&failing, 0, "x");
        assert!(reply.result.is_err());
        // the scope opened by the block is closed again on the failure path
        assert_eq!(reply.state.indent_depth(), 1);
    }
}
