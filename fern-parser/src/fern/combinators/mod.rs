//! Backtracking parser combinators
//!
//!     A `Parser<T>` is a pure function from `(ParseState, Stream)` to a
//!     [`Reply<T>`]: the state and stream after the attempt plus either a
//!     value or a list of failure messages. Parsers are composed with the
//!     usual combinators (`map`, `and_then`, `or`, `many`, `sep_by`, ...)
//!     and the grammar modules build everything on top of these.
//!
//! Backtracking
//!
//!     `or` retries the second alternative from the *original* position no
//!     matter how much the first consumed before failing, and concatenates
//!     both message lists when every alternative fails. There are no commit
//!     or cut points anywhere; the grammar depends on exhaustive re-attempt,
//!     so none may be added.
//!
//! Termination
//!
//!     `many` compares the stream before and after each attempt and stops on
//!     a success that consumed nothing. This is a required invariant: a
//!     zero-width parser under `many` must terminate, not spin.
//!
//! Errors
//!
//!     Failures are plain ordered `Vec<String>` message lists. No positions
//!     are attached here; only the top-level driver reports a location, and
//!     only for unconsumed trailing input.

pub mod state;
pub mod stream;

use std::rc::Rc;

use regex::Regex;

use crate::fern::ast::range::{Range, Ranged};
use self::state::ParseState;
use self::stream::Stream;

pub type Messages = Vec<String>;

/// The outcome of running a parser.
pub struct Reply<T> {
    pub state: ParseState,
    pub stream: Stream,
    pub result: Result<T, Messages>,
}

impl<T> Reply<T> {
    pub fn ok(state: ParseState, stream: Stream, value: T) -> Self {
        Reply {
            state,
            stream,
            result: Ok(value),
        }
    }

    pub fn err(state: ParseState, stream: Stream, messages: Messages) -> Self {
        Reply {
            state,
            stream,
            result: Err(messages),
        }
    }
}

type ParseFn<T> = dyn Fn(ParseState, Stream) -> Reply<T>;

pub struct Parser<T> {
    run: Rc<ParseFn<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            run: Rc::clone(&self.run),
        }
    }
}

impl<T: 'static> Parser<T> {
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(ParseState, Stream) -> Reply<T> + 'static,
    {
        Parser { run: Rc::new(run) }
    }

    pub fn parse(&self, state: ParseState, stream: Stream) -> Reply<T> {
        (self.run)(state, stream)
    }

    pub fn map<U: 'static, F>(self, f: F) -> Parser<U>
    where
        F: Fn(T) -> U + 'static,
    {
        Parser::new(move |state, stream| {
            let reply = self.parse(state, stream);
            Reply {
                state: reply.state,
                stream: reply.stream,
                result: reply.result.map(&f),
            }
        })
    }

    /// Monadic sequencing: run `self`, feed the value to `f`, run the parser
    /// it returns.
    pub fn and_then<U: 'static, F>(self, f: F) -> Parser<U>
    where
        F: Fn(T) -> Parser<U> + 'static,
    {
        Parser::new(move |state, stream| {
            let reply = self.parse(state, stream);
            match reply.result {
                Ok(value) => f(value).parse(reply.state, reply.stream),
                Err(messages) => Reply::err(reply.state, reply.stream, messages),
            }
        })
    }

    /// Unconditional retry: if `self` fails, `other` runs from the original
    /// position regardless of how much `self` consumed. On double failure the
    /// message lists are concatenated.
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        Parser::new(move |state, stream| {
            let first = self.parse(state.clone(), stream.clone());
            match first.result {
                Ok(_) => first,
                Err(mut first_messages) => {
                    let second = other.parse(state.clone(), stream.clone());
                    match second.result {
                        Ok(_) => second,
                        Err(mut second_messages) => {
                            first_messages.append(&mut second_messages);
                            Reply::err(state, stream, first_messages)
                        }
                    }
                }
            }
        })
    }

    pub fn map_error<F>(self, f: F) -> Parser<T>
    where
        F: Fn(Messages) -> Messages + 'static,
    {
        Parser::new(move |state, stream| {
            let reply = self.parse(state, stream);
            Reply {
                state: reply.state,
                stream: reply.stream,
                result: reply.result.map_err(&f),
            }
        })
    }

    /// Replace the failure messages with a single expectation message.
    pub fn expected(self, message: &str) -> Parser<T> {
        let message = message.to_string();
        self.map_error(move |_| vec![message.clone()])
    }

    /// Run `self` then `next`, keeping the value of `next`.
    pub fn keep<U: 'static>(self, next: Parser<U>) -> Parser<U> {
        self.and_then(move |_| next.clone())
    }
}

impl<T: Clone + 'static> Parser<T> {
    /// Run `self` then `next`, keeping the value of `self`.
    pub fn skip<U: 'static>(self, next: Parser<U>) -> Parser<T> {
        self.and_then(move |value| {
            let value = value.clone();
            next.clone().map(move |_| value.clone())
        })
    }
}

/// Succeed with `value`, consuming nothing.
pub fn succeed<T: Clone + 'static>(value: T) -> Parser<T> {
    Parser::new(move |state, stream| Reply::ok(state, stream, value.clone()))
}

/// Fail with one message, consuming nothing.
pub fn fail<T: 'static>(message: &str) -> Parser<T> {
    let message = message.to_string();
    Parser::new(move |state, stream| Reply::err(state, stream, vec![message.clone()]))
}

/// Defer construction of a parser until it runs. The grammar parsers are
/// mutually recursive functions; deferral keeps building one from recursing
/// forever. This is not a memoization wrapper, just a thunk.
pub fn lazy<T: 'static, F>(build: F) -> Parser<T>
where
    F: Fn() -> Parser<T> + 'static,
{
    Parser::new(move |state, stream| build().parse(state, stream))
}

/// Run `parser` and keep its value and state mutations, but restore the
/// position afterwards.
pub fn look_ahead<T: 'static>(parser: Parser<T>) -> Parser<T> {
    Parser::new(move |state, stream| {
        let reply = parser.parse(state, stream.clone());
        Reply {
            state: reply.state,
            stream,
            result: reply.result,
        }
    })
}

/// Zero or more repetitions. Stops on failure, and also on a success that
/// consumed no input — the required termination guarantee for zero-width
/// parsers.
pub fn many<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    Parser::new(move |state, stream| {
        let mut items = Vec::new();
        let mut state = state;
        let mut stream = stream;
        loop {
            let reply = parser.parse(state.clone(), stream.clone());
            match reply.result {
                Ok(value) => {
                    if reply.stream.offset() == stream.offset() {
                        return Reply::ok(state, stream, items);
                    }
                    items.push(value);
                    state = reply.state;
                    stream = reply.stream;
                }
                Err(_) => return Reply::ok(state, stream, items),
            }
        }
    })
}

/// One or more repetitions.
pub fn many1<T: Clone + 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    let rest = many(parser.clone());
    parser.and_then(move |first| {
        let first = first.clone();
        rest.clone().map(move |mut items| {
            let mut all = vec![first.clone()];
            all.append(&mut items);
            all
        })
    })
}

/// Exactly `n` repetitions.
pub fn count<T: 'static>(n: usize, parser: Parser<T>) -> Parser<Vec<T>> {
    Parser::new(move |state, stream| {
        let mut items = Vec::with_capacity(n);
        let mut state = state;
        let mut stream = stream;
        for _ in 0..n {
            let reply = parser.parse(state, stream);
            match reply.result {
                Ok(value) => {
                    items.push(value);
                    state = reply.state;
                    stream = reply.stream;
                }
                Err(messages) => return Reply::err(reply.state, reply.stream, messages),
            }
        }
        Reply::ok(state, stream, items)
    })
}

/// `parser`, or nothing.
pub fn maybe<T: Clone + 'static>(parser: Parser<T>) -> Parser<Option<T>> {
    parser.map(Some).or(succeed(None))
}

/// One or more `parser` separated by `separator`.
pub fn sep_by1<T, S>(separator: Parser<S>, parser: Parser<T>) -> Parser<Vec<T>>
where
    T: Clone + 'static,
    S: 'static,
{
    let rest = many(separator.keep(parser.clone()));
    parser.and_then(move |first| {
        let first = first.clone();
        rest.clone().map(move |mut items| {
            let mut all = vec![first.clone()];
            all.append(&mut items);
            all
        })
    })
}

/// Zero or more `parser` separated by `separator`.
pub fn sep_by<T, S>(separator: Parser<S>, parser: Parser<T>) -> Parser<Vec<T>>
where
    T: Clone + 'static,
    S: 'static,
{
    sep_by1(separator, parser).or(succeed(Vec::new()))
}

/// Like [`sep_by`], allowing a trailing separator.
pub fn sep_end_by<T, S>(separator: Parser<S>, parser: Parser<T>) -> Parser<Vec<T>>
where
    T: Clone + 'static,
    S: Clone + 'static,
{
    sep_by(separator.clone(), parser).skip(maybe(separator))
}

/// `inner` bracketed by `open` and `close`.
pub fn between<L, R, T>(open: Parser<L>, close: Parser<R>, inner: Parser<T>) -> Parser<T>
where
    L: 'static,
    R: 'static,
    T: Clone + 'static,
{
    open.keep(inner).skip(close)
}

/// `first` then `second`, as a pair.
pub fn pair<A, B>(first: Parser<A>, second: Parser<B>) -> Parser<(A, B)>
where
    A: Clone + 'static,
    B: 'static,
{
    first.and_then(move |a| {
        let a = a.clone();
        second.clone().map(move |b| (a.clone(), b))
    })
}

/// Try each alternative in order from the same original position; on total
/// failure the messages of every alternative are concatenated.
pub fn choice<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    Parser::new(move |state, stream| {
        let mut messages = Messages::new();
        for parser in &parsers {
            let reply = parser.parse(state.clone(), stream.clone());
            match reply.result {
                Ok(_) => return reply,
                Err(mut attempt) => messages.append(&mut attempt),
            }
        }
        Reply::err(state, stream, messages)
    })
}

/// Match an anchored regex at the current position and advance by the match
/// length. `expected` names the token for the failure message.
pub fn regex_match(pattern: &'static Regex, expected: &'static str) -> Parser<String> {
    Parser::new(move |state, stream| match stream.match_regex(pattern) {
        Some((length, text)) => {
            let next = stream.advance(length);
            Reply::ok(state, next, text)
        }
        None => Reply::err(state, stream, vec![format!("expected {}", expected)]),
    })
}

/// Match a literal string exactly.
pub fn token(literal: &'static str) -> Parser<String> {
    Parser::new(move |state, stream| {
        if stream.starts_with(literal) {
            let next = stream.advance(literal.len());
            Reply::ok(state, next, literal.to_string())
        } else {
            Reply::err(state, stream, vec![format!("expected `{}`", literal)])
        }
    })
}

/// Succeed only at the end of input.
pub fn end() -> Parser<()> {
    Parser::new(|state, stream| {
        if stream.is_at_end() {
            Reply::ok(state, stream, ())
        } else {
            Reply::err(state, stream, vec!["expected end of input".to_string()])
        }
    })
}

/// Wrap the parsed value with the range it consumed. The wrapped parser must
/// not consume leading or trailing whitespace, or the range will overshoot
/// the construct.
pub fn ranged<T: 'static>(parser: Parser<T>) -> Parser<Ranged<T>> {
    Parser::new(move |state, stream| {
        let start = stream.location();
        let reply = parser.parse(state, stream);
        match reply.result {
            Ok(value) => {
                let end = reply.stream.location();
                Reply::ok(
                    reply.state,
                    reply.stream,
                    Ranged::new(Range::new(start, end), value),
                )
            }
            Err(messages) => Reply::err(reply.state, reply.stream, messages),
        }
    })
}

/// Apply a scanning function to the remaining input. The function returns
/// the number of bytes consumed and the value, or a failure message.
pub fn scan<T, F>(scanner: F) -> Parser<T>
where
    T: 'static,
    F: Fn(&str) -> Result<(usize, T), String> + 'static,
{
    Parser::new(move |state, stream| {
        let outcome = scanner(stream.remaining());
        match outcome {
            Ok((length, value)) => {
                let next = stream.advance(length);
                Reply::ok(state, next, value)
            }
            Err(message) => Reply::err(state, stream, vec![message]),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    fn run<T: 'static>(parser: &Parser<T>, input: &str) -> Reply<T> {
        parser.parse(ParseState::new(), Stream::new(input))
    }

    #[test]
    fn test_succeed_consumes_nothing() {
        let reply = run(&succeed(7), "abc");
        assert_eq!(reply.result, Ok(7));
        assert_eq!(reply.stream.offset(), 0);
    }

    #[test]
    fn test_or_retries_from_original_position() {
        // the first branch consumes `ab` before failing; the second must
        // still see the full input
        let first = token("ab").keep(token("xy"));
        let second = token("abc");
        let reply = run(&first.or(second), "abc");
        assert_eq!(reply.result, Ok("abc".to_string()));
        assert_eq!(reply.stream.offset(), 3);
    }

    #[test]
    fn test_or_concatenates_messages_on_double_failure() {
        let parser: Parser<String> = fail("first problem").or(fail("second problem"));
        let reply = run(&parser, "abc");
        assert_eq!(
            reply.result,
            Err(vec![
                "first problem".to_string(),
                "second problem".to_string()
            ])
        );
        assert_eq!(reply.stream.offset(), 0);
    }

    #[test]
    fn test_many_collects_until_failure() {
        let reply = run(&many(token("ab")), "ababx");
        assert_eq!(
            reply.result,
            Ok(vec!["ab".to_string(), "ab".to_string()])
        );
        assert_eq!(reply.stream.offset(), 4);
    }

    #[test]
    fn test_many_terminates_on_zero_width_success() {
        // a parser that always succeeds without consuming must not loop
        let parser = many(succeed(()));
        let reply = run(&parser, "abc");
        assert_eq!(reply.result, Ok(Vec::new()));
        assert_eq!(reply.stream.offset(), 0);
    }

    #[test]
    fn test_many1_requires_one() {
        let reply = run(&many1(token("ab")), "xy");
        assert!(reply.result.is_err());
    }

    #[test]
    fn test_sep_by_handles_empty_and_plural() {
        let parser = sep_by(token(","), token("a"));
        assert_eq!(run(&parser, "").result, Ok(Vec::new()));
        assert_eq!(
            run(&parser, "a,a,a").result,
            Ok(vec!["a".to_string(), "a".to_string(), "a".to_string()])
        );
    }

    #[test]
    fn test_sep_by_leaves_trailing_separator() {
        let parser = sep_by(token(","), token("a"));
        let reply = run(&parser, "a,a,");
        assert_eq!(reply.result, Ok(vec!["a".to_string(), "a".to_string()]));
        // the trailing comma stays unconsumed
        assert_eq!(reply.stream.offset(), 3);
    }

    #[test]
    fn test_count_exact_repetitions() {
        let reply = run(&count(3, token("a")), "aaaa");
        let values = reply.result.expect("parse");
        assert_eq!(values.len(), 3);
        assert_eq!(reply.stream.offset(), 3);
        assert!(run(&count(3, token("a")), "aa").result.is_err());
    }

    #[test]
    fn test_look_ahead_restores_position() {
        let parser = look_ahead(token("abc"));
        let reply = run(&parser, "abcdef");
        assert_eq!(reply.result, Ok("abc".to_string()));
        assert_eq!(reply.stream.offset(), 0);
    }

    #[test]
    fn test_between() {
        let parser = between(token("("), token(")"), token("x"));
        assert_eq!(run(&parser, "(x)").result, Ok("x".to_string()));
        assert!(run(&parser, "(x").result.is_err());
    }

    static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+").unwrap());

    #[test]
    fn test_regex_match_is_anchored() {
        let parser = regex_match(&DIGITS, "digits");
        assert_eq!(run(&parser, "123a").result, Ok("123".to_string()));
        assert_eq!(
            run(&parser, "a123").result,
            Err(vec!["expected digits".to_string()])
        );
    }

    #[test]
    fn test_ranged_spans_consumed_slice() {
        let parser = ranged(token("abc"));
        let reply = run(&parser, "abc");
        let ranged_value = reply.result.expect("parse");
        assert_eq!(ranged_value.range.start, crate::fern::ast::Location::new(0, 0));
        assert_eq!(ranged_value.range.end, crate::fern::ast::Location::new(0, 3));
    }

    #[test]
    fn test_state_mutations_do_not_leak_across_or() {
        // a branch that pushes an indent and then fails must not affect the
        // alternative that runs after it
        let pushing: Parser<String> = Parser::new(|mut state, stream| {
            state.push_indent(4);
            Reply::err(state, stream, vec!["boom".to_string()])
        });
        let checking: Parser<String> = Parser::new(|state, stream| {
            let indent = state.current_indent();
            Reply::ok(state, stream, format!("indent={}", indent))
        });
        let reply = run(&pushing.or(checking), "x");
        assert_eq!(reply.result, Ok("indent=0".to_string()));
    }
}
