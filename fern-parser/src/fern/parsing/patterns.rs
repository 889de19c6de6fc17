//! Pattern grammar
//!
//! Patterns avoid left recursion by parsing an atom first and then
//! promoting it: an already-parsed pattern becomes the left operand of a
//! `::` cons or the inner pattern of an `as` binding.

use crate::fern::ast::pattern::Pattern;
use crate::fern::ast::range::{Range, Ranged};
use crate::fern::combinators::{
    choice, lazy, many, ranged, sep_by1, succeed, token, Parser,
};
use crate::fern::lexing::{
    char_literal, function_name, keyword, number_literal, string_literal, NumberLiteral,
};

use super::common::{qualified_constructor, ranged_lower_name, separator};
use super::layout::{maybe_lax_spacing, maybe_spacing, spacing};

/// A full pattern: a term, optionally promoted to `::` or `as` form.
pub fn pattern() -> Parser<Ranged<Pattern>> {
    lazy(|| pattern_term().and_then(promote))
}

/// A pattern usable as a function or lambda argument: constructor references
/// take no arguments here, so `Just x` is two arguments, not one.
pub fn pattern_atom() -> Parser<Ranged<Pattern>> {
    lazy(|| {
        choice(vec![
            ranged(token("()").map(|_| Pattern::Unit)),
            ranged(keyword("_").map(|_| Pattern::All)),
            ranged(char_literal().map(Pattern::Char)),
            ranged(string_literal().map(Pattern::String)),
            ranged(number_literal().map(number_pattern)),
            record_pattern(),
            list_pattern(),
            tuple_or_paren_pattern(),
            ranged(function_name().map(Pattern::Var)),
            constructor_reference(),
        ])
    })
}

fn promote(left: Ranged<Pattern>) -> Parser<Ranged<Pattern>> {
    let cons = {
        let left = left.clone();
        maybe_spacing()
            .keep(token("::"))
            .keep(maybe_spacing())
            .keep(lazy(pattern))
            .map(move |tail| {
                let range = Range::containing(&left.range, &tail.range);
                Ranged::new(range, Pattern::UnCons(Box::new(left.clone()), Box::new(tail)))
            })
    };
    let alias = {
        let left = left.clone();
        spacing()
            .keep(keyword("as"))
            .keep(spacing())
            .keep(ranged_lower_name())
            .map(move |name| {
                let range = Range::containing(&left.range, &name.range);
                Ranged::new(range, Pattern::As(Box::new(left.clone()), name))
            })
    };
    cons.or(alias).or(succeed(left))
}

/// An atom, or a constructor applied to argument atoms.
fn pattern_term() -> Parser<Ranged<Pattern>> {
    constructor_with_arguments().or(pattern_atom())
}

fn constructor_with_arguments() -> Parser<Ranged<Pattern>> {
    ranged(qualified_constructor()).and_then(|name| {
        many(spacing().keep(pattern_atom())).map(move |args| {
            let range = match args.last() {
                Some(last) => Range::containing(&name.range, &last.range),
                None => name.range,
            };
            Ranged::new(
                range,
                Pattern::Named {
                    name: name.clone(),
                    args,
                },
            )
        })
    })
}

fn constructor_reference() -> Parser<Ranged<Pattern>> {
    ranged(qualified_constructor()).map(|name| {
        let range = name.range;
        Ranged::new(
            range,
            Pattern::Named {
                name,
                args: Vec::new(),
            },
        )
    })
}

fn number_pattern(literal: NumberLiteral) -> Pattern {
    match literal {
        NumberLiteral::Int(value) | NumberLiteral::Hex(value) => Pattern::Int(value),
        NumberLiteral::Float(value) => Pattern::Float(value),
    }
}

fn record_pattern() -> Parser<Ranged<Pattern>> {
    ranged(
        token("{")
            .keep(maybe_lax_spacing())
            .keep(sep_by1(separator(","), ranged_lower_name()))
            .skip(maybe_lax_spacing())
            .skip(token("}"))
            .map(Pattern::Record),
    )
}

fn list_pattern() -> Parser<Ranged<Pattern>> {
    let empty = token("[")
        .keep(maybe_lax_spacing())
        .keep(token("]"))
        .map(|_| Pattern::List(Vec::new()));
    let filled = token("[")
        .keep(maybe_lax_spacing())
        .keep(sep_by1(separator(","), lazy(pattern)))
        .skip(maybe_lax_spacing())
        .skip(token("]"))
        .map(Pattern::List);
    ranged(empty.or(filled))
}

fn tuple_or_paren_pattern() -> Parser<Ranged<Pattern>> {
    ranged(
        token("(")
            .keep(maybe_lax_spacing())
            .keep(sep_by1(separator(","), lazy(pattern)))
            .skip(maybe_lax_spacing())
            .skip(token(")"))
            .map(|mut items| {
                if items.len() == 1 {
                    Pattern::Parenthesized(Box::new(items.remove(0)))
                } else {
                    Pattern::Tuple(items)
                }
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fern::combinators::state::ParseState;
    use crate::fern::combinators::stream::Stream;

    fn parse(input: &str) -> Ranged<Pattern> {
        let reply = pattern().parse(ParseState::new(), Stream::new(input));
        reply.result.expect("pattern should parse")
    }

    #[test]
    fn test_simple_atoms() {
        assert_eq!(parse("_").value, Pattern::All);
        assert_eq!(parse("()").value, Pattern::Unit);
        assert_eq!(parse("42").value, Pattern::Int(42));
        assert_eq!(parse("'x'").value, Pattern::Char('x'));
        assert_eq!(parse("name").value, Pattern::Var("name".to_string()));
    }

    #[test]
    fn test_constructor_with_arguments() {
        let parsed = parse("Just x");
        match parsed.value {
            Pattern::Named { name, args } => {
                assert_eq!(name.value.name, "Just");
                assert_eq!(args.len(), 1);
                assert_eq!(args[0].value, Pattern::Var("x".to_string()));
            }
            other => panic!("expected a named pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_qualified_constructor() {
        let parsed = parse("Maybe.Nothing");
        match parsed.value {
            Pattern::Named { name, args } => {
                assert_eq!(name.value.module_path, vec!["Maybe".to_string()]);
                assert_eq!(name.value.name, "Nothing");
                assert!(args.is_empty());
            }
            other => panic!("expected a named pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_uncons_is_right_nested() {
        let parsed = parse("a :: b :: rest");
        match parsed.value {
            Pattern::UnCons(head, tail) => {
                assert_eq!(head.value, Pattern::Var("a".to_string()));
                assert!(matches!(tail.value, Pattern::UnCons(_, _)));
            }
            other => panic!("expected an uncons pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_as_promotion_reuses_parsed_atom() {
        let parsed = parse("( x :: rest ) as whole");
        match parsed.value {
            Pattern::As(inner, name) => {
                assert_eq!(name.value, "whole");
                assert!(matches!(inner.value, Pattern::Parenthesized(_)));
            }
            other => panic!("expected an as pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_tuple_and_list() {
        assert!(matches!(parse("( a, b )").value, Pattern::Tuple(items) if items.len() == 2));
        assert!(matches!(parse("[ a, b, c ]").value, Pattern::List(items) if items.len() == 3));
        assert!(matches!(parse("[]").value, Pattern::List(items) if items.is_empty()));
    }

    #[test]
    fn test_record_pattern() {
        match parse("{ name, age }").value {
            Pattern::Record(fields) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].value, "name");
                assert_eq!(fields[1].value, "age");
            }
            other => panic!("expected a record pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_range_spans_whole_pattern() {
        let parsed = parse("Just x");
        assert_eq!(parsed.range.start.column, 0);
        assert_eq!(parsed.range.end.column, 6);
    }
}
