//! Pattern nodes
//!
//! Patterns appear in function arguments, lambda arguments, `case` branches,
//! and destructuring bindings. `UnCons` and `As` are built by promoting an
//! already-parsed atom (the parser never left-recurses into patterns).

use serde::{Deserialize, Serialize};

use super::range::Ranged;
use super::QualifiedName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    /// `_`
    All,
    /// `()`
    Unit,
    Char(char),
    String(String),
    Int(i64),
    Float(f64),
    Tuple(Vec<Ranged<Pattern>>),
    /// `{ field1, field2 }`
    Record(Vec<Ranged<String>>),
    /// `head :: tail`
    UnCons(Box<Ranged<Pattern>>, Box<Ranged<Pattern>>),
    List(Vec<Ranged<Pattern>>),
    Var(String),
    /// A constructor applied to argument patterns, e.g. `Maybe.Just x`.
    /// A bare (possibly qualified) constructor reference has no arguments.
    Named {
        name: Ranged<QualifiedName>,
        args: Vec<Ranged<Pattern>>,
    },
    /// `pattern as name`
    As(Box<Ranged<Pattern>>, Ranged<String>),
    Parenthesized(Box<Ranged<Pattern>>),
}

impl Pattern {
    /// Names bound by this pattern, in source order.
    pub fn bound_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_bound_names(&mut names);
        names
    }

    fn collect_bound_names<'a>(&'a self, into: &mut Vec<&'a str>) {
        match self {
            Pattern::Var(name) => into.push(name),
            Pattern::Record(fields) => {
                into.extend(fields.iter().map(|field| field.value.as_str()));
            }
            Pattern::Tuple(items) | Pattern::List(items) => {
                for item in items {
                    item.value.collect_bound_names(into);
                }
            }
            Pattern::UnCons(head, tail) => {
                head.value.collect_bound_names(into);
                tail.value.collect_bound_names(into);
            }
            Pattern::Named { args, .. } => {
                for arg in args {
                    arg.value.collect_bound_names(into);
                }
            }
            Pattern::As(inner, name) => {
                inner.value.collect_bound_names(into);
                into.push(&name.value);
            }
            Pattern::Parenthesized(inner) => inner.value.collect_bound_names(into),
            Pattern::All
            | Pattern::Unit
            | Pattern::Char(_)
            | Pattern::String(_)
            | Pattern::Int(_)
            | Pattern::Float(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fern::ast::range::Range;

    fn ranged<T>(value: T) -> Ranged<T> {
        Ranged::new(Range::default(), value)
    }

    #[test]
    fn test_bound_names_walks_nested_patterns() {
        // (x :: rest) as whole
        let pattern = Pattern::As(
            Box::new(ranged(Pattern::Parenthesized(Box::new(ranged(
                Pattern::UnCons(
                    Box::new(ranged(Pattern::Var("x".to_string()))),
                    Box::new(ranged(Pattern::Var("rest".to_string()))),
                ),
            ))))),
            ranged("whole".to_string()),
        );
        assert_eq!(pattern.bound_names(), vec!["x", "rest", "whole"]);
    }

    #[test]
    fn test_bound_names_ignores_literals() {
        let pattern = Pattern::Tuple(vec![
            ranged(Pattern::Int(1)),
            ranged(Pattern::Var("y".to_string())),
        ]);
        assert_eq!(pattern.bound_names(), vec!["y"]);
    }
}
