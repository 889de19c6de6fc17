//! Expression grammar
//!
//!     Expressions parse as a flat, left-to-right list of application parts:
//!     juxtaposed terms and bare infix operator tokens, in syntax order.
//!     Operator precedence is deliberately NOT resolved here; the resolving
//!     pass rewrites `Application` lists once the file's operator table is
//!     known. Unary negation, chained record access, and parenthesized
//!     groups resolve immediately because they need no table.
//!
//!     `let` bindings and `case` branches open a layout scope at the column
//!     of their first token; sibling bindings/branches line up on that
//!     column and continuation lines must go deeper.
//!
//! Negation vs subtraction
//!
//!     `a - b` and `a-b` are subtraction; `a -b` applies `a` to the negation
//!     of `b`. The part parsers encode this: after explicit spacing a term
//!     (which includes negation) is tried before an operator token, while
//!     directly adjacent input tries the operator first.

use crate::fern::ast::expression::{
    CaseBranch, CaseExpression, Expression, Lambda, LetBinding, LetExpression, RecordSetter,
};
use crate::fern::ast::range::{Range, Ranged};
use crate::fern::combinators::{
    choice, lazy, many, maybe, pair, ranged, sep_by1, token, Parser,
};
use crate::fern::lexing::{
    char_literal, function_name, keyword, number_literal, operator_token, string_literal,
    NumberLiteral,
};

use super::common::{module_path, ranged_lower_name, separator};
use super::declarations::function_definition;
use super::layout::{
    exact_indent, indented_block, lax_spacing, maybe_lax_spacing, maybe_spacing, spacing,
};
use super::patterns::{pattern, pattern_atom};

/// A full expression: one or more application parts.
pub fn expression() -> Parser<Ranged<Expression>> {
    lazy(|| {
        first_part().and_then(|first| {
            many(subsequent_part()).map(move |rest| {
                if rest.is_empty() {
                    first.clone()
                } else {
                    let mut parts = vec![first.clone()];
                    parts.extend(rest);
                    let range =
                        Range::containing(&parts[0].range, &parts[parts.len() - 1].range);
                    Ranged::new(range, Expression::Application(parts))
                }
            })
        })
    })
}

fn first_part() -> Parser<Ranged<Expression>> {
    term().or(operator_part())
}

fn subsequent_part() -> Parser<Ranged<Expression>> {
    // with a space before it `-x` negates; glued to its left operand it is
    // an operator
    spacing()
        .keep(term().or(operator_part()))
        .or(operator_part().or(term()))
}

fn operator_part() -> Parser<Ranged<Expression>> {
    ranged(operator_token().map(Expression::Operator))
}

fn term() -> Parser<Ranged<Expression>> {
    lazy(|| negation().or(postfixed_atom()))
}

/// `-term`, with nothing between the sign and the term.
fn negation() -> Parser<Ranged<Expression>> {
    ranged(
        token("-")
            .keep(lazy(postfixed_atom))
            .map(|inner| Expression::Negation(Box::new(inner))),
    )
}

/// An atom followed by any number of `.field` accesses.
fn postfixed_atom() -> Parser<Ranged<Expression>> {
    atom().and_then(|base| {
        many(token(".").keep(ranged_lower_name())).map(move |fields| {
            let mut node = base.clone();
            for field in fields {
                let range = Range::containing(&node.range, &field.range);
                node = Ranged::new(
                    range,
                    Expression::RecordAccess {
                        target: Box::new(node),
                        field,
                    },
                );
            }
            node
        })
    })
}

fn atom() -> Parser<Ranged<Expression>> {
    choice(vec![
        ranged(token("()").map(|_| Expression::Unit)),
        if_expression(),
        case_expression(),
        let_expression(),
        lambda_expression(),
        record_expression(),
        list_expression(),
        ranged(string_literal().map(Expression::Literal)),
        ranged(char_literal().map(Expression::CharLiteral)),
        ranged(number_literal().map(number_expression)),
        ranged(access_function()),
        paren_expression(),
        ranged(function_name().map(Expression::FunctionOrValue)),
        ranged(upper_reference()),
    ])
}

fn number_expression(literal: NumberLiteral) -> Expression {
    match literal {
        NumberLiteral::Int(value) => Expression::Integer(value),
        NumberLiteral::Hex(value) => Expression::Hex(value),
        NumberLiteral::Float(value) => Expression::Floating(value),
    }
}

/// `.field` used as a function.
fn access_function() -> Parser<Expression> {
    token(".")
        .keep(function_name())
        .map(Expression::AccessFunction)
}

/// An uppercase reference: a constructor, or a qualified value like
/// `List.map`.
fn upper_reference() -> Parser<Expression> {
    pair(module_path(), maybe(token(".").keep(function_name()))).map(
        |(mut segments, lower)| match lower {
            Some(name) => Expression::Qualified(crate::fern::ast::QualifiedName {
                module_path: segments,
                name,
            }),
            None => {
                let name = segments.pop().unwrap_or_default();
                if segments.is_empty() {
                    Expression::FunctionOrValue(name)
                } else {
                    Expression::Qualified(crate::fern::ast::QualifiedName {
                        module_path: segments,
                        name,
                    })
                }
            }
        },
    )
}

/// `(op)`, `(expr)`, or `(a, b, ...)`.
fn paren_expression() -> Parser<Ranged<Expression>> {
    let prefix_operator = ranged(
        token("(")
            .keep(operator_token())
            .skip(token(")"))
            .map(Expression::PrefixOperator),
    );
    let grouped = ranged(
        token("(")
            .keep(maybe_lax_spacing())
            .keep(sep_by1(separator(","), lazy(expression)))
            .skip(maybe_lax_spacing())
            .skip(token(")"))
            .map(|mut items| {
                if items.len() == 1 {
                    Expression::Parenthesized(Box::new(items.remove(0)))
                } else {
                    Expression::Tupled(items)
                }
            }),
    );
    prefix_operator.or(grouped)
}

fn list_expression() -> Parser<Ranged<Expression>> {
    let empty = token("[")
        .keep(maybe_lax_spacing())
        .keep(token("]"))
        .map(|_| Expression::ListLiteral(Vec::new()));
    let filled = token("[")
        .keep(maybe_lax_spacing())
        .keep(sep_by1(separator(","), lazy(expression)))
        .skip(maybe_lax_spacing())
        .skip(token("]"))
        .map(Expression::ListLiteral);
    ranged(empty.or(filled))
}

fn record_expression() -> Parser<Ranged<Expression>> {
    let empty = token("{")
        .keep(maybe_lax_spacing())
        .keep(token("}"))
        .map(|_| Expression::Record(Vec::new()));
    let update = token("{")
        .keep(maybe_lax_spacing())
        .keep(pair(ranged_lower_name(), separator("|").keep(setters())))
        .skip(maybe_lax_spacing())
        .skip(token("}"))
        .map(|(name, updates)| Expression::RecordUpdate { name, updates });
    let literal = token("{")
        .keep(maybe_lax_spacing())
        .keep(setters())
        .skip(maybe_lax_spacing())
        .skip(token("}"))
        .map(Expression::Record);
    ranged(choice(vec![empty, update, literal]))
}

fn setters() -> Parser<Vec<RecordSetter>> {
    sep_by1(separator(","), setter())
}

fn setter() -> Parser<RecordSetter> {
    pair(ranged_lower_name(), separator("=").keep(lazy(expression)))
        .map(|(field, value)| RecordSetter { field, value })
}

fn if_expression() -> Parser<Ranged<Expression>> {
    ranged(
        keyword("if")
            .keep(spacing())
            .keep(lazy(expression))
            .and_then(|condition| {
                spacing()
                    .keep(keyword("then"))
                    .keep(spacing())
                    .keep(lazy(expression))
                    .and_then(move |then_branch| {
                        let condition = condition.clone();
                        spacing()
                            .keep(keyword("else"))
                            .keep(spacing())
                            .keep(lazy(expression))
                            .map(move |else_branch| Expression::If {
                                condition: Box::new(condition.clone()),
                                then_branch: Box::new(then_branch.clone()),
                                else_branch: Box::new(else_branch),
                            })
                    })
            }),
    )
}

/// `case scrutinee of` followed by branches, all anchored at the column of
/// the first branch.
fn case_expression() -> Parser<Ranged<Expression>> {
    ranged(
        keyword("case")
            .keep(spacing())
            .keep(lazy(expression))
            .and_then(|scrutinee| {
                spacing()
                    .keep(keyword("of"))
                    .keep(spacing())
                    .keep(indented_block(case_branches()))
                    .map(move |branches| {
                        Expression::Case(CaseExpression {
                            scrutinee: Box::new(scrutinee.clone()),
                            branches,
                        })
                    })
            }),
    )
}

fn case_branches() -> Parser<Vec<CaseBranch>> {
    sep_by1(exact_indent(), case_branch())
}

fn case_branch() -> Parser<CaseBranch> {
    pair(
        pattern(),
        maybe_spacing()
            .keep(token("->"))
            .keep(spacing())
            .keep(lazy(expression)),
    )
    .map(|(pattern, body)| CaseBranch { pattern, body })
}

/// `let` bindings anchored at the column of the first binding, then `in`
/// and the body.
fn let_expression() -> Parser<Ranged<Expression>> {
    ranged(
        keyword("let")
            .keep(spacing())
            .keep(indented_block(let_bindings()))
            .and_then(|bindings| {
                // the mandatory `in` bounds the bindings, so no indent check
                lax_spacing()
                    .keep(keyword("in"))
                    .keep(spacing())
                    .keep(lazy(expression))
                    .map(move |body| {
                        Expression::Let(LetExpression {
                            bindings: bindings.clone(),
                            body: Box::new(body),
                        })
                    })
            }),
    )
}

fn let_bindings() -> Parser<Vec<Ranged<LetBinding>>> {
    sep_by1(exact_indent(), ranged(let_binding()))
}

fn let_binding() -> Parser<LetBinding> {
    function_definition()
        .map(LetBinding::Function)
        .or(destructuring_binding())
}

fn destructuring_binding() -> Parser<LetBinding> {
    pair(
        pattern(),
        maybe_spacing()
            .keep(token("="))
            .keep(spacing())
            .keep(lazy(expression)),
    )
    .map(|(pattern, expression)| LetBinding::Destructuring {
        pattern,
        expression,
    })
}

fn lambda_expression() -> Parser<Ranged<Expression>> {
    ranged(
        token("\\")
            .keep(maybe_spacing())
            .keep(pair(
                sep_by1(spacing(), pattern_atom()),
                maybe_spacing()
                    .keep(token("->"))
                    .keep(spacing())
                    .keep(lazy(expression)),
            ))
            .map(|(args, body)| {
                Expression::Lambda(Lambda {
                    args,
                    body: Box::new(body),
                })
            }),
    )
}
