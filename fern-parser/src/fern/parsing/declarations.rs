//! Declaration grammar
//!
//! A function declaration may be preceded by a standalone type signature at
//! the same indentation; the two are paired here and must agree on the
//! name. Documentation comments are attached later by the assembling stage,
//! never here.

use crate::fern::ast::declaration::{
    CustomType, Declaration, FunctionDefinition, InfixDeclaration, PortDeclaration, Signature,
    TypeAlias, ValueConstructor,
};
use crate::fern::ast::range::Ranged;
use crate::fern::ast::InfixDirection;
use crate::fern::combinators::{
    between, choice, fail, lazy, many, maybe, pair, ranged, sep_by1, succeed, token, Parser,
};
use crate::fern::lexing::{keyword, number_literal, operator_token, NumberLiteral};

use super::common::{ranged_lower_name, ranged_upper_name};
use super::expressions::expression;
use super::layout::{exact_indent, maybe_spacing, spacing};
use super::patterns::{pattern, pattern_atom};
use super::types::{type_annotation, type_atom};

pub fn declaration() -> Parser<Ranged<Declaration>> {
    lazy(|| {
        choice(vec![
            ranged(port_declaration().map(Declaration::Port)),
            ranged(infix_declaration().map(Declaration::Infix)),
            ranged(type_declaration()),
            ranged(function_definition().map(Declaration::Function)),
            ranged(destructuring_declaration()),
        ])
    })
}

/// An optional signature line, then `name args = expression`.
pub fn function_definition() -> Parser<FunctionDefinition> {
    let implementation = pair(
        ranged_lower_name(),
        pair(
            many(spacing().keep(pattern_atom())),
            maybe_spacing()
                .keep(token("="))
                .keep(spacing())
                .keep(expression()),
        ),
    );
    pair(
        maybe(ranged(signature()).skip(exact_indent())),
        implementation,
    )
    .and_then(|(signature, (name, (arguments, expression)))| {
        if let Some(found) = &signature {
            if found.value.name.value != name.value {
                return fail(&format!(
                    "the type annotation is for `{}` but the definition is named `{}`",
                    found.value.name.value, name.value
                ));
            }
        }
        succeed(FunctionDefinition {
            documentation: None,
            signature,
            name,
            arguments,
            expression,
        })
    })
}

fn signature() -> Parser<Signature> {
    pair(
        ranged_lower_name(),
        maybe_spacing()
            .keep(token(":"))
            .keep(maybe_spacing())
            .keep(type_annotation()),
    )
    .map(|(name, type_annotation)| Signature {
        name,
        type_annotation,
    })
}

fn port_declaration() -> Parser<PortDeclaration> {
    keyword("port")
        .keep(spacing())
        .keep(signature())
        .map(|signature| PortDeclaration {
            documentation: None,
            name: signature.name,
            type_annotation: signature.type_annotation,
        })
}

fn type_declaration() -> Parser<Declaration> {
    keyword("type")
        .keep(spacing())
        .keep(alias_declaration().or(custom_type_declaration()))
}

fn alias_declaration() -> Parser<Declaration> {
    keyword("alias")
        .keep(spacing())
        .keep(pair(
            ranged_upper_name(),
            pair(
                generics(),
                maybe_spacing()
                    .keep(token("="))
                    .keep(spacing())
                    .keep(type_annotation()),
            ),
        ))
        .map(|(name, (generics, type_annotation))| {
            Declaration::TypeAlias(TypeAlias {
                documentation: None,
                name,
                generics,
                type_annotation,
            })
        })
}

fn custom_type_declaration() -> Parser<Declaration> {
    pair(
        ranged_upper_name(),
        pair(
            generics(),
            maybe_spacing()
                .keep(token("="))
                .keep(maybe_spacing())
                .keep(constructors()),
        ),
    )
    .map(|(name, (generics, constructors))| {
        Declaration::CustomType(CustomType {
            documentation: None,
            name,
            generics,
            constructors,
        })
    })
}

fn generics() -> Parser<Vec<Ranged<String>>> {
    many(spacing().keep(ranged_lower_name()))
}

fn constructors() -> Parser<Vec<Ranged<ValueConstructor>>> {
    let pipe = maybe_spacing().keep(token("|")).keep(maybe_spacing());
    sep_by1(pipe, ranged(value_constructor()))
}

fn value_constructor() -> Parser<ValueConstructor> {
    pair(ranged_upper_name(), many(spacing().keep(type_atom())))
        .map(|(name, arguments)| ValueConstructor { name, arguments })
}

fn infix_declaration() -> Parser<InfixDeclaration> {
    infix_direction().and_then(|direction| {
        pair(
            spacing().keep(ranged(precedence_literal())),
            spacing().keep(ranged(infix_operator_symbol())),
        )
        .map(move |(precedence, operator)| InfixDeclaration {
            direction: direction.clone(),
            precedence,
            operator,
        })
    })
}

fn infix_direction() -> Parser<Option<Ranged<InfixDirection>>> {
    ranged(
        keyword("infixl")
            .map(|_| InfixDirection::Left)
            .or(keyword("infixr").map(|_| InfixDirection::Right)),
    )
    .map(Some)
    .or(keyword("infix").map(|_| None))
}

fn precedence_literal() -> Parser<i64> {
    number_literal().and_then(|literal| match literal {
        NumberLiteral::Int(value) => succeed(value),
        _ => fail("expected an integer precedence"),
    })
}

fn infix_operator_symbol() -> Parser<String> {
    operator_token().or(between(token("("), token(")"), operator_token()))
}

fn destructuring_declaration() -> Parser<Declaration> {
    pair(
        pattern(),
        maybe_spacing()
            .keep(token("="))
            .keep(spacing())
            .keep(expression()),
    )
    .map(|(pattern, expression)| Declaration::Destructuring {
        pattern,
        expression,
    })
}
