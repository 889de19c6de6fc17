//! Type annotation grammar

use crate::fern::ast::range::{Range, Ranged};
use crate::fern::ast::types::{RecordField, TypeAnnotation};
use crate::fern::combinators::{
    choice, lazy, many, pair, ranged, sep_by1, succeed, token, Parser,
};
use crate::fern::lexing::function_name;

use super::common::{qualified_constructor, ranged_lower_name, separator};
use super::layout::{maybe_lax_spacing, maybe_spacing, spacing};

/// A full type annotation; `->` nests to the right.
pub fn type_annotation() -> Parser<Ranged<TypeAnnotation>> {
    lazy(|| {
        type_segment().and_then(|from| {
            let arrow = {
                let from = from.clone();
                maybe_spacing()
                    .keep(token("->"))
                    .keep(maybe_spacing())
                    .keep(lazy(type_annotation))
                    .map(move |to| {
                        let range = Range::containing(&from.range, &to.range);
                        Ranged::new(
                            range,
                            TypeAnnotation::Function(Box::new(from.clone()), Box::new(to)),
                        )
                    })
            };
            arrow.or(succeed(from))
        })
    })
}

/// One arrow segment: a named type with arguments, or a bare atom.
fn type_segment() -> Parser<Ranged<TypeAnnotation>> {
    typed_with_arguments().or(type_atom())
}

/// A type usable as an argument to another type.
pub fn type_atom() -> Parser<Ranged<TypeAnnotation>> {
    lazy(|| {
        choice(vec![
            ranged(token("()").map(|_| TypeAnnotation::Unit)),
            record_type(),
            tuple_or_paren_type(),
            ranged(function_name().map(TypeAnnotation::Generic)),
            typed_reference(),
        ])
    })
}

fn typed_with_arguments() -> Parser<Ranged<TypeAnnotation>> {
    ranged(qualified_constructor()).and_then(|name| {
        many(spacing().keep(type_atom())).map(move |args| {
            let range = match args.last() {
                Some(last) => Range::containing(&name.range, &last.range),
                None => name.range,
            };
            Ranged::new(
                range,
                TypeAnnotation::Typed {
                    name: name.clone(),
                    args,
                },
            )
        })
    })
}

fn typed_reference() -> Parser<Ranged<TypeAnnotation>> {
    ranged(qualified_constructor()).map(|name| {
        let range = name.range;
        Ranged::new(
            range,
            TypeAnnotation::Typed {
                name,
                args: Vec::new(),
            },
        )
    })
}

/// `{}`, `{ field : T, ... }`, or `{ base | field : T, ... }`.
fn record_type() -> Parser<Ranged<TypeAnnotation>> {
    let empty = token("{")
        .keep(maybe_lax_spacing())
        .keep(token("}"))
        .map(|_| TypeAnnotation::Record(Vec::new()));
    let generic = token("{")
        .keep(maybe_lax_spacing())
        .keep(pair(
            ranged_lower_name(),
            separator("|").keep(record_fields()),
        ))
        .skip(maybe_lax_spacing())
        .skip(token("}"))
        .map(|(name, fields)| TypeAnnotation::GenericRecord { name, fields });
    let plain = token("{")
        .keep(maybe_lax_spacing())
        .keep(record_fields())
        .skip(maybe_lax_spacing())
        .skip(token("}"))
        .map(TypeAnnotation::Record);
    ranged(choice(vec![empty, generic, plain]))
}

fn record_fields() -> Parser<Vec<RecordField>> {
    sep_by1(separator(","), record_field())
}

fn record_field() -> Parser<RecordField> {
    pair(
        ranged_lower_name(),
        separator(":").keep(lazy(type_annotation)),
    )
    .map(|(name, annotation)| RecordField { name, annotation })
}

/// A parenthesized type or a tuple. A single parenthesized annotation is
/// returned unchanged; only genuine tuples get a node.
fn tuple_or_paren_type() -> Parser<Ranged<TypeAnnotation>> {
    ranged(
        token("(")
            .keep(maybe_lax_spacing())
            .keep(sep_by1(separator(","), lazy(type_annotation)))
            .skip(maybe_lax_spacing())
            .skip(token(")")),
    )
    .map(|grouped| {
        let Ranged {
            range,
            value: mut items,
        } = grouped;
        if items.len() == 1 {
            items.remove(0)
        } else {
            Ranged::new(range, TypeAnnotation::Tupled(items))
        }
    })
}
