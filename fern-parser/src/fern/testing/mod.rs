//! Test support
//!
//!     Helpers the parser tests lean on: parse-or-panic entry points,
//!     expectation helpers that unwrap one AST shape with a useful panic
//!     message, and range scrubbing.
//!
//!     Scrubbing zeroes every `Range` in a file so two parses can be
//!     compared structurally when only their locations differ — the layout
//!     idempotence property ("uniform extra indentation changes ranges,
//!     never shape") is checked exactly this way.

use crate::fern::ast::declaration::FunctionDefinition;
use crate::fern::ast::expression::{Expression, LetBinding};
use crate::fern::ast::file::File;
use crate::fern::ast::module::{ExposedConstructors, Exposing, Import, ModuleHeader, TopLevelExpose};
use crate::fern::ast::pattern::Pattern;
use crate::fern::ast::range::{Range, Ranged};
use crate::fern::ast::types::TypeAnnotation;
use crate::fern::ast::{Declaration, InfixDirection};
use crate::fern::parsing::parse_document;

/// Parse a complete file or panic with the parser's message.
pub fn parse_ok(source: &str) -> File {
    match parse_document(source) {
        Ok(file) => file,
        Err(message) => panic!("parse failed: {}", message),
    }
}

/// Find a function declaration by name or panic.
pub fn expect_function<'a>(file: &'a File, name: &str) -> &'a FunctionDefinition {
    for declaration in &file.declarations {
        if let Declaration::Function(definition) = &declaration.value {
            if definition.name.value == name {
                return definition;
            }
        }
    }
    panic!("no function named `{}` in the file", name);
}

/// Unwrap an operator application or panic.
pub fn expect_operator_application(
    expression: &Expression,
) -> (&str, InfixDirection, &Ranged<Expression>, &Ranged<Expression>) {
    match expression {
        Expression::OperatorApplication {
            operator,
            direction,
            left,
            right,
        } => (operator, *direction, left, right),
        other => panic!("expected an operator application, got {:?}", other),
    }
}

/// A copy of the file with every range zeroed, for shape comparison.
pub fn scrubbed(file: &File) -> File {
    let mut file = file.clone();
    scrub_header(&mut file.module);
    for import in &mut file.imports {
        scrub_import(import);
    }
    for declaration in &mut file.declarations {
        scrub_declaration(declaration);
    }
    for comment in &mut file.comments {
        comment.range = Range::default();
    }
    file
}

fn scrub_header(header: &mut Ranged<ModuleHeader>) {
    header.range = Range::default();
    match &mut header.value {
        ModuleHeader::Normal(data) | ModuleHeader::Port(data) => {
            data.name.range = Range::default();
            scrub_exposing(&mut data.exposing);
        }
        ModuleHeader::Effect(data) => {
            data.name.range = Range::default();
            if let Some(command) = &mut data.command {
                command.range = Range::default();
            }
            if let Some(subscription) = &mut data.subscription {
                subscription.range = Range::default();
            }
            scrub_exposing(&mut data.exposing);
        }
    }
}

fn scrub_exposing(exposing: &mut Ranged<Exposing>) {
    exposing.range = Range::default();
    match &mut exposing.value {
        Exposing::All(range) => *range = Range::default(),
        Exposing::Explicit(items) => {
            for item in items {
                item.range = Range::default();
                if let TopLevelExpose::TypeExpose {
                    constructors: Some(constructors),
                    ..
                } = &mut item.value
                {
                    match constructors {
                        ExposedConstructors::All(range) => *range = Range::default(),
                        ExposedConstructors::Explicit(names) => {
                            for name in names {
                                name.range = Range::default();
                            }
                        }
                    }
                }
            }
        }
    }
}

fn scrub_import(import: &mut Ranged<Import>) {
    import.range = Range::default();
    import.value.module_name.range = Range::default();
    if let Some(alias) = &mut import.value.alias {
        alias.range = Range::default();
    }
    if let Some(exposing) = &mut import.value.exposing {
        scrub_exposing(exposing);
    }
}

fn scrub_declaration(declaration: &mut Ranged<Declaration>) {
    declaration.range = Range::default();
    match &mut declaration.value {
        Declaration::Function(definition) => scrub_function(definition),
        Declaration::TypeAlias(alias) => {
            if let Some(documentation) = &mut alias.documentation {
                documentation.range = Range::default();
            }
            alias.name.range = Range::default();
            for generic in &mut alias.generics {
                generic.range = Range::default();
            }
            scrub_type(&mut alias.type_annotation);
        }
        Declaration::CustomType(custom) => {
            if let Some(documentation) = &mut custom.documentation {
                documentation.range = Range::default();
            }
            custom.name.range = Range::default();
            for generic in &mut custom.generics {
                generic.range = Range::default();
            }
            for constructor in &mut custom.constructors {
                constructor.range = Range::default();
                constructor.value.name.range = Range::default();
                for argument in &mut constructor.value.arguments {
                    scrub_type(argument);
                }
            }
        }
        Declaration::Port(port) => {
            if let Some(documentation) = &mut port.documentation {
                documentation.range = Range::default();
            }
            port.name.range = Range::default();
            scrub_type(&mut port.type_annotation);
        }
        Declaration::Infix(infix) => {
            if let Some(direction) = &mut infix.direction {
                direction.range = Range::default();
            }
            infix.precedence.range = Range::default();
            infix.operator.range = Range::default();
        }
        Declaration::Destructuring {
            pattern,
            expression,
        } => {
            scrub_pattern(pattern);
            scrub_expression(expression);
        }
    }
}

fn scrub_function(definition: &mut FunctionDefinition) {
    if let Some(documentation) = &mut definition.documentation {
        documentation.range = Range::default();
    }
    if let Some(signature) = &mut definition.signature {
        signature.range = Range::default();
        signature.value.name.range = Range::default();
        scrub_type(&mut signature.value.type_annotation);
    }
    definition.name.range = Range::default();
    for argument in &mut definition.arguments {
        scrub_pattern(argument);
    }
    scrub_expression(&mut definition.expression);
}

fn scrub_pattern(pattern: &mut Ranged<Pattern>) {
    pattern.range = Range::default();
    match &mut pattern.value {
        Pattern::Tuple(items) | Pattern::List(items) => {
            for item in items {
                scrub_pattern(item);
            }
        }
        Pattern::Record(fields) => {
            for field in fields {
                field.range = Range::default();
            }
        }
        Pattern::UnCons(head, tail) => {
            scrub_pattern(head);
            scrub_pattern(tail);
        }
        Pattern::Named { name, args } => {
            name.range = Range::default();
            for arg in args {
                scrub_pattern(arg);
            }
        }
        Pattern::As(inner, name) => {
            scrub_pattern(inner);
            name.range = Range::default();
        }
        Pattern::Parenthesized(inner) => scrub_pattern(inner),
        Pattern::All
        | Pattern::Unit
        | Pattern::Char(_)
        | Pattern::String(_)
        | Pattern::Int(_)
        | Pattern::Float(_)
        | Pattern::Var(_) => {}
    }
}

fn scrub_type(annotation: &mut Ranged<TypeAnnotation>) {
    annotation.range = Range::default();
    match &mut annotation.value {
        TypeAnnotation::Typed { name, args } => {
            name.range = Range::default();
            for arg in args {
                scrub_type(arg);
            }
        }
        TypeAnnotation::Tupled(items) => {
            for item in items {
                scrub_type(item);
            }
        }
        TypeAnnotation::Function(from, to) => {
            scrub_type(from);
            scrub_type(to);
        }
        TypeAnnotation::Record(fields) => {
            for field in fields {
                field.name.range = Range::default();
                scrub_type(&mut field.annotation);
            }
        }
        TypeAnnotation::GenericRecord { name, fields } => {
            name.range = Range::default();
            for field in fields {
                field.name.range = Range::default();
                scrub_type(&mut field.annotation);
            }
        }
        TypeAnnotation::Generic(_) | TypeAnnotation::Unit => {}
    }
}

fn scrub_expression(expression: &mut Ranged<Expression>) {
    expression.range = Range::default();
    match &mut expression.value {
        Expression::Application(parts) => {
            for part in parts {
                scrub_expression(part);
            }
        }
        Expression::OperatorApplication { left, right, .. } => {
            scrub_expression(left);
            scrub_expression(right);
        }
        Expression::Negation(inner) | Expression::Parenthesized(inner) => {
            scrub_expression(inner);
        }
        Expression::Tupled(items) | Expression::ListLiteral(items) => {
            for item in items {
                scrub_expression(item);
            }
        }
        Expression::Record(setters) => {
            for setter in setters {
                setter.field.range = Range::default();
                scrub_expression(&mut setter.value);
            }
        }
        Expression::RecordUpdate { name, updates } => {
            name.range = Range::default();
            for setter in updates {
                setter.field.range = Range::default();
                scrub_expression(&mut setter.value);
            }
        }
        Expression::RecordAccess { target, field } => {
            scrub_expression(target);
            field.range = Range::default();
        }
        Expression::If {
            condition,
            then_branch,
            else_branch,
        } => {
            scrub_expression(condition);
            scrub_expression(then_branch);
            scrub_expression(else_branch);
        }
        Expression::Case(case_expression) => {
            scrub_expression(&mut case_expression.scrutinee);
            for branch in &mut case_expression.branches {
                scrub_pattern(&mut branch.pattern);
                scrub_expression(&mut branch.body);
            }
        }
        Expression::Let(let_expression) => {
            for binding in &mut let_expression.bindings {
                binding.range = Range::default();
                match &mut binding.value {
                    LetBinding::Function(definition) => scrub_function(definition),
                    LetBinding::Destructuring {
                        pattern,
                        expression,
                    } => {
                        scrub_pattern(pattern);
                        scrub_expression(expression);
                    }
                }
            }
            scrub_expression(&mut let_expression.body);
        }
        Expression::Lambda(lambda) => {
            for arg in &mut lambda.args {
                scrub_pattern(arg);
            }
            scrub_expression(&mut lambda.body);
        }
        Expression::Unit
        | Expression::FunctionOrValue(_)
        | Expression::Qualified(_)
        | Expression::PrefixOperator(_)
        | Expression::Operator(_)
        | Expression::Integer(_)
        | Expression::Hex(_)
        | Expression::Floating(_)
        | Expression::Literal(_)
        | Expression::CharLiteral(_)
        | Expression::AccessFunction(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrubbed_files_compare_equal_across_shifts() {
        let plain = parse_ok("module M exposing (..)\n\nanswer = 1 + 2\n");
        let shifted = parse_ok("    module M exposing (..)\n\n    answer = 1 + 2\n");
        assert_ne!(plain, shifted);
        assert_eq!(scrubbed(&plain), scrubbed(&shifted));
    }

    #[test]
    fn test_expect_function_finds_by_name() {
        let file = parse_ok("module M exposing (..)\n\none = 1\n\ntwo = 2\n");
        assert_eq!(expect_function(&file, "two").name.value, "two");
    }
}
