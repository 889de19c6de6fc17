//! Treeviz formatter for parsed files
//!
//! A one-line-per-node view of the syntax tree: nesting becomes two-space
//! indentation, each line is `<icon> <label>` with the label truncated so
//! large files still scan well. Purely a debugging/inspection aid; nothing
//! round-trips through this format.
//!
//! Icons
//!     File: ⧉   Module: §   Import: ⊳   Function: ƒ   Alias: ≔
//!     Type: Σ   Constructor: •   Port: ⌁   Infix: ⊕   Pattern binding: ≔
//!     Expression: ◦

use crate::fern::ast::declaration::FunctionDefinition;
use crate::fern::ast::expression::{Expression, LetBinding};
use crate::fern::ast::file::File;
use crate::fern::ast::Declaration;

const LABEL_WIDTH: usize = 30;

pub fn to_treeviz_str(file: &File) -> String {
    let mut out = String::new();
    push_line(&mut out, 0, "⧉", "File");
    let module_name = file.module.value.name().value.join(".");
    push_line(&mut out, 1, "§", &module_name);
    for import in &file.imports {
        push_line(&mut out, 1, "⊳", &import.value.module_name.value.join("."));
    }
    for declaration in &file.declarations {
        declaration_lines(&mut out, 1, &declaration.value);
    }
    out
}

fn declaration_lines(out: &mut String, depth: usize, declaration: &Declaration) {
    match declaration {
        Declaration::Function(definition) => function_lines(out, depth, definition),
        Declaration::TypeAlias(alias) => {
            push_line(out, depth, "≔", &alias.name.value);
        }
        Declaration::CustomType(custom) => {
            push_line(out, depth, "Σ", &custom.name.value);
            for constructor in &custom.constructors {
                push_line(out, depth + 1, "•", &constructor.value.name.value);
            }
        }
        Declaration::Port(port) => {
            push_line(out, depth, "⌁", &port.name.value);
        }
        Declaration::Infix(infix) => {
            let label = format!(
                "{} {} {}",
                infix.effective_direction(),
                infix.precedence.value,
                infix.operator.value
            );
            push_line(out, depth, "⊕", &label);
        }
        Declaration::Destructuring { expression, .. } => {
            push_line(out, depth, "≔", "destructuring");
            expression_lines(out, depth + 1, &expression.value);
        }
    }
}

fn function_lines(out: &mut String, depth: usize, definition: &FunctionDefinition) {
    push_line(out, depth, "ƒ", &definition.name.value);
    expression_lines(out, depth + 1, &definition.expression.value);
}

fn expression_lines(out: &mut String, depth: usize, expression: &Expression) {
    match expression {
        Expression::Application(parts) => {
            push_line(out, depth, "◦", "apply");
            for part in parts {
                expression_lines(out, depth + 1, &part.value);
            }
        }
        Expression::OperatorApplication {
            operator,
            left,
            right,
            ..
        } => {
            push_line(out, depth, "◦", &format!("operator {}", operator));
            expression_lines(out, depth + 1, &left.value);
            expression_lines(out, depth + 1, &right.value);
        }
        Expression::If {
            condition,
            then_branch,
            else_branch,
        } => {
            push_line(out, depth, "◦", "if");
            expression_lines(out, depth + 1, &condition.value);
            expression_lines(out, depth + 1, &then_branch.value);
            expression_lines(out, depth + 1, &else_branch.value);
        }
        Expression::Case(case_expression) => {
            push_line(out, depth, "◦", "case");
            expression_lines(out, depth + 1, &case_expression.scrutinee.value);
            for branch in &case_expression.branches {
                expression_lines(out, depth + 1, &branch.body.value);
            }
        }
        Expression::Let(let_expression) => {
            push_line(out, depth, "◦", "let");
            for binding in &let_expression.bindings {
                match &binding.value {
                    LetBinding::Function(definition) => {
                        function_lines(out, depth + 1, definition);
                    }
                    LetBinding::Destructuring { expression, .. } => {
                        expression_lines(out, depth + 1, &expression.value);
                    }
                }
            }
            expression_lines(out, depth + 1, &let_expression.body.value);
        }
        Expression::Lambda(lambda) => {
            push_line(out, depth, "◦", "lambda");
            expression_lines(out, depth + 1, &lambda.body.value);
        }
        Expression::ListLiteral(items) | Expression::Tupled(items) => {
            push_line(out, depth, "◦", "group");
            for item in items {
                expression_lines(out, depth + 1, &item.value);
            }
        }
        Expression::Parenthesized(inner) | Expression::Negation(inner) => {
            expression_lines(out, depth, &inner.value);
        }
        leaf => {
            push_line(out, depth, "◦", &leaf_label(leaf));
        }
    }
}

fn leaf_label(expression: &Expression) -> String {
    match expression {
        Expression::Unit => "()".to_string(),
        Expression::FunctionOrValue(name) => name.clone(),
        Expression::Qualified(name) => name.to_string(),
        Expression::PrefixOperator(symbol) => format!("({})", symbol),
        Expression::Operator(symbol) => symbol.clone(),
        Expression::Integer(value) => value.to_string(),
        Expression::Hex(value) => format!("0x{:X}", value),
        Expression::Floating(value) => value.to_string(),
        Expression::Literal(text) => format!("{:?}", text),
        Expression::CharLiteral(c) => format!("{:?}", c),
        Expression::AccessFunction(field) => format!(".{}", field),
        Expression::RecordAccess { field, .. } => format!("access .{}", field.value),
        Expression::Record(_) => "record".to_string(),
        Expression::RecordUpdate { name, .. } => format!("update {}", name.value),
        other => format!("{:?}", other),
    }
}

fn push_line(out: &mut String, depth: usize, icon: &str, label: &str) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(icon);
    out.push(' ');
    out.push_str(&truncate(label, LABEL_WIDTH));
    out.push('\n');
}

fn truncate(label: &str, max_chars: usize) -> String {
    if label.chars().count() > max_chars {
        let mut shortened: String = label.chars().take(max_chars).collect();
        shortened.push('…');
        shortened
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fern::parsing::parse_document;

    #[test]
    fn test_treeviz_lists_declarations() {
        let source = "module Main exposing (..)\n\nimport List\n\nanswer = 1 + 2\n";
        let file = parse_document(source).expect("parse");
        let rendered = to_treeviz_str(&file);
        assert!(rendered.contains("⧉ File"));
        assert!(rendered.contains("§ Main"));
        assert!(rendered.contains("⊳ List"));
        assert!(rendered.contains("ƒ answer"));
        assert!(rendered.contains("operator +"));
    }

    #[test]
    fn test_truncate_long_labels() {
        assert_eq!(truncate("short", 30), "short");
        let long = "x".repeat(40);
        let shortened = truncate(&long, 30);
        assert_eq!(shortened.chars().count(), 31);
        assert!(shortened.ends_with('…'));
    }
}
