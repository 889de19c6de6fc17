//! Operator application resolution
//!
//!     The parser leaves every expression as a flat `Application` list with
//!     bare operator tokens interleaved. This pass rewrites those lists into
//!     `OperatorApplication` trees by divide and conquer on the minimum
//!     precedence present in the list:
//!
//!     1. find the minimum precedence among the operators in the list
//!     2. pick the split point among the operators at that precedence: the
//!        last occurrence for a left-associative operator, the first for a
//!        right-associative one (the direction of the first such operator
//!        decides, when a list mixes directions at one precedence)
//!     3. recurse into both sides, then join with an `OperatorApplication`
//!
//!     A list with no operators is left as a plain `Application`; a single
//!     remaining part collapses to itself, never wrapped. An operator with
//!     no operand on one side is not a valid split point.
//!
//!     The tree walk lives here too: it recurses into every nested
//!     expression (lambdas, let bindings, case branches, ...) and applies
//!     the list transformation to each `Application` node bottom-up. The
//!     resolver itself only ever looks at one flat list.

use crate::fern::ast::expression::{Expression, LetBinding};
use crate::fern::ast::file::File;
use crate::fern::ast::range::{Range, Ranged};
use crate::fern::ast::{Declaration, InfixDirection};

use super::table::{OperatorInfo, OperatorTable};

/// Resolve every `Application` list anywhere in the file.
pub fn resolve_operators(mut file: File, table: &OperatorTable) -> File {
    for declaration in &mut file.declarations {
        match &mut declaration.value {
            Declaration::Function(definition) => {
                resolve_expression(&mut definition.expression, table);
            }
            Declaration::Destructuring { expression, .. } => {
                resolve_expression(expression, table);
            }
            _ => {}
        }
    }
    file
}

/// Resolve one expression tree, bottom-up.
pub fn resolve_expression(node: &mut Ranged<Expression>, table: &OperatorTable) {
    resolve_children(node, table);
    if matches!(node.value, Expression::Application(_)) {
        let value = std::mem::replace(&mut node.value, Expression::Unit);
        if let Expression::Application(parts) = value {
            *node = resolve_parts(parts, node.range, table);
        }
    }
}

fn resolve_children(node: &mut Ranged<Expression>, table: &OperatorTable) {
    match &mut node.value {
        Expression::Application(parts) => {
            for part in parts.iter_mut() {
                resolve_expression(part, table);
            }
        }
        Expression::OperatorApplication { left, right, .. } => {
            resolve_expression(left, table);
            resolve_expression(right, table);
        }
        Expression::Negation(inner) | Expression::Parenthesized(inner) => {
            resolve_expression(inner, table);
        }
        Expression::Tupled(items) | Expression::ListLiteral(items) => {
            for item in items.iter_mut() {
                resolve_expression(item, table);
            }
        }
        Expression::Record(setters) => {
            for setter in setters.iter_mut() {
                resolve_expression(&mut setter.value, table);
            }
        }
        Expression::RecordUpdate { updates, .. } => {
            for setter in updates.iter_mut() {
                resolve_expression(&mut setter.value, table);
            }
        }
        Expression::RecordAccess { target, .. } => {
            resolve_expression(target, table);
        }
        Expression::If {
            condition,
            then_branch,
            else_branch,
        } => {
            resolve_expression(condition, table);
            resolve_expression(then_branch, table);
            resolve_expression(else_branch, table);
        }
        Expression::Case(case_expression) => {
            resolve_expression(&mut case_expression.scrutinee, table);
            for branch in case_expression.branches.iter_mut() {
                resolve_expression(&mut branch.body, table);
            }
        }
        Expression::Let(let_expression) => {
            for binding in let_expression.bindings.iter_mut() {
                match &mut binding.value {
                    LetBinding::Function(definition) => {
                        resolve_expression(&mut definition.expression, table);
                    }
                    LetBinding::Destructuring { expression, .. } => {
                        resolve_expression(expression, table);
                    }
                }
            }
            resolve_expression(&mut let_expression.body, table);
        }
        Expression::Lambda(lambda) => {
            resolve_expression(&mut lambda.body, table);
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

/// Resolve one flat part list. Does not recurse into sub-expressions; the
/// walker has already handled those.
fn resolve_parts(
    mut parts: Vec<Ranged<Expression>>,
    range: Range,
    table: &OperatorTable,
) -> Ranged<Expression> {
    if parts.len() == 1 {
        return parts.remove(0);
    }

    let candidates: Vec<(usize, OperatorInfo, String)> = parts
        .iter()
        .enumerate()
        .filter_map(|(index, part)| {
            part.value
                .as_operator()
                .map(|symbol| (index, table.lookup(symbol), symbol.to_string()))
        })
        // a split point needs an operand on each side
        .filter(|(index, _, _)| *index > 0 && *index + 1 < parts.len())
        .collect();

    let minimum = match candidates.iter().map(|(_, info, _)| info.precedence).min() {
        Some(minimum) => minimum,
        None => return Ranged::new(range, Expression::Application(parts)),
    };
    let at_minimum: Vec<(usize, OperatorInfo, String)> = candidates
        .into_iter()
        .filter(|(_, info, _)| info.precedence == minimum)
        .collect();

    let scan_direction = at_minimum.first().map(|(_, info, _)| info.direction);
    let chosen = match scan_direction {
        Some(InfixDirection::Left) => at_minimum.last().cloned(),
        Some(InfixDirection::Right) => at_minimum.first().cloned(),
        None => None,
    };
    let (index, info, symbol) = match chosen {
        Some(found) => found,
        None => return Ranged::new(range, Expression::Application(parts)),
    };

    let right_parts = parts.split_off(index + 1);
    parts.pop(); // the operator token itself
    let left_parts = parts;

    let left_range = slice_range(&left_parts, range);
    let right_range = slice_range(&right_parts, range);
    let left = resolve_parts(left_parts, left_range, table);
    let right = resolve_parts(right_parts, right_range, table);
    Ranged::new(
        range,
        Expression::OperatorApplication {
            operator: symbol,
            direction: info.direction,
            left: Box::new(left),
            right: Box::new(right),
        },
    )
}

fn slice_range(parts: &[Ranged<Expression>], fallback: Range) -> Range {
    match (parts.first(), parts.last()) {
        (Some(first), Some(last)) => Range::containing(&first.range, &last.range),
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fern::combinators::state::ParseState;
    use crate::fern::combinators::stream::Stream;
    use crate::fern::parsing::expression;

    fn resolve(input: &str) -> Expression {
        let reply = expression().parse(ParseState::new(), Stream::new(input));
        let mut parsed = reply.result.expect("expression should parse");
        resolve_expression(&mut parsed, &OperatorTable::defaults());
        parsed.value
    }

    fn operator_application(
        expression: &Expression,
    ) -> (&str, InfixDirection, &Expression, &Expression) {
        match expression {
            Expression::OperatorApplication {
                operator,
                direction,
                left,
                right,
            } => (operator, *direction, &left.value, &right.value),
            other => panic!("expected an operator application, got {:?}", other),
        }
    }

    #[test]
    fn test_higher_precedence_binds_tighter() {
        let resolved = resolve("a + b * c");
        let (operator, _, left, right) = operator_application(&resolved);
        assert_eq!(operator, "+");
        assert_eq!(left, &Expression::FunctionOrValue("a".to_string()));
        let (inner, _, _, _) = operator_application(right);
        assert_eq!(inner, "*");
    }

    #[test]
    fn test_left_associative_chain() {
        let resolved = resolve("a - b - c");
        let (operator, direction, left, right) = operator_application(&resolved);
        assert_eq!(operator, "-");
        assert_eq!(direction, InfixDirection::Left);
        assert_eq!(right, &Expression::FunctionOrValue("c".to_string()));
        let (inner, _, _, _) = operator_application(left);
        assert_eq!(inner, "-");
    }

    #[test]
    fn test_right_associative_chain() {
        let resolved = resolve("a ^ b ^ c");
        let (operator, direction, left, right) = operator_application(&resolved);
        assert_eq!(operator, "^");
        assert_eq!(direction, InfixDirection::Right);
        assert_eq!(left, &Expression::FunctionOrValue("a".to_string()));
        let (inner, _, _, _) = operator_application(right);
        assert_eq!(inner, "^");
    }

    #[test]
    fn test_plain_application_is_never_wrapped() {
        let resolved = resolve("f x y");
        match resolved {
            Expression::Application(parts) => assert_eq!(parts.len(), 3),
            other => panic!("expected a plain application, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_operator_defaults_to_left_five() {
        let resolved = resolve("a <=> b <=> c");
        let (operator, direction, left, _) = operator_application(&resolved);
        assert_eq!(operator, "<=>");
        assert_eq!(direction, InfixDirection::Left);
        // left-associative default: the left side holds the inner chain
        let (inner, _, _, _) = operator_application(left);
        assert_eq!(inner, "<=>");
    }

    #[test]
    fn test_nested_expressions_are_resolved_too() {
        let resolved = resolve("f (a + b * c)");
        match resolved {
            Expression::Application(parts) => match &parts[1].value {
                Expression::Parenthesized(inner) => {
                    let (operator, _, _, _) = operator_application(&inner.value);
                    assert_eq!(operator, "+");
                }
                other => panic!("expected a parenthesized group, got {:?}", other),
            },
            other => panic!("expected an application, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_precedences_split_lowest_first() {
        let resolved = resolve("a * b + c * d");
        let (operator, _, left, right) = operator_application(&resolved);
        assert_eq!(operator, "+");
        assert_eq!(operator_application(left).0, "*");
        assert_eq!(operator_application(right).0, "*");
    }

    #[test]
    fn test_pipeline_chain() {
        let resolved = resolve("xs |> keep |> drop");
        let (operator, direction, left, right) = operator_application(&resolved);
        assert_eq!(operator, "|>");
        assert_eq!(direction, InfixDirection::Left);
        assert_eq!(right, &Expression::FunctionOrValue("drop".to_string()));
        assert_eq!(operator_application(left).0, "|>");
    }

    #[test]
    fn test_operator_application_range_spans_operands() {
        let reply = expression().parse(ParseState::new(), Stream::new("a + b"));
        let mut parsed = reply.result.expect("parse");
        resolve_expression(&mut parsed, &OperatorTable::defaults());
        assert_eq!(parsed.range.start.column, 0);
        assert_eq!(parsed.range.end.column, 5);
    }
}
