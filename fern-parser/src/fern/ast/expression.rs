//! Expression nodes
//!
//! `Application` holds the syntax-order list of juxtaposed parts exactly as
//! parsed, with bare infix operator tokens (`Operator`) interleaved between
//! operands. The resolving pass rewrites those flat lists into
//! `OperatorApplication` trees once the file's operator table is known; the
//! parser itself never associates operators.

use serde::{Deserialize, Serialize};

use super::declaration::FunctionDefinition;
use super::pattern::Pattern;
use super::range::Ranged;
use super::{InfixDirection, QualifiedName};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// `()`
    Unit,
    /// A flat, unresolved list of application parts in syntax order.
    Application(Vec<Ranged<Expression>>),
    /// The resolved form of an operator split, produced by the resolving pass.
    OperatorApplication {
        operator: String,
        direction: InfixDirection,
        left: Box<Ranged<Expression>>,
        right: Box<Ranged<Expression>>,
    },
    /// An unqualified value or constructor reference.
    FunctionOrValue(String),
    /// A module-qualified reference, e.g. `List.map`.
    Qualified(QualifiedName),
    /// An operator section, e.g. `(+)`.
    PrefixOperator(String),
    /// A bare infix operator token inside an `Application` part list.
    Operator(String),
    Integer(i64),
    /// An integer written in hexadecimal notation.
    Hex(i64),
    Floating(f64),
    Negation(Box<Ranged<Expression>>),
    /// A string literal.
    Literal(String),
    CharLiteral(char),
    Tupled(Vec<Ranged<Expression>>),
    Parenthesized(Box<Ranged<Expression>>),
    ListLiteral(Vec<Ranged<Expression>>),
    Record(Vec<RecordSetter>),
    /// `{ base | field = value }`
    RecordUpdate {
        name: Ranged<String>,
        updates: Vec<RecordSetter>,
    },
    /// `target.field`
    RecordAccess {
        target: Box<Ranged<Expression>>,
        field: Ranged<String>,
    },
    /// `.field` used as a function.
    AccessFunction(String),
    If {
        condition: Box<Ranged<Expression>>,
        then_branch: Box<Ranged<Expression>>,
        else_branch: Box<Ranged<Expression>>,
    },
    Case(CaseExpression),
    Let(LetExpression),
    Lambda(Lambda),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSetter {
    pub field: Ranged<String>,
    pub value: Ranged<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseExpression {
    pub scrutinee: Box<Ranged<Expression>>,
    pub branches: Vec<CaseBranch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseBranch {
    pub pattern: Ranged<Pattern>,
    pub body: Ranged<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetExpression {
    pub bindings: Vec<Ranged<LetBinding>>,
    pub body: Box<Ranged<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LetBinding {
    Function(FunctionDefinition),
    Destructuring {
        pattern: Ranged<Pattern>,
        expression: Ranged<Expression>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    pub args: Vec<Ranged<Pattern>>,
    pub body: Box<Ranged<Expression>>,
}

impl Expression {
    /// The operator symbol if this part is a bare infix token.
    pub fn as_operator(&self) -> Option<&str> {
        match self {
            Expression::Operator(symbol) => Some(symbol),
            _ => None,
        }
    }
}
