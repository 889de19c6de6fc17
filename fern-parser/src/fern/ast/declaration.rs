//! Top-level declaration nodes

use serde::{Deserialize, Serialize};

use super::expression::Expression;
use super::pattern::Pattern;
use super::range::Ranged;
use super::types::TypeAnnotation;
use super::InfixDirection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Declaration {
    Function(FunctionDefinition),
    TypeAlias(TypeAlias),
    CustomType(CustomType),
    Port(PortDeclaration),
    Infix(InfixDeclaration),
    /// A top-level destructuring binding, e.g. `( a, b ) = pair`.
    Destructuring {
        pattern: Ranged<Pattern>,
        expression: Ranged<Expression>,
    },
}

impl Declaration {
    /// The declared name, when the declaration introduces a single one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Declaration::Function(definition) => Some(&definition.name.value),
            Declaration::TypeAlias(alias) => Some(&alias.name.value),
            Declaration::CustomType(custom) => Some(&custom.name.value),
            Declaration::Port(port) => Some(&port.name.value),
            Declaration::Infix(infix) => Some(&infix.operator.value),
            Declaration::Destructuring { .. } => None,
        }
    }
}

/// A value binding, optionally preceded by a documentation comment and a
/// standalone type signature on the line above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub documentation: Option<Ranged<String>>,
    pub signature: Option<Ranged<Signature>>,
    pub name: Ranged<String>,
    pub arguments: Vec<Ranged<Pattern>>,
    pub expression: Ranged<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub name: Ranged<String>,
    pub type_annotation: Ranged<TypeAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAlias {
    pub documentation: Option<Ranged<String>>,
    pub name: Ranged<String>,
    pub generics: Vec<Ranged<String>>,
    pub type_annotation: Ranged<TypeAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomType {
    pub documentation: Option<Ranged<String>>,
    pub name: Ranged<String>,
    pub generics: Vec<Ranged<String>>,
    pub constructors: Vec<Ranged<ValueConstructor>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueConstructor {
    pub name: Ranged<String>,
    pub arguments: Vec<Ranged<TypeAnnotation>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortDeclaration {
    pub documentation: Option<Ranged<String>>,
    pub name: Ranged<String>,
    pub type_annotation: Ranged<TypeAnnotation>,
}

/// `infixl 7 //`, `infixr 5 ++`, or `infix 5 op`.
///
/// A declaration without an explicit direction associates to the left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfixDeclaration {
    pub direction: Option<Ranged<InfixDirection>>,
    pub precedence: Ranged<i64>,
    pub operator: Ranged<String>,
}

impl InfixDeclaration {
    pub fn effective_direction(&self) -> InfixDirection {
        self.direction
            .as_ref()
            .map(|direction| direction.value)
            .unwrap_or(InfixDirection::Left)
    }
}
