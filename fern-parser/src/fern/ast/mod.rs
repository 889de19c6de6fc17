//! AST node definitions
//!
//! The syntax tree is a set of closed sum types, one per grammatical
//! category, with every node wrapped in (or carrying) a [`range::Range`]
//! that spans exactly the source slice it was parsed from.
//!
//! All node types derive `Serialize`/`Deserialize` so a parsed [`file::File`]
//! can be cached as JSON and reloaded without reparsing.

pub mod declaration;
pub mod expression;
pub mod file;
pub mod module;
pub mod pattern;
pub mod range;
pub mod types;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use self::declaration::{
    CustomType, Declaration, FunctionDefinition, InfixDeclaration, PortDeclaration, Signature,
    TypeAlias, ValueConstructor,
};
pub use self::expression::{
    CaseBranch, CaseExpression, Expression, Lambda, LetBinding, LetExpression, RecordSetter,
};
pub use self::file::File;
pub use self::module::{
    DefaultModuleData, EffectModuleData, ExposedConstructors, Exposing, Import, ModuleHeader,
    TopLevelExpose,
};
pub use self::pattern::Pattern;
pub use self::range::{Location, Range, Ranged};
pub use self::types::{RecordField, TypeAnnotation};

/// A dotted module path, e.g. `List.Extra` is `["List", "Extra"]`.
pub type ModuleName = Vec<String>;

/// A possibly module-qualified name, e.g. `Maybe.Just` or plain `Just`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    pub module_path: ModuleName,
    pub name: String,
}

impl QualifiedName {
    pub fn new(module_path: ModuleName, name: impl Into<String>) -> Self {
        Self {
            module_path,
            name: name.into(),
        }
    }

    /// An unqualified name.
    pub fn local(name: impl Into<String>) -> Self {
        Self::new(Vec::new(), name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.module_path {
            write!(f, "{}.", segment)?;
        }
        write!(f, "{}", self.name)
    }
}

/// Associativity of an infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfixDirection {
    Left,
    Right,
}

impl fmt::Display for InfixDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfixDirection::Left => write!(f, "left"),
            InfixDirection::Right => write!(f, "right"),
        }
    }
}
