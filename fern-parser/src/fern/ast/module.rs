//! Module headers, exposing lists, and imports

use serde::{Deserialize, Serialize};

use super::range::{Range, Ranged};
use super::ModuleName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModuleHeader {
    Normal(DefaultModuleData),
    Port(DefaultModuleData),
    Effect(EffectModuleData),
}

impl ModuleHeader {
    pub fn name(&self) -> &Ranged<ModuleName> {
        match self {
            ModuleHeader::Normal(data) | ModuleHeader::Port(data) => &data.name,
            ModuleHeader::Effect(data) => &data.name,
        }
    }

    pub fn exposing(&self) -> &Ranged<Exposing> {
        match self {
            ModuleHeader::Normal(data) | ModuleHeader::Port(data) => &data.exposing,
            ModuleHeader::Effect(data) => &data.exposing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultModuleData {
    pub name: Ranged<ModuleName>,
    pub exposing: Ranged<Exposing>,
}

/// `effect module X where { command = MyCmd } exposing (..)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectModuleData {
    pub name: Ranged<ModuleName>,
    pub command: Option<Ranged<String>>,
    pub subscription: Option<Ranged<String>>,
    pub exposing: Ranged<Exposing>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Exposing {
    /// `(..)` — the range covers the two dots.
    All(Range),
    Explicit(Vec<Ranged<TopLevelExpose>>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TopLevelExpose {
    Function(String),
    /// `(++)`
    Operator(String),
    /// A type or alias exposed without its constructors.
    TypeOrAlias(String),
    /// A union type exposed with `(..)` or an explicit constructor list.
    TypeExpose {
        name: String,
        constructors: Option<ExposedConstructors>,
    },
}

impl TopLevelExpose {
    pub fn name(&self) -> &str {
        match self {
            TopLevelExpose::Function(name)
            | TopLevelExpose::Operator(name)
            | TopLevelExpose::TypeOrAlias(name)
            | TopLevelExpose::TypeExpose { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExposedConstructors {
    All(Range),
    Explicit(Vec<Ranged<String>>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Import {
    pub module_name: Ranged<ModuleName>,
    pub alias: Option<Ranged<String>>,
    pub exposing: Option<Ranged<Exposing>>,
}

impl Import {
    /// The operator symbols this import brings into scope, given the
    /// exposing clause; `(..)` defers to the module's interface.
    pub fn exposes_operator(&self, symbol: &str) -> bool {
        match self.exposing.as_ref().map(|exposing| &exposing.value) {
            Some(Exposing::All(_)) => true,
            Some(Exposing::Explicit(items)) => items.iter().any(|item| {
                matches!(&item.value, TopLevelExpose::Operator(op) if op == symbol)
            }),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranged<T>(value: T) -> Ranged<T> {
        Ranged::new(Range::default(), value)
    }

    #[test]
    fn test_exposes_operator() {
        let import = Import {
            module_name: ranged(vec!["List".to_string()]),
            alias: None,
            exposing: Some(ranged(Exposing::Explicit(vec![ranged(
                TopLevelExpose::Operator("++".to_string()),
            )]))),
        };
        assert!(import.exposes_operator("++"));
        assert!(!import.exposes_operator("::"));

        let closed = Import {
            module_name: ranged(vec!["List".to_string()]),
            alias: None,
            exposing: None,
        };
        assert!(!closed.exposes_operator("++"));
    }
}
