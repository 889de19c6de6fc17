//! Module interfaces
//!
//! What a module exposes to its importers: functions, types with their
//! constructors, aliases, and operators with their precedence and
//! direction. Interfaces are derived from parsed files and collected into
//! an [`InterfaceIndex`], which the operator-table builder consults when an
//! import exposes an operator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::fern::ast::file::File;
use crate::fern::ast::module::{ExposedConstructors, Exposing, TopLevelExpose};
use crate::fern::ast::{Declaration, InfixDirection, ModuleName};
use crate::fern::resolving::DEFAULT_OPERATOR;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExposedSymbol {
    Function {
        name: String,
    },
    Type {
        name: String,
        constructors: Vec<String>,
    },
    Alias {
        name: String,
    },
    Operator {
        symbol: String,
        precedence: i64,
        direction: InfixDirection,
    },
}

impl ExposedSymbol {
    pub fn name(&self) -> &str {
        match self {
            ExposedSymbol::Function { name }
            | ExposedSymbol::Type { name, .. }
            | ExposedSymbol::Alias { name } => name,
            ExposedSymbol::Operator { symbol, .. } => symbol,
        }
    }
}

/// In-memory `module name -> exposed symbols` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceIndex {
    modules: HashMap<ModuleName, Vec<ExposedSymbol>>,
}

impl InterfaceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, module: ModuleName, interface: Vec<ExposedSymbol>) {
        self.modules.insert(module, interface);
    }

    pub fn insert_file(&mut self, file: &File) {
        self.insert(file.module.value.name().value.clone(), build_interface(file));
    }

    pub fn get(&self, module: &[String]) -> Option<&[ExposedSymbol]> {
        self.modules.get(module).map(Vec::as_slice)
    }
}

/// Derive a module's interface from its parsed file, resolving
/// `exposing (..)` against the declaration list.
pub fn build_interface(file: &File) -> Vec<ExposedSymbol> {
    match &file.module.value.exposing().value {
        Exposing::All(_) => everything(file),
        Exposing::Explicit(items) => items
            .iter()
            .map(|item| resolve_expose(&item.value, file))
            .collect(),
    }
}

fn everything(file: &File) -> Vec<ExposedSymbol> {
    let mut symbols = Vec::new();
    for declaration in &file.declarations {
        match &declaration.value {
            Declaration::Function(definition) => symbols.push(ExposedSymbol::Function {
                name: definition.name.value.clone(),
            }),
            Declaration::Port(port) => symbols.push(ExposedSymbol::Function {
                name: port.name.value.clone(),
            }),
            Declaration::TypeAlias(alias) => symbols.push(ExposedSymbol::Alias {
                name: alias.name.value.clone(),
            }),
            Declaration::CustomType(custom) => symbols.push(ExposedSymbol::Type {
                name: custom.name.value.clone(),
                constructors: custom
                    .constructors
                    .iter()
                    .map(|constructor| constructor.value.name.value.clone())
                    .collect(),
            }),
            Declaration::Infix(infix) => symbols.push(ExposedSymbol::Operator {
                symbol: infix.operator.value.clone(),
                precedence: infix.precedence.value,
                direction: infix.effective_direction(),
            }),
            Declaration::Destructuring { pattern, .. } => {
                for name in pattern.value.bound_names() {
                    symbols.push(ExposedSymbol::Function {
                        name: name.to_string(),
                    });
                }
            }
        }
    }
    symbols
}

fn resolve_expose(item: &TopLevelExpose, file: &File) -> ExposedSymbol {
    match item {
        TopLevelExpose::Function(name) => ExposedSymbol::Function { name: name.clone() },
        TopLevelExpose::Operator(symbol) => {
            let info = file
                .declarations
                .iter()
                .find_map(|declaration| match &declaration.value {
                    Declaration::Infix(infix) if infix.operator.value == *symbol => Some((
                        infix.precedence.value,
                        infix.effective_direction(),
                    )),
                    _ => None,
                })
                .unwrap_or((DEFAULT_OPERATOR.precedence, DEFAULT_OPERATOR.direction));
            ExposedSymbol::Operator {
                symbol: symbol.clone(),
                precedence: info.0,
                direction: info.1,
            }
        }
        TopLevelExpose::TypeOrAlias(name) => {
            let is_union = file.declarations.iter().any(|declaration| {
                matches!(&declaration.value, Declaration::CustomType(custom) if custom.name.value == *name)
            });
            if is_union {
                ExposedSymbol::Type {
                    name: name.clone(),
                    constructors: Vec::new(),
                }
            } else {
                ExposedSymbol::Alias { name: name.clone() }
            }
        }
        TopLevelExpose::TypeExpose { name, constructors } => {
            let constructors = match constructors {
                Some(ExposedConstructors::All(_)) | None => file
                    .declarations
                    .iter()
                    .find_map(|declaration| match &declaration.value {
                        Declaration::CustomType(custom) if custom.name.value == *name => Some(
                            custom
                                .constructors
                                .iter()
                                .map(|constructor| constructor.value.name.value.clone())
                                .collect(),
                        ),
                        _ => None,
                    })
                    .unwrap_or_default(),
                Some(ExposedConstructors::Explicit(names)) => names
                    .iter()
                    .map(|constructor| constructor.value.clone())
                    .collect(),
            };
            ExposedSymbol::Type {
                name: name.clone(),
                constructors,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fern::parsing::parse_raw;

    #[test]
    fn test_expose_all_lists_every_declaration() {
        let source = "module M exposing (..)\n\ntype Shade\n    = Light\n    | Dark\n\ntype alias Name =\n    String\n\ninfixr 5 +++\n\nrun x = x\n";
        let file = parse_raw(source).expect("parse");
        let interface = build_interface(&file);
        let names: Vec<&str> = interface.iter().map(ExposedSymbol::name).collect();
        assert_eq!(names, vec!["Shade", "Name", "+++", "run"]);
        assert!(matches!(
            &interface[0],
            ExposedSymbol::Type { constructors, .. } if constructors == &vec!["Light".to_string(), "Dark".to_string()]
        ));
    }

    #[test]
    fn test_explicit_exposing_resolves_constructors() {
        let source = "module M exposing (Shade(..), run)\n\ntype Shade\n    = Light\n    | Dark\n\nrun x = x\n";
        let file = parse_raw(source).expect("parse");
        let interface = build_interface(&file);
        assert!(matches!(
            &interface[0],
            ExposedSymbol::Type { constructors, .. } if constructors.len() == 2
        ));
        assert!(matches!(&interface[1], ExposedSymbol::Function { name } if name == "run"));
    }

    #[test]
    fn test_exposed_operator_carries_local_fixity() {
        let source = "module M exposing ((+++))\n\ninfixr 3 +++\n";
        let file = parse_raw(source).expect("parse");
        let interface = build_interface(&file);
        assert_eq!(
            interface,
            vec![ExposedSymbol::Operator {
                symbol: "+++".to_string(),
                precedence: 3,
                direction: InfixDirection::Right,
            }]
        );
    }

    #[test]
    fn test_index_round_trip() {
        let source = "module Util.Math exposing (..)\n\nsquare n = n * n\n";
        let file = parse_raw(source).expect("parse");
        let mut index = InterfaceIndex::new();
        index.insert_file(&file);
        let symbols = index
            .get(&["Util".to_string(), "Math".to_string()])
            .expect("module is indexed");
        assert_eq!(symbols.len(), 1);
    }
}
