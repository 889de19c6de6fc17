//! The per-file operator table
//!
//! Built once per file before resolution and read-only afterwards: the
//! built-in defaults are seeded first, then every import that exposes an
//! operator (explicitly or via `(..)`) contributes the operator's
//! precedence and direction from the module interface index, then local
//! `infix` declarations are applied. Later entries override earlier ones
//! for the same symbol.

use std::collections::HashMap;

use crate::fern::ast::file::File;
use crate::fern::ast::{Declaration, InfixDirection};
use crate::fern::interface::{ExposedSymbol, InterfaceIndex};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatorInfo {
    pub precedence: i64,
    pub direction: InfixDirection,
}

/// What an operator resolves to when nothing declares it.
pub const DEFAULT_OPERATOR: OperatorInfo = OperatorInfo {
    precedence: 5,
    direction: InfixDirection::Left,
};

/// The always-in-scope operators of the base language.
const BUILT_IN: &[(&str, i64, InfixDirection)] = &[
    ("<|", 0, InfixDirection::Right),
    ("|>", 0, InfixDirection::Left),
    ("||", 2, InfixDirection::Right),
    ("&&", 3, InfixDirection::Right),
    ("==", 4, InfixDirection::Left),
    ("/=", 4, InfixDirection::Left),
    ("<", 4, InfixDirection::Left),
    (">", 4, InfixDirection::Left),
    ("<=", 4, InfixDirection::Left),
    (">=", 4, InfixDirection::Left),
    ("++", 5, InfixDirection::Left),
    ("::", 5, InfixDirection::Right),
    ("+", 6, InfixDirection::Left),
    ("-", 6, InfixDirection::Left),
    ("*", 7, InfixDirection::Left),
    ("/", 7, InfixDirection::Left),
    ("//", 7, InfixDirection::Left),
    ("^", 8, InfixDirection::Right),
    ("<<", 9, InfixDirection::Left),
    (">>", 9, InfixDirection::Right),
];

#[derive(Debug, Clone)]
pub struct OperatorTable {
    entries: HashMap<String, OperatorInfo>,
}

impl OperatorTable {
    /// The built-in defaults only.
    pub fn defaults() -> Self {
        let entries = BUILT_IN
            .iter()
            .map(|(symbol, precedence, direction)| {
                (
                    symbol.to_string(),
                    OperatorInfo {
                        precedence: *precedence,
                        direction: *direction,
                    },
                )
            })
            .collect();
        OperatorTable { entries }
    }

    /// Defaults, then imported operators (in file order), then local `infix`
    /// declarations.
    pub fn for_file(file: &File, interfaces: Option<&InterfaceIndex>) -> Self {
        let mut table = Self::defaults();
        if let Some(index) = interfaces {
            for import in &file.imports {
                let symbols = match index.get(&import.value.module_name.value) {
                    Some(symbols) => symbols,
                    None => continue,
                };
                for symbol in symbols {
                    if let ExposedSymbol::Operator {
                        symbol,
                        precedence,
                        direction,
                    } = symbol
                    {
                        if import.value.exposes_operator(symbol) {
                            table.insert(
                                symbol.clone(),
                                OperatorInfo {
                                    precedence: *precedence,
                                    direction: *direction,
                                },
                            );
                        }
                    }
                }
            }
        }
        for declaration in &file.declarations {
            if let Declaration::Infix(infix) = &declaration.value {
                table.insert(
                    infix.operator.value.clone(),
                    OperatorInfo {
                        precedence: infix.precedence.value,
                        direction: infix.effective_direction(),
                    },
                );
            }
        }
        table
    }

    pub fn insert(&mut self, symbol: String, info: OperatorInfo) {
        self.entries.insert(symbol, info);
    }

    /// Unknown operators fall back to precedence 5, left-associative.
    pub fn lookup(&self, symbol: &str) -> OperatorInfo {
        self.entries.get(symbol).copied().unwrap_or(DEFAULT_OPERATOR)
    }
}
