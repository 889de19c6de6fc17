//! Operator-precedence resolution
//!
//! The second phase of a parse: build the file's operator table (built-in
//! defaults, imported operators, local `infix` declarations), then rewrite
//! every flat `Application` list into a properly associated
//! `OperatorApplication` tree. The table is derived once per file and is
//! read-only during resolution.

pub mod operators;
pub mod table;

pub use self::operators::{resolve_expression, resolve_operators};
pub use self::table::{OperatorInfo, OperatorTable, DEFAULT_OPERATOR};
