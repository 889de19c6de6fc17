//! Core fern parsing functionality
//!
//! The pieces stack leaf to root: `combinators` (the generic backtracking
//! engine and its threaded state), `lexing` (token parsers), `parsing`
//! (layout rule and grammar, with the parse driver in `parsing::file`),
//! `assembling` (documentation attachment), and `resolving` (the operator
//! precedence pass). `ast` holds the node types, `interface` the exposed
//! symbols of parsed modules, `formats` the debug renderings, and
//! `testing` the assertion helpers used by the test suites.

pub mod assembling;
pub mod ast;
pub mod combinators;
pub mod formats;
pub mod interface;
pub mod lexing;
pub mod parsing;
pub mod resolving;
pub mod testing;
