//! # fern-parser
//!
//! A parser for fern, a whitespace-sensitive, expression-oriented
//! functional language. One call parses one file:
//!
//! ```rust,ignore
//! use fern_parser::fern::parsing::parse_document;
//!
//! let file = parse_document("module Main exposing (..)\n\nanswer = 1 + 41\n")?;
//! ```
//!
//! Parsing happens in three phases over one pure call tree: the grammar
//! parsers produce a syntax tree with every operator expression left as a
//! flat part list, the assembling stage attaches documentation comments to
//! their declarations, and the resolving stage rewrites the flat lists into
//! operator trees using the file's operator table. A failing file yields an
//! error, never a partial tree.
//!
//! The crate does no I/O; callers hand in source text and get back a
//! serializable [`fern::ast::File`].

pub mod fern;
