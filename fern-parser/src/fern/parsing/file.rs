//! File grammar and the parse driver
//!
//!     A file is a module header, imports, and declarations. The body opens
//!     a layout scope at the column of its first item, so a uniformly
//!     indented file keeps its shape; siblings are separated by exact
//!     indentation.
//!
//!     The driver appends a trailing newline before parsing (which keeps
//!     end-of-line handling out of every token parser) and then demands
//!     full consumption: leftover input after an otherwise successful parse
//!     is reported with the exact row and column where parsing stopped.
//!     A failing file yields no partial syntax tree.

use crate::fern::assembling::attach_documentation;
use crate::fern::ast::file::File;
use crate::fern::ast::range::Ranged;
use crate::fern::ast::{Declaration, Import, ModuleHeader};
use crate::fern::combinators::state::ParseState;
use crate::fern::combinators::stream::Stream;
use crate::fern::combinators::{many, maybe, pair, ranged, Parser};
use crate::fern::interface::InterfaceIndex;
use crate::fern::resolving::{resolve_operators, OperatorTable};

use super::declarations::declaration;
use super::layout::{exact_indent, indented_block, lax_spacing, maybe_lax_spacing};
use super::modules::{import_statement, module_header};

#[derive(Clone)]
enum FileItem {
    Import(Ranged<Import>),
    Declaration(Ranged<Declaration>),
}

fn file_item() -> Parser<FileItem> {
    ranged(import_statement())
        .map(FileItem::Import)
        .or(declaration().map(FileItem::Declaration))
}

fn body_items() -> Parser<Vec<FileItem>> {
    pair(file_item(), many(exact_indent().keep(file_item()))).map(|(first, mut rest)| {
        let mut items = vec![first];
        items.append(&mut rest);
        items
    })
}

fn file_parser() -> Parser<(Ranged<ModuleHeader>, Vec<FileItem>)> {
    pair(
        maybe_lax_spacing().keep(module_header()),
        maybe(lax_spacing().keep(indented_block(body_items())))
            .map(|items| items.unwrap_or_default()),
    )
    .skip(maybe_lax_spacing())
}

/// Parse a file without documentation attachment or operator resolution.
pub fn parse_raw(source: &str) -> Result<File, String> {
    let padded = format!("{}\n", source);
    let reply = file_parser().parse(ParseState::new(), Stream::new(&padded));
    match reply.result {
        Ok((module, items)) => {
            if !reply.stream.is_at_end() {
                let location = reply.stream.location();
                return Err(format!(
                    "could not continue parsing on location ({},{})",
                    location.row, location.column
                ));
            }
            let mut imports = Vec::new();
            let mut declarations = Vec::new();
            for item in items {
                match item {
                    FileItem::Import(import) => {
                        if !declarations.is_empty() {
                            return Err(
                                "imports must appear before the first declaration".to_string()
                            );
                        }
                        imports.push(import);
                    }
                    FileItem::Declaration(found) => declarations.push(found),
                }
            }
            Ok(File {
                module,
                imports,
                declarations,
                comments: reply.state.take_comments(),
            })
        }
        Err(messages) => Err(messages.join("\n")),
    }
}

/// Parse a file completely: attach documentation and resolve operators
/// against the built-in operator table plus the file's own `infix`
/// declarations.
pub fn parse_document(source: &str) -> Result<File, String> {
    parse_raw(source).map(|file| finish(file, None))
}

/// Like [`parse_document`], but operators exposed by imports are looked up
/// in the given module interface index as well.
pub fn parse_document_with_interfaces(
    source: &str,
    interfaces: &InterfaceIndex,
) -> Result<File, String> {
    parse_raw(source).map(|file| finish(file, Some(interfaces)))
}

fn finish(file: File, interfaces: Option<&InterfaceIndex>) -> File {
    let file = attach_documentation(file);
    let table = OperatorTable::for_file(&file, interfaces);
    resolve_operators(file, &table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_file() {
        let file = parse_raw("module Main exposing (..)").expect("parse");
        assert!(file.imports.is_empty());
        assert!(file.declarations.is_empty());
    }

    #[test]
    fn test_imports_and_declarations() {
        let source = "module Main exposing (..)\n\nimport List\nimport Dict\n\nanswer = 42\n";
        let file = parse_raw(source).expect("parse");
        assert_eq!(file.imports.len(), 2);
        assert_eq!(file.declarations.len(), 1);
    }

    #[test]
    fn test_import_after_declaration_is_rejected() {
        let source = "module Main exposing (..)\n\nanswer = 42\n\nimport List\n";
        let error = parse_raw(source).expect_err("should fail");
        assert!(error.contains("imports must appear before"));
    }

    #[test]
    fn test_unconsumed_input_reports_location() {
        // the header parses, the stray token after it does not
        let source = "module Main exposing (..)\n???\n";
        let error = parse_raw(source).expect_err("should fail");
        assert!(
            error.contains("could not continue parsing on location"),
            "unexpected error: {}",
            error
        );
        assert!(error.contains("(1,0)"), "unexpected location: {}", error);
    }

    #[test]
    fn test_failing_file_yields_no_partial_tree() {
        let source = "module Main exposing (..)\n\nbroken = \"unterminated\n";
        assert!(parse_raw(source).is_err());
    }

    #[test]
    fn test_comments_are_collected() {
        let source = "module Main exposing (..)\n\n-- a note\nanswer = 42 -- trailing\n";
        let file = parse_raw(source).expect("parse");
        let texts: Vec<&str> = file
            .comments
            .iter()
            .map(|comment| comment.value.as_str())
            .collect();
        assert!(texts.contains(&"-- a note"));
        assert!(texts.contains(&"-- trailing"));
    }

    #[test]
    fn test_uniformly_indented_file_keeps_its_shape() {
        let plain = parse_raw("module Main exposing (..)\n\nanswer = 1 + 2\n").expect("parse");
        let shifted =
            parse_raw("  module Main exposing (..)\n\n  answer = 1 + 2\n").expect("parse");
        assert_eq!(plain.declarations.len(), shifted.declarations.len());
    }
}
