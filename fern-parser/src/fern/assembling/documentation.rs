//! Documentation attachment stage
//!
//! A `{-| ... -}` comment whose last line sits directly above a declaration
//! (no blank line between them) becomes that declaration's documentation
//! and is removed from the file's comment list. A comment separated from
//! the declaration by a blank line stays a plain comment. Each comment
//! attaches at most once.

use crate::fern::ast::file::File;
use crate::fern::ast::Declaration;

pub fn attach_documentation(mut file: File) -> File {
    let mut used = Vec::new();
    for declaration in &mut file.declarations {
        let declaration_row = declaration.range.start.row;
        let found = file.comments.iter().enumerate().find(|(_, comment)| {
            comment.value.starts_with("{-|") && comment.range.end.row + 1 == declaration_row
        });
        let (index, comment) = match found {
            Some((index, comment)) => (index, comment.clone()),
            None => continue,
        };
        let attached = match &mut declaration.value {
            Declaration::Function(definition) => {
                definition.documentation = Some(comment);
                true
            }
            Declaration::TypeAlias(alias) => {
                alias.documentation = Some(comment);
                true
            }
            Declaration::CustomType(custom) => {
                custom.documentation = Some(comment);
                true
            }
            Declaration::Port(port) => {
                port.documentation = Some(comment);
                true
            }
            Declaration::Infix(_) | Declaration::Destructuring { .. } => false,
        };
        if attached {
            used.push(index);
        }
    }
    used.sort_unstable();
    used.dedup();
    for index in used.into_iter().rev() {
        file.comments.remove(index);
    }
    file
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fern::parsing::parse_raw;

    fn assemble(source: &str) -> File {
        attach_documentation(parse_raw(source).expect("parse"))
    }

    #[test]
    fn test_adjacent_doc_comment_attaches() {
        let source = "module M exposing (..)\n\n{-| Adds one. -}\nincrement n = n + 1\n";
        let file = assemble(source);
        let docs = file.documentation();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].value, "{-| Adds one. -}");
        // the attached comment is no longer a plain comment
        assert!(file.comments.is_empty());
    }

    #[test]
    fn test_blank_line_prevents_attachment() {
        let source = "module M exposing (..)\n\n{-| Orphaned. -}\n\nincrement n = n + 1\n";
        let file = assemble(source);
        assert!(file.documentation().is_empty());
        assert_eq!(file.comments.len(), 1);
    }

    #[test]
    fn test_plain_comment_does_not_attach() {
        let source = "module M exposing (..)\n\n-- just a note\nincrement n = n + 1\n";
        let file = assemble(source);
        assert!(file.documentation().is_empty());
        assert_eq!(file.comments.len(), 1);
    }

    #[test]
    fn test_multiline_doc_comment_attaches_to_type() {
        let source =
            "module M exposing (..)\n\n{-| A maybe.\n\nWith details.\n-}\ntype Maybe a\n    = Just a\n    | Nothing\n";
        let file = assemble(source);
        let docs = file.documentation();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].value.contains("With details."));
    }
}
