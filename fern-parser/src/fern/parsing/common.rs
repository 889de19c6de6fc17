//! Small helpers shared by the grammar parsers

use crate::fern::ast::range::Ranged;
use crate::fern::ast::{ModuleName, QualifiedName};
use crate::fern::combinators::{ranged, sep_by1, token, Parser};
use crate::fern::lexing::{function_name, type_name};

use super::layout::maybe_lax_spacing;

pub fn ranged_lower_name() -> Parser<Ranged<String>> {
    ranged(function_name())
}

pub fn ranged_upper_name() -> Parser<Ranged<String>> {
    ranged(type_name())
}

/// A punctuation separator with optional (unchecked) whitespace around it,
/// for use inside brackets where layout is already bounded.
pub fn separator(symbol: &'static str) -> Parser<()> {
    maybe_lax_spacing()
        .keep(token(symbol))
        .keep(maybe_lax_spacing())
}

/// A dotted path of uppercase segments, e.g. `List.Extra`.
pub fn module_path() -> Parser<ModuleName> {
    sep_by1(token("."), type_name())
}

/// An uppercase path read as a qualified constructor or type reference: the
/// last segment is the name, anything before it the module path.
pub fn qualified_constructor() -> Parser<QualifiedName> {
    module_path().map(|mut segments| {
        let name = segments.pop().unwrap_or_default();
        QualifiedName {
            module_path: segments,
            name,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fern::combinators::state::ParseState;
    use crate::fern::combinators::stream::Stream;

    fn run<T: 'static>(parser: &Parser<T>, input: &str) -> (Result<T, Vec<String>>, usize) {
        let reply = parser.parse(ParseState::new(), Stream::new(input));
        (reply.result, reply.stream.offset())
    }

    #[test]
    fn test_module_path_stops_before_lower_segment() {
        let (result, offset) = run(&module_path(), "List.Extra.map");
        assert_eq!(result, Ok(vec!["List".to_string(), "Extra".to_string()]));
        // `.map` stays for the caller
        assert_eq!(offset, 10);
    }

    #[test]
    fn test_qualified_constructor_splits_path_and_name() {
        let (result, _) = run(&qualified_constructor(), "Maybe.Just");
        let name = result.expect("parse");
        assert_eq!(name.module_path, vec!["Maybe".to_string()]);
        assert_eq!(name.name, "Just");

        let (result, _) = run(&qualified_constructor(), "Nothing");
        let name = result.expect("parse");
        assert!(name.module_path.is_empty());
        assert_eq!(name.name, "Nothing");
    }
}
