//! Property tests for the layout rule and serialization.

use proptest::prelude::*;

use fern_parser::fern::parsing::parse_document;
use fern_parser::fern::testing::{parse_ok, scrubbed};

const SAMPLES: &[&str] = &[
    "module M exposing (..)\n\nanswer = 1 + 2 * 3\n",
    "module M exposing (view)\n\nimport Html\n\nview model =\n    Html.text model.title\n",
    "module M exposing (..)\n\nf =\n    let\n        a = 1\n        b = 2\n    in\n    a + b\n",
    "module M exposing (..)\n\npick flag =\n    if flag then\n        [ 1, 2 ]\n    else\n        []\n",
    "module M exposing (..)\n\nfirst list =\n    case list of\n        x :: _ ->\n            Just x\n\n        [] ->\n            Nothing\n",
    "module M exposing (..)\n\ntype Tree a\n    = Leaf\n    | Node (Tree a) a (Tree a)\n",
];

fn shift_lines(source: &str, shift: usize) -> String {
    let pad = " ".repeat(shift);
    source
        .lines()
        .map(|line| format!("{}{}\n", pad, line))
        .collect()
}

proptest! {
    /// Uniform extra indentation changes ranges, never the parsed shape.
    #[test]
    fn uniform_indentation_preserves_shape(index in 0..SAMPLES.len(), shift in 0usize..8) {
        let original = SAMPLES[index];
        let shifted = shift_lines(original, shift);
        let parsed_original = parse_ok(original);
        let parsed_shifted = parse_ok(&shifted);
        prop_assert_eq!(scrubbed(&parsed_original), scrubbed(&parsed_shifted));
    }

    /// Every sample survives a JSON round trip unchanged.
    #[test]
    fn json_round_trip(index in 0..SAMPLES.len()) {
        let file = parse_ok(SAMPLES[index]);
        let encoded = serde_json::to_string(&file).expect("encode");
        let decoded: fern_parser::fern::ast::File = serde_json::from_str(&encoded).expect("decode");
        prop_assert_eq!(file, decoded);
    }

    /// Any non-reserved lowercase name works as a declaration name.
    #[test]
    fn arbitrary_names_parse(name in "[a-z][a-z0-9]{0,7}") {
        prop_assume!(!fern_parser::fern::lexing::RESERVED.contains(&name.as_str()));
        let source = format!("module M exposing (..)\n\n{} = 1\n", name);
        let file = parse_ok(&source);
        prop_assert!(file.declaration(&name).is_some());
    }
}

#[test]
fn shifting_shifts_ranges_by_the_shift() {
    let original = parse_ok(SAMPLES[0]);
    let shifted = parse_ok(&shift_lines(SAMPLES[0], 4));
    let original_range = original.declarations[0].range;
    let shifted_range = shifted.declarations[0].range;
    assert_eq!(
        shifted_range.start.column,
        original_range.start.column + 4
    );
    assert_eq!(shifted_range.start.row, original_range.start.row);
}

#[test]
fn blank_lines_with_trailing_spaces_are_still_blank() {
    let source = "module M exposing (..)\n   \nanswer = 1\n";
    assert!(parse_document(source).is_ok());
}
