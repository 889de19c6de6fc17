//! Token-level parsers
//!
//!     The grammar is scannerless: these are ordinary combinator parsers
//!     that match one token each, built from anchored `Lazy<Regex>` statics
//!     and small hand-written scanners for the literals that regexes handle
//!     poorly (strings with escapes, nested block comments).
//!
//!     Whitespace is never consumed here; the layout parsers own all
//!     whitespace and comment handling so that token ranges span exactly the
//!     characters of the token.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fern::combinators::{regex_match, scan, Parser, Reply};

/// Words that can never be used as a lowercase name.
pub const RESERVED: &[&str] = &[
    "module", "exposing", "import", "as", "port", "where", "let", "in", "case", "of", "if",
    "then", "else", "type", "infixl", "infixr", "infix",
];

/// Operator-character sequences that are grammar punctuation, not operators.
const RESERVED_SYMBOLS: &[&str] = &["=", ".", "..", "->", ":", "|"];

static LOWER_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-zA-Z0-9_]*").unwrap());
static UPPER_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9_]*").unwrap());
static OPERATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+\-*/=.<>:&|^?%!$~#]+").unwrap());
static HEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0x[0-9A-Fa-f]+").unwrap());
static FLOAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?|^[0-9]+[eE][+-]?[0-9]+").unwrap());
static INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+").unwrap());
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^--[^\n]*").unwrap());

/// A lowercase identifier that is not a reserved word.
pub fn function_name() -> Parser<String> {
    scan(|rest| match anchored(&LOWER_NAME, rest) {
        Some((length, text)) => {
            if RESERVED.contains(&text.as_str()) {
                Err(format!("`{}` is a reserved word", text))
            } else {
                Ok((length, text))
            }
        }
        None => Err("expected a lowercase name".to_string()),
    })
}

/// An uppercase identifier (type, constructor, or module segment).
pub fn type_name() -> Parser<String> {
    regex_match(&UPPER_NAME, "an uppercase name")
}

/// An infix operator token. Grammar punctuation (`=`, `->`, `:`, `|`, `.`,
/// `..`) and anything containing `--` is rejected.
pub fn operator_token() -> Parser<String> {
    scan(|rest| match anchored(&OPERATOR, rest) {
        Some((length, text)) => {
            if RESERVED_SYMBOLS.contains(&text.as_str()) {
                Err(format!("`{}` is not an operator", text))
            } else if text.contains("--") {
                Err("expected an operator".to_string())
            } else {
                Ok((length, text))
            }
        }
        None => Err("expected an operator".to_string()),
    })
}

/// A reserved word, rejected when it is a prefix of a longer identifier.
pub fn keyword(word: &'static str) -> Parser<String> {
    Parser::new(move |state, stream| {
        if stream.starts_with(word) {
            let follow = stream.advance(word.len()).peek_char();
            let at_boundary = !matches!(follow, Some(c) if c.is_ascii_alphanumeric() || c == '_');
            if at_boundary {
                let next = stream.advance(word.len());
                return Reply::ok(state, next, word.to_string());
            }
        }
        Reply::err(state, stream, vec![format!("expected `{}`", word)])
    })
}

/// A numeric literal. Hex notation is kept distinct so tooling can preserve
/// the way the number was written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberLiteral {
    Int(i64),
    Hex(i64),
    Float(f64),
}

pub fn number_literal() -> Parser<NumberLiteral> {
    scan(|rest| {
        if let Some((length, text)) = anchored(&HEX, rest) {
            let value = i64::from_str_radix(&text[2..], 16)
                .map_err(|_| "hexadecimal literal out of range".to_string())?;
            return Ok((length, NumberLiteral::Hex(value)));
        }
        if let Some((length, text)) = anchored(&FLOAT, rest) {
            let value: f64 = text
                .parse()
                .map_err(|_| "malformed float literal".to_string())?;
            return Ok((length, NumberLiteral::Float(value)));
        }
        if let Some((length, text)) = anchored(&INT, rest) {
            let value: i64 = text
                .parse()
                .map_err(|_| "integer literal out of range".to_string())?;
            return Ok((length, NumberLiteral::Int(value)));
        }
        Err("expected a number".to_string())
    })
}

/// A single-quoted character literal with the usual escapes.
pub fn char_literal() -> Parser<char> {
    scan(scan_char)
}

/// A string literal: `"..."` on one line, or `"""..."""` spanning lines.
/// An unterminated literal is a parse failure, never a partial value.
pub fn string_literal() -> Parser<String> {
    scan(scan_string)
}

/// `-- ...` up to (not including) the end of the line.
pub fn line_comment() -> Parser<String> {
    regex_match(&LINE_COMMENT, "a line comment")
}

/// `{- ... -}`, with nesting. The text includes the delimiters, so
/// documentation comments are recognizable by their `{-|` prefix.
pub fn block_comment() -> Parser<String> {
    scan(scan_block_comment)
}

fn anchored(pattern: &Regex, rest: &str) -> Option<(usize, String)> {
    pattern
        .find(rest)
        .filter(|found| found.start() == 0)
        .map(|found| (found.end(), found.as_str().to_string()))
}

fn scan_char(rest: &str) -> Result<(usize, char), String> {
    let body = match rest.strip_prefix('\'') {
        Some(body) => body,
        None => return Err("expected a character literal".to_string()),
    };
    let (consumed, value) = match body.chars().next() {
        Some('\\') => {
            let (length, decoded) = scan_escape(&body[1..])?;
            (1 + length, decoded)
        }
        Some('\'') => return Err("empty character literal".to_string()),
        Some('\n') | None => return Err("unterminated character literal".to_string()),
        Some(c) => (c.len_utf8(), c),
    };
    if body[consumed..].starts_with('\'') {
        Ok((1 + consumed + 1, value))
    } else {
        Err("unterminated character literal".to_string())
    }
}

fn scan_string(rest: &str) -> Result<(usize, String), String> {
    if let Some(body) = rest.strip_prefix("\"\"\"") {
        scan_string_body(body, 3, true)
    } else if let Some(body) = rest.strip_prefix('"') {
        scan_string_body(body, 1, false)
    } else {
        Err("expected a string literal".to_string())
    }
}

fn scan_string_body(body: &str, open_length: usize, triple: bool) -> Result<(usize, String), String> {
    let mut value = String::new();
    let mut i = 0;
    while i < body.len() {
        let ch = match body[i..].chars().next() {
            Some(ch) => ch,
            None => break,
        };
        match ch {
            '"' if triple => {
                if body[i..].starts_with("\"\"\"") {
                    return Ok((open_length + i + 3, value));
                }
                value.push('"');
                i += 1;
            }
            '"' => return Ok((open_length + i + 1, value)),
            '\n' if !triple => return Err("unterminated string literal".to_string()),
            '\\' => {
                let (length, decoded) = scan_escape(&body[i + 1..])?;
                value.push(decoded);
                i += 1 + length;
            }
            _ => {
                value.push(ch);
                i += ch.len_utf8();
            }
        }
    }
    Err("unterminated string literal".to_string())
}

/// Decode one escape sequence (after the backslash). Returns the number of
/// bytes consumed and the character.
fn scan_escape(rest: &str) -> Result<(usize, char), String> {
    match rest.chars().next() {
        Some('n') => Ok((1, '\n')),
        Some('t') => Ok((1, '\t')),
        Some('r') => Ok((1, '\r')),
        Some('\\') => Ok((1, '\\')),
        Some('"') => Ok((1, '"')),
        Some('\'') => Ok((1, '\'')),
        Some('u') => {
            if !rest[1..].starts_with('{') {
                return Err("malformed unicode escape".to_string());
            }
            let close = match rest.find('}') {
                Some(close) => close,
                None => return Err("malformed unicode escape".to_string()),
            };
            let code = u32::from_str_radix(&rest[2..close], 16)
                .map_err(|_| "malformed unicode escape".to_string())?;
            match char::from_u32(code) {
                Some(decoded) => Ok((close + 1, decoded)),
                None => Err("malformed unicode escape".to_string()),
            }
        }
        Some(other) => Err(format!("unsupported escape `\\{}`", other)),
        None => Err("unterminated string literal".to_string()),
    }
}

fn scan_block_comment(rest: &str) -> Result<(usize, String), String> {
    if !rest.starts_with("{-") {
        return Err("expected a block comment".to_string());
    }
    let mut depth = 1usize;
    let mut i = 2;
    while i < rest.len() {
        if rest[i..].starts_with("{-") {
            depth += 1;
            i += 2;
        } else if rest[i..].starts_with("-}") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                return Ok((i, rest[..i].to_string()));
            }
        } else {
            i += rest[i..].chars().next().map(char::len_utf8).unwrap_or(1);
        }
    }
    Err("unterminated block comment".to_string())
}
