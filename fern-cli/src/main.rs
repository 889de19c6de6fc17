//! Command-line interface for fern
//! This binary parses a fern source file and prints the syntax tree.
//!
//! Usage:
//!   fern `<path>` [--format `<format>`]   - Parse a file and print its AST

use clap::{Arg, Command};
use std::process;

fn main() {
    let matches = Command::new("fern")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting parsed fern files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the fern source file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (ast-json or ast-treeviz)")
                .default_value("ast-json"),
        )
        .get_matches();

    let path = matches.get_one::<String>("path").expect("path is required");
    let format = matches
        .get_one::<String>("format")
        .expect("format has a default");
    handle_parse_command(path, format);
}

fn handle_parse_command(path: &str, format: &str) {
    let source = std::fs::read_to_string(path).unwrap_or_else(|error| {
        eprintln!("Error reading {}: {}", path, error);
        process::exit(1);
    });

    let file = fern_parser::fern::parsing::parse_document(&source).unwrap_or_else(|error| {
        eprintln!("Parse error in {}:", path);
        eprintln!("{}", error);
        process::exit(1);
    });

    let formatted = match format {
        "ast-json" => serde_json::to_string_pretty(&file).unwrap_or_else(|error| {
            eprintln!("Error encoding AST: {}", error);
            process::exit(1);
        }),
        "ast-treeviz" => fern_parser::fern::formats::to_treeviz_str(&file),
        other => {
            eprintln!("Format '{}' not supported", other);
            eprintln!("Available formats: ast-json, ast-treeviz");
            process::exit(1);
        }
    };

    println!("{}", formatted);
}
