//! End-to-end runs of the `fern` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn write_source(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write source");
    file
}

#[test]
fn parses_a_file_to_json() {
    let source = write_source("module Main exposing (..)\n\nanswer = 1 + 2\n");
    Command::cargo_bin("fern")
        .expect("binary builds")
        .arg(source.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"declarations\""))
        .stdout(predicate::str::contains("OperatorApplication"));
}

#[test]
fn treeviz_format_renders_one_line_per_node() {
    let source = write_source("module Main exposing (..)\n\nanswer = 1 + 2\n");
    Command::cargo_bin("fern")
        .expect("binary builds")
        .arg(source.path())
        .args(["--format", "ast-treeviz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ƒ answer"))
        .stdout(predicate::str::contains("operator +"));
}

#[test]
fn parse_errors_exit_nonzero() {
    let source = write_source("module Main exposing (..)\n\nbroken = \"unterminated\n");
    Command::cargo_bin("fern")
        .expect("binary builds")
        .arg(source.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn unknown_format_is_rejected() {
    let source = write_source("module Main exposing (..)\n");
    Command::cargo_bin("fern")
        .expect("binary builds")
        .arg(source.path())
        .args(["--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn missing_file_is_an_error() {
    Command::cargo_bin("fern")
        .expect("binary builds")
        .arg("does-not-exist.fern")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading"));
}
