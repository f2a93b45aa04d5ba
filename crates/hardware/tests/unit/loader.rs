//! Program-loading tests.

use std::io::Write;

use pretty_assertions::assert_eq;

use mcsim_core::sim::loader::{LoaderError, load_program, parse_program};

#[test]
fn parse_drops_blank_and_whitespace_lines() {
    let text = "ADD x4 x1 x2\n\n   \n  SUB x5 x4 x3  \n";
    assert_eq!(parse_program(text), vec!["ADD x4 x1 x2", "SUB x5 x4 x3"]);
}

#[test]
fn parse_empty_text_yields_empty_program() {
    assert!(parse_program("").is_empty());
    assert!(parse_program("\n\n  \n").is_empty());
}

#[test]
fn load_reads_lines_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "JAL x2 8").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "ADD x4 x1 x2").unwrap();

    let program = load_program(file.path()).unwrap();
    assert_eq!(program, vec!["JAL x2 8", "ADD x4 x1 x2"]);
}

#[test]
fn missing_file_is_unreadable() {
    let err = load_program(std::path::Path::new("/nonexistent/program.txt")).unwrap_err();
    assert!(matches!(err, LoaderError::Unreadable { .. }));
    assert!(err.to_string().contains("/nonexistent/program.txt"));
}
