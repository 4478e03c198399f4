//! Integration tests for the public parsing API.
//!
//! These tests run the demo programs under `demos/` through the full
//! pipeline, from source text through tokenization to the finished AST, and
//! check the incremental and diagnostic entry points.

use std::{fs, path::PathBuf};

use liva_parser::{
    ast::{ast::Node, statements::Statement},
    errors::errors::ErrorKind,
    format_error, parse_source, parse_statement, ParseOptions,
};

fn demo_files() -> Vec<PathBuf> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos");
    let mut files: Vec<PathBuf> = fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "lv"))
        .collect();
    files.sort();
    files
}

#[test]
fn test_demo_programs_parse() {
    let files = demo_files();
    assert!(!files.is_empty(), "no demo programs found");

    for path in files {
        let source = fs::read_to_string(&path).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();

        match parse_source(&source, Some(name.clone())) {
            Ok(block) => {
                assert!(!block.is_empty(), "{} parsed to an empty block", name);
                assert_eq!(block.span.end.0 as usize, source.len());
            }
            Err(error) => panic!("{}", format_error(&error, &source, &name)),
        }
    }
}

#[test]
fn test_classes_demo_shape() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/classes.lv");
    let source = fs::read_to_string(path).unwrap();
    let block = parse_source(&source, Some(String::from("classes.lv"))).unwrap();

    match &block.statements[0] {
        Statement::Class(class) => {
            assert_eq!(class.name.name, "Vector");
            assert_eq!(class.methods.len(), 3);
            assert!(class.span.text(&source).starts_with("class Vector"));
        }
        other => panic!("expected class, got {:?}", other),
    }

    assert!(matches!(block.statements[1], Statement::Assignment(_)));
    assert!(matches!(block.statements[2], Statement::FuncCall(_)));
}

#[test]
fn test_statement_by_statement_matches_whole_parse() {
    let source = "import math\nlet x = 1; x = x + 1\nif x > 1 do print(x) end\n// trailing comment\n";
    let options = ParseOptions::default();

    let whole = parse_source(source, None).unwrap();

    let mut offset = 0;
    let mut statements = vec![];
    while let Some((stmt, next)) = parse_statement(source, offset, &options).unwrap() {
        assert!(next > offset);
        offset = next;
        statements.push(stmt);
    }

    assert_eq!(statements.len(), whole.len());
    for (incremental, full) in statements.iter().zip(whole.iter()) {
        assert_eq!(incremental.get_span().text(source), full.get_span().text(source));
    }
}

#[test]
fn test_parse_statement_consumes_terminator() {
    let source = "f(1);  g(2)";
    let options = ParseOptions::default();

    let (stmt, next) = parse_statement(source, 0, &options).unwrap().unwrap();
    assert_eq!(stmt.get_span().text(source), "f(1)");
    assert_eq!(next, 5);

    let (stmt, next) = parse_statement(source, next, &options).unwrap().unwrap();
    assert_eq!(stmt.get_span().text(source), "g(2)");
    assert_eq!(next, source.len());

    assert!(parse_statement(source, next, &options).unwrap().is_none());
}

#[test]
fn test_parse_statement_rejects_bad_offset() {
    let options = ParseOptions::default();

    let error = parse_statement("f()", 10, &options).unwrap_err();
    assert_eq!(error.get_kind(), ErrorKind::Lex);

    let error = parse_statement("é()", 1, &options).unwrap_err();
    assert_eq!(error.get_kind(), ErrorKind::Lex);
}

#[test]
fn test_error_report() {
    let source = "let a = 1\nlet b = ";
    let error = parse_source(source, Some(String::from("main.lv"))).unwrap_err();

    assert_eq!(error.get_kind(), ErrorKind::UnexpectedToken);
    assert_eq!(error.to_string(), "unexpected token: expected expression, found end of input at main.lv:18");

    let report = format_error(&error, source, "main.lv");
    assert!(report.starts_with("Error: UnexpectedToken (expected expression, found end of input)\n"));
    assert!(report.contains("-> main.lv\n"));
    assert!(report.contains("2 | let b =\n"));
}

#[test]
fn test_lex_error_surfaces_through_parse() {
    let error = parse_source("let a = 1 @ 2", None).unwrap_err();

    assert_eq!(error.get_kind(), ErrorKind::Lex);
    assert_eq!(error.get_position().0, 10);
    assert_eq!(error.get_position().1.as_str(), "shell");
}
