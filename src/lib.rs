//! Front-end parser for the liva scripting language.
//!
//! Source text is tokenized by [`lexer`], then turned into a span-carrying
//! AST by [`parser`]: a Pratt parser for expressions and a recursive-descent
//! parser for statements.
//!
//! ```
//! use liva_parser::{ast::statements::Statement, parse_source};
//!
//! let block = parse_source("let answer = 6 * 7", None).unwrap();
//! assert!(matches!(block.statements[0], Statement::Assignment(_)));
//! ```

#![allow(clippy::module_inception)]

use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::statements::{Block, Statement},
    errors::errors::{Error, ErrorTip},
    lexer::lexer::{tokenize, tokenize_from},
    parser::{
        parser::{parse_program, Parser},
        stmt::parse_stmt,
    },
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// File name used when the caller does not name the source.
pub const DEFAULT_FILE_NAME: &str = "shell";

/// Default bound on expression/statement nesting.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// A byte offset into a named source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

/// A half-open byte range `[start, end)` of a source buffer.
///
/// Spans copy offsets rather than borrowing the text, so the AST does not
/// hold on to the buffer. Use [`Span::text`] to recover the slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn len(&self) -> u32 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the covered slice of `source`, or `""` if the span does not
    /// fit the buffer.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.start.0 as usize..self.end.0 as usize)
            .unwrap_or("")
    }

    /// True if `other` lies entirely within `self`.
    pub fn contains(&self, other: &Span) -> bool {
        self.start.0 <= other.start.0 && other.end.0 <= self.end.0
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(&self, other: &Span) -> Span {
        let start = if self.start.0 <= other.start.0 { &self.start } else { &other.start };
        let end = if self.end.0 >= other.end.0 { &self.end } else { &other.end };

        Span {
            start: start.clone(),
            end: end.clone(),
        }
    }
}

/// Knobs for a single parse call.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Name reported in spans and diagnostics.
    pub file: Option<String>,
    /// Maximum combined depth of nested expressions and blocks.
    pub max_nesting_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            file: None,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn file_name(&self) -> String {
        self.file
            .clone()
            .unwrap_or_else(|| String::from(DEFAULT_FILE_NAME))
    }
}

/// Parses a whole source unit into its root block.
pub fn parse_source(source: &str, file: Option<String>) -> Result<Block, Error> {
    parse_source_with(
        source,
        &ParseOptions {
            file,
            ..ParseOptions::default()
        },
    )
}

/// Parses a whole source unit with explicit options.
pub fn parse_source_with(source: &str, options: &ParseOptions) -> Result<Block, Error> {
    let tokens = tokenize(source, Some(options.file_name()))?;

    let mut parser = Parser::new(tokens, Rc::new(options.file_name()));
    parser.set_max_nesting_depth(options.max_nesting_depth);

    let block = parse_program(&mut parser)?;
    debug!(
        file = %options.file_name(),
        statements = block.statements.len(),
        "parsed source"
    );

    Ok(block)
}

/// Parses exactly one statement starting at byte `offset`.
///
/// Returns the statement together with the offset just past it, or `None`
/// when nothing but whitespace and comments remains.
pub fn parse_statement(
    source: &str,
    offset: usize,
    options: &ParseOptions,
) -> Result<Option<(Statement, usize)>, Error> {
    let tokens = tokenize_from(source, Some(options.file_name()), offset)?;

    let mut parser = Parser::new(tokens, Rc::new(options.file_name()));
    parser.set_max_nesting_depth(options.max_nesting_depth);

    if !parser.has_tokens() {
        return Ok(None);
    }

    let stmt = parse_stmt(&mut parser)?;
    Ok(Some((stmt, parser.last_end().0 as usize)))
}

/// Locates `position` in `source`.
///
/// Returns the 1-based line number, the text of that line and the byte column
/// within it. Offsets past the end resolve to the end of the last line.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(source.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.to_string(), line_pos);
        }

        start = end;
        line_number += 1;
    }

    match source.split_inclusive('\n').last() {
        Some(line) if !line.ends_with('\n') => (line_number - 1, line.to_string(), line.len()),
        _ => (line_number, String::new(), 0),
    }
}

/// Renders `error` against `source` as a caret-annotated report.
pub fn format_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: UnexpectedToken (expected expression, found end of input)
        -> main.lv
           |
         1 | let a =
           | --------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", file));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_str, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::errors::ErrorKind;

    const SOURCE: &str = "Hello, world!\nfoo\n\n  Testing { }\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = get_line_at_position(SOURCE, 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = get_line_at_position(SOURCE, 29);
        assert_eq!(line_number, 4);
        assert_eq!(line, "  Testing { }\n");
        assert_eq!(line_pos, 10);
    }

    #[test]
    fn test_get_line_past_end_does_not_panic() {
        let (line_number, line, line_pos) = get_line_at_position("let x = ", 8);
        assert_eq!(line_number, 1);
        assert_eq!(line, "let x = ");
        assert_eq!(line_pos, 8);

        let (line_number, line, _) = get_line_at_position("a\n", 99);
        assert_eq!(line_number, 2);
        assert_eq!(line, "");
    }

    #[test]
    fn test_span_helpers() {
        let file = Rc::new(String::from("test.lv"));
        let outer = Span {
            start: Position(2, Rc::clone(&file)),
            end: Position(10, Rc::clone(&file)),
        };
        let inner = Span {
            start: Position(4, Rc::clone(&file)),
            end: Position(6, Rc::clone(&file)),
        };

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert_eq!(outer.len(), 8);
        assert_eq!(inner.text("0123456789"), "45");
        assert_eq!(inner.merge(&outer), outer);
    }

    #[test]
    fn test_format_error_points_at_missing_expression() {
        let source = "let x = ";
        let error = parse_source(source, Some(String::from("main.lv"))).unwrap_err();
        assert_eq!(error.get_kind(), ErrorKind::UnexpectedToken);

        let report = format_error(&error, source, "main.lv");
        let lines: Vec<&str> = report.lines().collect();

        assert!(lines[0].starts_with("Error: UnexpectedToken"));
        assert_eq!(lines[1], "-> main.lv");
        assert_eq!(lines[3], "1 | let x =");
        assert_eq!(lines[4], "  | --------^");
    }

    #[test]
    fn test_parse_statement_advances_cursor() {
        let source = "let a = 1; print(a)\n";
        let options = ParseOptions::default();

        let (first, next) = parse_statement(source, 0, &options).unwrap().unwrap();
        assert!(matches!(first, Statement::Assignment(_)));
        assert_eq!(next, 10);

        let (second, next) = parse_statement(source, next, &options).unwrap().unwrap();
        assert!(matches!(second, Statement::FuncCall(_)));
        assert_eq!(next, 19);

        assert!(parse_statement(source, next, &options).unwrap().is_none());
    }

    #[test]
    fn test_parse_statement_rejects_bad_offset() {
        let error = parse_statement("héllo()", 2, &ParseOptions::default()).unwrap_err();
        assert_eq!(error.get_kind(), ErrorKind::Lex);
    }
}
