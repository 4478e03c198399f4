//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorKind, ErrorTip};
use crate::{Position, Span};
use std::rc::Rc;

fn span(start: u32, end: u32) -> Span {
    let file = Rc::new("test.lv".to_string());
    Span {
        start: Position(start, Rc::clone(&file)),
        end: Position(end, file),
    }
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        span(10, 11),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_kind(), ErrorKind::Lex);
}

#[test]
fn test_error_position() {
    let error = Error::unexpected_token("expression", "`)`", span(42, 43));

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_span().end.0, 43);
}

#[test]
fn test_unexpected_token_error() {
    let error = Error::unexpected_token("`end`", "end of input", span(0, 0));

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_kind(), ErrorKind::UnexpectedToken);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            expected: "`end`".to_string(),
            found: "end of input".to_string(),
        }
    );
}

#[test]
fn test_literal_error_kinds() {
    for internal in [
        ErrorImpl::NumberParseError { token: "1.2.3".to_string() },
        ErrorImpl::NumberOverflow { token: "1e999".to_string() },
        ErrorImpl::InvalidEscape { sequence: "\\q".to_string() },
        ErrorImpl::UnterminatedArray,
        ErrorImpl::UnterminatedMap,
    ] {
        assert_eq!(Error::new(internal, span(0, 1)).get_kind(), ErrorKind::Literal);
    }
}

#[test]
fn test_lex_error_kinds() {
    for internal in [
        ErrorImpl::UnterminatedString,
        ErrorImpl::UnterminatedComment,
        ErrorImpl::InvalidOffset { offset: 7 },
        ErrorImpl::SourceTooLarge { len: usize::MAX },
    ] {
        assert_eq!(Error::new(internal, span(0, 1)).get_kind(), ErrorKind::Lex);
    }
}

#[test]
fn test_nesting_too_deep_error() {
    let error = Error::new(ErrorImpl::NestingTooDeep { max: 64 }, span(3, 4));

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(error.get_kind(), ErrorKind::NestingTooDeep);
    assert_eq!(error.get_tip().to_string(), "nesting is limited to 64 levels");
}

#[test]
fn test_error_display_includes_location() {
    let error = Error::unexpected_token("expression", "`)`", span(5, 6));

    assert_eq!(
        error.to_string(),
        "unexpected token: expected expression, found `)` at test.lv:5"
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        span(0, 1),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::unexpected_token("`do`", "`}`", span(0, 1));

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "expected `do`, found `}`"),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_kind_display() {
    assert_eq!(ErrorKind::Lex.to_string(), "LexError");
    assert_eq!(ErrorKind::Literal.to_string(), "LiteralError");
    assert_eq!(ErrorKind::UnexpectedToken.to_string(), "UnexpectedToken");
    assert_eq!(ErrorKind::NestingTooDeep.to_string(), "NestingTooDeep");
}
