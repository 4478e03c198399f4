use std::fmt::Display;

use thiserror::Error;

use crate::{Position, Span};

/// A parse failure together with the span of the offending input.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} at {}:{}", .span.start.1, .span.start.0)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
}

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The tokenizer could not classify the input.
    Lex,
    /// A literal was recognised but its contents are malformed.
    Literal,
    /// The grammar expected something else at this point.
    UnexpectedToken,
    /// The recursion guard tripped.
    NestingTooDeep,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lex => write!(f, "LexError"),
            ErrorKind::Literal => write!(f, "LiteralError"),
            ErrorKind::UnexpectedToken => write!(f, "UnexpectedToken"),
            ErrorKind::NestingTooDeep => write!(f, "NestingTooDeep"),
        }
    }
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
        }
    }

    pub fn unexpected_token(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected: expected.into(),
                found: found.into(),
            },
            span,
        )
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_position(&self) -> &Position {
        &self.span.start
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::UnterminatedComment
            | ErrorImpl::InvalidOffset { .. }
            | ErrorImpl::SourceTooLarge { .. } => ErrorKind::Lex,
            ErrorImpl::NumberParseError { .. }
            | ErrorImpl::NumberOverflow { .. }
            | ErrorImpl::InvalidEscape { .. }
            | ErrorImpl::UnterminatedArray
            | ErrorImpl::UnterminatedMap => ErrorKind::Literal,
            ErrorImpl::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            ErrorImpl::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::InvalidOffset { .. } => "InvalidOffset",
            ErrorImpl::SourceTooLarge { .. } => "SourceTooLarge",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NumberOverflow { .. } => "NumberOverflow",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::UnterminatedArray => "UnterminatedArray",
            ErrorImpl::UnterminatedMap => "UnterminatedMap",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("missing closing quote"))
            }
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("block comment is missing `*/`"))
            }
            ErrorImpl::InvalidOffset { offset } => ErrorTip::Suggestion(format!(
                "offset {} is past the end or not on a character boundary",
                offset
            )),
            ErrorImpl::SourceTooLarge { .. } => ErrorTip::Suggestion(format!(
                "sources are limited to {} bytes",
                u32::MAX
            )),
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::NumberOverflow { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, it does not fit in a 64-bit float",
                token
            )),
            ErrorImpl::InvalidEscape { sequence } => {
                ErrorTip::Suggestion(format!("unknown escape sequence `{}`", sequence))
            }
            ErrorImpl::UnterminatedArray => {
                ErrorTip::Suggestion(String::from("array literal is missing `]`"))
            }
            ErrorImpl::UnterminatedMap => {
                ErrorTip::Suggestion(String::from("map literal is missing `}`"))
            }
            ErrorImpl::UnexpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("expected {}, found {}", expected, found))
            }
            ErrorImpl::NestingTooDeep { max } => ErrorTip::Suggestion(format!(
                "nesting is limited to {} levels",
                max
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("invalid source offset {offset}")]
    InvalidOffset { offset: usize },
    #[error("source too large ({len} bytes)")]
    SourceTooLarge { len: usize },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("number out of range: {token:?}")]
    NumberOverflow { token: String },
    #[error("invalid escape sequence: {sequence:?}")]
    InvalidEscape { sequence: String },
    #[error("unterminated array literal")]
    UnterminatedArray,
    #[error("unterminated map literal")]
    UnterminatedMap,
    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("nesting too deep (maximum {max} levels)")]
    NestingTooDeep { max: usize },
}
