//! Literal recognition.
//!
//! Turns literal-shaped tokens into [`Literal`] values: numbers are parsed,
//! string escapes decoded, and array/map literals parsed element by element
//! through the expression parser.

use std::rc::Rc;

use crate::{
    ast::{
        expressions::Expression,
        literals::{Literal, LiteralKind},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{expr::parse_expr, lookups::BindingPower, parser::Parser};

pub fn parse_literal(parser: &mut Parser) -> Result<Literal, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.advance().clone();
            Ok(Literal {
                kind: LiteralKind::Number(parse_number(&token)?),
                span: token.span,
            })
        }
        TokenKind::String => {
            let token = parser.advance().clone();
            Ok(Literal {
                kind: LiteralKind::Str(decode_string(&token.value, &token.span)?),
                span: token.span,
            })
        }
        TokenKind::True | TokenKind::False => {
            let token = parser.advance();
            Ok(Literal {
                kind: LiteralKind::Boolean(token.kind == TokenKind::True),
                span: token.span.clone(),
            })
        }
        TokenKind::Nil => Ok(Literal {
            kind: LiteralKind::Nil,
            span: parser.advance().span.clone(),
        }),
        TokenKind::OpenBracket => parse_array(parser),
        TokenKind::OpenCurly => parse_map(parser),
        _ => Err(parser.unexpected("literal")),
    }
}

pub fn parse_number(token: &Token) -> Result<f64, Error> {
    let value: f64 = token.value.parse().map_err(|_| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.span.clone(),
        )
    })?;

    if !value.is_finite() {
        return Err(Error::new(
            ErrorImpl::NumberOverflow {
                token: token.value.clone(),
            },
            token.span.clone(),
        ));
    }

    Ok(value)
}

/// Decodes the escapes in the raw text of a string token. `span` covers the
/// token including its quotes.
pub fn decode_string(raw: &str, span: &Span) -> Result<String, Error> {
    let mut decoded = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();

    while let Some((index, c)) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }

        let escaped = chars.next().map(|(_, escaped)| escaped);
        let value = match escaped {
            Some('n') => Some('\n'),
            Some('t') => Some('\t'),
            Some('r') => Some('\r'),
            Some('0') => Some('\0'),
            Some('\\') => Some('\\'),
            Some('"') => Some('"'),
            Some('\'') => Some('\''),
            Some('x') => {
                let digits: String = chars.clone().take(2).map(|(_, digit)| digit).collect();
                match u8::from_str_radix(&digits, 16) {
                    Ok(byte) if digits.len() == 2 && digits.chars().all(|d| d.is_ascii_hexdigit()) => {
                        chars.nth(1);
                        Some(char::from(byte))
                    }
                    _ => None,
                }
            }
            _ => None,
        };

        match value {
            Some(value) => decoded.push(value),
            None => {
                let sequence = raw[index..]
                    .chars()
                    .take(if escaped == Some('x') { 4 } else { 2 })
                    .collect::<String>();
                return Err(Error::new(
                    ErrorImpl::InvalidEscape {
                        sequence: sequence.clone(),
                    },
                    escape_span(span, index, sequence.len()),
                ));
            }
        }
    }

    Ok(decoded)
}

// Offsets inside the raw text are shifted by one for the opening quote.
fn escape_span(token_span: &Span, index: usize, len: usize) -> Span {
    let file = Rc::clone(&token_span.start.1);
    let start = token_span.start.0 + 1 + index as u32;

    Span {
        start: Position(start, Rc::clone(&file)),
        end: Position(start + len as u32, file),
    }
}

/// Fails with `error` if the parser has run out of input inside a literal
/// opened at `start`.
fn check_unterminated(parser: &Parser, start: &Position, error: ErrorImpl) -> Result<(), Error> {
    if parser.has_tokens() {
        return Ok(());
    }

    Err(Error::new(
        error,
        Span {
            start: start.clone(),
            end: parser.get_position(),
        },
    ))
}

fn parse_array(parser: &mut Parser) -> Result<Literal, Error> {
    let start = parser.advance().span.start.clone();
    let mut elements: Vec<Expression> = vec![];

    loop {
        check_unterminated(parser, &start, ErrorImpl::UnterminatedArray)?;
        if parser.current_token_kind() == TokenKind::CloseBracket {
            break;
        }

        elements.push(parse_expr(parser, BindingPower::Default)?);

        check_unterminated(parser, &start, ErrorImpl::UnterminatedArray)?;
        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::CloseBracket => break,
            _ => return Err(parser.unexpected("`,` or `]`")),
        }
    }

    parser.expect(TokenKind::CloseBracket)?;

    Ok(Literal {
        kind: LiteralKind::Array(elements),
        span: parser.span_from(start),
    })
}

fn parse_map(parser: &mut Parser) -> Result<Literal, Error> {
    let start = parser.advance().span.start.clone();
    let mut entries: Vec<(Expression, Expression)> = vec![];

    loop {
        check_unterminated(parser, &start, ErrorImpl::UnterminatedMap)?;
        if parser.current_token_kind() == TokenKind::CloseCurly {
            break;
        }

        let key = parse_map_key(parser)?;

        check_unterminated(parser, &start, ErrorImpl::UnterminatedMap)?;
        parser.expect(TokenKind::Colon)?;

        check_unterminated(parser, &start, ErrorImpl::UnterminatedMap)?;
        let value = parse_expr(parser, BindingPower::Default)?;
        entries.push((key, value));

        check_unterminated(parser, &start, ErrorImpl::UnterminatedMap)?;
        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::CloseCurly => break,
            _ => return Err(parser.unexpected("`,` or `}`")),
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Literal {
        kind: LiteralKind::Map(entries),
        span: parser.span_from(start),
    })
}

// `{name: v}` keys are bare names, anything else is an expression.
fn parse_map_key(parser: &mut Parser) -> Result<Expression, Error> {
    if parser.current_token_kind() == TokenKind::Identifier
        && parser.peek_token().kind == TokenKind::Colon
    {
        let token = parser.advance();
        return Ok(Expression::Literal(Literal {
            kind: LiteralKind::Identifier(token.value.clone()),
            span: token.span.clone(),
        }));
    }

    parse_expr(parser, BindingPower::Default)
}
