use crate::{
    ast::{
        ast::{Associativity, Node},
        expressions::{BinaryOp, ExprPrefix, ExprSuffix, Expression, PrefixExpr, UnaryOp},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    literals::parse_literal,
    lookups::{binary_operator, BindingPower, UNOPS},
    parser::Parser,
};

/// Parses an expression whose operators all bind tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expression, Error> {
    parser.enter_nesting()?;
    let result = parse_expr_inner(parser, bp);
    parser.leave_nesting();

    result
}

fn parse_expr_inner(parser: &mut Parser, bp: BindingPower) -> Result<Expression, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = match parser.lookups().nud.get(&token_kind) {
        Some(nud_fn) => *nud_fn,
        None => return Err(parser.unexpected("expression")),
    };

    let mut left = nud_fn(parser)?;

    // While the current token is an infix operator binding tighter than bp,
    // fold it into lhs
    while let Some(next_bp) = parser.lookups().binding_power.get(&parser.current_token_kind()).copied() {
        if next_bp <= bp {
            break;
        }

        let led_fn = match parser.lookups().led.get(&parser.current_token_kind()) {
            Some(led_fn) => *led_fn,
            None => break,
        };

        left = led_fn(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expression, bp: BindingPower) -> Result<Expression, Error> {
    let operator_token = parser.advance().clone();
    let op = match binary_operator(operator_token.kind) {
        Some(op) => op,
        None => {
            return Err(Error::unexpected_token(
                "binary operator",
                operator_token.describe(),
                operator_token.span,
            ))
        }
    };

    // Right-associative operators let an operator of the same strength
    // continue on the right.
    let rhs_bp = match op.associativity() {
        Associativity::Left => bp,
        Associativity::Right => bp.weaker(),
    };
    let right = parse_expr(parser, rhs_bp)?;

    Ok(Expression::BinaryOp(Box::new(BinaryOp {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        op,
        left,
        right,
    })))
}

pub fn parse_unary_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let operator_token = parser.advance().clone();
    let op = match UNOPS.get(&operator_token.kind) {
        Some(op) => *op,
        None => {
            return Err(Error::unexpected_token(
                "unary operator",
                operator_token.describe(),
                operator_token.span,
            ))
        }
    };

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expression::UnaryOp(Box::new(UnaryOp {
        span: Span {
            start: operator_token.span.start,
            end: operand.get_span().end.clone(),
        },
        op,
        operand,
    })))
}

/// Parses a literal, variable or parenthesized expression together with its
/// suffix chain.
///
/// Literals and variables without suffixes come back as plain
/// `Expression::Literal`/`Expression::Variable`.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let start = parser.get_position();
    let prefix = parse_expr_prefix(parser)?;
    let suffix_chain = parse_suffix_chain(parser)?;

    let prefix = match (prefix, suffix_chain.is_empty()) {
        (ExprPrefix::Literal(literal), true) => return Ok(Expression::Literal(literal)),
        (ExprPrefix::Variable(identifier), true) => return Ok(Expression::Variable(identifier)),
        (prefix, _) => prefix,
    };

    Ok(Expression::PrefixExpr(Box::new(PrefixExpr {
        prefix,
        suffix_chain,
        span: parser.span_from(start),
    })))
}

fn parse_expr_prefix(parser: &mut Parser) -> Result<ExprPrefix, Error> {
    match parser.current_token_kind() {
        TokenKind::Identifier => Ok(ExprPrefix::Variable(parser.expect_identifier("identifier")?)),
        TokenKind::OpenParen => {
            let start = parser.advance().span.start.clone();
            let expression = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::CloseParen)?;

            Ok(ExprPrefix::Parenthesized {
                expression,
                span: parser.span_from(start),
            })
        }
        _ => Ok(ExprPrefix::Literal(parse_literal(parser)?)),
    }
}

/// Collects `.field`, `[index]` and `(args)` suffixes. Calls and indexing
/// must start on the same line as the preceding token; member access may
/// continue on the next line.
fn parse_suffix_chain(parser: &mut Parser) -> Result<Vec<ExprSuffix>, Error> {
    let mut suffix_chain = vec![];

    loop {
        let token = parser.current_token();
        let (kind, newline_before) = (token.kind, token.newline_before);

        match kind {
            TokenKind::Dot => {
                parser.advance();
                suffix_chain.push(ExprSuffix::TableDot(parser.expect_identifier("field name")?));
            }
            TokenKind::OpenParen if !newline_before => {
                suffix_chain.push(parse_call_suffix(parser)?);
            }
            TokenKind::OpenBracket if !newline_before => {
                let start = parser.advance().span.start.clone();
                let index = parse_expr(parser, BindingPower::Default)?;
                parser.expect(TokenKind::CloseBracket)?;

                suffix_chain.push(ExprSuffix::TableIndex {
                    index,
                    span: parser.span_from(start),
                });
            }
            _ => break,
        }
    }

    Ok(suffix_chain)
}

fn parse_call_suffix(parser: &mut Parser) -> Result<ExprSuffix, Error> {
    let start = parser.advance().span.start.clone();
    let mut args = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expr(parser, BindingPower::Default)?);

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::CloseParen => break,
            _ => return Err(parser.unexpected("`,` or `)`")),
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(ExprSuffix::FuncCall {
        args,
        span: parser.span_from(start),
    })
}
