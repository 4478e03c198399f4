use tracing::trace;

use crate::{
    ast::{
        ast::Node,
        expressions::Expression,
        statements::{Assignment, Block, Class, For, Function, If, Import, LAssignment, Return, Statement, While},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// Parses one statement and any `;` terminators after it.
pub fn parse_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let kind = parser.current_token_kind();
    trace!(token = %kind, position = parser.get_position().0, "parsing statement");

    let stmt = if let Some(stmt_fn) = parser.lookups().stmt.get(&kind) {
        stmt_fn(parser)?
    } else if parser.lookups().nud.contains_key(&kind) {
        parse_expression_stmt(parser)?
    } else {
        return Err(parser.unexpected("statement"));
    };

    while parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(stmt)
}

/// Parses statements until one of `terminators`, which is left unconsumed.
pub fn parse_block_until(parser: &mut Parser, terminators: &[TokenKind]) -> Result<Block, Error> {
    parser.enter_nesting()?;
    let result = parse_block_body(parser, terminators);
    parser.leave_nesting();

    result
}

fn parse_block_body(parser: &mut Parser, terminators: &[TokenKind]) -> Result<Block, Error> {
    let start = parser.get_position();
    let mut statements = vec![];

    while !parser.current_token().is_one_of_many(terminators) {
        if !parser.has_tokens() {
            return Err(parser.unexpected(describe_kinds(terminators)));
        }

        statements.push(parse_stmt(parser)?);
    }

    Ok(Block {
        statements,
        span: parser.span_from(start),
    })
}

fn describe_kinds(kinds: &[TokenKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.describe())
        .collect::<Vec<String>>()
        .join(" or ")
}

// An expression in statement position is either the target of a
// re-assignment or a call.
fn parse_expression_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    let expr = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() == TokenKind::Assignment {
        let target = match into_assignment_target(expr) {
            Ok(target) => target,
            Err(expr) => {
                return Err(Error::unexpected_token(
                    "variable, field or index before `=`",
                    parser.previous_token().describe(),
                    expr.get_span().clone(),
                ))
            }
        };
        parser.advance();
        let value = parse_expr(parser, BindingPower::Default)?;

        return Ok(Statement::Reassignment(Assignment {
            target,
            value,
            span: parser.span_from(start),
        }));
    }

    let is_call = matches!(&expr, Expression::PrefixExpr(prefix) if prefix.is_call());
    if !is_call {
        return Err(parser.unexpected("function call or assignment"));
    }

    Ok(Statement::FuncCall(expr))
}

// Hands the expression back when it can not be assigned to.
fn into_assignment_target(expr: Expression) -> Result<LAssignment, Expression> {
    match expr {
        Expression::Variable(identifier) => Ok(LAssignment::Variable(identifier)),
        Expression::PrefixExpr(prefix) if prefix.is_member_access() => Ok(LAssignment::Member(*prefix)),
        other => Err(other),
    }
}

/// `let name = value`
pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.expect(TokenKind::Let)?.span.start;
    let name = parser.expect_identifier("variable name")?;

    parser.expect(TokenKind::Assignment)?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Statement::Assignment(Assignment {
        target: LAssignment::Variable(name),
        value,
        span: parser.span_from(start),
    }))
}

/// `do ... end`
pub fn parse_block_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.expect(TokenKind::Do)?.span.start;

    let mut block = parse_block_until(parser, &[TokenKind::End])?;
    parser.expect(TokenKind::End)?;
    block.span = parser.span_from(start);

    Ok(Statement::Block(block))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    Ok(Statement::If(parse_if(parser)?))
}

/// `if cond do ... [else ...] end`
///
/// `else if` is not special: the `if` is the first statement of the else
/// block and closes with its own `end`.
fn parse_if(parser: &mut Parser) -> Result<If, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;

    let cond = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Do)?;

    let stmts = parse_block_until(parser, &[TokenKind::Else, TokenKind::End])?;

    let else_statements = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(parse_block_until(parser, &[TokenKind::End])?)
    } else {
        None
    };
    parser.expect(TokenKind::End)?;

    Ok(If {
        cond,
        stmts,
        else_statements,
        span: parser.span_from(start),
    })
}

/// `while cond do ... end`
pub fn parse_while_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.expect(TokenKind::While)?.span.start;

    let cond = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Do)?;

    let block = parse_block_until(parser, &[TokenKind::End])?;
    parser.expect(TokenKind::End)?;

    Ok(Statement::While(While {
        cond,
        block,
        span: parser.span_from(start),
    }))
}

/// `for item in iterator do ... end`
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.expect(TokenKind::For)?.span.start;

    let iter_item = parser.expect_identifier("loop variable")?;
    parser.expect(TokenKind::In)?;
    let iterator = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Do)?;

    let block = parse_block_until(parser, &[TokenKind::End])?;
    parser.expect(TokenKind::End)?;

    Ok(Statement::For(For {
        iter_item,
        iterator,
        block,
        span: parser.span_from(start),
    }))
}

pub fn parse_function_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    Ok(Statement::Function(parse_function(parser)?))
}

/// `fun name(a, b) ... end`
fn parse_function(parser: &mut Parser) -> Result<Function, Error> {
    let start = parser.expect(TokenKind::Fun)?.span.start;
    let name = parser.expect_identifier("function name")?;

    parser.expect(TokenKind::OpenParen)?;
    let mut parameters = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        parameters.push(parser.expect_identifier("parameter name")?);

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
            }
            TokenKind::CloseParen => break,
            _ => return Err(parser.unexpected("`,` or `)`")),
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let block = parse_block_until(parser, &[TokenKind::End])?;
    parser.expect(TokenKind::End)?;

    Ok(Function {
        name,
        parameters,
        block,
        span: parser.span_from(start),
    })
}

/// `class Name fun ... end ... end`; only methods may appear in the body.
pub fn parse_class_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.expect(TokenKind::Class)?.span.start;
    let name = parser.expect_identifier("class name")?;

    let mut methods = vec![];
    loop {
        match parser.current_token_kind() {
            TokenKind::Fun => methods.push(parse_function(parser)?),
            TokenKind::End => break,
            _ => return Err(parser.unexpected("`fun` or `end`")),
        }

        while parser.current_token_kind() == TokenKind::Semicolon {
            parser.advance();
        }
    }

    parser.expect(TokenKind::End)?;

    Ok(Statement::Class(Class {
        name,
        methods,
        span: parser.span_from(start),
    }))
}

/// `return` takes a value only if an expression follows on the same line.
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.expect(TokenKind::Return)?.span.start;

    let next = parser.current_token();
    let has_value = !next.newline_before && parser.lookups().nud.contains_key(&next.kind);

    let value = if has_value {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(Statement::Return(Return {
        value,
        span: parser.span_from(start),
    }))
}

/// `[external] import a.b.c [as alias]`; `/` may separate segments too.
pub fn parse_import_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();

    let external = parser.current_token_kind() == TokenKind::External;
    if external {
        parser.advance();
    }
    parser.expect(TokenKind::Import)?;

    let mut path = vec![parser.expect_identifier("module name")?];
    while parser.current_token().is_one_of_many(&[TokenKind::Dot, TokenKind::Slash]) {
        parser.advance();
        path.push(parser.expect_identifier("module name")?);
    }

    let alias = if parser.current_token_kind() == TokenKind::As {
        parser.advance();
        Some(parser.expect_identifier("alias")?)
    } else {
        None
    };

    Ok(Statement::Import(Import {
        path,
        alias,
        external,
        span: parser.span_from(start),
    }))
}
