//! Parser state and the top-level entry points.
//!
//! The parser walks a token stream with a single cursor. Expressions are
//! parsed Pratt-style through the NUD/LED tables in [`super::lookups`];
//! statements dispatch on their leading token through the statement table.

use std::rc::Rc;

use crate::{
    ast::{ast::Identifier, statements::Block},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, DEFAULT_MAX_NESTING_DEPTH, MK_TOKEN,
};

use super::{
    lookups::{Lookups, LOOKUPS},
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// Holds the token stream, the cursor into it and the recursion guard. The
/// lookup tables are process-wide and shared between instances.
pub struct Parser {
    /// The list of tokens to parse, always terminated by EOF
    tokens: Vec<Token>,
    /// Index of the current token
    pos: usize,
    /// The name of the source being parsed
    file: Rc<String>,
    lookups: &'static Lookups,
    nesting_depth: usize,
    max_nesting_depth: usize,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// An EOF token is appended if the stream does not already end in one.
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position(0, Rc::clone(&file)));

            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span {
                    start: end.clone(),
                    end,
                },
                false
            ));
        }

        Parser {
            tokens,
            pos: 0,
            file,
            lookups: &LOOKUPS,
            nesting_depth: 0,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    pub fn set_max_nesting_depth(&mut self, max: usize) {
        self.max_nesting_depth = max;
    }

    pub fn lookups(&self) -> &'static Lookups {
        self.lookups
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        let index = self.pos.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the token after the current one.
    pub fn peek_token(&self) -> &Token {
        let index = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// The last consumed token, or the current one if nothing has been
    /// consumed yet.
    pub fn previous_token(&self) -> &Token {
        if self.pos == 0 {
            return self.current_token();
        }
        &self.tokens[(self.pos - 1).min(self.tokens.len() - 1)]
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// The cursor never moves past EOF.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos.min(self.tokens.len() - 1);
        if self.tokens[index].kind != TokenKind::EOF {
            self.pos = index + 1;
        }
        &self.tokens[index]
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(&mut self, expected_kind: TokenKind, error: Option<Error>) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return match error {
                Some(error) => Err(error),
                None => Err(self.unexpected(expected_kind.describe())),
            };
        }

        Ok(self.advance().clone())
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Expects an identifier; `what` names it in the error, e.g. "parameter name".
    pub fn expect_identifier(&mut self, what: &str) -> Result<Identifier, Error> {
        if self.current_token_kind() != TokenKind::Identifier {
            return Err(self.unexpected(what));
        }

        let token = self.advance();
        Ok(Identifier {
            name: token.value.clone(),
            span: token.span.clone(),
        })
    }

    /// Builds an `UnexpectedToken` error pointing at the current token.
    pub fn unexpected(&self, expected: impl Into<String>) -> Error {
        let token = self.current_token();
        Error::unexpected_token(expected, token.describe(), token.span.clone())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Start of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// End of the last consumed token, or the start of the current one if
    /// nothing has been consumed yet.
    pub fn last_end(&self) -> Position {
        if self.pos == 0 {
            return self.get_position();
        }
        self.tokens[self.pos - 1].span.end.clone()
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        let end = self.last_end();
        if end.0 < start.0 {
            return Span {
                start: start.clone(),
                end: start,
            };
        }

        Span { start, end }
    }

    pub fn get_file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Enters one level of expression or block nesting.
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.nesting_depth >= self.max_nesting_depth {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    max: self.max_nesting_depth,
                },
                self.current_token().span.clone(),
            ));
        }

        self.nesting_depth += 1;
        Ok(())
    }

    pub fn leave_nesting(&mut self) {
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }
}

/// Parses a stream of tokens into the root block.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Block, Error> {
    let mut parser = Parser::new(tokens, file);
    parse_program(&mut parser)
}

/// Parses statements until EOF.
///
/// The root block spans from the start of the buffer to the end of input.
pub fn parse_program(parser: &mut Parser) -> Result<Block, Error> {
    let start = Position(0, parser.get_file());
    let mut statements = vec![];

    while parser.has_tokens() {
        statements.push(parse_stmt(parser)?);
    }

    let end = parser.current_token().span.end.clone();

    Ok(Block {
        statements,
        span: Span { start, end },
    })
}
