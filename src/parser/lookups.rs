use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::{
        ast::{Operator, UnOperator},
        expressions::Expression,
        statements::Statement,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, weakest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Or,
    And,
    Relational,
    Additive,
    Multiplicative,
    Power,
    Unary,
    Primary,
}

impl BindingPower {
    /// The next weaker binding power.
    pub fn weaker(self) -> Self {
        match self {
            BindingPower::Default | BindingPower::Or => BindingPower::Default,
            BindingPower::And => BindingPower::Or,
            BindingPower::Relational => BindingPower::And,
            BindingPower::Additive => BindingPower::Relational,
            BindingPower::Multiplicative => BindingPower::Additive,
            BindingPower::Power => BindingPower::Multiplicative,
            BindingPower::Unary => BindingPower::Power,
            BindingPower::Primary => BindingPower::Unary,
        }
    }
}

pub type StmtHandler = fn(&mut Parser) -> Result<Statement, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expression, Error>;
pub type LEDHandler = fn(&mut Parser, Expression, BindingPower) -> Result<Expression, Error>;

pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;

/// Dispatch tables shared by every parser instance.
///
/// Only infix tokens get an entry in `binding_power`, so the Pratt loop stops
/// at anything that can not continue an expression.
pub struct Lookups {
    pub stmt: StmtLookup,
    pub nud: NUDLookup,
    pub led: LEDLookup,
    pub binding_power: BPLookup,
}

impl Lookups {
    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power.insert(kind, binding_power);
        self.led.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt.insert(kind, stmt_fn);
    }
}

lazy_static! {
    pub static ref BINOP_PRECEDENCE: HashMap<Operator, BindingPower> = {
        let mut map = HashMap::new();
        map.insert(Operator::Or, BindingPower::Or);
        map.insert(Operator::And, BindingPower::And);
        map.insert(Operator::EQ, BindingPower::Relational);
        map.insert(Operator::Neq, BindingPower::Relational);
        map.insert(Operator::Lt, BindingPower::Relational);
        map.insert(Operator::Gt, BindingPower::Relational);
        map.insert(Operator::Leq, BindingPower::Relational);
        map.insert(Operator::Geq, BindingPower::Relational);
        map.insert(Operator::Add, BindingPower::Additive);
        map.insert(Operator::Sub, BindingPower::Additive);
        map.insert(Operator::Mul, BindingPower::Multiplicative);
        map.insert(Operator::Div, BindingPower::Multiplicative);
        map.insert(Operator::Mod, BindingPower::Multiplicative);
        map.insert(Operator::Pow, BindingPower::Power);
        map
    };

    pub static ref UNOPS: HashMap<TokenKind, UnOperator> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Not, UnOperator::Not);
        map.insert(TokenKind::Dash, UnOperator::Sub);
        map
    };

    pub static ref LOOKUPS: Lookups = create_token_lookups();
}

/// Maps an infix token to its binary operator.
pub fn binary_operator(kind: TokenKind) -> Option<Operator> {
    let op = match kind {
        TokenKind::Plus => Operator::Add,
        TokenKind::Dash => Operator::Sub,
        TokenKind::Star => Operator::Mul,
        TokenKind::Slash => Operator::Div,
        TokenKind::Percent => Operator::Mod,
        TokenKind::Caret => Operator::Pow,
        TokenKind::Equals => Operator::EQ,
        TokenKind::NotEquals => Operator::Neq,
        TokenKind::Less => Operator::Lt,
        TokenKind::Greater => Operator::Gt,
        TokenKind::LessEquals => Operator::Leq,
        TokenKind::GreaterEquals => Operator::Geq,
        TokenKind::And => Operator::And,
        TokenKind::Or => Operator::Or,
        _ => return None,
    };

    Some(op)
}

fn create_token_lookups() -> Lookups {
    let mut lookups = Lookups {
        stmt: HashMap::new(),
        nud: HashMap::new(),
        led: HashMap::new(),
        binding_power: HashMap::new(),
    };

    // Binary operators, precedence taken from BINOP_PRECEDENCE
    for kind in [
        TokenKind::Or,
        TokenKind::And,
        TokenKind::Equals,
        TokenKind::NotEquals,
        TokenKind::Less,
        TokenKind::Greater,
        TokenKind::LessEquals,
        TokenKind::GreaterEquals,
        TokenKind::Plus,
        TokenKind::Dash,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Percent,
        TokenKind::Caret,
    ] {
        if let Some(bp) = binary_operator(kind).and_then(|op| BINOP_PRECEDENCE.get(&op)) {
            lookups.led(kind, *bp, parse_binary_expr);
        }
    }

    // Unary
    lookups.nud(TokenKind::Dash, parse_unary_expr);
    lookups.nud(TokenKind::Not, parse_unary_expr);

    // Literals, symbols and grouping; suffix chains are attached here too
    lookups.nud(TokenKind::Number, parse_prefix_expr);
    lookups.nud(TokenKind::String, parse_prefix_expr);
    lookups.nud(TokenKind::True, parse_prefix_expr);
    lookups.nud(TokenKind::False, parse_prefix_expr);
    lookups.nud(TokenKind::Nil, parse_prefix_expr);
    lookups.nud(TokenKind::OpenBracket, parse_prefix_expr);
    lookups.nud(TokenKind::OpenCurly, parse_prefix_expr);
    lookups.nud(TokenKind::Identifier, parse_prefix_expr);
    lookups.nud(TokenKind::OpenParen, parse_prefix_expr);

    // Statements
    lookups.stmt(TokenKind::Let, parse_assignment_stmt);
    lookups.stmt(TokenKind::Do, parse_block_stmt);
    lookups.stmt(TokenKind::If, parse_if_stmt);
    lookups.stmt(TokenKind::While, parse_while_stmt);
    lookups.stmt(TokenKind::For, parse_for_stmt);
    lookups.stmt(TokenKind::Fun, parse_function_stmt);
    lookups.stmt(TokenKind::Class, parse_class_stmt);
    lookups.stmt(TokenKind::Return, parse_return_stmt);
    lookups.stmt(TokenKind::Import, parse_import_stmt);
    lookups.stmt(TokenKind::External, parse_import_stmt);

    lookups
}
