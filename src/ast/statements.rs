use std::slice::Iter;

use crate::Span;

use super::{
    ast::{Identifier, Node},
    expressions::{Expression, PrefixExpr},
};

/// A sequence of statements. The root of every parse is a Block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

impl Block {
    pub fn iter(&self) -> Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Node for Block {
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// Assignment target (l-value).
#[derive(Debug, Clone, PartialEq)]
pub enum LAssignment {
    Variable(Identifier),
    /// A suffix chain ending in `.field` or `[index]`.
    Member(PrefixExpr),
}

impl Node for LAssignment {
    fn get_span(&self) -> &Span {
        match self {
            LAssignment::Variable(identifier) => identifier.get_span(),
            LAssignment::Member(prefix) => prefix.get_span(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: LAssignment,
    pub value: Expression,
    pub span: Span,
}

/// If Statement
/// `else if` chains nest: the inner `If` is the only statement of
/// `else_statements`.
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub cond: Expression,
    pub stmts: Block,
    pub else_statements: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub cond: Expression,
    pub block: Block,
    pub span: Span,
}

/// For Statement
/// `for iter_item in iterator do ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub iter_item: Identifier,
    pub iterator: Expression,
    pub block: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub block: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: Identifier,
    pub methods: Vec<Function>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Option<Expression>,
    pub span: Span,
}

/// Import Statement
/// Paths are kept as written; nothing is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub path: Vec<Identifier>,
    pub alias: Option<Identifier>,
    pub external: bool,
    pub span: Span,
}

impl Import {
    /// The name the import binds: the alias, or the last path segment.
    pub fn binding(&self) -> Option<&Identifier> {
        self.alias.as_ref().or_else(|| self.path.last())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let name = value`
    Assignment(Assignment),
    /// `target = value` over an existing variable or member.
    Reassignment(Assignment),
    Block(Block),
    /// An expression evaluated for its effect; always a call.
    FuncCall(Expression),
    If(If),
    While(While),
    For(For),
    Function(Function),
    Class(Class),
    Return(Return),
    Import(Import),
}

impl Node for Statement {
    fn get_span(&self) -> &Span {
        match self {
            Statement::Assignment(assignment) | Statement::Reassignment(assignment) => {
                &assignment.span
            }
            Statement::Block(block) => &block.span,
            Statement::FuncCall(expression) => expression.get_span(),
            Statement::If(if_stmt) => &if_stmt.span,
            Statement::While(while_stmt) => &while_stmt.span,
            Statement::For(for_stmt) => &for_stmt.span,
            Statement::Function(function) => &function.span,
            Statement::Class(class) => &class.span,
            Statement::Return(return_stmt) => &return_stmt.span,
            Statement::Import(import) => &import.span,
        }
    }
}
