use crate::Span;

use super::{
    ast::{Identifier, Node, Operator, UnOperator},
    literals::Literal,
};

/// Expression
/// Any value-producing construct. Operator precedence is fully encoded in the
/// shape of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Variable(Identifier),
    PrefixExpr(Box<PrefixExpr>),
    UnaryOp(Box<UnaryOp>),
    BinaryOp(Box<BinaryOp>),
}

impl Node for Expression {
    fn get_span(&self) -> &Span {
        match self {
            Expression::Literal(literal) => literal.get_span(),
            Expression::Variable(identifier) => identifier.get_span(),
            Expression::PrefixExpr(prefix) => prefix.get_span(),
            Expression::UnaryOp(unary) => unary.get_span(),
            Expression::BinaryOp(binary) => binary.get_span(),
        }
    }
}

/// Prefix Expression
/// A base term followed by its suffixes, e.g. `a.b[0](x)` or `(f)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub prefix: ExprPrefix,
    /// Applied left to right.
    pub suffix_chain: Vec<ExprSuffix>,
    pub span: Span,
}

impl PrefixExpr {
    /// True if the chain ends in a call, i.e. the expression can stand alone
    /// as a statement.
    pub fn is_call(&self) -> bool {
        matches!(self.suffix_chain.last(), Some(ExprSuffix::FuncCall { .. }))
    }

    /// True if the chain ends in `.field` or `[index]`.
    pub fn is_member_access(&self) -> bool {
        matches!(
            self.suffix_chain.last(),
            Some(ExprSuffix::TableDot(_)) | Some(ExprSuffix::TableIndex { .. })
        )
    }
}

impl Node for PrefixExpr {
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprPrefix {
    Literal(Literal),
    Variable(Identifier),
    /// The span includes the parentheses.
    Parenthesized { expression: Expression, span: Span },
}

impl Node for ExprPrefix {
    fn get_span(&self) -> &Span {
        match self {
            ExprPrefix::Literal(literal) => literal.get_span(),
            ExprPrefix::Variable(identifier) => identifier.get_span(),
            ExprPrefix::Parenthesized { span, .. } => span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprSuffix {
    /// `(args)`
    FuncCall { args: Vec<Expression>, span: Span },
    /// `[index]`
    TableIndex { index: Expression, span: Span },
    /// `.field`
    TableDot(Identifier),
}

impl Node for ExprSuffix {
    fn get_span(&self) -> &Span {
        match self {
            ExprSuffix::FuncCall { span, .. } => span,
            ExprSuffix::TableIndex { span, .. } => span,
            ExprSuffix::TableDot(identifier) => identifier.get_span(),
        }
    }
}

/// Unary Operation
/// Negative number literals are kept as `Sub` applied to the literal.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub op: UnOperator,
    pub operand: Expression,
    pub span: Span,
}

impl Node for UnaryOp {
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub op: Operator,
    pub left: Expression,
    pub right: Expression,
    pub span: Span,
}

impl Node for BinaryOp {
    fn get_span(&self) -> &Span {
        &self.span
    }
}
