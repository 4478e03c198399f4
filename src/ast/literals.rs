use crate::Span;

use super::{ast::Node, expressions::Expression};

/// Literal
/// A constant value written directly in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralKind {
    /// Decoded string contents, escapes already applied.
    Str(String),
    Number(f64),
    Boolean(bool),
    Nil,
    /// A bare name used as a map key, as in `{key: 1}`.
    Identifier(String),
    Array(Vec<Expression>),
    /// Key/value pairs in source order.
    Map(Vec<(Expression, Expression)>),
}

impl Node for Literal {
    fn get_span(&self) -> &Span {
        &self.span
    }
}
