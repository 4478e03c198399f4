//! Property-based tests for the parser.
//!
//! Inputs are either arbitrary printable text or programs stitched together
//! from grammar fragments, so both the error paths and the deep paths of the
//! parser are exercised.
//!
//! Properties tested:
//! 1. Parsing never panics, whatever the input
//! 2. Parsing the same input twice gives the same result
//! 3. Every span of a successful parse lies inside the source and inside
//!    the span of its parent

use proptest::prelude::*;

use crate::{
    ast::{
        ast::Node,
        expressions::{ExprPrefix, ExprSuffix, Expression},
        literals::{Literal, LiteralKind},
        statements::{Block, LAssignment, Statement},
    },
    parse_source, Span,
};

const FRAGMENTS: &[&str] = &[
    "let x = 1\n",
    "x = x + 1\n",
    "print(\"hi\")\n",
    "obj.field[0](a, b)\n",
    "if a < b do f() else if c do g() else h() end end\n",
    "if a do f() else\n  if b do g() end\n  h()\nend\n",
    "while i <= 10 do i = i + 1 end\n",
    "for item in items do print(item) end\n",
    "fun add(a, b) return a + b end\n",
    "class Point fun new(x) self.x = x end end\n",
    "import lib.math as m\n",
    "external import frosch/handler\n",
    "let m = {k: [1, 2,], \"s\": nil}\n",
    "let p = -2 ^ 3 ^ -1 % 4\n",
    "do let y = not true or false end\n",
    "return\n",
    "let s = 'esc\\n\\x41'\n",
    "// comment\n",
    "/* block */",
    "(",
    ")",
    "end\n",
    "let = \n",
    "\"unterminated",
    "[1, 2",
    ";",
];

fn fragment_program() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..12).prop_map(|parts| parts.concat())
}

fn source_input() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{0,200}",
        fragment_program(),
        // A valid program cut off at an arbitrary character
        (fragment_program(), any::<prop::sample::Index>()).prop_map(|(program, index)| {
            let chars: Vec<char> = program.chars().collect();
            if chars.is_empty() {
                return program;
            }
            chars[..index.index(chars.len())].iter().collect()
        }),
    ]
}

fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: ProptestConfig::default().cases.max(512),
        ..ProptestConfig::default()
    }
}

fn check_span(span: &Span, parent: &Span, len: u32) -> Result<(), TestCaseError> {
    prop_assert!(span.start.0 <= span.end.0, "inverted span {:?}", span);
    prop_assert!(span.end.0 <= len, "span {:?} past end {}", span, len);
    prop_assert!(parent.contains(span), "span {:?} outside parent {:?}", span, parent);
    Ok(())
}

fn check_block(block: &Block, parent: &Span, len: u32) -> Result<(), TestCaseError> {
    check_span(&block.span, parent, len)?;
    for stmt in block.iter() {
        check_statement(stmt, &block.span, len)?;
    }
    Ok(())
}

fn check_statement(stmt: &Statement, parent: &Span, len: u32) -> Result<(), TestCaseError> {
    let span = stmt.get_span();
    check_span(span, parent, len)?;

    match stmt {
        Statement::Assignment(assignment) | Statement::Reassignment(assignment) => {
            match &assignment.target {
                LAssignment::Variable(name) => check_span(&name.span, span, len)?,
                LAssignment::Member(prefix) => {
                    check_expression(&Expression::PrefixExpr(Box::new(prefix.clone())), span, len)?
                }
            }
            check_expression(&assignment.value, span, len)?;
        }
        Statement::Block(block) => check_block(block, span, len)?,
        Statement::FuncCall(expression) => check_expression(expression, span, len)?,
        Statement::If(if_stmt) => {
            check_expression(&if_stmt.cond, span, len)?;
            check_block(&if_stmt.stmts, span, len)?;
            if let Some(else_block) = &if_stmt.else_statements {
                check_block(else_block, span, len)?;
            }
        }
        Statement::While(while_stmt) => {
            check_expression(&while_stmt.cond, span, len)?;
            check_block(&while_stmt.block, span, len)?;
        }
        Statement::For(for_stmt) => {
            check_span(&for_stmt.iter_item.span, span, len)?;
            check_expression(&for_stmt.iterator, span, len)?;
            check_block(&for_stmt.block, span, len)?;
        }
        Statement::Function(function) => {
            for parameter in &function.parameters {
                check_span(&parameter.span, span, len)?;
            }
            check_block(&function.block, span, len)?;
        }
        Statement::Class(class) => {
            for method in &class.methods {
                check_span(&method.span, span, len)?;
                check_block(&method.block, &method.span, len)?;
            }
        }
        Statement::Return(ret) => {
            if let Some(value) = &ret.value {
                check_expression(value, span, len)?;
            }
        }
        Statement::Import(import) => {
            for segment in import.path.iter().chain(import.alias.iter()) {
                check_span(&segment.span, span, len)?;
            }
        }
    }

    Ok(())
}

fn check_literal(literal: &Literal, parent: &Span, len: u32) -> Result<(), TestCaseError> {
    check_span(&literal.span, parent, len)?;

    match &literal.kind {
        LiteralKind::Array(elements) => {
            for element in elements {
                check_expression(element, &literal.span, len)?;
            }
        }
        LiteralKind::Map(entries) => {
            for (key, value) in entries {
                check_expression(key, &literal.span, len)?;
                check_expression(value, &literal.span, len)?;
            }
        }
        _ => {}
    }

    Ok(())
}

fn check_expression(expression: &Expression, parent: &Span, len: u32) -> Result<(), TestCaseError> {
    let span = expression.get_span();
    check_span(span, parent, len)?;

    match expression {
        Expression::Literal(literal) => check_literal(literal, parent, len)?,
        Expression::Variable(_) => {}
        Expression::PrefixExpr(prefix) => {
            match &prefix.prefix {
                ExprPrefix::Literal(literal) => check_literal(literal, span, len)?,
                ExprPrefix::Variable(name) => check_span(&name.span, span, len)?,
                ExprPrefix::Parenthesized { expression, span: group } => {
                    check_span(group, span, len)?;
                    check_expression(expression, group, len)?;
                }
            }

            for suffix in &prefix.suffix_chain {
                match suffix {
                    ExprSuffix::FuncCall { args, span: call } => {
                        check_span(call, span, len)?;
                        for arg in args {
                            check_expression(arg, call, len)?;
                        }
                    }
                    ExprSuffix::TableIndex { index, span: brackets } => {
                        check_span(brackets, span, len)?;
                        check_expression(index, brackets, len)?;
                    }
                    ExprSuffix::TableDot(field) => check_span(&field.span, span, len)?,
                }
            }
        }
        Expression::UnaryOp(unary) => check_expression(&unary.operand, span, len)?,
        Expression::BinaryOp(binary) => {
            check_expression(&binary.left, span, len)?;
            check_expression(&binary.right, span, len)?;
        }
    }

    Ok(())
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Property 1: the parser returns instead of panicking.
    #[test]
    fn parser_never_panics(input in source_input()) {
        let _ = parse_source(&input, None);
    }

    /// Property 2: parsing is a pure function of the input.
    #[test]
    fn parser_is_deterministic(input in source_input()) {
        let first = parse_source(&input, None);
        let second = parse_source(&input, None);
        prop_assert_eq!(first, second);
    }

    /// Property 3: spans nest and stay within the source.
    #[test]
    fn spans_nest_within_source(input in fragment_program()) {
        if let Ok(block) = parse_source(&input, None) {
            let len = input.len() as u32;
            prop_assert_eq!(block.span.start.0, 0);
            for stmt in block.iter() {
                check_statement(stmt, &block.span, len)?;
            }
        }
    }

    /// Errors always point inside the buffer.
    #[test]
    fn error_spans_stay_within_source(input in source_input()) {
        if let Err(error) = parse_source(&input, None) {
            let span = error.get_span();
            prop_assert!(span.start.0 <= span.end.0);
            prop_assert!(span.end.0 as usize <= input.len());
        }
    }
}
