//! Parser module for building the AST.
//!
//! This module transforms a stream of tokens into a span-carrying AST. It
//! uses a Pratt parser for expressions with binding powers for precedence
//! and recursive descent for statements, and handles:
//!
//! - Statement parsing (assignments, functions, classes, control flow, imports)
//! - Expression parsing (binary and unary operators, suffix chains, literals)
//! - Literal recognition (numbers, strings with escapes, arrays, maps)
//! - Nesting limits and error reporting
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing, looked up from process-wide static tables.

pub mod expr;
pub mod literals;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod property_tests;
