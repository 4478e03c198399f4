//! Error types and error handling for the parser.
//!
//! This module defines the error values produced while tokenizing and
//! parsing. It includes:
//!
//! - Error structures carrying the offending source span
//! - Specific error variants grouped into lex, literal, grammar and
//!   nesting categories
//! - Short suggestions used when rendering diagnostics

pub mod errors;

#[cfg(test)]
mod tests;
