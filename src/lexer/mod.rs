//! Lexical analysis for liva source.
//!
//! This module turns source text into a stream of tokens for parsing. It
//! handles:
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Recognition of keywords, case-insensitive literal words and identifiers
//! - Byte spans and line-break flags on every token
//! - Line comments, block comments and whitespace

pub mod lexer;
pub mod tokens;
