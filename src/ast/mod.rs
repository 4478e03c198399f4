/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Node` trait, identifiers and operators
/// - expressions: Expression trees and suffix chains
/// - literals: Literal values
/// - statements: Statements and blocks
pub mod ast;
pub mod expressions;
pub mod literals;
pub mod statements;
