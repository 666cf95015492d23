//! Compiler for OGC CQL2 text filters.
//!
//! Text goes through three stages: the [`lexer`] turns it into tokens, the
//! [`parser`] builds an untyped syntax tree and the [`semantic`] builder
//! resolves functions and literals into nodes made by a
//! [`FilterFactory`](cql2_model::FilterFactory).

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod semantic;

pub use compiler::{Compiler, CompilerConfig};
pub use errors::{ConfigError, CqlError, ParseError, SemanticError};
pub use lexer::error::LexError;
pub use parser::profile::{GrammarProfile, LegacySyntax};
pub use semantic::functions::{FunctionKind, FunctionRegistry, FunctionSignature};

use cql2_model::{Expression, Filter};

/// Compiles a filter with the default CQL2 profile and function set.
pub fn parse_filter(text: &str) -> Result<Filter, CqlError> {
    Compiler::default().compile_filter(text)
}

/// Compiles a value expression with the default CQL2 profile and function set.
pub fn parse_expression(text: &str) -> Result<Expression, CqlError> {
    Compiler::default().compile_expression(text)
}
