use crate::{ast::span::Span, lexer::error::LexError};
use std::fmt;
use thiserror::Error;

/// Syntax error reported by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub span: Span,
    pub expected: String,
    pub found: String,
    pub hint: Option<String>,
}

impl ParseError {
    pub fn new(span: Span, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            span,
            expected: expected.into(),
            found: found.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Of two failed alternatives, keep the one that got further.
    pub fn furthest(first: ParseError, second: ParseError) -> ParseError {
        if second.span.start > first.span.start {
            second
        } else {
            first
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: expected {}, found {}",
            self.span.line, self.span.column, self.expected, self.found
        )?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Well-formed syntax that cannot be turned into a filter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemanticError {
    #[error("function not found: {name}")]
    FunctionNotFound { name: String, span: Span },

    #[error("function {name} expects {expected} argument(s), found {found}")]
    WrongArity {
        name: String,
        expected: String,
        found: usize,
        span: Span,
    },

    #[error("{name} is a predicate and cannot be used as a value")]
    PredicateAsValue { name: String, span: Span },

    #[error("{name} does not return a boolean; compare its result instead")]
    NotAPredicate { name: String, span: Span },

    #[error("EWKT prefix SRID={srid} is not supported; geometry literals carry no CRS")]
    EwktSrid { srid: i64, span: Span },

    #[error("invalid interval bound: expected a date, timestamp, property, function or '..', found {found}")]
    InvalidIntervalBound { found: String, span: Span },
}

impl SemanticError {
    pub fn span(&self) -> Span {
        match self {
            SemanticError::FunctionNotFound { span, .. }
            | SemanticError::WrongArity { span, .. }
            | SemanticError::PredicateAsValue { span, .. }
            | SemanticError::NotAPredicate { span, .. }
            | SemanticError::EwktSrid { span, .. }
            | SemanticError::InvalidIntervalBound { span, .. } => *span,
        }
    }
}

/// Invalid compiler configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid function table: {0}")]
    InvalidFunctionTable(#[from] serde_json::Error),

    #[error("invalid signature for function {name}: {reason}")]
    InvalidSignature { name: String, reason: String },
}

/// Any failure while compiling CQL2 text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CqlError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(
        "Semantic error at line {line}, column {column}: {0}",
        line = .0.span().line,
        column = .0.span().column
    )]
    Semantic(#[from] SemanticError),
}

impl CqlError {
    pub fn span(&self) -> Span {
        match self {
            CqlError::Lex(err) => err.span(),
            CqlError::Parse(err) => err.span,
            CqlError::Semantic(err) => err.span(),
        }
    }

    /// Error message with the offending source line and a caret under the
    /// reported column.
    pub fn format_error(&self, source: &str) -> String {
        let span = self.span();
        let snippet = source.lines().nth(span.line.saturating_sub(1)).unwrap_or("");
        format!(
            "{}\n{}\n{}^",
            self,
            snippet,
            " ".repeat(span.column.saturating_sub(1))
        )
    }
}
