use crate::{ast::span::Span, lexer::Rule};
use pest::error::{Error as PestError, InputLocation, LineColLocation};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("illegal character '{0}'")]
    IllegalCharacter(char),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated quoted identifier")]
    UnterminatedIdentifier,

    #[error("unexpected end of input")]
    UnexpectedEnd,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Lex error at line {line}, column {column}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Byte offset into the source text.
    pub position: usize,
    pub line: usize,
    pub column: usize,
}

impl LexError {
    pub fn new(kind: LexErrorKind, position: usize, line: usize, column: usize) -> Self {
        Self {
            kind,
            position,
            line,
            column,
        }
    }

    /// The token grammar accepts every well-formed token, so pest only fails
    /// where no token starts. Report the character found there.
    pub fn from_pest_error(err: PestError<Rule>, input: &str) -> Self {
        let position = match err.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        };
        let (line, column) = match err.line_col {
            LineColLocation::Pos((l, c)) => (l, c),
            LineColLocation::Span((l, c), _) => (l, c),
        };
        let kind = match input.get(position..).and_then(|rest| rest.chars().next()) {
            Some(ch) => LexErrorKind::IllegalCharacter(ch),
            None => LexErrorKind::UnexpectedEnd,
        };
        Self::new(kind, position, line, column)
    }

    pub fn span(&self) -> Span {
        Span::new(self.position, self.position + 1, self.line, self.column)
    }
}
