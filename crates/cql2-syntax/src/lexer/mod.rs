use crate::{
    lexer::{
        error::{LexError, LexErrorKind},
        token::{Token, TokenKind},
    },
    parser::profile::is_keyword,
};
use pest::{Parser, iterators::Pair};
use pest_derive::Parser;

pub mod error;
pub mod token;

#[derive(Parser)]
#[grammar = "grammar/cql2.pest"]
pub struct Cql2Lexer;

/// Tokenizes `input` into a stream terminated by [`TokenKind::Eof`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new().tokenize(input)
}

#[derive(Debug, Default)]
pub struct Lexer {
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new() -> Self {
        Lexer { tokens: Vec::new() }
    }

    pub fn tokenize(&mut self, input: &str) -> Result<Vec<Token>, LexError> {
        self.tokens.clear();

        let pairs = Cql2Lexer::parse(Rule::tokens, input)
            .map_err(|err| LexError::from_pest_error(err, input))?;

        for pair in pairs.flatten() {
            self.process_pair(pair)?;
        }

        let (line, column) = end_position(input);
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            line,
            column,
            span: (input.len(), input.len()),
        });

        Ok(std::mem::take(&mut self.tokens))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn process_pair(&mut self, pair: Pair<Rule>) -> Result<(), LexError> {
        let span = pair.as_span();
        let (line, column) = span.start_pos().line_col();
        let lexeme = span.as_str();

        let kind = match pair.as_rule() {
            // Keywords
            Rule::kw_and => TokenKind::And,
            Rule::kw_or => TokenKind::Or,
            Rule::kw_not => TokenKind::Not,
            Rule::kw_between => TokenKind::Between,
            Rule::kw_like => TokenKind::Like,
            Rule::kw_is => TokenKind::Is,
            Rule::kw_null => TokenKind::Null,
            Rule::kw_in => TokenKind::In,
            Rule::kw_true => TokenKind::True,
            Rule::kw_false => TokenKind::False,

            // Literals
            Rule::lit_number => TokenKind::Number(lexeme.to_string()),
            Rule::lit_string => TokenKind::String(unquote(lexeme, '\'')),
            Rule::unterminated_string => {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedString,
                    span.start(),
                    line,
                    column,
                ));
            }

            // Identifiers
            Rule::ident => TokenKind::Identifier(lexeme.to_string()),
            Rule::quoted_ident => TokenKind::QuotedIdentifier(unquote(lexeme, '"')),
            Rule::unterminated_ident => {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedIdentifier,
                    span.start(),
                    line,
                    column,
                ));
            }

            // Operators
            Rule::op_eq => TokenKind::Equal,
            Rule::op_ne => TokenKind::NotEqual,
            Rule::op_lt => TokenKind::LessThan,
            Rule::op_le => TokenKind::LessOrEqual,
            Rule::op_gt => TokenKind::GreaterThan,
            Rule::op_ge => TokenKind::GreaterOrEqual,
            Rule::op_bang => TokenKind::Bang,
            Rule::op_plus => TokenKind::Plus,
            Rule::op_minus => TokenKind::Minus,
            Rule::op_star => TokenKind::Star,
            Rule::op_slash => TokenKind::Slash,

            // Delimiters
            Rule::lparen => TokenKind::LeftParen,
            Rule::rparen => TokenKind::RightParen,
            Rule::lbracket => TokenKind::LeftBracket,
            Rule::rbracket => TokenKind::RightBracket,
            Rule::comma => TokenKind::Comma,
            Rule::semicolon => TokenKind::Semicolon,

            // Structural rules carry no token of their own
            _ => return Ok(()),
        };

        self.add_token(kind, lexeme, line, column, span.start(), span.end());
        Ok(())
    }

    fn add_token(
        &mut self,
        kind: TokenKind,
        lexeme: &str,
        line: usize,
        column: usize,
        start: usize,
        end: usize,
    ) {
        self.tokens.push(Token {
            kind,
            lexeme: lexeme.to_string(),
            line,
            column,
            span: (start, end),
        });
    }
}

/// True when `text` lexes as a single plain identifier segment, i.e. it can
/// be written without double quotes.
pub fn is_plain_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$');
    starts_ok
        && chars.all(|c| c.is_alphabetic() || c.is_ascii_digit() || matches!(c, '_' | '$' | ':'))
        && !is_keyword(text)
}

/// Strips the surrounding quotes and collapses doubled quote characters.
fn unquote(lexeme: &str, quote: char) -> String {
    let inner = &lexeme[quote.len_utf8()..lexeme.len() - quote.len_utf8()];
    let doubled: String = [quote, quote].iter().collect();
    inner.replace(&doubled, &quote.to_string())
}

fn end_position(input: &str) -> (usize, usize) {
    let line = input.matches('\n').count() + 1;
    let last = input.rsplit('\n').next().unwrap_or("");
    (line, last.chars().count() + 1)
}
