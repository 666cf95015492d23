//! Recursive-descent parser from tokens to the untyped syntax tree.

use crate::{
    ast::{
        expr::{Expr, ExprKind},
        literal::Literal,
        predicate::{Predicate, PredicateKind},
        property::PropertyPath,
        span::Span,
    },
    errors::ParseError,
    lexer::token::{Token, TokenKind},
    parser::profile::{GrammarProfile, LegacySyntax, is_geometry_keyword, legacy_hint},
    resolver::{self, ResolveError},
};
use cql2_model::{ArithmeticOp, ComparisonOp, Geometry, WktReader};

pub mod profile;

pub type ParseResult<T> = Result<T, ParseError>;

const SPATIAL_PREFIX: &str = "S_";
const TEMPORAL_PREFIX: &str = "T_";

/// True for names of the `S_*` and `T_*` predicate families.
pub fn is_predicate_function(name: &str) -> bool {
    let prefix = name.get(..2).unwrap_or("");
    prefix.eq_ignore_ascii_case(SPATIAL_PREFIX) || prefix.eq_ignore_ascii_case(TEMPORAL_PREFIX)
}

#[derive(Clone, Copy)]
struct Checkpoint {
    pos: usize,
    depth: usize,
}

pub struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    profile: &'a GrammarProfile,
    wkt: &'a dyn WktReader,
    eof: Token,
}

impl<'a> Parser<'a> {
    pub fn new(
        source: &'a str,
        tokens: &'a [Token],
        profile: &'a GrammarProfile,
        wkt: &'a dyn WktReader,
    ) -> Self {
        let eof = Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            line: 1,
            column: source.len() + 1,
            span: (source.len(), source.len()),
        };
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            profile,
            wkt,
            eof,
        }
    }

    /// Parses a complete boolean filter.
    pub fn parse_filter(&mut self) -> ParseResult<Predicate> {
        let predicate = self.or_predicate()?;
        self.expect_end()?;
        Ok(predicate)
    }

    /// Parses a complete value expression.
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        let expr = self.expression()?;
        self.expect_end()?;
        Ok(expr)
    }

    // ---- token helpers ----

    fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> &Token {
        self.tokens.get(self.pos + n).unwrap_or(&self.eof)
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(expected))
        }
    }

    fn error_here(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError::new(token.to_span(), expected, token.describe())
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: &Token) -> Span {
        let end = match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(last) => last.span.1,
            None => start.span.1,
        };
        Span::new(start.span.0, end.max(start.span.1), start.line, start.column)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            depth: self.depth,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.depth = checkpoint.depth;
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.profile.max_depth {
            return Err(self
                .error_here("shallower nesting")
                .with_hint(format!("nesting exceeds {} levels", self.profile.max_depth)));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn expect_end(&self) -> ParseResult<()> {
        if self.check(&TokenKind::Eof) {
            return Ok(());
        }
        let mut err = self.error_here("end of input");
        if let TokenKind::Identifier(word) = self.peek_kind() {
            if let Some(hint) = legacy_hint(word) {
                err = err.with_hint(hint);
            }
        }
        Err(err)
    }

    // ---- boolean grammar ----

    fn or_predicate(&mut self) -> ParseResult<Predicate> {
        let first = self.and_predicate()?;
        if !self.check(&TokenKind::Or) {
            return Ok(first);
        }
        let mut span = first.span;
        let mut clauses = vec![first];
        while self.eat(&TokenKind::Or) {
            let clause = self.and_predicate()?;
            span = span.to(clause.span);
            clauses.push(clause);
        }
        Ok(Predicate::new(PredicateKind::Or(clauses), span))
    }

    fn and_predicate(&mut self) -> ParseResult<Predicate> {
        let first = self.not_predicate()?;
        if !self.check(&TokenKind::And) {
            return Ok(first);
        }
        let mut span = first.span;
        let mut clauses = vec![first];
        while self.eat(&TokenKind::And) {
            let clause = self.not_predicate()?;
            span = span.to(clause.span);
            clauses.push(clause);
        }
        Ok(Predicate::new(PredicateKind::And(clauses), span))
    }

    fn not_predicate(&mut self) -> ParseResult<Predicate> {
        if !self.check(&TokenKind::Not) {
            return self.boolean_primary();
        }
        let start = self.advance();
        self.enter()?;
        let inner = self.not_predicate()?;
        self.leave();
        let span = self.span_from(&start);
        Ok(Predicate::new(PredicateKind::Not(Box::new(inner)), span))
    }

    /// A parenthesized filter or a single predicate. An opening parenthesis
    /// may also start an arithmetic operand, so a group that fails to parse,
    /// or is followed by a predicate operator, is re-read as a predicate.
    fn boolean_primary(&mut self) -> ParseResult<Predicate> {
        if let Some(close) = self.group_close()? {
            let checkpoint = self.checkpoint();
            match self.grouped_predicate(&close) {
                Ok(group) if !self.at_predicate_operator() => return Ok(group),
                Ok(_) => self.restore(checkpoint),
                Err(group_err) => {
                    self.restore(checkpoint);
                    return self
                        .predicate()
                        .map_err(|err| ParseError::furthest(group_err, err));
                }
            }
        }
        self.predicate()
    }

    fn group_close(&self) -> ParseResult<Option<TokenKind>> {
        match self.peek_kind() {
            TokenKind::LeftParen => Ok(Some(TokenKind::RightParen)),
            TokenKind::LeftBracket if self.profile.allows(LegacySyntax::BRACKET_GROUPING) => {
                Ok(Some(TokenKind::RightBracket))
            }
            TokenKind::LeftBracket => Err(self
                .error_here("'('")
                .with_hint("bracket grouping is not part of CQL2; use parentheses")),
            _ => Ok(None),
        }
    }

    fn grouped_predicate(&mut self, close: &TokenKind) -> ParseResult<Predicate> {
        self.advance();
        self.enter()?;
        let inner = self.or_predicate()?;
        self.expect(close, &format!("'{close}'"))?;
        self.leave();
        Ok(inner)
    }

    fn at_predicate_operator(&self) -> bool {
        match self.peek_kind() {
            kind if kind.is_comparison() => true,
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Between
            | TokenKind::Like
            | TokenKind::Is
            | TokenKind::In
            | TokenKind::Bang => true,
            TokenKind::Not => matches!(
                self.peek_nth(1).kind,
                TokenKind::Between | TokenKind::Like | TokenKind::In
            ),
            TokenKind::Identifier(word) => legacy_hint(word).is_some(),
            _ => false,
        }
    }

    fn predicate(&mut self) -> ParseResult<Predicate> {
        self.reject_removed_predicate()?;
        let start = self.peek().clone();
        let value = self.expression()?;

        let value = match self.predicate_call(value) {
            Ok(call) => return Ok(call),
            Err(value) => value,
        };

        let kind = match self.peek_kind().clone() {
            kind if kind.is_comparison() => {
                self.advance();
                let right = self.expression()?;
                PredicateKind::Comparison {
                    left: value,
                    op: comparison_op(&kind),
                    right,
                }
            }
            TokenKind::Not => {
                self.advance();
                self.negatable_predicate(value, true)?
            }
            TokenKind::Is => {
                self.advance();
                let negated = self.eat(&TokenKind::Not);
                self.expect(&TokenKind::Null, "NULL")?;
                PredicateKind::IsNull { value, negated }
            }
            TokenKind::Bang => {
                return Err(self
                    .error_here("comparison operator")
                    .with_hint("use '<>' for inequality and NOT for negation"));
            }
            _ => self.negatable_predicate(value, false)?,
        };
        Ok(Predicate::new(kind, self.span_from(&start)))
    }

    /// BETWEEN, LIKE and IN, after an optional NOT has been consumed.
    fn negatable_predicate(&mut self, value: Expr, negated: bool) -> ParseResult<PredicateKind> {
        match self.peek_kind().clone() {
            TokenKind::Between => {
                self.advance();
                let low = self.expression()?;
                self.expect(&TokenKind::And, "AND")?;
                let high = self.expression()?;
                Ok(PredicateKind::Between {
                    value,
                    low,
                    high,
                    negated,
                })
            }
            TokenKind::Like => {
                self.advance();
                self.like_pattern(value, true, negated)
            }
            TokenKind::Identifier(word)
                if word.eq_ignore_ascii_case("ILIKE")
                    && self.profile.allows(LegacySyntax::ILIKE) =>
            {
                self.advance();
                self.like_pattern(value, false, negated)
            }
            TokenKind::In => {
                self.advance();
                let choices = self.in_list()?;
                Ok(PredicateKind::In {
                    value,
                    choices,
                    negated,
                })
            }
            other => {
                let expected = if negated {
                    "BETWEEN, LIKE or IN"
                } else {
                    "comparison operator or predicate"
                };
                let err = self.error_here(expected);
                match other {
                    TokenKind::Identifier(word) => match legacy_hint(&word) {
                        Some(hint) => Err(err.with_hint(hint)),
                        None => Err(err),
                    },
                    _ => Err(err),
                }
            }
        }
    }

    fn like_pattern(
        &mut self,
        value: Expr,
        match_case: bool,
        negated: bool,
    ) -> ParseResult<PredicateKind> {
        match self.peek_kind().clone() {
            TokenKind::String(pattern) => {
                self.advance();
                Ok(PredicateKind::Like {
                    value,
                    pattern,
                    match_case,
                    negated,
                })
            }
            _ => Err(self.error_here("string pattern")),
        }
    }

    fn in_list(&mut self) -> ParseResult<Vec<Expr>> {
        self.expect(&TokenKind::LeftParen, "'('")?;
        self.enter()?;
        let mut choices = vec![self.expression()?];
        while self.eat(&TokenKind::Comma) {
            choices.push(self.expression()?);
        }
        self.expect(&TokenKind::RightParen, "',' or ')'")?;
        self.leave();
        Ok(choices)
    }

    /// A function call standing alone is a predicate call; the builder
    /// decides whether the function returns a boolean. Hands the value back
    /// when it is anything else.
    fn predicate_call(&self, value: Expr) -> Result<Predicate, Expr> {
        if !self.ends_predicate(0) {
            return Err(value);
        }
        match value.kind {
            ExprKind::FunctionCall { name, args } => Ok(Predicate::new(
                PredicateKind::Function { name, args },
                value.span,
            )),
            kind => Err(Expr::new(kind, value.span)),
        }
    }

    fn reject_removed_predicate(&self) -> ParseResult<()> {
        match self.peek_kind() {
            TokenKind::In => Err(self
                .error_here("expression")
                .with_hint("feature id predicates are not part of CQL2; IN needs a left-hand value")),
            TokenKind::Identifier(word)
                if (word.eq_ignore_ascii_case("INCLUDE") || word.eq_ignore_ascii_case("EXCLUDE"))
                    && self.ends_predicate(1) =>
            {
                Err(self
                    .error_here("predicate")
                    .with_hint("INCLUDE and EXCLUDE are not part of CQL2; use 1 = 1 or 1 = 0"))
            }
            _ => Ok(()),
        }
    }

    fn ends_predicate(&self, n: usize) -> bool {
        matches!(
            self.peek_nth(n).kind,
            TokenKind::Eof
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::RightParen
                | TokenKind::RightBracket
        )
    }

    // ---- value grammar ----

    pub(crate) fn expression(&mut self) -> ParseResult<Expr> {
        self.additive()
    }

    fn additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.multiplicative()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => ArithmeticOp::Add,
                TokenKind::Minus => ArithmeticOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.multiplicative()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    fn multiplicative(&mut self) -> ParseResult<Expr> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => ArithmeticOp::Mul,
                TokenKind::Slash => ArithmeticOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.unary()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    /// A sign in front of a number is part of the literal; in front of
    /// anything else `-x` reads as `-1 * x`.
    fn unary(&mut self) -> ParseResult<Expr> {
        let negate = match self.peek_kind() {
            TokenKind::Minus => true,
            TokenKind::Plus => false,
            _ => return self.primary(),
        };
        let sign = self.advance();

        if let TokenKind::Number(_) = self.peek_kind() {
            let literal = self.number_value()?;
            let literal = if negate { literal.negated() } else { literal };
            return Ok(Expr::literal(literal, self.span_from(&sign)));
        }

        self.enter()?;
        let operand = self.unary()?;
        self.leave();
        if !negate {
            return Ok(operand);
        }
        let minus_one = Expr::literal(Literal::Integer(-1), sign.to_span());
        Ok(Expr::binary(minus_one, ArithmeticOp::Mul, operand))
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();
        match &token.kind {
            TokenKind::Number(_) => self.number_literal(),
            TokenKind::String(text) => {
                self.advance();
                let literal = match resolver::parse_color(text) {
                    Some(color) if self.profile.color_literals => Literal::Color(color),
                    _ => Literal::String(text.clone()),
                };
                Ok(Expr::literal(literal, token.to_span()))
            }
            TokenKind::True | TokenKind::False => {
                self.advance();
                let value = token.kind == TokenKind::True;
                Ok(Expr::literal(Literal::Boolean(value), token.to_span()))
            }
            TokenKind::LeftParen => self.parenthesized(&TokenKind::RightParen),
            TokenKind::LeftBracket if self.profile.allows(LegacySyntax::BRACKET_GROUPING) => {
                self.parenthesized(&TokenKind::RightBracket)
            }
            TokenKind::LeftBracket => Err(self
                .error_here("expression")
                .with_hint("bracket grouping is not part of CQL2; use parentheses")),
            TokenKind::QuotedIdentifier(name) => {
                self.advance();
                let path = PropertyPath::quoted(name, token.to_span());
                Ok(Expr::new(ExprKind::Property(path), token.to_span()))
            }
            TokenKind::Identifier(name) => self.identifier_expression(name),
            TokenKind::Null => Err(self
                .error_here("expression")
                .with_hint("compare against NULL with IS NULL")),
            _ => Err(self.error_here("expression")),
        }
    }

    fn parenthesized(&mut self, close: &TokenKind) -> ParseResult<Expr> {
        let open = self.advance();
        self.enter()?;
        let inner = self.expression()?;
        self.expect(close, &format!("'{close}'"))?;
        self.leave();
        Ok(Expr::new(inner.kind, self.span_from(&open)))
    }

    fn identifier_expression(&mut self, name: &str) -> ParseResult<Expr> {
        let upper = name.to_ascii_uppercase();

        if upper == "SRID" && self.at_ewkt_prefix() {
            return self.ewkt_geometry();
        }
        if is_geometry_keyword(&upper) && self.geometry_follows() {
            return self.geometry_literal(None);
        }
        if self.peek_nth(1).kind != TokenKind::LeftParen {
            let token = self.advance();
            let path = PropertyPath::dotted(name, token.to_span());
            return Ok(Expr::new(ExprKind::Property(path), token.to_span()));
        }

        match upper.as_str() {
            "ENVELOPE" => self.envelope_literal(),
            "DATE" => self.date_literal(),
            "TIMESTAMP" => self.timestamp_literal(),
            "INTERVAL" => self.interval_literal(),
            _ => self.function_call(name),
        }
    }

    fn function_call(&mut self, name: &str) -> ParseResult<Expr> {
        if self.profile.rejects_function(name) {
            return Err(self.error_here("expression or predicate").with_hint(format!(
                "{} is not part of CQL2; use the S_* spatial functions",
                name.to_ascii_uppercase()
            )));
        }
        let start = self.advance();
        self.expect(&TokenKind::LeftParen, "'('")?;
        self.enter()?;
        let mut args = Vec::new();
        if !self.eat(&TokenKind::RightParen) {
            args.push(self.expression()?);
            while self.eat(&TokenKind::Comma) {
                args.push(self.expression()?);
            }
            self.expect(&TokenKind::RightParen, "',' or ')'")?;
        }
        self.leave();
        Ok(Expr::new(
            ExprKind::FunctionCall {
                name: name.to_string(),
                args,
            },
            self.span_from(&start),
        ))
    }

    // ---- literals ----

    fn number_literal(&mut self) -> ParseResult<Expr> {
        let start = self.peek().clone();
        let literal = self.number_value()?;
        Ok(Expr::literal(literal, start.to_span()))
    }

    fn number_value(&mut self) -> ParseResult<Literal> {
        let token = self.advance();
        let TokenKind::Number(text) = &token.kind else {
            return Err(ParseError::new(token.to_span(), "number", token.describe()));
        };
        resolver::parse_number(text).map_err(|err| resolve_error(&token, "number", err))
    }

    fn signed_number(&mut self) -> ParseResult<f64> {
        let negate = match self.peek_kind() {
            TokenKind::Minus => {
                self.advance();
                true
            }
            TokenKind::Plus => {
                self.advance();
                false
            }
            _ => false,
        };
        if !matches!(self.peek_kind(), TokenKind::Number(_)) {
            return Err(self.error_here("number"));
        }
        let value = match self.number_value()? {
            Literal::Integer(i) => i as f64,
            Literal::Double(d) => d,
            _ => return Err(self.error_here("number")),
        };
        Ok(if negate { -value } else { value })
    }

    /// `ENVELOPE(west, south, east, north)`
    fn envelope_literal(&mut self) -> ParseResult<Expr> {
        let start = self.advance();
        self.expect(&TokenKind::LeftParen, "'('")?;
        let west = self.signed_number()?;
        self.expect(&TokenKind::Comma, "','")?;
        let south = self.signed_number()?;
        self.expect(&TokenKind::Comma, "','")?;
        let east = self.signed_number()?;
        self.expect(&TokenKind::Comma, "','")?;
        let north = self.signed_number()?;
        self.expect(&TokenKind::RightParen, "')'")?;
        Ok(Expr::new(
            ExprKind::Geometry {
                geometry: Geometry::envelope(west, south, east, north),
                srid: None,
            },
            self.span_from(&start),
        ))
    }

    /// The string argument of `DATE('...')` and `TIMESTAMP('...')`.
    fn temporal_argument(&mut self) -> ParseResult<(Token, String)> {
        self.advance();
        self.expect(&TokenKind::LeftParen, "'('")?;
        let token = self.peek().clone();
        let TokenKind::String(text) = &token.kind else {
            return Err(self.error_here("quoted date or timestamp"));
        };
        let text = text.clone();
        self.advance();
        self.expect(&TokenKind::RightParen, "')'")?;
        Ok((token, text))
    }

    fn date_literal(&mut self) -> ParseResult<Expr> {
        let start = self.peek().clone();
        let (token, text) = self.temporal_argument()?;
        let date = resolver::parse_date(&text)
            .map_err(|err| resolve_error(&token, "date as YYYY-MM-DD", err))?;
        Ok(Expr::literal(Literal::Date(date), self.span_from(&start)))
    }

    fn timestamp_literal(&mut self) -> ParseResult<Expr> {
        let start = self.peek().clone();
        let (token, text) = self.temporal_argument()?;
        let naive_as_utc = self.profile.allows(LegacySyntax::NAIVE_TIMESTAMPS);
        let ts = resolver::parse_timestamp(&text, naive_as_utc)
            .map_err(|err| resolve_error(&token, "RFC 3339 timestamp", err))?;
        Ok(Expr::literal(Literal::Timestamp(ts), self.span_from(&start)))
    }

    /// `INTERVAL(start, end)`; `'..'` marks an open side.
    fn interval_literal(&mut self) -> ParseResult<Expr> {
        let start = self.advance();
        self.expect(&TokenKind::LeftParen, "'('")?;
        self.enter()?;
        let from = self.interval_bound()?;
        self.expect(&TokenKind::Comma, "','")?;
        let to = self.interval_bound()?;
        self.expect(&TokenKind::RightParen, "')'")?;
        self.leave();
        Ok(Expr::new(
            ExprKind::Interval {
                start: Box::new(from),
                end: Box::new(to),
            },
            self.span_from(&start),
        ))
    }

    /// A bare string bound is `'..'` or an instant written without its
    /// `DATE`/`TIMESTAMP` wrapper.
    fn interval_bound(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();
        let TokenKind::String(text) = &token.kind else {
            return self.expression();
        };
        let naive_as_utc = self.profile.allows(LegacySyntax::NAIVE_TIMESTAMPS);
        let kind = if text == cql2_model::OPEN_INTERVAL_MARKER {
            ExprKind::OpenBound
        } else if let Ok(ts) = resolver::parse_timestamp(text, naive_as_utc) {
            ExprKind::Literal(Literal::Timestamp(ts))
        } else if let Ok(date) = resolver::parse_date(text) {
            ExprKind::Literal(Literal::Date(date))
        } else {
            return self.expression();
        };
        self.advance();
        Ok(Expr::new(kind, token.to_span()))
    }

    // ---- geometry ----

    fn at_ewkt_prefix(&self) -> bool {
        self.peek_nth(1).kind == TokenKind::Equal
            && matches!(self.peek_nth(2).kind, TokenKind::Number(_))
            && self.peek_nth(3).kind == TokenKind::Semicolon
    }

    fn geometry_follows(&self) -> bool {
        match &self.peek_nth(1).kind {
            TokenKind::LeftParen => true,
            TokenKind::Identifier(word) => {
                ["EMPTY", "Z", "M", "ZM"].contains(&word.to_ascii_uppercase().as_str())
            }
            _ => false,
        }
    }

    /// `SRID=n;<wkt>`. Kept in the tree so the builder can reject it.
    fn ewkt_geometry(&mut self) -> ParseResult<Expr> {
        let start = self.advance();
        self.advance();
        let srid_token = self.advance();
        let srid = match &srid_token.kind {
            TokenKind::Number(text) => text.parse::<i64>().map_err(|_| {
                ParseError::new(srid_token.to_span(), "integer SRID", srid_token.describe())
            })?,
            _ => return Err(ParseError::new(srid_token.to_span(), "SRID", srid_token.describe())),
        };
        self.advance();

        let is_geometry =
            matches!(self.peek_kind(), TokenKind::Identifier(w) if is_geometry_keyword(w));
        if !is_geometry || !self.geometry_follows() {
            return Err(self.error_here("WKT geometry after SRID prefix"));
        }
        let geometry = self.geometry_literal(Some(srid))?;
        Ok(Expr::new(geometry.kind, self.span_from(&start)))
    }

    /// Finds the extent of a WKT literal in the token stream and hands its
    /// source text to the WKT reader.
    fn geometry_literal(&mut self, srid: Option<i64>) -> ParseResult<Expr> {
        let start = self.advance();
        let mut end = start.span.1;

        let mut empty = false;
        while let TokenKind::Identifier(word) = self.peek_kind() {
            let word = word.to_ascii_uppercase();
            if !["EMPTY", "Z", "M", "ZM"].contains(&word.as_str()) {
                break;
            }
            end = self.advance().span.1;
            if word == "EMPTY" {
                empty = true;
                break;
            }
        }

        if !empty {
            self.expect(&TokenKind::LeftParen, "'('")?;
            let mut open = 1usize;
            while open > 0 {
                let token = self.advance();
                match token.kind {
                    TokenKind::LeftParen => {
                        open += 1;
                        if open > self.profile.max_depth {
                            return Err(ParseError::new(
                                token.to_span(),
                                "shallower nesting",
                                token.describe(),
                            ));
                        }
                    }
                    TokenKind::RightParen => open -= 1,
                    TokenKind::Eof => {
                        return Err(ParseError::new(token.to_span(), "')'", token.describe()));
                    }
                    _ => {}
                }
                end = token.span.1;
            }
        }

        let span = self.span_from(&start);
        let text = self
            .source
            .get(start.span.0..end)
            .ok_or_else(|| ParseError::new(span, "WKT geometry", start.describe()))?;
        let geometry = self.wkt.read(text).map_err(|err| {
            ParseError::new(span, "well-formed WKT geometry", format!("'{text}'"))
                .with_hint(err.to_string())
        })?;
        Ok(Expr::new(ExprKind::Geometry { geometry, srid }, span))
    }
}

fn comparison_op(kind: &TokenKind) -> ComparisonOp {
    match kind {
        TokenKind::NotEqual => ComparisonOp::Ne,
        TokenKind::LessThan => ComparisonOp::Lt,
        TokenKind::LessOrEqual => ComparisonOp::Le,
        TokenKind::GreaterThan => ComparisonOp::Gt,
        TokenKind::GreaterOrEqual => ComparisonOp::Ge,
        _ => ComparisonOp::Eq,
    }
}

fn resolve_error(token: &Token, expected: &str, err: ResolveError) -> ParseError {
    ParseError::new(token.to_span(), expected, token.describe()).with_hint(err.to_string())
}
