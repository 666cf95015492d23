use crate::{
    ast::{
        expr::{Expr, ExprKind},
        predicate::Predicate,
        property::PropertyPath,
        span::Span,
    },
    errors::SemanticError,
    lexer::tokenize,
    parser::{Parser, profile::GrammarProfile},
    semantic::{builder::Builder, functions::FunctionRegistry},
};
use cql2_model::{Expression, Filter, ModelFactory, TextWktReader};

pub fn span(line: usize, col: usize) -> Span {
    Span::new(0, 10, line, col)
}

pub fn property(name: &str, span: Span) -> Expr {
    Expr::new(ExprKind::Property(PropertyPath::dotted(name, span)), span)
}

pub fn parse_predicate(text: &str) -> Predicate {
    let tokens = tokenize(text).unwrap();
    let profile = GrammarProfile::cql2();
    Parser::new(text, &tokens, &profile, &TextWktReader)
        .parse_filter()
        .unwrap()
}

pub fn build(text: &str) -> Result<Filter, SemanticError> {
    let registry = FunctionRegistry::new();
    Builder::new(&ModelFactory, &registry).build_filter(&parse_predicate(text))
}

pub fn build_expr(expr: &Expr) -> Result<Expression, SemanticError> {
    let registry = FunctionRegistry::new();
    Builder::new(&ModelFactory, &registry).build_expression(expr)
}
